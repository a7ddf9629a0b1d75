mod week_plan_create_owner_idx;
mod week_plan_create_table;

use sqlx_migrator::vec_box;

pub struct M0_1;

sqlx_migrator::sqlite_migration!(
    M0_1,
    "main",
    "m0_1",
    vec_box![],
    vec_box![
        week_plan_create_table::Operation,
        week_plan_create_owner_idx::Operation
    ]
);
