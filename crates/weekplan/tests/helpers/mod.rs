use std::{path::PathBuf, str::FromStr};

use mealweek_weekplan::{Day, SqliteStore};
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use sqlx_migrator::{Migrate, Plan};

pub async fn setup_test_store(path: PathBuf) -> anyhow::Result<SqliteStore> {
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.to_str().unwrap()))?
        .create_if_missing(true);
    let pool = SqlitePool::connect_with(opts).await?;
    let mut conn = pool.acquire().await?;
    mealweek_db::migrator()?
        .run(&mut conn, &Plan::apply_all())
        .await?;

    Ok(SqliteStore::new(pool))
}

#[allow(dead_code)]
pub fn day(day_name: &str, ingredients: &str) -> Day {
    Day {
        day_name: day_name.to_owned(),
        ingredients: ingredients.to_owned(),
        ..Day::empty()
    }
}
