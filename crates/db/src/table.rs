use sea_query::Iden;

#[derive(Iden, Clone)]
pub enum WeekPlanRecord {
    Table,
    Id,
    OwnerId,
    WeekName,
    Days,
    CreatedAt,
    UpdatedAt,
}
