use async_trait::async_trait;
use mealweek_db::table::WeekPlanRecord;
use mealweek_shared::{Error, Result};
use sea_query::{Expr, ExprTrait, Order, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::{SqlitePool, prelude::FromRow};
use time::OffsetDateTime;
use ulid::Ulid;

use crate::{Day, WeekPlan, WeekPlanStore};

#[derive(Clone)]
pub struct SqliteStore {
    pub read_db: SqlitePool,
    pub write_db: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            read_db: pool.clone(),
            write_db: pool,
        }
    }
}

#[derive(Default, FromRow)]
pub struct WeekPlanRow {
    pub id: String,
    pub owner_id: String,
    pub week_name: String,
    pub days: String,
}

impl TryFrom<WeekPlanRow> for WeekPlan {
    type Error = Error;

    fn try_from(row: WeekPlanRow) -> Result<Self> {
        Ok(WeekPlan {
            id: Some(row.id),
            week_name: row.week_name,
            days: serde_json::from_str(&row.days)?,
            owner_id: row.owner_id,
        })
    }
}

fn now() -> i64 {
    OffsetDateTime::now_utc().unix_timestamp()
}

#[async_trait]
impl WeekPlanStore for SqliteStore {
    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<WeekPlan>> {
        let statement = Query::select()
            .columns([
                WeekPlanRecord::Id,
                WeekPlanRecord::OwnerId,
                WeekPlanRecord::WeekName,
                WeekPlanRecord::Days,
            ])
            .from(WeekPlanRecord::Table)
            .and_where(Expr::col(WeekPlanRecord::OwnerId).eq(owner_id))
            .order_by_expr(Expr::cust("rowid"), Order::Asc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        let rows = sqlx::query_as_with::<_, WeekPlanRow, _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?;

        tracing::debug!(owner_id, count = rows.len(), "week plans loaded");

        rows.into_iter().map(WeekPlan::try_from).collect()
    }

    async fn create(&self, owner_id: &str, week_name: &str, days: &[Day]) -> Result<WeekPlan> {
        let id = Ulid::new().to_string();
        let encoded = serde_json::to_string(days)?;

        let statement = Query::insert()
            .into_table(WeekPlanRecord::Table)
            .columns([
                WeekPlanRecord::Id,
                WeekPlanRecord::OwnerId,
                WeekPlanRecord::WeekName,
                WeekPlanRecord::Days,
                WeekPlanRecord::CreatedAt,
            ])
            .values_panic([
                id.to_owned().into(),
                owner_id.into(),
                week_name.into(),
                encoded.into(),
                now().into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values)
            .execute(&self.write_db)
            .await?;

        tracing::info!(id = %id, owner_id, "week plan created");

        Ok(WeekPlan {
            id: Some(id),
            week_name: week_name.to_owned(),
            days: days.to_vec(),
            owner_id: owner_id.to_owned(),
        })
    }

    async fn update(&self, id: &str, week_name: &str, days: &[Day]) -> Result<()> {
        let encoded = serde_json::to_string(days)?;

        let statement = Query::update()
            .table(WeekPlanRecord::Table)
            .values([
                (WeekPlanRecord::WeekName, week_name.into()),
                (WeekPlanRecord::Days, encoded.into()),
                (WeekPlanRecord::UpdatedAt, now().into()),
            ])
            .and_where(Expr::col(WeekPlanRecord::Id).eq(id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values)
            .execute(&self.write_db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound);
        }

        tracing::info!(id, "week plan updated");

        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let statement = Query::delete()
            .from_table(WeekPlanRecord::Table)
            .and_where(Expr::col(WeekPlanRecord::Id).eq(id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values)
            .execute(&self.write_db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound);
        }

        tracing::info!(id, "week plan deleted");

        Ok(())
    }
}
