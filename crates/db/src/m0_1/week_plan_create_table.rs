use sea_query::{ColumnDef, Table, TableCreateStatement, TableDropStatement};

use crate::table::WeekPlanRecord;

pub struct Operation;

fn up_statement() -> TableCreateStatement {
    Table::create()
        .table(WeekPlanRecord::Table)
        .col(
            ColumnDef::new(WeekPlanRecord::Id)
                .string()
                .not_null()
                .string_len(26)
                .primary_key(),
        )
        .col(ColumnDef::new(WeekPlanRecord::OwnerId).string().not_null())
        .col(ColumnDef::new(WeekPlanRecord::WeekName).string().not_null())
        .col(ColumnDef::new(WeekPlanRecord::Days).text().not_null())
        .col(
            ColumnDef::new(WeekPlanRecord::CreatedAt)
                .big_integer()
                .not_null(),
        )
        .col(ColumnDef::new(WeekPlanRecord::UpdatedAt).big_integer().null())
        .to_owned()
}

fn down_statement() -> TableDropStatement {
    Table::drop().table(WeekPlanRecord::Table).to_owned()
}

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for Operation {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = up_statement().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = down_statement().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }
}
