pub mod export;
pub mod week;

use mealweek::config::Config;
use mealweek::session::Session;
use mealweek_shared::Identity;
use mealweek_weekplan::SqliteStore;

pub async fn open_session(config: &Config, identity: &Identity) -> anyhow::Result<Session<SqliteStore>> {
    let pool = mealweek::db::create_pool(&config.database.url, config.database.max_connections).await?;
    mealweek::db::run_migrations(&pool).await?;

    Ok(Session::open(SqliteStore::new(pool), identity).await?)
}
