use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use mealweek_shared::{Error, Result};
use mealweek_weekplan::{Day, SqliteStore, WeekPlan, WeekPlanStore};
use temp_dir::TempDir;

pub async fn setup_test_store(dir: &TempDir) -> anyhow::Result<SqliteStore> {
    let url = format!("sqlite:{}", dir.child("db.sqlite3").to_str().unwrap());
    let pool = mealweek::db::create_pool(&url, 1).await?;
    mealweek::db::run_migrations(&pool).await?;

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

/// Store that counts writes and fails writes or reads on demand.
pub struct FlakyStore {
    inner: SqliteStore,
    failing: AtomicBool,
    failing_reads: AtomicBool,
    writes: AtomicUsize,
}

#[allow(dead_code)]
impl FlakyStore {
    pub fn new(inner: SqliteStore) -> Self {
        Self {
            inner,
            failing: AtomicBool::new(false),
            failing_reads: AtomicBool::new(false),
            writes: AtomicUsize::new(0),
        }
    }

    pub fn fail(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn fail_reads(&self, failing: bool) {
        self.failing_reads.store(failing, Ordering::SeqCst);
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn write(&self) -> Result<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);

        if self.failing.load(Ordering::SeqCst) {
            return Err(Error::Server("store unavailable".to_owned()));
        }

        Ok(())
    }
}

#[async_trait]
impl WeekPlanStore for FlakyStore {
    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<WeekPlan>> {
        if self.failing_reads.load(Ordering::SeqCst) {
            return Err(Error::Server("store unavailable".to_owned()));
        }

        self.inner.list_by_owner(owner_id).await
    }

    async fn create(&self, owner_id: &str, week_name: &str, days: &[Day]) -> Result<WeekPlan> {
        self.write()?;
        self.inner.create(owner_id, week_name, days).await
    }

    async fn update(&self, id: &str, week_name: &str, days: &[Day]) -> Result<()> {
        self.write()?;
        self.inner.update(id, week_name, days).await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.write()?;
        self.inner.delete(id).await
    }
}
