use async_trait::async_trait;
use mealweek_shared::Result;

use crate::{Day, WeekPlan};

/// Storage collaborator holding one record per week plan.
///
/// Every call may fail; callers surface the error and never retry.
#[async_trait]
pub trait WeekPlanStore: Send + Sync {
    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<WeekPlan>>;

    /// Persists a new plan and returns it with its assigned id.
    async fn create(&self, owner_id: &str, week_name: &str, days: &[Day]) -> Result<WeekPlan>;

    async fn update(&self, id: &str, week_name: &str, days: &[Day]) -> Result<()>;

    async fn delete(&self, id: &str) -> Result<()>;
}
