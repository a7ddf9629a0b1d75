//! One signed-in user's view of their week plans and the plan form.
//!
//! The form moves `Browsing -> Creating -> Browsing` or
//! `Browsing -> Editing -> Browsing`, leaving through a successful save or a
//! cancel. Store calls happen one at a time and the session only changes
//! after they succeed.

use std::collections::HashMap;

use mealweek_shared::{Error, Identity, Result};
use mealweek_shopping::{
    AggregatedIngredient, Document, DocumentRenderer, IngredientAggregationService, QuantityBook,
    Unit,
};
use mealweek_weekplan::{WeekPlan, WeekPlanStore};
use strum::Display;

/// Shown to the user after any failed store call.
pub const FAILURE_MESSAGE: &str = "Something went wrong. Try again, please!";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Form {
    Browsing,
    Creating(WeekPlan),
    Editing(WeekPlan),
}

#[derive(Display, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    #[strum(serialize = "Week saved")]
    WeekSaved,
    #[strum(serialize = "Week edited and saved")]
    WeekEdited,
    #[strum(serialize = "Week deleted")]
    WeekDeleted,
}

pub struct Session<S: WeekPlanStore> {
    store: S,
    owner_id: String,
    weeks: Vec<WeekPlan>,
    form: Form,
    quantities: HashMap<String, QuantityBook>,
}

impl<S: WeekPlanStore> Session<S> {
    /// Loads every plan of the signed-in user.
    pub async fn open(store: S, identity: &Identity) -> Result<Self> {
        let owner_id = identity.owner_id()?.to_owned();
        let weeks = store.list_by_owner(&owner_id).await?;

        tracing::debug!(owner_id = %owner_id, weeks = weeks.len(), "Session opened");

        Ok(Self {
            store,
            owner_id,
            weeks,
            form: Form::Browsing,
            quantities: HashMap::new(),
        })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn owner_id(&self) -> &str {
        &self.owner_id
    }

    pub fn weeks(&self) -> &[WeekPlan] {
        &self.weeks
    }

    pub fn week(&self, week_id: &str) -> Option<&WeekPlan> {
        self.weeks
            .iter()
            .find(|week| week.id.as_deref() == Some(week_id))
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn draft(&self) -> Option<&WeekPlan> {
        match &self.form {
            Form::Creating(draft) | Form::Editing(draft) => Some(draft),
            Form::Browsing => None,
        }
    }

    pub fn draft_mut(&mut self) -> Option<&mut WeekPlan> {
        match &mut self.form {
            Form::Creating(draft) | Form::Editing(draft) => Some(draft),
            Form::Browsing => None,
        }
    }

    /// Starts a new plan with a single empty day.
    pub fn open_create(&mut self) -> Result<&mut WeekPlan> {
        self.ensure_browsing()?;
        self.form = Form::Creating(WeekPlan::new(&self.owner_id));

        self.draft_mut()
            .ok_or_else(|| Error::Server("week form not open".to_owned()))
    }

    /// Copies a stored plan into the form.
    pub fn open_edit(&mut self, week_id: &str) -> Result<&mut WeekPlan> {
        self.ensure_browsing()?;
        let week = self.week(week_id).cloned().ok_or(Error::NotFound)?;
        self.form = Form::Editing(week);

        self.draft_mut()
            .ok_or_else(|| Error::Server("week form not open".to_owned()))
    }

    pub fn can_save(&self) -> bool {
        self.draft().is_some_and(WeekPlan::is_complete)
    }

    /// Persists the open draft, then reloads the plans and closes the form.
    ///
    /// An incomplete draft is rejected before the store is called. On any
    /// failure the session is left as it was.
    pub async fn save(&mut self) -> Result<Notice> {
        let (draft, editing) = match &self.form {
            Form::Creating(draft) => (draft, false),
            Form::Editing(draft) => (draft, true),
            Form::Browsing => mealweek_shared::bail!("no week form open"),
        };

        draft.check_complete()?;

        let notice = if editing {
            let Some(id) = draft.id.as_deref() else {
                mealweek_shared::bail!("edited week has no id");
            };

            if let Err(err) = self
                .store
                .update(id, &draft.week_name, &draft.days)
                .await
            {
                tracing::error!(err = %err, week_id = id, "Error editing week");
                return Err(err);
            }

            Notice::WeekEdited
        } else {
            if let Err(err) = self
                .store
                .create(&self.owner_id, &draft.week_name, &draft.days)
                .await
            {
                tracing::error!(err = %err, "Error saving week");
                return Err(err);
            }

            Notice::WeekSaved
        };

        self.form = Form::Browsing;
        if let Err(err) = self.reload().await {
            tracing::warn!(err = %err, "Week saved but the list could not be reloaded");
        }

        Ok(notice)
    }

    pub fn cancel(&mut self) {
        self.form = Form::Browsing;
    }

    pub async fn delete(&mut self, week_id: &str) -> Result<Notice> {
        if let Err(err) = self.store.delete(week_id).await {
            tracing::error!(err = %err, week_id, "Error deleting week");
            return Err(err);
        }

        self.quantities.remove(week_id);
        if let Err(err) = self.reload().await {
            tracing::warn!(err = %err, "Week deleted but the list could not be reloaded");
            self.weeks
                .retain(|week| week.id.as_deref() != Some(week_id));
        }

        Ok(Notice::WeekDeleted)
    }

    pub async fn reload(&mut self) -> Result<()> {
        self.weeks = self.store.list_by_owner(&self.owner_id).await?;

        Ok(())
    }

    /// Ingredient mentions across every loaded plan.
    pub fn mention_count(&self) -> usize {
        IngredientAggregationService::count_mentions(&self.weeks)
    }

    pub fn quantities(&self, week_id: &str) -> Option<&QuantityBook> {
        self.quantities.get(week_id)
    }

    pub fn set_quantity(
        &mut self,
        week_id: &str,
        ingredient: &str,
        quantity: impl Into<String>,
        unit: Unit,
    ) -> Result<()> {
        if self.week(week_id).is_none() {
            return Err(Error::NotFound);
        }

        self.quantities
            .entry(week_id.to_owned())
            .or_default()
            .set(ingredient, quantity, unit);

        Ok(())
    }

    /// Distinct ingredients of a stored plan with the quantities entered so far.
    pub fn shopping_list(&self, week_id: &str) -> Option<Vec<AggregatedIngredient>> {
        let week = self.week(week_id)?;
        let book = self.quantities.get(week_id).cloned().unwrap_or_default();

        Some(IngredientAggregationService::aggregate(week, &book))
    }

    pub fn document(&self, week_id: &str, title: &str) -> Option<Document> {
        let week = self.week(week_id)?;
        let book = self.quantities.get(week_id).cloned().unwrap_or_default();

        Some(Document::shopping_list(title, week, &book))
    }

    /// Builds the shopping list document of a stored plan and hands it over.
    pub async fn export(
        &self,
        week_id: &str,
        title: &str,
        renderer: &dyn DocumentRenderer,
    ) -> Result<Document> {
        let document = self.document(week_id, title).ok_or(Error::NotFound)?;

        renderer.render(&document).await?;

        Ok(document)
    }

    fn ensure_browsing(&self) -> Result<()> {
        if self.form != Form::Browsing {
            mealweek_shared::bail!("a week form is already open");
        }

        Ok(())
    }
}
