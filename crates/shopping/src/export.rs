use async_trait::async_trait;
use mealweek_weekplan::WeekPlan;

use crate::aggregation::{AggregatedIngredient, IngredientAggregationService};
use crate::quantity::{QuantityBook, Unit};

pub const DEFAULT_TITLE: &str = "Your shopping list";

/// One row of the exported shopping list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    pub ingredient: String,
    pub quantity: String,
    pub unit: Unit,
    /// `<quantity> <unit> <ingredient>` with blank parts left out, so a missing
    /// quantity gives `flour` rather than `  flour`.
    pub text: String,
}

impl From<AggregatedIngredient> for LineItem {
    fn from(value: AggregatedIngredient) -> Self {
        let text = [value.quantity.trim(), value.unit.as_ref(), value.key.as_str()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        Self {
            ingredient: value.key,
            quantity: value.quantity,
            unit: value.unit,
            text,
        }
    }
}

/// One line item per distinct ingredient of `plan`, first-seen order.
pub fn build_shopping_list_document(plan: &WeekPlan, book: &QuantityBook) -> Vec<LineItem> {
    IngredientAggregationService::aggregate(plan, book)
        .into_iter()
        .map(LineItem::from)
        .collect()
}

/// A titled list ready to be laid out by a [`DocumentRenderer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub title: String,
    pub items: Vec<LineItem>,
}

impl Document {
    pub fn shopping_list(title: impl Into<String>, plan: &WeekPlan, book: &QuantityBook) -> Self {
        Self {
            title: title.into(),
            items: build_shopping_list_document(plan, book),
        }
    }

    pub fn lines(&self) -> Vec<&str> {
        self.items.iter().map(|item| item.text.as_str()).collect()
    }
}

/// Lays out a finished document and makes it available to the user.
#[async_trait]
pub trait DocumentRenderer: Send + Sync {
    async fn render(&self, document: &Document) -> anyhow::Result<()>;
}
