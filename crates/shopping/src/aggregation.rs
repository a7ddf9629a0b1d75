use std::collections::HashSet;

use mealweek_weekplan::WeekPlan;

use crate::normalize::tokens;
use crate::quantity::{QuantityBook, Unit};

/// One distinct ingredient of a shopping list with what the user entered for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatedIngredient {
    pub key: String,
    pub quantity: String,
    pub unit: Unit,
}

/// Ingredient Aggregation Service
///
/// Stateless domain service turning the free-text ingredient fields of week
/// plans into shopping list entries.
///
/// - tokens are compared after trimming and lowercasing
/// - the first occurrence decides the position in the list
/// - quantities come from a [`QuantityBook`], never from the ingredient text
pub struct IngredientAggregationService;

impl IngredientAggregationService {
    /// Every ingredient token of `plan`, days top to bottom.
    pub fn week_tokens(plan: &WeekPlan) -> impl Iterator<Item = String> + '_ {
        plan.days.iter().flat_map(|day| tokens(&day.ingredients))
    }

    /// Number of ingredient mentions across all plans, duplicates included.
    ///
    /// Used for the running count shown above the shopping lists.
    pub fn count_mentions<'a>(plans: impl IntoIterator<Item = &'a WeekPlan>) -> usize {
        plans
            .into_iter()
            .map(|plan| Self::week_tokens(plan).count())
            .sum()
    }

    /// Distinct ingredients of one plan in first-seen order.
    pub fn distinct(plan: &WeekPlan) -> Vec<String> {
        Self::dedup(Self::week_tokens(plan))
    }

    /// Distinct ingredients across several plans, first-seen order.
    pub fn distinct_across<'a>(plans: impl IntoIterator<Item = &'a WeekPlan>) -> Vec<String> {
        Self::dedup(plans.into_iter().flat_map(Self::week_tokens))
    }

    /// Distinct ingredients of `plan` with their entered quantity and unit.
    ///
    /// Ingredients missing from `book` come back with a blank quantity and unit.
    pub fn aggregate(plan: &WeekPlan, book: &QuantityBook) -> Vec<AggregatedIngredient> {
        Self::distinct(plan)
            .into_iter()
            .map(|key| {
                let entry = book.lookup(&key);

                AggregatedIngredient {
                    key,
                    quantity: entry.quantity,
                    unit: entry.unit,
                }
            })
            .collect()
    }

    fn dedup(tokens: impl Iterator<Item = String>) -> Vec<String> {
        let mut seen = HashSet::new();

        tokens.filter(|token| seen.insert(token.clone())).collect()
    }
}
