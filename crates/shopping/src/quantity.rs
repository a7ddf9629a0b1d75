use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

use crate::normalize::normalize_token;

#[derive(
    EnumString,
    Display,
    VariantArray,
    AsRefStr,
    Default,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum Unit {
    #[default]
    #[serde(rename = "")]
    #[strum(serialize = "")]
    Blank,
    #[serde(rename = "g")]
    #[strum(serialize = "g")]
    G,
    #[serde(rename = "ml")]
    #[strum(serialize = "ml")]
    Ml,
    #[serde(rename = "kg")]
    #[strum(serialize = "kg")]
    Kg,
    #[serde(rename = "l")]
    #[strum(serialize = "l")]
    L,
    #[serde(rename = "pc")]
    #[strum(serialize = "pc")]
    Pc,
    #[serde(rename = "pkt")]
    #[strum(serialize = "pkt")]
    Pkt,
}

/// What the user typed next to an ingredient of the shopping list.
#[derive(Default, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quantity {
    pub quantity: String,
    pub unit: Unit,
}

impl Quantity {
    pub fn new(quantity: impl Into<String>, unit: Unit) -> Self {
        Self {
            quantity: quantity.into(),
            unit,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.quantity.trim().is_empty() && self.unit == Unit::Blank
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts = [self.quantity.trim(), self.unit.as_ref()];
        let mut parts = parts.iter().filter(|part| !part.is_empty());

        if let Some(first) = parts.next() {
            f.write_str(first)?;
        }
        for part in parts {
            write!(f, " {part}")?;
        }

        Ok(())
    }
}

/// Quantities entered per ingredient, keyed by normalized token.
///
/// Lives with the session, never with the stored plan.
#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub struct QuantityBook(HashMap<String, Quantity>);

impl QuantityBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records what was entered for `ingredient`. Clearing both inputs drops the entry.
    pub fn set(&mut self, ingredient: &str, quantity: impl Into<String>, unit: Unit) {
        let key = normalize_token(ingredient);
        if key.is_empty() {
            return;
        }

        let quantity = Quantity::new(quantity, unit);
        if quantity.is_blank() {
            self.remove(&key);
            return;
        }

        self.0.insert(key, quantity);
    }

    pub fn remove(&mut self, ingredient: &str) -> Option<Quantity> {
        self.0.remove(&normalize_token(ingredient))
    }

    pub fn get(&self, ingredient: &str) -> Option<&Quantity> {
        self.0.get(&normalize_token(ingredient))
    }

    /// Entry for `ingredient`, blank when nothing was entered.
    pub fn lookup(&self, ingredient: &str) -> Quantity {
        self.get(ingredient).cloned().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: AsRef<str>> FromIterator<(K, Quantity)> for QuantityBook {
    fn from_iter<I: IntoIterator<Item = (K, Quantity)>>(iter: I) -> Self {
        let mut book = Self::new();
        for (ingredient, quantity) in iter {
            book.set(ingredient.as_ref(), quantity.quantity, quantity.unit);
        }

        book
    }
}
