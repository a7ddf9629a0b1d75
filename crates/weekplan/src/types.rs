use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

#[derive(
    EnumString,
    Display,
    VariantArray,
    AsRefStr,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
)]
pub enum DayName {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

/// Editable text fields of a [`crate::Day`], named the way the plan form names them.
#[derive(EnumString, Display, VariantArray, AsRefStr, Clone, Copy, Debug, PartialEq, Eq)]
pub enum DayField {
    #[strum(serialize = "dayName")]
    DayName,
    #[strum(serialize = "breakfast")]
    Breakfast,
    #[strum(serialize = "lunch")]
    Lunch,
    #[strum(serialize = "dinner")]
    Dinner,
    #[strum(serialize = "ingredients")]
    Ingredients,
}
