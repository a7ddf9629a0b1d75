use std::borrow::Cow;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use validator::{Validate, ValidationError};

use crate::{DayField, DayName};

fn new_day_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message(Cow::Borrowed("must not be blank")));
    }

    Ok(())
}

fn weekday_name(value: &str) -> Result<(), ValidationError> {
    not_blank(value)?;

    if DayName::from_str(value.trim()).is_err() {
        return Err(ValidationError::new("weekday")
            .with_message(Cow::Borrowed("must be a weekday from Monday to Sunday")));
    }

    Ok(())
}

/// Reads a missing or `null` text field as an empty string.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// One weekday of a plan: three meals and a comma separated ingredient list.
///
/// `id` only exists to target edits from the form. It is never persisted and a
/// fresh one is generated whenever a day is loaded.
#[derive(Validate, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Day {
    #[serde(skip, default = "new_day_id")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(custom(function = "weekday_name"))]
    pub day_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub breakfast: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub lunch: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub dinner: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub ingredients: String,
}

impl Day {
    pub fn empty() -> Self {
        Self {
            id: new_day_id(),
            day_name: String::new(),
            breakfast: String::new(),
            lunch: String::new(),
            dinner: String::new(),
            ingredients: String::new(),
        }
    }

    /// Selected weekday, `None` while the day is still unnamed.
    pub fn weekday(&self) -> Option<DayName> {
        DayName::from_str(self.day_name.trim()).ok()
    }

    pub fn get(&self, field: DayField) -> &str {
        match field {
            DayField::DayName => &self.day_name,
            DayField::Breakfast => &self.breakfast,
            DayField::Lunch => &self.lunch,
            DayField::Dinner => &self.dinner,
            DayField::Ingredients => &self.ingredients,
        }
    }

    pub fn set(&mut self, field: DayField, value: impl Into<String>) {
        let value = value.into();
        match field {
            DayField::DayName => self.day_name = value,
            DayField::Breakfast => self.breakfast = value,
            DayField::Lunch => self.lunch = value,
            DayField::Dinner => self.dinner = value,
            DayField::Ingredients => self.ingredients = value,
        }
    }
}

#[derive(Validate, Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WeekPlan {
    /// Assigned by the store on first save.
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(custom(function = "not_blank"))]
    pub week_name: String,
    #[serde(default)]
    #[validate(nested)]
    pub days: Vec<Day>,
    #[serde(default)]
    pub owner_id: String,
}

impl WeekPlan {
    /// A fresh, unsaved plan holding a single empty day.
    pub fn new(owner_id: impl Into<String>) -> Self {
        Self {
            id: None,
            week_name: String::new(),
            days: vec![Day::empty()],
            owner_id: owner_id.into(),
        }
    }

    pub fn day(&self, day_id: &str) -> Option<&Day> {
        self.days.iter().find(|day| day.id == day_id)
    }

    pub fn set_week_name(&mut self, week_name: impl Into<String>) {
        self.week_name = week_name.into();
    }

    /// Appends an empty day and returns it.
    pub fn add_day(&mut self) -> &Day {
        self.days.push(Day::empty());
        &self.days[self.days.len() - 1]
    }

    /// Removes the matching day. Unknown ids leave the plan untouched.
    pub fn remove_day(&mut self, day_id: &str) -> bool {
        let len = self.days.len();
        self.days.retain(|day| day.id != day_id);

        len != self.days.len()
    }

    /// Sets one field of the matching day. Unknown ids leave the plan untouched.
    pub fn update_day_field(
        &mut self,
        day_id: &str,
        field: DayField,
        value: impl Into<String>,
    ) -> bool {
        let Some(day) = self.days.iter_mut().find(|day| day.id == day_id) else {
            return false;
        };

        day.set(field, value);

        true
    }

    /// Whether the plan may be saved: a week name and a weekday for every day.
    pub fn is_complete(&self) -> bool {
        self.validate().is_ok()
    }

    pub fn check_complete(&self) -> mealweek_shared::Result<()> {
        self.validate()?;

        Ok(())
    }
}
