use std::path::Path;

use mealweek::config::Config;
use mealweek::session::{FAILURE_MESSAGE, Session};
use mealweek_shared::{Error, Identity};
use mealweek_shopping::IngredientAggregationService;
use mealweek_weekplan::{DayField, WeekPlan, WeekPlanStore};
use strum::VariantArray;

/// Reads a plan file written in the stored layout (`{"weekName": .., "days": [..]}`).
pub fn read_plan(path: &Path) -> anyhow::Result<WeekPlan> {
    let content = std::fs::read_to_string(path)?;

    Ok(serde_json::from_str(&content)?)
}

/// Copies `plan` into the form draft through the same edits the form performs.
pub fn fill_draft(draft: &mut WeekPlan, plan: &WeekPlan) {
    draft.set_week_name(plan.week_name.to_owned());

    let mut ids = draft
        .days
        .iter()
        .map(|day| day.id.to_owned())
        .collect::<Vec<_>>();

    while ids.len() < plan.days.len() {
        ids.push(draft.add_day().id.to_owned());
    }

    for stale in ids.split_off(plan.days.len()) {
        draft.remove_day(&stale);
    }

    for (id, day) in ids.iter().zip(&plan.days) {
        for field in DayField::VARIANTS {
            draft.update_day_field(id, *field, day.get(*field));
        }
    }
}

async fn save<S: WeekPlanStore>(session: &mut Session<S>) -> anyhow::Result<()> {
    match session.save().await {
        Ok(notice) => {
            println!("{notice}");
            Ok(())
        }
        Err(Error::Validate(errors)) => {
            session.cancel();
            anyhow::bail!("week name and every day name are required: {errors}")
        }
        Err(err) => {
            if err.is_persistence() {
                println!("{FAILURE_MESSAGE}");
            }
            Err(err.into())
        }
    }
}

pub async fn list(config: Config, identity: Identity) -> anyhow::Result<()> {
    let session = super::open_session(&config, &identity).await?;

    println!("Shopping lists {}", session.mention_count());

    for week in session.weeks() {
        let id = week.id.as_deref().unwrap_or_default();
        println!();
        println!("{} ({id})", week.week_name);

        for day in &week.days {
            println!(
                "  {:<9} breakfast: {} | lunch: {} | dinner: {}",
                day.day_name, day.breakfast, day.lunch, day.dinner
            );
        }

        for ingredient in IngredientAggregationService::distinct(week) {
            println!("  - {ingredient}");
        }
    }

    Ok(())
}

pub async fn create(config: Config, identity: Identity, file: &Path) -> anyhow::Result<()> {
    let plan = read_plan(file)?;
    let mut session = super::open_session(&config, &identity).await?;

    let draft = session.open_create()?;
    fill_draft(draft, &plan);

    save(&mut session).await
}

pub async fn edit(config: Config, identity: Identity, id: &str, file: &Path) -> anyhow::Result<()> {
    let plan = read_plan(file)?;
    let mut session = super::open_session(&config, &identity).await?;

    let draft = session.open_edit(id)?;
    fill_draft(draft, &plan);

    save(&mut session).await
}

pub async fn delete(config: Config, identity: Identity, id: &str) -> anyhow::Result<()> {
    let mut session = super::open_session(&config, &identity).await?;

    if session.week(id).is_none() {
        anyhow::bail!("week {id} not found");
    }

    match session.delete(id).await {
        Ok(notice) => {
            println!("{notice}");
            Ok(())
        }
        Err(err) => {
            if err.is_persistence() {
                println!("{FAILURE_MESSAGE}");
            }
            Err(err.into())
        }
    }
}
