mod helpers;

use helpers::{FlakyStore, day, setup_test_store};
use mealweek::{FileRenderer, Form, Format, Notice, Session};
use mealweek_shared::{Error, Identity};
use mealweek_shopping::Unit;
use mealweek_weekplan::{DayField, WeekPlanStore};
use temp_dir::TempDir;

fn john() -> Identity {
    Identity::from_subject("auth0|john")
}

async fn open(dir: &TempDir) -> anyhow::Result<Session<FlakyStore>> {
    let store = FlakyStore::new(setup_test_store(dir).await?);

    Ok(Session::open(store, &john()).await?)
}

async fn create_week(
    session: &mut Session<FlakyStore>,
    week_name: &str,
    ingredients: &str,
) -> anyhow::Result<String> {
    let draft = session.open_create()?;
    draft.set_week_name(week_name);
    let day_id = draft.days[0].id.to_owned();
    draft.update_day_field(&day_id, DayField::DayName, "Monday");
    draft.update_day_field(&day_id, DayField::Ingredients, ingredients);
    session.save().await?;

    let week = session
        .weeks()
        .iter()
        .find(|week| week.week_name == week_name)
        .and_then(|week| week.id.to_owned())
        .expect("saved week is listed");

    Ok(week)
}

#[tokio::test]
async fn test_open_requires_authenticated_user() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let store = setup_test_store(&dir).await?;

    let err = Session::open(store, &Identity::anonymous()).await.err();
    assert!(matches!(err, Some(Error::Forbidden)));

    Ok(())
}

#[tokio::test]
async fn test_create_week() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let mut session = open(&dir).await?;
    assert_eq!(session.owner_id(), "john");
    assert!(session.weeks().is_empty());

    let draft = session.open_create()?;
    assert_eq!(draft.days.len(), 1);
    assert!(!session.can_save());

    let draft = session.draft_mut().unwrap();
    draft.set_week_name("Week 1");
    let monday = draft.days[0].id.to_owned();
    draft.update_day_field(&monday, DayField::DayName, "Monday");
    draft.update_day_field(&monday, DayField::Ingredients, "Flour, Sugar");
    let tuesday = draft.add_day().id.to_owned();
    draft.update_day_field(&tuesday, DayField::DayName, "Tuesday");
    draft.update_day_field(&tuesday, DayField::Ingredients, "flour , eggs");
    assert!(session.can_save());

    assert_eq!(session.save().await?, Notice::WeekSaved);
    assert_eq!(Notice::WeekSaved.to_string(), "Week saved");
    assert_eq!(session.form(), &Form::Browsing);
    assert_eq!(session.weeks().len(), 1);
    assert_eq!(session.weeks()[0].days.len(), 2);
    assert_eq!(session.mention_count(), 4);

    Ok(())
}

#[tokio::test]
async fn test_incomplete_draft_never_reaches_store() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let mut session = open(&dir).await?;

    let draft = session.open_create()?;
    draft.set_week_name("Week 1");

    let err = session.save().await.err();
    assert!(matches!(err, Some(Error::Validate(_))));
    assert_eq!(session.store().writes(), 0);
    assert!(matches!(session.form(), Form::Creating(_)));

    Ok(())
}

#[tokio::test]
async fn test_edit_week() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let mut session = open(&dir).await?;
    let id = create_week(&mut session, "Week 1", "Flour").await?;

    let draft = session.open_edit(&id)?;
    assert_eq!(draft.week_name, "Week 1");
    draft.set_week_name("Week 2");
    let day_id = draft.add_day().id.to_owned();
    draft.update_day_field(&day_id, DayField::DayName, "Sunday");

    assert_eq!(session.save().await?, Notice::WeekEdited);
    assert_eq!(Notice::WeekEdited.to_string(), "Week edited and saved");

    let week = session.week(&id).unwrap();
    assert_eq!(week.week_name, "Week 2");
    assert_eq!(week.days.len(), 2);
    assert_eq!(week.days[1].day_name, "Sunday");

    Ok(())
}

#[tokio::test]
async fn test_edit_unknown_week() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let mut session = open(&dir).await?;

    assert!(matches!(session.open_edit("missing"), Err(Error::NotFound)));
    assert_eq!(session.form(), &Form::Browsing);

    Ok(())
}

#[tokio::test]
async fn test_cancel_discards_draft() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let mut session = open(&dir).await?;
    let id = create_week(&mut session, "Week 1", "Flour").await?;

    session.open_edit(&id)?.set_week_name("Renamed");
    session.cancel();

    assert_eq!(session.form(), &Form::Browsing);
    assert!(session.draft().is_none());
    assert_eq!(session.week(&id).unwrap().week_name, "Week 1");

    Ok(())
}

#[tokio::test]
async fn test_only_one_form_at_a_time() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let mut session = open(&dir).await?;
    let id = create_week(&mut session, "Week 1", "Flour").await?;

    session.open_create()?;
    assert!(session.open_create().is_err());
    assert!(session.open_edit(&id).is_err());
    assert!(matches!(session.form(), Form::Creating(_)));

    Ok(())
}

#[tokio::test]
async fn test_failed_save_keeps_state() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let mut session = open(&dir).await?;

    let draft = session.open_create()?;
    draft.set_week_name("Week 1");
    let day_id = draft.days[0].id.to_owned();
    draft.update_day_field(&day_id, DayField::DayName, "Monday");

    session.store().fail(true);
    let err = session.save().await.err();
    assert!(matches!(err, Some(Error::Server(_))));
    assert!(session.weeks().is_empty());
    assert_eq!(session.draft().map(|d| d.week_name.as_str()), Some("Week 1"));

    session.store().fail(false);
    assert_eq!(session.save().await?, Notice::WeekSaved);
    assert_eq!(session.weeks().len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_failed_edit_keeps_draft() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let mut session = open(&dir).await?;
    let id = create_week(&mut session, "Week 1", "Flour").await?;

    session.open_edit(&id)?.set_week_name("Renamed");

    session.store().fail(true);
    let err = session.save().await.err();
    assert!(matches!(err, Some(Error::Server(_))));
    assert!(matches!(session.form(), Form::Editing(_)));
    assert_eq!(session.draft().map(|d| d.week_name.as_str()), Some("Renamed"));
    assert_eq!(session.week(&id).unwrap().week_name, "Week 1");

    session.store().fail(false);
    assert_eq!(session.save().await?, Notice::WeekEdited);
    assert_eq!(session.week(&id).unwrap().week_name, "Renamed");

    Ok(())
}

#[tokio::test]
async fn test_save_succeeds_when_reload_fails() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let mut session = open(&dir).await?;
    create_week(&mut session, "Week 1", "Flour").await?;

    let draft = session.open_create()?;
    draft.set_week_name("Week 2");
    let day_id = draft.days[0].id.to_owned();
    draft.update_day_field(&day_id, DayField::DayName, "Tuesday");

    session.store().fail_reads(true);
    assert_eq!(session.save().await?, Notice::WeekSaved);
    assert_eq!(session.form(), &Form::Browsing);
    assert_eq!(session.weeks().len(), 1);

    session.store().fail_reads(false);
    session.reload().await?;
    assert_eq!(session.weeks().len(), 2);

    Ok(())
}

#[tokio::test]
async fn test_delete_week() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let mut session = open(&dir).await?;
    let first = create_week(&mut session, "Week 1", "Flour").await?;
    let second = create_week(&mut session, "Week 2", "Eggs").await?;

    session.store().fail(true);
    assert!(session.delete(&first).await.is_err());
    assert_eq!(session.weeks().len(), 2);

    session.store().fail(false);
    assert_eq!(session.delete(&first).await?, Notice::WeekDeleted);
    assert_eq!(session.weeks().len(), 1);
    assert!(session.week(&second).is_some());

    assert!(matches!(session.delete(&first).await, Err(Error::NotFound)));

    Ok(())
}

#[tokio::test]
async fn test_weeks_are_scoped_to_owner() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let mut session = open(&dir).await?;
    create_week(&mut session, "Week 1", "Flour").await?;

    session
        .store()
        .create("jane", "Jane's week", &[day("Friday", "Fish")])
        .await?;
    session.reload().await?;
    assert_eq!(session.weeks().len(), 1);

    let jane = Session::open(
        FlakyStore::new(setup_test_store(&dir).await?),
        &Identity::from_subject("google-oauth2|jane"),
    )
    .await?;
    assert_eq!(jane.weeks().len(), 1);
    assert_eq!(jane.weeks()[0].week_name, "Jane's week");

    Ok(())
}

#[tokio::test]
async fn test_shopping_list_uses_entered_quantities() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let mut session = open(&dir).await?;
    let id = create_week(&mut session, "Week 1", "Flour, Sugar, flour").await?;

    assert!(session.quantities(&id).is_none());
    session.set_quantity(&id, "Flour", "2", Unit::Kg)?;
    assert!(matches!(
        session.set_quantity("missing", "flour", "1", Unit::Kg),
        Err(Error::NotFound)
    ));

    let list = session.shopping_list(&id).unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0].key, "flour");
    assert_eq!(list[0].quantity, "2");
    assert_eq!(list[0].unit, Unit::Kg);
    assert_eq!(list[1].key, "sugar");
    assert_eq!(list[1].quantity, "");

    let document = session.document(&id, "Groceries").unwrap();
    assert_eq!(document.title, "Groceries");
    assert_eq!(document.lines(), vec!["2 kg flour", "sugar"]);

    Ok(())
}

#[tokio::test]
async fn test_export_writes_document() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let mut session = open(&dir).await?;
    let id = create_week(&mut session, "Week 1", "Eggs, Milk").await?;
    session.set_quantity(&id, "eggs", "6", Unit::Pc)?;

    let renderer = FileRenderer::new(dir.child("exports"), Format::Txt).with_file_stem(&id);
    let document = session
        .export(&id, "Your shopping list", &renderer)
        .await?;
    assert_eq!(document.lines(), vec!["6 pc eggs", "milk"]);

    let written = std::fs::read_to_string(renderer.path())?;
    assert!(written.starts_with("Your shopping list"));
    assert!(written.contains("6 pc eggs"));

    let missing = session.export("missing", "Your shopping list", &renderer).await;
    assert!(matches!(missing, Err(Error::NotFound)));

    Ok(())
}
