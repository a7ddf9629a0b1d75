use std::path::PathBuf;
use std::str::FromStr;

use mealweek::config::Config;
use mealweek::document::{FileRenderer, Format};
use mealweek::session::FAILURE_MESSAGE;
use mealweek_shared::Identity;
use mealweek_shopping::Unit;

/// `--qty flour=2:kg`, the unit part being optional.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantityArg {
    pub ingredient: String,
    pub quantity: String,
    pub unit: Unit,
}

impl FromStr for QuantityArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((ingredient, value)) = s.split_once('=') else {
            return Err(format!("expected INGREDIENT=QTY[:UNIT], got '{s}'"));
        };

        if ingredient.trim().is_empty() {
            return Err(format!("missing ingredient in '{s}'"));
        }

        let (quantity, unit) = match value.rsplit_once(':') {
            Some((quantity, unit)) => (
                quantity,
                Unit::from_str(unit.trim()).map_err(|_| format!("unknown unit '{unit}'"))?,
            ),
            None => (value, Unit::Blank),
        };

        Ok(Self {
            ingredient: ingredient.to_owned(),
            quantity: quantity.trim().to_owned(),
            unit,
        })
    }
}

pub struct ExportArgs {
    pub id: String,
    pub quantities: Vec<QuantityArg>,
    pub format: Option<Format>,
    pub out: Option<PathBuf>,
    pub title: Option<String>,
}

pub async fn export(config: Config, identity: Identity, args: ExportArgs) -> anyhow::Result<()> {
    let mut session = super::open_session(&config, &identity).await?;

    for entry in &args.quantities {
        session.set_quantity(&args.id, &entry.ingredient, entry.quantity.to_owned(), entry.unit)?;
    }

    let format = args.format.unwrap_or(config.export.format);
    let renderer = FileRenderer::new(args.out.unwrap_or(config.export.output_dir), format)
        .with_file_stem(format!("shopping-list-{}", args.id));
    let title = args.title.unwrap_or(config.export.title);

    match session.export(&args.id, &title, &renderer).await {
        Ok(document) => {
            for line in document.lines() {
                println!("{line}");
            }
            println!("Written to {}", renderer.path().display());
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
