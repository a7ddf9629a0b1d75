//! Shopping list documents written to disk with askama templates.

use std::path::{Path, PathBuf};

use askama::Template;
use async_trait::async_trait;
use mealweek_shopping::{Document, DocumentRenderer, LineItem};
use serde::Deserialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Html,
    Txt,
}

impl Format {
    pub fn extension(&self) -> &'static str {
        match self {
            Format::Html => "html",
            Format::Txt => "txt",
        }
    }
}

#[derive(Template)]
#[template(path = "shopping-list.html")]
pub struct ShoppingListHtmlTemplate<'a> {
    pub title: &'a str,
    pub items: &'a [LineItem],
}

#[derive(Template)]
#[template(path = "shopping-list.txt")]
pub struct ShoppingListPlainTemplate<'a> {
    pub title: &'a str,
    pub items: &'a [LineItem],
}

/// Writes each rendered document to `<output_dir>/<file_stem>.<ext>`.
#[derive(Debug, Clone)]
pub struct FileRenderer {
    output_dir: PathBuf,
    file_stem: String,
    format: Format,
}

impl FileRenderer {
    pub fn new(output_dir: impl Into<PathBuf>, format: Format) -> Self {
        Self {
            output_dir: output_dir.into(),
            file_stem: "shopping-list".to_owned(),
            format,
        }
    }

    pub fn with_file_stem(mut self, file_stem: impl Into<String>) -> Self {
        self.file_stem = file_stem.into();
        self
    }

    pub fn path(&self) -> PathBuf {
        self.output_dir
            .join(Path::new(&self.file_stem).with_extension(self.format.extension()))
    }

    pub fn to_string(&self, document: &Document) -> Result<String, askama::Error> {
        match self.format {
            Format::Html => ShoppingListHtmlTemplate {
                title: &document.title,
                items: &document.items,
            }
            .render(),
            Format::Txt => ShoppingListPlainTemplate {
                title: &document.title,
                items: &document.items,
            }
            .render(),
        }
    }
}

#[async_trait]
impl DocumentRenderer for FileRenderer {
    async fn render(&self, document: &Document) -> anyhow::Result<()> {
        let content = self.to_string(document)?;
        let path = self.path();

        tokio::fs::create_dir_all(&self.output_dir).await?;
        tokio::fs::write(&path, content).await?;

        tracing::info!(
            path = %path.display(),
            items = document.items.len(),
            "Shopping list written"
        );

        Ok(())
    }
}
