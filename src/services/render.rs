//! Render pipeline: turns the records to display into cards and a status line.
//!
//! Every call builds a complete [`RenderedView`]; nothing is patched in place.
//! Summaries are carried as the HTML the API sent. They are not sanitized:
//! the only origin is the configured catalog API, and the terminal surface
//! converts the markup to plain text rather than interpreting it.

use serde::{Deserialize, Serialize};

use super::filter::Searchable;
use crate::config::DisplayConfig;
use crate::domain::ItemKind;
use crate::models::{Episode, Show};

/// Format of the "N of M" status line. One style is used for a whole session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusStyle {
    /// `1 / 3 episode(s) found`
    #[default]
    Found,
    /// `Showing 1/3 episode(s)`
    Showing,
}

#[must_use]
pub fn status_line(displayed: usize, total: usize, kind: ItemKind, style: StatusStyle) -> String {
    let noun = kind.noun();
    match style {
        StatusStyle::Found => format!("{displayed} / {total} {noun}(s) found"),
        StatusStyle::Showing => format!("Showing {displayed}/{total} {noun}(s)"),
    }
}

/// A record that can be listed, searched, selected and turned into a card.
pub trait Listable: Searchable {
    const KIND: ItemKind;

    /// Display code shown on the card, if the kind has one.
    fn code(&self) -> Option<String>;

    /// Short metadata fragments for the card's details line.
    fn details(&self) -> Vec<String>;

    fn image_url(&self) -> Option<&str>;

    /// Label of this record in the selection control.
    fn option_label(&self) -> String {
        match self.code() {
            Some(code) => format!("{code} - {}", self.name()),
            None => self.name().to_string(),
        }
    }
}

impl Listable for Show {
    const KIND: ItemKind = ItemKind::Show;

    fn code(&self) -> Option<String> {
        None
    }

    fn details(&self) -> Vec<String> {
        self.detail_parts()
    }

    fn image_url(&self) -> Option<&str> {
        self.image.as_ref().and_then(|i| i.best())
    }
}

impl Listable for Episode {
    const KIND: ItemKind = ItemKind::Episode;

    fn code(&self) -> Option<String> {
        Some(Episode::code(self).to_string())
    }

    fn details(&self) -> Vec<String> {
        self.detail_parts()
    }

    fn image_url(&self) -> Option<&str> {
        self.image.as_ref().and_then(|i| i.best())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    pub title: String,
    pub code: Option<String>,
    pub details: Vec<String>,
    /// Raw summary markup, see the module docs.
    pub summary_html: Option<String>,
    pub image: String,
    pub image_alt: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub status_style: StatusStyle,
    pub placeholder_image: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::from(&DisplayConfig::default())
    }
}

impl From<&DisplayConfig> for RenderOptions {
    fn from(display: &DisplayConfig) -> Self {
        Self {
            status_style: display.status_style,
            placeholder_image: display.placeholder_image.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedView {
    pub kind: ItemKind,
    pub cards: Vec<Card>,
    pub displayed: usize,
    pub total: usize,
    pub status: String,
}

pub fn card<T: Listable>(record: &T, options: &RenderOptions) -> Card {
    Card {
        title: record.name().to_string(),
        code: record.code(),
        details: record.details(),
        summary_html: record.summary().map(str::to_string),
        image: record
            .image_url()
            .map_or_else(|| options.placeholder_image.clone(), str::to_string),
        image_alt: record.name().to_string(),
    }
}

/// Builds the view for `displayed`, out of a full set of `total` records.
pub fn render<T: Listable>(displayed: &[&T], total: usize, options: &RenderOptions) -> RenderedView {
    debug_assert!(
        displayed.len() <= total,
        "displayed {} exceeds total {total}",
        displayed.len()
    );

    let cards: Vec<Card> = displayed.iter().map(|r| card(*r, options)).collect();
    let status = status_line(cards.len(), total, T::KIND, options.status_style);

    RenderedView {
        kind: T::KIND,
        displayed: cards.len(),
        total,
        cards,
        status,
    }
}
