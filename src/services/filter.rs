//! Case-insensitive substring filtering over names and summaries.
//!
//! Summaries are matched with their markup stripped and entities decoded, so
//! searching for `p` does not hit every `<p>` paragraph.

use regex::Regex;
use std::sync::OnceLock;

use crate::models::{Episode, Show};

/// A record the search box can match against.
pub trait Searchable {
    fn name(&self) -> &str;

    /// Raw summary, possibly containing HTML.
    fn summary(&self) -> Option<&str>;
}

impl<T: Searchable + ?Sized> Searchable for &T {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn summary(&self) -> Option<&str> {
        (**self).summary()
    }
}

impl Searchable for Show {
    fn name(&self) -> &str {
        &self.name
    }

    fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }
}

impl Searchable for Episode {
    fn name(&self) -> &str {
        &self.name
    }

    fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }
}

/// Trims and lower-cases a raw search box value.
#[must_use]
pub fn normalize_term(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Removes tags and decodes entities. Block-level tags become word breaks so
/// neighbouring paragraphs do not run together; whitespace is collapsed.
#[must_use]
pub fn strip_markup(html: &str) -> String {
    static BLOCK_RE: OnceLock<Regex> = OnceLock::new();
    static TAG_RE: OnceLock<Regex> = OnceLock::new();

    let block_re = BLOCK_RE.get_or_init(|| {
        Regex::new(r"(?i)</?(?:p|br|div|li|ul|ol|h[1-6]|tr|td|th|blockquote)\b[^>]*>")
            .expect("Invalid block tag regex")
    });
    let tag_re = TAG_RE.get_or_init(|| Regex::new(r"<[^>]*>").expect("Invalid tag regex"));

    let spaced = block_re.replace_all(html, " ");
    let without_tags = tag_re.replace_all(&spaced, "");
    let decoded = html_escape::decode_html_entities(&without_tags);
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Lower-cased text a record is matched against.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Haystack {
    name: String,
    summary: Option<String>,
}

impl Haystack {
    fn of<T: Searchable>(record: &T) -> Self {
        Self {
            name: record.name().to_lowercase(),
            summary: record.summary().map(|s| strip_markup(s).to_lowercase()),
        }
    }

    fn contains(&self, term: &str) -> bool {
        self.name.contains(term) || self.summary.as_deref().is_some_and(|s| s.contains(term))
    }
}

/// Whether `record` matches an already normalized term.
#[must_use]
pub fn matches<T: Searchable>(record: &T, normalized_term: &str) -> bool {
    normalized_term.is_empty() || Haystack::of(record).contains(normalized_term)
}

/// Returns the records matching `term`, in their original order.
///
/// An empty or all-whitespace term returns every record.
pub fn filter<'a, T: Searchable>(records: &'a [T], term: &str) -> Vec<&'a T> {
    let term = normalize_term(term);
    records.iter().filter(|r| matches(*r, &term)).collect()
}

/// Precomputed haystacks for one full set, so each keystroke is a plain scan.
#[derive(Debug, Clone, Default)]
pub struct SearchIndex {
    entries: Vec<Haystack>,
}

impl SearchIndex {
    pub fn build<T: Searchable>(records: &[T]) -> Self {
        Self {
            entries: records.iter().map(Haystack::of).collect(),
        }
    }

    /// Positions of the matching records, ascending.
    #[must_use]
    pub fn matching(&self, term: &str) -> Vec<usize> {
        let term = normalize_term(term);
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, h)| term.is_empty() || h.contains(&term))
            .map(|(i, _)| i)
            .collect()
    }
}
