//! One full set of records plus the search box and selection control bound
//! to it. Shows and episodes both go through this type.

use std::sync::Arc;

use super::filter::SearchIndex;
use super::render::{Listable, RenderOptions, RenderedView, render};
use super::selection::{self, SelectOption, SelectionKey};
use crate::domain::events::PickTarget;

#[derive(Debug, Clone)]
pub struct Listing<T> {
    items: Arc<[T]>,
    index: SearchIndex,
    search: String,
    selection: SelectionKey,
}

impl<T: Listable> Listing<T> {
    pub fn new(items: impl Into<Arc<[T]>>) -> Self {
        let items = items.into();
        let index = SearchIndex::build(&items[..]);
        Self {
            items,
            index,
            search: String::new(),
            selection: SelectionKey::All,
        }
    }

    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn search_text(&self) -> &str {
        &self.search
    }

    #[must_use]
    pub const fn selection(&self) -> SelectionKey {
        self.selection
    }

    /// Search box input. Resets the selection control to "all".
    pub fn set_search(&mut self, text: &str) {
        self.search = text.to_string();
        self.selection = SelectionKey::All;
    }

    /// Selection control change. Clears the search box.
    ///
    /// Returns `false`, leaving the listing untouched, if `key` is not an
    /// option of this set.
    pub fn select(&mut self, key: SelectionKey) -> bool {
        if selection::resolve(self.items(), key).is_none() {
            return false;
        }
        self.search.clear();
        self.selection = key;
        true
    }

    pub fn pick(&mut self, target: PickTarget) -> bool {
        selection::key_for_pick(self.items(), target).is_some_and(|key| self.select(key))
    }

    #[must_use]
    pub fn visible(&self) -> Vec<&T> {
        match self.selection {
            SelectionKey::Index(_) => {
                selection::resolve(self.items(), self.selection).unwrap_or_default()
            }
            SelectionKey::All => self
                .index
                .matching(&self.search)
                .into_iter()
                .map(|i| &self.items[i])
                .collect(),
        }
    }

    #[must_use]
    pub fn options(&self) -> Vec<SelectOption> {
        selection::options(self.items())
    }

    #[must_use]
    pub fn render(&self, options: &RenderOptions) -> RenderedView {
        render(&self.visible(), self.total(), options)
    }
}
