//! The jump-to-item selection control.
//!
//! Options are keyed by position in the full set the control was populated
//! from, so a key stays valid for as long as that set is current.

use serde::Serialize;

use super::render::Listable;
use crate::domain::events::PickTarget;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "index", rename_all = "lowercase")]
pub enum SelectionKey {
    #[default]
    All,
    Index(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub key: SelectionKey,
    pub label: String,
}

/// "All" followed by one option per record.
pub fn options<T: Listable>(items: &[T]) -> Vec<SelectOption> {
    std::iter::once(SelectOption {
        key: SelectionKey::All,
        label: T::KIND.all_label().to_string(),
    })
    .chain(items.iter().enumerate().map(|(i, item)| SelectOption {
        key: SelectionKey::Index(i),
        label: item.option_label(),
    }))
    .collect()
}

/// Records shown for `key`, or `None` if the key does not belong to `items`.
pub fn resolve<T>(items: &[T], key: SelectionKey) -> Option<Vec<&T>> {
    match key {
        SelectionKey::All => Some(items.iter().collect()),
        SelectionKey::Index(i) => items.get(i).map(|item| vec![item]),
    }
}

/// Maps what the user typed to a key of this set.
///
/// Option numbers are 1-based; a display code picks the first record with
/// that code.
pub fn key_for_pick<T: Listable>(items: &[T], target: PickTarget) -> Option<SelectionKey> {
    match target {
        PickTarget::All => Some(SelectionKey::All),
        PickTarget::Number(n) => n
            .checked_sub(1)
            .filter(|i| *i < items.len())
            .map(SelectionKey::Index),
        PickTarget::Code(code) => {
            let wanted = code.to_string();
            items
                .iter()
                .position(|item| item.code().as_deref() == Some(wanted.as_str()))
                .map(SelectionKey::Index)
        }
    }
}
