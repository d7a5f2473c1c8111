//! Item normalization.
//!
//! Turns the caller's raw options into the ordered, deduplicated list of
//! display strings a menu presents.

use std::fmt::Display;

use indexmap::IndexSet;
use log::debug;

use crate::error::{Error, Result};

/// An ordered, non-empty list of unique display strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemList {
    items: Vec<String>,
}

/// The result of normalizing a raw item list, keeping track of where each
/// raw entry ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    pub items: ItemList,
    /// For each raw entry, the position of the surviving item it became (or
    /// collapsed into). `None` for entries that normalized to empty.
    pub origins: Vec<Option<usize>>,
}

impl ItemList {
    /// Normalizes `raw` into an item list.
    ///
    /// Each entry is converted to its display form with trailing whitespace
    /// trimmed. Leading whitespace is kept. Entries that end up empty are
    /// dropped, as are later duplicates of an earlier entry (compared
    /// case-insensitively when `case_insensitive` is set). The source must be
    /// finite and know its length.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyItemList`] if the source is empty or nothing
    /// remains after normalization.
    ///
    /// # Examples
    ///
    /// ```
    /// use rust_picks_core::items::ItemList;
    ///
    /// let items = ItemList::normalize(["foo ", "bar", "foo", ""], false)?;
    /// assert_eq!(items.as_slice(), ["foo", "bar"]);
    /// # Ok::<(), rust_picks_core::error::Error>(())
    /// ```
    pub fn normalize<I>(raw: I, case_insensitive: bool) -> Result<Self>
    where
        I: IntoIterator,
        I::IntoIter: ExactSizeIterator,
        I::Item: Display,
    {
        Ok(normalize_with_origins(raw, case_insensitive)?.items)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always false: a list is never constructed empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.items.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.items
    }
}

/// Normalizes `raw` like [`ItemList::normalize`], also reporting where each
/// raw entry landed so a raw default index can be mapped onto the list.
///
/// # Errors
///
/// Returns [`Error::EmptyItemList`] if the source is empty or nothing
/// remains after normalization.
pub fn normalize_with_origins<I>(raw: I, case_insensitive: bool) -> Result<Normalized>
where
    I: IntoIterator,
    I::IntoIter: ExactSizeIterator,
    I::Item: Display,
{
    let raw = raw.into_iter();
    let raw_len = raw.len();
    if raw_len == 0 {
        return Err(Error::EmptyItemList);
    }

    let mut keys: IndexSet<String> = IndexSet::with_capacity(raw_len);
    let mut items: Vec<String> = Vec::with_capacity(raw_len);
    let mut origins: Vec<Option<usize>> = Vec::with_capacity(raw_len);

    for (raw_index, raw_item) in raw.enumerate() {
        let display = raw_item.to_string().trim_end().to_string();
        if display.is_empty() {
            debug!("Dropping item {raw_index}: empty after trimming");
            origins.push(None);
            continue;
        }

        let key = if case_insensitive {
            display.to_lowercase()
        } else {
            display.clone()
        };

        let (position, inserted) = keys.insert_full(key);
        if inserted {
            items.push(display);
        } else {
            debug!("Dropping item {raw_index} (`{display}`): duplicate of item {position}");
        }
        origins.push(Some(position));
    }

    if items.is_empty() {
        return Err(Error::EmptyItemList);
    }

    Ok(Normalized {
        items: ItemList { items },
        origins,
    })
}
