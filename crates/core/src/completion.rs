//! Tab completion for partially typed responses.
//!
//! A [`Completer`] only holds read-only references to the menu's items and
//! its match options, so a line editor can call it while the prompt driver
//! is blocked waiting for that same editor to return a line.

use indexmap::IndexSet;
use log::debug;

use crate::config::MatchOptions;
use crate::items::ItemList;
use crate::matching::assign_words;
use crate::render::ambiguous_completion_listing;

/// Completion candidates for a line buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Completions<'a> {
    /// Byte offset in the buffer where the replaced text starts
    pub start: usize,
    /// Replacement texts for everything from `start` to the end of the buffer
    pub candidates: Vec<String>,
    /// Items that produced at least one candidate, in item order
    pub items: Vec<&'a str>,
    /// Whether candidates complete a single word of an item rather than a whole item
    pub word_candidates: bool,
}

impl Completions<'_> {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Returns `buffer` with the completion applied, or `None` if completing
    /// would not change it.
    ///
    /// A single candidate replaces the text being completed (with a trailing
    /// space for word candidates). Several candidates extend it to their
    /// longest common prefix.
    #[must_use]
    pub fn apply(&self, buffer: &str) -> Option<String> {
        let head = buffer.get(..self.start)?;
        let current = &buffer[self.start..];

        let replacement = match self.candidates.as_slice() {
            [] => return None,
            [only] if self.word_candidates => format!("{only} "),
            [only] => only.clone(),
            many => {
                let prefix = common_prefix(many);
                if prefix.chars().count() <= current.chars().count() {
                    return None;
                }
                prefix
            }
        };

        let completed = format!("{head}{replacement}");
        (completed != buffer).then_some(completed)
    }

    /// The "matches multiple options" listing for `buffer`.
    #[must_use]
    pub fn listing(&self, buffer: &str) -> String {
        ambiguous_completion_listing(buffer, &self.items)
    }
}

/// Computes completions against a menu's items.
#[derive(Debug, Clone, Copy)]
pub struct Completer<'a> {
    items: &'a ItemList,
    options: MatchOptions,
}

impl<'a> Completer<'a> {
    #[must_use]
    pub fn new(items: &'a ItemList, options: MatchOptions) -> Self {
        Self { items, options }
    }

    /// Computes completions for `buffer`, the text before the cursor.
    ///
    /// Without fuzzy matching every item starting with the whole buffer is a
    /// candidate. With fuzzy matching the last word of the buffer is completed
    /// to a word of an item, as long as the other words of the buffer can
    /// still each be placed on a different word of that item. Under
    /// case-insensitive matching candidates are lowercase.
    #[must_use]
    pub fn complete(&self, buffer: &str) -> Completions<'a> {
        let completions = if self.options.fuzzy {
            self.complete_word(buffer)
        } else {
            self.complete_item(buffer)
        };
        debug!(
            "Completing `{buffer}`: {} candidate(s) from {} item(s)",
            completions.candidates.len(),
            completions.items.len()
        );
        completions
    }

    fn complete_item(&self, buffer: &str) -> Completions<'a> {
        let buffer_key = self.options.comparison_key(buffer);
        let mut completions = Completions::default();

        for item in self.items.iter() {
            let item_key = self.options.comparison_key(item);
            if item_key.starts_with(buffer_key.as_str()) {
                completions.candidates.push(item_key);
                completions.items.push(item);
            }
        }
        completions
    }

    fn complete_word(&self, buffer: &str) -> Completions<'a> {
        let start = current_word_start(buffer);
        let others_key = self.options.comparison_key(&buffer[..start]);
        let others: Vec<&str> = others_key.split_whitespace().collect();
        let current_key = self.options.comparison_key(&buffer[start..]);

        let mut candidates: IndexSet<String> = IndexSet::new();
        let mut items = Vec::new();

        for item in self.items.iter() {
            let item_key = self.options.comparison_key(item);
            let words: Vec<&str> = item_key.split_whitespace().collect();

            let mut produced = false;
            for (index, word) in words.iter().enumerate() {
                if !word.starts_with(current_key.as_str()) {
                    continue;
                }
                // The other words must still fit without this one
                if assign_words(&others, &words, Some(index)).is_some() {
                    candidates.insert((*word).to_string());
                    produced = true;
                }
            }
            if produced {
                items.push(item);
            }
        }

        Completions {
            start,
            candidates: candidates.into_iter().collect(),
            items,
            word_candidates: true,
        }
    }
}

/// Byte offset where the word under completion starts; the end of the buffer
/// if it ends in whitespace.
fn current_word_start(buffer: &str) -> usize {
    buffer
        .char_indices()
        .rev()
        .find(|(_, c)| c.is_whitespace())
        .map_or(0, |(index, c)| index + c.len_utf8())
}

fn common_prefix(candidates: &[String]) -> String {
    let Some((first, rest)) = candidates.split_first() else {
        return String::new();
    };

    let mut prefix_len = first.len();
    for candidate in rest {
        prefix_len = first
            .char_indices()
            .zip(candidate.chars())
            .take_while(|((_, a), b)| a == b)
            .last()
            .map_or(0, |((index, c), _)| index + c.len_utf8())
            .min(prefix_len);
    }
    first[..prefix_len].to_string()
}
