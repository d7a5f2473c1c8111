//! Menu configuration.
//!
//! This module holds the static configuration bundle a menu is built from:
//! the prompt texts, the optional default index and the matching mode flags.

use crate::error::{Error, Result};

/// Pre-prompt used when the caller does not provide one
pub const DEFAULT_PRE_PROMPT: &str = "Options:";
/// Post-prompt used when no default index is configured
pub const DEFAULT_POST_PROMPT: &str = "Enter an option to continue: ";
/// Post-prompt used when a default index is configured
pub const DEFAULT_POST_PROMPT_WITH_DEFAULT: &str = "Enter an option to continue [{}]: ";
/// Placeholder in prompt texts replaced by the default item
pub const DEFAULT_PLACEHOLDER: &str = "{}";

/// Flags controlling how a response is matched against the items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchOptions {
    /// Items are shown with their zero-based index, and a numeric response selects by index
    pub indexed: bool,
    /// Comparisons are made on lowercased copies; duplicates are detected case-insensitively
    pub case_insensitive: bool,
    /// The response may appear anywhere in an item rather than only at its start
    pub search: bool,
    /// Each word of the response must be found in a distinct word of the item
    pub fuzzy: bool,
}

impl MatchOptions {
    /// Returns the form of `text` used for comparisons under these options.
    #[must_use]
    pub fn comparison_key(&self, text: &str) -> String {
        if self.case_insensitive {
            text.to_lowercase()
        } else {
            text.to_string()
        }
    }
}

/// Immutable configuration for a single menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuConfig {
    /// Text printed before the item list
    pub pre_prompt: String,
    /// Text printed after the item list; `None` picks a default based on `default_index`
    pub post_prompt: Option<String>,
    /// Index into the raw item list of the item chosen on an empty response
    pub default_index: Option<i64>,
    pub options: MatchOptions,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            pre_prompt: DEFAULT_PRE_PROMPT.to_string(),
            post_prompt: None,
            default_index: None,
            options: MatchOptions::default(),
        }
    }
}

impl MenuConfig {
    /// The post-prompt to render, falling back to the built-in prompts.
    #[must_use]
    pub fn effective_post_prompt(&self) -> &str {
        match (&self.post_prompt, self.default_index) {
            (Some(post_prompt), _) => post_prompt,
            (None, Some(_)) => DEFAULT_POST_PROMPT_WITH_DEFAULT,
            (None, None) => DEFAULT_POST_PROMPT,
        }
    }
}

/// Parses a default index given as text.
///
/// # Errors
///
/// Returns [`Error::NonIntegerDefaultIndex`] if `raw` is not an integer. Range
/// checks happen when the menu is built, against the item list.
///
/// # Examples
///
/// ```
/// use rust_picks_core::config::parse_default_index;
///
/// assert_eq!(parse_default_index("2").unwrap(), 2);
/// assert_eq!(parse_default_index("-1").unwrap(), -1);
/// assert!(parse_default_index("two").is_err());
/// ```
pub fn parse_default_index(raw: &str) -> Result<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| Error::NonIntegerDefaultIndex(raw.to_string()))
}

/// Expands shell variables like `~` in a path.
#[must_use]
pub fn expand_path(path: &str) -> String {
    shellexpand::tilde(path).to_string()
}
