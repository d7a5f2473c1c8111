//! Text rendering for menus and diagnostics.
//!
//! Everything here is plain string formatting; writing the text out is left
//! to the prompt driver and the line editor.

use itertools::Itertools;

use crate::config::DEFAULT_PLACEHOLDER;
use crate::items::ItemList;

/// Prefix of every diagnostic line
pub const DIAGNOSTIC_PREFIX: &str = "[!]";

const ITEM_INDENT: &str = "  ";

/// Replaces the default placeholder in `text` with `default`, if there is one.
#[must_use]
pub fn substitute_default(text: &str, default: Option<&str>) -> String {
    match default {
        Some(default) if text.contains(DEFAULT_PLACEHOLDER) => {
            text.replacen(DEFAULT_PLACEHOLDER, default, 1)
        }
        _ => text.to_string(),
    }
}

/// Renders the full menu: the pre-prompt line, one line per item and the
/// post-prompt, which is not followed by a newline.
///
/// # Examples
///
/// ```
/// use rust_picks_core::items::ItemList;
/// use rust_picks_core::render::render_menu;
///
/// let items = ItemList::normalize(["yes", "no"], false)?;
/// assert_eq!(
///     render_menu("Options:", &items, "Pick [{}]: ", Some("no"), true),
///     "Options:\n  [0] yes\n  [1] no\nPick [no]: "
/// );
/// # Ok::<(), rust_picks_core::error::Error>(())
/// ```
#[must_use]
pub fn render_menu(
    pre_prompt: &str,
    items: &ItemList,
    post_prompt: &str,
    default: Option<&str>,
    indexed: bool,
) -> String {
    let item_lines = items.iter().enumerate().map(|(index, item)| {
        if indexed {
            format!("{ITEM_INDENT}[{index}] {item}")
        } else {
            format!("{ITEM_INDENT}{item}")
        }
    });

    std::iter::once(substitute_default(pre_prompt, default))
        .chain(item_lines)
        .chain(std::iter::once(substitute_default(post_prompt, default)))
        .join("\n")
}

#[must_use]
pub fn empty_response_diagnostic() -> String {
    format!("{DIAGNOSTIC_PREFIX} an empty response is not valid.\n")
}

#[must_use]
pub fn no_match_diagnostic(response: &str) -> String {
    format!("{DIAGNOSTIC_PREFIX} \"{response}\" does not match any of the valid choices.\n")
}

#[must_use]
pub fn ambiguous_diagnostic(response: &str, candidates: &[&str]) -> String {
    let mut text = multiple_matches(response, "choices", candidates);
    text.push_str(&format!(
        "{DIAGNOSTIC_PREFIX} Please specify your choice further.\n"
    ));
    text
}

/// The listing shown when tab completion of `buffer` is still ambiguous.
#[must_use]
pub fn ambiguous_completion_listing(buffer: &str, items: &[&str]) -> String {
    multiple_matches(buffer, "options", items)
}

fn multiple_matches(text: &str, noun: &str, items: &[&str]) -> String {
    let mut listing = format!("{DIAGNOSTIC_PREFIX} \"{text}\" matches multiple {noun}:\n");
    for item in items {
        listing.push_str(&format!("{DIAGNOSTIC_PREFIX}   {item}\n"));
    }
    listing
}
