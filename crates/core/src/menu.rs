//! The interactive prompt loop.
//!
//! A [`Menu`] is built once from the raw items and a [`MenuConfig`]. Each call
//! to [`Menu::prompt`] runs a [`Session`]: render the menu, read a response,
//! match it, and either finish with the selected item or print a diagnostic
//! and prompt again.

use std::fmt::Display;
use std::io::Write;

use log::{debug, info};

use crate::completion::Completer;
use crate::config::MenuConfig;
use crate::error::{Error, Result};
use crate::items::{normalize_with_origins, ItemList};
use crate::matching::{resolve, MatchResult};
use crate::render::{
    ambiguous_diagnostic, empty_response_diagnostic, no_match_diagnostic, render_menu,
    substitute_default,
};

/// Source of user responses.
///
/// Implementations block until a full line is available and return it
/// without its line terminator.
pub trait LineSource {
    /// Reads one response.
    ///
    /// `prompt` is the post-prompt line that has already been written; it is
    /// passed so the source can redraw the current line, for example after
    /// listing completions.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Interrupted`] if the user interrupts the read,
    /// [`Error::EndOfInput`] if the input is closed, or any I/O error.
    fn read_line(&mut self, prompt: &str) -> Result<String>;
}

/// A validated menu: normalized items, configuration and resolved default.
#[derive(Debug, Clone)]
pub struct Menu {
    items: ItemList,
    config: MenuConfig,
    default: Option<usize>,
}

impl Menu {
    /// Builds a menu from raw items.
    ///
    /// The configured default index refers to a position in `items` as
    /// given; it selects the item that entry normalized into.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyItemList`] if no items remain after
    /// normalization, [`Error::NegativeDefaultIndex`] or
    /// [`Error::DefaultIndexOutOfRange`] for a default index outside the
    /// list, and [`Error::EmptyDefaultItem`] if the default index points at
    /// an entry that normalizes to empty.
    pub fn new<I>(items: I, config: MenuConfig) -> Result<Self>
    where
        I: IntoIterator,
        I::IntoIter: ExactSizeIterator,
        I::Item: Display,
    {
        let normalized = normalize_with_origins(items, config.options.case_insensitive)?;

        let default = match config.default_index {
            None => None,
            Some(index) if index < 0 => return Err(Error::NegativeDefaultIndex(index)),
            Some(index) => {
                let raw_len = normalized.origins.len();
                let position = usize::try_from(index)
                    .ok()
                    .filter(|position| *position < raw_len)
                    .ok_or(Error::DefaultIndexOutOfRange {
                        index,
                        len: raw_len,
                    })?;
                let target =
                    normalized.origins[position].ok_or(Error::EmptyDefaultItem(position))?;
                Some(target)
            }
        };

        debug!(
            "Built menu with {} item(s), default {:?}, options {:?}",
            normalized.items.len(),
            default,
            config.options
        );

        Ok(Self {
            items: normalized.items,
            config,
            default,
        })
    }

    #[must_use]
    pub fn items(&self) -> &ItemList {
        &self.items
    }

    #[must_use]
    pub fn config(&self) -> &MenuConfig {
        &self.config
    }

    /// The item chosen by an empty response, if any.
    #[must_use]
    pub fn default_item(&self) -> Option<&str> {
        self.default.and_then(|index| self.items.get(index))
    }

    /// A completer over this menu's items, for use by a line editor.
    #[must_use]
    pub fn completer(&self) -> Completer<'_> {
        Completer::new(&self.items, self.config.options)
    }

    /// The post-prompt with the default substituted in.
    #[must_use]
    pub fn post_prompt(&self) -> String {
        substitute_default(self.config.effective_post_prompt(), self.default_item())
    }

    /// The full menu text, ending with the post-prompt.
    #[must_use]
    pub fn render(&self) -> String {
        render_menu(
            &self.config.pre_prompt,
            &self.items,
            self.config.effective_post_prompt(),
            self.default_item(),
            self.config.options.indexed,
        )
    }

    /// Prompts until the user picks an item, and returns it.
    ///
    /// # Errors
    ///
    /// Propagates any error from `source` (including
    /// [`Error::Interrupted`]) and any error writing to `output`.
    pub fn prompt<S, W>(&self, source: &mut S, output: &mut W) -> Result<String>
    where
        S: LineSource + ?Sized,
        W: Write + ?Sized,
    {
        Session::new(self).run(source, output)
    }
}

/// Builds a menu and prompts once.
///
/// # Errors
///
/// Returns configuration errors from [`Menu::new`] before anything is
/// written, then any error from [`Menu::prompt`].
pub fn menu<I, S, W>(
    items: I,
    config: MenuConfig,
    source: &mut S,
    output: &mut W,
) -> Result<String>
where
    I: IntoIterator,
    I::IntoIter: ExactSizeIterator,
    I::Item: Display,
    S: LineSource + ?Sized,
    W: Write + ?Sized,
{
    Menu::new(items, config)?.prompt(source, output)
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum PromptState {
    Prompting,
    Resolved(String),
}

/// The state of one run of the prompt loop.
#[derive(Debug)]
pub struct Session<'m> {
    menu: &'m Menu,
    state: PromptState,
}

impl<'m> Session<'m> {
    #[must_use]
    pub fn new(menu: &'m Menu) -> Self {
        Self {
            menu,
            state: PromptState::Prompting,
        }
    }

    /// Runs the loop to completion.
    ///
    /// # Errors
    ///
    /// Propagates errors from `source` and `output`.
    pub fn run<S, W>(mut self, source: &mut S, output: &mut W) -> Result<String>
    where
        S: LineSource + ?Sized,
        W: Write + ?Sized,
    {
        let menu_text = self.menu.render();
        let post_prompt = self.menu.post_prompt();

        loop {
            if let PromptState::Resolved(selection) = &self.state {
                info!("Selected `{selection}`");
                return Ok(selection.clone());
            }

            output.write_all(menu_text.as_bytes())?;
            output.flush()?;

            let response = source.read_line(&post_prompt)?;
            self.respond(&response, output)?;
        }
    }

    /// Matches one response, moving to `Resolved` or writing a diagnostic.
    ///
    /// # Errors
    ///
    /// Returns an error if writing the diagnostic fails.
    pub fn respond<W>(&mut self, response: &str, output: &mut W) -> Result<()>
    where
        W: Write + ?Sized,
    {
        let result = resolve(
            response,
            self.menu.items(),
            &self.menu.config().options,
            self.menu.default.is_some(),
        );
        debug!("Response `{response}` resolved to {result:?}");

        let diagnostic = match result {
            MatchResult::Unique(item) => {
                self.state = PromptState::Resolved(item.to_string());
                return Ok(());
            }
            MatchResult::UseDefault => {
                if let Some(item) = self.menu.default_item() {
                    self.state = PromptState::Resolved(item.to_string());
                    return Ok(());
                }
                empty_response_diagnostic()
            }
            MatchResult::Empty => empty_response_diagnostic(),
            MatchResult::NoMatch => no_match_diagnostic(response),
            MatchResult::Ambiguous(candidates) => ambiguous_diagnostic(response, &candidates),
        };

        output.write_all(diagnostic.as_bytes())?;
        output.flush()?;
        Ok(())
    }
}
