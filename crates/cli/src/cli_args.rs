//! Command-line argument parsing and validation.
//!
//! This module defines the command-line interface structure and turns the
//! parsed arguments (plus an optional menu definition file) into a menu
//! configuration.

use clap::Parser;
use rust_picks_core::config::{parse_default_index, MatchOptions, MenuConfig, DEFAULT_PRE_PROMPT};
use rust_picks_core::error::Result;
use rust_picks_core::file_handling::MenuDefinition;

/// Where the menu items come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemSource {
    /// Items given on the command line or in a menu definition
    Given(Vec<String>),
    /// Items piped in on standard input, one per line
    Stdin,
    /// No items anywhere; standard input is a terminal
    Missing,
}

/// Command-line arguments for the rust-picks CLI tool.
///
/// # Examples
///
/// ```rust
/// use clap::Parser;
/// use rust_picks_cli::cli_args::Args;
///
/// let args = Args::parse_from(["rp", "yes", "no", "--default-index", "1"]);
/// let config = args.menu_config(None)?;
/// assert_eq!(config.default_index, Some(1));
/// # Ok::<(), rust_picks_core::error::Error>(())
/// ```
#[derive(Parser, Debug)] // requires `derive` feature
#[command(
    name = "rp",
    term_width = 0, // Just to make testing across clap features easier
    about = "Present the user with a simple CLI menu, and return the option chosen. \
             The menu is presented via stderr. The output is printed to stdout for piping.",
    after_help = "The default for the post prompt is \"Enter an option to continue: \". \
                  If --default-index is specified, the default option value will be printed \
                  in the post prompt as well."
)]
#[allow(clippy::struct_excessive_bools)] // silence clippy's warning on this struct
pub struct Args {
    /// The option(s) to present to the user.
    ///
    /// If none are given and standard input is not a terminal, options are
    /// read from standard input, one per line.
    #[arg(value_name = "OPTION")]
    pub options: Vec<String>,

    /// The pre-prompt/title/introduction to the menu. [Options:]
    #[arg(long = "pre", short = 'p', value_name = "TEXT")]
    pub pre_prompt: Option<String>,

    /// The prompt presented to the user after the menu items.
    #[arg(long = "post", short = 'P', value_name = "TEXT")]
    pub post_prompt: Option<String>,

    /// The index of the item to use as the default.
    #[arg(long, short = 'd', value_name = "INT", allow_hyphen_values = true)]
    pub default_index: Option<String>,

    /// Print indices with the options, and allow the user to use them to choose.
    #[arg(long, short = 'i', action)]
    pub indexed: bool,

    /// Perform insensitive matching.
    ///
    /// Also drops any items that case-insensitively match prior items.
    #[arg(long, short = 'I', action)]
    pub insensitive: bool,

    /// Search for the user input anywhere in the item strings, not just at the beginning.
    #[arg(long, short = 's', action)]
    pub search: bool,

    /// Search for the individual words in the user input anywhere in the item strings.
    #[arg(long, short = 'f', action)]
    pub fuzzy: bool,

    /// Use stdout for interactive output (instead of the default: stderr).
    ///
    /// The selection is then printed to stderr.
    #[arg(long, action)]
    pub stdout: bool,

    /// Path to a menu definition YAML file.
    ///
    /// Values given on the command line take precedence over the file.
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config_path: Option<String>,
}

impl Args {
    /// Builds the menu configuration from these arguments, falling back to
    /// `definition` for anything not given on the command line.
    ///
    /// # Errors
    ///
    /// Returns an error if a default index is not an integer.
    pub fn menu_config(&self, definition: Option<&MenuDefinition>) -> Result<MenuConfig> {
        let default_index = match &self.default_index {
            Some(raw) => Some(parse_default_index(raw)?),
            None => match definition {
                Some(definition) => definition.default_index()?,
                None => None,
            },
        };

        let file_options = definition
            .map(MenuDefinition::match_options)
            .unwrap_or_default();

        Ok(MenuConfig {
            pre_prompt: self
                .pre_prompt
                .clone()
                .or_else(|| definition.and_then(|d| d.pre.clone()))
                .unwrap_or_else(|| DEFAULT_PRE_PROMPT.to_string()),
            post_prompt: self
                .post_prompt
                .clone()
                .or_else(|| definition.and_then(|d| d.post.clone())),
            default_index,
            options: MatchOptions {
                indexed: self.indexed || file_options.indexed,
                case_insensitive: self.insensitive || file_options.case_insensitive,
                search: self.search || file_options.search,
                fuzzy: self.fuzzy || file_options.fuzzy,
            },
        })
    }

    /// The items given on the command line, or else in `definition`.
    #[must_use]
    pub fn items(&self, definition: Option<&MenuDefinition>) -> Option<Vec<String>> {
        if !self.options.is_empty() {
            return Some(self.options.clone());
        }
        definition
            .map(|definition| definition.items.clone())
            .filter(|items| !items.is_empty())
    }

    /// Decides where the items come from. Standard input is only read for
    /// items when it is not a terminal.
    #[must_use]
    pub fn item_source(
        &self,
        definition: Option<&MenuDefinition>,
        stdin_is_terminal: bool,
    ) -> ItemSource {
        match self.items(definition) {
            Some(items) => ItemSource::Given(items),
            None if stdin_is_terminal => ItemSource::Missing,
            None => ItemSource::Stdin,
        }
    }
}
