//! Rust Picks Core Library
//!
//! This crate provides the core of rust-picks, an interactive command-line menu
//! selector: a list of options is shown, the user types a response, and the
//! response is resolved to exactly one option by prefix, substring, fuzzy word
//! or index matching. Unresolved responses get a diagnostic and a fresh prompt.
//!
//! # Key Features
//!
//! - **Item Normalization**: Trimming, empty-item removal and deduplication
//! - **Response Matching**: Prefix, search and fuzzy modes with exact-match tie breaking
//! - **Prompt Loop**: Re-prompts with diagnostics until a choice is unambiguous
//! - **Tab Completion**: Candidates for line editors, sharing the matching rules
//! - **Menu Definitions**: Optional YAML files describing a menu
//!
//! All input and output is injected: the prompt loop reads through a
//! [`menu::LineSource`] and writes to any [`std::io::Write`].
//!
//! # Examples
//!
//! ```
//! use rust_picks_core::config::MenuConfig;
//! use rust_picks_core::error::Result;
//! use rust_picks_core::menu::{menu, LineSource};
//!
//! struct Typed(Vec<&'static str>);
//!
//! impl LineSource for Typed {
//!     fn read_line(&mut self, _prompt: &str) -> Result<String> {
//!         Ok(self.0.remove(0).to_string())
//!     }
//! }
//!
//! let mut output = Vec::new();
//! let mut typed = Typed(vec!["b", "bla"]);
//! let choice = menu(["red", "blue", "black"], MenuConfig::default(), &mut typed, &mut output)?;
//! assert_eq!(choice, "black");
//! # Ok::<(), rust_picks_core::error::Error>(())
//! ```

pub mod completion;
pub mod config;
pub mod error;
pub mod file_handling;
pub mod items;
pub mod matching;
pub mod menu;
pub mod render;
