//! Rust Picks CLI Library
//!
//! This crate provides the command-line interface for rust-picks, an
//! interactive menu selector. It parses arguments, gathers the menu items, and
//! reads the user's responses with line editing and tab completion.
//!
//! # Key Features
//!
//! - **Argument Handling**: Prompts, default index and matching flags from the command line
//! - **Menu Definitions**: Any of those settings can come from a YAML file instead
//! - **Piped Items**: Items are read from standard input when none are given
//! - **Line Editing**: Cursor movement, history and tab completion on a terminal
//!
//! # Architecture
//!
//! - [`cli_args`]: Command-line argument parsing and merging with menu definitions
//! - [`line_editing`]: Sources of user responses, terminal-backed or plain
//!
//! # Examples
//!
//! ```bash
//! # Choose between two options
//! rp yes no
//!
//! # Numbered options with a default
//! rp --indexed --default-index 1 red green blue
//!
//! # Pick a file, matching any words of its name
//! ls | rp --fuzzy --pre "Which file?"
//! ```

pub mod cli_args;
pub mod line_editing;
