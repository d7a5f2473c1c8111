//! Line sources for the prompt loop.
//!
//! The prompt loop in `rust-picks-core` reads responses through its
//! `LineSource` trait. This module provides the two implementations used by
//! the `rp` binary.
//!
//! # Key Features
//!
//! - **Terminal Editor**: Raw-mode line editing with cursor movement and history
//! - **Tab Completion**: Completes items (or item words in fuzzy mode) as you type
//! - **Completion Listing**: A second tab lists the options that still match
//! - **Plain Input**: Line-by-line reading when input is not a terminal
//!
//! # Keys
//!
//! - Left/Right, Home/End and CTRL-A/CTRL-E move the cursor
//! - Up/Down recall earlier responses
//! - CTRL-U and CTRL-K delete before and after the cursor
//! - Tab completes; Enter submits
//! - CTRL-C interrupts, CTRL-D on an empty line ends input

pub mod editor;
pub mod plain;
pub mod state;

pub use editor::{EventSource, TerminalEditor, TerminalEvents};
pub use plain::PlainLines;
pub use state::{EditAction, EditorState};
