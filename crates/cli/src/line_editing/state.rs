//! Editing state for the interactive line editor.
//!
//! Key handling is kept free of terminal I/O: each key event updates the
//! buffer and returns an [`EditAction`] telling the editor what to draw.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use rust_picks_core::completion::Completer;

/// What the editor should do after a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditAction {
    /// The buffer or cursor may have changed; redraw the line
    Redraw,
    /// Ring the terminal bell
    Bell,
    /// Print this completion listing, then redraw the line
    List(String),
    /// The user submitted this line
    Submit(String),
    /// The user pressed CTRL-C
    Interrupt,
    /// The user pressed CTRL-D on an empty line
    EndOfInput,
    /// Nothing to do
    Ignore,
}

/// Buffer, cursor and history of the line being edited.
///
/// The cursor is a char index, never a byte index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorState {
    buffer: String,
    cursor: usize,
    history: Vec<String>,
    history_index: Option<usize>,
    history_draft: String,
    tab_stalled: bool,
}

impl EditorState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Applies one key event.
    pub fn handle_key(&mut self, key: KeyEvent, completer: &Completer<'_>) -> EditAction {
        if key.kind == KeyEventKind::Release {
            return EditAction::Ignore;
        }

        if key.code != KeyCode::Tab {
            self.tab_stalled = false;
        }

        let control = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Char('c') if control => {
                self.reset();
                EditAction::Interrupt
            }
            KeyCode::Char('d') if control => {
                if self.buffer.is_empty() {
                    EditAction::EndOfInput
                } else {
                    self.delete_at_cursor()
                }
            }
            KeyCode::Enter => self.submit(),
            KeyCode::Tab => self.complete(completer),
            KeyCode::Backspace => {
                if self.cursor == 0 {
                    return EditAction::Bell;
                }
                self.cursor -= 1;
                self.delete_at_cursor()
            }
            KeyCode::Delete => self.delete_at_cursor(),
            KeyCode::Left => self.move_cursor_to(self.cursor.saturating_sub(1)),
            KeyCode::Char('b') if control => self.move_cursor_to(self.cursor.saturating_sub(1)),
            KeyCode::Right => self.move_cursor_to(self.cursor + 1),
            KeyCode::Char('f') if control => self.move_cursor_to(self.cursor + 1),
            KeyCode::Home => self.move_cursor_to(0),
            KeyCode::Char('a') if control => self.move_cursor_to(0),
            KeyCode::End => self.move_cursor_to(self.char_count()),
            KeyCode::Char('e') if control => self.move_cursor_to(self.char_count()),
            KeyCode::Char('u') if control => {
                let at = self.byte_index(self.cursor);
                self.buffer.replace_range(..at, "");
                self.cursor = 0;
                EditAction::Redraw
            }
            KeyCode::Char('k') if control => {
                let at = self.byte_index(self.cursor);
                self.buffer.truncate(at);
                EditAction::Redraw
            }
            KeyCode::Up => self.history_back(),
            KeyCode::Char('p') if control => self.history_back(),
            KeyCode::Down => self.history_forward(),
            KeyCode::Char('n') if control => self.history_forward(),
            KeyCode::Char(c) if !control && !key.modifiers.contains(KeyModifiers::ALT) => {
                let at = self.byte_index(self.cursor);
                self.buffer.insert(at, c);
                self.cursor += 1;
                EditAction::Redraw
            }
            _ => EditAction::Ignore,
        }
    }

    fn submit(&mut self) -> EditAction {
        let line = std::mem::take(&mut self.buffer);
        if !line.is_empty() && self.history.last() != Some(&line) {
            self.history.push(line.clone());
        }
        self.reset();
        EditAction::Submit(line)
    }

    fn reset(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
        self.history_index = None;
        self.history_draft.clear();
        self.tab_stalled = false;
    }

    fn complete(&mut self, completer: &Completer<'_>) -> EditAction {
        let at = self.byte_index(self.cursor);
        let (before, after) = self.buffer.split_at(at);
        let completions = completer.complete(before);

        if let Some(completed) = completions.apply(before) {
            self.cursor = completed.chars().count();
            self.buffer = format!("{completed}{after}");
            self.tab_stalled = false;
            return EditAction::Redraw;
        }

        if completions.items.len() < 2 {
            return EditAction::Bell;
        }

        // Second tab in a row without progress lists the options
        if self.tab_stalled {
            self.tab_stalled = false;
            EditAction::List(completions.listing(before))
        } else {
            self.tab_stalled = true;
            EditAction::Bell
        }
    }

    fn delete_at_cursor(&mut self) -> EditAction {
        if self.cursor >= self.char_count() {
            return EditAction::Bell;
        }
        let at = self.byte_index(self.cursor);
        self.buffer.remove(at);
        EditAction::Redraw
    }

    fn move_cursor_to(&mut self, cursor: usize) -> EditAction {
        self.cursor = cursor.min(self.char_count());
        EditAction::Redraw
    }

    fn history_back(&mut self) -> EditAction {
        let index = match self.history_index {
            None if self.history.is_empty() => return EditAction::Bell,
            None => {
                self.history_draft = self.buffer.clone();
                self.history.len() - 1
            }
            Some(0) => return EditAction::Bell,
            Some(index) => index - 1,
        };
        self.history_index = Some(index);
        self.set_buffer(self.history[index].clone());
        EditAction::Redraw
    }

    fn history_forward(&mut self) -> EditAction {
        match self.history_index {
            None => EditAction::Bell,
            Some(index) if index + 1 < self.history.len() => {
                self.history_index = Some(index + 1);
                self.set_buffer(self.history[index + 1].clone());
                EditAction::Redraw
            }
            Some(_) => {
                self.history_index = None;
                let draft = std::mem::take(&mut self.history_draft);
                self.set_buffer(draft);
                EditAction::Redraw
            }
        }
    }

    fn set_buffer(&mut self, buffer: String) {
        self.buffer = buffer;
        self.cursor = self.char_count();
    }

    fn char_count(&self) -> usize {
        self.buffer.chars().count()
    }

    fn byte_index(&self, cursor: usize) -> usize {
        self.buffer
            .char_indices()
            .nth(cursor)
            .map_or(self.buffer.len(), |(index, _)| index)
    }
}
