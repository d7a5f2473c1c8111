use std::io::Write;

use crossterm::cursor::MoveToColumn;
use crossterm::event::{self, Event};
use crossterm::queue;
use crossterm::style::Print;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, Clear, ClearType};
use itertools::Itertools;
use log::debug;
use rust_picks_core::completion::Completer;
use rust_picks_core::error::{Error, Result};
use rust_picks_core::menu::LineSource;

use super::state::{EditAction, EditorState};

struct RawModeGuard;

impl RawModeGuard {
    fn acquire() -> Result<Self> {
        enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        // Disable raw mode on drop
        let _ = disable_raw_mode();
    }
}

/// Where the editor gets its key presses from.
pub trait EventSource {
    /// Blocks until the next event.
    ///
    /// # Errors
    ///
    /// Returns an error if the source fails or has no more events.
    fn next_event(&mut self) -> Result<Event>;

    /// Whether the terminal must be in raw mode while a line is read.
    fn needs_raw_mode(&self) -> bool {
        false
    }
}

/// Events from the controlling terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalEvents;

impl EventSource for TerminalEvents {
    fn next_event(&mut self) -> Result<Event> {
        Ok(event::read()?)
    }

    fn needs_raw_mode(&self) -> bool {
        true
    }
}

/// Reads responses from the terminal with line editing and tab completion.
///
/// Raw mode is only enabled while a line is being read, so everything the
/// prompt loop writes between reads goes through the terminal's normal line
/// discipline.
pub struct TerminalEditor<'a, W: Write, E: EventSource = TerminalEvents> {
    completer: Completer<'a>,
    state: EditorState,
    output: W,
    events: E,
}

impl<'a, W: Write> TerminalEditor<'a, W> {
    /// Creates an editor echoing to `output`, which should be the stream the
    /// menu itself is written to.
    pub fn new(completer: Completer<'a>, output: W) -> Self {
        Self::with_events(completer, output, TerminalEvents)
    }
}

impl<'a, W: Write, E: EventSource> TerminalEditor<'a, W, E> {
    /// Creates an editor reading key presses from `events`.
    pub fn with_events(completer: Completer<'a>, output: W, events: E) -> Self {
        Self {
            completer,
            state: EditorState::new(),
            output,
            events,
        }
    }

    /// Redraws the prompt line with the current buffer and places the cursor.
    fn redraw(&mut self, prompt_line: &str) -> Result<()> {
        let column = prompt_line.chars().count() + self.state.cursor();
        queue!(
            self.output,
            MoveToColumn(0),
            Clear(ClearType::CurrentLine),
            Print(prompt_line),
            Print(self.state.buffer()),
            MoveToColumn(u16::try_from(column).unwrap_or(u16::MAX - 1)),
        )?;
        self.output.flush()?;
        Ok(())
    }

    fn end_line(&mut self) -> Result<()> {
        queue!(self.output, Print("\r\n"))?;
        self.output.flush()?;
        Ok(())
    }
}

impl<W: Write, E: EventSource> LineSource for TerminalEditor<'_, W, E> {
    fn read_line(&mut self, prompt: &str) -> Result<String> {
        let prompt_line = prompt.rsplit('\n').next().unwrap_or(prompt);
        // Restores cooked mode on every exit path
        let _raw_mode_guard = if self.events.needs_raw_mode() {
            Some(RawModeGuard::acquire()?)
        } else {
            None
        };

        loop {
            let Event::Key(key) = self.events.next_event()? else {
                continue;
            };

            match self.state.handle_key(key, &self.completer) {
                EditAction::Redraw => self.redraw(prompt_line)?,
                EditAction::Bell => {
                    queue!(self.output, Print("\x07"))?;
                    self.output.flush()?;
                }
                EditAction::List(listing) => {
                    debug!("Listing completions for `{}`", self.state.buffer());
                    // Raw mode does not translate newlines
                    let listing = listing.lines().join("\r\n");
                    queue!(self.output, Print(format!("\r\n{listing}\r\n")))?;
                    self.redraw(prompt_line)?;
                }
                EditAction::Submit(line) => {
                    self.end_line()?;
                    return Ok(line);
                }
                EditAction::Interrupt => {
                    self.end_line()?;
                    return Err(Error::Interrupted);
                }
                EditAction::EndOfInput => {
                    self.end_line()?;
                    return Err(Error::EndOfInput);
                }
                EditAction::Ignore => {}
            }
        }
    }
}
