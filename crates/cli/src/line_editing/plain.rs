use std::io::BufRead;

use rust_picks_core::error::{Error, Result};
use rust_picks_core::menu::LineSource;

/// Reads responses line by line from any reader, without echo or editing.
pub struct PlainLines<R: BufRead> {
    reader: R,
}

impl<R: BufRead> PlainLines<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> LineSource for PlainLines<R> {
    fn read_line(&mut self, _prompt: &str) -> Result<String> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(Error::EndOfInput);
        }
        Ok(line.trim_end_matches(['\n', '\r']).to_string())
    }
}
