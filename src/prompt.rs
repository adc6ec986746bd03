//! Line-oriented prompting on top of any reader/writer pair.
//!
//! The binary wires this to stdin/stdout; tests wire it to a `Cursor` and a
//! `Vec<u8>`.

use crate::error::NewsError;
use std::io::{BufRead, Write};
use tracing::debug;

/// Result of reading a numeric choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Number(i64),
    /// The line was not an integer.
    Invalid,
}

impl Choice {
    /// Parse one line of user input.
    pub fn parse(line: &str) -> Self {
        match line.trim().parse::<i64>() {
            Ok(n) => Choice::Number(n),
            Err(_) => Choice::Invalid,
        }
    }
}

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print `message`, read one line and parse it.
    ///
    /// Unparseable input is not an error; it comes back as
    /// [`Choice::Invalid`]. Closed input is, because every caller loops on
    /// invalid answers.
    pub fn prompt(&mut self, message: &str) -> Result<Choice, NewsError> {
        write!(self.output, "{message}")?;
        self.output.flush()?;

        // raw bytes: a line that is not UTF-8 is just another bad answer
        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            return Err(NewsError::InputClosed);
        }
        let line = String::from_utf8_lossy(&buf);
        let choice = Choice::parse(&line);
        debug!(input = %line.trim_end(), ?choice, "Read choice");
        Ok(choice)
    }

    /// Where prompts are printed; the session prints its listings here too.
    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}
