//! Prompt and output helpers shared by menu actions.

use std::fmt::Display;
use std::io::{BufRead, Write};

use anyhow::{Context, Result};

/// Line-oriented terminal: prompts are written to `output`, answers read from `input`.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Show `label` and read one line. Returns `None` at end of input.
    pub fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("failed to read from stdin")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    pub fn line<D: Display>(&mut self, text: D) -> Result<()> {
        writeln!(self.output, "{}", text).context("failed to write to stdout")
    }

    pub fn blank(&mut self) -> Result<()> {
        writeln!(self.output).context("failed to write to stdout")
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}

/// Parse a user-entered rating.
pub fn parse_rating(input: &str) -> Option<f64> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|rating| rating.is_finite())
}
