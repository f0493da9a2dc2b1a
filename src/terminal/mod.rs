//! Terminal collaborators for `print` and `input`
//!
//! The interpreter never touches stdio directly. Printed values go to an
//! [`OutputSink`] and input lines come from an [`InputSource`]:
//!
//! - [`MockTerminal`] records output with source locations and serves queued
//!   input lines; it is what tests and embedders use.
//! - [`StdTerminal`] writes to stdout and blocks on stdin.

use crate::parser::ast::SourceLocation;
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// Receives one rendered value per evaluated `print`.
pub trait OutputSink {
    fn write_value(&mut self, rendered: &str, location: SourceLocation) -> io::Result<()>;
}

/// Supplies one line per evaluated `input`.
///
/// `Ok(None)` signals end of stream.
pub trait InputSource {
    fn read_line(&mut self, prompt: Option<&str>) -> io::Result<Option<String>>;
}

/// Mock terminal for capturing `print` output and scripting `input`
#[derive(Debug, Clone, Default)]
pub struct MockTerminal {
    pub lines: Vec<TerminalLine>,
    pending_input: VecDeque<String>,
    prompts: Vec<String>,
}

impl MockTerminal {
    pub fn new() -> Self {
        MockTerminal::default()
    }

    /// A terminal whose input source will yield `lines` in order.
    pub fn with_input<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        MockTerminal {
            pending_input: lines.into_iter().map(Into::into).collect(),
            ..MockTerminal::default()
        }
    }

    /// Queue another input line
    pub fn push_input(&mut self, line: impl Into<String>) {
        self.pending_input.push_back(line.into());
    }

    /// Get all printed values as strings
    pub fn get_output(&self) -> Vec<String> {
        self.lines.iter().map(|tl| tl.text.clone()).collect()
    }

    /// Prompts shown so far, in order
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }
}

impl OutputSink for MockTerminal {
    fn write_value(&mut self, rendered: &str, location: SourceLocation) -> io::Result<()> {
        self.lines.push(TerminalLine {
            text: rendered.to_string(),
            location,
        });
        Ok(())
    }
}

impl InputSource for MockTerminal {
    fn read_line(&mut self, prompt: Option<&str>) -> io::Result<Option<String>> {
        if let Some(p) = prompt {
            self.prompts.push(p.to_string());
        }
        Ok(self.pending_input.pop_front())
    }
}

/// A line of terminal output with source location tracking
#[derive(Debug, Clone)]
pub struct TerminalLine {
    pub text: String,
    pub location: SourceLocation,
}

/// Process stdio: values are printed one per line, prompts are flushed
/// before blocking on stdin.
#[derive(Debug, Default)]
pub struct StdTerminal;

impl OutputSink for StdTerminal {
    fn write_value(&mut self, rendered: &str, _location: SourceLocation) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", rendered)?;
        stdout.flush()
    }
}

impl InputSource for StdTerminal {
    fn read_line(&mut self, prompt: Option<&str>) -> io::Result<Option<String>> {
        if let Some(p) = prompt {
            let mut stdout = io::stdout().lock();
            write!(stdout, "{}", p)?;
            stdout.flush()?;
        }

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(strip_line_ending(line)))
    }
}

/// Remove one trailing `\n` or `\r\n`; the rest of the line is kept as typed.
pub fn strip_line_ending(mut line: String) -> String {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    line
}
