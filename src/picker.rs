//! Interactive selection and message display.
//!
//! The selection flow only talks to the user through two traits:
//!
//! - [`Picker`] - single-choice selection from a list of labels
//! - [`Notifier`] - informational and error messages
//!
//! [`TerminalPicker`] and [`ConsoleNotifier`] implement them over any
//! reader/writer pair, so the same code drives a real terminal and tests.

use std::io::{BufRead, Write};

use crate::error::Result;

/// Single-choice selection from a list of labels.
pub trait Picker {
    /// Asks the user to choose one of `items`.
    ///
    /// Returns the index of the chosen item, or `None` if the user cancelled.
    fn pick(&mut self, placeholder: &str, items: &[&str]) -> Result<Option<usize>>;
}

/// Displays messages to the user.
pub trait Notifier {
    /// Shows an informational message.
    fn info(&mut self, message: &str) -> Result<()>;

    /// Shows an error message.
    fn error(&mut self, message: &str) -> Result<()>;
}

/// A numbered-menu picker over a line-based input and an output stream.
///
/// Accepts a 1-based number or an exact label. A number that is not a
/// valid position is matched as a label. Empty input, end of input,
/// `q` or `quit` cancel. Anything else re-prompts.
pub struct TerminalPicker<R: BufRead, W: Write> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TerminalPicker<R, W> {
    /// Creates a picker reading answers from `input` and drawing on `output`.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Consumes the picker, returning the output stream.
    pub fn into_output(self) -> W {
        self.output
    }

    fn render(&mut self, placeholder: &str, items: &[&str]) -> Result<()> {
        writeln!(self.output, "{}", placeholder)?;
        for (i, item) in items.iter().enumerate() {
            writeln!(self.output, "  {:>2}) {}", i + 1, item)?;
        }
        Ok(())
    }
}

/// Interprets one line of user input against the item list.
fn resolve_choice(answer: &str, items: &[&str]) -> Choice {
    let answer = answer.trim();
    if answer.is_empty() || answer.eq_ignore_ascii_case("q") || answer.eq_ignore_ascii_case("quit")
    {
        return Choice::Cancel;
    }
    if let Ok(n) = answer.parse::<usize>() {
        if (1..=items.len()).contains(&n) {
            return Choice::Index(n - 1);
        }
    }
    match items.iter().position(|item| *item == answer) {
        Some(index) => Choice::Index(index),
        None => Choice::Invalid,
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Choice {
    Index(usize),
    Cancel,
    Invalid,
}

impl<R: BufRead, W: Write> Picker for TerminalPicker<R, W> {
    fn pick(&mut self, placeholder: &str, items: &[&str]) -> Result<Option<usize>> {
        if items.is_empty() {
            writeln!(self.output, "{}: nothing to select", placeholder)?;
            return Ok(None);
        }

        self.render(placeholder, items)?;
        loop {
            write!(self.output, "> ")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            match resolve_choice(&line, items) {
                Choice::Index(index) => return Ok(Some(index)),
                Choice::Cancel => return Ok(None),
                Choice::Invalid => {
                    writeln!(
                        self.output,
                        "Enter a number between 1 and {}, or press Enter to cancel",
                        items.len()
                    )?;
                }
            }
        }
    }
}

/// Writes informational messages to one stream and errors to another.
pub struct ConsoleNotifier<O: Write, E: Write> {
    out: O,
    err: E,
}

impl<O: Write, E: Write> ConsoleNotifier<O, E> {
    /// Creates a notifier over the given streams.
    pub fn new(out: O, err: E) -> Self {
        Self { out, err }
    }

    /// Consumes the notifier, returning both streams.
    pub fn into_inner(self) -> (O, E) {
        (self.out, self.err)
    }
}

impl<O: Write, E: Write> Notifier for ConsoleNotifier<O, E> {
    fn info(&mut self, message: &str) -> Result<()> {
        writeln!(self.out, "{}", message)?;
        Ok(())
    }

    fn error(&mut self, message: &str) -> Result<()> {
        writeln!(self.err, "error: {}", message)?;
        Ok(())
    }
}
