//! Line-oriented prompting over any reader/writer pair.

use std::io::{self, BufRead, Write};

use pantry_core::{parse_date, parse_quantity};

/// Reads answers from `R` and writes prompts and messages to `W`.
#[derive(Debug)]
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Write one line of output.
    pub fn say(&mut self, line: impl AsRef<str>) -> io::Result<()> {
        writeln!(self.output, "{}", line.as_ref())
    }

    /// Show `label` and read one trimmed answer. `None` means end of input.
    pub fn ask(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Ask until the answer is not blank.
    pub fn ask_non_empty(&mut self, label: &str, what: &str) -> io::Result<Option<String>> {
        loop {
            match self.ask(label)? {
                Some(answer) if answer.is_empty() => {
                    self.say(format!("ERROR: {what} cannot be empty!"))?
                }
                other => return Ok(other),
            }
        }
    }

    /// Ask until the answer parses as a number.
    pub fn ask_quantity(&mut self, label: &str) -> io::Result<Option<f64>> {
        loop {
            let Some(answer) = self.ask(label)? else {
                return Ok(None);
            };
            match parse_quantity(&answer) {
                Ok(quantity) => return Ok(Some(quantity)),
                Err(_) => self.say("ERROR: Quantity must be a number!")?,
            }
        }
    }

    /// Ask until the answer is a valid `MM/DD/YYYY` date, returned as typed.
    pub fn ask_date(&mut self, label: &str) -> io::Result<Option<String>> {
        loop {
            let Some(answer) = self.ask(label)? else {
                return Ok(None);
            };
            match parse_date(&answer) {
                Ok(_) => return Ok(Some(answer)),
                Err(_) => self.say("ERROR: Date must be in MM/DD/YYYY format!")?,
            }
        }
    }
}
