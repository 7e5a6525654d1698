//! Line-based prompting over any reader and writer.

use std::io::{BufRead, Write};
use std::str::FromStr;

use crate::config::NamingMode;
use crate::error::{PdfVolError, Result};

/// Naming modes offered at the prompt, in menu order.
const NAMING_CHOICES: [(NamingMode, &str); 3] = [
    (NamingMode::Range, "range (e.g. 001-010.pdf)"),
    (NamingMode::Volume, "volume (e.g. 卷1.pdf)"),
    (NamingMode::Custom, "custom (e.g. 合并版_001-010.pdf)"),
];

/// Asks questions on `output` and reads answers from `input`.
///
/// End of input surfaces as [`PdfVolError::Cancelled`].
#[derive(Debug)]
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    /// Create a prompter over the given streams.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Give back the underlying streams.
    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }

    /// Write one line.
    pub fn say(&mut self, line: &str) -> Result<()> {
        writeln!(self.output, "{line}")?;
        Ok(())
    }

    /// Ask a question and return the trimmed answer.
    pub fn ask(&mut self, question: &str) -> Result<String> {
        write!(self.output, "{question}")?;
        self.output.flush()?;

        let mut answer = String::new();
        if self.input.read_line(&mut answer)? == 0 {
            return Err(PdfVolError::Cancelled);
        }
        Ok(answer.trim().to_string())
    }

    /// Ask for a number.
    ///
    /// # Errors
    ///
    /// `InvalidInput` when the answer does not parse.
    pub fn ask_number<T: FromStr>(&mut self, question: &str) -> Result<T> {
        let answer = self.ask(question)?;
        answer
            .parse()
            .map_err(|_| PdfVolError::invalid_input(answer, "expected a whole number"))
    }

    /// Ask a yes/no question. Only `y` and `yes` count as yes.
    pub fn confirm(&mut self, question: &str) -> Result<bool> {
        let answer = self.ask(question)?.to_lowercase();
        Ok(answer == "y" || answer == "yes")
    }

    /// Let the user pick a naming mode, asking again until the choice is valid.
    pub fn choose_naming_mode(&mut self) -> Result<NamingMode> {
        self.say("")?;
        self.say("Naming mode:")?;
        for (i, (_, label)) in NAMING_CHOICES.iter().enumerate() {
            self.say(&format!("{}. {label}", i + 1))?;
        }

        loop {
            let answer = self.ask("Choose a naming mode (1-3): ")?;
            let picked = answer
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|i| NAMING_CHOICES.get(i));

            match picked {
                Some((mode, _)) => return Ok(*mode),
                None => self.say("Invalid choice, please try again")?,
            }
        }
    }
}
