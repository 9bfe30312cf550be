//! Operator input behind a trait so tests can script answers.
use std::io::{self, BufRead, Write};

use crate::error::ToolError;

/// Source of operator answers.
///
/// [`TerminalPrompter`] reads from stdin; tests supply scripted
/// implementations. End of input is reported as [`ToolError::Interrupted`].
pub trait Prompter {
    /// Ask a yes/no question; only an explicit yes counts as agreement.
    ///
    /// # Errors
    ///
    /// Returns an error if input cannot be read.
    fn confirm(&self, question: &str) -> Result<bool, ToolError>;

    /// Ask for a free-form value; the answer is returned trimmed.
    ///
    /// # Errors
    ///
    /// Returns an error if input cannot be read.
    fn ask(&self, question: &str) -> Result<String, ToolError>;

    /// Show a numbered menu and return the zero-based index picked.
    ///
    /// # Errors
    ///
    /// Returns an error if input cannot be read.
    fn select(&self, heading: &str, options: &[&str]) -> Result<usize, ToolError>;
}

/// Returns `true` for `y` / `yes` in any case.
#[must_use]
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Interpret a 1-based menu answer.
#[must_use]
pub fn parse_choice(answer: &str, len: usize) -> Option<usize> {
    answer
        .trim()
        .parse::<usize>()
        .ok()
        .filter(|n| (1..=len).contains(n))
        .map(|n| n - 1)
}

/// Prompts on stdout and reads answers from stdin.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl TerminalPrompter {
    fn read_answer(prompt: &str) -> Result<String, ToolError> {
        let mut stdout = io::stdout();
        write!(stdout, "{prompt}")
            .and_then(|()| stdout.flush())
            .map_err(|e| ToolError::io("<stdout>", e))?;

        let mut input = String::new();
        let read = io::stdin()
            .lock()
            .read_line(&mut input)
            .map_err(|e| match e.kind() {
                io::ErrorKind::Interrupted => ToolError::Interrupted,
                _ => ToolError::io("<stdin>", e),
            })?;
        if read == 0 {
            // End of input: treat like Ctrl-D at a shell prompt.
            println!();
            return Err(ToolError::Interrupted);
        }
        Ok(input.trim().to_string())
    }
}

impl Prompter for TerminalPrompter {
    fn confirm(&self, question: &str) -> Result<bool, ToolError> {
        let answer = Self::read_answer(&format!("{question} [y/N]: "))?;
        Ok(is_affirmative(&answer))
    }

    fn ask(&self, question: &str) -> Result<String, ToolError> {
        Self::read_answer(&format!("{question}: "))
    }

    fn select(&self, heading: &str, options: &[&str]) -> Result<usize, ToolError> {
        println!("\n{heading}");
        for (i, option) in options.iter().enumerate() {
            println!("  \x1b[1m{}\x1b[0m) {option}", i + 1);
        }
        loop {
            let answer = Self::read_answer(&format!("\nSelect [1-{}]: ", options.len()))?;
            if let Some(index) = parse_choice(&answer, options.len()) {
                return Ok(index);
            }
            println!("Please enter a number between 1 and {}", options.len());
        }
    }
}

/// Stands in for the operator under `--non-interactive`.
///
/// Confirmation is always refused and free-form answers are empty, so every
/// caller falls through to its non-interactive error or default.
#[derive(Debug, Default)]
pub struct NonInteractive;

impl Prompter for NonInteractive {
    fn confirm(&self, _question: &str) -> Result<bool, ToolError> {
        Ok(false)
    }

    fn ask(&self, _question: &str) -> Result<String, ToolError> {
        Ok(String::new())
    }

    fn select(&self, _heading: &str, _options: &[&str]) -> Result<usize, ToolError> {
        Err(ToolError::MissingAction)
    }
}

/// A [`Prompter`] that replays canned answers and records every question.
#[cfg(test)]
pub(crate) mod scripted {
    use std::cell::RefCell;
    use std::collections::VecDeque;

    use super::{Prompter, is_affirmative, parse_choice};
    use crate::error::ToolError;

    #[derive(Debug, Default)]
    pub(crate) struct ScriptedPrompter {
        answers: RefCell<VecDeque<String>>,
        asked: RefCell<Vec<String>>,
    }

    impl ScriptedPrompter {
        pub(crate) fn new(answers: &[&str]) -> Self {
            Self {
                answers: RefCell::new(answers.iter().map(|a| (*a).to_string()).collect()),
                asked: RefCell::default(),
            }
        }

        /// Questions asked so far, in order.
        pub(crate) fn asked(&self) -> Vec<String> {
            self.asked.borrow().clone()
        }

        fn next(&self, question: &str) -> Result<String, ToolError> {
            self.asked.borrow_mut().push(question.to_string());
            self.answers
                .borrow_mut()
                .pop_front()
                .ok_or(ToolError::Interrupted)
        }
    }

    impl Prompter for ScriptedPrompter {
        fn confirm(&self, question: &str) -> Result<bool, ToolError> {
            Ok(is_affirmative(&self.next(question)?))
        }

        fn ask(&self, question: &str) -> Result<String, ToolError> {
            Ok(self.next(question)?.trim().to_string())
        }

        fn select(&self, heading: &str, options: &[&str]) -> Result<usize, ToolError> {
            loop {
                if let Some(index) = parse_choice(&self.next(heading)?, options.len()) {
                    return Ok(index);
                }
            }
        }
    }
}
