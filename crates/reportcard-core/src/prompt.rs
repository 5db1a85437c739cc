//! Interactive input boundary.
//!
//! The report engine never reads from the terminal. Whatever drives it asks
//! for input through [`Prompt`], so sessions can be scripted in tests.

use std::collections::VecDeque;
use std::io;

/// Source of interactive answers.
pub trait Prompt {
    /// Show `prompt` and return the line entered, without its line ending.
    fn read_line(&mut self, prompt: &str) -> io::Result<String>;
}

/// A prompt that replays canned answers and records what was asked.
///
/// Once the answers run out every further prompt gets an empty line, the
/// same as end-of-input on a terminal.
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    answers: VecDeque<String>,
    asked: Vec<String>,
}

impl ScriptedPrompt {
    /// Create a prompt that answers with `answers`, in order.
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            asked: Vec::new(),
        }
    }

    /// Every prompt shown so far.
    pub fn asked(&self) -> &[String] {
        &self.asked
    }
}

impl Prompt for ScriptedPrompt {
    fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        self.asked.push(prompt.to_string());
        Ok(self.answers.pop_front().unwrap_or_default())
    }
}
