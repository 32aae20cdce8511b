//! Yes/no confirmation before destructive actions

use crate::error::Result;
use std::io::{self, BufRead, Write};

/// Gate for destructive operations
pub trait Confirm {
    /// Ask `question`; `true` means proceed
    fn confirm(&mut self, question: &str) -> Result<bool>;
}

/// Always answers yes (`--yes` on the command line)
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&mut self, _question: &str) -> Result<bool> {
        Ok(true)
    }
}

/// Prompts on a writer and reads the answer from a line reader
pub struct LinePrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        LinePrompt { input, output }
    }
}

impl LinePrompt<io::StdinLock<'static>, io::Stderr> {
    /// Prompt on stderr, read from stdin
    pub fn stdio() -> Self {
        LinePrompt::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> Confirm for LinePrompt<R, W> {
    fn confirm(&mut self, question: &str) -> Result<bool> {
        write!(self.output, "{} [y/N] ", question)?;
        self.output.flush()?;

        let mut answer = String::new();
        self.input.read_line(&mut answer)?;

        Ok(is_affirmative(&answer))
    }
}

fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
