//! Line-oriented stdin prompting.

use anyhow::Result;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

/// Reads answers line by line from stdin.
pub struct Prompt {
    lines: Lines<BufReader<Stdin>>,
}

impl Prompt {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    /// Ask for one line of input.
    pub async fn line(&mut self, label: &str) -> Result<String> {
        print!("{}: ", label);
        std::io::stdout().flush()?;

        match self.lines.next_line().await? {
            Some(line) => Ok(line.trim().to_string()),
            None => anyhow::bail!("input closed"),
        }
    }

    /// Ask a yes/no question. Anything but y/yes reads as no.
    pub async fn confirm(&mut self, label: &str) -> Result<bool> {
        let answer = self.line(&format!("{} [y/N]", label)).await?;
        Ok(matches!(answer.to_lowercase().as_str(), "y" | "yes"))
    }
}
