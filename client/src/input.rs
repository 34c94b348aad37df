//! Line input from the terminal

use shared::LEAVE_TOKEN;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader, Lines, Stdin};

/// Reads the player's lines from stdin (or any async reader in tests)
pub struct InputManager<R = Stdin> {
    lines: Lines<BufReader<R>>,
}

impl InputManager<Stdin> {
    pub fn stdin() -> Self {
        Self::new(tokio::io::stdin())
    }
}

impl<R: AsyncRead + Unpin> InputManager<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: BufReader::new(reader).lines(),
        }
    }

    /// Next non-blank line, trimmed. End of input reads as the leave token.
    pub async fn next_entry(&mut self) -> std::io::Result<String> {
        while let Some(line) = self.lines.next_line().await? {
            let entry = line.trim();
            if !entry.is_empty() {
                return Ok(entry.to_string());
            }
        }
        Ok(LEAVE_TOKEN.to_string())
    }
}
