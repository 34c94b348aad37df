use crate::error::{GameError, Result};
use shared::{check_word, DEFAULT_PORT, DEFAULT_WORD, MAX_PLAYERS, MAX_SLOTS};

/// Startup settings for a word-chain server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind the listener to
    pub host: String,
    /// Port to listen on; 0 lets the OS pick one
    pub port: u16,
    /// Number of player slots in the ring
    pub slots: usize,
    /// Word the chain starts from
    pub start_word: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
            slots: MAX_PLAYERS,
            start_word: DEFAULT_WORD.to_string(),
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.slots == 0 || self.slots > MAX_SLOTS {
            return Err(GameError::Config(format!(
                "slot count must be between 1 and {}, got {}",
                MAX_SLOTS, self.slots
            )));
        }

        check_word(&self.start_word)
            .map_err(|fault| GameError::Config(format!("start word rejected: {}", fault)))?;

        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
