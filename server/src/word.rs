use shared::{chains_onto, check_word, encode_line, WordFault};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::Mutex;

/// The current word of the chain
///
/// Every read and write goes through the mutex. The turn holder is the only
/// task that publishes or advances it; the lock keeps that read-then-write
/// step consistent for anyone observing the word concurrently.
#[derive(Debug)]
pub struct SharedWord {
    value: Mutex<String>,
}

impl SharedWord {
    pub fn new(start: impl Into<String>) -> Self {
        Self {
            value: Mutex::new(start.into()),
        }
    }

    pub async fn current(&self) -> String {
        self.value.lock().await.clone()
    }

    /// Writes the current word as one line while holding the lock
    pub async fn publish<W>(&self, writer: &mut W) -> std::io::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        let value = self.value.lock().await;
        writer.write_all(encode_line(&value).as_bytes()).await?;
        writer.flush().await
    }

    /// Replaces the word with `candidate` if it chains onto it
    pub async fn try_advance(&self, candidate: &str) -> Result<(), WordFault> {
        check_word(candidate)?;

        let mut value = self.value.lock().await;
        if !chains_onto(&value, candidate) {
            return Err(WordFault::BrokenChain);
        }

        value.clear();
        value.push_str(candidate);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_advance_on_match() {
        let word = SharedWord::new("cat");
        assert!(word.try_advance("tarp").await.is_ok());
        assert_eq!(word.current().await, "tarp");
    }

    #[tokio::test]
    async fn test_mismatch_keeps_word() {
        let word = SharedWord::new("cat");
        assert_eq!(word.try_advance("dog").await, Err(WordFault::BrokenChain));
        assert_eq!(word.try_advance("Tarp").await, Err(WordFault::BrokenChain));
        assert_eq!(word.try_advance("").await, Err(WordFault::Empty));
        assert_eq!(word.current().await, "cat");
    }

    #[tokio::test]
    async fn test_publish_writes_one_line() {
        let word = SharedWord::new("cat");
        let mut out = Vec::new();
        word.publish(&mut out).await.unwrap();
        assert_eq!(out, b"cat\n");
    }

    #[tokio::test]
    async fn test_publish_over_mock_stream() {
        let word = SharedWord::new("apple");
        let mut mock = tokio_test::io::Builder::new().write(b"apple\n").build();
        word.publish(&mut mock).await.unwrap();
    }
}
