pub const DEFAULT_PORT: u16 = 7777;
pub const DEFAULT_WORD: &str = "a";

/// Slots a server opens when nothing else is configured.
pub const MAX_PLAYERS: usize = 5;
/// Compile-time ceiling on the slot table; configuration cannot exceed it.
pub const MAX_SLOTS: usize = 16;
/// Longest word the server keeps, in bytes.
pub const MAX_WORD_LEN: usize = 127;

pub const LEAVE_TOKEN: &str = "*";
pub const REJECTION: &str = "Invalid word. Try again.";
pub const SERVER_FULL: &str = "Server full";

/// Why a submitted line cannot become the next word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum WordFault {
    #[error("word is empty")]
    Empty,
    #[error("word is too long")]
    TooLong,
    #[error("word is not valid UTF-8")]
    NotUtf8,
    #[error("word contains a line break")]
    LineBreak,
    #[error("word does not start with the last letter")]
    BrokenChain,
}

/// A line received from a player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientLine {
    Leave,
    Candidate(String),
}

impl ClientLine {
    /// Parses one raw line. A trailing `\n` or `\r\n` is stripped; any other
    /// line break left in the text is a fault.
    pub fn parse(raw: &[u8]) -> Result<Self, WordFault> {
        let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
        let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
        let text = std::str::from_utf8(raw).map_err(|_| WordFault::NotUtf8)?;

        if text == LEAVE_TOKEN {
            return Ok(ClientLine::Leave);
        }

        check_word(text)?;
        Ok(ClientLine::Candidate(text.to_string()))
    }
}

/// A line received from the server, as seen by a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerLine {
    Word(String),
    Rejected,
    Full,
}

impl ServerLine {
    pub fn parse(line: &str) -> Self {
        let line = line.trim_end_matches(['\r', '\n']);
        match line {
            REJECTION => ServerLine::Rejected,
            SERVER_FULL => ServerLine::Full,
            word => ServerLine::Word(word.to_string()),
        }
    }
}

/// Checks the shape of a word without looking at the chain rule.
pub fn check_word(word: &str) -> Result<(), WordFault> {
    if word.is_empty() {
        return Err(WordFault::Empty);
    }
    if word.len() > MAX_WORD_LEN {
        return Err(WordFault::TooLong);
    }
    if word.contains(['\r', '\n']) {
        return Err(WordFault::LineBreak);
    }
    Ok(())
}

/// The chain rule: the candidate's first byte must equal the current word's
/// last byte. Case-sensitive.
pub fn chains_onto(current: &str, candidate: &str) -> bool {
    match (current.as_bytes().last(), candidate.as_bytes().first()) {
        (Some(last), Some(first)) => last == first,
        _ => false,
    }
}

pub fn encode_line(text: &str) -> String {
    let mut line = String::with_capacity(text.len() + 1);
    line.push_str(text);
    line.push('\n');
    line
}
