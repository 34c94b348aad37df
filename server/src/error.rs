//! Error taxonomy for the turn server.

use shared::WordFault;

#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// Every slot is taken; the connection is turned away.
    #[error("no free slot for new player")]
    SlotExhausted,
    /// The peer closed its stream or the read failed.
    #[error("peer in slot {slot} disconnected")]
    PeerDisconnected { slot: usize },
    /// The submitted line cannot become the next word. The turn stays put.
    #[error("invalid candidate: {reason}")]
    InvalidCandidate { reason: WordFault },
    /// Ring navigation over a table with no occupants.
    #[error("ring has no occupied slot after {from}")]
    RingInconsistency { from: usize },
    /// The slot's turn signal was closed while waiting on it.
    #[error("turn signal for slot {slot} closed")]
    TurnSignalClosed { slot: usize },
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GameError>;
