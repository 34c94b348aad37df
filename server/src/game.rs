use crate::config::ServerConfig;
use crate::error::Result;
use crate::ring::TurnRing;
use crate::word::SharedWord;
use log::{info, warn};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

/// Shared state of one running word-chain game
///
/// One `Game` is created per server and handed by `Arc` to the accept loop
/// and to every session.
pub struct Game {
    ring: TurnRing,
    word: SharedWord,
    turns_completed: AtomicU64,
    rejected_candidates: AtomicU64,
    departures: AtomicU64,
    turn_holders: AtomicUsize,
    peak_turn_holders: AtomicUsize,
}

/// Point-in-time counters for a running game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameStats {
    pub occupied: usize,
    pub capacity: usize,
    pub turns_completed: u64,
    pub rejected_candidates: u64,
    pub departures: u64,
    pub turn_holders: usize,
    pub peak_turn_holders: usize,
}

impl Game {
    pub fn new(slots: usize, start_word: impl Into<String>) -> Self {
        Self {
            ring: TurnRing::new(slots),
            word: SharedWord::new(start_word),
            turns_completed: AtomicU64::new(0),
            rejected_candidates: AtomicU64::new(0),
            departures: AtomicU64::new(0),
            turn_holders: AtomicUsize::new(0),
            peak_turn_holders: AtomicUsize::new(0),
        }
    }

    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(config.slots, config.start_word.clone())
    }

    pub fn ring(&self) -> &TurnRing {
        &self.ring
    }

    pub fn word(&self) -> &SharedWord {
        &self.word
    }

    /// Seats an accepted connection, logging the outcome
    pub async fn admit(&self, peer: SocketAddr) -> Result<usize> {
        match self.ring.admit(peer).await {
            Ok(slot) => {
                info!("Player {} joined in slot {}", peer, slot);
                Ok(slot)
            }
            Err(e) => {
                warn!("Turning away {}: {}", peer, e);
                Err(e)
            }
        }
    }

    /// Marks the start of a turn body; the returned guard marks its end
    pub fn begin_turn(&self, slot: usize) -> TurnGuard<'_> {
        let holders = self.turn_holders.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_turn_holders.fetch_max(holders, Ordering::SeqCst);
        debug_assert_eq!(holders, 1, "slot {slot} entered a turn while another was active");
        TurnGuard { game: self }
    }

    pub fn record_turn(&self) {
        self.turns_completed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_rejection(&self) {
        self.rejected_candidates.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_departure(&self) {
        self.departures.fetch_add(1, Ordering::Relaxed);
    }

    pub async fn stats(&self) -> GameStats {
        GameStats {
            occupied: self.ring.occupied_count().await,
            capacity: self.ring.capacity(),
            turns_completed: self.turns_completed.load(Ordering::Relaxed),
            rejected_candidates: self.rejected_candidates.load(Ordering::Relaxed),
            departures: self.departures.load(Ordering::Relaxed),
            turn_holders: self.turn_holders.load(Ordering::SeqCst),
            peak_turn_holders: self.peak_turn_holders.load(Ordering::SeqCst),
        }
    }
}

/// Keeps the turn-holder gauge raised while a turn body runs
pub struct TurnGuard<'a> {
    game: &'a Game,
}

impl Drop for TurnGuard<'_> {
    fn drop(&mut self) {
        self.game.turn_holders.fetch_sub(1, Ordering::SeqCst);
    }
}
