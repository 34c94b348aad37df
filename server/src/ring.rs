//! Turn ring: successor lookup and per-slot turn signals
//!
//! Every slot owns one binary semaphore for its whole lifetime. Holding the
//! turn means having consumed a permit from your own semaphore; handing the
//! turn off means adding a permit to the successor's. The successor is found
//! by [`next_occupied`] over an occupancy snapshot taken under the slot-table
//! lock, and the permit is posted before that lock is released, so a claim or
//! a departure can never slip in between the lookup and the post.

use crate::error::{GameError, Result};
use crate::slot_table::SlotTable;
use log::{debug, info, warn};
use std::net::SocketAddr;
use tokio::sync::{RwLock, Semaphore};

/// Where the turn went when a player left
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handoff {
    /// Posted to this slot (possibly the departing slot's only survivor)
    To(usize),
    /// Nobody is seated; the next player to join receives the turn
    Parked,
}

/// Finds the first occupied slot after `from`, wrapping around
///
/// Scans `from + 1 ..= from + N` modulo N, so the result is `from` itself
/// when it is the only occupied slot. Fails only when nothing is occupied.
pub fn try_next_occupied(occupancy: &[bool], from: usize) -> Result<usize> {
    let n = occupancy.len();
    (1..=n)
        .map(|step| (from + step) % n)
        .find(|&slot| occupancy[slot])
        .ok_or(GameError::RingInconsistency { from })
}

/// Like [`try_next_occupied`], but an empty ring yields `from`
pub fn next_occupied(occupancy: &[bool], from: usize) -> usize {
    try_next_occupied(occupancy, from).unwrap_or(from)
}

/// The slot table plus one turn signal per slot
pub struct TurnRing {
    table: RwLock<SlotTable>,
    signals: Vec<Semaphore>,
}

impl TurnRing {
    /// Creates a ring of `capacity` free slots with slot 0 holding the turn
    pub fn new(capacity: usize) -> Self {
        let signals = (0..capacity)
            .map(|slot| Semaphore::new(usize::from(slot == 0)))
            .collect();

        Self {
            table: RwLock::new(SlotTable::new(capacity)),
            signals,
        }
    }

    pub fn capacity(&self) -> usize {
        self.signals.len()
    }

    /// Seats a new player in the lowest free slot
    ///
    /// If the turn is parked, the new slot is armed before the lock is
    /// released. Otherwise the player waits until the ring reaches them.
    pub async fn admit(&self, peer: SocketAddr) -> Result<usize> {
        let mut table = self.table.write().await;
        let slot = table.claim(peer).ok_or(GameError::SlotExhausted)?;

        if table.take_parked() {
            info!("Delivering parked turn to slot {}", slot);
            self.arm(slot);
        }

        Ok(slot)
    }

    /// Blocks until `slot` is handed the turn
    pub async fn wait_turn(&self, slot: usize) -> Result<()> {
        let signal = self
            .signals
            .get(slot)
            .ok_or(GameError::RingInconsistency { from: slot })?;
        let permit = signal
            .acquire()
            .await
            .map_err(|_| GameError::TurnSignalClosed { slot })?;
        permit.forget();
        Ok(())
    }

    /// Hands the turn from a seated `from` to its successor
    ///
    /// Returns the slot that now holds the turn. When `from` is alone it
    /// re-arms itself.
    pub async fn pass_turn(&self, from: usize) -> usize {
        let table = self.table.read().await;
        let target = match try_next_occupied(&table.occupancy(), from) {
            Ok(target) => target,
            Err(e) => {
                warn!("{}; keeping the turn on slot {}", e, from);
                from
            }
        };

        self.arm(target);
        target
    }

    /// Frees `slot` and hands its turn to the successor in the shrunken ring
    ///
    /// Exactly one slot is armed afterwards unless the ring is now empty, in
    /// which case the turn is parked and nothing is armed.
    pub async fn depart(&self, slot: usize) -> Handoff {
        let mut table = self.table.write().await;
        table.release(slot);

        if table.is_empty() {
            table.park_turn();
            debug!("Slot {} was the last player; turn parked", slot);
            return Handoff::Parked;
        }

        let target = next_occupied(&table.occupancy(), slot);
        self.arm(target);
        Handoff::To(target)
    }

    /// Frees `slot` without posting any turn signal
    ///
    /// For a slot that never acquired the turn: the holder is elsewhere and
    /// keeps it. If the table is now empty the turn is parked.
    pub async fn vacate(&self, slot: usize) {
        let mut table = self.table.write().await;
        table.release(slot);

        if table.is_empty() {
            table.park_turn();
            debug!("Slot {} vacated an empty table; turn parked", slot);
        }
    }

    pub async fn occupancy(&self) -> Vec<bool> {
        self.table.read().await.occupancy()
    }

    pub async fn occupied_count(&self) -> usize {
        self.table.read().await.len()
    }

    pub async fn is_parked(&self) -> bool {
        self.table.read().await.is_parked()
    }

    /// Returns true if `slot` has a pending, unconsumed turn signal
    pub fn is_armed(&self, slot: usize) -> bool {
        self.signals
            .get(slot)
            .is_some_and(|signal| signal.available_permits() > 0)
    }

    /// Number of slots with a pending turn signal
    pub fn armed_count(&self) -> usize {
        self.signals
            .iter()
            .filter(|signal| signal.available_permits() > 0)
            .count()
    }

    fn arm(&self, slot: usize) {
        if let Some(signal) = self.signals.get(slot) {
            signal.add_permits(1);
            debug_assert!(signal.available_permits() <= 1, "slot {slot} double-armed");
        }
    }
}
