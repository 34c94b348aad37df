//! Fixed-capacity slot table for the turn ring
//!
//! This module tracks which ring positions currently hold a player:
//! - Lowest-index-first slot claiming with a hard capacity limit
//! - Slot release when a player leaves or drops
//! - Occupancy snapshots for ring navigation
//! - The parked-turn flag used when the last player leaves
//!
//! The table itself has no locking. [`crate::ring::TurnRing`] wraps it in a
//! single lock so that claims, releases and successor lookups are serialized
//! against each other.

use log::info;
use std::net::SocketAddr;
use std::time::{Duration, Instant};

/// The player currently seated in a slot
#[derive(Debug, Clone)]
pub struct Occupant {
    /// Remote address of the player's connection
    pub peer: SocketAddr,
    /// When the slot was claimed
    pub joined_at: Instant,
}

impl Occupant {
    pub fn new(peer: SocketAddr) -> Self {
        Self {
            peer,
            joined_at: Instant::now(),
        }
    }

    /// How long this player has been seated
    pub fn seated_for(&self) -> Duration {
        self.joined_at.elapsed()
    }
}

/// Ring positions and who sits in them
///
/// The number of slots is fixed when the table is created. A slot is either
/// free (`None`) or holds exactly one [`Occupant`].
#[derive(Debug)]
pub struct SlotTable {
    slots: Vec<Option<Occupant>>,
    /// Set when the last occupant left while holding the turn; the next
    /// claim receives the turn instead of waiting for a hand-off.
    parked: bool,
}

impl SlotTable {
    /// Creates a table with `capacity` free slots
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
            parked: false,
        }
    }

    /// Seats a player in the lowest free slot
    ///
    /// Returns `Some(slot)` on success, `None` when every slot is taken. A
    /// full table is left untouched.
    pub fn claim(&mut self, peer: SocketAddr) -> Option<usize> {
        let slot = self.slots.iter().position(Option::is_none)?;
        self.slots[slot] = Some(Occupant::new(peer));
        info!("Slot {} claimed by {}", slot, peer);
        Some(slot)
    }

    /// Frees a slot
    ///
    /// Returns the departing occupant, or `None` if the slot was already free
    /// or out of range.
    pub fn release(&mut self, slot: usize) -> Option<Occupant> {
        let occupant = self.slots.get_mut(slot)?.take()?;
        info!(
            "Slot {} released by {} after {:.1}s",
            slot,
            occupant.peer,
            occupant.seated_for().as_secs_f32()
        );
        Some(occupant)
    }

    #[cfg(test)]
    fn is_occupied(&self, slot: usize) -> bool {
        matches!(self.slots.get(slot), Some(Some(_)))
    }

    #[cfg(test)]
    fn occupant(&self, slot: usize) -> Option<&Occupant> {
        self.slots.get(slot)?.as_ref()
    }

    /// Copies the occupied flags for ring navigation
    pub fn occupancy(&self) -> Vec<bool> {
        self.slots.iter().map(Option::is_some).collect()
    }

    /// Marks the turn as parked with nobody to hold it
    pub fn park_turn(&mut self) {
        self.parked = true;
    }

    /// Clears the parked flag, returning whether it was set
    pub fn take_parked(&mut self) -> bool {
        std::mem::replace(&mut self.parked, false)
    }

    pub fn is_parked(&self) -> bool {
        self.parked
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the number of occupied slots
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Returns true if no slot is occupied
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }
}
