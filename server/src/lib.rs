//! # Word-Chain Server Library
//!
//! This library implements a multiplayer word-chain game server. Players
//! connect over TCP, take turns in a fixed ring, and each must answer the
//! current word with a word starting with its last letter.
//!
//! ## Turn Coordination
//!
//! ### Slots and the Ring
//! The server owns a fixed number of slots. A connecting player is seated in
//! the lowest free slot, and turn order is slot order with wraparound over
//! the occupied slots only. There is no central scheduler: each session waits
//! on its own turn signal, and the player holding the turn posts the next
//! occupied slot's signal when it is done.
//!
//! ### Departures
//! A player may leave with `*` or simply drop. Either way its session frees
//! the slot and hands the turn on to the next occupied slot in the shrunken
//! ring, so the game never stalls on a player who is gone. When the last
//! player leaves the turn is parked and goes to whoever joins next.
//!
//! ### Shared Word
//! The current word lives behind its own mutex. Only the turn holder
//! publishes and replaces it, and a word that does not chain is rejected
//! without giving up the turn.
//!
//! ## Module Organization
//!
//! - `slot_table`: who sits where, claim and release
//! - `ring`: successor lookup and per-slot turn signals
//! - `word`: the shared word and the chain check
//! - `game`: shared state handed to every session, plus counters
//! - `session`: the per-player turn loop
//! - `network`: TCP accept loop
//! - `config`, `error`: startup settings and the error taxonomy
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use server::config::ServerConfig;
//! use server::network::Server;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ServerConfig {
//!         port: 7777,
//!         slots: 5,
//!         start_word: "a".to_string(),
//!         ..ServerConfig::default()
//!     };
//!
//!     let server = Server::bind(config).await?;
//!     server.run().await?;
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod game;
pub mod network;
pub mod ring;
pub mod session;
pub mod slot_table;
pub mod word;
