//! # Word-Chain Client Library
//!
//! Terminal client for the word-chain server. It speaks the server's line
//! protocol: the server sends the current word when it is this player's
//! turn, the player answers with a word beginning with that word's last
//! letter, and a lone `*` leaves the game.
//!
//! ## Module Organization
//!
//! ### Network Module (`network`)
//! Connection handling and the two play loops:
//! - Interactive relay between the terminal and the server
//! - Bot loop that answers automatically and leaves after a set number of turns
//!
//! ### Input Module (`input`)
//! Reads trimmed, non-blank entries from stdin. End of input leaves the game.
//!
//! ### Bot Module (`bot`)
//! Picks answers at random from a built-in dictionary that covers every
//! starting letter.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use client::bot::WordBot;
//! use client::network::Client;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut client = Client::connect("127.0.0.1:7777").await?;
//!     let mut bot = WordBot::new(None);
//!
//!     let report = client.run_bot(&mut bot, 10, Duration::from_millis(500)).await?;
//!     println!("played {} turns", report.turns_played);
//!
//!     Ok(())
//! }
//! ```

pub mod bot;
pub mod error;
pub mod input;
pub mod network;
