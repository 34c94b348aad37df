//! Per-player session loop
//!
//! A session owns one connection and one slot index. It spends its life in
//! this cycle:
//!
//! 1. Wait on its own turn signal.
//! 2. Publish the current word to its player.
//! 3. Read lines until one chains onto the word; each bad line gets a
//!    rejection and another read. The turn is not given up on a bad line.
//! 4. Store the word and post the successor's turn signal.
//!
//! End of stream, a read or write failure, and the leave token all take the
//! departure path: the slot is freed, the successor in the shrunken ring is
//! signaled (or the turn is parked), and `run` returns.

use crate::error::GameError;
use crate::game::Game;
use crate::ring::Handoff;
use log::{debug, info, warn};
use shared::{encode_line, ClientLine, WordFault, REJECTION};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{
    self, AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader,
    ReadHalf, WriteHalf,
};

/// Longest raw line read in one go; longer lines are drained and rejected
const LINE_LIMIT: u64 = 1024;

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Departure {
    /// The player sent the leave token
    Left,
    /// The stream ended or failed
    Disconnected,
}

/// Result of one turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// A valid word was stored and the turn posted to `to`
    Passed { to: usize },
    /// The player is gone; the slot is free
    Departed {
        reason: Departure,
        handoff: Handoff,
    },
}

enum TurnEnd {
    Played(String),
    Gone(Departure),
}

pub struct Session<S> {
    game: Arc<Game>,
    slot: usize,
    peer: SocketAddr,
    reader: BufReader<ReadHalf<S>>,
    writer: WriteHalf<S>,
}

impl<S> Session<S>
where
    S: AsyncRead + AsyncWrite + Send + Unpin,
{
    /// Binds a connection to an already claimed slot
    pub fn new(game: Arc<Game>, slot: usize, peer: SocketAddr, stream: S) -> Self {
        let (reader, writer) = io::split(stream);
        Self {
            game,
            slot,
            peer,
            reader: BufReader::new(reader),
            writer,
        }
    }

    /// Plays turns until the player leaves or drops
    pub async fn run(mut self) -> Departure {
        loop {
            if let Err(e) = self.game.ring().wait_turn(self.slot).await {
                warn!("Slot {} stopped waiting for its turn: {}", self.slot, e);
                self.game.ring().vacate(self.slot).await;
                self.game.record_departure();
                return Departure::Disconnected;
            }

            match self.take_turn().await {
                TurnOutcome::Passed { .. } => continue,
                TurnOutcome::Departed { reason, .. } => return reason,
            }
        }
    }

    /// Plays one turn; the caller must already hold this slot's turn
    ///
    /// The turn gauge covers the exchange with the player only. It is
    /// lowered before the successor is signaled.
    pub async fn take_turn(&mut self) -> TurnOutcome {
        let game = Arc::clone(&self.game);
        let ending = {
            let _turn = game.begin_turn(self.slot);
            self.exchange(&game).await
        };

        match ending {
            TurnEnd::Played(word) => {
                game.record_turn();
                let to = game.ring().pass_turn(self.slot).await;
                if to == self.slot {
                    debug!("Slot {} played '{}' and keeps the turn", self.slot, word);
                } else {
                    info!("Slot {} played '{}', turn to slot {}", self.slot, word, to);
                }
                debug!("{:?}", game.stats().await);
                TurnOutcome::Passed { to }
            }
            TurnEnd::Gone(reason) => self.depart(reason).await,
        }
    }

    /// Sends the word and reads until a candidate chains onto it
    async fn exchange(&mut self, game: &Game) -> TurnEnd {
        if let Err(e) = game.word().publish(&mut self.writer).await {
            debug!("Slot {}: failed to send word: {}", self.slot, e);
            return TurnEnd::Gone(Departure::Disconnected);
        }

        loop {
            let fault = match self.next_line().await {
                Ok(ClientLine::Candidate(word)) => match game.word().try_advance(&word).await {
                    Ok(()) => return TurnEnd::Played(word),
                    Err(fault) => fault,
                },
                Ok(ClientLine::Leave) => return TurnEnd::Gone(Departure::Left),
                Err(GameError::InvalidCandidate { reason }) => reason,
                Err(e) => {
                    debug!("Slot {}: {}", self.slot, e);
                    return TurnEnd::Gone(Departure::Disconnected);
                }
            };

            if let Err(e) = self.reject(fault).await {
                debug!("Slot {}: failed to send rejection: {}", self.slot, e);
                return TurnEnd::Gone(Departure::Disconnected);
            }
        }
    }

    async fn next_line(&mut self) -> Result<ClientLine, GameError> {
        let mut line = Vec::new();
        let read = (&mut self.reader)
            .take(LINE_LIMIT)
            .read_until(b'\n', &mut line)
            .await
            .map_err(|_| GameError::PeerDisconnected { slot: self.slot })?;
        if read == 0 {
            return Err(GameError::PeerDisconnected { slot: self.slot });
        }

        if line.last() != Some(&b'\n') && read as u64 == LINE_LIMIT {
            self.drain_line().await?;
            return Err(GameError::InvalidCandidate {
                reason: WordFault::TooLong,
            });
        }

        ClientLine::parse(&line).map_err(|reason| GameError::InvalidCandidate { reason })
    }

    /// Discards the rest of an oversized line
    async fn drain_line(&mut self) -> Result<(), GameError> {
        let mut rest = Vec::new();
        loop {
            rest.clear();
            let read = (&mut self.reader)
                .take(LINE_LIMIT)
                .read_until(b'\n', &mut rest)
                .await
                .map_err(|_| GameError::PeerDisconnected { slot: self.slot })?;
            if read == 0 {
                return Err(GameError::PeerDisconnected { slot: self.slot });
            }
            if rest.last() == Some(&b'\n') {
                return Ok(());
            }
        }
    }

    async fn reject(&mut self, reason: WordFault) -> std::io::Result<()> {
        debug!("Slot {}: rejected candidate ({})", self.slot, reason);
        self.game.record_rejection();
        self.writer
            .write_all(encode_line(REJECTION).as_bytes())
            .await?;
        self.writer.flush().await
    }

    async fn depart(&mut self, reason: Departure) -> TurnOutcome {
        let handoff = self.game.ring().depart(self.slot).await;
        self.game.record_departure();

        match reason {
            Departure::Left => info!("Player {} in slot {} left", self.peer, self.slot),
            Departure::Disconnected => {
                info!("Player {} in slot {} disconnected", self.peer, self.slot)
            }
        }
        match handoff {
            Handoff::To(to) => debug!("Slot {} handed its turn to slot {}", self.slot, to),
            Handoff::Parked => debug!("Slot {} parked the turn", self.slot),
        }

        if let Err(e) = self.writer.shutdown().await {
            debug!("Slot {}: failed to close connection: {}", self.slot, e);
        }
        TurnOutcome::Departed { reason, handoff }
    }
}
