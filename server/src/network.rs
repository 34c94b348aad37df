//! Server network layer: TCP accept loop and session spawning

use crate::config::ServerConfig;
use crate::error::{GameError, Result};
use crate::game::Game;
use crate::session::{Departure, Session};
use log::{debug, error, info, warn};
use shared::{encode_line, SERVER_FULL};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream};

/// Listening server that seats players and starts their sessions
pub struct Server {
    listener: TcpListener,
    game: Arc<Game>,
}

impl Server {
    /// Validates the configuration and binds the listener
    pub async fn bind(config: ServerConfig) -> Result<Self> {
        config.validate()?;

        let listener = TcpListener::bind(config.bind_addr()).await?;
        info!(
            "Server listening on {} with {} slots, starting word '{}'",
            listener.local_addr()?,
            config.slots,
            config.start_word
        );

        Ok(Server {
            listener,
            game: Arc::new(Game::from_config(&config)),
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Shared game state, for monitoring a running server
    pub fn game(&self) -> Arc<Game> {
        Arc::clone(&self.game)
    }

    /// Accepts connections until the task is dropped
    ///
    /// Accept errors are logged and retried; a single failed connection never
    /// stops the loop.
    pub async fn run(self) -> Result<()> {
        info!("Server started successfully");

        loop {
            match self.listener.accept().await {
                Ok((stream, peer)) => self.on_accept(stream, peer).await,
                Err(e) => {
                    error!("Error accepting connection: {}", e);
                    tokio::time::sleep(Duration::from_millis(10)).await;
                }
            }
        }
    }

    async fn on_accept(&self, stream: TcpStream, peer: SocketAddr) {
        match self.game.admit(peer).await {
            Ok(slot) => {
                if let Err(e) = stream.set_nodelay(true) {
                    debug!("Could not set TCP_NODELAY for {}: {}", peer, e);
                }

                let session = Session::new(Arc::clone(&self.game), slot, peer, stream);
                tokio::spawn(async move {
                    match session.run().await {
                        Departure::Left => debug!("Session for slot {} finished", slot),
                        Departure::Disconnected => debug!("Session for slot {} dropped", slot),
                    }
                });
            }
            Err(GameError::SlotExhausted) => reject(stream, peer).await,
            Err(e) => warn!("Could not seat {}: {}", peer, e),
        }
    }
}

/// Tells a player the table is full and closes the connection
async fn reject(mut stream: TcpStream, peer: SocketAddr) {
    if let Err(e) = stream.write_all(encode_line(SERVER_FULL).as_bytes()).await {
        debug!("Failed to notify {} of full table: {}", peer, e);
    }
    if let Err(e) = stream.shutdown().await {
        debug!("Failed to close connection to {}: {}", peer, e);
    }
}
