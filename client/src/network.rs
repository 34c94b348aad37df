use crate::bot::WordBot;
use crate::error::ClientError;
use crate::input::InputManager;
use log::{debug, info, warn};
use shared::{encode_line, ServerLine, LEAVE_TOKEN};
use std::time::Duration;
use tokio::io::{
    self, AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader, ReadHalf, WriteHalf,
};
use tokio::net::TcpStream;
use tokio::time::sleep;

/// What a bot did before it left
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BotReport {
    pub turns_played: u32,
    pub rejections: u32,
}

pub struct Client<S> {
    reader: BufReader<ReadHalf<S>>,
    writer: WriteHalf<S>,
    /// Bytes of a line not yet terminated; kept across cancelled reads
    pending: Vec<u8>,
}

impl Client<TcpStream> {
    pub async fn connect(server_addr: &str) -> Result<Self, ClientError> {
        let stream = TcpStream::connect(server_addr).await?;
        info!("Connected to {}", stream.peer_addr()?);
        Ok(Self::from_stream(stream))
    }
}

impl<S: AsyncRead + AsyncWrite> Client<S> {
    pub fn from_stream(stream: S) -> Self {
        let (reader, writer) = io::split(stream);
        Self {
            reader: BufReader::new(reader),
            writer,
            pending: Vec::new(),
        }
    }

    /// Reads one line from the server
    ///
    /// Safe to cancel inside `select!`: partial lines stay buffered.
    pub async fn next_line(&mut self) -> Result<ServerLine, ClientError> {
        let read = self.reader.read_until(b'\n', &mut self.pending).await?;
        if read == 0 && self.pending.is_empty() {
            return Err(ClientError::Closed);
        }

        let line = String::from_utf8_lossy(&self.pending).into_owned();
        self.pending.clear();
        Ok(ServerLine::parse(&line))
    }

    pub async fn send(&mut self, text: &str) -> Result<(), ClientError> {
        self.writer.write_all(encode_line(text).as_bytes()).await?;
        self.writer.flush().await?;
        Ok(())
    }

    pub async fn leave(&mut self) -> Result<(), ClientError> {
        self.send(LEAVE_TOKEN).await?;
        self.writer.shutdown().await?;
        Ok(())
    }

    /// Relays server lines to stdout and player lines to the server
    ///
    /// Returns once the player leaves or the server closes the connection.
    pub async fn run_interactive<R>(&mut self, input: &mut InputManager<R>) -> Result<(), ClientError>
    where
        R: AsyncRead + Unpin,
    {
        println!("Waiting for your turn. Type a word, or '{}' to leave.", LEAVE_TOKEN);

        loop {
            tokio::select! {
                line = self.next_line() => match line {
                    Ok(ServerLine::Word(word)) => println!("Your turn. Current word: {}", word),
                    Ok(ServerLine::Rejected) => println!("Rejected, try again."),
                    Ok(ServerLine::Full) => return Err(ClientError::ServerFull),
                    Err(ClientError::Closed) => {
                        info!("Server closed the connection");
                        return Ok(());
                    }
                    Err(e) => return Err(e),
                },
                entry = input.next_entry() => {
                    let entry = entry?;
                    if entry == LEAVE_TOKEN {
                        self.leave().await?;
                        return Ok(());
                    }
                    self.send(&entry).await?;
                },
            }
        }
    }

    /// Plays `max_turns` turns with `bot`, then leaves on the next turn
    ///
    /// The bot also leaves when it has no untried word for the current turn.
    pub async fn run_bot(
        &mut self,
        bot: &mut WordBot,
        max_turns: u32,
        delay: Duration,
    ) -> Result<BotReport, ClientError> {
        let mut report = BotReport::default();
        let mut current = String::new();

        loop {
            match self.next_line().await? {
                ServerLine::Full => return Err(ClientError::ServerFull),
                ServerLine::Word(word) => {
                    if report.turns_played >= max_turns {
                        info!("Played {} turns, leaving", report.turns_played);
                        self.leave().await?;
                        return Ok(report);
                    }
                    bot.start_turn();
                    current = word;
                    report.turns_played += 1;
                    if !delay.is_zero() {
                        sleep(delay).await;
                    }
                }
                ServerLine::Rejected => {
                    report.rejections += 1;
                    debug!("Rejected on '{}'", current);
                }
            }

            match bot.pick(&current) {
                Some(answer) => {
                    info!("{} -> {}", current, answer);
                    self.send(&answer).await?;
                }
                None => {
                    warn!("No word left for '{}', leaving", current);
                    self.leave().await?;
                    return Ok(report);
                }
            }
        }
    }
}
