//! Integration tests for the word-chain server and client
//!
//! These tests run a real server on an ephemeral port and drive it with
//! real TCP clients.

use client::bot::WordBot;
use client::error::ClientError;
use client::network::Client;
use server::config::ServerConfig;
use server::game::Game;
use server::network::Server;
use shared::ServerLine;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::{sleep, timeout};

const STEP: Duration = Duration::from_secs(5);

async fn start_server(slots: usize, start_word: &str) -> (SocketAddr, Arc<Game>) {
    let config = ServerConfig {
        port: 0,
        slots,
        start_word: start_word.to_string(),
        ..ServerConfig::default()
    };
    let server = Server::bind(config).await.expect("Failed to bind server");
    let addr = server.local_addr().unwrap();
    let game = server.game();
    tokio::spawn(server.run());
    (addr, game)
}

async fn connect(addr: SocketAddr) -> Client<TcpStream> {
    Client::connect(&addr.to_string())
        .await
        .expect("Failed to connect")
}

/// Waits until the server has seated exactly `count` players
async fn wait_for_players(game: &Game, count: usize) {
    timeout(STEP, async {
        while game.stats().await.occupied != count {
            sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("Players were not seated in time");
}

async fn wait_for_departures(game: &Game, count: u64) {
    timeout(STEP, async {
        while game.stats().await.departures < count {
            sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("Players did not depart in time");
}

async fn expect_line(client: &mut Client<TcpStream>) -> ServerLine {
    timeout(STEP, client.next_line())
        .await
        .expect("Timed out waiting for server line")
        .expect("Connection closed")
}

fn word(text: &str) -> ServerLine {
    ServerLine::Word(text.to_string())
}

/// TURN ROTATION TESTS
mod rotation_tests {
    use super::*;

    /// Rejected candidates keep the turn; an accepted one moves it along the ring
    #[tokio::test]
    async fn reject_then_pass_around_ring() {
        let (addr, game) = start_server(3, "cat").await;

        let mut first = connect(addr).await;
        assert_eq!(expect_line(&mut first).await, word("cat"));

        let mut second = connect(addr).await;
        let mut third = connect(addr).await;
        wait_for_players(&game, 3).await;

        first.send("dog").await.unwrap();
        assert_eq!(expect_line(&mut first).await, ServerLine::Rejected);

        first.send("tarp").await.unwrap();
        assert_eq!(expect_line(&mut second).await, word("tarp"));

        second.send("plum").await.unwrap();
        assert_eq!(expect_line(&mut third).await, word("plum"));

        third.send("mint").await.unwrap();
        assert_eq!(expect_line(&mut first).await, word("mint"));

        let stats = game.stats().await;
        assert_eq!(stats.turns_completed, 3);
        assert_eq!(stats.rejected_candidates, 1);
        assert!(stats.peak_turn_holders <= 1);
    }

    /// A player alone at the table keeps getting the turn
    #[tokio::test]
    async fn sole_player_keeps_turn() {
        let (addr, game) = start_server(3, "cat").await;

        let mut player = connect(addr).await;
        assert_eq!(expect_line(&mut player).await, word("cat"));

        player.send("tarp").await.unwrap();
        assert_eq!(expect_line(&mut player).await, word("tarp"));

        player.send("plum").await.unwrap();
        assert_eq!(expect_line(&mut player).await, word("plum"));

        assert_eq!(game.stats().await.turns_completed, 2);
    }
}

/// DEPARTURE TESTS
mod departure_tests {
    use super::*;

    /// A dropped player is skipped once its turn comes up
    #[tokio::test]
    async fn disconnected_player_is_skipped() {
        let (addr, game) = start_server(3, "cat").await;

        let mut first = connect(addr).await;
        assert_eq!(expect_line(&mut first).await, word("cat"));
        let second = connect(addr).await;
        let mut third = connect(addr).await;
        wait_for_players(&game, 3).await;

        drop(second);

        first.send("tarp").await.unwrap();
        assert_eq!(expect_line(&mut third).await, word("tarp"));
        wait_for_players(&game, 2).await;

        third.send("plum").await.unwrap();
        assert_eq!(expect_line(&mut first).await, word("plum"));
    }

    /// The turn survives an empty table and goes to the next arrival
    #[tokio::test]
    async fn parked_turn_goes_to_newcomer() {
        let (addr, game) = start_server(2, "cat").await;

        let mut first = connect(addr).await;
        assert_eq!(expect_line(&mut first).await, word("cat"));
        first.send("tarp").await.unwrap();
        assert_eq!(expect_line(&mut first).await, word("tarp"));

        first.leave().await.unwrap();
        wait_for_departures(&game, 1).await;
        wait_for_players(&game, 0).await;
        assert!(game.ring().is_parked().await);

        let mut newcomer = connect(addr).await;
        assert_eq!(expect_line(&mut newcomer).await, word("tarp"));
        assert!(!game.ring().is_parked().await);
    }
}

/// ADMISSION TESTS
mod admission_tests {
    use super::*;

    /// Extra connections are told the table is full and play continues
    #[tokio::test]
    async fn full_table_turns_away_extra_player() {
        let (addr, game) = start_server(2, "cat").await;

        let mut first = connect(addr).await;
        assert_eq!(expect_line(&mut first).await, word("cat"));
        let mut second = connect(addr).await;
        wait_for_players(&game, 2).await;

        let mut extra = connect(addr).await;
        assert_eq!(expect_line(&mut extra).await, ServerLine::Full);
        let closed = timeout(STEP, extra.next_line()).await.unwrap();
        assert!(matches!(closed, Err(ClientError::Closed)));
        assert_eq!(game.stats().await.occupied, 2);

        first.send("tarp").await.unwrap();
        assert_eq!(expect_line(&mut second).await, word("tarp"));
    }

    /// A slot freed by a leaver is reused by the next connection
    #[tokio::test]
    async fn freed_slot_is_reused() {
        let (addr, game) = start_server(2, "cat").await;

        let mut first = connect(addr).await;
        assert_eq!(expect_line(&mut first).await, word("cat"));
        let mut second = connect(addr).await;
        wait_for_players(&game, 2).await;

        first.leave().await.unwrap();
        assert_eq!(expect_line(&mut second).await, word("cat"));
        wait_for_players(&game, 1).await;

        let mut third = connect(addr).await;
        wait_for_players(&game, 2).await;

        second.send("tarp").await.unwrap();
        assert_eq!(expect_line(&mut third).await, word("tarp"));
    }
}

/// BOT TESTS
mod bot_tests {
    use super::*;

    /// Two bots share the table without ever overlapping turns
    #[tokio::test]
    async fn bots_play_to_completion() {
        let (addr, game) = start_server(2, "a").await;

        let mut handles = Vec::new();
        for seed in [1, 2] {
            let mut client = connect(addr).await;
            handles.push(tokio::spawn(async move {
                let mut bot = WordBot::new(Some(seed));
                client.run_bot(&mut bot, 3, Duration::ZERO).await
            }));
        }

        for handle in handles {
            let report = timeout(STEP, handle)
                .await
                .expect("Bot did not finish in time")
                .unwrap()
                .unwrap();
            assert_eq!(report.turns_played, 3);
            assert_eq!(report.rejections, 0);
        }

        wait_for_departures(&game, 2).await;
        let stats = game.stats().await;
        assert_eq!(stats.turns_completed, 6);
        assert_eq!(stats.occupied, 0);
        assert_eq!(stats.peak_turn_holders, 1);
        assert_eq!(stats.turn_holders, 0);
    }
}

/// CONCURRENCY TESTS
mod concurrency_tests {
    use super::*;

    const ROUNDS: u64 = 10;
    const BOTS: u64 = 3;
    const BOT_TURNS: u32 = 3;

    /// Joins and departures race hand-offs on a parallel runtime without
    /// stalling the ring or overlapping turns
    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn churn_across_worker_threads() {
        let (addr, game) = start_server(4, "a").await;

        for round in 0..ROUNDS {
            wait_for_players(&game, 0).await;

            let mut bots = Vec::new();
            for i in 0..BOTS {
                let mut client = connect(addr).await;
                bots.push(tokio::spawn(async move {
                    let mut bot = WordBot::new(Some(round * BOTS + i));
                    client.run_bot(&mut bot, BOT_TURNS, Duration::ZERO).await
                }));
            }

            let mut dropper = connect(addr).await;
            let dropped = tokio::spawn(async move {
                let line = dropper.next_line().await;
                drop(dropper);
                line
            });

            for bot in bots {
                let report = timeout(STEP, bot)
                    .await
                    .expect("Bot stalled during churn")
                    .unwrap()
                    .unwrap();
                assert_eq!(report.turns_played, BOT_TURNS);
            }
            let line = timeout(STEP, dropped)
                .await
                .expect("Dropping player never got the turn")
                .unwrap()
                .unwrap();
            assert!(matches!(line, ServerLine::Word(_)));
        }

        wait_for_departures(&game, ROUNDS * (BOTS + 1)).await;
        let stats = game.stats().await;
        assert_eq!(stats.turns_completed, ROUNDS * BOTS * BOT_TURNS as u64);
        assert_eq!(stats.peak_turn_holders, 1);
        assert_eq!(stats.turn_holders, 0);
    }
}
