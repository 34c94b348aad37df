use clap::Parser;
use client::bot::WordBot;
use client::input::InputManager;
use client::network::Client;
use log::{info, LevelFilter};
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Server address to connect to
    #[arg(short = 's', long, default_value = "127.0.0.1:7777")]
    server: String,

    /// Let the built-in bot play instead of reading stdin
    #[arg(short, long)]
    bot: bool,

    /// Turns the bot plays before leaving
    #[arg(short, long, default_value = "10")]
    turns: u32,

    /// Pause before each bot answer, in milliseconds
    #[arg(long, default_value = "500")]
    delay_ms: u64,

    /// Seed for the bot's word choices
    #[arg(long)]
    seed: Option<u64>,

    /// Log at debug level regardless of RUST_LOG
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut logger =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if args.debug {
        logger.filter_level(LevelFilter::Debug);
    }
    logger.init();

    info!("Connecting to: {}", args.server);
    let mut client = Client::connect(&args.server).await?;

    if args.bot {
        let mut bot = WordBot::new(args.seed);
        let report = client
            .run_bot(&mut bot, args.turns, Duration::from_millis(args.delay_ms))
            .await?;
        info!(
            "Bot finished: {} turns, {} rejections",
            report.turns_played, report.rejections
        );
        return Ok(());
    }

    let mut input = InputManager::stdin();
    client.run_interactive(&mut input).await?;

    // The stdin reader thread cannot be cancelled and would hold up runtime shutdown
    std::process::exit(0);
}
