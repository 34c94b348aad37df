use clap::Parser;
use log::{info, LevelFilter};
use server::config::ServerConfig;
use server::network::Server;
use shared::{DEFAULT_PORT, DEFAULT_WORD, MAX_PLAYERS};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Server IP address to bind to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Server port to listen on
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Number of player slots
    #[arg(short, long, default_value_t = MAX_PLAYERS)]
    slots: usize,

    /// Word the chain starts from
    #[arg(short, long, default_value = DEFAULT_WORD)]
    word: String,

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

    let config = ServerConfig {
        host: args.host,
        port: args.port,
        slots: args.slots,
        start_word: args.word,
    };

    let server = Server::bind(config).await?;

    tokio::select! {
        result = server.run() => result?,
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down");
        }
    }

    Ok(())
}
