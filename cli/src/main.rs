use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::time::Duration;

use canvas::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};
use canvas::engine::{Engine, EngineError};
use canvas::raster::RasterError;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod peer;
mod script;

use peer::Peer;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
    #[error("websocket connect failed: {0}")]
    WsConnect(Box<tokio_tungstenite::tungstenite::Error>),
    #[error("websocket error: {0}")]
    Ws(Box<tokio_tungstenite::tungstenite::Error>),
    #[error("websocket closed")]
    WsClosed,
    #[error("script line {line}: {source}")]
    Script {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error(transparent)]
    Raster(#[from] RasterError),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "draw-cli", about = "Headless peer for the shared-canvas relay")]
struct Cli {
    #[arg(long, env = "DRAW_RELAY_URL", default_value = "http://127.0.0.1:3000")]
    url: String,

    #[arg(long, default_value_t = CANVAS_WIDTH)]
    width: u32,

    #[arg(long, default_value_t = CANVAS_HEIGHT)]
    height: u32,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a pointer script while serving peers.
    Draw(DrawArgs),
    /// Mirror the shared canvas until interrupted.
    Watch(WatchArgs),
    /// Clear every peer's canvas.
    Clear,
}

#[derive(Args, Debug)]
struct DrawArgs {
    #[arg(long, default_value = "-", help = "Script path, or - for stdin")]
    input: String,

    #[arg(long, help = "Write the final raster to this PNG file")]
    output: Option<PathBuf>,

    #[arg(long, default_value_t = 500, help = "Keep serving peers this long after the script")]
    linger_ms: u64,
}

#[derive(Args, Debug)]
struct WatchArgs {
    #[arg(long, help = "Write the raster to this PNG file on exit")]
    output: Option<PathBuf>,

    #[arg(long, help = "Stop after this many seconds instead of waiting for Ctrl-C")]
    duration_secs: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let url = peer::ws_url(&cli.url)?;
    let engine = Engine::with_size(cli.width, cli.height)?;

    match cli.command {
        Command::Draw(args) => run_draw(&url, engine, args).await,
        Command::Watch(args) => run_watch(&url, engine, args).await,
        Command::Clear => run_clear(&url, engine).await,
    }
}

async fn run_draw(url: &str, engine: Engine, args: DrawArgs) -> Result<(), CliError> {
    let reader: Box<dyn BufRead> = if args.input == "-" {
        Box::new(BufReader::new(io::stdin()))
    } else {
        Box::new(BufReader::new(File::open(&args.input)?))
    };
    let steps = script::read_script(reader)?;
    tracing::info!(steps = steps.len(), "loaded script");

    let mut peer = Peer::connect(url, engine).await?;
    peer.join().await?;
    for step in &steps {
        peer.run_step(step).await?;
    }
    peer.serve_for(Duration::from_millis(args.linger_ms)).await?;

    if let Some(path) = &args.output {
        peer.write_png(path)?;
    }
    peer.close().await
}

async fn run_watch(url: &str, engine: Engine, args: WatchArgs) -> Result<(), CliError> {
    let mut peer = Peer::connect(url, engine).await?;
    peer.join().await?;
    peer.serve_until_interrupted(args.duration_secs.map(Duration::from_secs)).await?;

    if let Some(path) = &args.output {
        peer.write_png(path)?;
    }
    peer.close().await
}

async fn run_clear(url: &str, engine: Engine) -> Result<(), CliError> {
    let mut peer = Peer::connect(url, engine).await?;
    peer.clear().await?;
    peer.close().await
}
