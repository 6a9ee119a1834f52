//! Terminal frontend for the Whisperwood narrative engine.

mod play;

use std::io;
use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ww_engine::config::{DEFAULT_START_HEALTH, DEFAULT_TURN_COST};
use ww_engine::{EngineConfig, Narrator, Session, Story, TurnEngine};
use ww_narrator::{ChatNarrator, NarratorConfig, ScriptedNarrator};

#[derive(Parser)]
#[command(
    name = "whisperwood",
    about = "Whisperwood, a choose-your-own-adventure told by a language model",
    version
)]
struct Cli {
    /// Story file (JSON) to play instead of the built-in forest
    #[arg(short, long)]
    story: Option<PathBuf>,

    /// Use the built-in scripted narrator instead of a model server
    #[arg(long)]
    offline: bool,

    /// Starting health
    #[arg(long, default_value_t = DEFAULT_START_HEALTH)]
    health: i32,

    /// Health lost for every resolved choice
    #[arg(long, default_value_t = DEFAULT_TURN_COST)]
    turn_cost: i32,

    /// Model name (overrides WW_LLM_MODEL)
    #[arg(long)]
    model: Option<String>,

    /// Model server base URL (overrides WW_LLM_BASE_URL)
    #[arg(long)]
    base_url: Option<String>,

    /// Log more (-v for info, -vv for debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn run(cli: Cli) -> Result<(), String> {
    let story = match &cli.story {
        Some(path) => Story::load(path).map_err(|e| format!("failed to load story: {e}"))?,
        None => Story::builtin(),
    };
    let config = EngineConfig::default()
        .with_start_health(cli.health)
        .with_turn_cost(cli.turn_cost);
    let narrator = build_narrator(&cli)?;

    let mut session = Session::new(TurnEngine::new(narrator, story, config));

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    play::run(&mut session, stdin.lock(), &mut stdout)
}

fn build_narrator(cli: &Cli) -> Result<Box<dyn Narrator>, String> {
    if cli.offline {
        return Ok(Box::new(ScriptedNarrator::new()));
    }

    let mut config = NarratorConfig::from_env().map_err(|e| e.to_string())?;
    if let Some(url) = &cli.base_url {
        config = config.with_base_url(url);
    }
    if let Some(model) = &cli.model {
        config = config.with_model(model.clone());
    }
    tracing::info!(base_url = %config.base_url, model = %config.model, "using chat narrator");

    let narrator = ChatNarrator::new(config).map_err(|e| e.to_string())?;
    Ok(Box::new(narrator))
}
