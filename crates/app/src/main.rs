use std::io::{self, BufWriter};

use anyhow::Context;
use clap::Parser;
use mathema_core::model::GameConfiguration;
use services::{Clock, GameSession, QuestionGenerator};
use tracing_subscriber::EnvFilter;
use ui::{GameVm, SilentMusic};

mod report;
mod terminal;

use terminal::{Rounds, Terminal};

#[derive(Debug, Parser)]
#[command(
    name = "mathema-kids",
    version,
    about = "Multiplication tables practice in the terminal"
)]
struct Cli {
    /// Questions per game: 5, 10, 15 or 20
    #[arg(long, env = "MATHEMA_QUESTIONS", default_value_t = 5)]
    questions: u32,

    /// Highest multiplication table to ask from (2-12)
    #[arg(long, env = "MATHEMA_MAX_FACTOR", default_value_t = 5)]
    max_factor: u32,

    /// Seed for reproducible questions
    #[arg(long, env = "MATHEMA_SEED")]
    seed: Option<u64>,

    /// Play this many games, then exit without asking
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    rounds: Option<u32>,

    /// Print a JSON report after each finished game
    #[arg(long)]
    json: bool,
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,services=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let configuration = GameConfiguration::new(cli.questions, cli.max_factor)
        .context("invalid game settings")?;
    let generator = cli
        .seed
        .map_or_else(QuestionGenerator::new, QuestionGenerator::seeded);

    // Composition root: the music collaborator lives here, not in the session.
    let session = GameSession::new(configuration)
        .with_generator(generator)
        .with_clock(Clock::default());
    let vm = GameVm::new(session, Box::new(SilentMusic));

    let rounds = cli.rounds.map_or(Rounds::Ask, Rounds::Fixed);
    let stdin = io::stdin().lock();
    let stdout = BufWriter::new(io::stdout().lock());
    Terminal::new(vm, stdin, stdout)
        .with_json(cli.json)
        .run(rounds)
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(2);
    }
}
