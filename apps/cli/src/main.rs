mod config;
mod errors;
mod generator;
mod judges;
mod llm_client;
mod report;
mod tournament;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::generator::topics::process_user_input;
use crate::judges::rubric::Rubric;
use crate::llm_client::LlmClient;
use crate::report::ReportWriter;

/// AI-powered joke generation and judging pipeline.
#[derive(Debug, Parser)]
#[command(name = "jokespace", version, about)]
struct Cli {
    /// Comma-separated topics (defaults to a random topic)
    #[arg(long)]
    topic: Option<String>,

    /// Skip higher-order group generation
    #[arg(long)]
    first_order_only: bool,

    /// Skip the judging phase (rating + tournament)
    #[arg(long)]
    generation_only: bool,

    /// Output directory for run reports
    #[arg(long, default_value = "output")]
    output_dir: PathBuf,

    /// Concurrent batch size for the rating phase
    #[arg(long, default_value_t = 5)]
    batch_size: usize,

    /// Retry attempts for transient LLM failures
    #[arg(long, default_value_t = llm_client::DEFAULT_RETRIES)]
    retries: u32,

    /// How many top-rated jokes enter the tournament
    #[arg(long, default_value_t = 20)]
    top_count: usize,

    /// Optional JSON rubric file overriding the built-in one
    #[arg(long)]
    rubric: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.batch_size == 0 {
        anyhow::bail!("--batch-size must be positive");
    }
    if cli.top_count == 0 {
        anyhow::bail!("--top-count must be positive");
    }

    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting jokespace v{}", env!("CARGO_PKG_VERSION"));

    let rubric = Arc::new(match &cli.rubric {
        Some(path) => Rubric::from_file(path)?,
        None => Rubric::default(),
    });

    let llm = LlmClient::new(config.anthropic_api_key.clone(), cli.retries);
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let reports = ReportWriter::create(&cli.output_dir)?;

    // Phase 1: generation.
    let topics = process_user_input(cli.topic.as_deref());
    let artifacts = generator::run_generation(&llm, topics, cli.first_order_only).await?;
    reports.write_generation(&artifacts)?;
    println!(
        "Generated {} jokes for topic(s): {}",
        artifacts.jokes.len(),
        artifacts.topics.join(", ")
    );

    if cli.generation_only {
        println!("Reports in {}", reports.dir().display());
        return Ok(());
    }

    // Phase 2: rating + tournament.
    let outcome = judges::evaluate_jokes(
        &llm,
        rubric,
        &artifacts.jokes,
        cli.batch_size,
        cli.top_count,
    )
    .await?;
    reports.write_ratings(&outcome.ratings)?;
    reports.write_top_candidates(&outcome.top_candidates)?;
    reports.write_tournament(&outcome.tournament)?;

    let winner = &outcome.tournament.winner;
    println!("\nTournament winner: joke {} (seed {})", winner.id, winner.seed_rank);
    println!("  {}", winner.text);
    println!(
        "Rounds: {}, participants: {}",
        outcome.tournament.total_rounds, outcome.tournament.participant_count
    );
    println!("Reports in {}", reports.dir().display());

    Ok(())
}
