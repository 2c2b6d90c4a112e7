//! CLI entrypoint for botlines
//!
//! This is the main binary that wires together all layers using dependency
//! injection, then runs a minimal interactive game loop on stdin. Page-level
//! presentation is deliberately thin; the engine does the real work.

use anyhow::{Context, Result};
use botlines_application::{
    AdvanceView, GameEngine, GameSummary, QuoteView, RevealView, StartOutcome,
};
use botlines_application::ports::quote_source::QuoteSource;
use botlines_domain::{AgeGroup, Origin, Personalization, Topic};
use botlines_infrastructure::{BuiltinQuoteSource, ConfigLoader, FileConfig};
use clap::Parser;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "botlines", about = "AI or Human? Guess who wrote the quote.")]
struct Cli {
    /// Path to a config file (overrides discovered configs)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Skip config file discovery and use built-in defaults
    #[arg(long)]
    no_config: bool,

    /// Quote provider: "builtin" or "bedrock"
    #[arg(long)]
    provider: Option<String>,

    /// Fetch mode: "batch" or "single"
    #[arg(long)]
    mode: Option<String>,

    /// Rounds per game (0 = play until the pool runs out)
    #[arg(long)]
    rounds: Option<u32>,

    /// Quote topic: technology, philosophy, humor, motivation, science
    #[arg(long)]
    topic: Option<Topic>,

    /// Audience: kids, teens, young-adults, adults, seniors
    #[arg(long)]
    age_group: Option<AgeGroup>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    info!("Starting botlines");

    // Load configuration, then apply flag overrides
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).context("failed to load configuration")?
    };
    if let Some(mode) = &cli.mode {
        config.game.mode = mode.clone();
    }
    if let Some(rounds) = cli.rounds {
        config.game.round_cap = if rounds == 0 { None } else { Some(rounds) };
    }
    if let Some(provider) = &cli.provider {
        config.source.provider = provider.clone();
    }

    let params = config.game.to_game_params()?;
    let mut personalization = config.personalization.to_personalization()?;
    if let Some(topic) = cli.topic {
        personalization.topic = topic;
    }
    if let Some(age_group) = cli.age_group {
        personalization.age_group = age_group;
    }

    // === Dependency Injection ===
    let source = build_source(&config).await?;
    let mut engine = GameEngine::new(source, params);

    println!();
    println!("+==========================================+");
    println!("|  botlines - AI or Human?                 |");
    println!("+==========================================+");
    println!();
    println!(
        "Topic: {}   Audience: {}",
        personalization.topic, personalization.age_group
    );
    println!();

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        match engine.start(personalization).await {
            StartOutcome::Started(view) => {
                print_quote(&view);
            }
            StartOutcome::Unavailable(message) => {
                println!("{message}");
                if !ask_yes_no(&mut lines, "Try again? [y/N] ")? {
                    return Ok(());
                }
                continue;
            }
            StartOutcome::Ignored => unreachable!("engine is idle between runs"),
        }

        // One run: guess, reveal, advance until finished
        let summary = loop {
            let Some(choice) = read_guess(&mut lines)? else {
                println!("Bye!");
                return Ok(());
            };
            if let Some(reveal) = engine.submit_guess(choice) {
                print_reveal(&reveal);
            }
            prompt(&mut lines, "Press Enter for the next one... ")?;
            match engine.advance().await {
                Some(AdvanceView::Next(view)) => print_quote(&view),
                Some(AdvanceView::Finished(summary)) => break summary,
                None => unreachable!("advance follows a scored guess"),
            }
        };

        print_summary(&summary);
        if !ask_yes_no(&mut lines, "Play again? [y/N] ")? {
            return Ok(());
        }
        engine.restart();
        println!();
    }
}

/// Pick the quote source adapter from configuration.
async fn build_source(config: &FileConfig) -> Result<Arc<dyn QuoteSource>> {
    match config.source.provider.as_str() {
        "builtin" => Ok(Arc::new(BuiltinQuoteSource::new())),
        "bedrock" => {
            #[cfg(feature = "bedrock")]
            {
                use botlines_infrastructure::{BedrockQuoteSource, BedrockSourceConfig};
                let bedrock_config = BedrockSourceConfig {
                    region: config.source.bedrock.region.clone(),
                    profile: config.source.bedrock.profile.clone(),
                    model_id: config.source.bedrock.model_id.clone(),
                    max_tokens: config.source.bedrock.max_tokens,
                };
                match BedrockQuoteSource::try_new(&bedrock_config).await {
                    Some(source) => Ok(Arc::new(source)),
                    None => {
                        println!("(Bedrock unavailable; using the built-in quote table)");
                        Ok(Arc::new(BuiltinQuoteSource::new()))
                    }
                }
            }
            #[cfg(not(feature = "bedrock"))]
            {
                println!("(built without Bedrock support; using the built-in quote table)");
                Ok(Arc::new(BuiltinQuoteSource::new()))
            }
        }
        other => anyhow::bail!("unknown quote provider: {other}"),
    }
}

fn print_quote(view: &QuoteView) {
    println!();
    println!("--- Quote #{} ---", view.round);
    println!("\"{}\"", view.text);
    println!();
}

fn print_reveal(reveal: &RevealView) {
    let mark = if reveal.correct { "Correct!" } else { "Nope." };
    match (&reveal.origin, &reveal.author) {
        (Origin::Human, Some(author)) => {
            println!("{mark} That one was written by a Human: {author}.")
        }
        (Origin::Human, None) => println!("{mark} That one was written by a Human."),
        (Origin::Ai, _) => println!("{mark} That one was machine-made."),
    }
    println!("Score: {}/{}", reveal.score, reveal.total);
}

fn print_summary(summary: &GameSummary) {
    println!();
    println!("=== Game over: {}/{} ===", summary.score, summary.total);
    println!("{}", summary.verdict());
    println!();
}

/// Read the player's guess; `None` means EOF / quit.
fn read_guess(
    lines: &mut std::io::Lines<std::io::StdinLock<'_>>,
) -> Result<Option<Origin>> {
    loop {
        let Some(answer) = prompt(lines, "[a]I or [h]uman? (q to quit) ")? else {
            return Ok(None);
        };
        let answer = answer.trim();
        if answer.eq_ignore_ascii_case("q") || answer.eq_ignore_ascii_case("quit") {
            return Ok(None);
        }
        match answer.parse::<Origin>() {
            Ok(choice) => return Ok(Some(choice)),
            Err(_) => println!("Please answer 'a' for AI or 'h' for Human."),
        }
    }
}

fn ask_yes_no(
    lines: &mut std::io::Lines<std::io::StdinLock<'_>>,
    label: &str,
) -> Result<bool> {
    let Some(answer) = prompt(lines, label)? else {
        return Ok(false);
    };
    Ok(matches!(answer.trim(), "y" | "Y" | "yes" | "Yes"))
}

/// Print a prompt and read one line; `None` on EOF.
fn prompt(
    lines: &mut std::io::Lines<std::io::StdinLock<'_>>,
    label: &str,
) -> Result<Option<String>> {
    print!("{label}");
    std::io::stdout().flush()?;
    match lines.next() {
        Some(line) => Ok(Some(line?)),
        None => Ok(None),
    }
}
