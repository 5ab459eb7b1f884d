//! Yggdrasil topic showcase
//!
//! Run with: cargo run -p showcase -- <command>
//!
//! Examples:
//!   cargo run -p showcase -- index
//!   cargo run -p showcase -- timeline apollo
//!   cargo run -p showcase -- --seed 7 play apollo
//!   cargo run -p showcase -- score apollo --order 103,101,102 --details

use clap::{Parser, Subcommand};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use timeline_game::{
    flatten, sample_topic_claims, scan_catalog, score_detailed, write_catalog, GameSession,
    GroundTruth, IndexError, ShowcaseConfig, ShowcaseError, TopicCollection,
};
use topic_events::{BucketId, EventId, Topic};

/// Topic timelines and the event ordering game
#[derive(Parser, Debug)]
#[command(name = "yggdrasil")]
#[command(about = "Browse topic timelines and play the event ordering game")]
struct Args {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Data directory, overrides the configuration
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Random seed for reproducible shuffles
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scan the data directory and write the catalog
    Index {
        /// Print the catalog instead of writing it
        #[arg(long)]
        dry_run: bool,
    },

    /// List every topic in the catalog
    List,

    /// Print a topic's events in bucket order
    Timeline {
        /// Topic id
        topic: String,
    },

    /// Play the ordering game interactively
    Play {
        /// Topic id
        topic: String,
    },

    /// Score an order of event ids against a topic
    Score {
        /// Topic id
        topic: String,

        /// Comma separated event ids, earliest first
        #[arg(long, value_delimiter = ',', required = true)]
        order: Vec<EventId>,

        /// List the inverted pairs
        #[arg(long)]
        details: bool,
    },

    /// Sample claims for a topic tooltip
    Claims {
        /// Topic id
        topic: String,

        /// Maximum number of claims, overrides the configuration
        #[arg(long)]
        cap: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "yggdrasil=info,timeline_game=info,topic_events=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), ShowcaseError> {
    let config = load_config(&args)?;
    tracing::debug!(?config, "Configuration resolved");

    match args.command {
        Command::Index { dry_run } => cmd_index(&config, dry_run),
        Command::List => cmd_list(&config).await,
        Command::Timeline { topic } => {
            let collection = TopicCollection::from_config(&config).await?;
            cmd_timeline(find_topic(&collection, &topic)?);
            Ok(())
        }
        Command::Play { topic } => {
            let collection = TopicCollection::from_config(&config).await?;
            cmd_play(find_topic(&collection, &topic)?, &config);
            Ok(())
        }
        Command::Score {
            topic,
            order,
            details,
        } => {
            let collection = TopicCollection::from_config(&config).await?;
            cmd_score(find_topic(&collection, &topic)?, &order, details);
            Ok(())
        }
        Command::Claims { topic, cap } => {
            let collection = TopicCollection::from_config(&config).await?;
            let cap = cap.unwrap_or(config.game.max_topic_claims);
            cmd_claims(find_topic(&collection, &topic)?, cap, &config);
            Ok(())
        }
    }
}

/// Reads the configuration file, if any, and applies command line overrides.
fn load_config(args: &Args) -> Result<ShowcaseConfig, ShowcaseError> {
    let mut config = match &args.config {
        Some(path) => ShowcaseConfig::from_file(path)?,
        None => ShowcaseConfig::default(),
    };
    if let Some(dir) = &args.data_dir {
        config.data.dir = dir.clone();
    }
    if args.seed.is_some() {
        config.game.seed = args.seed;
    }
    Ok(config)
}

fn make_rng(config: &ShowcaseConfig) -> SmallRng {
    match config.game.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    }
}

fn find_topic<'c>(collection: &'c TopicCollection, id: &str) -> Result<&'c Topic, ShowcaseError> {
    collection
        .get(id)
        .ok_or_else(|| ShowcaseError::UnknownTopic(id.to_string()))
}

fn cmd_index(config: &ShowcaseConfig, dry_run: bool) -> Result<(), ShowcaseError> {
    let catalog = scan_catalog(
        &config.data.dir,
        &config.data.topic_file,
        &config.data.cover_file,
    )?;

    if dry_run {
        let json = catalog.to_json_pretty().map_err(IndexError::from)?;
        println!("{}", json);
        return Ok(());
    }

    let path = config.index_path();
    write_catalog(&path, &catalog)?;
    println!(
        "Indexed {} topics ({} with game, {} with cover) into {}",
        catalog.total,
        catalog.with_game,
        catalog.with_cover,
        path.display()
    );
    Ok(())
}

async fn cmd_list(config: &ShowcaseConfig) -> Result<(), ShowcaseError> {
    let collection = TopicCollection::from_config(config).await?;

    if collection.is_empty() {
        println!("No topics loaded from {}", config.index_path().display());
    }
    for loaded in collection.iter() {
        let topic = &loaded.topic;
        println!(
            "{:<24} {:>4} events  {:>3} buckets  {}{}",
            topic.id(),
            topic.display_count(),
            topic.bucket_count(),
            topic.name(),
            if topic.has_game() { "  [game]" } else { "" }
        );
    }
    for failure in collection.failures() {
        println!("{:<24} skipped: {}", failure.entry.id, failure.error);
    }
    Ok(())
}

fn cmd_timeline(topic: &Topic) {
    println!("{}", topic.name());

    let mut current: Option<&BucketId> = None;
    for entry in flatten(topic) {
        if current != Some(entry.bucket_id) {
            println!();
            println!("  Bucket {}", entry.bucket_id);
            current = Some(entry.bucket_id);
        }
        println!("    {:>10}  {}", entry.event.date, entry.event.title);
        if let Some(summary) = &entry.event.summary {
            println!("                {}", summary);
        }
    }
}

fn cmd_score(topic: &Topic, order: &[EventId], details: bool) {
    let truth = GroundTruth::build(topic);

    let unknown: Vec<String> = order
        .iter()
        .filter(|id| !truth.contains(**id))
        .map(|id| id.to_string())
        .collect();
    if !unknown.is_empty() {
        tracing::warn!("Ignoring ids outside the topic: {}", unknown.join(", "));
    }

    let report = score_detailed(order, &truth);
    println!("{}", report.score);

    if details {
        for (before, after) in &report.inversions {
            println!(
                "  {} placed before {}",
                event_label(topic, *before),
                event_label(topic, *after)
            );
        }
    }
}

fn cmd_claims(topic: &Topic, cap: usize, config: &ShowcaseConfig) {
    let mut rng = make_rng(config);
    let claims = sample_topic_claims(topic, cap, &mut rng);

    if claims.is_empty() {
        println!("{} has no claims", topic.name());
    }
    for claim in claims {
        println!("- {}", claim);
    }
}

fn cmd_play(topic: &Topic, config: &ShowcaseConfig) {
    let mut session = GameSession::start(topic, make_rng(config));

    println!("Ordering game: {}", topic.name());
    println!("Commands: m <from> <to> | c(heck) | r(eshuffle) | s(how) | q(uit)");
    print_order(&session);

    let stdin = io::stdin();
    prompt();
    for line in stdin.lock().lines() {
        let Ok(line) = line else {
            break;
        };
        let words: Vec<&str> = line.split_whitespace().collect();

        match words.as_slice() {
            ["q" | "quit"] => break,
            ["c" | "check"] => {
                let score = session.check();
                println!("{}", score);
            }
            ["r" | "reshuffle"] => {
                session.reshuffle();
                print_order(&session);
            }
            ["s" | "show"] => print_order(&session),
            ["m" | "move", from, to] => match (from.parse::<usize>(), to.parse::<usize>()) {
                (Ok(from), Ok(to)) if from > 0 && to > 0 => {
                    match session.move_event(from - 1, to - 1) {
                        Ok(()) => print_order(&session),
                        Err(e) => println!("{}", e),
                    }
                }
                _ => println!("Positions start at 1"),
            },
            [] => {}
            _ => println!("Unknown command: {}", line.trim()),
        }
        prompt();
    }

    let summary = session.finish();
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{}", json),
        Err(e) => tracing::warn!("Could not serialize session summary: {}", e),
    }
}

fn print_order(session: &GameSession<'_>) {
    for (position, event) in session.presented_events().iter().enumerate() {
        println!("  {:>2}. {}", position + 1, event.title);
    }
}

fn prompt() {
    print!("> ");
    let _ = io::stdout().flush();
}

fn event_label(topic: &Topic, id: EventId) -> String {
    match topic.event(id) {
        Some(event) => format!("{} ({})", event.title, id),
        None => id.to_string(),
    }
}
