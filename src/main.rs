// Moodwall - mood journal with emotion classification and comfort replies
// Main entry point

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use moodwall::cli::{format, ChatRepl, InputHandler};
use moodwall::comfort::ComfortBank;
use moodwall::config::{load_config, moodwall_dir, Config};
use moodwall::conversation::ConversationSession;
use moodwall::crisis::{CrisisDetector, SafetyMonitor};
use moodwall::emotion::{self, EmotionCategory};
use moodwall::errors::{missing_api_key_notice, storage_error, UserFriendlyError, TERMS_FILE_SUGGESTION};
use moodwall::journal::{emotion_counts, EntryStore, FileStore, Journal};
use moodwall::responder::ResponseGenerator;
use moodwall::server::AppServer;
use tracing_subscriber::prelude::*;

#[derive(Parser, Debug)]
#[command(name = "moodwall")]
#[command(about = "Mood journal with emotion classification and comfort replies", version)]
struct Args {
    /// Config file (default: ~/.moodwall/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser, Debug)]
enum Command {
    /// Run the local HTTP server
    Serve {
        /// Bind address (default from config: 127.0.0.1:8787)
        #[arg(long)]
        bind: Option<String>,
    },
    /// Classify text without recording it
    Classify {
        text: String,
    },
    /// Record a journal entry and print the reply
    Record {
        text: String,
        /// Emotion to use when no keyword matches
        #[arg(long, short, default_value = "calm")]
        emotion: EmotionCategory,
    },
    /// List entries, newest first
    List {
        #[arg(long, short)]
        emotion: Option<EmotionCategory>,
    },
    /// Delete one entry by id
    Delete {
        id: String,
    },
    /// Delete every entry
    Clear {
        /// Confirm deletion
        #[arg(long)]
        yes: bool,
    },
    /// Show summary and daily trend
    Stats {
        #[arg(long, default_value_t = 7)]
        days: u32,
    },
    /// Print a comfort message for an emotion
    Comfort {
        emotion: EmotionCategory,
    },
    /// Talk with the healing assistant
    Chat {
        #[arg(long, short)]
        emotion: Option<EmotionCategory>,
        /// What you wrote before opening the chat
        #[arg(long)]
        context: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // the server also keeps a log file
    match args.command {
        Command::Serve { .. } => init_server_tracing()?,
        _ => init_tracing(),
    }

    let config = load_config(args.config.as_deref())?;
    run_command(&config, args.command).await
}

async fn run_command(config: &Config, command: Command) -> Result<()> {
    match command {
        Command::Serve { bind } => run_serve(config.clone(), bind).await,
        Command::Classify { text } => run_classify(&text),
        Command::Record { text, emotion } => run_record(config, &text, emotion).await,
        Command::List { emotion } => run_list(config, emotion),
        Command::Delete { id } => run_delete(config, &id),
        Command::Clear { yes } => run_clear(config, yes),
        Command::Stats { days } => run_stats(config, days),
        Command::Comfort { emotion } => run_comfort(emotion),
        Command::Chat { emotion, context } => run_chat(config, emotion, context).await,
    }
}

fn env_filter() -> tracing_subscriber::EnvFilter {
    let show_debug = std::env::var("MOODWALL_DEBUG")
        .map(|v| v == "1" || v.to_lowercase() == "true")
        .unwrap_or(false);
    let default_level = if show_debug { "debug" } else { "info" };

    // RUST_LOG wins over MOODWALL_DEBUG
    tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level))
}

/// Initialize tracing to stderr for one-shot commands
fn init_tracing() {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Bridge log crate → tracing (for dependencies using log crate)
    tracing_log::LogTracer::init().ok();
}

/// Initialize tracing to stderr and ~/.moodwall/server.log
fn init_server_tracing() -> Result<()> {
    let log_dir = moodwall_dir();
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create directory: {}", log_dir.display()))?;

    let log_path = log_dir.join("server.log");
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open server log: {}", log_path.display()))?;

    let file_writer = Arc::new(log_file);
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(move || file_writer.clone())
        .with_ansi(false); // No ANSI colors in log file

    tracing_subscriber::registry()
        .with(env_filter())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .init();

    tracing_log::LogTracer::init().ok();

    eprintln!("Server logs: {}", log_path.display());
    Ok(())
}

async fn run_serve(mut config: Config, bind: Option<String>) -> Result<()> {
    if let Some(bind) = bind {
        config.server.bind_address = bind;
    }

    if config.api.credential().is_none() {
        tracing::warn!("No API key configured, replies will come from the comfort bank");
    }

    let server = AppServer::from_config(&config)?;
    tracing::info!(
        data_dir = %config.storage.data_dir.display(),
        bind = %server.config().bind_address,
        max_sessions = server.config().max_sessions,
        "Server state initialized"
    );

    server.serve().await
}

fn run_classify(text: &str) -> Result<()> {
    print!("{}", format::classification(&emotion::score(text)));
    Ok(())
}

fn open_journal(config: &Config) -> Result<Journal> {
    let generator = ResponseGenerator::from_config(&config.api)?;
    let store = EntryStore::new(Arc::new(FileStore::new(&config.storage.data_dir)));
    Ok(Journal::new(store, Arc::new(generator)))
}

async fn run_record(config: &Config, text: &str, chosen: EmotionCategory) -> Result<()> {
    let journal = open_journal(config)?;
    if !journal.generator().has_provider() {
        eprintln!("{}\n", missing_api_key_notice());
    }

    let submission = journal.submit(text, chosen).await?;
    print!("{}", format::entry(&submission.entry));

    if !submission.persisted {
        eprintln!(
            "\n{}",
            storage_error(&config.storage.data_dir.display().to_string(), "save")
        );
    }

    Ok(())
}

fn run_list(config: &Config, filter: Option<EmotionCategory>) -> Result<()> {
    let journal = open_journal(config)?;
    print!("{}", format::entries(&journal.entries(filter)));
    Ok(())
}

fn run_delete(config: &Config, id: &str) -> Result<()> {
    let journal = open_journal(config)?;
    journal.delete(id)?;
    println!("Deleted {}", id);
    Ok(())
}

fn run_clear(config: &Config, yes: bool) -> Result<()> {
    if !yes {
        anyhow::bail!("Refusing to delete every entry without --yes");
    }

    let journal = open_journal(config)?;
    journal.clear();
    println!("Journal cleared");
    Ok(())
}

fn run_stats(config: &Config, days: u32) -> Result<()> {
    let journal = open_journal(config)?;
    let entries = journal.entries(None);

    print!("{}", format::summary(&journal.summary()));
    println!();

    for (category, count) in emotion_counts(&entries) {
        println!("  {}  {}", category.label(), count);
    }
    println!();

    print!("{}", format::trend(&journal.trend(days)));
    Ok(())
}

fn run_comfort(emotion: EmotionCategory) -> Result<()> {
    let bank = ComfortBank::from_entropy()?;
    println!("{}", bank.pick_comfort_message(emotion));
    Ok(())
}

async fn run_chat(config: &Config, emotion: Option<EmotionCategory>, context: Option<String>) -> Result<()> {
    let generator = Arc::new(ResponseGenerator::from_config(&config.api)?);
    if !generator.has_provider() {
        eprintln!("{}\n", missing_api_key_notice());
    }

    let detector = CrisisDetector::from_config(&config.safety)
        .user_context_with_suggestion("Could not load crisis terms", TERMS_FILE_SUGGESTION)?;
    let monitor = SafetyMonitor::new(detector, Duration::from_millis(config.safety.delay_ms));

    let session = Arc::new(ConversationSession::new(generator, monitor));
    session.open(emotion, context.as_deref());

    let input = InputHandler::new().user_context("Chat needs an interactive terminal")?;
    ChatRepl::new(session, input).run().await
}
