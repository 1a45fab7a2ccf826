use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::history::RestorePolicy;
use crate::models::VersionEntry;
use crate::service::{AlwaysConfirm, ConfirmRestore, HistoryService, RestoreOutcome};
use crate::store::{ConversationStore, JsonFileStore};
use crate::utils::{format_timestamp, preview, sanitize};

const PREVIEW_CHARS: usize = 60;

#[derive(Parser)]
#[command(name = "message-history")]
#[command(version = "0.1.0")]
#[command(about = "Browse, compare and restore the edit history of chat messages", long_about = None)]
pub struct Cli {
    /// Conversation store file (overrides MESSAGE_HISTORY_STORE)
    #[arg(long, global = true, value_name = "PATH")]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the versions of a message, newest first
    History { conversation: String, message: String },
    /// Compare the current version with an earlier one
    Compare {
        conversation: String,
        message: String,
        /// Position in the earlier versions (0 = most recent); clamped to the oldest
        #[arg(long, short, default_value_t = 0)]
        index: usize,
    },
    /// Restore a message to an earlier version
    Restore {
        conversation: String,
        message: String,
        /// Version index as listed by `history` (1 = most recent earlier version)
        index: usize,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
        /// Do not keep the overwritten content in the history
        #[arg(long)]
        discard_current: bool,
    },
    /// Show statistics about the store
    Stats,
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("Use --help for usage information");
        return Ok(());
    };

    let config = Config::resolve(cli.store)?;
    let store = JsonFileStore::open(&config.store_path)
        .await
        .with_context(|| format!("Failed to open store {}", config.store_path.display()))?;
    let service = HistoryService::new(store).with_policy(config.restore_policy);

    match command {
        Commands::History { conversation, message } => {
            show_history(&service, &conversation, &message).await
        }
        Commands::Compare { conversation, message, index } => {
            show_comparison(&service, &conversation, &message, index).await
        }
        Commands::Restore { conversation, message, index, yes, discard_current } => {
            let service = if discard_current {
                service.with_policy(RestorePolicy::Overwrite)
            } else {
                service
            };
            let confirm: &dyn ConfirmRestore = if yes { &AlwaysConfirm } else { &StdinConfirm };
            restore_version(&service, &conversation, &message, index, confirm).await
        }
        Commands::Stats => show_stats(&service).await,
    }
}

async fn show_history<S: ConversationStore>(
    service: &HistoryService<S>,
    conversation: &str,
    message: &str,
) -> Result<()> {
    let versions = service
        .versions(conversation, message)
        .await
        .with_context(|| format!("Failed to load history of message {}", message))?;

    println!(
        "Message {} in conversation {} ({} version{})",
        sanitize(message),
        sanitize(conversation),
        versions.len(),
        if versions.len() == 1 { "" } else { "s" }
    );
    for entry in &versions {
        println!(
            "{:>4}  v{:<3} {:<12} {}{}",
            entry.version,
            entry.display_number(versions.len()),
            format_timestamp(&entry.edited_at),
            preview(&entry.content, PREVIEW_CHARS),
            if entry.is_current() { "  (current)" } else { "" }
        );
    }
    if versions.len() == 1 {
        println!("No earlier versions.");
    }

    Ok(())
}

async fn show_comparison<S: ConversationStore>(
    service: &HistoryService<S>,
    conversation: &str,
    message: &str,
    index: usize,
) -> Result<()> {
    let versions = service.versions(conversation, message).await?;
    let comparison = service
        .compare(conversation, message, index)
        .await
        .with_context(|| format!("Failed to compare versions of message {}", message))?;

    let len = versions.len();
    println!(
        "Current (v{}, {}):",
        comparison.current.display_number(len),
        format_timestamp(&comparison.current.edited_at)
    );
    println!("{}", sanitize(&comparison.current.content));
    println!();
    println!(
        "Version {} (index {}, {}):",
        comparison.selected.display_number(len),
        comparison.selected.version,
        format_timestamp(&comparison.selected.edited_at)
    );
    println!("{}", sanitize(&comparison.selected.content));
    println!();

    if comparison.identical {
        println!("Contents are identical");
    } else {
        println!(
            "Difference: {:+} characters, {:+} lines",
            comparison.char_delta, comparison.line_delta
        );
    }

    Ok(())
}

async fn restore_version<S: ConversationStore>(
    service: &HistoryService<S>,
    conversation: &str,
    message: &str,
    index: usize,
    confirm: &dyn ConfirmRestore,
) -> Result<()> {
    let outcome = service
        .restore(conversation, message, index, confirm)
        .await
        .with_context(|| format!("Failed to restore message {} to index {}", message, index))?;

    match outcome {
        RestoreOutcome::Restored(restored) => {
            println!("Restored message {} to version index {}", sanitize(message), index);
            println!("{}", sanitize(&restored.content));
        }
        RestoreOutcome::Cancelled => println!("Restore cancelled"),
    }

    Ok(())
}

async fn show_stats<S: ConversationStore>(service: &HistoryService<S>) -> Result<()> {
    let conversations = service.store().list().await?;
    let messages = conversations.iter().flat_map(|c| &c.messages);

    let message_count = messages.clone().count();
    let edited = messages.clone().filter(|m| m.is_edited || m.has_history()).count();
    let records: usize = messages.map(|m| m.history().len()).sum();

    println!("Message History Statistics");
    println!("==========================");
    println!("Conversations: {}", conversations.len());
    println!("Messages: {}", message_count);
    println!("  Edited messages: {}", edited);
    println!("  Stored earlier versions: {}", records);
    println!("Restore policy: {}", service.policy());

    Ok(())
}

/// Asks on stderr and reads the answer from stdin
struct StdinConfirm;

impl ConfirmRestore for StdinConfirm {
    fn confirm(&self, target: &VersionEntry, display_number: usize) -> bool {
        eprintln!("Restore version {}?", display_number);
        eprintln!("  {}", preview(&target.content, PREVIEW_CHARS));
        eprint!("The current content will be replaced. Continue? [y/N] ");
        if io::stderr().flush().is_err() {
            return false;
        }

        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            Err(_) => false,
        }
    }
}
