//! Lingo CLI
//!
//! Pick and persist the UI language from a terminal.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lingo_i18n::normalize_locale;
use lingo_sheet::{LanguageDialog, SaveOutcome, SelectionController};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod store;
mod terminal;

use config::LingoConfig;
use store::TomlPreferenceStore;
use terminal::TerminalHost;

#[derive(Parser)]
#[command(name = "lingo")]
#[command(author, version, about = "Pick and persist the UI language", long_about = None)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, global = true, default_value = "lingo.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available languages
    List,

    /// Choose a language interactively
    Pick,

    /// Print the saved language
    Current,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("lingo_cli=info,lingo_sheet=info,lingo_i18n=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init { force } => cmd_init(&cli.config, force),
        Commands::List => cmd_list(&LingoConfig::load(&cli.config)?).await,
        Commands::Pick => cmd_pick(&LingoConfig::load(&cli.config)?).await,
        Commands::Current => cmd_current(&LingoConfig::load(&cli.config)?).await,
    }
}

fn cmd_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Pass --force to overwrite it.",
            path.display()
        );
    }
    let content = LingoConfig::default().to_toml()?;
    std::fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    info!("Wrote {}", path.display());
    Ok(())
}

async fn current_language(config: &LingoConfig) -> Result<String> {
    let store = TomlPreferenceStore::new(config.preferences_path());
    let saved = store
        .load_language()
        .await
        .context("Failed to read saved language")?;
    Ok(saved.unwrap_or_else(|| normalize_locale(&config.preferences.default_language)))
}

async fn cmd_current(config: &LingoConfig) -> Result<()> {
    println!("{}", current_language(config).await?);
    Ok(())
}

async fn cmd_list(config: &LingoConfig) -> Result<()> {
    let catalog = config.load_catalog()?;
    let current = current_language(config).await?;

    let mut list = SelectionController::new();
    for item in list.initialize(catalog.sorted_entries(), &current) {
        let mark = if item.is_active() { "*" } else { " " };
        println!(
            "{mark} {:<8} {:<24} {}",
            item.code, item.native_name, item.english_name
        );
    }
    if list.active_item().is_none() {
        warn!(language = %current, "saved language is not in the catalog");
    }
    Ok(())
}

async fn cmd_pick(config: &LingoConfig) -> Result<()> {
    let catalog = config.load_catalog()?;
    let current = current_language(config).await?;
    let strings = config.load_strings(&current)?;

    let host = Arc::new(TerminalHost::new());
    let store = Arc::new(TomlPreferenceStore::new(config.preferences_path()));
    let dialog = LanguageDialog::new(host.clone(), store.clone(), strings);

    dialog.open(&catalog, &current);
    println!("\nEnter a number to select, s to save, c to cancel, x to close.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while dialog.is_open() {
        let Some(line) = lines.next_line().await.context("Failed to read stdin")? else {
            // EOF behaves like closing the sheet.
            host.dismiss();
            break;
        };

        match line.trim() {
            "" => {}
            "s" | "save" => match dialog.save().await? {
                SaveOutcome::Saved(code) => {
                    println!("Language set to {code} ({})", store.path().display());
                    if host.reload_requested() {
                        info!("restart the application to apply the new language");
                    }
                }
                SaveOutcome::Unchanged(code) => println!("Language unchanged ({code})."),
            },
            "c" | "q" | "cancel" => {
                dialog.cancel();
                println!("Cancelled.");
            }
            "x" => host.dismiss(),
            other => match other.parse::<usize>() {
                Ok(n) if host.click_row(n) => {}
                _ => eprintln!("Unknown choice `{other}`"),
            },
        }
    }
    Ok(())
}
