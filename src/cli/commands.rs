use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::debug;

use crate::ask::{AskClient, HttpAskClient};
use crate::catalog::{BuiltinCatalog, FileCatalog, GuideCatalogProvider};
use crate::config::{Config, parse_threshold};
use crate::history::persistence::HISTORY_FILENAME;
use crate::history::{HistoryStore, JsonFilePersistence};
use crate::logging;
use crate::models::GuideItem;
use crate::search::{ScoredGuide, SearchConfig, SearchEngine};
use crate::service::GuideService;
use crate::utils::{format_path_with_tilde, format_timestamp};

#[derive(Parser)]
#[command(name = "howto-guides")]
#[command(version = "0.1.0")]
#[command(about = "Browse and fuzzy-search how-to guides", long_about = None)]
pub struct Cli {
    /// Directory for the search history file (overrides HOWTO_DATA_DIR)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// JSON guide catalog to use instead of the builtin guides
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Minimum match score between 0 and 1
    #[arg(long, global = true, value_parser = threshold_arg)]
    pub threshold: Option<f64>,

    /// Base URL of the question-answering backend
    #[arg(long, global = true)]
    pub backend_url: Option<String>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the featured guides
    Featured,
    /// Search guides and remember the query
    Search {
        /// Free-text query
        #[arg(required = true)]
        query: Vec<String>,
        /// Show match scores
        #[arg(long)]
        scores: bool,
        /// Score whole titles and summaries only, not individual words
        #[arg(long)]
        exact_fields: bool,
        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show a guide by catalog position or title
    Show {
        #[arg(required = true)]
        guide: Vec<String>,
    },
    /// Show or edit search history
    History {
        #[command(subcommand)]
        action: Option<HistoryAction>,
    },
    /// Ask the backend a question
    Ask {
        #[arg(required = true)]
        question: Vec<String>,
    },
}

#[derive(Subcommand)]
pub enum HistoryAction {
    /// List past searches, newest first
    List,
    /// Delete entries by their 1-based positions
    Delete {
        #[arg(required = true)]
        positions: Vec<usize>,
    },
    /// Delete every entry
    Clear,
}

#[derive(Serialize)]
struct JsonResult<'a> {
    score: f64,
    #[serde(flatten)]
    guide: &'a GuideItem,
}

fn threshold_arg(raw: &str) -> Result<f64, String> {
    parse_threshold(raw).map_err(|e| e.to_string())
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let Some(command) = &cli.command else {
        println!("Use --help for usage information");
        return Ok(());
    };

    let config = resolve_config(&cli)?;
    debug!(?config, "resolved configuration");

    match command {
        Commands::Featured => show_featured(&config),
        Commands::Search { query, scores, exact_fields, json } => {
            let query = query.join(" ");
            run_search(&config, &query, *scores, *exact_fields, *json)
        }
        Commands::Show { guide } => show_guide(&config, &guide.join(" ")),
        Commands::History { action } => match action {
            None | Some(HistoryAction::List) => list_history(&config),
            Some(HistoryAction::Delete { positions }) => delete_history(&config, positions),
            Some(HistoryAction::Clear) => clear_history(&config),
        },
        Commands::Ask { question } => ask_question(&config, &question.join(" ")),
    }
}

/// Environment first, then command-line overrides
fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::from_env()?;
    if let Some(dir) = &cli.data_dir {
        config.data_dir = dir.clone();
    }
    if let Some(path) = &cli.catalog {
        config.catalog_path = Some(path.clone());
    }
    if let Some(threshold) = cli.threshold {
        config.threshold = threshold;
    }
    if let Some(url) = &cli.backend_url {
        config.backend_url = url.clone();
    }
    Ok(config)
}

fn open_catalog(config: &Config) -> Result<Arc<dyn GuideCatalogProvider>> {
    Ok(match &config.catalog_path {
        Some(path) => Arc::new(FileCatalog::open(path)?),
        None => Arc::new(BuiltinCatalog::new()),
    })
}

fn open_history(config: &Config) -> Arc<HistoryStore> {
    Arc::new(HistoryStore::new(Arc::new(JsonFilePersistence::in_dir(&config.data_dir))))
}

fn build_service(config: &Config, word_matching: bool) -> Result<GuideService> {
    let engine = SearchEngine::new(SearchConfig { threshold: config.threshold, word_matching });
    Ok(GuideService::new(open_catalog(config)?, engine, open_history(config)))
}

fn show_featured(config: &Config) -> Result<()> {
    let service = build_service(config, true)?;
    let featured = service.featured()?;

    println!("Featured Guides");
    println!("===============");
    for (idx, guide) in featured.iter().enumerate() {
        println!("{:>2}. {}", idx + 1, guide.title);
        println!("    {}", guide.summary);
    }

    Ok(())
}

fn run_search(
    config: &Config,
    query: &str,
    show_scores: bool,
    exact_fields: bool,
    json: bool,
) -> Result<()> {
    if query.trim().is_empty() {
        bail!("Search query cannot be empty");
    }

    let service = build_service(config, !exact_fields)?;
    let results = service.search(query)?;

    if json {
        let rows: Vec<JsonResult> =
            results.iter().map(|m| JsonResult { score: m.score, guide: &m.guide }).collect();
        println!("{}", serde_json::to_string_pretty(&rows).context("Failed to encode results")?);
        return Ok(());
    }

    if results.is_empty() {
        println!("No guides found for \"{}\"", query.trim());
        return Ok(());
    }

    println!("{} result(s) for \"{}\"", results.len(), query.trim());
    for (idx, ScoredGuide { guide, score }) in results.iter().enumerate() {
        if show_scores {
            println!("{:>2}. {} ({:.2})", idx + 1, guide.title, score);
        } else {
            println!("{:>2}. {}", idx + 1, guide.title);
        }
        println!("    {}", guide.summary);
    }

    Ok(())
}

fn show_guide(config: &Config, selector: &str) -> Result<()> {
    let service = build_service(config, true)?;
    let Some(guide) = service.find_guide(selector)? else {
        bail!("No guide matches \"{}\"", selector.trim());
    };

    println!("{}", guide.title);
    println!("{}", "=".repeat(guide.title.chars().count()));
    println!("{}", guide.summary);
    println!();
    for (idx, step) in guide.steps.iter().enumerate() {
        println!("{}. {}", idx + 1, step);
    }
    println!();
    println!("Learn more: {}", guide.link());

    Ok(())
}

fn list_history(config: &Config) -> Result<()> {
    let history = open_history(config);
    let entries = history.entries();

    if entries.is_empty() {
        println!("No search history");
        println!("Your search history will appear here");
        return Ok(());
    }

    println!("Search History");
    println!("==============");
    for (idx, entry) in entries.iter().enumerate() {
        println!("{:>2}. {:<40} {}", idx + 1, entry.query, format_timestamp(&entry.timestamp));
    }
    println!();
    println!(
        "History file: {}",
        format_path_with_tilde(&config.data_dir.join(HISTORY_FILENAME))
    );

    Ok(())
}

fn delete_history(config: &Config, positions: &[usize]) -> Result<()> {
    let history = open_history(config);
    // 1-based on the command line; 0 is out of range
    let zero_based: Vec<usize> = positions.iter().filter_map(|p| p.checked_sub(1)).collect();
    let removed = history.delete_items(&zero_based);
    println!("Deleted {} entr{}", removed, if removed == 1 { "y" } else { "ies" });
    Ok(())
}

fn clear_history(config: &Config) -> Result<()> {
    let history = open_history(config);
    history.clear_history();
    println!("Search history cleared");
    Ok(())
}

fn ask_question(config: &Config, question: &str) -> Result<()> {
    let client = HttpAskClient::new(config.backend_url.clone());
    let answer = client.ask(question)?;

    println!("{}", answer.answer);
    if let Some(url) = &answer.source_url {
        println!();
        println!("Source: {}", url);
    }

    Ok(())
}
