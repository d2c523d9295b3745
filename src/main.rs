use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

mod crawler;
mod deck;
mod error;
mod scrape;
mod utils;

use crawler::{crawl_deck, CrawlOptions, FailurePolicy, Site, DEFAULT_DOMAIN_ROOT};
use deck::DeckCatalog;
use error::{FetchError, Result};
use utils::http::ReqwestHttpClient;

/// Download card scans from a Piwigo gallery, one deck at a time
#[derive(Parser, Debug)]
#[command(version, about, long_about = None, args_conflicts_with_subcommands = true)]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    fetch: FetchArgs,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch every card image of a deck (default when no subcommand is given)
    Fetch(FetchArgs),
    /// List the decks in the catalog
    Decks {
        /// JSON deck catalog to use instead of the built-in one
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
}

#[derive(ClapArgs, Debug)]
struct FetchArgs {
    /// Deck to fetch
    #[arg(short, long, default_value_t = 1800)]
    deck: u32,

    /// Directory where card images are saved
    #[arg(short, long, default_value = ".")]
    path: PathBuf,

    /// JSON deck catalog to use instead of the built-in one
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Gallery domain root
    #[arg(long, default_value = DEFAULT_DOMAIN_ROOT)]
    site: String,

    /// Continue with the next card when one fails instead of aborting
    #[arg(long, default_value_t = false)]
    keep_going: bool,

    /// Do not re-download cards whose file already exists
    #[arg(long, default_value_t = false)]
    skip_existing: bool,

    /// Verify image integrity before saving
    #[arg(long, default_value_t = false)]
    verify: bool,

    /// Pause between cards, in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Disable the progress bar
    #[arg(long, default_value_t = false)]
    no_progress: bool,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,hyper=warn,reqwest=warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_catalog(path: Option<&Path>) -> Result<DeckCatalog> {
    match path {
        Some(path) => DeckCatalog::load(path),
        None => Ok(DeckCatalog::builtin()),
    }
}

fn list_decks(catalog: Option<&Path>) -> Result<()> {
    let catalog = load_catalog(catalog)?;
    for deck in catalog.decks() {
        println!(
            "{}\t{}\t{}..={} ({} cards)",
            deck.id,
            deck.gallery_path,
            deck.start,
            deck.end,
            deck.card_count()
        );
    }
    Ok(())
}

async fn run_fetch(args: FetchArgs) -> Result<()> {
    let catalog = load_catalog(args.catalog.as_deref())?;
    let site = Site::new(&args.site);
    let client = ReqwestHttpClient::new();

    println!("Deck: {}", args.deck);
    println!("Path: {}", args.path.display());
    println!("Site: {}", site.domain_root());

    let options = CrawlOptions {
        output_dir: args.path,
        policy: if args.keep_going {
            FailurePolicy::KeepGoing
        } else {
            FailurePolicy::FailFast
        },
        skip_existing: args.skip_existing,
        verify: args.verify,
        delay: args.delay_ms.map(Duration::from_millis),
        show_progress: !args.no_progress,
    };

    let report = crawl_deck(&client, &site, &catalog, args.deck, &options).await?;

    println!("\nDownloaded {} cards", report.saved.len());
    if report.skipped_existing > 0 {
        println!("Skipped {} cards (already existed)", report.skipped_existing);
    }

    if !report.is_success() {
        return Err(FetchError::Incomplete {
            deck: report.deck_id,
            failed: report.failures.len(),
            total: report.saved.len() + report.failures.len(),
        });
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();

    let result = match args.command.unwrap_or(Commands::Fetch(args.fetch)) {
        Commands::Fetch(fetch) => run_fetch(fetch).await,
        Commands::Decks { catalog } => list_decks(catalog.as_deref()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
