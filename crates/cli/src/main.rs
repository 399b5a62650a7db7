//! Pocket Shop CLI - Terminal storefront.
//!
//! # Usage
//!
//! ```bash
//! # Interactive storefront: search, add to cart, place order
//! pocket-shop browse
//!
//! # Print the catalog once, optionally filtered
//! pocket-shop list --query phone
//!
//! # Use another catalog endpoint
//! pocket-shop --catalog-url http://127.0.0.1:8080/products browse
//! ```
//!
//! # Commands
//!
//! - `browse` - Interactive screen reading commands from stdin
//! - `list` - Fetch and print the catalog

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use pocket_shop_storefront::config::{StorefrontConfig, parse_catalog_url};
use pocket_shop_storefront::error::AppError;
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod terminal;

#[derive(Parser)]
#[command(name = "pocket-shop")]
#[command(author, version, about = "Pocket Shop terminal storefront")]
struct Cli {
    /// Catalog endpoint (overrides `POCKET_SHOP_CATALOG_URL`)
    #[arg(long, global = true, value_parser = parse_catalog_url)]
    catalog_url: Option<url::Url>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the catalog interactively
    Browse,
    /// Fetch the catalog and print it
    List {
        /// Only show products whose title or description contains this text
        #[arg(short, long)]
        query: Option<String>,
    },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let mut config = match StorefrontConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            terminal::error(&format!("Failed to load configuration: {e}"));
            std::process::exit(2);
        }
    };
    if let Some(url) = cli.catalog_url.clone() {
        config.catalog.url = url;
    }

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = init_sentry(&config);

    // Logs go to stderr so they never interleave with the screen on stdout
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "pocket_shop_storefront=warn,pocket_shop=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    if let Err(e) = run(cli, config).await {
        e.capture();
        terminal::error(&format!("Command failed: {e}"));
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: StorefrontConfig) -> Result<(), AppError> {
    match cli.command {
        Commands::Browse => commands::browse::run(&config).await,
        Commands::List { query } => commands::list::run(&config, query.as_deref()).await,
    }
}
