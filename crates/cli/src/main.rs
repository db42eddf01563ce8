//! Shopfront CLI - catalog, cart and order administration from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog as a shopper
//! shopfront catalog list
//!
//! # Preview a cart built from product ids
//! shopfront cart preview 6650c0ffee 6650c0ffee 6650beef00
//!
//! # Manage products
//! shopfront products list
//! shopfront products create -n Pen -d "Blue pen" -p 1.50
//! shopfront products delete 6650c0ffee
//!
//! # Process orders
//! shopfront orders list
//! shopfront orders stats
//! shopfront orders set-status 6650feed00 shipped
//! ```
//!
//! # Environment Variables
//!
//! - `SHOPFRONT_API_URL` - Backend base URL (default `http://localhost:3000`)
//! - `SHOPFRONT_API_TIMEOUT_SECS` - Request timeout (default 30)
//! - `SHOPFRONT_API_TOKEN` - Optional bearer token
//! - `SHOPFRONT_LOG_JSON` - JSON log output
//! - `SENTRY_DSN` - Enables error tracking
//! - `RUST_LOG` - Log filter (default `shopfront=info`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use sentry::integrations::tracing as sentry_tracing;
use shopfront_client::{ApiClient, ClientConfig};
use shopfront_core::{OrderId, OrderStatus, ProductId};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod terminal;

use commands::Context;
use commands::products::ProductFields;
use config::TelemetryConfig;
use terminal::TerminalNotifier;

#[derive(Parser)]
#[command(name = "shopfront")]
#[command(author, version, about = "Shopfront catalog, cart and order tools")]
struct Cli {
    /// Backend base URL, overriding `SHOPFRONT_API_URL`
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Answer yes to confirmation prompts
    #[arg(short, long, global = true)]
    yes: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the product catalog
    Products {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Process orders
    Orders {
        #[command(subcommand)]
        action: OrderAction,
    },
    /// Browse the catalog as a shopper
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Work with a shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
}

#[derive(Subcommand)]
enum ProductAction {
    /// List all products
    List,
    /// Create a product
    Create {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        description: String,

        /// Price in dollars, e.g. 1.50
        #[arg(short, long)]
        price: Decimal,

        /// Image file to embed
        #[arg(short, long)]
        image: Option<PathBuf>,
    },
    /// Change fields of an existing product
    Update {
        id: String,

        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        description: Option<String>,

        #[arg(short, long)]
        price: Option<Decimal>,

        #[arg(short, long)]
        image: Option<PathBuf>,
    },
    /// Delete a product
    Delete { id: String },
}

#[derive(Subcommand)]
enum OrderAction {
    /// List all orders
    List,
    /// Count orders per status
    Stats,
    /// Move an order to a new status
    SetStatus {
        id: String,

        /// One of pending, processing, shipped, delivered, cancelled
        #[arg(value_parser = str::parse::<OrderStatus>)]
        status: OrderStatus,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List products with prices
    List,
}

#[derive(Subcommand)]
enum CartAction {
    /// Add products to an empty cart and show the total
    Preview {
        #[arg(required = true)]
        ids: Vec<String>,
    },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &TelemetryConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            sample_rate: config.sentry_sample_rate,
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

fn init_tracing(config: &TelemetryConfig) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "shopfront=info".into());

    // Logs go to stderr so listings on stdout stay pipeable.
    let json_layer = config.log_json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer = (!config.log_json)
        .then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let telemetry = match TelemetryConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_tracing(&TelemetryConfig::default());
            tracing::error!("Configuration error: {e}");
            std::process::exit(1);
        }
    };

    // Sentry must be initialized before the tracing subscriber
    let _sentry_guard = init_sentry(&telemetry);
    init_tracing(&telemetry);

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut client_config = ClientConfig::from_env()?;
    if let Some(api_url) = cli.api_url.as_deref() {
        client_config = client_config.with_base_url(api_url)?;
    }
    tracing::debug!(config = ?client_config, "Client configured");

    let ctx = Context::new(ApiClient::new(&client_config)?, TerminalNotifier::new(cli.yes));

    match cli.command {
        Commands::Products { action } => match action {
            ProductAction::List => commands::products::list(&ctx).await?,
            ProductAction::Create {
                name,
                description,
                price,
                image,
            } => {
                let fields = ProductFields {
                    name: Some(name),
                    description: Some(description),
                    price: Some(price),
                    image,
                };
                commands::products::create(&ctx, fields).await?;
            }
            ProductAction::Update {
                id,
                name,
                description,
                price,
                image,
            } => {
                let fields = ProductFields {
                    name,
                    description,
                    price,
                    image,
                };
                commands::products::update(&ctx, &ProductId::new(id), fields).await?;
            }
            ProductAction::Delete { id } => {
                commands::products::delete(&ctx, &ProductId::new(id)).await?;
            }
        },
        Commands::Orders { action } => match action {
            OrderAction::List => commands::orders::list(&ctx).await?,
            OrderAction::Stats => commands::orders::stats(&ctx).await?,
            OrderAction::SetStatus { id, status } => {
                commands::orders::set_status(&ctx, &OrderId::new(id), status).await?;
            }
        },
        Commands::Catalog { action } => match action {
            CatalogAction::List => commands::catalog::list(&ctx).await?,
        },
        Commands::Cart { action } => match action {
            CartAction::Preview { ids } => {
                let ids: Vec<ProductId> = ids.into_iter().map(ProductId::new).collect();
                commands::cart::preview(&ctx, &ids).await?;
            }
        },
    }
    Ok(())
}
