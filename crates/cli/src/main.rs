//! ShopHub CLI - Browse the catalog, manage the cart, sign in and out.
//!
//! # Usage
//!
//! ```bash
//! # List everything, or search and filter
//! shophub products
//! shophub products --search wireless --category Headphones --max-price 300 --in-stock
//!
//! # Cart
//! shophub cart add 3
//! shophub cart update 3 2
//! shophub cart inc 3
//! shophub cart dec 3
//! shophub cart remove 3
//! shophub cart show
//!
//! # Account (mock sign in, any credentials are accepted)
//! shophub account login -e sam@example.com -p secret
//! shophub account signup -e sam@example.com -p secret -n "Sam Taylor"
//! shophub account whoami
//! shophub account logout
//! ```
//!
//! Cart and account state persist between runs in the file named by
//! `SHOPHUB_STORAGE_PATH` (default `.shophub/storage.json`).

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shophub_storefront::config::ShopConfig;

mod commands;
mod render;

#[derive(Parser)]
#[command(name = "shophub")]
#[command(author, version, about = "ShopHub storefront in your terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products, optionally searched and filtered
    Products(commands::products::ProductArgs),
    /// Show the filter sidebar: categories with product counts, slider ranges
    Categories,
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Sign in, sign up, sign out
    Account {
        #[command(subcommand)]
        action: AccountAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart contents and total
    Show,
    /// Add one unit of a product
    Add {
        /// Product ID
        id: String,
    },
    /// Set the quantity of a cart line (0 removes it)
    Update {
        /// Product ID
        id: String,
        /// New quantity
        quantity: u32,
    },
    /// Raise a cart line's quantity by one
    Inc {
        /// Product ID
        id: String,
    },
    /// Lower a cart line's quantity by one
    Dec {
        /// Product ID
        id: String,
    },
    /// Remove a product from the cart
    Remove {
        /// Product ID
        id: String,
    },
}

#[derive(Subcommand)]
enum AccountAction {
    /// Sign in with an email address
    Login {
        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password (not verified)
        #[arg(short, long)]
        password: String,
    },
    /// Create an account and sign in
    Signup {
        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password (not verified)
        #[arg(short, long)]
        password: String,

        /// Display name
        #[arg(short, long)]
        name: String,
    },
    /// Sign out
    Logout,
    /// Show who is signed in
    Whoami,
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &ShopConfig) -> Option<sentry::ClientInitGuard> {
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

    tracing::debug!("Sentry initialized");
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

fn init_tracing() {
    // Command output goes to stdout, so logs go to stderr and stay quiet
    // unless RUST_LOG asks for more.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "shophub=warn,shophub_storefront=warn".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match ShopConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_tracing();
            tracing::error!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Sentry must be initialized before the tracing subscriber
    let _sentry_guard = init_sentry(&config);
    init_tracing();

    match run(cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            e.capture();
            tracing::error!("Command failed: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, config: &ShopConfig) -> Result<(), commands::CliError> {
    let mut state = commands::open_state(config)?;
    let mut out = std::io::stdout().lock();

    match cli.command {
        Commands::Products(args) => commands::products::list(&mut state, &args, &mut out)?,
        Commands::Categories => commands::products::categories(&state, &mut out)?,
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&state, &mut out)?,
            CartAction::Add { id } => commands::cart::add(&mut state, &id, &mut out)?,
            CartAction::Update { id, quantity } => {
                commands::cart::update(&mut state, &id, quantity, &mut out)?;
            }
            CartAction::Inc { id } => commands::cart::increment(&mut state, &id, &mut out)?,
            CartAction::Dec { id } => commands::cart::decrement(&mut state, &id, &mut out)?,
            CartAction::Remove { id } => commands::cart::remove(&mut state, &id, &mut out)?,
        },
        Commands::Account { action } => match action {
            AccountAction::Login { email, password } => {
                commands::account::login(&mut state, &email, password, &mut out)?;
            }
            AccountAction::Signup {
                email,
                password,
                name,
            } => commands::account::signup(&mut state, &email, password, &name, &mut out)?,
            AccountAction::Logout => commands::account::logout(&mut state, &mut out)?,
            AccountAction::Whoami => commands::account::whoami(&state, &mut out)?,
        },
    }
    Ok(())
}
