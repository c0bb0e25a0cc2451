//! BURAQ CLI - drive the storefront from the command line.
//!
//! Each invocation restores the previous session from the data directory,
//! runs one command and saves the session again, so consecutive runs act
//! like one browser session. Output goes to stdout; logs go to stderr.
//!
//! # Usage
//!
//! ```bash
//! # Add a product to the seller's catalog
//! buraq product add --name "Kemeja Batik" --price 150000 --category teen-fashion --stock 10
//!
//! # Put it in the cart and check out
//! buraq cart add <PRODUCT_ID> --quantity 2
//! buraq checkout --name Budi --email budi@buraq.id --province "DKI Jakarta" \
//!     --address "Jl. Merdeka 1" --voucher ONGKIRGRATIS
//!
//! # Ship it
//! buraq orders status ORD-1760000000000=Shipped
//! ```
//!
//! # Commands
//!
//! - `product` - Manage the seller and management catalogs
//! - `cart` - Manage the cart and its checkout selection
//! - `checkout` - Place an order for the selected cart lines
//! - `orders` - List orders and propagate status changes
//! - `shipping` - Manage the shipping table
//! - `voucher` - List and toggle vouchers
//! - `boost` - Feature products for a number of days

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io;
use std::path::PathBuf;

use buraq_core::{Category, OrderStatus, ProductId, ShippingRuleId};
use buraq_storefront::config::{LogFormat, StorefrontConfig};
use buraq_storefront::{Dashboard, StoreError};
use clap::{Parser, Subcommand, ValueEnum};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::CommandError;

#[derive(Parser)]
#[command(name = "buraq")]
#[command(author, version, about = "BURAQ storefront CLI")]
struct Cli {
    /// Data directory (overrides `BURAQ_DATA_DIR`)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage catalog products
    Product {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Place an order for the selected cart lines
    Checkout(CheckoutArgs),
    /// List orders and update their status
    Orders {
        #[command(subcommand)]
        action: OrdersAction,
    },
    /// Manage shipping rules
    Shipping {
        #[command(subcommand)]
        action: ShippingAction,
    },
    /// Manage vouchers
    Voucher {
        #[command(subcommand)]
        action: VoucherAction,
    },
    /// Manage product boosts
    Boost {
        #[command(subcommand)]
        action: BoostAction,
    },
}

/// Which dashboard a catalog or order command acts for.
#[derive(Clone, Copy, ValueEnum)]
enum DashboardArg {
    Seller,
    Management,
}

impl From<DashboardArg> for Dashboard {
    fn from(arg: DashboardArg) -> Self {
        match arg {
            DashboardArg::Seller => Self::Seller,
            DashboardArg::Management => Self::Management,
        }
    }
}

#[derive(Subcommand)]
enum ProductAction {
    /// Add a product to a dashboard's catalog
    Add {
        #[arg(short, long, value_enum, default_value = "seller")]
        dashboard: DashboardArg,

        /// Product ID (random if omitted)
        #[arg(long)]
        id: Option<ProductId>,

        #[arg(short, long)]
        name: String,

        /// Unit price in rupiah
        #[arg(short, long)]
        price: u64,

        /// Category slug or label (e.g. `teen-fashion`, `food`)
        #[arg(short, long)]
        category: Category,

        #[arg(short, long, default_value_t = 0)]
        stock: u32,

        #[arg(long, default_value = "")]
        description: String,

        /// Image URL (repeatable)
        #[arg(long = "image")]
        images: Vec<String>,
    },
    /// Edit a product in a dashboard's catalog
    Update {
        id: ProductId,

        #[arg(short, long, value_enum, default_value = "seller")]
        dashboard: DashboardArg,

        #[arg(short, long)]
        name: Option<String>,

        /// Unit price in rupiah
        #[arg(short, long)]
        price: Option<u64>,

        #[arg(short, long)]
        category: Option<Category>,

        #[arg(short, long)]
        stock: Option<u32>,

        #[arg(long)]
        description: Option<String>,
    },
    /// List products (the shopper view unless a dashboard is given)
    List {
        #[arg(short, long, value_enum)]
        dashboard: Option<DashboardArg>,

        /// Only products in this category
        #[arg(short, long)]
        category: Option<Category>,
    },
    /// Delete a product from a dashboard's catalog
    Delete {
        id: ProductId,

        #[arg(short, long, value_enum, default_value = "seller")]
        dashboard: DashboardArg,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Add a product to the cart
    Add {
        product_id: ProductId,

        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Set a line's quantity (0 removes it)
    Set { product_id: ProductId, quantity: u32 },
    /// Flip a line's checkout selection
    Toggle { product_id: ProductId },
    /// Select every line, or clear the selection if all are selected
    ToggleAll,
    /// Show the cart
    Show,
}

#[derive(clap::Args)]
struct CheckoutArgs {
    #[arg(short, long)]
    name: String,

    #[arg(long)]
    phone: Option<String>,

    #[arg(short, long)]
    email: String,

    #[arg(long)]
    province: String,

    /// Street address (the province is appended)
    #[arg(short, long)]
    address: String,

    #[arg(short, long)]
    voucher: Option<String>,
}

#[derive(Subcommand)]
enum OrdersAction {
    /// List orders
    List {
        /// Show the customer's order history
        #[arg(long, conflicts_with = "dashboard")]
        customer: bool,

        #[arg(short, long, value_enum, default_value = "seller")]
        dashboard: DashboardArg,
    },
    /// Set order statuses, e.g. `ORD-1760000000000=Shipped`
    Status {
        #[arg(required = true, value_parser = parse_status_update)]
        updates: Vec<(String, OrderStatus)>,
    },
    /// Delete an order from the dashboards (the customer keeps theirs)
    Delete { id: String },
}

#[derive(Subcommand)]
enum ShippingAction {
    /// List shipping rules
    List,
    /// Add a shipping rule
    Add {
        destination: String,

        /// Standard cost in rupiah
        #[arg(long)]
        standard: u64,

        /// Express cost in rupiah
        #[arg(long)]
        express: u64,
    },
    /// Edit a shipping rule
    Update {
        id: ShippingRuleId,

        #[arg(long)]
        destination: Option<String>,

        /// Standard cost in rupiah
        #[arg(long)]
        standard: Option<u64>,

        /// Express cost in rupiah
        #[arg(long)]
        express: Option<u64>,
    },
    /// Delete a shipping rule
    Delete { id: ShippingRuleId },
    /// Quote standard shipping to a province
    Quote { province: String },
}

#[derive(Subcommand)]
enum VoucherAction {
    /// List vouchers
    List,
    /// Flip a voucher between active and inactive
    Toggle { code: String },
}

#[derive(Subcommand)]
enum BoostAction {
    /// Boost a product for a number of days
    Add {
        product_id: ProductId,

        #[arg(short, long, default_value_t = 7)]
        days: u32,
    },
    /// Stop boosting a product
    Remove { product_id: ProductId },
    /// List running boosts
    List,
}

fn parse_status_update(raw: &str) -> Result<(String, OrderStatus), String> {
    let (id, status) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected ORDER_ID=STATUS, got `{raw}`"))?;
    Ok((id.trim().to_string(), status.parse()?))
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

    Some(guard)
}

/// Map tracing levels to Sentry events: errors and warnings are reported,
/// info and debug become breadcrumbs.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        tracing::Level::TRACE => sentry_tracing::EventFilter::Ignore,
    }
}

fn init_tracing(format: LogFormat) {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "buraq_storefront=info,buraq_cli=info".into());

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(sentry_tracing::layer().event_filter(sentry_event_filter));

    match format {
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(io::stderr))
            .init(),
    }
}

fn main() {
    let cli = Cli::parse();

    let config = StorefrontConfig::from_env();
    let _sentry_guard = config.as_ref().ok().and_then(init_sentry);
    init_tracing(config.as_ref().map_or_else(|_| LogFormat::default(), |c| c.log_format));

    let result = config
        .map_err(|e| CommandError::from(StoreError::from(e)))
        .and_then(|config| run(cli, config));

    if let Err(e) = result {
        if e.is_user_facing() {
            tracing::warn!("{e}");
        } else {
            tracing::error!(error = %e, "Command failed");
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli, mut config: StorefrontConfig) -> Result<(), CommandError> {
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }

    let mut shop = commands::open(&config)?;
    let mut out = io::stdout().lock();

    match cli.command {
        Commands::Product { action } => match action {
            ProductAction::Add {
                dashboard,
                id,
                name,
                price,
                category,
                stock,
                description,
                images,
            } => {
                let product = commands::catalog::NewProduct {
                    id,
                    name,
                    description,
                    price,
                    images,
                    category,
                    stock,
                };
                commands::catalog::add(&mut shop, &mut out, dashboard.into(), product)?;
            }
            ProductAction::Update {
                id,
                dashboard,
                name,
                price,
                category,
                stock,
                description,
            } => {
                let changes = commands::catalog::ProductChanges {
                    name,
                    description,
                    price,
                    category,
                    stock,
                };
                commands::catalog::update(&mut shop, &mut out, dashboard.into(), &id, changes)?;
            }
            ProductAction::List {
                dashboard,
                category,
            } => {
                let dashboard = dashboard.map(Into::into);
                commands::catalog::list(&shop, &mut out, dashboard, category)?;
            }
            ProductAction::Delete { id, dashboard } => {
                commands::catalog::delete(&mut shop, &mut out, dashboard.into(), &id)?;
            }
        },
        Commands::Cart { action } => match action {
            CartAction::Add {
                product_id,
                quantity,
            } => commands::cart::add(&mut shop, &mut out, &product_id, quantity)?,
            CartAction::Set {
                product_id,
                quantity,
            } => commands::cart::set(&mut shop, &mut out, &product_id, quantity)?,
            CartAction::Toggle { product_id } => {
                commands::cart::toggle(&mut shop, &mut out, &product_id)?;
            }
            CartAction::ToggleAll => commands::cart::toggle_all(&mut shop, &mut out)?,
            CartAction::Show => commands::cart::show(&shop, &mut out)?,
        },
        Commands::Checkout(args) => {
            let form = commands::checkout::CheckoutForm {
                name: args.name,
                phone: args.phone,
                email: args.email,
                province: args.province,
                address: args.address,
                voucher: args.voucher,
            };
            commands::checkout::place(&mut shop, &mut out, &form)?;
        }
        Commands::Orders { action } => match action {
            OrdersAction::List {
                customer,
                dashboard,
            } => {
                let view = if customer {
                    commands::orders::View::Customer
                } else {
                    commands::orders::View::Dashboard(dashboard.into())
                };
                commands::orders::list(&shop, &mut out, view)?;
            }
            OrdersAction::Status { updates } => {
                commands::orders::set_status(&mut shop, &mut out, updates)?;
            }
            OrdersAction::Delete { id } => commands::orders::delete(&mut shop, &mut out, &id)?,
        },
        Commands::Shipping { action } => match action {
            ShippingAction::List => commands::shipping::list(&shop, &mut out)?,
            ShippingAction::Add {
                destination,
                standard,
                express,
            } => commands::shipping::add(&mut shop, &mut out, destination, standard, express)?,
            ShippingAction::Update {
                id,
                destination,
                standard,
                express,
            } => commands::shipping::update(
                &mut shop,
                &mut out,
                &id,
                destination,
                standard,
                express,
            )?,
            ShippingAction::Delete { id } => {
                commands::shipping::delete(&mut shop, &mut out, &id)?;
            }
            ShippingAction::Quote { province } => {
                commands::shipping::quote(&shop, &mut out, &province)?;
            }
        },
        Commands::Voucher { action } => match action {
            VoucherAction::List => commands::promotions::list_vouchers(&shop, &mut out)?,
            VoucherAction::Toggle { code } => {
                commands::promotions::toggle_voucher(&mut shop, &mut out, &code)?;
            }
        },
        Commands::Boost { action } => match action {
            BoostAction::Add { product_id, days } => {
                commands::promotions::boost(&mut shop, &mut out, product_id, days)?;
            }
            BoostAction::Remove { product_id } => {
                commands::promotions::unboost(&mut shop, &mut out, &product_id)?;
            }
            BoostAction::List => commands::promotions::list_boosts(&shop, &mut out)?,
        },
    }

    shop.save_session()?;
    Ok(())
}
