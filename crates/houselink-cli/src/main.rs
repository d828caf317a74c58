//! houselink - command line front-end for the houselink marketplace.
//!
//! # Usage
//!
//! ```bash
//! # Sign in (prompts for the password)
//! houselink login admin@example.com
//!
//! # Compose an address the way the listing form does
//! houselink locate --area vte --district Sisattanak --lat 17.9757 --lng 102.6331
//!
//! # Admin moderation queue
//! houselink properties --query "status=pending&transaction=sale"
//! houselink moderate p-123 approved
//! ```
//!
//! Logging goes to stderr (`RUST_LOG`, default `warn`) and optionally to a
//! file given with `--log-file`.

mod app;
mod commands;

use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use houselink_core::models::{BankRequestStatus, PropertyStatus};
use houselink_core::notice::{self, Locale};
use houselink_core::Config;

use app::App;

#[derive(Parser)]
#[command(name = "houselink")]
#[command(author, version, about = "Houselink marketplace client")]
struct Cli {
    /// Backend base URL (overrides config and HOUSELINK_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Message language (en, lo)
    #[arg(long, global = true)]
    locale: Option<Locale>,

    /// Also write logs to this file
    #[arg(long, global = true, env = "HOUSELINK_LOG_FILE")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and store the session
    Login {
        /// Account email (defaults to the last one used)
        email: Option<String>,
    },
    /// Sign out and remove the stored session
    Logout,
    /// Show the signed in user
    Whoami {
        /// Re-fetch the profile from the backend
        #[arg(long)]
        refresh: bool,
    },
    /// Show session and cache status
    Status,
    /// Admin overview: pending listings, pending bank requests, news categories
    Dashboard,
    /// List location areas and their districts
    Areas {
        /// Ignore the cache
        #[arg(long)]
        refresh: bool,
    },
    /// Reverse geocode a coordinate
    Geocode {
        #[arg(allow_negative_numbers = true)]
        lat: f64,
        #[arg(allow_negative_numbers = true)]
        lng: f64,
    },
    /// Compose an address from area, district, street and a map point
    Locate {
        /// Location area id
        #[arg(long)]
        area: Option<String>,
        #[arg(long)]
        district: Option<String>,
        #[arg(long)]
        street: Option<String>,
        #[arg(long)]
        building: Option<String>,
        #[arg(long, allow_negative_numbers = true, requires = "lng")]
        lat: Option<f64>,
        #[arg(long, allow_negative_numbers = true, requires = "lat")]
        lng: Option<f64>,
    },
    /// List properties
    Properties {
        /// Filter as a URL query, e.g. "status=pending&transaction=sale"
        #[arg(short, long, default_value = "")]
        query: String,
    },
    /// Show one property as JSON
    Property { id: String },
    /// Change a listing's status
    Moderate { id: String, status: PropertyStatus },
    /// Delete a listing
    DeleteProperty { id: String },
    /// List users
    Users {
        #[arg(short, long)]
        keyword: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// List partner banks
    Banks {
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Financing requests sent to banks
    BankRequests {
        #[command(subcommand)]
        action: BankRequestAction,
    },
    /// List news articles
    News {
        /// Only this news type
        #[arg(long)]
        news_type: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// List news types
    NewsTypes,
    /// Show site settings
    Settings {
        #[arg(long)]
        refresh: bool,
    },
    /// Upload an image and print its URL
    Upload { path: PathBuf },
}

#[derive(Subcommand)]
enum BankRequestAction {
    /// List requests
    List {
        #[arg(long)]
        status: Option<BankRequestStatus>,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Approve or reject a request
    SetStatus { id: String, status: BankRequestStatus },
}

/// Initialize the tracing subscriber for logging.
/// The returned guard must live until exit so buffered file logs are flushed.
fn init_tracing(log_file: Option<&Path>) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
            let name = path.file_name().map(|n| n.to_os_string()).unwrap_or_else(|| "houselink.log".into());
            let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(dir, name));
            (Some(fmt::layer().with_ansi(false).with_writer(writer)), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .with(file_layer)
        .init();

    guard
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let _guard = init_tracing(cli.log_file.as_deref());

    let mut config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Some(ref url) = cli.api_url {
        config.api_base_url = url.clone();
    }
    if let Some(locale) = cli.locale {
        config.locale = locale;
    }
    let locale = config.locale;

    match run(cli.command, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("{}", notice::user_message(&e, locale));
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Commands, config: Config) -> Result<()> {
    info!(api = %config.api_base_url, "houselink starting");
    let mut app = App::new(config)?;

    match command {
        Commands::Login { email } => commands::session::login(&mut app, email).await,
        Commands::Logout => commands::session::logout(&mut app),
        Commands::Whoami { refresh } => commands::session::whoami(&mut app, refresh).await,
        Commands::Status => commands::session::status(&app),
        Commands::Dashboard => commands::listings::dashboard(&app).await,
        Commands::Areas { refresh } => commands::location::areas(&app, refresh).await,
        Commands::Geocode { lat, lng } => commands::location::geocode(&app, lat, lng).await,
        Commands::Locate {
            area,
            district,
            street,
            building,
            lat,
            lng,
        } => {
            let input = commands::location::LocateInput {
                area,
                district,
                street,
                building,
                point: lat.zip(lng),
            };
            commands::location::locate(&app, input).await
        }
        Commands::Properties { query } => commands::listings::properties(&app, &query).await,
        Commands::Property { id } => commands::listings::property(&app, &id).await,
        Commands::Moderate { id, status } => commands::listings::moderate(&app, &id, status).await,
        Commands::DeleteProperty { id } => commands::listings::delete_property(&app, &id).await,
        Commands::Users { keyword, page } => commands::admin::users(&app, keyword.as_deref(), page).await,
        Commands::Banks { page } => commands::admin::banks(&app, page).await,
        Commands::BankRequests { action } => match action {
            BankRequestAction::List { status, page } => commands::admin::bank_requests(&app, status, page).await,
            BankRequestAction::SetStatus { id, status } => {
                commands::admin::set_bank_request_status(&app, &id, status).await
            }
        },
        Commands::News { news_type, page } => commands::admin::news(&app, news_type.as_deref(), page).await,
        Commands::NewsTypes => commands::admin::news_types(&app).await,
        Commands::Settings { refresh } => commands::admin::settings(&app, refresh).await,
        Commands::Upload { path } => commands::admin::upload(&app, &path).await,
    }
}
