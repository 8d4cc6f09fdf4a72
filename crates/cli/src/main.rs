mod auth_commands;

use {
    clap::{Parser, Subcommand},
    sheetdump_oauth::StdinPrompt,
    sheetdump_sheets::{SheetsClient, format_row},
    tracing::debug,
    tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt},
};

#[derive(Parser)]
#[command(name = "sheetdump", about = "Read a Google Sheets range from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Output logs as JSON instead of human-readable.
    #[arg(long, global = true, default_value_t = false)]
    json_logs: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Read the configured range and print its rows.
    Fetch {
        /// Spreadsheet ID from the document URL (overrides the config file).
        #[arg(long)]
        spreadsheet_id: Option<String>,

        /// A1-notation range (overrides the config file).
        #[arg(long)]
        range: Option<String>,
    },
    /// Token cache management.
    Auth {
        #[command(subcommand)]
        action: auth_commands::AuthAction,
    },
}

fn init_telemetry(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    if cli.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_target(true).with_thread_ids(false))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_ansi(true),
            )
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_telemetry(&cli);

    debug!(version = env!("CARGO_PKG_VERSION"), "sheetdump starting");

    match cli.command {
        Commands::Fetch {
            spreadsheet_id,
            range,
        } => run_fetch(spreadsheet_id, range).await,
        Commands::Auth { action } => auth_commands::handle_auth(action).await,
    }
}

/// The full pipeline: config → client secret → authorized token → one read.
async fn run_fetch(
    spreadsheet_id: Option<String>,
    range: Option<String>,
) -> anyhow::Result<()> {
    let config = sheetdump_config::discover_and_load();

    let spreadsheet_id = spreadsheet_id
        .or_else(|| config.sheet.spreadsheet_id.clone())
        .ok_or_else(|| {
            anyhow::anyhow!(
                "no spreadsheet configured: pass --spreadsheet-id or set [sheet].spreadsheet_id"
            )
        })?;
    let range = range.unwrap_or_else(|| config.sheet.range.clone());

    let authorizer = auth_commands::authorizer_from(&config.auth)?;
    let token = authorizer.authorize(&StdinPrompt::new()).await?;

    let rows = SheetsClient::new(&token)
        .get_values(&spreadsheet_id, &range)
        .await?;

    if rows.is_empty() {
        println!("No data found.");
        return Ok(());
    }

    println!("Data:");
    for row in &rows {
        println!("{}", format_row(row));
    }
    Ok(())
}
