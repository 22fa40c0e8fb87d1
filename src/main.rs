use std::error::Error;
use std::io::{self, Write};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use motd_client::common::ApiResponse;
use motd_client::config::{self, ViewKind};
use motd_client::error::ApiError;
use motd_client::network::{ApiWorker, MotdApiClient};
use motd_client::ui::MotdApp;
use tokio::sync::mpsc;

#[derive(Parser)]
#[command(
    name = "motd_client",
    version,
    about = "Message of the day demo client"
)]
struct Cli {
    /// Path to JSON config file
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH, value_name = "FILE")]
    config: String,
    /// Override the API base URL
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,
    /// View shown when the window opens
    #[arg(long, value_enum)]
    view: Option<ViewKind>,
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Subcommand, Clone, PartialEq, Eq)]
enum Mode {
    /// GET /health once and print the result (no UI)
    Health,
    /// GET /api/messageoftheday once and print the result (no UI)
    Message,
    /// POST a new message of the day and print the created record (no UI)
    Create {
        /// Message text
        text: String,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn Error>> {
    dotenv().ok();
    // Khởi tạo Logger để debug
    env_logger::init();

    let cli = Cli::parse();
    let mut app_config = config::load_config(&cli.config);
    app_config.apply_env_overrides();
    if let Some(base_url) = &cli.base_url {
        app_config.override_base_url(base_url, "--base-url");
    }
    if let Some(view) = cli.view {
        app_config.start_view = view;
    }

    let client = MotdApiClient::new(&app_config)?;

    match cli.mode {
        Some(mode) => run_once(&client, mode).await,
        None => {
            run_full_client(client, app_config.start_view)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn run_once(client: &MotdApiClient, mode: Mode) -> Result<ExitCode, Box<dyn Error>> {
    let result = match mode {
        Mode::Health => client.get_health_check().await.map(ApiResponse::Health),
        Mode::Message => client
            .get_message_of_the_day()
            .await
            .map(ApiResponse::Message),
        Mode::Create { text } => client
            .create_message_of_the_day(&text)
            .await
            .map(ApiResponse::Message),
    };

    report(&result, &mut io::stdout().lock(), &mut io::stderr().lock())
}

/// Pretty JSON on stdout for success; `Error: <json>` on stderr and a failing exit code otherwise.
fn report(
    result: &Result<ApiResponse, ApiError>,
    out: &mut impl Write,
    err_out: &mut impl Write,
) -> Result<ExitCode, Box<dyn Error>> {
    match result {
        Ok(response) => {
            writeln!(out, "{}", serde_json::to_string_pretty(response)?)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            writeln!(err_out, "Error: {}", err.display_json())?;
            Ok(ExitCode::FAILURE)
        }
    }
}

fn run_full_client(client: MotdApiClient, start_view: ViewKind) -> Result<(), eframe::Error> {
    // 1. Tạo các kênh giao tiếp (Channels)
    // UI -> Worker
    let (cmd_tx, cmd_rx) = mpsc::channel(100);
    // Worker -> UI
    let (event_tx, event_rx) = mpsc::channel(100);

    // 2. Khởi chạy worker gọi API (chạy ngầm)
    tokio::spawn(ApiWorker::new(client, cmd_rx, event_tx).run());

    // 3. Khởi chạy UI (Chạy trên Main Thread)
    let options = eframe::NativeOptions::default();
    let mut event_rx = Some(event_rx);

    eframe::run_native(
        "Message of the Day",
        options,
        Box::new(move |cc| {
            let event_receiver = event_rx
                .take()
                .expect("MotdApp should only be initialized once");

            log::info!("Client started on {start_view:?} view");

            Ok(Box::new(MotdApp::new(
                cc,
                cmd_tx.clone(),
                event_receiver,
                start_view,
            )))
        }),
    )
}
