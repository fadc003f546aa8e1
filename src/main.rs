//! Atmosphere: terminal weather with live, historical, and marine views.
//!
//! Single-binary Tokio application that:
//! 1. Loads config and builds the WeatherAPI client
//! 2. Fires the first live load (the location permission signal)
//! 3. Prints every published snapshot
//! 4. Reads gesture commands from stdin

mod config;
mod console;
mod render;

use std::sync::Arc;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};

use console::{Command, HELP};
use controller::{
    clamp_progress, AppMode, StateController, SystemClock, ViewState, TIMELINE_SPAN_DAYS,
};
use weatherapi_client::WeatherApiClient;

/// Atmosphere weather console
#[derive(Parser)]
#[command(name = "atmosphere", about = "Live, historical and marine weather in the terminal")]
struct Cli {
    /// Location query for the first load (defaults to config, usually auto:ip).
    #[arg(long)]
    location: Option<String>,

    /// Print the first loaded snapshot and exit.
    #[arg(long)]
    once: bool,

    /// Show the archived day N days back via the timeline, then exit.
    #[arg(long)]
    days_ago: Option<u32>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "atmosphere=info,controller=info,weatherapi_client=info".into()
            }),
        )
        .with_target(true)
        .init();

    let cli = Cli::parse();

    info!("Atmosphere starting up...");

    // Load configuration.
    let cfg = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let client = match WeatherApiClient::new(&cfg) {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to build WeatherAPI client: {}", e);
            std::process::exit(1);
        }
    };
    info!(
        "WeatherAPI: {} (days={}, aqi={}, alerts={}, tides={})",
        cfg.base_url,
        cfg.forecast.days,
        cfg.forecast.include_aqi,
        cfg.forecast.include_alerts,
        cfg.forecast.include_tides,
    );

    let controller = StateController::new(Arc::new(client), Arc::new(SystemClock));
    let location = cli.location.clone().unwrap_or_else(|| cfg.default_location.clone());

    // Location permission granted.
    controller.load_live(&location);

    if cli.once || cli.days_ago.is_some() {
        let state = run_once(&controller, cli.days_ago).await;
        println!("{}", render::render(&state));
        if state.weather_data.is_none() {
            std::process::exit(1);
        }
        return;
    }

    // ── Renderer ─────────────────────────────────────────────────────
    let mut rx = controller.subscribe();
    let renderer = tokio::spawn(async move {
        while rx.changed().await.is_ok() {
            let text = render::render(&rx.borrow_and_update());
            println!("{text}\n");
        }
    });

    println!("{HELP}");

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
        r = run_console(&controller) => {
            if let Err(e) = r {
                error!("Console input failed: {}", e);
            }
        }
        r = renderer => {
            error!("Renderer task exited: {:?}", r);
        }
    }

    info!("Atmosphere shut down.");
}

// ── Task implementations ────────────────────────────────────────────

async fn wait_until_loaded(controller: &StateController) -> ViewState {
    let mut rx = controller.subscribe();
    let waited = rx.wait_for(|s| !s.is_loading).await.map(|s| s.clone());
    waited.unwrap_or_else(|_| controller.snapshot())
}

async fn run_once(controller: &StateController, days_ago: Option<u32>) -> ViewState {
    let state = wait_until_loaded(controller).await;
    let Some(days) = days_ago else {
        return state;
    };

    if state.weather_data.is_none() {
        warn!("Live load failed; historical lookup will use auto:ip");
    }
    controller.set_mode(AppMode::Historical);
    controller.on_timeline_drag(clamp_progress(days as f32 / TIMELINE_SPAN_DAYS as f32));
    controller.on_timeline_drag_finished();
    wait_until_loaded(controller).await
}

async fn run_console(controller: &StateController) -> std::io::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        match console::parse_command(&line) {
            Ok(Command::Quit) => break,
            Ok(Command::Show) => println!("{}\n", render::render(&controller.snapshot())),
            Ok(command) => console::dispatch(controller, command),
            Err(e) => println!("{e}\n{HELP}"),
        }
    }

    Ok(())
}
