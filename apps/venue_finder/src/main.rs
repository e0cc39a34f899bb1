use std::{io, path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{
    HttpLookupClient, Notifier, Orchestrator, PositionService, StaticPositionProvider,
    VenueRegistry,
};
use shared::domain::Coordinate;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod render;

use config::{load_settings, DEFAULT_CONFIG_PATH};
use render::{TerminalNotifier, TerminalSurface};

#[derive(Parser, Debug)]
#[command(name = "venue_finder", version, about = "Find fitness venues near you")]
struct Args {
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    /// Device latitude reported by the simulated location service.
    #[arg(long, allow_hyphen_values = true, requires = "longitude")]
    latitude: Option<f64>,
    #[arg(long, allow_hyphen_values = true, requires = "latitude")]
    longitude: Option<f64>,
    /// Answer "denied" to the location permission request.
    #[arg(long, conflicts_with_all = ["latitude", "longitude"])]
    deny_location: bool,
    /// Run one search and exit instead of reading queries from stdin.
    #[arg(long)]
    query: Option<String>,
    #[arg(long, help = "Render frames as JSON lines")]
    json: bool,
}

impl Args {
    fn position_provider(&self) -> StaticPositionProvider {
        match (self.deny_location, self.latitude, self.longitude) {
            (true, _, _) => StaticPositionProvider::denied(),
            (false, Some(latitude), Some(longitude)) => {
                StaticPositionProvider::granted(Coordinate::new(latitude, longitude))
            }
            _ => StaticPositionProvider::without_fix(),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Input {
    Quit,
    Redraw,
    QueryChanged(String),
    Search,
    QueryAndSearch(String),
}

fn parse_input(line: &str) -> Input {
    match line.trim_end_matches(&['\r', '\n'][..]) {
        "/quit" | "/q" => Input::Quit,
        "/show" => Input::Redraw,
        "/search" => Input::Search,
        other => match other.strip_prefix("/query ") {
            Some(text) => Input::QueryChanged(text.to_string()),
            None => Input::QueryAndSearch(other.to_string()),
        },
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let settings = load_settings(&args.config)?;
    let lookup = HttpLookupClient::new(settings.lookup_config())
        .context("failed to initialize venue lookup client")?;

    let notifier: Arc<dyn Notifier> = Arc::new(TerminalNotifier);
    let position = PositionService::new(Arc::new(args.position_provider()));
    let mut orchestrator =
        Orchestrator::new(VenueRegistry::default(), position, Arc::new(lookup), notifier);
    let mut surface = TerminalSurface::new(io::stdout(), args.json);

    orchestrator.activate();

    if let Some(query) = args.query {
        orchestrator.query_changed(query);
        orchestrator.search();
        orchestrator.settle().await;
        surface.render(&orchestrator.render_model())?;
        orchestrator.tear_down();
        return Ok(());
    }

    surface.render(&orchestrator.render_model())?;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read from stdin")? else {
                    break;
                };
                match parse_input(&line) {
                    Input::Quit => break,
                    Input::Redraw => {}
                    Input::QueryChanged(text) => orchestrator.query_changed(text),
                    Input::Search => orchestrator.search(),
                    Input::QueryAndSearch(text) => {
                        orchestrator.query_changed(text);
                        orchestrator.search();
                    }
                }
            }
            applied = orchestrator.next_resolution(), if orchestrator.has_pending_work() => {
                if !applied {
                    continue;
                }
            }
        }
        surface.render(&orchestrator.render_model())?;
    }

    info!("shutting down");
    orchestrator.tear_down();
    Ok(())
}
