//! Route matcher CLI.
//!
//! Loads a TOML route table and answers match queries against it.
//!
//! ```text
//! route-matcher --config routes.toml check
//! route-matcher --config routes.toml routes
//! route-matcher --config routes.toml match /app/details/42 /profiles/alice
//! route-matcher --config routes.toml watch
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use route_matcher::config::watcher::ConfigWatcher;
use route_matcher::config::{load_config, RoutesConfig};
use route_matcher::observability::{logging, metrics};
use route_matcher::{MatchSummary, RouteMatcher, SharedMatcher};

#[derive(Parser)]
#[command(name = "route-matcher")]
#[command(about = "Resolve URLs against a hierarchical route table", long_about = None)]
struct Cli {
    /// Routes file (TOML).
    #[arg(short, long, default_value = "routes.toml")]
    config: PathBuf,

    /// Override the configured base URL.
    #[arg(short, long)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the routes file and build the matcher
    Check,
    /// List every route with its resolved pattern
    Routes,
    /// Print the match chain for each URL as JSON
    Match {
        #[arg(required = true)]
        urls: Vec<String>,
    },
    /// Rebuild the matcher whenever the routes file changes
    Watch,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = load_config(&cli.config)?;
    apply_overrides(&mut config, &cli);

    if let Err(e) = logging::init_logging(&config.logging) {
        eprintln!("Failed to initialize logging: {}", e);
    }
    metrics::describe_metrics();

    tracing::debug!(
        path = ?cli.config,
        base_url = %config.base_url,
        routes = config.routes.len(),
        "Configuration loaded"
    );

    let matcher = RouteMatcher::from_config(&config)?;

    match &cli.command {
        Commands::Check => {
            println!("ok: {} routes", matcher.len());
        }
        Commands::Routes => {
            for route in matcher.iter() {
                let depth = route.id().matches('.').count();
                let kind = if route.source().declares_url() { "" } else { "  (group)" };
                println!("{}{}  {}{}", "  ".repeat(depth), route.id(), route.url(), kind);
            }
        }
        Commands::Match { urls } => {
            for url in urls {
                let summary: Option<Vec<MatchSummary>> = matcher
                    .match_str(url)?
                    .map(|chain| chain.iter().map(MatchSummary::from).collect());
                println!("{}", serde_json::to_string_pretty(&summary)?);
            }
        }
        Commands::Watch => {
            watch(matcher, &cli).await?;
        }
    }

    Ok(())
}

fn apply_overrides(config: &mut RoutesConfig, cli: &Cli) {
    if let Some(base_url) = &cli.base_url {
        config.base_url = base_url.clone();
    }
}

async fn watch(matcher: RouteMatcher, cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let shared = SharedMatcher::new(matcher);
    let (watcher, mut updates) = ConfigWatcher::new(&cli.config);
    let _watcher = watcher.run()?;

    loop {
        tokio::select! {
            Some(mut config) = updates.recv() => {
                apply_overrides(&mut config, cli);
                match RouteMatcher::from_config(&config) {
                    Ok(matcher) => shared.store(matcher),
                    Err(e) => tracing::error!(
                        "Failed to rebuild routes: {}. Keeping current route set.",
                        e
                    ),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupt received, stopping watcher");
                break;
            }
            else => break,
        }
    }

    tracing::info!(routes = shared.load().len(), "Watcher stopped");
    Ok(())
}
