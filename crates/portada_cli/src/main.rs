use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use portada_core::{DestinationConfig, PublicationLedger, Result};
use portada_pipeline::{Pipeline, Scheduler, TickOutcome};
use portada_publish::GraphSink;
use portada_render::HttpRenderer;
use portada_source::WordPressSource;
use portada_storage::JsonLedger;
use portada_web::AppState;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Interval syntax like `45m`, `1h15m` or plain seconds.
#[derive(Debug, Clone)]
struct HumanDuration(Duration);

impl FromStr for HumanDuration {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut total_seconds = 0u64;
        let mut current_number = String::new();

        for c in s.chars() {
            if c.is_ascii_digit() {
                current_number.push(c);
            } else if c.is_whitespace() {
                continue;
            } else {
                let num: u64 = current_number
                    .parse()
                    .map_err(|_| format!("invalid duration: {}", s))?;
                current_number.clear();
                total_seconds += match c {
                    's' => num,
                    'm' => num * 60,
                    'h' => num * 3600,
                    'd' => num * 86400,
                    _ => return Err(format!("invalid duration unit: {}", c)),
                };
            }
        }

        // A trailing bare number counts as seconds.
        if !current_number.is_empty() {
            total_seconds += current_number
                .parse::<u64>()
                .map_err(|_| format!("invalid duration: {}", s))?;
        }

        if total_seconds == 0 {
            return Err(format!("duration must be positive: {}", s));
        }

        Ok(HumanDuration(Duration::from_secs(total_seconds)))
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Renders new articles into social cards and publishes them", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Publish new articles on a fixed interval, forever
    Run {
        /// Poll interval (e.g. 45m, 1h15m). Overrides PORTADA_INTERVAL_MINUTES.
        #[arg(long)]
        interval: Option<HumanDuration>,
    },
    /// Run a single fetch→render→publish pass and exit
    Once,
    /// Serve the HTTP control surface
    Serve,
    /// Inspect the publication ledger
    Ledger {
        #[command(subcommand)]
        command: LedgerCommands,
    },
}

#[derive(clap::Subcommand, Debug)]
enum LedgerCommands {
    /// Print all recorded article ids
    List,
    /// Check whether an article id has been published
    Contains { id: u64 },
}

async fn build_pipeline(config: &DestinationConfig) -> Result<Pipeline> {
    let source = Arc::new(WordPressSource::new(config.content_api_url.clone()));
    let renderer = Arc::new(HttpRenderer::new(config.renderer_url.clone()));
    let sink = Arc::new(GraphSink::new(
        config.graph_api_url.clone(),
        config.page_id.clone(),
        config.access_token.clone(),
    ));
    let ledger = Arc::new(JsonLedger::open(&config.ledger_path).await?);

    Ok(Pipeline::new(source, renderer, sink, ledger, config.clone()))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = DestinationConfig::from_env()?;

    match cli.command {
        Commands::Run { interval } => {
            let interval = interval.map(|i| i.0).unwrap_or(config.poll_interval);
            let pipeline = build_pipeline(&config).await?;
            let mut scheduler = Scheduler::new(pipeline, interval);
            scheduler.run_forever().await;
        }
        Commands::Once => {
            let pipeline = build_pipeline(&config).await?;
            match pipeline.run_once().await? {
                TickOutcome::Published(id) => info!(id, "Published one article"),
                TickOutcome::NothingNew => info!("Nothing new to publish"),
            }
        }
        Commands::Serve => {
            let state = AppState {
                renderer: Arc::new(HttpRenderer::new(config.renderer_url.clone())),
                config,
            };
            portada_web::serve(state).await?;
        }
        Commands::Ledger { command } => {
            let ledger = JsonLedger::open(&config.ledger_path).await?;
            match command {
                LedgerCommands::List => {
                    for id in ledger.all().await? {
                        println!("{}", id);
                    }
                }
                LedgerCommands::Contains { id } => {
                    if ledger.contains(id).await? {
                        println!("{} is published", id);
                    } else {
                        println!("{} is not published", id);
                    }
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_human_duration_units() {
        assert_eq!("45m".parse::<HumanDuration>().unwrap().0.as_secs(), 2700);
        assert_eq!(
            "1h15m30s".parse::<HumanDuration>().unwrap().0.as_secs(),
            4530
        );
        assert_eq!("90".parse::<HumanDuration>().unwrap().0.as_secs(), 90);
        assert_eq!("1d".parse::<HumanDuration>().unwrap().0.as_secs(), 86400);
    }

    #[test]
    fn test_human_duration_rejects_garbage() {
        assert!("".parse::<HumanDuration>().is_err());
        assert!("abc".parse::<HumanDuration>().is_err());
        assert!("10x".parse::<HumanDuration>().is_err());
        assert!("0s".parse::<HumanDuration>().is_err());
    }
}
