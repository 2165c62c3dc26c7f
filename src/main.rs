use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hashpulse::config::Config;

mod commands;

#[derive(Parser)]
#[command(
    name = "hashpulse",
    version,
    about = "Hashtag activity tracker with trend analysis, growth ranking and forecasts",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to a TOML config file (environment variables override it)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json); defaults to the configured format
    #[arg(long, global = true)]
    log_format: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Ingest a JSON array of hashtag snapshots
    Ingest {
        /// Snapshot file path
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Analyze the trend of a hashtag
    Trend {
        hashtag: String,

        /// Restrict to one platform
        #[arg(short, long)]
        platform: Option<String>,

        /// Lookback period in days
        #[arg(short, long)]
        days: Option<u32>,
    },

    /// Forecast mentions for a hashtag
    Predict {
        hashtag: String,

        #[arg(short, long)]
        platform: Option<String>,
    },

    /// Rank hashtags by growth over a period
    Growth {
        #[arg(short, long)]
        platform: Option<String>,

        #[arg(long)]
        category: Option<String>,

        #[arg(short, long)]
        days: Option<u32>,
    },

    /// List hashtags by trending score
    Trending {
        #[arg(short, long)]
        platform: Option<String>,

        #[arg(long)]
        category: Option<String>,

        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Aggregate reports over tracked hashtags
    Report {
        #[arg(value_enum)]
        kind: ReportKind,

        #[arg(short, long)]
        platform: Option<String>,

        #[arg(long)]
        category: Option<String>,

        #[arg(short, long)]
        days: Option<u32>,
    },

    /// Run the HTTP API server
    Serve {
        /// Bind address, overriding the configured one
        #[arg(short, long)]
        bind: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ReportKind {
    Categories,
    Platforms,
    Sentiment,
    Overview,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref())?;
    let log_format = cli.log_format.as_deref().unwrap_or(&config.logging.format);
    setup_tracing(log_format, cli.verbose, &config.logging.level)?;

    tracing::debug!(
        sqlite_path = %config.database.sqlite_path.display(),
        "Configuration loaded"
    );

    match cli.command {
        Commands::Ingest { file } => {
            tracing::info!(file = %file.display(), "Starting ingest command");
            commands::ingest(&config, &file)?;
        }

        Commands::Trend {
            hashtag,
            platform,
            days,
        } => {
            tracing::info!(hashtag = %hashtag, platform = ?platform, days = ?days, "Starting trend command");
            commands::trend(&config, &hashtag, platform.as_deref(), days)?;
        }

        Commands::Predict { hashtag, platform } => {
            tracing::info!(hashtag = %hashtag, platform = ?platform, "Starting predict command");
            commands::predict(&config, &hashtag, platform.as_deref())?;
        }

        Commands::Growth {
            platform,
            category,
            days,
        } => {
            tracing::info!(platform = ?platform, category = ?category, days = ?days, "Starting growth command");
            commands::growth(&config, platform.as_deref(), category.as_deref(), days)?;
        }

        Commands::Trending {
            platform,
            category,
            limit,
        } => {
            tracing::info!(platform = ?platform, limit = ?limit, "Starting trending command");
            commands::trending(&config, platform.as_deref(), category.as_deref(), limit)?;
        }

        Commands::Report {
            kind,
            platform,
            category,
            days,
        } => {
            tracing::info!(kind = ?kind, "Starting report command");
            let filters = commands::ReportFilters {
                platform,
                category,
                days,
            };
            match kind {
                ReportKind::Categories => commands::report_categories(&config, &filters)?,
                ReportKind::Platforms => commands::report_platforms(&config, &filters)?,
                ReportKind::Sentiment => commands::report_sentiment(&config, &filters)?,
                ReportKind::Overview => commands::report_overview(&config)?,
            }
        }

        Commands::Serve { bind } => {
            let mut config = config;
            if let Some(bind) = bind {
                config.server.bind_address = bind;
            }
            tracing::info!(bind = %config.server.bind_address, "Starting serve command");
            commands::serve(config).await?;
        }
    }

    Ok(())
}

fn setup_tracing(format: &str, verbose: bool, level: &str) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("hashpulse=debug,tower_http=debug,info")
    } else {
        tracing_subscriber::EnvFilter::try_new(format!("hashpulse={level},warn"))?
    };

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
                .init();
        }
    }

    Ok(())
}
