use clap::Parser;
use multiverse_census::config::Config;
use multiverse_census::constants::{DEFAULT_CONFIG_PATH, DEFAULT_TOP_N};
use multiverse_census::infra::http_client::ReqwestListing;
use multiverse_census::logging;
use multiverse_census::pipeline::{Pipeline, TableSource};
use std::path::PathBuf;
use tracing::error;

#[derive(Parser)]
#[command(name = "multiverse_census")]
#[command(about = "Rank characters by universes appeared in, and universes by population")]
#[command(version = "0.1.0")]
struct Cli {
    /// Number of top entries to report
    #[arg(default_value_t = DEFAULT_TOP_N, allow_negative_numbers = true)]
    n: i64,

    /// Path to the TOML configuration file
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Fetch the catalog again even if a persisted table exists
    #[arg(long)]
    refresh: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    logging::init_logging();

    let cli = Cli::parse();
    let config = Config::load(&cli.config)?;
    let listing = ReqwestListing::new(&config.catalog)?;

    let result = match Pipeline::run(&listing, &config, cli.n, cli.refresh).await {
        Ok(result) => result,
        Err(e) => {
            error!("Census run failed: {}", e);
            return Err(e.into());
        }
    };

    match &result.source {
        TableSource::Reused => {
            println!("📂 Reused table {}", config.output.table_path.display());
        }
        TableSource::Fetched(stats) => {
            println!(
                "📥 Fetched {} pages: {} titles indexed, {} skipped",
                stats.pages, stats.titles_matched, stats.titles_skipped
            );
        }
    }
    println!("   Characters: {}", result.table.row_count());
    println!("   Universes: {}", result.table.column_count());
    for files in &result.reports {
        println!("   Report: {}", files.text.display());
        println!("   Chart data: {}", files.chart_data.display());
    }
    Ok(())
}
