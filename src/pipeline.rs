use crate::app::ports::ListingPort;
use crate::catalog::{CatalogFetcher, FetchStats};
use crate::config::Config;
use crate::error::{CensusError, Result};
use crate::matrix::IncidenceTable;
use crate::metrics::AnalysisMetrics;
use crate::report::{write_report, ReportFiles};
use crate::rollup::Rollup;
use crate::summary::{summarize, Summary};
use crate::table_store;
use tracing::{info, instrument};

/// Where the incidence table for this run came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableSource {
    /// Reloaded from the persisted table file
    Reused,
    /// Built from a full catalog fetch and persisted
    Fetched(FetchStats),
}

/// Both rollups in full, with their summaries
#[derive(Debug, Clone)]
pub struct Analysis {
    pub by_entity: Rollup,
    pub by_origin: Rollup,
    pub entity_summary: Summary,
    pub origin_summary: Summary,
}

#[derive(Debug)]
pub struct RunResult {
    pub source: TableSource,
    pub table: IncidenceTable,
    pub analysis: Analysis,
    pub reports: Vec<ReportFiles>,
}

pub struct Pipeline;

impl Pipeline {
    /// Reload the persisted table when present, unless `refresh` forces a new fetch.
    ///
    /// A fetch that fails, or that yields no parsable titles, leaves any existing
    /// table file untouched.
    #[instrument(skip(port, config))]
    pub async fn load_or_fetch(
        port: &dyn ListingPort,
        config: &Config,
        refresh: bool,
    ) -> Result<(IncidenceTable, TableSource)> {
        let path = &config.output.table_path;
        if path.exists() && !refresh {
            info!(path = %path.display(), "Reusing persisted incidence table");
            let table = table_store::read_table(path)?;
            AnalysisMetrics::record_table_reused();
            return Ok((table, TableSource::Reused));
        }

        info!(base_url = %config.catalog.base_url, "Fetching catalog");
        let outcome = CatalogFetcher::new(port)
            .with_max_pages(config.catalog.max_pages)
            .fetch_all()
            .await?;
        // Never persist an empty table: later runs would reuse it instead of fetching
        if outcome.index.entity_count() == 0 {
            return Err(CensusError::EmptyCatalog { pages: outcome.stats.pages });
        }
        let table = outcome.index.into_table();
        table_store::write_table(path, &table)?;
        Ok((table, TableSource::Fetched(outcome.stats)))
    }

    pub fn analyse(table: &IncidenceTable, top_n: i64) -> Result<Analysis> {
        AnalysisMetrics::record_table(table.row_count(), table.column_count());
        let by_entity = Rollup::by_entity(table);
        let by_origin = Rollup::by_origin(table);
        let entity_summary = summarize(&by_entity, top_n)?;
        let origin_summary = summarize(&by_origin, top_n)?;
        Ok(Analysis { by_entity, by_origin, entity_summary, origin_summary })
    }

    /// Load or fetch the table, analyse it and write both reports.
    #[instrument(skip(port, config))]
    pub async fn run(port: &dyn ListingPort, config: &Config, top_n: i64, refresh: bool) -> Result<RunResult> {
        // Reject a bad N before doing any network work
        if top_n < 0 {
            return Err(CensusError::InvalidTopN(top_n));
        }
        let (table, source) = Self::load_or_fetch(port, config, refresh).await?;
        let analysis = Self::analyse(&table, top_n)?;

        let reports = vec![
            write_report(&config.output.report_dir, &analysis.entity_summary)?,
            write_report(&config.output.report_dir, &analysis.origin_summary)?,
        ];
        info!(
            characters = table.row_count(),
            universes = table.column_count(),
            appearances = table.true_count(),
            "Census complete"
        );
        Ok(RunResult { source, table, analysis, reports })
    }
}
