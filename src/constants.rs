/// Defaults for the upstream catalog and the on-disk artifacts.
/// Every value here can be overridden through `census.toml` or the environment.

// Upstream listing endpoint
pub const DEFAULT_LIST_URL: &str = "http://marvel.wikia.com/api/v1/Articles/List";
pub const DEFAULT_CATEGORY: &str = "Characters";
pub const DEFAULT_PAGE_LIMIT: u32 = 10_000;
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 60;

// Persisted artifacts
pub const DEFAULT_CONFIG_PATH: &str = "census.toml";
pub const DEFAULT_TABLE_PATH: &str = "data.csv";
pub const DEFAULT_REPORT_DIR: &str = "reports";

// Table layout
pub const ENTITY_HEADER: &str = "Character";
pub const TRUE_TOKEN: &str = "True";
pub const FALSE_TOKEN: &str = "False";

// Rollup labels (value column, index column)
pub const ENTITY_ROLLUP_LABEL: &str = "Universes";
pub const ENTITY_ROLLUP_INDEX: &str = "Character";
pub const ORIGIN_ROLLUP_LABEL: &str = "Characters";
pub const ORIGIN_ROLLUP_INDEX: &str = "Universe";

pub const DEFAULT_TOP_N: i64 = 20;

// Environment overrides
pub const ENV_BASE_URL: &str = "CENSUS_BASE_URL";
pub const ENV_TABLE_PATH: &str = "CENSUS_TABLE_PATH";
pub const ENV_REPORT_DIR: &str = "CENSUS_REPORT_DIR";
