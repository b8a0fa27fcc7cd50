use crate::constants::*;
use crate::error::{CensusError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub catalog: CatalogConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub base_url: String,
    pub category: String,
    pub limit: u32,
    pub timeout_seconds: u64,
    /// Upper bound on requested pages; `None` fetches until the catalog ends.
    pub max_pages: Option<usize>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_LIST_URL.to_string(),
            category: DEFAULT_CATEGORY.to_string(),
            limit: DEFAULT_PAGE_LIMIT,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            max_pages: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub table_path: PathBuf,
    pub report_dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            table_path: PathBuf::from(DEFAULT_TABLE_PATH),
            report_dir: PathBuf::from(DEFAULT_REPORT_DIR),
        }
    }
}

impl Config {
    /// Load from `path`, falling back to defaults when the file does not exist,
    /// then apply environment overrides.
    pub fn load(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = fs::read_to_string(path).map_err(|e| {
                CensusError::Config(format!("Failed to read config file '{}': {}", path.display(), e))
            })?;
            toml::from_str::<Config>(&content)?
        } else {
            debug!("No config file at {}, using defaults", path.display());
            Config::default()
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Some(v) = non_empty_env(ENV_BASE_URL) {
            self.catalog.base_url = v;
        }
        if let Some(v) = non_empty_env(ENV_TABLE_PATH) {
            self.output.table_path = PathBuf::from(v);
        }
        if let Some(v) = non_empty_env(ENV_REPORT_DIR) {
            self.output.report_dir = PathBuf::from(v);
        }
    }

    fn validate(&self) -> Result<()> {
        if self.catalog.base_url.trim().is_empty() {
            return Err(CensusError::Config("catalog.base_url must not be empty".into()));
        }
        if self.catalog.limit == 0 {
            return Err(CensusError::Config("catalog.limit must be greater than zero".into()));
        }
        if self.catalog.max_pages == Some(0) {
            return Err(CensusError::Config("catalog.max_pages must be greater than zero".into()));
        }
        Ok(())
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    match std::env::var(key) {
        Ok(v) if !v.trim().is_empty() => Some(v),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.catalog.category, DEFAULT_CATEGORY);
        assert_eq!(config.catalog.limit, DEFAULT_PAGE_LIMIT);
        assert_eq!(config.catalog.max_pages, None);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("census.toml");
        let mut f = fs::File::create(&path).unwrap();
        writeln!(f, "[catalog]\nlimit = 50\nmax_pages = 3").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.catalog.limit, 50);
        assert_eq!(config.catalog.max_pages, Some(3));
        assert_eq!(config.catalog.category, DEFAULT_CATEGORY);
    }

    #[test]
    fn zero_limit_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("census.toml");
        fs::write(&path, "[catalog]\nlimit = 0\n").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, CensusError::Config(_)));
    }
}
