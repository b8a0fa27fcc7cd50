use thiserror::Error;

#[derive(Error, Debug)]
pub enum CensusError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("API error: {message}")]
    Api { message: String },

    #[error("Table format error at line {line}: {message}")]
    Table { line: usize, message: String },

    #[error("Catalog fetch found no parsable titles across {pages} pages")]
    EmptyCatalog { pages: usize },

    #[error("Invalid top-N value {0}: must be zero or greater")]
    InvalidTopN(i64),

    #[error("Cannot summarize empty rollup '{0}'")]
    EmptyRollup(String),
}

pub type Result<T> = std::result::Result<T, CensusError>;
