pub mod catalog;
pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod matrix;
pub mod metrics;
pub mod pipeline;
pub mod report;
pub mod rollup;
pub mod summary;
pub mod table_store;
pub mod types;

// Layered boundaries: ports in app, adapters in infra
pub mod app;
pub mod infra;
