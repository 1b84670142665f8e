pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::html::{CardSelectors, ScraperCatalogParser};
pub use config::{cli::LocalStorage, toml_config::TomlConfig};
pub use core::{engine::ReportEngine, pipeline::ReportPipeline};
pub use utils::error::{ReportError, Result};
