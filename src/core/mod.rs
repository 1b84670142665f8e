pub mod aggregator;
pub mod engine;
pub mod fetcher;
pub mod notifier;
pub mod pipeline;

pub use crate::domain::model::{
    CatalogItem, CatalogReport, CatalogRow, Delivery, ReportEmail, Stage,
};
pub use crate::domain::ports::{CatalogParser, ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
