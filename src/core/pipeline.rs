use crate::adapters::html::ScraperCatalogParser;
use crate::core::{
    aggregator, fetcher, notifier, CatalogParser, CatalogReport, ConfigProvider, Delivery,
    Pipeline, Storage,
};
use crate::utils::error::Result;
use reqwest::Client;

/// Wires the three file-mediated stages to one storage and one configuration.
pub struct ReportPipeline<S: Storage, C: ConfigProvider, P: CatalogParser = ScraperCatalogParser> {
    pub(crate) storage: S,
    pub(crate) config: C,
    pub(crate) parser: P,
    pub(crate) client: Client,
}

impl<S: Storage, C: ConfigProvider> ReportPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self::with_parser(storage, config, ScraperCatalogParser::default())
    }
}

impl<S: Storage, C: ConfigProvider, P: CatalogParser> ReportPipeline<S, C, P> {
    pub fn with_parser(storage: S, config: C, parser: P) -> Self {
        Self {
            storage,
            config,
            parser,
            client: Client::new(),
        }
    }

    pub fn config(&self) -> &C {
        &self.config
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider, P: CatalogParser> Pipeline for ReportPipeline<S, C, P> {
    async fn fetch(&self) -> Result<usize> {
        fetcher::run_fetch(&self.client, &self.parser, &self.storage, &self.config).await
    }

    async fn aggregate(&self) -> Result<CatalogReport> {
        aggregator::run_aggregate(&self.storage, &self.config).await
    }

    async fn notify(&self) -> Result<Delivery> {
        notifier::run_notify(&self.storage, &self.config).await
    }
}
