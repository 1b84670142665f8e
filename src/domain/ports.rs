use crate::domain::model::{CatalogReport, CatalogRow, Delivery};
use crate::utils::error::Result;
use async_trait::async_trait;
use url::Url;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn source_url(&self) -> &str;
    fn output_dir(&self) -> &str;
    fn csv_file(&self) -> &str;
    fn report_file(&self) -> &str;
    fn currency_symbol(&self) -> &str;
    fn report_title(&self) -> &str;
    fn smtp_host(&self) -> &str;
    fn smtp_port(&self) -> u16;
    fn mail_from(&self) -> &str;
    fn mail_to(&self) -> &str;
    fn mail_subject(&self) -> &str;
}

/// 把目錄頁 HTML 轉成 CSV 列；HTML 函式庫只出現在實作端
pub trait CatalogParser: Send + Sync {
    fn parse(&self, html: &str, base_url: &Url) -> Result<Vec<CatalogRow>>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    /// Returns the number of data rows written.
    async fn fetch(&self) -> Result<usize>;
    async fn aggregate(&self) -> Result<CatalogReport>;
    async fn notify(&self) -> Result<Delivery>;
}
