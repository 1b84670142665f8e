use crate::core::{CatalogParser, CatalogRow, ConfigProvider, Storage};
use crate::domain::model::CSV_HEADER;
use crate::utils::error::{ReportError, Result};
use reqwest::Client;
use url::Url;

/// GET 目錄頁並解析出所有商品卡
pub async fn fetch_catalog<P: CatalogParser>(
    client: &Client,
    parser: &P,
    source_url: &str,
) -> Result<Vec<CatalogRow>> {
    let base_url = Url::parse(source_url).map_err(|e| ReportError::InvalidConfigValue {
        field: "source_url".to_string(),
        value: source_url.to_string(),
        reason: e.to_string(),
    })?;

    tracing::debug!("Making catalog request to: {}", base_url);
    let response = client.get(base_url.clone()).send().await?;
    tracing::info!("Catalog response status: {}", response.status());

    let response = response.error_for_status()?;
    let body = response.bytes().await?;
    let html = String::from_utf8(body.to_vec()).map_err(|_| ReportError::Html {
        message: "response body is not valid UTF-8".to_string(),
    })?;

    let rows = parser.parse(&html, &base_url)?;
    for row in &rows {
        tracing::debug!("{} | {} | {}", row.title, row.price, row.link);
    }

    Ok(rows)
}

/// Header first (three separate fields), then one record per row in page order.
pub fn write_catalog_csv(rows: &[CatalogRow]) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADER)?;
    for row in rows {
        writer.serialize(row)?;
    }

    writer.into_inner().map_err(|e| ReportError::Io(e.into_error()))
}

/// Fetcher 階段：抓取、解析、覆寫 CSV
pub async fn run_fetch<S, C, P>(client: &Client, parser: &P, storage: &S, config: &C) -> Result<usize>
where
    S: Storage,
    C: ConfigProvider,
    P: CatalogParser,
{
    let rows = fetch_catalog(client, parser, config.source_url()).await?;
    if rows.is_empty() {
        tracing::warn!("No product cards found at {}", config.source_url());
    }

    let data = write_catalog_csv(&rows)?;
    tracing::debug!("Writing {} rows ({} bytes) to {}", rows.len(), data.len(), config.csv_file());
    storage.write_file(config.csv_file(), &data).await?;

    Ok(rows.len())
}
