use crate::core::{CatalogItem, CatalogReport, CatalogRow, ConfigProvider, Storage};
use crate::domain::model::{format_money, PriceStats};
use crate::utils::error::{ReportError, Result};
use rust_decimal::Decimal;

/// 讀回 Fetcher 寫出的 CSV，價格格式錯誤會直接中止
pub fn read_catalog_csv(data: &[u8], currency_symbol: &str) -> Result<Vec<CatalogItem>> {
    let mut reader = csv::Reader::from_reader(data);
    let mut items = Vec::new();

    for record in reader.deserialize::<CatalogRow>() {
        let row = record?;
        items.push(CatalogItem::from_row(row, currency_symbol)?);
    }

    Ok(items)
}

/// Single linear scan. Ties keep the first item in file order.
pub fn summarize(items: &[CatalogItem]) -> Result<CatalogReport> {
    let Some(first) = items.first() else {
        return Ok(CatalogReport {
            item_count: 0,
            total_value: Decimal::ZERO,
            stats: None,
        });
    };

    let mut total = Decimal::ZERO;
    let mut cheapest = first;
    let mut most_expensive = first;

    for item in items {
        total = total
            .checked_add(item.price)
            .ok_or_else(|| ReportError::Price {
                value: item.price.to_string(),
                reason: format!("total overflows after adding '{}'", item.title),
            })?;
        if item.price < cheapest.price {
            cheapest = item;
        }
        if item.price > most_expensive.price {
            most_expensive = item;
        }
    }

    let count = items.len();
    Ok(CatalogReport {
        item_count: count,
        total_value: total,
        stats: Some(PriceStats {
            average_value: total / Decimal::from(count),
            cheapest: cheapest.clone(),
            most_expensive: most_expensive.clone(),
        }),
    })
}

pub fn render_report(report: &CatalogReport, title: &str, currency_symbol: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!("--------- {} ---------\n", title));
    out.push_str(&format!("Number of books: {}\n", report.item_count));

    match &report.stats {
        Some(stats) => {
            out.push_str(&format!(
                "Most expensive book: {} ({})\n",
                stats.most_expensive.title,
                format_money(currency_symbol, stats.most_expensive.price)
            ));
            out.push_str(&format!("Link: {}\n", stats.most_expensive.link));
            out.push_str(&format!(
                "Cheapest book: {} ({})\n",
                stats.cheapest.title,
                format_money(currency_symbol, stats.cheapest.price)
            ));
            out.push_str(&format!("Link: {}\n", stats.cheapest.link));
            out.push_str(&format!(
                "Total value of books: {}\n",
                format_money(currency_symbol, report.total_value)
            ));
            out.push_str(&format!(
                "Average price: {}\n",
                format_money(currency_symbol, stats.average_value)
            ));
        }
        None => {
            out.push_str(&format!(
                "Total value of books: {}\n",
                format_money(currency_symbol, report.total_value)
            ));
            out.push_str("Average price: n/a (no books)\n");
        }
    }

    out
}

/// Aggregator 階段：CSV → 統計 → 覆寫文字報表
pub async fn run_aggregate<S, C>(storage: &S, config: &C) -> Result<CatalogReport>
where
    S: Storage,
    C: ConfigProvider,
{
    let data = storage.read_file(config.csv_file()).await?;
    let items = read_catalog_csv(&data, config.currency_symbol())?;
    tracing::debug!("Parsed {} items from {}", items.len(), config.csv_file());

    let report = summarize(&items)?;
    if report.is_empty() {
        tracing::warn!("Catalog CSV has no data rows, writing an empty report");
    }

    let text = render_report(&report, config.report_title(), config.currency_symbol());
    storage.write_file(config.report_file(), text.as_bytes()).await?;

    Ok(report)
}
