use crate::utils::error::{ReportError, Result};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const CSV_HEADER: [&str; 3] = ["titulo", "preco", "link"];

/// 中繼 CSV 的一列：價格保留原始字串（含貨幣符號）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRow {
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "preco")]
    pub price: String,
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogItem {
    pub title: String,
    pub price: Decimal,
    pub link: String,
}

impl CatalogItem {
    pub fn from_row(row: CatalogRow, currency_symbol: &str) -> Result<Self> {
        let price = parse_price(&row.price, currency_symbol)?;
        Ok(Self {
            title: row.title,
            price,
            link: row.link,
        })
    }
}

/// Strips one leading currency symbol and parses the rest as a non-negative decimal.
pub fn parse_price(raw: &str, currency_symbol: &str) -> Result<Decimal> {
    let trimmed = raw.trim();
    let amount = trimmed
        .strip_prefix(currency_symbol)
        .unwrap_or(trimmed)
        .trim();

    let value = Decimal::from_str(amount).map_err(|e| ReportError::Price {
        value: raw.to_string(),
        reason: e.to_string(),
    })?;

    if value.is_sign_negative() && !value.is_zero() {
        return Err(ReportError::Price {
            value: raw.to_string(),
            reason: "price cannot be negative".to_string(),
        });
    }

    Ok(value)
}

/// 兩位小數並加上貨幣符號
pub fn format_money(currency_symbol: &str, value: Decimal) -> String {
    format!(
        "{}{:.2}",
        currency_symbol,
        value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceStats {
    pub average_value: Decimal,
    pub cheapest: CatalogItem,
    pub most_expensive: CatalogItem,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogReport {
    pub item_count: usize,
    pub total_value: Decimal,
    /// `None` when the catalog is empty.
    pub stats: Option<PriceStats>,
}

impl CatalogReport {
    pub fn average(&self) -> Result<Decimal> {
        self.stats
            .as_ref()
            .map(|s| s.average_value)
            .ok_or(ReportError::EmptyCatalog)
    }

    pub fn is_empty(&self) -> bool {
        self.item_count == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportEmail {
    pub subject: String,
    pub from: String,
    pub to: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    Sent,
    /// 連線被拒，通常是本機 relay 沒有啟動
    RelayUnavailable { relay: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    All,
    Fetch,
    Aggregate,
    Notify,
}

impl Stage {
    pub fn includes(self, other: Stage) -> bool {
        self == Stage::All || self == other
    }
}
