use crate::domain::model::CatalogRow;
use crate::domain::ports::CatalogParser;
use crate::utils::error::{ReportError, Result};
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// CSS selectors describing one product card.
#[derive(Debug, Clone)]
pub struct CardSelectors {
    pub card: String,
    /// Link inside the card; carries both the `title` attribute and the `href`.
    pub link: String,
    pub price: String,
}

impl Default for CardSelectors {
    fn default() -> Self {
        Self {
            card: "article.product_pod".to_string(),
            link: "h3 a".to_string(),
            price: "p.price_color".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ScraperCatalogParser {
    selectors: CardSelectors,
}

impl ScraperCatalogParser {
    pub fn new(selectors: CardSelectors) -> Self {
        Self { selectors }
    }

    fn extract_row(
        &self,
        card: ElementRef<'_>,
        index: usize,
        link_selector: &Selector,
        price_selector: &Selector,
        base_url: &Url,
    ) -> Result<CatalogRow> {
        let link = card.select(link_selector).next().ok_or_else(|| ReportError::Html {
            message: format!("product card #{} has no '{}' element", index, self.selectors.link),
        })?;

        let title = link.value().attr("title").ok_or_else(|| ReportError::Html {
            message: format!("product card #{} link has no title attribute", index),
        })?;

        let href = link.value().attr("href").ok_or_else(|| ReportError::Html {
            message: format!("product card #{} link has no href", index),
        })?;

        // Url::join 會正確處理相對路徑，絕對網址則原樣保留
        let absolute = base_url.join(href).map_err(|e| ReportError::Html {
            message: format!("product card #{} has an unusable href '{}': {}", index, href, e),
        })?;

        let price = card
            .select(price_selector)
            .next()
            .map(|p| p.text().collect::<String>())
            .ok_or_else(|| ReportError::Html {
                message: format!(
                    "product card #{} has no '{}' element",
                    index, self.selectors.price
                ),
            })?;

        Ok(CatalogRow {
            title: title.to_string(),
            price: price.trim().to_string(),
            link: absolute.to_string(),
        })
    }
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| ReportError::Html {
        message: format!("invalid selector '{}': {}", selector, e),
    })
}

impl CatalogParser for ScraperCatalogParser {
    fn parse(&self, html: &str, base_url: &Url) -> Result<Vec<CatalogRow>> {
        let card_selector = parse_selector(&self.selectors.card)?;
        let link_selector = parse_selector(&self.selectors.link)?;
        let price_selector = parse_selector(&self.selectors.price)?;

        let document = Html::parse_document(html);

        document
            .select(&card_selector)
            .enumerate()
            .map(|(i, card)| {
                self.extract_row(card, i + 1, &link_selector, &price_selector, base_url)
            })
            .collect()
    }
}
