use crate::http::HttpClient;
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;
use tracing::{error, info, warn};

const LISTING_TIMEOUT: Duration = Duration::from_secs(20);

/// List every ticker from the Fundamentus results page.
///
/// A fetch failure is logged and yields an empty universe; no universe means
/// no work, which the caller treats as the hard stop for the whole run.
pub async fn list_universe(http_client: &HttpClient, base_url: &str) -> Vec<String> {
    info!("fetching the Fundamentus ticker universe ...");
    let url = format!("{base_url}resultado.php");

    let response = match http_client.get(&url).timeout(LISTING_TIMEOUT).send().await {
        Ok(response) => response.error_for_status(),
        Err(err) => Err(err),
    };
    let body = match response {
        Ok(response) => match response.text().await {
            Ok(body) => body,
            Err(err) => {
                error!("failed to read the results page body, error({err})");
                return Vec::new();
            }
        },
        Err(err) => {
            error!("failed to fetch the results page, error({err})");
            return Vec::new();
        }
    };

    let tickers = parse_listing(&body);
    info!("{} tickers found", tickers.len());
    tickers
}

/// Extract tickers from the listing body: first cell of every row of the
/// results table, header skipped, kept only where the cell carries a link.
pub fn parse_listing(body: &str) -> Vec<String> {
    let doc = Html::parse_document(body);
    let table_sel = Selector::parse("table.resultado").expect("static selector");
    let row_sel = Selector::parse("tr").expect("static selector");
    let link_sel = Selector::parse("a").expect("static selector");

    let Some(table) = doc.select(&table_sel).next() else {
        warn!("results table not found on the listing page");
        return Vec::new();
    };

    let mut tickers = Vec::new();
    for row in table.select(&row_sel).skip(1) {
        let first_cell = row
            .children()
            .filter_map(ElementRef::wrap)
            .find(|el| el.value().name() == "td");
        if let Some(cell) = first_cell {
            if cell.select(&link_sel).next().is_some() {
                let ticker = cell.text().collect::<String>().trim().to_string();
                if !ticker.is_empty() {
                    tickers.push(ticker);
                }
            }
        }
    }
    tickers
}
