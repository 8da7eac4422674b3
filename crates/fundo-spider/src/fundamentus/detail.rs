use super::clean;
use super::common::{Record, Value};
use crate::http::HttpClient;
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;
use tracing::{debug, trace, warn};

const DETAIL_TIMEOUT: Duration = Duration::from_secs(10);

/// Key carrying the company identifier in every record.
pub const TICKER_KEY: &str = "Ticker";

/// Scrape one company's detail page into a flat field map.
///
/// Never fails: a fetch error is logged and degrades to a record carrying
/// only the ticker, so the harvester can still account for the attempt.
pub async fn scrape_company(http_client: &HttpClient, base_url: &str, ticker: &str) -> Record {
    let url = format!("{base_url}detalhes.php?papel={ticker}");
    let mut record = Record::new();
    record.insert(TICKER_KEY.to_string(), Value::Text(ticker.to_string()));

    let body = match fetch(http_client, &url).await {
        Ok(body) => body,
        Err(err) => {
            warn!("failed to fetch detail page for [{ticker}], error({err})");
            return record;
        }
    };

    parse_detail(&body, &mut record, ticker);
    convert_values(&mut record);
    trace!("[{ticker}] {} fields collected", record.len());

    // politeness delay so we don't hammer the source server
    let jitter = fastrand::u64(100..=500);
    tokio::time::sleep(Duration::from_millis(jitter)).await;

    record
}

async fn fetch(http_client: &HttpClient, url: &str) -> anyhow::Result<String> {
    let response = http_client
        .get(url)
        .timeout(DETAIL_TIMEOUT)
        .send()
        .await?
        .error_for_status()?;
    Ok(response.text().await?)
}

/// Walk every table row of a detail page body, pairing each `td.label` cell
/// with its data cell(s) under the canonical label. Values stay raw text at
/// this stage.
///
/// Special metrics expand into two suffixed fields read from the row's first
/// two `td.data` cells; any other label takes the next data cell in the row.
pub fn parse_detail(body: &str, record: &mut Record, ticker: &str) {
    let doc = Html::parse_document(body);
    let rows = Selector::parse("tr").expect("static selector");

    for row in doc.select(&rows) {
        let cells: Vec<ElementRef> = row
            .children()
            .filter_map(ElementRef::wrap)
            .filter(|el| el.value().name() == "td")
            .collect();

        for (idx, cell) in cells.iter().enumerate() {
            if !has_class(cell, "label") {
                continue;
            }
            let raw = cell_text(cell);
            let label = clean::normalize_label(&raw.replace(':', ""));
            if label.is_empty() {
                continue;
            }

            if clean::is_special_metric(&label) {
                let data: Vec<&ElementRef> =
                    cells.iter().filter(|c| has_class(c, "data")).collect();
                if data.len() >= 2 {
                    record.insert(format!("{label} 12m"), Value::Text(cell_text(data[0])));
                    record.insert(format!("{label} 3m"), Value::Text(cell_text(data[1])));
                } else {
                    // recoverable page anomaly, not a scrape failure
                    debug!(
                        "[{ticker}] special metric '{label}' row has {} data cells, expected 2; skipped",
                        data.len()
                    );
                }
            } else if let Some(data) = cells[idx + 1..].iter().find(|c| has_class(c, "data")) {
                record.insert(label, Value::Text(cell_text(data)));
            }
        }
    }
}

/// Numeric-clean every field except the ticker, string-classified fields,
/// and fields whose cleaned name is a reserved date column (those stay raw
/// for the reconciliation step's date parsing).
fn convert_values(record: &mut Record) {
    for (key, value) in record.iter_mut() {
        if key == TICKER_KEY
            || clean::is_string_field(key)
            || clean::is_date_column(&clean::clean_column_name(key))
        {
            continue;
        }
        if let Value::Text(raw) = value {
            *value = match clean::clean_numeric(raw) {
                Some(num) => Value::Num(num),
                None => Value::Null,
            };
        }
    }
}

fn has_class(el: &ElementRef, class: &str) -> bool {
    el.value().classes().any(|c| c == class)
}

fn cell_text(el: &ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}
