use super::common::{Record, Value};
use super::detail;
use crate::http::HttpClient;
use chrono::NaiveDateTime;
use futures::{stream, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{error, info};

/// Fixed width of the worker pool.
const MAX_WORKERS: usize = 8;

/// Raw key the run timestamp is stamped under; reconciliation later renames
/// and splits it into date and time columns.
pub const TIMESTAMP_KEY: &str = "Data_Execucao";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Fan the detail scraper out over the whole universe with bounded
/// parallelism, stamping every record with the shared run timestamp.
///
/// Each company runs as its own task; one task's failure is logged with its
/// ticker and excluded without cancelling siblings. Result order is
/// completion order.
pub async fn harvest(
    http_client: &HttpClient,
    base_url: &str,
    universe: Vec<String>,
    run_ts: NaiveDateTime,
    tui: bool,
) -> Vec<Record> {
    let total = universe.len();
    info!("harvesting {total} companies with {MAX_WORKERS} workers ...");
    let time = std::time::Instant::now();
    let stamp = run_ts.format(TIMESTAMP_FORMAT).to_string();

    // progress bar
    let pb = if tui {
        let pb = ProgressBar::new(total as u64).with_style(
            ProgressStyle::default_bar()
                .template(
                    "{msg} {spinner:.magenta}\n\
                    [{elapsed_precise:.magenta}] |{bar:40.cyan/blue}| {human_pos}/{human_len} \
                    [Rate: {per_sec:.magenta}, ETA: {eta:.blue}]",
                )
                .expect("static progress template")
                .progress_chars("##-"),
        );
        pb.set_message("scraping companies ...");
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    } else {
        ProgressBar::hidden()
    };

    let records: Arc<Mutex<Vec<Record>>> = Arc::new(Mutex::new(Vec::with_capacity(total)));
    let completed = Arc::new(AtomicUsize::new(0));

    stream::iter(universe)
        .map(|ticker| {
            let http_client = http_client.clone();
            let base_url = base_url.to_string();
            let task_ticker = ticker.clone();
            let task = tokio::spawn(async move {
                detail::scrape_company(&http_client, &base_url, &task_ticker).await
            });
            async move { (ticker, task.await) }
        })
        .buffer_unordered(MAX_WORKERS)
        .for_each(|(ticker, result)| {
            let records = records.clone();
            let completed = completed.clone();
            let stamp = stamp.clone();
            let pb = pb.clone();
            async move {
                match result {
                    Ok(mut record) => {
                        record.insert(TIMESTAMP_KEY.to_string(), Value::Text(stamp));
                        records.lock().await.push(record);
                    }
                    Err(err) => error!("scrape task for [{ticker}] failed, error({err})"),
                }
                pb.inc(1);
                let count = completed.fetch_add(1, Ordering::Relaxed) + 1;
                if count % 50 == 0 || count == total {
                    info!("harvest progress: {count}/{total} companies processed");
                }
            }
        })
        .await;

    pb.finish_and_clear();
    if tui {
        println!("scraping companies ... done");
    }
    info!("harvest complete. {}", crate::time_elapsed(time));

    Arc::into_inner(records)
        .expect("no harvest worker left holding the record list")
        .into_inner()
}
