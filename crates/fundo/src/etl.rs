use chrono::{Local, NaiveDateTime};
use fundo_spider as spider;
use spider::fundamentus::{export, harvest, load, table, universe, BASE_URL};
use tracing::{error, info};

/// Run the full extract-transform-load pipeline once.
///
/// The timestamp comes from the scheduler when present, otherwise the
/// current local time; every record in the run carries the same one.
pub(crate) async fn run(timestamp: Option<NaiveDateTime>, tui: bool) -> anyhow::Result<()> {
    let time = std::time::Instant::now();

    // resolve the target before any scraping so a misconfigured credential
    // pair fails before the first request
    let db_config = spider::db::DbConfig::from_env()?;

    let run_ts = timestamp.unwrap_or_else(|| Local::now().naive_local());
    info!("run timestamp: {run_ts}");

    // extract
    let http_client = spider::std_client_build();
    let tickers = universe::list_universe(&http_client, BASE_URL).await;
    if tickers.is_empty() {
        error!("no tickers found; ending the run without loading");
        return Ok(());
    }
    let records = harvest::harvest(&http_client, BASE_URL, tickers, run_ts, tui).await;

    // transform
    let table = table::reconcile(records);
    export::write_csv(&table, &run_ts);

    // load
    let mut pg_client = db_config.connect().await?;
    load::load(&mut pg_client, &table, load::LOAD_TABLE).await?;
    load::call_procedure(&pg_client, load::HISTORY_PROCEDURE).await?;

    info!("etl run finished, time elapsed: {:?}", time.elapsed());
    Ok(())
}

/// Run the history procedure on its own (the scheduler's second task).
pub(crate) async fn call_procedure(name: Option<String>) -> anyhow::Result<()> {
    let db_config = spider::db::DbConfig::from_env()?;
    let pg_client = db_config.connect().await?;
    let name = name.unwrap_or_else(|| load::HISTORY_PROCEDURE.to_string());
    load::call_procedure(&pg_client, &name).await
}
