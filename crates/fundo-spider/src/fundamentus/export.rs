use super::common::Value;
use super::table::Table;
use chrono::NaiveDateTime;
use tracing::{error, info};

/// Dump the reconciled table to a timestamp-named CSV under `data/`.
///
/// Export failure is logged and swallowed; the database load still runs.
pub fn write_csv(table: &Table, run_ts: &NaiveDateTime) {
    let path = format!(
        "data/carga_fundamentus_{}.csv",
        run_ts.format("%Y%m%d_%H%M%S")
    );
    match try_write(table, &path) {
        Ok(()) => info!("table exported to '{path}'"),
        Err(err) => error!("failed to write the csv export to '{path}', error({err})"),
    }
}

fn try_write(table: &Table, path: &str) -> anyhow::Result<()> {
    if let Some(dir) = std::path::Path::new(path).parent() {
        std::fs::create_dir_all(dir)?;
    }

    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(&table.columns)?;
    for idx in 0..table.rows.len() {
        let row: Vec<String> = table
            .columns
            .iter()
            .map(|col| match table.value_at(idx, col) {
                Value::Num(num) => num.to_string(),
                Value::Text(text) => text.clone(),
                Value::Null => String::new(),
            })
            .collect();
        writer.write_record(&row)?;
    }
    writer.flush()?;

    Ok(())
}
