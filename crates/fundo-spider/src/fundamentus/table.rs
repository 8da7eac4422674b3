use super::clean;
use super::common::{Record, Value};
use chrono::{NaiveDate, NaiveDateTime};
use indexmap::IndexMap;
use tracing::{debug, info, warn};

pub const TICKER_COL: &str = "ticker";
pub const DATE_COL: &str = "data_execucao";
pub const TIME_COL: &str = "hora_execucao";

/// The detail page repeats the ticker under a "Papel" field; the cleaned
/// `ticker` column makes it redundant.
const RAW_TICKER_DUP: &str = "papel";

/// Numeric-named junk columns the site occasionally leaks into records.
const GARBAGE_COLUMNS: &[&str] = &["1", "2", "3", "4"];

const DATE_INPUT_FORMAT: &str = "%d/%m/%Y";
const DATE_OUTPUT_FORMAT: &str = "%Y-%m-%d";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

static NULL: Value = Value::Null;

/// The column-reconciled union of every company record for one run.
///
/// Every row exposes the same column set in the same order; a field a
/// company never reported reads as [`Value::Null`].
#[derive(Debug, Default)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<IndexMap<String, Value>>,
}

impl Table {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell lookup; fields absent from a row read as null.
    pub fn value_at(&self, row: usize, column: &str) -> &Value {
        self.rows[row].get(column).unwrap_or(&NULL)
    }
}

/// Merge heterogeneous per-company records into one table.
///
/// Steps, in order: rename columns to cleaned identifiers, parse the
/// reserved date columns, drop the redundant raw ticker column, drop
/// all-null and known-garbage columns, split the run timestamp into date and
/// time columns, and compute the final column order (identifier and
/// timestamp columns first, year columns last in ascending order).
pub fn reconcile(records: Vec<Record>) -> Table {
    let mut table = rename_columns(records);
    info!(
        "reconciling {} records across {} columns",
        table.rows.len(),
        table.columns.len()
    );

    parse_date_columns(&mut table);
    drop_raw_ticker(&mut table);
    drop_empty_columns(&mut table);
    drop_garbage_columns(&mut table);
    split_run_timestamp(&mut table);
    order_columns(&mut table);

    table
}

/// Re-key every record by its cleaned column name and build the union column
/// list in first-seen order. When two raw labels clean to the same name the
/// first one in the record wins.
fn rename_columns(records: Vec<Record>) -> Table {
    let mut columns: Vec<String> = Vec::new();
    let mut rows: Vec<IndexMap<String, Value>> = Vec::with_capacity(records.len());

    for record in records {
        let mut row = IndexMap::with_capacity(record.len());
        for (label, value) in record {
            let name = clean::clean_column_name(&label);
            if name.is_empty() || row.contains_key(&name) {
                continue;
            }
            if !columns.contains(&name) {
                columns.push(name.clone());
            }
            row.insert(name, value);
        }
        rows.push(row);
    }

    Table { columns, rows }
}

/// Parse the reserved date columns from `DD/MM/YYYY` text to `YYYY-MM-DD`.
/// Placeholder tokens and invalid calendar dates become null, never an
/// error.
fn parse_date_columns(table: &mut Table) {
    for col in clean::DATE_COLUMNS {
        if !table.columns.iter().any(|c| c == col) {
            warn!("date column '{col}' not present in this run");
            continue;
        }
        for row in &mut table.rows {
            if let Some(value) = row.get_mut(*col) {
                *value = parse_date_value(value);
            }
        }
        debug!("column '{col}' normalised to {DATE_OUTPUT_FORMAT}");
    }
}

fn parse_date_value(value: &Value) -> Value {
    match value {
        Value::Text(raw) => {
            let raw = raw.trim();
            if raw.is_empty() || raw == "-" {
                return Value::Null;
            }
            match NaiveDate::parse_from_str(raw, DATE_INPUT_FORMAT) {
                Ok(date) => Value::Text(date.format(DATE_OUTPUT_FORMAT).to_string()),
                Err(_) => Value::Null,
            }
        }
        _ => Value::Null,
    }
}

fn drop_raw_ticker(table: &mut Table) {
    let has_ticker = table.columns.iter().any(|c| c == TICKER_COL);
    if has_ticker && table.columns.iter().any(|c| c == RAW_TICKER_DUP) {
        remove_column(table, RAW_TICKER_DUP);
        debug!("redundant '{RAW_TICKER_DUP}' column dropped");
    }
}

/// Drop every column that is null (or absent) for all rows.
fn drop_empty_columns(table: &mut Table) {
    let empty: Vec<String> = table
        .columns
        .iter()
        .filter(|col| {
            table
                .rows
                .iter()
                .all(|row| row.get(col.as_str()).map_or(true, Value::is_null))
        })
        .cloned()
        .collect();

    if !empty.is_empty() {
        for col in &empty {
            remove_column(table, col);
        }
        debug!("{} all-null columns dropped", empty.len());
    }
}

fn drop_garbage_columns(table: &mut Table) {
    let found: Vec<&str> = GARBAGE_COLUMNS
        .iter()
        .copied()
        .filter(|col| table.columns.iter().any(|c| c == col))
        .collect();
    for col in &found {
        remove_column(table, col);
    }
    if !found.is_empty() {
        debug!("garbage columns {found:?} dropped");
    }
}

/// Split the run-timestamp column into a date-only column and a time-only
/// column, the time column registered directly after the date column.
fn split_run_timestamp(table: &mut Table) {
    let Some(pos) = table.columns.iter().position(|c| c == DATE_COL) else {
        warn!("column '{DATE_COL}' not found; skipping the date/time split");
        return;
    };

    for row in &mut table.rows {
        let parsed = match row.get(DATE_COL) {
            Some(Value::Text(raw)) => NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT).ok(),
            _ => None,
        };
        let (date, time) = match parsed {
            Some(ts) => (
                Value::Text(ts.format(DATE_OUTPUT_FORMAT).to_string()),
                Value::Text(ts.format("%H:%M:%S").to_string()),
            ),
            None => (Value::Null, Value::Null),
        };
        row.insert(DATE_COL.to_string(), date);
        row.insert(TIME_COL.to_string(), time);
    }

    if !table.columns.iter().any(|c| c == TIME_COL) {
        table.columns.insert(pos + 1, TIME_COL.to_string());
    }
    debug!("column '{DATE_COL}' split into '{DATE_COL}' and '{TIME_COL}'");
}

fn is_year_column(name: &str) -> bool {
    name.len() == 4
        && name.bytes().all(|b| b.is_ascii_digit())
        && (1900..=2100).contains(&name.parse::<u16>().unwrap_or(0))
}

/// Final column order: ticker, run date, run time, then the remaining
/// non-year columns in their existing order, then year columns sorted
/// ascending so multi-year metrics read chronologically.
fn order_columns(table: &mut Table) {
    let mut year_columns: Vec<String> = Vec::new();
    let mut other_columns: Vec<String> = Vec::new();
    for col in &table.columns {
        if is_year_column(col) {
            year_columns.push(col.clone());
        } else {
            other_columns.push(col.clone());
        }
    }
    year_columns.sort_by_key(|col| col.parse::<u16>().unwrap_or(0));

    let mut ordered = Vec::with_capacity(table.columns.len());
    for lead in [TICKER_COL, DATE_COL, TIME_COL] {
        if let Some(pos) = other_columns.iter().position(|c| c == lead) {
            ordered.push(other_columns.remove(pos));
        }
    }
    ordered.extend(other_columns);
    ordered.extend(year_columns);
    table.columns = ordered;
}

fn remove_column(table: &mut Table, name: &str) {
    table.columns.retain(|c| c != name);
    for row in &mut table.rows {
        row.shift_remove(name);
    }
}
