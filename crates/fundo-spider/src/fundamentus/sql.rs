//! Statement builders for the load target. Column names are quoted so the
//! numeric year columns ("2019", "2020", ...) stay valid identifiers.

/// Destructive-replace target table for each run's snapshot.
pub static LOAD_TABLE: &str = "carga_fundamentus";

/// Post-load procedure that folds the snapshot into the history table.
pub static HISTORY_PROCEDURE: &str = "carga_fundamentus_historico";

pub(crate) fn delete_all(table: &str) -> String {
    format!("DELETE FROM {table}")
}

pub(crate) fn insert_row(table: &str, columns: &[String]) -> String {
    let cols = columns
        .iter()
        .map(|col| format!("\"{col}\""))
        .collect::<Vec<_>>()
        .join(", ");
    let params = (1..=columns.len())
        .map(|i| format!("${i}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!("INSERT INTO {table} ({cols}) VALUES ({params})")
}

pub(crate) fn call_procedure(name: &str) -> String {
    format!("CALL {name}()")
}
