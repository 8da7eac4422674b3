use super::sql;
use super::table::Table;
use crate::http::PgClient;
use tokio_postgres::types::ToSql;
use tracing::{debug, error, info, warn};

pub use super::sql::{HISTORY_PROCEDURE, LOAD_TABLE};

/// Replace the contents of `table_name` with the reconciled run snapshot.
///
/// The delete and every insert run inside one transaction; any failure rolls
/// the whole load back and propagates so the scheduler marks the run failed.
/// An empty table is a warning and a no-op.
pub async fn load(pg_client: &mut PgClient, table: &Table, table_name: &str) -> anyhow::Result<()> {
    if table.is_empty() {
        warn!("empty table; nothing to load into '{table_name}'");
        return Ok(());
    }

    let time = std::time::Instant::now();
    let transaction = pg_client.transaction().await?;

    info!("clearing existing rows from '{table_name}' ...");
    let deleted = transaction
        .execute(sql::delete_all(table_name).as_str(), &[])
        .await
        .map_err(|err| {
            error!("failed to clear '{table_name}', error({err})");
            err
        })?;
    debug!("{deleted} rows deleted from '{table_name}'");

    info!(
        "inserting {} rows into '{table_name}' ...",
        table.rows.len()
    );
    let statement = transaction
        .prepare(&sql::insert_row(table_name, &table.columns))
        .await
        .map_err(|err| {
            error!("failed to prepare the insert for '{table_name}', error({err})");
            err
        })?;

    for idx in 0..table.rows.len() {
        let params: Vec<&(dyn ToSql + Sync)> = table
            .columns
            .iter()
            .map(|col| table.value_at(idx, col) as &(dyn ToSql + Sync))
            .collect();
        transaction
            .execute(&statement, &params)
            .await
            .map_err(|err| {
                error!("failed to insert row {idx} into '{table_name}', error({err})");
                err
            })?;
    }

    transaction.commit().await.map_err(|err| {
        error!("failed to commit the '{table_name}' load, error({err})");
        err
    })?;
    info!("'{table_name}' load committed. {}", crate::time_elapsed(time));

    Ok(())
}

/// Invoke a stored procedure against the load target; run after a successful
/// load to fold the snapshot into history.
pub async fn call_procedure(pg_client: &PgClient, name: &str) -> anyhow::Result<()> {
    info!("executing procedure '{name}' ...");
    pg_client
        .execute(sql::call_procedure(name).as_str(), &[])
        .await
        .map_err(|err| {
            error!("failed to execute procedure '{name}', error({err})");
            err
        })?;
    info!("procedure '{name}' finished");
    Ok(())
}
