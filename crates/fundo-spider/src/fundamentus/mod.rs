mod sql;

pub mod common;

/// Text and number normalisation: field labels, column identifiers, and the
/// Brazilian-locale numeric format.
pub mod clean;

/// Per-company detail pages (`detalhes.php?papel=`); label cells paired with
/// one or two adjacent data cells.
pub mod detail;

/// The full ticker universe from the results listing (`resultado.php`).
pub mod universe;

/// Concurrent fan-out of the detail scraper over the whole universe.
pub mod harvest;

/// Column reconciliation and ordering of the harvested records.
pub mod table;

/// Timestamp-named CSV dump of the reconciled table.
pub mod export;

/// Destructive-replace load into Postgres, plus the post-load procedure.
pub mod load;

/// Root of the source website.
pub const BASE_URL: &str = "http://www.fundamentus.com.br/";
