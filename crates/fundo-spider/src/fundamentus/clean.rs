//! Pure normalisation functions and the fixed field classification lists.
//!
//! Two labels that normalise identically are the same logical field; the
//! canonical form is the join key used when merging records across companies.

/// Fields that stay textual and are never numeric-converted.
///
/// These are the normalised forms of the raw site labels ("Típo:",
/// "Últ balanço processado:", ...) with the trailing colon removed.
pub static STRING_FIELDS: &[&str] = &[
    "Tipo",
    "Empresa",
    "Setor",
    "Subsetor",
    "Data ult cot",
    "Ult balanco processado",
];

/// Metrics that carry two values per company (trailing 12 months and
/// trailing 3 months) under a single label.
pub static SPECIAL_METRICS: &[&str] = &[
    "Receita Liquida",
    "EBIT",
    "Lucro Liquido",
    "Result Int Financ",
    "Rec Servicos",
];

/// Cleaned column names that hold calendar dates, kept as raw text during
/// scraping and parsed by the reconciliation step.
pub static DATE_COLUMNS: &[&str] = &["data_ult_cot", "ult_balanco_processado"];

pub fn is_string_field(label: &str) -> bool {
    STRING_FIELDS.contains(&label)
}

pub fn is_special_metric(label: &str) -> bool {
    SPECIAL_METRICS.contains(&label)
}

pub fn is_date_column(column: &str) -> bool {
    DATE_COLUMNS.contains(&column)
}

/// Fold one Latin-1 letter to its ASCII base, covering every accented
/// character Fundamentus emits; NBSP becomes an ordinary space and any other
/// non-ASCII character is dropped.
fn fold_ascii(c: char) -> Option<char> {
    let folded = match c {
        'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
        'Á' | 'À' | 'Â' | 'Ã' | 'Ä' => 'A',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'É' | 'È' | 'Ê' | 'Ë' => 'E',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'Í' | 'Ì' | 'Î' | 'Ï' => 'I',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
        'Ó' | 'Ò' | 'Ô' | 'Õ' | 'Ö' => 'O',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'Ú' | 'Ù' | 'Û' | 'Ü' => 'U',
        'ç' => 'c',
        'Ç' => 'C',
        'ñ' => 'n',
        'Ñ' => 'N',
        '\u{a0}' => ' ',
        _ if c.is_ascii() => c,
        _ => return None,
    };
    Some(folded)
}

/// Normalise a raw field label to its canonical form: strip one leading `?`
/// artifact, fold accents away, and collapse runs of whitespace.
///
/// Total over all input; an unrecognisable label just comes out empty.
pub fn normalize_label(raw: &str) -> String {
    let raw = raw.strip_prefix('?').unwrap_or(raw);
    let folded: String = raw.chars().filter_map(fold_ascii).collect();
    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Turn any label into a machine-safe column identifier: accents folded,
/// spaces and hyphens to underscores, everything outside `[a-z0-9_]`
/// dropped, repeated underscores collapsed, lowercased. Idempotent.
pub fn clean_column_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last_underscore = false;
    for c in name.chars().filter_map(fold_ascii) {
        match c {
            ' ' | '-' | '_' => {
                if !last_underscore && !out.is_empty() {
                    out.push('_');
                    last_underscore = true;
                }
            }
            c if c.is_ascii_alphanumeric() => {
                out.push(c.to_ascii_lowercase());
                last_underscore = false;
            }
            _ => {}
        }
    }
    while out.ends_with('_') {
        out.pop();
    }
    out
}

/// Parse a raw numeric token in the Brazilian locale: `R$` and `%` markers
/// stripped, `.` thousands separators removed, `,` decimal comma swapped for
/// a point. `"1.234,56"` parses to `1234.56`.
///
/// Absent or malformed values (`"-"` is the site's placeholder) are `None`,
/// never an error.
pub fn clean_numeric(raw: &str) -> Option<f64> {
    let cleaned = raw
        .replace("R$", "")
        .replace('%', "")
        .replace('.', "")
        .replace(',', ".");
    cleaned.trim().parse::<f64>().ok()
}
