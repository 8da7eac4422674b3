use fundo_spider::fundamentus::common::{Record, Value};
use fundo_spider::fundamentus::table::{reconcile, DATE_COL, TICKER_COL, TIME_COL};

fn record(fields: &[(&str, Value)]) -> Record {
    fields
        .iter()
        .map(|(key, value)| (key.to_string(), value.clone()))
        .collect()
}

const RUN_STAMP: &str = "2026-08-28 09:30:00";

#[test]
fn final_column_order_leads_with_keys_and_ends_with_sorted_years() {
    let rows = vec![record(&[
        ("ticker", Value::Text("PETR4".into())),
        ("setor", Value::Text("Petróleo".into())),
        ("2019", Value::Num(1.0)),
        ("data_execucao", Value::Text(RUN_STAMP.into())),
        ("hora_execucao", Value::Text("ignored".into())),
        ("2021", Value::Num(3.0)),
        ("empresa", Value::Text("Petrobras".into())),
        ("2020", Value::Num(2.0)),
    ])];

    let table = reconcile(rows);
    assert_eq!(
        table.columns,
        vec![
            "ticker",
            "data_execucao",
            "hora_execucao",
            "setor",
            "empresa",
            "2019",
            "2020",
            "2021",
        ]
    );
}

#[test]
fn reconciled_columns_are_the_union_of_observed_fields() {
    let rows = vec![
        record(&[
            ("Ticker", Value::Text("AAAA3".into())),
            ("P/L", Value::Num(8.5)),
            ("Vazio", Value::Null),
        ]),
        record(&[
            ("Ticker", Value::Text("BBBB4".into())),
            ("ROE", Value::Num(0.15)),
            ("Vazio", Value::Null),
        ]),
    ];

    let table = reconcile(rows);

    // union minus the all-null column
    assert_eq!(table.columns, vec!["ticker", "pl", "roe"]);

    // every row exposes every surviving column, nulled where absent
    assert_eq!(table.value_at(0, "pl"), &Value::Num(8.5));
    assert_eq!(table.value_at(0, "roe"), &Value::Null);
    assert_eq!(table.value_at(1, "pl"), &Value::Null);
    assert_eq!(table.value_at(1, "roe"), &Value::Num(0.15));
}

#[test]
fn date_columns_reformat_and_invalid_dates_become_null() {
    let rows = vec![
        record(&[
            ("Ticker", Value::Text("AAAA3".into())),
            ("Data ult cot", Value::Text("15/03/2023".into())),
        ]),
        record(&[
            ("Ticker", Value::Text("BBBB4".into())),
            // not a real calendar date
            ("Data ult cot", Value::Text("31/02/2023".into())),
        ]),
        record(&[
            ("Ticker", Value::Text("CCCC5".into())),
            ("Data ult cot", Value::Text("-".into())),
        ]),
    ];

    let table = reconcile(rows);
    assert_eq!(
        table.value_at(0, "data_ult_cot"),
        &Value::Text("2023-03-15".into())
    );
    assert_eq!(table.value_at(1, "data_ult_cot"), &Value::Null);
    assert_eq!(table.value_at(2, "data_ult_cot"), &Value::Null);
}

#[test]
fn run_timestamp_splits_into_date_and_time() {
    let rows = vec![record(&[
        ("Ticker", Value::Text("AAAA3".into())),
        ("Data_Execucao", Value::Text(RUN_STAMP.into())),
    ])];

    let table = reconcile(rows);
    assert_eq!(table.columns, vec![TICKER_COL, DATE_COL, TIME_COL]);
    assert_eq!(
        table.value_at(0, DATE_COL),
        &Value::Text("2026-08-28".into())
    );
    assert_eq!(table.value_at(0, TIME_COL), &Value::Text("09:30:00".into()));
}

#[test]
fn redundant_and_garbage_columns_are_dropped() {
    let rows = vec![record(&[
        ("Ticker", Value::Text("AAAA3".into())),
        ("Papel", Value::Text("AAAA3".into())),
        ("1", Value::Num(1.0)),
        ("4", Value::Num(4.0)),
        ("P/L", Value::Num(8.5)),
    ])];

    let table = reconcile(rows);
    assert_eq!(table.columns, vec!["ticker", "pl"]);
}

#[test]
fn empty_record_set_reconciles_to_an_empty_table() {
    let table = reconcile(Vec::new());
    assert!(table.is_empty());
    assert!(table.columns.is_empty());
}
