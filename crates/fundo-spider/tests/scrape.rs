use fundo_spider::fundamentus::common::{Record, Value};
use fundo_spider::fundamentus::detail::parse_detail;
use fundo_spider::fundamentus::universe::parse_listing;

const DETAIL_PAGE: &str = r#"
<html><body>
<table>
<tr><td class="label">?Papel</td><td class="data">PETR4</td></tr>
<tr>
  <td class="label">Típo:</td><td class="data">PN</td>
  <td class="label">Data últ cot:</td><td class="data">28/08/2026</td>
</tr>
<tr><td class="label">Cotação:</td><td class="data">R$ 12,34</td></tr>
<tr><td class="label">Div. Yield:</td><td class="data">5,2%</td></tr>
<tr>
  <td class="label">Receita Líquida:</td>
  <td class="data">1.234,56</td><td class="data">321,09</td>
</tr>
<tr><td class="label">EBIT:</td><td class="data">99,9</td></tr>
<tr><td class="label">Marg. EBIT:</td><td class="data">-</td></tr>
</table>
</body></html>
"#;

#[test]
fn detail_rows_map_labels_to_raw_data_cells() {
    let mut record = Record::new();
    parse_detail(DETAIL_PAGE, &mut record, "PETR4");

    assert_eq!(record.get("Papel"), Some(&Value::Text("PETR4".into())));
    assert_eq!(record.get("Tipo"), Some(&Value::Text("PN".into())));
    assert_eq!(
        record.get("Data ult cot"),
        Some(&Value::Text("28/08/2026".into()))
    );
    assert_eq!(record.get("Cotacao"), Some(&Value::Text("R$ 12,34".into())));
    assert_eq!(record.get("Div. Yield"), Some(&Value::Text("5,2%".into())));
}

#[test]
fn special_metrics_expand_into_12m_and_3m_fields() {
    let mut record = Record::new();
    parse_detail(DETAIL_PAGE, &mut record, "PETR4");

    assert_eq!(
        record.get("Receita Liquida 12m"),
        Some(&Value::Text("1.234,56".into()))
    );
    assert_eq!(
        record.get("Receita Liquida 3m"),
        Some(&Value::Text("321,09".into()))
    );
    assert_eq!(record.get("Receita Liquida"), None);

    // a special-metric row with a single data cell is skipped, not an error
    assert_eq!(record.get("EBIT"), None);
    assert_eq!(record.get("EBIT 12m"), None);
}

const LISTING_PAGE: &str = r#"
<html><body>
<table class="resultado">
<tr><th>Papel</th><th>Cotação</th></tr>
<tr><td><a href="detalhes.php?papel=PETR4">PETR4</a></td><td>12,34</td></tr>
<tr><td><a href="detalhes.php?papel=VALE3">VALE3</a></td><td>56,78</td></tr>
<tr><td>SEM-LINK</td><td>0,00</td></tr>
</table>
</body></html>
"#;

#[test]
fn listing_yields_only_linked_first_cells() {
    let tickers = parse_listing(LISTING_PAGE);
    assert_eq!(tickers, vec!["PETR4", "VALE3"]);
}

#[test]
fn missing_results_table_yields_an_empty_universe() {
    assert!(parse_listing("<html><body><p>manutenção</p></body></html>").is_empty());
}
