use fundo_spider::fundamentus::clean::{
    clean_column_name, clean_numeric, is_special_metric, is_string_field, normalize_label,
};

#[test]
fn labels_differing_by_artifacts_normalize_identically() {
    assert_eq!(normalize_label("?Tipo"), "Tipo");
    assert_eq!(normalize_label("Tipo"), "Tipo");
    assert_eq!(normalize_label("Típo\u{a0}"), "Tipo");
    assert_eq!(normalize_label("  Tipo   "), "Tipo");
    assert_eq!(normalize_label("Tí\u{a0}po"), "Ti po");
}

#[test]
fn raw_site_labels_match_the_classification_lists() {
    // the classification lists hold pre-normalized forms of the labels
    // exactly as the site renders them
    for raw in ["Típo:", "Setor:", "Data últ cot:", "Últ balanço processado:"] {
        let label = normalize_label(&raw.replace(':', ""));
        assert!(is_string_field(&label), "'{label}' should be a string field");
    }
    for raw in ["Receita Líquida:", "EBIT:", "Rec Serviços:"] {
        let label = normalize_label(&raw.replace(':', ""));
        assert!(
            is_special_metric(&label),
            "'{label}' should be a special metric"
        );
    }
}

#[test]
fn column_names_are_machine_safe() {
    assert_eq!(clean_column_name("Data últ cot"), "data_ult_cot");
    assert_eq!(clean_column_name("Últ balanço processado"), "ult_balanco_processado");
    assert_eq!(clean_column_name("Div. Yield"), "div_yield");
    assert_eq!(clean_column_name("P/L"), "pl");
    assert_eq!(clean_column_name("Receita Liquida 12m"), "receita_liquida_12m");
    assert_eq!(clean_column_name("Marg. Líquida"), "marg_liquida");
    assert_eq!(clean_column_name("  -- weird -- name  "), "weird_name");
}

#[test]
fn clean_column_name_is_idempotent() {
    for input in [
        "Data últ cot",
        "Div. Yield",
        "P/L",
        "ticker",
        "2019",
        "Últ balanço processado",
        "  -- weird -- name  ",
    ] {
        let once = clean_column_name(input);
        assert_eq!(clean_column_name(&once), once, "not idempotent for '{input}'");
    }
}

#[test]
fn brazilian_locale_numbers_parse() {
    assert_eq!(clean_numeric("1.234,56"), Some(1234.56));
    assert_eq!(clean_numeric("12,3%"), Some(12.3));
    assert_eq!(clean_numeric("R$ 3,50"), Some(3.5));
    assert_eq!(clean_numeric("-1,5"), Some(-1.5));
    assert_eq!(clean_numeric("123"), Some(123.0));
    assert_eq!(clean_numeric("1.234"), Some(1234.0));
}

#[test]
fn placeholders_and_garbage_parse_to_none() {
    assert_eq!(clean_numeric("-"), None);
    assert_eq!(clean_numeric(""), None);
    assert_eq!(clean_numeric("ON NM"), None);
    assert_eq!(clean_numeric("31/12/2024"), None);
}
