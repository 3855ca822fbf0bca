use configuration::load_config;
use core_types::PricingStrategy;
use std::io::Write;
use std::path::Path;

fn write_toml(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn missing_file_yields_defaults() {
    let config = load_config(Some(Path::new("/definitely/not/here/nodeyield.toml"))).unwrap();
    assert_eq!(config.pricing.default_strategy, PricingStrategy::Conservative);
    assert_eq!(config.pricing.days_in_month, 30);
    assert_eq!(config.scoring.utilization, 0.4);
    assert_eq!(config.statement.delimiter_char(), ',');
    assert_eq!(config.statement.decimal_places, 2);
    assert_eq!(config.statement.currency, "USD");
}

#[test]
fn file_overrides_selected_fields() {
    let file = write_toml(
        r#"
[pricing]
default_strategy = "aggressive"

[statement]
delimiter = ";"
decimal_places = 4
currency = "EUR"
"#,
    );
    let config = load_config(Some(file.path())).unwrap();
    assert_eq!(config.pricing.default_strategy, PricingStrategy::Aggressive);
    assert_eq!(config.pricing.days_in_month, 30);
    assert_eq!(config.statement.delimiter_char(), ';');
    assert_eq!(config.statement.decimal_places, 4);
    assert_eq!(config.statement.currency, "EUR");
    assert!(config.statement.include_header);
}

#[test]
fn invalid_delimiter_is_rejected() {
    let file = write_toml("[statement]\ndelimiter = \"::\"\n");
    let err = load_config(Some(file.path())).unwrap_err();
    assert!(err.to_string().contains("statement.delimiter"));
}

#[test]
fn out_of_range_days_are_rejected() {
    let file = write_toml("[pricing]\ndays_in_month = 0\n");
    assert!(load_config(Some(file.path())).is_err());
}
