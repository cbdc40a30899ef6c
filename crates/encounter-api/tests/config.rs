use std::collections::HashMap;
use std::path::PathBuf;

use encounter_api::config::{ApiConfig, CatalogLocation, load_pricing_config, parse_pricing_config};
use encounter_core::models::code::{Code, CodeId};
use encounter_core::models::modifier::{Modifier, ModifierId, ModifierType};
use encounter_pricing::PriceRule;
use rust_decimal_macros::dec;

fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn catalog_is_required() {
    assert!(ApiConfig::from_vars(vars(&[])).is_err());
}

#[test]
fn file_catalog_wins_over_url() {
    let config = ApiConfig::from_vars(vars(&[
        ("ENCOUNTER_CATALOG_PATH", "/srv/codes.json"),
        ("ENCOUNTER_CATALOG_URL", "http://catalog.internal"),
    ]))
    .unwrap();

    assert_eq!(config.catalog, CatalogLocation::File(PathBuf::from("/srv/codes.json")));
    assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
    assert!(config.pricing_config.is_none());
    assert_eq!(config.max_sessions, 10_000);
}

#[test]
fn session_limit_is_configurable() {
    let config = ApiConfig::from_vars(vars(&[
        ("ENCOUNTER_CATALOG_URL", "http://catalog.internal"),
        ("ENCOUNTER_MAX_SESSIONS", "250"),
    ]))
    .unwrap();
    assert_eq!(config.max_sessions, 250);

    for bad in ["0", "-1", "lots"] {
        let result = ApiConfig::from_vars(vars(&[
            ("ENCOUNTER_CATALOG_URL", "http://catalog.internal"),
            ("ENCOUNTER_MAX_SESSIONS", bad),
        ]));
        assert!(result.is_err(), "{bad} should be rejected");
    }
}

#[test]
fn blank_values_are_treated_as_unset() {
    let config = ApiConfig::from_vars(vars(&[
        ("ENCOUNTER_CATALOG_PATH", "  "),
        ("ENCOUNTER_CATALOG_URL", "http://catalog.internal"),
        ("ENCOUNTER_BIND_ADDR", "0.0.0.0:9000"),
    ]))
    .unwrap();

    assert_eq!(config.catalog, CatalogLocation::Url("http://catalog.internal".to_string()));
    assert_eq!(config.bind_addr.port(), 9000);
}

#[test]
fn bad_bind_addr_is_rejected() {
    let result = ApiConfig::from_vars(vars(&[
        ("ENCOUNTER_CATALOG_URL", "http://catalog.internal"),
        ("ENCOUNTER_BIND_ADDR", "not-an-addr"),
    ]));
    assert!(result.is_err());
}

#[test]
fn unversioned_config_is_migrated() {
    let config = parse_pricing_config(r#"{ "rules": { "PCT": "percentage" } }"#).unwrap();

    assert_eq!(config.config_version, 1);
    assert_eq!(config.fallback, PriceRule::Additive);
    assert_eq!(config.rules.get("PCT"), Some(&PriceRule::Percentage));
    assert_eq!(config.floor, None);
}

#[test]
fn newer_config_version_is_rejected() {
    assert!(parse_pricing_config(r#"{ "config_version": 99 }"#).is_err());
}

#[test]
fn config_builds_pricer_with_floor() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pricing.json");
    std::fs::write(
        &path,
        r#"{ "config_version": 1, "rules": { "MULT": "multiplier" }, "fallback": "override", "floor": "0" }"#,
    )
    .unwrap();

    let pricer = load_pricing_config(&path).unwrap().into_pricer();
    assert_eq!(pricer.floor(), Some(dec!(0)));

    let code = Code {
        id: CodeId(1),
        code: "X".to_string(),
        description: "x".to_string(),
        amount: dec!(10),
        start_date: None,
        end_date: None,
        modifiers: vec![],
    };
    let modifier = |id, amount, tag: &str| Modifier {
        id: ModifierId(id),
        amount,
        modifier_type: ModifierType::new(tag),
        modifier_code: tag.to_string(),
        start_date: None,
        end_date: None,
    };

    assert_eq!(pricer.compute_price(&code, &[modifier(1, dec!(3), "MULT")]), dec!(30));
    assert_eq!(pricer.compute_price(&code, &[modifier(2, dec!(-5), "OTHER")]), dec!(0));
    assert_eq!(pricer.compute_price(&code, &[modifier(3, dec!(7), "OTHER")]), dec!(7));
}
