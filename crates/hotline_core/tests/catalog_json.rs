use hotline_core::{Catalog, CatalogError, ServiceRecordValidationError};

const TWO_RECORDS: &str = r#"[
    {
        "id": "police",
        "name": "Police Helpline Number",
        "shortName": "Police",
        "number": "999",
        "category": "Police",
        "iconRef": "assets/police.png",
        "colorRef": "blue"
    },
    {
        "id": "ambulance",
        "name": "Ambulance Service",
        "shortName": "Ambulance",
        "number": "1994-999999",
        "category": "Health",
        "iconRef": "assets/ambulance.png",
        "colorRef": "red"
    }
]"#;

#[test]
fn parses_records_in_order() {
    let catalog = Catalog::from_json_str(TWO_RECORDS).unwrap();
    assert_eq!(catalog.len(), 2);
    let ids: Vec<&str> = catalog.records().iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["police", "ambulance"]);
    assert_eq!(catalog.get("ambulance").unwrap().short_name, "Ambulance");
}

#[test]
fn rejects_malformed_json() {
    let err = Catalog::from_json_str("[{").unwrap_err();
    assert!(matches!(err, CatalogError::Parse(_)));
}

#[test]
fn rejects_invalid_number_in_json() {
    let text = TWO_RECORDS.replace("1994-999999", "call us");
    let err = Catalog::from_json_str(&text).unwrap_err();
    assert!(matches!(
        err,
        CatalogError::InvalidRecord(ServiceRecordValidationError::InvalidNumber { .. })
    ));
}

#[test]
fn rejects_duplicate_ids_in_json() {
    let text = TWO_RECORDS.replace("\"ambulance\"", "\"police\"");
    let err = Catalog::from_json_str(&text).unwrap_err();
    assert!(matches!(err, CatalogError::DuplicateId(id) if id == "police"));
}

#[test]
fn builtin_category_filter_is_case_insensitive() {
    let catalog = Catalog::builtin();
    let health = catalog.by_category("health");
    assert_eq!(health.len(), 1);
    assert_eq!(health[0].id, "ambulance");
    assert!(catalog.by_category("unknown").is_empty());
}
