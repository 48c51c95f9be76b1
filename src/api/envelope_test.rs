use super::*;

#[derive(Clone, Debug, PartialEq, Deserialize)]
struct Item {
    id: i64,
}

#[test]
fn bare_array_decodes() {
    let payload: ListPayload<Item> = serde_json::from_str(r#"[{"id": 1}, {"id": 2}]"#).unwrap();
    assert_eq!(payload.total(), 2);
    assert!(!payload.has_next());
    assert_eq!(payload.into_items(), vec![Item { id: 1 }, Item { id: 2 }]);
}

#[test]
fn paged_envelope_decodes() {
    let raw = r#"{"count": 41, "next": "http://h/api/events/?page=2", "previous": null, "results": [{"id": 5}]}"#;
    let payload: ListPayload<Item> = serde_json::from_str(raw).unwrap();
    assert_eq!(payload.total(), 41);
    assert!(payload.has_next());
    assert_eq!(payload.into_items(), vec![Item { id: 5 }]);
}

#[test]
fn envelope_with_only_results_decodes() {
    let payload: ListPayload<Item> = serde_json::from_str(r#"{"results": []}"#).unwrap();
    assert_eq!(payload.total(), 0);
    assert!(payload.into_items().is_empty());
}

#[test]
fn object_without_results_is_rejected() {
    assert!(serde_json::from_str::<ListPayload<Item>>(r#"{"detail": "nope"}"#).is_err());
}
