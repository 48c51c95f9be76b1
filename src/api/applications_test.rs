use super::*;
use time::macros::datetime;

#[test]
fn application_decodes_timestamp() {
    let raw = r#"{
        "id": 3, "user": 10, "project": 2, "event": 1, "direction": null,
        "specialization": null, "team": null, "message": "Хочу в команду",
        "dateTime": "2024-10-05T14:30:00+03:00"
    }"#;
    let app: Application = serde_json::from_str(raw).unwrap();
    assert_eq!(app.date_time, datetime!(2024-10-05 14:30:00 +03:00));
    assert_eq!(app.event, Some(1));
    assert_eq!(app.team, None);
}

#[test]
fn application_rejects_missing_timestamp() {
    let raw = r#"{"id": 3, "user": 10, "project": 2}"#;
    assert!(serde_json::from_str::<Application>(raw).is_err());
}

#[test]
fn application_serializes_rfc3339_under_wire_name() {
    let app = Application {
        id: 1,
        user: 2,
        project: 3,
        event: None,
        direction: None,
        specialization: None,
        team: None,
        message: None,
        date_time: datetime!(2024-01-02 03:04:05 UTC),
    };
    let body = serde_json::to_value(&app).unwrap();
    assert_eq!(body["dateTime"], "2024-01-02T03:04:05Z");
    assert!(body.get("date_time").is_none());
}

#[test]
fn application_paths_use_trailing_slash() {
    assert_eq!(Applications::item_path(8), "/api/application/8/");
    assert_eq!(Applications::create_path(), "/api/application/");
}
