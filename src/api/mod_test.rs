use super::*;
use crate::auth::credentials::{Credentials, MemoryCredentialStore};
use crate::net::mock::{ScriptedTransport, ok, status};
use reqwest::Method;
use serde_json::json;
use std::sync::Arc;
use teams::{Team, Teams};

fn endpoint_with(
    responses: Vec<Result<crate::net::ApiResponse, crate::net::TransportError>>,
) -> (Arc<ScriptedTransport>, Endpoint<Teams>) {
    let transport = ScriptedTransport::new(responses);
    let store = Arc::new(MemoryCredentialStore::with_credentials(Credentials::new("a", "r")));
    (transport.clone(), Endpoint::new(ApiClient::new(transport, store)))
}

fn team(id: i64, name: &str) -> Team {
    Team { id: Some(id), name: name.into(), project: Some(1), students: vec![] }
}

#[tokio::test]
async fn list_accepts_bare_array() {
    let (transport, teams) = endpoint_with(vec![ok(r#"[{"id": 1, "name": "Alpha", "project": 1, "students": []}]"#)]);
    assert_eq!(teams.list().await.unwrap(), vec![team(1, "Alpha")]);
    assert_eq!(transport.sent()[0].path, "/api/teams/");
    assert_eq!(transport.sent()[0].method, Method::GET);
}

#[tokio::test]
async fn list_unwraps_paged_envelope() {
    let body = r#"{"count": 12, "next": null, "previous": null,
                   "results": [{"id": 2, "name": "Beta", "project": 1, "students": []}]}"#;
    let (_, teams) = endpoint_with(vec![ok(body)]);
    assert_eq!(teams.list().await.unwrap(), vec![team(2, "Beta")]);
}

#[tokio::test]
async fn list_page_forwards_query() {
    let (transport, teams) = endpoint_with(vec![ok("[]")]);
    teams
        .list_page(vec![("project".into(), "4".into())])
        .await
        .unwrap();
    assert_eq!(transport.sent()[0].query, vec![("project".to_owned(), "4".to_owned())]);
}

#[tokio::test]
async fn get_uses_item_path() {
    let (transport, teams) = endpoint_with(vec![ok(r#"{"id": 3, "name": "Gamma", "project": 1, "students": []}"#)]);
    assert_eq!(teams.get(3).await.unwrap(), team(3, "Gamma"));
    assert_eq!(transport.sent()[0].path, Teams::item_path(3));
}

#[tokio::test]
async fn create_posts_serialized_item() {
    let (transport, teams) = endpoint_with(vec![ok(r#"{"id": 4, "name": "Delta", "project": 1, "students": []}"#)]);
    let draft = Team { id: None, name: "Delta".into(), project: Some(1), students: vec![] };
    teams.create(&draft).await.unwrap();

    let sent = &transport.sent()[0];
    assert_eq!(sent.method, Method::POST);
    assert_eq!(sent.path, Teams::create_path());
    assert_eq!(sent.body.as_ref().and_then(|b| b.get("name")), Some(&json!("Delta")));
}

#[tokio::test]
async fn partial_update_patches_item() {
    let (transport, teams) = endpoint_with(vec![ok(r#"{"id": 5, "name": "Renamed", "project": 1, "students": []}"#)]);
    let updated = teams
        .partial_update(5, &json!({ "name": "Renamed" }))
        .await
        .unwrap();
    assert_eq!(updated.name, "Renamed");
    let sent = &transport.sent()[0];
    assert_eq!(sent.method, Method::PATCH);
    assert_eq!(sent.body, Some(json!({ "name": "Renamed" })));
}

#[tokio::test]
async fn update_puts_full_item() {
    let (transport, teams) = endpoint_with(vec![ok(r#"{"id": 6, "name": "Six", "project": 1, "students": []}"#)]);
    teams.update(6, &team(6, "Six")).await.unwrap();
    assert_eq!(transport.sent()[0].method, Method::PUT);
}

#[tokio::test]
async fn delete_accepts_empty_body() {
    let (transport, teams) = endpoint_with(vec![Ok(crate::net::ApiResponse::new(204, ""))]);
    teams.delete(7).await.unwrap();
    assert_eq!(transport.sent()[0].method, Method::DELETE);
    assert_eq!(transport.sent()[0].path, Teams::delete_path(7));
}

#[tokio::test]
async fn decode_failure_is_reported() {
    let (_, teams) = endpoint_with(vec![ok(r#"{"unexpected": true}"#)]);
    assert!(matches!(teams.get(1).await, Err(RequestError::Decode(_))));
}

#[tokio::test]
async fn http_errors_pass_through() {
    let (_, teams) = endpoint_with(vec![status(404)]);
    assert!(matches!(teams.get(1).await, Err(RequestError::Http { status: 404, .. })));
}
