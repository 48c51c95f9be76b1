use super::*;

// =============================================================================
// join_url
// =============================================================================

#[test]
fn join_url_inserts_single_slash() {
    assert_eq!(join_url("http://h", "api/events/"), "http://h/api/events/");
    assert_eq!(join_url("http://h/", "/api/events/"), "http://h/api/events/");
    assert_eq!(join_url("http://h//", "//api"), "http://h/api");
}

// =============================================================================
// csrf_from_cookie_header
// =============================================================================

#[test]
fn csrf_found_among_other_cookies() {
    assert_eq!(csrf_from_cookie_header("sessionid=s1; csrftoken=abc123"), Some("abc123".to_owned()));
}

#[test]
fn csrf_missing_returns_none() {
    assert_eq!(csrf_from_cookie_header("sessionid=s1"), None);
}

#[test]
fn csrf_empty_value_returns_none() {
    assert_eq!(csrf_from_cookie_header("csrftoken="), None);
}

#[test]
fn csrf_ignores_cookie_with_longer_name() {
    assert_eq!(csrf_from_cookie_header("csrftokenx=nope"), None);
}

// =============================================================================
// ApiResponse
// =============================================================================

#[test]
fn success_range_is_2xx() {
    assert!(ApiResponse::new(200, "").is_success());
    assert!(ApiResponse::new(204, "").is_success());
    assert!(!ApiResponse::new(301, "").is_success());
    assert!(!ApiResponse::new(404, "").is_success());
}

#[test]
fn auth_failure_is_401_or_403() {
    assert!(ApiResponse::new(401, "").is_auth_failure());
    assert!(ApiResponse::new(403, "").is_auth_failure());
    assert!(!ApiResponse::new(400, "").is_auth_failure());
    assert!(!ApiResponse::new(404, "").is_auth_failure());
}

#[test]
fn json_empty_body_decodes_as_unit() {
    let resp = ApiResponse::new(204, "");
    resp.json::<()>().unwrap();
}

#[test]
fn json_mismatch_is_decode_error() {
    let resp = ApiResponse::new(200, "{\"access\": 5}");
    #[derive(Debug, serde::Deserialize)]
    #[allow(dead_code)]
    struct Access {
        access: String,
    }
    let err = resp.json::<Access>().unwrap_err();
    assert!(matches!(err, RequestError::Decode(_)));
}

// =============================================================================
// HttpTransport::new
// =============================================================================

#[test]
fn new_trims_trailing_slash() {
    let t = HttpTransport::new("http://127.0.0.1:8000/", Timeouts { request_secs: 5, connect_secs: 5 }).unwrap();
    assert_eq!(t.base_url(), "http://127.0.0.1:8000");
}

#[test]
fn new_rejects_invalid_base_url() {
    let err = HttpTransport::new("not a url", Timeouts { request_secs: 5, connect_secs: 5 })
        .err()
        .unwrap();
    assert!(matches!(err, TransportError::ClientBuild(_)));
}

#[test]
fn fresh_jar_has_no_csrf_token() {
    let t = HttpTransport::new("http://127.0.0.1:8000", Timeouts { request_secs: 5, connect_secs: 5 }).unwrap();
    assert!(t.csrf_token().is_none());
}
