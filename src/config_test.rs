use super::*;
use std::sync::{Mutex, MutexGuard, PoisonError};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Serializes env mutation across the tests in this module.
fn lock_env() -> MutexGuard<'static, ()> {
    let guard = ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    // Safety: every test touching MEETPOINT_* holds ENV_LOCK.
    unsafe {
        std::env::remove_var("MEETPOINT_BASE_URL");
        std::env::remove_var("MEETPOINT_CREDENTIALS_PATH");
        std::env::remove_var("MEETPOINT_REQUEST_TIMEOUT_SECS");
        std::env::remove_var("MEETPOINT_CONNECT_TIMEOUT_SECS");
        std::env::remove_var("MEETPOINT_REFRESH_POLICY");
    }
    guard
}

#[test]
fn from_env_defaults() {
    let _guard = lock_env();
    let cfg = ClientConfig::from_env().unwrap();
    assert_eq!(cfg, ClientConfig::default());
    assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
    assert_eq!(cfg.refresh_policy, RefreshPolicy::PerCall);
}

#[test]
fn from_env_parses_overrides() {
    let _guard = lock_env();
    unsafe {
        std::env::set_var("MEETPOINT_BASE_URL", "https://meet.example.test/ ");
        std::env::set_var("MEETPOINT_CREDENTIALS_PATH", "/tmp/mp.json");
        std::env::set_var("MEETPOINT_REQUEST_TIMEOUT_SECS", "42");
        std::env::set_var("MEETPOINT_CONNECT_TIMEOUT_SECS", "7");
        std::env::set_var("MEETPOINT_REFRESH_POLICY", "single_flight");
    }

    let cfg = ClientConfig::from_env().unwrap();
    assert_eq!(cfg.base_url, "https://meet.example.test");
    assert_eq!(cfg.credentials_path, PathBuf::from("/tmp/mp.json"));
    assert_eq!(cfg.timeouts, Timeouts { request_secs: 42, connect_secs: 7 });
    assert_eq!(cfg.refresh_policy, RefreshPolicy::SingleFlight);
}

#[test]
fn from_env_bad_timeout_falls_back() {
    let _guard = lock_env();
    unsafe { std::env::set_var("MEETPOINT_REQUEST_TIMEOUT_SECS", "soon") };
    let cfg = ClientConfig::from_env().unwrap();
    assert_eq!(cfg.timeouts.request_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
    unsafe { std::env::remove_var("MEETPOINT_REQUEST_TIMEOUT_SECS") };
}

#[test]
fn from_env_unknown_policy_errors() {
    let _guard = lock_env();
    unsafe { std::env::set_var("MEETPOINT_REFRESH_POLICY", "eager") };
    let err = ClientConfig::from_env().unwrap_err().to_string();
    assert!(err.contains("unknown MEETPOINT_REFRESH_POLICY"));
    unsafe { std::env::remove_var("MEETPOINT_REFRESH_POLICY") };
}

#[test]
fn cli_overrides_apply_only_when_present() {
    let cfg = ClientConfig::default()
        .with_base_url(Some("http://h:1/".to_owned()))
        .with_credentials_path(None);
    assert_eq!(cfg.base_url, "http://h:1");
    assert_eq!(cfg.credentials_path, PathBuf::from(DEFAULT_CREDENTIALS_PATH));

    let cfg = cfg.with_base_url(None).with_credentials_path(Some(PathBuf::from("c.json")));
    assert_eq!(cfg.base_url, "http://h:1");
    assert_eq!(cfg.credentials_path, PathBuf::from("c.json"));
}
