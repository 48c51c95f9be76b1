//! Events: the top-level programs that directions and projects hang off.

#[cfg(test)]
#[path = "events_test.rs"]
mod events_test;

use serde::{Deserialize, Serialize};
use time::Date;

use super::dates::flexible_date;
use super::{Endpoint, Resource};
use crate::net::ApiClient;

/// An event as served by `/api/events/`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "event_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub specializations: Vec<i64>,
    #[serde(default)]
    pub statuses: Vec<i64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default, with = "flexible_date")]
    pub start: Option<Date>,
    #[serde(default, with = "flexible_date")]
    pub end: Option<Date>,
    #[serde(default)]
    pub supervisor: Option<i64>,
    #[serde(default)]
    pub creator: Option<i64>,
    #[serde(default)]
    pub stage: Option<String>,
}

pub struct Events;

impl Resource for Events {
    type Item = Event;
    const NAME: &'static str = "events";
    const COLLECTION: &'static str = "/api/events/";

    fn item_path(id: i64) -> String {
        format!("/api/events/{id}")
    }

    fn create_path() -> String {
        "/api/events/create/".to_owned()
    }

    fn delete_path(id: i64) -> String {
        format!("/api/events/delete/{id}")
    }
}

#[must_use]
pub fn endpoint(client: &ApiClient) -> Endpoint<Events> {
    Endpoint::new(client.clone())
}
