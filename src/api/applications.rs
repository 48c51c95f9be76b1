//! Applications ("requests") from users to join a project or team.

#[cfg(test)]
#[path = "applications_test.rs"]
mod applications_test;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::{Endpoint, Resource};
use crate::net::ApiClient;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub id: i64,
    pub user: i64,
    pub project: i64,
    #[serde(default)]
    pub event: Option<i64>,
    #[serde(default)]
    pub direction: Option<i64>,
    #[serde(default)]
    pub specialization: Option<i64>,
    #[serde(default)]
    pub team: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(rename = "dateTime", with = "time::serde::rfc3339")]
    pub date_time: OffsetDateTime,
}

pub struct Applications;

impl Resource for Applications {
    type Item = Application;
    const NAME: &'static str = "applications";
    const COLLECTION: &'static str = "/api/application/";
}

#[must_use]
pub fn endpoint(client: &ApiClient) -> Endpoint<Applications> {
    Endpoint::new(client.clone())
}
