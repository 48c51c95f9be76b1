//! Application statuses (`status_app`), configurable per deployment.

use serde::{Deserialize, Serialize};

use super::{Endpoint, Resource};
use crate::net::ApiClient;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StatusApp {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

pub struct Statuses;

impl Resource for Statuses {
    type Item = StatusApp;
    const NAME: &'static str = "statuses";
    const COLLECTION: &'static str = "/api/status_app/";
}

#[must_use]
pub fn endpoint(client: &ApiClient) -> Endpoint<Statuses> {
    Endpoint::new(client.clone())
}
