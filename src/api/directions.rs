//! Directions: tracks inside an event, each with its own leader.

use serde::{Deserialize, Serialize};

use super::{Endpoint, Resource};
use crate::net::ApiClient;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Direction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub event: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub leader_id: Option<i64>,
}

pub struct Directions;

impl Resource for Directions {
    type Item = Direction;
    const NAME: &'static str = "directions";
    const COLLECTION: &'static str = "/api/direction/";
}

#[must_use]
pub fn endpoint(client: &ApiClient) -> Endpoint<Directions> {
    Endpoint::new(client.clone())
}
