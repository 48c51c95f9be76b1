//! Teams of students attached to a project.

use serde::{Deserialize, Serialize};

use super::{Endpoint, Resource};
use crate::net::ApiClient;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Team {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub project: Option<i64>,
    #[serde(default)]
    pub students: Vec<i64>,
}

pub struct Teams;

impl Resource for Teams {
    type Item = Team;
    const NAME: &'static str = "teams";
    const COLLECTION: &'static str = "/api/teams/";

    fn item_path(id: i64) -> String {
        format!("/api/teams/{id}")
    }

    fn create_path() -> String {
        "/api/teams/create".to_owned()
    }
}

#[must_use]
pub fn endpoint(client: &ApiClient) -> Endpoint<Teams> {
    Endpoint::new(client.clone())
}
