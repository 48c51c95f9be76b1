//! Projects within a direction.

use serde::{Deserialize, Serialize};

use super::{Endpoint, Resource};
use crate::net::ApiClient;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub direction: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub supervisor: Option<i64>,
    #[serde(default)]
    pub curators: Vec<i64>,
    #[serde(default)]
    pub author: Option<i64>,
}

pub struct Projects;

impl Resource for Projects {
    type Item = Project;
    const NAME: &'static str = "projects";
    const COLLECTION: &'static str = "/api/project/";

    fn item_path(id: i64) -> String {
        format!("/api/project/{id}")
    }

    fn create_path() -> String {
        "/api/project/create".to_owned()
    }
}

#[must_use]
pub fn endpoint(client: &ApiClient) -> Endpoint<Projects> {
    Endpoint::new(client.clone())
}
