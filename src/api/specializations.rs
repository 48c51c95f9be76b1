//! Specializations: the roles a student applies for (designer, backend, ...).
//!
//! Events list the specializations they accept and applications name one, by
//! id in both cases.

#[cfg(test)]
#[path = "specializations_test.rs"]
mod specializations_test;

use serde::{Deserialize, Serialize};

use super::{Endpoint, Resource};
use crate::net::ApiClient;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Specialization {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

pub struct Specializations;

impl Resource for Specializations {
    type Item = Specialization;
    const NAME: &'static str = "specializations";
    const COLLECTION: &'static str = "/api/specialization/";

    fn create_path() -> String {
        "/api/specialization/create".to_owned()
    }
}

#[must_use]
pub fn endpoint(client: &ApiClient) -> Endpoint<Specializations> {
    Endpoint::new(client.clone())
}
