//! User profiles.
//!
//! Profiles are listed from `/api/profile/` but addressed individually under
//! `/api/users/<id>/`. The backend offers no create or delete for users, so
//! those calls are refused locally; accounts come from registration in
//! `api::auth`.

#[cfg(test)]
#[path = "users_test.rs"]
mod users_test;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use super::{Endpoint, Resource};
use crate::net::ApiClient;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub telegram: String,
    #[serde(default)]
    pub email: String,
    pub name: String,
    pub surname: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patronymic: Option<String>,
    #[serde(default, deserialize_with = "deserialize_course")]
    pub course: Option<String>,
    #[serde(default)]
    pub university: String,
}

impl User {
    /// "Surname Name Patronymic", skipping empty parts.
    #[must_use]
    pub fn full_name(&self) -> String {
        [Some(self.surname.as_str()), Some(self.name.as_str()), self.patronymic.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Course arrives as a string on profiles and as a number on task payloads.
fn deserialize_course<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => Ok(None),
        serde_json::Value::String(text) => Ok(Some(text)),
        serde_json::Value::Number(number) => Ok(Some(number.to_string())),
        _ => Err(D::Error::custom("expected course as string or number")),
    }
}

pub struct Users;

impl Resource for Users {
    type Item = User;
    const NAME: &'static str = "users";
    const COLLECTION: &'static str = "/api/profile/";
    const CREATABLE: bool = false;
    const DELETABLE: bool = false;

    fn item_path(id: i64) -> String {
        format!("/api/users/{id}/")
    }
}

#[must_use]
pub fn endpoint(client: &ApiClient) -> Endpoint<Users> {
    Endpoint::new(client.clone())
}
