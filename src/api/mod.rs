//! Typed entity endpoints over the authenticated client.
//!
//! DESIGN
//! ======
//! Each entity module declares its payload type and paths by implementing
//! [`Resource`]; [`Endpoint`] supplies the CRUD calls once for all of them.
//! Paths follow the backend as deployed, which is not uniform (some item
//! routes lack a trailing slash, some collections create under `create/`),
//! so every path is overridable per resource.

#[cfg(test)]
#[path = "mod_test.rs"]
mod mod_test;

pub mod applications;
pub mod auth;
pub mod dates;
pub mod directions;
pub mod envelope;
pub mod events;
pub mod projects;
pub mod specializations;
pub mod statuses;
pub mod tasks;
pub mod teams;
pub mod users;

use std::marker::PhantomData;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::net::{ApiClient, RequestDescriptor, RequestError};
use envelope::ListPayload;

/// An entity collection exposed by the backend.
pub trait Resource {
    type Item: Serialize + DeserializeOwned + Send + Sync;

    /// Human-readable name for logs and CLI output.
    const NAME: &'static str;

    /// Collection path, used for listing (e.g. `/api/events/`).
    const COLLECTION: &'static str;

    /// Whether the backend accepts creates and deletes for this collection.
    /// Refused calls fail before anything is sent.
    const CREATABLE: bool = true;
    const DELETABLE: bool = true;

    fn item_path(id: i64) -> String {
        format!("{}{id}/", Self::COLLECTION)
    }

    fn create_path() -> String {
        Self::COLLECTION.to_owned()
    }

    fn delete_path(id: i64) -> String {
        Self::item_path(id)
    }
}

/// CRUD calls for one resource.
pub struct Endpoint<R> {
    client: ApiClient,
    _resource: PhantomData<fn() -> R>,
}

impl<R> Clone for Endpoint<R> {
    fn clone(&self) -> Self {
        Self { client: self.client.clone(), _resource: PhantomData }
    }
}

impl<R: Resource> Endpoint<R> {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client, _resource: PhantomData }
    }

    #[must_use]
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Fetch the collection, unwrapping a paginator envelope if present.
    ///
    /// # Errors
    ///
    /// Any [`RequestError`] from the client or from decoding.
    pub async fn list(&self) -> Result<Vec<R::Item>, RequestError> {
        Ok(self.list_page(Vec::new()).await?.into_items())
    }

    /// Fetch one page of the collection with query parameters.
    ///
    /// # Errors
    ///
    /// Any [`RequestError`] from the client or from decoding.
    pub async fn list_page(&self, query: Vec<(String, String)>) -> Result<ListPayload<R::Item>, RequestError> {
        let request = RequestDescriptor::get(R::COLLECTION).with_query_pairs(query);
        self.client.fetch_json(&request).await
    }

    /// # Errors
    ///
    /// Any [`RequestError`] from the client or from decoding.
    pub async fn get(&self, id: i64) -> Result<R::Item, RequestError> {
        self.client
            .fetch_json(&RequestDescriptor::get(R::item_path(id)))
            .await
    }

    /// # Errors
    ///
    /// Any [`RequestError`] from the client or from decoding.
    pub async fn create(&self, item: &R::Item) -> Result<R::Item, RequestError> {
        if !R::CREATABLE {
            return Err(RequestError::InvalidRequest(format!("{} cannot be created", R::NAME)));
        }
        let request = RequestDescriptor::post(R::create_path()).with_json(item)?;
        self.client.fetch_json(&request).await
    }

    /// Full replacement (`PUT`).
    ///
    /// # Errors
    ///
    /// Any [`RequestError`] from the client or from decoding.
    pub async fn update(&self, id: i64, item: &R::Item) -> Result<R::Item, RequestError> {
        let request = RequestDescriptor::put(R::item_path(id)).with_json(item)?;
        self.client.fetch_json(&request).await
    }

    /// Partial update (`PATCH`) with any serializable subset of fields.
    ///
    /// # Errors
    ///
    /// Any [`RequestError`] from the client or from decoding.
    pub async fn partial_update<P: Serialize + Sync + ?Sized>(&self, id: i64, patch: &P) -> Result<R::Item, RequestError> {
        let request = RequestDescriptor::patch(R::item_path(id)).with_json(patch)?;
        self.client.fetch_json(&request).await
    }

    /// # Errors
    ///
    /// Any [`RequestError`] from the client.
    pub async fn delete(&self, id: i64) -> Result<(), RequestError> {
        if !R::DELETABLE {
            return Err(RequestError::InvalidRequest(format!("{} cannot be deleted", R::NAME)));
        }
        self.client
            .execute(&RequestDescriptor::delete(R::delete_path(id)))
            .await?;
        tracing::info!(resource = R::NAME, id, "deleted");
        Ok(())
    }
}
