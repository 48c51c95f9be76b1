//! List response envelopes.
//!
//! Collection endpoints answer either with a bare JSON array or with the
//! paginator envelope `{count, next, previous, results}`. Entity modules
//! decode into [`ListPayload`] and unwrap; the request client never looks
//! inside bodies.

#[cfg(test)]
#[path = "envelope_test.rs"]
mod envelope_test;

use serde::{Deserialize, Serialize};

/// One page of a paginated collection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<T>,
}

/// Either shape a collection endpoint may return.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ListPayload<T> {
    Paged(Page<T>),
    Bare(Vec<T>),
}

impl<T> ListPayload<T> {
    /// Items on this page, dropping pagination metadata.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        match self {
            Self::Paged(page) => page.results,
            Self::Bare(items) => items,
        }
    }

    /// Server-side total when paged, otherwise the number of items returned.
    #[must_use]
    pub fn total(&self) -> u64 {
        match self {
            Self::Paged(page) => page.count,
            Self::Bare(items) => items.len() as u64,
        }
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        matches!(self, Self::Paged(Page { next: Some(_), .. }))
    }
}
