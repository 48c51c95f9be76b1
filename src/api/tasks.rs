//! Tasks within a project, listed server-side with filters and paging.

#[cfg(test)]
#[path = "tasks_test.rs"]
mod tasks_test;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::Date;

use super::dates::{flexible_date, format_date};
use super::envelope::ListPayload;
use super::{Endpoint, Resource};
use crate::net::{ApiClient, RequestDescriptor, RequestError};

/// Person reference embedded in a task payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TaskUser {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub surname: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Task {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub project: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, with = "flexible_date")]
    pub start: Option<Date>,
    #[serde(default, with = "flexible_date")]
    pub end: Option<Date>,
    #[serde(default)]
    pub creator: Option<TaskUser>,
    #[serde(default)]
    pub responsible_user: Option<TaskUser>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub parent_task: Option<i64>,
}

pub struct Tasks;

impl Resource for Tasks {
    type Item = Task;
    const NAME: &'static str = "tasks";
    const COLLECTION: &'static str = "/api/tasks/";

    fn create_path() -> String {
        "/api/tasks/create/".to_owned()
    }
}

/// Server-side filters for the task list. Unset fields are not sent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaskQuery {
    pub name: Option<String>,
    pub status: Option<String>,
    pub creator: Option<i64>,
    pub responsible_user: Option<i64>,
    pub project: Option<i64>,
    pub deadline: Option<Date>,
    pub created_after: Option<Date>,
    pub created_before: Option<Date>,
    pub task_id: Option<i64>,
    pub team: Option<i64>,
    /// Backend ordering expression, e.g. `-end`.
    pub ordering: Option<String>,
    pub page: u32,
    pub page_size: u32,
}

impl Default for TaskQuery {
    fn default() -> Self {
        Self {
            name: None,
            status: None,
            creator: None,
            responsible_user: None,
            project: None,
            deadline: None,
            created_after: None,
            created_before: None,
            task_id: None,
            team: None,
            ordering: None,
            page: 1,
            page_size: 10,
        }
    }
}

impl TaskQuery {
    /// Encode as query pairs. Empty strings count as unset; page numbers
    /// below 1 are sent as 1.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        let mut push = |key: &str, value: Option<String>| {
            if let Some(value) = value.filter(|v| !v.is_empty()) {
                pairs.push((key.to_owned(), value));
            }
        };
        push("name", self.name.clone());
        push("status", self.status.clone());
        push("creator", self.creator.map(|v| v.to_string()));
        push("responsible_user", self.responsible_user.map(|v| v.to_string()));
        push("project", self.project.map(|v| v.to_string()));
        push("deadline", self.deadline.map(format_date));
        push("created_after", self.created_after.map(format_date));
        push("created_before", self.created_before.map(format_date));
        push("task_id", self.task_id.map(|v| v.to_string()));
        push("team", self.team.map(|v| v.to_string()));
        push("ordering", self.ordering.clone());
        push("page", Some(self.page.max(1).to_string()));
        push("page_size", Some(self.page_size.max(1).to_string()));
        pairs
    }
}

#[must_use]
pub fn endpoint(client: &ApiClient) -> Endpoint<Tasks> {
    Endpoint::new(client.clone())
}

/// One filtered page of tasks.
///
/// # Errors
///
/// Any [`RequestError`] from the client or from decoding.
pub async fn list(client: &ApiClient, query: &TaskQuery) -> Result<ListPayload<Task>, RequestError> {
    endpoint(client).list_page(query.to_pairs()).await
}

/// Comments are free-form objects; the shape varies by backend version.
///
/// # Errors
///
/// Any [`RequestError`] from the client or from decoding.
pub async fn comments(client: &ApiClient, task_id: i64) -> Result<Vec<Value>, RequestError> {
    let request = RequestDescriptor::get(format!("/api/tasks/{task_id}/comments/"));
    Ok(client.fetch_json::<ListPayload<Value>>(&request).await?.into_items())
}
