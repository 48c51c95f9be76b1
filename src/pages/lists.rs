//! Column sets for the entity list pages.

#[cfg(test)]
#[path = "lists_test.rs"]
mod lists_test;

use serde::Serialize;
use time::Date;

use crate::api::applications::Application;
use crate::api::dates::format_date;
use crate::api::directions::Direction;
use crate::api::events::Event;
use crate::api::projects::Project;
use crate::api::specializations::Specialization;
use crate::api::statuses::StatusApp;
use crate::api::tasks::{Task, TaskUser};
use crate::api::teams::Team;
use crate::api::users::User;
use crate::table::{Column, DefaultSort, ListTable, SortDirection};

/// An entity that can be shown as a list page.
pub trait ListView: Serialize + Sized + 'static {
    fn columns() -> Vec<Column<Self>>;

    /// Server id, when the row has one.
    fn id(&self) -> Option<i64>;

    fn default_sort() -> Option<DefaultSort<Self>> {
        None
    }
}

/// Build the list table for `rows`: keyed by id when every row has one,
/// by content otherwise.
#[must_use]
pub fn table_for<T: ListView>(rows: &[T]) -> ListTable<'_, T> {
    let mut table = ListTable::new(rows, T::columns());
    if rows.iter().all(|row| row.id().is_some()) {
        table = table.row_key(|row: &T| row.id().map(|id| id.to_string()).unwrap_or_default());
    }
    if let Some(sort) = T::default_sort() {
        table = table.default_sort(sort);
    }
    table
}

fn date_cell(date: Option<Date>) -> String {
    date.map(format_date).unwrap_or_default()
}

fn id_cell(id: Option<i64>) -> String {
    id.map(|id| id.to_string()).unwrap_or_default()
}

fn person_cell(user: Option<&TaskUser>) -> String {
    user.map(|u| format!("{} {}", u.surname, u.name).trim().to_owned())
        .unwrap_or_default()
}

impl ListView for Event {
    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("Name", |e: &Event| e.name.clone()).sort_key("name").width(24),
            Column::new("Start", |e: &Event| date_cell(e.start)).sort_key("start"),
            Column::new("End", |e: &Event| date_cell(e.end)).sort_key("end"),
            Column::new("Organizer", |e: &Event| id_cell(e.supervisor)).sort_key("supervisor"),
            Column::new("Stage", |e: &Event| e.stage.clone().unwrap_or_default()).auto_filters("stage"),
        ]
    }

    fn id(&self) -> Option<i64> {
        self.id
    }
}

impl ListView for Direction {
    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("Name", |d: &Direction| d.name.clone()).sort_key("name").width(24),
            Column::new("Event", |d: &Direction| d.event.to_string()).auto_filters("event"),
            Column::new("Leader", |d: &Direction| id_cell(d.leader_id)).sort_key("leader_id"),
        ]
    }

    fn id(&self) -> Option<i64> {
        self.id
    }
}

impl ListView for Project {
    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("Name", |p: &Project| p.name.clone()).sort_key("name").width(24),
            Column::new("Direction", |p: &Project| p.direction.to_string()).auto_filters("direction"),
            Column::new("Curators", |p: &Project| {
                p.curators.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
            }),
            Column::new("Author", |p: &Project| id_cell(p.author)).sort_key("author"),
        ]
    }

    fn id(&self) -> Option<i64> {
        Some(self.id)
    }
}

impl ListView for Team {
    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("Name", |t: &Team| t.name.clone()).sort_key("name").width(20),
            Column::new("Project", |t: &Team| id_cell(t.project)).auto_filters("project"),
            Column::new("Members", |t: &Team| t.students.len().to_string()).tooltip("Number of students"),
        ]
    }

    fn id(&self) -> Option<i64> {
        self.id
    }
}

impl ListView for Application {
    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("User", |a: &Application| a.user.to_string()).sort_key("user"),
            Column::new("Event", |a: &Application| id_cell(a.event)).auto_filters("event"),
            Column::new("Project", |a: &Application| a.project.to_string()).auto_filters("project"),
            Column::new("Specialization", |a: &Application| id_cell(a.specialization)).auto_filters("specialization"),
            Column::new("Team", |a: &Application| id_cell(a.team)).sort_key("team"),
            Column::new("Submitted", |a: &Application| format_date(a.date_time.date())).sort_key("dateTime"),
        ]
    }

    fn id(&self) -> Option<i64> {
        Some(self.id)
    }

    /// Newest first. Offsets differ between rows, so compare instants
    /// rather than the serialized strings.
    fn default_sort() -> Option<DefaultSort<Self>> {
        Some(
            DefaultSort::new("dateTime", SortDirection::Desc)
                .with_comparator(|a: &Application, b: &Application| a.date_time.cmp(&b.date_time)),
        )
    }
}

impl ListView for Specialization {
    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("Name", |s: &Specialization| s.name.clone()).sort_key("name").width(20),
            Column::new("Description", |s: &Specialization| s.description.clone()),
        ]
    }

    fn id(&self) -> Option<i64> {
        self.id
    }
}

impl ListView for StatusApp {
    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("Name", |s: &StatusApp| s.name.clone()).sort_key("name"),
            Column::new("Description", |s: &StatusApp| s.description.clone()),
        ]
    }

    fn id(&self) -> Option<i64> {
        Some(self.id)
    }
}

impl ListView for User {
    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("Full name", User::full_name).sort_key("surname").width(28),
            Column::new("Email", |u: &User| u.email.clone()).sort_key("email"),
            Column::new("Telegram", |u: &User| u.telegram.clone()),
            Column::new("Course", |u: &User| u.course.clone().unwrap_or_default()).auto_filters("course"),
            Column::new("University", |u: &User| u.university.clone()).auto_filters("university"),
        ]
    }

    fn id(&self) -> Option<i64> {
        Some(self.id)
    }
}

impl ListView for Task {
    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("Name", |t: &Task| t.name.clone()).sort_key("name").width(24),
            Column::new("Status", |t: &Task| t.status.clone().unwrap_or_default()).auto_filters("status"),
            Column::new("Start", |t: &Task| date_cell(t.start)).sort_key("start"),
            Column::new("Deadline", |t: &Task| date_cell(t.end)).sort_key("end"),
            Column::new("Responsible", |t: &Task| person_cell(t.responsible_user.as_ref()))
                .sort_key("responsible_user.surname")
                .tooltip("Person accountable for the task"),
        ]
    }

    fn id(&self) -> Option<i64> {
        self.id
    }
}
