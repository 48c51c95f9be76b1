use super::*;
use crate::table::render_text;
use serde_json::json;
use time::macros::{date, datetime};

fn user(id: i64, surname: &str, course: Option<&str>, university: &str) -> User {
    User {
        id,
        telegram: String::new(),
        email: format!("{surname}@example.test").to_lowercase(),
        name: "Test".into(),
        surname: surname.into(),
        patronymic: None,
        course: course.map(str::to_owned),
        university: university.into(),
    }
}

fn application(id: i64, at: time::OffsetDateTime) -> Application {
    Application {
        id,
        user: 1,
        project: 2,
        event: Some(3),
        direction: None,
        specialization: None,
        team: None,
        message: None,
        date_time: at,
    }
}

#[test]
fn rows_with_ids_are_keyed_by_id() {
    let users = vec![user(10, "Petrov", Some("2"), "MSU"), user(4, "Abramova", Some("1"), "SPbU")];
    let table = table_for(&users);
    assert_eq!(table.keys(), &["10".to_owned(), "4".to_owned()]);
}

#[test]
fn rows_without_ids_fall_back_to_content_keys() {
    let teams = vec![
        Team { id: None, name: "Alpha".into(), project: Some(1), students: vec![] },
        Team { id: Some(2), name: "Beta".into(), project: Some(1), students: vec![5] },
    ];
    let table = table_for(&teams);
    assert_eq!(table.keys()[0].len(), 16);
    assert_eq!(table.keys()[1].len(), 16);
}

#[test]
fn users_sort_by_surname_and_filter_by_course() {
    let users = vec![
        user(1, "Petrov", Some("2"), "MSU"),
        user(2, "Abramova", Some("1"), "SPbU"),
        user(3, "Kuznetsov", Some("2"), "MSU"),
        user(4, "Orlova", None, "MSU"),
    ];
    let mut table = table_for(&users);
    let surnames: Vec<&str> = table.sorted_rows().iter().map(|u| u.surname.as_str()).collect();
    assert_eq!(surnames, vec!["Abramova", "Kuznetsov", "Orlova", "Petrov"]);

    let courses: Vec<&str> = table
        .filter_options(3)
        .iter()
        .map(|o| o.label.as_str())
        .collect();
    assert_eq!(courses, vec!["2", "1"]);

    table.set_filter(3, vec![json!("2")]);
    let ids: Vec<i64> = table.sorted_rows().iter().map(|u| u.id).collect();
    assert_eq!(ids, vec![3, 1]);
}

#[test]
fn applications_default_to_newest_first() {
    let apps = vec![
        application(1, datetime!(2024-03-01 10:00 +03:00)),
        application(2, datetime!(2024-03-01 08:30 UTC)),
        application(3, datetime!(2024-02-28 23:00 UTC)),
    ];
    let table = table_for(&apps);
    let ids: Vec<i64> = table.sorted_rows().iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![2, 1, 3]);
    assert_eq!(table.sort_field(), Some("dateTime"));
}

#[test]
fn tasks_sort_by_nested_responsible_surname() {
    let task = |id: i64, surname: Option<&str>| Task {
        id: Some(id),
        project: Some(1),
        name: format!("Task {id}"),
        description: None,
        start: None,
        end: Some(date!(2024 - 10 - 01)),
        creator: None,
        responsible_user: surname.map(|s| TaskUser { id, name: "N".into(), surname: s.into() }),
        status: Some("open".into()),
        parent_task: None,
    };
    let tasks = vec![task(1, Some("Zaitsev")), task(2, None), task(3, Some("Belova"))];
    let mut table = table_for(&tasks);
    table.click_header(4);
    let ids: Vec<i64> = table.sorted_rows().iter().filter_map(|t| t.id).collect();
    assert_eq!(ids, vec![2, 3, 1]);
}

#[test]
fn event_page_renders_as_text() {
    let events = vec![Event {
        id: Some(1),
        name: "Summer School".into(),
        specializations: vec![],
        statuses: vec![],
        description: None,
        link: None,
        start: Some(date!(2024 - 06 - 01)),
        end: None,
        supervisor: Some(4),
        creator: None,
        stage: Some("Registration".into()),
    }];
    let text = render_text(&table_for(&events).render());
    assert!(text.trim_start().starts_with("Name ▲"));
    assert!(text.contains("Summer School"));
    assert!(text.contains("2024-06-01"));
    assert!(text.ends_with("Total 1 records, page 1 of 1"));
}

#[test]
fn every_view_has_a_sortable_first_column() {
    assert!(Event::columns()[0].is_sortable());
    assert!(Direction::columns()[0].is_sortable());
    assert!(Project::columns()[0].is_sortable());
    assert!(Team::columns()[0].is_sortable());
    assert!(Application::columns()[0].is_sortable());
    assert!(StatusApp::columns()[0].is_sortable());
    assert!(Specialization::columns()[0].is_sortable());
    assert!(User::columns()[0].is_sortable());
    assert!(Task::columns()[0].is_sortable());
}

#[test]
fn specializations_keyed_by_id_and_sorted_by_name() {
    let specs = vec![
        Specialization { id: Some(2), name: "Frontend".into(), description: String::new() },
        Specialization { id: Some(1), name: "Backend".into(), description: "APIs".into() },
    ];
    let table = table_for(&specs);
    assert_eq!(table.keys(), &["2".to_owned(), "1".to_owned()]);
    let names: Vec<&str> = table.visible_rows().iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["Backend", "Frontend"]);
}
