//! List views for each entity.
//!
//! A list view pairs an entity with the column set its list page shows and
//! the key that identifies its rows. The CLI `list` command and any other
//! front end build their tables through [`table_for`].

pub mod lists;

pub use lists::{ListView, table_for};
