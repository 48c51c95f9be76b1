//! MeetPoint client core.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every entity endpoint in `api` goes through `net::client::ApiClient`, which
//! owns bearer injection and the refresh-and-replay protocol. Entity lists are
//! handed to `table::ListTable` for local sort/filter/paging, with column sets
//! for each list view living in `pages`.

pub mod api;
pub mod auth;
pub mod config;
pub mod net;
pub mod pages;
pub mod table;
