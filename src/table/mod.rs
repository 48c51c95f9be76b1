//! Client-side list tables.
//!
//! SYSTEM CONTEXT
//! ==============
//! Entity pages hand decoded rows to [`ListTable`] together with their
//! column set. The table owns only view state (sort, filters, page,
//! selection); `text` turns a rendered page into terminal output.

pub mod column;
pub mod list_table;
pub mod path;
pub mod text;

pub use column::{Column, ColumnFilter, FilterOption};
pub use list_table::{DefaultSort, HeaderCell, ListTable, RenderedPage, RenderedRow, SortDirection};
pub use text::render_text;
