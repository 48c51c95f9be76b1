//! Column descriptors for [`super::ListTable`].

#[cfg(test)]
#[path = "column_test.rs"]
mod column_test;

use std::fmt;

use serde_json::Value;

pub type RenderFn<T> = Box<dyn Fn(&T) -> String>;
pub type FilterPredicate<T> = Box<dyn Fn(&Value, &T) -> bool>;

/// One selectable value in a column filter.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterOption {
    pub label: String,
    pub value: Value,
}

impl FilterOption {
    #[must_use]
    pub fn new(label: impl Into<String>, value: impl Into<Value>) -> Self {
        Self { label: label.into(), value: value.into() }
    }
}

/// How a column filters rows.
pub enum ColumnFilter<T> {
    None,
    /// Caller-supplied options; a row passes when `predicate(option, row)`
    /// holds for any selected option.
    Manual { options: Vec<FilterOption>, predicate: FilterPredicate<T> },
    /// Options derived from the distinct values at the column's sort key;
    /// rows pass on strict equality at that path.
    Auto,
}

/// Caller-defined column: header, cell renderer, and optional sort/filter.
pub struct Column<T> {
    pub header: String,
    pub render: RenderFn<T>,
    pub sort_key: Option<String>,
    pub tooltip: Option<String>,
    /// Preferred width in characters.
    pub width: Option<usize>,
    pub filter: ColumnFilter<T>,
}

impl<T> Column<T> {
    #[must_use]
    pub fn new(header: impl Into<String>, render: impl Fn(&T) -> String + 'static) -> Self {
        Self {
            header: header.into(),
            render: Box::new(render),
            sort_key: None,
            tooltip: None,
            width: None,
            filter: ColumnFilter::None,
        }
    }

    #[must_use]
    pub fn sort_key(mut self, key: impl Into<String>) -> Self {
        self.sort_key = Some(key.into());
        self
    }

    #[must_use]
    pub fn tooltip(mut self, text: impl Into<String>) -> Self {
        self.tooltip = Some(text.into());
        self
    }

    #[must_use]
    pub fn width(mut self, chars: usize) -> Self {
        self.width = Some(chars);
        self
    }

    #[must_use]
    pub fn filters(
        mut self,
        options: Vec<FilterOption>,
        predicate: impl Fn(&Value, &T) -> bool + 'static,
    ) -> Self {
        self.filter = ColumnFilter::Manual { options, predicate: Box::new(predicate) };
        self
    }

    /// Derive filter options from the data at `key`, which also becomes the
    /// column's sort key.
    #[must_use]
    pub fn auto_filters(mut self, key: impl Into<String>) -> Self {
        self.sort_key = Some(key.into());
        self.filter = ColumnFilter::Auto;
        self
    }

    #[must_use]
    pub fn is_sortable(&self) -> bool {
        self.sort_key.is_some()
    }

    #[must_use]
    pub fn is_filterable(&self) -> bool {
        !matches!(self.filter, ColumnFilter::None)
    }
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let filter = match &self.filter {
            ColumnFilter::None => "none",
            ColumnFilter::Manual { .. } => "manual",
            ColumnFilter::Auto => "auto",
        };
        f.debug_struct("Column")
            .field("header", &self.header)
            .field("sort_key", &self.sort_key)
            .field("filter", &filter)
            .finish_non_exhaustive()
    }
}
