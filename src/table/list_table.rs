//! In-memory sortable, filterable, paginated table.
//!
//! DESIGN
//! ======
//! The table borrows the caller's rows immutably and never reorders them.
//! At construction each row is projected to a `serde_json::Value` (for path
//! lookups) and assigned a key; every view is then a vector of indexes into
//! the borrowed slice, built by filter, then sort, then page.
//!
//! ROW IDENTITY
//! ============
//! Keys come from the caller's `row_key` function when given. Otherwise a
//! row's key is the first 16 hex digits of the SHA-256 of its JSON form;
//! identical rows get `-2`, `-3`, ... suffixes in input order. Keys never
//! depend on the rendered position, so selection survives sorting and
//! filtering.
//!
//! SELECTION
//! =========
//! Enabled only when a selection callback is attached. Every call that
//! changes the selected set invokes the callback with all selected rows, in
//! input order.

#[cfg(test)]
#[path = "list_table_test.rs"]
mod list_table_test;

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};
use std::fmt;

use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};

use super::column::{Column, ColumnFilter, FilterOption};
use super::path::{compare_values, display_value, lookup};

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const DEFAULT_PAGE_SIZE_OPTIONS: [usize; 4] = [10, 20, 30, 50];

pub type Comparator<T> = Box<dyn Fn(&T, &T) -> Ordering>;
pub type SelectionCallback<'a, T> = Box<dyn FnMut(&[&T]) + 'a>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

/// Initial sort supplied by the caller.
pub struct DefaultSort<T> {
    pub key: String,
    pub direction: SortDirection,
    pub comparator: Option<Comparator<T>>,
}

impl<T> DefaultSort<T> {
    #[must_use]
    pub fn new(key: impl Into<String>, direction: SortDirection) -> Self {
        Self { key: key.into(), direction, comparator: None }
    }

    /// Order rows with `compare` instead of the value at `key`. The
    /// direction still applies.
    #[must_use]
    pub fn with_comparator(mut self, compare: impl Fn(&T, &T) -> Ordering + 'static) -> Self {
        self.comparator = Some(Box::new(compare));
        self
    }
}

struct SortState<T> {
    field: Option<String>,
    direction: SortDirection,
    comparator: Option<Comparator<T>>,
}

/// Header as presented for the current state.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderCell {
    pub title: String,
    pub tooltip: Option<String>,
    pub width: Option<usize>,
    pub sortable: bool,
    /// Active direction when this column is the sort field.
    pub sort: Option<SortDirection>,
    pub filter_options: Vec<FilterOption>,
    pub active_filter: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedRow {
    pub key: String,
    pub cells: Vec<String>,
    pub selected: bool,
}

/// One page of the table, ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedPage {
    pub headers: Vec<HeaderCell>,
    pub rows: Vec<RenderedRow>,
    pub selectable: bool,
    /// Rows remaining after filtering.
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
    pub page_count: usize,
    pub page_size_options: Vec<usize>,
}

pub struct ListTable<'a, T> {
    rows: &'a [T],
    columns: Vec<Column<T>>,
    projected: Vec<Value>,
    keys: Vec<String>,
    key_index: HashMap<String, usize>,
    derived_options: Vec<Vec<FilterOption>>,
    active_filters: Vec<Vec<Value>>,
    sort: SortState<T>,
    current_page: usize,
    page_size: usize,
    page_size_options: Vec<usize>,
    selected: BTreeSet<usize>,
    on_selection_change: Option<SelectionCallback<'a, T>>,
}

impl<'a, T: Serialize> ListTable<'a, T> {
    /// Build a table over `rows`. Without a default sort the table starts
    /// ascending on the first column's sort key, if it has one.
    #[must_use]
    pub fn new(rows: &'a [T], columns: Vec<Column<T>>) -> Self {
        let projected: Vec<Value> = rows
            .iter()
            .map(|row| serde_json::to_value(row).unwrap_or(Value::Null))
            .collect();
        let keys = content_keys(&projected);
        let key_index = index_keys(&keys);
        let derived_options = columns
            .iter()
            .map(|column| derive_options(column, &projected))
            .collect();
        let active_filters = vec![Vec::new(); columns.len()];
        let field = columns.first().and_then(|c| c.sort_key.clone());

        Self {
            rows,
            columns,
            projected,
            keys,
            key_index,
            derived_options,
            active_filters,
            sort: SortState { field, direction: SortDirection::Asc, comparator: None },
            current_page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            page_size_options: DEFAULT_PAGE_SIZE_OPTIONS.to_vec(),
            selected: BTreeSet::new(),
            on_selection_change: None,
        }
    }

    /// Make rows selectable and report every selection change to `callback`.
    #[must_use]
    pub fn on_selection_change(mut self, callback: impl FnMut(&[&T]) + 'a) -> Self {
        self.on_selection_change = Some(Box::new(callback));
        self
    }

    #[must_use]
    pub fn default_sort(mut self, sort: DefaultSort<T>) -> Self {
        self.sort = SortState { field: Some(sort.key), direction: sort.direction, comparator: sort.comparator };
        self
    }

    /// Key rows with `key_fn` instead of content hashes. Duplicate keys are
    /// suffixed like duplicate content.
    #[must_use]
    pub fn row_key(mut self, key_fn: impl Fn(&T) -> String) -> Self {
        self.keys = dedupe_keys(self.rows.iter().map(key_fn));
        self.key_index = index_keys(&self.keys);
        self.selected.clear();
        self
    }

    /// Replace the offered page sizes. An empty list keeps the defaults.
    #[must_use]
    pub fn page_size_options(mut self, sizes: Vec<usize>) -> Self {
        let sizes: Vec<usize> = sizes.into_iter().filter(|&s| s > 0).collect();
        if let Some(&first) = sizes.first() {
            if !sizes.contains(&self.page_size) {
                self.page_size = first;
            }
            self.page_size_options = sizes;
        }
        self
    }

    // ===== sorting =====

    /// Header click: same key while ascending flips to descending, anything
    /// else sorts ascending on the clicked column. Unsortable columns ignore
    /// clicks.
    pub fn click_header(&mut self, column: usize) {
        let Some(key) = self.columns.get(column).and_then(|c| c.sort_key.clone()) else {
            return;
        };
        let same_key = self.sort.field.as_deref() == Some(key.as_str());
        let direction = if same_key && self.sort.direction == SortDirection::Asc {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        };
        self.sort = SortState { field: Some(key), direction, comparator: None };
    }

    #[must_use]
    pub fn sort_field(&self) -> Option<&str> {
        self.sort.field.as_deref()
    }

    #[must_use]
    pub fn sort_direction(&self) -> SortDirection {
        self.sort.direction
    }

    // ===== pagination =====

    /// Move to `page` (1-based; 0 counts as 1) with `page_size` rows per
    /// page. Pages past the end are allowed and show no rows.
    pub fn set_page(&mut self, page: usize, page_size: usize) {
        self.current_page = page.max(1);
        self.page_size = page_size.max(1);
    }

    #[must_use]
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    #[must_use]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    #[must_use]
    pub fn page_count(&self) -> usize {
        self.total().div_ceil(self.page_size)
    }

    // ===== filtering =====

    /// Activate `values` on a filterable column, replacing earlier ones. An
    /// empty list clears the filter. Returns to the first page.
    pub fn set_filter(&mut self, column: usize, values: Vec<Value>) {
        if !self.columns.get(column).is_some_and(Column::is_filterable) {
            return;
        }
        self.active_filters[column] = values;
        self.current_page = 1;
    }

    pub fn clear_filter(&mut self, column: usize) {
        self.set_filter(column, Vec::new());
    }

    /// Options offered for a column: the caller's for manual filters, the
    /// derived set for auto filters, nothing otherwise.
    #[must_use]
    pub fn filter_options(&self, column: usize) -> &[FilterOption] {
        match self.columns.get(column).map(|c| &c.filter) {
            Some(ColumnFilter::Manual { options, .. }) => options.as_slice(),
            Some(ColumnFilter::Auto) => self.derived_options[column].as_slice(),
            Some(ColumnFilter::None) | None => &[],
        }
    }

    /// Rows passing every active filter.
    #[must_use]
    pub fn total(&self) -> usize {
        (0..self.rows.len()).filter(|&i| self.passes_filters(i)).count()
    }

    // ===== selection =====

    #[must_use]
    pub fn is_selectable(&self) -> bool {
        self.on_selection_change.is_some()
    }

    /// Returns whether the selection changed.
    pub fn select(&mut self, key: &str) -> bool {
        let Some(index) = self.selectable_index(key) else {
            return false;
        };
        let changed = self.selected.insert(index);
        self.notify_if(changed)
    }

    pub fn deselect(&mut self, key: &str) -> bool {
        let Some(index) = self.selectable_index(key) else {
            return false;
        };
        let changed = self.selected.remove(&index);
        self.notify_if(changed)
    }

    pub fn toggle(&mut self, key: &str) -> bool {
        let Some(index) = self.selectable_index(key) else {
            return false;
        };
        if !self.selected.remove(&index) {
            self.selected.insert(index);
        }
        self.notify_if(true)
    }

    /// Add every row on the current page.
    pub fn select_visible(&mut self) -> bool {
        if !self.is_selectable() {
            return false;
        }
        let before = self.selected.len();
        let visible = self.visible_indices();
        self.selected.extend(visible);
        let changed = self.selected.len() != before;
        self.notify_if(changed)
    }

    pub fn clear_selection(&mut self) -> bool {
        if !self.is_selectable() || self.selected.is_empty() {
            return false;
        }
        self.selected.clear();
        self.notify_if(true)
    }

    #[must_use]
    pub fn selected_keys(&self) -> Vec<&str> {
        self.selected.iter().map(|&i| self.keys[i].as_str()).collect()
    }

    #[must_use]
    pub fn selected_rows(&self) -> Vec<&'a T> {
        let rows = self.rows;
        self.selected.iter().map(|&i| &rows[i]).collect()
    }

    // ===== views =====

    /// Keys of all rows, in input order.
    #[must_use]
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Filtered and sorted rows, all pages.
    #[must_use]
    pub fn sorted_rows(&self) -> Vec<&'a T> {
        let rows = self.rows;
        self.ordered_indices().into_iter().map(|i| &rows[i]).collect()
    }

    /// Rows on the current page.
    #[must_use]
    pub fn visible_rows(&self) -> Vec<&'a T> {
        let rows = self.rows;
        self.visible_indices().into_iter().map(|i| &rows[i]).collect()
    }

    #[must_use]
    pub fn render(&self) -> RenderedPage {
        let headers = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, column)| HeaderCell {
                title: column.header.clone(),
                tooltip: column.tooltip.clone(),
                width: column.width,
                sortable: column.is_sortable(),
                sort: column
                    .sort_key
                    .as_deref()
                    .filter(|key| self.sort.field.as_deref() == Some(*key))
                    .map(|_| self.sort.direction),
                filter_options: self.filter_options(i).to_vec(),
                active_filter: self.active_filters[i].clone(),
            })
            .collect();

        let rows = self
            .visible_indices()
            .into_iter()
            .map(|i| RenderedRow {
                key: self.keys[i].clone(),
                cells: self.columns.iter().map(|c| (c.render)(&self.rows[i])).collect(),
                selected: self.selected.contains(&i),
            })
            .collect();

        RenderedPage {
            headers,
            rows,
            selectable: self.is_selectable(),
            total: self.total(),
            page: self.current_page,
            page_size: self.page_size,
            page_count: self.page_count(),
            page_size_options: self.page_size_options.clone(),
        }
    }

    // ===== internals =====

    fn ordered_indices(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..self.rows.len())
            .filter(|&i| self.passes_filters(i))
            .collect();
        let direction = self.sort.direction;
        if let Some(compare) = &self.sort.comparator {
            indices.sort_by(|&a, &b| direction.apply(compare(&self.rows[a], &self.rows[b])));
        } else if let Some(field) = self.sort.field.as_deref() {
            indices.sort_by(|&a, &b| {
                direction.apply(compare_values(lookup(&self.projected[a], field), lookup(&self.projected[b], field)))
            });
        }
        indices
    }

    fn visible_indices(&self) -> Vec<usize> {
        let start = (self.current_page - 1).saturating_mul(self.page_size);
        self.ordered_indices()
            .into_iter()
            .skip(start)
            .take(self.page_size)
            .collect()
    }

    fn passes_filters(&self, index: usize) -> bool {
        self.columns
            .iter()
            .zip(&self.active_filters)
            .all(|(column, values)| values.is_empty() || self.column_accepts(column, values, index))
    }

    fn column_accepts(&self, column: &Column<T>, values: &[Value], index: usize) -> bool {
        match &column.filter {
            ColumnFilter::None => true,
            ColumnFilter::Manual { predicate, .. } => values.iter().any(|v| predicate(v, &self.rows[index])),
            ColumnFilter::Auto => {
                let found = column
                    .sort_key
                    .as_deref()
                    .and_then(|key| lookup(&self.projected[index], key));
                found.is_some_and(|found| values.contains(found))
            }
        }
    }

    fn selectable_index(&self, key: &str) -> Option<usize> {
        if !self.is_selectable() {
            return None;
        }
        self.key_index.get(key).copied()
    }

    fn notify_if(&mut self, changed: bool) -> bool {
        if changed {
            let rows = self.rows;
            let selected: Vec<&T> = self.selected.iter().map(|&i| &rows[i]).collect();
            if let Some(callback) = self.on_selection_change.as_mut() {
                callback(&selected);
            }
        }
        changed
    }
}

impl<T> fmt::Debug for ListTable<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListTable")
            .field("rows", &self.rows.len())
            .field("columns", &self.columns)
            .field("sort_field", &self.sort.field)
            .field("sort_direction", &self.sort.direction)
            .field("current_page", &self.current_page)
            .field("page_size", &self.page_size)
            .field("selected", &self.selected.len())
            .finish_non_exhaustive()
    }
}

/// Distinct non-null values at an auto column's key, in first-seen order.
fn derive_options<T>(column: &Column<T>, projected: &[Value]) -> Vec<FilterOption> {
    let (ColumnFilter::Auto, Some(key)) = (&column.filter, column.sort_key.as_deref()) else {
        return Vec::new();
    };
    let mut seen: Vec<&Value> = Vec::new();
    for value in projected.iter().filter_map(|row| lookup(row, key)) {
        if !value.is_null() && !seen.contains(&value) {
            seen.push(value);
        }
    }
    seen.into_iter()
        .map(|value| FilterOption { label: display_value(value), value: value.clone() })
        .collect()
}

fn content_keys(projected: &[Value]) -> Vec<String> {
    dedupe_keys(projected.iter().map(|value| {
        let digest = Sha256::digest(value.to_string().as_bytes());
        digest[..8].iter().map(|b| format!("{b:02x}")).collect::<String>()
    }))
}

fn dedupe_keys(raw: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    raw.map(|key| {
        let count = seen.entry(key.clone()).or_insert(0);
        *count += 1;
        if *count == 1 { key } else { format!("{key}-{count}") }
    })
    .collect()
}

fn index_keys(keys: &[String]) -> HashMap<String, usize> {
    keys.iter()
        .enumerate()
        .map(|(i, key)| (key.clone(), i))
        .collect()
}
