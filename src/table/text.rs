//! Plain-text rendering of a table page for the terminal.
//!
//! Layout is delegated to `tabled`, which measures cells by display width,
//! so wide (CJK) and narrow text stay aligned. Selectable pages get a leading
//! marker column.

#[cfg(test)]
#[path = "text_test.rs"]
mod text_test;

use tabled::builder::Builder;
use tabled::settings::Style;
use unicode_width::UnicodeWidthStr;

use super::list_table::{HeaderCell, RenderedPage, SortDirection};

const SELECTED_MARK: &str = "[x]";
const UNSELECTED_MARK: &str = "[ ]";

fn header_label(header: &HeaderCell) -> String {
    let label = match (header.sortable, header.sort) {
        (false, _) => header.title.clone(),
        (true, Some(SortDirection::Asc)) => format!("{} ▲", header.title),
        (true, Some(SortDirection::Desc)) => format!("{} ▼", header.title),
        (true, None) => format!("{} ↕", header.title),
    };
    // Preferred widths are honoured by padding the header cell.
    let preferred = header.width.unwrap_or(0);
    let shown = label.width();
    if shown < preferred {
        format!("{label}{}", " ".repeat(preferred - shown))
    } else {
        label
    }
}

/// Render `page` as aligned columns followed by a totals footer.
#[must_use]
pub fn render_text(page: &RenderedPage) -> String {
    let mut builder = Builder::default();

    let mut head: Vec<String> = Vec::with_capacity(page.headers.len() + 1);
    if page.selectable {
        head.push(String::new());
    }
    head.extend(page.headers.iter().map(header_label));
    builder.push_record(head);

    for row in &page.rows {
        let mut record: Vec<String> = Vec::with_capacity(row.cells.len() + 1);
        if page.selectable {
            let mark = if row.selected { SELECTED_MARK } else { UNSELECTED_MARK };
            record.push(mark.to_owned());
        }
        record.extend(row.cells.iter().cloned());
        builder.push_record(record);
    }

    let mut table = builder.build();
    table.with(Style::psql());

    let mut lines: Vec<String> = table
        .to_string()
        .lines()
        .map(|line| line.trim_end().to_owned())
        .collect();
    if page.rows.is_empty() {
        lines.push("No data".to_owned());
    }
    lines.push(format!("Total {} records, page {} of {}", page.total, page.page, page.page_count.max(1)));
    lines.join("\n")
}
