use std::io::{self, Write};

use crate::data::ProjectItem;

pub const ITEM_HEADER: [&str; 5] = ["Type", "Title", "Number", "Repository", "ID"];
const TITLE_COLUMN: usize = 1;
const COLUMN_GAP: usize = 2;
const MIN_TRUNCATED_WIDTH: usize = 5;

/// Buffers rows and prints them aligned for a terminal or tab-separated
/// for everything else.
pub struct TablePrinter {
    is_tty: bool,
    width: usize,
    truncate_column: Option<usize>,
    rows: Vec<Vec<String>>,
}

impl TablePrinter {
    pub fn new(is_tty: bool, width: usize) -> Self {
        Self {
            is_tty,
            width,
            truncate_column: None,
            rows: Vec::new(),
        }
    }

    /// The one column allowed to shrink when the table is too wide.
    pub fn truncate_column(mut self, column: usize) -> Self {
        self.truncate_column = Some(column);
        self
    }

    pub fn add_row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.rows
            .push(cells.into_iter().map(|c| sanitize(c.as_ref())).collect());
    }

    pub fn render(&self, out: &mut impl Write) -> io::Result<()> {
        if !self.is_tty {
            for row in &self.rows {
                writeln!(out, "{}", row.join("\t"))?;
            }
            return Ok(());
        }

        let widths = self.column_widths();
        for row in &self.rows {
            let last = row.len().saturating_sub(1);
            let mut line = String::new();
            for (i, cell) in row.iter().enumerate() {
                let cell = truncate_string(cell, widths[i]);
                if i == last {
                    line.push_str(&cell);
                } else {
                    let pad = widths[i] - cell.chars().count() + COLUMN_GAP;
                    line.push_str(&cell);
                    line.extend(std::iter::repeat(' ').take(pad));
                }
            }
            writeln!(out, "{}", line.trim_end())?;
        }
        Ok(())
    }

    fn column_widths(&self) -> Vec<usize> {
        let columns = self.rows.iter().map(Vec::len).max().unwrap_or(0);
        let mut widths = vec![0; columns];
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }

        if let Some(column) = self.truncate_column.filter(|&c| c < columns) {
            let total: usize = widths.iter().sum::<usize>() + COLUMN_GAP * columns.saturating_sub(1);
            if total > self.width {
                let excess = total - self.width;
                let floor = widths[column].min(MIN_TRUNCATED_WIDTH);
                widths[column] = widths[column].saturating_sub(excess).max(floor);
            }
        }
        widths
    }
}

/// Write the item table, header first.
pub fn render_items(
    out: &mut impl Write,
    items: &[ProjectItem],
    is_tty: bool,
    width: usize,
) -> io::Result<()> {
    let mut table = TablePrinter::new(is_tty, width).truncate_column(TITLE_COLUMN);
    table.add_row(ITEM_HEADER);
    for item in items {
        table.add_row([
            item.kind.as_str().to_string(),
            item.title.clone(),
            item.number_display(),
            item.repository.clone(),
            item.id.clone(),
        ]);
    }
    table.render(out)
}

/// Truncate to `max_len` characters, marking the cut with an ellipsis.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len == 0 {
        String::new()
    } else {
        let head: String = s.chars().take(max_len - 1).collect();
        format!("{head}…")
    }
}

/// Cells hold one line of plain text.
fn sanitize(text: &str) -> String {
    let flat = text.replace("\r\n", " ").replace(['\n', '\r', '\t'], " ");
    strip_ansi_escapes::strip_str(flat)
}
