use crate::ui::width_util::WidthUtil;
use std::io::{self, Write};

const COLUMN_GAP: &str = " | ";

/// Plain-text tables: upper-cased banner, header row, `|`-separated cells.
/// Widths are measured on visible characters so painted cells line up.
#[derive(Debug, Default, Clone)]
pub struct TablePrinter {
    util: WidthUtil,
}

impl TablePrinter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render_banner<W: Write + ?Sized>(
        &self,
        title: &str,
        width: usize,
        out: &mut W,
    ) -> io::Result<()> {
        let w = width.max(self.util.visible_width(title));
        writeln!(out, "{}", rule(w))?;
        writeln!(out, "{}", title.to_uppercase())?;
        writeln!(out, "{}", rule(w))
    }

    pub fn compute_table_width<T: AsRef<str>>(&self, headers: &[&str], rows: &[Vec<T>]) -> usize {
        natural_width(&self.column_widths(headers, rows))
    }

    /// `empty_message` replaces the header and rows when there are no rows.
    /// `min_width` stretches the rules, e.g. to match sibling tables.
    pub fn render_table<T: AsRef<str>, W: Write + ?Sized>(
        &self,
        table_name: &str,
        headers: &[&str],
        rows: &[Vec<T>],
        empty_message: Option<&str>,
        min_width: Option<usize>,
        out: &mut W,
    ) -> io::Result<()> {
        let widths = self.column_widths(headers, rows);
        let total = natural_width(&widths).max(min_width.unwrap_or(0));

        if let (true, Some(msg)) = (rows.is_empty(), empty_message) {
            let w = total
                .max(self.util.visible_width(table_name))
                .max(self.util.visible_width(msg));
            self.render_banner(table_name, w, out)?;
            writeln!(out, "{msg}")?;
            return writeln!(out, "{}", rule(w));
        }

        self.render_banner(table_name, total, out)?;
        writeln!(out, "{}", self.line(headers, &widths))?;
        writeln!(out, "{}", rule(total))?;
        for row in rows {
            writeln!(out, "{}", self.line(row, &widths))?;
        }
        writeln!(out, "{}", rule(total))
    }

    fn column_widths<T: AsRef<str>>(&self, headers: &[&str], rows: &[Vec<T>]) -> Vec<usize> {
        let mut widths: Vec<usize> = headers.iter().map(|h| self.util.visible_width(h)).collect();
        for row in rows {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(self.util.visible_width(cell.as_ref()));
            }
        }
        widths
    }

    fn line<T: AsRef<str>>(&self, cells: &[T], widths: &[usize]) -> String {
        cells
            .iter()
            .zip(widths)
            .map(|(cell, w)| self.util.pad_visible(cell.as_ref(), *w))
            .collect::<Vec<_>>()
            .join(COLUMN_GAP)
            .trim_end()
            .to_string()
    }
}

fn natural_width(widths: &[usize]) -> usize {
    if widths.is_empty() {
        return 0;
    }
    widths.iter().sum::<usize>() + (widths.len() - 1) * COLUMN_GAP.len()
}

fn rule(width: usize) -> String {
    "-".repeat(width.max(1))
}
