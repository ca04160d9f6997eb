//! Bordered grid tables.
//!
//! Column widths are the per-column maximum over the header and all rows.
//! A table without rows renders to nothing at all.

use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Table {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(header: &[&str]) -> Table {
        Table {
            header: header.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row; missing cells are left blank, extra cells dropped.
    pub fn push_row(&mut self, cells: Vec<String>) {
        let mut row: Vec<String> = cells
            .into_iter()
            .map(|c| c.replace('\n', " "))
            .take(self.header.len())
            .collect();
        row.resize(self.header.len(), String::new());
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.header.iter().map(|h| width(h)).collect();
        for row in &self.rows {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(width(cell));
            }
        }
        widths
    }

    /// Grid lines: the caption block, then the body. Zero rows yield no
    /// lines.
    ///
    /// An R-row table has R+2 border lines and R content lines. The header
    /// line is a caption above the `=` border, not a content line.
    pub fn render_grid(&self) -> Vec<String> {
        if self.rows.is_empty() {
            return Vec::new();
        }
        let grid = Grid::new(self);
        let mut out = grid.caption(&self.header);
        out.extend(grid.body(&self.rows));
        out
    }
}

/// Column layout shared by the caption and body of one table.
struct Grid {
    widths: Vec<usize>,
}

impl Grid {
    fn new(table: &Table) -> Grid {
        Grid {
            widths: table.column_widths(),
        }
    }

    fn border(&self, fill: char) -> String {
        let cols: Vec<String> = self
            .widths
            .iter()
            .map(|w| fill.to_string().repeat(w + 2))
            .collect();
        format!("+{}+", cols.join("+"))
    }

    fn line(&self, cells: &[String]) -> String {
        let cols: Vec<String> = cells
            .iter()
            .zip(&self.widths)
            .map(|(c, w)| format!(" {:<w$} ", c, w = *w))
            .collect();
        format!("|{}|", cols.join("|"))
    }

    /// Top border, header and the `=` border.
    fn caption(&self, header: &[String]) -> Vec<String> {
        vec![self.border('-'), self.line(header), self.border('=')]
    }

    /// Each row followed by a `-` border.
    fn body(&self, rows: &[Vec<String>]) -> Vec<String> {
        rows.iter()
            .flat_map(|row| [self.line(row), self.border('-')])
            .collect()
    }
}

fn width(s: &str) -> usize {
    s.chars().count()
}
