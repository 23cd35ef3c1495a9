// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared table renderer for CLI list views.
//!
//! Provides consistent column alignment across list output without pulling
//! in a rendering crate; migrations tables are small and left-aligned.

/// A column definition in a [`Table`].
pub struct Column {
    pub name: &'static str,
}

impl Column {
    pub fn new(name: &'static str) -> Self {
        Self { name }
    }
}

/// An aligned text table.
pub struct Table {
    columns: Vec<Column>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Add a row; missing cells render empty, extra cells are dropped.
    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// Render with three spaces between columns and a dashed underline.
    pub fn render(&self) -> String {
        let widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, column)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(i))
                    .map(|cell| cell.len())
                    .chain(std::iter::once(column.name.len()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut out = String::new();
        self.push_row(
            &mut out,
            &widths,
            &self
                .columns
                .iter()
                .map(|c| c.name.to_string())
                .collect::<Vec<_>>(),
        );
        self.push_row(
            &mut out,
            &widths,
            &widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>(),
        );
        for row in &self.rows {
            self.push_row(&mut out, &widths, row);
        }
        out
    }

    fn push_row(&self, out: &mut String, widths: &[usize], cells: &[String]) {
        let empty = String::new();
        let line: Vec<String> = widths
            .iter()
            .enumerate()
            .map(|(i, width)| {
                let cell = cells.get(i).unwrap_or(&empty);
                format!("{cell:<width$}")
            })
            .collect();
        out.push_str(line.join("   ").trim_end());
        out.push('\n');
    }
}

#[cfg(test)]
#[path = "table_tests.rs"]
mod tests;
