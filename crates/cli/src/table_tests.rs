// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Table renderer tests

use super::*;

fn sample() -> Table {
    let mut table = Table::new(vec![
        Column::new("STATE"),
        Column::new("VERSION"),
        Column::new("DESCRIPTION"),
    ]);
    table.add_row(vec![
        "[x]".to_string(),
        "20240101_001".to_string(),
        "users".to_string(),
    ]);
    table.add_row(vec![
        "[ ]".to_string(),
        "20240101_002".to_string(),
        "indexes".to_string(),
    ]);
    table
}

#[test]
fn columns_align_to_widest_cell() {
    let rendered = sample().render();
    let lines: Vec<&str> = rendered.lines().collect();

    assert_eq!(lines.len(), 4);
    // VERSION values are wider than the header, so every row aligns the
    // third column at the same offset.
    let offset = lines[2].find("users").unwrap();
    assert_eq!(lines[3].find("indexes").unwrap(), offset);
}

#[test]
fn header_and_underline_match() {
    let rendered = sample().render();
    let lines: Vec<&str> = rendered.lines().collect();

    assert!(lines[0].starts_with("STATE"));
    assert!(lines[1].starts_with("-----"));
}

#[test]
fn short_rows_render_empty_cells() {
    let mut table = Table::new(vec![Column::new("A"), Column::new("B")]);
    table.add_row(vec!["only".to_string()]);

    let rendered = table.render();
    assert!(rendered.lines().nth(2).unwrap().starts_with("only"));
}

#[test]
fn trailing_whitespace_is_trimmed() {
    let rendered = sample().render();
    for line in rendered.lines() {
        assert_eq!(line, line.trim_end());
    }
}
