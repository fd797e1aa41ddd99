use std::cmp;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Align {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy)]
pub struct Column<'a> {
    pub name: &'a str,
    pub align: Align,
}

const COLUMN_GAP: &str = "  ";

pub fn terminal_width() -> usize {
    let from_env = std::env::var("COLUMNS")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .unwrap_or(120);
    cmp::max(from_env, 40)
}

pub fn key_value_rows(entries: &[(&str, String)], indent: usize) -> Vec<String> {
    let label_width = entries
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0);
    let padding = " ".repeat(indent);

    entries
        .iter()
        .map(|(label, value)| format!("{padding}{label:<label_width$}  {value}"))
        .collect()
}

/// Renders rows as an aligned table, or as one labelled block per row when the
/// table would not fit in `max_width`.
pub fn render_table_or_blocks(
    columns: &[Column<'_>],
    rows: &[Vec<String>],
    indent: usize,
    max_width: usize,
    block_label: &str,
) -> Vec<String> {
    if columns.is_empty() || rows.is_empty() {
        return Vec::new();
    }

    let widths = column_widths(columns, rows);
    let table_width =
        indent + widths.iter().sum::<usize>() + COLUMN_GAP.len() * (widths.len() - 1);
    if table_width > max_width {
        return render_blocks(columns, rows, indent, block_label);
    }

    let header = columns
        .iter()
        .map(|column| column.name.to_string())
        .collect::<Vec<String>>();

    std::iter::once(&header)
        .chain(rows)
        .map(|cells| format_row(columns, cells, &widths, indent))
        .collect()
}

fn column_widths(columns: &[Column<'_>], rows: &[Vec<String>]) -> Vec<usize> {
    let mut widths = columns
        .iter()
        .map(|column| column.name.chars().count())
        .collect::<Vec<usize>>();

    for row in rows {
        for (slot, value) in widths.iter_mut().zip(row) {
            *slot = cmp::max(*slot, value.chars().count());
        }
    }

    widths
}

fn format_row(columns: &[Column<'_>], cells: &[String], widths: &[usize], indent: usize) -> String {
    let pieces = columns
        .iter()
        .zip(widths.iter().copied())
        .enumerate()
        .map(|(index, (column, width))| {
            let value = cells.get(index).map(String::as_str).unwrap_or("");
            match column.align {
                Align::Left => format!("{value:<width$}"),
                Align::Right => format!("{value:>width$}"),
            }
        })
        .collect::<Vec<String>>();

    format!("{}{}", " ".repeat(indent), pieces.join(COLUMN_GAP))
        .trim_end()
        .to_string()
}

fn render_blocks(
    columns: &[Column<'_>],
    rows: &[Vec<String>],
    indent: usize,
    block_label: &str,
) -> Vec<String> {
    let padding = " ".repeat(indent);
    let mut output = Vec::new();
    for (row_index, row) in rows.iter().enumerate() {
        output.push(format!("{padding}{block_label} {}:", row_index + 1));
        let entries = columns
            .iter()
            .enumerate()
            .map(|(index, column)| (column.name, row.get(index).cloned().unwrap_or_default()))
            .collect::<Vec<(&str, String)>>();
        output.extend(key_value_rows(&entries, indent + 2));
    }
    output
}
