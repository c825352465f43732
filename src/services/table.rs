/// Renders rows as left-aligned columns separated by two spaces, headers first.
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();

    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            let len = cell.chars().count();
            match widths.get_mut(i) {
                Some(width) => *width = (*width).max(len),
                None => widths.push(len),
            }
        }
    }

    let header_row: Vec<String> = headers.iter().map(|h| h.to_string()).collect();

    std::iter::once(&header_row)
        .chain(rows.iter())
        .map(|row| render_row(row, &widths))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_row(row: &[String], widths: &[usize]) -> String {
    row.iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}
