//! Terminal rendering: summary card and dump tables.

const BAR_WIDTH: usize = 40;
const MAX_CELL_WIDTH: usize = 24;

// ── Summary ──

/// Print the good/defect split as a card with proportional bars.
///
/// Prints a notice instead when nothing was classified.
pub fn print_summary_card(summary: Option<&tracesplit_core::Summary>) {
    let Some(summary) = summary else {
        println!("No data to summarise.");
        return;
    };

    println!("=== Summary ===");
    println!("  {:<14} {:>8}", "Total Data", summary.total);
    for (label, count, pct) in summary.categories() {
        println!(
            "  {:<14} {:>8}  {:>5.1}%  {}",
            label,
            count,
            pct,
            bar(pct, BAR_WIDTH)
        );
    }
    println!();
}

/// Horizontal bar of `width * pct / 100` block characters, rounded.
fn bar(pct: f64, width: usize) -> String {
    let filled = ((pct.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    "█".repeat(filled)
}

// ── Tables ──

/// Print rows under `Column 1..N` headings, widest row deciding N.
pub fn print_table(rows: &[&[String]], limit: Option<usize>) {
    if rows.is_empty() {
        println!("(no rows)");
        return;
    }

    let columns = rows.iter().map(|r| r.len()).max().unwrap_or(0);
    let shown = limit.unwrap_or(rows.len()).min(rows.len());
    let visible = &rows[..shown];

    let headers: Vec<String> = (1..=columns).map(|i| format!("Column {i}")).collect();
    let widths: Vec<usize> = (0..columns)
        .map(|c| {
            visible
                .iter()
                .filter_map(|r| r.get(c))
                .map(|cell| cell.chars().count().min(MAX_CELL_WIDTH))
                .chain(std::iter::once(headers[c].len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    print_row(headers.iter().map(String::as_str), &widths);
    let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    print_row(rule.iter().map(String::as_str), &widths);
    for row in visible {
        print_row(row.iter().map(String::as_str), &widths);
    }

    if shown < rows.len() {
        println!("... and {} more", rows.len() - shown);
    }
}

fn print_row<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let line: Vec<String> = cells
        .zip(widths)
        .map(|(cell, &w)| format!("{:<w$}", truncate(cell, MAX_CELL_WIDTH)))
        .collect();
    println!("{}", line.join("  ").trim_end());
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max - 3).collect();
        format!("{head}...")
    }
}
