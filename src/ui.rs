//! Terminal output helpers.
//!
//! Status lines use the same glyph set everywhere (`✓` done, `!` warning,
//! `x` failure) and a box-drawn [`Table`] sized to the terminal for the
//! `inspect` command.

use colored::*;
use std::time::Duration;

pub fn step(msg: &str) {
    println!("{} {}", "⚙️".cyan(), msg);
}

pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

pub fn warn(msg: &str) {
    eprintln!("{} {}", "!".yellow(), msg);
}

/// Indented, dimmed line shown only in verbose mode
pub fn detail(verbose: bool, msg: &str) {
    if verbose {
        println!("   {}", msg.dimmed());
    }
}

/// Spinner shown while a blocking subprocess runs.
pub fn spinner(msg: String) -> indicatif::ProgressBar {
    let pb = indicatif::ProgressBar::new_spinner();
    pb.set_style(
        indicatif::ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| indicatif::ProgressStyle::default_spinner())
            .tick_chars("◜◠◝◞◡◟"),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(msg);
    pb
}

pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(|s| s.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Rows with the wrong number of cells are dropped.
    pub fn add_row(&mut self, row: Vec<String>) {
        if row.len() == self.headers.len() {
            self.rows.push(row);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn print(&self) {
        let (_, term_width) = console::Term::stdout().size();
        for line in self.render(term_width as usize) {
            println!("{}", line);
        }
    }

    /// Lay the table out within `max_width` columns.
    pub fn render(&self, max_width: usize) -> Vec<String> {
        if self.headers.is_empty() {
            return Vec::new();
        }

        let mut widths: Vec<usize> = self
            .headers
            .iter()
            .map(|h| console::measure_text_width(h))
            .collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(console::measure_text_width(&flatten(cell)));
            }
        }

        // "  │" plus " cell │" per column
        let overhead = 3 + 3 * widths.len();
        let available = max_width.saturating_sub(overhead);
        while widths.iter().sum::<usize>() > available {
            let Some((idx, &widest)) = widths.iter().enumerate().max_by_key(|(_, w)| **w) else {
                break;
            };
            if widest <= 8 {
                break;
            }
            widths[idx] -= 1;
        }

        let border = |left: &str, mid: &str, right: &str| {
            let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
            format!("  {}{}{}", left, segments.join(mid), right)
        };
        let line = |cells: &[String], bold: bool| {
            let mut out = "  │".to_string();
            for (cell, &width) in cells.iter().zip(&widths) {
                let text = console::truncate_str(&flatten(cell), width, "...").to_string();
                let pad = width.saturating_sub(console::measure_text_width(&text));
                let text = if bold { text.bold().to_string() } else { text };
                out.push_str(&format!(" {}{} │", text, " ".repeat(pad)));
            }
            out
        };

        let mut out = vec![border("┌", "┬", "┐"), line(self.headers.as_slice(), true)];
        out.push(border("├", "┼", "┤"));
        for row in &self.rows {
            out.push(line(row.as_slice(), false));
        }
        out.push(border("└", "┴", "┘"));
        out
    }
}

fn flatten(s: &str) -> String {
    s.chars()
        .map(|c| if matches!(c, '\n' | '\r' | '\t') { ' ' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(lines: Vec<String>) -> Vec<String> {
        lines
            .into_iter()
            .map(|l| console::strip_ansi_codes(&l).to_string())
            .collect()
    }

    #[test]
    fn test_render_layout() {
        let mut table = Table::new(&["Kind", "Value"]);
        table.add_row(vec!["define".to_string(), "FOO=1".to_string()]);
        let lines = plain(table.render(80));

        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "  ┌────────┬───────┐");
        assert_eq!(lines[1], "  │ Kind   │ Value │");
        assert_eq!(lines[3], "  │ define │ FOO=1 │");
        assert_eq!(lines[4], "  └────────┴───────┘");
    }

    #[test]
    fn test_mismatched_rows_are_dropped() {
        let mut table = Table::new(&["A", "B"]);
        table.add_row(vec!["only one".to_string()]);
        assert!(table.is_empty());
    }

    #[test]
    fn test_narrow_terminal_truncates() {
        let mut table = Table::new(&["Path"]);
        table.add_row(vec!["/a/very/long/include/directory/that/will/not/fit".to_string()]);
        let lines = plain(table.render(20));
        for line in &lines {
            assert!(console::measure_text_width(line) <= 20, "{}", line);
        }
        assert!(lines[3].contains("..."));
    }
}
