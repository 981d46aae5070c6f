use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Plain-text table with columns sized to their widest cell.
pub struct Table {
    headers: Vec<&'static str>,
    rows: Vec<Vec<String>>,
    max_width: usize,
}

impl Table {
    pub fn new(headers: Vec<&'static str>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
            max_width: 48,
        }
    }

    /// Cap every column at `max_width` display columns.
    pub fn with_max_width(mut self, max_width: usize) -> Self {
        self.max_width = max_width;
        self
    }

    pub fn push(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn render(&self) -> String {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| display_width(h)).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                if let Some(width) = widths.get_mut(i) {
                    *width = (*width).max(display_width(cell)).min(self.max_width);
                }
            }
        }

        let mut out = String::new();
        let header: Vec<String> = self
            .headers
            .iter()
            .zip(&widths)
            .map(|(h, w)| pad(h, *w))
            .collect();
        out.push_str(header.join("  ").trim_end());
        out.push('\n');

        for row in &self.rows {
            let line: Vec<String> = row
                .iter()
                .zip(&widths)
                .map(|(cell, w)| pad(&truncate(cell, *w), *w))
                .collect();
            out.push_str(line.join("  ").trim_end());
            out.push('\n');
        }
        out
    }
}

pub(crate) fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Pad a string to a minimum display width without truncating.
///
/// Uses Unicode display width to handle wide characters (CJK, emoji).
pub(crate) fn pad(s: &str, min_width: usize) -> String {
    let width = display_width(s);
    if width >= min_width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(min_width - width))
    }
}

/// Truncate to at most `max_width` display columns, ending with "...".
pub(crate) fn truncate(s: &str, max_width: usize) -> String {
    if display_width(s) <= max_width {
        return s.to_string();
    }
    let budget = max_width.saturating_sub(3);
    let mut used = 0;
    let mut out = String::new();
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    format!("{}...", out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_shorter_than_width() {
        assert_eq!(pad("hi", 5), "hi   ");
    }

    #[test]
    fn test_pad_wide_characters() {
        // two CJK characters occupy four columns
        assert_eq!(pad("旅行", 6), "旅行  ");
    }

    #[test]
    fn test_truncate_respects_display_width() {
        assert_eq!(truncate("abcdefghij", 7), "abcd...");
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("旅行計画メモ", 7), "旅行...");
    }

    #[test]
    fn test_render_aligns_columns() {
        let mut table = Table::new(vec!["ID", "Name"]);
        table.push(vec!["a".to_string(), "Trip".to_string()]);
        table.push(vec!["bbb".to_string(), "Notes".to_string()]);

        assert_eq!(table.render(), "ID   Name\na    Trip\nbbb  Notes\n");
    }

    #[test]
    fn test_render_caps_column_width() {
        let mut table = Table::new(vec!["Name"]).with_max_width(6);
        table.push(vec!["A very long name".to_string()]);
        assert_eq!(table.render(), "Name\nA v...\n");
    }
}
