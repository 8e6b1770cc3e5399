use crate::types::VideoRecord;

pub const COLUMNS: [&str; 5] = ["Title", "Video ID", "Published At", "Views", "Likes"];

const MAX_TITLE_CHARS: usize = 60;

/// Format a count with thousands separators: 1234567 -> 1,234,567
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Shorten a title to `max` characters, ending in an ellipsis when cut.
pub fn truncate_title(title: &str, max: usize) -> String {
    if title.chars().count() <= max {
        return title.to_string();
    }
    let mut out: String = title.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

/// Cells of one table row, in `COLUMNS` order.
pub fn row_cells(record: &VideoRecord) -> [String; 5] {
    [
        record.title().to_string(),
        record.id().to_string(),
        record.published_at().to_string(),
        format_count(record.view_count()),
        format_count(record.like_count()),
    ]
}

/// Render records as an aligned plain-text table with 1-based row numbers.
pub fn format_table(records: &[VideoRecord]) -> String {
    let index_width = records.len().max(1).to_string().len();

    let rows: Vec<[String; 5]> = records
        .iter()
        .map(|record| {
            let mut cells = row_cells(record);
            cells[0] = truncate_title(&cells[0], MAX_TITLE_CHARS);
            cells
        })
        .collect();

    let mut widths = COLUMNS.map(|c| c.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut output = String::new();

    // Header
    output.push_str(&" ".repeat(index_width));
    for (col, name) in COLUMNS.iter().enumerate() {
        output.push_str("  ");
        output.push_str(&pad(name, widths[col], is_numeric(col)));
    }
    output.push('\n');

    for (i, row) in rows.iter().enumerate() {
        output.push_str(&format!("{:>width$}", i + 1, width = index_width));
        for (col, cell) in row.iter().enumerate() {
            output.push_str("  ");
            output.push_str(&pad(cell, widths[col], is_numeric(col)));
        }
        output.push('\n');
    }

    output
}

fn is_numeric(col: usize) -> bool {
    col >= 3
}

fn pad(cell: &str, width: usize, right_align: bool) -> String {
    let fill = " ".repeat(width.saturating_sub(cell.chars().count()));
    if right_align {
        format!("{fill}{cell}")
    } else {
        format!("{cell}{fill}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PlaylistItem, VideoStatistics};

    fn record(id: &str, title: &str, views: u64, likes: u64) -> VideoRecord {
        VideoRecord::new(
            PlaylistItem {
                video_id: id.to_string(),
                title: title.to_string(),
                published_at: "2024-03-09T12:00:00Z".to_string(),
            },
            VideoStatistics {
                view_count: views,
                like_count: likes,
            },
        )
    }

    #[test]
    fn counts_get_separators() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(1234567), "1,234,567");
    }

    #[test]
    fn truncation_is_char_aware() {
        assert_eq!(truncate_title("short", 10), "short");
        assert_eq!(truncate_title("Lạng Sơn mùa đông", 6), "Lạng …");
    }

    #[test]
    fn table_has_header_and_numbered_rows() {
        let table = format_table(&[
            record("aaa", "First", 1500, 20),
            record("bbb", "Second", 3, 0),
        ]);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("Title"));
        assert!(lines[0].find("Video ID") < lines[0].find("Published At"));
        assert!(lines[0].find("Views") < lines[0].find("Likes"));
        assert!(lines[1].starts_with("1  First"));
        assert!(lines[1].contains("1,500"));
        assert!(lines[2].starts_with("2  Second"));
        assert!(lines[2].contains("bbb"));
    }
}
