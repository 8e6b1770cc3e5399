use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Format, Workbook};
use tokio::fs;

use crate::{error::Result, format::COLUMNS, types::VideoRecord};

pub const SHEET_NAME: &str = "Sheet1";

/// `youtube_stats_<channelId>.xlsx`, with anything unsafe for a file name
/// replaced by `_`.
pub fn export_filename(channel_id: &str) -> String {
    let safe: String = channel_id
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("youtube_stats_{safe}.xlsx")
}

/// Where exports land when the user doesn't pick a directory.
pub fn default_export_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// Serialize records into a single-sheet workbook.
///
/// Row 0 is the header. Column A holds the 1-based row index (blank header),
/// columns B..F hold `COLUMNS`. Counts are written as numbers.
pub fn write_xlsx(records: &[VideoRecord]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();

    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;
    sheet.set_freeze_panes(1, 0)?;

    for (col, name) in COLUMNS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16 + 1, *name, &header)?;
    }

    for (i, record) in records.iter().enumerate() {
        let row = i as u32 + 1;
        sheet.write_number(row, 0, row as f64)?;
        sheet.write_string(row, 1, record.title())?;
        sheet.write_string(row, 2, record.id())?;
        sheet.write_string(row, 3, record.published_at())?;
        sheet.write_number(row, 4, record.view_count() as f64)?;
        sheet.write_number(row, 5, record.like_count() as f64)?;
    }

    sheet.set_column_width(1, 60.0)?;
    sheet.set_column_width(2, 14.0)?;
    sheet.set_column_width(3, 22.0)?;

    Ok(workbook.save_to_buffer()?)
}

/// Write the workbook for `channel_id` into `dir` and return its path.
pub async fn save_xlsx(records: &[VideoRecord], dir: &Path, channel_id: &str) -> Result<PathBuf> {
    let bytes = write_xlsx(records)?;
    fs::create_dir_all(dir).await?;

    let path = dir.join(export_filename(channel_id));
    fs::write(&path, bytes).await?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_pattern() {
        assert_eq!(
            export_filename("UCc_pE2B8AkSK-o1SRMZtL7g"),
            "youtube_stats_UCc_pE2B8AkSK-o1SRMZtL7g.xlsx"
        );
        assert_eq!(export_filename(" ../x "), "youtube_stats____x.xlsx");
    }

    #[test]
    fn empty_table_still_writes_a_workbook() {
        let bytes = write_xlsx(&[]).unwrap();
        // xlsx files are zip archives
        assert_eq!(&bytes[..2], b"PK");
    }
}
