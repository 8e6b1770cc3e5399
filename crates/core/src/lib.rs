//! ytstats Core Library
//!
//! Collects a YouTube channel's uploads with their view and like counts,
//! sorts them, renders them as a table and exports them to a spreadsheet.

pub mod aggregator;
pub mod api;
pub mod config;
pub mod error;
pub mod export;
pub mod format;
pub mod source;
pub mod types;
pub mod youtube;

// Re-export commonly used items at crate root
pub use aggregator::{PlaylistAggregator, assemble_and_sort, is_valid_channel_id, sort_records};
pub use config::{
    API_KEY_ENV_VAR, ApiConfig, DEFAULT_CHANNEL_ID, DEFAULT_STATS_CONCURRENCY, PAGE_SIZE,
};
pub use error::{Result, StatsError};
pub use export::{default_export_dir, export_filename, save_xlsx, write_xlsx};
pub use format::{COLUMNS, format_count, format_table};
pub use source::VideoSource;
pub use types::{PlaylistItem, PlaylistPage, SortKey, StatsTable, VideoRecord, VideoStatistics};
pub use youtube::YoutubeClient;
