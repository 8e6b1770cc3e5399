use serde::{Deserialize, Serialize};

/// One entry of the uploads playlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistItem {
    pub video_id: String,
    pub title: String,
    pub published_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaylistPage {
    pub items: Vec<PlaylistItem>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoStatistics {
    pub view_count: u64,
    pub like_count: u64,
}

/// A finished table row. Fields are private so a record cannot change after
/// it has been assembled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VideoRecord {
    id: String,
    title: String,
    published_at: String,
    view_count: u64,
    like_count: u64,
}

impl VideoRecord {
    pub fn new(item: PlaylistItem, stats: VideoStatistics) -> Self {
        Self {
            id: item.video_id,
            title: item.title,
            published_at: item.published_at,
            view_count: stats.view_count,
            like_count: stats.like_count,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn published_at(&self) -> &str {
        &self.published_at
    }

    pub fn view_count(&self) -> u64 {
        self.view_count
    }

    pub fn like_count(&self) -> u64 {
        self.like_count
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortKey {
    #[default]
    Views,
    Likes,
}

impl SortKey {
    pub const ALL: [SortKey; 2] = [SortKey::Views, SortKey::Likes];

    pub fn name(&self) -> &'static str {
        match self {
            SortKey::Views => "Views",
            SortKey::Likes => "Likes",
        }
    }

    pub fn value(&self, record: &VideoRecord) -> u64 {
        match self {
            SortKey::Views => record.view_count,
            SortKey::Likes => record.like_count,
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Rows collected for one channel, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsTable {
    pub channel_id: String,
    pub records: Vec<VideoRecord>,
}
