use async_trait::async_trait;

use crate::{
    error::Result,
    types::{PlaylistPage, VideoStatistics},
};

/// The three read-only lookups the aggregator needs from the platform.
#[async_trait]
pub trait VideoSource: Send + Sync {
    /// `None` when the channel has no record or no uploads playlist.
    async fn uploads_playlist_id(&self, channel_id: &str) -> Result<Option<String>>;

    /// One page of a playlist. `page_token` is the cursor of the previous page.
    async fn playlist_page(
        &self,
        playlist_id: &str,
        page_token: Option<String>,
    ) -> Result<PlaylistPage>;

    /// `None` when the video is deleted or private.
    async fn video_statistics(&self, video_id: &str) -> Result<Option<VideoStatistics>>;
}
