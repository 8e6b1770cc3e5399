use std::cmp::Reverse;

use async_stream::try_stream;
use futures::{Stream, StreamExt, TryStreamExt, stream};
use tracing::{debug, info, warn};

use crate::{
    config::ApiConfig,
    error::{Result, StatsError},
    source::VideoSource,
    types::{PlaylistItem, SortKey, StatsTable, VideoRecord, VideoStatistics},
};

/// Turns a channel id into table rows: uploads playlist lookup, paged
/// listing, then one statistics lookup per video.
///
/// There is no throttling or backoff. A channel with N uploads costs
/// `1 + ceil(N / page_size) + N` API calls, and the first failure ends the
/// whole collection.
pub struct PlaylistAggregator<S> {
    source: S,
    config: ApiConfig,
}

impl<S: VideoSource> PlaylistAggregator<S> {
    pub fn new(source: S, config: ApiConfig) -> Self {
        Self { source, config }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub async fn resolve_uploads_playlist(&self, channel_id: &str) -> Result<String> {
        let channel_id = channel_id.trim();
        let not_found = || StatsError::ChannelNotFound {
            channel_id: channel_id.to_string(),
        };

        if !is_valid_channel_id(channel_id) {
            return Err(not_found());
        }

        let playlist_id = self
            .source
            .uploads_playlist_id(channel_id)
            .await?
            .ok_or_else(not_found)?;

        info!(channel_id, playlist_id = %playlist_id, "resolved uploads playlist");
        Ok(playlist_id)
    }

    /// Lazily walk the playlist page by page. Each cursor is handed to exactly
    /// one request; the stream ends when a page comes back without one.
    pub fn stream_playlist_items<'a>(
        &'a self,
        playlist_id: &'a str,
    ) -> impl Stream<Item = Result<PlaylistItem>> + Send + 'a {
        try_stream! {
            let mut cursor: Option<String> = None;
            let mut pages = 0usize;

            loop {
                let page = self.source.playlist_page(playlist_id, cursor.take()).await?;
                pages += 1;
                debug!(playlist_id, pages, items = page.items.len(), "playlist page");

                for item in page.items {
                    yield item;
                }

                match page.next_page_token {
                    Some(token) if !token.is_empty() => cursor = Some(token),
                    _ => break,
                }
            }
        }
    }

    pub async fn list_playlist_items(&self, playlist_id: &str) -> Result<Vec<PlaylistItem>> {
        let items: Vec<PlaylistItem> = self
            .stream_playlist_items(playlist_id)
            .try_collect()
            .await?;

        info!(playlist_id, count = items.len(), "listed playlist items");
        Ok(items)
    }

    pub async fn fetch_statistics(&self, video_id: &str) -> Result<Option<VideoStatistics>> {
        self.source.video_statistics(video_id).await
    }

    /// Fetch statistics for every item, at most `stats_concurrency` at a time.
    /// Output follows input order. Videos without statistics are dropped.
    pub async fn fetch_records(&self, items: Vec<PlaylistItem>) -> Result<Vec<VideoRecord>> {
        let total = items.len();
        let records: Vec<Option<VideoRecord>> = stream::iter(items)
            .map(|item| async move {
                let stats = self.fetch_statistics(&item.video_id).await;
                stats.map(|stats| match stats {
                    Some(stats) => Some(VideoRecord::new(item, stats)),
                    None => {
                        warn!(video_id = %item.video_id, "no statistics, skipping video");
                        None
                    }
                })
            })
            .buffered(self.config.stats_concurrency.max(1))
            .try_collect()
            .await?;

        let records: Vec<VideoRecord> = records.into_iter().flatten().collect();
        debug!(total, kept = records.len(), "fetched statistics");
        Ok(records)
    }

    /// Resolve, list and fetch statistics for a channel, in API order.
    pub async fn collect(&self, channel_id: &str) -> Result<Vec<VideoRecord>> {
        let channel_id = channel_id.trim();
        let no_videos = || StatsError::NoVideosFound {
            channel_id: channel_id.to_string(),
        };

        let playlist_id = self.resolve_uploads_playlist(channel_id).await?;
        let items = self.list_playlist_items(&playlist_id).await?;
        if items.is_empty() {
            return Err(no_videos());
        }

        let records = self.fetch_records(items).await?;
        if records.is_empty() {
            return Err(no_videos());
        }

        info!(channel_id, count = records.len(), "collected video statistics");
        Ok(records)
    }

    /// [`collect`](Self::collect) followed by [`assemble_and_sort`].
    pub async fn build_table(&self, channel_id: &str, sort_key: SortKey) -> Result<StatsTable> {
        let records = self.collect(channel_id).await?;
        Ok(StatsTable {
            channel_id: channel_id.trim().to_string(),
            records: assemble_and_sort(records, sort_key),
        })
    }
}

/// Stable descending sort on `sort_key`; ties keep their incoming order.
pub fn assemble_and_sort(mut records: Vec<VideoRecord>, sort_key: SortKey) -> Vec<VideoRecord> {
    sort_records(&mut records, sort_key);
    records
}

pub fn sort_records(records: &mut [VideoRecord], sort_key: SortKey) {
    records.sort_by_key(|record| Reverse(sort_key.value(record)));
}

/// Channel ids are URL-safe base64-ish strings. Anything else cannot match a
/// channel, so it is rejected before spending a request on it.
pub fn is_valid_channel_id(channel_id: &str) -> bool {
    !channel_id.is_empty()
        && channel_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, views: u64, likes: u64) -> VideoRecord {
        VideoRecord::new(
            PlaylistItem {
                video_id: id.to_string(),
                title: format!("title {id}"),
                published_at: "2024-01-01T00:00:00Z".to_string(),
            },
            VideoStatistics {
                view_count: views,
                like_count: likes,
            },
        )
    }

    fn ids(records: &[VideoRecord]) -> Vec<&str> {
        records.iter().map(|r| r.id()).collect()
    }

    #[test]
    fn sorts_by_views_descending() {
        let sorted = assemble_and_sort(
            vec![record("a", 10, 5), record("b", 30, 1), record("c", 20, 9)],
            SortKey::Views,
        );
        assert_eq!(ids(&sorted), ["b", "c", "a"]);
        assert!(sorted.windows(2).all(|w| w[0].view_count() >= w[1].view_count()));
    }

    #[test]
    fn sorts_by_likes_descending() {
        let sorted = assemble_and_sort(
            vec![record("a", 10, 5), record("b", 30, 1), record("c", 20, 9)],
            SortKey::Likes,
        );
        assert_eq!(ids(&sorted), ["c", "a", "b"]);
    }

    #[test]
    fn ties_keep_api_order() {
        let input = vec![
            record("a", 7, 1),
            record("b", 9, 1),
            record("c", 7, 1),
            record("d", 7, 1),
            record("e", 9, 1),
        ];

        let by_views = assemble_and_sort(input.clone(), SortKey::Views);
        assert_eq!(ids(&by_views), ["b", "e", "a", "c", "d"]);

        let by_likes = assemble_and_sort(input, SortKey::Likes);
        assert_eq!(ids(&by_likes), ["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn resorting_is_stable() {
        let mut records = vec![record("a", 1, 3), record("b", 2, 3), record("c", 1, 2)];
        sort_records(&mut records, SortKey::Views);
        sort_records(&mut records, SortKey::Likes);
        assert_eq!(ids(&records), ["b", "a", "c"]);
    }

    #[test]
    fn channel_id_shape() {
        assert!(is_valid_channel_id("UCc_pE2B8AkSK-o1SRMZtL7g"));
        assert!(!is_valid_channel_id(""));
        assert!(!is_valid_channel_id("UC abc"));
        assert!(!is_valid_channel_id("UC/../abc"));
        assert!(!is_valid_channel_id("@handle"));
    }
}
