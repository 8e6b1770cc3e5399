use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{
    api::{ChannelListResponse, PlaylistItemListResponse, VideoListResponse, error_reason},
    config::ApiConfig,
    error::{Result, StatsError},
    source::VideoSource,
    types::{PlaylistPage, VideoStatistics},
};

/// [`VideoSource`] backed by the YouTube Data API v3.
#[derive(Clone, Debug)]
pub struct YoutubeClient {
    client: Client,
    config: ApiConfig,
}

impl YoutubeClient {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        let url = format!("{}/{}", self.config.base_url, endpoint);
        debug!(endpoint, ?params, "youtube api request");

        let resp = self
            .client
            .get(&url)
            .query(params)
            .query(&[("key", self.config.api_key.as_str())])
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            return Err(StatsError::RemoteCallFailure {
                endpoint,
                reason: error_reason(status, &text),
            });
        }

        serde_json::from_str(&text).map_err(|e| StatsError::RemoteCallFailure {
            endpoint,
            reason: format!("unexpected response body: {e}"),
        })
    }
}

#[async_trait]
impl VideoSource for YoutubeClient {
    async fn uploads_playlist_id(&self, channel_id: &str) -> Result<Option<String>> {
        let resp: ChannelListResponse = self
            .get_json("channels", &[("part", "contentDetails"), ("id", channel_id)])
            .await?;

        Ok(resp.uploads_playlist_id())
    }

    async fn playlist_page(
        &self,
        playlist_id: &str,
        page_token: Option<String>,
    ) -> Result<PlaylistPage> {
        let max_results = self.config.page_size.to_string();
        let mut params = vec![
            ("part", "snippet"),
            ("playlistId", playlist_id),
            ("maxResults", max_results.as_str()),
        ];
        if let Some(token) = page_token.as_deref() {
            params.push(("pageToken", token));
        }

        let resp: PlaylistItemListResponse = self.get_json("playlistItems", &params).await?;
        Ok(resp.into())
    }

    async fn video_statistics(&self, video_id: &str) -> Result<Option<VideoStatistics>> {
        let resp: VideoListResponse = self
            .get_json("videos", &[("part", "statistics"), ("id", video_id)])
            .await?;

        resp.into_statistics()
    }
}
