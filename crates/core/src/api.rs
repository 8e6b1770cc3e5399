//! Response bodies of the three YouTube Data API v3 endpoints we call.
//!
//! Only the parts we read are modelled. Everything is optional because the
//! API omits fields freely (hidden like counts, private videos, empty pages).

use serde::Deserialize;

use crate::{
    error::{Result, StatsError},
    types::{PlaylistItem, PlaylistPage, VideoStatistics},
};

// channels?part=contentDetails

#[derive(Debug, Deserialize)]
pub struct ChannelListResponse {
    pub items: Option<Vec<ChannelResource>>,
}

#[derive(Debug, Deserialize)]
pub struct ChannelResource {
    #[serde(rename = "contentDetails")]
    pub content_details: Option<ChannelContentDetails>,
}

#[derive(Debug, Deserialize)]
pub struct ChannelContentDetails {
    #[serde(rename = "relatedPlaylists")]
    pub related_playlists: Option<RelatedPlaylists>,
}

#[derive(Debug, Deserialize)]
pub struct RelatedPlaylists {
    pub uploads: Option<String>,
}

impl ChannelListResponse {
    pub fn uploads_playlist_id(self) -> Option<String> {
        self.items?
            .into_iter()
            .next()?
            .content_details?
            .related_playlists?
            .uploads
            .filter(|id| !id.is_empty())
    }
}

// playlistItems?part=snippet

#[derive(Debug, Deserialize)]
pub struct PlaylistItemListResponse {
    pub items: Option<Vec<PlaylistItemResource>>,
    #[serde(rename = "nextPageToken")]
    pub next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PlaylistItemResource {
    pub snippet: PlaylistItemSnippet,
}

#[derive(Debug, Deserialize)]
pub struct PlaylistItemSnippet {
    #[serde(default)]
    pub title: String,
    #[serde(rename = "publishedAt", default)]
    pub published_at: String,
    #[serde(rename = "resourceId")]
    pub resource_id: ResourceId,
}

#[derive(Debug, Deserialize)]
pub struct ResourceId {
    #[serde(rename = "videoId")]
    pub video_id: String,
}

impl From<PlaylistItemListResponse> for PlaylistPage {
    fn from(resp: PlaylistItemListResponse) -> Self {
        PlaylistPage {
            items: resp
                .items
                .unwrap_or_default()
                .into_iter()
                .map(|item| PlaylistItem {
                    video_id: item.snippet.resource_id.video_id,
                    title: item.snippet.title,
                    published_at: item.snippet.published_at,
                })
                .collect(),
            next_page_token: resp.next_page_token.filter(|token| !token.is_empty()),
        }
    }
}

// videos?part=statistics

#[derive(Debug, Deserialize)]
pub struct VideoListResponse {
    pub items: Option<Vec<VideoResource>>,
}

#[derive(Debug, Deserialize)]
pub struct VideoResource {
    pub statistics: Option<RawVideoStatistics>,
}

/// Counters come back as decimal strings.
#[derive(Debug, Default, Deserialize)]
pub struct RawVideoStatistics {
    #[serde(rename = "viewCount")]
    pub view_count: Option<String>,
    #[serde(rename = "likeCount")]
    pub like_count: Option<String>,
}

impl VideoListResponse {
    /// `None` when the video is gone or private and the API returns no item.
    pub fn into_statistics(self) -> Result<Option<VideoStatistics>> {
        let Some(video) = self.items.and_then(|items| items.into_iter().next()) else {
            return Ok(None);
        };
        let raw = video.statistics.unwrap_or_default();

        Ok(Some(VideoStatistics {
            view_count: parse_count("viewCount", raw.view_count.as_deref())?,
            like_count: parse_count("likeCount", raw.like_count.as_deref())?,
        }))
    }
}

fn parse_count(field: &str, value: Option<&str>) -> Result<u64> {
    match value {
        None => Ok(0),
        Some(s) => s
            .trim()
            .parse::<u64>()
            .map_err(|e| StatsError::RemoteCallFailure {
                endpoint: "videos",
                reason: format!("invalid {field} {s:?}: {e}"),
            }),
    }
}

// error envelope

#[derive(Debug, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub message: Option<String>,
}

/// Best human-readable reason for a failed call.
pub fn error_reason(status: reqwest::StatusCode, body: &str) -> String {
    match serde_json::from_str::<ApiErrorResponse>(body) {
        Ok(ApiErrorResponse {
            error: ApiErrorBody {
                message: Some(message),
                ..
            },
        }) => format!("{status}: {message}"),
        _ => format!("{status}: {}", body.trim()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uploads_playlist_from_channel_response() {
        let body = r#"{
            "kind": "youtube#channelListResponse",
            "items": [{
                "kind": "youtube#channel",
                "id": "UCc_pE2B8AkSK-o1SRMZtL7g",
                "contentDetails": {
                    "relatedPlaylists": { "likes": "", "uploads": "UUc_pE2B8AkSK-o1SRMZtL7g" }
                }
            }]
        }"#;
        let resp: ChannelListResponse = serde_json::from_str(body).unwrap();
        assert_eq!(
            resp.uploads_playlist_id().as_deref(),
            Some("UUc_pE2B8AkSK-o1SRMZtL7g")
        );
    }

    #[test]
    fn channel_response_without_items() {
        let body = r#"{"kind": "youtube#channelListResponse", "pageInfo": {"totalResults": 0}}"#;
        let resp: ChannelListResponse = serde_json::from_str(body).unwrap();
        assert_eq!(resp.uploads_playlist_id(), None);
    }

    #[test]
    fn playlist_page_keeps_order_and_cursor() {
        let body = r#"{
            "nextPageToken": "EAAaBlBUOkNESQ",
            "items": [
                {"snippet": {"title": "first", "publishedAt": "2024-05-01T10:00:00Z", "resourceId": {"kind": "youtube#video", "videoId": "aaa"}}},
                {"snippet": {"title": "second", "publishedAt": "2024-04-01T10:00:00Z", "resourceId": {"kind": "youtube#video", "videoId": "bbb"}}}
            ]
        }"#;
        let resp: PlaylistItemListResponse = serde_json::from_str(body).unwrap();
        let page = PlaylistPage::from(resp);

        assert_eq!(page.next_page_token.as_deref(), Some("EAAaBlBUOkNESQ"));
        let ids: Vec<_> = page.items.iter().map(|i| i.video_id.as_str()).collect();
        assert_eq!(ids, ["aaa", "bbb"]);
        assert_eq!(page.items[0].published_at, "2024-05-01T10:00:00Z");
    }

    #[test]
    fn empty_cursor_means_last_page() {
        let resp: PlaylistItemListResponse =
            serde_json::from_str(r#"{"nextPageToken": "", "items": []}"#).unwrap();
        let page = PlaylistPage::from(resp);
        assert!(page.items.is_empty());
        assert_eq!(page.next_page_token, None);
    }

    #[test]
    fn missing_counters_default_to_zero() {
        let body = r#"{"items": [{"id": "aaa", "statistics": {"commentCount": "3"}}]}"#;
        let resp: VideoListResponse = serde_json::from_str(body).unwrap();
        assert_eq!(
            resp.into_statistics().unwrap(),
            Some(VideoStatistics { view_count: 0, like_count: 0 })
        );

        let resp: VideoListResponse =
            serde_json::from_str(r#"{"items": [{"id": "aaa"}]}"#).unwrap();
        assert_eq!(resp.into_statistics().unwrap(), Some(VideoStatistics::default()));
    }

    #[test]
    fn counters_are_parsed_from_strings() {
        let body = r#"{"items": [{"id": "aaa", "statistics": {"viewCount": "12345", "likeCount": "67"}}]}"#;
        let resp: VideoListResponse = serde_json::from_str(body).unwrap();
        assert_eq!(
            resp.into_statistics().unwrap(),
            Some(VideoStatistics { view_count: 12345, like_count: 67 })
        );
    }

    #[test]
    fn resources_without_id_still_parse() {
        let body = r#"{"items": [{"contentDetails": {"relatedPlaylists": {"uploads": "UU1"}}}]}"#;
        let resp: ChannelListResponse = serde_json::from_str(body).unwrap();
        assert_eq!(resp.uploads_playlist_id().as_deref(), Some("UU1"));

        let body = r#"{"items": [{"statistics": {"viewCount": "5"}}]}"#;
        let resp: VideoListResponse = serde_json::from_str(body).unwrap();
        assert_eq!(
            resp.into_statistics().unwrap(),
            Some(VideoStatistics { view_count: 5, like_count: 0 })
        );

        let body = r#"{"error": {"message": "no"}}"#;
        let reason = error_reason(reqwest::StatusCode::FORBIDDEN, body);
        assert_eq!(reason, "403 Forbidden: no");
    }

    #[test]
    fn deleted_video_has_no_statistics() {
        let resp: VideoListResponse = serde_json::from_str(r#"{"items": []}"#).unwrap();
        assert_eq!(resp.into_statistics().unwrap(), None);
    }

    #[test]
    fn garbage_counter_is_a_remote_failure() {
        let body = r#"{"items": [{"id": "aaa", "statistics": {"viewCount": "lots"}}]}"#;
        let resp: VideoListResponse = serde_json::from_str(body).unwrap();
        let err = resp.into_statistics().unwrap_err();
        assert!(err.is_remote_failure());
    }

    #[test]
    fn error_reason_prefers_api_message() {
        let body = r#"{"error": {"code": 403, "message": "The request cannot be completed because you have exceeded your quota."}}"#;
        let reason = error_reason(reqwest::StatusCode::FORBIDDEN, body);
        assert_eq!(
            reason,
            "403 Forbidden: The request cannot be completed because you have exceeded your quota."
        );

        let reason = error_reason(reqwest::StatusCode::BAD_GATEWAY, "upstream down\n");
        assert_eq!(reason, "502 Bad Gateway: upstream down");
    }
}
