use thiserror::Error;

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("Missing API key: {env_var} environment variable is not set")]
    MissingCredential { env_var: String },

    #[error("Channel not found: {channel_id}")]
    ChannelNotFound { channel_id: String },

    #[error("No videos found for channel {channel_id}")]
    NoVideosFound { channel_id: String },

    #[error("YouTube API call to {endpoint} failed: {reason}")]
    RemoteCallFailure {
        endpoint: &'static str,
        reason: String,
    },

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Spreadsheet export failed: {0}")]
    ExportFailed(#[from] rust_xlsxwriter::XlsxError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl StatsError {
    /// True for every failure that came from talking to the YouTube API.
    pub fn is_remote_failure(&self) -> bool {
        matches!(
            self,
            StatsError::RemoteCallFailure { .. } | StatsError::ApiError(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, StatsError>;
