use reqwest::StatusCode;
use thiserror::Error as ThisError;

/// Failures raised while talking to the entity API.
///
/// Application-level failures (`success: false`) are not errors; they come
/// back as an `ActionResponse` and are handled by the panel.
#[derive(Debug, ThisError)]
pub enum PanelError {
    #[error("Upstream error with status: {0}")]
    UpstreamStatus(StatusCode),

    #[error("HTTP request error: {0}")]
    ReqwestError(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("URL parse error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid entity type token: {0:?}")]
    InvalidEntityType(String),
}
