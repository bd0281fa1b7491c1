//! Error types shared across the editor.

use std::path::PathBuf;

/// Anything that can go wrong while setting up or running the editor
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error("window creation failed: {0}")]
    Window(String),

    #[error("OpenGL setup failed: {0}")]
    Gl(String),

    #[error("shader compilation failed: {0}")]
    Shader(String),

    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid config: {0}")]
    ConfigInvalid(String),

    #[error("logging setup failed: {0}")]
    Logging(String),

    #[error("HTTP client setup failed: {0}")]
    HttpClient(#[source] reqwest::Error),

    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to read {path}: {source}")]
    MediaRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode image from {url}: {source}")]
    ImageDecode {
        url: String,
        #[source]
        source: image::ImageError,
    },

    #[error("audio output unavailable: {0}")]
    AudioOutput(String),

    #[error("failed to decode audio from {url}: {reason}")]
    AudioDecode { url: String, reason: String },

    #[error("video playback failed for {url}: {reason}")]
    Video { url: String, reason: String },
}

pub type Result<T> = std::result::Result<T, EditorError>;
