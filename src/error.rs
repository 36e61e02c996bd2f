//! Error types for aloud

use thiserror::Error;

/// Result type alias for aloud operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when synthesizing speech or generating text
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Malformed base64 audio payload
    #[error("base64 decode error: {0}")]
    Decode(#[from] base64::DecodeError),

    /// Decoded PCM buffer is not a whole number of 16-bit samples
    #[error("misaligned PCM buffer: {len} bytes is not a multiple of 2")]
    Alignment {
        /// Decoded byte length that failed the check
        len: usize,
    },

    /// Audio encoding error
    #[error("audio error: {0}")]
    Audio(String),

    /// Malformed or incomplete provider response
    #[error("provider response error: {0}")]
    Provider(String),

    /// Text-to-speech error
    #[error("TTS error: {0}")]
    Tts(String),

    /// Text generation error
    #[error("LLM error: {0}")]
    Llm(String),

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP error
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
}
