//! Aloud - cloud text-to-speech and read-aloud toolkit
//!
//! This library converts text to speech through the Gemini or OpenAI APIs
//! and can ask the same providers to continue or summarize a piece of text.
//!
//! The two load-bearing pieces are:
//! - [`voice::wav_from_base64_pcm`] - rewraps the raw base64 PCM stream
//!   Gemini returns into a canonical playable WAV blob
//! - [`retry::retry_with_backoff`] - bounded exponential-backoff wrapper
//!   around every outbound API call
//!
//! # Flow
//!
//! ```text
//! text + Settings
//!     └─> TextToSpeech::synthesize ──(retry_with_backoff)──> provider API
//!             ├─ Gemini: base64 PCM + audio/L16 rate ─> wav_from_base64_pcm
//!             └─ OpenAI: MP3 bytes, passed through
//!     └─> Synthesis { bytes, mime } -> playback / file (caller's concern)
//! ```

mod api;

pub mod config;
pub mod error;
pub mod llm;
pub mod retry;
pub mod voice;

pub use config::{Provider, Settings};
pub use error::{Error, Result};
pub use llm::TextGenerator;
pub use retry::{RetryPolicy, retry_with_backoff};
pub use voice::{Synthesis, TextToSpeech};
