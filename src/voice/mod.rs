//! Voice synthesis module
//!
//! Holds the TTS provider clients, the PCM-to-WAV transcoder, and the
//! prebuilt voice catalog.

mod transcode;
mod tts;
mod voices;

pub use transcode::{WAV_MIME, parse_l16_sample_rate, wav_from_base64_pcm, wav_from_samples};
pub use tts::{GEMINI_TTS_MODEL, MP3_MIME, OPENAI_TTS_MODEL, Synthesis, TextToSpeech};
pub use voices::{DEFAULT_GEMINI_VOICE, VOICES, Voice, find_voice};
