//! Settings for providers, credentials, and voices
//!
//! Call sites receive an explicit [`Settings`] value; nothing in the crate
//! reads ambient global state. Settings come from a partial TOML overlay
//! file plus `ALOUD_PROVIDER` / `ALOUD_API_KEY` environment overrides.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;

use crate::retry::RetryPolicy;
use crate::voice::DEFAULT_GEMINI_VOICE;
use crate::{Error, Result};

/// Default OpenAI TTS voice
const DEFAULT_OPENAI_VOICE: &str = "alloy";

/// Cloud provider backing the TTS and LLM calls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Provider {
    /// Google Gemini (`generativelanguage.googleapis.com`)
    #[default]
    Gemini,
    /// OpenAI (`api.openai.com`)
    OpenAI,
}

impl Provider {
    /// Provider identifier as used in config files
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Gemini => "gemini",
            Self::OpenAI => "openai",
        }
    }

    /// Default voice for this provider
    #[must_use]
    pub const fn default_voice(self) -> &'static str {
        match self {
            Self::Gemini => DEFAULT_GEMINI_VOICE,
            Self::OpenAI => DEFAULT_OPENAI_VOICE,
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "gemini" => Ok(Self::Gemini),
            "openai" => Ok(Self::OpenAI),
            other => Err(Error::Config(format!("unknown provider: {other}"))),
        }
    }
}

/// Resolved settings handed to the TTS and LLM clients
#[derive(Debug, Clone)]
pub struct Settings {
    /// Active provider
    pub provider: Provider,
    /// API key for the provider (opaque; never validated here)
    pub api_key: String,
    /// Voice name for synthesis
    pub voice: String,
    /// Use two-speaker synthesis (Gemini only)
    pub multi_speaker: bool,
    /// TTS model override
    pub tts_model: Option<String>,
    /// LLM model override
    pub llm_model: Option<String>,
    /// Retry policy for outbound calls
    pub retry: RetryPolicy,
}

impl Settings {
    /// Create settings with provider defaults
    #[must_use]
    pub fn new(provider: Provider, api_key: String) -> Self {
        Self {
            provider,
            api_key,
            voice: provider.default_voice().to_string(),
            multi_speaker: false,
            tts_model: None,
            llm_model: None,
            retry: RetryPolicy::default(),
        }
    }

    /// Load settings from the config file (or `path` when given) and apply
    /// environment overrides
    ///
    /// # Errors
    ///
    /// Returns error if an explicitly given file cannot be read or parsed,
    /// or if a provider name is unrecognized.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(p) => SettingsFile::read(p)?,
            None => default_config_path()
                .filter(|p| p.exists())
                .map(|p| SettingsFile::read(&p))
                .transpose()?
                .unwrap_or_default(),
        };

        let mut provider = file
            .provider
            .as_deref()
            .map(Provider::from_str)
            .transpose()?
            .unwrap_or_default();

        if let Ok(value) = std::env::var("ALOUD_PROVIDER") {
            provider = value.parse()?;
        }

        let mut api_key = file.api_key.unwrap_or_default();
        if let Ok(value) = std::env::var("ALOUD_API_KEY") {
            api_key = value;
        }

        Ok(Self {
            provider,
            api_key,
            voice: file
                .tts
                .voice
                .unwrap_or_else(|| provider.default_voice().to_string()),
            multi_speaker: file.tts.multi_speaker.unwrap_or(false),
            tts_model: file.tts.model,
            llm_model: file.llm.model,
            retry: RetryPolicy::default(),
        })
    }
}

/// Top-level TOML settings file schema; all fields optional
#[derive(Debug, Default, Deserialize)]
struct SettingsFile {
    /// Provider identifier ("gemini" or "openai")
    #[serde(default)]
    provider: Option<String>,

    /// API key for the provider
    #[serde(default)]
    api_key: Option<String>,

    /// TTS configuration
    #[serde(default)]
    tts: TtsFileConfig,

    /// LLM configuration
    #[serde(default)]
    llm: LlmFileConfig,
}

/// TTS-related configuration
#[derive(Debug, Default, Deserialize)]
struct TtsFileConfig {
    /// Voice name
    voice: Option<String>,

    /// Model override
    model: Option<String>,

    /// Two-speaker synthesis toggle
    multi_speaker: Option<bool>,
}

/// LLM-related configuration
#[derive(Debug, Default, Deserialize)]
struct LlmFileConfig {
    /// Model override
    model: Option<String>,
}

impl SettingsFile {
    fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let file = toml::from_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded settings file");
        Ok(file)
    }
}

/// Return the config file path: `~/.config/aloud/config.toml`
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|d| d.config_dir().join("aloud").join("config.toml"))
}
