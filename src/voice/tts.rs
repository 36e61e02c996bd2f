//! Text-to-speech (TTS) clients for Gemini and OpenAI

use serde::{Deserialize, Serialize};

use crate::api::response_error_detail;
use crate::config::{Provider, Settings};
use crate::retry::{RetryPolicy, retry_with_backoff};
use crate::voice::transcode::{WAV_MIME, parse_l16_sample_rate, wav_from_base64_pcm};
use crate::{Error, Result};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const OPENAI_TTS_URL: &str = "https://api.openai.com/v1/audio/speech";

/// Default Gemini TTS model
pub const GEMINI_TTS_MODEL: &str = "gemini-2.5-flash-preview-tts";
/// Default OpenAI TTS model
pub const OPENAI_TTS_MODEL: &str = "tts-1";

/// MIME type of OpenAI speech output
pub const MP3_MIME: &str = "audio/mpeg";

/// Second speaker used for two-speaker Gemini synthesis
const SECOND_SPEAKER_VOICE: &str = "Puck";

/// Result of a synthesis call
#[derive(Debug, Clone)]
pub struct Synthesis {
    /// Encoded audio, ready for playback or saving
    pub bytes: Vec<u8>,
    /// MIME type of `bytes`
    pub mime: &'static str,
}

impl Synthesis {
    /// File extension matching the audio MIME type
    #[must_use]
    pub fn extension(&self) -> &'static str {
        match self.mime {
            WAV_MIME => "wav",
            _ => "mp3",
        }
    }
}

/// Synthesizes speech from text
#[derive(Debug)]
pub struct TextToSpeech {
    client: reqwest::Client,
    provider: Provider,
    api_key: String,
    voice: String,
    model: String,
    multi_speaker: bool,
    retry: RetryPolicy,
}

impl TextToSpeech {
    /// Create a new TTS instance
    ///
    /// # Errors
    ///
    /// Returns error if the API key is empty
    pub fn new(provider: Provider, api_key: String, voice: String) -> Result<Self> {
        if api_key.is_empty() {
            return Err(Error::Config(format!(
                "{provider} API key required for TTS"
            )));
        }

        let model = match provider {
            Provider::Gemini => GEMINI_TTS_MODEL,
            Provider::OpenAI => OPENAI_TTS_MODEL,
        };

        Ok(Self {
            client: reqwest::Client::new(),
            provider,
            api_key,
            voice,
            model: model.to_string(),
            multi_speaker: false,
            retry: RetryPolicy::default(),
        })
    }

    /// Create a TTS instance from resolved settings
    ///
    /// # Errors
    ///
    /// Returns error if the API key is empty
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let mut tts = Self::new(
            settings.provider,
            settings.api_key.clone(),
            settings.voice.clone(),
        )?;

        if let Some(model) = &settings.tts_model {
            tts.model.clone_from(model);
        }
        tts.multi_speaker = settings.multi_speaker;
        tts.retry = settings.retry.clone();

        Ok(tts)
    }

    /// Override the retry policy
    #[must_use]
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Enable two-speaker synthesis (Gemini only; ignored by OpenAI)
    #[must_use]
    pub fn with_multi_speaker(mut self, enabled: bool) -> Self {
        self.multi_speaker = enabled;
        self
    }

    /// Synthesize text to speech
    ///
    /// Gemini responses arrive as base64 PCM and are rewrapped as WAV;
    /// OpenAI responses are MP3 and pass through unchanged.
    ///
    /// # Errors
    ///
    /// Returns error if the call fails after retries, the provider reports
    /// a failure, or the audio payload is missing or malformed.
    pub async fn synthesize(&self, text: &str) -> Result<Synthesis> {
        match self.provider {
            Provider::Gemini => self.synthesize_gemini(text).await,
            Provider::OpenAI => self.synthesize_openai(text).await,
        }
    }

    /// Synthesize using the Gemini `generateContent` endpoint
    async fn synthesize_gemini(&self, text: &str) -> Result<Synthesis> {
        let request = GeminiTtsRequest {
            contents: vec![Content {
                parts: vec![Part { text }],
            }],
            generation_config: GenerationConfig {
                speech_config: speech_config(&self.voice, self.multi_speaker),
            },
            model: &self.model,
        };

        let url = format!("{GEMINI_API_BASE}/{}:generateContent", self.model);

        let response = retry_with_backoff(&self.retry, || {
            self.client
                .post(&url)
                .query(&[("key", self.api_key.as_str())])
                .json(&request)
                .send()
        })
        .await?;

        if !response.status().is_success() {
            let mut detail = response_error_detail(response).await;
            if detail.contains("combination of response modalities") {
                detail =
                    "the selected model only supports audio output; use a TTS model".to_string();
            }
            return Err(Error::Tts(format!("Gemini: {detail}")));
        }

        let payload: GeminiTtsResponse = response.json().await?;
        let (data, mime_type) = extract_inline_audio(payload)?;

        let sample_rate = parse_l16_sample_rate(&mime_type)?;
        let bytes = wav_from_base64_pcm(&data, sample_rate)?;

        tracing::debug!(
            bytes = bytes.len(),
            sample_rate,
            voice = %self.voice,
            "synthesized speech via Gemini"
        );

        Ok(Synthesis {
            bytes,
            mime: WAV_MIME,
        })
    }

    /// Synthesize using the OpenAI speech endpoint
    async fn synthesize_openai(&self, text: &str) -> Result<Synthesis> {
        let request = OpenAiTtsRequest {
            model: &self.model,
            input: text,
            voice: &self.voice,
            response_format: "mp3",
        };

        let response = retry_with_backoff(&self.retry, || {
            self.client
                .post(OPENAI_TTS_URL)
                .header("Authorization", format!("Bearer {}", self.api_key))
                .json(&request)
                .send()
        })
        .await?;

        if !response.status().is_success() {
            let detail = response_error_detail(response).await;
            return Err(Error::Tts(format!("OpenAI: {detail}")));
        }

        let bytes = response.bytes().await?.to_vec();

        tracing::debug!(
            bytes = bytes.len(),
            voice = %self.voice,
            "synthesized speech via OpenAI"
        );

        Ok(Synthesis {
            bytes,
            mime: MP3_MIME,
        })
    }
}

/// Build the Gemini speech config: a single prebuilt voice, or a fixed
/// two-speaker arrangement with the configured voice as Speaker1
fn speech_config(voice: &str, multi_speaker: bool) -> SpeechConfig<'_> {
    if multi_speaker {
        SpeechConfig {
            voice_config: None,
            multi_speaker_voice_config: Some(MultiSpeakerVoiceConfig {
                speaker_voice_configs: vec![
                    SpeakerVoiceConfig {
                        speaker: "Speaker1",
                        voice_config: VoiceConfig {
                            prebuilt_voice_config: PrebuiltVoiceConfig { voice_name: voice },
                        },
                    },
                    SpeakerVoiceConfig {
                        speaker: "Speaker2",
                        voice_config: VoiceConfig {
                            prebuilt_voice_config: PrebuiltVoiceConfig {
                                voice_name: SECOND_SPEAKER_VOICE,
                            },
                        },
                    },
                ],
            }),
        }
    } else {
        SpeechConfig {
            voice_config: Some(VoiceConfig {
                prebuilt_voice_config: PrebuiltVoiceConfig { voice_name: voice },
            }),
            multi_speaker_voice_config: None,
        }
    }
}

/// Pull the base64 audio payload and its MIME type out of a Gemini response
fn extract_inline_audio(response: GeminiTtsResponse) -> Result<(String, String)> {
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().next())
        .and_then(|p| p.inline_data)
        .and_then(|d| Some((d.data?, d.mime_type?)))
        .ok_or_else(|| Error::Provider("response did not contain audio data".to_string()))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiTtsRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig<'a>,
    model: &'a str,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    speech_config: SpeechConfig<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SpeechConfig<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    voice_config: Option<VoiceConfig<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    multi_speaker_voice_config: Option<MultiSpeakerVoiceConfig<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceConfig<'a> {
    prebuilt_voice_config: PrebuiltVoiceConfig<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PrebuiltVoiceConfig<'a> {
    voice_name: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MultiSpeakerVoiceConfig<'a> {
    speaker_voice_configs: Vec<SpeakerVoiceConfig<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SpeakerVoiceConfig<'a> {
    speaker: &'a str,
    voice_config: VoiceConfig<'a>,
}

#[derive(Serialize)]
struct OpenAiTtsRequest<'a> {
    model: &'a str,
    input: &'a str,
    voice: &'a str,
    response_format: &'a str,
}

#[derive(Deserialize)]
struct GeminiTtsResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponsePart {
    inline_data: Option<InlineData>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    data: Option<String>,
    mime_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_api_key() {
        let err =
            TextToSpeech::new(Provider::Gemini, String::new(), "Puck".to_string()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn single_speaker_payload_shape() {
        let config = speech_config("Kore", false);
        let json = serde_json::to_value(&config).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "voiceConfig": {
                    "prebuiltVoiceConfig": { "voiceName": "Kore" }
                }
            })
        );
    }

    #[test]
    fn multi_speaker_payload_shape() {
        let config = speech_config("Kore", true);
        let json = serde_json::to_value(&config).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "multiSpeakerVoiceConfig": {
                    "speakerVoiceConfigs": [
                        {
                            "speaker": "Speaker1",
                            "voiceConfig": {
                                "prebuiltVoiceConfig": { "voiceName": "Kore" }
                            }
                        },
                        {
                            "speaker": "Speaker2",
                            "voiceConfig": {
                                "prebuiltVoiceConfig": { "voiceName": "Puck" }
                            }
                        }
                    ]
                }
            })
        );
    }

    #[test]
    fn extracts_inline_audio_from_response() {
        let response: GeminiTtsResponse = serde_json::from_str(
            r#"{
                "candidates": [{
                    "content": {
                        "parts": [{
                            "inlineData": {
                                "data": "AAAA",
                                "mimeType": "audio/L16;codec=pcm;rate=24000"
                            }
                        }]
                    }
                }]
            }"#,
        )
        .unwrap();

        let (data, mime) = extract_inline_audio(response).unwrap();
        assert_eq!(data, "AAAA");
        assert_eq!(mime, "audio/L16;codec=pcm;rate=24000");
    }

    #[test]
    fn missing_audio_data_is_provider_error() {
        let response: GeminiTtsResponse =
            serde_json::from_str(r#"{"candidates":[{"content":{"parts":[{}]}}]}"#).unwrap();

        let err = extract_inline_audio(response).unwrap_err();
        assert!(matches!(err, Error::Provider(_)));
    }

    #[test]
    fn empty_candidates_is_provider_error() {
        let response: GeminiTtsResponse = serde_json::from_str(r#"{"candidates":[]}"#).unwrap();
        let err = extract_inline_audio(response).unwrap_err();
        assert!(matches!(err, Error::Provider(_)));
    }

    #[test]
    fn extension_follows_mime() {
        let wav = Synthesis {
            bytes: vec![],
            mime: WAV_MIME,
        };
        assert_eq!(wav.extension(), "wav");

        let mp3 = Synthesis {
            bytes: vec![],
            mime: MP3_MIME,
        };
        assert_eq!(mp3.extension(), "mp3");
    }
}
