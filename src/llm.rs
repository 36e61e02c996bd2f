//! LLM text generation for the continue / summarize flows

use serde::{Deserialize, Serialize};

use crate::api::response_error_detail;
use crate::config::{Provider, Settings};
use crate::retry::{RetryPolicy, retry_with_backoff};
use crate::{Error, Result};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const OPENAI_CHAT_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Default Gemini text model
pub const GEMINI_LLM_MODEL: &str = "gemini-2.5-flash-preview-05-20";
/// Default OpenAI text model
pub const OPENAI_LLM_MODEL: &str = "gpt-3.5-turbo";

const CONTINUE_PROMPT: &str = "Continue the following text:";
const SCRIPT_PROMPT: &str = "Prepare a script from the following text, using clear speaker \
                             names like \"Speaker1\" and \"Speaker2\":";

/// Generates text continuations and summaries via a cloud LLM
#[derive(Debug)]
pub struct TextGenerator {
    client: reqwest::Client,
    provider: Provider,
    api_key: String,
    model: String,
    retry: RetryPolicy,
}

impl TextGenerator {
    /// Create a new text generator
    ///
    /// # Errors
    ///
    /// Returns error if the API key is empty
    pub fn new(provider: Provider, api_key: String) -> Result<Self> {
        if api_key.is_empty() {
            return Err(Error::Config(format!(
                "{provider} API key required for text generation"
            )));
        }

        let model = match provider {
            Provider::Gemini => GEMINI_LLM_MODEL,
            Provider::OpenAI => OPENAI_LLM_MODEL,
        };

        Ok(Self {
            client: reqwest::Client::new(),
            provider,
            api_key,
            model: model.to_string(),
            retry: RetryPolicy::default(),
        })
    }

    /// Create a text generator from resolved settings
    ///
    /// # Errors
    ///
    /// Returns error if the API key is empty
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let mut generator = Self::new(settings.provider, settings.api_key.clone())?;

        if let Some(model) = &settings.llm_model {
            generator.model.clone_from(model);
        }
        generator.retry = settings.retry.clone();

        Ok(generator)
    }

    /// Override the retry policy
    #[must_use]
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Ask the model to continue `text`
    ///
    /// # Errors
    ///
    /// Returns error if the call fails or no text comes back
    pub async fn continue_text(&self, text: &str) -> Result<String> {
        self.generate(CONTINUE_PROMPT, text).await
    }

    /// Ask the model to rewrite `text` as a two-speaker script
    ///
    /// # Errors
    ///
    /// Returns error if the call fails or no text comes back
    pub async fn summarize_as_script(&self, text: &str) -> Result<String> {
        self.generate(SCRIPT_PROMPT, text).await
    }

    /// Run an instruction prompt over the user's text
    async fn generate(&self, prompt: &str, text: &str) -> Result<String> {
        let input = join_prompt(prompt, text);

        let generated = match self.provider {
            Provider::Gemini => self.generate_gemini(&input).await?,
            Provider::OpenAI => self.generate_openai(&input).await?,
        };

        let generated = generated.trim();
        if generated.is_empty() {
            return Err(Error::Provider("no text was generated".to_string()));
        }

        tracing::debug!(chars = generated.len(), "generated text");

        Ok(generated.to_string())
    }

    /// Generate using the Gemini `generateContent` endpoint
    async fn generate_gemini(&self, input: &str) -> Result<String> {
        let request = GeminiGenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: input }],
            }],
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
            let detail = response_error_detail(response).await;
            return Err(Error::Llm(format!("Gemini: {detail}")));
        }

        let payload: GeminiGenerateResponse = response.json().await?;
        extract_gemini_text(payload)
            .ok_or_else(|| Error::Provider("no text was generated".to_string()))
    }

    /// Generate using the OpenAI chat completions endpoint
    async fn generate_openai(&self, input: &str) -> Result<String> {
        let request = ChatCompletionRequest {
            model: &self.model,
            messages: vec![Message {
                role: "user",
                content: input,
            }],
        };

        let response = retry_with_backoff(&self.retry, || {
            self.client
                .post(OPENAI_CHAT_URL)
                .header("Authorization", format!("Bearer {}", self.api_key))
                .json(&request)
                .send()
        })
        .await?;

        if !response.status().is_success() {
            let detail = response_error_detail(response).await;
            return Err(Error::Llm(format!("OpenAI: {detail}")));
        }

        let payload: ChatCompletionResponse = response.json().await?;
        extract_openai_text(payload)
            .ok_or_else(|| Error::Provider("no text was generated".to_string()))
    }
}

/// Join an instruction prompt and the user's text into a single input
fn join_prompt(prompt: &str, text: &str) -> String {
    format!("{prompt}\n\n{text}")
}

/// Pull the generated text out of a Gemini response
fn extract_gemini_text(response: GeminiGenerateResponse) -> Option<String> {
    response
        .candidates
        .into_iter()
        .next()?
        .content?
        .parts
        .into_iter()
        .next()?
        .text
}

/// Pull the generated text out of an OpenAI chat completion
fn extract_openai_text(response: ChatCompletionResponse) -> Option<String> {
    response.choices.into_iter().next()?.message.content
}

#[derive(Serialize)]
struct GeminiGenerateRequest<'a> {
    contents: Vec<Content<'a>>,
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
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct GeminiGenerateResponse {
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
struct ResponsePart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}
