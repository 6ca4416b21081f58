use anyhow::{Result, anyhow};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::config::{Config, GeminiConfig};

const GEMINI_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Turns a document into the target language.
pub trait Translator {
    fn translate(&self, content: &str, target_lang: &str) -> Result<String>;
}

#[derive(Debug, Clone, Copy)]
pub enum LlmProvider {
    Gemini,
}

impl LlmProvider {
    fn as_str(&self) -> &'static str {
        match self {
            LlmProvider::Gemini => "gemini",
        }
    }
}

#[derive(Debug)]
pub struct LlmTranslator {
    provider: LlmProvider,
    client: Client,
    config: Config,
}

impl LlmTranslator {
    pub fn new(config: &Config) -> Result<Self> {
        let provider = match config.provider.as_str() {
            "gemini" => LlmProvider::Gemini,
            _ => return Err(anyhow!("Unsupported LLM provider: {}", config.provider)),
        };

        if config.is_placeholder_key() {
            return Err(anyhow!(
                "API key is not configured for provider: {}",
                provider.as_str()
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout.into()))
            .build()?;

        Ok(Self {
            provider,
            client,
            config: config.clone(),
        })
    }
}

impl Translator for LlmTranslator {
    fn translate(&self, content: &str, target_lang: &str) -> Result<String> {
        let prompt = assemble(&self.config.prompt_for(target_lang), content);
        match self.provider {
            LlmProvider::Gemini => self.send_gemini_request(&prompt),
        }
    }
}

fn assemble(instruction: &str, content: &str) -> String {
    format!("{instruction}\n\n{content}")
}

#[derive(Serialize, Deserialize, Debug)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize, Debug)]
struct Part {
    text: String,
}

#[derive(Serialize)]
struct ApiThinkingConfig {
    #[serde(skip_serializing_if = "Option::is_none", rename = "thinkingBudget")]
    thinking_budget: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "thinkingLevel")]
    thinking_level: Option<String>,
}

#[derive(Serialize)]
struct ApiGenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "topP")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "topK")]
    top_k: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "maxOutputTokens")]
    max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "thinkingConfig")]
    thinking_config: Option<ApiThinkingConfig>,
}

impl From<&GeminiConfig> for ApiGenerationConfig {
    fn from(gc: &GeminiConfig) -> Self {
        // A level supersedes a token budget.
        let thinking_config = match (&gc.thinking_level, gc.thinking_budget) {
            (Some(level), _) => Some(ApiThinkingConfig {
                thinking_level: Some(level.clone()),
                thinking_budget: None,
            }),
            (None, Some(budget)) => Some(ApiThinkingConfig {
                thinking_budget: Some(budget),
                thinking_level: None,
            }),
            (None, None) => None,
        };

        ApiGenerationConfig {
            temperature: gc.temperature,
            top_p: gc.top_p,
            top_k: gc.top_k,
            max_output_tokens: gc.max_output_tokens,
            thinking_config,
        }
    }
}

#[derive(Serialize)]
struct RequestBody {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: ApiGenerationConfig,
}

#[derive(Deserialize, Debug)]
struct ResponseBody {
    candidates: Option<Vec<Candidate>>,
    error: Option<ApiError>,
}

#[derive(Deserialize, Debug)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Deserialize, Debug)]
struct ApiError {
    code: u16,
    message: String,
}

impl LlmTranslator {
    fn send_gemini_request(&self, prompt: &str) -> Result<String> {
        let gemini = &self.config.gemini;
        let url = format!("{}/{}:generateContent", GEMINI_URL, gemini.model);
        let request_body = request_body(gemini, prompt);

        debug!(%url, prompt_len = prompt.len(), "sending translation request");

        let res = self
            .client
            .post(&url)
            .header("x-goog-api-key", &gemini.key)
            .json(&request_body)
            .send()?;

        let status = res.status();
        let body_text = res.text()?;
        let body = parse_response(&body_text)?;

        if !status.is_success() {
            return Err(match body.error {
                Some(api_error) => anyhow!(
                    "LLM API error {}: {}",
                    api_error.code,
                    api_error.message
                ),
                None => anyhow!("LLM request failed with status {}: {:?}", status, body),
            });
        }

        extract_text(body)
    }
}

fn request_body(gemini: &GeminiConfig, prompt: &str) -> RequestBody {
    RequestBody {
        contents: vec![Content {
            parts: vec![Part {
                text: prompt.to_string(),
            }],
        }],
        generation_config: ApiGenerationConfig::from(gemini),
    }
}

fn parse_response(body_text: &str) -> Result<ResponseBody> {
    serde_json::from_str(body_text).map_err(|e| {
        anyhow!(
            "Failed to deserialize Gemini API response: {} - Body: {}",
            e,
            body_text
        )
    })
}

// Long documents come back split across several parts.
fn extract_text(body: ResponseBody) -> Result<String> {
    if let Some(candidates) = &body.candidates
        && let Some(candidate) = candidates.first()
        && let Some(content) = &candidate.content
        && !content.parts.is_empty()
    {
        return Ok(content.parts.iter().map(|p| p.text.as_str()).collect());
    }

    Err(anyhow!(
        "LLM response successful but no text content found. Response: {:?}",
        body
    ))
}
