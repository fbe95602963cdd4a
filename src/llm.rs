//! Example sentences from a language model.
use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::error::{Error, Result};
use crate::lang::Language;

pub const MAX_SENTENCE_CHARS: usize = 1000;

#[async_trait]
pub trait LlmProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn ask(&self, prompt: &str) -> anyhow::Result<String>;

    /// Fails early when the backend can't possibly answer, e.g. a local
    /// server that isn't running or a missing API key.
    async fn check(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

pub fn sentence_prompt(word_or_phrase: &str, language: Language, is_phrase: bool) -> String {
    let kind = if is_phrase { "phrase" } else { "word" };
    format!(
        "Generate one sentence in {language} using the {kind} \"{word_or_phrase}\". \
         The answer must only contain the sentence itself."
    )
}

pub async fn generate_sentence(
    llm: &dyn LlmProvider,
    word_or_phrase: &str,
    language: Language,
    is_phrase: bool,
) -> Result<String> {
    let prompt = sentence_prompt(word_or_phrase, language, is_phrase);
    log::debug!("LLM request, provider={}, prompt='{prompt}'", llm.name());
    let response = llm
        .ask(&prompt)
        .await
        .map_err(|e| Error::unavailable(llm.name(), e))?;
    log::debug!("LLM response='{response}'");

    let sentence = response.trim();
    let len = sentence.chars().count();
    if len <= word_or_phrase.chars().count() {
        return Err(Error::InvalidGeneration(format!("too short response: {sentence}")));
    }
    if len >= MAX_SENTENCE_CHARS {
        return Err(Error::InvalidGeneration(format!("too long response, len={len}")));
    }
    Ok(sentence.to_string())
}

pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
pub const DEFAULT_OLLAMA_MODEL: &str = "llama3.1:8b";

/// A local Ollama server.
pub struct OllamaProvider {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

#[derive(Deserialize)]
struct OllamaResponse {
    response: String,
}

impl OllamaProvider {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
        }
    }
}

#[async_trait]
impl LlmProvider for OllamaProvider {
    fn name(&self) -> &'static str {
        "ollama"
    }

    async fn ask(&self, prompt: &str) -> anyhow::Result<String> {
        let body = json!({
            "model": self.model,
            "prompt": prompt,
            "stream": false,
            "options": { "top_k": 20 },
        });
        let res: OllamaResponse = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .json(&body)
            .send()
            .await
            .context("Failed to call Ollama")?
            .error_for_status()?
            .json()
            .await
            .context("Failed to parse Ollama response")?;
        Ok(res.response)
    }

    async fn check(&self) -> anyhow::Result<()> {
        self.client
            .get(format!("{}/api/tags", self.base_url))
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .with_context(|| format!("Ollama is not accessible at {}. Did you forget to start it?", self.base_url))?;
        Ok(())
    }
}

pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4.1-nano";
const OPENAI_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

pub struct OpenAiProvider {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

#[derive(Deserialize)]
struct ChatCompletion {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

impl OpenAiProvider {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    pub fn from_env(model: impl Into<String>) -> anyhow::Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY").context("OPENAI_API_KEY not set")?;
        Ok(Self::new(api_key, model))
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn ask(&self, prompt: &str) -> anyhow::Result<String> {
        let body = json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": prompt }],
        });
        let completion: ChatCompletion = self
            .client
            .post(OPENAI_ENDPOINT)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .context("Failed to call OpenAI")?
            .error_for_status()?
            .json()
            .await
            .context("Failed to parse OpenAI response")?;
        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .context("OpenAI response has no content")
    }

    async fn check(&self) -> anyhow::Result<()> {
        anyhow::ensure!(!self.api_key.trim().is_empty(), "OPENAI_API_KEY is empty");
        Ok(())
    }
}

/// Canned answer for tests and dry runs.
#[derive(Debug, Clone)]
pub struct StubLlmProvider {
    response: String,
}

impl StubLlmProvider {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }
}

#[async_trait]
impl LlmProvider for StubLlmProvider {
    fn name(&self) -> &'static str {
        "stub"
    }

    async fn ask(&self, _prompt: &str) -> anyhow::Result<String> {
        Ok(self.response.clone())
    }
}
