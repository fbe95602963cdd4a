use anyhow::Context;
use async_trait::async_trait;

use crate::lang::Language;
use crate::nlp::PartOfSpeech;

#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str, src: Language, dst: Language) -> anyhow::Result<String>;
}

/// Grammatical clean-up of a translation into the primary language, which is
/// expected to already be lower-cased.
pub fn post_process(translated: &str, pos: PartOfSpeech) -> String {
    match pos {
        PartOfSpeech::Verb if !translated.starts_with("to ") => format!("to {translated}"),
        PartOfSpeech::Noun => translated
            .strip_prefix("the ")
            .unwrap_or(translated)
            .to_string(),
        _ => translated.to_string(),
    }
}

const PUBLIC_ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";
const CLOUD_ENDPOINT: &str = "https://translation.googleapis.com/language/translate/v2";

/// Google Translate. Uses the Cloud API when an API key is configured and the
/// public web endpoint otherwise.
pub struct GoogleTranslator {
    client: reqwest::Client,
    api_key: Option<String>,
}

impl GoogleTranslator {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
        }
    }

    pub fn from_env() -> Self {
        Self::new(std::env::var("GOOGLE_TRANSLATE_API_KEY").ok())
    }

    async fn translate_cloud(&self, api_key: &str, text: &str, src: Language, dst: Language) -> anyhow::Result<String> {
        let value: serde_json::Value = self
            .client
            .post(CLOUD_ENDPOINT)
            .query(&[("key", api_key)])
            .form(&[
                ("q", text),
                ("source", src.iso_639_1()),
                ("target", dst.iso_639_1()),
                ("format", "text"),
            ])
            .send()
            .await
            .context("Failed to call Google Translate API")?
            .error_for_status()?
            .json()
            .await
            .context("Failed to parse Google Translate response")?;
        value["data"]["translations"][0]["translatedText"]
            .as_str()
            .map(String::from)
            .context("Google Translate response has no translation")
    }

    async fn translate_public(&self, text: &str, src: Language, dst: Language) -> anyhow::Result<String> {
        let value: serde_json::Value = self
            .client
            .get(PUBLIC_ENDPOINT)
            .query(&[
                ("client", "gtx"),
                ("sl", src.iso_639_1()),
                ("tl", dst.iso_639_1()),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await
            .context("Failed to call Google Translate")?
            .error_for_status()?
            .json()
            .await
            .context("Failed to parse Google Translate response")?;
        // [[["translated chunk", "source chunk", ...], ...], ...]
        let chunks = value[0]
            .as_array()
            .context("Google Translate response has no translation")?;
        Ok(chunks
            .iter()
            .filter_map(|chunk| chunk[0].as_str())
            .collect())
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(&self, text: &str, src: Language, dst: Language) -> anyhow::Result<String> {
        let translated = match &self.api_key {
            Some(key) => self.translate_cloud(key, text, src, dst).await?,
            None => self.translate_public(text, src, dst).await?,
        };
        log::debug!("translated {src} \"{text}\" to {dst} \"{translated}\"");
        Ok(translated)
    }
}

/// Answers every request with the same text.
#[derive(Debug, Clone)]
pub struct StubTranslator {
    response: String,
}

impl StubTranslator {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }
}

#[async_trait]
impl Translator for StubTranslator {
    async fn translate(&self, _text: &str, _src: Language, _dst: Language) -> anyhow::Result<String> {
        Ok(self.response.clone())
    }
}
