use faultloc_core::Lang;
use serde::Deserialize;
use serde_json::json;

use crate::{glossary_translation, TranslationError, Translator};

const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_TEMPERATURE: f32 = 0.1;
const DEFAULT_API_KEY_ENV: &str = "FAULTLOC_API_KEY";

const SYSTEM_PROMPT: &str = "\
You are an expert translator for industrial AGV fault codes and error \
messages. Translate with exact technical terminology (fault, error, sensor, \
motor, battery, reset), keep the initial capitalization of the source, and \
answer with the translation only, no explanation.";

/// Chat-completion translator. Model and temperature are explicit
/// construction-time state, one client per instance.
pub struct HttpTranslator {
    client: reqwest::blocking::Client,
    endpoint: String,
    model: String,
    temperature: f32,
    api_key: Result<String, String>,
}

impl HttpTranslator {
    pub fn new(
        endpoint: Option<&str>,
        model: Option<&str>,
        temperature: Option<f32>,
        api_key_env: Option<&str>,
    ) -> Self {
        let env_name = api_key_env.unwrap_or(DEFAULT_API_KEY_ENV).to_string();
        let api_key = std::env::var(&env_name).map_err(|_| env_name);
        HttpTranslator {
            client: reqwest::blocking::Client::new(),
            endpoint: endpoint.unwrap_or(DEFAULT_ENDPOINT).to_string(),
            model: model.unwrap_or(DEFAULT_MODEL).to_string(),
            temperature: temperature.unwrap_or(DEFAULT_TEMPERATURE),
            api_key,
        }
    }

    fn target_language_name(lang: Lang) -> &'static str {
        match lang {
            Lang::Fr => "French",
            Lang::En => "English",
            Lang::Es => "Spanish",
        }
    }
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl Translator for HttpTranslator {
    fn translate(&self, text: &str, target: Lang) -> Result<String, TranslationError> {
        if let Some(out) = glossary_translation(text, target) {
            return Ok(out);
        }
        let key = self
            .api_key
            .as_ref()
            .map_err(|env| TranslationError::MissingApiKey(env.clone()))?;
        let body = json!({
            "model": self.model,
            "temperature": self.temperature,
            "max_tokens": 500,
            "messages": [
                {
                    "role": "system",
                    "content": format!(
                        "{SYSTEM_PROMPT}\nTarget language: {}.",
                        Self::target_language_name(target)
                    ),
                },
                { "role": "user", "content": text },
            ],
        });
        let resp = self
            .client
            .post(&self.endpoint)
            .bearer_auth(key)
            .json(&body)
            .send()?
            .error_for_status()?;
        let parsed: ChatResponse = resp.json()?;
        let content = parsed
            .choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .map(str::trim)
            .unwrap_or_default();
        if content.is_empty() {
            return Err(TranslationError::MalformedResponse(
                "empty completion".to_string(),
            ));
        }
        Ok(content.to_string())
    }
}
