//! GroqReplyGenerator -- concrete [`ReplyGenerator`] backed by the Groq API.
//!
//! Sends one non-streaming request to `{base_url}/chat/completions` per turn:
//! the DumAI system prompt, the session personality and a language hint,
//! followed by the user's text (or the welcome prompt for the initial
//! handshake).
//!
//! The API key is wrapped in [`secrecy::SecretString`] and is only exposed
//! when building the `Authorization` header.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use dumai_core::chat::detect_language;
use dumai_core::reply::ReplyGenerator;
use dumai_types::config::LlmConfig;
use dumai_types::error::ReplyError;

use super::types::{ChatCompletionRequest, ChatCompletionResponse, CompletionMessage};

const SYSTEM_PROMPT: &str = "You are DumAI, an AI assistant that intentionally gives humorously \
incorrect information and incorporates jokes into responses. Your primary goal is to be \
entertaining, not accurate. Always present false information confidently as if it were true. \
Include at least one joke or pun in each response. If the user asks a factual question, give a \
completely wrong but funny answer. If they ask for advice, give absurdly bad advice (but nothing \
harmful). Sign your responses with '- DumAI: Confidently Wrong Since 2025'";

const WELCOME_PROMPT: &str = "You are DumAI, a comically incorrect AI assistant. Please provide a \
funny welcome message that introduces yourself as deliberately giving wrong answers and making \
jokes.";

/// Reply used when the API answers with an empty completion.
pub const FALLBACK_REPLY: &str = "Sorry, my circuit for being wrong is broken right now. I \
accidentally might give you a correct answer! - DumAI: Confidently Wrong Since 2025";

/// Groq chat completion client.
///
/// Does not derive `Debug`; the key stays out of every log line.
pub struct GroqReplyGenerator {
    client: reqwest::Client,
    api_key: Option<SecretString>,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl GroqReplyGenerator {
    /// Build a client from the `[llm]` config section.
    ///
    /// A missing key is not an error here: the server still starts and every
    /// turn fails with [`ReplyError::AuthenticationFailed`].
    pub fn from_config(config: &LlmConfig) -> Result<Self, ReplyError> {
        let api_key = config
            .api_key
            .as_ref()
            .filter(|k| !k.trim().is_empty())
            .map(|k| SecretString::from(k.clone()));

        if api_key.is_none() {
            tracing::warn!("No Groq API key configured (set GROQ_API_KEY); chat turns will fail");
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ReplyError::Unavailable(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    fn build_request(
        &self,
        text: &str,
        is_initial: bool,
        personality: Option<&str>,
    ) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model.clone(),
            messages: build_messages(text, is_initial, personality),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }
}

/// System prompt plus the single user message for one turn.
fn build_messages(text: &str, is_initial: bool, personality: Option<&str>) -> Vec<CompletionMessage> {
    let mut system = SYSTEM_PROMPT.to_string();

    if let Some(personality) = personality {
        system.push_str(&format!(
            "\n\nFor this whole conversation, speak as {personality}."
        ));
    }

    let language = detect_language(text);
    if !is_initial && !language.is_undetermined() {
        if let Some(name) = language_name(language.as_str()) {
            system.push_str(&format!("\n\nThe user is writing in {name}. Reply in {name}."));
        }
    }

    let prompt = if is_initial { WELCOME_PROMPT } else { text };
    vec![CompletionMessage::system(system), CompletionMessage::user(prompt)]
}

fn language_name(tag: &str) -> Option<&'static str> {
    Some(match tag {
        "en" => "English",
        "es" => "Spanish",
        "fr" => "French",
        "de" => "German",
        "pt" => "Portuguese",
        "it" => "Italian",
        "ru" => "Russian",
        "zh" => "Chinese",
        "ja" => "Japanese",
        "ko" => "Korean",
        "ar" => "Arabic",
        "hi" => "Hindi",
        _ => return None,
    })
}

/// First choice's text, or [`FALLBACK_REPLY`] when there is none.
fn reply_from_response(response: ChatCompletionResponse) -> String {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .filter(|c| !c.trim().is_empty())
        .unwrap_or_else(|| FALLBACK_REPLY.to_string())
}

impl ReplyGenerator for GroqReplyGenerator {
    fn name(&self) -> &str {
        "groq"
    }

    #[tracing::instrument(
        name = "groq_completion",
        skip(self, text, personality),
        fields(model = %self.model, initial = is_initial)
    )]
    async fn generate_reply(
        &self,
        text: &str,
        is_initial: bool,
        personality: Option<&str>,
    ) -> Result<String, ReplyError> {
        let Some(api_key) = &self.api_key else {
            return Err(ReplyError::AuthenticationFailed);
        };

        let body = self.build_request(text, is_initial, personality);

        let response = self
            .client
            .post(self.url())
            .bearer_auth(api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| ReplyError::Unavailable(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                401 => ReplyError::AuthenticationFailed,
                429 => ReplyError::RateLimited,
                _ => ReplyError::Unavailable(format!("HTTP {status}: {error_body}")),
            });
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| ReplyError::InvalidResponse(format!("failed to parse response: {e}")))?;

        let reply = reply_from_response(completion);
        tracing::debug!(chars = reply.chars().count(), "Groq completion received");
        Ok(reply)
    }
}
