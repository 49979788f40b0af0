// Chat-completions client behind `aura ask` and `aura git commit`
//
// One POST per question to `{base_url}/chat/completions` with a bearer key.
// The first choice's content is the answer.

use crate::config::AiSettings;
use crate::error::{AuraError, Result};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::debug;

const TEMPERATURE: f32 = 0.7;
const MAX_TOKENS: u32 = 1000;

const COMMIT_PROMPT: &str = "You write git commit messages. Reply with only the message: \
    a conventional-commit subject line under 72 characters (feat, fix, docs, refactor, \
    test, chore), optionally followed by a blank line and a short body.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

pub struct ChatClient {
    http: reqwest::Client,
    api_key: String,
    endpoint: String,
    model: String,
}

impl ChatClient {
    /// Build a client from settings. A missing key is a configuration error.
    pub fn new(settings: &AiSettings) -> Result<Self> {
        let api_key = settings.api_key.clone().ok_or_else(|| {
            AuraError::Config(
                "AURA_API_KEY or OPENAI_API_KEY environment variable is required".to_string(),
            )
        })?;

        let http = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()?;

        Ok(Self {
            http,
            api_key,
            endpoint: format!("{}/chat/completions", settings.base_url.trim_end_matches('/')),
            model: settings.model.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Ask a single question with the assistant's system instruction
    pub async fn ask(&self, question: &str) -> Result<String> {
        let messages = vec![Message::system(system_prompt()), Message::user(question)];
        self.chat(messages).await
    }

    /// Suggest a commit message for a staged diff
    pub async fn commit_message(&self, diff: &str) -> Result<String> {
        let messages = vec![
            Message::system(COMMIT_PROMPT),
            Message::user(format!("Generate a commit message for these changes:\n\n{}", diff)),
        ];
        let message = clean_commit_message(&self.chat(messages).await?);
        if message.is_empty() {
            return Err(AuraError::Ai("empty commit message".to_string()));
        }
        Ok(message)
    }

    pub async fn chat(&self, messages: Vec<Message>) -> Result<String> {
        let request = self.build_request(messages);
        debug!(endpoint = %self.endpoint, model = %request.model, "sending chat request");

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        interpret(status, &body)
    }

    pub fn build_request(&self, messages: Vec<Message>) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages,
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        }
    }
}

/// Turn a raw HTTP response into the answer text
fn interpret(status: StatusCode, body: &str) -> Result<String> {
    if !status.is_success() {
        return Err(AuraError::Ai(format!(
            "API request failed with status {}: {}",
            status.as_u16(),
            body.trim()
        )));
    }

    let parsed: ChatResponse = serde_json::from_str(body)?;

    if let Some(error) = parsed.error {
        return Err(AuraError::Ai(format!("API error: {}", error.message)));
    }

    parsed
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .ok_or_else(|| AuraError::Ai("no response from API".to_string()))
}

/// Request content for a question with optional piped input
///
/// Piped content without a question becomes "Explain this:".
pub fn compose_question(question: Option<&str>, piped: Option<&str>) -> Option<String> {
    let question = question.map(str::trim).filter(|q| !q.is_empty());
    let piped = piped.map(str::trim).filter(|p| !p.is_empty());

    match (question, piped) {
        (Some(q), Some(p)) => Some(format!("{}\n\nContent:\n{}", q, p)),
        (None, Some(p)) => Some(format!("Explain this:\n\n{}", p)),
        (Some(q), None) => Some(q.to_string()),
        (None, None) => None,
    }
}

/// Strip whitespace and any quoting the model wrapped the message in
pub fn clean_commit_message(raw: &str) -> String {
    raw.trim()
        .trim_matches(|c| matches!(c, '`' | '"' | '\''))
        .trim()
        .to_string()
}

fn system_prompt() -> String {
    format!(
        "You are Aura, a command-line assistant for developers. \
         Give practical, concise answers with concrete commands where useful. \
         The user is on {} ({}); use commands that work there.",
        std::env::consts::OS,
        std::env::consts::ARCH
    )
}
