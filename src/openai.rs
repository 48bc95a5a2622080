use std::{error::Error, fmt};

use reqwest::{Client, StatusCode, header};
use serde::{Deserialize, Serialize};

use crate::config::Config;

/// System instruction sent ahead of every user message.
pub const SYSTEM_PROMPT: &str = "Responda apenas com base na documentação fornecida.";

/// A single message in the conversation sent to the completions API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

/// Subset of the completions response we consume; unknown fields are ignored.
#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChatMessage,
}

#[derive(Debug)]
pub enum CompletionsError {
    Request(reqwest::Error),
    Upstream { status: StatusCode, body: String },
    EmptyChoices,
}

impl fmt::Display for CompletionsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompletionsError::Request(e) => write!(f, "{e}"),
            CompletionsError::Upstream { status, body } => {
                write!(f, "upstream returned {status}: {body}")
            }
            CompletionsError::EmptyChoices => write!(f, "upstream returned no choices"),
        }
    }
}

impl Error for CompletionsError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            CompletionsError::Request(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for CompletionsError {
    fn from(err: reqwest::Error) -> Self {
        CompletionsError::Request(err)
    }
}

/// Outbound client for the chat-completions API. The API key is baked into
/// the reqwest client as a sensitive default header at startup.
#[derive(Clone)]
pub struct CompletionsClient {
    http: Client,
    completions_url: String,
    model: String,
}

impl CompletionsClient {
    pub fn new(config: &Config) -> Self {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        let bearer = format!("Bearer {}", config.openai_api_key);
        let mut token =
            header::HeaderValue::from_str(&bearer).expect("API key must be a valid header value");
        token.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, token);

        let http = Client::builder()
            .default_headers(headers)
            .build()
            .expect("a successfully built client");

        Self {
            http,
            completions_url: completions_url(&config.openai_api_base),
            model: config.openai_model.clone(),
        }
    }

    /// Sends the fixed two-message exchange (system instruction + user text)
    /// and returns the first choice's content. No retries, no timeout beyond
    /// reqwest defaults.
    pub async fn complete(&self, text: &str) -> Result<String, CompletionsError> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: text.to_string(),
                },
            ],
        };

        let response = self
            .http
            .post(&self.completions_url)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionsError::Upstream { status, body });
        }

        let completion: ChatCompletionResponse = response.json().await?;
        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(CompletionsError::EmptyChoices)
    }
}

fn completions_url(api_base: &str) -> String {
    format!("{}/chat/completions", api_base.trim_end_matches('/'))
}
