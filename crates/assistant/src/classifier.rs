//! Classifier clients.
//!
//! Both implementations talk HTTP with `reqwest` and share the status
//! mapping: 429 and 402 are surfaced as their own errors so the user sees a
//! precise message, everything else collapses into a generic failure. None of
//! them retries.

use api_types::classifier::{ClassifierReply, ClassifyRequest};
use async_trait::async_trait;
use engine::DriverRegistry;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};

use crate::{parsing::parse_reply, prompt::system_prompt};

pub const RATE_LIMITED_MESSAGE: &str = "Muitas requisições. Tente novamente em alguns segundos.";
pub const QUOTA_EXHAUSTED_MESSAGE: &str =
    "Créditos de IA esgotados. Adicione créditos para continuar a usar o assistente.";
pub const CONNECTION_ERROR_MESSAGE: &str =
    "Desculpe, ocorreu um erro de conexão. Tente novamente.";

/// Something that turns free text into a loosely typed reply.
#[async_trait]
pub trait Classifier: Send + Sync + std::fmt::Debug {
    async fn classify(&self, message: &str) -> Result<ClassifierReply, ClassifierError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    #[error("classifier rate limit reached")]
    RateLimited,
    #[error("classifier quota exhausted")]
    QuotaExhausted,
    #[error("classifier returned status {0}")]
    Status(u16),
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("classifier timed out")]
    Timeout,
}

impl ClassifierError {
    /// Localized text shown in the chat for this failure.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::RateLimited => RATE_LIMITED_MESSAGE,
            Self::QuotaExhausted => QUOTA_EXHAUSTED_MESSAGE,
            Self::Status(_) | Self::Network(_) | Self::Timeout => CONNECTION_ERROR_MESSAGE,
        }
    }
}

/// Maps the non-success statuses and hands back successful responses.
fn check_status(resp: Response) -> Result<Response, ClassifierError> {
    match resp.status() {
        status if status.is_success() => Ok(resp),
        StatusCode::TOO_MANY_REQUESTS => Err(ClassifierError::RateLimited),
        StatusCode::PAYMENT_REQUIRED => Err(ClassifierError::QuotaExhausted),
        status => Err(ClassifierError::Status(status.as_u16())),
    }
}

fn with_key(req: RequestBuilder, api_key: Option<&str>) -> RequestBuilder {
    match api_key {
        Some(key) => req.bearer_auth(key),
        None => req,
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Calls an OpenAI-compatible chat-completions gateway directly.
#[derive(Clone, Debug)]
pub struct GatewayClassifier {
    client: Client,
    url: String,
    api_key: Option<String>,
    model: String,
    system_prompt: String,
}

impl GatewayClassifier {
    pub fn new(
        client: Client,
        url: impl Into<String>,
        api_key: Option<String>,
        model: impl Into<String>,
        drivers: &DriverRegistry,
    ) -> Self {
        Self {
            client,
            url: url.into(),
            api_key,
            model: model.into(),
            system_prompt: system_prompt(drivers),
        }
    }
}

#[async_trait]
impl Classifier for GatewayClassifier {
    async fn classify(&self, message: &str) -> Result<ClassifierReply, ClassifierError> {
        let body = ChatCompletionRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &self.system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: message,
                },
            ],
        };
        let req = with_key(self.client.post(&self.url), self.api_key.as_deref()).json(&body);

        let resp = check_status(req.send().await?).inspect_err(|err| {
            tracing::warn!("gateway classifier failed: {err}");
        })?;
        let completion = resp.json::<ChatCompletion>().await?;
        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();
        tracing::debug!("gateway content: {content}");

        Ok(parse_reply(&content))
    }
}

/// Posts `{message}` to a remote classify endpoint, such as another
/// instance's `/parse-finance-command`.
#[derive(Clone, Debug)]
pub struct EndpointClassifier {
    client: Client,
    url: String,
    api_key: Option<String>,
}

impl EndpointClassifier {
    pub fn new(client: Client, url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client,
            url: url.into(),
            api_key,
        }
    }
}

#[async_trait]
impl Classifier for EndpointClassifier {
    async fn classify(&self, message: &str) -> Result<ClassifierReply, ClassifierError> {
        let body = ClassifyRequest {
            message: message.to_string(),
        };
        let req = with_key(self.client.post(&self.url), self.api_key.as_deref()).json(&body);

        let resp = check_status(req.send().await?).inspect_err(|err| {
            tracing::warn!("endpoint classifier failed: {err}");
        })?;
        let text = resp.text().await?;
        tracing::debug!("endpoint reply: {text}");

        Ok(parse_reply(&text))
    }
}
