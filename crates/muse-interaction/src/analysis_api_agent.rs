//! AnalysisApiAgent - REST client for the MUSE analysis backend.
//!
//! Implements the `AnalysisBackend` trait over the backend's three POST
//! endpoints (`/analyze`, `/chat`, `/chat-to-nodes`). Every call is a
//! single attempt with a per-request timeout.
//! Configuration priority: ~/.config/muse/backend.json > environment variables

use async_trait::async_trait;
use muse_core::backend::AnalysisBackend;
use muse_core::board::{Category, GraphPayload, NodeSummary, Phase, Suggestion};
use muse_core::chat::ChatTurn;
use muse_core::error::{MuseError, Result};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

use crate::config::load_backend_config;

const DEFAULT_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// HTTP client for the analysis backend.
#[derive(Clone)]
pub struct AnalysisApiAgent {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl AnalysisApiAgent {
    /// Creates a new agent for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Loads configuration from ~/.config/muse/backend.json or environment
    /// variables.
    ///
    /// Priority:
    /// 1. ~/.config/muse/backend.json
    /// 2. Environment variables (MUSE_BACKEND_URL, MUSE_BACKEND_TIMEOUT_SECS)
    ///
    /// Base URL defaults to `http://localhost:8000`, timeout to 60 seconds.
    pub fn try_from_env() -> Result<Self> {
        let mut base_url = None;
        let mut timeout_secs = None;

        // Try loading from the config file first
        if let Ok(config) = load_backend_config() {
            base_url = config.base_url;
            timeout_secs = config.timeout_secs;
        }

        // Fallback to environment variables
        if base_url.is_none() {
            base_url = env::var("MUSE_BACKEND_URL").ok();
        }
        if timeout_secs.is_none() {
            timeout_secs = match env::var("MUSE_BACKEND_TIMEOUT_SECS") {
                Ok(raw) => Some(raw.parse::<u64>().map_err(|e| {
                    MuseError::config(format!("Invalid MUSE_BACKEND_TIMEOUT_SECS '{raw}': {e}"))
                })?),
                Err(_) => None,
            };
        }

        let base_url = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(MuseError::config(format!(
                "Backend base URL must start with http:// or https://, got: {base_url}"
            )));
        }

        let mut agent = Self::new(base_url);
        if let Some(secs) = timeout_secs {
            agent = agent.with_timeout(secs);
        }
        Ok(agent)
    }

    /// Overrides the per-request timeout after construction.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }

    /// The base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn post<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: serde::de::DeserializeOwned,
    {
        let url = self.endpoint(path);
        let response = self
            .client
            .post(&url)
            .header("content-type", "application/json")
            .timeout(self.timeout)
            .json(body)
            .send()
            .await
            .map_err(|err| MuseError::backend(format!("Request to {url} failed: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            return Err(map_http_error(status, body_text));
        }

        response
            .json::<R>()
            .await
            .map_err(|err| MuseError::backend(format!("Failed to parse {path} response: {err}")))
    }
}

#[async_trait]
impl AnalysisBackend for AnalysisApiAgent {
    async fn analyze(&self, text: &str, history: &[NodeSummary]) -> Result<GraphPayload> {
        tracing::debug!(
            "[AnalysisApiAgent] POST /analyze ({} context nodes)",
            history.len()
        );
        let request = AnalyzeRequest {
            text: text.to_string(),
            history: history.to_vec(),
        };
        self.post("analyze", &request).await
    }

    async fn chat(
        &self,
        suggestion: &Suggestion,
        history: &[ChatTurn],
        user_message: &str,
    ) -> Result<String> {
        tracing::debug!(
            "[AnalysisApiAgent] POST /chat ({} prior turns)",
            history.len()
        );
        let request = ChatRequest {
            suggestion_title: suggestion.title.clone(),
            suggestion_content: suggestion.content.clone(),
            suggestion_category: suggestion.category,
            suggestion_phase: suggestion.phase,
            messages: map_messages(history),
            user_message: user_message.to_string(),
        };
        let reply: ChatReply = self.post("chat", &request).await?;
        Ok(reply.reply)
    }

    async fn chat_to_nodes(
        &self,
        suggestion: &Suggestion,
        transcript: &[ChatTurn],
        existing_nodes: &[NodeSummary],
    ) -> Result<GraphPayload> {
        tracing::debug!(
            "[AnalysisApiAgent] POST /chat-to-nodes ({} turns, {} existing nodes)",
            transcript.len(),
            existing_nodes.len()
        );
        let request = ChatToNodesRequest {
            suggestion_title: suggestion.title.clone(),
            suggestion_content: suggestion.content.clone(),
            suggestion_category: suggestion.category,
            suggestion_phase: suggestion.phase,
            messages: map_messages(transcript),
            existing_nodes: existing_nodes.to_vec(),
        };
        self.post("chat-to-nodes", &request).await
    }
}

#[derive(Serialize)]
struct AnalyzeRequest {
    text: String,
    history: Vec<NodeSummary>,
}

#[derive(Serialize)]
struct ChatRequest {
    suggestion_title: String,
    suggestion_content: String,
    suggestion_category: Category,
    suggestion_phase: Phase,
    messages: Vec<ChatMessage>,
    user_message: String,
}

#[derive(Serialize)]
struct ChatToNodesRequest {
    suggestion_title: String,
    suggestion_content: String,
    suggestion_category: Category,
    suggestion_phase: Phase,
    messages: Vec<ChatMessage>,
    existing_nodes: Vec<NodeSummary>,
}

/// A transcript turn on the wire: role and content only, no timestamps.
#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatReply {
    reply: String,
}

/// FastAPI error body shape.
#[derive(Deserialize)]
struct ErrorDetail {
    detail: String,
}

fn map_messages(turns: &[ChatTurn]) -> Vec<ChatMessage> {
    turns
        .iter()
        .map(|turn| ChatMessage {
            role: turn.role.as_str().to_string(),
            content: turn.content.clone(),
        })
        .collect()
}

fn map_http_error(status: StatusCode, body: String) -> MuseError {
    let message = serde_json::from_str::<ErrorDetail>(&body)
        .map(|wrapper| wrapper.detail)
        .unwrap_or_else(|_| body.clone());

    MuseError::backend(format!("Analysis API error ({status}): {message}"))
}
