//! LLM Gateway for Linkstash.
//!
//! A thin synchronous client for a local chat-completion endpoint, plus the
//! summary-generation flow that composes a prompt from a bookmark's fields
//! and persists the reply through the repository layer.
//!
//! The wire contract is fixed: the request carries the model identifier and
//! a single user-role message; the response must contain
//! `choices[0].message.content`. Any deviation is a failure. Calls are never
//! retried.

use std::time::Duration;

use rusqlite::Connection;
use serde_json::{json, Value};

use crate::managers::bookmark_manager::{BookmarkManager, BookmarkManagerTrait};
use crate::managers::summary_manager::{SummaryManager, SummaryManagerTrait};
use crate::types::bookmark::Bookmark;
use crate::types::errors::{LlmError, SummaryError};
use crate::types::summary::BookmarkSummary;

/// Default chat-completions endpoint of the local inference server.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:1234/v1/chat/completions";
/// Model identifier sent with every request.
pub const DEFAULT_MODEL: &str = "qwen3-14b";

/// Timeout for ad-hoc prompts.
pub const ASK_TIMEOUT: Duration = Duration::from_secs(30);
/// Timeout for summary generation, which tolerates longer outputs.
pub const SUMMARY_TIMEOUT: Duration = Duration::from_secs(60);

/// Trait defining the outbound inference call, so the summary flow can be
/// exercised with a scripted gateway in tests.
pub trait LlmGatewayTrait {
    /// Sends a prompt and returns the first choice's message content.
    fn ask(&self, prompt: &str) -> Result<String, LlmError> {
        self.ask_with_timeout(prompt, ASK_TIMEOUT)
    }

    fn ask_with_timeout(&self, prompt: &str, timeout: Duration) -> Result<String, LlmError>;
}

/// HTTP gateway to the local inference endpoint.
pub struct LlmGateway {
    endpoint: String,
    model: String,
    client: reqwest::blocking::Client,
}

impl LlmGateway {
    /// Creates a gateway against the default local endpoint and model.
    pub fn new() -> Self {
        Self::with_endpoint(DEFAULT_ENDPOINT, DEFAULT_MODEL)
    }

    /// Creates a gateway against a specific endpoint and model.
    pub fn with_endpoint(endpoint: &str, model: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            model: model.to_string(),
            client: reqwest::blocking::Client::new(),
        }
    }

    /// Creates a gateway from `LINKSTASH_LLM_ENDPOINT` / `LINKSTASH_LLM_MODEL`,
    /// falling back to the defaults when unset.
    pub fn from_env() -> Self {
        let endpoint =
            std::env::var("LINKSTASH_LLM_ENDPOINT").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());
        let model =
            std::env::var("LINKSTASH_LLM_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        Self::with_endpoint(&endpoint, &model)
    }

    /// Returns the configured endpoint URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Returns the configured model identifier.
    pub fn model(&self) -> &str {
        &self.model
    }
}

impl Default for LlmGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl LlmGatewayTrait for LlmGateway {
    fn ask_with_timeout(&self, prompt: &str, timeout: Duration) -> Result<String, LlmError> {
        let body = json!({
            "model": self.model,
            "messages": [
                {"role": "user", "content": prompt}
            ]
        });

        let response = self
            .client
            .post(&self.endpoint)
            .timeout(timeout)
            .json(&body)
            .send()
            .map_err(|e| LlmError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().unwrap_or_default();
            return Err(LlmError::BadStatus(status.as_u16(), detail));
        }

        let data: Value = response
            .json()
            .map_err(|e| LlmError::MalformedResponse(e.to_string()))?;

        parse_completion(&data)
    }
}

/// Extracts `choices[0].message.content` from a chat-completion response.
pub fn parse_completion(data: &Value) -> Result<String, LlmError> {
    data.get("choices")
        .and_then(|choices| choices.get(0))
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"))
        .and_then(|content| content.as_str())
        .map(str::to_string)
        .ok_or_else(|| {
            LlmError::MalformedResponse("missing choices[0].message.content".to_string())
        })
}

/// Composes the summary prompt from a bookmark's title, url, and description.
pub fn summary_prompt(bookmark: &Bookmark) -> String {
    format!(
        "Write a summary for this page: {} {} {}",
        bookmark.title.as_deref().unwrap_or(""),
        bookmark.url,
        bookmark.description.as_deref().unwrap_or(""),
    )
}

/// Generates and persists a summary for the given bookmark.
///
/// Resolves the bookmark (missing id is `Ok(None)`), asks the gateway with
/// the longer summary timeout, and only then writes the summary row. A
/// gateway failure therefore leaves nothing persisted.
pub fn summarize_bookmark(
    gateway: &dyn LlmGatewayTrait,
    conn: &Connection,
    bookmark_id: &str,
) -> Result<Option<BookmarkSummary>, SummaryError> {
    let bookmarks = BookmarkManager::new(conn);
    let bookmark = match bookmarks
        .get_bookmark(bookmark_id)
        .map_err(|e| SummaryError::DatabaseError(e.to_string()))?
    {
        Some(bookmark) => bookmark,
        None => return Ok(None),
    };

    let prompt = summary_prompt(&bookmark);
    let text = gateway
        .ask_with_timeout(&prompt, SUMMARY_TIMEOUT)
        .map_err(|e| SummaryError::GatewayError(e.to_string()))?;

    let mut summaries = SummaryManager::new(conn);
    summaries.create_summary(bookmark_id, &text).map(Some)
}
