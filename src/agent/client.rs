//! Agent Client Module
//! REST client for the hosted conversational agent (thread / message / run
//! surface). The agent's reasoning is entirely external; this client only
//! moves text in and out.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Missing environment variable {0}")]
    MissingEnv(&'static str),
    #[error("Agent API call failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Agent run ended with status '{status}': {detail}")]
    RunFailed { status: String, detail: String },
    #[error("Agent returned no assistant reply")]
    EmptyReply,
}

/// Connection settings, sourced from the environment.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    pub endpoint: String,
    pub api_key: String,
    pub agent_id: String,
    /// Reuse an existing thread when set; otherwise one is created per run.
    pub thread_id: Option<String>,
}

impl AgentConfig {
    pub fn from_env() -> Result<Self, AgentError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(get: impl Fn(&'static str) -> Option<String>) -> Result<Self, AgentError> {
        let require = |name: &'static str| get(name).ok_or(AgentError::MissingEnv(name));
        Ok(Self {
            endpoint: require("AGENT_ENDPOINT")?.trim_end_matches('/').to_string(),
            api_key: require("AGENT_API_KEY")?,
            agent_id: require("AGENT_ID")?,
            thread_id: get("AGENT_THREAD_ID"),
        })
    }
}

#[derive(Serialize)]
struct CreateMessageRequest<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct CreateRunRequest<'a> {
    assistant_id: &'a str,
}

#[derive(Deserialize)]
struct ThreadResponse {
    id: String,
}

#[derive(Deserialize)]
struct MessageResponse {
    id: String,
}

#[derive(Deserialize)]
struct RunResponse {
    id: String,
    status: String,
    #[serde(default)]
    last_error: Option<RunError>,
}

#[derive(Deserialize)]
struct RunError {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

#[derive(Deserialize)]
struct MessageList {
    data: Vec<ThreadMessage>,
}

#[derive(Deserialize)]
struct ThreadMessage {
    role: String,
    content: Vec<ContentPart>,
}

/// One content block of a thread message; only text blocks carry a value.
#[derive(Deserialize)]
struct ContentPart {
    #[serde(default)]
    text: Option<TextValue>,
}

#[derive(Deserialize)]
struct TextValue {
    value: String,
}

/// First assistant reply in a newest-first message listing.
fn newest_assistant_text(messages: MessageList) -> Option<String> {
    messages
        .data
        .into_iter()
        .find(|m| m.role == "assistant")
        .and_then(|m| {
            m.content
                .into_iter()
                .find_map(|part| part.text.map(|t| t.value))
        })
}

pub struct AgentClient {
    http: reqwest::Client,
    config: AgentConfig,
}

/// Poll interval while a run is in flight.
const RUN_POLL_INTERVAL: Duration = Duration::from_secs(2);

impl AgentClient {
    pub fn new(config: AgentConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.endpoint, path)
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, AgentError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let response = self
            .http
            .post(self.url(path))
            .header("api-key", &self.config.api_key)
            .json(body)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, AgentError> {
        let response = self
            .http
            .get(self.url(path))
            .header("api-key", &self.config.api_key)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }

    /// The configured thread, or a freshly created one.
    pub async fn ensure_thread(&self) -> Result<String, AgentError> {
        if let Some(id) = &self.config.thread_id {
            return Ok(id.clone());
        }
        let thread: ThreadResponse = self.post("/threads", &serde_json::json!({})).await?;
        Ok(thread.id)
    }

    /// Send one user message, process the run to completion, return the
    /// newest assistant reply text.
    pub async fn send_message(
        &self,
        thread_id: &str,
        content: &str,
    ) -> Result<String, AgentError> {
        let message: MessageResponse = self
            .post(
                &format!("/threads/{thread_id}/messages"),
                &CreateMessageRequest {
                    role: "user",
                    content,
                },
            )
            .await?;
        debug!(message_id = %message.id, "message sent");

        let run: RunResponse = self
            .post(
                &format!("/threads/{thread_id}/runs"),
                &CreateRunRequest {
                    assistant_id: &self.config.agent_id,
                },
            )
            .await?;

        let run = self.wait_for_run(thread_id, &run.id).await?;
        if run.status != "completed" {
            let detail = run
                .last_error
                .map(|e| format!("{}: {}", e.code, e.message))
                .unwrap_or_else(|| "no error detail".to_string());
            return Err(AgentError::RunFailed {
                status: run.status,
                detail,
            });
        }

        let messages: MessageList = self
            .get(&format!("/threads/{thread_id}/messages?order=desc"))
            .await?;
        newest_assistant_text(messages).ok_or(AgentError::EmptyReply)
    }

    async fn wait_for_run(
        &self,
        thread_id: &str,
        run_id: &str,
    ) -> Result<RunResponse, AgentError> {
        loop {
            let run: RunResponse = self
                .get(&format!("/threads/{thread_id}/runs/{run_id}"))
                .await?;
            match run.status.as_str() {
                "queued" | "in_progress" | "requires_action" => {
                    tokio::time::sleep(RUN_POLL_INTERVAL).await;
                }
                _ => return Ok(run),
            }
        }
    }
}
