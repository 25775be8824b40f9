//! HTTP transport for the chat endpoint.
//!
//! [`ChatClient`] performs one request/reply exchange. [`ChatService`] runs
//! that exchange on a background task and posts the outcome back over a
//! channel, so the event loop never waits on the network and remains the
//! only place where application state is mutated.

use std::error::Error as StdError;
use std::fmt;

use reqwest::StatusCode;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::api::{ChatReply, ChatRequest};

#[derive(Debug)]
pub enum TransportError {
    /// The endpoint could not be reached, or the connection dropped before
    /// the reply body was received.
    Connection {
        endpoint: String,
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    Status {
        endpoint: String,
        status: StatusCode,
        message: String,
    },

    /// The reply body was not a chat reply.
    Decode {
        endpoint: String,
        source: serde_json::Error,
    },
}

impl TransportError {
    pub fn is_connection(&self) -> bool {
        matches!(self, TransportError::Connection { .. })
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Connection { endpoint, source } => {
                write!(f, "Could not reach {endpoint}: {source}")
            }
            TransportError::Status {
                endpoint,
                status,
                message,
            } => write!(f, "{endpoint} returned {status}: {message}"),
            TransportError::Decode { endpoint, source } => {
                write!(f, "Unreadable reply from {endpoint}: {source}")
            }
        }
    }
}

impl StdError for TransportError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            TransportError::Connection { source, .. } => Some(source),
            TransportError::Status { .. } => None,
            TransportError::Decode { source, .. } => Some(source),
        }
    }
}

/// Pull a human-readable message out of an error body. Ollama answers with
/// `{"error": "..."}`; OpenAI-style servers nest it under `error.message`.
fn extract_error_summary(value: &serde_json::Value) -> Option<String> {
    let summary = value
        .pointer("/error/message")
        .and_then(|v| v.as_str())
        .map(str::to_owned)
        .or_else(|| {
            value
                .get("error")
                .and_then(|v| v.as_str().map(str::to_owned))
        })
        .or_else(|| {
            value
                .get("message")
                .and_then(|v| v.as_str().map(str::to_owned))
        });

    summary.map(|text| {
        let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
        collapsed.trim().to_string()
    })
}

fn summarize_error_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "<empty>".to_string();
    }

    serde_json::from_str::<serde_json::Value>(trimmed)
        .ok()
        .and_then(|value| extract_error_summary(&value))
        .filter(|summary| !summary.is_empty())
        .unwrap_or_else(|| trimmed.to_string())
}

#[derive(Debug, Clone)]
pub struct ChatClient {
    client: reqwest::Client,
    endpoint: String,
}

impl ChatClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), endpoint)
    }

    pub fn with_client(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// POST `request` and wait for the complete reply. There is no timeout
    /// and no retry.
    pub async fn send(&self, request: &ChatRequest) -> Result<ChatReply, TransportError> {
        debug!(
            endpoint = %self.endpoint,
            model = %request.model,
            messages = request.messages.len(),
            "sending chat request"
        );

        let connection_error = |source: reqwest::Error| TransportError::Connection {
            endpoint: self.endpoint.clone(),
            source,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(connection_error)?;

        let status = response.status();
        let body = response.text().await.map_err(connection_error)?;

        if !status.is_success() {
            return Err(TransportError::Status {
                endpoint: self.endpoint.clone(),
                status,
                message: summarize_error_body(&body),
            });
        }

        let reply: ChatReply =
            serde_json::from_str(&body).map_err(|source| TransportError::Decode {
                endpoint: self.endpoint.clone(),
                source,
            })?;
        debug!(
            model = %reply.model,
            done = reply.done,
            chars = reply.message.content.len(),
            "received chat reply"
        );
        Ok(reply)
    }
}

#[derive(Debug)]
pub struct ChatParams {
    pub request: ChatRequest,
    pub request_id: u64,
}

#[derive(Debug)]
pub struct ChatCompletion {
    pub request_id: u64,
    pub result: Result<ChatReply, TransportError>,
}

#[derive(Clone)]
pub struct ChatService {
    client: ChatClient,
    tx: mpsc::UnboundedSender<ChatCompletion>,
}

impl ChatService {
    pub fn new(client: ChatClient) -> (Self, mpsc::UnboundedReceiver<ChatCompletion>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { client, tx }, rx)
    }

    /// Run the exchange on a Tokio task. The task always runs to completion;
    /// its outcome is delivered through the receiver returned by [`new`](Self::new).
    pub fn spawn_request(&self, params: ChatParams) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let ChatParams {
                request,
                request_id,
            } = params;

            let result = client.send(&request).await;
            if let Err(err) = &result {
                warn!(request_id, error = %err, "chat request failed");
            }

            if tx.send(ChatCompletion { request_id, result }).is_err() {
                debug!(request_id, "event loop gone; dropping chat completion");
            }
        });
    }
}
