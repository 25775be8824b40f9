use serde::{Deserialize, Serialize};

use crate::core::message::Message;

/// Body of `POST /api/chat`. Replies are always requested in one piece.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub messages: Vec<Message>,
    pub model: String,
    pub stream: bool,
}

impl ChatRequest {
    pub fn new(model: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            messages,
            model: model.into(),
            stream: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatReply {
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub created_at: String,
    pub message: Message,
    #[serde(default)]
    pub done: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_in_wire_order_without_streaming() {
        let request = ChatRequest::new("llama3.1", vec![Message::user("hello")]);
        let json = serde_json::to_string(&request).expect("serialize");
        assert_eq!(
            json,
            r#"{"messages":[{"role":"user","content":"hello"}],"model":"llama3.1","stream":false}"#
        );
    }

    #[test]
    fn reply_decodes_full_payload() {
        let body = r#"{
            "model": "llama3.1",
            "created_at": "2024-08-01T10:00:00.000Z",
            "message": {"role": "assistant", "content": "hi there"},
            "done": true,
            "total_duration": 1234
        }"#;
        let reply: ChatReply = serde_json::from_str(body).expect("decode");
        assert_eq!(reply.model, "llama3.1");
        assert_eq!(reply.created_at, "2024-08-01T10:00:00.000Z");
        assert_eq!(reply.message, Message::assistant("hi there"));
        assert!(reply.done);
    }

    #[test]
    fn reply_tolerates_missing_metadata() {
        let body = r#"{"message":{"role":"assistant","content":"hi there"}}"#;
        let reply: ChatReply = serde_json::from_str(body).expect("decode");
        assert_eq!(reply.message.content, "hi there");
        assert!(reply.model.is_empty());
        assert!(!reply.done);
    }

    #[test]
    fn reply_without_message_is_rejected() {
        let body = r#"{"model":"llama3.1","done":true}"#;
        assert!(serde_json::from_str::<ChatReply>(body).is_err());
    }
}
