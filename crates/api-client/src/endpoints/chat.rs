//! Messaging panel endpoints
//!
//! Maps to `/conversations` and `/messages`:
//! - List customer conversations
//! - List messages in a conversation (paginated)
//! - Send a message into a conversation
//! - Mark a conversation as seen

use super::users::User;
use crate::client::AdminClient;
use crate::envelope::{Page, PageQuery};
use crate::error::ApiResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use velora_core::validation::Validator;

/// Chat API interface
#[derive(Clone)]
pub struct ChatApi {
    client: AdminClient,
}

impl ChatApi {
    /// Create a new chat API interface
    pub(crate) fn new(client: AdminClient) -> Self {
        Self { client }
    }

    /// List conversations, most recently active first
    ///
    /// GET /conversations
    pub async fn conversations(&self, query: &PageQuery) -> ApiResult<Page<Conversation>> {
        let path = format!("conversations?{}", query.to_query());
        self.client.get(&path).await
    }

    /// List messages in a conversation
    ///
    /// GET /messages?conversationId={id}
    pub async fn messages(
        &self,
        conversation_id: i64,
        query: &PageQuery,
    ) -> ApiResult<Page<Message>> {
        let path = format!(
            "messages?conversationId={conversation_id}&{}",
            query.to_query()
        );
        self.client.get(&path).await
    }

    /// Send a message into a conversation
    ///
    /// POST /messages
    pub async fn send(&self, conversation_id: i64, content: &str) -> ApiResult<Message> {
        let validation = Validator::new()
            .required("content", content)
            .max_length("content", content, 2000)
            .validate();
        if !validation.is_valid() {
            return Err(validation.into());
        }

        self.client
            .post(
                "messages",
                &SendMessageRequest {
                    conversation_id,
                    content: content.to_string(),
                },
            )
            .await
    }

    /// Mark every message in a conversation as seen
    ///
    /// PUT /conversations/{id}/seen
    pub async fn mark_seen(&self, conversation_id: i64) -> ApiResult<()> {
        self.client
            .put_unit(
                &format!("conversations/{conversation_id}/seen"),
                &serde_json::json!({}),
            )
            .await
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Customer conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    /// Identifier
    pub id: i64,
    /// Customer on the other side
    pub customer: User,
    /// Most recent message, if any
    #[serde(default)]
    pub last_message: Option<Message>,
    /// Messages not yet seen by the back office
    #[serde(default)]
    pub unread_count: u32,
}

/// Chat message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Identifier
    pub id: i64,
    /// Owning conversation
    pub conversation_id: i64,
    /// Author user ID
    pub sender_id: i64,
    /// Message body
    pub content: String,
    /// When the message was sent
    pub sent_at: DateTime<Utc>,
    /// Whether the recipient has seen it
    #[serde(default)]
    pub seen: bool,
}

/// Send message request body
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    /// Target conversation
    pub conversation_id: i64,
    /// Message body
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_deserialize() {
        let json = r#"{
            "id": 44,
            "conversationId": 7,
            "senderId": 12,
            "content": "Is the linen shirt back in stock?",
            "sentAt": "2026-08-06T10:15:00Z",
            "seen": false
        }"#;

        let message: Message = serde_json::from_str(json).unwrap();
        assert_eq!(message.conversation_id, 7);
        assert!(!message.seen);
    }

    #[test]
    fn test_conversation_deserialize() {
        let json = r#"{
            "id": 7,
            "customer": {
                "id": 12,
                "email": "jane@example.com",
                "fullName": "Jane Doe",
                "role": "customer",
                "avatarUrl": null
            },
            "lastMessage": null,
            "unreadCount": 3
        }"#;

        let conversation: Conversation = serde_json::from_str(json).unwrap();
        assert_eq!(conversation.unread_count, 3);
        assert_eq!(conversation.customer.email, "jane@example.com");
    }

    #[test]
    fn test_send_request_wire_format() {
        let request = SendMessageRequest {
            conversation_id: 7,
            content: "On its way!".to_string(),
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("conversationId"));
    }
}
