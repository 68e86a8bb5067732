use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

pub const GREETING: &str = "Hi! How can I help you today?";
pub const CANNED_REPLY: &str = "Thanks for your message! I'll get back to you soon.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatSender {
    User,
    Bot,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub id: Uuid,
    pub text: String,
    pub sender: ChatSender,
    pub sent_at: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(sender: ChatSender, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            sender,
            sent_at: Utc::now(),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct SendMessageRequest {
    #[validate(length(max = 1000, message = "Message is too long"))]
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatExchange {
    pub messages: Vec<ChatMessage>,
}
