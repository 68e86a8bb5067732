use std::time::Duration;

use validator::Validate;

use crate::{
    entities::chat::{ChatExchange, ChatMessage, ChatSender, SendMessageRequest, CANNED_REPLY, GREETING},
    errors::AppError,
};

/// The contact widget. Replies are canned and nothing is stored.
pub struct ChatHandler {
    reply_delay: Duration,
}

impl ChatHandler {
    pub fn new(reply_delay: Duration) -> Self {
        ChatHandler { reply_delay }
    }

    pub fn greeting(&self) -> ChatMessage {
        ChatMessage::new(ChatSender::Bot, GREETING)
    }

    pub async fn send_message(&self, request: SendMessageRequest) -> Result<ChatExchange, AppError> {
        request.validate()?;

        let text = request.text.trim();
        if text.is_empty() {
            return Err(AppError::field("text", "Message cannot be empty"));
        }

        let user_message = ChatMessage::new(ChatSender::User, text);

        if !self.reply_delay.is_zero() {
            tokio::time::sleep(self.reply_delay).await;
        }

        Ok(ChatExchange {
            messages: vec![user_message, ChatMessage::new(ChatSender::Bot, CANNED_REPLY)],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_rt::test]
    async fn reply_follows_user_message() {
        let handler = ChatHandler::new(Duration::ZERO);
        let exchange = handler
            .send_message(SendMessageRequest { text: "  Hello there ".into() })
            .await
            .unwrap();

        assert_eq!(exchange.messages.len(), 2);
        assert_eq!(exchange.messages[0].text, "Hello there");
        assert_eq!(exchange.messages[0].sender, ChatSender::User);
        assert_eq!(exchange.messages[1].text, CANNED_REPLY);
    }

    #[actix_rt::test]
    async fn blank_messages_are_rejected() {
        let handler = ChatHandler::new(Duration::ZERO);
        let err = handler.send_message(SendMessageRequest { text: "   ".into() }).await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[actix_rt::test]
    async fn reply_waits_for_configured_delay() {
        let handler = ChatHandler::new(Duration::from_millis(50));
        let started = std::time::Instant::now();

        handler.send_message(SendMessageRequest { text: "hi".into() }).await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(50));
    }

    #[test]
    fn greeting_comes_from_the_bot() {
        let greeting = ChatHandler::new(Duration::ZERO).greeting();
        assert_eq!(greeting.sender, ChatSender::Bot);
        assert_eq!(greeting.text, GREETING);
    }
}
