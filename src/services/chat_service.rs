use crate::{
    constants::{CHAT_HISTORY_WINDOW, OPENAI_API_KEY, OPENAI_API_URL, OPENAI_MODEL},
    models::chat_model::{Chat, ChatMessage},
    repositories::chat_repository::ChatRepository,
    types::models::chat::message_role::MessageRole,
    utils::locale_utils::{Messages, Namespace},
};
use anyhow::{Context, Result};
use bson::oid::ObjectId;
use log::warn;
use once_cell::sync::Lazy;
use reqwest::Client;
use serde::Serialize;
use serde_json::{Value, json};
use std::sync::Arc;

static HTTP: Lazy<Client> = Lazy::new(Client::new);

const SYSTEM_PROMPT: &str = "You are a friendly tutor for a quiz learning platform. \
Explain concepts step by step, keep answers short, and never reveal the answer \
to an unanswered quiz question.";

#[derive(Debug, Serialize, PartialEq, Eq)]
struct ApiMessage {
    role: String,
    content: String,
}

/// System prompt plus the trailing slice of history; everything older is
/// dropped rather than summarized.
fn build_context_window(history: &[ChatMessage], window: usize) -> Vec<ApiMessage> {
    let start = history.len().saturating_sub(window);
    let mut context = Vec::with_capacity(history.len() - start + 1);
    context.push(ApiMessage {
        role: MessageRole::System.to_string(),
        content: SYSTEM_PROMPT.to_string(),
    });
    for message in &history[start..] {
        context.push(ApiMessage {
            role: message.role.to_string(),
            content: message.content.clone(),
        });
    }
    context
}

pub struct ChatService {
    pub chat_repository: Arc<ChatRepository>,
}

impl ChatService {
    pub fn new(chat_repository: Arc<ChatRepository>) -> Self {
        Self { chat_repository }
    }

    pub async fn get_history(&self, user_id: ObjectId) -> Result<Chat> {
        self.chat_repository
            .find_or_create(user_id)
            .await
            .context("Error loading chat history")
    }

    pub async fn clear_history(&self, user_id: ObjectId) -> Result<()> {
        self.chat_repository
            .find_or_create(user_id)
            .await
            .context("Error loading chat history")?;
        self.chat_repository
            .clear_messages(user_id)
            .await
            .context("Error clearing chat history")
    }

    /// Appends the user message, asks the model, and persists both sides.
    /// Provider failures degrade to a canned reply instead of an error so
    /// the conversation stays usable.
    pub async fn send_message(
        &self,
        user_id: ObjectId,
        message: String,
        messages: &Messages,
    ) -> Result<ChatMessage> {
        let chat = self
            .chat_repository
            .find_or_create(user_id)
            .await
            .context("Error loading chat history")?;

        let user_message = ChatMessage::new(MessageRole::User, message);
        let mut history = chat.messages;
        history.push(user_message.clone());

        let context = build_context_window(&history, CHAT_HISTORY_WINDOW);

        let reply_text = match self.complete(&context).await {
            Ok(text) => text,
            Err(err) => {
                warn!("Assistant call failed for user {}: {}", user_id, err);
                messages.get_str(
                    Namespace::Chat,
                    "assistant.fallback",
                    "Sorry, I cannot help right now. Please try again in a moment.",
                )
            }
        };

        let reply = ChatMessage::new(MessageRole::Assistant, reply_text);
        self.chat_repository
            .push_messages(user_id, &[user_message, reply.clone()])
            .await
            .context("Error saving chat messages")?;

        Ok(reply)
    }

    async fn complete(&self, context: &[ApiMessage]) -> Result<String> {
        let body = json!({
            "model": OPENAI_MODEL,
            "messages": context,
        });

        let response = HTTP
            .post(OPENAI_API_URL)
            .bearer_auth(OPENAI_API_KEY.as_str())
            .json(&body)
            .send()
            .await
            .context("Assistant request failed")?;

        if !response.status().is_success() {
            anyhow::bail!("Assistant endpoint returned {}", response.status());
        }

        let payload: Value = response
            .json()
            .await
            .context("Assistant response was not valid JSON")?;

        payload
            .get("choices")
            .and_then(|choices| choices.get(0))
            .and_then(|choice| choice.get("message"))
            .and_then(|message| message.get("content"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .context("Assistant response had no content")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(role: MessageRole, content: &str) -> ChatMessage {
        ChatMessage::new(role, content)
    }

    #[test]
    fn window_always_starts_with_the_system_prompt() {
        let context = build_context_window(&[], 20);
        assert_eq!(context.len(), 1);
        assert_eq!(context[0].role, "system");
    }

    #[test]
    fn short_histories_are_sent_whole() {
        let history = vec![
            message(MessageRole::User, "What is a prime number?"),
            message(MessageRole::Assistant, "A number divisible only by 1 and itself."),
        ];
        let context = build_context_window(&history, 20);
        assert_eq!(context.len(), 3);
        assert_eq!(context[1].content, "What is a prime number?");
    }

    #[test]
    fn long_histories_keep_only_the_tail() {
        let history: Vec<ChatMessage> = (0..50)
            .map(|i| message(MessageRole::User, &format!("message {}", i)))
            .collect();
        let context = build_context_window(&history, 20);

        // system prompt + the last 20 messages
        assert_eq!(context.len(), 21);
        assert_eq!(context[1].content, "message 30");
        assert_eq!(context[20].content, "message 49");
    }

    #[test]
    fn roles_serialize_in_openai_vocabulary() {
        let history = vec![message(MessageRole::Assistant, "hi")];
        let context = build_context_window(&history, 5);
        assert_eq!(context[1].role, "assistant");
    }
}
