//! Telegram Bot API wire types.
//!
//! Minimal subset of the Bot API objects this bot actually consumes and
//! produces. Inbound types (`Update`, `Message`, `CallbackQuery`) only
//! declare the fields we read; unknown fields are ignored by serde.

use serde::{Deserialize, Serialize};

/// An incoming update delivered by the Telegram webhook.
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<Message>,
    #[serde(default)]
    pub callback_query: Option<CallbackQuery>,
}

/// A Telegram message.
#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub message_id: i64,
    #[serde(default)]
    pub from: Option<User>,
    pub chat: Chat,
    #[serde(default)]
    pub text: Option<String>,
}

/// The sender of a message or callback query.
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    #[serde(default)]
    pub username: Option<String>,
}

/// The chat a message belongs to.
#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

/// An inline-keyboard button press.
#[derive(Debug, Clone, Deserialize)]
pub struct CallbackQuery {
    pub id: String,
    pub from: User,
    #[serde(default)]
    pub message: Option<Message>,
    #[serde(default)]
    pub data: Option<String>,
}

/// Inline keyboard attached to an outbound message.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct InlineKeyboardMarkup {
    pub inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

/// A single inline-keyboard button carrying callback data.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct InlineKeyboardButton {
    pub text: String,
    pub callback_data: String,
}

impl InlineKeyboardButton {
    pub fn new(text: impl Into<String>, callback_data: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            callback_data: callback_data.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_message_update() {
        let json = r#"{
            "update_id": 1001,
            "message": {
                "message_id": 5,
                "from": {"id": 42, "is_bot": false, "first_name": "Alice", "username": "alice"},
                "chat": {"id": 42, "type": "private"},
                "date": 1700000000,
                "text": "/listkeys"
            }
        }"#;

        let update: Update = serde_json::from_str(json).unwrap();
        assert_eq!(update.update_id, 1001);
        let msg = update.message.unwrap();
        assert_eq!(msg.message_id, 5);
        assert_eq!(msg.chat.id, 42);
        assert_eq!(msg.from.unwrap().id, 42);
        assert_eq!(msg.text.as_deref(), Some("/listkeys"));
        assert!(update.callback_query.is_none());
    }

    #[test]
    fn test_deserialize_callback_query_update() {
        let json = r#"{
            "update_id": 1002,
            "callback_query": {
                "id": "cbq-1",
                "from": {"id": 42, "is_bot": false, "first_name": "Alice"},
                "message": {
                    "message_id": 7,
                    "chat": {"id": 42, "type": "private"},
                    "date": 1700000000
                },
                "data": "delete_note_3"
            }
        }"#;

        let update: Update = serde_json::from_str(json).unwrap();
        let cbq = update.callback_query.unwrap();
        assert_eq!(cbq.id, "cbq-1");
        assert_eq!(cbq.from.id, 42);
        assert_eq!(cbq.data.as_deref(), Some("delete_note_3"));
        assert_eq!(cbq.message.unwrap().message_id, 7);
    }

    #[test]
    fn test_deserialize_update_without_message() {
        // Edited messages, channel posts etc. arrive with neither field we read.
        let json = r#"{"update_id": 1003, "edited_message": {"message_id": 1, "chat": {"id": 1}, "date": 0}}"#;
        let update: Update = serde_json::from_str(json).unwrap();
        assert!(update.message.is_none());
        assert!(update.callback_query.is_none());
    }

    #[test]
    fn test_serialize_inline_keyboard() {
        let markup = InlineKeyboardMarkup {
            inline_keyboard: vec![vec![InlineKeyboardButton::new(
                "Delete Note 3",
                "delete_note_3",
            )]],
        };
        let json = serde_json::to_value(&markup).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "inline_keyboard": [[{"text": "Delete Note 3", "callback_data": "delete_note_3"}]]
            })
        );
    }
}
