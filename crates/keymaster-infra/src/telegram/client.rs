//! TelegramClient -- outbound calls to the Telegram Bot API.
//!
//! Covers the handful of methods this bot uses: `sendMessage`,
//! `editMessageText`, `answerCallbackQuery`, and `setWebhook`.
//!
//! The bot token is part of every request URL, so it is wrapped in
//! [`Redacted`] and errors are scrubbed of their URL before they can be
//! logged.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use keymaster_types::key::Redacted;
use keymaster_types::telegram::InlineKeyboardMarkup;

/// Errors from Telegram Bot API calls.
///
/// The `Http` variant strips the request URL from the underlying reqwest
/// error so the bot token never reaches logs.
#[derive(Debug, Error)]
pub enum TelegramError {
    #[error("telegram request failed: {0}")]
    Http(reqwest::Error),

    #[error("telegram api error: {0}")]
    Api(String),

    #[error("failed to parse telegram response: {0}")]
    Deserialization(String),
}

impl From<reqwest::Error> for TelegramError {
    fn from(e: reqwest::Error) -> Self {
        TelegramError::Http(e.without_url())
    }
}

/// Envelope every Bot API response arrives in.
#[derive(Debug, Deserialize)]
struct ApiResult {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Serialize)]
struct SendMessagePayload<'a> {
    chat_id: i64,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_markup: Option<&'a InlineKeyboardMarkup>,
}

#[derive(Serialize)]
struct EditMessagePayload<'a> {
    chat_id: i64,
    message_id: i64,
    text: &'a str,
}

#[derive(Serialize)]
struct AnswerCallbackPayload<'a> {
    callback_query_id: &'a str,
}

#[derive(Serialize)]
struct SetWebhookPayload<'a> {
    url: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    secret_token: Option<&'a str>,
}

/// Client for the Telegram Bot API.
///
/// Does not derive `Debug`: the token lives in every request URL and must
/// never appear in output.
pub struct TelegramClient {
    client: reqwest::Client,
    token: Redacted,
    base_url: String,
}

impl TelegramClient {
    /// Create a client for the given bot token.
    pub fn new(token: Redacted) -> Result<Self, TelegramError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            token,
            base_url: "https://api.telegram.org".to_string(),
        })
    }

    /// Override the base URL (useful for testing against a local server).
    #[allow(dead_code)]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// Build the full URL for a Bot API method.
    fn url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.base_url, self.token.expose(), method)
    }

    async fn call<P: Serialize>(&self, method: &str, payload: &P) -> Result<(), TelegramError> {
        let response = self
            .client
            .post(self.url(method))
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        let api: ApiResult = response
            .json()
            .await
            .map_err(|e| TelegramError::Deserialization(e.without_url().to_string()))?;

        if !api.ok {
            let description = api
                .description
                .unwrap_or_else(|| format!("HTTP {status}"));
            return Err(TelegramError::Api(description));
        }

        Ok(())
    }

    /// Send a text message, optionally with an inline keyboard.
    pub async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        keyboard: Option<&InlineKeyboardMarkup>,
    ) -> Result<(), TelegramError> {
        self.call(
            "sendMessage",
            &SendMessagePayload {
                chat_id,
                text,
                reply_markup: keyboard,
            },
        )
        .await
    }

    /// Replace the text of a previously sent message.
    pub async fn edit_message_text(
        &self,
        chat_id: i64,
        message_id: i64,
        text: &str,
    ) -> Result<(), TelegramError> {
        self.call(
            "editMessageText",
            &EditMessagePayload {
                chat_id,
                message_id,
                text,
            },
        )
        .await
    }

    /// Acknowledge a callback query so the client stops its spinner.
    pub async fn answer_callback_query(&self, callback_id: &str) -> Result<(), TelegramError> {
        self.call(
            "answerCallbackQuery",
            &AnswerCallbackPayload {
                callback_query_id: callback_id,
            },
        )
        .await
    }

    /// Register the webhook URL with Telegram.
    ///
    /// When `secret_token` is set, Telegram echoes it back in the
    /// `X-Telegram-Bot-Api-Secret-Token` header of every delivery.
    pub async fn set_webhook(
        &self,
        webhook_url: &str,
        secret_token: Option<&str>,
    ) -> Result<(), TelegramError> {
        self.call(
            "setWebhook",
            &SetWebhookPayload {
                url: webhook_url,
                secret_token,
            },
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keymaster_types::telegram::InlineKeyboardButton;

    fn make_client() -> TelegramClient {
        TelegramClient::new(Redacted::new("123456:TEST-TOKEN")).unwrap()
    }

    #[test]
    fn test_url_embeds_token() {
        let client = make_client().with_base_url("http://localhost:9999".to_string());
        assert_eq!(
            client.url("sendMessage"),
            "http://localhost:9999/bot123456:TEST-TOKEN/sendMessage"
        );
    }

    #[test]
    fn test_send_message_payload_without_keyboard() {
        let payload = SendMessagePayload {
            chat_id: 42,
            text: "hello",
            reply_markup: None,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json, serde_json::json!({"chat_id": 42, "text": "hello"}));
    }

    #[test]
    fn test_send_message_payload_with_keyboard() {
        let markup = InlineKeyboardMarkup {
            inline_keyboard: vec![vec![InlineKeyboardButton::new("Delete Note 3", "delete_note_3")]],
        };
        let payload = SendMessagePayload {
            chat_id: 42,
            text: "notes",
            reply_markup: Some(&markup),
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            json["reply_markup"]["inline_keyboard"][0][0]["callback_data"],
            "delete_note_3"
        );
    }

    #[test]
    fn test_set_webhook_payload_omits_missing_secret() {
        let payload = SetWebhookPayload {
            url: "https://bot.example.com/webhook",
            secret_token: None,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"url": "https://bot.example.com/webhook"})
        );
    }

    #[test]
    fn test_api_result_parses_error_description() {
        let api: ApiResult =
            serde_json::from_str(r#"{"ok": false, "error_code": 400, "description": "Bad Request"}"#)
                .unwrap();
        assert!(!api.ok);
        assert_eq!(api.description.as_deref(), Some("Bad Request"));
    }
}
