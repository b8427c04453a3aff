//! Telegram webhook receiver.
//!
//! Verifies the `X-Telegram-Bot-Api-Secret-Token` header when a webhook
//! secret is configured, decodes the update, runs it through the bot
//! service, and performs the resulting Telegram API calls. Any failure
//! returns 500 so Telegram redelivers the update.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use uuid::Uuid;

use keymaster_core::service::bot::Outbound;
use keymaster_types::telegram::Update;

use crate::http::error::AppError;
use crate::state::AppState;

const SECRET_TOKEN_HEADER: &str = "x-telegram-bot-api-secret-token";

/// POST /webhook - Receive one Telegram update.
pub async fn receive_update(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(update): Json<Update>,
) -> Result<&'static str, AppError> {
    let request_id = Uuid::now_v7().to_string();

    if let Some(expected) = &state.config.webhook_secret {
        let provided = headers
            .get(SECRET_TOKEN_HEADER)
            .and_then(|v| v.to_str().ok());
        if provided != Some(expected.expose()) {
            tracing::warn!(%request_id, "webhook request with missing or wrong secret token");
            return Err(AppError::Unauthorized);
        }
    }

    let sender_id = update
        .message
        .as_ref()
        .and_then(|m| m.from.as_ref().map(|u| u.id))
        .or_else(|| update.callback_query.as_ref().map(|c| c.from.id));
    tracing::debug!(
        %request_id,
        update_id = update.update_id,
        sender_id,
        "webhook update received"
    );

    let actions = state
        .bot_service
        .handle_update(&update)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    for action in actions {
        perform(&state, action)
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?;
    }

    Ok("ok")
}

async fn perform(
    state: &AppState,
    action: Outbound,
) -> Result<(), keymaster_infra::telegram::client::TelegramError> {
    match action {
        Outbound::SendMessage {
            chat_id,
            text,
            keyboard,
        } => {
            state
                .telegram
                .send_message(chat_id, &text, keyboard.as_ref())
                .await
        }
        Outbound::EditMessage {
            chat_id,
            message_id,
            text,
        } => {
            state
                .telegram
                .edit_message_text(chat_id, message_id, &text)
                .await
        }
        Outbound::AnswerCallback { callback_id } => {
            state.telegram.answer_callback_query(&callback_id).await
        }
    }
}
