//! Command router and access guard.
//!
//! `BotService` takes a decoded Telegram [`Update`], checks the sender
//! against the configured owner ID, parses the command, and executes it
//! against the key/note stores. The result is a list of [`Outbound`]
//! actions for the transport layer to perform -- this service never talks
//! HTTP itself.
//!
//! Reply strings match the bot's documented command surface. Secret values
//! appear only in replies sent back to the owner, never in logs.

use keymaster_types::error::StoreError;
use keymaster_types::note::NoteId;
use keymaster_types::telegram::{
    CallbackQuery, InlineKeyboardButton, InlineKeyboardMarkup, Message, Update,
};

use crate::command::{parse_command, Command, Parsed};
use crate::repository::key::KeyProvider;
use crate::repository::note::NoteProvider;

/// Callback-data prefix for inline note-deletion buttons.
const DELETE_NOTE_PREFIX: &str = "delete_note_";

const HELP_TEXT: &str = "\u{1F510} Secure Key Manager Bot\n\n\
    Available commands:\n\
    /addkey <name> <value> - Add encrypted API key\n\
    /getkey <name> - Retrieve decrypted API key\n\
    /deletekey <name> - Delete stored key\n\
    /listkeys - List all key names\n\
    /addnote <text> - Add encrypted note\n\
    /getnotes - Retrieve all decrypted notes\n\
    /deletenote <id> - Delete note by ID";

const UNAUTHORIZED_TEXT: &str = "\u{1F6AB} Unauthorized access. This incident will be reported.";

/// An action for the transport layer to perform against the Telegram API.
#[derive(Debug, Clone, PartialEq)]
pub enum Outbound {
    /// Send a new message to a chat.
    SendMessage {
        chat_id: i64,
        text: String,
        keyboard: Option<InlineKeyboardMarkup>,
    },
    /// Replace the text of an existing message (inline-keyboard follow-up).
    EditMessage {
        chat_id: i64,
        message_id: i64,
        text: String,
    },
    /// Acknowledge a callback query so the client stops its spinner.
    AnswerCallback { callback_id: String },
}

/// The command router: owner guard, dispatch, reply formatting.
///
/// Generic over the key and note stores so tests can substitute in-memory
/// mocks for the encrypted SQLite implementations.
pub struct BotService<K, N> {
    keys: K,
    notes: N,
    owner_id: i64,
}

impl<K: KeyProvider, N: NoteProvider> BotService<K, N> {
    pub fn new(keys: K, notes: N, owner_id: i64) -> Self {
        Self {
            keys,
            notes,
            owner_id,
        }
    }

    /// Handle one webhook update, returning the actions to perform.
    ///
    /// Updates carrying neither a message nor a callback query (edited
    /// messages, channel posts) produce no actions.
    pub async fn handle_update(&self, update: &Update) -> Result<Vec<Outbound>, StoreError> {
        if let Some(message) = &update.message {
            return self.handle_message(message).await;
        }
        if let Some(callback) = &update.callback_query {
            return self.handle_callback(callback).await;
        }
        Ok(Vec::new())
    }

    async fn handle_message(&self, message: &Message) -> Result<Vec<Outbound>, StoreError> {
        let Some(from) = &message.from else {
            // Messages without a sender (channel posts) are never owner traffic.
            return Ok(Vec::new());
        };
        let chat_id = message.chat.id;

        if from.id != self.owner_id {
            tracing::warn!(user_id = from.id, "unauthorized access attempt");
            return Ok(vec![reply(chat_id, UNAUTHORIZED_TEXT)]);
        }

        let Some(text) = &message.text else {
            return Ok(Vec::new());
        };

        match parse_command(text) {
            Parsed::Command(command) => self.dispatch(chat_id, command).await,
            Parsed::Usage(usage) => Ok(vec![reply(chat_id, usage)]),
            Parsed::Unknown | Parsed::NotACommand => {
                tracing::debug!("ignoring non-command message");
                Ok(Vec::new())
            }
        }
    }

    async fn dispatch(&self, chat_id: i64, command: Command) -> Result<Vec<Outbound>, StoreError> {
        match command {
            Command::Start => Ok(vec![reply(chat_id, HELP_TEXT)]),

            Command::AddKey { name, value } => {
                self.keys.set(&name, &value).await?;
                tracing::info!(key = %name, "key added/updated");
                Ok(vec![reply(
                    chat_id,
                    format!("\u{2705} Key '{name}' stored successfully"),
                )])
            }

            Command::GetKey { name } => match self.keys.get(&name).await {
                Ok(Some(value)) => Ok(vec![reply(chat_id, format!("\u{1F511} {name}: {value}"))]),
                Ok(None) => Ok(vec![reply(chat_id, key_not_found(&name))]),
                Err(StoreError::Decryption) => {
                    tracing::error!(key = %name, "decryption failed for key");
                    Ok(vec![reply(
                        chat_id,
                        "\u{26A0}\u{FE0F} Error decrypting key. Invalid token.",
                    )])
                }
                Err(e) => Err(e),
            },

            Command::ListKeys => {
                let entries = self.keys.list().await?;
                if entries.is_empty() {
                    return Ok(vec![reply(chat_id, "No keys stored")]);
                }
                let names: Vec<String> = entries
                    .iter()
                    .map(|e| format!("\u{2022} {}", e.name))
                    .collect();
                Ok(vec![reply(
                    chat_id,
                    format!("\u{1F511} Stored Keys:\n{}", names.join("\n")),
                )])
            }

            Command::DeleteKey { name } => match self.keys.delete(&name).await {
                Ok(()) => {
                    tracing::info!(key = %name, "key deleted");
                    Ok(vec![reply(
                        chat_id,
                        format!("\u{1F5D1}\u{FE0F} Key '{name}' deleted successfully"),
                    )])
                }
                Err(StoreError::NotFound) => Ok(vec![reply(chat_id, key_not_found(&name))]),
                Err(e) => Err(e),
            },

            Command::AddNote { text } => {
                let id = self.notes.add(&text).await?;
                tracing::info!(note_id = %id, "note added");
                Ok(vec![reply(
                    chat_id,
                    format!("\u{1F4DD} Note added successfully (ID: {id})"),
                )])
            }

            Command::GetNotes => {
                let notes = self.notes.list().await?;
                if notes.is_empty() {
                    return Ok(vec![reply(chat_id, "No notes stored")]);
                }

                let mut text = String::from("\u{1F4DD} Saved Notes:\n\n");
                let mut rows = Vec::with_capacity(notes.len());
                for note in &notes {
                    match &note.text {
                        Some(body) => text.push_str(&format!("ID {}: {}\n\n", note.id, body)),
                        None => {
                            tracing::error!(note_id = %note.id, "decryption failed for note");
                            text.push_str(&format!("ID {}: [Decryption Error]\n\n", note.id));
                        }
                    }
                    rows.push(vec![InlineKeyboardButton::new(
                        format!("Delete Note {}", note.id),
                        format!("{DELETE_NOTE_PREFIX}{}", note.id),
                    )]);
                }

                Ok(vec![Outbound::SendMessage {
                    chat_id,
                    text,
                    keyboard: Some(InlineKeyboardMarkup {
                        inline_keyboard: rows,
                    }),
                }])
            }

            Command::DeleteNote { id } => {
                // A non-numeric argument can't name a stored note.
                let Ok(note_id) = id.parse::<i64>() else {
                    return Ok(vec![reply(chat_id, note_not_found(&id))]);
                };
                match self.notes.delete(NoteId::new(note_id)).await {
                    Ok(()) => {
                        tracing::info!(note_id, "note deleted");
                        Ok(vec![reply(chat_id, note_deleted(note_id))])
                    }
                    Err(StoreError::NotFound) => Ok(vec![reply(chat_id, note_not_found(&id))]),
                    Err(e) => Err(e),
                }
            }
        }
    }

    /// Handle an inline-keyboard button press.
    ///
    /// The callback is always answered so the Telegram client stops its
    /// spinner; non-owner presses perform nothing beyond that.
    async fn handle_callback(&self, callback: &CallbackQuery) -> Result<Vec<Outbound>, StoreError> {
        let mut actions = vec![Outbound::AnswerCallback {
            callback_id: callback.id.clone(),
        }];

        if callback.from.id != self.owner_id {
            tracing::warn!(user_id = callback.from.id, "unauthorized callback attempt");
            return Ok(actions);
        }

        let Some(data) = &callback.data else {
            return Ok(actions);
        };
        let Some(raw_id) = data.strip_prefix(DELETE_NOTE_PREFIX) else {
            tracing::debug!("ignoring unrecognized callback data");
            return Ok(actions);
        };
        // Buttons live on the /getnotes message; without it there is
        // nowhere to surface the result.
        let Some(message) = &callback.message else {
            return Ok(actions);
        };

        let text = match raw_id.parse::<i64>() {
            Ok(note_id) => match self.notes.delete(NoteId::new(note_id)).await {
                Ok(()) => {
                    tracing::info!(note_id, "note deleted via inline button");
                    note_deleted(note_id)
                }
                Err(StoreError::NotFound) => note_not_found(raw_id),
                Err(e) => return Err(e),
            },
            Err(_) => note_not_found(raw_id),
        };

        actions.push(Outbound::EditMessage {
            chat_id: message.chat.id,
            message_id: message.message_id,
            text,
        });
        Ok(actions)
    }
}

fn reply(chat_id: i64, text: impl Into<String>) -> Outbound {
    Outbound::SendMessage {
        chat_id,
        text: text.into(),
        keyboard: None,
    }
}

fn key_not_found(name: &str) -> String {
    format!("\u{1F50D} Key '{name}' not found")
}

fn note_not_found(id: &str) -> String {
    format!("\u{1F50D} Note ID '{id}' not found")
}

fn note_deleted(id: i64) -> String {
    format!("\u{1F5D1}\u{FE0F} Note {id} deleted successfully")
}
