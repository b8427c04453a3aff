//! Text command parser.
//!
//! Maps a one-line message to one of the eight bot commands. Commands may
//! carry a `@botname` suffix (Telegram appends one in group chats).
//! Argument rules follow the bot's help text: key values and note text may
//! contain spaces; key names may not.

/// A fully parsed bot command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    AddKey { name: String, value: String },
    GetKey { name: String },
    ListKeys,
    DeleteKey { name: String },
    AddNote { text: String },
    GetNotes,
    /// The ID is kept as the raw argument string: a non-numeric ID is
    /// reported as not-found by the dispatcher, not as a parse error.
    DeleteNote { id: String },
}

/// Outcome of parsing one message line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parsed {
    /// A complete, well-formed command.
    Command(Command),
    /// A known command with missing arguments; reply with its usage line.
    Usage(&'static str),
    /// A `/command` this bot does not know. Ignored.
    Unknown,
    /// Plain text that is not a command at all. Ignored.
    NotACommand,
}

/// Parse a message line into a bot command.
pub fn parse_command(text: &str) -> Parsed {
    let trimmed = text.trim();
    if !trimmed.starts_with('/') {
        return Parsed::NotACommand;
    }

    let mut parts = trimmed.split_whitespace();
    let head = parts.next().unwrap_or_default();
    // Strip the "@botname" suffix Telegram adds in group chats.
    let name = head[1..].split('@').next().unwrap_or_default();
    let args: Vec<&str> = parts.collect();

    match name {
        "start" => Parsed::Command(Command::Start),

        "addkey" => match args.as_slice() {
            [name, value @ ..] if !value.is_empty() => Parsed::Command(Command::AddKey {
                name: (*name).to_string(),
                value: value.join(" "),
            }),
            _ => Parsed::Usage("Usage: /addkey <name> <value>"),
        },

        "getkey" => match args.first() {
            Some(name) => Parsed::Command(Command::GetKey {
                name: (*name).to_string(),
            }),
            None => Parsed::Usage("Usage: /getkey <name>"),
        },

        "listkeys" => Parsed::Command(Command::ListKeys),

        "deletekey" => match args.first() {
            Some(name) => Parsed::Command(Command::DeleteKey {
                name: (*name).to_string(),
            }),
            None => Parsed::Usage("Usage: /deletekey <name>"),
        },

        "addnote" => {
            if args.is_empty() {
                Parsed::Usage("Usage: /addnote <text>")
            } else {
                Parsed::Command(Command::AddNote {
                    text: args.join(" "),
                })
            }
        }

        "getnotes" => Parsed::Command(Command::GetNotes),

        "deletenote" => match args.first() {
            Some(id) => Parsed::Command(Command::DeleteNote {
                id: (*id).to_string(),
            }),
            None => Parsed::Usage("Usage: /deletenote <id>"),
        },

        _ => Parsed::Unknown,
    }
}
