//! # Transport Abstraction
//!
//! Domain-level update and action types plus the [`Transport`] seam that
//! decouples routing logic from the Telegram wire client. Handlers consume
//! [`Update`] values and produce [`Action`] values; only the adapter at the
//! edge talks to the network. Tests drive the routers with hand-built
//! updates and assert on the emitted actions.

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{
    CallbackQueryId, InlineKeyboardMarkup, MaybeInaccessibleMessage, Me, MessageId, ParseMode,
    ReplyMarkup, User,
};
use tracing::debug;

use crate::errors::{error_logging, BotResult};

/// The user behind an inbound message or command
#[derive(Debug, Clone, PartialEq)]
pub struct Sender {
    pub id: UserId,
    pub first_name: String,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub language_code: Option<String>,
    pub is_bot: bool,
}

impl Sender {
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            username: user.username.clone(),
            language_code: user.language_code.clone(),
            is_bot: user.is_bot,
        }
    }
}

/// Identity of the bot itself, shown on the profile screen
#[derive(Debug, Clone)]
pub struct BotIdentity {
    pub first_name: String,
    pub username: String,
}

impl From<&Me> for BotIdentity {
    fn from(me: &Me) -> Self {
        Self {
            first_name: me.first_name.clone(),
            username: me.username.clone().unwrap_or_default(),
        }
    }
}

/// An inbound event, classified for routing
#[derive(Debug, Clone, PartialEq)]
pub enum Update {
    /// A `/command` message with optional arguments
    Command {
        chat_id: ChatId,
        from: Sender,
        name: String,
        args: String,
    },
    /// An inline-button tap; carries the tapped message's current screen so
    /// the navigation history can snapshot it
    Callback(CallbackUpdate),
    /// A free-form text message
    Text {
        chat_id: ChatId,
        from: Sender,
        text: String,
    },
    /// Anything the bot does not act on
    Other,
}

impl Update {
    /// Chat the update originated from, when known
    pub fn chat_id(&self) -> Option<ChatId> {
        match self {
            Update::Command { chat_id, .. } | Update::Text { chat_id, .. } => Some(*chat_id),
            Update::Callback(cb) => Some(cb.chat_id),
            Update::Other => None,
        }
    }
}

/// Payload of an inline-button callback
#[derive(Debug, Clone, PartialEq)]
pub struct CallbackUpdate {
    pub id: String,
    pub chat_id: ChatId,
    pub user_id: UserId,
    pub message_id: MessageId,
    pub data: String,
    pub current_text: String,
    pub current_keyboard: Option<InlineKeyboardMarkup>,
}

/// An outbound effect produced by a handler
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SendMessage {
        chat_id: ChatId,
        text: String,
        keyboard: Option<ReplyMarkup>,
        parse_mode: Option<ParseMode>,
    },
    EditMessage {
        chat_id: ChatId,
        message_id: MessageId,
        text: String,
        keyboard: Option<InlineKeyboardMarkup>,
    },
    /// Remove the persistent reply keyboard; Telegram requires an
    /// accompanying message to carry the removal markup
    RemoveReplyKeyboard { chat_id: ChatId, text: String },
    AckCallback {
        callback_id: String,
        notice: Option<String>,
    },
}

impl Action {
    /// The chat this action targets, if any
    pub fn chat_id(&self) -> Option<ChatId> {
        match self {
            Action::SendMessage { chat_id, .. }
            | Action::EditMessage { chat_id, .. }
            | Action::RemoveReplyKeyboard { chat_id, .. } => Some(*chat_id),
            Action::AckCallback { .. } => None,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Action::SendMessage { .. } => "send_message",
            Action::EditMessage { .. } => "edit_message",
            Action::RemoveReplyKeyboard { .. } => "remove_reply_keyboard",
            Action::AckCallback { .. } => "ack_callback",
        }
    }
}

/// Sink for outbound actions. Implemented by the Telegram adapter in
/// production and by a recording stub in tests.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, action: Action) -> BotResult<()>;
}

/// Deliver a batch of actions in order, logging and swallowing failures so a
/// broken send never aborts update processing.
pub async fn deliver(transport: &dyn Transport, actions: Vec<Action>) {
    for action in actions {
        let operation = action.kind();
        let chat_id = action.chat_id().unwrap_or(ChatId(0));
        if let Err(e) = transport.send(action).await {
            error_logging::log_transport_error(&e, operation, chat_id);
        }
    }
}

/// Production transport backed by the teloxide client
#[derive(Debug, Clone)]
pub struct TelegramTransport {
    bot: Bot,
}

impl TelegramTransport {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl Transport for TelegramTransport {
    async fn send(&self, action: Action) -> BotResult<()> {
        match action {
            Action::SendMessage {
                chat_id,
                text,
                keyboard,
                parse_mode,
            } => {
                let mut request = self.bot.send_message(chat_id, text);
                if let Some(markup) = keyboard {
                    request = request.reply_markup(markup);
                }
                if let Some(mode) = parse_mode {
                    request = request.parse_mode(mode);
                }
                request.await?;
            }
            Action::EditMessage {
                chat_id,
                message_id,
                text,
                keyboard,
            } => {
                let mut request = self.bot.edit_message_text(chat_id, message_id, text);
                if let Some(markup) = keyboard {
                    request = request.reply_markup(markup);
                }
                request.await?;
            }
            Action::RemoveReplyKeyboard { chat_id, text } => {
                self.bot
                    .send_message(chat_id, text)
                    .reply_markup(ReplyMarkup::kb_remove())
                    .await?;
            }
            Action::AckCallback {
                callback_id,
                notice,
            } => {
                let mut request = self.bot.answer_callback_query(CallbackQueryId(callback_id));
                if let Some(text) = notice {
                    request = request.text(text);
                }
                request.await?;
            }
        }
        Ok(())
    }
}

/// Classify an inbound Telegram message as a command or plain text
pub fn update_from_message(msg: &Message) -> Update {
    let (Some(text), Some(user)) = (msg.text(), msg.from.as_ref()) else {
        return Update::Other;
    };
    let from = Sender::from_user(user);

    if let Some(stripped) = text.strip_prefix('/') {
        let mut parts = stripped.splitn(2, char::is_whitespace);
        let raw_name = parts.next().unwrap_or_default();
        // "/start@my_bot" and "/start" are the same command
        let name = raw_name.split('@').next().unwrap_or(raw_name);
        if !name.is_empty() {
            let args = parts.next().unwrap_or_default().trim().to_string();
            debug!(chat_id = %msg.chat.id, command = %name, "Classified command update");
            return Update::Command {
                chat_id: msg.chat.id,
                from,
                name: name.to_string(),
                args,
            };
        }
    }

    Update::Text {
        chat_id: msg.chat.id,
        from,
        text: text.to_string(),
    }
}

/// Lift a callback query into a domain update, capturing the tapped
/// message's current screen for the navigation history. Queries without an
/// accessible message carry nothing to edit and are ignored.
pub fn update_from_callback(q: &CallbackQuery) -> Update {
    let Some(MaybeInaccessibleMessage::Regular(msg)) = q.message.as_ref() else {
        return Update::Other;
    };
    Update::Callback(CallbackUpdate {
        id: q.id.0.clone(),
        chat_id: msg.chat.id,
        user_id: q.from.id,
        message_id: msg.id,
        data: q.data.clone().unwrap_or_default(),
        current_text: msg.text().unwrap_or_default().to_string(),
        current_keyboard: msg.reply_markup().cloned(),
    })
}
