//! Free-form text handler: reply-keyboard labels and the echo fallback

use std::sync::Arc;
use teloxide::types::{ChatId, ReplyMarkup};
use tracing::debug;

use super::keyboards::{
    self, LABEL_HIDE, LABEL_MENU, LABEL_PROFILE, LABEL_SETTINGS,
};
use super::screens::{self, Screen};
use crate::errors::BotResult;
use crate::prefs::PreferenceStore;
use crate::transport::{Action, BotIdentity, Sender};

/// Reply to texts mentioning a subscription
const SUBSCRIPTION_REPLY: &str =
    "Напишите администратору @Alex152197 — он с радостью вам поможет! 😊";

/// Help text accompanying reply-keyboard removal
const HIDE_KEYBOARD_TEXT: &str = "Привет! Я учебный бот.\n\n\
     Я могу помочь вам с различными задачами.\n\n\
     Доступные команды:\n\
     /start - начать работу\n\
     /help - помощь\n\
     /info - информация о вас";

/// Handles messages that are neither commands nor callbacks
pub struct TextHandler {
    prefs: Arc<PreferenceStore>,
    identity: BotIdentity,
}

impl TextHandler {
    pub fn new(prefs: Arc<PreferenceStore>, identity: BotIdentity) -> Self {
        Self { prefs, identity }
    }

    pub fn handle(&self, chat_id: ChatId, _from: &Sender, text: &str) -> BotResult<Vec<Action>> {
        let text = text.trim();
        debug!(chat_id = %chat_id, text_len = text.len(), "Handling text message");

        let actions = match text {
            LABEL_PROFILE => vec![send_screen(chat_id, screens::profile(&self.identity, chat_id))],
            LABEL_SETTINGS => {
                let screen = screens::settings_menu(
                    self.prefs.notifications(chat_id),
                    self.prefs.language(chat_id),
                );
                vec![send_screen(chat_id, screen)]
            }
            LABEL_MENU => vec![send_screen(chat_id, screens::main_menu())],
            LABEL_HIDE => vec![Action::RemoveReplyKeyboard {
                chat_id,
                text: HIDE_KEYBOARD_TEXT.to_string(),
            }],
            other => vec![self.fallback_reply(chat_id, other)],
        };
        Ok(actions)
    }

    /// Subscription keyword heuristic, then the plain echo
    fn fallback_reply(&self, chat_id: ChatId, text: &str) -> Action {
        let reply = if text.to_lowercase().contains("подпис") {
            SUBSCRIPTION_REPLY.to_string()
        } else {
            format!(
                "Вы написали: {}\n\nИспользуйте меню для навигации.",
                text
            )
        };
        Action::SendMessage {
            chat_id,
            text: reply,
            keyboard: Some(ReplyMarkup::Keyboard(keyboards::main_reply_keyboard())),
            parse_mode: None,
        }
    }
}

fn send_screen(chat_id: ChatId, screen: Screen) -> Action {
    Action::SendMessage {
        chat_id,
        text: screen.text,
        keyboard: Some(ReplyMarkup::InlineKeyboard(screen.keyboard)),
        parse_mode: None,
    }
}
