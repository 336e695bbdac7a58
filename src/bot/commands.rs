//! Command dispatcher: a name-keyed registry of `/command` handlers

use std::collections::HashMap;
use std::sync::Arc;
use teloxide::types::{ChatId, ParseMode, ReplyMarkup};
use tracing::debug;

use super::keyboards::main_reply_keyboard;
use crate::config::Config;
use crate::errors::BotResult;
use crate::transport::{Action, Sender};

/// Reply sent for commands with no registered handler
pub const UNKNOWN_COMMAND_TEXT: &str =
    "Неизвестная команда. Используйте /help для списка команд.";

/// Everything a command handler needs about the inbound command
#[derive(Debug)]
pub struct CommandContext<'a> {
    pub chat_id: ChatId,
    pub from: &'a Sender,
    pub args: &'a str,
}

/// A single `/command` handler
pub trait CommandHandler: Send + Sync {
    /// Command name without the leading slash
    fn name(&self) -> &'static str;
    fn handle(&self, ctx: &CommandContext<'_>) -> BotResult<Vec<Action>>;
}

/// Name-keyed command registry. Registration is append-only during startup;
/// lookup is O(1).
#[derive(Default)]
pub struct CommandDispatcher {
    handlers: HashMap<&'static str, Box<dyn CommandHandler>>,
}

impl CommandDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, handler: Box<dyn CommandHandler>) {
        self.handlers.insert(handler.name(), handler);
    }

    /// Route a command to its handler; unregistered names get the generic
    /// unknown-command reply.
    pub fn route(
        &self,
        chat_id: ChatId,
        from: &Sender,
        name: &str,
        args: &str,
    ) -> BotResult<Vec<Action>> {
        debug!(chat_id = %chat_id, command = %name, "Routing command");
        match self.handlers.get(name) {
            Some(handler) => handler.handle(&CommandContext {
                chat_id,
                from,
                args,
            }),
            None => Ok(vec![Action::SendMessage {
                chat_id,
                text: UNKNOWN_COMMAND_TEXT.to_string(),
                keyboard: Some(ReplyMarkup::Keyboard(main_reply_keyboard())),
                parse_mode: None,
            }]),
        }
    }

    /// Registered command names, for diagnostics
    pub fn command_names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.handlers.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

/// Build the dispatcher with the full command set
pub fn default_dispatcher(config: Arc<Config>) -> CommandDispatcher {
    let mut dispatcher = CommandDispatcher::new();
    dispatcher.register(Box::new(StartCommand));
    dispatcher.register(Box::new(HelpCommand));
    dispatcher.register(Box::new(InfoCommand));
    dispatcher.register(Box::new(SettingsCommand { config }));
    dispatcher.register(Box::new(EchoCommand));
    dispatcher
}

/// `/start`: greeting plus the persistent main menu keyboard
pub struct StartCommand;

impl CommandHandler for StartCommand {
    fn name(&self) -> &'static str {
        "start"
    }

    fn handle(&self, ctx: &CommandContext<'_>) -> BotResult<Vec<Action>> {
        let text = "Привет! Я учебный бот.\n\n\
                    Доступные команды:\n\
                    /start - начать работу\n\
                    /help - помощь\n\
                    /info - информация о вас\n\
                    /settings - настройки бота (только для администраторов)\n\
                    /echo <текст> - повторить текст";
        Ok(vec![Action::SendMessage {
            chat_id: ctx.chat_id,
            text: text.to_string(),
            keyboard: Some(ReplyMarkup::Keyboard(main_reply_keyboard())),
            parse_mode: None,
        }])
    }
}

/// `/help`: command reference, HTML formatted
pub struct HelpCommand;

impl CommandHandler for HelpCommand {
    fn name(&self) -> &'static str {
        "help"
    }

    fn handle(&self, ctx: &CommandContext<'_>) -> BotResult<Vec<Action>> {
        let text = "Это справочная информация.\n\n\
                    <b>Доступные команды:</b>\n\n\
                    /start - начать работу с ботом\n\
                    /help - показать это сообщение\n\
                    /info - получить информацию о себе\n\
                    /settings - настройки бота (только для администраторов)\n\
                    /echo &lt;текст&gt; - повторить указанный текст\n\n\
                    <b>Текстовые команды:</b>\n\
                    подписка - информация о подписке\n\n\
                    <b>Важно:</b> Если вы нажали на кнопку \"🔽 Скрыть\" и клавиатура исчезла, \
                    нажмите /start, и клавиатура снова появится.";
        Ok(vec![Action::SendMessage {
            chat_id: ctx.chat_id,
            text: text.to_string(),
            keyboard: Some(ReplyMarkup::Keyboard(main_reply_keyboard())),
            parse_mode: Some(ParseMode::Html),
        }])
    }
}

/// `/info`: a dump of what Telegram told us about the sender
pub struct InfoCommand;

impl CommandHandler for InfoCommand {
    fn name(&self) -> &'static str {
        "info"
    }

    fn handle(&self, ctx: &CommandContext<'_>) -> BotResult<Vec<Action>> {
        let from = ctx.from;
        let mut text = String::from("Информация о вас:\n\n");
        text.push_str(&format!("ID: {}\n", from.id));
        text.push_str(&format!("Имя: {}\n", from.first_name));
        if let Some(last_name) = &from.last_name {
            text.push_str(&format!("Фамилия: {}\n", last_name));
        }
        if let Some(username) = &from.username {
            text.push_str(&format!("Username: @{}\n", username));
        }
        text.push_str(&format!(
            "Язык: {}\n",
            from.language_code.as_deref().unwrap_or("-")
        ));
        text.push_str(&format!("Бот: {}\n", from.is_bot));

        Ok(vec![Action::SendMessage {
            chat_id: ctx.chat_id,
            text,
            keyboard: None,
            parse_mode: None,
        }])
    }
}

/// `/settings`: admin-gated view of runtime configuration
pub struct SettingsCommand {
    pub config: Arc<Config>,
}

impl CommandHandler for SettingsCommand {
    fn name(&self) -> &'static str {
        "settings"
    }

    fn handle(&self, ctx: &CommandContext<'_>) -> BotResult<Vec<Action>> {
        let user_id = ctx.from.id.0 as i64;
        let text = if self.config.is_admin(user_id) {
            format!(
                "Настройки бота:\nРежим отладки: {}\nТаймаут: {} секунд",
                self.config.debug, self.config.timeout_secs
            )
        } else {
            debug!(chat_id = %ctx.chat_id, user_id = %user_id, "Non-admin requested /settings");
            "Эта команда доступна только администраторам".to_string()
        };
        Ok(vec![Action::SendMessage {
            chat_id: ctx.chat_id,
            text,
            keyboard: None,
            parse_mode: None,
        }])
    }
}

/// `/echo <text>`: repeat the arguments back
pub struct EchoCommand;

impl CommandHandler for EchoCommand {
    fn name(&self) -> &'static str {
        "echo"
    }

    fn handle(&self, ctx: &CommandContext<'_>) -> BotResult<Vec<Action>> {
        let text = if ctx.args.is_empty() {
            "Пожалуйста, укажите текст для повторения. Использование: /echo <текст>".to_string()
        } else {
            ctx.args.to_string()
        };
        Ok(vec![Action::SendMessage {
            chat_id: ctx.chat_id,
            text,
            keyboard: None,
            parse_mode: None,
        }])
    }
}
