//! # Per-User Preference Store
//!
//! In-memory preference maps keyed by chat id: notification flag, interface
//! language and the last viewed course page. Each attribute lives behind its
//! own reader-preferring lock so read-only paths never serialize against
//! each other. Entries are created lazily on first read and never destroyed.

use parking_lot::RwLock;
use std::collections::HashMap;
use teloxide::types::ChatId;

/// Interface language codes supported by the bot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lang {
    #[default]
    Ru,
    En,
    Zh,
}

impl Lang {
    /// Parse a wire-format language suffix (`ru`, `en`, `zh`)
    pub fn parse(code: &str) -> Option<Self> {
        match code {
            "ru" => Some(Lang::Ru),
            "en" => Some(Lang::En),
            "zh" => Some(Lang::Zh),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Lang::Ru => "ru",
            Lang::En => "en",
            Lang::Zh => "zh",
        }
    }

    pub fn flag(self) -> &'static str {
        match self {
            Lang::Ru => "🇷🇺",
            Lang::En => "🇬🇧",
            Lang::Zh => "🇨🇳",
        }
    }

    /// Native-language display name shown on keyboard buttons
    pub fn display_name(self) -> &'static str {
        match self {
            Lang::Ru => "Русский",
            Lang::En => "English",
            Lang::Zh => "中文",
        }
    }

    /// Confirmation line shown after switching to this language
    pub fn change_confirmation(self) -> &'static str {
        match self {
            Lang::Ru => "Язык изменён на русский",
            Lang::En => "Language changed to English",
            Lang::Zh => "语言已更改为中文",
        }
    }
}

/// Concurrent-read-safe per-user preference store
#[derive(Debug, Default)]
pub struct PreferenceStore {
    notifications: RwLock<HashMap<ChatId, bool>>,
    language: RwLock<HashMap<ChatId, Lang>>,
    course_page: RwLock<HashMap<ChatId, usize>>,
}

impl PreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notification flag for a chat, defaulting to enabled
    pub fn notifications(&self, chat_id: ChatId) -> bool {
        self.notifications.read().get(&chat_id).copied().unwrap_or(true)
    }

    pub fn set_notifications(&self, chat_id: ChatId, enabled: bool) {
        self.notifications.write().insert(chat_id, enabled);
    }

    /// Interface language for a chat, defaulting to Russian
    pub fn language(&self, chat_id: ChatId) -> Lang {
        self.language.read().get(&chat_id).copied().unwrap_or_default()
    }

    pub fn set_language(&self, chat_id: ChatId, lang: Lang) {
        self.language.write().insert(chat_id, lang);
    }

    /// Last viewed course page for a chat, defaulting to the first page.
    /// Callers clamp against the catalog before rendering.
    pub fn course_page(&self, chat_id: ChatId) -> usize {
        self.course_page.read().get(&chat_id).copied().unwrap_or(0)
    }

    pub fn set_course_page(&self, chat_id: ChatId, page: usize) {
        self.course_page.write().insert(chat_id, page);
    }
}
