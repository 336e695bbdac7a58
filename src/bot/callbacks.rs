//! Callback router: dispatches inline-button taps by data prefix.
//!
//! Every invocation answers the callback immediately (the platform expects
//! an ack within its deadline), then classifies `data` by longest matching
//! prefix. Successful non-back transitions snapshot the current screen onto
//! the navigation history before editing the message, so the universal
//! "back" button can restore it later.

use std::sync::Arc;
use tracing::{debug, warn};

use super::screens::{self, Screen};
use crate::courses::Catalog;
use crate::errors::BotResult;
use crate::navigation::{NavState, NavigationHistory};
use crate::prefs::{Lang, PreferenceStore};
use crate::transport::{Action, BotIdentity, CallbackUpdate};

/// Toast shown when a numeric callback suffix fails to parse
const NAV_ERROR_NOTICE: &str = "❌ Ошибка навигации";
/// Toast shown for callback data no handler claims
const UNKNOWN_NOTICE: &str = "❌ Неизвестная команда";

/// Routes inline-button callbacks to their screen transitions
pub struct CallbackRouter {
    prefs: Arc<PreferenceStore>,
    history: Arc<NavigationHistory>,
    catalog: Arc<Catalog>,
    identity: BotIdentity,
}

impl CallbackRouter {
    pub fn new(
        prefs: Arc<PreferenceStore>,
        history: Arc<NavigationHistory>,
        catalog: Arc<Catalog>,
        identity: BotIdentity,
    ) -> Self {
        Self {
            prefs,
            history,
            catalog,
            identity,
        }
    }

    /// Route one callback. Always emits the immediate empty ack first;
    /// failure paths add a notice ack and leave screen and state untouched.
    pub fn route(&self, cb: &CallbackUpdate) -> BotResult<Vec<Action>> {
        debug!(chat_id = %cb.chat_id, data = %cb.data, "Routing callback");

        let mut actions = vec![Action::AckCallback {
            callback_id: cb.id.clone(),
            notice: None,
        }];

        let data = cb.data.as_str();
        // Longest prefix first: courses_page_ must win over course_
        if let Some(suffix) = data.strip_prefix("delete_profile_") {
            self.handle_delete_profile(cb, suffix, &mut actions);
        } else if let Some(suffix) = data.strip_prefix("courses_page_") {
            self.handle_courses_page(cb, suffix, &mut actions);
        } else if data == "courses_info" {
            self.handle_courses_info(cb, &mut actions);
        } else if let Some(suffix) = data.strip_prefix("settings_") {
            self.handle_settings(cb, suffix, &mut actions);
        } else if let Some(suffix) = data.strip_prefix("notif_") {
            self.handle_notifications(cb, suffix, &mut actions);
        } else if let Some(suffix) = data.strip_prefix("lang_") {
            self.handle_language(cb, suffix, &mut actions);
        } else if let Some(suffix) = data.strip_prefix("course_") {
            self.handle_course_details(cb, suffix, &mut actions);
        } else if let Some(suffix) = data.strip_prefix("menu_") {
            self.handle_menu(cb, suffix, &mut actions);
        } else if data == "nav_back" {
            self.handle_back(cb, &mut actions);
        } else {
            warn!(chat_id = %cb.chat_id, data = %cb.data, "Unknown callback data");
            push_notice(cb, UNKNOWN_NOTICE, &mut actions);
        }

        Ok(actions)
    }

    fn handle_delete_profile(&self, cb: &CallbackUpdate, suffix: &str, actions: &mut Vec<Action>) {
        let confirmed = match suffix {
            "yes" => true,
            "no" => false,
            _ => {
                push_notice(cb, UNKNOWN_NOTICE, actions);
                return;
            }
        };
        // Cosmetic only: nothing is deleted, the edit just drops the keyboard
        self.push_snapshot(cb);
        actions.push(Action::EditMessage {
            chat_id: cb.chat_id,
            message_id: cb.message_id,
            text: screens::profile_deleted(confirmed),
            keyboard: None,
        });
    }

    fn handle_notifications(&self, cb: &CallbackUpdate, suffix: &str, actions: &mut Vec<Action>) {
        let enabled = match suffix {
            "on" => true,
            "off" => false,
            _ => {
                push_notice(cb, UNKNOWN_NOTICE, actions);
                return;
            }
        };
        self.push_snapshot(cb);
        self.prefs.set_notifications(cb.chat_id, enabled);
        let notice = if enabled {
            "🔔 Уведомления включены"
        } else {
            "🔕 Уведомления выключены"
        };
        push_notice(cb, notice, actions);
        push_edit(cb, screens::notifications(enabled), actions);
    }

    fn handle_language(&self, cb: &CallbackUpdate, suffix: &str, actions: &mut Vec<Action>) {
        let Some(lang) = Lang::parse(suffix) else {
            push_notice(cb, UNKNOWN_NOTICE, actions);
            return;
        };
        self.push_snapshot(cb);
        self.prefs.set_language(cb.chat_id, lang);
        push_notice(cb, &format!("✅ {}", lang.change_confirmation()), actions);
        push_edit(cb, screens::language(lang, true), actions);
    }

    fn handle_settings(&self, cb: &CallbackUpdate, suffix: &str, actions: &mut Vec<Action>) {
        let screen = match suffix {
            "notif" => screens::notifications(self.prefs.notifications(cb.chat_id)),
            "lang" => screens::language(self.prefs.language(cb.chat_id), false),
            _ => {
                push_notice(cb, UNKNOWN_NOTICE, actions);
                return;
            }
        };
        self.push_snapshot(cb);
        push_edit(cb, screen, actions);
    }

    fn handle_menu(&self, cb: &CallbackUpdate, suffix: &str, actions: &mut Vec<Action>) {
        let screen = match suffix {
            "profile" => screens::profile(&self.identity, cb.chat_id),
            "settings" => screens::settings_menu(
                self.prefs.notifications(cb.chat_id),
                self.prefs.language(cb.chat_id),
            ),
            "menu" => screens::main_menu(),
            "courses" => {
                let page = self.catalog.clamp_page(self.prefs.course_page(cb.chat_id));
                self.push_snapshot(cb);
                self.prefs.set_course_page(cb.chat_id, page);
                push_edit(cb, screens::courses_page(&self.catalog, page), actions);
                return;
            }
            _ => {
                push_notice(cb, UNKNOWN_NOTICE, actions);
                return;
            }
        };
        self.push_snapshot(cb);
        push_edit(cb, screen, actions);
    }

    fn handle_courses_page(&self, cb: &CallbackUpdate, suffix: &str, actions: &mut Vec<Action>) {
        let Ok(requested) = suffix.parse::<usize>() else {
            warn!(chat_id = %cb.chat_id, suffix = %suffix, "Malformed courses page suffix");
            push_notice(cb, NAV_ERROR_NOTICE, actions);
            return;
        };
        let page = self.catalog.clamp_page(requested);
        self.push_snapshot(cb);
        push_edit(cb, screens::courses_page(&self.catalog, page), actions);
        self.prefs.set_course_page(cb.chat_id, page);
    }

    fn handle_courses_info(&self, cb: &CallbackUpdate, actions: &mut Vec<Action>) {
        // Page-indicator tap: re-render the stored page, mutate nothing
        let page = self.catalog.clamp_page(self.prefs.course_page(cb.chat_id));
        self.push_snapshot(cb);
        push_edit(cb, screens::courses_page(&self.catalog, page), actions);
    }

    fn handle_course_details(&self, cb: &CallbackUpdate, suffix: &str, actions: &mut Vec<Action>) {
        let Ok(course_id) = suffix.parse::<i32>() else {
            warn!(chat_id = %cb.chat_id, suffix = %suffix, "Malformed course id suffix");
            push_notice(cb, NAV_ERROR_NOTICE, actions);
            return;
        };
        match self.catalog.find(course_id) {
            Some(course) => {
                self.push_snapshot(cb);
                push_edit(cb, screens::course_detail(&self.catalog, course), actions);
            }
            None => {
                warn!(chat_id = %cb.chat_id, course_id = course_id, "Course not found");
                self.push_snapshot(cb);
                push_notice(cb, "❌ Курс не найден", actions);
                push_edit(cb, screens::course_not_found(), actions);
            }
        }
    }

    /// Pop the previous screen and restore it; an empty stack falls back to
    /// the root main menu.
    fn handle_back(&self, cb: &CallbackUpdate, actions: &mut Vec<Action>) {
        match self.history.pop(cb.chat_id) {
            Some(previous) => {
                debug!(chat_id = %cb.chat_id, "Restoring previous screen");
                actions.push(Action::EditMessage {
                    chat_id: cb.chat_id,
                    message_id: cb.message_id,
                    text: previous.text,
                    keyboard: previous.keyboard,
                });
            }
            None => {
                debug!(chat_id = %cb.chat_id, "Back with empty history, showing root menu");
                push_edit(cb, screens::main_menu(), actions);
            }
        }
    }

    /// Snapshot the screen the user is leaving
    fn push_snapshot(&self, cb: &CallbackUpdate) {
        self.history.push(
            cb.chat_id,
            NavState {
                text: cb.current_text.clone(),
                keyboard: cb.current_keyboard.clone(),
                message_id: cb.message_id,
            },
        );
    }
}

fn push_notice(cb: &CallbackUpdate, notice: &str, actions: &mut Vec<Action>) {
    actions.push(Action::AckCallback {
        callback_id: cb.id.clone(),
        notice: Some(notice.to_string()),
    });
}

fn push_edit(cb: &CallbackUpdate, screen: Screen, actions: &mut Vec<Action>) {
    actions.push(Action::EditMessage {
        chat_id: cb.chat_id,
        message_id: cb.message_id,
        text: screen.text,
        keyboard: Some(screen.keyboard),
    });
}
