//! Screen builders: the text and inline keyboard of every interactive view.
//!
//! Pure functions so the callback router and the text handler render the
//! same screen identically and tests can compare against the literal output.

use teloxide::types::{ChatId, InlineKeyboardMarkup};

use super::keyboards;
use crate::courses::{Catalog, Course};
use crate::prefs::Lang;
use crate::transport::BotIdentity;

/// A rendered view: message text plus its inline keyboard
#[derive(Debug, Clone, PartialEq)]
pub struct Screen {
    pub text: String,
    pub keyboard: InlineKeyboardMarkup,
}

/// Profile view with the cosmetic delete-profile confirmation
pub fn profile(identity: &BotIdentity, chat_id: ChatId) -> Screen {
    Screen {
        text: format!(
            "👤 Ваш профиль:\n\nID: {}\nИмя: {}\nUsername: @{}\n\nХотите удалить профиль?",
            chat_id.0, identity.first_name, identity.username
        ),
        keyboard: keyboards::with_back_button(keyboards::confirm_keyboard("delete_profile")),
    }
}

/// Settings menu showing the current preference values
pub fn settings_menu(notifications: bool, language: Lang) -> Screen {
    let notif_state = if notifications { "Вкл" } else { "Выкл" };
    Screen {
        text: format!(
            "⚙️ Настройки:\n\n🔔 Уведомления: {}\n🌐 Язык: {} {}\n\nВыберите настройку для изменения:",
            notif_state,
            language.flag(),
            language.display_name()
        ),
        keyboard: keyboards::with_back_button(keyboards::settings_keyboard()),
    }
}

/// Root main-menu view
pub fn main_menu() -> Screen {
    Screen {
        text: "📋 Главное меню:\n\n\
               Доступные разделы:\n\
               • Профиль - информация о вас\n\
               • Настройки - настройки бота\n\
               • Меню - это сообщение\n\
               • Курсы - список доступных курсов"
            .to_string(),
        keyboard: keyboards::with_back_button(keyboards::main_menu_keyboard()),
    }
}

/// Notification toggle view
pub fn notifications(enabled: bool) -> Screen {
    let status = if enabled {
        "🔔 Включены"
    } else {
        "🔕 Выключены"
    };
    Screen {
        text: format!(
            "🔔 Настройки уведомлений:\n\nТекущий статус: {}\n\nНажмите кнопку, чтобы переключить:",
            status
        ),
        keyboard: keyboards::with_back_button(keyboards::notification_keyboard(enabled)),
    }
}

/// Language selection view; `changed` inserts the confirmation line shown
/// right after a switch
pub fn language(current: Lang, changed: bool) -> Screen {
    let text = if changed {
        format!(
            "🌐 Выбор языка:\n\n{} {}\n\nВыберите язык:",
            current.flag(),
            current.change_confirmation()
        )
    } else {
        "🌐 Выбор языка:\n\nВыберите язык:".to_string()
    };
    Screen {
        text,
        keyboard: keyboards::with_back_button(keyboards::language_keyboard(current)),
    }
}

/// A course-catalog page with its pagination keyboard
pub fn courses_page(catalog: &Catalog, page: usize) -> Screen {
    let page = catalog.clamp_page(page);
    Screen {
        text: catalog.render_page(page),
        keyboard: keyboards::with_back_button(keyboards::courses_keyboard(catalog, page)),
    }
}

/// Detail view of a single course
pub fn course_detail(catalog: &Catalog, course: &Course) -> Screen {
    Screen {
        text: catalog.render_course(course),
        keyboard: keyboards::with_back_button(InlineKeyboardMarkup::default()),
    }
}

/// Shown when a course id has no catalog entry
pub fn course_not_found() -> Screen {
    Screen {
        text: "❌ Курс не найден".to_string(),
        keyboard: keyboards::with_back_button(InlineKeyboardMarkup::default()),
    }
}

/// Shown after the cosmetic delete-profile confirmation; no keyboard
pub fn profile_deleted(confirmed: bool) -> String {
    if confirmed {
        "✅ Профиль удалён.\n\n(Это учебный бот — данные на самом деле не удаляются.)".to_string()
    } else {
        "❌ Удаление отменено.".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_screen_literal_text() {
        let identity = BotIdentity {
            first_name: "TestBot".to_string(),
            username: "test_bot".to_string(),
        };
        let screen = profile(&identity, ChatId(42));
        assert_eq!(
            screen.text,
            "👤 Ваш профиль:\n\nID: 42\nИмя: TestBot\nUsername: @test_bot\n\nХотите удалить профиль?"
        );
    }

    #[test]
    fn test_language_screen_change_confirmation() {
        let screen = language(Lang::En, true);
        assert_eq!(
            screen.text,
            "🌐 Выбор языка:\n\n🇬🇧 Language changed to English\n\nВыберите язык:"
        );
    }

    #[test]
    fn test_settings_menu_reflects_prefs() {
        let screen = settings_menu(false, Lang::Zh);
        assert!(screen.text.contains("🔔 Уведомления: Выкл"));
        assert!(screen.text.contains("🌐 Язык: 🇨🇳 中文"));
    }

    #[test]
    fn test_every_screen_carries_a_back_button() {
        let catalog = Catalog::default_catalog();
        let identity = BotIdentity {
            first_name: "b".to_string(),
            username: "b".to_string(),
        };
        let screens = [
            profile(&identity, ChatId(1)),
            settings_menu(true, Lang::Ru),
            main_menu(),
            notifications(true),
            language(Lang::Ru, false),
            courses_page(&catalog, 0),
            course_not_found(),
        ];
        for screen in screens {
            let last_row = screen.keyboard.inline_keyboard.last().unwrap();
            assert_eq!(last_row[0].text, "⬅️");
        }
    }
}
