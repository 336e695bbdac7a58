//! Keyboard builders: pure functions mapping state to markup values

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton, KeyboardMarkup};

use crate::courses::Catalog;
use crate::prefs::Lang;

/// Reply-keyboard labels; the text handler matches on these exact strings
pub const LABEL_PROFILE: &str = "👤 Профиль";
pub const LABEL_SETTINGS: &str = "⚙️ Настройки";
pub const LABEL_MENU: &str = "📋 Меню";
pub const LABEL_HIDE: &str = "🔽 Скрыть";

/// Persistent main-menu reply keyboard shown beneath the chat input
pub fn main_reply_keyboard() -> KeyboardMarkup {
    KeyboardMarkup::new(vec![
        vec![
            KeyboardButton::new(LABEL_PROFILE),
            KeyboardButton::new(LABEL_SETTINGS),
        ],
        vec![
            KeyboardButton::new(LABEL_MENU),
            KeyboardButton::new(LABEL_HIDE),
        ],
    ])
    .resize_keyboard()
}

/// Append the universal "back" button as a final row
pub fn with_back_button(keyboard: InlineKeyboardMarkup) -> InlineKeyboardMarkup {
    keyboard.append_row(vec![InlineKeyboardButton::callback("⬅️", "nav_back")])
}

/// Inline main menu: profile, settings, menu, courses
pub fn main_menu_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![
            InlineKeyboardButton::callback(LABEL_PROFILE, "menu_profile"),
            InlineKeyboardButton::callback(LABEL_SETTINGS, "menu_settings"),
        ],
        vec![
            InlineKeyboardButton::callback(LABEL_MENU, "menu_menu"),
            InlineKeyboardButton::callback("📚 Курсы", "menu_courses"),
        ],
    ])
}

/// Yes/No confirmation keyboard; answers are `<prefix>_yes` / `<prefix>_no`
pub fn confirm_keyboard(prefix: &str) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![
        InlineKeyboardButton::callback("✅ Да", format!("{}_yes", prefix)),
        InlineKeyboardButton::callback("❌ Нет", format!("{}_no", prefix)),
    ]])
}

/// Settings menu: notification and language sub-screens
pub fn settings_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![
        InlineKeyboardButton::callback("🔔 Уведомления", "settings_notif"),
        InlineKeyboardButton::callback("🌐 Язык", "settings_lang"),
    ]])
}

/// Notification toggle; the single button flips the stored state
pub fn notification_keyboard(enabled: bool) -> InlineKeyboardMarkup {
    let (text, data) = if enabled {
        ("🔔 Уведомления: Вкл", "notif_off")
    } else {
        ("🔕 Уведомления: Выкл", "notif_on")
    };
    InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::callback(text, data)]])
}

/// Language selection with a tick on the active option
pub fn language_keyboard(current: Lang) -> InlineKeyboardMarkup {
    let row = [Lang::Ru, Lang::En, Lang::Zh]
        .into_iter()
        .map(|lang| {
            let label = if lang == current {
                format!("✅ {} {}", lang.flag(), lang.display_name())
            } else {
                format!("{} {}", lang.flag(), lang.display_name())
            };
            InlineKeyboardButton::callback(label, format!("lang_{}", lang.code()))
        })
        .collect::<Vec<_>>();
    InlineKeyboardMarkup::new(vec![row])
}

/// Paginated course keyboard: one button per visible course plus a
/// navigation row. `page` is expected to be pre-clamped by the catalog.
pub fn courses_keyboard(catalog: &Catalog, page: usize) -> InlineKeyboardMarkup {
    let page = catalog.clamp_page(page);
    let total_pages = catalog.total_pages();

    let mut rows: Vec<Vec<InlineKeyboardButton>> = catalog
        .page_items(page)
        .map(|(position, course)| {
            vec![InlineKeyboardButton::callback(
                format!("{}. {}", position, course.title),
                format!("course_{}", course.id),
            )]
        })
        .collect();

    let mut nav_row = Vec::new();
    if page > 0 {
        nav_row.push(InlineKeyboardButton::callback(
            "⬅️ Назад",
            format!("courses_page_{}", page - 1),
        ));
    }
    if total_pages > 1 {
        nav_row.push(InlineKeyboardButton::callback(
            format!("{}/{}", page + 1, total_pages),
            "courses_info",
        ));
    }
    if page + 1 < total_pages {
        nav_row.push(InlineKeyboardButton::callback(
            "Вперёд ➡️",
            format!("courses_page_{}", page + 1),
        ));
    }
    if !nav_row.is_empty() {
        rows.push(nav_row);
    }

    InlineKeyboardMarkup::new(rows)
}
