use course_menu_bot::bot::Router;
use course_menu_bot::config::Config;
use course_menu_bot::courses::Catalog;
use course_menu_bot::navigation::NavigationHistory;
use course_menu_bot::prefs::{Lang, PreferenceStore};
use course_menu_bot::transport::{Action, BotIdentity, CallbackUpdate, Update};
use std::sync::Arc;
use teloxide::types::{
    ChatId, InlineKeyboardButton, InlineKeyboardButtonKind, MessageId, UserId,
};

const CHAT: ChatId = ChatId(100);

struct Fixture {
    router: Router,
    prefs: Arc<PreferenceStore>,
    history: Arc<NavigationHistory>,
}

fn fixture() -> Fixture {
    let prefs = Arc::new(PreferenceStore::new());
    let history = Arc::new(NavigationHistory::new());
    let config = Arc::new(Config {
        token: "123456:test-token-value-long-enough".to_string(),
        debug: false,
        timeout_secs: 60,
        admin_ids: vec![],
    });
    let router = Router::new(
        config,
        Arc::clone(&prefs),
        Arc::clone(&history),
        Arc::new(Catalog::default_catalog()),
        BotIdentity {
            first_name: "TestBot".to_string(),
            username: "test_bot".to_string(),
        },
    );
    Fixture {
        router,
        prefs,
        history,
    }
}

fn callback(data: &str) -> Update {
    callback_from(data, "предыдущий экран")
}

fn callback_from(data: &str, current_text: &str) -> Update {
    Update::Callback(CallbackUpdate {
        id: "cb-1".to_string(),
        chat_id: CHAT,
        user_id: UserId(100),
        message_id: MessageId(5),
        data: data.to_string(),
        current_text: current_text.to_string(),
        current_keyboard: None,
    })
}

fn button_data(button: &InlineKeyboardButton) -> &str {
    match &button.kind {
        InlineKeyboardButtonKind::CallbackData(data) => data,
        other => panic!("expected callback button, got {:?}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every callback, valid or not, is acked before anything else
    #[test]
    fn test_callbacks_ack_first() {
        let fx = fixture();
        for data in [
            "menu_profile",
            "settings_lang",
            "notif_on",
            "lang_zh",
            "course_3",
            "courses_page_1",
            "courses_info",
            "nav_back",
            "delete_profile_no",
            "полная чепуха",
            "",
        ] {
            let actions = fx.router.handle_update(&callback(data)).unwrap();
            assert!(
                matches!(
                    &actions[0],
                    Action::AckCallback {
                        callback_id,
                        notice: None,
                    } if callback_id == "cb-1"
                ),
                "first action for {:?} was {:?}",
                data,
                actions[0]
            );
        }
    }

    /// Switching to English: empty ack, confirmation toast, then the edited
    /// language screen, in that order
    #[test]
    fn test_language_switch_action_order() {
        let fx = fixture();
        let actions = fx.router.handle_update(&callback("lang_en")).unwrap();

        assert_eq!(actions.len(), 3);
        assert!(matches!(
            &actions[0],
            Action::AckCallback { notice: None, .. }
        ));
        match &actions[1] {
            Action::AckCallback {
                notice: Some(notice),
                ..
            } => assert_eq!(notice, "✅ Language changed to English"),
            other => panic!("expected toast ack, got {:?}", other),
        }
        match &actions[2] {
            Action::EditMessage {
                chat_id,
                message_id,
                text,
                keyboard,
            } => {
                assert_eq!(*chat_id, CHAT);
                assert_eq!(*message_id, MessageId(5));
                assert_eq!(
                    text,
                    "🌐 Выбор языка:\n\n🇬🇧 Language changed to English\n\nВыберите язык:"
                );
                assert!(keyboard.is_some());
            }
            other => panic!("expected EditMessage, got {:?}", other),
        }
        assert_eq!(fx.prefs.language(CHAT), Lang::En);
    }

    #[test]
    fn test_language_last_write_wins() {
        let fx = fixture();
        fx.router.handle_update(&callback("lang_en")).unwrap();
        fx.router.handle_update(&callback("lang_zh")).unwrap();
        assert_eq!(fx.prefs.language(CHAT), Lang::Zh);
    }

    #[test]
    fn test_notification_toggle_persists() {
        let fx = fixture();
        assert!(fx.prefs.notifications(CHAT));

        let actions = fx.router.handle_update(&callback("notif_off")).unwrap();
        assert!(!fx.prefs.notifications(CHAT));
        match &actions[1] {
            Action::AckCallback {
                notice: Some(notice),
                ..
            } => assert_eq!(notice, "🔕 Уведомления выключены"),
            other => panic!("expected toast ack, got {:?}", other),
        }

        fx.router.handle_update(&callback("notif_on")).unwrap();
        assert!(fx.prefs.notifications(CHAT));
    }

    /// Tapping to page index 2 shows courses 7 through 9 and the full
    /// navigation row
    #[test]
    fn test_courses_page_renders_requested_page() {
        let fx = fixture();
        let actions = fx
            .router
            .handle_update(&callback("courses_page_2"))
            .unwrap();

        let Action::EditMessage { text, keyboard, .. } = &actions[1] else {
            panic!("expected EditMessage, got {:?}", actions[1]);
        };
        assert!(text.starts_with("📚 Доступные курсы (страница 3/4):"));
        assert!(text.contains("7. Тестирование ПО"));
        assert!(text.contains("8. Docker и контейнеры"));
        assert!(text.contains("9. Сетевые протоколы"));
        assert!(!text.contains("10. Машинное обучение"));

        // Three course rows, then the navigation row, then the back row
        let rows = &keyboard.as_ref().unwrap().inline_keyboard;
        assert_eq!(rows.len(), 5);
        let nav_row = &rows[3];
        assert_eq!(button_data(&nav_row[0]), "courses_page_1");
        assert_eq!(nav_row[1].text, "3/4");
        assert_eq!(button_data(&nav_row[1]), "courses_info");
        assert_eq!(button_data(&nav_row[2]), "courses_page_3");

        assert_eq!(fx.prefs.course_page(CHAT), 2);
    }

    /// Out-of-range page requests are clamped to the last page
    #[test]
    fn test_courses_page_clamped() {
        let fx = fixture();
        let actions = fx
            .router
            .handle_update(&callback("courses_page_99"))
            .unwrap();

        let Action::EditMessage { text, .. } = &actions[1] else {
            panic!("expected EditMessage, got {:?}", actions[1]);
        };
        assert!(text.starts_with("📚 Доступные курсы (страница 4/4):"));
        assert_eq!(fx.prefs.course_page(CHAT), 3);
    }

    /// A malformed page suffix produces only the error toast and leaves
    /// screen and preferences untouched
    #[test]
    fn test_courses_page_malformed_suffix() {
        let fx = fixture();
        let actions = fx
            .router
            .handle_update(&callback("courses_page_abc"))
            .unwrap();

        assert_eq!(actions.len(), 2);
        match &actions[1] {
            Action::AckCallback {
                notice: Some(notice),
                ..
            } => assert_eq!(notice, "❌ Ошибка навигации"),
            other => panic!("expected toast ack, got {:?}", other),
        }
        assert_eq!(fx.prefs.course_page(CHAT), 0);
        assert_eq!(fx.history.depth(CHAT), 0);
    }

    /// The page-indicator button re-renders the stored page without
    /// mutating any preference
    #[test]
    fn test_courses_info_rerenders_stored_page() {
        let fx = fixture();
        fx.prefs.set_course_page(CHAT, 1);

        let actions = fx.router.handle_update(&callback("courses_info")).unwrap();
        let Action::EditMessage { text, .. } = &actions[1] else {
            panic!("expected EditMessage, got {:?}", actions[1]);
        };
        assert!(text.starts_with("📚 Доступные курсы (страница 2/4):"));
        assert_eq!(fx.prefs.course_page(CHAT), 1);
    }

    /// Opening the course list from the menu resumes at the stored page
    #[test]
    fn test_menu_courses_resumes_stored_page() {
        let fx = fixture();
        fx.prefs.set_course_page(CHAT, 2);

        let actions = fx.router.handle_update(&callback("menu_courses")).unwrap();
        let Action::EditMessage { text, .. } = &actions[1] else {
            panic!("expected EditMessage, got {:?}", actions[1]);
        };
        assert!(text.starts_with("📚 Доступные курсы (страница 3/4):"));
    }

    #[test]
    fn test_course_detail_screen() {
        let fx = fixture();
        let actions = fx.router.handle_update(&callback("course_1")).unwrap();

        let Action::EditMessage { text, keyboard, .. } = &actions[1] else {
            panic!("expected EditMessage, got {:?}", actions[1]);
        };
        assert!(text.starts_with("📚 Основы Python\n\n"));
        // Detail view offers only the back button
        let rows = &keyboard.as_ref().unwrap().inline_keyboard;
        assert_eq!(rows.len(), 1);
        assert_eq!(button_data(&rows[0][0]), "nav_back");
    }

    /// An id absent from the catalog shows the error screen but never
    /// touches preferences
    #[test]
    fn test_course_not_found() {
        let fx = fixture();
        let actions = fx.router.handle_update(&callback("course_99")).unwrap();

        assert_eq!(actions.len(), 3);
        match &actions[1] {
            Action::AckCallback {
                notice: Some(notice),
                ..
            } => assert_eq!(notice, "❌ Курс не найден"),
            other => panic!("expected toast ack, got {:?}", other),
        }
        let Action::EditMessage { text, .. } = &actions[2] else {
            panic!("expected EditMessage, got {:?}", actions[2]);
        };
        assert_eq!(text, "❌ Курс не найден");
        assert_eq!(fx.prefs.course_page(CHAT), 0);
        // The screen visibly transitioned, so "back" must be able to return
        assert_eq!(fx.history.depth(CHAT), 1);
    }

    /// Data no handler claims gets the unknown-command toast and nothing else
    #[test]
    fn test_unknown_callback_data() {
        let fx = fixture();
        let actions = fx.router.handle_update(&callback("bogus_thing")).unwrap();

        assert_eq!(actions.len(), 2);
        match &actions[1] {
            Action::AckCallback {
                notice: Some(notice),
                ..
            } => assert_eq!(notice, "❌ Неизвестная команда"),
            other => panic!("expected toast ack, got {:?}", other),
        }
        assert_eq!(fx.history.depth(CHAT), 0);
    }

    /// Successful transitions snapshot the screen the user left
    #[test]
    fn test_transition_snapshots_previous_screen() {
        let fx = fixture();
        fx.router
            .handle_update(&callback_from("menu_settings", "корневой экран"))
            .unwrap();

        assert_eq!(fx.history.depth(CHAT), 1);
        let frame = fx.history.pop(CHAT).unwrap();
        assert_eq!(frame.text, "корневой экран");
        assert_eq!(frame.message_id, MessageId(5));
    }

    /// The cosmetic delete-profile confirmation drops the keyboard
    #[test]
    fn test_delete_profile_confirmation() {
        let fx = fixture();
        let actions = fx
            .router
            .handle_update(&callback("delete_profile_no"))
            .unwrap();

        let Action::EditMessage { text, keyboard, .. } = &actions[1] else {
            panic!("expected EditMessage, got {:?}", actions[1]);
        };
        assert_eq!(text, "❌ Удаление отменено.");
        assert!(keyboard.is_none());
    }
}
