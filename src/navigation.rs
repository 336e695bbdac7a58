//! # Navigation History
//!
//! Per-chat stacks of screen snapshots backing the universal "back" button.
//! Before every non-back screen transition the callback router pushes the
//! screen the user is currently looking at; pressing "back" pops that
//! snapshot and re-renders it. An empty stack means there is no prior screen
//! and "back" falls through to the root menu.

use parking_lot::Mutex;
use std::collections::HashMap;
use teloxide::types::{ChatId, InlineKeyboardMarkup, MessageId};

/// Maximum frames retained per chat; the oldest frame is dropped beyond this
pub const MAX_DEPTH: usize = 32;

/// Snapshot of a displayed screen, sufficient to re-render it
#[derive(Debug, Clone, PartialEq)]
pub struct NavState {
    pub text: String,
    pub keyboard: Option<InlineKeyboardMarkup>,
    pub message_id: MessageId,
}

/// Per-chat navigation stacks. The lock is held only for the duration of a
/// single push, pop or clear, never across transport calls.
#[derive(Debug, Default)]
pub struct NavigationHistory {
    stacks: Mutex<HashMap<ChatId, Vec<NavState>>>,
}

impl NavigationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the screen the user is leaving
    pub fn push(&self, chat_id: ChatId, state: NavState) {
        let mut stacks = self.stacks.lock();
        let stack = stacks.entry(chat_id).or_default();
        if stack.len() == MAX_DEPTH {
            stack.remove(0);
        }
        stack.push(state);
    }

    /// Pop the most recent snapshot; removes the chat's entry once drained
    pub fn pop(&self, chat_id: ChatId) -> Option<NavState> {
        let mut stacks = self.stacks.lock();
        let state = stacks.get_mut(&chat_id)?.pop();
        if stacks.get(&chat_id).is_some_and(Vec::is_empty) {
            stacks.remove(&chat_id);
        }
        state
    }

    /// Current stack depth for a chat
    pub fn depth(&self, chat_id: ChatId) -> usize {
        self.stacks.lock().get(&chat_id).map_or(0, Vec::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHAT: ChatId = ChatId(7);

    fn frame(text: &str) -> NavState {
        NavState {
            text: text.to_string(),
            keyboard: None,
            message_id: MessageId(100),
        }
    }

    #[test]
    fn test_push_pop_is_lifo() {
        let history = NavigationHistory::new();
        history.push(CHAT, frame("first"));
        history.push(CHAT, frame("second"));

        assert_eq!(history.pop(CHAT).unwrap().text, "second");
        assert_eq!(history.pop(CHAT).unwrap().text, "first");
        assert!(history.pop(CHAT).is_none());
    }

    #[test]
    fn test_drained_stack_entry_is_removed() {
        let history = NavigationHistory::new();
        history.push(CHAT, frame("only"));
        history.pop(CHAT);
        assert_eq!(history.depth(CHAT), 0);
        assert!(history.pop(CHAT).is_none());
    }

    #[test]
    fn test_depth_cap_drops_oldest() {
        let history = NavigationHistory::new();
        for i in 0..40 {
            history.push(CHAT, frame(&format!("screen-{}", i)));
        }
        assert_eq!(history.depth(CHAT), 32);
        // Top is still the most recent push, bottom frames were discarded
        assert_eq!(history.pop(CHAT).unwrap().text, "screen-39");
    }

    #[test]
    fn test_chats_have_independent_stacks() {
        let history = NavigationHistory::new();
        history.push(ChatId(1), frame("a"));
        assert!(history.pop(ChatId(2)).is_none());
        assert_eq!(history.pop(ChatId(1)).unwrap().text, "a");
    }
}
