//! # Course Menu Bot
//!
//! A Telegram bot implementing a small interactive menu: profile view,
//! settings toggles (notifications, interface language), a paginated course
//! catalog and an admin-guarded settings command. Navigation is backed by a
//! per-user history stack powering a universal "back" button.

pub mod bot;
pub mod config;
pub mod courses;
pub mod errors;
pub mod navigation;
pub mod prefs;
pub mod transport;

// Re-export the types most callers need
pub use bot::Router;
pub use config::Config;
pub use courses::{Catalog, Course, PAGE_SIZE};
pub use navigation::{NavState, NavigationHistory};
pub use prefs::{Lang, PreferenceStore};
pub use transport::{Action, BotIdentity, CallbackUpdate, Sender, Transport, Update};
