//! Bot module: routing of inbound updates to handlers
//!
//! Split into submodules:
//! - `commands`: the `/command` dispatcher and its handlers
//! - `callbacks`: inline-button callback routing and navigation
//! - `text`: free-form text and reply-keyboard label handling
//! - `keyboards`: pure markup builders
//! - `screens`: shared screen (text + keyboard) builders

pub mod callbacks;
pub mod commands;
pub mod keyboards;
pub mod screens;
pub mod text;

use std::sync::Arc;
use tracing::debug;

use crate::config::Config;
use crate::courses::Catalog;
use crate::errors::BotResult;
use crate::navigation::NavigationHistory;
use crate::prefs::PreferenceStore;
use crate::transport::{Action, BotIdentity, Update};
use callbacks::CallbackRouter;
use commands::CommandDispatcher;
use text::TextHandler;

/// Facade tying the three routers to a single update entry point
pub struct Router {
    dispatcher: CommandDispatcher,
    callbacks: CallbackRouter,
    text: TextHandler,
}

impl Router {
    pub fn new(
        config: Arc<Config>,
        prefs: Arc<PreferenceStore>,
        history: Arc<NavigationHistory>,
        catalog: Arc<Catalog>,
        identity: BotIdentity,
    ) -> Self {
        Self {
            dispatcher: commands::default_dispatcher(config),
            callbacks: CallbackRouter::new(
                Arc::clone(&prefs),
                history,
                catalog,
                identity.clone(),
            ),
            text: TextHandler::new(prefs, identity),
        }
    }

    /// Classify one update and produce its outbound actions
    pub fn handle_update(&self, update: &Update) -> BotResult<Vec<Action>> {
        match update {
            Update::Command {
                chat_id,
                from,
                name,
                args,
            } => self.dispatcher.route(*chat_id, from, name, args),
            Update::Callback(cb) => self.callbacks.route(cb),
            Update::Text {
                chat_id,
                from,
                text,
            } => self.text.handle(*chat_id, from, text),
            Update::Other => {
                debug!("Ignoring update with no actionable content");
                Ok(Vec::new())
            }
        }
    }
}
