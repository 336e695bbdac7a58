use anyhow::Result;
use course_menu_bot::bot::Router;
use course_menu_bot::config::Config;
use course_menu_bot::courses;
use course_menu_bot::errors::error_logging;
use course_menu_bot::navigation::NavigationHistory;
use course_menu_bot::prefs::PreferenceStore;
use course_menu_bot::transport::{self, BotIdentity, TelegramTransport};
use std::sync::Arc;
use std::time::Duration;
use teloxide::prelude::*;
use teloxide::update_listeners::Polling;
use tracing::info;
use tracing_subscriber::{prelude::*, EnvFilter};

/// Initialize tracing with env-filter overrides; `BOT_LOG_JSON=true`
/// switches to JSON output for log aggregation
fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let json = std::env::var("BOT_LOG_JSON")
        .map(|v| v == "true")
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

fn load_config() -> Arc<Config> {
    match Config::from_env() {
        Ok(config) => Arc::new(config),
        Err(e) => {
            // Tracing is not up yet, so report on stderr directly
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Route one classified update and deliver whatever actions it produced.
/// Handler errors are logged and swallowed so one bad update cannot take
/// down the dispatch loop.
async fn process_update(
    update: transport::Update,
    router: Arc<Router>,
    tg: Arc<TelegramTransport>,
) -> Result<()> {
    match router.handle_update(&update) {
        Ok(actions) => transport::deliver(tg.as_ref(), actions).await,
        Err(e) => error_logging::log_handler_error(&e, "router", update.chat_id()),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file first
    dotenvy::dotenv().ok();

    let config = load_config();
    init_logging(config.debug);

    info!(
        debug = config.debug,
        timeout_secs = config.timeout_secs,
        admin_count = config.admin_ids.len(),
        "Configuration loaded"
    );

    // Client timeout sits above the long-poll timeout so idle getUpdates
    // calls run to completion
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.http_timeout_secs()))
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {}", e))?;

    let bot = Bot::with_client(config.token.clone(), client);

    // Fail fast on a bad token instead of looping on 401s
    let me = bot
        .get_me()
        .await
        .map_err(|e| anyhow::anyhow!("Telegram authentication failed: {}", e))?;
    let identity = BotIdentity::from(&me);

    info!(username = %identity.username, "Bot authenticated, starting dispatcher");

    let prefs = Arc::new(PreferenceStore::new());
    let history = Arc::new(NavigationHistory::new());
    let catalog = Arc::new(courses::load_catalog());

    let router = Arc::new(Router::new(
        Arc::clone(&config),
        prefs,
        history,
        catalog,
        identity,
    ));
    let tg = Arc::new(TelegramTransport::new(bot.clone()));

    let handler = dptree::entry()
        .branch(Update::filter_message().endpoint({
            let router = Arc::clone(&router);
            let tg = Arc::clone(&tg);
            move |msg: Message| {
                let router = Arc::clone(&router);
                let tg = Arc::clone(&tg);
                async move {
                    let update = transport::update_from_message(&msg);
                    process_update(update, router, tg).await
                }
            }
        }))
        .branch(Update::filter_callback_query().endpoint({
            let router = Arc::clone(&router);
            let tg = Arc::clone(&tg);
            move |q: CallbackQuery| {
                let router = Arc::clone(&router);
                let tg = Arc::clone(&tg);
                async move {
                    let update = transport::update_from_callback(&q);
                    process_update(update, router, tg).await
                }
            }
        }));

    let listener = Polling::builder(bot.clone())
        .timeout(Duration::from_secs(config.timeout_secs))
        .build();

    Dispatcher::builder(bot, handler)
        .enable_ctrlc_handler()
        .build()
        .dispatch_with_listener(
            listener,
            LoggingErrorHandler::with_custom_text("An error from the update listener"),
        )
        .await;

    Ok(())
}
