use crate::bot;
use crate::bot::handlers::Command;
use crate::config::BotSettings;
use sightseer_core::api::{AttractionApi, HttpAttractionClient};
use sightseer_core::{AttractionBrowser, InMemorySessionStore, SessionStore};
use std::sync::Arc;
use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;
use teloxide::types::CallbackQuery;
use teloxide::utils::command::BotCommands;
use tracing::{error, info};

/// Run the Telegram transport runtime.
pub async fn run_bot(settings: Arc<BotSettings>) {
    let browser = init_browser(&settings);

    let bot = Bot::new(settings.telegram.telegram_token.clone());
    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        error!("Failed to register bot commands: {}", e);
    }
    let handler = setup_handler();

    info!("Bot is running...");

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![browser])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}

fn init_browser(settings: &BotSettings) -> Arc<AttractionBrowser> {
    let backend = settings.backend.as_ref();

    let client = HttpAttractionClient::new(backend);
    info!(
        "Attraction API client initialized (base: {}, timeout: {}s)",
        client.base_url(),
        backend.http_timeout_secs
    );
    let api: Arc<dyn AttractionApi> = Arc::new(client);

    let sessions: Arc<dyn SessionStore> =
        Arc::new(InMemorySessionStore::new(backend.session_capacity));
    info!(
        "Session store initialized (capacity: {})",
        backend.session_capacity
    );

    Arc::new(AttractionBrowser::new(api, sessions, backend.search_radius))
}

fn setup_handler() -> UpdateHandler<teloxide::RequestError> {
    dptree::entry()
        .branch(Update::filter_callback_query().endpoint(handle_callback))
        .branch(
            Update::filter_message()
                .branch(
                    dptree::entry()
                        .filter_command::<Command>()
                        .endpoint(handle_command),
                )
                .branch(
                    dptree::filter(|msg: Message| msg.location().is_some())
                        .endpoint(handle_location),
                )
                .branch(
                    dptree::filter(|msg: Message| msg.text().is_some())
                        .endpoint(handle_city_text),
                )
                .branch(dptree::endpoint(handle_unsupported)),
        )
}

async fn handle_command(bot: Bot, msg: Message, cmd: Command) -> Result<(), teloxide::RequestError> {
    let res = match cmd {
        Command::Start => bot::handlers::start(bot, msg).await,
        Command::Help => bot::handlers::help(bot, msg).await,
    };
    if let Err(e) = res {
        error!("Command error: {}", e);
    }
    respond(())
}

async fn handle_city_text(
    bot: Bot,
    msg: Message,
    browser: Arc<AttractionBrowser>,
) -> Result<(), teloxide::RequestError> {
    if let Err(e) = bot::handlers::handle_city_text(bot, msg, browser).await {
        error!("Text handler error: {}", e);
    }
    respond(())
}

async fn handle_location(
    bot: Bot,
    msg: Message,
    browser: Arc<AttractionBrowser>,
) -> Result<(), teloxide::RequestError> {
    if let Err(e) = bot::handlers::handle_location(bot, msg, browser).await {
        error!("Location handler error: {}", e);
    }
    respond(())
}

async fn handle_unsupported(bot: Bot, msg: Message) -> Result<(), teloxide::RequestError> {
    if let Err(e) = bot::handlers::handle_unsupported(bot, msg).await {
        error!("Unsupported message handler error: {}", e);
    }
    respond(())
}

async fn handle_callback(
    bot: Bot,
    q: CallbackQuery,
    browser: Arc<AttractionBrowser>,
) -> Result<(), teloxide::RequestError> {
    if let Err(e) = bot::callbacks::handle_callback(bot, q, browser).await {
        error!("Callback handler error: {}", e);
    }
    respond(())
}
