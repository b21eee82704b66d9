use std::sync::Arc;

use teloxide::{dispatching::Dispatcher, dptree, prelude::*};

use tracing::info;

use smpb_core::{
    config::Config, messaging::port::MediaPort, pipeline::ChapterPipeline, ports::ChapterSource,
};

use crate::handlers;
use crate::TelegramMessenger;

#[derive(Clone)]
pub struct AppState {
    pub cfg: Arc<Config>,
    pub pipeline: Arc<ChapterPipeline>,
    pub messenger: Arc<dyn MediaPort>,
}

pub async fn run_polling(cfg: Arc<Config>, source: Arc<dyn ChapterSource>) -> anyhow::Result<()> {
    let bot = Bot::new(cfg.telegram_bot_token.clone());

    if let Ok(me) = bot.get_me().await {
        info!("smpb started: @{}", me.username());
    }
    info!(
        "source site: {} (credentials {})",
        cfg.site_base_url,
        if cfg.credentials.pair().is_some() {
            "configured"
        } else {
            "absent"
        }
    );

    let messenger: Arc<dyn MediaPort> = Arc::new(TelegramMessenger::new(bot.clone()));
    let pipeline = Arc::new(ChapterPipeline::new(source, messenger.clone()));

    let state = Arc::new(AppState {
        cfg,
        pipeline,
        messenger,
    });

    let handler =
        dptree::entry().branch(Update::filter_message().endpoint(handlers::handle_message));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .build()
        .dispatch()
        .await;

    Ok(())
}
