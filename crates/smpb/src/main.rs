use std::sync::Arc;

use smpb_core::config::Config;
use smpb_scraper::PocketClient;

#[tokio::main]
async fn main() -> Result<(), smpb_core::Error> {
    smpb_core::logging::init("smpb")?;

    let cfg = Arc::new(Config::load()?);
    let source = Arc::new(PocketClient::new(&cfg));

    smpb_telegram::router::run_polling(cfg, source)
        .await
        .map_err(|e| smpb_core::Error::External(format!("telegram bot failed: {e}")))?;

    Ok(())
}
