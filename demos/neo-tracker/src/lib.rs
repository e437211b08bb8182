use wasm_bindgen::prelude::*;

pub mod asteroid;
pub mod bodies;
pub mod config;
pub mod feed;
pub mod game;
pub mod interaction;
pub mod population;

use config::TrackerConfig;
use game::{NeoTracker, CUSTOM_START, CUSTOM_STOP};
use orrery_web::dom;

orrery_web::export_game!(NeoTracker, "neo-tracker");

/// Page entry point. Builds the panel and buttons, then fetches today's feed
/// once the intro overlay is dismissed (or right away if the page has none).
#[wasm_bindgen]
pub fn neo_boot(config_json: &str) -> Result<(), JsValue> {
    if !RUNNER.with(|cell| cell.borrow().is_some()) {
        game_init();
    }

    let config = TrackerConfig::from_json_or_default(config_json);
    with_runner(|r| r.with_game(|g, ctx| g.configure(ctx, config.clone())));

    dom::create_panel(orrery_web::PANEL_ID, interaction::INITIAL_PANEL_TEXT)?;
    let bar = dom::create_button_bar()?;
    dom::add_button(&bar, "Start Simulation", || game_custom_event(CUSTOM_START, 0.0, 0.0, 0.0))?;
    dom::add_button(&bar, "Stop Simulation", || game_custom_event(CUSTOM_STOP, 0.0, 0.0, 0.0))?;

    let date = dom::utc_date_today();
    let url = config.feed_url(&date);
    log::info!("neo-tracker: feed window {}", date);

    // The overlay button may be pressed more than once; fetch only once.
    let mut pending = Some(url.clone());
    let landing = config.landing_page_id.clone();
    let delay = config.intro_delay_ms.min(i32::MAX as u32) as i32;
    let has_overlay = dom::on_click_by_id(&config.start_button_id, move || {
        let Some(url) = pending.take() else { return };
        if let Err(e) = dom::add_class(&landing, "hidden") {
            log::warn!("could not hide {}: {:?}", landing, e);
        }
        wasm_bindgen_futures::spawn_local(async move {
            dom::sleep_ms(delay).await;
            load_feed(url).await;
        });
    })?;

    if !has_overlay {
        wasm_bindgen_futures::spawn_local(load_feed(url));
    }
    Ok(())
}

async fn load_feed(url: String) {
    let result = feed::fetch_feed(&url).await;
    if let Ok(neos) = &result {
        log::info!("feed returned {} objects", neos.len());
    }
    with_runner(|r| r.with_game(|g, ctx| g.ingest(ctx, result)));
    flush_ui();
}
