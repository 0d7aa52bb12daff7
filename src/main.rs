#![allow(warnings)]
//! Study Board Frontend Entry Point

mod app;
mod board;
mod commands;
mod components;
mod config;
mod context;
mod error;
mod models;
mod store;
mod sync;

use app::App;
use config::AppConfig;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();

    let config = AppConfig::from_window();
    if let Err(e) = rolling_logger::init(config.log_capacity, config.level_filter()) {
        web_sys::console::warn_1(&format!("[APP] logger already set: {}", e).into());
    }
    log::info!("[APP] starting, api at {}", config.api_base_url);

    mount_to_body(move || view! { <App config=config /> });
}
