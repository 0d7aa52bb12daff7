//! Runtime Configuration
//!
//! Read from the `window.__STUDY_BOARD__` object set by the host page.
//! Every field has a default so a missing object is fine.

use log::LevelFilter;
use serde::Deserialize;
use wasm_bindgen::JsValue;

/// Name of the global the host page sets
pub const CONFIG_GLOBAL: &str = "__STUDY_BOARD__";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    /// Base URL of the board REST service
    pub api_base_url: String,
    /// Signed-in user; authentication happens outside this app
    pub user_id: Option<String>,
    pub click_threshold_ms: f64,
    pub drag_threshold_px: i32,
    pub notice_timeout_ms: u32,
    pub log_capacity: usize,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:3000".to_string(),
            user_id: None,
            click_threshold_ms: leptos_dragdrop::DEFAULT_CLICK_THRESHOLD_MS,
            drag_threshold_px: leptos_dragdrop::DEFAULT_DRAG_THRESHOLD_PX,
            notice_timeout_ms: 4_000,
            log_capacity: 500,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load from the page global, falling back to defaults
    pub fn from_window() -> Self {
        let Some(window) = web_sys::window() else {
            return Self::default();
        };
        match js_sys::Reflect::get(&window, &JsValue::from_str(CONFIG_GLOBAL)) {
            Ok(value) if !value.is_undefined() && !value.is_null() => Self::from_js(value),
            _ => Self::default(),
        }
    }

    fn from_js(value: JsValue) -> Self {
        serde_wasm_bindgen::from_value(value).unwrap_or_else(|e| {
            log::warn!("[CONFIG] ignoring malformed {}: {}", CONFIG_GLOBAL, e);
            Self::default()
        })
    }

    /// Unknown level names fall back to `Info`
    pub fn level_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }

    /// Absolute URL for a path the service returned (attachments are relative)
    pub fn asset_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}/{}", self.api_base_url.trim_end_matches('/'), path.trim_start_matches('/'))
        }
    }
}
