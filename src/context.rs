//! Application Context
//!
//! Shared handles provided via Leptos Context API.

use std::rc::Rc;

use gloo_timers::callback::Timeout;
use leptos::prelude::*;

use crate::commands::HttpBoardService;
use crate::config::AppConfig;
use crate::error::SyncError;
use crate::store::{store_dismiss_notice, store_push_notice, AppStore, NoticeKind};
use crate::sync::SyncCoordinator;

pub type Coordinator = SyncCoordinator<HttpBoardService, AppStore>;

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    pub store: AppStore,
    pub config: StoredValue<AppConfig>,
    /// The coordinator holds a `reqwest` client, so it lives in local storage
    sync: StoredValue<Rc<Coordinator>, LocalStorage>,
}

impl AppContext {
    pub fn new(store: AppStore, config: AppConfig) -> Self {
        let service = HttpBoardService::new(&config.api_base_url);
        let coordinator = SyncCoordinator::new(service, store, config.user_id.clone());
        Self {
            store,
            config: StoredValue::new(config),
            sync: StoredValue::new_local(Rc::new(coordinator)),
        }
    }

    pub fn sync(&self) -> Rc<Coordinator> {
        self.sync.get_value()
    }

    pub fn notify_success(&self, message: impl Into<String>) {
        self.notify(NoticeKind::Success, message.into());
    }

    /// Surface an error. Not-found style errors are only logged.
    pub fn notify_error(&self, err: &SyncError) {
        if err.is_quiet() {
            log::debug!("[UI] {}", err);
            return;
        }
        log::warn!("[UI] {}", err);
        self.notify(NoticeKind::Error, err.to_string());
    }

    fn notify(&self, kind: NoticeKind, message: String) {
        let store = self.store;
        let id = store_push_notice(&store, kind, message);
        let timeout = self.config.with_value(|c| c.notice_timeout_ms);
        Timeout::new(timeout, move || store_dismiss_notice(&store, id)).forget();
    }
}

/// Get the app context
pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
