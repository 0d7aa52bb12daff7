//! Notices Component
//!
//! Toast stack. Notices dismiss themselves; a click dismisses early.

use leptos::prelude::*;

use crate::store::{store_dismiss_notice, use_app_store, AppStateStoreFields, NoticeKind};

#[component]
pub fn Notices() -> impl IntoView {
    let store = use_app_store();

    view! {
        <div class="notices">
            <For
                each=move || store.notices().get()
                key=|notice| notice.id
                children=move |notice| {
                    let id = notice.id;
                    let class = match notice.kind {
                        NoticeKind::Success => "notice success",
                        NoticeKind::Error => "notice error",
                    };
                    view! {
                        <div class=class on:click=move |_| store_dismiss_notice(&store, id)>
                            {notice.message}
                        </div>
                    }
                }
            />
        </div>
    }
}
