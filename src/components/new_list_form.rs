//! New List Form Component

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::use_app_context;

#[component]
pub fn NewListForm() -> impl IntoView {
    let ctx = use_app_context();

    let (name, set_name) = signal(String::new());
    let (saving, set_saving) = signal(false);

    let create_list = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if saving.get_untracked() {
            return;
        }
        let text = name.get_untracked();
        set_saving.set(true);
        spawn_local(async move {
            match ctx.sync().create_list(&text).await {
                Ok(list) => {
                    set_name.set(String::new());
                    ctx.notify_success(format!("List \"{}\" created", list.name));
                }
                Err(e) => ctx.notify_error(&e),
            }
            set_saving.set(false);
        });
    };

    view! {
        <form class="new-list-form" on:submit=create_list>
            <input
                type="text"
                placeholder="New list name..."
                prop:value=move || name.get()
                on:input=move |ev| set_name.set(event_target_value(&ev))
            />
            <button type="submit" disabled=move || saving.get()>"+ New list"</button>
        </form>
    }
}
