//! Delete Confirm Button Component
//!
//! Inline two-step delete: a × button that turns into "Delete?" ✓/✗.

use leptos::prelude::*;

/// Inline delete confirmation button
///
/// # Arguments
/// * `button_class` - CSS class for the initial × button
/// * `on_confirm` - Runs once the user confirms
#[component]
pub fn DeleteConfirmButton(
    #[prop(into)] button_class: String,
    #[prop(into, optional)] title: Option<String>,
    #[prop(into)] on_confirm: Callback<()>,
) -> impl IntoView {
    let (confirming, set_confirming) = signal(false);
    let title = title.unwrap_or_else(|| "Delete".to_string());

    view! {
        <Show
            when=move || confirming.get()
            fallback=move || view! {
                <button
                    class=button_class.clone()
                    title=title.clone()
                    on:click=move |ev| {
                        ev.stop_propagation();
                        set_confirming.set(true);
                    }
                >
                    "×"
                </button>
            }
        >
            <span class="delete-confirm">
                <span class="delete-confirm-text">"Delete?"</span>
                <button
                    class="confirm-btn"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        set_confirming.set(false);
                        on_confirm.run(());
                    }
                >
                    "✓"
                </button>
                <button
                    class="cancel-btn"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        set_confirming.set(false);
                    }
                >
                    "✗"
                </button>
            </span>
        </Show>
    }
}
