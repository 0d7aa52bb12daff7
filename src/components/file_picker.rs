//! File Picker Component
//!
//! A file input that reads the chosen file into memory.

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use crate::commands;
use crate::context::use_app_context;
use crate::error::SyncError;
use crate::models::FileUpload;

fn picked_file(ev: &web_sys::Event) -> Option<web_sys::File> {
    ev.target()?
        .dyn_into::<web_sys::HtmlInputElement>()
        .ok()?
        .files()?
        .get(0)
}

/// Runs `on_pick` with the file contents once a file has been read
#[component]
pub fn FilePicker(
    #[prop(into)] accept: String,
    #[prop(into)] label: String,
    #[prop(into)] on_pick: Callback<FileUpload>,
) -> impl IntoView {
    let ctx = use_app_context();

    let on_change = move |ev: web_sys::Event| {
        let Some(file) = picked_file(&ev) else { return };
        spawn_local(async move {
            match commands::read_file(&file).await {
                Ok(upload) => {
                    log::debug!("[UI] picked {} ({} bytes)", upload.filename, upload.bytes.len());
                    on_pick.run(upload);
                }
                Err(e) => ctx.notify_error(&SyncError::Validation(format!("Could not read file: {}", e))),
            }
        });
    };

    view! {
        <label class="file-picker">
            <span>{label}</span>
            <input type="file" accept=accept on:change=on_change />
        </label>
    }
}
