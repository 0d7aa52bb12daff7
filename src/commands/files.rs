//! File Reading
//!
//! Turns a browser `File` into an in-memory upload.

use wasm_bindgen_futures::JsFuture;

use crate::models::FileUpload;

pub async fn read_file(file: &web_sys::File) -> Result<FileUpload, String> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| format!("Could not read {}: {:?}", file.name(), e))?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    Ok(FileUpload {
        filename: file.name(),
        mime: file.type_(),
        bytes,
    })
}
