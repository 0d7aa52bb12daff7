//! Card Commands
//!
//! Bindings for card endpoints, including multipart file upload.

use reqwest::multipart::{Form, Part};
use serde::Serialize;

use super::HttpBoardService;
use crate::error::RemoteError;
use crate::models::{Card, FileUpload};

/// Multipart field name the service reads uploads from
const FILES_FIELD: &str = "files";

// ========================
// Argument Structs
// ========================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateCardArgs<'a> {
    title: &'a str,
    list_id: &'a str,
}

#[derive(Serialize)]
struct UpdateCardArgs<'a> {
    title: &'a str,
}

// ========================
// Commands
// ========================

pub async fn create_card(api: &HttpBoardService, title: &str, list_id: &str) -> Result<Card, RemoteError> {
    let endpoint = api.endpoint(&["cards"]);
    let request = api.client().post(&endpoint).json(&CreateCardArgs { title, list_id });
    api.fetch(request, &endpoint).await
}

pub async fn get_card(api: &HttpBoardService, card_id: &str) -> Result<Card, RemoteError> {
    let endpoint = api.endpoint(&["cards", card_id]);
    api.fetch(api.client().get(&endpoint), &endpoint).await
}

pub async fn update_card_title(api: &HttpBoardService, card_id: &str, title: &str) -> Result<Card, RemoteError> {
    let endpoint = api.endpoint(&["cards", card_id]);
    let request = api.client().patch(&endpoint).json(&UpdateCardArgs { title });
    api.fetch(request, &endpoint).await
}

pub async fn delete_card(api: &HttpBoardService, card_id: &str) -> Result<(), RemoteError> {
    let endpoint = api.endpoint(&["cards", card_id]);
    api.execute(api.client().delete(&endpoint), &endpoint).await
}

pub async fn upload_card_files(api: &HttpBoardService, card_id: &str, files: &[FileUpload]) -> Result<Card, RemoteError> {
    let endpoint = api.endpoint(&["cards", card_id, "files"]);
    let mut form = Form::new();
    for file in files {
        let mut part = Part::bytes(file.bytes.clone()).file_name(file.filename.clone());
        if !file.mime.is_empty() {
            part = part.mime_str(&file.mime).map_err(|e| RemoteError::Http {
                endpoint: endpoint.clone(),
                message: format!("bad content type for {}: {}", file.filename, e),
            })?;
        }
        form = form.part(FILES_FIELD, part);
    }
    api.fetch(api.client().post(&endpoint).multipart(form), &endpoint).await
}
