//! List Commands
//!
//! Bindings for list endpoints.

use serde::Serialize;

use super::HttpBoardService;
use crate::error::RemoteError;
use crate::models::{BoardList, Card};

// ========================
// Argument Structs
// ========================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateListArgs<'a> {
    name: &'a str,
    user_id: &'a str,
}

// ========================
// Commands
// ========================

pub async fn list_lists_by_user(api: &HttpBoardService, user_id: &str) -> Result<Vec<BoardList>, RemoteError> {
    let endpoint = api.endpoint(&["lists", "user", user_id]);
    api.fetch(api.client().get(&endpoint), &endpoint).await
}

pub async fn list_cards(api: &HttpBoardService, list_id: &str) -> Result<Vec<Card>, RemoteError> {
    let endpoint = api.endpoint(&["lists", list_id, "cards"]);
    api.fetch(api.client().get(&endpoint), &endpoint).await
}

pub async fn create_list(api: &HttpBoardService, name: &str, user_id: &str) -> Result<BoardList, RemoteError> {
    let endpoint = api.endpoint(&["lists"]);
    let request = api.client().post(&endpoint).json(&CreateListArgs { name, user_id });
    api.fetch(request, &endpoint).await
}

/// Server side also deletes the list's cards
pub async fn delete_list(api: &HttpBoardService, list_id: &str) -> Result<(), RemoteError> {
    let endpoint = api.endpoint(&["lists", list_id]);
    api.execute(api.client().delete(&endpoint), &endpoint).await
}
