//! HTTP Board Service
//!
//! `reqwest` client for the board REST API.

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;

use super::{cards, lists, BoardService, Envelope};
use crate::error::RemoteError;
use crate::models::{BoardList, Card, FileUpload};

/// Characters left as-is inside a path segment
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.').remove(b'~');

#[derive(Debug, Clone)]
pub struct HttpBoardService {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBoardService {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(super) fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// Join path segments onto the base URL, encoding each one
    pub(super) fn endpoint(&self, segments: &[&str]) -> String {
        let mut url = self.base_url.clone();
        for segment in segments {
            url.push('/');
            url.extend(utf8_percent_encode(segment, PATH_SEGMENT));
        }
        url
    }

    /// Send and unwrap the `data` envelope
    pub(super) async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder, endpoint: &str) -> Result<T, RemoteError> {
        let response = self.send(request, endpoint).await?;
        let envelope: Envelope<T> = response.json().await.map_err(|e| RemoteError::Decode {
            endpoint: endpoint.to_string(),
            message: e.to_string(),
        })?;
        Ok(envelope.data)
    }

    /// Send and only check the status
    pub(super) async fn execute(&self, request: RequestBuilder, endpoint: &str) -> Result<(), RemoteError> {
        self.send(request, endpoint).await.map(|_| ())
    }

    async fn send(&self, request: RequestBuilder, endpoint: &str) -> Result<reqwest::Response, RemoteError> {
        let response = request.send().await.map_err(|e| {
            log::warn!("[API] {} unreachable: {}", endpoint, e);
            RemoteError::Http { endpoint: endpoint.to_string(), message: e.to_string() }
        })?;
        let status = response.status();
        if !status.is_success() {
            log::warn!("[API] {} -> {}", endpoint, status);
            return Err(RemoteError::Status { endpoint: endpoint.to_string(), status: status.as_u16() });
        }
        log::debug!("[API] {} -> {}", endpoint, status);
        Ok(response)
    }
}

#[async_trait(?Send)]
impl BoardService for HttpBoardService {
    async fn fetch_lists(&self, user_id: &str) -> Result<Vec<BoardList>, RemoteError> {
        lists::list_lists_by_user(self, user_id).await
    }

    async fn fetch_cards(&self, list_id: &str) -> Result<Vec<Card>, RemoteError> {
        lists::list_cards(self, list_id).await
    }

    async fn create_list(&self, name: &str, user_id: &str) -> Result<BoardList, RemoteError> {
        lists::create_list(self, name, user_id).await
    }

    async fn delete_list(&self, list_id: &str) -> Result<(), RemoteError> {
        lists::delete_list(self, list_id).await
    }

    async fn create_card(&self, title: &str, list_id: &str) -> Result<Card, RemoteError> {
        cards::create_card(self, title, list_id).await
    }

    async fn fetch_card(&self, card_id: &str) -> Result<Card, RemoteError> {
        cards::get_card(self, card_id).await
    }

    async fn rename_card(&self, card_id: &str, title: &str) -> Result<Card, RemoteError> {
        cards::update_card_title(self, card_id, title).await
    }

    async fn delete_card(&self, card_id: &str) -> Result<(), RemoteError> {
        cards::delete_card(self, card_id).await
    }

    async fn upload_files(&self, card_id: &str, files: &[FileUpload]) -> Result<Card, RemoteError> {
        cards::upload_card_files(self, card_id, files).await
    }
}
