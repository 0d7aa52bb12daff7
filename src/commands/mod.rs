//! Board Service Bindings
//!
//! The remote CRUD contract the sync layer depends on, and its HTTP client.

mod cards;
mod files;
mod http;
mod lists;

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::RemoteError;
use crate::models::{BoardList, Card, FileUpload};

pub use files::read_file;
pub use http::HttpBoardService;

/// Every payload from the service arrives as `{ "data": ... }`
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub data: T,
}

/// Remote board service. Futures are `!Send`: everything runs on the
/// browser's single thread.
#[async_trait(?Send)]
pub trait BoardService {
    async fn fetch_lists(&self, user_id: &str) -> Result<Vec<BoardList>, RemoteError>;
    async fn fetch_cards(&self, list_id: &str) -> Result<Vec<Card>, RemoteError>;
    async fn create_list(&self, name: &str, user_id: &str) -> Result<BoardList, RemoteError>;
    async fn delete_list(&self, list_id: &str) -> Result<(), RemoteError>;
    async fn create_card(&self, title: &str, list_id: &str) -> Result<Card, RemoteError>;
    async fn fetch_card(&self, card_id: &str) -> Result<Card, RemoteError>;
    async fn rename_card(&self, card_id: &str, title: &str) -> Result<Card, RemoteError>;
    async fn delete_card(&self, card_id: &str) -> Result<(), RemoteError>;
    /// Returns the card with its updated attachment list
    async fn upload_files(&self, card_id: &str, files: &[FileUpload]) -> Result<Card, RemoteError>;
}
