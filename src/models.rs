//! Frontend Models
//!
//! Data structures matching the board service payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type ListId = String;
pub type CardId = String;

/// A named column of cards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardList {
    #[serde(alias = "_id")]
    pub id: ListId,
    pub name: String,
    #[serde(alias = "userId", default)]
    pub owner_id: String,
}

/// A study item. List membership is positional and not stored here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    #[serde(alias = "_id")]
    pub id: CardId,
    pub title: String,
    #[serde(alias = "userId", default)]
    pub owner_id: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(alias = "pdfs", default)]
    pub attachments: Vec<Attachment>,
}

impl Card {
    /// The PDF rendered in the detail view
    pub fn first_pdf(&self) -> Option<&Attachment> {
        self.attachments.iter().find(|a| a.kind == AttachmentKind::Pdf)
    }

    pub fn images(&self) -> impl Iterator<Item = &Attachment> {
        self.attachments.iter().filter(|a| a.kind == AttachmentKind::Image)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentKind {
    Image,
    Pdf,
}

impl AttachmentKind {
    /// Guess from the file extension; anything that is not a PDF is an image
    pub fn from_filename(filename: &str) -> Self {
        let is_pdf = filename
            .rsplit_once('.')
            .map_or(false, |(_, ext)| ext.eq_ignore_ascii_case("pdf"));
        if is_pdf { AttachmentKind::Pdf } else { AttachmentKind::Image }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "AttachmentPayload")]
pub struct Attachment {
    pub url: String,
    pub filename: String,
    pub kind: AttachmentKind,
}

/// Attachment as sent by the service, where `kind` may be missing
#[derive(Deserialize)]
struct AttachmentPayload {
    url: String,
    #[serde(default)]
    filename: String,
    #[serde(default)]
    kind: Option<AttachmentKind>,
}

impl From<AttachmentPayload> for Attachment {
    fn from(raw: AttachmentPayload) -> Self {
        let filename = if raw.filename.is_empty() {
            raw.url.rsplit('/').next().unwrap_or_default().to_string()
        } else {
            raw.filename
        };
        let kind = raw.kind.unwrap_or_else(|| AttachmentKind::from_filename(&filename));
        Attachment { url: raw.url, filename, kind }
    }
}

/// A file picked by the user, read into memory for upload
#[derive(Debug, Clone, PartialEq)]
pub struct FileUpload {
    pub filename: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_accepts_service_field_names() {
        let card: Card = serde_json::from_str(
            r#"{
                "id": "c1",
                "title": "Math",
                "userId": "u1",
                "createdAt": "2025-03-01T12:00:00Z",
                "pdfs": [{ "url": "/uploads/notes.pdf", "filename": "notes.pdf" }]
            }"#,
        )
        .unwrap();

        assert_eq!(card.owner_id, "u1");
        assert!(card.created_at.is_some());
        assert_eq!(card.attachments.len(), 1);
        assert_eq!(card.attachments[0].kind, AttachmentKind::Pdf);
    }

    #[test]
    fn test_list_accepts_mongo_id() {
        let list: BoardList = serde_json::from_str(r#"{"_id": "l1", "name": "Bio", "userId": "u1"}"#).unwrap();
        assert_eq!(list.id, "l1");
        assert_eq!(list.owner_id, "u1");
    }

    #[test]
    fn test_created_card_without_optional_fields() {
        let card: Card = serde_json::from_str(r#"{"id": "c9", "title": "History"}"#).unwrap();
        assert!(card.attachments.is_empty());
        assert!(card.created_at.is_none());
    }

    #[test]
    fn test_attachment_kind_inference() {
        assert_eq!(AttachmentKind::from_filename("Slides.PDF"), AttachmentKind::Pdf);
        assert_eq!(AttachmentKind::from_filename("photo.png"), AttachmentKind::Image);
        assert_eq!(AttachmentKind::from_filename("noext"), AttachmentKind::Image);

        let explicit: Attachment =
            serde_json::from_str(r#"{"url": "/f/scan", "filename": "scan", "kind": "pdf"}"#).unwrap();
        assert_eq!(explicit.kind, AttachmentKind::Pdf);

        let unnamed: Attachment = serde_json::from_str(r#"{"url": "/uploads/a/b.pdf"}"#).unwrap();
        assert_eq!(unnamed.filename, "b.pdf");
        assert_eq!(unnamed.kind, AttachmentKind::Pdf);
    }

    #[test]
    fn test_first_pdf_skips_images() {
        let card = Card {
            id: "c1".into(),
            title: "Math".into(),
            owner_id: "u1".into(),
            created_at: None,
            attachments: vec![
                Attachment { url: "/a.png".into(), filename: "a.png".into(), kind: AttachmentKind::Image },
                Attachment { url: "/b.pdf".into(), filename: "b.pdf".into(), kind: AttachmentKind::Pdf },
                Attachment { url: "/c.pdf".into(), filename: "c.pdf".into(), kind: AttachmentKind::Pdf },
            ],
        };
        assert_eq!(card.first_pdf().map(|a| a.filename.as_str()), Some("b.pdf"));
        assert_eq!(card.images().count(), 1);
    }
}
