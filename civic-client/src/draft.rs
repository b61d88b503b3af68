//! Complaint submission payload

use shared::ValidationErrors;
use shared::models::{ComplaintCategory, ComplaintPriority};
use std::path::Path;

use crate::error::{ClientError, ClientResult};

/// Image file attached to a new complaint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAttachment {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl ImageAttachment {
    /// Attachment with a MIME type guessed from the file name.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let mime = mime_guess::from_path(&file_name)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        Self {
            file_name,
            mime,
            bytes,
        }
    }

    pub async fn from_path(path: impl AsRef<Path>) -> ClientResult<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());
        Ok(Self::new(file_name, bytes))
    }
}

/// New complaint as filled in by a citizen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplaintDraft {
    pub title: String,
    pub category: ComplaintCategory,
    pub description: String,
    pub location: String,
    pub priority: ComplaintPriority,
    pub images: Vec<ImageAttachment>,
}

const REQUIRED: &str = "This field is required.";

impl ComplaintDraft {
    pub fn new(
        title: impl Into<String>,
        category: ComplaintCategory,
        description: impl Into<String>,
        location: impl Into<String>,
        priority: ComplaintPriority,
    ) -> Self {
        Self {
            title: title.into(),
            category,
            description: description.into(),
            location: location.into(),
            priority,
            images: Vec::new(),
        }
    }

    pub fn with_image(mut self, image: ImageAttachment) -> Self {
        self.images.push(image);
        self
    }

    /// Reject blank required text fields before anything is sent.
    pub fn validate(&self) -> ClientResult<()> {
        let mut errors = ValidationErrors::default();
        for (field, value) in [
            ("title", &self.title),
            ("description", &self.description),
            ("location", &self.location),
        ] {
            if value.trim().is_empty() {
                errors.fields.insert(field.to_string(), vec![REQUIRED.to_string()]);
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ClientError::Validation(errors))
        }
    }
}
