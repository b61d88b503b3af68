//! Complaint Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::null_as_default;
use super::vocabulary::{ComplaintCategory, ComplaintPriority, ComplaintStatus};

pub type ComplaintId = i64;

/// Complaint record as returned by the backend
///
/// `status`, `priority` and `category` hold whatever string the backend sent
/// until [`Complaint::normalized`] is applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Complaint {
    pub id: ComplaintId,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub location: String,
    pub category: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
    /// Assigned department user id
    pub department: Option<i64>,
    /// Denormalized department label
    pub department_name: Option<String>,
    pub citizen_name: Option<String>,
    pub citizen_email: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub images: Vec<ComplaintImage>,
    pub feedback: Option<Feedback>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Complaint {
    pub fn status_kind(&self) -> Option<ComplaintStatus> {
        self.status.as_deref().and_then(ComplaintStatus::parse)
    }

    pub fn priority_kind(&self) -> Option<ComplaintPriority> {
        self.priority.as_deref().and_then(ComplaintPriority::parse)
    }

    pub fn category_kind(&self) -> Option<ComplaintCategory> {
        self.category.as_deref().and_then(ComplaintCategory::parse)
    }

    pub fn is_resolved(&self) -> bool {
        self.status_kind() == Some(ComplaintStatus::Resolved)
    }

    pub fn is_assigned(&self) -> bool {
        self.department.is_some()
    }

    /// Feedback is accepted once, and only after resolution.
    pub fn can_submit_feedback(&self) -> bool {
        self.is_resolved() && self.feedback.is_none()
    }

    /// Department label for display, "Unassigned" when no department is set.
    pub fn department_label(&self) -> &str {
        self.department_name.as_deref().unwrap_or("Unassigned")
    }
}

/// Image attached to a complaint at creation
///
/// Older backend versions list images as bare ids; those decode with no uri.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ImageWire")]
pub struct ComplaintImage {
    pub id: i64,
    pub uri: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ImageWire {
    Id(i64),
    Full {
        id: i64,
        #[serde(alias = "image")]
        uri: Option<String>,
    },
}

impl From<ImageWire> for ComplaintImage {
    fn from(wire: ImageWire) -> Self {
        match wire {
            ImageWire::Id(id) => ComplaintImage { id, uri: None },
            ImageWire::Full { id, uri } => ComplaintImage { id, uri },
        }
    }
}

/// Citizen feedback on a resolved complaint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub id: Option<i64>,
    /// 1 to 5 stars
    pub rating: u8,
    pub comment: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

/// Partial update payload (`PATCH complaints/update/{id}/`)
///
/// Only the fields that are set are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplaintPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ComplaintStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<ComplaintPriority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<i64>,
}

impl ComplaintPatch {
    pub fn status(status: ComplaintStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    pub fn department(department: i64) -> Self {
        Self {
            department: Some(department),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.priority.is_none() && self.department.is_none()
    }
}

/// Feedback creation payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackCreate {
    pub rating: u8,
    pub comment: String,
}
