//! Complaint timeline entries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::null_as_default;
use super::vocabulary::ComplaintStatus;

/// One entry of a complaint's timeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplaintUpdate {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    pub new_status: Option<String>,
    /// Actor username, null for system-generated entries
    pub user_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ComplaintUpdate {
    pub fn actor(&self) -> &str {
        self.user_name.as_deref().unwrap_or("System")
    }

    pub fn status_kind(&self) -> Option<ComplaintStatus> {
        self.new_status.as_deref().and_then(ComplaintStatus::parse)
    }
}

/// Order entries oldest-first. The backend lists newest-first; the sort is
/// stable so entries sharing a timestamp keep their id order.
pub fn timeline(mut entries: Vec<ComplaintUpdate>) -> Vec<ComplaintUpdate> {
    entries.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
    entries
}

/// Timeline append payload (`POST complaints/{id}/updates/`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntryCreate {
    pub message: String,
    pub new_status: ComplaintStatus,
}
