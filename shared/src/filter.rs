//! Complaint search and filtering
//!
//! Pure functions over a slice of complaints. Status and category are compared
//! through [`normalize_token`], so an un-normalized record still filters the
//! same way as its normalized copy.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::UnknownValue;
use crate::models::{Complaint, ComplaintCategory, ComplaintStatus};
use crate::normalize::normalize_token;

/// "all" or one specific vocabulary value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Selector<T> {
    All,
    Only(T),
}

impl<T> Default for Selector<T> {
    fn default() -> Self {
        Selector::All
    }
}

impl<T: Copy> Selector<T> {
    pub fn value(&self) -> Option<T> {
        match self {
            Selector::All => None,
            Selector::Only(v) => Some(*v),
        }
    }
}

impl<T: FromStr<Err = UnknownValue>> FromStr for Selector<T> {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if normalize_token(s) == "all" {
            return Ok(Selector::All);
        }
        s.parse().map(Selector::Only)
    }
}

/// Search box text plus the two dropdown filters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplaintQuery {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub status: Selector<ComplaintStatus>,
    #[serde(default)]
    pub category: Selector<ComplaintCategory>,
}

impl ComplaintQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_status(mut self, status: ComplaintStatus) -> Self {
        self.status = Selector::Only(status);
        self
    }

    pub fn with_category(mut self, category: ComplaintCategory) -> Self {
        self.category = Selector::Only(category);
        self
    }

    pub fn matches(&self, complaint: &Complaint) -> bool {
        self.matches_text(complaint)
            && field_matches(complaint.status.as_deref(), self.status.value().map(|s| s.as_str()))
            && field_matches(
                complaint.category.as_deref(),
                self.category.value().map(|c| c.as_str()),
            )
    }

    fn matches_text(&self, complaint: &Complaint) -> bool {
        if self.text.is_empty() {
            return true;
        }
        let needle = self.text.to_lowercase();
        complaint.title.to_lowercase().contains(&needle)
            || complaint.description.to_lowercase().contains(&needle)
    }
}

fn field_matches(raw: Option<&str>, wanted: Option<&str>) -> bool {
    match wanted {
        None => true,
        Some(wanted) => raw.is_some_and(|raw| normalize_token(raw) == wanted),
    }
}

/// Complaints matching `query`, in their original order.
pub fn filter_complaints(complaints: &[Complaint], query: &ComplaintQuery) -> Vec<Complaint> {
    complaints
        .iter()
        .filter(|c| query.matches(c))
        .cloned()
        .collect()
}

/// Complaints not yet assigned to any department.
pub fn unassigned(complaints: &[Complaint]) -> Vec<Complaint> {
    complaints
        .iter()
        .filter(|c| !c.is_assigned())
        .cloned()
        .collect()
}
