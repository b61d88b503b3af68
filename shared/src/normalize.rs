//! Complaint normalization
//!
//! The backend is loose about casing and separators ("In Progress",
//! "in_progress", "Road Damage"). Every record is passed through here on
//! ingress so that comparisons only ever see the canonical lowercase,
//! hyphenated form.

use crate::models::{Complaint, ComplaintUpdate};

/// Canonical form of a vocabulary string.
///
/// Trims, lower-cases, and turns each run of whitespace or underscores into a
/// single hyphen. Applying it twice gives the same result as applying it once.
pub fn normalize_token(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_separator = false;

    for ch in raw.trim().chars() {
        if ch.is_whitespace() || ch == '_' || ch == '-' {
            pending_separator = true;
            continue;
        }
        if pending_separator && !out.is_empty() {
            out.push('-');
        }
        pending_separator = false;
        out.extend(ch.to_lowercase());
    }
    out
}

fn normalize_field(value: &Option<String>) -> Option<String> {
    value.as_deref().map(normalize_token)
}

/// Normalized copy of a complaint; the input is left untouched.
///
/// Only `status`, `priority` and `category` change. Absent values stay absent.
pub fn normalize_complaint(complaint: &Complaint) -> Complaint {
    Complaint {
        status: normalize_field(&complaint.status),
        priority: normalize_field(&complaint.priority),
        category: normalize_field(&complaint.category),
        ..complaint.clone()
    }
}

/// Normalized copy of a timeline entry (`new_status` only).
pub fn normalize_update(update: &ComplaintUpdate) -> ComplaintUpdate {
    ComplaintUpdate {
        new_status: normalize_field(&update.new_status),
        ..update.clone()
    }
}

impl Complaint {
    pub fn normalized(&self) -> Complaint {
        normalize_complaint(self)
    }
}
