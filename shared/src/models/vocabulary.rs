//! Closed complaint vocabularies
//!
//! Status, priority and category values as the backend defines them. Parsing
//! goes through [`normalize_token`] so "In Progress", "in_progress" and
//! "in-progress" all land on the same variant.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::UnknownValue;
use crate::normalize::normalize_token;

/// Complaint lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComplaintStatus {
    Pending,
    Assigned,
    InProgress,
    Resolved,
}

impl ComplaintStatus {
    pub const ALL: [ComplaintStatus; 4] = [
        ComplaintStatus::Pending,
        ComplaintStatus::Assigned,
        ComplaintStatus::InProgress,
        ComplaintStatus::Resolved,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ComplaintStatus::Pending => "pending",
            ComplaintStatus::Assigned => "assigned",
            ComplaintStatus::InProgress => "in-progress",
            ComplaintStatus::Resolved => "resolved",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ComplaintStatus::Pending => "Pending",
            ComplaintStatus::Assigned => "Assigned",
            ComplaintStatus::InProgress => "In Progress",
            ComplaintStatus::Resolved => "Resolved",
        }
    }

    /// Parse any casing/spacing of a status; `None` for values outside the vocabulary.
    pub fn parse(raw: &str) -> Option<Self> {
        let token = normalize_token(raw);
        Self::ALL.into_iter().find(|s| s.as_str() == token)
    }
}

impl fmt::Display for ComplaintStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComplaintStatus {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| UnknownValue::new("status", s))
    }
}

/// Complaint priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComplaintPriority {
    High,
    Medium,
    Low,
}

impl ComplaintPriority {
    pub const ALL: [ComplaintPriority; 3] = [
        ComplaintPriority::High,
        ComplaintPriority::Medium,
        ComplaintPriority::Low,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ComplaintPriority::High => "high",
            ComplaintPriority::Medium => "medium",
            ComplaintPriority::Low => "low",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ComplaintPriority::High => "High",
            ComplaintPriority::Medium => "Medium",
            ComplaintPriority::Low => "Low",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let token = normalize_token(raw);
        Self::ALL.into_iter().find(|p| p.as_str() == token)
    }
}

impl fmt::Display for ComplaintPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComplaintPriority {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| UnknownValue::new("priority", s))
    }
}

/// Complaint category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComplaintCategory {
    RoadDamage,
    WaterSupply,
    Streetlight,
    Garbage,
    Drainage,
    Other,
}

impl ComplaintCategory {
    pub const ALL: [ComplaintCategory; 6] = [
        ComplaintCategory::RoadDamage,
        ComplaintCategory::WaterSupply,
        ComplaintCategory::Streetlight,
        ComplaintCategory::Garbage,
        ComplaintCategory::Drainage,
        ComplaintCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ComplaintCategory::RoadDamage => "road-damage",
            ComplaintCategory::WaterSupply => "water-supply",
            ComplaintCategory::Streetlight => "streetlight",
            ComplaintCategory::Garbage => "garbage",
            ComplaintCategory::Drainage => "drainage",
            ComplaintCategory::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ComplaintCategory::RoadDamage => "Road Damage",
            ComplaintCategory::WaterSupply => "Water Supply",
            ComplaintCategory::Streetlight => "Street Light",
            ComplaintCategory::Garbage => "Garbage",
            ComplaintCategory::Drainage => "Drainage",
            ComplaintCategory::Other => "Other",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let token = normalize_token(raw);
        if token == "street-light" {
            return Some(ComplaintCategory::Streetlight);
        }
        Self::ALL.into_iter().find(|c| c.as_str() == token)
    }
}

impl fmt::Display for ComplaintCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComplaintCategory {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| UnknownValue::new("category", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parses_backend_variants() {
        assert_eq!(ComplaintStatus::parse("In Progress"), Some(ComplaintStatus::InProgress));
        assert_eq!(ComplaintStatus::parse("in_progress"), Some(ComplaintStatus::InProgress));
        assert_eq!(ComplaintStatus::parse("RESOLVED"), Some(ComplaintStatus::Resolved));
        assert_eq!(ComplaintStatus::parse("closed"), None);
    }

    #[test]
    fn category_parses_labels() {
        for category in ComplaintCategory::ALL {
            assert_eq!(ComplaintCategory::parse(category.label()), Some(category));
        }
        assert_eq!(
            "Water Supply".parse::<ComplaintCategory>().ok(),
            Some(ComplaintCategory::WaterSupply)
        );
        assert_eq!(
            ComplaintCategory::parse("street_light"),
            Some(ComplaintCategory::Streetlight)
        );
        assert_eq!(
            ComplaintCategory::parse("Streetlight"),
            Some(ComplaintCategory::Streetlight)
        );
    }

    #[test]
    fn serde_uses_canonical_strings() {
        let json = serde_json::to_string(&ComplaintStatus::InProgress).unwrap();
        assert_eq!(json, "\"in-progress\"");
        let json = serde_json::to_string(&ComplaintCategory::RoadDamage).unwrap();
        assert_eq!(json, "\"road-damage\"");
    }

    #[test]
    fn unknown_value_reports_field() {
        let err = "urgent".parse::<ComplaintPriority>().unwrap_err();
        assert_eq!(err.to_string(), "unknown priority: urgent");
    }
}
