//! Aggregate counts over a complaint collection
//!
//! Everything here is recomputed from the slice it is given; nothing is cached.

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::models::{Complaint, ComplaintCategory, ComplaintStatus};

/// Dashboard counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplaintStats {
    pub total: usize,
    pub pending: usize,
    /// `in-progress` and `assigned` together
    pub in_progress: usize,
    pub resolved: usize,
}

impl ComplaintStats {
    pub fn from_complaints(complaints: &[Complaint]) -> Self {
        complaints
            .iter()
            .fold(Self::default(), |mut stats, complaint| {
                stats.total += 1;
                match complaint.status_kind() {
                    Some(ComplaintStatus::Pending) => stats.pending += 1,
                    Some(ComplaintStatus::InProgress | ComplaintStatus::Assigned) => {
                        stats.in_progress += 1
                    }
                    Some(ComplaintStatus::Resolved) => stats.resolved += 1,
                    None => {}
                }
                stats
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: ComplaintCategory,
    pub count: usize,
}

/// Count per category, all six categories in fixed order.
pub fn category_breakdown(complaints: &[Complaint]) -> Vec<CategoryCount> {
    ComplaintCategory::ALL
        .into_iter()
        .map(|category| CategoryCount {
            category,
            count: complaints
                .iter()
                .filter(|c| c.category_kind() == Some(category))
                .count(),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentCount {
    pub name: String,
    pub count: usize,
}

/// Count per `department_name`, "Unassigned" for none, in first-seen order.
pub fn department_breakdown(complaints: &[Complaint]) -> Vec<DepartmentCount> {
    let mut counts: Vec<DepartmentCount> = Vec::new();
    for complaint in complaints {
        let name = complaint.department_label();
        match counts.iter_mut().find(|d| d.name == name) {
            Some(entry) => entry.count += 1,
            None => counts.push(DepartmentCount {
                name: name.to_string(),
                count: 1,
            }),
        }
    }
    counts
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyCount {
    /// 1 = January
    pub month: u32,
    pub complaints: usize,
    pub resolved: usize,
}

/// Twelve monthly buckets for `year`, keyed on `created_at` (UTC).
pub fn monthly_breakdown(complaints: &[Complaint], year: i32) -> Vec<MonthlyCount> {
    let mut months: Vec<MonthlyCount> = (1..=12)
        .map(|month| MonthlyCount {
            month,
            complaints: 0,
            resolved: 0,
        })
        .collect();

    for complaint in complaints.iter().filter(|c| c.created_at.year() == year) {
        let bucket = &mut months[complaint.created_at.month0() as usize];
        bucket.complaints += 1;
        if complaint.is_resolved() {
            bucket.resolved += 1;
        }
    }
    months
}
