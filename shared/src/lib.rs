//! Shared types for the civic complaint client
//!
//! Backend payload types plus the pure logic every consumer shares:
//! normalization, filtering and aggregate counts.

pub mod client;
pub mod error;
pub mod filter;
pub mod models;
pub mod normalize;
pub mod stats;

// Re-exports
pub use error::{UnknownValue, ValidationErrors};
pub use filter::{ComplaintQuery, Selector, filter_complaints};
pub use models::{
    Complaint, ComplaintCategory, ComplaintId, ComplaintPriority, ComplaintStatus,
    ComplaintUpdate, Department, Feedback, Notification, Role, User,
};
pub use normalize::{normalize_complaint, normalize_token};
pub use stats::ComplaintStats;
