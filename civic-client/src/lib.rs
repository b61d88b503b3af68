//! Civic Client - client core for the complaint management backend
//!
//! Session handling, the cached complaint store and the backend API over HTTP.

pub mod api;
pub mod client;
pub mod config;
pub mod draft;
pub mod error;
pub mod http;
pub mod session;
pub mod store;

pub use api::CivicApi;
pub use client::CivicClient;
pub use config::ClientConfig;
pub use draft::{ComplaintDraft, ImageAttachment};
pub use error::{ClientError, ClientResult, ErrorKind};
pub use http::NetworkHttpClient;
pub use session::{Credential, CredentialStorage, SessionHolder};
pub use store::{ComplaintStore, StoreSnapshot};

// Re-export shared types for convenience
pub use shared::client::{RegisteredUser, TokenResponse};
pub use shared::models::{
    Complaint, ComplaintCategory, ComplaintId, ComplaintPriority, ComplaintStatus,
    ComplaintUpdate, Department, Feedback, Notification, Role, User,
};
pub use shared::{ComplaintQuery, ComplaintStats, Selector};
