//! Backend API seam
//!
//! Everything the store and the client facade need from the backend, one
//! method per endpoint. [`NetworkHttpClient`](crate::http::NetworkHttpClient)
//! is the real implementation; tests substitute their own.
//!
//! Returned records are raw: normalization happens in the callers.

use async_trait::async_trait;
use shared::client::{
    ChangePasswordRequest, ProfileUpdate, RegisterRequest, RegisteredUser, TokenResponse,
};
use shared::models::{
    Complaint, ComplaintId, ComplaintPatch, ComplaintUpdate, Department, Feedback,
    FeedbackCreate, Notification, Role, TimelineEntryCreate, User,
};

use crate::draft::ComplaintDraft;
use crate::error::ClientResult;

#[async_trait]
pub trait CivicApi: Send + Sync {
    /// `POST token/` - no credential required
    async fn obtain_token(&self, email: &str, password: &str) -> ClientResult<TokenResponse>;

    /// `POST register/` - no credential required
    async fn register(&self, request: &RegisterRequest) -> ClientResult<RegisteredUser>;

    /// Role-scoped complaint list
    async fn list_complaints(&self, role: Role) -> ClientResult<Vec<Complaint>>;

    /// `POST complaints/` as multipart
    async fn create_complaint(&self, draft: &ComplaintDraft) -> ClientResult<Complaint>;

    async fn get_complaint(&self, id: ComplaintId) -> ClientResult<Complaint>;

    /// `PATCH complaints/update/{id}/` - only the set fields change
    async fn update_complaint(&self, id: ComplaintId, patch: &ComplaintPatch) -> ClientResult<()>;

    async fn list_updates(&self, id: ComplaintId) -> ClientResult<Vec<ComplaintUpdate>>;

    async fn add_update(
        &self,
        id: ComplaintId,
        entry: &TimelineEntryCreate,
    ) -> ClientResult<ComplaintUpdate>;

    async fn submit_feedback(
        &self,
        id: ComplaintId,
        feedback: &FeedbackCreate,
    ) -> ClientResult<Feedback>;

    async fn list_departments(&self) -> ClientResult<Vec<Department>>;

    async fn list_notifications(&self) -> ClientResult<Vec<Notification>>;

    async fn mark_notifications_read(&self) -> ClientResult<()>;

    /// Returns the account as stored by the backend.
    async fn update_profile(&self, update: &ProfileUpdate) -> ClientResult<User>;

    async fn change_password(&self, request: &ChangePasswordRequest) -> ClientResult<()>;
}
