//! Client facade
//!
//! [`CivicClient`] wires the session, the backend API and the complaint store
//! together and carries the direct mutations that sit outside the store:
//! assignment, status transitions, feedback and account self-service.

use shared::client::{
    ChangePasswordRequest, MIN_PASSWORD_LEN, ProfileUpdate, RegisterRequest, RegisteredUser,
};
use shared::models::{
    self, ComplaintId, ComplaintPatch, ComplaintStatus, ComplaintUpdate, Department, Feedback,
    FeedbackCreate, MAX_RATING, MIN_RATING, Notification, TimelineEntryCreate, User,
};
use shared::normalize::normalize_update;
use std::sync::Arc;

use crate::api::CivicApi;
use crate::http::NetworkHttpClient;
use crate::session::{Credential, CredentialStorage, SessionHolder};
use crate::store::ComplaintStore;
use crate::{ClientConfig, ClientError, ClientResult};

/// Registration fields in the order their errors are reported
const REGISTER_FIELDS: &[&str] = &["username", "password", "email"];

/// Entry point for front ends
#[derive(Debug, Clone)]
pub struct CivicClient {
    session: SessionHolder,
    store: ComplaintStore,
}

impl CivicClient {
    /// Client talking to the configured backend over HTTP.
    ///
    /// The credential file of the configured profile is restored, so a
    /// previous login survives restarts until its token expires.
    pub fn connect(config: &ClientConfig) -> ClientResult<Self> {
        let session = SessionHolder::with_storage(CredentialStorage::at(config.credential_path()));
        session.restore();
        let http = NetworkHttpClient::new(config, session.clone())?;
        tracing::debug!(base_url = http.base_url(), "Client ready");
        Ok(Self::with_api(Arc::new(http), session))
    }

    /// Client over any [`CivicApi`] implementation.
    pub fn with_api(api: Arc<dyn CivicApi>, session: SessionHolder) -> Self {
        let store = ComplaintStore::new(api, session.clone());
        Self { session, store }
    }

    pub fn session(&self) -> &SessionHolder {
        &self.session
    }

    pub fn store(&self) -> &ComplaintStore {
        &self.store
    }

    fn api(&self) -> &dyn CivicApi {
        self.store.api().as_ref()
    }

    fn require_session(&self) -> ClientResult<()> {
        if self.session.is_authenticated() {
            Ok(())
        } else {
            Err(ClientError::NotAuthenticated)
        }
    }

    /// Resynchronize the store after a complaint mutation. A failed refresh
    /// does not undo the mutation and is only logged.
    async fn refresh(&self) {
        if !self.session.is_authenticated() {
            return;
        }
        if let Err(e) = self.store.fetch_all().await {
            tracing::warn!(error = %e, "Refresh after mutation failed");
        }
    }

    // ========== Account ==========

    /// Exchange email and password for a session.
    ///
    /// Rejected credentials come back as a validation error carrying the
    /// backend's message.
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<User> {
        let token = match self.api().obtain_token(email.trim(), password).await {
            Ok(token) => token,
            Err(ClientError::Unauthorized(detail)) => {
                tracing::info!(email = email.trim(), "Login rejected");
                return Err(ClientError::validation(detail));
            }
            Err(e) => return Err(e),
        };
        let credential = Credential::from(token);
        let user = credential.user.clone();
        self.session.login(credential)?;
        Ok(user)
    }

    /// Clear the session and the cached complaints.
    pub fn logout(&self) -> ClientResult<()> {
        self.store.clear();
        self.session.logout()
    }

    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
        confirm: &str,
    ) -> ClientResult<RegisteredUser> {
        if password != confirm {
            return Err(ClientError::validation("Passwords do not match."));
        }
        let request = RegisterRequest {
            username: username.trim().to_string(),
            email: email.trim().to_string(),
            password: password.to_string(),
            password2: confirm.to_string(),
        };
        let registered = self
            .api()
            .register(&request)
            .await
            .map_err(|e| lead_with_field(e, REGISTER_FIELDS))?;
        tracing::info!(username = %registered.username, "Account registered");
        Ok(registered)
    }

    /// Save name and email. The account returned by the backend replaces the
    /// session's user.
    pub async fn update_profile(&self, name: &str, email: &str) -> ClientResult<User> {
        self.require_session()?;
        let update = ProfileUpdate {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
        };
        let mut saved = self.api().update_profile(&update).await?;

        let current = self.session.current_user().ok_or(ClientError::NotAuthenticated)?;
        if saved.avatar.is_none() {
            saved.avatar = current.avatar;
        }
        self.session.update_user(saved.clone())?;
        tracing::info!(username = saved.display_name(), "Profile updated");
        Ok(saved)
    }

    pub async fn change_password(&self, current: &str, new: &str, confirm: &str) -> ClientResult<()> {
        if new != confirm {
            return Err(ClientError::validation("New passwords don't match."));
        }
        if new.chars().count() < MIN_PASSWORD_LEN {
            return Err(ClientError::validation(format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters."
            )));
        }
        self.require_session()?;
        let request = ChangePasswordRequest {
            current_password: current.to_string(),
            new_password: new.to_string(),
        };
        self.api().change_password(&request).await?;
        tracing::info!("Password changed");
        Ok(())
    }

    // ========== Complaint mutations ==========

    /// Route a complaint to a department.
    pub async fn assign_department(
        &self,
        id: ComplaintId,
        department: i64,
    ) -> ClientResult<()> {
        self.require_session()?;
        self.api()
            .update_complaint(id, &ComplaintPatch::department(department))
            .await?;
        tracing::info!(id, department, "Complaint assigned");
        self.refresh().await;
        Ok(())
    }

    /// Move a complaint to `status`, then record `message` on its timeline.
    ///
    /// A blank message skips the timeline entry. If the entry cannot be saved
    /// the status change stands and [`ClientError::TimelineNotRecorded`] is
    /// returned.
    pub async fn transition_status(
        &self,
        id: ComplaintId,
        status: ComplaintStatus,
        message: &str,
    ) -> ClientResult<Option<ComplaintUpdate>> {
        self.require_session()?;
        self.api()
            .update_complaint(id, &ComplaintPatch::status(status))
            .await?;
        tracing::info!(id, status = %status, "Complaint status changed");

        let message = message.trim();
        let entry = if message.is_empty() {
            None
        } else {
            let entry = TimelineEntryCreate {
                message: message.to_string(),
                new_status: status,
            };
            match self.api().add_update(id, &entry).await {
                Ok(update) => Some(normalize_update(&update)),
                Err(e) => {
                    tracing::warn!(id, error = %e, "Timeline entry not recorded");
                    self.refresh().await;
                    return Err(ClientError::TimelineNotRecorded {
                        status,
                        source: Box::new(e),
                    });
                }
            }
        };

        self.refresh().await;
        Ok(entry)
    }

    /// Timeline of a complaint, oldest first.
    pub async fn timeline(&self, id: ComplaintId) -> ClientResult<Vec<ComplaintUpdate>> {
        self.require_session()?;
        let entries = self.api().list_updates(id).await?;
        Ok(models::timeline(entries.iter().map(normalize_update).collect()))
    }

    /// Rate a resolved complaint. Only one feedback per complaint is accepted.
    pub async fn submit_feedback(
        &self,
        id: ComplaintId,
        rating: u8,
        comment: &str,
    ) -> ClientResult<Feedback> {
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(ClientError::validation(format!(
                "Rating must be between {MIN_RATING} and {MAX_RATING}."
            )));
        }
        self.require_session()?;

        let complaint = self.api().get_complaint(id).await?.normalized();
        if complaint.feedback.is_some() {
            return Err(ClientError::validation(
                "Feedback has already been submitted for this complaint.",
            ));
        }
        if !complaint.is_resolved() {
            return Err(ClientError::validation(
                "Feedback can only be given once the complaint is resolved.",
            ));
        }

        let feedback = FeedbackCreate {
            rating,
            comment: comment.trim().to_string(),
        };
        let created = self.api().submit_feedback(id, &feedback).await?;
        tracing::info!(id, rating, "Feedback submitted");
        self.refresh().await;
        Ok(created)
    }

    // ========== Reference data ==========

    pub async fn departments(&self) -> ClientResult<Vec<Department>> {
        self.require_session()?;
        self.api().list_departments().await
    }

    pub async fn notifications(&self) -> ClientResult<Vec<Notification>> {
        self.require_session()?;
        self.api().list_notifications().await
    }

    pub async fn unread_notifications(&self) -> ClientResult<usize> {
        let notifications = self.notifications().await?;
        Ok(models::unread_count(&notifications))
    }

    pub async fn mark_notifications_read(&self) -> ClientResult<()> {
        self.require_session()?;
        self.api().mark_notifications_read().await
    }
}

/// Put the first error of `fields` in front of a backend validation failure.
/// A `detail` or non-field message keeps precedence.
fn lead_with_field(error: ClientError, fields: &[&str]) -> ClientError {
    match error {
        ClientError::Validation(mut errors)
            if errors.detail.is_none() && errors.non_field.is_empty() =>
        {
            if let Some(message) = errors.first_for(fields).map(str::to_string) {
                errors.non_field.push(message);
            }
            ClientError::Validation(errors)
        }
        other => other,
    }
}
