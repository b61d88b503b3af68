// civic-client/tests/common/mod.rs
// In-memory CivicApi used by the store and facade tests

#![allow(dead_code)]

use async_trait::async_trait;
use civic_client::{
    CivicApi, ClientError, ClientResult, ComplaintDraft, Credential, SessionHolder,
};
use serde_json::json;
use shared::ValidationErrors;
use shared::client::{
    ChangePasswordRequest, ProfileUpdate, RegisterRequest, RegisteredUser, TokenResponse,
};
use shared::models::{
    Complaint, ComplaintId, ComplaintPatch, ComplaintUpdate, Department, Feedback,
    FeedbackCreate, Notification, Role, TimelineEntryCreate, User,
};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::oneshot;

/// Scripted answer for one `list_complaints` call
pub enum ListResponse {
    Ready(Vec<Complaint>),
    /// Held until the test sends the payload
    Gate(oneshot::Receiver<Vec<Complaint>>),
    Fail(String),
}

#[derive(Default)]
pub struct FakeApi {
    /// Backing records; also the fallback list answer
    pub complaints: Mutex<Vec<Complaint>>,
    pub list_responses: Mutex<VecDeque<ListResponse>>,
    pub list_calls: AtomicUsize,
    pub listed_roles: Mutex<Vec<Role>>,
    /// JSON error body returned by the next create
    pub create_error: Mutex<Option<String>>,
    pub created: Mutex<Vec<ComplaintDraft>>,
    pub patches: Mutex<Vec<(ComplaintId, ComplaintPatch)>>,
    pub updates: Mutex<Vec<ComplaintUpdate>>,
    pub fail_add_update: AtomicBool,
    pub feedback: Mutex<Vec<(ComplaintId, FeedbackCreate)>>,
    pub notifications: Mutex<Vec<Notification>>,
    pub marked_read: AtomicBool,
    pub profile_updates: Mutex<Vec<ProfileUpdate>>,
    pub password_changes: Mutex<Vec<ChangePasswordRequest>>,
    pub registrations: Mutex<Vec<RegisterRequest>>,
}

impl FakeApi {
    pub fn with_complaints(complaints: Vec<Complaint>) -> Self {
        Self {
            complaints: Mutex::new(complaints),
            ..Default::default()
        }
    }

    pub fn push_list(&self, response: ListResponse) {
        self.list_responses.lock().unwrap().push_back(response);
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CivicApi for FakeApi {
    async fn obtain_token(&self, email: &str, password: &str) -> ClientResult<TokenResponse> {
        if password != "secret-pass" {
            return Err(ClientError::Unauthorized(
                "No active account found with the given credentials".into(),
            ));
        }
        let mut user = user(Role::Admin);
        user.email = Some(email.to_string());
        Ok(TokenResponse {
            access: "opaque-access".into(),
            refresh: Some("opaque-refresh".into()),
            user,
        })
    }

    async fn register(&self, request: &RegisterRequest) -> ClientResult<RegisteredUser> {
        self.registrations.lock().unwrap().push(request.clone());
        Ok(RegisteredUser {
            username: request.username.clone(),
            email: request.email.clone(),
        })
    }

    async fn list_complaints(&self, role: Role) -> ClientResult<Vec<Complaint>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.listed_roles.lock().unwrap().push(role);
        let next = self.list_responses.lock().unwrap().pop_front();
        match next {
            Some(ListResponse::Ready(list)) => Ok(list),
            Some(ListResponse::Gate(rx)) => rx
                .await
                .map_err(|_| ClientError::Internal("gate dropped".into())),
            Some(ListResponse::Fail(message)) => Err(ClientError::Internal(message)),
            None => Ok(self.complaints.lock().unwrap().clone()),
        }
    }

    async fn create_complaint(&self, draft: &ComplaintDraft) -> ClientResult<Complaint> {
        if let Some(body) = self.create_error.lock().unwrap().take() {
            return Err(ClientError::Validation(ValidationErrors::from_body(&body)));
        }
        self.created.lock().unwrap().push(draft.clone());
        let mut complaints = self.complaints.lock().unwrap();
        let id = complaints.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        let created = raw_complaint(id, &draft.title, Some("Pending"), Some(draft.category.as_str()));
        complaints.push(created.clone());
        Ok(created)
    }

    async fn get_complaint(&self, id: ComplaintId) -> ClientResult<Complaint> {
        self.complaints
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| ClientError::NotFound("Not found.".into()))
    }

    async fn update_complaint(&self, id: ComplaintId, patch: &ComplaintPatch) -> ClientResult<()> {
        let mut complaints = self.complaints.lock().unwrap();
        let complaint = complaints
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| ClientError::NotFound("Not found.".into()))?;
        if let Some(status) = patch.status {
            complaint.status = Some(status.label().to_string());
        }
        if let Some(department) = patch.department {
            complaint.department = Some(department);
            complaint.status = Some("assigned".into());
        }
        self.patches.lock().unwrap().push((id, patch.clone()));
        Ok(())
    }

    async fn list_updates(&self, _id: ComplaintId) -> ClientResult<Vec<ComplaintUpdate>> {
        Ok(self.updates.lock().unwrap().clone())
    }

    async fn add_update(
        &self,
        _id: ComplaintId,
        entry: &TimelineEntryCreate,
    ) -> ClientResult<ComplaintUpdate> {
        if self.fail_add_update.load(Ordering::SeqCst) {
            return Err(ClientError::Validation(ValidationErrors::field(
                "message",
                "Ensure this field has no more than 500 characters.",
            )));
        }
        let mut updates = self.updates.lock().unwrap();
        let update: ComplaintUpdate = serde_json::from_value(json!({
            "id": updates.len() as i64 + 1,
            "message": entry.message,
            "new_status": entry.new_status.label(),
            "user_name": "roads-dept",
            "created_at": "2024-03-02T09:00:00Z",
        }))
        .unwrap();
        updates.push(update.clone());
        Ok(update)
    }

    async fn submit_feedback(
        &self,
        id: ComplaintId,
        feedback: &FeedbackCreate,
    ) -> ClientResult<Feedback> {
        self.feedback.lock().unwrap().push((id, feedback.clone()));
        Ok(Feedback {
            id: Some(1),
            rating: feedback.rating,
            comment: Some(feedback.comment.clone()),
            created_at: None,
        })
    }

    async fn list_departments(&self) -> ClientResult<Vec<Department>> {
        Ok(vec![Department {
            id: 7,
            email: "roads@city.gov".into(),
            username: Some("roads-dept".into()),
        }])
    }

    async fn list_notifications(&self) -> ClientResult<Vec<Notification>> {
        Ok(self.notifications.lock().unwrap().clone())
    }

    async fn mark_notifications_read(&self) -> ClientResult<()> {
        self.marked_read.store(true, Ordering::SeqCst);
        for n in self.notifications.lock().unwrap().iter_mut() {
            n.read = true;
        }
        Ok(())
    }

    /// Replies like the backend: the name lands in `username`, no `name` or avatar.
    async fn update_profile(&self, update: &ProfileUpdate) -> ClientResult<User> {
        self.profile_updates.lock().unwrap().push(update.clone());
        Ok(User {
            username: Some(update.name.clone()),
            email: Some(update.email.clone()),
            ..user(Role::Citizen)
        })
    }

    async fn change_password(&self, request: &ChangePasswordRequest) -> ClientResult<()> {
        if request.current_password != "secret-pass" {
            return Err(ClientError::Validation(ValidationErrors::field(
                "currentPassword",
                "Current password is incorrect.",
            )));
        }
        self.password_changes.lock().unwrap().push(request.clone());
        Ok(())
    }
}

/// Complaint as the backend might send it, casing and all.
pub fn raw_complaint(
    id: ComplaintId,
    title: &str,
    status: Option<&str>,
    category: Option<&str>,
) -> Complaint {
    serde_json::from_value(json!({
        "id": id,
        "title": title,
        "description": format!("{title} reported by a resident"),
        "location": "Ward 7",
        "category": category,
        "priority": "High",
        "status": status,
        "department": null,
        "department_name": null,
        "citizen_name": "Asha",
        "images": [],
        "feedback": null,
        "created_at": "2024-03-01T10:00:00Z",
    }))
    .unwrap()
}

pub fn user(role: Role) -> User {
    User {
        id: 1,
        username: Some("asha".into()),
        name: None,
        email: Some("asha@example.com".into()),
        role,
        avatar: None,
    }
}

pub fn logged_in(role: Role) -> SessionHolder {
    let session = SessionHolder::in_memory();
    session
        .login(Credential::new("opaque-access".into(), None, user(role)))
        .unwrap();
    session
}

/// Yield until the fake has seen `n` list calls.
pub async fn wait_for_list_calls(api: &FakeApi, n: usize) {
    while api.list_calls() < n {
        tokio::task::yield_now().await;
    }
}
