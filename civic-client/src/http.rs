//! HTTP client for network-based API calls

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::ValidationErrors;
use shared::client::{
    ChangePasswordRequest, ProfileUpdate, RegisterRequest, RegisteredUser, TokenRequest,
    TokenResponse,
};
use shared::models::{
    Complaint, ComplaintId, ComplaintPatch, ComplaintUpdate, Department, Feedback,
    FeedbackCreate, Notification, Role, TimelineEntryCreate, User,
};

use crate::api::CivicApi;
use crate::draft::ComplaintDraft;
use crate::session::SessionHolder;
use crate::{ClientConfig, ClientError, ClientResult};

/// HTTP client for the complaint backend
///
/// The bearer token is read from the [`SessionHolder`] for every request.
/// Without one, authenticated calls fail with [`ClientError::NotAuthenticated`]
/// before anything is sent.
#[derive(Debug, Clone)]
pub struct NetworkHttpClient {
    client: Client,
    base_url: String,
    session: SessionHolder,
}

impl NetworkHttpClient {
    pub fn new(config: &ClientConfig, session: SessionHolder) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Attach the bearer credential, or short-circuit when there is none.
    fn authorized(&self, request: RequestBuilder) -> ClientResult<RequestBuilder> {
        let token = self.session.access_token().ok_or(ClientError::NotAuthenticated)?;
        Ok(request.bearer_auth(token))
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.authorized(self.client.get(self.url(path)))?;
        self.send(path, request).await
    }

    /// Make a POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let request = self.authorized(self.client.post(self.url(path)).json(body))?;
        self.send(path, request).await
    }

    /// Make a POST request without a credential
    pub async fn post_public<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let request = self.client.post(self.url(path)).json(body);
        self.send(path, request).await
    }

    /// Make a PATCH request with JSON body
    pub async fn patch<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let request = self.authorized(self.client.patch(self.url(path)).json(body))?;
        self.send(path, request).await
    }

    /// Make a POST request with a multipart form
    pub async fn post_form<T: DeserializeOwned>(&self, path: &str, form: Form) -> ClientResult<T> {
        let request = self.authorized(self.client.post(self.url(path)).multipart(form))?;
        self.send(path, request).await
    }

    async fn send<T: DeserializeOwned>(&self, path: &str, request: RequestBuilder) -> ClientResult<T> {
        let text = self.execute(path, request).await?;
        serde_json::from_str(&text).map_err(|e| {
            tracing::warn!(path, error = %e, "Unexpected response body");
            ClientError::InvalidResponse(format!("{path}: {e}"))
        })
    }

    /// Run the request, returning the body of a successful response.
    async fn execute(&self, path: &str, request: RequestBuilder) -> ClientResult<String> {
        tracing::debug!(path, "Sending request");
        let response = request.send().await.map_err(|e| {
            tracing::warn!(path, error = %e, "Request failed");
            ClientError::from(e)
        })?;

        let status = response.status();
        let text = response.text().await?;
        if status.is_success() {
            return Ok(text);
        }

        tracing::debug!(path, status = status.as_u16(), "Request rejected");
        Err(Self::error_for(status, &text))
    }

    fn error_for(status: StatusCode, body: &str) -> ClientError {
        let errors = ValidationErrors::from_body(body);
        let message = errors
            .first_message()
            .map(str::to_string)
            .unwrap_or_else(|| status.to_string());
        match status {
            StatusCode::UNAUTHORIZED => ClientError::Unauthorized(message),
            StatusCode::FORBIDDEN => ClientError::Forbidden(message),
            StatusCode::NOT_FOUND => ClientError::NotFound(message),
            StatusCode::BAD_REQUEST | StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY => {
                ClientError::Validation(errors)
            }
            _ => ClientError::Internal(message),
        }
    }

    fn complaint_form(draft: &ComplaintDraft) -> ClientResult<Form> {
        let mut form = Form::new()
            .text("title", draft.title.clone())
            .text("category", draft.category.as_str())
            .text("description", draft.description.clone())
            .text("location", draft.location.clone())
            .text("priority", draft.priority.as_str());
        for image in &draft.images {
            let part = Part::bytes(image.bytes.clone())
                .file_name(image.file_name.clone())
                .mime_str(&image.mime)?;
            form = form.part("images", part);
        }
        Ok(form)
    }
}

#[async_trait]
impl CivicApi for NetworkHttpClient {
    async fn obtain_token(&self, email: &str, password: &str) -> ClientResult<TokenResponse> {
        let request = TokenRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.post_public("token/", &request).await
    }

    async fn register(&self, request: &RegisterRequest) -> ClientResult<RegisteredUser> {
        self.post_public("register/", request).await
    }

    async fn list_complaints(&self, role: Role) -> ClientResult<Vec<Complaint>> {
        self.get(role.complaints_path()).await
    }

    async fn create_complaint(&self, draft: &ComplaintDraft) -> ClientResult<Complaint> {
        let form = Self::complaint_form(draft)?;
        self.post_form("complaints/", form).await
    }

    async fn get_complaint(&self, id: ComplaintId) -> ClientResult<Complaint> {
        self.get(&format!("complaints/{id}/")).await
    }

    async fn update_complaint(&self, id: ComplaintId, patch: &ComplaintPatch) -> ClientResult<()> {
        let path = format!("complaints/update/{id}/");
        let request = self.authorized(self.client.patch(self.url(&path)).json(patch))?;
        self.execute(&path, request).await.map(|_| ())
    }

    async fn list_updates(&self, id: ComplaintId) -> ClientResult<Vec<ComplaintUpdate>> {
        self.get(&format!("complaints/{id}/updates/")).await
    }

    async fn add_update(
        &self,
        id: ComplaintId,
        entry: &TimelineEntryCreate,
    ) -> ClientResult<ComplaintUpdate> {
        self.post(&format!("complaints/{id}/updates/"), entry).await
    }

    async fn submit_feedback(
        &self,
        id: ComplaintId,
        feedback: &FeedbackCreate,
    ) -> ClientResult<Feedback> {
        self.post(&format!("complaints/{id}/feedback/"), feedback).await
    }

    async fn list_departments(&self) -> ClientResult<Vec<Department>> {
        self.get("departments/").await
    }

    async fn list_notifications(&self) -> ClientResult<Vec<Notification>> {
        self.get("notifications/").await
    }

    async fn mark_notifications_read(&self) -> ClientResult<()> {
        let path = "notifications/mark-read/";
        let request = self.authorized(self.client.post(self.url(path)))?;
        self.execute(path, request).await.map(|_| ())
    }

    async fn update_profile(&self, update: &ProfileUpdate) -> ClientResult<User> {
        self.patch("profile/", update).await
    }

    async fn change_password(&self, request: &ChangePasswordRequest) -> ClientResult<()> {
        let path = "change-password/";
        let request = self.authorized(self.client.put(self.url(path)).json(request))?;
        self.execute(path, request).await.map(|_| ())
    }
}
