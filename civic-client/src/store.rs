//! Complaint store - the cached complaint list of the current session.
//!
//! The collection lives in a `watch` channel: the store is its only writer,
//! front ends read snapshots or subscribe. Only the completion of
//! [`ComplaintStore::fetch_all`] replaces the collection.
//!
//! Overlapping fetches are not de-duplicated. Each one writes its own result
//! when it resolves, so the response that arrives last wins, whatever order
//! the requests were issued in. A fetch that was started before
//! [`ComplaintStore::clear`] discards its result.

use shared::models::{Complaint, ComplaintId};
use shared::stats::ComplaintStats;
use shared::{ComplaintQuery, filter_complaints, normalize_complaint};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use tokio::sync::watch;

use crate::api::CivicApi;
use crate::draft::ComplaintDraft;
use crate::error::{ClientError, ClientResult};
use crate::session::SessionHolder;

/// Read-only view of the store
#[derive(Debug, Clone, Default)]
pub struct StoreSnapshot {
    pub complaints: Arc<Vec<Complaint>>,
    /// True while at least one fetch is in flight
    pub loading: bool,
}

struct StoreInner {
    api: Arc<dyn CivicApi>,
    session: SessionHolder,
    state: watch::Sender<StoreSnapshot>,
    in_flight: AtomicUsize,
    /// Bumped by `clear`
    generation: AtomicU64,
}

#[derive(Clone)]
pub struct ComplaintStore {
    inner: Arc<StoreInner>,
}

impl std::fmt::Debug for ComplaintStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComplaintStore")
            .field("state", &*self.inner.state.borrow())
            .finish_non_exhaustive()
    }
}

/// Keeps the loading flag raised until every fetch has settled,
/// including fetches whose future was dropped mid-flight.
struct LoadingGuard<'a> {
    inner: &'a StoreInner,
}

impl<'a> LoadingGuard<'a> {
    fn start(inner: &'a StoreInner) -> Self {
        if inner.in_flight.fetch_add(1, Ordering::SeqCst) == 0 {
            inner.state.send_modify(|s| s.loading = true);
        }
        Self { inner }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        if self.inner.in_flight.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.inner.state.send_modify(|s| s.loading = false);
        }
    }
}

impl ComplaintStore {
    pub fn new(api: Arc<dyn CivicApi>, session: SessionHolder) -> Self {
        let (state, _) = watch::channel(StoreSnapshot::default());
        Self {
            inner: Arc::new(StoreInner {
                api,
                session,
                state,
                in_flight: AtomicUsize::new(0),
                generation: AtomicU64::new(0),
            }),
        }
    }

    /// Reload the collection from the role-scoped endpoint.
    ///
    /// Without a session nothing is sent and the collection is left alone.
    /// A failed request also leaves it alone; there is no retry. If the store
    /// is cleared while the request is in flight, the response is dropped and
    /// the call fails with [`ClientError::NotAuthenticated`].
    pub async fn fetch_all(&self) -> ClientResult<Arc<Vec<Complaint>>> {
        let role = match self.inner.session.role() {
            Some(role) if self.inner.session.is_authenticated() => role,
            _ => return Err(ClientError::NotAuthenticated),
        };

        let generation = self.inner.generation.load(Ordering::SeqCst);
        let _loading = LoadingGuard::start(&self.inner);
        let raw = self.inner.api.list_complaints(role).await.map_err(|e| {
            tracing::warn!(role = %role, error = %e, "Failed to fetch complaints");
            e
        })?;

        let complaints: Arc<Vec<Complaint>> =
            Arc::new(raw.iter().map(normalize_complaint).collect());
        let mut stale = false;
        self.inner.state.send_if_modified(|s| {
            stale = self.inner.generation.load(Ordering::SeqCst) != generation;
            if !stale {
                s.complaints = Arc::clone(&complaints);
            }
            !stale
        });
        if stale {
            tracing::debug!(role = %role, "Complaints fetched after clear, discarded");
            return Err(ClientError::NotAuthenticated);
        }
        tracing::debug!(role = %role, count = complaints.len(), "Complaints fetched");
        Ok(complaints)
    }

    /// Submit a new complaint, then resynchronize the collection.
    ///
    /// Blank required fields are rejected locally. A rejected submission leaves
    /// the collection untouched. The created complaint is returned even when
    /// the follow-up refresh fails.
    pub async fn add(&self, draft: &ComplaintDraft) -> ClientResult<Complaint> {
        draft.validate()?;
        if !self.inner.session.is_authenticated() {
            return Err(ClientError::NotAuthenticated);
        }

        let created = self.inner.api.create_complaint(draft).await?.normalized();
        tracing::info!(id = created.id, title = %created.title, "Complaint submitted");

        if let Err(e) = self.fetch_all().await {
            tracing::warn!(error = %e, "Refresh after submit failed");
        }
        Ok(created)
    }

    /// Fetch one complaint, bypassing the cache.
    ///
    /// Any failure yields `None`.
    pub async fn get_by_id(&self, id: ComplaintId) -> Option<Complaint> {
        match self.inner.api.get_complaint(id).await {
            Ok(complaint) => Some(complaint.normalized()),
            Err(e) => {
                tracing::debug!(id, error = %e, "Complaint lookup failed");
                None
            }
        }
    }

    /// Counts over the current collection, computed on every call.
    pub fn stats(&self) -> ComplaintStats {
        ComplaintStats::from_complaints(&self.complaints())
    }

    pub fn complaints(&self) -> Arc<Vec<Complaint>> {
        Arc::clone(&self.inner.state.borrow().complaints)
    }

    pub fn is_loading(&self) -> bool {
        self.inner.state.borrow().loading
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        self.inner.state.borrow().clone()
    }

    pub fn filtered(&self, query: &ComplaintQuery) -> Vec<Complaint> {
        filter_complaints(&self.complaints(), query)
    }

    pub fn subscribe(&self) -> watch::Receiver<StoreSnapshot> {
        self.inner.state.subscribe()
    }

    /// Drop the cached collection (on logout). Fetches already in flight
    /// will not write their results.
    pub fn clear(&self) {
        self.inner.state.send_modify(|s| {
            self.inner.generation.fetch_add(1, Ordering::SeqCst);
            s.complaints = Arc::new(Vec::new());
        });
    }

    pub fn session(&self) -> &SessionHolder {
        &self.inner.session
    }

    pub(crate) fn api(&self) -> &Arc<dyn CivicApi> {
        &self.inner.api
    }
}
