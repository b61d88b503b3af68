// civic-client/tests/store.rs
// Complaint store against an in-memory backend

mod common;

use civic_client::{
    ClientError, ComplaintDraft, ComplaintQuery, ComplaintStore, ErrorKind, SessionHolder,
};
use common::{FakeApi, ListResponse, logged_in, raw_complaint, wait_for_list_calls};
use shared::models::{ComplaintCategory, ComplaintPriority, ComplaintStatus, Role};
use shared::stats::ComplaintStats;
use std::sync::Arc;
use tokio::sync::oneshot;

fn store(api: &Arc<FakeApi>, session: SessionHolder) -> ComplaintStore {
    ComplaintStore::new(api.clone(), session)
}

fn sample() -> Vec<shared::models::Complaint> {
    vec![
        raw_complaint(1, "Pothole on Main St", Some("Pending"), Some("Road Damage")),
        raw_complaint(2, "Burst pipe", Some("In Progress"), Some("water_supply")),
        raw_complaint(3, "Broken lamp", Some("resolved"), Some("streetlight")),
        raw_complaint(4, "Overflowing bins", Some("Assigned"), Some("Garbage")),
    ]
}

#[tokio::test]
async fn fetch_all_normalizes_and_replaces() {
    let api = Arc::new(FakeApi::with_complaints(sample()));
    let store = store(&api, logged_in(Role::Citizen));

    let fetched = store.fetch_all().await.unwrap();
    assert_eq!(fetched.len(), 4);

    let complaints = store.complaints();
    assert_eq!(complaints[0].category.as_deref(), Some("road-damage"));
    assert_eq!(complaints[1].status.as_deref(), Some("in-progress"));
    assert_eq!(complaints[1].category.as_deref(), Some("water-supply"));
    assert_eq!(complaints[0].priority.as_deref(), Some("high"));
    assert!(!store.is_loading());
    assert_eq!(*api.listed_roles.lock().unwrap(), vec![Role::Citizen]);
}

#[tokio::test]
async fn fetch_uses_role_of_session() {
    let api = Arc::new(FakeApi::with_complaints(sample()));
    store(&api, logged_in(Role::Department)).fetch_all().await.unwrap();
    store(&api, logged_in(Role::Admin)).fetch_all().await.unwrap();
    assert_eq!(
        *api.listed_roles.lock().unwrap(),
        vec![Role::Department, Role::Admin]
    );
}

#[tokio::test]
async fn no_session_short_circuits() {
    let api = Arc::new(FakeApi::with_complaints(sample()));
    let store = store(&api, SessionHolder::in_memory());

    let err = store.fetch_all().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AuthenticationAbsent);
    assert_eq!(api.list_calls(), 0);
    assert!(store.complaints().is_empty());
}

#[tokio::test]
async fn failed_fetch_keeps_collection() {
    let api = Arc::new(FakeApi::with_complaints(sample()));
    let store = store(&api, logged_in(Role::Admin));
    store.fetch_all().await.unwrap();

    api.push_list(ListResponse::Fail("boom".into()));
    let err = store.fetch_all().await.unwrap_err();
    assert!(matches!(err, ClientError::Internal(_)));
    assert_eq!(store.complaints().len(), 4);
    assert!(!store.is_loading());
}

#[tokio::test]
async fn stats_follow_collection() {
    let api = Arc::new(FakeApi::with_complaints(sample()));
    let store = store(&api, logged_in(Role::Admin));
    assert_eq!(store.stats(), ComplaintStats::default());

    store.fetch_all().await.unwrap();
    assert_eq!(
        store.stats(),
        ComplaintStats {
            total: 4,
            pending: 1,
            in_progress: 2,
            resolved: 1,
        }
    );

    api.push_list(ListResponse::Ready(vec![raw_complaint(9, "Lone", Some("RESOLVED"), None)]));
    store.fetch_all().await.unwrap();
    assert_eq!(store.stats().total, 1);
    assert_eq!(store.stats().resolved, 1);
}

#[tokio::test]
async fn filtered_reads_current_collection() {
    let api = Arc::new(FakeApi::with_complaints(sample()));
    let store = store(&api, logged_in(Role::Admin));
    store.fetch_all().await.unwrap();

    let found = store.filtered(&ComplaintQuery::new().with_text("pothole"));
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, 1);

    let resolved = store.filtered(&ComplaintQuery::new().with_status(ComplaintStatus::Resolved));
    assert_eq!(resolved.iter().map(|c| c.id).collect::<Vec<_>>(), vec![3]);
}

#[tokio::test]
async fn get_by_id_is_normalized_or_none() {
    let api = Arc::new(FakeApi::with_complaints(sample()));
    let store = store(&api, logged_in(Role::Citizen));

    let found = store.get_by_id(2).await.unwrap();
    assert_eq!(found.status.as_deref(), Some("in-progress"));
    assert!(store.get_by_id(404).await.is_none());
    // independent of the cache
    assert!(store.complaints().is_empty());
}

#[tokio::test]
async fn add_refreshes_collection() {
    let api = Arc::new(FakeApi::with_complaints(sample()));
    let store = store(&api, logged_in(Role::Citizen));

    let draft = ComplaintDraft::new(
        "Fallen tree",
        ComplaintCategory::Other,
        "Blocking the lane",
        "Park Rd",
        ComplaintPriority::Medium,
    );
    let created = store.add(&draft).await.unwrap();
    assert_eq!(created.id, 5);
    assert_eq!(created.status.as_deref(), Some("pending"));
    assert_eq!(api.list_calls(), 1);
    assert_eq!(store.complaints().len(), 5);
}

#[tokio::test]
async fn add_rejected_by_backend_leaves_cache() {
    let api = Arc::new(FakeApi::with_complaints(sample()));
    let store = store(&api, logged_in(Role::Citizen));
    store.fetch_all().await.unwrap();
    let before = store.complaints();

    *api.create_error.lock().unwrap() =
        Some(r#"{"location": ["Location is too vague."]}"#.to_string());
    let draft = ComplaintDraft::new(
        "Pothole",
        ComplaintCategory::RoadDamage,
        "Deep",
        "here",
        ComplaintPriority::High,
    );
    let err = store.add(&draft).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(err.user_notice(), "Location is too vague.");
    assert_eq!(store.complaints(), before);
    assert_eq!(api.list_calls(), 1);
}

#[tokio::test]
async fn add_with_blank_fields_sends_nothing() {
    let api = Arc::new(FakeApi::default());
    let store = store(&api, logged_in(Role::Citizen));
    let draft = ComplaintDraft::new(
        "",
        ComplaintCategory::Drainage,
        "Clogged",
        "Lane 4",
        ComplaintPriority::Low,
    );
    let err = store.add(&draft).await.unwrap_err();
    assert_eq!(err.user_notice(), "This field is required.");
    assert!(api.created.lock().unwrap().is_empty());
}

#[tokio::test]
async fn overlapping_fetches_last_response_wins() {
    let api = Arc::new(FakeApi::default());
    let store = store(&api, logged_in(Role::Admin));
    let (first_tx, first_rx) = oneshot::channel();
    let (second_tx, second_rx) = oneshot::channel();
    api.push_list(ListResponse::Gate(first_rx));
    api.push_list(ListResponse::Gate(second_rx));

    let first = tokio::spawn({
        let store = store.clone();
        async move { store.fetch_all().await }
    });
    wait_for_list_calls(&api, 1).await;
    let second = tokio::spawn({
        let store = store.clone();
        async move { store.fetch_all().await }
    });
    wait_for_list_calls(&api, 2).await;
    assert!(store.is_loading());

    first_tx
        .send(vec![raw_complaint(1, "Old", Some("pending"), None)])
        .unwrap();
    first.await.unwrap().unwrap();
    assert!(store.is_loading());

    second_tx
        .send(vec![
            raw_complaint(2, "New", Some("Resolved"), None),
            raw_complaint(3, "Newer", Some("pending"), None),
        ])
        .unwrap();
    second.await.unwrap().unwrap();

    let ids: Vec<_> = store.complaints().iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![2, 3]);
    assert_eq!(store.complaints()[0].status.as_deref(), Some("resolved"));
    assert!(!store.is_loading());
}

#[tokio::test]
async fn fetch_in_flight_during_clear_is_discarded() {
    let api = Arc::new(FakeApi::default());
    let session = logged_in(Role::Citizen);
    let store = store(&api, session.clone());
    let (tx, rx) = oneshot::channel();
    api.push_list(ListResponse::Gate(rx));

    let pending = tokio::spawn({
        let store = store.clone();
        async move { store.fetch_all().await }
    });
    wait_for_list_calls(&api, 1).await;

    store.clear();
    session.logout().unwrap();
    tx.send(vec![raw_complaint(1, "Previous user", Some("pending"), None)])
        .unwrap();

    let err = pending.await.unwrap().unwrap_err();
    assert!(matches!(err, ClientError::NotAuthenticated));
    assert!(store.complaints().is_empty());
    assert!(!store.is_loading());
}

#[tokio::test]
async fn fetch_after_clear_writes_again() {
    let api = Arc::new(FakeApi::with_complaints(sample()));
    let store = store(&api, logged_in(Role::Citizen));

    store.clear();
    store.fetch_all().await.unwrap();
    assert_eq!(store.complaints().len(), 4);
}

#[tokio::test]
async fn overlapping_fetches_resolved_out_of_order() {
    let api = Arc::new(FakeApi::default());
    let store = store(&api, logged_in(Role::Admin));
    let (first_tx, first_rx) = oneshot::channel();
    let (second_tx, second_rx) = oneshot::channel();
    api.push_list(ListResponse::Gate(first_rx));
    api.push_list(ListResponse::Gate(second_rx));

    let first = tokio::spawn({
        let store = store.clone();
        async move { store.fetch_all().await }
    });
    wait_for_list_calls(&api, 1).await;
    let second = tokio::spawn({
        let store = store.clone();
        async move { store.fetch_all().await }
    });
    wait_for_list_calls(&api, 2).await;

    // the later request answers first; the earlier one lands last and wins
    second_tx
        .send(vec![raw_complaint(2, "Second", Some("pending"), None)])
        .unwrap();
    second.await.unwrap().unwrap();
    first_tx
        .send(vec![raw_complaint(1, "First", Some("pending"), None)])
        .unwrap();
    first.await.unwrap().unwrap();

    let ids: Vec<_> = store.complaints().iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![1]);
}

#[tokio::test]
async fn subscribers_see_loading_and_data() {
    let api = Arc::new(FakeApi::with_complaints(sample()));
    let store = store(&api, logged_in(Role::Citizen));
    let mut rx = store.subscribe();
    assert!(!rx.borrow_and_update().loading);

    store.fetch_all().await.unwrap();
    assert!(rx.has_changed().unwrap());
    let snapshot = rx.borrow_and_update().clone();
    assert_eq!(snapshot.complaints.len(), 4);
    assert!(!snapshot.loading);

    store.clear();
    assert!(store.complaints().is_empty());
}
