use std::sync::Arc;
use std::time::Duration;

use groundsearch_types::SessionConfig;

use super::{generate_session_id, ManualClock, SessionStore, SESSION_ID_LEN};

fn store(ttl_secs: u64, max_sessions: usize) -> (SessionStore<String>, ManualClock) {
    let clock = ManualClock::new();
    let config = SessionConfig { ttl_secs, max_sessions, sweep_interval_secs: 60 };
    (SessionStore::with_clock(&config, Arc::new(clock.clone())), clock)
}

#[test]
fn test_session_ids_are_long_and_distinct() {
    let a = generate_session_id();
    let b = generate_session_id();
    assert_eq!(a.len(), SESSION_ID_LEN);
    assert!(a.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_ne!(a, b);
}

#[tokio::test]
async fn test_insert_then_get() {
    let (store, _clock) = store(60, 10);
    let id = store.insert("conversation".to_string());

    let handle = store.get(&id).expect("session should exist");
    assert_eq!(*handle.lock().await, "conversation");
    assert!(store.get("not-a-session").is_none());
}

#[tokio::test]
async fn test_put_replaces_existing() {
    let (store, _clock) = store(60, 10);
    let id = store.create();
    store.put(id.clone(), "first".to_string());
    store.put(id.clone(), "second".to_string());

    assert_eq!(store.len(), 1);
    let handle = store.get(&id).expect("session should exist");
    assert_eq!(*handle.lock().await, "second");
}

#[test]
fn test_expired_session_not_returned() {
    let (store, clock) = store(30, 10);
    let id = store.insert("c".to_string());

    clock.advance(Duration::from_secs(31));
    assert!(store.get(&id).is_none());
    assert!(store.is_empty());
}

#[test]
fn test_access_refreshes_ttl() {
    let (store, clock) = store(30, 10);
    let id = store.insert("c".to_string());

    clock.advance(Duration::from_secs(20));
    assert!(store.get(&id).is_some());
    clock.advance(Duration::from_secs(20));
    assert!(store.get(&id).is_some());
}

#[test]
fn test_evict_expired_counts_removed() {
    let (store, clock) = store(30, 10);
    let stale = store.insert("old".to_string());
    clock.advance(Duration::from_secs(20));
    let fresh = store.insert("new".to_string());
    clock.advance(Duration::from_secs(15));

    assert_eq!(store.evict_expired(), 1);
    assert!(store.get(&stale).is_none());
    assert!(store.get(&fresh).is_some());
}

#[test]
fn test_capacity_evicts_least_recently_used() {
    let (store, clock) = store(600, 2);
    let a = store.insert("a".to_string());
    clock.advance(Duration::from_secs(1));
    let b = store.insert("b".to_string());
    clock.advance(Duration::from_secs(1));

    // touching `a` makes `b` the oldest
    assert!(store.get(&a).is_some());
    clock.advance(Duration::from_secs(1));
    let c = store.insert("c".to_string());

    assert_eq!(store.len(), 2);
    assert!(store.get(&a).is_some());
    assert!(store.get(&b).is_none());
    assert!(store.get(&c).is_some());
}

#[test]
fn test_capacity_without_clock_movement_keeps_newest() {
    let (store, _clock) = store(600, 1);
    let _first = store.insert("first".to_string());
    let second = store.insert("second".to_string());

    assert_eq!(store.len(), 1);
    assert!(store.get(&second).is_some());
}

#[tokio::test]
async fn test_handle_lock_serializes_turns() {
    let (store, _clock) = store(600, 10);
    let id = store.insert(String::new());
    let store = Arc::new(store);

    let mut tasks = Vec::new();
    for i in 0..8 {
        let store = Arc::clone(&store);
        let id = id.clone();
        tasks.push(tokio::spawn(async move {
            let handle = store.get(&id).expect("session should exist");
            let mut turns = handle.lock().await;
            let before = turns.len();
            tokio::task::yield_now().await;
            turns.push_str(&i.to_string());
            assert_eq!(turns.len(), before + 1);
        }));
    }
    for task in tasks {
        task.await.expect("task panicked");
    }

    let handle = store.get(&id).expect("session should exist");
    assert_eq!(handle.lock().await.len(), 8);
}

#[test]
fn test_remove() {
    let (store, _clock) = store(60, 10);
    let id = store.insert("c".to_string());
    assert!(store.remove(&id));
    assert!(!store.remove(&id));
    assert!(store.get(&id).is_none());
}
