use std::sync::Arc;

use super::*;

/// Storage whose contents the test can inspect after handing it to the store.
#[derive(Clone, Default)]
struct SharedStorage(Arc<MemoryStorage>);

impl CredentialStorage for SharedStorage {
    fn load(&self) -> Option<String> {
        self.0.load()
    }
    fn save(&self, token: &str) {
        self.0.save(token);
    }
    fn remove(&self) {
        self.0.remove();
    }
}

#[test]
fn set_then_get_returns_token() {
    let store = TokenStore::in_memory();
    store.set("T1");
    assert_eq!(store.get().as_deref(), Some("T1"));
    assert!(store.is_authenticated());
}

#[test]
fn clear_deauthenticates_immediately() {
    let store = TokenStore::in_memory();
    store.set("T1");
    store.clear();
    assert!(!store.is_authenticated());
    assert_eq!(store.get(), None);
}

#[test]
fn authenticated_for_any_non_empty_token() {
    let store = TokenStore::in_memory();
    for token in ["a", "not.a.jwt", "  spaced  ", "🔑"] {
        store.clear();
        store.set(token);
        assert!(store.is_authenticated(), "token {token:?}");
    }
}

#[test]
fn empty_token_clears() {
    let store = TokenStore::in_memory();
    store.set("T1");
    store.set("");
    assert!(!store.is_authenticated());
}

#[test]
fn new_store_activates_persisted_token() {
    let store = TokenStore::new(MemoryStorage::with_token("persisted"));
    assert_eq!(store.get().as_deref(), Some("persisted"));
}

#[test]
fn mutations_reach_backing_storage() {
    let storage = SharedStorage::default();
    let store = TokenStore::new(storage.clone());
    store.set("T2");
    assert_eq!(storage.load().as_deref(), Some("T2"));
    store.clear();
    assert_eq!(storage.load(), None);
}

#[test]
fn clear_if_ignores_newer_credential() {
    let store = TokenStore::in_memory();
    store.set("old");
    store.set("new");
    assert!(!store.clear_if("old"));
    assert_eq!(store.get().as_deref(), Some("new"));
    assert!(store.clear_if("new"));
    assert!(!store.is_authenticated());
}

#[test]
fn generation_bumps_on_every_mutation() {
    let store = TokenStore::in_memory();
    let start = store.generation();
    store.set("a");
    store.clear();
    assert_eq!(store.generation(), start + 2);
}

#[test]
fn clones_share_state() {
    let store = TokenStore::in_memory();
    let other = store.clone();
    store.set("T1");
    assert!(other.is_authenticated());
}

#[test]
fn debug_does_not_leak_token() {
    let store = TokenStore::in_memory();
    store.set("secret-token");
    assert!(!format!("{store:?}").contains("secret-token"));
}
