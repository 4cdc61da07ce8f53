#![cfg(not(feature = "csr"))]

use super::*;

#[test]
fn native_storage_starts_empty() {
    assert_eq!(LocalStorage.load(), None);
    assert!(!browser_token_store().is_authenticated());
}

#[test]
fn save_and_remove_are_callable() {
    LocalStorage.save("T1");
    LocalStorage.remove();
    assert_eq!(LocalStorage.load(), None);
}

#[test]
fn store_still_holds_token_in_memory() {
    let tokens = browser_token_store();
    tokens.set("T1");
    assert_eq!(tokens.get().as_deref(), Some("T1"));
}
