//! `localStorage` persistence for the bearer token.
//!
//! TRADE-OFFS
//! ==========
//! Storage access is best-effort: a browser that refuses `localStorage`
//! (private mode, quota) still gets a working in-memory session that simply
//! does not survive a reload. Outside the `csr` build nothing is persisted.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use workflow::{CredentialStorage, TokenStore};

/// Key the token is stored under.
pub const TOKEN_KEY: &str = "token";

/// Credential storage backed by `window.localStorage`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorage;

#[cfg(feature = "csr")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

impl CredentialStorage for LocalStorage {
    fn load(&self) -> Option<String> {
        #[cfg(feature = "csr")]
        {
            local_storage()?.get_item(TOKEN_KEY).ok().flatten()
        }
        #[cfg(not(feature = "csr"))]
        {
            None
        }
    }

    fn save(&self, token: &str) {
        #[cfg(feature = "csr")]
        {
            if let Some(storage) = local_storage() {
                if storage.set_item(TOKEN_KEY, token).is_err() {
                    log::warn!("could not persist session token");
                }
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = token;
        }
    }

    fn remove(&self) {
        #[cfg(feature = "csr")]
        {
            if let Some(storage) = local_storage() {
                let _ = storage.remove_item(TOKEN_KEY);
            }
        }
    }
}

/// Token store restored from the previous browser session, if any.
pub fn browser_token_store() -> TokenStore {
    TokenStore::new(LocalStorage)
}
