//! Session, data-provider, and payment workflows shared by the FlixShare clients.
//!
//! This crate owns everything the browser `client` and the native `cli` have in
//! common: the room/transaction data model, the bearer token store, the
//! authenticated request gateway, and the state machines that drive login,
//! password reset, room forms, and mobile-money payments. It has no UI or
//! runtime dependency; HTTP is reached through the [`gateway::Transport`] seam.
//!
//! ARCHITECTURE
//! ============
//! `token` -> `gateway` -> `api` form the request path. `session`, `guard`,
//! `provider`, `payment`, `forms`, and `reset` are pure state machines that
//! callers feed with request outcomes and millisecond instants.

pub mod api;
pub mod cancel;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod events;
pub mod forms;
pub mod gateway;
pub mod guard;
pub mod payment;
pub mod provider;
pub mod reset;
pub mod session;
pub mod token;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::{ApiError, FieldErrors, TransportError};
pub use gateway::{ApiRequest, ApiResponse, Gateway, Method, Transport};
pub use token::{CredentialStorage, MemoryStorage, TokenStore};
