//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by domain (`auth`, `rooms`, `notice`) so components depend
//! on small focused models. The collection models are the `workflow`
//! providers themselves, wrapped in `RwSignal`s by the app root.

pub mod auth;
pub mod notice;
pub mod rooms;
