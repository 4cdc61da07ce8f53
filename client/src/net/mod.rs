//! Browser networking for the FlixShare backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `transport` executes gateway requests with `gloo-net`, `storage` keeps the
//! bearer token in `localStorage`, and `api` spawns gateway calls and commits
//! their outcomes into reactive state.

pub mod api;
pub mod storage;
pub mod transport;

use workflow::Gateway;
use workflow::session::SessionResolver;

/// Gateway type shared through Leptos context.
pub type ClientGateway = Gateway<transport::BrowserTransport>;

/// Session resolver over the browser gateway.
pub type ClientSession = SessionResolver<transport::BrowserTransport>;
