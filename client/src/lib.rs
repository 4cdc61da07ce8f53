//! # client
//!
//! Leptos + WASM frontend for FlixShare, the shared-subscription app.
//!
//! This crate contains pages, components, reactive state, and the browser
//! transport/storage used by the `workflow` gateway. Session, payment, and
//! form logic live in `workflow`; this crate only renders them and feeds them
//! user input, request outcomes, and clock readings.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install logging and mount the app.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Debug).is_err() {
        leptos::logging::warn!("console logger already installed");
    }
    leptos::mount::mount_to_body(app::App);
}
