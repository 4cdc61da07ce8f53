//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render room, payment, and account surfaces while reading and
//! writing shared state from Leptos context providers.

pub mod create_room_dialog;
pub mod form_status;
pub mod join_room_dialog;
pub mod notice_toast;
pub mod password_strength;
pub mod payment_dialog;
pub mod protected;
pub mod room_card;
pub mod top_bar;
pub mod transaction_list;
