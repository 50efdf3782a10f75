// SPDX-FileCopyrightText: 2026 HR Desk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Web chat surface for HR Desk.
//!
//! Serves the chat page and the JSON endpoints it talks to. Each browser is
//! identified by a signed session cookie; the session id keys its chat log
//! in the history store.

pub mod handlers;
pub mod server;
pub mod session;
pub mod ui;

pub use handlers::GENERATION_FAILED;
pub use server::{AppState, router, start_server};
