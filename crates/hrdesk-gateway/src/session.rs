// SPDX-FileCopyrightText: 2026 HR Desk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-browser session identity carried in a signed cookie.

use axum_extra::extract::cookie::{Cookie, Key, SameSite, SignedCookieJar};
use sha2::{Digest, Sha512};
use tracing::{debug, warn};

use hrdesk_core::SessionId;

/// Signing key from `server.secret_key`, or a random per-process key.
pub fn signing_key(secret: Option<&str>) -> Key {
    match secret.map(str::trim).filter(|s| !s.is_empty()) {
        Some(secret) => Key::from(Sha512::digest(secret.as_bytes()).as_slice()),
        None => {
            warn!("server.secret_key is not set; sessions will not survive a restart");
            Key::generate()
        }
    }
}

/// The session named by the cookie, minting a fresh one when absent.
///
/// Returns the jar to send back so a new cookie reaches the browser.
pub fn resolve(jar: SignedCookieJar, cookie_name: &str) -> (SignedCookieJar, SessionId) {
    if let Some(cookie) = jar.get(cookie_name) {
        let value = cookie.value().trim();
        if !value.is_empty() {
            return (jar, SessionId(value.to_string()));
        }
    }

    let id = uuid::Uuid::new_v4().to_string();
    debug!(session_id = %id, "new session");
    let cookie = Cookie::build((cookie_name.to_string(), id.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();
    (jar.add(cookie), SessionId(id))
}
