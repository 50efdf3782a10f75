// SPDX-FileCopyrightText: 2026 HR Desk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Server-rendered chat page.

use minijinja::{Environment, context};
use serde::Serialize;

use hrdesk_core::{ChatMessage, HrDeskError};

const INDEX_TEMPLATE: &str = include_str!("../templates/index.html");

/// Browser script served at `/static/chat.js`.
pub const CHAT_SCRIPT: &str = include_str!("../assets/chat.js");

#[derive(Serialize)]
struct Bubble<'a> {
    role: &'static str,
    content: &'a str,
}

/// Compiled page templates.
pub struct ChatPage {
    env: Environment<'static>,
}

impl ChatPage {
    pub fn new() -> Result<Self, HrDeskError> {
        let mut env = Environment::new();
        env.add_template("index.html", INDEX_TEMPLATE)
            .map_err(|e| HrDeskError::Internal(format!("invalid page template: {e}")))?;
        Ok(Self { env })
    }

    /// Render the page with the session's log. Message text is HTML-escaped.
    pub fn render(&self, messages: &[ChatMessage]) -> Result<String, HrDeskError> {
        let bubbles: Vec<Bubble<'_>> = messages
            .iter()
            .map(|m| Bubble {
                role: if m.is_user() { "user" } else { "bot" },
                content: &m.content,
            })
            .collect();

        self.env
            .get_template("index.html")
            .and_then(|tmpl| tmpl.render(context! { history => bubbles }))
            .map_err(|e| HrDeskError::Internal(format!("failed to render chat page: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_history_escaped() {
        let page = ChatPage::new().unwrap();
        let html = page
            .render(&[
                ChatMessage::user("<b>leave?</b>", None),
                ChatMessage::bot("20 days", None),
            ])
            .unwrap();
        assert!(html.contains("&lt;b&gt;leave?&lt;&#x2f;b&gt;"));
        assert!(!html.contains("<b>"));
        assert!(html.contains("20 days"));
        assert!(html.contains("message user-message"));
        assert!(html.contains("message bot-message"));
        assert!(html.contains("/static/chat.js"));
    }

    #[test]
    fn empty_history_still_renders_form() {
        let html = ChatPage::new().unwrap().render(&[]).unwrap();
        assert!(html.contains("id=\"search-form\""));
        assert!(!html.contains("user-message\""));
    }
}
