// SPDX-FileCopyrightText: 2026 HR Desk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session-scoped chat history on top of a [`MessageLogAdapter`].

use std::sync::Arc;

use chrono::{Local, Utc};
use tracing::{debug, warn};

use hrdesk_core::{
    CategorizedHistory, ChatMessage, HrDeskError, MessageLogAdapter, Role, SessionId, normalize,
};

use crate::categorize::categorize;
use crate::record;

/// Ordered (User, Bot) message log per session.
///
/// Duplicate suppression lives here: a question already asked in the session
/// is never appended a second time.
pub struct ChatHistoryStore {
    log: Arc<dyn MessageLogAdapter>,
    key_prefix: String,
}

impl ChatHistoryStore {
    pub fn new(log: Arc<dyn MessageLogAdapter>, key_prefix: impl Into<String>) -> Self {
        Self {
            log,
            key_prefix: key_prefix.into(),
        }
    }

    /// The backend, for health checks and shutdown.
    pub fn backend(&self) -> &Arc<dyn MessageLogAdapter> {
        &self.log
    }

    fn key(&self, session: &SessionId) -> String {
        format!("{}{}", self.key_prefix, session)
    }

    /// Raw records paired with their decoded form. Corrupt records decode to `None`.
    async fn load(
        &self,
        session: &SessionId,
    ) -> Result<Vec<(String, Option<ChatMessage>)>, HrDeskError> {
        let records = self.log.range(&self.key(session)).await?;
        Ok(records
            .into_iter()
            .map(|raw| {
                let decoded = match record::decode(&raw) {
                    Ok(msg) => Some(msg),
                    Err(e) => {
                        warn!(session_id = %session, error = %e, "skipping chat record");
                        None
                    }
                };
                (raw, decoded)
            })
            .collect())
    }

    /// Full log in append order. Unknown sessions yield an empty list.
    pub async fn get_messages(
        &self,
        session: &SessionId,
    ) -> Result<Vec<ChatMessage>, HrDeskError> {
        Ok(self
            .load(session)
            .await?
            .into_iter()
            .filter_map(|(_, msg)| msg)
            .collect())
    }

    /// Append a question and its answer, unless the question was already asked.
    ///
    /// Returns `false` when the pair was suppressed as a duplicate.
    pub async fn append_pair(
        &self,
        session: &SessionId,
        query: &str,
        response: &str,
    ) -> Result<bool, HrDeskError> {
        let target = normalize(query);
        let messages = self.get_messages(session).await?;
        if messages
            .iter()
            .any(|m| m.is_user() && m.normalized() == target)
        {
            debug!(session_id = %session, "duplicate question, not stored");
            return Ok(false);
        }

        let now = Some(Utc::now());
        let records = [
            record::encode(&ChatMessage::user(query, now))?,
            record::encode(&ChatMessage::bot(response, now))?,
        ];
        self.log.push(&self.key(session), &records).await?;
        debug!(session_id = %session, "chat pair stored");
        Ok(true)
    }

    /// The log bucketed into Today / Yesterday / Older by local date.
    pub async fn get_categorized(
        &self,
        session: &SessionId,
    ) -> Result<CategorizedHistory, HrDeskError> {
        let messages = self.get_messages(session).await?;
        Ok(categorize(&messages, Local::now().date_naive()))
    }

    /// Remove the whole log for `session`.
    pub async fn clear(&self, session: &SessionId) -> Result<(), HrDeskError> {
        self.log.delete(&self.key(session)).await?;
        debug!(session_id = %session, "chat history cleared");
        Ok(())
    }

    /// Remove every User message matching `target` together with the Bot
    /// reply right after it. Returns how many messages were removed.
    ///
    /// Survivors keep their order, timestamps and exact stored bytes. When
    /// nothing matches the log is not rewritten.
    pub async fn delete_by_content(
        &self,
        session: &SessionId,
        target: &str,
    ) -> Result<usize, HrDeskError> {
        let target = normalize(target);
        let entries = self.load(session).await?;
        let total = entries.len();

        let mut survivors = Vec::with_capacity(total);
        let mut iter = entries.into_iter().peekable();
        while let Some((raw, msg)) = iter.next() {
            let matched = msg
                .as_ref()
                .is_some_and(|m| m.is_user() && m.normalized() == target);
            if !matched {
                survivors.push(raw);
                continue;
            }
            let next_is_reply = iter
                .peek()
                .is_some_and(|(_, next)| next.as_ref().is_some_and(|m| m.role == Role::Bot));
            if next_is_reply {
                iter.next();
            }
        }

        let removed = total - survivors.len();
        if removed > 0 {
            self.log.replace(&self.key(session), &survivors).await?;
            debug!(session_id = %session, removed, "chat history item deleted");
        }
        Ok(removed)
    }

    /// The stored answer to the first earlier occurrence of `query`, if any.
    pub async fn find_response(
        &self,
        session: &SessionId,
        query: &str,
    ) -> Result<Option<String>, HrDeskError> {
        let target = normalize(query);
        let messages = self.get_messages(session).await?;
        let answer = messages
            .iter()
            .position(|m| m.is_user() && m.normalized() == target)
            .and_then(|i| messages.get(i + 1))
            .filter(|m| m.role == Role::Bot)
            .map(|m| m.content.clone());
        Ok(answer)
    }
}
