// SPDX-FileCopyrightText: 2026 HR Desk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! JSON record format for one chat message in the log.
//!
//! The layout matches the chat-history records written by earlier HR Desk
//! deployments, so existing Redis logs stay readable:
//!
//! ```json
//! {"type":"human","data":{"type":"human","content":"...","additional_kwargs":{"timestamp":1760400000.123}}}
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use hrdesk_core::{ChatMessage, HrDeskError, Role};

const HUMAN: &str = "human";
const AI: &str = "ai";

#[derive(Debug, Serialize, Deserialize)]
struct StoredRecord {
    #[serde(rename = "type")]
    kind: String,
    data: StoredData,
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredData {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    content: String,
    #[serde(default)]
    additional_kwargs: Map<String, Value>,
}

/// Serialize a message into its stored record.
pub fn encode(message: &ChatMessage) -> Result<String, HrDeskError> {
    let kind = match message.role {
        Role::User => HUMAN,
        Role::Bot => AI,
    };

    let mut additional_kwargs = Map::new();
    if let Some(ts) = message.timestamp {
        additional_kwargs.insert("timestamp".into(), Value::from(to_epoch_seconds(ts)));
    }

    let record = StoredRecord {
        kind: kind.to_string(),
        data: StoredData {
            kind: Some(kind.to_string()),
            content: message.content.clone(),
            additional_kwargs,
        },
    };
    serde_json::to_string(&record)
        .map_err(|e| HrDeskError::Internal(format!("failed to encode chat record: {e}")))
}

/// Parse a stored record. Anything unreadable is [`HrDeskError::StoreCorrupt`].
pub fn decode(raw: &str) -> Result<ChatMessage, HrDeskError> {
    let record: StoredRecord =
        serde_json::from_str(raw).map_err(|e| HrDeskError::StoreCorrupt {
            message: e.to_string(),
        })?;

    let role = match record.kind.as_str() {
        HUMAN => Role::User,
        AI => Role::Bot,
        other => {
            return Err(HrDeskError::StoreCorrupt {
                message: format!("unknown message type `{other}`"),
            });
        }
    };

    let timestamp = record
        .data
        .additional_kwargs
        .get("timestamp")
        .and_then(parse_timestamp);

    Ok(ChatMessage {
        role,
        content: record.data.content,
        timestamp,
    })
}

fn to_epoch_seconds(ts: DateTime<Utc>) -> f64 {
    ts.timestamp_micros() as f64 / 1_000_000.0
}

// Accepts a number or a numeric string; legacy writers used both.
fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    let secs = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if !secs.is_finite() || secs <= 0.0 {
        return None;
    }
    DateTime::from_timestamp_micros((secs * 1_000_000.0).round() as i64)
}
