// SPDX-FileCopyrightText: 2026 HR Desk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Date buckets for the history sidebar.

use chrono::{Local, NaiveDate};

use hrdesk_core::{CategorizedHistory, ChatMessage, HistoryEntry};

/// Partition `messages` by local calendar date relative to `today`.
///
/// Messages without a timestamp are left out. Order within a bucket follows
/// log order.
pub fn categorize(messages: &[ChatMessage], today: NaiveDate) -> CategorizedHistory {
    let yesterday = today.pred_opt();
    let mut history = CategorizedHistory::default();

    for msg in messages {
        let Some(ts) = msg.timestamp else {
            continue;
        };
        let date = ts.with_timezone(&Local).date_naive();
        let entry = HistoryEntry {
            role: msg.role,
            message: msg.content.clone(),
        };

        if date == today {
            history.today.push(entry);
        } else if Some(date) == yesterday {
            history.yesterday.push(entry);
        } else {
            history.older.push(entry);
        }
    }

    history
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use hrdesk_core::Role;

    fn local_noon(date: NaiveDate) -> DateTime<Utc> {
        Local
            .from_local_datetime(&date.and_hms_opt(12, 0, 0).unwrap())
            .single()
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn buckets_by_local_date() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        let yesterday = NaiveDate::from_ymd_opt(2026, 3, 9).unwrap();
        let last_week = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();

        let messages = vec![
            ChatMessage::user("old question", Some(local_noon(last_week))),
            ChatMessage::bot("old answer", Some(local_noon(last_week))),
            ChatMessage::user("yesterday question", Some(local_noon(yesterday))),
            ChatMessage::bot("yesterday answer", Some(local_noon(yesterday))),
            ChatMessage::user("today question", Some(local_noon(today))),
            ChatMessage::bot("today answer", Some(local_noon(today))),
        ];

        let history = categorize(&messages, today);
        assert_eq!(history.len(), 6);
        assert_eq!(history.today[0].message, "today question");
        assert_eq!(history.today[0].role, Role::User);
        assert_eq!(history.today[1].role, Role::Bot);
        assert_eq!(history.yesterday.len(), 2);
        assert_eq!(history.older.len(), 2);
        assert_eq!(history.older[0].message, "old question");
    }

    #[test]
    fn untimestamped_messages_are_excluded() {
        let today = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let messages = vec![
            ChatMessage::user("legacy", None),
            ChatMessage::bot("legacy answer", None),
        ];
        assert!(categorize(&messages, today).is_empty());
    }

    #[test]
    fn january_first_yesterday_is_december() {
        let today = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let new_years_eve = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
        let messages = vec![ChatMessage::user("hi", Some(local_noon(new_years_eve)))];
        assert_eq!(categorize(&messages, today).yesterday.len(), 1);
    }
}
