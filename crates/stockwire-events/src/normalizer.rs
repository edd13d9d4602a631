// SPDX-FileCopyrightText: 2026 Stockwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Raw-event normalization.
//!
//! Every raw event becomes a [`NotificationEvent`], including names matching
//! neither table: unclassified events are surfaced rather than dropped, so
//! newly added backend events stay visible before the client learns their
//! names.

use chrono::{DateTime, Utc};
use tracing::debug;

use stockwire_core::types::{EventCategory, NotificationEvent, RawEvent};

use crate::table::EventTable;

/// Stateful normalizer for one client session.
///
/// Holds the compiled event table and the last stamped timestamp, so
/// `received_at` is monotonically non-decreasing within the session even if
/// the local clock steps backwards.
#[derive(Debug)]
pub struct Normalizer {
    table: EventTable,
    last_stamped: Option<DateTime<Utc>>,
}

impl Normalizer {
    pub fn new(table: EventTable) -> Self {
        Self {
            table,
            last_stamped: None,
        }
    }

    /// Normalizer over the built-in warehouse tables.
    pub fn warehouse() -> Self {
        Self::new(EventTable::warehouse())
    }

    pub fn table(&self) -> &EventTable {
        &self.table
    }

    /// Normalizes a raw event, stamping the current local clock.
    pub fn normalize(&mut self, raw: RawEvent) -> NotificationEvent {
        self.normalize_at(raw, Utc::now())
    }

    /// Normalizes a raw event with an injected clock reading.
    ///
    /// The stamp is clamped against the previous event so timestamps never
    /// decrease within one session.
    pub fn normalize_at(&mut self, raw: RawEvent, now: DateTime<Utc>) -> NotificationEvent {
        let category = self.table.classify(&raw.name);
        if category == EventCategory::Unclassified {
            debug!(event = %raw.name, "unrecognized event name, delivering as unclassified");
        }

        let received_at = match self.last_stamped {
            Some(prev) if now < prev => prev,
            _ => now,
        };
        self.last_stamped = Some(received_at);

        NotificationEvent {
            event_type: raw.name,
            category,
            data: raw.payload,
            received_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use proptest::prelude::*;

    use super::*;
    use crate::table::{Matcher, WAREHOUSE_MATCHERS};

    fn raw(name: &str) -> RawEvent {
        RawEvent {
            name: name.to_string(),
            channel: Some("private-notifications-STAFF-42".to_string()),
            payload: serde_json::json!({"id": 1007}),
        }
    }

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    #[test]
    fn fixed_event_keeps_name_as_type() {
        let mut normalizer = Normalizer::warehouse();
        let event = normalizer.normalize_at(raw("import-order-assigned"), at(0));
        assert_eq!(event.event_type, "import-order-assigned");
        assert_eq!(event.category, EventCategory::Fixed);
        assert_eq!(event.data["id"], 1007);
    }

    #[test]
    fn prefix_event_is_classified() {
        let mut normalizer = Normalizer::warehouse();
        let event = normalizer.normalize_at(raw("import-order-ready-to-store-1007"), at(0));
        assert_eq!(event.category, EventCategory::Prefix);
    }

    #[test]
    fn unknown_event_names_are_published_not_dropped() {
        // Fail-open by design: a backend naming typo surfaces as a
        // legitimate unclassified event instead of disappearing.
        let mut normalizer = Normalizer::warehouse();
        let event = normalizer.normalize_at(raw("some-future-event-xyz"), at(0));
        assert_eq!(event.category, EventCategory::Unclassified);
        assert_eq!(event.event_type, "some-future-event-xyz");
        assert_eq!(event.data["id"], 1007);
    }

    #[test]
    fn timestamps_never_decrease() {
        let mut normalizer = Normalizer::warehouse();
        let first = normalizer.normalize_at(raw("import-order-done"), at(10));
        // Clock steps backwards; the stamp is clamped to the previous one.
        let second = normalizer.normalize_at(raw("export-order-done"), at(5));
        let third = normalizer.normalize_at(raw("notification-created"), at(20));

        assert_eq!(first.received_at, at(10));
        assert_eq!(second.received_at, at(10));
        assert_eq!(third.received_at, at(20));
    }

    proptest! {
        #[test]
        fn any_prefix_suffix_combination_classifies_prefix(suffix in "[a-z0-9]{1,12}") {
            let mut normalizer = Normalizer::warehouse();
            for matcher in WAREHOUSE_MATCHERS {
                if let Matcher::Prefix(prefix) = matcher {
                    let name = format!("{prefix}-{suffix}");
                    let event = normalizer.normalize_at(raw(&name), at(0));
                    prop_assert_eq!(event.category, EventCategory::Prefix);
                }
            }
        }

        #[test]
        fn normalization_never_loses_an_event(name in "[a-z][a-z0-9-]{0,40}") {
            let mut normalizer = Normalizer::warehouse();
            let event = normalizer.normalize_at(raw(&name), at(0));
            prop_assert_eq!(event.event_type, name);
        }
    }
}
