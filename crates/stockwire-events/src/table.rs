// SPDX-FileCopyrightText: 2026 Stockwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Precompiled event name matchers.
//!
//! The fixed and prefix tables are a versioned contract with the backend:
//! a new backend event type needs an entry in one of the two tables to be
//! classified, otherwise it is delivered as unclassified.

use std::collections::HashSet;

use stockwire_core::types::EventCategory;

/// A single entry in the event table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matcher {
    /// Matched by exact string equality.
    Exact(&'static str),
    /// Matched as `<prefix>-<entityId>` for a non-empty entity id.
    Prefix(&'static str),
}

/// The warehouse event tables.
///
/// Prefixes must stay mutually non-overlapping: no prefix may extend another
/// prefix across a `-` boundary. [`EventTable::new`] checks this in debug
/// builds.
pub const WAREHOUSE_MATCHERS: &[Matcher] = &[
    Matcher::Exact("import-order-created"),
    Matcher::Exact("import-order-assigned"),
    Matcher::Exact("import-order-done"),
    Matcher::Exact("export-order-created"),
    Matcher::Exact("export-order-assigned"),
    Matcher::Exact("export-order-done"),
    Matcher::Exact("stock-count-requested"),
    Matcher::Exact("notification-created"),
    Matcher::Prefix("import-order-ready-to-store"),
    Matcher::Prefix("import-order-counted"),
    Matcher::Prefix("export-order-ready-to-pick"),
    Matcher::Prefix("export-order-picked"),
];

/// Compiled event tables: hash lookup for fixed names, ordered scan for
/// prefixes. Built once at startup, evaluated per event.
#[derive(Debug, Clone)]
pub struct EventTable {
    exact: HashSet<&'static str>,
    prefixes: Vec<&'static str>,
}

impl EventTable {
    /// Compiles a matcher list into a table.
    pub fn new(matchers: &[Matcher]) -> Self {
        let mut exact = HashSet::new();
        let mut prefixes = Vec::new();
        for matcher in matchers {
            match matcher {
                Matcher::Exact(name) => {
                    exact.insert(*name);
                }
                Matcher::Prefix(prefix) => prefixes.push(*prefix),
            }
        }
        debug_assert_prefixes_disjoint(&prefixes);
        Self { exact, prefixes }
    }

    /// The built-in warehouse tables.
    pub fn warehouse() -> Self {
        Self::new(WAREHOUSE_MATCHERS)
    }

    /// Classifies an event name: fixed names first (exact match), then
    /// prefixes (`<prefix>-<entityId>`), first match wins. Names matching
    /// neither table classify as [`EventCategory::Unclassified`] and are
    /// still delivered downstream.
    pub fn classify(&self, name: &str) -> EventCategory {
        if self.exact.contains(name) {
            return EventCategory::Fixed;
        }
        for prefix in &self.prefixes {
            if is_prefix_match(prefix, name) {
                return EventCategory::Prefix;
            }
        }
        EventCategory::Unclassified
    }
}

/// `name` is `<prefix>-<entityId>` with a non-empty entity id.
fn is_prefix_match(prefix: &str, name: &str) -> bool {
    name.len() > prefix.len() + 1
        && name.starts_with(prefix)
        && name.as_bytes()[prefix.len()] == b'-'
}

/// Checks the non-overlap invariant: no prefix extends another across a
/// `-` boundary, so first-match-wins never depends on table order.
fn debug_assert_prefixes_disjoint(prefixes: &[&str]) {
    if cfg!(debug_assertions) {
        for (i, a) in prefixes.iter().enumerate() {
            for b in prefixes.iter().skip(i + 1) {
                let overlap = a == b
                    || b.starts_with(&format!("{a}-"))
                    || a.starts_with(&format!("{b}-"));
                debug_assert!(!overlap, "overlapping event prefixes: `{a}` and `{b}`");
            }
        }
    }
}
