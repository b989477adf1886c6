// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Stable identity of a record inside one store.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RecordKey(String);

impl RecordKey {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Key used for records that arrive without an explicit `id`.
    pub fn from_index(index: usize) -> Self {
        Self(format!("#{index}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordKey {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for RecordKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<i64> for RecordKey {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

/// Hands out numeric keys that never collide with keys already in use.
///
/// Seeded from wall-clock milliseconds so keys look like the time-based ids
/// the backend produces, but strictly increasing even when two records are
/// created within the same millisecond.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyAllocator {
    next: i64,
}

impl KeyAllocator {
    pub const fn starting_at(next: i64) -> Self {
        Self { next }
    }

    pub fn from_clock() -> Self {
        let millis = time::OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
        Self::starting_at(i64::try_from(millis).unwrap_or(1))
    }

    pub fn allocate<'a, I>(&mut self, existing: I) -> RecordKey
    where
        I: IntoIterator<Item = &'a RecordKey>,
    {
        let used: BTreeSet<&str> = existing.into_iter().map(RecordKey::as_str).collect();
        loop {
            let candidate = RecordKey::from(self.next);
            self.next = self.next.saturating_add(1);
            if !used.contains(candidate.as_str()) {
                return candidate;
            }
        }
    }
}

impl Default for KeyAllocator {
    fn default() -> Self {
        Self::from_clock()
    }
}
