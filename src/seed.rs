//! Fish seeds as handed out by the backend.
//!
//! A seed is opaque, but in practice it is a UUIDv7 string: the generator folds
//! its characters into a PRNG seed, and the leading 48 bits carry the creation
//! time in milliseconds.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Seed(String);

impl Seed {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// PRNG seed: sum of the UTF-16 code units.
    ///
    /// Order-insensitive, so anagrams collide ("ab" and "ba" give the same
    /// fish). Kept as-is; changing it would re-roll every existing fish.
    pub fn value(&self) -> u64 {
        fold(&self.0)
    }

    /// Millisecond timestamp from the first 48 bits, if the seed is a UUID.
    pub fn timestamp_ms(&self) -> Option<u64> {
        let uuid = Uuid::parse_str(&self.0).ok()?;
        let bytes = uuid.as_bytes();
        let ms = bytes[..6]
            .iter()
            .fold(0u64, |acc, b| (acc << 8) | u64::from(*b));
        Some(ms)
    }

    /// Best-effort creation time. Not authoritative: nothing checks the UUID
    /// version, so a v4 seed yields a meaningless date.
    pub fn spawned_at(&self) -> Option<DateTime<Utc>> {
        let ms = i64::try_from(self.timestamp_ms()?).ok()?;
        DateTime::from_timestamp_millis(ms)
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Seed {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for Seed {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

pub(crate) fn fold(raw: &str) -> u64 {
    raw.encode_utf16().map(u64::from).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_sums_code_units() {
        assert_eq!(Seed::from("").value(), 0);
        assert_eq!(Seed::from("a").value(), 97);
        assert_eq!(Seed::from("00000000-0000-7000-8000-000000000000").value(), 1731);
    }

    #[test]
    fn value_counts_surrogate_pairs_as_two_units() {
        // U+1F41F FISH is the pair D83D DC1F in UTF-16.
        assert_eq!(Seed::from("\u{1F41F}").value(), 0xD83D + 0xDC1F);
    }

    #[test]
    fn anagrams_collide() {
        assert_eq!(Seed::from("ab").value(), Seed::from("ba").value());
    }

    #[test]
    fn timestamp_from_uuid_v7_prefix() {
        let seed = Seed::from("0190a6e4-1c2b-7d3e-9f40-5a6b7c8d9e0f");
        assert_eq!(seed.timestamp_ms(), Some(0x0190_a6e4_1c2b));
        let at = seed.spawned_at().expect("valid timestamp");
        assert_eq!(at.timestamp_millis(), 0x0190_a6e4_1c2b);
    }

    #[test]
    fn non_uuid_has_no_timestamp() {
        assert_eq!(Seed::from("fish-16").timestamp_ms(), None);
        assert!(Seed::from("").spawned_at().is_none());
    }
}
