//! Object keys - `<timestamp>-inventory-item-<productID>`
//!
//! timestamp は固定幅（ゼロ埋め）なので、キーは辞書順 = 作成時刻順になる。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ulid::Ulid;

use super::product::ProductId;

/// Literal segment identifying the record type.
pub const RECORD_SEGMENT: &str = "inventory-item";

const SECONDS_FORMAT: &str = "%Y%m%d%H%M%S";
const MILLIS_FORMAT: &str = "%Y%m%d%H%M%S%3f";

/// The key a payload is stored under.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectKey(String);

impl ObjectKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<ObjectKey> for String {
    fn from(key: ObjectKey) -> Self {
        key.0
    }
}

/// How much of the clock (and whether a random token) goes into the key.
///
/// - `Seconds`: `YYYYMMDDHHMMSS` — 同一秒・同一商品は同じキー（last-write-wins）
/// - `Millis`: `YYYYMMDDHHMMSSmmm`
/// - `Unique`: `YYYYMMDDHHMMSS-<ULID>` — 同一秒でも上書きしない
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyStrategy {
    #[default]
    Seconds,
    Millis,
    Unique,
}

/// KeyDeriver は (時刻, ProductId) から ObjectKey を作る純粋関数
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyDeriver {
    strategy: KeyStrategy,
}

impl KeyDeriver {
    pub fn new(strategy: KeyStrategy) -> Self {
        Self { strategy }
    }

    pub fn strategy(&self) -> KeyStrategy {
        self.strategy
    }

    /// Derive a key without a uniqueness token.
    ///
    /// `Unique` strategy falls back to the seconds prefix here; use
    /// [`KeyDeriver::derive_unique`] to include the token.
    pub fn derive(&self, at: DateTime<Utc>, product_id: &ProductId) -> ObjectKey {
        let prefix = match self.strategy {
            KeyStrategy::Millis => at.format(MILLIS_FORMAT),
            KeyStrategy::Seconds | KeyStrategy::Unique => at.format(SECONDS_FORMAT),
        };
        ObjectKey(format!("{prefix}-{RECORD_SEGMENT}-{product_id}"))
    }

    /// Derive a key with a token between the timestamp and the record segment.
    pub fn derive_unique(
        &self,
        at: DateTime<Utc>,
        token: Ulid,
        product_id: &ProductId,
    ) -> ObjectKey {
        let prefix = at.format(SECONDS_FORMAT);
        ObjectKey(format!("{prefix}-{token}-{RECORD_SEGMENT}-{product_id}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use rstest::rstest;

    fn sku(s: &str) -> ProductId {
        ProductId::new(s).unwrap()
    }

    #[test]
    fn seconds_key_has_documented_format() {
        let at = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let key = KeyDeriver::default().derive(at, &sku("sku-42"));
        assert_eq!(key.as_str(), "20240102030405-inventory-item-sku-42");
    }

    #[test]
    fn year_is_zero_padded_to_four_digits() {
        let at = Utc.with_ymd_and_hms(999, 12, 31, 23, 59, 59).unwrap();
        let key = KeyDeriver::default().derive(at, &sku("a"));
        assert_eq!(key.as_str(), "09991231235959-inventory-item-a");
    }

    #[test]
    fn millis_key_appends_three_digits() {
        let at = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap() + Duration::milliseconds(7);
        let key = KeyDeriver::new(KeyStrategy::Millis).derive(at, &sku("sku-42"));
        assert_eq!(key.as_str(), "20240102030405007-inventory-item-sku-42");
    }

    #[test]
    fn unique_key_embeds_token() {
        let at = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let token = Ulid::from_parts(at.timestamp_millis() as u64, 42);
        let key = KeyDeriver::new(KeyStrategy::Unique).derive_unique(at, token, &sku("sku-42"));
        assert_eq!(
            key.as_str(),
            format!("20240102030405-{token}-inventory-item-sku-42")
        );
    }

    #[test]
    fn derive_is_deterministic() {
        let at = Utc.with_ymd_and_hms(2030, 6, 15, 8, 0, 0).unwrap();
        let deriver = KeyDeriver::default();
        assert_eq!(deriver.derive(at, &sku("x")), deriver.derive(at, &sku("x")));
    }

    #[test]
    fn same_second_same_product_collides() {
        let at = Utc.with_ymd_and_hms(2030, 6, 15, 8, 0, 0).unwrap();
        let deriver = KeyDeriver::default();
        let later_in_second = at + Duration::milliseconds(900);
        assert_eq!(deriver.derive(at, &sku("x")), deriver.derive(later_in_second, &sku("x")));
    }

    #[rstest]
    #[case::seconds(KeyStrategy::Seconds, Duration::seconds(1))]
    #[case::seconds_across_year(KeyStrategy::Seconds, Duration::days(400))]
    #[case::millis(KeyStrategy::Millis, Duration::milliseconds(1))]
    fn increasing_time_gives_increasing_keys(
        #[case] strategy: KeyStrategy,
        #[case] step: Duration,
    ) {
        let deriver = KeyDeriver::new(strategy);
        let mut at = Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 58).unwrap();
        let mut prev = deriver.derive(at, &sku("sku-42"));
        for _ in 0..5 {
            at += step;
            let next = deriver.derive(at, &sku("sku-42"));
            assert!(prev < next, "{prev} should sort before {next}");
            prev = next;
        }
    }

    #[rstest]
    #[case::seconds(KeyStrategy::Seconds)]
    #[case::millis(KeyStrategy::Millis)]
    #[case::unique(KeyStrategy::Unique)]
    fn every_strategy_keeps_the_record_suffix(#[case] strategy: KeyStrategy) {
        let at = Utc.with_ymd_and_hms(2024, 5, 5, 5, 5, 5).unwrap();
        let deriver = KeyDeriver::new(strategy);
        let key = match strategy {
            KeyStrategy::Unique => deriver.derive_unique(at, Ulid::new(), &sku("p-1")),
            _ => deriver.derive(at, &sku("p-1")),
        };
        assert!(key.as_str().ends_with("-inventory-item-p-1"));
        assert!(key.as_str().starts_with("20240505050505"));
    }
}
