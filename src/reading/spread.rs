//! Reading types and the spread lookup table.
//!
//! Each reading type label maps to a fixed hand size and to the screen
//! the user returns to after the reading. Labels the table does not know
//! fall back to a single card and the home screen.

use std::sync::{Arc, OnceLock};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Hand size for labels missing from the table.
pub const DEFAULT_CARD_COUNT: usize = 1;

/// Label identifying which spread was requested (e.g. `"İLİŞKİ AÇILIMI"`).
///
/// Surrounding whitespace is dropped on construction, so `" AŞK AÇILIMI "`
/// and `"AŞK AÇILIMI"` are the same key.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct ReadingTypeKey(String);

impl ReadingTypeKey {
    /// Create a key from a label.
    #[must_use]
    pub fn new(label: impl AsRef<str>) -> Self {
        Self(label.as_ref().trim().to_string())
    }

    /// The normalized label.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ReadingTypeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ReadingTypeKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ReadingTypeKey {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<ReadingTypeKey> for String {
    fn from(key: ReadingTypeKey) -> Self {
        key.0
    }
}

/// Screen a finished reading navigates back to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParentScreen {
    /// General / daily readings.
    General,
    /// Love and relationship readings.
    Relationship,
    /// Career and finance readings.
    Career,
    /// Fallback for unmapped reading types.
    #[default]
    Home,
}

/// One spread definition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spread {
    pub label: ReadingTypeKey,
    /// Number of cards drawn. Always at least 1.
    pub card_count: usize,
    pub parent: ParentScreen,
}

impl Spread {
    /// Create a spread. A count of 0 is clamped to 1.
    #[must_use]
    pub fn new(label: impl Into<ReadingTypeKey>, card_count: usize, parent: ParentScreen) -> Self {
        Self {
            label: label.into(),
            card_count: card_count.max(1),
            parent,
        }
    }
}

/// Read-only reading type → spread table.
///
/// ## Example
///
/// ```
/// use tarot_flow::reading::{ParentScreen, SpreadTable};
///
/// let table = SpreadTable::standard();
/// assert_eq!(table.card_count(&"İLİŞKİ AÇILIMI".into()), 3);
/// assert_eq!(table.parent(&"FİNANSAL DURUM".into()), ParentScreen::Career);
///
/// // Unknown labels fall back
/// assert_eq!(table.card_count(&"XYZ".into()), 1);
/// assert_eq!(table.parent(&"XYZ".into()), ParentScreen::Home);
/// ```
#[derive(Clone, Debug, Default)]
pub struct SpreadTable {
    spreads: Vec<Spread>,
    by_label: FxHashMap<ReadingTypeKey, usize>,
}

impl SpreadTable {
    /// Start building a custom table.
    #[must_use]
    pub fn builder() -> SpreadTableBuilder {
        SpreadTableBuilder::default()
    }

    /// The built-in table, built once per process.
    #[must_use]
    pub fn standard() -> Arc<SpreadTable> {
        static STANDARD: OnceLock<Arc<SpreadTable>> = OnceLock::new();
        Arc::clone(STANDARD.get_or_init(|| {
            use ParentScreen::{Career, General, Relationship};
            Arc::new(
                SpreadTable::builder()
                    .spread("GÜNLÜK KART", 1, General)
                    .spread("EVET HAYIR", 1, General)
                    .spread("GEÇMİŞ ŞİMDİ GELECEK", 3, General)
                    .spread("KELTİK HAÇI", 10, General)
                    .spread("İLİŞKİ AÇILIMI", 3, Relationship)
                    .spread("AŞK AÇILIMI", 5, Relationship)
                    .spread("UYUM AÇILIMI", 7, Relationship)
                    .spread("DETAYLI İLİŞKİ AÇILIMI", 9, Relationship)
                    .spread("KARİYER AÇILIMI", 5, Career)
                    .spread("İŞ GÖRÜŞMESİ", 4, Career)
                    .spread("FİNANSAL DURUM", 6, Career)
                    .build(),
            )
        }))
    }

    /// Look up a spread.
    #[must_use]
    pub fn get(&self, key: &ReadingTypeKey) -> Option<&Spread> {
        self.by_label.get(key).map(|&i| &self.spreads[i])
    }

    /// Hand size for a reading type; unknown labels draw one card.
    #[must_use]
    pub fn card_count(&self, key: &ReadingTypeKey) -> usize {
        self.get(key).map_or(DEFAULT_CARD_COUNT, |s| s.card_count)
    }

    /// Parent screen for a reading type; unknown labels go home.
    #[must_use]
    pub fn parent(&self, key: &ReadingTypeKey) -> ParentScreen {
        self.get(key).map(|s| s.parent).unwrap_or_default()
    }

    /// Check if a label is in the table.
    #[must_use]
    pub fn contains(&self, key: &ReadingTypeKey) -> bool {
        self.by_label.contains_key(key)
    }

    /// Iterate spreads in definition order.
    pub fn iter(&self) -> impl Iterator<Item = &Spread> {
        self.spreads.iter()
    }

    /// Number of spreads.
    #[must_use]
    pub fn len(&self) -> usize {
        self.spreads.len()
    }

    /// Check if the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.spreads.is_empty()
    }
}

/// Builder for [`SpreadTable`]. A repeated label replaces the earlier entry.
#[derive(Debug, Default)]
pub struct SpreadTableBuilder {
    table: SpreadTable,
}

impl SpreadTableBuilder {
    /// Add a spread.
    #[must_use]
    pub fn spread(
        self,
        label: impl Into<ReadingTypeKey>,
        card_count: usize,
        parent: ParentScreen,
    ) -> Self {
        self.with(Spread::new(label, card_count, parent))
    }

    /// Add a prebuilt spread.
    #[must_use]
    pub fn with(mut self, spread: Spread) -> Self {
        let table = &mut self.table;
        match table.by_label.get(&spread.label) {
            Some(&i) => table.spreads[i] = spread,
            None => {
                table.by_label.insert(spread.label.clone(), table.spreads.len());
                table.spreads.push(spread);
            }
        }
        self
    }

    /// Finish the table.
    #[must_use]
    pub fn build(self) -> SpreadTable {
        self.table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_counts() {
        let table = SpreadTable::standard();

        assert_eq!(table.card_count(&"İLİŞKİ AÇILIMI".into()), 3);
        assert_eq!(table.card_count(&"DETAYLI İLİŞKİ AÇILIMI".into()), 9);
        assert_eq!(table.card_count(&"FİNANSAL DURUM".into()), 6);
        assert_eq!(table.card_count(&"KELTİK HAÇI".into()), 10);
        assert_eq!(table.len(), 11);
    }

    #[test]
    fn test_unknown_and_malformed_labels() {
        let table = SpreadTable::standard();

        assert_eq!(table.card_count(&"XYZ".into()), DEFAULT_CARD_COUNT);
        assert_eq!(table.card_count(&"".into()), DEFAULT_CARD_COUNT);
        // Case matters: labels are matched exactly
        assert_eq!(table.card_count(&"ilişki açılımı".into()), DEFAULT_CARD_COUNT);
        assert_eq!(table.parent(&"XYZ".into()), ParentScreen::Home);
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        let table = SpreadTable::standard();
        let key = ReadingTypeKey::new("  FİNANSAL DURUM \n");

        assert_eq!(key.as_str(), "FİNANSAL DURUM");
        assert_eq!(table.card_count(&key), 6);
    }

    #[test]
    fn test_parents() {
        let table = SpreadTable::standard();

        assert_eq!(table.parent(&"AŞK AÇILIMI".into()), ParentScreen::Relationship);
        assert_eq!(table.parent(&"İŞ GÖRÜŞMESİ".into()), ParentScreen::Career);
        assert_eq!(table.parent(&"GÜNLÜK KART".into()), ParentScreen::General);
    }

    #[test]
    fn test_builder_clamps_and_replaces() {
        let table = SpreadTable::builder()
            .spread("career-5", 5, ParentScreen::Career)
            .spread("empty", 0, ParentScreen::General)
            .spread("career-5", 4, ParentScreen::Career)
            .build();

        assert_eq!(table.len(), 2);
        assert_eq!(table.card_count(&"empty".into()), 1);
        assert_eq!(table.card_count(&"career-5".into()), 4);

        let labels: Vec<_> = table.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["career-5", "empty"]);
    }

    #[test]
    fn test_key_serde_normalizes() {
        let key: ReadingTypeKey = serde_json::from_str("\" AŞK AÇILIMI \"").unwrap();
        assert_eq!(key.as_str(), "AŞK AÇILIMI");
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"AŞK AÇILIMI\"");
    }
}
