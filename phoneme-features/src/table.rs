//! Symbol tables of source phonemes.
//!
//! A table is loaded once, from JSON of the form
//!
//! ```text
//! {
//!   "m": { "name": "voiced bilabial nasal",
//!          "features": { "syllabic": false, "nasal": true, "round": 0, ... } },
//!   ...
//! }
//! ```
//!
//! and is read-only afterwards. Key order in the file is preserved, and a
//! repeated key at either level is reported instead of overwriting the
//! earlier entry.

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::path::Path;

use crate::error::{PhonemeError, Result};
use crate::phoneme::Phoneme;
use crate::similarity::pick_closest;

/// JSON object read as its raw `(key, value)` entries, duplicates included.
struct Entries<T>(Vec<(String, T)>);

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Entries<T> {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EntriesVisitor<T>(PhantomData<T>);

        impl<'de, T: Deserialize<'de>> Visitor<'de> for EntriesVisitor<T> {
            type Value = Entries<T>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a JSON object")
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, T>()? {
                    entries.push(entry);
                }
                Ok(Entries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor(PhantomData))
    }
}

fn feature_entries<'de, D>(
    deserializer: D,
) -> std::result::Result<Vec<(String, Value)>, D::Error>
where
    D: Deserializer<'de>,
{
    Entries::deserialize(deserializer).map(|entries| entries.0)
}

/// One entry of a phoneme table, before normalization.
#[derive(Debug, Clone, Deserialize)]
pub struct PhonemeRecord {
    /// Human-readable name.
    pub name: String,
    /// Raw feature values (`true`, `false`, `0` or `"±"`) in file order.
    #[serde(deserialize_with = "feature_entries")]
    pub features: Vec<(String, Value)>,
}

/// JSON source of [`PhonemeTable::bundled`]: 23 IPA segments, 19 features.
pub const BUNDLED_TABLE: &str = include_str!("../data/phonemes.json");

/// Source phonemes keyed by symbol, in load order.
#[derive(Debug, Clone, Default)]
pub struct PhonemeTable {
    phonemes: Vec<Phoneme>,
    index: HashMap<String, usize>,
}

impl PhonemeTable {
    /// Build a table from `(symbol, record)` pairs.
    ///
    /// # Errors
    ///
    /// Fails on the first malformed record or repeated symbol; no partial
    /// table is returned.
    pub fn from_records<I, S>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, PhonemeRecord)>,
        S: Into<String>,
    {
        let mut table = Self::default();
        for (symbol, record) in records {
            let symbol = symbol.into();
            if table.index.contains_key(&symbol) {
                return Err(PhonemeError::DuplicateSymbol(symbol));
            }
            let phoneme = Phoneme::new(symbol.clone(), record.name, record.features)?;
            table.index.insert(symbol, table.phonemes.len());
            table.phonemes.push(phoneme);
        }
        Ok(table)
    }

    /// Parse a table from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns `PhonemeError::Json` for malformed JSON or records,
    /// `PhonemeError::DuplicateSymbol` or `PhonemeError::DuplicateFeature`
    /// for a repeated key, and the parse error of the first bad feature
    /// value.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let Entries(records) = serde_json::from_str::<Entries<PhonemeRecord>>(json)?;
        Self::from_records(records)
    }

    /// The IPA table shipped with this crate.
    ///
    /// # Errors
    ///
    /// As [`PhonemeTable::from_json_str`].
    pub fn bundled() -> Result<Self> {
        Self::from_json_str(BUNDLED_TABLE)
    }

    /// Load a table from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns `PhonemeError::Io` if the file cannot be read, otherwise as
    /// [`PhonemeTable::from_json_str`].
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let table = Self::from_json_str(&content)?;
        tracing::info!("Loaded {} phonemes from {:?}", table.len(), path);
        Ok(table)
    }

    /// Look up a phoneme by symbol.
    ///
    /// # Errors
    ///
    /// Returns `PhonemeError::SymbolNotFound` carrying the symbol.
    pub fn get(&self, symbol: &str) -> Result<&Phoneme> {
        self.index
            .get(symbol)
            .map(|&i| &self.phonemes[i])
            .ok_or_else(|| PhonemeError::SymbolNotFound(symbol.to_string()))
    }

    /// Check if a symbol is in the table.
    #[must_use]
    pub fn contains(&self, symbol: &str) -> bool {
        self.index.contains_key(symbol)
    }

    /// Number of phonemes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.phonemes.len()
    }

    /// Check if the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.phonemes.is_empty()
    }

    /// Iterate over phonemes in load order.
    pub fn iter(&self) -> impl Iterator<Item = &Phoneme> + '_ {
        self.phonemes.iter()
    }

    /// The phoneme most similar to `symbol`, excluding itself.
    ///
    /// # Errors
    ///
    /// Returns `PhonemeError::SymbolNotFound` for an unknown symbol and
    /// `PhonemeError::EmptyInput` if the table has no other phoneme.
    pub fn closest(&self, symbol: &str) -> Result<&Phoneme> {
        let target = self.get(symbol)?;
        pick_closest(target, self.iter().filter(|p| p.symbol() != symbol))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::FeatureState;

    const TABLE: &str = r#"{
        "p": { "name": "voiceless bilabial plosive",
               "features": { "voice": false, "nasal": false, "labial": true, "round": 0 } },
        "b": { "name": "voiced bilabial plosive",
               "features": { "voice": true, "nasal": false, "labial": true, "round": 0 } },
        "m": { "name": "voiced bilabial nasal",
               "features": { "voice": true, "nasal": true, "labial": true, "round": 0 } },
        "w": { "name": "labial-velar approximant",
               "features": { "voice": true, "nasal": false, "labial": true, "round": "±" } }
    }"#;

    #[test]
    fn test_load_preserves_order() {
        let table = PhonemeTable::from_json_str(TABLE).unwrap();
        assert_eq!(table.len(), 4);
        let symbols: Vec<_> = table.iter().map(Phoneme::symbol).collect();
        assert_eq!(symbols, ["p", "b", "m", "w"]);

        let w = table.get("w").unwrap();
        assert_eq!(w.name(), "labial-velar approximant");
        assert_eq!(w.features().get("round"), Some(FeatureState::Both));
        assert_eq!(
            w.features().names().collect::<Vec<_>>(),
            ["voice", "nasal", "labial", "round"]
        );
    }

    #[test]
    fn test_unknown_symbol() {
        let table = PhonemeTable::from_json_str(TABLE).unwrap();
        assert!(!table.contains("ʘ"));
        match table.get("ʘ") {
            Err(PhonemeError::SymbolNotFound(symbol)) => assert_eq!(symbol, "ʘ"),
            other => panic!("expected SymbolNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_bad_value_aborts_load() {
        let json = r#"{
            "p": { "name": "p", "features": { "voice": false } },
            "x": { "name": "x", "features": { "voice": "sometimes" } }
        }"#;
        assert!(matches!(
            PhonemeTable::from_json_str(json),
            Err(PhonemeError::Parse { .. })
        ));
    }

    #[test]
    fn test_missing_name_is_json_error() {
        let json = r#"{ "p": { "features": { "voice": false } } }"#;
        assert!(matches!(
            PhonemeTable::from_json_str(json),
            Err(PhonemeError::Json(_))
        ));
    }

    #[test]
    fn test_duplicate_symbol_in_records() {
        let record = PhonemeRecord {
            name: "p".to_string(),
            features: Vec::new(),
        };
        let result = PhonemeTable::from_records([("p", record.clone()), ("p", record)]);
        assert!(matches!(result, Err(PhonemeError::DuplicateSymbol(s)) if s == "p"));
    }

    #[test]
    fn test_repeated_symbol_in_json() {
        let json = r#"{
            "p": { "name": "first p", "features": { "voice": false } },
            "p": { "name": "second p", "features": { "voice": false } }
        }"#;
        match PhonemeTable::from_json_str(json) {
            Err(PhonemeError::DuplicateSymbol(symbol)) => assert_eq!(symbol, "p"),
            other => panic!("expected DuplicateSymbol, got {other:?}"),
        }
    }

    #[test]
    fn test_repeated_feature_in_json() {
        let json = r#"{ "p": { "name": "p", "features": { "voice": false, "voice": true } } }"#;
        match PhonemeTable::from_json_str(json) {
            Err(PhonemeError::DuplicateFeature(feature)) => assert_eq!(feature, "voice"),
            other => panic!("expected DuplicateFeature, got {other:?}"),
        }
    }

    #[test]
    fn test_bad_value_not_hidden_by_later_duplicate() {
        let json = r#"{
            "p": { "name": "p", "features": { "voice": false, "voice": "maybe", "voice": true } }
        }"#;
        match PhonemeTable::from_json_str(json) {
            Err(PhonemeError::Parse { feature, value }) => {
                assert_eq!(feature, "voice");
                assert_eq!(value, "\"maybe\"");
            }
            other => panic!("expected Parse, got {other:?}"),
        }
    }

    #[test]
    fn test_top_level_must_be_object() {
        assert!(matches!(
            PhonemeTable::from_json_str("[1, 2]"),
            Err(PhonemeError::Json(_))
        ));
    }

    #[test]
    fn test_bundled_table_loads() {
        let table = PhonemeTable::bundled().unwrap();
        assert_eq!(table.len(), 23);
        assert_eq!(table.iter().next().map(Phoneme::symbol), Some("p"));
    }

    #[test]
    fn test_closest_excludes_self() {
        let table = PhonemeTable::from_json_str(TABLE).unwrap();
        // p, m and w all differ from b in one feature; load order breaks the tie
        assert_eq!(table.closest("b").unwrap().symbol(), "p");
        assert_eq!(table.closest("m").unwrap().symbol(), "b");
        assert_eq!(table.closest("p").unwrap().symbol(), "b");
    }

    #[test]
    fn test_closest_single_entry_table() {
        let json = r#"{ "p": { "name": "p", "features": { "voice": false } } }"#;
        let table = PhonemeTable::from_json_str(json).unwrap();
        assert!(matches!(
            table.closest("p"),
            Err(PhonemeError::EmptyInput(_))
        ));
    }
}
