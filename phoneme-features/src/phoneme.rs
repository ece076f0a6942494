//! Phonemes: feature vectors with identity and provenance.
//!
//! A *source* phoneme comes straight from a phoneme table. A *composite*
//! phoneme is produced by [`crate::intersect`] and carries the symbols of
//! every source phoneme that contributed to it.

use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::Result;
use crate::feature::{FeatureSource, FeatureVector};

/// Name given to every composite phoneme.
pub const PARTIAL_PHONEME_NAME: &str = "partial phoneme";

/// Separator between parent symbols in a composite phoneme's symbol.
pub const SYMBOL_SEPARATOR: &str = "/";

/// The source symbols that contributed to a phoneme.
///
/// Symbols behave as a set (kept sorted, so the composite symbol is stable).
/// Each symbol also carries a weight: merging two provenances that share a
/// symbol adds the two weights together. Weights only feed
/// [`Phoneme::strength`]; membership tests ignore them.
///
/// # Examples
///
/// ```
/// use phoneme_features::Provenance;
///
/// let kg = Provenance::source("k").merge(&Provenance::source("g"));
/// let kgk = kg.merge(&Provenance::source("k"));
///
/// assert_eq!(kgk.symbols().collect::<Vec<_>>(), ["g", "k"]);
/// assert_eq!(kgk.weight("k"), 2);
/// assert_eq!(kgk.total_weight(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Provenance {
    weights: BTreeMap<String, u32>,
}

impl Provenance {
    /// Provenance of a source phoneme: its own symbol with weight 1.
    #[must_use]
    pub fn source(symbol: impl Into<String>) -> Self {
        let mut weights = BTreeMap::new();
        weights.insert(symbol.into(), 1);
        Self { weights }
    }

    /// Union of two provenances, summing weights of shared symbols.
    #[must_use]
    pub fn merge(&self, other: &Self) -> Self {
        let mut weights = self.weights.clone();
        for (symbol, weight) in &other.weights {
            *weights.entry(symbol.clone()).or_insert(0) += weight;
        }
        Self { weights }
    }

    /// Check if a symbol contributed.
    #[must_use]
    pub fn contains(&self, symbol: &str) -> bool {
        self.weights.contains_key(symbol)
    }

    /// Check if every symbol of `other` also contributed here.
    #[must_use]
    pub fn is_superset(&self, other: &Self) -> bool {
        other.weights.keys().all(|symbol| self.contains(symbol))
    }

    /// Contributing symbols in sorted order.
    pub fn symbols(&self) -> impl Iterator<Item = &str> + Clone + '_ {
        self.weights.keys().map(String::as_str)
    }

    /// Weight of a symbol, 0 if it did not contribute.
    #[must_use]
    pub fn weight(&self, symbol: &str) -> u32 {
        self.weights.get(symbol).copied().unwrap_or(0)
    }

    /// Sum of all weights.
    #[must_use]
    pub fn total_weight(&self) -> u32 {
        self.weights.values().sum()
    }

    /// Number of distinct symbols.
    #[must_use]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Check if no symbol contributed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Symbols joined with `/`, e.g. `g/k`.
    #[must_use]
    pub fn joined(&self) -> String {
        self.symbols().collect::<Vec<_>>().join(SYMBOL_SEPARATOR)
    }
}

/// A speech sound described by its phonological features.
///
/// Phonemes are immutable. Equality and hashing compare only the feature
/// vectors: two phonemes with the same features are the same sound, whatever
/// their symbols or provenance.
///
/// # Examples
///
/// ```
/// use phoneme_features::Phoneme;
/// use serde_json::json;
///
/// let m = Phoneme::new("m", "voiced bilabial nasal", vec![
///     ("nasal", json!(true)),
///     ("voice", json!(true)),
///     ("continuant", json!(false)),
/// ]).unwrap();
///
/// assert!(m.is_complete());
/// assert_eq!(m.parent_similarity(), 1.0);
/// assert_eq!(m.positive_features().collect::<Vec<_>>(), ["nasal", "voice"]);
/// ```
#[derive(Debug, Clone)]
pub struct Phoneme {
    symbol: String,
    name: String,
    features: FeatureVector,
    is_complete: bool,
    parents: Provenance,
    parent_similarity: f64,
}

impl Phoneme {
    /// Create a source phoneme.
    ///
    /// `features` may be a raw record or an already-normalized
    /// [`FeatureVector`].
    ///
    /// # Errors
    ///
    /// Returns the parse error of a malformed raw record.
    pub fn new(
        symbol: impl Into<String>,
        name: impl Into<String>,
        features: impl FeatureSource,
    ) -> Result<Self> {
        let symbol = symbol.into();
        Ok(Self {
            parents: Provenance::source(symbol.clone()),
            symbol,
            name: name.into(),
            features: FeatureVector::parse(features)?,
            is_complete: true,
            parent_similarity: 1.0,
        })
    }

    /// Create a composite phoneme from merged provenance.
    pub(crate) fn composite(
        features: FeatureVector,
        parents: Provenance,
        parent_similarity: f64,
    ) -> Self {
        Self {
            symbol: parents.joined(),
            name: PARTIAL_PHONEME_NAME.to_string(),
            features,
            is_complete: false,
            parents,
            parent_similarity,
        }
    }

    /// The phoneme's symbol; `a/b/...` for composites.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Human-readable name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The normalized feature vector.
    #[must_use]
    pub fn features(&self) -> &FeatureVector {
        &self.features
    }

    /// `true` for source phonemes, `false` for composites.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.is_complete
    }

    /// The source phonemes that contributed to this one.
    #[must_use]
    pub fn parents(&self) -> &Provenance {
        &self.parents
    }

    /// Similarity of the two operands when this phoneme was merged; 1.0 for
    /// source phonemes.
    #[must_use]
    pub fn parent_similarity(&self) -> f64 {
        self.parent_similarity
    }

    /// Merge confidence weighted by how many times parents contributed.
    #[must_use]
    pub fn strength(&self) -> f64 {
        self.parent_similarity * f64::from(self.parents.total_weight())
    }

    /// Number of features.
    #[must_use]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Check if the phoneme has no features (an empty intersection).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Names of features that are `Positive` or `Both`, in stored order.
    ///
    /// The iterator is lazy and can be cloned to restart it.
    pub fn positive_features(&self) -> impl Iterator<Item = &str> + Clone + '_ {
        self.features
            .iter()
            .filter(|(_, state)| state.is_present())
            .map(|(name, _)| name)
    }
}

impl PartialEq for Phoneme {
    fn eq(&self, other: &Self) -> bool {
        self.features == other.features
    }
}

impl Eq for Phoneme {}

impl Hash for Phoneme {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.features.hash(state);
    }
}

impl fmt::Display for Phoneme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.symbol)
    }
}
