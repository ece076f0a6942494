//! Ternary phonological feature values and normalized feature vectors.
//!
//! A phonological feature takes one of four states:
//! - `Positive` (`+`): the property holds
//! - `Negative` (`-`): the property does not hold
//! - `Both` (`±`): the property contrasts within the category
//! - `Unspecified` (`0`): the property does not apply

use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::{PhonemeError, Result};

/// Marker used in phoneme tables for a contrastive (`±`) feature.
pub const BOTH_MARKER: &str = "±";

/// The state of one phonological feature.
///
/// # Representation
///
/// | Variant       | Symbol | Raw table value |
/// |---------------|--------|-----------------|
/// | `Positive`    | `+`    | `true`          |
/// | `Negative`    | `-`    | `false`         |
/// | `Both`        | `±`    | `"±"`           |
/// | `Unspecified` | `0`    | `0`             |
///
/// # Examples
///
/// ```
/// use phoneme_features::FeatureState;
/// use serde_json::json;
///
/// assert_eq!(FeatureState::parse("voice", &json!(true)).unwrap(), FeatureState::Positive);
/// assert_eq!(FeatureState::parse("voice", &json!("±")).unwrap(), FeatureState::Both);
/// assert!(FeatureState::parse("voice", &json!(2)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FeatureState {
    /// The feature holds (`+`).
    Positive,
    /// The feature does not hold (`-`).
    Negative,
    /// The feature contrasts within the category (`±`).
    Both,
    /// The feature does not apply (`0`).
    Unspecified,
}

impl FeatureState {
    /// Normalize a raw table value.
    ///
    /// # Errors
    ///
    /// Returns `PhonemeError::Parse` naming the feature and the value if the
    /// value is not `true`, `false`, the integer `0` or `"±"`.
    pub fn parse(feature: &str, value: &Value) -> Result<Self> {
        match value {
            Value::Bool(true) => Ok(Self::Positive),
            Value::Bool(false) => Ok(Self::Negative),
            Value::Number(n) if n.as_i64() == Some(0) => Ok(Self::Unspecified),
            Value::String(s) if s == BOTH_MARKER => Ok(Self::Both),
            other => Err(PhonemeError::Parse {
                feature: feature.to_string(),
                value: other.to_string(),
            }),
        }
    }

    /// Check if the state is `Positive`.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        matches!(self, Self::Positive)
    }

    /// Check if the state is `Both`.
    #[must_use]
    pub const fn is_both(self) -> bool {
        matches!(self, Self::Both)
    }

    /// Check if the state is `Unspecified`.
    #[must_use]
    pub const fn is_unspecified(self) -> bool {
        matches!(self, Self::Unspecified)
    }

    /// Check if the feature is (at least partly) present: `Positive` or `Both`.
    #[must_use]
    pub const fn is_present(self) -> bool {
        matches!(self, Self::Positive | Self::Both)
    }

    /// Score how well two states agree.
    ///
    /// Truth table (showing `self.agreement(other)`):
    /// ```text
    ///      |  +    -    ±    0    (other)
    /// -----+--------------------
    ///   +  | 1.0  0    0.5  0
    ///   -  | 0    1.0  0.5  0
    ///   ±  | 0.5  0.5  1.0  0
    ///   0  | 0    0    0    1.0
    /// ```
    ///
    /// # Examples
    ///
    /// ```
    /// use phoneme_features::FeatureState;
    ///
    /// assert_eq!(FeatureState::Both.agreement(FeatureState::Negative), 0.5);
    /// assert_eq!(FeatureState::Both.agreement(FeatureState::Unspecified), 0.0);
    /// ```
    #[must_use]
    pub fn agreement(self, other: Self) -> f64 {
        match (self, other) {
            (a, b) if a == b => 1.0,
            (Self::Unspecified, _) | (_, Self::Unspecified) => 0.0,
            (Self::Both, _) | (_, Self::Both) => 0.5,
            _ => 0.0,
        }
    }

    /// The table symbol for this state.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Positive => "+",
            Self::Negative => "-",
            Self::Both => BOTH_MARKER,
            Self::Unspecified => "0",
        }
    }
}

impl fmt::Display for FeatureState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// An immutable, normalized map from feature name to [`FeatureState`].
///
/// Iteration follows the order in which features were supplied. Equality and
/// hashing only look at the key/state pairs, never at their order.
///
/// # Examples
///
/// ```
/// use phoneme_features::{FeatureState, FeatureVector};
///
/// let a = FeatureVector::from_states([
///     ("nasal", FeatureState::Positive),
///     ("voice", FeatureState::Negative),
/// ]).unwrap();
/// let b = FeatureVector::from_states([
///     ("voice", FeatureState::Negative),
///     ("nasal", FeatureState::Positive),
/// ]).unwrap();
///
/// assert_eq!(a, b);
/// assert_eq!(a.names().collect::<Vec<_>>(), ["nasal", "voice"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FeatureVector {
    /// Features in supplied order.
    entries: Vec<(String, FeatureState)>,
    /// Same features keyed by name; backs lookup, equality and hashing.
    lookup: BTreeMap<String, FeatureState>,
}

impl FeatureVector {
    /// Create an empty feature vector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize any [`FeatureSource`] into a feature vector.
    ///
    /// A `FeatureVector` passes through unchanged.
    ///
    /// # Errors
    ///
    /// Propagates the source's parse error; no partial vector is produced.
    pub fn parse<S: FeatureSource>(source: S) -> Result<Self> {
        source.into_feature_vector()
    }

    /// Build a vector from already-normalized states.
    ///
    /// # Errors
    ///
    /// Returns `PhonemeError::DuplicateFeature` if a name repeats.
    pub fn from_states<I, S>(states: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, FeatureState)>,
        S: Into<String>,
    {
        let mut vector = Self::new();
        for (name, state) in states {
            vector.push(name.into(), state)?;
        }
        Ok(vector)
    }

    fn push(&mut self, name: String, state: FeatureState) -> Result<()> {
        if self.lookup.contains_key(&name) {
            return Err(PhonemeError::DuplicateFeature(name));
        }
        self.lookup.insert(name.clone(), state);
        self.entries.push((name, state));
        Ok(())
    }

    /// Number of features.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the vector has no features.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// State of a feature, if present.
    #[must_use]
    pub fn get(&self, feature: &str) -> Option<FeatureState> {
        self.lookup.get(feature).copied()
    }

    /// Check if a feature is present.
    #[must_use]
    pub fn contains(&self, feature: &str) -> bool {
        self.lookup.contains_key(feature)
    }

    /// Iterate over `(name, state)` pairs in stored order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, FeatureState)> + Clone + '_ {
        self.entries
            .iter()
            .map(|(name, state)| (name.as_str(), *state))
    }

    /// Iterate over feature names in stored order.
    pub fn names(&self) -> impl Iterator<Item = &str> + Clone + '_ {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Keep the pairs of `self` whose name and state both appear in `other`.
    ///
    /// The result follows `self`'s order.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        let mut shared = Self::new();
        for (name, state) in &self.entries {
            if other.get(name) == Some(*state) {
                shared.lookup.insert(name.clone(), *state);
                shared.entries.push((name.clone(), *state));
            }
        }
        shared
    }
}

impl PartialEq for FeatureVector {
    fn eq(&self, other: &Self) -> bool {
        self.lookup == other.lookup
    }
}

impl Eq for FeatureVector {}

impl Hash for FeatureVector {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.lookup.hash(state);
    }
}

impl fmt::Display for FeatureVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, (name, state)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{state}{name}")?;
        }
        f.write_str("]")
    }
}

/// Anything that can be normalized into a [`FeatureVector`].
///
/// This is the single parsing entry point used by [`crate::Phoneme::new`].
/// Raw table records and already-normalized vectors both implement it, so a
/// vector can be passed back through without being re-parsed.
pub trait FeatureSource {
    /// Convert into a normalized feature vector.
    ///
    /// # Errors
    ///
    /// Returns `PhonemeError::Parse` or `PhonemeError::DuplicateFeature` for
    /// malformed raw input.
    fn into_feature_vector(self) -> Result<FeatureVector>;
}

impl FeatureSource for FeatureVector {
    fn into_feature_vector(self) -> Result<FeatureVector> {
        Ok(self)
    }
}

impl FeatureSource for serde_json::Map<String, Value> {
    fn into_feature_vector(self) -> Result<FeatureVector> {
        let mut vector = FeatureVector::new();
        for (name, value) in self {
            let state = FeatureState::parse(&name, &value)?;
            vector.push(name, state)?;
        }
        Ok(vector)
    }
}

impl<S: Into<String>> FeatureSource for Vec<(S, Value)> {
    fn into_feature_vector(self) -> Result<FeatureVector> {
        let mut vector = FeatureVector::new();
        for (name, value) in self {
            let name = name.into();
            let state = FeatureState::parse(&name, &value)?;
            vector.push(name, state)?;
        }
        Ok(vector)
    }
}
