//! Phonemes as ternary phonological feature vectors.
//!
//! This crate models speech sounds as vectors of named features, each in one
//! of four states (`+`, `-`, `±`, `0`). It compares phonemes for similarity
//! and merges them into "intersection phonemes" that keep only the features
//! their parents share.
//!
//! # Features
//!
//! - **Core Types**: `FeatureState`, `FeatureVector`, `Phoneme`, `Provenance`
//! - **Similarity**: feature-by-feature scoring with half credit for `±`
//! - **Intersection**: composite phonemes that track which source phonemes
//!   contributed and how similar they were
//! - **Tables**: JSON symbol tables and the lookup/intersection queries
//!
//! # Quick Start
//!
//! ```rust
//! use phoneme_features::{intersect, similarity, PhonemeTable};
//!
//! let table = PhonemeTable::from_json_str(r#"{
//!     "m": { "name": "voiced bilabial nasal",
//!            "features": { "voice": true, "nasal": true, "continuant": false } },
//!     "n": { "name": "voiced alveolar nasal",
//!            "features": { "voice": true, "nasal": true, "continuant": 0 } }
//! }"#)?;
//!
//! let m = table.get("m")?;
//! let n = table.get("n")?;
//!
//! let merged = intersect(m, n)?;
//! assert_eq!(merged.symbol(), "m/n");
//! assert_eq!(merged.parent_similarity(), similarity(m, n)?);
//! assert_eq!(merged.positive_features().collect::<Vec<_>>(), ["voice", "nasal"]);
//! # Ok::<(), phoneme_features::PhonemeError>(())
//! ```
//!
//! # Scoring
//!
//! ```text
//! State pair        | Score
//! ------------------+------
//! identical         |  1.0
//! ± vs + or -       |  0.5
//! anything else     |  0.0
//! ```
//!
//! The similarity of two phonemes is the mean score over the features they
//! share.

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod config;
mod error;
mod feature;
mod merge;
mod phoneme;
pub mod query;
mod similarity;
mod table;

pub use config::MatchConfig;
pub use error::{PhonemeError, Result};
pub use feature::{FeatureSource, FeatureState, FeatureVector, BOTH_MARKER};
pub use merge::{intersect, intersect_all};
pub use phoneme::{Phoneme, Provenance, PARTIAL_PHONEME_NAME, SYMBOL_SEPARATOR};
pub use query::{IntersectionReport, PhonemeReport, Query, QueryReport};
pub use similarity::{
    feature_similarity, partial_equals, pick_closest, similarity, DEFAULT_THRESHOLD,
};
pub use table::{PhonemeRecord, PhonemeTable, BUNDLED_TABLE};

/// Prelude module for convenient imports.
///
/// # Example
///
/// ```rust
/// use phoneme_features::prelude::*;
/// ```
pub mod prelude {
    pub use crate::feature::{FeatureState, FeatureVector};
    pub use crate::merge::intersect;
    pub use crate::phoneme::Phoneme;
    pub use crate::similarity::{partial_equals, pick_closest, similarity};
    pub use crate::table::PhonemeTable;
    pub use crate::{PhonemeError, Result};
}
