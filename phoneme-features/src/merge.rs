//! Intersection phonemes.
//!
//! Merging two phonemes keeps only the features on which they agree and
//! records both as parents of the result.

use crate::error::{PhonemeError, Result};
use crate::phoneme::Phoneme;
use crate::similarity::similarity;

/// Merge two phonemes into an intersection phoneme.
///
/// Cases, in priority order:
/// 1. Identical feature vectors: returns `a`.
/// 2. `b` already contributed to `a` (its symbol is one of `a`'s parents):
///    returns `a`.
/// 3. Otherwise returns a new composite phoneme holding the `(feature,
///    state)` pairs common to both, with `parent_similarity` set to
///    `similarity(a, b)` and the union of both provenances.
///
/// The shared feature set may be empty; the result is still a phoneme.
///
/// # Errors
///
/// Propagates [`similarity`] errors for vectors that cannot be compared.
///
/// # Examples
///
/// ```
/// use phoneme_features::{intersect, Phoneme};
/// use serde_json::json;
///
/// let m = Phoneme::new("m", "m", vec![("voice", json!(true)), ("nasal", json!(true))]).unwrap();
/// let n = Phoneme::new("m̥", "m̥", vec![("voice", json!(false)), ("nasal", json!(true))]).unwrap();
///
/// let merged = intersect(&m, &n).unwrap();
/// assert_eq!(merged.positive_features().collect::<Vec<_>>(), ["nasal"]);
/// assert_eq!(merged.parent_similarity(), 0.5);
/// assert!(!merged.is_complete());
/// ```
pub fn intersect(a: &Phoneme, b: &Phoneme) -> Result<Phoneme> {
    if a.features() == b.features() {
        tracing::trace!(a = a.symbol(), b = b.symbol(), "identical features, no merge");
        return Ok(a.clone());
    }

    if a.parents().contains(b.symbol()) {
        tracing::trace!(a = a.symbol(), b = b.symbol(), "merge with ancestor, no merge");
        return Ok(a.clone());
    }

    let combined_similarity = similarity(a, b)?;
    let shared = a.features().intersection(b.features());
    let parents = a.parents().merge(b.parents());

    let merged = Phoneme::composite(shared, parents, combined_similarity);
    tracing::debug!(
        a = a.symbol(),
        b = b.symbol(),
        merged = merged.symbol(),
        similarity = combined_similarity,
        shared = merged.len(),
        "merged phonemes"
    );

    Ok(merged)
}

/// Fold a sequence of phonemes left to right through [`intersect`].
///
/// Returns the final phoneme and the `parent_similarity` recorded at every
/// merge step (one fewer than the number of phonemes).
///
/// # Errors
///
/// Returns `PhonemeError::EmptyInput` for an empty sequence and propagates
/// [`intersect`] errors.
pub fn intersect_all<'a, I>(phonemes: I) -> Result<(Phoneme, Vec<f64>)>
where
    I: IntoIterator<Item = &'a Phoneme>,
{
    let mut phonemes = phonemes.into_iter();
    let first = phonemes
        .next()
        .ok_or_else(|| PhonemeError::EmptyInput("no phonemes to intersect".to_string()))?;

    let mut current = first.clone();
    let mut steps = Vec::new();
    for next in phonemes {
        current = intersect(&current, next)?;
        steps.push(current.parent_similarity());
    }

    Ok((current, steps))
}
