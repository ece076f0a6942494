//! Similarity measures between phonemes.
//!
//! Scores are computed feature by feature over the features both phonemes
//! share, so a composite phoneme can be compared with any of the source
//! phonemes it was built from.

use crate::error::{PhonemeError, Result};
use crate::feature::FeatureVector;
use crate::phoneme::Phoneme;

/// Similarity threshold used by [`partial_equals`] when none is configured.
pub const DEFAULT_THRESHOLD: f64 = 0.7;

/// Compute the similarity of two feature vectors.
///
/// Returns a value in [0, 1] where 1.0 means every compared feature agrees.
/// Each compared feature contributes:
/// - 1.0 if both states are identical
/// - 0.5 if exactly one state is `Both` and neither is `Unspecified`
/// - 0.0 otherwise
///
/// # Formula
///
/// ```text
/// similarity(a, b) = sum(agreement) / |smaller key set|
/// ```
///
/// The key set of one vector must contain the other's, which makes the
/// score symmetric. An empty vector shares nothing with a non-empty one and
/// scores 0.0; two empty vectors score 1.0.
///
/// # Errors
///
/// Returns `PhonemeError::FeatureMismatch` naming a feature of the smaller
/// vector that the larger one lacks.
///
/// # Examples
///
/// ```
/// use phoneme_features::{FeatureState, FeatureVector, feature_similarity};
///
/// let a = FeatureVector::from_states([
///     ("voice", FeatureState::Positive),
///     ("nasal", FeatureState::Positive),
/// ]).unwrap();
/// let b = FeatureVector::from_states([
///     ("voice", FeatureState::Both),
///     ("nasal", FeatureState::Positive),
/// ]).unwrap();
///
/// assert_eq!(feature_similarity(&a, &b).unwrap(), 0.75);
/// ```
#[allow(clippy::cast_precision_loss)]
pub fn feature_similarity(a: &FeatureVector, b: &FeatureVector) -> Result<f64> {
    let (smaller, larger) = if a.len() <= b.len() { (a, b) } else { (b, a) };

    if smaller.is_empty() {
        return Ok(if larger.is_empty() { 1.0 } else { 0.0 });
    }

    let mut total = 0.0;
    for (feature, state) in smaller.iter() {
        let other = larger
            .get(feature)
            .ok_or_else(|| PhonemeError::FeatureMismatch(feature.to_string()))?;
        total += state.agreement(other);
    }

    Ok(total / smaller.len() as f64)
}

/// Compute the similarity of two phonemes.
///
/// See [`feature_similarity`] for the scoring rule.
///
/// # Errors
///
/// Returns `PhonemeError::FeatureMismatch` if neither phoneme's features
/// cover the other's.
pub fn similarity(a: &Phoneme, b: &Phoneme) -> Result<f64> {
    feature_similarity(a.features(), b.features())
}

/// Check if two phonemes are at least `threshold` similar.
///
/// # Errors
///
/// Propagates [`similarity`] errors.
pub fn partial_equals(a: &Phoneme, b: &Phoneme, threshold: f64) -> Result<bool> {
    Ok(similarity(a, b)? >= threshold)
}

/// Pick the candidate most similar to `target`.
///
/// Ties go to the earliest candidate.
///
/// # Errors
///
/// Returns `PhonemeError::EmptyInput` if there are no candidates, and
/// propagates [`similarity`] errors.
pub fn pick_closest<'a, I>(target: &Phoneme, candidates: I) -> Result<&'a Phoneme>
where
    I: IntoIterator<Item = &'a Phoneme>,
{
    let mut best: Option<(&'a Phoneme, f64)> = None;

    for candidate in candidates {
        let score = similarity(target, candidate)?;
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((candidate, score)),
        }
    }

    best.map(|(phoneme, _)| phoneme)
        .ok_or_else(|| PhonemeError::EmptyInput("no candidates to pick from".to_string()))
}
