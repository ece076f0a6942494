//! Lookup and intersection queries against a [`PhonemeTable`].

use serde::Serialize;

use crate::error::Result;
use crate::merge::intersect_all;
use crate::phoneme::Phoneme;
use crate::table::PhonemeTable;

/// A parsed query line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// Show one phoneme.
    Describe(String),
    /// Intersect several phonemes, left to right.
    Intersect(Vec<String>),
}

impl Query {
    /// Parse a whitespace-separated line of symbols.
    ///
    /// One symbol is a [`Query::Describe`], several are a
    /// [`Query::Intersect`]; a blank line is `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use phoneme_features::Query;
    ///
    /// assert_eq!(Query::parse(" m "), Some(Query::Describe("m".into())));
    /// assert_eq!(
    ///     Query::parse("m n"),
    ///     Some(Query::Intersect(vec!["m".into(), "n".into()]))
    /// );
    /// assert_eq!(Query::parse("   "), None);
    /// ```
    #[must_use]
    pub fn parse(line: &str) -> Option<Self> {
        let mut symbols: Vec<String> = line.split_whitespace().map(str::to_string).collect();
        match symbols.len() {
            0 => None,
            1 => symbols.pop().map(Self::Describe),
            _ => Some(Self::Intersect(symbols)),
        }
    }
}

/// Result of a [`Query::Describe`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhonemeReport {
    /// The phoneme's symbol.
    pub symbol: String,
    /// Human-readable name.
    pub name: String,
    /// Positive (or `±`) features in table order.
    pub positive_features: Vec<String>,
}

/// Result of a [`Query::Intersect`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntersectionReport {
    /// Symbol of the final phoneme, `a/b/...` for composites.
    pub symbol: String,
    /// `parent_similarity` after each merge step.
    pub steps: Vec<f64>,
    /// Strength of the final phoneme.
    pub strength: f64,
    /// Positive (or `±`) features of the final phoneme.
    pub positive_features: Vec<String>,
}

/// Result of any query.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum QueryReport {
    /// See [`PhonemeReport`].
    Phoneme(PhonemeReport),
    /// See [`IntersectionReport`].
    Intersection(IntersectionReport),
}

fn positive_features(phoneme: &Phoneme) -> Vec<String> {
    phoneme.positive_features().map(str::to_string).collect()
}

/// Describe one phoneme.
///
/// # Errors
///
/// Returns `PhonemeError::SymbolNotFound` for an unknown symbol.
pub fn describe(table: &PhonemeTable, symbol: &str) -> Result<PhonemeReport> {
    let phoneme = table.get(symbol)?;
    Ok(PhonemeReport {
        symbol: phoneme.symbol().to_string(),
        name: phoneme.name().to_string(),
        positive_features: positive_features(phoneme),
    })
}

/// Intersect phonemes left to right.
///
/// All symbols are resolved before any merge happens.
///
/// # Errors
///
/// Returns `PhonemeError::SymbolNotFound` for the first unknown symbol,
/// `PhonemeError::EmptyInput` for no symbols, and propagates merge errors.
pub fn intersect_symbols<S: AsRef<str>>(
    table: &PhonemeTable,
    symbols: &[S],
) -> Result<IntersectionReport> {
    let phonemes = symbols
        .iter()
        .map(|symbol| table.get(symbol.as_ref()))
        .collect::<Result<Vec<_>>>()?;

    let (merged, steps) = intersect_all(phonemes)?;
    Ok(IntersectionReport {
        symbol: merged.symbol().to_string(),
        steps,
        strength: merged.strength(),
        positive_features: positive_features(&merged),
    })
}

/// Run a parsed query.
///
/// # Errors
///
/// As [`describe`] and [`intersect_symbols`].
pub fn run(table: &PhonemeTable, query: &Query) -> Result<QueryReport> {
    match query {
        Query::Describe(symbol) => describe(table, symbol).map(QueryReport::Phoneme),
        Query::Intersect(symbols) => {
            intersect_symbols(table, symbols).map(QueryReport::Intersection)
        }
    }
}
