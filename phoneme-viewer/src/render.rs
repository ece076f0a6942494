//! Plain-text rendering of query results.

use phoneme_features::{IntersectionReport, Phoneme, PhonemeReport, QueryReport};

fn feature_list(features: &[String]) -> String {
    let mut sorted: Vec<&str> = features.iter().map(String::as_str).collect();
    sorted.sort_unstable();
    format!("[{}]", sorted.join(", "))
}

/// Name on the first line, sorted positive features on the second.
pub fn phoneme_report(report: &PhonemeReport) -> String {
    format!("{}\n{}", report.name, feature_list(&report.positive_features))
}

/// One similarity per merge step, then the sorted positive features.
pub fn intersection_report(report: &IntersectionReport) -> String {
    let mut lines: Vec<String> = report.steps.iter().map(ToString::to_string).collect();
    lines.push(feature_list(&report.positive_features));
    lines.join("\n")
}

pub fn report(report: &QueryReport) -> String {
    match report {
        QueryReport::Phoneme(r) => phoneme_report(r),
        QueryReport::Intersection(r) => intersection_report(r),
    }
}

pub fn comparison(
    a: &Phoneme,
    b: &Phoneme,
    similarity: f64,
    threshold: f64,
    matches: bool,
) -> String {
    format!(
        "similarity({a}, {b}) = {similarity}\npartial match at threshold {threshold}: {}",
        if matches { "yes" } else { "no" }
    )
}

pub fn closest(target: &Phoneme, closest: &Phoneme, similarity: f64) -> String {
    format!(
        "closest to {target}: {closest} ({}), similarity {similarity}",
        closest.name()
    )
}
