//! Integration tests for phoneme-features.
//!
//! These tests load the bundled IPA table and check the similarity and
//! intersection properties over every phoneme in it.

use std::fs;
use std::path::PathBuf;

use phoneme_features::query::{describe, intersect_symbols};
use phoneme_features::{
    intersect, pick_closest, similarity, FeatureVector, MatchConfig, PhonemeError, PhonemeTable,
};
use tempfile::TempDir;

/// Path of the table shipped with the crate.
fn table_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/phonemes.json")
}

fn load_table() -> PhonemeTable {
    PhonemeTable::from_file(table_path()).expect("bundled table should load")
}

#[test]
fn test_bundled_table_loads() {
    let table = load_table();
    assert_eq!(table.len(), 23);
    let k = table.get("k").unwrap();
    assert_eq!(k.name(), "voiceless velar plosive");
    assert_eq!(k.len(), 19);
}

#[test]
fn test_parse_is_identity_on_normalized_vectors() {
    let table = load_table();
    for phoneme in table.iter() {
        let reparsed = FeatureVector::parse(phoneme.features().clone()).unwrap();
        assert_eq!(&reparsed, phoneme.features(), "{phoneme}");
    }
}

#[test]
fn test_similarity_reflexive_and_symmetric() {
    let table = load_table();
    for a in table.iter() {
        assert_eq!(similarity(a, a).unwrap(), 1.0, "{a}");
        for b in table.iter() {
            let ab = similarity(a, b).unwrap();
            let ba = similarity(b, a).unwrap();
            assert_eq!(ab, ba, "{a} vs {b}");
            assert!((0.0..=1.0).contains(&ab));
        }
    }
}

#[test]
fn test_voicing_pair_differs_in_one_feature() {
    let table = load_table();
    let p = table.get("p").unwrap();
    let b = table.get("b").unwrap();
    assert!((similarity(p, b).unwrap() - 18.0 / 19.0).abs() < 1e-12);

    let merged = intersect(p, b).unwrap();
    assert!(!merged.features().contains("voice"));
    assert_eq!(merged.len(), 18);
    assert_eq!(
        merged.positive_features().collect::<Vec<_>>(),
        ["consonantal", "labial"]
    );
}

#[test]
fn test_intersection_provenance_and_ancestors() {
    let table = load_table();
    for a in table.iter() {
        for b in table.iter() {
            let merged = intersect(a, b).unwrap();
            if a == b {
                assert_eq!(merged.symbol(), a.symbol());
                assert_eq!(merged.parents(), a.parents());
                continue;
            }
            assert!(merged.parents().is_superset(a.parents()));
            assert!(merged.parents().is_superset(b.parents()));
            assert_eq!(intersect(&merged, a).unwrap().symbol(), merged.symbol());
            assert_eq!(intersect(&merged, b).unwrap().symbol(), merged.symbol());
            for feature in merged.positive_features() {
                assert!(merged.features().get(feature).unwrap().is_present());
            }
        }
    }
}

#[test]
fn test_pick_closest_over_table() {
    let table = load_table();
    let u = table.get("u").unwrap();

    assert_eq!(pick_closest(u, [u]).unwrap().symbol(), "u");
    assert_eq!(table.closest("u").unwrap().symbol(), "w");
    assert_eq!(table.closest("ŋ").unwrap().symbol(), "g");

    let others: Vec<_> = table.iter().filter(|p| p.symbol() != "u").collect();
    assert_eq!(pick_closest(u, others).unwrap().symbol(), "w");
}

#[test]
fn test_match_config_on_table() {
    let table = load_table();
    let config = MatchConfig::default();
    let n = table.get("n").unwrap();
    let m = table.get("m").unwrap();
    let ng = table.get("ŋ").unwrap();

    assert!(config.matches(n, m).unwrap());
    assert!(!config.matches(n, ng).unwrap());
    assert!(config.with_threshold(0.6).matches(n, ng).unwrap());
}

#[test]
fn test_queries() {
    let table = load_table();

    let report = describe(&table, "k").unwrap();
    assert_eq!(report.name, "voiceless velar plosive");
    assert_eq!(
        report.positive_features,
        ["consonantal", "dorsal", "high", "back"]
    );

    let report = intersect_symbols(&table, &["m", "n", "ŋ"]).unwrap();
    assert_eq!(report.steps.len(), 2);
    assert!((report.steps[0] - 16.0 / 19.0).abs() < 1e-12);
    assert_eq!(report.steps[1], 0.75);
    assert_eq!(report.symbol, "m/n/ŋ");
    assert_eq!(report.strength, 2.25);
    assert_eq!(
        report.positive_features,
        ["consonantal", "sonorant", "nasal", "voice"]
    );
}

#[test]
fn test_corrupt_table_aborts_load() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("phonemes.json");
    fs::write(
        &path,
        r#"{ "p": { "name": "p", "features": { "voice": false, "labial": "yes" } } }"#,
    )
    .unwrap();

    match PhonemeTable::from_file(&path) {
        Err(PhonemeError::Parse { feature, value }) => {
            assert_eq!(feature, "labial");
            assert_eq!(value, "\"yes\"");
        }
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn test_missing_table_file() {
    let result = PhonemeTable::from_file("/nonexistent/phonemes.json");
    assert!(matches!(result, Err(PhonemeError::Io(_))));
}
