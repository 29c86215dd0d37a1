//! Integration tests for the conversion session
//!
//! Exercises the full facade over an in-memory rate source: conversion,
//! caching, history, series and content selection together.

use cambio::config::SessionConfig;
use cambio::content::CURIOSITY_UNAVAILABLE;
use cambio::currency::Currency;
use cambio::error::CambioError;
use cambio::rates::{ExplodingRateSource, InMemoryRateSource, RateSource};
use cambio::session::Session;
use chrono::NaiveDate;
use std::io::Write;
use std::sync::Arc;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_end_to_end_conversion_with_history() {
    let mut source = InMemoryRateSource::new();
    source.add_rate(Currency::EUR, Currency::BRL, 5.47).unwrap();
    let mut session = Session::with_source(Box::new(source), SessionConfig::default());

    let before = session.history_len();
    let result = session.convert(5.0, Currency::EUR, Currency::BRL).unwrap();
    session.append_history(&result);

    assert!((result.converted - 27.35).abs() < 1e-9);
    assert_eq!(result.request.target, Currency::BRL);
    assert_eq!(session.history_len(), before + 1);

    let recent = session.recent_history(10);
    assert_eq!(recent[0].line, "5 EUR = 27.35 BRL");
}

#[test]
fn test_identity_conversion_is_free_and_exact() {
    let mut session =
        Session::with_source(Box::new(ExplodingRateSource::new()), SessionConfig::default());

    for amount in [0.0, 1.0, 123.456] {
        let result = session.convert(amount, Currency::USD, Currency::USD).unwrap();
        assert_eq!(result.converted, amount);
    }
}

#[test]
fn test_cache_answers_repeated_queries() {
    let mut source = InMemoryRateSource::new();
    source.add_rate(Currency::EUR, Currency::BRL, 5.47).unwrap();
    source
        .add_series_point(Currency::EUR, Currency::BRL, day(2024, 1, 2), 5.43)
        .unwrap();
    let source = Arc::new(source);
    let mut session = Session::with_source(Box::new(source.clone()), SessionConfig::default());

    for _ in 0..3 {
        session.convert(5.0, Currency::EUR, Currency::BRL).unwrap();
        session
            .series(day(2024, 1, 1), day(2024, 1, 31), Currency::EUR, Currency::BRL)
            .unwrap();
    }

    // One latest fetch plus one series fetch, ever.
    assert_eq!(source.call_count(), 2);
}

#[test]
fn test_series_range_validated_before_source() {
    let mut session =
        Session::with_source(Box::new(ExplodingRateSource::new()), SessionConfig::default());

    let err = session
        .series(day(2025, 1, 1), day(2024, 1, 1), Currency::EUR, Currency::BRL)
        .unwrap_err();
    assert!(matches!(err, CambioError::Validation(_)));
}

#[test]
fn test_series_no_data_is_empty_not_error() {
    let mut session =
        Session::with_source(Box::new(InMemoryRateSource::new()), SessionConfig::default());

    let series = session
        .series(day(2024, 1, 1), day(2024, 1, 31), Currency::EUR, Currency::BRL)
        .unwrap();
    assert!(series.is_empty());
}

#[test]
fn test_history_retention_bound() {
    let mut source = InMemoryRateSource::new();
    source.add_rate(Currency::EUR, Currency::BRL, 5.47).unwrap();
    let config = SessionConfig {
        history_capacity: 5,
        ..SessionConfig::default()
    };
    let mut session = Session::with_source(Box::new(source), config);

    for n in 0..8 {
        let result = session.convert(n as f64, Currency::EUR, Currency::BRL).unwrap();
        session.append_history(&result);
    }

    let recent = session.recent_history(100);
    assert_eq!(recent.len(), 5);
    // Newest first; the first three conversions were evicted.
    assert!(recent[0].line.starts_with("7 EUR"));
    assert!(recent[4].line.starts_with("3 EUR"));
}

#[test]
fn test_curiosity_resource_and_determinism() {
    let mut resource = tempfile::NamedTempFile::new().unwrap();
    writeln!(resource, "USD: First line.").unwrap();
    writeln!(resource, "USD: Second line.").unwrap();
    writeln!(resource, "EUR: Only line.").unwrap();
    resource.flush().unwrap();

    let config = SessionConfig {
        curiosities_path: resource.path().to_path_buf(),
        ..SessionConfig::default()
    };
    let session = Session::with_source(Box::new(ExplodingRateSource::new()), config);

    let first = session.curiosity(Currency::USD, day(2024, 1, 1));
    let again = session.curiosity(Currency::USD, day(2024, 1, 1));
    assert_eq!(first, again);
    assert!(first == "First line." || first == "Second line.");

    assert_eq!(session.curiosity(Currency::EUR, day(2024, 1, 1)), "Only line.");
    assert_eq!(
        session.curiosity(Currency::BRL, day(2024, 1, 1)),
        CURIOSITY_UNAVAILABLE
    );
}

#[test]
fn test_tip_in_each_language() {
    let session =
        Session::with_source(Box::new(ExplodingRateSource::new()), SessionConfig::default());

    use cambio::content::Language;
    for language in [Language::En, Language::Es, Language::Pt] {
        assert!(!session.tip_in(Currency::EUR, language).is_empty());
    }
    assert_eq!(session.tip_in(Currency::JPY, Language::En), "");
}

#[test]
fn test_csv_upload_through_session() {
    let session =
        Session::with_source(Box::new(ExplodingRateSource::new()), SessionConfig::default());

    let rows = session
        .load_csv_from("par,rate\nusd,\"1,10\"\nbad,row\n".as_bytes())
        .unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].currency, Currency::USD);
    assert!((rows[0].rate - 1.10).abs() < 1e-9);
}

#[test]
fn test_source_trait_object_through_arc() {
    // The facade accepts any RateSource, shared or not.
    let mut source = InMemoryRateSource::new();
    source.add_rate(Currency::GBP, Currency::JPY, 190.0).unwrap();
    let shared: Arc<dyn RateSource> = Arc::new(source);

    let mut session = Session::with_source(Box::new(shared), SessionConfig::default());
    let result = session.convert(2.0, Currency::GBP, Currency::JPY).unwrap();
    assert!((result.converted - 380.0).abs() < 1e-9);
}
