//! Integration tests for level inclusion and filtering.
//!
//! A level includes itself and every more severe level. A logger set to a
//! level lets exactly the included severities through to its handlers.

use std::sync::{Arc, Mutex};

use logging::{Level, Logger, LoggingError, handler};
use proptest::prelude::*;

fn severity_rank(level: Level) -> usize {
    Level::ALL
        .iter()
        .position(|candidate| *candidate == level)
        .expect("every level is listed")
}

fn any_level() -> impl Strategy<Value = Level> {
    prop::sample::select(Level::ALL.to_vec())
}

// ============================================================================
// Inclusion Table
// ============================================================================

#[test]
fn every_level_includes_itself() {
    for level in Level::ALL {
        assert!(level.includes(level), "{level} must include itself");
    }
}

#[test]
fn inclusion_table_matches_severity_order() {
    let expected = [
        (Level::Error, vec![Level::Error]),
        (Level::Warn, vec![Level::Warn, Level::Error]),
        (Level::Info, vec![Level::Info, Level::Warn, Level::Error]),
        (
            Level::Debug,
            vec![Level::Debug, Level::Info, Level::Warn, Level::Error],
        ),
    ];
    for (level, included) in expected {
        assert_eq!(level.included_levels(), included.as_slice(), "{level}");
    }
}

#[test]
fn error_does_not_include_less_severe_levels() {
    assert!(!Level::Error.includes(Level::Warn));
    assert!(!Level::Error.includes(Level::Info));
    assert!(!Level::Error.includes(Level::Debug));
    assert!(Level::Debug.includes(Level::Error));
}

// ============================================================================
// Level Names
// ============================================================================

#[test]
fn names_parse_back_to_levels() {
    for level in Level::ALL {
        assert_eq!(Level::try_from(level.as_str()).expect("known level"), level);
    }
}

#[test]
fn unknown_names_are_rejected() {
    for tag in ["", "trace", "ERROR", "fatal"] {
        match tag.parse::<Level>() {
            Err(LoggingError::InvalidLevel(rejected)) => assert_eq!(rejected, tag),
            other => panic!("expected InvalidLevel for {tag:?}, got {other:?}"),
        }
    }
}

// ============================================================================
// Filtering Through A Logger
// ============================================================================

#[test]
fn logger_threshold_controls_which_calls_reach_handlers() {
    for threshold in Level::ALL {
        let logger = Logger::detached();
        logger.set_level(threshold);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        logger.set_log_handlers([handler(move |event| {
            sink.lock().expect("seen lock").push(event.level());
            Ok(())
        })]);

        let client = logger.client();
        for level in Level::ALL {
            let emitted = client.log(level, "probe").expect("handler succeeds");
            assert_eq!(emitted.is_some(), threshold.includes(level));
        }

        let expected: Vec<Level> = threshold.included_levels().iter().rev().copied().collect();
        assert_eq!(*seen.lock().expect("seen lock"), expected);
    }
}

proptest! {
    #[test]
    fn inclusion_equals_at_least_as_severe(threshold in any_level(), level in any_level()) {
        prop_assert_eq!(
            threshold.includes(level),
            severity_rank(level) <= severity_rank(threshold)
        );
    }

    #[test]
    fn inclusion_is_transitive(a in any_level(), b in any_level(), c in any_level()) {
        if a.includes(b) && b.includes(c) {
            prop_assert!(a.includes(c));
        }
    }
}
