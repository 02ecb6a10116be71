// Integration tests for pseudoword generation over the built-in
// orthographic English plugin. These exercise the public API end to end:
// segmentation round-trips, the acceptance invariants, determinism of
// completed searches, and the time bound.

use std::time::{Duration, Instant};

use pseudolex_core::engine::Engine;
use pseudolex_core::error::Error;
use pseudolex_core::ratio::Ratio;
use pseudolex_core::scheduler::SearchStatus;
use pseudolex_core::segmenter::segment;
use pseudolex_core::Constraints;
use pseudolex_english::{builtin_model, register, ORTHOGRAPHIC_ENGLISH};

fn classic_constraints() -> Constraints {
    Constraints {
        ncandidates: 5,
        time_budget: Duration::from_secs(5),
        match_length: true,
        min_overlap: Ratio::new(2, 3).unwrap(),
    }
}

#[test]
fn segmentation_round_trips() {
    let model = builtin_model();
    for word in [
        "trumpet", "strength", "crumpet", "blackboard", "oatmeal", "rhythm", "zigzag",
    ] {
        let seg = segment(word, &model).expect(word);
        assert_eq!(seg.concat(), word, "round-trip failed for {word}");
    }
}

#[test]
fn trumpet_scenario() {
    register();
    let engine = Engine::for_language(ORTHOGRAPHIC_ENGLISH).unwrap();
    let results = engine.generate_classic(&["trumpet"], &classic_constraints());
    assert_eq!(results.len(), 1);
    let outcome = results[0].outcome.as_ref().unwrap();

    let matches = outcome.matches();
    assert!(!matches.is_empty());
    assert!(matches.len() <= 5);

    let model = engine.model();
    let reference = segment("trumpet", model).unwrap();
    let min = Ratio::new(2, 3).unwrap();
    for word in &matches {
        // length invariant
        assert_eq!(word.chars().count(), 7, "{word} is not 7 characters");
        // lexicality invariant
        assert!(!model.is_word(word), "{word} is a real word");
        // overlap invariant, recomputed independently with exact rationals
        let derived = segment(word, model).unwrap();
        let shared = reference
            .segments()
            .iter()
            .zip(derived.segments())
            .filter(|(a, b)| a == b)
            .count();
        let overlap = Ratio::new(shared as u32, reference.len() as u32).unwrap();
        assert!(overlap >= min, "{word}: overlap {overlap} below 2/3");
    }
}

#[test]
fn accepted_entries_expose_overlap_and_score() {
    register();
    let engine = Engine::for_language(ORTHOGRAPHIC_ENGLISH).unwrap();
    let outcome = engine.generate_one("trumpet", &classic_constraints()).unwrap();
    let min = Ratio::new(2, 3).unwrap();
    for entry in &outcome.results {
        assert!(entry.overlap >= min);
        assert!(entry.score > 0.0);
    }
    // ranked best-first
    for pair in outcome.results.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
}

#[test]
fn completed_searches_are_deterministic() {
    register();
    let run = || {
        let engine = Engine::for_language(ORTHOGRAPHIC_ENGLISH).unwrap();
        let outcome = engine.generate_one("trumpet", &classic_constraints()).unwrap();
        assert_eq!(outcome.status, SearchStatus::Completed);
        outcome.matches()
    };
    assert_eq!(run(), run());
}

#[test]
fn unreachable_count_times_out_within_budget() {
    register();
    let engine = Engine::for_language(ORTHOGRAPHIC_ENGLISH).unwrap();
    let constraints = Constraints {
        ncandidates: 10_000_000,
        time_budget: Duration::from_millis(20),
        match_length: false,
        min_overlap: Ratio::ZERO,
    };
    let started = Instant::now();
    let outcome = engine.generate_one("trumpet", &constraints).unwrap();
    let elapsed = started.elapsed();

    assert_eq!(outcome.status, SearchStatus::TimedOut);
    // a bounded overshoot, not a runaway search
    assert!(elapsed < Duration::from_millis(500), "took {elapsed:?}");
}

#[test]
fn zero_found_is_success_not_error() {
    register();
    let engine = Engine::for_language(ORTHOGRAPHIC_ENGLISH).unwrap();
    let constraints = Constraints {
        min_overlap: Ratio::ONE, // no substitution can satisfy this
        ..classic_constraints()
    };
    let outcome = engine.generate_one("trumpet", &constraints).unwrap();
    assert_eq!(outcome.status, SearchStatus::Completed);
    assert!(outcome.results.is_empty());
}

#[test]
fn unknown_language_fails_before_search() {
    let err = Engine::for_language("orthographic_klingon").unwrap_err();
    assert!(matches!(err, Error::UnknownLanguage(_)));
}

#[test]
fn invalid_reference_does_not_poison_siblings() {
    register();
    let engine = Engine::for_language(ORTHOGRAPHIC_ENGLISH).unwrap();
    let results = engine.generate_classic(&["trumpet", "tru4mpet", "drum"], &classic_constraints());
    assert_eq!(results.len(), 3);
    assert!(results[0].outcome.is_ok());
    assert!(matches!(
        results[1].outcome,
        Err(Error::InvalidSequence(_))
    ));
    assert!(results[2].outcome.is_ok());
    assert_eq!(results[2].reference, "drum");
}

#[test]
fn batch_preserves_caller_order() {
    register();
    let engine = Engine::for_language(ORTHOGRAPHIC_ENGLISH).unwrap();
    let refs = ["drum", "trumpet", "plank"];
    let results = engine.generate_classic(&refs, &classic_constraints());
    let seen: Vec<&str> = results.iter().map(|r| r.reference.as_str()).collect();
    assert_eq!(seen, refs);
}
