//! Time-budgeted search over the candidate stream.
//!
//! The scheduler pulls candidates, runs them through the scorer and
//! accumulates acceptances until the target count is reached or the
//! wall-clock deadline passes. The deadline is checked between candidate
//! evaluations, not preemptively — a single evaluation is bounded and
//! cheap, so the overshoot past the budget stays small.
//!
//! State machine: `Idle -> Searching -> {Completed, TimedOut}`. Both
//! terminal states carry whatever was accumulated; running out of time is
//! partial success, not an error. One attempt per reference, no retries.

use ahash::AHashSet;
use serde::Serialize;
use std::time::Instant;
use tracing::debug;

use crate::candidates::Candidate;
use crate::model::LanguageModel;
use crate::ratio::Ratio;
use crate::score::{evaluate, Evaluation};
use crate::segmenter::Segmentation;
use crate::{Config, Constraints};

/// How a search ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SearchStatus {
    /// Target count reached, or every enumerable candidate was considered.
    Completed,
    /// Deadline passed first.
    TimedOut,
}

/// One accepted pseudoword.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultEntry {
    pub pseudoword: String,
    pub overlap: Ratio,
    pub score: f64,
}

/// Terminal result of one search attempt, ranked best-first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchOutcome {
    pub status: SearchStatus,
    pub results: Vec<ResultEntry>,
}

impl SearchOutcome {
    /// Just the pseudoword spellings, in rank order.
    pub fn matches(&self) -> Vec<String> {
        self.results.iter().map(|r| r.pseudoword.clone()).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    Searching,
    Completed,
    TimedOut,
}

/// Drives one bounded search attempt.
#[derive(Debug)]
pub struct Scheduler {
    state: State,
}

impl Scheduler {
    pub fn new() -> Self {
        Self { state: State::Idle }
    }

    /// Run the search to a terminal state and return the ranked results.
    ///
    /// Ordering: descending score, ties by discovery order (the sort is
    /// stable), which makes completed searches reproducible. Duplicate
    /// assemblies of the same string are evaluated once.
    pub fn run<I>(
        mut self,
        candidates: I,
        reference: &Segmentation,
        constraints: &Constraints,
        model: &LanguageModel,
        config: &Config,
    ) -> SearchOutcome
    where
        I: Iterator<Item = Candidate>,
    {
        let started = Instant::now();
        let deadline = started + constraints.time_budget;
        self.state = State::Searching;

        let mut seen: AHashSet<String> = AHashSet::new();
        let mut accepted: Vec<ResultEntry> = Vec::new();

        if constraints.ncandidates == 0 {
            self.state = State::Completed;
        }

        if self.state == State::Searching {
            for cand in candidates {
                if Instant::now() >= deadline {
                    self.state = State::TimedOut;
                    break;
                }
                if !seen.insert(cand.text.clone()) {
                    continue;
                }
                match evaluate(&cand, reference, constraints, model, config) {
                    Ok(Evaluation::Accepted(scored)) => {
                        accepted.push(ResultEntry {
                            pseudoword: scored.text,
                            overlap: scored.overlap,
                            score: scored.score,
                        });
                        if accepted.len() >= constraints.ncandidates {
                            self.state = State::Completed;
                            break;
                        }
                    }
                    Ok(Evaluation::Rejected(_)) => {}
                    Err(err) => {
                        // an assembled candidate the model cannot segment;
                        // skip it and keep searching
                        debug!(candidate = %cand.text, %err, "candidate evaluation failed");
                    }
                }
            }
        }

        // generator exhausted before count or deadline
        if self.state == State::Searching {
            self.state = State::Completed;
        }

        // stable: equal scores keep discovery order
        accepted.sort_by(|a, b| b.score.total_cmp(&a.score));

        let status = match self.state {
            State::TimedOut => SearchStatus::TimedOut,
            _ => SearchStatus::Completed,
        };
        debug!(
            ?status,
            accepted = accepted.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "search finished"
        );
        SearchOutcome {
            status,
            results: accepted,
        }
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidates::CandidateIter;
    use crate::lexicon::Lexicon;
    use crate::segmenter::segment;
    use crate::stats::SegmentStats;
    use std::time::Duration;

    fn model() -> LanguageModel {
        let mut stats = SegmentStats::new();
        for seg in ["tr", "br", "dr", "gr", "u", "a", "i", "mp", "nt", "e", "t", "d"] {
            stats.add_segment(seg, 3);
        }
        for (a, b) in [
            ("tr", "u"),
            ("br", "u"),
            ("dr", "u"),
            ("gr", "u"),
            ("tr", "a"),
            ("tr", "i"),
            ("u", "mp"),
            ("a", "mp"),
            ("i", "mp"),
            ("u", "nt"),
            ("mp", "e"),
            ("nt", "e"),
            ("e", "t"),
            ("e", "d"),
            ("a", "t"),
        ] {
            stats.add_transition(a, b, 2);
        }
        LanguageModel::new("test", Lexicon::from_words(["trumpet"]), stats)
    }

    fn constraints(n: usize, budget: Duration) -> Constraints {
        Constraints {
            ncandidates: n,
            time_budget: budget,
            match_length: true,
            min_overlap: Ratio::new(2, 3).unwrap(),
        }
    }

    #[test]
    fn completes_when_count_reached() {
        let m = model();
        let reference = segment("trumpet", &m).unwrap();
        let cfg = Config::default();
        let cons = constraints(3, Duration::from_secs(5));
        let iter = CandidateIter::new(&reference, &m, &cons, &cfg);
        let outcome = Scheduler::new().run(iter, &reference, &cons, &m, &cfg);
        assert_eq!(outcome.status, SearchStatus::Completed);
        assert_eq!(outcome.results.len(), 3);
    }

    #[test]
    fn zero_budget_times_out_quickly() {
        let m = model();
        let reference = segment("trumpet", &m).unwrap();
        let cfg = Config::default();
        let cons = constraints(1_000_000, Duration::ZERO);
        let started = Instant::now();
        let iter = CandidateIter::new(&reference, &m, &cons, &cfg);
        let outcome = Scheduler::new().run(iter, &reference, &cons, &m, &cfg);
        assert_eq!(outcome.status, SearchStatus::TimedOut);
        // small bounded overshoot only
        assert!(started.elapsed() < Duration::from_millis(250));
    }

    #[test]
    fn exhaustion_is_completed_not_timeout() {
        let m = model();
        let reference = segment("trumpet", &m).unwrap();
        let cfg = Config::default();
        // far more than the enumeration can produce under a 2/3 bound
        let cons = constraints(1_000_000, Duration::from_secs(5));
        let iter = CandidateIter::new(&reference, &m, &cons, &cfg);
        let outcome = Scheduler::new().run(iter, &reference, &cons, &m, &cfg);
        assert_eq!(outcome.status, SearchStatus::Completed);
        assert!(outcome.results.len() < 1_000_000);
    }

    #[test]
    fn results_ranked_by_score_descending() {
        let m = model();
        let reference = segment("trumpet", &m).unwrap();
        let cfg = Config::default();
        let cons = constraints(10, Duration::from_secs(5));
        let iter = CandidateIter::new(&reference, &m, &cons, &cfg);
        let outcome = Scheduler::new().run(iter, &reference, &cons, &m, &cfg);
        for pair in outcome.results.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn deterministic_when_completed() {
        let m = model();
        let reference = segment("trumpet", &m).unwrap();
        let cfg = Config::default();
        let cons = constraints(4, Duration::from_secs(5));
        let run = || {
            let iter = CandidateIter::new(&reference, &m, &cons, &cfg);
            Scheduler::new().run(iter, &reference, &cons, &m, &cfg)
        };
        let a = run();
        let b = run();
        assert_eq!(a.status, SearchStatus::Completed);
        assert_eq!(a, b);
    }

    #[test]
    fn no_duplicate_results() {
        let m = model();
        let reference = segment("trumpet", &m).unwrap();
        let cfg = Config::default();
        let cons = constraints(50, Duration::from_secs(5));
        let iter = CandidateIter::new(&reference, &m, &cons, &cfg);
        let outcome = Scheduler::new().run(iter, &reference, &cons, &m, &cfg);
        let mut texts: Vec<&str> = outcome.results.iter().map(|r| r.pseudoword.as_str()).collect();
        let before = texts.len();
        texts.sort_unstable();
        texts.dedup();
        assert_eq!(before, texts.len());
    }
}
