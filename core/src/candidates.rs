//! Constrained candidate enumeration.
//!
//! `CandidateIter` walks the space of sequences obtained by keeping or
//! substituting each segment of the reference segmentation. Enumeration
//! order is chosen so that early termination under a time budget still
//! surfaces the best candidates available:
//!
//!  1. substitution count k ascending — candidates sharing more reference
//!     segments (higher overlap) come first;
//!  2. substituted position sets in combination order;
//!  3. per-slot alternatives ordered by adjacency plausibility against the
//!     reference context, ties broken lexicographically.
//!
//! Masks that cannot reach the minimum overlap ratio are never enumerated
//! (the bound on k is computed up front with exact rational arithmetic),
//! and when `match_length` is set only same-character-count alternatives
//! enter the slot lists, so length-violating candidates are never
//! assembled at all.
//!
//! The iterator is restartable per call — build a fresh one to start the
//! enumeration over — but not restartable mid-iteration. Distinct states
//! can assemble the same string; deduplication is the scheduler's job.

use tracing::trace;

use crate::model::LanguageModel;
use crate::ratio::Ratio;
use crate::segmenter::Segmentation;
use crate::{Config, Constraints};

/// One assembled candidate sequence. Transient: exists only between
/// enumeration and scoring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub text: String,
    /// Reference positions left untouched. An optimistic overlap bound;
    /// the scorer recomputes overlap from the candidate's own
    /// segmentation.
    pub kept: usize,
}

/// Lazy enumeration of structurally valid candidates for one reference.
#[derive(Debug)]
pub struct CandidateIter {
    reference: Vec<String>,
    /// Per-position substitution lists, most plausible first.
    alternatives: Vec<Vec<String>>,
    /// Positions with at least one alternative.
    usable: Vec<usize>,
    /// Largest substitution count that still satisfies the overlap bound.
    max_subs: usize,
    k: usize,
    /// Current position combination (indices into `usable`); empty when
    /// the next k still needs initializing.
    comb: Vec<usize>,
    /// Odometer over the alternative lists of the current combination.
    odo: Vec<usize>,
    done: bool,
}

impl CandidateIter {
    pub fn new(
        reference: &Segmentation,
        model: &LanguageModel,
        constraints: &Constraints,
        config: &Config,
    ) -> Self {
        let refs: Vec<String> = reference.segments().to_vec();
        let n = refs.len();
        let max_subs = max_substitutions(n, constraints.min_overlap);

        let alternatives: Vec<Vec<String>> = (0..n)
            .map(|i| slot_alternatives(&refs, i, model, constraints, config))
            .collect();
        let usable: Vec<usize> = (0..n).filter(|&i| !alternatives[i].is_empty()).collect();

        let done = n == 0 || max_subs == 0 || usable.is_empty();
        CandidateIter {
            reference: refs,
            alternatives,
            usable,
            max_subs,
            k: 1,
            comb: Vec::new(),
            odo: Vec::new(),
            done,
        }
    }

    fn assemble(&self) -> Candidate {
        let mut text = String::new();
        let mut sub_at = 0; // index into comb/odo, positions ascend
        for (i, seg) in self.reference.iter().enumerate() {
            let substituted = sub_at < self.comb.len() && self.usable[self.comb[sub_at]] == i;
            if substituted {
                let alts = &self.alternatives[i];
                text.push_str(&alts[self.odo[sub_at]]);
                sub_at += 1;
            } else {
                text.push_str(seg);
            }
        }
        Candidate {
            text,
            kept: self.reference.len() - self.k,
        }
    }

    /// Advance the odometer; on overflow move to the next position
    /// combination; when combinations are exhausted, the next k.
    fn advance(&mut self) {
        let mut j = self.odo.len();
        while j > 0 {
            j -= 1;
            let pos = self.usable[self.comb[j]];
            self.odo[j] += 1;
            if self.odo[j] < self.alternatives[pos].len() {
                return;
            }
            self.odo[j] = 0;
        }
        if self.next_combination() {
            return;
        }
        self.comb.clear();
        self.odo.clear();
        self.k += 1;
    }

    /// Lexicographically next k-combination of indices into `usable`.
    fn next_combination(&mut self) -> bool {
        let m = self.usable.len();
        let k = self.comb.len();
        let mut i = k;
        while i > 0 {
            i -= 1;
            if self.comb[i] < m - (k - i) {
                self.comb[i] += 1;
                for j in i + 1..k {
                    self.comb[j] = self.comb[j - 1] + 1;
                }
                self.odo.iter_mut().for_each(|o| *o = 0);
                return true;
            }
        }
        false
    }
}

impl Iterator for CandidateIter {
    type Item = Candidate;

    fn next(&mut self) -> Option<Candidate> {
        if self.done {
            return None;
        }
        if self.k > self.max_subs {
            self.done = true;
            return None;
        }
        if self.comb.is_empty() {
            if self.usable.len() < self.k {
                // not enough substitutable positions for this k
                self.done = true;
                return None;
            }
            self.comb = (0..self.k).collect();
            self.odo = vec![0; self.k];
        }
        let cand = self.assemble();
        self.advance();
        Some(cand)
    }
}

/// Largest k such that keeping n-k of n reference segments still meets the
/// minimum overlap ratio. Exact rational comparison, no floats.
fn max_substitutions(n: usize, min_overlap: Ratio) -> usize {
    let mut max = 0;
    for k in 1..=n {
        let kept = (n - k) as u32;
        match Ratio::new(kept, n as u32) {
            Some(overlap) if overlap >= min_overlap => max = k,
            _ => break,
        }
    }
    max
}

/// Substitutes considered for position `i`, most plausible first.
///
/// A segment is admitted when the transition table links it to at least
/// one reference neighbor (either side). Single-segment references have no
/// neighbors, so any weighted inventory segment is admitted there.
/// Neighbors are always taken from the reference, not from other
/// substituted slots; the check stays O(1) per alternative and the order
/// does not depend on mask interactions.
fn slot_alternatives(
    reference: &[String],
    i: usize,
    model: &LanguageModel,
    constraints: &Constraints,
    config: &Config,
) -> Vec<String> {
    let stats = model.stats();
    let original = reference[i].as_str();
    let original_len = original.chars().count();
    let prev = if i > 0 { Some(reference[i - 1].as_str()) } else { None };
    let next = reference.get(i + 1).map(|s| s.as_str());

    let mut scored: Vec<(String, f64)> = stats
        .segments()
        .filter(|&s| s != original)
        .filter(|&s| !constraints.match_length || s.chars().count() == original_len)
        .filter_map(|s| {
            let from_prev = prev.map(|p| stats.transition_prob(p, s)).unwrap_or(0.0);
            let into_next = next.map(|x| stats.transition_prob(s, x)).unwrap_or(0.0);
            let adjacent = from_prev + into_next;
            if adjacent > 0.0 {
                Some((s.to_string(), adjacent))
            } else if prev.is_none() && next.is_none() && stats.weight(s) > 0 {
                // isolated position: no context to test against
                Some((s.to_string(), stats.plausibility(s)))
            } else {
                None
            }
        })
        .collect();

    // Hash-map iteration order must not leak into the enumeration.
    scored.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    if scored.len() > config.max_alternatives {
        trace!(
            position = i,
            dropped = scored.len() - config.max_alternatives,
            "slot alternatives capped"
        );
        scored.truncate(config.max_alternatives);
    }
    scored.into_iter().map(|(s, _)| s).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::Lexicon;
    use crate::segmenter::segment;
    use crate::stats::SegmentStats;

    fn model() -> LanguageModel {
        let mut stats = SegmentStats::new();
        for seg in ["tr", "br", "dr", "u", "a", "mp", "nt", "e", "t", "d"] {
            stats.add_segment(seg, 5);
        }
        // transitions around the "trumpet" skeleton
        for (a, b, c) in [
            ("tr", "u", 10),
            ("br", "u", 8),
            ("dr", "u", 6),
            ("u", "mp", 10),
            ("a", "mp", 4),
            ("u", "nt", 3),
            ("mp", "e", 10),
            ("nt", "e", 2),
            ("e", "t", 10),
            ("e", "d", 5),
        ] {
            stats.add_transition(a, b, c);
        }
        LanguageModel::new("test", Lexicon::from_words(["trumpet"]), stats)
    }

    fn constraints(min: Ratio, match_length: bool) -> Constraints {
        Constraints {
            ncandidates: 10,
            time_budget: std::time::Duration::from_secs(1),
            match_length,
            min_overlap: min,
        }
    }

    #[test]
    fn overlap_bound_prunes_k() {
        assert_eq!(max_substitutions(5, Ratio::new(2, 3).unwrap()), 1);
        assert_eq!(max_substitutions(6, Ratio::new(2, 3).unwrap()), 2);
        assert_eq!(max_substitutions(5, Ratio::ZERO), 5);
        assert_eq!(max_substitutions(5, Ratio::ONE), 0);
        assert_eq!(max_substitutions(0, Ratio::ZERO), 0);
    }

    #[test]
    fn single_substitutions_come_first() {
        let m = model();
        let reference = segment("trumpet", &m).unwrap();
        let cfg = Config::default();
        let cons = constraints(Ratio::new(2, 3).unwrap(), true);
        let iter = CandidateIter::new(&reference, &m, &cons, &cfg);

        // 5 reference segments, 2/3 minimum -> k is capped at 1
        let cands: Vec<Candidate> = iter.collect();
        assert!(!cands.is_empty());
        assert!(cands.iter().all(|c| c.kept == 4));
    }

    #[test]
    fn most_plausible_alternative_leads() {
        let m = model();
        let reference = segment("trumpet", &m).unwrap();
        let cfg = Config::default();
        let cons = constraints(Ratio::new(2, 3).unwrap(), true);
        let mut iter = CandidateIter::new(&reference, &m, &cons, &cfg);

        // position 0 substitutions lead; "br" beats "dr" on P(u | onset)
        let first = iter.next().unwrap();
        assert_eq!(first.text, "brumpet");
        let second = iter.next().unwrap();
        assert_eq!(second.text, "drumpet");
    }

    #[test]
    fn match_length_filters_alternatives() {
        let m = model();
        let reference = segment("trumpet", &m).unwrap();
        let cfg = Config::default();
        let cons = constraints(Ratio::ZERO, true);
        let reference_len = reference.char_len();
        for cand in CandidateIter::new(&reference, &m, &cons, &cfg).take(200) {
            assert_eq!(cand.text.chars().count(), reference_len);
        }
    }

    #[test]
    fn enumeration_is_deterministic() {
        let m = model();
        let reference = segment("trumpet", &m).unwrap();
        let cfg = Config::default();
        let cons = constraints(Ratio::ZERO, true);
        let a: Vec<String> = CandidateIter::new(&reference, &m, &cons, &cfg)
            .take(50)
            .map(|c| c.text)
            .collect();
        let b: Vec<String> = CandidateIter::new(&reference, &m, &cons, &cfg)
            .take(50)
            .map(|c| c.text)
            .collect();
        assert_eq!(a, b);
    }

    #[test]
    fn unreachable_overlap_yields_nothing() {
        let m = model();
        let reference = segment("trumpet", &m).unwrap();
        let cfg = Config::default();
        let cons = constraints(Ratio::ONE, true);
        assert_eq!(CandidateIter::new(&reference, &m, &cons, &cfg).count(), 0);
    }
}
