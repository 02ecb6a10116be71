// core/src/engine.rs
//
// Public entry point: one engine per language, composing segmentation,
// candidate enumeration, scoring and the bounded search.

use lru::LruCache;
use std::cell::RefCell;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tracing::debug;

use crate::candidates::CandidateIter;
use crate::error::Result;
use crate::model::LanguageModel;
use crate::registry;
use crate::scheduler::{Scheduler, SearchOutcome};
use crate::segmenter::{segment, Segmentation};
use crate::utils;
use crate::{Config, Constraints};

/// Per-reference result of a batched call. A structural error on one
/// reference leaves its siblings untouched.
#[derive(Debug)]
pub struct SequenceResult {
    pub reference: String,
    pub outcome: Result<SearchOutcome>,
}

/// Pseudoword generation engine for one language.
///
/// The model is shared read-only (`Arc`); everything request-scoped is
/// owned by the call. The engine itself is cheap to construct, so
/// parallel callers can each hold their own (the segmentation cache is
/// intentionally per-engine and behind a `RefCell`).
#[derive(Debug)]
pub struct Engine {
    model: Arc<LanguageModel>,
    config: Config,
    seg_cache: RefCell<LruCache<String, Segmentation>>,
}

impl Engine {
    pub fn new(model: Arc<LanguageModel>) -> Self {
        Self::with_config(model, Config::default())
    }

    pub fn with_config(model: Arc<LanguageModel>, config: Config) -> Self {
        let capacity = NonZeroUsize::new(config.max_cache_size)
            .unwrap_or_else(|| NonZeroUsize::new(256).expect("nonzero literal"));
        Self {
            model,
            config,
            seg_cache: RefCell::new(LruCache::new(capacity)),
        }
    }

    /// Resolve a language from the process registry. Fails with
    /// `UnknownLanguage` before any search work happens.
    pub fn for_language(id: &str) -> Result<Self> {
        registry::require(id).map(Self::new)
    }

    pub fn model(&self) -> &Arc<LanguageModel> {
        &self.model
    }

    /// Generate pseudowords for a batch of reference sequences.
    ///
    /// References are processed independently, in caller order, one
    /// bounded search attempt each. The returned vector preserves that
    /// order; each entry carries either a terminal `SearchOutcome`
    /// (possibly empty on timeout) or the structural error for that
    /// reference alone.
    pub fn generate_classic(
        &self,
        references: &[&str],
        constraints: &Constraints,
    ) -> Vec<SequenceResult> {
        references
            .iter()
            .map(|reference| SequenceResult {
                reference: (*reference).to_string(),
                outcome: self.generate_one(reference, constraints),
            })
            .collect()
    }

    /// One reference sequence, one search attempt.
    pub fn generate_one(&self, reference: &str, constraints: &Constraints) -> Result<SearchOutcome> {
        let normalized = utils::normalize(reference);
        let segmentation = self.segmentation_for(&normalized)?;
        debug!(
            language = self.model.id(),
            reference = %normalized,
            segments = segmentation.len(),
            "starting search"
        );
        let candidates = CandidateIter::new(&segmentation, &self.model, constraints, &self.config);
        let outcome = Scheduler::new().run(
            candidates,
            &segmentation,
            constraints,
            &self.model,
            &self.config,
        );
        Ok(outcome)
    }

    fn segmentation_for(&self, normalized: &str) -> Result<Segmentation> {
        if let Some(cached) = self.seg_cache.borrow_mut().get(normalized) {
            return Ok(cached.clone());
        }
        let seg = segment(normalized, &self.model)?;
        self.seg_cache
            .borrow_mut()
            .put(normalized.to_string(), seg.clone());
        Ok(seg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::lexicon::Lexicon;
    use crate::ratio::Ratio;
    use crate::scheduler::SearchStatus;
    use crate::stats::SegmentStats;
    use std::time::Duration;

    fn model() -> Arc<LanguageModel> {
        let mut stats = SegmentStats::new();
        for seg in ["tr", "br", "dr", "u", "a", "mp", "nt", "e", "t", "d"] {
            stats.add_segment(seg, 3);
        }
        for (a, b) in [
            ("tr", "u"),
            ("br", "u"),
            ("dr", "u"),
            ("u", "mp"),
            ("a", "mp"),
            ("mp", "e"),
            ("e", "t"),
            ("e", "d"),
        ] {
            stats.add_transition(a, b, 2);
        }
        Arc::new(LanguageModel::new(
            "engine_test",
            Lexicon::from_words(["trumpet"]),
            stats,
        ))
    }

    fn constraints() -> Constraints {
        Constraints {
            ncandidates: 3,
            time_budget: Duration::from_secs(5),
            match_length: true,
            min_overlap: Ratio::new(2, 3).unwrap(),
        }
    }

    #[test]
    fn batch_preserves_order_and_isolates_errors() {
        let engine = Engine::new(model());
        let results = engine.generate_classic(&["trumpet", "qqq", "trumpet"], &constraints());
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].reference, "trumpet");
        assert!(results[0].outcome.is_ok());
        // 'q' is not in the inventory; only the middle entry fails
        assert!(matches!(
            results[1].outcome,
            Err(Error::InvalidSequence(_))
        ));
        assert!(results[2].outcome.is_ok());
    }

    #[test]
    fn input_is_normalized_before_segmentation() {
        let engine = Engine::new(model());
        let outcome = engine.generate_one("  TRUMPET ", &constraints()).unwrap();
        assert_eq!(outcome.status, SearchStatus::Completed);
        assert!(!outcome.results.is_empty());
    }

    #[test]
    fn for_language_unknown_fails_before_search() {
        let err = Engine::for_language("orthographic_klingon").unwrap_err();
        assert!(matches!(err, Error::UnknownLanguage(_)));
    }

    #[test]
    fn segmentation_cache_round_trips() {
        let engine = Engine::new(model());
        let a = engine.segmentation_for("trumpet").unwrap();
        let b = engine.segmentation_for("trumpet").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.concat(), "trumpet");
    }
}
