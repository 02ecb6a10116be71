//! pseudolex-core
//!
//! Language model, segmentation and time-bounded constrained search for
//! pseudoword generation, shared by language plugin crates.
//!
//! A pseudoword is a sequence that is not a real word of the language but
//! preserves chosen structural properties of a reference word: its
//! character length, and a minimum fraction of its subsyllabic segments.
//!
//! Public API:
//! - `LanguageModel` — immutable language resource (lexicon, segment
//!   inventory, transition statistics)
//! - `segment` / `Segmentation` — deterministic subsyllabic segmentation
//! - `Constraints` — per-request generation constraints
//! - `Engine` — per-language facade: `generate_classic` over a batch of
//!   reference sequences
//! - `registry` — process-wide identifier -> model map
//! - `SearchOutcome` / `SearchStatus` — terminal search results

use serde::{Deserialize, Serialize};
use std::time::Duration;

pub mod error;
pub use error::{Error, Result};

pub mod ratio;
pub use ratio::Ratio;

pub mod lexicon;
pub use lexicon::Lexicon;

pub mod trie;
pub use trie::SegmentTrie;

pub mod stats;
pub use stats::SegmentStats;

pub mod model;
pub use model::LanguageModel;

pub mod segmenter;
pub use segmenter::{segment, Segmentation};

pub mod candidates;
pub use candidates::{Candidate, CandidateIter};

pub mod score;
pub use score::{evaluate, Evaluation, Rejection, Scored};

pub mod scheduler;
pub use scheduler::{ResultEntry, Scheduler, SearchOutcome, SearchStatus};

pub mod registry;

pub mod engine;
pub use engine::{Engine, SequenceResult};

/// Default wall-clock budget for one search attempt.
pub const DEFAULT_TIME_BUDGET: Duration = Duration::from_secs(25);

/// Engine tuning knobs. Generation requests carry their own
/// `Constraints`; this configures how the engine searches, not what it
/// accepts.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Score weight on the recomputed overlap ratio.
    pub overlap_weight: f64,
    /// Score weight on mean segment plausibility.
    pub frequency_weight: f64,
    /// Per-position cap on substitution alternatives. Bounds the
    /// enumeration product so one scheduler tick stays cheap.
    pub max_alternatives: usize,
    /// Capacity of the per-engine segmentation cache.
    pub max_cache_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            overlap_weight: 0.75,
            frequency_weight: 0.25,
            max_alternatives: 24,
            max_cache_size: 256,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<std::path::Path>>(
        path: P,
    ) -> std::result::Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<std::path::Path>>(
        &self,
        path: P,
    ) -> std::result::Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

/// Constraints of one generation request. Immutable once built; one
/// instance per `generate_classic` call.
#[derive(Debug, Clone)]
pub struct Constraints {
    /// Target number of accepted pseudowords per reference sequence.
    pub ncandidates: usize,
    /// Wall-clock budget per reference sequence.
    pub time_budget: Duration,
    /// Require candidate character length == reference character length.
    pub match_length: bool,
    /// Minimum fraction of reference segments preserved by position.
    pub min_overlap: Ratio,
}

impl Default for Constraints {
    fn default() -> Self {
        Self {
            ncandidates: 10,
            time_budget: DEFAULT_TIME_BUDGET,
            match_length: true,
            min_overlap: Ratio::new(2, 3).unwrap_or(Ratio::ZERO),
        }
    }
}

/// Utility helpers.
pub mod utils {
    /// Normalize input sequences: NFC, trimmed, lowercased. Applied once
    /// per reference before segmentation; lexicon spellings go through
    /// the same form at build time.
    pub fn normalize(s: &str) -> String {
        use unicode_normalization::UnicodeNormalization;
        s.nfc().collect::<String>().trim().to_lowercase()
    }
}
