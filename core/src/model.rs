//! The loaded language resource: lexicon, segment inventory, statistics.
//!
//! A `LanguageModel` is built once (from a bundle directory or in code by
//! a language crate), is immutable afterwards, and is shared read-only
//! across requests behind an `Arc`. Generation never mutates it.
//!
//! Bundle directory layout:
//!  - `lexicon.fst` or `lexicon.txt`   word list (fst preferred)
//!  - `stats.bin`                      compiled SegmentStats (bincode)
//!  - `segments.tsv` + `transitions.tsv`  text tables, used when no
//!    compiled stats are present: `segment<TAB>weight` and
//!    `a<TAB>b<TAB>count`, one record per line, `#` comments allowed.

use ahash::AHashSet;
use std::path::Path;
use tracing::debug;

use crate::error::{Error, Result};
use crate::lexicon::Lexicon;
use crate::stats::SegmentStats;
use crate::trie::SegmentTrie;

/// Immutable language resource. Lives for the process lifetime once
/// installed in the registry.
#[derive(Debug)]
pub struct LanguageModel {
    id: String,
    lexicon: Lexicon,
    stats: SegmentStats,
    inventory: SegmentTrie,
    alphabet: AHashSet<char>,
}

impl LanguageModel {
    /// Assemble a model from its parts. The segment inventory and the
    /// alphabet are derived from the statistics' segment set.
    pub fn new<I: Into<String>>(id: I, lexicon: Lexicon, stats: SegmentStats) -> Self {
        let mut inventory = SegmentTrie::new();
        let mut alphabet = AHashSet::new();
        for seg in stats.segments() {
            inventory.insert(seg);
            alphabet.extend(seg.chars());
        }
        Self {
            id: id.into(),
            lexicon,
            stats,
            inventory,
            alphabet,
        }
    }

    /// Parse a bundle directory into a model.
    ///
    /// Fails with `ResourceUnavailable` when a required file is missing or
    /// malformed; there is no download or repair path here.
    pub fn from_bundle_dir<P: AsRef<Path>>(id: &str, dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(Error::resource(
                id,
                format!("bundle directory {} does not exist", dir.display()),
            ));
        }

        let lexicon = {
            let fst_path = dir.join("lexicon.fst");
            let txt_path = dir.join("lexicon.txt");
            if fst_path.is_file() {
                Lexicon::load_fst(&fst_path).map_err(|e| Error::resource(id, e))?
            } else if txt_path.is_file() {
                let text = std::fs::read_to_string(&txt_path)
                    .map_err(|e| Error::resource(id, format!("read lexicon.txt: {}", e)))?;
                Lexicon::from_words(text.lines().filter(|l| !l.trim().is_empty()))
            } else {
                return Err(Error::resource(id, "no lexicon.fst or lexicon.txt in bundle"));
            }
        };

        let stats_bin = dir.join("stats.bin");
        let stats = if stats_bin.is_file() {
            SegmentStats::load(&stats_bin).map_err(|e| Error::resource(id, e))?
        } else {
            let segments = std::fs::read_to_string(dir.join("segments.tsv"))
                .map_err(|e| Error::resource(id, format!("read segments.tsv: {}", e)))?;
            let transitions = std::fs::read_to_string(dir.join("transitions.tsv"))
                .map_err(|e| Error::resource(id, format!("read transitions.tsv: {}", e)))?;
            parse_stats_tables(id, &segments, &transitions)?
        };

        if stats.is_empty() {
            return Err(Error::resource(id, "bundle has an empty segment table"));
        }

        let model = Self::new(id, lexicon, stats);
        debug!(
            language = %model.id,
            alphabet = model.alphabet.len(),
            "loaded language bundle from {}",
            dir.display()
        );
        Ok(model)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn stats(&self) -> &SegmentStats {
        &self.stats
    }

    pub fn inventory(&self) -> &SegmentTrie {
        &self.inventory
    }

    /// True when the (normalized) spelling is a real word of the language.
    pub fn is_word(&self, spelling: &str) -> bool {
        self.lexicon.contains(spelling)
    }

    /// True when every character of the sequence is covered by the
    /// segment inventory.
    pub fn in_alphabet(&self, sequence: &str) -> bool {
        sequence.chars().all(|c| self.alphabet.contains(&c))
    }
}

fn parse_stats_tables(id: &str, segments: &str, transitions: &str) -> Result<SegmentStats> {
    let mut stats = SegmentStats::new();
    for (lineno, line) in segments.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut cols = line.split('\t');
        match (cols.next(), cols.next()) {
            (Some(seg), Some(w)) => {
                let weight: u32 = w.trim().parse().map_err(|_| {
                    Error::resource(id, format!("segments.tsv line {}: bad weight", lineno + 1))
                })?;
                stats.add_segment(seg.trim(), weight);
            }
            _ => {
                return Err(Error::resource(
                    id,
                    format!("segments.tsv line {}: expected segment<TAB>weight", lineno + 1),
                ))
            }
        }
    }
    for (lineno, line) in transitions.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut cols = line.split('\t');
        match (cols.next(), cols.next(), cols.next()) {
            (Some(a), Some(b), Some(c)) => {
                let count: u32 = c.trim().parse().map_err(|_| {
                    Error::resource(id, format!("transitions.tsv line {}: bad count", lineno + 1))
                })?;
                stats.add_transition(a.trim(), b.trim(), count);
            }
            _ => {
                return Err(Error::resource(
                    id,
                    format!(
                        "transitions.tsv line {}: expected a<TAB>b<TAB>count",
                        lineno + 1
                    ),
                ))
            }
        }
    }
    Ok(stats)
}
