// core/src/stats.rs
//
// Segment-level statistics: unigram weights and adjacency transitions.
// Stores count(b follows a) to judge which substitutions keep a candidate
// orthographically plausible, and per-segment weights for scoring.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Entry in a segment's transition distribution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionEntry {
    pub segment: String,
    pub count: u32,
}

/// Unigram weights plus first-order adjacency counts over segments.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SegmentStats {
    /// Per-segment weight (occurrence count in the source corpus).
    weights: AHashMap<String, u32>,
    /// Transition data: segment -> [(following segment, count), ...]
    transitions: AHashMap<String, Vec<TransitionEntry>>,
    /// Total outgoing count per segment (for normalization).
    totals: AHashMap<String, u32>,
    /// Largest unigram weight seen (for [0,1] plausibility).
    max_weight: u32,
}

impl SegmentStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `count` occurrences of a segment.
    pub fn add_segment(&mut self, segment: &str, count: u32) {
        let w = self.weights.entry(segment.to_string()).or_insert(0);
        *w = w.saturating_add(count);
        if *w > self.max_weight {
            self.max_weight = *w;
        }
    }

    /// Record `count` observations of `b` directly following `a`.
    pub fn add_transition(&mut self, a: &str, b: &str, count: u32) {
        let bucket = self.transitions.entry(a.to_string()).or_default();
        if let Some(e) = bucket.iter_mut().find(|e| e.segment == b) {
            e.count = e.count.saturating_add(count);
        } else {
            bucket.push(TransitionEntry {
                segment: b.to_string(),
                count,
            });
        }
        let t = self.totals.entry(a.to_string()).or_insert(0);
        *t = t.saturating_add(count);
    }

    /// Unigram weight of a segment (0 if unseen).
    pub fn weight(&self, segment: &str) -> u32 {
        self.weights.get(segment).copied().unwrap_or(0)
    }

    /// Weight scaled into [0, 1] by the largest weight in the model.
    pub fn plausibility(&self, segment: &str) -> f64 {
        if self.max_weight == 0 {
            return 0.0;
        }
        self.weight(segment) as f64 / self.max_weight as f64
    }

    /// Raw count of `b` following `a`.
    pub fn transition_count(&self, a: &str, b: &str) -> u32 {
        self.transitions
            .get(a)
            .and_then(|v| v.iter().find(|e| e.segment == b))
            .map(|e| e.count)
            .unwrap_or(0)
    }

    /// P(b | a) over observed transitions; 0.0 when unseen.
    pub fn transition_prob(&self, a: &str, b: &str) -> f64 {
        let count = self.transition_count(a, b);
        if count == 0 {
            return 0.0;
        }
        match self.totals.get(a) {
            Some(&total) if total > 0 => count as f64 / total as f64,
            _ => 0.0,
        }
    }

    /// True when `b` has been observed following `a` at least once.
    pub fn can_follow(&self, a: &str, b: &str) -> bool {
        self.transition_count(a, b) > 0
    }

    /// All segments with a unigram weight.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.weights.keys().map(|s| s.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Load from a bincode file produced by `save`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let file = File::open(&path)
            .map_err(|e| format!("open stats {}: {}", path.as_ref().display(), e))?;
        let reader = BufReader::new(file);
        bincode::deserialize_from(reader).map_err(|e| format!("deserialize stats: {}", e))
    }

    /// Save to a bincode file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), String> {
        let file = File::create(&path)
            .map_err(|e| format!("create stats {}: {}", path.as_ref().display(), e))?;
        let writer = BufWriter::new(file);
        bincode::serialize_into(writer, self).map_err(|e| format!("serialize stats: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transition_probability() {
        let mut st = SegmentStats::new();
        st.add_transition("tr", "u", 10);
        st.add_transition("tr", "i", 5);

        assert!((st.transition_prob("tr", "u") - 10.0 / 15.0).abs() < 1e-12);
        assert!((st.transition_prob("tr", "i") - 5.0 / 15.0).abs() < 1e-12);
        assert_eq!(st.transition_prob("tr", "o"), 0.0);
        assert!(st.can_follow("tr", "u"));
        assert!(!st.can_follow("u", "tr"));
    }

    #[test]
    fn repeated_observations_accumulate() {
        let mut st = SegmentStats::new();
        st.add_transition("a", "b", 1);
        st.add_transition("a", "b", 3);
        assert_eq!(st.transition_count("a", "b"), 4);
    }

    #[test]
    fn plausibility_is_normalized() {
        let mut st = SegmentStats::new();
        st.add_segment("e", 100);
        st.add_segment("zz", 1);
        assert_eq!(st.plausibility("e"), 1.0);
        assert!(st.plausibility("zz") < 0.05);
        assert_eq!(st.plausibility("missing"), 0.0);
    }

    #[test]
    fn bincode_roundtrip() {
        let tmp = std::env::temp_dir().join(format!("pseudolex_stats_{}.bin", std::process::id()));
        let mut st = SegmentStats::new();
        st.add_segment("tr", 7);
        st.add_transition("tr", "u", 2);
        st.save(&tmp).unwrap();
        let loaded = SegmentStats::load(&tmp).unwrap();
        assert_eq!(loaded.weight("tr"), 7);
        assert_eq!(loaded.transition_count("tr", "u"), 2);
        let _ = std::fs::remove_file(tmp);
    }
}
