//! Lexicon: the set of real words of a language.
//!
//! Candidates that appear here are rejected — a pseudoword must not be an
//! existing word. Lookups are exact matches over normalized (NFC,
//! lowercased) spellings.
//!
//! Storage has two halves: an in-memory hash set for words inserted at
//! build time, plus an optional `fst::Set` for compiled word lists loaded
//! from a bundle. The fst half keeps large lexicons compact without
//! rehydrating them into the heap.

use ahash::AHashSet;
use fst::Set;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Word set with a dynamic and a compiled half.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    words: AHashSet<String>,
    fst_set: Option<Set<Vec<u8>>>,
}

impl Lexicon {
    pub fn new() -> Self {
        Self {
            words: AHashSet::new(),
            fst_set: None,
        }
    }

    /// Build a lexicon from an iterator of words. Spellings are lowercased.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut lx = Self::new();
        for w in words {
            lx.insert(w.as_ref());
        }
        lx
    }

    /// Insert a single word into the dynamic half.
    pub fn insert(&mut self, word: &str) {
        let word = word.trim().to_lowercase();
        if !word.is_empty() {
            self.words.insert(word);
        }
    }

    /// Exact-match membership test against both halves.
    pub fn contains(&self, word: &str) -> bool {
        if self.words.contains(word) {
            return true;
        }
        match &self.fst_set {
            Some(set) => set.contains(word),
            None => false,
        }
    }

    /// Number of dynamically inserted words (the fst half is opaque).
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty() && self.fst_set.is_none()
    }

    /// Iterate the dynamic half (bundle compilation walks this).
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(|s| s.as_str())
    }

    /// Load a compiled word list produced by the bundle compiler.
    pub fn load_fst<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();
        let mut f =
            File::open(path).map_err(|e| format!("open fst {}: {}", path.display(), e))?;
        let mut buf = Vec::new();
        f.read_to_end(&mut buf)
            .map_err(|e| format!("read fst: {}", e))?;
        let set = Set::new(buf).map_err(|e| format!("fst set: {}", e))?;
        Ok(Self {
            words: AHashSet::new(),
            fst_set: Some(set),
        })
    }

    /// Compile the dynamic half into fst bytes (sorted, deduplicated).
    pub fn compile_fst(&self) -> Result<Vec<u8>, String> {
        let mut sorted: Vec<&str> = self.words.iter().map(|s| s.as_str()).collect();
        sorted.sort_unstable();
        let mut builder = fst::SetBuilder::memory();
        for w in sorted {
            builder.insert(w).map_err(|e| format!("fst insert: {}", e))?;
        }
        builder
            .into_inner()
            .map_err(|e| format!("fst finish: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_contains() {
        let mut lx = Lexicon::new();
        lx.insert("Trumpet");
        lx.insert("  drum ");
        assert!(lx.contains("trumpet"));
        assert!(lx.contains("drum"));
        assert!(!lx.contains("trumpets"));
    }

    #[test]
    fn compiled_half_is_queried() {
        let lx = Lexicon::from_words(["apple", "pear", "plum"]);
        let bytes = lx.compile_fst().unwrap();
        let compiled = Lexicon {
            words: AHashSet::new(),
            fst_set: Some(Set::new(bytes).unwrap()),
        };
        assert!(compiled.contains("pear"));
        assert!(!compiled.contains("peach"));
    }

    #[test]
    fn empty_lexicon() {
        let lx = Lexicon::new();
        assert!(lx.is_empty());
        assert!(!lx.contains("anything"));
    }
}
