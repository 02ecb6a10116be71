// core/src/score.rs
//
// Accept/reject decisions and ranking scores for assembled candidates.
//
// Overlap is recomputed here from the candidate's own segmentation — the
// generator's kept-position count is only a pruning bound. The threshold
// comparison is exact rational arithmetic; the score itself may be float
// (it only orders accepted candidates, it never gates acceptance).

use crate::candidates::Candidate;
use crate::error::Result;
use crate::model::LanguageModel;
use crate::ratio::Ratio;
use crate::segmenter::{segment, Segmentation};
use crate::{Config, Constraints};

/// Why a candidate was filtered out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Present in the language's lexicon.
    IsRealWord,
    /// `match_length` is set and character counts differ.
    LengthMismatch,
    /// Recomputed overlap ratio falls below the configured minimum.
    OverlapBelowThreshold,
}

/// An accepted candidate with its recomputed overlap and ranking score.
#[derive(Debug, Clone, PartialEq)]
pub struct Scored {
    pub text: String,
    pub overlap: Ratio,
    pub score: f64,
}

/// Outcome of evaluating one candidate.
#[derive(Debug, Clone, PartialEq)]
pub enum Evaluation {
    Accepted(Scored),
    Rejected(Rejection),
}

/// Evaluate a candidate against the reference and constraints.
///
/// Checks run cheapest-first: lexicon membership, character length, then
/// the segmentation-based overlap recomputation. The score is a weighted
/// sum of overlap and mean segment plausibility; identical inputs always
/// produce identical scores (ordering ties are broken downstream by
/// discovery order).
pub fn evaluate(
    candidate: &Candidate,
    reference: &Segmentation,
    constraints: &Constraints,
    model: &LanguageModel,
    config: &Config,
) -> Result<Evaluation> {
    if model.is_word(&candidate.text) {
        return Ok(Evaluation::Rejected(Rejection::IsRealWord));
    }

    if constraints.match_length && candidate.text.chars().count() != reference.char_len() {
        return Ok(Evaluation::Rejected(Rejection::LengthMismatch));
    }

    let derived = segment(&candidate.text, model)?;
    let overlap = overlap_ratio(&derived, reference);
    if overlap < constraints.min_overlap {
        return Ok(Evaluation::Rejected(Rejection::OverlapBelowThreshold));
    }

    let stats = model.stats();
    let plausibility = if derived.is_empty() {
        0.0
    } else {
        derived
            .segments()
            .iter()
            .map(|s| stats.plausibility(s))
            .sum::<f64>()
            / derived.len() as f64
    };
    let score = config.overlap_weight * overlap.as_f64() + config.frequency_weight * plausibility;

    Ok(Evaluation::Accepted(Scored {
        text: candidate.text.clone(),
        overlap,
        score,
    }))
}

/// Fraction of reference positions whose segment reappears, same position
/// and content, in the candidate's segmentation.
pub fn overlap_ratio(candidate: &Segmentation, reference: &Segmentation) -> Ratio {
    let n = reference.len();
    if n == 0 {
        return Ratio::ONE;
    }
    let matched = reference
        .segments()
        .iter()
        .zip(candidate.segments())
        .filter(|(a, b)| a == b)
        .count();
    // n > 0 here, so the denominator is nonzero
    Ratio::new(matched as u32, n as u32).unwrap_or(Ratio::ZERO)
}
