//! Exact rational numbers for the overlap threshold.
//!
//! Acceptance decisions compare a candidate's overlap ratio against the
//! configured minimum. Doing that in floating point makes candidates near
//! an exact fraction (say 2/3) flap between accepted and rejected across
//! platforms, so the comparison is kept in integer arithmetic throughout:
//! `a/b <= c/d` iff `a*d <= c*b`, widened to u64 so it cannot overflow for
//! any realistic segment count.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A non-negative rational with a nonzero denominator.
///
/// Not reduced on construction; ordering and equality are value-based
/// (cross-multiplied), so `2/6` equals `1/3`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Ratio {
    num: u32,
    den: u32,
}

impl Ratio {
    pub const ZERO: Ratio = Ratio { num: 0, den: 1 };
    pub const ONE: Ratio = Ratio { num: 1, den: 1 };

    /// Build a ratio. Returns `None` when the denominator is zero.
    pub fn new(num: u32, den: u32) -> Option<Self> {
        if den == 0 {
            None
        } else {
            Some(Ratio { num, den })
        }
    }

    pub fn numer(&self) -> u32 {
        self.num
    }

    pub fn denom(&self) -> u32 {
        self.den
    }

    /// Lossy conversion for scoring only. Never used in threshold checks.
    pub fn as_f64(&self) -> f64 {
        self.num as f64 / self.den as f64
    }
}

impl PartialEq for Ratio {
    fn eq(&self, other: &Self) -> bool {
        self.num as u64 * other.den as u64 == other.num as u64 * self.den as u64
    }
}

impl Eq for Ratio {}

impl PartialOrd for Ratio {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Ratio {
    fn cmp(&self, other: &Self) -> Ordering {
        let lhs = self.num as u64 * other.den as u64;
        let rhs = other.num as u64 * self.den as u64;
        lhs.cmp(&rhs)
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}

/// Parse `"2/3"` or a bare integer `"1"`.
impl FromStr for Ratio {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        let (num, den) = match s.split_once('/') {
            Some((n, d)) => {
                let num = n.trim().parse::<u32>().map_err(|e| e.to_string())?;
                let den = d.trim().parse::<u32>().map_err(|e| e.to_string())?;
                (num, den)
            }
            None => (s.parse::<u32>().map_err(|e| e.to_string())?, 1),
        };
        Ratio::new(num, den).ok_or_else(|| format!("zero denominator in ratio {:?}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_is_exact() {
        let two_thirds = Ratio::new(2, 3).unwrap();
        let four_sixths = Ratio::new(4, 6).unwrap();
        assert_eq!(two_thirds, four_sixths);

        // 3/5 < 2/3 < 4/5, none of which are float-friendly
        assert!(Ratio::new(3, 5).unwrap() < two_thirds);
        assert!(two_thirds < Ratio::new(4, 5).unwrap());
    }

    #[test]
    fn boundary_is_not_flappy() {
        // 4 kept out of 6 is exactly 2/3 and must pass a >= 2/3 threshold
        let overlap = Ratio::new(4, 6).unwrap();
        let min = Ratio::new(2, 3).unwrap();
        assert!(overlap >= min);
    }

    #[test]
    fn parse_forms() {
        assert_eq!("2/3".parse::<Ratio>().unwrap(), Ratio::new(2, 3).unwrap());
        assert_eq!("1".parse::<Ratio>().unwrap(), Ratio::ONE);
        assert!(" 3 / 4 ".parse::<Ratio>().is_ok());
        assert!("1/0".parse::<Ratio>().is_err());
        assert!("x/2".parse::<Ratio>().is_err());
    }

    #[test]
    fn zero_denominator_rejected() {
        assert!(Ratio::new(1, 0).is_none());
    }
}
