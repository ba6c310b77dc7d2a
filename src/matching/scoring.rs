use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::core::condition::Condition;

/// Safely convert usize to f64 for ratio display
#[inline]
fn count_to_f64(count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}

/// Fraction of a condition's signature that was observed
///
/// Kept as an exact `matched / total` pair so equal ratios such as 1/2 and
/// 2/4 compare equal without floating point error.
#[derive(Debug, Clone, Copy)]
pub struct MatchRatio {
    pub matched: usize,
    pub total: usize,
}

impl MatchRatio {
    /// Returns `None` unless `0 < matched <= total`
    #[must_use]
    pub fn new(matched: usize, total: usize) -> Option<Self> {
        (matched > 0 && matched <= total).then_some(Self { matched, total })
    }

    #[must_use]
    pub fn value(&self) -> f64 {
        count_to_f64(self.matched) / count_to_f64(self.total)
    }

    /// Whole-number percentage, as shown to owners
    #[must_use]
    pub fn percent(&self) -> u32 {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // 0-100
        {
            (self.value() * 100.0).round() as u32
        }
    }
}

impl PartialEq for MatchRatio {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for MatchRatio {}

impl PartialOrd for MatchRatio {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MatchRatio {
    fn cmp(&self, other: &Self) -> Ordering {
        // a/b vs c/d  <=>  a*d vs c*b
        (self.matched * other.total).cmp(&(other.matched * self.total))
    }
}

impl std::fmt::Display for MatchRatio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.matched, self.total)
    }
}

impl Serialize for MatchRatio {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("MatchRatio", 3)?;
        state.serialize_field("matched", &self.matched)?;
        state.serialize_field("total", &self.total)?;
        state.serialize_field("value", &self.value())?;
        state.end()
    }
}

/// Overlap between an observed symptom set and one condition's signature
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymptomMatch {
    /// Matched labels in the condition's defined order
    pub matched: Vec<String>,
    pub ratio: MatchRatio,
}

impl SymptomMatch {
    /// Intersect `observed` with the signature of `condition`
    ///
    /// Returns `None` when nothing overlaps; such conditions are never ranked.
    #[must_use]
    pub fn calculate(observed: &BTreeSet<String>, condition: &Condition) -> Option<Self> {
        let matched: Vec<String> = condition
            .symptoms
            .iter()
            .filter(|s| observed.contains(*s))
            .cloned()
            .collect();

        let ratio = MatchRatio::new(matched.len(), condition.signature_len())?;
        Some(Self { matched, ratio })
    }
}
