//! Percentage finalization and dual-constitution classification.
//!
//! percentage_d = round_half_up(score_d / Σscores × 100), computed in integer
//! arithmetic. The rounding remainder (at most one point) goes to the dosha
//! with the largest raw score so the split always sums to exactly 100.

use serde::{Deserialize, Serialize};

use crate::models::{Dosha, DoshaPercentages, DoshaScores};

use super::{AssessmentError, AssessmentResult};

/// Explicit tie-break order, most preferred first.
///
/// Used wherever two doshas compare equal: picking the remainder recipient
/// and ordering primary/secondary.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DoshaPreference([Dosha; 3]);

impl Default for DoshaPreference {
    fn default() -> Self {
        Self(Dosha::ALL)
    }
}

impl DoshaPreference {
    /// Build a preference order; each dosha must appear exactly once.
    pub fn new(order: [Dosha; 3]) -> AssessmentResult<Self> {
        if Dosha::ALL.iter().any(|d| !order.contains(d)) {
            return Err(AssessmentError::InvalidTieBreak(format!("{:?}", order)));
        }
        Ok(Self(order))
    }

    pub fn order(&self) -> [Dosha; 3] {
        self.0
    }

    /// Position of a dosha in the order (0 = most preferred).
    pub fn rank(&self, dosha: Dosha) -> usize {
        self.0.iter().position(|&d| d == dosha).unwrap_or(self.0.len())
    }

    /// Doshas sorted by `key` descending, ties broken by this order.
    pub fn sort_desc(&self, key: impl Fn(Dosha) -> u32) -> [Dosha; 3] {
        let mut doshas = self.0;
        doshas.sort_by(|&a, &b| key(b).cmp(&key(a)).then(self.rank(a).cmp(&self.rank(b))));
        doshas
    }
}

/// Outcome of classifying a score vector (timestamp-free).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub percentages: DoshaPercentages,
    pub primary: Dosha,
    pub secondary: Option<Dosha>,
    pub is_dual: bool,
    /// Gap in points between the top two doshas
    pub gap: u32,
}

/// Convert raw scores into whole percentages summing to 100.
pub fn percentages(scores: &DoshaScores, preference: &DoshaPreference) -> DoshaPercentages {
    let total = scores.total();

    let share = |dosha: Dosha| -> u64 {
        if total == 0 {
            return 33;
        }
        let s = u64::from(scores.get(dosha));
        (200 * s + total) / (2 * total)
    };

    let mut split = Dosha::ALL.map(share);
    let assigned: u64 = split.iter().sum();

    // Each share is within half a point of exact, so `assigned` is 99..=101
    // and the largest share (at least 33) absorbs the difference.
    let largest = index_of(preference.sort_desc(|d| scores.get(d))[0]);
    split[largest] = split[largest] + 100 - assigned;

    DoshaPercentages {
        vata: split[0] as u32,
        pitta: split[1] as u32,
        kapha: split[2] as u32,
    }
}

/// Classify raw scores into primary/secondary/dual.
pub fn classify(
    scores: &DoshaScores,
    dual_threshold: u32,
    preference: &DoshaPreference,
) -> Classification {
    let percentages = percentages(scores, preference);
    let ranked = preference.sort_desc(|d| percentages.get(d));

    let primary = ranked[0];
    let runner_up = ranked[1];
    let gap = percentages.get(primary) - percentages.get(runner_up);
    let is_dual = gap <= dual_threshold;

    Classification {
        percentages,
        primary,
        secondary: is_dual.then_some(runner_up),
        is_dual,
        gap,
    }
}

fn index_of(dosha: Dosha) -> usize {
    match dosha {
        Dosha::Vata => 0,
        Dosha::Pitta => 1,
        Dosha::Kapha => 2,
    }
}
