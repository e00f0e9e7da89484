//! Dosha models shared by the assessment and nutrition engines.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the three Ayurvedic constitutional categories.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Dosha {
    Vata,
    Pitta,
    Kapha,
}

impl Dosha {
    /// All doshas in canonical field order.
    pub const ALL: [Dosha; 3] = [Dosha::Vata, Dosha::Pitta, Dosha::Kapha];

    /// Lowercase key used by catalog fields (`ayurveda_dosha_<key>`).
    pub fn key(&self) -> &'static str {
        match self {
            Dosha::Vata => "vata",
            Dosha::Pitta => "pitta",
            Dosha::Kapha => "kapha",
        }
    }

    /// Parse a dosha name, case-insensitively.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "vata" => Some(Dosha::Vata),
            "pitta" => Some(Dosha::Pitta),
            "kapha" => Some(Dosha::Kapha),
            _ => None,
        }
    }
}

impl fmt::Display for Dosha {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Dosha::Vata => "Vata",
            Dosha::Pitta => "Pitta",
            Dosha::Kapha => "Kapha",
        };
        f.write_str(name)
    }
}

/// A `{vata, pitta, kapha}` triple of non-negative weights.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct DoshaScores {
    pub vata: u32,
    pub pitta: u32,
    pub kapha: u32,
}

impl DoshaScores {
    pub fn new(vata: u32, pitta: u32, kapha: u32) -> Self {
        Self { vata, pitta, kapha }
    }

    pub fn get(&self, dosha: Dosha) -> u32 {
        match dosha {
            Dosha::Vata => self.vata,
            Dosha::Pitta => self.pitta,
            Dosha::Kapha => self.kapha,
        }
    }

    pub fn get_mut(&mut self, dosha: Dosha) -> &mut u32 {
        match dosha {
            Dosha::Vata => &mut self.vata,
            Dosha::Pitta => &mut self.pitta,
            Dosha::Kapha => &mut self.kapha,
        }
    }

    /// Sum of all three components. Widened so it cannot overflow.
    pub fn total(&self) -> u64 {
        u64::from(self.vata) + u64::from(self.pitta) + u64::from(self.kapha)
    }

    /// Element-wise addition, saturating at `u32::MAX`.
    pub fn accumulate(&mut self, weights: &DoshaScores) {
        for dosha in Dosha::ALL {
            let slot = self.get_mut(dosha);
            *slot = slot.saturating_add(weights.get(dosha));
        }
    }

    /// True when no component is below the matching component of `earlier`.
    pub fn dominates(&self, earlier: &DoshaScores) -> bool {
        Dosha::ALL
            .iter()
            .all(|&d| self.get(d) >= earlier.get(d))
    }
}

/// How a food acts on a single dosha.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum DoshaEffect {
    Increase,
    Decrease,
    #[default]
    Neutral,
}

impl DoshaEffect {
    /// Parse a catalog effect label.
    ///
    /// Catalogs use both the plain labels and the classical vocabulary
    /// ("aggravates", "pacifies", "beneficial"). Unknown labels are neutral.
    pub fn parse(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "increase" | "increases" | "aggravate" | "aggravates" | "aggravating" => {
                DoshaEffect::Increase
            }
            "decrease" | "decreases" | "pacify" | "pacifies" | "pacifying" | "balance"
            | "balances" | "balancing" | "beneficial" | "good" => DoshaEffect::Decrease,
            _ => DoshaEffect::Neutral,
        }
    }
}

/// Per-dosha effect triple for a food.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct DoshaEffects {
    pub vata: DoshaEffect,
    pub pitta: DoshaEffect,
    pub kapha: DoshaEffect,
}

impl DoshaEffects {
    pub fn new(vata: DoshaEffect, pitta: DoshaEffect, kapha: DoshaEffect) -> Self {
        Self { vata, pitta, kapha }
    }

    pub fn get(&self, dosha: Dosha) -> DoshaEffect {
        match dosha {
            Dosha::Vata => self.vata,
            Dosha::Pitta => self.pitta,
            Dosha::Kapha => self.kapha,
        }
    }

    pub fn set(&mut self, dosha: Dosha, effect: DoshaEffect) {
        match dosha {
            Dosha::Vata => self.vata = effect,
            Dosha::Pitta => self.pitta = effect,
            Dosha::Kapha => self.kapha = effect,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulate_is_elementwise() {
        let mut scores = DoshaScores::new(1, 2, 3);
        scores.accumulate(&DoshaScores::new(3, 0, 1));
        assert_eq!(scores, DoshaScores::new(4, 2, 4));
        assert_eq!(scores.total(), 10);
    }

    #[test]
    fn test_total_does_not_overflow() {
        let scores = DoshaScores::new(u32::MAX, u32::MAX, 1);
        assert_eq!(scores.total(), 2 * u64::from(u32::MAX) + 1);
    }

    #[test]
    fn test_dominates() {
        let before = DoshaScores::new(1, 1, 1);
        assert!(DoshaScores::new(1, 2, 1).dominates(&before));
        assert!(!DoshaScores::new(0, 5, 5).dominates(&before));
    }

    #[test]
    fn test_effect_labels() {
        assert_eq!(DoshaEffect::parse("Increase"), DoshaEffect::Increase);
        assert_eq!(DoshaEffect::parse(" aggravates "), DoshaEffect::Increase);
        assert_eq!(DoshaEffect::parse("DECREASE"), DoshaEffect::Decrease);
        assert_eq!(DoshaEffect::parse("Pacifies"), DoshaEffect::Decrease);
        assert_eq!(DoshaEffect::parse("beneficial"), DoshaEffect::Decrease);
        assert_eq!(DoshaEffect::parse("Neutral"), DoshaEffect::Neutral);
        assert_eq!(DoshaEffect::parse(""), DoshaEffect::Neutral);
        assert_eq!(DoshaEffect::parse("sometimes"), DoshaEffect::Neutral);
    }

    #[test]
    fn test_dosha_parse_and_display() {
        assert_eq!(Dosha::parse("PITTA"), Some(Dosha::Pitta));
        assert_eq!(Dosha::parse("ether"), None);
        assert_eq!(Dosha::Kapha.to_string(), "Kapha");
        assert_eq!(Dosha::Vata.key(), "vata");
    }
}
