//! Food catalog models.

use serde::{Deserialize, Serialize};

use super::dosha::{Dosha, DoshaEffect, DoshaEffects};

/// Macro-nutrients per catalog serving.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Macros {
    /// Energy in kcal
    pub calories: f64,
    /// Protein in grams
    pub protein: f64,
    /// Carbohydrates in grams
    pub carbs: f64,
    /// Fats in grams
    pub fats: f64,
    /// Dietary fiber in grams
    pub fiber: f64,
}

impl Macros {
    /// Add another set of macros into this one.
    pub fn add(&mut self, other: &Macros) {
        self.calories += other.calories;
        self.protein += other.protein;
        self.carbs += other.carbs;
        self.fats += other.fats;
        self.fiber += other.fiber;
    }
}

/// Ayurvedic food attributes.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AyurvedicProfile {
    /// Effect on each dosha
    pub dosha_effects: DoshaEffects,
    /// Taste (e.g., "Sweet, Astringent")
    pub rasa: String,
    /// Inherent quality (e.g., "Heavy, Oily")
    pub guna: String,
    /// Potency (e.g., "Cooling")
    pub virya: String,
    /// Post-digestive effect (e.g., "Sweet")
    pub vipaka: String,
}

/// A canonical food entry. Immutable reference data.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FoodEntry {
    /// Catalog identifier
    pub food_id: String,
    /// English name
    pub name: String,
    /// Regional names
    pub vernacular_names: String,
    /// Catalog category (e.g., "cereal", "vegetable")
    pub category: String,
    /// Macro-nutrients
    pub macros: Macros,
    /// Ayurvedic attributes
    pub ayurvedic: AyurvedicProfile,
}

impl FoodEntry {
    /// Create a food entry with required fields; everything else defaults.
    pub fn new(food_id: String, name: String) -> Self {
        Self {
            food_id,
            name,
            ..Default::default()
        }
    }

    /// Effect of this food on a dosha.
    pub fn effect_on(&self, dosha: Dosha) -> DoshaEffect {
        self.ayurvedic.dosha_effects.get(dosha)
    }

    /// Check if this food pacifies a dosha.
    pub fn pacifies(&self, dosha: Dosha) -> bool {
        self.effect_on(dosha) == DoshaEffect::Decrease
    }

    /// Case-insensitive category comparison.
    pub fn in_category(&self, category: &str) -> bool {
        self.category.trim().eq_ignore_ascii_case(category.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_macros_add() {
        let mut total = Macros::default();
        total.add(&Macros {
            calories: 100.0,
            protein: 2.5,
            carbs: 20.0,
            fats: 1.0,
            fiber: 3.0,
        });
        total.add(&Macros {
            calories: 50.0,
            protein: 0.5,
            ..Default::default()
        });
        assert_eq!(total.calories, 150.0);
        assert_eq!(total.protein, 3.0);
        assert_eq!(total.fiber, 3.0);
    }

    #[test]
    fn test_category_match_ignores_case() {
        let mut food = FoodEntry::new("F001".into(), "Basmati Rice".into());
        food.category = "Cereal".into();
        assert!(food.in_category("cereal"));
        assert!(food.in_category(" CEREAL "));
        assert!(!food.in_category("legume"));
    }

    #[test]
    fn test_pacifies() {
        let mut food = FoodEntry::new("F002".into(), "Ghee".into());
        food.ayurvedic.dosha_effects.vata = DoshaEffect::Decrease;
        food.ayurvedic.dosha_effects.kapha = DoshaEffect::Increase;
        assert!(food.pacifies(Dosha::Vata));
        assert!(!food.pacifies(Dosha::Kapha));
        assert!(!food.pacifies(Dosha::Pitta));
    }
}
