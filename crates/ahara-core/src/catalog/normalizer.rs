//! Catalog record normalizer.
//!
//! Upstream catalogs store the same nutrient under several historical names
//! (`calories`, `calories(kcal)`, `calories_kcal`, `energy_kcal`, ...). Each
//! target field has an ordered list of accepted source names; the first name
//! holding a usable value wins. Nested names use `.` as a path separator.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::models::{AyurvedicProfile, Dosha, DoshaEffect, DoshaEffects, FoodEntry, Macros};

/// A canonical food field.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FoodField {
    Id,
    Name,
    VernacularNames,
    Category,
    Calories,
    Protein,
    Carbs,
    Fats,
    Fiber,
    VataEffect,
    PittaEffect,
    KaphaEffect,
    Rasa,
    Guna,
    Virya,
    Vipaka,
}

impl FoodField {
    /// Fields whose absence is recorded as a data gap.
    pub const REQUIRED: [FoodField; 6] = [
        FoodField::Name,
        FoodField::Calories,
        FoodField::Protein,
        FoodField::Carbs,
        FoodField::Fats,
        FoodField::Fiber,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FoodField::Id => "id",
            FoodField::Name => "name",
            FoodField::VernacularNames => "vernacular_names",
            FoodField::Category => "category",
            FoodField::Calories => "calories",
            FoodField::Protein => "protein",
            FoodField::Carbs => "carbs",
            FoodField::Fats => "fats",
            FoodField::Fiber => "fiber",
            FoodField::VataEffect => "vata_effect",
            FoodField::PittaEffect => "pitta_effect",
            FoodField::KaphaEffect => "kapha_effect",
            FoodField::Rasa => "rasa",
            FoodField::Guna => "guna",
            FoodField::Virya => "virya",
            FoodField::Vipaka => "vipaka",
        }
    }

    pub fn is_required(&self) -> bool {
        Self::REQUIRED.contains(self)
    }

    fn effect_for(dosha: Dosha) -> Self {
        match dosha {
            Dosha::Vata => FoodField::VataEffect,
            Dosha::Pitta => FoodField::PittaEffect,
            Dosha::Kapha => FoodField::KaphaEffect,
        }
    }
}

impl fmt::Display for FoodField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A required field missing under every accepted name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DataGap {
    /// Identifier of the offending record (empty if it had none)
    pub food_id: String,
    pub field: FoodField,
}

/// A normalized entry plus the gaps found while building it.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedFood {
    pub entry: FoodEntry,
    pub gaps: Vec<DataGap>,
}

/// Typed adapter from raw catalog records to [`FoodEntry`].
#[derive(Debug, Clone)]
pub struct FoodNormalizer {
    /// Accepted source names per field, highest precedence first
    precedence: HashMap<FoodField, Vec<String>>,
}

impl Default for FoodNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl FoodNormalizer {
    /// Create a normalizer with the default precedence lists.
    pub fn new() -> Self {
        Self {
            precedence: Self::default_precedence(),
        }
    }

    /// Accepted source names for a field, in precedence order.
    pub fn accepted_names(&self, field: FoodField) -> &[String] {
        self.precedence.get(&field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Replace the precedence list of a field.
    pub fn set_precedence(&mut self, field: FoodField, names: &[&str]) {
        self.precedence
            .insert(field, names.iter().map(|n| n.to_string()).collect());
    }

    /// Normalize a raw record, logging any data gaps.
    pub fn normalize(&self, raw: &Value) -> FoodEntry {
        self.normalize_with_gaps(raw).entry
    }

    /// Normalize a raw record and report data gaps alongside.
    pub fn normalize_with_gaps(&self, raw: &Value) -> NormalizedFood {
        let mut missing = Vec::new();

        let mut text = |field: FoodField| -> String {
            match self.resolve(raw, field, text_value) {
                Some(v) => v,
                None => {
                    if field.is_required() {
                        missing.push(field);
                    }
                    String::new()
                }
            }
        };

        let food_id = text(FoodField::Id);
        let name = text(FoodField::Name);
        let vernacular_names = text(FoodField::VernacularNames);
        let category = text(FoodField::Category);
        let rasa = text(FoodField::Rasa);
        let guna = text(FoodField::Guna);
        let virya = text(FoodField::Virya);
        let vipaka = text(FoodField::Vipaka);

        let mut number = |field: FoodField| -> f64 {
            match self.resolve(raw, field, number_value) {
                Some(v) => v,
                None => {
                    missing.push(field);
                    0.0
                }
            }
        };

        let macros = Macros {
            calories: number(FoodField::Calories),
            protein: number(FoodField::Protein),
            carbs: number(FoodField::Carbs),
            fats: number(FoodField::Fats),
            fiber: number(FoodField::Fiber),
        };

        let mut dosha_effects = DoshaEffects::default();
        for dosha in Dosha::ALL {
            let effect = self
                .resolve(raw, FoodField::effect_for(dosha), text_value)
                .map(|label| DoshaEffect::parse(&label))
                .unwrap_or_default();
            dosha_effects.set(dosha, effect);
        }

        let gaps: Vec<DataGap> = missing
            .into_iter()
            .map(|field| DataGap {
                food_id: food_id.clone(),
                field,
            })
            .collect();

        for gap in &gaps {
            warn!(
                food_id = %gap.food_id,
                field = %gap.field,
                accepted = ?self.accepted_names(gap.field),
                "catalog record missing required field, defaulting"
            );
        }

        NormalizedFood {
            entry: FoodEntry {
                food_id,
                name,
                vernacular_names,
                category,
                macros,
                ayurvedic: AyurvedicProfile {
                    dosha_effects,
                    rasa,
                    guna,
                    virya,
                    vipaka,
                },
            },
            gaps,
        }
    }

    /// First usable value under the field's accepted names.
    fn resolve<T>(
        &self,
        raw: &Value,
        field: FoodField,
        read: fn(&Value) -> Option<T>,
    ) -> Option<T> {
        self.accepted_names(field)
            .iter()
            .filter_map(|name| lookup(raw, name))
            .find_map(read)
    }

    /// Default accepted-name precedence lists.
    fn default_precedence() -> HashMap<FoodField, Vec<String>> {
        let lists: [(FoodField, &[&str]); 16] = [
            (FoodField::Id, &["food_id", "foodId", "_id", "id"]),
            (FoodField::Name, &["name_en", "name"]),
            (FoodField::VernacularNames, &["vernacular_names"]),
            (FoodField::Category, &["category"]),
            (
                FoodField::Calories,
                &["calories", "calories(kcal)", "calories_kcal", "energy_kcal"],
            ),
            (FoodField::Protein, &["protein", "protein(g)", "protein_g"]),
            (
                FoodField::Carbs,
                &["carbs", "carbs(g)", "carbs_g", "carbohydrate_g"],
            ),
            (FoodField::Fats, &["fats", "fats(g)", "fats_g", "fat_g"]),
            (FoodField::Fiber, &["fiber", "fiber(g)", "fiber_g"]),
            (
                FoodField::VataEffect,
                &["ayurvedic.dosha_effects.vata", "ayurveda_dosha_vata"],
            ),
            (
                FoodField::PittaEffect,
                &["ayurvedic.dosha_effects.pitta", "ayurveda_dosha_pitta"],
            ),
            (
                FoodField::KaphaEffect,
                &["ayurvedic.dosha_effects.kapha", "ayurveda_dosha_kapha"],
            ),
            (FoodField::Rasa, &["ayurvedic.rasa", "ayurveda_rasa"]),
            (FoodField::Guna, &["ayurvedic.guna", "ayurveda_guna"]),
            (FoodField::Virya, &["ayurvedic.virya", "ayurveda_virya"]),
            (FoodField::Vipaka, &["ayurvedic.vipaka", "ayurveda_vipaka"]),
        ];

        lists
            .into_iter()
            .map(|(field, names)| (field, names.iter().map(|n| n.to_string()).collect()))
            .collect()
    }
}

/// Walk a dotted path through nested objects.
fn lookup<'v>(raw: &'v Value, path: &str) -> Option<&'v Value> {
    path.split('.').try_fold(raw, |node, key| node.as_object()?.get(key))
}

/// Non-empty text; numbers are rendered, string arrays joined.
fn text_value(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items
            .iter()
            .filter_map(|v| v.as_str())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

/// A finite, non-negative number (or numeric string).
fn number_value(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    (n.is_finite() && n >= 0.0).then_some(n)
}
