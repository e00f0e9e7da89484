//! In-memory food catalog built from already-fetched records.

use std::collections::BTreeSet;

use serde_json::Value;
use strsim::{jaro_winkler, normalized_levenshtein};
use tracing::debug;

use crate::models::{Dosha, FoodEntry};

use super::FoodNormalizer;

/// Normalized food catalog.
///
/// Records are normalized once when the catalog is built; lookups never
/// re-read raw fields.
#[derive(Debug, Clone, Default)]
pub struct FoodCatalog {
    foods: Vec<FoodEntry>,
    data_gaps: usize,
}

impl FoodCatalog {
    /// Build a catalog from already-normalized entries.
    pub fn from_entries(foods: Vec<FoodEntry>) -> Self {
        Self { foods, data_gaps: 0 }
    }

    /// Normalize raw catalog records into a catalog.
    pub fn from_raw_records(records: &[Value], normalizer: &FoodNormalizer) -> Self {
        let mut data_gaps = 0;
        let foods = records
            .iter()
            .map(|raw| {
                let normalized = normalizer.normalize_with_gaps(raw);
                data_gaps += normalized.gaps.len();
                normalized.entry
            })
            .collect::<Vec<_>>();

        debug!(foods = foods.len(), data_gaps, "food catalog ingested");
        Self { foods, data_gaps }
    }

    /// Parse a JSON catalog payload: an array of records, `{"foods": [...]}`
    /// or `{"data": {"foods": [...]}}`.
    pub fn from_json_str(
        json: &str,
        normalizer: &FoodNormalizer,
    ) -> Result<Self, serde_json::Error> {
        let payload: Value = serde_json::from_str(json)?;
        let records = match payload {
            Value::Array(records) => records,
            Value::Object(obj) => {
                let foods = obj
                    .get("foods")
                    .or_else(|| obj.get("data").and_then(|data| data.get("foods")));
                match foods {
                    Some(Value::Array(records)) => records.clone(),
                    _ => Vec::new(),
                }
            }
            _ => Vec::new(),
        };
        Ok(Self::from_raw_records(&records, normalizer))
    }

    pub fn len(&self) -> usize {
        self.foods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.foods.is_empty()
    }

    /// All entries in catalog order.
    pub fn foods(&self) -> &[FoodEntry] {
        &self.foods
    }

    /// Total required-field gaps seen during ingestion.
    pub fn data_gap_count(&self) -> usize {
        self.data_gaps
    }

    /// Get an entry by catalog ID.
    pub fn get(&self, food_id: &str) -> Option<&FoodEntry> {
        self.foods.iter().find(|f| f.food_id == food_id)
    }

    /// Case-insensitive substring search over names and vernacular names,
    /// best match first.
    pub fn search_by_name(&self, query: &str, limit: usize) -> Vec<&FoodEntry> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }

        let mut hits: Vec<(f64, &FoodEntry)> = self
            .foods
            .iter()
            .filter(|f| {
                f.name.to_lowercase().contains(&query)
                    || f.vernacular_names.to_lowercase().contains(&query)
            })
            .map(|f| (fuzzy_match(&query, &f.name.to_lowercase()), f))
            .collect();

        // Stable sort keeps catalog order among equal scores
        hits.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        hits.into_iter().take(limit).map(|(_, f)| f).collect()
    }

    /// Entries in a category (case-insensitive), in catalog order.
    pub fn by_category(&self, category: &str) -> Vec<&FoodEntry> {
        self.foods.iter().filter(|f| f.in_category(category)).collect()
    }

    /// Distinct lowercase categories, sorted.
    pub fn categories(&self) -> Vec<String> {
        self.foods
            .iter()
            .map(|f| f.category.trim().to_lowercase())
            .filter(|c| !c.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Entries that pacify a dosha, in catalog order.
    pub fn pacifying(&self, dosha: Dosha, limit: usize) -> Vec<&FoodEntry> {
        self.foods
            .iter()
            .filter(|f| f.pacifies(dosha))
            .take(limit)
            .collect()
    }
}

/// Combined string similarity (0.0 - 1.0).
fn fuzzy_match(a: &str, b: &str) -> f64 {
    // Jaro-Winkler rewards shared prefixes; Levenshtein overall closeness
    jaro_winkler(a, b) * 0.6 + normalized_levenshtein(a, b) * 0.4
}
