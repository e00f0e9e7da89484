//! Template-driven plan skeletons.
//!
//! Each suggestion a template lists for a slot is resolved against the
//! catalog in order:
//! 1. Name match: case-insensitive, either name containing the other
//! 2. Category fallback: first food of the first non-empty preferred category
//! 3. Skip (recorded in `unresolved`, no placeholder)

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::catalog::FoodCatalog;
use crate::config::{DayDistribution, TemplateConfig};
use crate::models::{Day, FoodEntry, MealPlan, MealPlanEntry, MealSlot, PlanDetails};

/// A built-in meal plan template.
#[derive(Debug, Clone, PartialEq)]
pub struct MealTemplate {
    /// Lookup key (e.g., "weight-loss")
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    /// Daily calorie target
    pub target_calories: u32,
    pub breakfast: &'static [&'static str],
    pub lunch: &'static [&'static str],
    pub dinner: &'static [&'static str],
    pub snacks: &'static [&'static str],
}

impl MealTemplate {
    /// Abstract food names suggested for a slot.
    pub fn suggestions(&self, slot: MealSlot) -> &'static [&'static str] {
        match slot {
            MealSlot::Breakfast => self.breakfast,
            MealSlot::Lunch => self.lunch,
            MealSlot::Dinner => self.dinner,
            MealSlot::Snacks => self.snacks,
        }
    }

    /// Plan metadata seeded from this template.
    pub fn details(&self) -> PlanDetails {
        PlanDetails {
            title: self.name.to_string(),
            description: self.description.to_string(),
            target_calories: self.target_calories,
            ..PlanDetails::default()
        }
    }
}

const BUILTIN_TEMPLATES: [MealTemplate; 4] = [
    MealTemplate {
        key: "weight-loss",
        name: "Weight Loss Plan",
        description: "Low-calorie, high-protein meals for healthy weight loss",
        target_calories: 1500,
        breakfast: &["oats", "quinoa", "green tea", "almonds", "berries"],
        lunch: &["quinoa", "lentils", "spinach", "broccoli", "beans"],
        dinner: &["rice", "dal", "vegetables", "cauliflower", "spinach"],
        snacks: &["cucumber", "herbal tea", "carrots", "green tea"],
    },
    MealTemplate {
        key: "muscle-gain",
        name: "Muscle Building Plan",
        description: "High-protein, nutrient-dense meals for muscle growth",
        target_calories: 2500,
        breakfast: &["eggs", "milk", "nuts", "oats", "banana"],
        lunch: &["chickpeas", "quinoa", "paneer", "beans", "spinach"],
        dinner: &["paneer", "rice", "dal", "chicken", "vegetables"],
        snacks: &["nuts", "dates", "milk", "protein"],
    },
    MealTemplate {
        key: "diabetic",
        name: "Diabetic-Friendly Plan",
        description: "Low glycemic index foods for blood sugar management",
        target_calories: 1800,
        breakfast: &["oats", "cinnamon", "walnuts", "bitter gourd"],
        lunch: &["cauliflower", "bitter gourd", "spinach", "beans"],
        dinner: &["methi", "cucumber", "bitter gourd", "spinach"],
        snacks: &["chickpeas", "green tea", "nuts"],
    },
    MealTemplate {
        key: "heart-healthy",
        name: "Heart-Healthy Plan",
        description: "Low sodium, omega-3 rich foods for cardiovascular health",
        target_calories: 2000,
        breakfast: &["flax", "fruits", "green tea", "oats"],
        lunch: &["fish", "rice", "broccoli", "spinach"],
        dinner: &["lentils", "quinoa", "spinach", "vegetables"],
        snacks: &["nuts", "herbal tea", "green tea"],
    },
];

/// All built-in templates.
pub fn builtin_templates() -> &'static [MealTemplate] {
    &BUILTIN_TEMPLATES
}

/// Look up a built-in template by key (case-insensitive).
pub fn find_template(key: &str) -> Option<&'static MealTemplate> {
    let key = key.trim();
    BUILTIN_TEMPLATES
        .iter()
        .find(|t| t.key.eq_ignore_ascii_case(key))
}

/// Result of applying a template.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanSkeleton {
    pub template_key: String,
    /// Populated plan; details carry the template's name and targets
    pub plan: MealPlan,
    /// Suggestions that matched nothing, as "slot:suggestion"
    pub unresolved: Vec<String>,
}

/// Turns templates into plan skeletons against a catalog.
#[derive(Debug, Clone)]
pub struct TemplateResolver {
    fallback_categories: Vec<String>,
    day_distribution: DayDistribution,
}

impl Default for TemplateResolver {
    fn default() -> Self {
        Self::from_config(&TemplateConfig::default())
    }
}

impl TemplateResolver {
    pub fn new(fallback_categories: Vec<String>, day_distribution: DayDistribution) -> Self {
        Self {
            fallback_categories,
            day_distribution,
        }
    }

    pub fn from_config(config: &TemplateConfig) -> Self {
        Self::new(config.fallback_categories.clone(), config.day_distribution)
    }

    /// Build a plan skeleton for a template key.
    ///
    /// Never fails: an unknown key or an empty catalog yields an empty
    /// skeleton.
    pub fn apply_template(&self, template_key: &str, catalog: &FoodCatalog) -> PlanSkeleton {
        let mut skeleton = PlanSkeleton {
            template_key: template_key.to_string(),
            plan: MealPlan::new(),
            unresolved: Vec::new(),
        };

        let Some(template) = find_template(template_key) else {
            warn!(template_key, "unknown meal template");
            return skeleton;
        };
        skeleton.plan.details = template.details();

        if catalog.is_empty() {
            warn!(template_key, "empty catalog, template left unpopulated");
            return skeleton;
        }

        let fallback = self.category_fallback(catalog);

        for slot in MealSlot::ALL {
            for &suggestion in template.suggestions(slot) {
                let matches = name_matches(catalog, suggestion);

                let picks: Vec<&FoodEntry> = if !matches.is_empty() {
                    matches
                } else if let Some(food) = fallback {
                    vec![food]
                } else {
                    warn!(template_key, %slot, suggestion, "template suggestion unresolved");
                    skeleton.unresolved.push(format!("{}:{}", slot, suggestion));
                    continue;
                };

                for day in Day::ALL {
                    let food = match self.day_distribution {
                        DayDistribution::Identical => picks[0],
                        DayDistribution::RoundRobin => picks[day.index() % picks.len()],
                    };
                    skeleton
                        .plan
                        .cell_mut(day, slot)
                        .push(MealPlanEntry::new(food.clone(), None));
                }
            }
        }

        info!(
            template_key,
            entries = skeleton.plan.entry_count(),
            unresolved = skeleton.unresolved.len(),
            "meal template applied"
        );
        skeleton
    }

    /// First food of the first preferred category that has any.
    fn category_fallback<'a>(&self, catalog: &'a FoodCatalog) -> Option<&'a FoodEntry> {
        self.fallback_categories
            .iter()
            .find_map(|category| catalog.by_category(category).into_iter().next())
    }
}

/// Catalog entries whose name contains the suggestion or is contained in
/// it, in catalog order. Entries with empty names never match.
fn name_matches<'a>(catalog: &'a FoodCatalog, suggestion: &str) -> Vec<&'a FoodEntry> {
    let suggestion = suggestion.trim().to_lowercase();
    if suggestion.is_empty() {
        return Vec::new();
    }

    catalog
        .foods()
        .iter()
        .filter(|food| {
            let name = food.name.trim().to_lowercase();
            !name.is_empty() && (name.contains(&suggestion) || suggestion.contains(&name))
        })
        .collect()
}
