//! Weekly meal plan models.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::dosha::Dosha;
use super::food::FoodEntry;

/// Calendar days in a plan week.
pub const WEEK_LENGTH: usize = 7;

/// Quantity label used when none is given.
pub const DEFAULT_QUANTITY: &str = "100g";

/// Day key within a weekly plan (`day1`..`day7`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Day {
    Day1,
    Day2,
    Day3,
    Day4,
    Day5,
    Day6,
    Day7,
}

impl Day {
    pub const ALL: [Day; WEEK_LENGTH] = [
        Day::Day1,
        Day::Day2,
        Day::Day3,
        Day::Day4,
        Day::Day5,
        Day::Day6,
        Day::Day7,
    ];

    /// Zero-based position in the week.
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn key(&self) -> &'static str {
        match self {
            Day::Day1 => "day1",
            Day::Day2 => "day2",
            Day::Day3 => "day3",
            Day::Day4 => "day4",
            Day::Day5 => "day5",
            Day::Day6 => "day6",
            Day::Day7 => "day7",
        }
    }

    /// Parse a day key (`day1`..`day7`).
    pub fn parse(key: &str) -> Option<Self> {
        let key = key.trim().to_lowercase();
        Day::ALL.into_iter().find(|d| d.key() == key)
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Meal slot within a day.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
    Snacks,
}

impl MealSlot {
    pub const ALL: [MealSlot; 4] = [
        MealSlot::Breakfast,
        MealSlot::Lunch,
        MealSlot::Dinner,
        MealSlot::Snacks,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            MealSlot::Breakfast => "breakfast",
            MealSlot::Lunch => "lunch",
            MealSlot::Dinner => "dinner",
            MealSlot::Snacks => "snacks",
        }
    }

    pub fn parse(key: &str) -> Option<Self> {
        let key = key.trim().to_lowercase();
        MealSlot::ALL.into_iter().find(|s| s.key() == key)
    }
}

impl fmt::Display for MealSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A food placed in a plan cell.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MealPlanEntry {
    /// The catalog food
    pub food: FoodEntry,
    /// Serving label (e.g., "100g"); informational only
    pub quantity: String,
}

impl MealPlanEntry {
    pub fn new(food: FoodEntry, quantity: Option<String>) -> Self {
        Self {
            food,
            quantity: quantity.unwrap_or_else(|| DEFAULT_QUANTITY.to_string()),
        }
    }
}

/// The four meal slots of one day.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DayMeals {
    #[serde(default)]
    pub breakfast: Vec<MealPlanEntry>,
    #[serde(default)]
    pub lunch: Vec<MealPlanEntry>,
    #[serde(default)]
    pub dinner: Vec<MealPlanEntry>,
    #[serde(default)]
    pub snacks: Vec<MealPlanEntry>,
}

impl DayMeals {
    pub fn slot(&self, slot: MealSlot) -> &[MealPlanEntry] {
        match slot {
            MealSlot::Breakfast => &self.breakfast,
            MealSlot::Lunch => &self.lunch,
            MealSlot::Dinner => &self.dinner,
            MealSlot::Snacks => &self.snacks,
        }
    }

    pub fn slot_mut(&mut self, slot: MealSlot) -> &mut Vec<MealPlanEntry> {
        match slot {
            MealSlot::Breakfast => &mut self.breakfast,
            MealSlot::Lunch => &mut self.lunch,
            MealSlot::Dinner => &mut self.dinner,
            MealSlot::Snacks => &mut self.snacks,
        }
    }
}

/// Descriptive plan metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanDetails {
    pub title: String,
    pub description: String,
    /// Plan length in days
    pub duration: u32,
    /// Daily calorie target
    pub target_calories: u32,
    pub notes: String,
    pub dietary_restrictions: Vec<String>,
}

impl Default for PlanDetails {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            duration: WEEK_LENGTH as u32,
            target_calories: 2000,
            notes: String::new(),
            dietary_restrictions: Vec::new(),
        }
    }
}

/// A weekly meal plan: 7 days × 4 slots of ordered entries.
///
/// Every mutation bumps `version`; summaries record the version they were
/// computed from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MealPlan {
    /// Plan metadata
    #[serde(default)]
    pub details: PlanDetails,
    #[serde(default)]
    pub(crate) days: BTreeMap<Day, DayMeals>,
    #[serde(default)]
    pub(crate) version: u64,
}

impl Default for MealPlan {
    fn default() -> Self {
        Self::new()
    }
}

impl MealPlan {
    /// Create an empty plan with all seven days present.
    pub fn new() -> Self {
        Self {
            details: PlanDetails::default(),
            days: Day::ALL.into_iter().map(|d| (d, DayMeals::default())).collect(),
            version: 0,
        }
    }

    /// Mutation counter.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Entries of one cell.
    pub fn cell(&self, day: Day, slot: MealSlot) -> &[MealPlanEntry] {
        self.days.get(&day).map(|d| d.slot(slot)).unwrap_or(&[])
    }

    /// Iterate every (day, slot, entry) triple once, in week/slot order.
    pub fn entries(&self) -> impl Iterator<Item = (Day, MealSlot, &MealPlanEntry)> + '_ {
        Day::ALL.into_iter().flat_map(move |day| {
            MealSlot::ALL.into_iter().flat_map(move |slot| {
                self.cell(day, slot).iter().map(move |entry| (day, slot, entry))
            })
        })
    }

    /// Total number of entries across the week.
    pub fn entry_count(&self) -> usize {
        self.entries().count()
    }

    pub fn is_empty(&self) -> bool {
        self.entry_count() == 0
    }

    /// Replace a whole cell. Bumps the version.
    pub fn set_cell(&mut self, day: Day, slot: MealSlot, entries: Vec<MealPlanEntry>) {
        *self.days.entry(day).or_default().slot_mut(slot) = entries;
        self.touch();
    }

    pub(crate) fn cell_mut(&mut self, day: Day, slot: MealSlot) -> &mut Vec<MealPlanEntry> {
        self.days.entry(day).or_default().slot_mut(slot)
    }

    pub(crate) fn touch(&mut self) {
        self.version += 1;
    }
}

/// Increase/decrease counters for one dosha.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DoshaTally {
    pub increase: u32,
    pub decrease: u32,
}

/// Whole-plan per-dosha tallies.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DoshaTallies {
    pub vata: DoshaTally,
    pub pitta: DoshaTally,
    pub kapha: DoshaTally,
}

impl DoshaTallies {
    pub fn get(&self, dosha: Dosha) -> DoshaTally {
        match dosha {
            Dosha::Vata => self.vata,
            Dosha::Pitta => self.pitta,
            Dosha::Kapha => self.kapha,
        }
    }

    pub fn get_mut(&mut self, dosha: Dosha) -> &mut DoshaTally {
        match dosha {
            Dosha::Vata => &mut self.vata,
            Dosha::Pitta => &mut self.pitta,
            Dosha::Kapha => &mut self.kapha,
        }
    }
}

/// Derived nutrition view of a plan.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct NutritionSummary {
    /// Daily-average calories (week total / 7, rounded)
    pub total_calories: u32,
    /// Daily-average protein in grams
    pub protein: u32,
    /// Daily-average carbohydrates in grams
    pub carbs: u32,
    /// Daily-average fats in grams
    pub fats: u32,
    /// Daily-average fiber in grams
    pub fiber: u32,
    /// Raw whole-plan dosha counters
    pub dosha_effects: DoshaTallies,
}

/// A summary stamped with the plan state it describes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VersionedSummary {
    /// Plan mutation counter at computation time
    pub plan_version: u64,
    /// SHA-256 of the plan's canonical JSON
    pub plan_fingerprint: String,
    pub summary: NutritionSummary,
}
