//! Nutrition summaries over a weekly plan.
//!
//! Macros are summed over every entry and divided by the calendar week
//! (always 7, never the number of populated days). Dosha tallies are raw
//! whole-plan counts.

use sha2::{Digest, Sha256};
use tracing::debug;

use crate::models::{
    Day, Dosha, DoshaEffect, FoodEntry, Macros, MealPlan, MealPlanEntry, MealSlot,
    NutritionSummary, VersionedSummary, WEEK_LENGTH,
};

use super::{PlanError, PlanResult};

/// Compute the nutrition summary of a plan. Pure; safe to re-run after
/// every mutation.
pub fn summarize(plan: &MealPlan) -> NutritionSummary {
    let mut totals = Macros::default();
    let mut summary = NutritionSummary::default();

    for (_, _, entry) in plan.entries() {
        totals.add(&entry.food.macros);

        for dosha in Dosha::ALL {
            let tally = summary.dosha_effects.get_mut(dosha);
            match entry.food.effect_on(dosha) {
                DoshaEffect::Increase => tally.increase += 1,
                DoshaEffect::Decrease => tally.decrease += 1,
                DoshaEffect::Neutral => {}
            }
        }
    }

    summary.total_calories = daily_average(totals.calories);
    summary.protein = daily_average(totals.protein);
    summary.carbs = daily_average(totals.carbs);
    summary.fats = daily_average(totals.fats);
    summary.fiber = daily_average(totals.fiber);
    summary
}

/// Summarize and stamp the result with the plan state it was computed from.
pub fn summarize_versioned(plan: &MealPlan) -> VersionedSummary {
    VersionedSummary {
        plan_version: plan.version(),
        plan_fingerprint: plan.fingerprint(),
        summary: summarize(plan),
    }
}

/// Append an entry to a cell. A missing quantity defaults to "100g".
pub fn add_food_entry(
    plan: &mut MealPlan,
    day: Day,
    slot: MealSlot,
    food: FoodEntry,
    quantity: Option<String>,
) -> &MealPlanEntry {
    debug!(food_id = %food.food_id, %day, %slot, "adding plan entry");
    plan.touch();
    let cell = plan.cell_mut(day, slot);
    cell.push(MealPlanEntry::new(food, quantity));
    &cell[cell.len() - 1]
}

/// Remove the entry at `index` from a cell, returning it.
pub fn remove_food_entry(
    plan: &mut MealPlan,
    day: Day,
    slot: MealSlot,
    index: usize,
) -> PlanResult<MealPlanEntry> {
    let len = plan.cell(day, slot).len();
    if index >= len {
        return Err(PlanError::EntryOutOfRange {
            day,
            slot,
            index,
            len,
        });
    }

    let removed = plan.cell_mut(day, slot).remove(index);
    plan.touch();
    debug!(food_id = %removed.food.food_id, %day, %slot, index, "removed plan entry");
    Ok(removed)
}

impl MealPlan {
    /// SHA-256 (hex) of the plan's canonical day/slot JSON.
    ///
    /// Details and version are excluded, and absent days count as empty:
    /// two plans with the same entries share a fingerprint.
    pub fn fingerprint(&self) -> String {
        let cells = Day::ALL.map(|day| MealSlot::ALL.map(|slot| self.cell(day, slot)));
        let canonical = serde_json::to_vec(&cells).unwrap_or_default();
        let mut hasher = Sha256::new();
        hasher.update(&canonical);
        hex::encode(hasher.finalize())
    }
}

impl VersionedSummary {
    /// True when this summary still describes `plan`.
    pub fn matches(&self, plan: &MealPlan) -> bool {
        self.plan_version == plan.version() && self.plan_fingerprint == plan.fingerprint()
    }
}

fn daily_average(week_total: f64) -> u32 {
    (week_total / WEEK_LENGTH as f64).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DoshaEffects;

    fn food(id: &str, calories: f64, effects: DoshaEffects) -> FoodEntry {
        let mut f = FoodEntry::new(id.into(), format!("Food {}", id));
        f.macros.calories = calories;
        f.ayurvedic.dosha_effects = effects;
        f
    }

    #[test]
    fn test_empty_plan_is_all_zero() {
        assert_eq!(summarize(&MealPlan::new()), NutritionSummary::default());
    }

    #[test]
    fn test_single_entry_divides_by_week() {
        let mut plan = MealPlan::new();
        let effects = DoshaEffects::new(
            DoshaEffect::Decrease,
            DoshaEffect::Increase,
            DoshaEffect::Neutral,
        );
        add_food_entry(&mut plan, Day::Day1, MealSlot::Breakfast, food("F1", 300.0, effects), None);

        let summary = summarize(&plan);
        assert_eq!(summary.total_calories, 43);
        assert_eq!(summary.dosha_effects.vata.decrease, 1);
        assert_eq!(summary.dosha_effects.vata.increase, 0);
        assert_eq!(summary.dosha_effects.pitta.increase, 1);
        assert_eq!(summary.dosha_effects.kapha.increase, 0);
        assert_eq!(summary.dosha_effects.kapha.decrease, 0);
    }

    #[test]
    fn test_macros_sum_across_week() {
        let mut plan = MealPlan::new();
        for day in Day::ALL {
            let mut f = food("F1", 250.0, DoshaEffects::default());
            f.macros.protein = 10.5;
            f.macros.fiber = 2.0;
            add_food_entry(&mut plan, day, MealSlot::Lunch, f, Some("1 bowl".into()));
        }

        let summary = summarize(&plan);
        assert_eq!(summary.total_calories, 250);
        // 10.5 rounds half away from zero
        assert_eq!(summary.protein, 11);
        assert_eq!(summary.fiber, 2);
        assert_eq!(summary.carbs, 0);
    }

    #[test]
    fn test_quantity_does_not_scale() {
        let mut plan = MealPlan::new();
        let entry = add_food_entry(
            &mut plan,
            Day::Day2,
            MealSlot::Snacks,
            food("F1", 700.0, DoshaEffects::default()),
            Some("250g".into()),
        );
        assert_eq!(entry.quantity, "250g");
        assert_eq!(summarize(&plan).total_calories, 100);
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut plan = MealPlan::new();
        let f_food = food("F1", 1.0, DoshaEffects::default());
        add_food_entry(&mut plan, Day::Day1, MealSlot::Dinner, f_food, None);
        let version = plan.version();

        let err = remove_food_entry(&mut plan, Day::Day1, MealSlot::Dinner, 1).unwrap_err();
        assert_eq!(
            err,
            PlanError::EntryOutOfRange {
                day: Day::Day1,
                slot: MealSlot::Dinner,
                index: 1,
                len: 1,
            }
        );
        assert_eq!(err.kind(), crate::error::ErrorKind::Validation);
        assert_eq!(plan.version(), version);
        assert_eq!(plan.entry_count(), 1);
    }

    #[test]
    fn test_remove_returns_entry_and_bumps_version() {
        let mut plan = MealPlan::new();
        let a_food = food("A", 1.0, DoshaEffects::default());
        add_food_entry(&mut plan, Day::Day3, MealSlot::Lunch, a_food, None);
        let b_food = food("B", 1.0, DoshaEffects::default());
        add_food_entry(&mut plan, Day::Day3, MealSlot::Lunch, b_food, None);
        assert_eq!(plan.version(), 2);

        let removed = remove_food_entry(&mut plan, Day::Day3, MealSlot::Lunch, 0).unwrap();
        assert_eq!(removed.food.food_id, "A");
        assert_eq!(plan.version(), 3);
        assert_eq!(plan.cell(Day::Day3, MealSlot::Lunch)[0].food.food_id, "B");
    }

    #[test]
    fn test_versioned_summary_goes_stale() {
        let mut plan = MealPlan::new();
        let a_food = food("A", 70.0, DoshaEffects::default());
        add_food_entry(&mut plan, Day::Day1, MealSlot::Lunch, a_food, None);

        let stamped = summarize_versioned(&plan);
        assert!(stamped.matches(&plan));
        assert_eq!(stamped.summary.total_calories, 10);
        assert_eq!(stamped.plan_fingerprint.len(), 64);

        let b_food = food("B", 70.0, DoshaEffects::default());
        add_food_entry(&mut plan, Day::Day1, MealSlot::Lunch, b_food, None);
        assert!(!stamped.matches(&plan));
    }

    #[test]
    fn test_fingerprint_tracks_entries_only() {
        let mut a = MealPlan::new();
        let mut b = MealPlan::new();
        b.details.title = "Renamed".into();
        assert_eq!(a.fingerprint(), b.fingerprint());

        let a_food = food("A", 5.0, DoshaEffects::default());
        add_food_entry(&mut a, Day::Day7, MealSlot::Snacks, a_food, None);
        assert_ne!(a.fingerprint(), b.fingerprint());

        remove_food_entry(&mut a, Day::Day7, MealSlot::Snacks, 0).unwrap();
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_ne!(a.version(), b.version());

        let sparse: MealPlan = serde_json::from_str(r#"{"days": {"day1": {}}}"#).unwrap();
        assert_eq!(sparse.fingerprint(), b.fingerprint());
    }
}
