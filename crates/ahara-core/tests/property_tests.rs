//! Property tests for the scoring and aggregation invariants.

use ahara_core::models::{
    Day, Dosha, DoshaEffect, DoshaEffects, DoshaScores, FoodEntry, MealPlan, MealSlot,
    NutritionSummary,
};
use ahara_core::plan::{add_food_entry, remove_food_entry, summarize};
use ahara_core::scoring::{classify, percentages, DoshaPreference, PrakritiScorer};
use proptest::prelude::*;

fn effect() -> impl Strategy<Value = DoshaEffect> {
    prop_oneof![
        Just(DoshaEffect::Increase),
        Just(DoshaEffect::Decrease),
        Just(DoshaEffect::Neutral),
    ]
}

fn food() -> impl Strategy<Value = FoodEntry> {
    // Whole-unit macros keep sums exact regardless of entry order
    (0u32..900, 0u32..60, effect(), effect(), effect()).prop_map(
        |(calories, protein, vata, pitta, kapha)| {
            let mut food = FoodEntry::new("F".into(), "Food".into());
            food.macros.calories = f64::from(calories);
            food.macros.protein = f64::from(protein);
            food.ayurvedic.dosha_effects = DoshaEffects::new(vata, pitta, kapha);
            food
        },
    )
}

fn plan_with(foods: Vec<(usize, usize, FoodEntry)>) -> MealPlan {
    let mut plan = MealPlan::new();
    for (day, slot, food) in foods {
        add_food_entry(&mut plan, Day::ALL[day], MealSlot::ALL[slot], food, None);
    }
    plan
}

fn preference() -> impl Strategy<Value = DoshaPreference> {
    Just(Dosha::ALL.to_vec())
        .prop_shuffle()
        .prop_map(|order| DoshaPreference::new([order[0], order[1], order[2]]).unwrap())
}

proptest! {
    #[test]
    fn percentages_sum_to_hundred(
        vata in any::<u32>(),
        pitta in any::<u32>(),
        kapha in any::<u32>(),
        pref in preference(),
    ) {
        let split = percentages(&DoshaScores::new(vata, pitta, kapha), &pref);
        prop_assert_eq!(split.total(), 100);
        prop_assert!(split.vata <= 100 && split.pitta <= 100 && split.kapha <= 100);
    }

    #[test]
    fn dual_iff_gap_within_threshold(
        vata in 0u32..500,
        pitta in 0u32..500,
        kapha in 0u32..500,
        threshold in 0u32..=100,
    ) {
        let pref = DoshaPreference::default();
        let c = classify(&DoshaScores::new(vata, pitta, kapha), threshold, &pref);
        let ranked = pref.sort_desc(|d| c.percentages.get(d));

        prop_assert_eq!(c.primary, ranked[0]);
        prop_assert_eq!(c.gap, c.percentages.get(ranked[0]) - c.percentages.get(ranked[1]));
        prop_assert_eq!(c.is_dual, c.gap <= threshold);
        prop_assert_eq!(c.secondary.is_some(), c.is_dual);

        // Same input, same answer
        prop_assert_eq!(classify(&DoshaScores::new(vata, pitta, kapha), threshold, &pref), c);
    }

    #[test]
    fn scores_never_decrease(answers in proptest::collection::vec(0usize..3, 10)) {
        let scorer = PrakritiScorer::default();
        let mut session = scorer.start_session("patient".into());
        let mut previous = session.scores;

        for (i, option) in answers.into_iter().enumerate() {
            let outcome = scorer.submit_answer(&mut session, i, option).unwrap();
            prop_assert!(outcome.scores.dominates(&previous));
            previous = outcome.scores;
        }

        let result = scorer.result(&session).unwrap();
        prop_assert_eq!(result.percentages.total(), 100);
    }

    #[test]
    fn out_of_sequence_is_rejected_without_mutation(
        answered in 0usize..10,
        skip in 1usize..5,
        option in 0usize..3,
    ) {
        let scorer = PrakritiScorer::default();
        let mut session = scorer.start_session("patient".into());
        for i in 0..answered {
            scorer.submit_answer(&mut session, i, option).unwrap();
        }
        let before = session.clone();

        prop_assert!(scorer.submit_answer(&mut session, answered + skip, 0).is_err());
        prop_assert_eq!(session, before);
    }

    #[test]
    fn summarize_is_idempotent(
        foods in proptest::collection::vec((0usize..7, 0usize..4, food()), 0..30),
    ) {
        let plan = plan_with(foods);
        prop_assert_eq!(summarize(&plan), summarize(&plan));
    }

    #[test]
    fn remove_then_readd_restores_summary(
        foods in proptest::collection::vec((0usize..7, 0usize..4, food()), 1..30),
        pick in any::<prop::sample::Index>(),
    ) {
        let mut plan = plan_with(foods);
        let before = summarize(&plan);

        let (day, slot) = plan
            .entries()
            .nth(pick.index(plan.entry_count()))
            .map(|(d, s, _)| (d, s))
            .unwrap();
        let removed = remove_food_entry(&mut plan, day, slot, 0).unwrap();
        add_food_entry(&mut plan, day, slot, removed.food, Some(removed.quantity));

        prop_assert_eq!(summarize(&plan), before);
    }
}

#[test]
fn empty_plan_summarizes_to_zero() {
    assert_eq!(summarize(&MealPlan::new()), NutritionSummary::default());
}
