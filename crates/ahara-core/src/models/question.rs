//! Assessment question bank models.

use serde::{Deserialize, Serialize};

use super::dosha::DoshaScores;

/// Constitution trait a question probes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum QuestionCategory {
    BodyBuildWeight,
    SkinType,
    Hair,
    AppetiteDigestion,
    Sleep,
    TemperatureTolerance,
    EnergyActivity,
    MindEmotions,
    MemoryLearning,
    FoodPreferences,
}

impl QuestionCategory {
    /// Snake-case key, matching the serialized form.
    pub fn key(&self) -> &'static str {
        match self {
            QuestionCategory::BodyBuildWeight => "body_build_weight",
            QuestionCategory::SkinType => "skin_type",
            QuestionCategory::Hair => "hair",
            QuestionCategory::AppetiteDigestion => "appetite_digestion",
            QuestionCategory::Sleep => "sleep",
            QuestionCategory::TemperatureTolerance => "temperature_tolerance",
            QuestionCategory::EnergyActivity => "energy_activity",
            QuestionCategory::MindEmotions => "mind_emotions",
            QuestionCategory::MemoryLearning => "memory_learning",
            QuestionCategory::FoodPreferences => "food_preferences",
        }
    }
}

/// A single answer option with its per-dosha weights.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnswerOption {
    /// Option text shown to the patient
    pub text: String,
    /// Weights added to the running score when chosen
    pub weights: DoshaScores,
}

impl AnswerOption {
    pub fn new(text: impl Into<String>, vata: u32, pitta: u32, kapha: u32) -> Self {
        Self {
            text: text.into(),
            weights: DoshaScores::new(vata, pitta, kapha),
        }
    }
}

/// An assessment question.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Question {
    /// Stable identifier
    pub id: String,
    /// 1-based position in the bank
    pub number: u32,
    /// Trait category
    pub category: QuestionCategory,
    /// Question text
    pub text: String,
    /// Ordered options
    pub options: Vec<AnswerOption>,
}

impl Question {
    /// Build a question with the standard three single-dosha options
    /// (vata, pitta, kapha order, weight 3 each).
    fn single_dosha(
        number: u32,
        category: QuestionCategory,
        text: &str,
        vata: &str,
        pitta: &str,
        kapha: &str,
    ) -> Self {
        Self {
            id: format!("prakriti-q{:02}", number),
            number,
            category,
            text: text.into(),
            options: vec![
                AnswerOption::new(vata, 3, 0, 0),
                AnswerOption::new(pitta, 0, 3, 0),
                AnswerOption::new(kapha, 0, 0, 3),
            ],
        }
    }
}

/// The default ten-question Prakriti questionnaire.
pub fn default_questions() -> Vec<Question> {
    use QuestionCategory::*;

    vec![
        Question::single_dosha(
            1,
            BodyBuildWeight,
            "How would you describe your body build?",
            "Thin, lean, and find it hard to gain weight",
            "Medium build, gain/lose weight fairly easily",
            "Broad/stocky build, gain weight easily and slowly lose",
        ),
        Question::single_dosha(
            2,
            SkinType,
            "How is your skin usually?",
            "Dry, rough, cool",
            "Warm, reddish, sometimes oily, prone to rashes",
            "Smooth, pale, soft, oily, cool",
        ),
        Question::single_dosha(
            3,
            Hair,
            "How would you describe your hair?",
            "Dry, frizzy, thin",
            "Straight, fine, prone to early greying or thinning",
            "Thick, wavy, oily, strong",
        ),
        Question::single_dosha(
            4,
            AppetiteDigestion,
            "Which describes you best?",
            "Variable appetite, sometimes hungry, sometimes not",
            "Strong appetite, feel hungry quickly, can't skip meals",
            "Slow digestion, not very hungry, heavy after meals",
        ),
        Question::single_dosha(
            5,
            Sleep,
            "How is your sleep usually?",
            "Light, disturbed, less hours",
            "Medium, 6-8 hours, can wake up easily",
            "Heavy, long, find it hard to wake up",
        ),
        Question::single_dosha(
            6,
            TemperatureTolerance,
            "How do you feel in different weather?",
            "Sensitive to cold, prefer warmth",
            "Sensitive to heat, prefer cool climate",
            "Comfortable mostly, dislike dampness/humidity",
        ),
        Question::single_dosha(
            7,
            EnergyActivity,
            "How would you describe your energy level?",
            "Energetic in bursts, but tire quickly",
            "Consistent, strong energy but can burn out",
            "Steady, long-lasting stamina, but move slowly",
        ),
        Question::single_dosha(
            8,
            MindEmotions,
            "How do you usually react?",
            "Anxious, worry easily, quick to change mood",
            "Intense, focused, sometimes angry or impatient",
            "Calm, steady, forgiving, slow to anger",
        ),
        Question::single_dosha(
            9,
            MemoryLearning,
            "Which suits you best?",
            "Quick to learn but forget easily",
            "Sharp memory, analytical",
            "Learn slowly but retain long-term",
        ),
        Question::single_dosha(
            10,
            FoodPreferences,
            "Which foods do you like naturally?",
            "Warm, oily, grounding foods",
            "Cooling, light, less spicy foods",
            "Light, dry foods, spicy things to stimulate digestion",
        ),
    ]
}
