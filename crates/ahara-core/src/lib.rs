//! Ahara Core Library
//!
//! Prakriti (constitution) assessment scoring and dosha-aware meal plan
//! nutrition for the Ahara clinic apps.
//!
//! # Architecture
//!
//! ```text
//!   Question Bank                         Raw Catalog Records
//!        │                                        │
//!  submit_answer × N                     Normalization (once)
//!        │                                        │
//!  ┌─────▼─────────────┐                 ┌────────▼────────┐
//!  │ Running Scores    │                 │  FoodCatalog    │
//!  │ (per session)     │                 └────────┬────────┘
//!  └─────┬─────────────┘                          │
//!        │                            ┌───────────┴───────────┐
//!  Finalization                       │                       │
//!  (percentages → 100)          apply_template         add/remove entry
//!        │                            │                       │
//!  Classification                     └───────────┬───────────┘
//!  (primary / secondary / dual)                   │
//!                                          ┌──────▼──────┐
//!                                          │  MealPlan   │ version++
//!                                          └──────┬──────┘
//!                                                 │
//!                                       summarize (pure, full)
//!                                                 │
//!                                         NutritionSummary
//! ```
//!
//! # Core Principle
//!
//! **No derived state is cached.** Results and summaries are recomputed from
//! their inputs; a `VersionedSummary` records which plan state it describes.
//!
//! # Modules
//!
//! - [`models`]: Domain types (Question, AssessmentSession, FoodEntry, MealPlan, etc.)
//! - [`scoring`]: Prakriti scorer, question bank, classifier
//! - [`catalog`]: Catalog record normalization and lookup
//! - [`plan`]: Nutrition aggregation and meal templates
//! - [`config`]: Engine configuration

pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod plan;
pub mod scoring;

// Re-export commonly used types
pub use catalog::{FoodCatalog, FoodNormalizer};
pub use config::EngineConfig;
pub use error::ErrorKind;
pub use models::{
    AssessmentSession, Day, Dosha, DoshaEffect, FoodEntry, MealPlan, MealSlot, NutritionSummary,
    PrakritiResult, Question,
};
pub use plan::{summarize, PlanSkeleton, TemplateResolver};
pub use scoring::{PrakritiScorer, QuestionBank};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum AharaError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("State error: {0}")]
    State(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<scoring::AssessmentError> for AharaError {
    fn from(e: scoring::AssessmentError) -> Self {
        match e.kind() {
            ErrorKind::Validation => AharaError::Validation(e.to_string()),
            ErrorKind::State => AharaError::State(e.to_string()),
        }
    }
}

impl From<plan::PlanError> for AharaError {
    fn from(e: plan::PlanError) -> Self {
        AharaError::Validation(e.to_string())
    }
}

impl From<config::ConfigError> for AharaError {
    fn from(e: config::ConfigError) -> Self {
        AharaError::InvalidInput(e.to_string())
    }
}

impl From<serde_json::Error> for AharaError {
    fn from(e: serde_json::Error) -> Self {
        AharaError::SerializationError(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for AharaError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        AharaError::State(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Create an engine from an optional JSON config. `None` uses defaults.
#[uniffi::export]
pub fn create_engine(config_json: Option<String>) -> Result<Arc<AharaEngine>, AharaError> {
    let config = match config_json {
        Some(json) => EngineConfig::from_json_str(&json)?,
        None => EngineConfig::default(),
    };
    let scorer = PrakritiScorer::with_config(QuestionBank::default(), &config.assessment)?;

    Ok(Arc::new(AharaEngine {
        scorer: Arc::new(scorer),
        resolver: TemplateResolver::from_config(&config.templates),
        normalizer: FoodNormalizer::new(),
    }))
}

// =========================================================================
// Main API Object
// =========================================================================

/// Stateless engine handle for FFI. Plans and catalogs cross the boundary
/// as JSON.
#[derive(uniffi::Object)]
pub struct AharaEngine {
    scorer: Arc<PrakritiScorer>,
    resolver: TemplateResolver,
    normalizer: FoodNormalizer,
}

#[uniffi::export]
impl AharaEngine {
    // =========================================================================
    // Assessment Operations
    // =========================================================================

    /// List the question bank in order.
    pub fn questions(&self) -> Vec<FfiQuestion> {
        self.scorer
            .bank()
            .questions()
            .iter()
            .map(|q| q.clone().into())
            .collect()
    }

    /// Start a new assessment session.
    pub fn start_assessment(&self, patient_id: String) -> Arc<FfiAssessmentSession> {
        let session = self.scorer.start_session(patient_id);
        Arc::new(FfiAssessmentSession {
            session: Mutex::new(session),
            scorer: Arc::clone(&self.scorer),
        })
    }

    /// Resume a session from a `snapshot_json` payload.
    ///
    /// Snapshots whose progress, completion flag and result disagree are
    /// rejected.
    pub fn restore_assessment(
        &self,
        snapshot_json: String,
    ) -> Result<Arc<FfiAssessmentSession>, AharaError> {
        let session: AssessmentSession = serde_json::from_str(&snapshot_json)?;
        check_snapshot(&session, self.scorer.bank().len())?;

        Ok(Arc::new(FfiAssessmentSession {
            session: Mutex::new(session),
            scorer: Arc::clone(&self.scorer),
        }))
    }

    // =========================================================================
    // Meal Plan Operations
    // =========================================================================

    /// Summarize a JSON-encoded plan.
    pub fn summarize_plan_json(
        &self,
        plan_json: String,
    ) -> Result<FfiNutritionSummary, AharaError> {
        let plan: MealPlan = serde_json::from_str(&plan_json)?;
        Ok(summarize(&plan).into())
    }

    /// SHA-256 fingerprint of a JSON-encoded plan's entries.
    pub fn plan_fingerprint(&self, plan_json: String) -> Result<String, AharaError> {
        let plan: MealPlan = serde_json::from_str(&plan_json)?;
        Ok(plan.fingerprint())
    }

    /// Append a JSON-encoded food to a plan cell; returns the updated plan JSON.
    pub fn add_plan_entry(
        &self,
        plan_json: String,
        day: String,
        slot: String,
        food_json: String,
        quantity: Option<String>,
    ) -> Result<String, AharaError> {
        let mut plan: MealPlan = serde_json::from_str(&plan_json)?;
        let (day, slot) = parse_cell(&day, &slot)?;
        let food: FoodEntry = serde_json::from_str(&food_json)?;
        plan::add_food_entry(&mut plan, day, slot, food, quantity);
        Ok(serde_json::to_string(&plan)?)
    }

    /// Remove an entry from a plan cell; returns the updated plan JSON.
    pub fn remove_plan_entry(
        &self,
        plan_json: String,
        day: String,
        slot: String,
        index: u32,
    ) -> Result<String, AharaError> {
        let mut plan: MealPlan = serde_json::from_str(&plan_json)?;
        let (day, slot) = parse_cell(&day, &slot)?;
        plan::remove_food_entry(&mut plan, day, slot, index as usize)?;
        Ok(serde_json::to_string(&plan)?)
    }

    /// List built-in meal templates.
    pub fn templates(&self) -> Vec<FfiMealTemplate> {
        plan::builtin_templates().iter().map(|t| t.into()).collect()
    }

    /// Apply a template against a raw JSON catalog; returns the skeleton JSON.
    pub fn apply_template_json(
        &self,
        template_key: String,
        catalog_json: String,
    ) -> Result<String, AharaError> {
        let catalog = FoodCatalog::from_json_str(&catalog_json, &self.normalizer)?;
        let skeleton = self.resolver.apply_template(&template_key, &catalog);
        Ok(serde_json::to_string(&skeleton)?)
    }
}

fn check_snapshot(session: &AssessmentSession, bank_len: usize) -> Result<(), AharaError> {
    let invalid = |msg: String| Err(AharaError::InvalidInput(msg));

    if session.next_index != session.selections.len() {
        return invalid(format!(
            "Snapshot expects question {} but records {} answers",
            session.next_index,
            session.selections.len()
        ));
    }
    if session.next_index > bank_len {
        return invalid(format!(
            "Snapshot records {} answers for a {}-question bank",
            session.next_index, bank_len
        ));
    }
    if session.completed != (session.next_index == bank_len) {
        return invalid(format!(
            "Snapshot completed={} after {} of {} answers",
            session.completed, session.next_index, bank_len
        ));
    }
    if session.completed != session.result.is_some() {
        return invalid(format!(
            "Snapshot completed={} but result present={}",
            session.completed,
            session.result.is_some()
        ));
    }
    Ok(())
}

fn parse_cell(day: &str, slot: &str) -> Result<(Day, MealSlot), AharaError> {
    let day = Day::parse(day)
        .ok_or_else(|| AharaError::InvalidInput(format!("Unknown day: {}", day)))?;
    let slot = MealSlot::parse(slot)
        .ok_or_else(|| AharaError::InvalidInput(format!("Unknown meal slot: {}", slot)))?;
    Ok((day, slot))
}

// =========================================================================
// Assessment Session Object
// =========================================================================

/// Thread-safe session wrapper; submissions are serialized by the lock.
#[derive(uniffi::Object)]
pub struct FfiAssessmentSession {
    session: Mutex<AssessmentSession>,
    scorer: Arc<PrakritiScorer>,
}

#[uniffi::export]
impl FfiAssessmentSession {
    pub fn session_id(&self) -> Result<String, AharaError> {
        Ok(self.session.lock()?.session_id.clone())
    }

    /// Submit the answer for the next question.
    pub fn submit_answer(
        &self,
        question_index: u32,
        option_index: u32,
    ) -> Result<FfiSubmitOutcome, AharaError> {
        let mut session = self.session.lock()?;
        let outcome =
            self.scorer
                .submit_answer(&mut session, question_index as usize, option_index as usize)?;
        Ok(outcome.into())
    }

    /// Final result, once every question is answered.
    pub fn get_result(&self) -> Result<Option<FfiPrakritiResult>, AharaError> {
        let session = self.session.lock()?;
        Ok(self.scorer.result(&session).cloned().map(|r| r.into()))
    }

    pub fn progress(&self) -> Result<FfiProgress, AharaError> {
        let session = self.session.lock()?;
        Ok(self.scorer.progress(&session).into())
    }

    /// Serialize the session for persistence.
    pub fn snapshot_json(&self) -> Result<String, AharaError> {
        let session = self.session.lock()?;
        Ok(serde_json::to_string(&*session)?)
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe question.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiQuestion {
    pub id: String,
    pub number: u32,
    pub category: String,
    pub text: String,
    pub options: Vec<String>,
}

impl From<Question> for FfiQuestion {
    fn from(question: Question) -> Self {
        Self {
            id: question.id,
            number: question.number,
            category: question.category.key().to_string(),
            text: question.text,
            options: question.options.into_iter().map(|o| o.text).collect(),
        }
    }
}

/// FFI-safe score triple.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDoshaScores {
    pub vata: u32,
    pub pitta: u32,
    pub kapha: u32,
}

impl From<models::DoshaScores> for FfiDoshaScores {
    fn from(scores: models::DoshaScores) -> Self {
        Self {
            vata: scores.vata,
            pitta: scores.pitta,
            kapha: scores.kapha,
        }
    }
}

/// FFI-safe prakriti result.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPrakritiResult {
    pub vata_percent: u32,
    pub pitta_percent: u32,
    pub kapha_percent: u32,
    pub primary: String,
    pub secondary: Option<String>,
    pub is_dual: bool,
    pub total_scores: FfiDoshaScores,
    pub completed_at: String,
}

impl From<PrakritiResult> for FfiPrakritiResult {
    fn from(result: PrakritiResult) -> Self {
        Self {
            vata_percent: result.percentages.vata,
            pitta_percent: result.percentages.pitta,
            kapha_percent: result.percentages.kapha,
            primary: result.primary.key().to_string(),
            secondary: result.secondary.map(|d| d.key().to_string()),
            is_dual: result.is_dual,
            total_scores: result.total_scores.into(),
            completed_at: result.completed_at,
        }
    }
}

/// FFI-safe submission outcome.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiSubmitOutcome {
    pub scores: FfiDoshaScores,
    pub is_complete: bool,
    pub result: Option<FfiPrakritiResult>,
}

impl From<models::SubmitOutcome> for FfiSubmitOutcome {
    fn from(outcome: models::SubmitOutcome) -> Self {
        Self {
            scores: outcome.scores.into(),
            is_complete: outcome.is_complete,
            result: outcome.result.map(|r| r.into()),
        }
    }
}

/// FFI-safe progress.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiProgress {
    pub answered: u32,
    pub total: u32,
    pub completed: bool,
}

impl From<models::AssessmentProgress> for FfiProgress {
    fn from(progress: models::AssessmentProgress) -> Self {
        Self {
            answered: progress.answered as u32,
            total: progress.total as u32,
            completed: progress.completed,
        }
    }
}

/// FFI-safe increase/decrease counters.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDoshaTally {
    pub increase: u32,
    pub decrease: u32,
}

impl From<models::DoshaTally> for FfiDoshaTally {
    fn from(tally: models::DoshaTally) -> Self {
        Self {
            increase: tally.increase,
            decrease: tally.decrease,
        }
    }
}

/// FFI-safe nutrition summary.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiNutritionSummary {
    pub total_calories: u32,
    pub protein: u32,
    pub carbs: u32,
    pub fats: u32,
    pub fiber: u32,
    pub vata: FfiDoshaTally,
    pub pitta: FfiDoshaTally,
    pub kapha: FfiDoshaTally,
}

impl From<NutritionSummary> for FfiNutritionSummary {
    fn from(summary: NutritionSummary) -> Self {
        Self {
            total_calories: summary.total_calories,
            protein: summary.protein,
            carbs: summary.carbs,
            fats: summary.fats,
            fiber: summary.fiber,
            vata: summary.dosha_effects.vata.into(),
            pitta: summary.dosha_effects.pitta.into(),
            kapha: summary.dosha_effects.kapha.into(),
        }
    }
}

/// FFI-safe template listing.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiMealTemplate {
    pub key: String,
    pub name: String,
    pub description: String,
    pub target_calories: u32,
}

impl From<&plan::MealTemplate> for FfiMealTemplate {
    fn from(template: &plan::MealTemplate) -> Self {
        Self {
            key: template.key.to_string(),
            name: template.name.to_string(),
            description: template.description.to_string(),
            target_calories: template.target_calories,
        }
    }
}
