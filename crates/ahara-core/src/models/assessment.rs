//! Assessment session and result models.

use serde::{Deserialize, Serialize};

use super::dosha::{Dosha, DoshaScores};

/// Whole-number percentage split across the three doshas.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DoshaPercentages {
    pub vata: u32,
    pub pitta: u32,
    pub kapha: u32,
}

impl DoshaPercentages {
    pub fn get(&self, dosha: Dosha) -> u32 {
        match dosha {
            Dosha::Vata => self.vata,
            Dosha::Pitta => self.pitta,
            Dosha::Kapha => self.kapha,
        }
    }

    pub fn total(&self) -> u32 {
        self.vata + self.pitta + self.kapha
    }
}

/// Final constitution classification for a completed session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PrakritiResult {
    /// Percentages, always summing to 100
    pub percentages: DoshaPercentages,
    /// Dominant dosha
    pub primary: Dosha,
    /// Runner-up, present only for dual constitutions
    pub secondary: Option<Dosha>,
    /// Whether the top two doshas are within the closeness threshold
    pub is_dual: bool,
    /// Raw totals the percentages were derived from
    pub total_scores: DoshaScores,
    /// Completion timestamp (RFC 3339)
    pub completed_at: String,
}

/// A single patient's run through the question bank.
///
/// Single-writer accumulator: callers serialize submissions per session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssessmentSession {
    /// Unique session ID
    pub session_id: String,
    /// Patient the session belongs to
    pub patient_id: String,
    /// Running score vector
    pub scores: DoshaScores,
    /// Index of the next question expected
    pub next_index: usize,
    /// Selected option per answered question, in order
    pub selections: Vec<usize>,
    /// Set once the last question is answered
    pub completed: bool,
    /// Classification, present once completed
    pub result: Option<PrakritiResult>,
    /// Creation timestamp
    pub started_at: String,
}

impl AssessmentSession {
    /// Create a fresh session for a patient.
    pub fn new(patient_id: String) -> Self {
        Self {
            session_id: uuid::Uuid::new_v4().to_string(),
            patient_id,
            scores: DoshaScores::default(),
            next_index: 0,
            selections: Vec::new(),
            completed: false,
            result: None,
            started_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Number of questions answered so far.
    pub fn answered(&self) -> usize {
        self.selections.len()
    }

    pub fn is_complete(&self) -> bool {
        self.completed
    }
}

/// Outcome of a single accepted answer.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitOutcome {
    /// Running scores after the answer was applied
    pub scores: DoshaScores,
    /// Whether this answer completed the session
    pub is_complete: bool,
    /// Result, present when `is_complete`
    pub result: Option<PrakritiResult>,
}

/// Progress snapshot for a session.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct AssessmentProgress {
    pub answered: usize,
    pub total: usize,
    pub completed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session() {
        let session = AssessmentSession::new("patient-1".into());
        assert_eq!(session.patient_id, "patient-1");
        assert_eq!(session.session_id.len(), 36); // UUID format
        assert_eq!(session.scores.total(), 0);
        assert_eq!(session.next_index, 0);
        assert!(!session.is_complete());
        assert!(session.result.is_none());
    }

    #[test]
    fn test_session_serde_roundtrip() {
        let session = AssessmentSession::new("patient-1".into());
        let json = serde_json::to_string(&session).unwrap();
        let back: AssessmentSession = serde_json::from_str(&json).unwrap();
        assert_eq!(session, back);
    }
}
