//! Answer accumulation over a question bank.

use tracing::{debug, info};

use crate::config::AssessmentConfig;
use crate::models::{AssessmentProgress, AssessmentSession, PrakritiResult, SubmitOutcome};

use super::{classify, AssessmentError, AssessmentResult, DoshaPreference, QuestionBank};

/// Scores assessment sessions against a fixed question bank.
#[derive(Debug, Clone)]
pub struct PrakritiScorer {
    bank: QuestionBank,
    dual_threshold: u32,
    preference: DoshaPreference,
}

impl Default for PrakritiScorer {
    fn default() -> Self {
        Self::new(QuestionBank::default())
    }
}

impl PrakritiScorer {
    /// Create a scorer with the default threshold (10 points) and
    /// vata > pitta > kapha tie-break.
    pub fn new(bank: QuestionBank) -> Self {
        let defaults = AssessmentConfig::default();
        Self {
            bank,
            dual_threshold: defaults.dual_threshold,
            preference: DoshaPreference::default(),
        }
    }

    /// Create a scorer from configuration.
    pub fn with_config(bank: QuestionBank, config: &AssessmentConfig) -> AssessmentResult<Self> {
        Ok(Self {
            bank,
            dual_threshold: config.dual_threshold,
            preference: DoshaPreference::new(config.tie_break)?,
        })
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    pub fn dual_threshold(&self) -> u32 {
        self.dual_threshold
    }

    pub fn preference(&self) -> &DoshaPreference {
        &self.preference
    }

    /// Start a new session. Earlier sessions are superseded, never reset.
    pub fn start_session(&self, patient_id: String) -> AssessmentSession {
        let session = AssessmentSession::new(patient_id);
        debug!(
            session_id = %session.session_id,
            patient_id = %session.patient_id,
            questions = self.bank.len(),
            "assessment session started"
        );
        session
    }

    /// Apply one answer to a session.
    ///
    /// Rejections leave the session untouched. Checks run in order:
    /// completion, sequence, option range.
    pub fn submit_answer(
        &self,
        session: &mut AssessmentSession,
        question_index: usize,
        option_index: usize,
    ) -> AssessmentResult<SubmitOutcome> {
        if session.completed {
            return Err(AssessmentError::AlreadyComplete(session.session_id.clone()));
        }

        if question_index != session.next_index {
            return Err(AssessmentError::Sequence {
                expected: session.next_index,
                got: question_index,
            });
        }

        // A restored session can point past a bank that has since shrunk
        let question = self.bank.get(question_index).ok_or(AssessmentError::Sequence {
            expected: session.next_index,
            got: question_index,
        })?;

        let option = question
            .options
            .get(option_index)
            .ok_or(AssessmentError::InvalidOption {
                question: question_index,
                option: option_index,
                available: question.options.len(),
            })?;

        session.scores.accumulate(&option.weights);
        session.selections.push(option_index);
        session.next_index += 1;

        debug!(
            session_id = %session.session_id,
            question = question_index,
            option = option_index,
            vata = session.scores.vata,
            pitta = session.scores.pitta,
            kapha = session.scores.kapha,
            "answer accepted"
        );

        if session.next_index == self.bank.len() {
            let result = self.finalize(session);
            session.completed = true;
            session.result = Some(result.clone());

            info!(
                session_id = %session.session_id,
                primary = %result.primary,
                is_dual = result.is_dual,
                "assessment complete"
            );

            return Ok(SubmitOutcome {
                scores: session.scores,
                is_complete: true,
                result: Some(result),
            });
        }

        Ok(SubmitOutcome {
            scores: session.scores,
            is_complete: false,
            result: None,
        })
    }

    /// Result of a completed session.
    pub fn result<'s>(&self, session: &'s AssessmentSession) -> Option<&'s PrakritiResult> {
        session.result.as_ref()
    }

    /// Answered/total counts for a session.
    pub fn progress(&self, session: &AssessmentSession) -> AssessmentProgress {
        AssessmentProgress {
            answered: session.answered(),
            total: self.bank.len(),
            completed: session.completed,
        }
    }

    fn finalize(&self, session: &AssessmentSession) -> PrakritiResult {
        let classification = classify(&session.scores, self.dual_threshold, &self.preference);
        PrakritiResult {
            percentages: classification.percentages,
            primary: classification.primary,
            secondary: classification.secondary,
            is_dual: classification.is_dual,
            total_scores: session.scores,
            completed_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::models::{AnswerOption, Dosha, DoshaScores, Question, QuestionCategory};

    fn bank_of(weights: &[(u32, u32, u32)]) -> QuestionBank {
        let questions = weights
            .iter()
            .enumerate()
            .map(|(i, &(v, p, k))| Question {
                id: format!("q{}", i + 1),
                number: i as u32 + 1,
                category: QuestionCategory::EnergyActivity,
                text: format!("Question {}", i + 1),
                options: vec![
                    AnswerOption::new("weighted", v, p, k),
                    AnswerOption::new("empty", 0, 0, 0),
                ],
            })
            .collect();
        QuestionBank::new(questions).unwrap()
    }

    #[test]
    fn test_full_run_with_default_bank() {
        let scorer = PrakritiScorer::default();
        let mut session = scorer.start_session("patient-1".into());

        // Six vata answers, three pitta, one kapha
        let choices = [0, 0, 0, 0, 0, 0, 1, 1, 1, 2];
        let mut last = None;
        for (i, &choice) in choices.iter().enumerate() {
            last = Some(scorer.submit_answer(&mut session, i, choice).unwrap());
        }

        let outcome = last.unwrap();
        assert!(outcome.is_complete);
        assert_eq!(outcome.scores, DoshaScores::new(18, 9, 3));

        let result = outcome.result.unwrap();
        assert_eq!(result.percentages.vata, 60);
        assert_eq!(result.percentages.pitta, 30);
        assert_eq!(result.percentages.kapha, 10);
        assert_eq!(result.primary, Dosha::Vata);
        assert!(!result.is_dual);
        assert!(result.secondary.is_none());
        assert_eq!(scorer.result(&session), Some(&result));
    }

    #[test]
    fn test_incomplete_session_has_no_result() {
        let scorer = PrakritiScorer::default();
        let mut session = scorer.start_session("patient-1".into());
        let outcome = scorer.submit_answer(&mut session, 0, 1).unwrap();

        assert!(!outcome.is_complete);
        assert!(outcome.result.is_none());
        assert!(scorer.result(&session).is_none());

        let progress = scorer.progress(&session);
        assert_eq!(progress.answered, 1);
        assert_eq!(progress.total, 10);
        assert!(!progress.completed);
    }

    #[test]
    fn test_out_of_sequence_does_not_mutate() {
        let scorer = PrakritiScorer::default();
        let mut session = scorer.start_session("patient-1".into());
        scorer.submit_answer(&mut session, 0, 0).unwrap();
        let before = session.clone();

        let err = scorer.submit_answer(&mut session, 2, 0).unwrap_err();
        assert_eq!(err, AssessmentError::Sequence { expected: 1, got: 2 });
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(session, before);

        // Re-answering an earlier question is also out of sequence
        let err = scorer.submit_answer(&mut session, 0, 1).unwrap_err();
        assert!(matches!(err, AssessmentError::Sequence { .. }));
        assert_eq!(session, before);
    }

    #[test]
    fn test_invalid_option_does_not_mutate() {
        let scorer = PrakritiScorer::default();
        let mut session = scorer.start_session("patient-1".into());
        let before = session.clone();

        let err = scorer.submit_answer(&mut session, 0, 3).unwrap_err();
        assert_eq!(
            err,
            AssessmentError::InvalidOption {
                question: 0,
                option: 3,
                available: 3
            }
        );
        assert_eq!(session, before);
    }

    #[test]
    fn test_submit_after_completion() {
        let scorer = PrakritiScorer::new(bank_of(&[(1, 0, 0)]));
        let mut session = scorer.start_session("patient-1".into());
        scorer.submit_answer(&mut session, 0, 0).unwrap();
        let finished = session.clone();

        let err = scorer.submit_answer(&mut session, 1, 0).unwrap_err();
        assert!(matches!(err, AssessmentError::AlreadyComplete(_)));
        assert_eq!(err.kind(), ErrorKind::State);
        assert_eq!(session, finished);
    }

    #[test]
    fn test_dual_with_custom_threshold() {
        // 5/3/2 → 50/30/20, gap 20
        let bank = bank_of(&[(5, 0, 0), (0, 3, 0), (0, 0, 2)]);
        let config = AssessmentConfig {
            dual_threshold: 20,
            ..Default::default()
        };
        let scorer = PrakritiScorer::with_config(bank, &config).unwrap();
        let mut session = scorer.start_session("patient-1".into());
        for i in 0..3 {
            scorer.submit_answer(&mut session, i, 0).unwrap();
        }

        let result = session.result.unwrap();
        assert!(result.is_dual);
        assert_eq!(result.secondary, Some(Dosha::Pitta));
    }

    #[test]
    fn test_all_zero_answers_complete() {
        let scorer = PrakritiScorer::new(bank_of(&[(2, 0, 0), (0, 2, 0)]));
        let mut session = scorer.start_session("patient-1".into());
        scorer.submit_answer(&mut session, 0, 1).unwrap();
        let outcome = scorer.submit_answer(&mut session, 1, 1).unwrap();

        let result = outcome.result.unwrap();
        assert_eq!(result.percentages.total(), 100);
        assert_eq!(result.primary, Dosha::Vata);
    }

    #[test]
    fn test_restored_session_past_bank_end() {
        let scorer = PrakritiScorer::new(bank_of(&[(1, 0, 0)]));
        let mut session = scorer.start_session("patient-1".into());
        session.next_index = 4;

        let err = scorer.submit_answer(&mut session, 4, 0).unwrap_err();
        assert!(matches!(err, AssessmentError::Sequence { expected: 4, got: 4 }));
    }
}
