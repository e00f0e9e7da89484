//! Validated, ordered question bank.

use serde::{Deserialize, Serialize};

use crate::models::{default_questions, Dosha, Question};

use super::{AssessmentError, AssessmentResult};

/// Ordered assessment questions. Non-empty; every question has options, and
/// no answer path can push a running score past `u32::MAX`.
///
/// Serializes as a plain `Question[]`; deserialization runs the same checks
/// as [`QuestionBank::new`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "Vec<Question>", into = "Vec<Question>")]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl Default for QuestionBank {
    fn default() -> Self {
        Self {
            questions: default_questions(),
        }
    }
}

impl QuestionBank {
    /// Build a bank from already-fetched questions, in asking order.
    pub fn new(questions: Vec<Question>) -> AssessmentResult<Self> {
        if questions.is_empty() {
            return Err(AssessmentError::InvalidBank("no questions".into()));
        }
        if let Some(q) = questions.iter().find(|q| q.options.is_empty()) {
            return Err(AssessmentError::InvalidBank(format!(
                "question {} has no options",
                q.id
            )));
        }

        for dosha in Dosha::ALL {
            let max_score: u64 = questions
                .iter()
                .map(|q| {
                    q.options
                        .iter()
                        .map(|o| u64::from(o.weights.get(dosha)))
                        .max()
                        .unwrap_or(0)
                })
                .sum();
            if max_score > u64::from(u32::MAX) {
                return Err(AssessmentError::InvalidBank(format!(
                    "{} weights can total {}, above {}",
                    dosha,
                    max_score,
                    u32::MAX
                )));
            }
        }

        Ok(Self { questions })
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Always false for a constructed bank.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }
}

impl TryFrom<Vec<Question>> for QuestionBank {
    type Error = AssessmentError;

    fn try_from(questions: Vec<Question>) -> AssessmentResult<Self> {
        Self::new(questions)
    }
}

impl From<QuestionBank> for Vec<Question> {
    fn from(bank: QuestionBank) -> Self {
        bank.questions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AnswerOption, QuestionCategory};

    fn question(id: &str, options: Vec<AnswerOption>) -> Question {
        Question {
            id: id.into(),
            number: 1,
            category: QuestionCategory::Sleep,
            text: "How do you sleep?".into(),
            options,
        }
    }

    #[test]
    fn test_default_bank() {
        let bank = QuestionBank::default();
        assert_eq!(bank.len(), 10);
        assert!(!bank.is_empty());
        assert_eq!(bank.get(0).unwrap().number, 1);
        assert!(bank.get(10).is_none());
    }

    #[test]
    fn test_empty_bank_rejected() {
        assert!(matches!(
            QuestionBank::new(vec![]),
            Err(AssessmentError::InvalidBank(_))
        ));
    }

    #[test]
    fn test_question_without_options_rejected() {
        let result = QuestionBank::new(vec![
            question("q1", vec![AnswerOption::new("Light", 1, 0, 0)]),
            question("q2", vec![]),
        ]);
        match result {
            Err(AssessmentError::InvalidBank(msg)) => assert!(msg.contains("q2")),
            other => panic!("expected InvalidBank, got {:?}", other),
        }
    }

    #[test]
    fn test_bank_json_is_a_question_array() {
        let json = serde_json::to_value(QuestionBank::default()).unwrap();
        assert_eq!(json.as_array().unwrap().len(), 10);

        let bank: QuestionBank = serde_json::from_value(json).unwrap();
        assert_eq!(bank, QuestionBank::default());

        assert!(serde_json::from_str::<QuestionBank>("[]").is_err());
    }

    #[test]
    fn test_overflowing_weights_rejected() {
        let heavy = || question("q", vec![AnswerOption::new("Heavy", u32::MAX, 0, 0)]);
        assert!(QuestionBank::new(vec![heavy()]).is_ok());

        match QuestionBank::new(vec![heavy(), heavy()]) {
            Err(AssessmentError::InvalidBank(msg)) => assert!(msg.contains("Vata")),
            other => panic!("expected InvalidBank, got {:?}", other),
        }

        let json = serde_json::to_string(&vec![heavy(), heavy()]).unwrap();
        assert!(serde_json::from_str::<QuestionBank>(&json).is_err());
    }
}
