use serde::Serialize;
use std::fmt;

use super::questions::{Question, QuestionId, QuestionSet, TierThresholds};
use super::session::{AssessmentSession, SessionError, SessionStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

const LOW_RECOMMENDATIONS: &[&str] = &[
    "Maintain current good practices",
    "Regular review of protocols",
    "Stay updated with best practices",
];

const MEDIUM_RECOMMENDATIONS: &[&str] = &[
    "Improve cleaning schedules",
    "Enhance visitor protocols",
    "Regular health monitoring",
];

const HIGH_RECOMMENDATIONS: &[&str] = &[
    "Implement daily cleaning and disinfection protocols",
    "Establish a proper quarantine facility",
    "Restrict and monitor farm visitors",
    "Increase animal health monitoring frequency",
];

impl RiskTier {
    /// Classify a total score. Both cut points are inclusive upper bounds.
    pub fn from_score(total: u32, thresholds: TierThresholds) -> Self {
        if total <= thresholds.low_max {
            RiskTier::Low
        } else if total <= thresholds.medium_max {
            RiskTier::Medium
        } else {
            RiskTier::High
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskTier::Low => "Low",
            RiskTier::Medium => "Medium",
            RiskTier::High => "High",
        }
    }

    /// Fixed guidance for the tier.
    pub fn recommendations(&self) -> &'static [&'static str] {
        match self {
            RiskTier::Low => LOW_RECOMMENDATIONS,
            RiskTier::Medium => MEDIUM_RECOMMENDATIONS,
            RiskTier::High => HIGH_RECOMMENDATIONS,
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerContribution {
    pub question_id: QuestionId,
    pub question: String, // e.g. "How do you manage visitors to your farm?"
    pub answer: String,   // e.g. "Basic restrictions"
    pub score: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskResult {
    pub total_score: u32,
    pub max_possible_score: u32,
    pub tier: RiskTier,
    pub answered: usize,
    pub question_count: usize,
    /// True when computed from a session that has not been completed yet.
    pub incomplete: bool,
    pub breakdown: Vec<AnswerContribution>,
}

impl RiskResult {
    pub fn recommendations(&self) -> &'static [&'static str] {
        self.tier.recommendations()
    }
}

/// Score whatever has been recorded so far. Pure: depends only on the session's
/// answers and status, never on navigation history.
pub fn calculate_result(session: &AssessmentSession, questions: &QuestionSet) -> RiskResult {
    let total_score = session.answers().values().fold(0, |acc: u32, &s| acc.saturating_add(s));

    let breakdown = session
        .answers()
        .iter()
        .filter_map(|(&id, &score)| {
            let question = questions.get(id)?;
            let answer = question
                .option_for_score(score)
                .map(|o| o.label.clone())
                .unwrap_or_default();
            Some(AnswerContribution {
                question_id: id,
                question: question.text.clone(),
                answer,
                score,
            })
        })
        .collect();

    RiskResult {
        total_score,
        max_possible_score: questions.max_possible_score(),
        tier: RiskTier::from_score(total_score, questions.thresholds()),
        answered: session.answered_count(),
        question_count: questions.len(),
        incomplete: !session.is_complete(),
        breakdown,
    }
}

/// Outcome of a successful `advance`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    Moved { index: usize },
    Completed,
}

/// Drives [`AssessmentSession`]s over one question set.
///
/// Every transition either applies fully or returns a [`SessionError`] and leaves
/// the session untouched, so a caller that ignores errors sees a no-op.
#[derive(Debug, Clone, Default)]
pub struct AssessmentEngine {
    questions: QuestionSet,
}

impl AssessmentEngine {
    pub fn new(questions: QuestionSet) -> Self {
        Self { questions }
    }

    pub fn questions(&self) -> &QuestionSet {
        &self.questions
    }

    pub fn start(&self) -> AssessmentSession {
        AssessmentSession::new()
    }

    /// Question at the session's current index, `None` once completed.
    pub fn current_question(&self, session: &AssessmentSession) -> Option<&Question> {
        match session.status() {
            SessionStatus::Completed => None,
            SessionStatus::InProgress => self.questions.get(session.current_index()),
        }
    }

    /// Record (or overwrite) the score for `question_id`. Does not move the cursor.
    pub fn answer(
        &self,
        session: &mut AssessmentSession,
        question_id: QuestionId,
        score: u32,
    ) -> Result<(), SessionError> {
        if session.is_complete() {
            return Err(SessionError::Completed);
        }

        let question = self
            .questions
            .get(question_id)
            .ok_or(SessionError::UnknownQuestion {
                id: question_id,
                count: self.questions.len(),
            })?;

        if question.option_for_score(score).is_none() {
            return Err(SessionError::IllegalScore {
                id: question_id,
                score,
            });
        }

        session.answers.insert(question_id, score);
        Ok(())
    }

    /// Move to the next question, or complete the session from the last one.
    /// Refused while the current question is unanswered.
    pub fn advance(&self, session: &mut AssessmentSession) -> Result<Progress, SessionError> {
        if session.is_complete() {
            return Err(SessionError::Completed);
        }

        if !session.current_answered() {
            return Err(SessionError::Unanswered {
                index: session.current_index(),
            });
        }

        if session.current_index + 1 >= self.questions.len() {
            session.status = SessionStatus::Completed;
            Ok(Progress::Completed)
        } else {
            session.current_index += 1;
            Ok(Progress::Moved {
                index: session.current_index,
            })
        }
    }

    /// Step back one question; stays put on the first. Answers are kept.
    pub fn retreat(&self, session: &mut AssessmentSession) -> Result<(), SessionError> {
        if session.is_complete() {
            return Err(SessionError::Completed);
        }

        session.current_index = session.current_index.saturating_sub(1);
        Ok(())
    }

    pub fn is_complete(&self, session: &AssessmentSession) -> bool {
        session.is_complete()
    }

    pub fn result(&self, session: &AssessmentSession) -> RiskResult {
        calculate_result(session, &self.questions)
    }

    /// Back to a fresh session; the only way out of `Completed`.
    pub fn restart(&self, session: &mut AssessmentSession) {
        *session = self.start();
    }

    /// Answer-and-advance once per score, in question order, through the same
    /// preconditions as interactive use. A full list completes the session.
    pub fn replay(&self, scores: &[u32]) -> Result<AssessmentSession, SessionError> {
        let mut session = self.start();
        for &score in scores {
            let id = session.current_index();
            self.answer(&mut session, id, score)?;
            self.advance(&mut session)?;
        }
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::{AnswerOption, QuestionConfig, QuestionnaireConfig};

    fn engine() -> AssessmentEngine {
        AssessmentEngine::new(QuestionSet::reference())
    }

    /// Answer each question with the given score and advance past it.
    fn run_through(engine: &AssessmentEngine, scores: &[u32]) -> AssessmentSession {
        let mut session = engine.start();
        for (id, score) in scores.iter().enumerate() {
            engine.answer(&mut session, id, *score).unwrap();
            engine.advance(&mut session).unwrap();
        }
        session
    }

    #[test]
    fn test_tier_boundaries() {
        let thresholds = TierThresholds::default();

        assert_eq!(RiskTier::from_score(0, thresholds), RiskTier::Low);
        assert_eq!(RiskTier::from_score(6, thresholds), RiskTier::Low);
        assert_eq!(RiskTier::from_score(7, thresholds), RiskTier::Medium);
        assert_eq!(RiskTier::from_score(10, thresholds), RiskTier::Medium);
        assert_eq!(RiskTier::from_score(11, thresholds), RiskTier::High);
        assert_eq!(RiskTier::from_score(16, thresholds), RiskTier::High);
    }

    #[test]
    fn test_custom_thresholds() {
        let thresholds = TierThresholds { low_max: 2, medium_max: 3 };

        assert_eq!(RiskTier::from_score(2, thresholds), RiskTier::Low);
        assert_eq!(RiskTier::from_score(3, thresholds), RiskTier::Medium);
        assert_eq!(RiskTier::from_score(4, thresholds), RiskTier::High);
    }

    #[test]
    fn test_one_recommendation_set_per_tier() {
        assert_eq!(RiskTier::Low.recommendations()[0], "Maintain current good practices");
        assert_eq!(RiskTier::Medium.recommendations().len(), 3);
        assert_eq!(RiskTier::High.recommendations().len(), 4);
        assert_eq!(
            RiskTier::High.recommendations()[0],
            "Implement daily cleaning and disinfection protocols"
        );
    }

    #[test]
    fn test_all_lowest_is_low() {
        let engine = engine();
        let session = run_through(&engine, &[1, 1, 1, 1]);
        let result = engine.result(&session);

        assert!(session.is_complete());
        assert_eq!(result.total_score, 4);
        assert_eq!(result.max_possible_score, 16);
        assert_eq!(result.tier, RiskTier::Low);
        assert_eq!(result.recommendations(), LOW_RECOMMENDATIONS);
        assert!(!result.incomplete);
    }

    #[test]
    fn test_all_highest_is_high() {
        let engine = engine();
        let session = run_through(&engine, &[4, 4, 4, 4]);
        let result = engine.result(&session);

        assert_eq!(result.total_score, 16);
        assert_eq!(result.tier, RiskTier::High);
        assert_eq!(result.recommendations(), HIGH_RECOMMENDATIONS);
    }

    #[test]
    fn test_mixed_answers_medium() {
        let engine = engine();
        let session = run_through(&engine, &[1, 2, 3, 2]);
        let result = engine.result(&session);

        assert_eq!(result.total_score, 8);
        assert_eq!(result.tier, RiskTier::Medium);
    }

    #[test]
    fn test_advance_without_answer_is_rejected() {
        let engine = engine();
        let mut session = engine.start();
        let before = session.clone();

        let err = engine.advance(&mut session).unwrap_err();
        assert_eq!(err, SessionError::Unanswered { index: 0 });
        assert_eq!(session, before);
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.status(), SessionStatus::InProgress);
    }

    #[test]
    fn test_retreat_keeps_answer() {
        let engine = engine();
        let mut session = engine.start();

        engine.answer(&mut session, 0, 1).unwrap();
        assert_eq!(engine.advance(&mut session), Ok(Progress::Moved { index: 1 }));
        engine.retreat(&mut session).unwrap();

        assert_eq!(session.current_index(), 0);
        assert_eq!(session.answer_for(0), Some(1));
        assert_eq!(session.status(), SessionStatus::InProgress);
    }

    #[test]
    fn test_retreat_floor_at_zero() {
        let engine = engine();
        let mut session = engine.start();

        engine.retreat(&mut session).unwrap();
        engine.retreat(&mut session).unwrap();
        assert_eq!(session, engine.start());
    }

    #[test]
    fn test_answer_does_not_move_cursor() {
        let engine = engine();
        let mut session = engine.start();

        // Answering a later question is allowed and leaves the cursor alone
        engine.answer(&mut session, 2, 3).unwrap();
        assert_eq!(session.current_index(), 0);
        assert!(!session.current_answered());
        assert_eq!(session.answer_for(2), Some(3));
    }

    #[test]
    fn test_reanswer_overwrites() {
        let engine = engine();
        let mut session = engine.start();

        engine.answer(&mut session, 0, 4).unwrap();
        engine.answer(&mut session, 0, 2).unwrap();

        assert_eq!(session.answered_count(), 1);
        assert_eq!(engine.result(&session).total_score, 2);
    }

    #[test]
    fn test_illegal_answers_rejected() {
        let engine = engine();
        let mut session = engine.start();
        let before = session.clone();

        assert_eq!(
            engine.answer(&mut session, 0, 5),
            Err(SessionError::IllegalScore { id: 0, score: 5 })
        );
        assert_eq!(
            engine.answer(&mut session, 0, 0),
            Err(SessionError::IllegalScore { id: 0, score: 0 })
        );
        assert_eq!(
            engine.answer(&mut session, 4, 1),
            Err(SessionError::UnknownQuestion { id: 4, count: 4 })
        );
        assert_eq!(session, before);
    }

    #[test]
    fn test_answering_everything_does_not_complete() {
        let engine = engine();
        let mut session = engine.start();

        for id in 0..4 {
            engine.answer(&mut session, id, 2).unwrap();
        }

        assert!(!session.is_complete());
        assert!(engine.result(&session).incomplete);
        assert_eq!(engine.current_question(&session).unwrap().id, 0);
    }

    #[test]
    fn test_completed_session_is_frozen() {
        let engine = engine();
        let mut session = run_through(&engine, &[2, 2, 2, 2]);
        let before = session.clone();

        assert_eq!(engine.answer(&mut session, 0, 1), Err(SessionError::Completed));
        assert_eq!(engine.advance(&mut session), Err(SessionError::Completed));
        assert_eq!(engine.retreat(&mut session), Err(SessionError::Completed));
        assert_eq!(session, before);
        assert!(engine.current_question(&session).is_none());
    }

    #[test]
    fn test_last_advance_completes() {
        let engine = engine();
        let mut session = engine.start();

        for id in 0..3 {
            engine.answer(&mut session, id, 1).unwrap();
            assert_eq!(engine.advance(&mut session), Ok(Progress::Moved { index: id + 1 }));
        }
        engine.answer(&mut session, 3, 1).unwrap();

        assert_eq!(session.current_index(), 3);
        assert_eq!(engine.advance(&mut session), Ok(Progress::Completed));
        assert!(engine.is_complete(&session));
        // Cursor stays on the last question
        assert_eq!(session.current_index(), 3);
    }

    #[test]
    fn test_restart_from_any_state() {
        let engine = engine();

        let mut completed = run_through(&engine, &[4, 3, 2, 1]);
        engine.restart(&mut completed);
        assert_eq!(completed, AssessmentSession::new());

        let mut partial = engine.start();
        engine.answer(&mut partial, 0, 3).unwrap();
        engine.advance(&mut partial).unwrap();
        engine.restart(&mut partial);
        assert_eq!(partial, AssessmentSession::new());
    }

    #[test]
    fn test_partial_result() {
        let engine = engine();
        let mut session = engine.start();
        engine.answer(&mut session, 0, 4).unwrap();
        engine.answer(&mut session, 1, 3).unwrap();

        let result = engine.result(&session);
        assert_eq!(result.total_score, 7);
        assert_eq!(result.tier, RiskTier::Medium);
        assert_eq!(result.answered, 2);
        assert_eq!(result.question_count, 4);
        assert!(result.incomplete);
    }

    #[test]
    fn test_result_is_repeatable() {
        let engine = engine();
        let session = run_through(&engine, &[3, 1, 4, 1]);

        let first = engine.result(&session);
        let second = engine.result(&session);
        assert_eq!(first, second);
        assert_eq!(first.total_score, session.answers().values().sum::<u32>());
    }

    #[test]
    fn test_breakdown_names_chosen_options() {
        let engine = engine();
        let session = run_through(&engine, &[1, 4, 2, 3]);
        let result = engine.result(&session);

        assert_eq!(result.breakdown.len(), 4);
        assert_eq!(result.breakdown[0].answer, "Daily");
        assert_eq!(result.breakdown[1].answer, "No");
        assert_eq!(result.breakdown[2].answer, "Basic restrictions");
        assert_eq!(result.breakdown[3].answer, "Weekly");
        assert_eq!(result.breakdown[3].score, 3);
    }

    #[test]
    fn test_index_stays_in_range() {
        let engine = engine();
        let mut session = engine.start();
        let len = engine.questions().len();

        // Walk forward and back repeatedly; never leave the valid range
        for round in 0..3 {
            for _ in 0..len {
                let idx = session.current_index();
                engine.answer(&mut session, idx, 1).unwrap();
                if idx + 1 < len {
                    engine.advance(&mut session).unwrap();
                }
                assert!(session.current_index() < len);
            }
            for _ in 0..=len + round {
                engine.retreat(&mut session).unwrap();
                assert!(session.current_index() < len);
            }
        }
        assert!(!session.is_complete());
    }

    #[test]
    fn test_replay_full_and_partial() {
        let engine = engine();

        let full = engine.replay(&[2, 2, 2, 2]).unwrap();
        assert!(full.is_complete());
        assert_eq!(engine.result(&full).total_score, 8);

        let partial = engine.replay(&[4, 4]).unwrap();
        assert!(!partial.is_complete());
        assert_eq!(partial.current_index(), 2);
        assert_eq!(engine.result(&partial).tier, RiskTier::Medium);
    }

    #[test]
    fn test_replay_rejects_bad_input() {
        let engine = engine();

        assert_eq!(
            engine.replay(&[1, 9]),
            Err(SessionError::IllegalScore { id: 1, score: 9 })
        );
        assert_eq!(engine.replay(&[1, 1, 1, 1, 1]), Err(SessionError::Completed));
    }

    #[test]
    fn test_total_saturates_instead_of_overflowing() {
        let engine = engine();
        let mut session = engine.start();
        session.answers.insert(0, u32::MAX);
        session.answers.insert(1, u32::MAX);

        let result = engine.result(&session);
        assert_eq!(result.total_score, u32::MAX);
        assert_eq!(result.tier, RiskTier::High);
    }

    #[test]
    fn test_single_question_set() {
        let config = QuestionnaireConfig {
            thresholds: Some(TierThresholds { low_max: 1, medium_max: 2 }),
            questions: Some(vec![QuestionConfig {
                text: "Footbaths at every entrance?".to_string(),
                options: vec![
                    AnswerOption::new("Yes", 1),
                    AnswerOption::new("Some", 2),
                    AnswerOption::new("No", 3),
                ],
            }]),
        };
        let engine = AssessmentEngine::new(QuestionSet::from_config(&config).unwrap());
        let mut session = engine.start();

        engine.answer(&mut session, 0, 3).unwrap();
        assert_eq!(engine.advance(&mut session), Ok(Progress::Completed));

        let result = engine.result(&session);
        assert_eq!(result.max_possible_score, 3);
        assert_eq!(result.tier, RiskTier::High);
    }
}
