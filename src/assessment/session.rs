use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use super::questions::QuestionId;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum SessionStatus {
    #[default]
    InProgress,
    Completed,
}

/// One run through the questionnaire.
///
/// Only [`AssessmentEngine`](super::AssessmentEngine) mutates a session, which keeps
/// `current_index` in range and recorded scores tied to the question's options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssessmentSession {
    pub(super) answers: BTreeMap<QuestionId, u32>,
    pub(super) current_index: usize,
    pub(super) status: SessionStatus,
}

impl AssessmentSession {
    /// Fresh session: no answers, first question, in progress.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answers(&self) -> &BTreeMap<QuestionId, u32> {
        &self.answers
    }

    /// Score recorded for a question, `None` while unanswered.
    pub fn answer_for(&self, id: QuestionId) -> Option<u32> {
        self.answers.get(&id).copied()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_complete(&self) -> bool {
        self.status == SessionStatus::Completed
    }

    /// Whether the question currently shown has an answer (gates `advance`).
    pub fn current_answered(&self) -> bool {
        self.answers.contains_key(&self.current_index)
    }

    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }
}

/// Contract violations reported by the engine. A rejected call never modifies the
/// session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The session was already completed; only restart is allowed.
    Completed,
    UnknownQuestion { id: QuestionId, count: usize },
    IllegalScore { id: QuestionId, score: u32 },
    /// Advance was requested before the current question was answered.
    Unanswered { index: usize },
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Completed => write!(f, "Assessment already completed; restart to change answers"),
            SessionError::UnknownQuestion { id, count } => {
                write!(f, "Unknown question {} (questionnaire has {} questions)", id, count)
            }
            SessionError::IllegalScore { id, score } => {
                write!(f, "Score {} is not an option for question {}", score, id + 1)
            }
            SessionError::Unanswered { index } => {
                write!(f, "Question {} must be answered before continuing", index + 1)
            }
        }
    }
}

impl std::error::Error for SessionError {}
