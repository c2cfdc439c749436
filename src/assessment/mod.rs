pub mod engine;
pub mod questions;
pub mod session;
pub mod validation;

pub use engine::{
    calculate_result, AnswerContribution, AssessmentEngine, Progress, RiskResult, RiskTier,
};
pub use questions::*;
pub use session::{AssessmentSession, SessionError, SessionStatus};
pub use validation::{questionnaire_warnings, validate_questionnaire};
