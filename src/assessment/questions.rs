use serde::{Deserialize, Serialize};

use super::validation::validate_questionnaire;

/// Question ids are list positions (0-based), so they also fix presentation order.
pub type QuestionId = usize;

/// One selectable answer. The score is the option's risk contribution (lower = safer).
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct AnswerOption {
    pub label: String,
    pub score: u32,
}

impl AnswerOption {
    pub fn new(label: &str, score: u32) -> Self {
        Self {
            label: label.to_string(),
            score,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub id: QuestionId,
    pub text: String,
    pub options: Vec<AnswerOption>,
}

impl Question {
    /// Find the option carrying `score`, if this question offers one.
    pub fn option_for_score(&self, score: u32) -> Option<&AnswerOption> {
        self.options.iter().find(|o| o.score == score)
    }

    pub fn max_score(&self) -> u32 {
        self.options.iter().map(|o| o.score).max().unwrap_or(0)
    }

    pub fn min_score(&self) -> u32 {
        self.options.iter().map(|o| o.score).min().unwrap_or(0)
    }
}

/// Highest score a single option may carry. Keeps every total well inside `u32`.
pub const MAX_OPTION_SCORE: u32 = 1000;

/// Cut points between tiers: `total <= low_max` is Low, `total <= medium_max` is
/// Medium, anything above is High.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct TierThresholds {
    pub low_max: u32,
    pub medium_max: u32,
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            low_max: 6,
            medium_max: 10,
        }
    }
}

/// Questionnaire section of the config file.
///
/// Both fields are optional. Omitting `questions` selects the built-in biosecurity
/// questionnaire. Custom questions must come with explicit thresholds since the
/// reference cut points only make sense for four questions scored 1-4.
///
/// Example YAML:
/// ```yaml
/// questionnaire:
///   thresholds: { low_max: 3, medium_max: 5 }
///   questions:
///     - text: "Do you keep a visitor log?"
///       options:
///         - { label: "Always", score: 1 }
///         - { label: "Never", score: 4 }
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct QuestionnaireConfig {
    #[serde(default)]
    pub thresholds: Option<TierThresholds>,

    #[serde(default)]
    pub questions: Option<Vec<QuestionConfig>>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct QuestionConfig {
    pub text: String,
    pub options: Vec<AnswerOption>,
}

impl QuestionnaireConfig {
    /// The built-in questionnaire spelled out in full, as written by `init`.
    pub fn reference() -> Self {
        let questions = reference_questions()
            .into_iter()
            .map(|(text, options)| QuestionConfig {
                text: text.to_string(),
                options: options
                    .iter()
                    .map(|(label, score)| AnswerOption::new(label, *score))
                    .collect(),
            })
            .collect();

        Self {
            thresholds: Some(TierThresholds::default()),
            questions: Some(questions),
        }
    }
}

fn reference_questions() -> Vec<(&'static str, [(&'static str, u32); 4])> {
    vec![
        (
            "How often do you clean and disinfect your farm equipment?",
            [("Daily", 1), ("Weekly", 2), ("Monthly", 3), ("Rarely", 4)],
        ),
        (
            "Do you have a designated quarantine area for new animals?",
            [
                ("Yes, well-separated", 1),
                ("Yes, but limited", 2),
                ("Planning to build", 3),
                ("No", 4),
            ],
        ),
        (
            "How do you manage visitors to your farm?",
            [
                ("Strict protocols with PPE", 1),
                ("Basic restrictions", 2),
                ("Informal guidelines", 3),
                ("No restrictions", 4),
            ],
        ),
        (
            "What is your animal health monitoring frequency?",
            [
                ("Daily observation", 1),
                ("Few times a week", 2),
                ("Weekly", 3),
                ("Only when issues arise", 4),
            ],
        ),
    ]
}

/// Validated, immutable question set plus the thresholds that go with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionSet {
    questions: Vec<Question>,
    thresholds: TierThresholds,
}

impl Default for QuestionSet {
    fn default() -> Self {
        Self::reference()
    }
}

impl QuestionSet {
    /// The four-question biosecurity questionnaire with thresholds 6 / 10.
    pub fn reference() -> Self {
        let config = QuestionnaireConfig::reference();
        let questions = config.questions.unwrap_or_default();
        Self::build(&questions, TierThresholds::default())
    }

    /// Validate a questionnaire config and build the question set from it.
    /// Returns every validation error at once.
    pub fn from_config(config: &QuestionnaireConfig) -> Result<Self, Vec<String>> {
        validate_questionnaire(config)?;

        match &config.questions {
            Some(questions) => {
                // Validation guarantees thresholds are present for custom questions
                let thresholds = config.thresholds.unwrap_or_default();
                Ok(Self::build(questions, thresholds))
            }
            None => {
                let mut set = Self::reference();
                if let Some(thresholds) = config.thresholds {
                    set.thresholds = thresholds;
                }
                Ok(set)
            }
        }
    }

    fn build(questions: &[QuestionConfig], thresholds: TierThresholds) -> Self {
        let questions = questions
            .iter()
            .enumerate()
            .map(|(id, q)| Question {
                id,
                text: q.text.clone(),
                options: q.options.clone(),
            })
            .collect();

        Self {
            questions,
            thresholds,
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn get(&self, id: QuestionId) -> Option<&Question> {
        self.questions.get(id)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn thresholds(&self) -> TierThresholds {
        self.thresholds
    }

    /// `question count x highest option score across all questions`.
    pub fn max_possible_score(&self) -> u32 {
        let max_option = self.questions.iter().map(Question::max_score).max().unwrap_or(0);
        u32::try_from(self.questions.len())
            .unwrap_or(u32::MAX)
            .saturating_mul(max_option)
    }

    /// Lowest total a fully answered session can reach.
    pub fn min_possible_score(&self) -> u32 {
        self.questions
            .iter()
            .map(Question::min_score)
            .fold(0, u32::saturating_add)
    }
}
