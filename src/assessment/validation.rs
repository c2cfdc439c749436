use std::collections::HashSet;

use super::questions::{QuestionSet, QuestionnaireConfig, MAX_OPTION_SCORE};

/// Validate a questionnaire config before building a question set.
/// Returns all validation errors at once (not just the first).
pub fn validate_questionnaire(config: &QuestionnaireConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(ref questions) = config.questions {
        if questions.is_empty() {
            errors.push("questionnaire.questions: at least one question is required".to_string());
        }

        // Reference cut points only fit the built-in questions
        if config.thresholds.is_none() {
            errors.push(
                "questionnaire.thresholds: required when questions are customized".to_string(),
            );
        }

        for (i, question) in questions.iter().enumerate() {
            if question.text.trim().is_empty() {
                errors.push(format!("questionnaire.questions[{}].text: must not be empty", i));
            }

            if question.options.is_empty() {
                errors.push(format!(
                    "questionnaire.questions[{}].options: at least one option is required",
                    i
                ));
            }

            let mut seen_scores = HashSet::new();
            for (j, option) in question.options.iter().enumerate() {
                if option.label.trim().is_empty() {
                    errors.push(format!(
                        "questionnaire.questions[{}].options[{}].label: must not be empty",
                        i, j
                    ));
                }
                if option.score == 0 {
                    errors.push(format!(
                        "questionnaire.questions[{}].options[{}].score: must be a positive integer",
                        i, j
                    ));
                } else if option.score > MAX_OPTION_SCORE {
                    errors.push(format!(
                        "questionnaire.questions[{}].options[{}].score: {} exceeds the maximum of {}",
                        i, j, option.score, MAX_OPTION_SCORE
                    ));
                } else if !seen_scores.insert(option.score) {
                    errors.push(format!(
                        "questionnaire.questions[{}].options[{}].score: duplicate score {} in question",
                        i, j, option.score
                    ));
                }
            }
        }
    }

    if let Some(thresholds) = config.thresholds {
        if thresholds.low_max >= thresholds.medium_max {
            errors.push(format!(
                "questionnaire.thresholds: low_max ({}) must be less than medium_max ({})",
                thresholds.low_max, thresholds.medium_max
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Non-fatal problems with a valid question set, such as a tier no answer
/// combination can reach.
pub fn questionnaire_warnings(set: &QuestionSet) -> Vec<String> {
    let mut warnings = Vec::new();
    let thresholds = set.thresholds();
    let max_possible = set.max_possible_score();
    let min_possible = set.min_possible_score();

    if thresholds.medium_max >= max_possible {
        warnings.push(format!(
            "questionnaire.thresholds.medium_max ({}) is not below the maximum possible score ({}); High risk is unreachable",
            thresholds.medium_max, max_possible
        ));
    }

    if thresholds.low_max < min_possible {
        warnings.push(format!(
            "questionnaire.thresholds.low_max ({}) is below the minimum possible score ({}); Low risk is unreachable",
            thresholds.low_max, min_possible
        ));
    }

    warnings
}
