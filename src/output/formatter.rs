use owo_colors::OwoColorize;
use serde::Serialize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::assessment::{QuestionSet, RiskResult, RiskTier};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a score as "total/max".
/// If incomplete is true, appends asterisk to indicate a partial assessment
pub fn format_score(total: u32, max: u32, incomplete: bool) -> String {
    if incomplete {
        format!("{}/{}*", total, max)
    } else {
        format!("{}/{}", total, max)
    }
}

fn colored_tier(tier: RiskTier, text: &str) -> String {
    match tier {
        RiskTier::Low => text.green().bold().to_string(),
        RiskTier::Medium => text.yellow().bold().to_string(),
        RiskTier::High => text.red().bold().to_string(),
    }
}

/// Format the result screen: tier, score, recommendations
pub fn format_result(result: &RiskResult, use_colors: bool) -> String {
    let heading = format!("{} Risk", result.tier);
    let score = format_score(result.total_score, result.max_possible_score, result.incomplete);

    let mut lines = Vec::new();
    if use_colors {
        lines.push("Assessment Results".bold().to_string());
        lines.push(colored_tier(result.tier, &heading));
        lines.push(format!("Score: {}", score.bold()));
    } else {
        lines.push("Assessment Results".to_string());
        lines.push(heading);
        lines.push(format!("Score: {}", score));
    }

    if result.incomplete {
        let note = format!(
            "Partial assessment: {} of {} questions answered",
            result.answered, result.question_count
        );
        lines.push(if use_colors { note.dimmed().to_string() } else { note });
    }

    lines.push(String::new());
    lines.push("Recommendations:".to_string());
    for rec in result.recommendations() {
        lines.push(format!("  • {}", rec));
    }

    lines.join("\n")
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate text to fit available width, accounting for Unicode
fn truncate_text(text: &str, max_width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_width {
        text.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Format the per-question contributions (verbose mode)
/// One line per answered question: "Q1  +2  Weekly  How often do you ..."
pub fn format_breakdown(result: &RiskResult, use_colors: bool) -> String {
    if result.breakdown.is_empty() {
        return "No answers recorded.".to_string();
    }

    let term_width = get_terminal_width();

    result
        .breakdown
        .iter()
        .map(|c| {
            let index = format!("Q{:<2}", c.question_id + 1);
            let score = format!("+{}", c.score);
            let fixed_width = index.len() + score.len() + c.answer.chars().count() + 6;

            let question = match term_width {
                Some(width) if width > fixed_width + 10 => {
                    truncate_text(&c.question, width - fixed_width)
                }
                Some(_) => truncate_text(&c.question, 20),
                None => c.question.clone(),
            };

            if use_colors {
                format!(
                    "{}  {}  {}  {}",
                    index.dimmed(),
                    score.bold(),
                    c.answer.cyan(),
                    question
                )
            } else {
                format!("{}  {}  {}  {}", index, score, c.answer, question)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format the questionnaire: numbered questions with option scores
pub fn format_question_list(questions: &QuestionSet, use_colors: bool) -> String {
    let mut lines = Vec::new();

    for question in questions.questions() {
        let title = format!("{}. {}", question.id + 1, question.text);
        lines.push(if use_colors { title.bold().to_string() } else { title });
        for option in &question.options {
            let score = format!("[{}]", option.score);
            if use_colors {
                lines.push(format!("   {} {}", score.dimmed(), option.label));
            } else {
                lines.push(format!("   {} {}", score, option.label));
            }
        }
    }

    let thresholds = questions.thresholds();
    lines.push(String::new());
    lines.push(format!(
        "Tiers: Low <= {}, Medium <= {}, High > {} (max {})",
        thresholds.low_max,
        thresholds.medium_max,
        thresholds.medium_max,
        questions.max_possible_score()
    ));

    lines.join("\n")
}

/// Format a result as a single tab-separated line for scripting
/// Columns: tier, total, max, answered, question_count (no headers, no colors)
pub fn format_tsv(result: &RiskResult) -> String {
    format!(
        "{}\t{}\t{}\t{}\t{}",
        result.tier, result.total_score, result.max_possible_score, result.answered, result.question_count
    )
}

#[derive(Serialize)]
struct ResultReport<'a> {
    #[serde(flatten)]
    result: &'a RiskResult,
    recommendations: &'static [&'static str],
}

/// Format a result as pretty JSON, recommendations included
pub fn format_json(result: &RiskResult) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&ResultReport {
        result,
        recommendations: result.recommendations(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::AssessmentEngine;

    fn scored(scores: &[u32], complete: bool) -> RiskResult {
        let engine = AssessmentEngine::new(QuestionSet::reference());
        let mut session = engine.start();
        for (id, score) in scores.iter().enumerate() {
            engine.answer(&mut session, id, *score).unwrap();
            if complete {
                engine.advance(&mut session).unwrap();
            }
        }
        engine.result(&session)
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(8, 16, false), "8/16");
        assert_eq!(format_score(3, 16, true), "3/16*");
    }

    #[test]
    fn test_format_result_high() {
        let output = format_result(&scored(&[4, 4, 4, 4], true), false);

        assert!(output.starts_with("Assessment Results\nHigh Risk\nScore: 16/16"));
        assert!(output.contains("  • Implement daily cleaning and disinfection protocols"));
        assert!(!output.contains("Partial assessment"));
    }

    #[test]
    fn test_format_result_partial() {
        let output = format_result(&scored(&[2, 1], false), false);

        assert!(output.contains("Low Risk"));
        assert!(output.contains("Score: 3/16*"));
        assert!(output.contains("Partial assessment: 2 of 4 questions answered"));
    }

    #[test]
    fn test_format_breakdown_plain() {
        let output = format_breakdown(&scored(&[1, 2, 3, 4], true), false);
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Q1   +1  Daily"));
        assert!(lines[3].contains("Only when issues arise"));
    }

    #[test]
    fn test_format_breakdown_empty() {
        assert_eq!(format_breakdown(&scored(&[], false), false), "No answers recorded.");
    }

    #[test]
    fn test_format_question_list() {
        let output = format_question_list(&QuestionSet::reference(), false);

        assert!(output.contains("1. How often do you clean and disinfect your farm equipment?"));
        assert!(output.contains("   [4] Rarely"));
        assert!(output.ends_with("Tiers: Low <= 6, Medium <= 10, High > 10 (max 16)"));
    }

    #[test]
    fn test_format_tsv() {
        assert_eq!(format_tsv(&scored(&[1, 2, 3, 2], true)), "Medium\t8\t16\t4\t4");
    }

    #[test]
    fn test_format_json() {
        let json = format_json(&scored(&[1, 1, 1, 1], true)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["tier"], "Low");
        assert_eq!(value["total_score"], 4);
        assert_eq!(value["max_possible_score"], 16);
        assert_eq!(value["incomplete"], false);
        assert_eq!(value["recommendations"][0], "Maintain current good practices");
        assert_eq!(value["breakdown"][0]["answer"], "Daily");
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("a longer question", 10), "a longe...");
        assert_eq!(truncate_text("abcdef", 3), "abc");
    }
}
