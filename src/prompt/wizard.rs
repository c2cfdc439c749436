use anyhow::Result;
use std::io::{BufRead, Write};

use super::prompt;
use crate::assessment::{AssessmentEngine, Progress, RiskResult, SessionError};

/// Progress shown for the question at `index`, counting it as reached.
pub fn progress_percent(index: usize, count: usize) -> u16 {
    if count == 0 {
        return 0;
    }
    (((index + 1) as f64 / count as f64) * 100.0).round() as u16
}

/// Line-based assessment for pipes and plain terminals.
///
/// Input per question: an option number records that answer and moves on,
/// `n` (or empty) advances, `b` goes back, `r` restarts, `q` quits.
/// Returns None when the user quits or input ends before completion.
pub fn run_wizard<R: BufRead, W: Write>(
    engine: &AssessmentEngine,
    input: &mut R,
    output: &mut W,
) -> Result<Option<RiskResult>> {
    let mut session = engine.start();
    let count = engine.questions().len();

    writeln!(output, "Biosecurity Risk Assessment")?;
    writeln!(output, "===========================")?;

    loop {
        let Some(question) = engine.current_question(&session) else {
            return Ok(Some(engine.result(&session)));
        };

        writeln!(output)?;
        writeln!(
            output,
            "Question {} of {} ({}% complete)",
            question.id + 1,
            count,
            progress_percent(question.id, count)
        )?;
        writeln!(output, "{}", question.text)?;

        let recorded = session.answer_for(question.id);
        for (i, option) in question.options.iter().enumerate() {
            let marker = if recorded == Some(option.score) { " *" } else { "" };
            writeln!(output, "  {}) {}{}", i + 1, option.label, marker)?;
        }

        let next = if question.id + 1 == count { "finish" } else { "next" };
        let hint = format!(
            "Choice [1-{}, n={}, b=back, r=restart, q=quit]: ",
            question.options.len(),
            next
        );
        let Some(choice) = prompt(input, output, &hint)? else {
            return Ok(None);
        };

        match choice.to_lowercase().as_str() {
            "q" | "quit" => return Ok(None),
            "r" | "restart" => {
                engine.restart(&mut session);
                writeln!(output, "Restarted.")?;
            }
            "b" | "back" => {
                if question.id == 0 {
                    writeln!(output, "Already at the first question.")?;
                }
                engine.retreat(&mut session)?;
            }
            "" | "n" | "next" => report_advance(engine.advance(&mut session), output)?,
            other => match other.parse::<usize>() {
                Ok(n) if n >= 1 && n <= question.options.len() => {
                    let score = question.options[n - 1].score;
                    let id = question.id;
                    engine.answer(&mut session, id, score)?;
                    report_advance(engine.advance(&mut session), output)?;
                }
                _ => writeln!(
                    output,
                    "Invalid choice '{}'. Enter a number between 1 and {}.",
                    other,
                    question.options.len()
                )?,
            },
        }
    }
}

fn report_advance<W: Write>(result: Result<Progress, SessionError>, output: &mut W) -> Result<()> {
    match result {
        Ok(_) => Ok(()),
        Err(SessionError::Unanswered { .. }) => {
            writeln!(output, "Please answer before continuing.")?;
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
