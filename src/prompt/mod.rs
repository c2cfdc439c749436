pub mod wizard;

pub use wizard::{progress_percent, run_wizard};

use anyhow::{Context, Result};
use std::io::{BufRead, Write};

/// Prompt user with a message and return their trimmed input.
/// Returns None when input is exhausted (EOF).
pub fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    message: &str,
) -> Result<Option<String>> {
    write!(output, "{}", message).context("Failed to write prompt")?;
    output.flush().context("Failed to flush output")?;

    let mut line = String::new();
    let read = input.read_line(&mut line).context("Failed to read input")?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Prompt user with a yes/no question. Returns bool based on input and default.
pub fn prompt_yes_no<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    message: &str,
    default_yes: bool,
) -> Result<bool> {
    let hint = if default_yes { "Y/n" } else { "y/N" };
    let answer = prompt(input, output, &format!("{} [{}]: ", message, hint))?;
    match answer.map(|a| a.to_lowercase()) {
        None => Ok(default_yes),
        Some(a) if a.is_empty() => Ok(default_yes),
        Some(a) => Ok(a == "y" || a == "yes"),
    }
}
