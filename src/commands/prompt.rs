//! Interactive stdin prompts for values not given on the command line.

use std::io::{self, BufRead, Write};

/// Prints `label` and reads one trimmed line from stdin.
pub fn prompt(label: &str) -> io::Result<String> {
    print!("{}: ", label);
    io::stdout().flush()?;
    read_answer(&mut io::stdin().lock())
}

/// Like [`prompt`], but an empty answer yields `default`.
pub fn prompt_with_default(label: &str, default: &str) -> io::Result<String> {
    print!("{} [{}]: ", label, default);
    io::stdout().flush()?;
    let answer = read_answer(&mut io::stdin().lock())?;
    Ok(if answer.is_empty() {
        default.to_string()
    } else {
        answer
    })
}

/// Prompts for a password. Only the line ending is removed.
pub fn prompt_secret(label: &str) -> io::Result<String> {
    print!("{}: ", label);
    io::stdout().flush()?;
    read_secret(&mut io::stdin().lock())
}

/// Returns `value` when set, otherwise prompts for it.
pub fn value_or_prompt(value: &Option<String>, label: &str) -> io::Result<String> {
    match value {
        Some(v) => Ok(v.clone()),
        None => prompt(label),
    }
}

/// Returns `value` when set, otherwise prompts for it without trimming.
pub fn secret_or_prompt(value: &Option<String>, label: &str) -> io::Result<String> {
    match value {
        Some(v) => Ok(v.clone()),
        None => prompt_secret(label),
    }
}

fn read_secret(input: &mut impl BufRead) -> io::Result<String> {
    let mut line = String::new();
    input.read_line(&mut line)?;
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    Ok(line)
}

fn read_answer(input: &mut impl BufRead) -> io::Result<String> {
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}
