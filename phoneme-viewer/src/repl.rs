//! Line-based interactive prompt.

use std::io::{BufRead, Write};

use phoneme_features::{query, PhonemeError, PhonemeTable, Query};

use crate::error::Result;
use crate::render;

fn prompt<W: Write>(output: &mut W, prompt: &str) -> Result<()> {
    write!(output, "{prompt}")?;
    output.flush()?;
    Ok(())
}

/// Answer one query per input line until EOF, `quit` or `exit`.
///
/// Query errors are printed and the loop continues; only IO errors end it.
pub fn run<R: BufRead, W: Write>(
    table: &PhonemeTable,
    prompt_text: &str,
    input: R,
    mut output: W,
) -> Result<()> {
    prompt(&mut output, prompt_text)?;

    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if matches!(line, "quit" | "exit") {
            break;
        }

        if let Some(parsed) = Query::parse(line) {
            match query::run(table, &parsed) {
                Ok(report) => writeln!(output, "{}", render::report(&report))?,
                Err(err @ PhonemeError::SymbolNotFound(_)) => writeln!(output, "{err}")?,
                Err(err) => {
                    tracing::warn!("query {:?} failed: {}", line, err);
                    writeln!(output, "error: {err}")?;
                }
            }
        }

        prompt(&mut output, prompt_text)?;
    }

    writeln!(output)?;
    Ok(())
}
