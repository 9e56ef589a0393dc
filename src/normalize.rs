//! Reduce a [`RunResult`] to the text shown to the user.

use crate::agent::{RunResult, FINAL_OUTPUT_MARKER};

/// The user-facing answer for a run.
///
/// Uses the structured `final_output` when it has content; otherwise scrapes
/// the result's text form with [`extract_response_text`].
pub fn normalize(result: &RunResult) -> String {
    let answer = result.final_output.trim();
    if !answer.is_empty() {
        return answer.to_string();
    }
    extract_response_text(&result.to_string())
}

/// Best-effort extraction of the answer from a run's text form.
///
/// Takes everything after the first [`FINAL_OUTPUT_MARKER`], stopping at the
/// first bookkeeping bullet (a line starting with `- ` that mentions
/// `new item` or `raw response`). Without a marker the whole text is
/// returned, trimmed.
pub fn extract_response_text(raw: &str) -> String {
    let Some((_, after)) = raw.split_once(FINAL_OUTPUT_MARKER) else {
        return raw.trim().to_string();
    };

    after
        .trim()
        .lines()
        .take_while(|line| !is_bookkeeping_line(line))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

fn is_bookkeeping_line(line: &str) -> bool {
    line.starts_with("- ") && (line.contains("new item") || line.contains("raw response"))
}
