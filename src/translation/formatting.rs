/*!
 * Cleanup of raw model output.
 *
 * Chat models wrap answers in Markdown fences and do not always return the
 * number of lines they were asked for. These helpers turn a raw completion
 * into exactly one string per source fragment.
 */

/// Remove a surrounding Markdown code fence (```lang ... ```), if present
pub fn strip_code_fence(text: &str) -> String {
    let trimmed = text.trim();
    if !trimmed.starts_with("```") {
        return trimmed.to_string();
    }

    // Drop the opening fence line, including any language hint
    let body = match trimmed.split_once('\n') {
        Some((_, rest)) => rest,
        None => "",
    };

    let body = body.trim_end();
    let body = match body.strip_suffix("```") {
        Some(inner) => inner,
        None => body,
    };

    body.trim_end_matches(['\n', '\r']).to_string()
}

/// Split a completion into trimmed lines
pub fn split_lines(text: &str) -> Vec<String> {
    text.split('\n').map(|line| line.trim().to_string()).collect()
}

/// Flatten a fragment onto a single line so the one-line-per-input contract holds
pub fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Force `output` to the length of `source`
///
/// Excess lines are dropped; missing lines are filled with the corresponding
/// source fragments.
pub fn normalize_count(mut output: Vec<String>, source: &[String]) -> Vec<String> {
    if output.len() > source.len() {
        output.truncate(source.len());
    } else if output.len() < source.len() {
        output.extend_from_slice(&source[output.len()..]);
    }
    output
}
