/*!
 * Paragraph segmentation helpers.
 *
 * `parse_paragraphs` reads a model answer where paragraphs are separated by
 * blank lines. `rough_split` is the local fallback used when the backend
 * cannot re-paragraph a document itself: it cuts on blank lines and after
 * sentence-ending punctuation followed by whitespace.
 */

use once_cell::sync::Lazy;
use regex::Regex;

// @const: One or more blank lines (tolerates trailing spaces and CRLF)
static BLANK_LINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\r?\n[ \t]*\r?\n(?:[ \t]*\r?\n)*").unwrap());

// @const: Sentence end followed by whitespace
static SENTENCE_END: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]\s+").unwrap());

/// Split a blank-line separated answer into trimmed, non-empty paragraphs
pub fn parse_paragraphs(text: &str) -> Vec<String> {
    BLANK_LINES
        .split(text)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

/// Heuristic split on blank lines and sentence boundaries
pub fn rough_split(text: &str) -> Vec<String> {
    let mut pieces = Vec::new();
    for block in BLANK_LINES.split(text) {
        let mut cursor = 0;
        for boundary in SENTENCE_END.find_iter(block) {
            // Keep the punctuation with the sentence it ends
            let cut = boundary.start() + 1;
            pieces.push(&block[cursor..cut]);
            cursor = boundary.end();
        }
        pieces.push(&block[cursor..]);
    }

    pieces
        .into_iter()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}
