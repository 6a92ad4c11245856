/*!
 * Timeline redistribution for re-paragraphed translations.
 *
 * Translated paragraphs no longer line up with the source cues, so each one
 * gets a synthetic span inside the original time envelope, proportional to
 * its character count. Spans are contiguous and never shorter than
 * `MIN_SEGMENT_SECS`, except the last one, which is stretched or shrunk to
 * end exactly at the envelope's end whenever any of the envelope is left.
 * Once earlier minimums have used up the envelope, spans run past its end.
 */

use crate::transcript::TimedParagraph;

/// Shortest span any paragraph is given, in seconds
pub const MIN_SEGMENT_SECS: f64 = 1.8;

/// Shortest duration ever reported, in seconds
const MIN_REPORTED_SECS: f64 = 0.1;

fn round_millis(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Allocate contiguous spans across `[total_start, total_end]` weighted by paragraph length
pub fn redistribute(total_start: f64, total_end: f64, paragraphs: &[String]) -> Vec<TimedParagraph> {
    let total_duration = (total_end - total_start).max(0.0);
    let weights: Vec<usize> = paragraphs.iter().map(|p| p.chars().count().max(1)).collect();
    let total_chars = weights.iter().sum::<usize>().max(1) as f64;
    let last = paragraphs.len().saturating_sub(1);

    let mut timed = Vec::with_capacity(paragraphs.len());
    let mut acc = total_start;

    for (i, (text, weight)) in paragraphs.iter().zip(&weights).enumerate() {
        let share = if total_duration > 0.0 {
            total_duration * (*weight as f64 / total_chars)
        } else {
            MIN_SEGMENT_SECS
        };
        let seg = share.max(MIN_SEGMENT_SECS);

        let mut end = acc + seg;
        if i == last && total_end > acc {
            end = total_end;
        }

        timed.push(TimedParagraph {
            start: round_millis(acc),
            duration: round_millis((end - acc).max(MIN_REPORTED_SECS)),
            text: text.clone(),
        });
        acc = end;
    }

    timed
}
