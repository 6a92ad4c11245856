use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// @module: Data exchanged with the transcript acquisition and report rendering layers

/// A timed subtitle entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cue {
    // @field: Start time in seconds
    pub start: f64,

    // @field: Duration in seconds
    pub duration: f64,

    // @field: Source-language text
    #[serde(default)]
    pub text: String,

    // @field: Target-language text, empty until translated
    #[serde(default)]
    pub translated_text: String,
}

impl Cue {
    /// Create an untranslated cue
    pub fn new(start: f64, duration: f64, text: impl Into<String>) -> Self {
        Self {
            start,
            duration,
            text: text.into(),
            translated_text: String::new(),
        }
    }

    /// End time in seconds
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }
}

/// A video chapter marker
///
/// Fields other than `start_time` and `title` are carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chapter {
    // @field: Chapter start in seconds
    #[serde(default)]
    pub start_time: f64,

    // @field: Source-language title
    #[serde(default)]
    pub title: String,

    // @field: Translated title
    #[serde(rename = "title_cn", default, skip_serializing_if = "Option::is_none")]
    pub translated_title: Option<String>,

    // @field: Any additional fields supplied by the acquisition layer
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Chapter {
    /// Create a chapter with no translation yet
    pub fn new(start_time: f64, title: impl Into<String>) -> Self {
        Self {
            start_time,
            title: title.into(),
            translated_title: None,
            extra: Map::new(),
        }
    }
}

/// Everything the acquisition layer hands over for one video
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptInput {
    /// Video identifier, passed through to the report
    #[serde(default)]
    pub video_id: String,

    /// Ordered cues
    pub cues: Vec<Cue>,

    /// Detected source language tag
    #[serde(default)]
    pub source_language: String,

    /// Video title, if known
    #[serde(default)]
    pub title: Option<String>,

    /// Chapter markers, if any
    #[serde(default)]
    pub chapters: Vec<Chapter>,
}

impl TranscriptInput {
    /// Newline-joined, trimmed, non-empty cue texts
    pub fn full_text(&self) -> String {
        self.cues
            .iter()
            .map(|cue| cue.text.trim())
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Absolute time envelope covered by the cues: first start to last end
    pub fn time_span(&self) -> (f64, f64) {
        match (self.cues.first(), self.cues.last()) {
            (Some(first), Some(last)) => (first.start, last.end()),
            _ => (0.0, 0.0),
        }
    }
}

/// A translated paragraph placed on a synthetic timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimedParagraph {
    // @field: Start in seconds, millisecond precision
    pub start: f64,

    // @field: Duration in seconds, millisecond precision
    pub duration: f64,

    // @field: Paragraph text
    pub text: String,
}

impl TimedParagraph {
    /// End time in seconds
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }
}

/// Processing statistics attached to a report
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportStats {
    pub source_language: String,
    pub target_language: String,
    pub provider: String,
    pub cue_count: usize,
    pub paragraph_count: usize,
    pub full_text_length: usize,
    pub processing_secs: f64,
}

/// Everything the report renderer needs for the bilingual view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BilingualReport {
    pub video_id: String,
    pub title: Option<String>,
    pub title_translated: String,
    pub cues: Vec<Cue>,
    pub paragraphs: Vec<TimedParagraph>,
    pub chapters: Vec<Chapter>,
    pub summary: String,
    pub full_text: String,
    pub stats: ReportStats,
}
