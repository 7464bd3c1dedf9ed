use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::align::anchors::{Anchor, AnchorSet};
use crate::errors::TranscriptError;

// @module: Transcript parsing into a flat buffer with sparse time anchors

// @const: Transcript paragraph marker regex (frame-based timestamps)
static MARKER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{2}:\d{2}:\d{2}:\d{2}) - (\d{2}:\d{2}:\d{2}:\d{2})\s+").unwrap()
});

/// The human-authored transcript: a flat text buffer plus the ordered set of
/// (time, position) anchors derived from the transcript's own coarse
/// paragraph timestamps. The buffer is immutable once built; all positions
/// are byte offsets into it.
#[derive(Debug, Clone)]
pub struct Transcript {
    text: String,
    /// Anchor set; mutated only by the alignment pass
    pub anchors: AnchorSet,
}

impl Transcript {
    /// The flat transcript text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Parse a `HH:MM:SS:FF` marker timestamp to milliseconds. The frame
    /// field counts 10ms units, not milliseconds.
    pub fn parse_marker_time(timestamp: &str) -> Result<u64, TranscriptError> {
        let malformed = || TranscriptError::MalformedTimestamp {
            raw: timestamp.to_string(),
        };

        let parts: Vec<u64> = timestamp
            .split(':')
            .map(|s| s.parse::<u64>())
            .collect::<Result<_, _>>()
            .map_err(|_| malformed())?;

        if parts.len() != 4 {
            return Err(malformed());
        }

        let (hours, minutes, seconds, frames) = (parts[0], parts[1], parts[2], parts[3]);
        Ok(((hours * 60 + minutes) * 60 + seconds) * 1_000 + frames * 10)
    }

    /// Append paragraph text to the buffer with carriage returns dropped and
    /// newlines collapsed to single spaces, so that offsets track only
    /// visible characters.
    fn append_to_same_line(buffer: &mut String, paragraph: &str) {
        for c in paragraph.chars() {
            match c {
                '\r' => {}
                '\n' => {
                    if !buffer.is_empty() && !buffer.ends_with(' ') {
                        buffer.push(' ');
                    }
                }
                _ => buffer.push(c),
            }
        }
    }

    /// Parse raw transcript text.
    ///
    /// Each `HH:MM:SS:FF - HH:MM:SS:FF` marker delimits a paragraph running
    /// up to the next marker (or end of input). Every paragraph contributes
    /// two anchors: the start time at the position before its text, and the
    /// end time at the last appended character. A transcript with no markers
    /// yields an empty buffer and an empty anchor set; whether that is
    /// usable is decided where interpolation is requested.
    pub fn parse(raw_text: &str) -> Result<Transcript> {
        let mut text = String::new();
        let mut anchors = AnchorSet::new();

        let markers: Vec<_> = MARKER_REGEX.captures_iter(raw_text).collect();
        for (idx, caps) in markers.iter().enumerate() {
            let whole = caps.get(0).expect("regex match has group 0");
            let start_ms = Self::parse_marker_time(&caps[1])?;
            let end_ms = Self::parse_marker_time(&caps[2])?;

            let para_start = whole.end();
            let para_end = match markers.get(idx + 1) {
                Some(next) => next.get(0).expect("regex match has group 0").start(),
                None => raw_text.len(),
            };

            anchors.push(Anchor::new(start_ms, text.len()));
            Self::append_to_same_line(&mut text, &raw_text[para_start..para_end]);
            anchors.push(Anchor::new(end_ms, text.len().saturating_sub(1)));
        }

        Ok(Transcript { text, anchors })
    }
}
