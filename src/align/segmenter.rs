use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::align::transcript::Transcript;
use crate::align::words::{find_closest_word_boundary, find_end_of_word, snap_to_char_boundary};
use crate::app_config::SegmentationConfig;
use crate::subtitle_processor::SubtitleEntry;

// @module: Re-segmentation of the refined transcript into captions

// @const: Sentence delimiter regex. A break needs a word, close-paren or
// quote character right before it, so parenthesized or quoted content never
// triggers one. Alternatives, in order: a dash surrounded by whitespace, a
// run of soft delimiters, a run of terminal punctuation (captured, since it
// belongs to the sentence).
static END_OF_SENTENCE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"[\w)"](?P<end>\s+-+\s+|\s*[,;:]+\s*|\s*(?P<finalchars>[.?!]+)\s*)"#).unwrap()
});

/// Find the end of the sentence beginning at `start`.
///
/// Returns the exclusive end offset of the sentence text and the offset of
/// the first character of the next sentence. Terminal punctuation (`.?!`)
/// stays inside the sentence; soft delimiters (comma, semicolon, colon, a
/// dash used as a clause break) do not. Without any delimiter the sentence
/// runs to the end of the text.
pub fn find_end_of_sentence(text: &str, start: usize) -> (usize, usize) {
    let Some(caps) = END_OF_SENTENCE_REGEX.captures(&text[start..]) else {
        return (text.len(), text.len());
    };

    let interval = caps.name("end").expect("'end' group always participates");
    if let Some(finalchars) = caps.name("finalchars") {
        return (start + finalchars.end(), start + interval.end());
    }
    (start + interval.start(), start + interval.end())
}

/// Fold a caption wider than half the budget into two visual lines, broken
/// at the word end nearest the caption's midpoint.
fn fold_into_lines(caption: &str, max_caption_length: usize) -> String {
    if caption.len() <= max_caption_length / 2 {
        return caption.to_string();
    }

    let mid = snap_to_char_boundary(caption, caption.len() / 2);
    let mut break_at = find_end_of_word(caption, mid);
    if break_at >= caption.len() {
        // Midpoint fell inside the last word; break before it instead
        break_at = find_closest_word_boundary(caption, mid);
    }

    let first = caption[..break_at.min(caption.len())].trim_end();
    let second = caption[break_at.min(caption.len())..].trim_start();
    if first.is_empty() || second.is_empty() {
        return caption.to_string();
    }
    format!("{first}\n{second}")
}

/// Walk the refined transcript left to right and cut it into captions at
/// sentence boundaries, or at a word boundary near 70% of the length budget
/// when a sentence overshoots it. Caption times come from interpolation over
/// the refined anchor set.
pub fn segment(transcript: &Transcript, config: &SegmentationConfig) -> Result<Vec<SubtitleEntry>> {
    let text = transcript.text();
    let max_len = config.max_caption_length;
    let mut entries: Vec<SubtitleEntry> = Vec::new();
    let mut start = 0;

    while start < text.len() {
        let (mut end, mut next) = find_end_of_sentence(text, start);

        if end - start > max_len {
            let target = start + max_len * 7 / 10;
            let cut = find_closest_word_boundary(text, target.min(text.len()));
            if cut > start && cut < end {
                end = cut;
                next = cut;
            }
        }

        // Trailing whitespace carries no timing information
        let trimmed = text[start..end].trim_end();
        let trimmed_end = start + trimmed.len();

        if !trimmed.is_empty() {
            let start_ms = transcript.anchors.estimate_time_at(start)?;
            let end_ms = transcript.anchors.estimate_time_at(trimmed_end)?;
            entries.push(SubtitleEntry::new(
                entries.len() + 1,
                start_ms,
                end_ms,
                fold_into_lines(trimmed, max_len),
            ));
        }

        if next <= start {
            break;
        }
        start = next;
    }

    Ok(entries)
}
