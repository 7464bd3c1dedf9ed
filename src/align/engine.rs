use anyhow::Result;
use indicatif::ProgressBar;
use log::{debug, trace};

use crate::align::anchors::Anchor;
use crate::align::matcher::{centroid, find_matches};
use crate::align::transcript::Transcript;
use crate::align::words::{
    find_closest_word_boundary, find_end_of_word, split_into_words,
};
use crate::app_config::AlignmentConfig;
use crate::subtitle_processor::SubtitleEntry;

// @module: Anchor refinement by matching auto captions against the transcript

/// Outcome counters of one refinement pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct RefineSummary {
    /// How many auto captions were examined
    pub captions_total: usize,
    /// How many refinement anchors were inserted
    pub anchors_added: usize,
    /// How many anchors the ordering repair removed
    pub anchors_dropped: usize,
}

impl RefineSummary {
    /// Fraction of captions that contributed an anchor, in percent
    pub fn success_rate(&self) -> f64 {
        if self.captions_total == 0 {
            return 0.0;
        }
        100.0 * self.anchors_added as f64 / self.captions_total as f64
    }
}

/// Refines a transcript's anchor set using auto-generated captions, which
/// have reliable timing but noisy wording. Each caption is located in the
/// transcript via the current anchors, matched word by word, and turned into
/// one new anchor when the match is convincing enough.
pub struct AlignmentEngine {
    config: AlignmentConfig,
}

impl AlignmentEngine {
    pub fn new(config: AlignmentConfig) -> Self {
        AlignmentEngine { config }
    }

    /// Locate the candidate stretch of the transcript for one caption:
    /// interpolate both caption times to offsets, widen the interval by the
    /// configured fraction of its own width on each side to tolerate
    /// imprecision, then snap both ends outward to word boundaries.
    fn find_stretch(
        &self,
        caption: &SubtitleEntry,
        transcript: &Transcript,
    ) -> Result<(usize, usize)> {
        let text = transcript.text();
        let start = transcript.anchors.estimate_position_at(caption.start_time_ms)?;
        let end = transcript.anchors.estimate_position_at(caption.end_time_ms)?;

        let width = end.saturating_sub(start);
        let margin = (width as f64 * self.config.stretch_expansion).round() as usize;
        let safe_start = start.saturating_sub(margin);
        let safe_end = (end + margin).min(text.len());

        let adjusted_start = find_closest_word_boundary(text, safe_start);
        let adjusted_end = find_end_of_word(text, safe_end);
        Ok((adjusted_start.min(adjusted_end), adjusted_end))
    }

    /// Try to derive one refinement anchor from a single caption. `None`
    /// when the evidence is too weak (WeakMatch) or the caption is empty.
    fn derive_anchor(
        &self,
        caption: &SubtitleEntry,
        transcript: &Transcript,
    ) -> Result<Option<Anchor>> {
        if caption.text.is_empty() {
            return Ok(None);
        }

        let (start, end) = self.find_stretch(caption, transcript)?;

        let caption_words = split_into_words(&caption.text, 0, caption.text.len());
        if caption_words.is_empty() {
            return Ok(None);
        }
        let transcript_words = split_into_words(transcript.text(), start, end);

        let (matches_in_caption, matches_in_transcript) =
            find_matches(&caption_words, &transcript_words);

        let matched_fraction = matches_in_caption.len() as f64 / caption_words.len() as f64;
        if matched_fraction < self.config.match_threshold {
            trace!(
                "Weak match for caption #{} ({:.0}% of {} words), skipping",
                caption.seq_num,
                100.0 * matched_fraction,
                caption_words.len()
            );
            return Ok(None);
        }

        let (Some(center_in_caption), Some(center_in_transcript)) = (
            centroid(&matches_in_caption),
            centroid(&matches_in_transcript),
        ) else {
            return Ok(None);
        };

        // The caption's own timing is ground truth; assume uniform speaking
        // speed across it to place the matched centroid in time.
        let fraction = center_in_caption as f64 / caption.text.len() as f64;
        let span = (caption.end_time_ms - caption.start_time_ms) as f64;
        let derived_ms = caption.start_time_ms + (fraction * span).round() as u64;

        Ok(Some(Anchor::new(derived_ms, center_in_transcript)))
    }

    /// Run the refinement pass: one anchor attempt per caption, in input
    /// order, against the growing anchor set, followed by the ordering
    /// repair. Requires the transcript to carry at least two coarse anchors.
    pub fn refine(
        &self,
        transcript: &mut Transcript,
        captions: &[SubtitleEntry],
        progress: Option<&ProgressBar>,
    ) -> Result<RefineSummary> {
        let mut summary = RefineSummary {
            captions_total: captions.len(),
            ..RefineSummary::default()
        };

        for caption in captions {
            if let Some(anchor) = self.derive_anchor(caption, transcript)? {
                debug!(
                    "Caption #{} anchored at {}ms -> position {}",
                    caption.seq_num, anchor.time_ms, anchor.pos
                );
                transcript.anchors.insert_by_time(anchor);
                summary.anchors_added += 1;
            }
            if let Some(pb) = progress {
                pb.inc(1);
            }
        }

        summary.anchors_dropped = transcript.anchors.repair_ordering();
        Ok(summary)
    }
}
