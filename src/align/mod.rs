/*!
 * The alignment and re-segmentation core.
 *
 * A human-authored transcript carries authoritative wording but only coarse
 * paragraph timestamps; an auto-generated caption track carries authoritative
 * timing but noisy wording. The modules here parse the transcript into a
 * flat buffer with sparse time anchors, locate each auto caption inside the
 * buffer by word matching, enrich the anchor set with the derived time
 * points, and finally cut the buffer back into caption-sized chunks with
 * interpolated timing.
 */

pub mod anchors;
pub mod engine;
pub mod matcher;
pub mod segmenter;
pub mod transcript;
pub mod words;

pub use anchors::{Anchor, AnchorSet};
pub use engine::{AlignmentEngine, RefineSummary};
pub use transcript::Transcript;
