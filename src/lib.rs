/*!
 * # SubRefine - Transcript-guided subtitle refinement
 *
 * A Rust library for aligning a human-authored transcript with an
 * auto-generated subtitle track and producing captions that combine the
 * transcript's wording with the auto track's timing.
 *
 * ## How it works
 *
 * - The transcript is parsed into a flat text buffer with sparse time
 *   anchors taken from its own coarse paragraph timestamps
 * - Each auto-generated caption is located in the buffer via the current
 *   anchors, matched word by word, and converted into a refined anchor
 * - The anchor set is repaired to be monotonic in both time and position
 * - The buffer is re-segmented into caption-sized chunks at sentence
 *   boundaries, with timing interpolated over the refined anchors
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `subtitle_processor`: SRT file handling
 * - `align`: The alignment and re-segmentation core:
 *   - `align::transcript`: Transcript parsing into buffer plus anchors
 *   - `align::words`: Word tokenization primitives
 *   - `align::matcher`: Word matching and match centroids
 *   - `align::anchors`: Anchor set and piecewise-linear interpolation
 *   - `align::engine`: Anchor refinement from auto captions
 *   - `align::segmenter`: Sentence-based re-segmentation
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod align;
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod subtitle_processor;

// Re-export main types for easier usage
pub use align::{AlignmentEngine, Anchor, AnchorSet, RefineSummary, Transcript};
pub use app_config::Config;
pub use app_controller::Controller;
pub use errors::{AlignError, AppError, SubtitleError, TranscriptError};
pub use subtitle_processor::{SubtitleCollection, SubtitleEntry};
