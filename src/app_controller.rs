use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};

use crate::align::engine::AlignmentEngine;
use crate::align::segmenter;
use crate::align::transcript::Transcript;
use crate::app_config::Config;
use crate::errors::AlignError;
use crate::file_utils::FileManager;
use crate::subtitle_processor::SubtitleCollection;

// @module: Application controller for the refinement pipeline

/// Main application controller: loads the transcript and the auto-generated
/// captions, runs the alignment pass, re-segments and writes the refined
/// subtitle track. One-shot batch transform; either the full output is
/// written or a fatal error aborts before any output exists.
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Run the full workflow over one transcript/caption pair
    pub fn run(
        &self,
        transcript_path: PathBuf,
        auto_subs_path: PathBuf,
        output_path: PathBuf,
        force_overwrite: bool,
    ) -> Result<()> {
        let start_time = std::time::Instant::now();

        if !FileManager::file_exists(&transcript_path) {
            return Err(anyhow!("Transcript file does not exist: {:?}", transcript_path));
        }
        if !FileManager::file_exists(&auto_subs_path) {
            return Err(anyhow!("Subtitle file does not exist: {:?}", auto_subs_path));
        }
        if output_path.exists() && !force_overwrite {
            warn!("Skipping, output already exists (use -f to force overwrite)");
            return Ok(());
        }

        let raw_text = FileManager::read_to_string(&transcript_path)?;
        let auto_subs = SubtitleCollection::parse_srt_file(&auto_subs_path)?;
        info!("Loaded {} auto-generated captions", auto_subs.entries.len());

        let mut transcript = Transcript::parse(&raw_text)?;
        if transcript.anchors.len() < 2 {
            // Without at least two coarse anchors nothing can be
            // interpolated and the transcript is unrefinable as a whole.
            return Err(AlignError::InsufficientAnchors {
                available: transcript.anchors.len(),
            }
            .into());
        }
        info!(
            "Parsed transcript: {} characters, {} coarse anchors",
            transcript.text().len(),
            transcript.anchors.len()
        );

        let progress = Self::create_progress_bar(auto_subs.entries.len() as u64);
        let engine = AlignmentEngine::new(self.config.alignment.clone());
        let summary = engine.refine(&mut transcript, &auto_subs.entries, Some(&progress))?;
        progress.finish_and_clear();

        info!(
            "Transcript enriched with {} anchors out of {} captions (success rate {:.1}%)",
            summary.anchors_added,
            summary.captions_total,
            summary.success_rate()
        );
        if summary.anchors_dropped > 0 {
            info!(
                "Dropped {} out-of-order anchors during repair",
                summary.anchors_dropped
            );
        }

        let refined = segmenter::segment(&transcript, &self.config.segmentation)?;
        info!("Segmented transcript into {} captions", refined.len());

        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() {
                FileManager::ensure_dir(parent)?;
            }
        }
        SubtitleCollection::from_entries(refined).write_to_srt(&output_path)?;

        info!(
            "Wrote refined subtitles to {} in {:.2}s",
            output_path.display(),
            start_time.elapsed().as_secs_f64()
        );
        Ok(())
    }

    /// Default output path next to the transcript: `<stem>.refined.srt`
    pub fn default_output_path(transcript_path: &Path) -> PathBuf {
        let stem = transcript_path.file_stem().unwrap_or_default();
        let mut file_name = stem.to_string_lossy().to_string();
        file_name.push_str(".refined.srt");
        transcript_path.with_file_name(file_name)
    }

    // @creates: Styled progress bar over the alignment loop
    fn create_progress_bar(len: u64) -> ProgressBar {
        let progress = ProgressBar::new(len);
        progress.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} captions ({eta})")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        progress
    }
}
