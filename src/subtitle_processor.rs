use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::SubtitleError;

// @module: SRT subtitle parsing, validation and writing

// @const: SRT timestamp regex
static TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{2}):(\d{2}):(\d{2}),(\d{3}) --> (\d{2}):(\d{2}):(\d{2}),(\d{3})").unwrap()
});

// @struct: Single subtitle entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleEntry {
    // @field: Sequence number
    pub seq_num: usize,

    // @field: Start time in ms
    pub start_time_ms: u64,

    // @field: End time in ms
    pub end_time_ms: u64,

    // @field: Subtitle text
    pub text: String,
}

impl SubtitleEntry {
    /// Creates a new subtitle entry without validation
    pub fn new(seq_num: usize, start_time_ms: u64, end_time_ms: u64, text: String) -> Self {
        SubtitleEntry {
            seq_num,
            start_time_ms,
            end_time_ms,
            text,
        }
    }

    // @creates: Validated subtitle entry
    // @validates: Time range and non-empty text
    pub fn new_validated(
        seq_num: usize,
        start_time_ms: u64,
        end_time_ms: u64,
        text: String,
    ) -> Result<Self> {
        if end_time_ms <= start_time_ms {
            return Err(SubtitleError::InvalidTimeRange {
                seq_num,
                start_ms: start_time_ms,
                end_ms: end_time_ms,
            }
            .into());
        }

        let trimmed_text = text.trim();
        if trimmed_text.is_empty() {
            return Err(SubtitleError::EmptyText(seq_num).into());
        }

        Ok(SubtitleEntry {
            seq_num,
            start_time_ms,
            end_time_ms,
            text: trimmed_text.to_string(),
        })
    }

    /// Parse an SRT timestamp (HH:MM:SS,mmm) to milliseconds
    pub fn parse_timestamp(timestamp: &str) -> Result<u64> {
        let parts: Vec<&str> = timestamp.split(&[':', ',', '.'][..]).collect();

        if parts.len() != 4 {
            return Err(anyhow!("Invalid timestamp format: {}", timestamp));
        }

        let hours: u64 = parts[0].parse().context("Failed to parse hours")?;
        let minutes: u64 = parts[1].parse().context("Failed to parse minutes")?;
        let seconds: u64 = parts[2].parse().context("Failed to parse seconds")?;
        let millis: u64 = parts[3].parse().context("Failed to parse milliseconds")?;

        if minutes >= 60 || seconds >= 60 || millis >= 1000 {
            return Err(anyhow!("Invalid time components in timestamp: {}", timestamp));
        }

        Ok(hours * 3_600_000 + minutes * 60_000 + seconds * 1_000 + millis)
    }

    /// Convert start time to formatted SRT timestamp
    pub fn format_start_time(&self) -> String {
        Self::format_timestamp(self.start_time_ms)
    }

    /// Convert end time to formatted SRT timestamp
    pub fn format_end_time(&self) -> String {
        Self::format_timestamp(self.end_time_ms)
    }

    /// Format a timestamp in milliseconds to SRT format (HH:MM:SS,mmm)
    pub fn format_timestamp(ms: u64) -> String {
        let hours = ms / 3_600_000;
        let minutes = (ms % 3_600_000) / 60_000;
        let seconds = (ms % 60_000) / 1_000;
        let millis = ms % 1_000;

        format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
    }
}

impl fmt::Display for SubtitleEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.seq_num)?;
        writeln!(f, "{} --> {}", self.format_start_time(), self.format_end_time())?;
        writeln!(f, "{}", self.text)?;
        writeln!(f)
    }
}

/// Collection of subtitle entries
#[derive(Debug, Default)]
pub struct SubtitleCollection {
    /// List of subtitle entries
    pub entries: Vec<SubtitleEntry>,
}

impl SubtitleCollection {
    /// Create an empty subtitle collection
    pub fn new() -> Self {
        SubtitleCollection { entries: Vec::new() }
    }

    /// Wrap an already ordered list of entries
    pub fn from_entries(entries: Vec<SubtitleEntry>) -> Self {
        SubtitleCollection { entries }
    }

    /// Parse an SRT file into subtitle entries
    pub fn parse_srt_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read subtitle file: {}", path.display()))?;
        Self::parse_srt_string(&content)
    }

    /// Parse SRT format content into subtitle entries.
    ///
    /// The loader is defensive: entries with a broken time range or empty
    /// text are skipped with a warning, the result is sorted by start time
    /// and renumbered, and overlapping neighbours are only reported. At
    /// least one valid entry must survive.
    pub fn parse_srt_string(content: &str) -> Result<Self> {
        let mut entries = Vec::new();

        // State variables for parsing
        let mut current_seq_num: Option<usize> = None;
        let mut current_start_time_ms: Option<u64> = None;
        let mut current_end_time_ms: Option<u64> = None;
        let mut current_text = String::new();
        let mut line_count = 0;

        let mut add_current_entry = |seq_num: usize, start_ms: u64, end_ms: u64, text: &str| {
            match SubtitleEntry::new_validated(seq_num, start_ms, end_ms, text.to_string()) {
                Ok(entry) => entries.push(entry),
                Err(e) => warn!("Skipping invalid subtitle entry {}: {}", seq_num, e),
            }
        };

        for line in content.lines() {
            line_count += 1;
            let trimmed = line.trim();

            // An empty line finalizes the entry under construction
            if trimmed.is_empty() {
                if let (Some(seq_num), Some(start_ms), Some(end_ms)) =
                    (current_seq_num, current_start_time_ms, current_end_time_ms)
                {
                    if !current_text.is_empty() {
                        add_current_entry(seq_num, start_ms, end_ms, &current_text);
                        current_seq_num = None;
                        current_start_time_ms = None;
                        current_end_time_ms = None;
                        current_text.clear();
                    }
                }
                continue;
            }

            // Sequence number, only at the start of a new entry
            if current_seq_num.is_none() && current_text.is_empty() {
                if let Ok(num) = trimmed.parse::<usize>() {
                    current_seq_num = Some(num);
                    continue;
                }
            }

            // Timestamp line
            if current_seq_num.is_some()
                && current_start_time_ms.is_none()
                && current_end_time_ms.is_none()
            {
                if let Some(caps) = TIMESTAMP_REGEX.captures(trimmed) {
                    match (
                        Self::parse_timestamp_to_ms(&caps, 1),
                        Self::parse_timestamp_to_ms(&caps, 5),
                    ) {
                        (Ok(start_ms), Ok(end_ms)) => {
                            current_start_time_ms = Some(start_ms);
                            current_end_time_ms = Some(end_ms);
                            continue;
                        }
                        _ => {
                            warn!("Invalid timestamp format at line {}: {}", line_count, trimmed);
                        }
                    }
                }
            }

            // With sequence number and timestamps in place, this is caption text
            if current_seq_num.is_some()
                && current_start_time_ms.is_some()
                && current_end_time_ms.is_some()
            {
                if !current_text.is_empty() {
                    current_text.push('\n');
                }
                current_text.push_str(trimmed);
            } else {
                warn!(
                    "Unexpected text at line {} before sequence number or timestamp: {}",
                    line_count, trimmed
                );
            }
        }

        // Final entry without a trailing blank line
        if let (Some(seq_num), Some(start_ms), Some(end_ms)) =
            (current_seq_num, current_start_time_ms, current_end_time_ms)
        {
            if !current_text.is_empty() {
                add_current_entry(seq_num, start_ms, end_ms, &current_text);
            }
        }

        if entries.is_empty() {
            return Err(SubtitleError::NoEntries.into());
        }

        // Restore time order, then report (but tolerate) overlaps
        entries.sort_by_key(|entry| entry.start_time_ms);

        let overlap_count = entries
            .windows(2)
            .filter(|pair| pair[0].end_time_ms > pair[1].start_time_ms)
            .count();
        if overlap_count > 0 {
            warn!("Found {} overlapping subtitle entries", overlap_count);
        }

        for (i, entry) in entries.iter_mut().enumerate() {
            entry.seq_num = i + 1;
        }

        Ok(SubtitleCollection { entries })
    }

    /// Write subtitles to an SRT file
    pub fn write_to_srt<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
            }
        }

        let mut file = File::create(path)
            .with_context(|| format!("Failed to create subtitle file: {}", path.display()))?;

        for entry in &self.entries {
            write!(file, "{}", entry)?;
        }

        Ok(())
    }

    /// Parse timestamp capture groups to milliseconds
    fn parse_timestamp_to_ms(caps: &regex::Captures, start_idx: usize) -> Result<u64> {
        let field = |offset: usize| -> Result<u64> {
            caps.get(start_idx + offset)
                .ok_or_else(|| anyhow!("Missing timestamp field"))?
                .as_str()
                .parse::<u64>()
                .context("Failed to parse timestamp field")
        };

        let (hours, minutes, seconds, millis) = (field(0)?, field(1)?, field(2)?, field(3)?);
        Ok((hours * 3600 + minutes * 60 + seconds) * 1000 + millis)
    }
}

impl fmt::Display for SubtitleCollection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Subtitle Collection")?;
        writeln!(f, "Entries: {}", self.entries.len())?;
        Ok(())
    }
}
