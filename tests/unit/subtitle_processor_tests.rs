/*!
 * Tests for SRT processing functionality
 */

use std::fmt::Write;

use anyhow::Result;
use subrefine::subtitle_processor::{SubtitleCollection, SubtitleEntry};

use crate::common;

/// Test timestamp parsing and formatting
#[test]
fn test_timestamp_parsing_withValidTimestamp_shouldParseAndFormat() {
    let ts = "01:23:45,678";
    let ms = SubtitleEntry::parse_timestamp(ts).unwrap();
    assert_eq!(ms, 5_025_678);

    let formatted = SubtitleEntry::format_timestamp(ms);
    assert_eq!(formatted, ts);
}

/// Test timestamp parsing rejects bad input
#[test]
fn test_timestamp_parsing_withInvalidTimestamp_shouldFail() {
    assert!(SubtitleEntry::parse_timestamp("01:23:45").is_err());
    assert!(SubtitleEntry::parse_timestamp("01:61:00,000").is_err());
}

/// Test subtitle entry display formatting
#[test]
fn test_subtitle_entry_display_withValidEntry_shouldFormatCorrectly() {
    let entry = SubtitleEntry::new(1, 5000, 10000, "Test subtitle".to_string());
    let mut output = String::new();
    write!(output, "{}", entry).unwrap();

    assert!(output.contains("1"));
    assert!(output.contains("00:00:05,000 --> 00:00:10,000"));
    assert!(output.contains("Test subtitle"));
    assert!(output.ends_with("\n\n"));
}

/// Test entry validation rejects broken time ranges and empty text
#[test]
fn test_new_validated_withInvalidEntries_shouldFail() {
    assert!(SubtitleEntry::new_validated(1, 5000, 5000, "text".to_string()).is_err());
    assert!(SubtitleEntry::new_validated(1, 5000, 4000, "text".to_string()).is_err());
    assert!(SubtitleEntry::new_validated(1, 0, 1000, "   ".to_string()).is_err());
    assert!(SubtitleEntry::new_validated(1, 0, 1000, " ok ".to_string()).is_ok());
}

/// Test parsing a well-formed SRT string
#[test]
fn test_parse_srt_string_withValidContent_shouldParseAllEntries() -> Result<()> {
    let content = "1\n00:00:01,000 --> 00:00:04,000\nFirst entry.\n\n\
                   2\n00:00:05,000 --> 00:00:09,000\nSecond entry,\nsecond line.\n\n";

    let collection = SubtitleCollection::parse_srt_string(content)?;

    assert_eq!(collection.entries.len(), 2);
    assert_eq!(collection.entries[0].start_time_ms, 1000);
    assert_eq!(collection.entries[0].end_time_ms, 4000);
    assert_eq!(collection.entries[0].text, "First entry.");
    assert_eq!(collection.entries[1].text, "Second entry,\nsecond line.");
    Ok(())
}

/// Test that invalid entries are skipped, order restored and numbers
/// reassigned
#[test]
fn test_parse_srt_string_withOutOfOrderAndInvalidEntries_shouldRecover() -> Result<()> {
    let content = "7\n00:00:05,000 --> 00:00:09,000\nLater entry.\n\n\
                   3\n00:00:04,000 --> 00:00:02,000\nBroken time range.\n\n\
                   9\n00:00:01,000 --> 00:00:04,000\nEarlier entry.\n\n";

    let collection = SubtitleCollection::parse_srt_string(content)?;

    assert_eq!(collection.entries.len(), 2);
    assert_eq!(collection.entries[0].text, "Earlier entry.");
    assert_eq!(collection.entries[0].seq_num, 1);
    assert_eq!(collection.entries[1].text, "Later entry.");
    assert_eq!(collection.entries[1].seq_num, 2);
    Ok(())
}

/// Test that content without any valid entry is an error
#[test]
fn test_parse_srt_string_withNoEntries_shouldFail() {
    assert!(SubtitleCollection::parse_srt_string("").is_err());
    assert!(SubtitleCollection::parse_srt_string("just some prose\n").is_err());
}

/// Test the SRT write/parse round trip through a file
#[test]
fn test_write_to_srt_withEntries_shouldRoundTrip() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("out.srt");

    let entries = vec![
        SubtitleEntry::new(1, 0, 2000, "First caption".to_string()),
        SubtitleEntry::new(2, 2000, 4500, "Second caption\nwith two lines".to_string()),
    ];
    SubtitleCollection::from_entries(entries.clone()).write_to_srt(&path)?;

    let parsed = SubtitleCollection::parse_srt_file(&path)?;
    assert_eq!(parsed.entries, entries);
    Ok(())
}

/// Test parsing the sample subtitle file from disk
#[test]
fn test_parse_srt_file_withSampleFile_shouldParseAllEntries() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_subtitle(temp_dir.path(), "sample.srt")?;

    let collection = SubtitleCollection::parse_srt_file(&path)?;
    assert_eq!(collection.entries.len(), 3);
    assert_eq!(collection.entries[2].text, "For testing purposes.");
    Ok(())
}
