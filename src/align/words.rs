use std::fmt;

// @module: Word tokenization primitives over a shared text buffer

/// A single word inside a parent text buffer, identified by byte offset and
/// byte length. The span never copies the text it points at.
#[derive(Clone, Copy)]
pub struct WordSpan<'a> {
    text: &'a str,
    /// Byte offset of the first character of the word
    pub start: usize,
    /// Byte length of the word
    pub len: usize,
}

impl<'a> WordSpan<'a> {
    // @creates: Span over text[start..start+len]
    pub fn new(text: &'a str, start: usize, len: usize) -> Self {
        WordSpan { text, start, len }
    }

    /// The word as a string slice
    pub fn as_str(&self) -> &'a str {
        &self.text[self.start..self.start + self.len]
    }

    /// Case-insensitive content comparison with another span. Offsets play
    /// no role: two spans are equal when they spell the same word.
    pub fn eq_ignore_case(&self, other: &WordSpan) -> bool {
        let lhs = self.as_str().chars().flat_map(char::to_lowercase);
        let rhs = other.as_str().chars().flat_map(char::to_lowercase);
        lhs.eq(rhs)
    }
}

impl fmt::Debug for WordSpan<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "WordSpan({:?} @{}+{})", self.as_str(), self.start, self.len)
    }
}

impl PartialEq for WordSpan<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.eq_ignore_case(other)
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric()
}

/// Snap `pos` down to the closest char boundary so that slicing cannot
/// panic on multibyte text.
pub fn snap_to_char_boundary(text: &str, mut pos: usize) -> usize {
    if pos >= text.len() {
        return text.len();
    }
    while !text.is_char_boundary(pos) {
        pos -= 1;
    }
    pos
}

/// Split `text[start..end]` into word spans. A word is a maximal run of
/// alphanumeric characters; everything else separates words. Spans carry
/// offsets into the full `text`, not into the sub-range.
pub fn split_into_words(text: &str, start: usize, end: usize) -> Vec<WordSpan<'_>> {
    let start = snap_to_char_boundary(text, start.min(end));
    let end = snap_to_char_boundary(text, end.min(text.len()));
    let mut words = Vec::new();
    let mut word_start: Option<usize> = None;

    for (idx, c) in text[start..end].char_indices() {
        let pos = start + idx;
        if is_word_char(c) {
            if word_start.is_none() {
                word_start = Some(pos);
            }
        } else if let Some(ws) = word_start.take() {
            words.push(WordSpan::new(text, ws, pos - ws));
        }
    }
    if let Some(ws) = word_start {
        words.push(WordSpan::new(text, ws, end - ws));
    }
    words
}

/// Find the start of the word containing `pos`, or the start of the next
/// word if `pos` falls between words. Returns `text.len()` when no word
/// follows.
pub fn find_closest_word_boundary(text: &str, pos: usize) -> usize {
    let pos = snap_to_char_boundary(text, pos);
    if pos >= text.len() {
        return text.len();
    }

    let at_word = text[pos..].chars().next().is_some_and(is_word_char);
    if at_word {
        // Walk back to the first character of the word
        let mut boundary = pos;
        for (idx, c) in text[..pos].char_indices().rev() {
            if !is_word_char(c) {
                break;
            }
            boundary = idx;
        }
        boundary
    } else {
        // Walk forward to the start of the next word
        text[pos..]
            .char_indices()
            .find(|&(_, c)| is_word_char(c))
            .map_or(text.len(), |(idx, _)| pos + idx)
    }
}

/// Find the exclusive end offset of the word containing or starting at
/// `pos`. When `pos` does not touch a word, `pos` is returned unchanged.
pub fn find_end_of_word(text: &str, pos: usize) -> usize {
    let pos = snap_to_char_boundary(text, pos);
    if pos >= text.len() {
        return text.len();
    }
    match text[pos..].char_indices().find(|&(_, c)| !is_word_char(c)) {
        Some((idx, _)) => pos + idx,
        None => text.len(),
    }
}
