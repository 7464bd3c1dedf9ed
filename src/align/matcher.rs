use crate::align::words::WordSpan;

// @module: Order-preserving word matching and match centroids

/// Find the corresponding words between two tokenized phrases.
///
/// The scan is greedy: left-side words are visited in order, and each one
/// consumes the first remaining right-side word with equal content under
/// case-insensitive comparison. Unmatched left-side words are skipped. The
/// result lists have equal length and `matched_left[i]` / `matched_right[i]`
/// denote one pair.
///
/// This is deliberately not an optimal alignment: it tolerates minor
/// reordering on the right at O(n·m) cost, but a repeated right-side word is
/// consumed in first-occurrence order and can therefore mis-pair when equal
/// words cluster.
pub fn find_matches<'a, 'b>(
    left: &[WordSpan<'a>],
    right: &[WordSpan<'b>],
) -> (Vec<WordSpan<'a>>, Vec<WordSpan<'b>>) {
    let mut matched_left = Vec::new();
    let mut matched_right = Vec::new();
    let mut remaining: Vec<WordSpan<'b>> = right.to_vec();

    for word in left {
        let Some(idx) = remaining.iter().position(|s| s.eq_ignore_case(word)) else {
            continue;
        };
        matched_left.push(*word);
        matched_right.push(remaining.remove(idx));
    }

    (matched_left, matched_right)
}

/// Length-weighted character-position centroid of a set of words, used as a
/// single representative offset for a cluster of matched words. A longer
/// word pulls the centroid toward itself more than a short one. `None` when
/// the set is empty.
pub fn centroid(words: &[WordSpan]) -> Option<usize> {
    let mut sum_of_indices: u64 = 0;
    let mut count_of_chars: u64 = 0;

    for word in words {
        let (start, len) = (word.start as u64, word.len as u64);
        count_of_chars += len;
        // Sum of the character indices covered by the word; the product is
        // always even, so the division is exact.
        sum_of_indices += (2 * start + len - 1) * len / 2;
    }

    if count_of_chars > 0 {
        Some((sum_of_indices as f64 / count_of_chars as f64).round() as usize)
    } else {
        None
    }
}
