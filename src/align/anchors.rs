use log::debug;

use crate::errors::AlignError;

// @module: Time/position anchors and piecewise-linear interpolation

/// A single point correlating an instant in the source media with a byte
/// offset in the transcript buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchor {
    /// Playback time in milliseconds
    pub time_ms: u64,
    /// Byte offset into the transcript buffer
    pub pos: usize,
}

impl Anchor {
    pub fn new(time_ms: u64, pos: usize) -> Self {
        Anchor { time_ms, pos }
    }
}

/// An ordered set of anchors, kept sorted by time.
///
/// Population happens in two phases: coarse anchors appended in source order
/// while parsing the transcript, then refinement anchors inserted one at a
/// time during alignment. Refinement anchors are heuristic guesses, so the
/// position order can break; `repair_ordering` restores the invariant that
/// positions strictly increase with time.
#[derive(Debug, Clone, Default)]
pub struct AnchorSet {
    anchors: Vec<Anchor>,
}

impl AnchorSet {
    pub fn new() -> Self {
        AnchorSet { anchors: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    pub fn as_slice(&self) -> &[Anchor] {
        &self.anchors
    }

    /// Append an anchor known to be in time order (transcript parsing).
    pub fn push(&mut self, anchor: Anchor) {
        self.anchors.push(anchor);
    }

    /// Insert an anchor at the position that keeps the set sorted by time.
    /// Among anchors with equal time the new one lands last.
    pub fn insert_by_time(&mut self, anchor: Anchor) {
        let idx = self.anchors.partition_point(|a| a.time_ms <= anchor.time_ms);
        self.anchors.insert(idx, anchor);
    }

    fn require_interpolatable(&self) -> Result<(), AlignError> {
        if self.anchors.len() < 2 {
            return Err(AlignError::InsufficientAnchors {
                available: self.anchors.len(),
            });
        }
        Ok(())
    }

    /// Map a byte offset to a timestamp by piecewise-linear interpolation
    /// across the anchor list. Offsets outside the anchored range clamp to
    /// the boundary anchor's time; a zero-width bracket yields the left
    /// anchor's time.
    pub fn estimate_time_at(&self, pos: usize) -> Result<u64, AlignError> {
        self.require_interpolatable()?;
        let idx = self.anchors.partition_point(|a| a.pos < pos);
        if idx == 0 {
            return Ok(self.anchors[0].time_ms);
        }
        if idx == self.anchors.len() {
            return Ok(self.anchors[self.anchors.len() - 1].time_ms);
        }

        let left = self.anchors[idx - 1];
        let right = self.anchors[idx];
        if right.pos == left.pos {
            return Ok(left.time_ms);
        }
        let fraction = (pos - left.pos) as f64 / (right.pos - left.pos) as f64;
        let span = right.time_ms as f64 - left.time_ms as f64;
        Ok((left.time_ms as f64 + span * fraction).round() as u64)
    }

    /// Inverse of `estimate_time_at`: map a timestamp to an approximate byte
    /// offset. Same clamping and degenerate-bracket rules.
    pub fn estimate_position_at(&self, time_ms: u64) -> Result<usize, AlignError> {
        self.require_interpolatable()?;
        let idx = self.anchors.partition_point(|a| a.time_ms <= time_ms);
        if idx == 0 {
            return Ok(self.anchors[0].pos);
        }
        if idx == self.anchors.len() {
            return Ok(self.anchors[self.anchors.len() - 1].pos);
        }

        let left = self.anchors[idx - 1];
        let right = self.anchors[idx];
        if right.time_ms == left.time_ms {
            return Ok(left.pos);
        }
        let fraction =
            (time_ms - left.time_ms) as f64 / (right.time_ms - left.time_ms) as f64;
        let span = right.pos as f64 - left.pos as f64;
        Ok((left.pos as f64 + span * fraction).round() as usize)
    }

    /// Restore the invariant that positions strictly increase along the
    /// time-sorted list by dropping offending anchors.
    ///
    /// When `anchors[i].pos` is not greater than `anchors[i-1].pos`, one of
    /// the two is an outlier: if the current anchor is still ahead of the
    /// one two back, the previous anchor is the stray and is dropped;
    /// otherwise the current one is. The scan index does not advance after a
    /// removal, so the same anchor is re-checked against its new
    /// predecessor. Returns the number of anchors dropped.
    pub fn repair_ordering(&mut self) -> usize {
        let mut dropped = 0;
        let mut idx = 1;
        while idx < self.anchors.len() {
            if self.anchors[idx].pos > self.anchors[idx - 1].pos {
                idx += 1;
                continue;
            }

            let out_of_order_idx =
                if idx >= 2 && self.anchors[idx].pos > self.anchors[idx - 2].pos {
                    idx - 1
                } else {
                    idx
                };

            let stray = self.anchors[out_of_order_idx];
            debug!(
                "Dropping out-of-order anchor at {}ms (position {})",
                stray.time_ms, stray.pos
            );
            self.anchors.remove(out_of_order_idx);
            dropped += 1;
        }
        dropped
    }
}
