/*!
 * Tests for the anchor set: interpolation and ordering repair
 */

use subrefine::align::{Anchor, AnchorSet};

fn anchor_set(points: &[(u64, usize)]) -> AnchorSet {
    let mut anchors = AnchorSet::new();
    for &(time_ms, pos) in points {
        anchors.push(Anchor::new(time_ms, pos));
    }
    anchors
}

/// Test that interpolation requires at least two anchors
#[test]
fn test_interpolation_withTooFewAnchors_shouldFail() {
    let empty = AnchorSet::new();
    assert!(empty.estimate_time_at(0).is_err());
    assert!(empty.estimate_position_at(0).is_err());

    let single = anchor_set(&[(1000, 10)]);
    assert!(single.estimate_time_at(10).is_err());
    assert!(single.estimate_position_at(1000).is_err());
}

/// Test the interpolation round trip over two anchors
#[test]
fn test_estimate_time_at_withAnchorPositions_shouldReturnAnchorTimes() {
    let anchors = anchor_set(&[(1000, 10), (5000, 110)]);

    assert_eq!(anchors.estimate_time_at(10).unwrap(), 1000);
    assert_eq!(anchors.estimate_time_at(110).unwrap(), 5000);
    // Halfway in position is halfway in time
    assert_eq!(anchors.estimate_time_at(60).unwrap(), 3000);
}

/// Test clamping outside the anchored range (no extrapolation)
#[test]
fn test_estimate_time_at_withOutOfRangePositions_shouldClampToBoundary() {
    let anchors = anchor_set(&[(1000, 10), (5000, 110)]);

    assert_eq!(anchors.estimate_time_at(0).unwrap(), 1000);
    assert_eq!(anchors.estimate_time_at(500).unwrap(), 5000);
}

/// Test the inverse mapping from time to position
#[test]
fn test_estimate_position_at_withBracketedTime_shouldInterpolate() {
    let anchors = anchor_set(&[(1000, 10), (5000, 110)]);

    assert_eq!(anchors.estimate_position_at(1000).unwrap(), 10);
    assert_eq!(anchors.estimate_position_at(3000).unwrap(), 60);
    assert_eq!(anchors.estimate_position_at(0).unwrap(), 10);
    assert_eq!(anchors.estimate_position_at(99_999).unwrap(), 110);
}

/// Test that anchors with equal times resolve without division by zero
#[test]
fn test_estimate_position_at_withZeroWidthTimeBracket_shouldNotPanic() {
    let anchors = anchor_set(&[(5000, 12), (5000, 13), (10_000, 24)]);

    let pos = anchors.estimate_position_at(5000).unwrap();
    assert!((12..=13).contains(&pos));
}

/// Test time-sorted insertion of refinement anchors
#[test]
fn test_insert_by_time_withUnsortedInserts_shouldKeepTimeOrder() {
    let mut anchors = anchor_set(&[(1000, 10), (5000, 110)]);
    anchors.insert_by_time(Anchor::new(3000, 60));
    anchors.insert_by_time(Anchor::new(500, 2));

    let times: Vec<u64> = anchors.as_slice().iter().map(|a| a.time_ms).collect();
    assert_eq!(times, vec![500, 1000, 3000, 5000]);
}

/// Test repair when the previous anchor is the outlier
#[test]
fn test_repair_ordering_withPreviousOutlier_shouldDropPrevious() {
    let mut anchors = anchor_set(&[(0, 0), (1000, 50), (2000, 30), (3000, 80)]);

    let dropped = anchors.repair_ordering();

    assert_eq!(dropped, 1);
    let positions: Vec<usize> = anchors.as_slice().iter().map(|a| a.pos).collect();
    assert_eq!(positions, vec![0, 30, 80]);
}

/// Test repair when the current anchor is the outlier
#[test]
fn test_repair_ordering_withCurrentOutlier_shouldDropCurrent() {
    let mut anchors = anchor_set(&[(0, 10), (1000, 50), (2000, 5), (3000, 80)]);

    let dropped = anchors.repair_ordering();

    assert_eq!(dropped, 1);
    let positions: Vec<usize> = anchors.as_slice().iter().map(|a| a.pos).collect();
    assert_eq!(positions, vec![10, 50, 80]);
}

/// Test that repair leaves a strictly increasing subsequence of the input
#[test]
fn test_repair_ordering_withManyViolations_shouldLeaveStrictlyIncreasingSubsequence() {
    let original = [(0, 40), (100, 42), (200, 41), (300, 41), (400, 43), (500, 10)];
    let mut anchors = anchor_set(&original);

    let dropped = anchors.repair_ordering();

    let repaired = anchors.as_slice();
    assert_eq!(dropped, original.len() - repaired.len());
    assert!(repaired.windows(2).all(|w| w[1].pos > w[0].pos));

    // Every surviving anchor appears in the original, in order
    let mut cursor = original.iter();
    for anchor in repaired {
        assert!(cursor.any(|&(t, p)| t == anchor.time_ms && p == anchor.pos));
    }
}

/// Test that an already consistent set is untouched
#[test]
fn test_repair_ordering_withConsistentAnchors_shouldDropNothing() {
    let mut anchors = anchor_set(&[(0, 0), (1000, 10), (2000, 20)]);
    assert_eq!(anchors.repair_ordering(), 0);
    assert_eq!(anchors.len(), 3);
}
