use alloc::vec::Vec;

use crate::{Interval, PointType, Record};

/// Returns the lowest index whose record has a `start >= point`.
pub(crate) fn binsearch_left_start<I, V>(
	records: &[Record<I, V>],
	point: I,
) -> usize
where
	I: Ord + Copy,
{
	records.partition_point(|record| record.start < point)
}

/// Returns the lowest index whose record has a `start > point`, the
/// highest index a record starting at `point` could be inserted at
/// whilst keeping `records` sorted.
pub(crate) fn binsearch_right_end<I, V>(
	records: &[Record<I, V>],
	point: I,
) -> usize
where
	I: Ord + Copy,
{
	records.partition_point(|record| record.start <= point)
}

/// Returns the lowest index a record with the given bounds can be inserted
/// at whilst keeping `records` sorted by `(start, end)`.
pub(crate) fn binsearch_insertion_point<I, V>(
	records: &[Record<I, V>],
	start: I,
	end: I,
) -> usize
where
	I: Ord + Copy,
{
	records.partition_point(|record| (record.start, record.end) < (start, end))
}

pub(crate) fn abs_diff<I>(a: I, b: I) -> I
where
	I: PointType,
{
	if a >= b {
		a.saturating_sub(&b)
	} else {
		b.saturating_sub(&a)
	}
}

/// The distance between a stored interval and a query interval that it
/// does not overlap.
pub(crate) fn distance<I>(stored: Interval<I>, query: Interval<I>) -> I
where
	I: PointType,
{
	core::cmp::min(
		abs_diff(stored.start, query.end),
		abs_diff(query.start, stored.end),
	)
}

/// Sorts the given intervals and merges every run of overlapping intervals
/// into one interval covering the whole run.
///
/// Touching intervals such as `(2, 4)` and `(4, 9)` do not overlap and so
/// are left separate. Merging an already merged list changes nothing.
///
/// # Examples
/// ```
/// use interlap::{ii, merge_overlapping};
///
/// assert_eq!(
/// 	merge_overlapping(vec![ii(2, 6), ii(4, 10)]),
/// 	[ii(2, 10)]
/// );
/// assert_eq!(
/// 	merge_overlapping(vec![ii(4, 9), ii(2, 4)]),
/// 	[ii(2, 4), ii(4, 9)]
/// );
/// ```
pub fn merge_overlapping<I>(mut intervals: Vec<Interval<I>>) -> Vec<Interval<I>>
where
	I: Ord + Copy,
{
	if intervals.len() < 2 {
		return intervals;
	}

	intervals.sort();

	let mut merged: Vec<Interval<I>> = Vec::with_capacity(intervals.len());
	for interval in intervals {
		match merged.last_mut() {
			Some(tail) if tail.end > interval.start => {
				tail.end = core::cmp::max(tail.end, interval.end);
			}
			_ => merged.push(interval),
		}
	}

	return merged;
}
