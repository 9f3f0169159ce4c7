//! A module containing [`Record`].

use core::cmp::Ordering;

use crate::Interval;

/// An interval together with an associated value, as stored in an
/// [`OverlapIndex`](crate::OverlapIndex).
///
/// The value never takes part in comparisons, records are ordered by
/// `(start, end)` only (see [`Record::cmp_bounds()`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Record<I, V> {
	/// The start of the interval, included.
	pub start: I,
	/// The end of the interval, included.
	pub end: I,
	/// The value associated with the interval.
	pub value: V,
}

impl<I, V> Record<I, V> {
	/// Makes a new `Record`.
	pub fn new(start: I, end: I, value: V) -> Self {
		Record { start, end, value }
	}
}

impl<I, V> Record<I, V>
where
	I: Ord + Copy,
{
	/// Returns the `(start, end)` interval of this record.
	pub fn interval(&self) -> Interval<I> {
		Interval {
			start: self.start,
			end: self.end,
		}
	}

	/// Compares two records by `(start, end)`, ignoring their values.
	pub fn cmp_bounds(&self, other: &Self) -> Ordering {
		self.start
			.cmp(&other.start)
			.then_with(|| self.end.cmp(&other.end))
	}
}

impl<I, V> From<(I, I, V)> for Record<I, V> {
	fn from((start, end, value): (I, I, V)) -> Self {
		Record { start, end, value }
	}
}

impl<I> From<(I, I)> for Record<I, ()> {
	fn from((start, end): (I, I)) -> Self {
		Record {
			start,
			end,
			value: (),
		}
	}
}

impl<I, V> From<Record<I, V>> for (I, I, V) {
	fn from(record: Record<I, V>) -> Self {
		(record.start, record.end, record.value)
	}
}
