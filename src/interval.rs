//! A module containing [`Interval`], the [`ii()`] constructor function and
//! the half-open [`overlaps()`] predicate.

use core::fmt;

use crate::PointType;

/// The interval type used throughout this crate for queries and for the
/// entries of a [`CoalescedIntervalSet`](crate::CoalescedIntervalSet).
///
/// Whether `end` is treated as included or excluded depends on the
/// operation, see the [crate docs](crate#two-kinds-of-overlap).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Interval<I> {
	/// The start of the interval.
	pub start: I,
	/// The end of the interval.
	pub end: I,
}

impl<I> Interval<I>
where
	I: PointType,
{
	/// Returns the length of the interval, `end - start`, or zero if the
	/// interval is inverted.
	///
	/// # Examples
	/// ```
	/// use interlap::ii;
	///
	/// assert_eq!(ii(4, 10).len(), 6);
	/// assert_eq!(ii(4, 4).len(), 0);
	/// assert_eq!(ii(10_u8, 4).len(), 0);
	/// ```
	pub fn len(&self) -> I {
		if self.end > self.start {
			self.end.saturating_sub(&self.start)
		} else {
			I::zero()
		}
	}

	/// Returns `true` if the interval covers no half-open width, that is
	/// `start >= end`.
	pub fn is_empty(&self) -> bool {
		self.start >= self.end
	}

	/// Returns `true` if the two intervals share at least one point when
	/// both ends are treated as included.
	pub fn overlaps_inclusive(&self, other: &Self) -> bool {
		self.start <= other.end && self.end >= other.start
	}

	/// Returns `true` if the two intervals overlap when treated as
	/// half-open, see [`overlaps()`].
	pub fn overlaps_exclusive(&self, other: &Self) -> bool {
		overlaps(self.start, self.end, other.start, other.end)
	}
}

impl<I> From<(I, I)> for Interval<I> {
	fn from((start, end): (I, I)) -> Self {
		Interval { start, end }
	}
}

impl<I> From<Interval<I>> for (I, I) {
	fn from(interval: Interval<I>) -> Self {
		(interval.start, interval.end)
	}
}

impl<I> fmt::Display for Interval<I>
where
	I: fmt::Debug,
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "({:?}, {:?})", self.start, self.end)
	}
}

/// Returns `true` if the half-open intervals `[s1, e1)` and `[s2, e2)`
/// overlap. Touching intervals do not overlap.
///
/// # Examples
/// ```
/// use interlap::overlaps;
///
/// assert_eq!(overlaps(2, 4, 3, 5), true);
/// assert_eq!(overlaps(2, 4, 4, 5), false);
/// assert_eq!(overlaps(2, 200, 3, 5), true);
/// assert_eq!(overlaps(5, 6, 3, 5), false);
/// ```
pub fn overlaps<I>(s1: I, e1: I, s2: I, e2: I) -> bool
where
	I: Ord,
{
	!(e1 <= s2 || s1 >= e2)
}

/// A start-end interval constructor.
pub fn ii<I>(start: I, end: I) -> Interval<I> {
	Interval { start, end }
}
