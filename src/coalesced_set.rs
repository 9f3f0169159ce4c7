//! A module containing [`CoalescedIntervalSet`].
//!
//! Unlike [`OverlapIndex`](crate::OverlapIndex) the intervals in a
//! [`CoalescedIntervalSet`] are half-open, `(2, 4)` and `(4, 9)` touch
//! but do not overlap and so are stored as two separate intervals.

use alloc::vec::Vec;
use core::fmt;

use itertools::Itertools;
use smallvec::SmallVec;

use crate::utils::merge_overlapping;
use crate::{ii, Interval, PointType};

/// An ordered set of non-overlapping half-open intervals.
///
/// Every interval added to the set is merged with any intervals it
/// overlaps, so the set always holds the fewest intervals that cover the
/// same points, apart from touching intervals which are kept apart.
///
/// `I` is the generic type parameter for the [`Ord`] point type the
/// intervals are over.
///
/// # Examples
/// ```
/// use interlap::{ii, CoalescedIntervalSet};
///
/// let mut set = CoalescedIntervalSet::from_intervals([(2, 10), (8, 20), (30, 40)]);
/// assert_eq!(set.as_slice(), [ii(2, 20), ii(30, 40)]);
///
/// set.add([(20, 22)]);
/// assert_eq!(set.as_slice(), [ii(2, 20), ii(20, 22), ii(30, 40)]);
///
/// set.add([(10, 31)]);
/// assert_eq!(set.as_slice(), [ii(2, 40)]);
///
/// assert_eq!(set.to_string(), "CoalescedIntervalSet([(2, 40)])");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CoalescedIntervalSet<I> {
	intervals: Vec<Interval<I>>,
}

impl<I> CoalescedIntervalSet<I>
where
	I: PointType,
{
	/// Makes a new, empty `CoalescedIntervalSet`.
	///
	/// # Examples
	/// ```
	/// use interlap::CoalescedIntervalSet;
	///
	/// let set: CoalescedIntervalSet<i8> = CoalescedIntervalSet::new();
	///
	/// assert!(set.is_empty());
	/// ```
	pub fn new() -> Self {
		CoalescedIntervalSet {
			intervals: Vec::new(),
		}
	}

	/// Makes a new `CoalescedIntervalSet` from the given intervals, merging
	/// those that overlap.
	///
	/// An empty iterator gives an empty set.
	pub fn from_intervals<T>(intervals: impl IntoIterator<Item = T>) -> Self
	where
		T: Into<Interval<I>>,
	{
		CoalescedIntervalSet {
			intervals: merge_overlapping(
				intervals.into_iter().map(Into::into).collect(),
			),
		}
	}

	/// Adds the given intervals to the set, merging any that overlap each
	/// other or the intervals already in the set.
	///
	/// Since `&CoalescedIntervalSet` iterates over its intervals, another set
	/// can be passed in directly.
	///
	/// # Examples
	/// ```
	/// use interlap::{ii, CoalescedIntervalSet};
	///
	/// let mut set = CoalescedIntervalSet::from_intervals([(1, 95), (95, 100)]);
	/// let other = CoalescedIntervalSet::from_intervals([(90, 100)]);
	///
	/// set.add(&other);
	///
	/// assert_eq!(set.as_slice(), [ii(1, 100)]);
	/// ```
	pub fn add<T>(&mut self, intervals: impl IntoIterator<Item = T>)
	where
		T: Into<Interval<I>>,
	{
		let mut merged = core::mem::take(&mut self.intervals);
		merged.extend(intervals.into_iter().map(Into::into));

		self.intervals = merge_overlapping(merged);
	}

	/// Removes the points covered by `others` from a copy of the set and
	/// returns what is left as a list of fragments in ascending order.
	///
	/// A new fragment is started wherever one of `others` cut through an
	/// interval of the set or sat in the gap between two intervals of the
	/// set. Consecutive intervals of the set with nothing from `others`
	/// between them stay together in the same fragment.
	///
	/// # Examples
	/// ```
	/// use interlap::CoalescedIntervalSet;
	///
	/// let set = CoalescedIntervalSet::from_intervals([(1, 50), (60, 80)]);
	///
	/// let fragments = set.split([(45, 65), (70, 74), (76, 78)]);
	///
	/// assert_eq!(
	/// 	fragments,
	/// 	[
	/// 		CoalescedIntervalSet::from_intervals([(1, 45)]),
	/// 		CoalescedIntervalSet::from_intervals([(65, 70)]),
	/// 		CoalescedIntervalSet::from_intervals([(74, 76)]),
	/// 		CoalescedIntervalSet::from_intervals([(78, 80)]),
	/// 	]
	/// );
	/// ```
	pub fn split<T>(
		&self,
		others: impl IntoIterator<Item = T>,
	) -> Vec<CoalescedIntervalSet<I>>
	where
		T: Into<Interval<I>>,
	{
		// merged, so the ends ascend along with the starts
		let others =
			merge_overlapping(others.into_iter().map(Into::into).collect());

		let mut fragments = Vec::new();
		let mut pending: Vec<Interval<I>> = Vec::new();
		let mut previous_below = 0;

		for interval in self.intervals.iter() {
			let below =
				others.partition_point(|other| other.end <= interval.start);
			let cutting: SmallVec<[Interval<I>; 4]> = others[below..]
				.iter()
				.take_while(|other| other.start < interval.end)
				.filter(|other| other.overlaps_exclusive(interval))
				.copied()
				.collect();

			if cutting.is_empty() {
				// something from `others` sits in the gap before this interval
				if below != previous_below && !pending.is_empty() {
					fragments.push(Self::from_intervals(core::mem::take(
						&mut pending,
					)));
				}
				pending.push(*interval);
			} else {
				if !pending.is_empty() {
					fragments.push(Self::from_intervals(core::mem::take(
						&mut pending,
					)));
				}

				let mut cursor = interval.start;
				for other in cutting {
					if cursor < other.start {
						fragments.push(Self::from_intervals([ii(
							cursor,
							core::cmp::min(interval.end, other.start),
						)]));
					}
					cursor = core::cmp::max(cursor, other.end);
				}
				if cursor < interval.end {
					pending.push(ii(cursor, interval.end));
				}
			}

			previous_below = below;
		}

		if !pending.is_empty() {
			fragments.push(Self::from_intervals(pending));
		}

		return fragments;
	}
}

impl<I> CoalescedIntervalSet<I> {
	/// Returns the number of intervals in the set.
	pub fn len(&self) -> usize {
		self.intervals.len()
	}
	/// Returns `true` if the set contains no intervals, and `false` if it
	/// does.
	pub fn is_empty(&self) -> bool {
		self.intervals.is_empty()
	}
	/// Returns an iterator over every interval in the set in ascending
	/// order.
	pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Interval<I>> {
		self.intervals.iter()
	}
	/// Returns the intervals of the set as a sorted slice.
	pub fn as_slice(&self) -> &[Interval<I>] {
		&self.intervals
	}
}

// Trait Impls ==========================

impl<I> Default for CoalescedIntervalSet<I> {
	fn default() -> Self {
		CoalescedIntervalSet {
			intervals: Vec::new(),
		}
	}
}

impl<I> fmt::Display for CoalescedIntervalSet<I>
where
	I: fmt::Debug,
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"CoalescedIntervalSet([{}])",
			self.intervals.iter().format(", ")
		)
	}
}

impl<I, T> FromIterator<T> for CoalescedIntervalSet<I>
where
	I: PointType,
	T: Into<Interval<I>>,
{
	fn from_iter<A: IntoIterator<Item = T>>(iter: A) -> Self {
		CoalescedIntervalSet::from_intervals(iter)
	}
}

impl<I, T> Extend<T> for CoalescedIntervalSet<I>
where
	I: PointType,
	T: Into<Interval<I>>,
{
	fn extend<A: IntoIterator<Item = T>>(&mut self, iter: A) {
		self.add(iter);
	}
}

impl<'a, I> IntoIterator for &'a CoalescedIntervalSet<I>
where
	I: Copy,
{
	type Item = Interval<I>;
	type IntoIter = core::iter::Copied<core::slice::Iter<'a, Interval<I>>>;
	fn into_iter(self) -> Self::IntoIter {
		self.intervals.iter().copied()
	}
}

impl<I> IntoIterator for CoalescedIntervalSet<I> {
	type Item = Interval<I>;
	type IntoIter = IntoIter<I>;
	fn into_iter(self) -> Self::IntoIter {
		return IntoIter {
			inner: self.intervals.into_iter(),
		};
	}
}
/// An owning iterator over the intervals of a [`CoalescedIntervalSet`].
///
/// This `struct` is created by the [`into_iter`] method on
/// [`CoalescedIntervalSet`] (provided by the [`IntoIterator`] trait). See
/// its documentation for more.
///
/// [`into_iter`]: IntoIterator::into_iter
/// [`IntoIterator`]: core::iter::IntoIterator
pub struct IntoIter<I> {
	inner: alloc::vec::IntoIter<Interval<I>>,
}
impl<I> Iterator for IntoIter<I> {
	type Item = Interval<I>;
	fn next(&mut self) -> Option<Self::Item> {
		self.inner.next()
	}
}

#[cfg(feature = "serde")]
mod serde {
	use core::marker::PhantomData;

	use alloc::vec::Vec;
	use serde::de::{SeqAccess, Visitor};
	use serde::ser::SerializeSeq;
	use serde::{Deserialize, Deserializer, Serialize, Serializer};

	use crate::{ii, CoalescedIntervalSet, PointType};

	impl<I> Serialize for CoalescedIntervalSet<I>
	where
		I: Serialize,
	{
		fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
		where
			S: Serializer,
		{
			let mut seq = serializer.serialize_seq(Some(self.len()))?;
			for interval in self.as_slice() {
				seq.serialize_element(&(&interval.start, &interval.end))?;
			}
			seq.end()
		}
	}

	/// Accepts any sequence of `(start, end)` pairs, which are merged on
	/// the way in. Only input of the wrong shape is an error.
	impl<'de, I> Deserialize<'de> for CoalescedIntervalSet<I>
	where
		I: PointType + Deserialize<'de>,
	{
		fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
		where
			D: Deserializer<'de>,
		{
			deserializer.deserialize_seq(CoalescedIntervalSetVisitor {
				i: PhantomData,
			})
		}
	}

	struct CoalescedIntervalSetVisitor<I> {
		i: PhantomData<I>,
	}

	impl<'de, I> Visitor<'de> for CoalescedIntervalSetVisitor<I>
	where
		I: PointType + Deserialize<'de>,
	{
		type Value = CoalescedIntervalSet<I>;

		fn expecting(
			&self,
			formatter: &mut alloc::fmt::Formatter,
		) -> alloc::fmt::Result {
			formatter.write_str("a CoalescedIntervalSet")
		}

		fn visit_seq<A>(self, mut access: A) -> Result<Self::Value, A::Error>
		where
			A: SeqAccess<'de>,
		{
			let mut intervals = Vec::with_capacity(access.size_hint().unwrap_or(0));
			while let Some((start, end)) = access.next_element::<(I, I)>()? {
				intervals.push(ii(start, end));
			}
			Ok(CoalescedIntervalSet::from_intervals(intervals))
		}
	}
}

#[cfg(test)]
mod tests {
	use alloc::format;
	use alloc::vec::Vec;

	use pretty_assertions::assert_eq;
	use rand::rngs::StdRng;
	use rand::{Rng, SeedableRng};

	use super::*;

	fn set(intervals: &[(i32, i32)]) -> CoalescedIntervalSet<i32> {
		CoalescedIntervalSet::from_intervals(intervals.iter().copied())
	}

	fn pairs(set: &CoalescedIntervalSet<i32>) -> Vec<(i32, i32)> {
		set.iter().map(|interval| (interval.start, interval.end)).collect()
	}

	#[test]
	fn add_tests() {
		let mut basic = set(&[(2, 10), (8, 20), (30, 40)]);
		assert_eq!(pairs(&basic), [(2, 20), (30, 40)]);

		basic.add([(20, 22)]);
		assert_eq!(pairs(&basic), [(2, 20), (20, 22), (30, 40)]);

		basic.add([(10, 31)]);
		assert_eq!(pairs(&basic), [(2, 40)]);

		basic.add([(55, 65), (65, 75), (75, 85), (85, 95), (95, 100)]);
		assert_eq!(
			pairs(&basic),
			[(2, 40), (55, 65), (65, 75), (75, 85), (85, 95), (95, 100)]
		);

		basic.add([(1, 95)]);
		assert_eq!(pairs(&basic), [(1, 95), (95, 100)]);

		basic.add(&set(&[(90, 100)]));
		assert_eq!(pairs(&basic), [(1, 100)]);
	}

	#[test]
	fn add_mixed_sources() {
		let mut basic = set(&[(0, 5)]);
		let other = set(&[(10, 15), (20, 25)]);

		basic.add((&other).into_iter().chain([ii(4, 11)]));
		assert_eq!(pairs(&basic), [(0, 15), (20, 25)]);

		basic.extend([(24, 30)]);
		assert_eq!(pairs(&basic), [(0, 15), (20, 30)]);
	}

	#[test]
	fn add_nothing_is_idempotent() {
		let basic = set(&[(2, 20), (20, 22), (30, 40)]);
		let mut added = basic.clone();
		added.add(Vec::<Interval<i32>>::new());

		assert_eq!(added, basic);
	}

	#[test]
	fn empty_set_tests() {
		let empty = set(&[]);

		assert!(empty.is_empty());
		assert_eq!(empty, CoalescedIntervalSet::default());
		assert_eq!(format!("{empty}"), "CoalescedIntervalSet([])");
		assert!(empty.split([(1, 2)]).is_empty());
		assert!(empty.split(Vec::<Interval<i32>>::new()).is_empty());
	}

	#[test]
	fn display_tests() {
		assert_eq!(
			format!("{}", set(&[(2, 10), (8, 20), (30, 40)])),
			"CoalescedIntervalSet([(2, 20), (30, 40)])"
		);
	}

	#[test]
	fn split_tests() {
		let test_cases: [(&[(i32, i32)], &[(i32, i32)], &[&[(i32, i32)]]); 9] = [
			(&[(1, 100)], &[(55, 65), (75, 85)], &[&[(1, 55)], &[(65, 75)], &[(85, 100)]]),
			(&[(1, 50), (60, 80)], &[(45, 65), (75, 85)], &[&[(1, 45)], &[(65, 75)]]),
			(
				&[(1, 50), (60, 80)],
				&[(45, 65), (70, 74), (76, 78)],
				&[&[(1, 45)], &[(65, 70)], &[(74, 76)], &[(78, 80)]],
			),
			(&[(45, 65), (70, 74), (76, 78)], &[(1, 50), (60, 80)], &[&[(50, 60)]]),
			(&[(45, 65), (70, 95)], &[(66, 67)], &[&[(45, 65)], &[(70, 95)]]),
			//nothing in the gap keeps intervals together
			(&[(1, 10), (20, 30)], &[(50, 60)], &[&[(1, 10), (20, 30)]]),
			(&[(1, 10), (20, 30)], &[], &[&[(1, 10), (20, 30)]]),
			//a cut interval's leftover is never joined to the next interval
			(&[(1, 50), (60, 80)], &[(10, 20)], &[&[(1, 10)], &[(20, 50)], &[(60, 80)]]),
			//overlapping and touching splitters
			(&[(0, 50)], &[(10, 30), (20, 25), (30, 40)], &[&[(0, 10)], &[(40, 50)]]),
		];

		for (base, others, expected) in test_cases {
			let fragments = set(base).split(others.iter().copied());
			let fragments: Vec<Vec<(i32, i32)>> = fragments.iter().map(pairs).collect();
			let expected: Vec<Vec<(i32, i32)>> =
				expected.iter().map(|fragment| fragment.to_vec()).collect();

			assert_eq!(fragments, expected, "splitting {:?} by {:?}", base, others);
		}
	}

	#[test]
	fn split_by_another_set() {
		let base = set(&[(1, 100)]);
		let others = set(&[(55, 65), (75, 85)]);

		assert_eq!(
			base.split(&others),
			[set(&[(1, 55)]), set(&[(65, 75)]), set(&[(85, 100)])]
		);
	}

	fn covered(intervals: impl IntoIterator<Item = Interval<i32>>) -> Vec<i32> {
		let mut points: Vec<i32> = intervals
			.into_iter()
			.flat_map(|interval| interval.start..interval.end)
			.collect();
		points.sort();
		points.dedup();
		points
	}

	fn random_intervals(rng: &mut StdRng) -> Vec<(i32, i32)> {
		(0..rng.gen_range(0..8))
			.map(|_| {
				let start = rng.gen_range(0..200);
				(start, start + rng.gen_range(1..40))
			})
			.collect()
	}

	#[test]
	fn split_coverage_matches_point_subtraction() {
		let mut rng = StdRng::seed_from_u64(11);

		for _ in 0..500 {
			let base = set(&random_intervals(&mut rng));
			let others = set(&random_intervals(&mut rng));

			let fragments = base.split(&others);

			let removed = covered(&others);
			let expected: Vec<i32> = covered(&base)
				.into_iter()
				.filter(|point| removed.binary_search(point).is_err())
				.collect();
			let actual = covered(fragments.iter().flat_map(|fragment| fragment));

			assert_eq!(actual, expected);

			for fragment in fragments.iter() {
				assert!(!fragment.is_empty());
				assert!(fragment.iter().all(|interval| interval.start < interval.end));
				assert_eq!(fragment.as_slice(), merge_overlapping(fragment.as_slice().to_vec()));
			}
			for pair in fragments.windows(2) {
				let (Some(last), Some(first)) = (pair[0].iter().last(), pair[1].iter().next())
				else {
					unreachable!()
				};
				assert!(last.end <= first.start);
			}
		}
	}
}
