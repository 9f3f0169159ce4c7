//! A module containing [`OverlapIndex`].

use alloc::vec::Vec;

use itertools::{Either, Itertools};

use crate::utils::{
	binsearch_insertion_point, binsearch_left_start, binsearch_right_end,
	distance,
};
use crate::{Interval, PointType, Record};

/// Batches larger than this are appended and then sorted as a whole by
/// [`OverlapIndex::update()`] rather than inserted one at a time.
///
/// Both strategies leave the index in the same sorted state, this only
/// affects speed.
pub const BULK_INSERT_THRESHOLD: usize = 30;

/// The number of candidate records [`OverlapIndex::contains()`] checks
/// one by one before falling back to searching for the end of the
/// candidate window.
pub const CONTAINS_SCAN_LIMIT: usize = 8;

/// An index of possibly-overlapping intervals, each with an associated
/// value, kept in a single [`Vec`] sorted by `(start, end)`.
///
/// `I` is the generic type parameter for the [`Ord`] point type the
/// intervals are over.
///
/// `V` is the generic type parameter for the values associated with the
/// intervals in the index.
///
/// Queries treat both ends of every interval as included. Every query
/// is bounded by binary searches using the longest interval ever added
/// to the index, which makes queries fast when intervals are of a
/// broadly similar length.
///
/// Insertion shifts the backing [`Vec`] so it is linear in the size of
/// the index, prefer [`OverlapIndex::update()`] with large batches over
/// many calls to [`OverlapIndex::add()`] when building a big index.
///
/// # Examples
/// ```
/// use interlap::OverlapIndex;
///
/// let mut index: OverlapIndex<i32, char> = OverlapIndex::new();
///
/// index.update([(1, 4, 'a'), (3, 9, 'b'), (20, 30, 'c')]);
/// index.add((40, 41, 'd'));
///
/// assert_eq!(index.len(), 4);
/// assert_eq!(index.contains((9, 12)), true);
/// assert_eq!(index.contains((10, 12)), false);
///
/// let values: Vec<char> =
/// 	index.find((4, 20)).map(|record| record.value).collect();
/// assert_eq!(values, ['a', 'b', 'c']);
///
/// let values: Vec<char> =
/// 	index.closest((33, 34)).map(|record| record.value).collect();
/// assert_eq!(values, ['c']);
/// ```
#[derive(Debug, Clone)]
pub struct OverlapIndex<I, V> {
	records: Vec<Record<I, V>>,
	max_len: I,
	// some record is longer than `I` can represent
	max_len_overflowed: bool,
}

impl<I, V> OverlapIndex<I, V>
where
	I: PointType,
{
	/// Makes a new, empty `OverlapIndex`.
	///
	/// # Examples
	/// ```
	/// use interlap::OverlapIndex;
	///
	/// let index: OverlapIndex<i32, ()> = OverlapIndex::new();
	///
	/// assert!(index.is_empty());
	/// ```
	pub fn new() -> Self {
		OverlapIndex {
			records: Vec::new(),
			max_len: I::zero(),
			max_len_overflowed: false,
		}
	}

	/// Makes a new `OverlapIndex` from the given records.
	///
	/// # Examples
	/// ```
	/// use interlap::OverlapIndex;
	///
	/// let index: OverlapIndex<i32, &str> =
	/// 	OverlapIndex::from_records([(20, 22, "hi"), (2, 3, "hello")]);
	///
	/// assert_eq!(index.iter().next().map(|record| record.value), Some("hello"));
	/// ```
	pub fn from_records<R>(records: impl IntoIterator<Item = R>) -> Self
	where
		R: Into<Record<I, V>>,
	{
		let mut records: Vec<Record<I, V>> =
			records.into_iter().map(Into::into).collect();
		records.sort_by(Record::cmp_bounds);

		let mut index = OverlapIndex::new();
		for record in records.iter() {
			index.grow_max_len(record);
		}
		index.records = records;

		return index;
	}

	/// Adds a single record to the index.
	///
	/// # Examples
	/// ```
	/// use interlap::OverlapIndex;
	///
	/// let mut index: OverlapIndex<i32, &str> =
	/// 	OverlapIndex::from_records([(20, 22, "hi")]);
	///
	/// index.add((2, 3, "hello"));
	///
	/// assert_eq!(index.find((2, 2)).count(), 1);
	/// assert_eq!(index.find((3, 3)).count(), 1);
	/// ```
	pub fn add<R>(&mut self, record: R)
	where
		R: Into<Record<I, V>>,
	{
		let record = record.into();
		self.grow_max_len(&record);

		let index =
			binsearch_insertion_point(&self.records, record.start, record.end);
		self.records.insert(index, record);
	}

	/// Adds a batch of records to the index.
	///
	/// Batches larger than [`BULK_INSERT_THRESHOLD`], or at least as large as
	/// the index itself, are appended and sorted in one go, smaller ones are
	/// inserted one at a time.
	///
	/// # Examples
	/// ```
	/// use interlap::OverlapIndex;
	///
	/// let mut index: OverlapIndex<i32, ()> = OverlapIndex::new();
	///
	/// index.update((0..100).map(|i| (i * 10, i * 10 + 5)));
	///
	/// assert_eq!(index.len(), 100);
	/// assert_eq!(index.contains((996, 999)), false);
	/// assert_eq!(index.contains((995, 999)), true);
	/// ```
	pub fn update<R>(&mut self, records: impl IntoIterator<Item = R>)
	where
		R: Into<Record<I, V>>,
	{
		let batch: Vec<Record<I, V>> =
			records.into_iter().map(Into::into).collect();
		for record in batch.iter() {
			self.grow_max_len(record);
		}

		if batch.len() > BULK_INSERT_THRESHOLD
			|| batch.len() >= self.records.len()
		{
			self.records.extend(batch);
			self.records.sort_by(Record::cmp_bounds);
		} else {
			for record in batch {
				let index = binsearch_insertion_point(
					&self.records,
					record.start,
					record.end,
				);
				self.records.insert(index, record);
			}
		}
	}

	/// Returns an iterator over every record in the index that overlaps
	/// the given interval, in ascending order of `start`.
	///
	/// Both ends of the query and of the stored intervals are included, so
	/// records which merely touch the query are returned.
	///
	/// # Examples
	/// ```
	/// use interlap::OverlapIndex;
	///
	/// let index: OverlapIndex<i32, ()> =
	/// 	OverlapIndex::from_records([(1, 4), (4, 8), (9, 100)]);
	///
	/// assert_eq!(
	/// 	index.find((2, 4)).map(|record| (record.start, record.end)).collect::<Vec<_>>(),
	/// 	[(1, 4), (4, 8)]
	/// );
	/// ```
	pub fn find<Q>(
		&self,
		query: Q,
	) -> impl DoubleEndedIterator<Item = &Record<I, V>>
	where
		Q: Into<Interval<I>>,
	{
		let query = query.into();
		let (left, right) = self.window(query);

		self.records[left..right]
			.iter()
			.filter(move |record| record.interval().overlaps_inclusive(&query))
	}

	/// Returns `true` if any record in the index overlaps the given
	/// interval, and `false` if not.
	///
	/// This is always the same as `self.find(query).next().is_some()`.
	///
	/// # Examples
	/// ```
	/// use interlap::OverlapIndex;
	///
	/// let index: OverlapIndex<i32, ()> = OverlapIndex::from_records([(20, 22)]);
	///
	/// assert_eq!(index.contains((20, 21)), true);
	/// assert_eq!(index.contains((22, 30)), true);
	/// assert_eq!(index.contains((23, 30)), false);
	/// ```
	pub fn contains<Q>(&self, query: Q) -> bool
	where
		Q: Into<Interval<I>>,
	{
		let query = query.into();
		let left = self.first_candidate(query.start);

		// the first candidates usually settle it
		for record in self.records[left..].iter().take(CONTAINS_SCAN_LIMIT) {
			if record.interval().overlaps_inclusive(&query) {
				return true;
			}
			if record.start > query.end {
				return false;
			}
		}

		let right = binsearch_right_end(&self.records, query.end);
		return self
			.records
			.get(left + CONTAINS_SCAN_LIMIT..right)
			.is_some_and(|rest| {
				rest.iter()
					.any(|record| record.interval().overlaps_inclusive(&query))
			});
	}

	/// Returns an iterator over the records overlapping the given interval
	/// if there are any, exactly as [`OverlapIndex::find()`] would.
	///
	/// Otherwise returns an iterator over every record tied for the
	/// smallest distance to the given interval, in ascending order of
	/// `start`. The distance from a non-overlapping record `r` to the query
	/// `q` is `min(|r.start - q.end|, |q.start - r.end|)`.
	///
	/// # Examples
	/// ```
	/// use interlap::OverlapIndex;
	///
	/// let mut index: OverlapIndex<i32, ()> =
	/// 	OverlapIndex::from_records([(2, 3), (20, 22)]);
	///
	/// assert_eq!(index.closest((10, 13)).count(), 2);
	///
	/// index.add((9, 9));
	///
	/// assert_eq!(
	/// 	index.closest((10, 13)).map(|record| (record.start, record.end)).collect::<Vec<_>>(),
	/// 	[(9, 9)]
	/// );
	/// ```
	pub fn closest<Q>(&self, query: Q) -> impl Iterator<Item = &Record<I, V>>
	where
		Q: Into<Interval<I>>,
	{
		let query = query.into();
		let len = self.records.len();

		let (left, right) = self.window(query);
		let mut left = left.saturating_sub(1);
		let mut right = core::cmp::min(len, right + 2);

		// don't split up groups of records tied on the window's edges
		while right < len
			&& self.records[right - 1].start == self.records[right].start
		{
			right += 1;
		}
		while left > 0 && self.records[left - 1].end == self.records[left].end
		{
			left -= 1;
		}

		let window = &self.records[left..right];
		let overlapping =
			move |record: &&Record<I, V>| record.interval().overlaps_inclusive(&query);

		if window.iter().any(|record| overlapping(&record)) {
			return Either::Left(window.iter().filter(overlapping));
		}

		let Some(nearest) = window
			.iter()
			.map(|record| distance(record.interval(), query))
			.min()
		else {
			return Either::Right(Vec::new().into_iter());
		};

		// anything at most `nearest` away starts within these bounds
		let upper = query.end.saturating_add(&nearest);
		let left = core::cmp::min(
			left,
			self.first_candidate(query.start.saturating_sub(&nearest)),
		);
		let right =
			core::cmp::max(right, binsearch_right_end(&self.records, upper));

		return Either::Right(
			self.records[left..right]
				.iter()
				.min_set_by_key(|record| distance(record.interval(), query))
				.into_iter(),
		);
	}

	/// Returns the length of the longest interval ever added to the index.
	///
	/// This never decreases. A length too large for `I` to represent, such
	/// as that of `(i64::MIN, i64::MAX)`, saturates at the largest value of
	/// `I`, queries still find such intervals.
	pub fn max_len(&self) -> I {
		self.max_len
	}

	fn grow_max_len(&mut self, record: &Record<I, V>) {
		let len = record.interval().len();
		if record.start.saturating_add(&len) < record.end {
			self.max_len_overflowed = true;
		}
		self.max_len = core::cmp::max(self.max_len, len);
	}

	/// The index of the first record which could overlap an interval
	/// starting at `start`.
	fn first_candidate(&self, start: I) -> usize {
		if self.max_len_overflowed {
			return 0;
		}
		binsearch_left_start(&self.records, start.saturating_sub(&self.max_len))
	}

	/// The range of indexes which contains every record overlapping `query`.
	fn window(&self, query: Interval<I>) -> (usize, usize) {
		let left = self.first_candidate(query.start);
		let right = binsearch_right_end(&self.records, query.end);

		(left, core::cmp::max(left, right))
	}
}

impl<I, V> OverlapIndex<I, V> {
	/// Returns the number of records in the index.
	///
	/// # Examples
	/// ```
	/// use interlap::OverlapIndex;
	///
	/// let index: OverlapIndex<i32, ()> =
	/// 	OverlapIndex::from_records([(2, 3), (2, 3), (5, 7)]);
	///
	/// assert_eq!(index.len(), 3);
	/// ```
	pub fn len(&self) -> usize {
		self.records.len()
	}
	/// Returns `true` if the index contains no records, and `false` if it
	/// does.
	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}
	/// Returns an iterator over every record in the index in ascending
	/// order of `(start, end)`.
	pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Record<I, V>> {
		self.records.iter()
	}
	/// Returns the records of the index as a sorted slice.
	pub fn as_slice(&self) -> &[Record<I, V>] {
		&self.records
	}
}

// Trait Impls ==========================

impl<I, V> Default for OverlapIndex<I, V>
where
	I: PointType,
{
	fn default() -> Self {
		OverlapIndex::new()
	}
}

impl<I, V, R> FromIterator<R> for OverlapIndex<I, V>
where
	I: PointType,
	R: Into<Record<I, V>>,
{
	fn from_iter<T: IntoIterator<Item = R>>(iter: T) -> Self {
		OverlapIndex::from_records(iter)
	}
}

impl<I, V, R> Extend<R> for OverlapIndex<I, V>
where
	I: PointType,
	R: Into<Record<I, V>>,
{
	fn extend<T: IntoIterator<Item = R>>(&mut self, iter: T) {
		self.update(iter);
	}
}

impl<'a, I, V> IntoIterator for &'a OverlapIndex<I, V> {
	type Item = &'a Record<I, V>;
	type IntoIter = core::slice::Iter<'a, Record<I, V>>;
	fn into_iter(self) -> Self::IntoIter {
		self.records.iter()
	}
}

impl<I, V> IntoIterator for OverlapIndex<I, V> {
	type Item = Record<I, V>;
	type IntoIter = IntoIter<I, V>;
	fn into_iter(self) -> Self::IntoIter {
		return IntoIter {
			inner: self.records.into_iter(),
		};
	}
}
/// An owning iterator over the records of an [`OverlapIndex`].
///
/// This `struct` is created by the [`into_iter`] method on
/// [`OverlapIndex`] (provided by the [`IntoIterator`] trait). See
/// its documentation for more.
///
/// [`into_iter`]: IntoIterator::into_iter
/// [`IntoIterator`]: core::iter::IntoIterator
pub struct IntoIter<I, V> {
	inner: alloc::vec::IntoIter<Record<I, V>>,
}
impl<I, V> Iterator for IntoIter<I, V> {
	type Item = Record<I, V>;
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

	use crate::{OverlapIndex, PointType, Record};

	impl<I, V> Serialize for OverlapIndex<I, V>
	where
		I: Serialize,
		V: Serialize,
	{
		fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
		where
			S: Serializer,
		{
			let mut seq = serializer.serialize_seq(Some(self.len()))?;
			for record in self.as_slice() {
				seq.serialize_element(&(&record.start, &record.end, &record.value))?;
			}
			seq.end()
		}
	}

	/// Accepts any sequence of `(start, end, value)` triples, in any order,
	/// the records are sorted on the way in. Only input of the wrong shape
	/// is an error.
	impl<'de, I, V> Deserialize<'de> for OverlapIndex<I, V>
	where
		I: PointType + Deserialize<'de>,
		V: Deserialize<'de>,
	{
		fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
		where
			D: Deserializer<'de>,
		{
			deserializer.deserialize_seq(OverlapIndexVisitor {
				i: PhantomData,
				v: PhantomData,
			})
		}
	}

	struct OverlapIndexVisitor<I, V> {
		i: PhantomData<I>,
		v: PhantomData<V>,
	}

	impl<'de, I, V> Visitor<'de> for OverlapIndexVisitor<I, V>
	where
		I: PointType + Deserialize<'de>,
		V: Deserialize<'de>,
	{
		type Value = OverlapIndex<I, V>;

		fn expecting(
			&self,
			formatter: &mut alloc::fmt::Formatter,
		) -> alloc::fmt::Result {
			formatter.write_str("an OverlapIndex")
		}

		fn visit_seq<A>(self, mut access: A) -> Result<Self::Value, A::Error>
		where
			A: SeqAccess<'de>,
		{
			let mut records = Vec::with_capacity(access.size_hint().unwrap_or(0));
			while let Some(record) = access.next_element::<(I, I, V)>()? {
				records.push(Record::from(record));
			}
			Ok(OverlapIndex::from_records(records))
		}
	}
}
