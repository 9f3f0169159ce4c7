//! This crate provides two independent interval data-structures:
//!
//! - [`OverlapIndex`], a sorted-array index of possibly-overlapping
//!   intervals carrying arbitrary values, which answers "does anything
//!   overlap this?", "what overlaps this?" and "what is closest to this?"
//!   queries.
//! - [`CoalescedIntervalSet`], an ordered set of merged non-overlapping
//!   intervals which can absorb more intervals and can have another
//!   collection of intervals split (subtracted) out of it.
//!
//! ## Example using an `OverlapIndex`
//!
//! ```rust
//! use interlap::OverlapIndex;
//!
//! let mut index: OverlapIndex<i32, &str> =
//! 	OverlapIndex::from_records([(20, 22, "hi")]);
//!
//! index.add((2, 3, "hello"));
//!
//! assert_eq!(index.contains((20, 21)), true);
//! assert_eq!(
//! 	index.find((3, 3)).map(|record| record.value).collect::<Vec<_>>(),
//! 	["hello"]
//! );
//! assert_eq!(
//! 	index.closest((11, 12)).map(|record| record.value).collect::<Vec<_>>(),
//! 	["hello", "hi"]
//! );
//! ```
//!
//! ## Example using a `CoalescedIntervalSet`
//!
//! ```rust
//! use interlap::{ii, CoalescedIntervalSet};
//!
//! let set = CoalescedIntervalSet::from_intervals([(1, 100)]);
//!
//! let fragments = set.split([(55, 65), (75, 85)]);
//!
//! assert_eq!(
//! 	fragments,
//! 	[
//! 		CoalescedIntervalSet::from_intervals([ii(1, 55)]),
//! 		CoalescedIntervalSet::from_intervals([ii(65, 75)]),
//! 		CoalescedIntervalSet::from_intervals([ii(85, 100)]),
//! 	]
//! );
//! ```
//!
//! ## Key Understandings and Philosophies:
//!
//! ### Two kinds of overlap
//!
//! The two data-structures deliberately use different overlap rules.
//!
//! [`OverlapIndex`] queries treat both ends as included, so a stored
//! interval `(2, 3)` is found by the queries `(2, 2)` and `(3, 3)`.
//!
//! [`CoalescedIntervalSet`] and the [`overlaps()`] function treat
//! intervals as half-open, so `(2, 4)` and `(4, 5)` merely touch and do
//! **not** overlap. Touching intervals are therefore kept separate when
//! merging, for example `(2, 20)` and `(20, 22)` stay as two entries.
//!
//! ### Invalid Intervals
//!
//! Intervals whose start is greater than their end are not rejected, the
//! results for them are whatever the arithmetic produces. Keeping
//! intervals well-formed is the caller's job.
//!
//! ### Lengths
//!
//! [`OverlapIndex`] bounds its searches by the longest interval ever
//! added to it, so an index holding a handful of very long intervals
//! amongst many short ones will scan more candidates per query. The
//! bound never shrinks.
//!
//! # Similar Crates
//!
//! - <https://docs.rs/nodit>
//!   Non-overlapping discrete interval maps and sets based off `BTreeMap`.
//! - <https://docs.rs/rust-lapper>
//!   Another sorted-array overlap index using the same longest-interval
//!   bound trick.
//! - <https://docs.rs/unbounded-interval-tree>
//!   An augmented binary search tree supporting unbounded intervals.

#![no_std]
#![allow(clippy::tabs_in_doc_comments)]
#![allow(clippy::needless_return)]

extern crate alloc;

pub(crate) mod utils;

pub mod coalesced_set;
pub mod interval;
pub mod overlap_index;
pub mod record;

pub use crate::coalesced_set::CoalescedIntervalSet;
pub use crate::interval::{ii, overlaps, Interval};
pub use crate::overlap_index::{
	OverlapIndex, BULK_INSERT_THRESHOLD, CONTAINS_SCAN_LIMIT,
};
pub use crate::record::Record;
pub use crate::utils::merge_overlapping;

/// The marker trait for valid point types, a blanket implementation is provided for all types
/// which implement this traits' super-traits so you shouln't need to implement this yourself.
///
/// Lengths and distances between points are computed with saturating
/// arithmetic so unsigned point types are safe to use.
pub trait PointType:
	Ord + Copy + num_traits::Zero + num_traits::SaturatingSub + num_traits::SaturatingAdd
{
}
impl<I> PointType for I where
	I: Ord
		+ Copy
		+ num_traits::Zero
		+ num_traits::SaturatingSub
		+ num_traits::SaturatingAdd
{
}
