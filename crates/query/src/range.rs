//! Offset ranges and page results.

/// An inclusive, zero-based row range `[from, to]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRange {
	/// First row offset.
	pub from: u64,
	/// Last row offset, inclusive.
	pub to: u64,
}

impl PageRange {
	/// Range of `limit` rows starting at `from`. A zero limit is treated as one.
	pub fn new(from: u64, limit: u32) -> Self {
		let limit = u64::from(limit.max(1));
		Self {
			from,
			to: from.saturating_add(limit - 1),
		}
	}

	/// Range covering page `page` of `limit` rows: `from = page * limit`.
	pub fn for_page(page: u32, limit: u32) -> Self {
		Self::new(u64::from(page) * u64::from(limit.max(1)), limit)
	}

	/// Range covering exactly the first row.
	pub fn single() -> Self {
		Self::new(0, 1)
	}

	/// Number of rows the range spans.
	pub fn limit(self) -> u64 {
		self.to - self.from + 1
	}
}

/// One page of rows plus the total number of rows matching the criteria.
#[derive(Debug, Clone, PartialEq)]
pub struct PageResult<R> {
	/// Rows of this page, in backend order. Never longer than `limit`.
	pub items: Vec<R>,
	/// Total matches, ignoring pagination.
	pub count: u64,
	/// Offset the page was requested at.
	pub from: u64,
	/// Page size the page was requested with.
	pub limit: u64,
}

impl<R> PageResult<R> {
	/// Empty page for `range`.
	pub fn empty(range: PageRange) -> Self {
		Self {
			items: Vec::new(),
			count: 0,
			from: range.from,
			limit: range.limit(),
		}
	}
}
