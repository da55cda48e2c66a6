//! Page and page-size state.

use docket_query::PageRange;

/// Zero-based page index and page size of a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
	page: u32,
	limit: u32,
}

impl Pagination {
	/// Page size used when none is configured.
	pub const DEFAULT_LIMIT: u32 = 20;

	/// First page of `limit` rows. A zero limit is raised to one.
	pub fn new(limit: u32) -> Self {
		Self {
			page: 0,
			limit: limit.max(1),
		}
	}

	/// Current page index.
	pub fn page(&self) -> u32 {
		self.page
	}

	/// Rows per page.
	pub fn limit(&self) -> u32 {
		self.limit
	}

	/// Moves to `page`. There is no upper bound; a page past the end loads empty.
	pub fn set_page(&mut self, page: u32) {
		self.page = page;
	}

	/// Moves to the page computed from the current one, clamped at zero.
	pub fn update_page(&mut self, next: impl FnOnce(u32) -> i64) {
		let page = next(self.page).clamp(0, i64::from(u32::MAX));
		self.page = u32::try_from(page).unwrap_or(u32::MAX);
	}

	/// Returns to the first page.
	pub fn reset(&mut self) {
		self.page = 0;
	}

	/// Changes the page size, raising zero to one.
	pub fn set_limit(&mut self, limit: u32) {
		self.limit = limit.max(1);
	}

	/// Row range of the current page.
	pub fn range(&self) -> PageRange {
		PageRange::for_page(self.page, self.limit)
	}

	/// Number of pages needed for `count` rows; zero rows still make one page.
	pub fn page_count(&self, count: u64) -> u64 {
		count.div_ceil(u64::from(self.limit)).max(1)
	}

	/// Whether a previous page exists.
	pub fn has_previous(&self) -> bool {
		self.page > 0
	}

	/// Whether rows exist past the current page.
	pub fn has_next(&self, count: u64) -> bool {
		(u64::from(self.page) + 1) * u64::from(self.limit) < count
	}
}

impl Default for Pagination {
	fn default() -> Self {
		Self::new(Self::DEFAULT_LIMIT)
	}
}

#[cfg(test)]
mod tests {
	use proptest::prelude::*;

	use super::*;

	#[test]
	fn ranges_follow_the_page() {
		let mut pagination = Pagination::default();
		assert_eq!(pagination.range(), PageRange { from: 0, to: 19 });
		pagination.set_page(1);
		assert_eq!(pagination.range(), PageRange { from: 20, to: 39 });
		pagination.reset();
		assert_eq!(pagination.page(), 0);
	}

	#[test]
	fn update_page_clamps_at_zero() {
		let mut pagination = Pagination::new(10);
		pagination.update_page(|page| i64::from(page) - 1);
		assert_eq!(pagination.page(), 0);
		pagination.update_page(|page| i64::from(page) + 3);
		assert_eq!(pagination.page(), 3);
	}

	#[test]
	fn limit_is_at_least_one() {
		assert_eq!(Pagination::new(0).limit(), 1);
		let mut pagination = Pagination::default();
		pagination.set_limit(0);
		assert_eq!(pagination.limit(), 1);
	}

	#[test]
	fn navigation_controls() {
		let mut pagination = Pagination::new(20);
		assert!(!pagination.has_previous());
		assert!(pagination.has_next(21));
		assert!(!pagination.has_next(20));
		assert_eq!(pagination.page_count(0), 1);
		assert_eq!(pagination.page_count(41), 3);

		pagination.set_page(2);
		assert!(pagination.has_previous());
		assert!(!pagination.has_next(41));
	}

	proptest! {
		#[test]
		fn range_spans_exactly_one_page(page in 0u32..100_000, limit in 1u32..1_000) {
			let mut pagination = Pagination::new(limit);
			pagination.set_page(page);
			let range = pagination.range();
			prop_assert_eq!(range.from, u64::from(page) * u64::from(limit));
			prop_assert_eq!(range.limit(), u64::from(limit));
		}

		#[test]
		fn updated_page_is_never_negative(start in 0u32..1_000, delta in -5_000i64..5_000) {
			let mut pagination = Pagination::default();
			pagination.set_page(start);
			pagination.update_page(|page| i64::from(page) + delta);
			prop_assert_eq!(i64::from(pagination.page()), (i64::from(start) + delta).max(0));
		}

		#[test]
		fn has_next_iff_rows_remain(page in 0u32..1_000, limit in 1u32..100, count in 0u64..200_000) {
			let mut pagination = Pagination::new(limit);
			pagination.set_page(page);
			let shown = (u64::from(page) + 1) * u64::from(limit);
			prop_assert_eq!(pagination.has_next(count), shown < count);
		}
	}
}
