//! Domain types shared by the docket query views.
//!
//! * [`TaskRecord`]: a row of either task collection
//! * [`TaskFilters`] / [`LibraryFilters`]: the criteria each view persists
//! * [`SortKey`]: the closed set of orderings a view may request
//! * [`Criteria`] / [`Record`]: the seams the generic view controller is written against

#![warn(missing_docs)]

/// Filter criteria for the task search and master library views.
pub mod filters;
/// Identifier newtypes.
pub mod ids;
/// Sort key enumeration.
pub mod sort;
/// Task records and their enumerations.
pub mod task;

pub use filters::{Criteria, LibraryFilters, TaskFilters};
pub use ids::TaskId;
pub use sort::SortKey;
pub use task::{Record, TaskRecord, TaskStatus};
