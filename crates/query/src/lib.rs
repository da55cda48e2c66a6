//! Query service contract and backend bindings for docket views.
//!
//! A view asks a [`QueryService`] for one page of rows matching its criteria.
//! The bindings in this crate implement that contract by translating criteria
//! into a backend-neutral [`QueryPlan`] and handing it to a [`QueryBackend`]:
//! * [`TaskQuery`]: the multi-field task search over `tasks`
//! * [`LibraryQuery`]: title or id lookup over `master_library_tasks`
//!
//! [`MemoryBackend`] evaluates plans over in-memory tables.

#![warn(missing_docs)]

pub mod backend;
pub mod error;
pub mod library;
pub mod memory;
pub mod plan;
pub mod range;
pub mod service;
pub mod task;

pub use backend::{QueryBackend, RawPage, execute};
pub use error::{QueryError, Result};
pub use library::LibraryQuery;
pub use memory::{Fixture, MemoryBackend};
pub use plan::{Collection, Column, Order, Predicate, QueryPlan, Value};
pub use range::{PageRange, PageResult};
pub use service::QueryService;
pub use task::TaskQuery;
