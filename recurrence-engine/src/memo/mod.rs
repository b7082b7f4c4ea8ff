//! Memoized recursive evaluation
//!
//! [`MemoizedRecursiveEngine`] keeps every pair it resolves in a cache that
//! lives as long as the engine. The cache is a single flat map keyed by
//! [`RecurrenceParameters`](crate::RecurrenceParameters).
//!
//! # Backend Types
//!
//! - [`DashMapBackend`]: Sharded concurrent map (default)
//! - [`RwLockHashMapBackend`]: `RwLock` around a `HashMap`, good for read-heavy workloads
//!
//! # Example: Choosing a Backend
//!
//! ```rust
//! use recurrence_engine::memo::{MemoizedRecursiveEngine, RwLockHashMapBackend};
//!
//! let engine = MemoizedRecursiveEngine::with_backend(RwLockHashMapBackend::<u128>::new());
//! assert_eq!(engine.evaluate(10, 4).unwrap(), 34105);
//! ```

mod backend;
mod engine;

pub use backend::{DashMapBackend, MemoBackend, RwLockHashMapBackend};
pub use engine::MemoizedRecursiveEngine;
