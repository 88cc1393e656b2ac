//! # lazy-sequence
//!
//! Lazily evaluated, memoizing, possibly infinite sequences for Rust.
//!
//! ## Overview
//!
//! - **Control**: [`Suspension`](control::Suspension), a shared deferred value
//!   computed at most once.
//! - **Sequence**: [`Sequence`](sequence::Sequence), a cons-list of
//!   suspensions with a non-strict `fold_right`, a corecursive `unfold`, and
//!   the operations built on them (`map`, `filter`, `take`, `zip_all`,
//!   `tails`, ...).
//! - **Generators**: infinite constructors such as `constant`,
//!   `counting_from` and `fibonacci`.
//!
//! ## Feature Flags
//!
//! - `control`: [`Suspension`](control::Suspension)
//! - `sequence`: [`Sequence`](sequence::Sequence) and its operations
//! - `generators`: infinite sequence constructors
//! - `tracing`: emit `tracing` events when suspensions are forced or poisoned
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use lazy_sequence::prelude::*;
//!
//! let fibonacci = Sequence::fibonacci();
//! let even = fibonacci.filter(|value| value % 2 == 0);
//! assert_eq!(even.take(4).to_list(), vec![0, 2, 8, 34]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// ```rust
/// use lazy_sequence::prelude::*;
/// ```
pub mod prelude {
    #[cfg(feature = "control")]
    pub use crate::control::*;

    #[cfg(feature = "sequence")]
    pub use crate::sequence::*;

    #[cfg(feature = "sequence")]
    pub use crate::sequence;
}

#[cfg(feature = "control")]
pub mod control;

#[cfg(feature = "sequence")]
pub mod sequence;
