//! Deferred computation.
//!
//! - [`Suspension`]: a shared, memoizing deferred value
//! - [`SuspensionError`]: why a suspension could not produce its value
//!
//! # Examples
//!
//! ```rust
//! use lazy_sequence::control::Suspension;
//!
//! let suspension = Suspension::new(|| {
//!     println!("Computing...");
//!     42
//! });
//! // "Computing..." is not printed yet
//!
//! assert_eq!(suspension.force(), 42);
//! // Printed once; later forces reuse the cached value
//! assert_eq!(suspension.force(), 42);
//! ```

mod suspension;

pub use suspension::{Suspension, SuspensionError};
