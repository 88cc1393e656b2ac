//! Shared, memoizing deferred values.
//!
//! This module provides [`Suspension<T>`], a reference-counted handle to a
//! computation that runs at most once. Every clone of a suspension aliases the
//! same cell, so all observers see the single cached result.
//!
//! # Examples
//!
//! ```rust
//! use lazy_sequence::control::Suspension;
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let runs = Rc::new(Cell::new(0));
//! let counter = Rc::clone(&runs);
//! let suspension = Suspension::new(move || {
//!     counter.set(counter.get() + 1);
//!     42
//! });
//! let alias = suspension.clone();
//!
//! assert_eq!(runs.get(), 0);
//! assert_eq!(suspension.force(), 42);
//! assert_eq!(alias.force(), 42);
//! assert_eq!(runs.get(), 1);
//! ```
//!
//! # Failure
//!
//! A thunk that panics poisons its suspension. The panic reaches the first
//! forcer; every later [`Suspension::force`] panics with
//! [`SuspensionError::Poisoned`] and the thunk is never run again.

use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;

/// Error returned when a [`Suspension`] cannot produce its value.
///
/// [`Suspension::force`] and [`Suspension::force_ref`] panic with this
/// error's message; [`Suspension::try_force`] returns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SuspensionError {
    /// The thunk panicked during an earlier force.
    Poisoned,
    /// The suspension was forced again while its own thunk was running.
    Reentrant,
}

impl fmt::Display for SuspensionError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Poisoned => write!(formatter, "Suspension has been poisoned"),
            Self::Reentrant => write!(
                formatter,
                "Suspension was forced from inside its own computation"
            ),
        }
    }
}

impl std::error::Error for SuspensionError {}

type Thunk<T> = Box<dyn FnOnce() -> T>;

/// The internal state of a suspension.
enum State<T> {
    /// Not forced yet. Holds the computation.
    Pending(Thunk<T>),
    /// The computation is running.
    Evaluating,
    /// The computation finished. Holds the cached value.
    Forced(T),
    /// The computation panicked.
    Poisoned,
}

/// A deferred computation evaluated at most once.
///
/// `Suspension<T>` is a cheap handle: [`Clone`] copies a pointer, and every
/// clone observes the same evaluation. The thunk runs on the first call to
/// [`force`](Self::force), [`force_ref`](Self::force_ref) or
/// [`try_force`](Self::try_force).
///
/// # Thread Safety
///
/// This type is NOT thread-safe. It is built on `Rc` and `RefCell`.
///
/// # Examples
///
/// ```rust
/// use lazy_sequence::control::Suspension;
///
/// let suspension = Suspension::new(|| "hello".len());
/// assert!(!suspension.is_forced());
/// assert_eq!(suspension.force(), 5);
/// assert!(suspension.is_forced());
/// ```
pub struct Suspension<T> {
    state: Rc<RefCell<State<T>>>,
}

static_assertions::assert_not_impl_any!(Suspension<i32>: Send, Sync);

impl<T> Suspension<T> {
    /// Creates a suspension that runs `thunk` on first force.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_sequence::control::Suspension;
    ///
    /// let suspension = Suspension::new(|| 6 * 7);
    /// assert_eq!(suspension.force(), 42);
    /// ```
    #[inline]
    pub fn new<F>(thunk: F) -> Self
    where
        F: FnOnce() -> T + 'static,
    {
        Self {
            state: Rc::new(RefCell::new(State::Pending(Box::new(thunk)))),
        }
    }

    /// Creates a suspension that is already forced.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_sequence::control::Suspension;
    ///
    /// let suspension = Suspension::evaluated(42);
    /// assert!(suspension.is_forced());
    /// ```
    #[inline]
    pub fn evaluated(value: T) -> Self {
        Self {
            state: Rc::new(RefCell::new(State::Forced(value))),
        }
    }

    /// Forces the suspension and borrows the cached value.
    ///
    /// # Panics
    ///
    /// - If the thunk panics (the panic propagates and the suspension is poisoned).
    /// - If the suspension is poisoned.
    /// - If called from inside this suspension's own thunk.
    ///
    /// Holding the returned guard does not block other forces of this
    /// suspension or its clones.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_sequence::control::Suspension;
    ///
    /// let suspension = Suspension::new(|| vec![1, 2, 3]);
    /// assert_eq!(suspension.force_ref().len(), 3);
    /// ```
    pub fn force_ref(&self) -> Ref<'_, T> {
        if let Err(error) = self.evaluate() {
            panic!("{error}");
        }
        self.cached()
            .unwrap_or_else(|| unreachable!("Suspension should be forced at this point"))
    }

    /// Returns whether the thunk has run to completion.
    #[inline]
    pub fn is_forced(&self) -> bool {
        matches!(&*self.state.borrow(), State::Forced(_))
    }

    /// Returns whether the thunk panicked.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_sequence::control::Suspension;
    /// use std::panic::{AssertUnwindSafe, catch_unwind};
    ///
    /// let suspension: Suspension<i32> = Suspension::new(|| panic!("boom"));
    /// let _ = catch_unwind(AssertUnwindSafe(|| suspension.force()));
    /// assert!(suspension.is_poisoned());
    /// ```
    #[inline]
    pub fn is_poisoned(&self) -> bool {
        matches!(&*self.state.borrow(), State::Poisoned)
    }

    /// Returns `true` if both handles alias the same deferred computation.
    #[inline]
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        Rc::ptr_eq(&this.state, &other.state)
    }

    /// Borrows the cached value without forcing.
    fn cached(&self) -> Option<Ref<'_, T>> {
        Ref::filter_map(self.state.borrow(), |state| match state {
            State::Forced(value) => Some(value),
            _ => None,
        })
        .ok()
    }

    /// Runs the thunk if it has not run yet.
    ///
    /// The `RefCell` borrow is released while the thunk runs, so the thunk may
    /// force other suspensions freely. Forcing this one again is reported as
    /// [`SuspensionError::Reentrant`].
    ///
    /// Settled states are read through a shared borrow, so outstanding
    /// [`force_ref`](Self::force_ref) guards never conflict with a later force.
    fn evaluate(&self) -> Result<(), SuspensionError> {
        match &*self.state.borrow() {
            State::Forced(_) => return Ok(()),
            State::Poisoned => return Err(SuspensionError::Poisoned),
            State::Evaluating => {
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    value_type = std::any::type_name::<T>(),
                    "reentrant force of a running suspension"
                );
                return Err(SuspensionError::Reentrant);
            }
            State::Pending(_) => {}
        }

        // Only a pending suspension reaches here, and no guard can borrow one.
        let thunk = {
            let mut state = self.state.borrow_mut();
            let State::Pending(thunk) = std::mem::replace(&mut *state, State::Evaluating) else {
                unreachable!("Suspension should be pending at this point")
            };
            thunk
        };

        #[cfg(feature = "tracing")]
        tracing::trace!(
            value_type = std::any::type_name::<T>(),
            "forcing suspension"
        );

        let guard = PoisonOnUnwind(&self.state);
        let value = thunk();
        *guard.0.borrow_mut() = State::Forced(value);
        drop(guard);
        Ok(())
    }

    /// Inspects the cached value, if any, without forcing.
    pub(crate) fn peek<R>(&self, inspect: impl FnOnce(Option<&T>) -> R) -> R {
        match self.state.try_borrow() {
            Ok(state) => match &*state {
                State::Forced(value) => inspect(Some(value)),
                _ => inspect(None),
            },
            Err(_) => inspect(None),
        }
    }

    /// Takes the cached value out when this is the only handle left.
    ///
    /// Used to dismantle long forced chains iteratively.
    pub(crate) fn into_unique_forced(self) -> Option<T> {
        let cell = Rc::try_unwrap(self.state).ok()?;
        match cell.into_inner() {
            State::Forced(value) => Some(value),
            _ => None,
        }
    }
}

impl<T: Clone> Suspension<T> {
    /// Forces the suspension and returns a clone of the cached value.
    ///
    /// # Panics
    ///
    /// Same conditions as [`force_ref`](Self::force_ref).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_sequence::control::Suspension;
    ///
    /// let suspension = Suspension::new(|| 21 * 2);
    /// assert_eq!(suspension.force(), 42);
    /// assert_eq!(suspension.force(), 42);
    /// ```
    pub fn force(&self) -> T {
        T::clone(&self.force_ref())
    }

    /// Forces the suspension, reporting poisoning and reentrancy as errors.
    ///
    /// # Errors
    ///
    /// - [`SuspensionError::Poisoned`] if an earlier force panicked.
    /// - [`SuspensionError::Reentrant`] if called from inside this
    ///   suspension's own thunk.
    ///
    /// # Panics
    ///
    /// If the thunk itself panics on this call. Only a poisoned state left by
    /// an earlier panic is turned into an error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_sequence::control::{Suspension, SuspensionError};
    /// use std::panic::{AssertUnwindSafe, catch_unwind};
    ///
    /// let suspension: Suspension<i32> = Suspension::new(|| panic!("boom"));
    /// let _ = catch_unwind(AssertUnwindSafe(|| suspension.force()));
    /// assert_eq!(suspension.try_force(), Err(SuspensionError::Poisoned));
    /// ```
    pub fn try_force(&self) -> Result<T, SuspensionError> {
        self.evaluate()?;
        self.cached()
            .map(|value| T::clone(&value))
            .ok_or(SuspensionError::Poisoned)
    }

    /// Returns the cached value if the suspension has been forced.
    ///
    /// Never runs the thunk.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_sequence::control::Suspension;
    ///
    /// let suspension = Suspension::new(|| 42);
    /// assert_eq!(suspension.get(), None);
    /// suspension.force();
    /// assert_eq!(suspension.get(), Some(42));
    /// ```
    pub fn get(&self) -> Option<T> {
        self.cached().map(|value| T::clone(&value))
    }
}

impl<T: Clone + 'static> Suspension<T> {
    /// Creates a suspension that applies `function` to this one's value.
    ///
    /// `self` stays shared: forcing the result forces `self` once, and other
    /// observers of `self` reuse that evaluation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_sequence::control::Suspension;
    ///
    /// let base = Suspension::new(|| 21);
    /// let doubled = base.map(|value| value * 2);
    /// assert_eq!(doubled.force(), 42);
    /// assert!(base.is_forced());
    /// ```
    pub fn map<U, G>(&self, function: G) -> Suspension<U>
    where
        G: FnOnce(T) -> U + 'static,
    {
        let source = self.clone();
        Suspension::new(move || function(source.force()))
    }

    /// Chains a computation that itself produces a suspension.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_sequence::control::Suspension;
    ///
    /// let base = Suspension::new(|| 21);
    /// let chained = base.flat_map(|value| Suspension::new(move || value * 2));
    /// assert_eq!(chained.force(), 42);
    /// ```
    pub fn flat_map<U, G>(&self, function: G) -> Suspension<U>
    where
        U: Clone,
        G: FnOnce(T) -> Suspension<U> + 'static,
    {
        let source = self.clone();
        Suspension::new(move || function(source.force()).force())
    }
}

/// Marks the suspension poisoned if the thunk unwinds.
struct PoisonOnUnwind<'a, T>(&'a RefCell<State<T>>);

impl<T> Drop for PoisonOnUnwind<'_, T> {
    fn drop(&mut self) {
        if let Ok(mut state) = self.0.try_borrow_mut()
            && matches!(&*state, State::Evaluating)
        {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                value_type = std::any::type_name::<T>(),
                "suspension thunk panicked; suspension poisoned"
            );
            *state = State::Poisoned;
        }
    }
}

impl<T> Clone for Suspension<T> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
        }
    }
}

impl<T> From<T> for Suspension<T> {
    fn from(value: T) -> Self {
        Self::evaluated(value)
    }
}

impl<T: Default + 'static> Default for Suspension<T> {
    fn default() -> Self {
        Self::new(T::default)
    }
}

impl<T: fmt::Debug> fmt::Debug for Suspension<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Ok(state) = self.state.try_borrow() else {
            return formatter.debug_tuple("Suspension").field(&"<borrowed>").finish();
        };
        match &*state {
            State::Forced(value) => formatter.debug_tuple("Suspension").field(value).finish(),
            State::Pending(_) => formatter.debug_tuple("Suspension").field(&"<pending>").finish(),
            State::Evaluating => formatter
                .debug_tuple("Suspension")
                .field(&"<evaluating>")
                .finish(),
            State::Poisoned => formatter
                .debug_tuple("Suspension")
                .field(&"<poisoned>")
                .finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::cell::Cell;
    use std::panic::{AssertUnwindSafe, catch_unwind};

    #[rstest]
    fn test_suspension_defers_until_forced() {
        let suspension = Suspension::new(|| 42);
        assert!(!suspension.is_forced());
        assert_eq!(suspension.force(), 42);
        assert!(suspension.is_forced());
    }

    #[rstest]
    fn test_suspension_runs_thunk_once_across_clones() {
        let runs = Rc::new(Cell::new(0));
        let counter = Rc::clone(&runs);
        let suspension = Suspension::new(move || {
            counter.set(counter.get() + 1);
            "value".to_string()
        });
        let alias = suspension.clone();

        assert_eq!(suspension.force(), "value");
        assert_eq!(alias.force(), "value");
        assert_eq!(suspension.force(), "value");
        assert_eq!(runs.get(), 1);
        assert!(Suspension::ptr_eq(&suspension, &alias));
    }

    #[rstest]
    fn test_suspension_poisoned_after_panic() {
        let suspension: Suspension<i32> = Suspension::new(|| panic!("boom"));
        assert!(catch_unwind(AssertUnwindSafe(|| suspension.force())).is_err());
        assert!(suspension.is_poisoned());
        assert_eq!(suspension.try_force(), Err(SuspensionError::Poisoned));
    }

    #[rstest]
    fn test_suspension_reentrant_force_is_reported() {
        let slot: Rc<RefCell<Option<Suspension<i32>>>> = Rc::new(RefCell::new(None));
        let inner_slot = Rc::clone(&slot);
        let suspension = Suspension::new(move || {
            let this = inner_slot.borrow().clone().unwrap();
            match this.try_force() {
                Err(SuspensionError::Reentrant) => -1,
                _ => 0,
            }
        });
        *slot.borrow_mut() = Some(suspension.clone());

        assert_eq!(suspension.force(), -1);
        slot.borrow_mut().take();
    }

    #[rstest]
    fn test_suspension_get_does_not_force() {
        let suspension = Suspension::new(|| 1);
        assert_eq!(suspension.get(), None);
        assert!(!suspension.is_forced());
    }

    #[rstest]
    fn test_into_unique_forced_requires_single_handle() {
        let suspension = Suspension::evaluated(7);
        let alias = suspension.clone();
        assert_eq!(suspension.into_unique_forced(), None);
        assert_eq!(alias.into_unique_forced(), Some(7));
    }

    #[rstest]
    #[case(SuspensionError::Poisoned, "Suspension has been poisoned")]
    #[case(
        SuspensionError::Reentrant,
        "Suspension was forced from inside its own computation"
    )]
    fn test_suspension_error_display(#[case] error: SuspensionError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }
}
