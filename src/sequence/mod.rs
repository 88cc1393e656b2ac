//! Lazy, memoizing, possibly infinite sequences.
//!
//! This module provides [`Sequence`], a cons-list whose heads and tails are
//! [`Suspension`]s. Nothing is computed until it is observed, and nothing
//! observed is ever computed twice.
//!
//! # Overview
//!
//! Two combinators carry the whole algebra:
//!
//! - [`Sequence::fold_right`]: a non-strict right fold. The combining function
//!   receives the fold of the tail as a [`Suspension`] and may never force it,
//!   which is how `exists` stops early on an infinite input.
//! - [`Sequence::unfold`]: a corecursive generator driven by a seed and a step
//!   function.
//!
//! Most derived operations (`map`, `filter`, `take_while`, `zip_all`, `tails`,
//! ...) are written in terms of one of them.
//!
//! # Examples
//!
//! ```rust
//! use lazy_sequence::sequence::Sequence;
//!
//! let naturals = Sequence::unfold(0_u64, |state| Some((state, state + 1)));
//! let evens = naturals.filter(|value| value % 2 == 0).map(|value| value * 10);
//! assert_eq!(evens.take(3).to_list(), vec![0, 20, 40]);
//! ```
//!
//! # Structural Sharing
//!
//! Derived sequences reuse the suspensions of their source:
//!
//! ```text
//! source:         [h0] -> [h1] -> [h2] -> ...
//! source.take(2): [h0] -> [h1] -> nil       // h0, h1 are the same suspensions
//! ```
//!
//! Forcing `h0` through either sequence forces it for both.

mod iterator;
mod macros;
mod operations;

#[cfg(feature = "generators")]
mod generators;

pub use iterator::SequenceIterator;

use std::fmt;
use std::rc::Rc;

use crate::control::Suspension;

/// The shape of one position in a [`Sequence`].
///
/// A `Node`'s suspensions are each forced at most once; every later
/// observation reads the cached result.
#[derive(Debug)]
pub enum Cell<A> {
    /// The end of the sequence.
    Empty,
    /// An element followed by the rest of the sequence.
    Node {
        /// The deferred element.
        head: Suspension<A>,
        /// The deferred remainder.
        tail: Suspension<Sequence<A>>,
    },
}

impl<A> Clone for Cell<A> {
    fn clone(&self) -> Self {
        match self {
            Self::Empty => Self::Empty,
            Self::Node { head, tail } => Self::Node {
                head: head.clone(),
                tail: tail.clone(),
            },
        }
    }
}

/// A lazily evaluated, memoizing, possibly infinite sequence.
///
/// `Sequence` is immutable. Every operation returns a new sequence that
/// shares suspensions with its source, so [`Clone`] is O(1).
///
/// # Time Complexity
///
/// | Operation     | Complexity                  |
/// |---------------|-----------------------------|
/// | `empty`       | O(1)                        |
/// | `cons`        | O(1), nothing forced        |
/// | `head_option` | O(1), forces one head       |
/// | `take`        | O(1), lazy                  |
/// | `drop_first`  | O(n) cells, no heads forced |
/// | `to_list`     | O(n), finite only           |
///
/// # Examples
///
/// ```rust
/// use lazy_sequence::sequence::Sequence;
///
/// let sequence = Sequence::cons(|| 1, || Sequence::cons(|| 2, Sequence::empty));
/// assert_eq!(sequence.to_list(), vec![1, 2]);
/// ```
pub struct Sequence<A> {
    cell: Cell<A>,
}

static_assertions::assert_not_impl_any!(Sequence<i32>: Send, Sync);

impl<A> Sequence<A> {
    /// Creates an empty sequence.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_sequence::sequence::Sequence;
    ///
    /// let sequence: Sequence<i32> = Sequence::empty();
    /// assert!(sequence.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub const fn empty() -> Self {
        Self { cell: Cell::Empty }
    }

    /// Creates a sequence from an already built head and tail.
    ///
    /// The suspensions are shared, not copied.
    #[inline]
    #[must_use]
    pub const fn from_parts(head: Suspension<A>, tail: Suspension<Self>) -> Self {
        Self {
            cell: Cell::Node { head, tail },
        }
    }

    /// Returns the shape of the first position.
    #[inline]
    #[must_use]
    pub const fn cell(&self) -> &Cell<A> {
        &self.cell
    }

    /// Returns `true` if the sequence has no elements.
    ///
    /// Forces nothing: the shape of the first position is always known.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self.cell, Cell::Empty)
    }

    /// Splits the sequence into its head and tail suspensions.
    ///
    /// Forces nothing. Returns `None` for an empty sequence.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_sequence::sequence::Sequence;
    ///
    /// let sequence = Sequence::cons(|| 1, Sequence::empty);
    /// let (head, tail) = sequence.uncons().unwrap();
    /// assert!(!head.is_forced());
    /// assert_eq!(head.force(), 1);
    /// assert!(tail.force().is_empty());
    /// ```
    #[must_use]
    pub fn uncons(&self) -> Option<(Suspension<A>, Suspension<Self>)> {
        match &self.cell {
            Cell::Empty => None,
            Cell::Node { head, tail } => Some((head.clone(), tail.clone())),
        }
    }
}

impl<A: 'static> Sequence<A> {
    /// Prepends a deferred head to a deferred tail.
    ///
    /// Neither closure runs until the corresponding part is observed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_sequence::sequence::Sequence;
    ///
    /// let sequence = Sequence::cons(|| panic!("never observed"), || Sequence::cons(|| 2, Sequence::empty));
    /// assert_eq!(sequence.drop_first(1).to_list(), vec![2]);
    /// ```
    #[must_use]
    pub fn cons<H, T>(head: H, tail: T) -> Self
    where
        H: FnOnce() -> A + 'static,
        T: FnOnce() -> Self + 'static,
    {
        Self::from_parts(Suspension::new(head), Suspension::new(tail))
    }

    /// Creates a sequence containing a single element.
    #[inline]
    #[must_use]
    pub fn singleton(element: A) -> Self {
        Self::from_parts(
            Suspension::evaluated(element),
            Suspension::evaluated(Self::empty()),
        )
    }

    /// Builds a finite sequence from the given elements, in order.
    ///
    /// The elements are already values, so every suspension starts forced.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_sequence::sequence::Sequence;
    ///
    /// let sequence = Sequence::from_elements(vec![1, 2, 3]);
    /// assert_eq!(sequence.to_list(), vec![1, 2, 3]);
    /// ```
    #[must_use]
    pub fn from_elements<I>(elements: I) -> Self
    where
        I: IntoIterator<Item = A>,
    {
        let mut elements: Vec<A> = elements.into_iter().collect();
        let mut sequence = Self::empty();
        while let Some(element) = elements.pop() {
            sequence = Self::from_parts(
                Suspension::evaluated(element),
                Suspension::evaluated(sequence),
            );
        }
        sequence
    }

    /// Generates a sequence from a seed.
    ///
    /// `step` maps a state to `Some((element, next_state))` to emit an element,
    /// or `None` to end the sequence. Each step after the first runs only when
    /// the previous tail is forced, so infinite generators are fine.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_sequence::sequence::Sequence;
    ///
    /// let below_five = Sequence::unfold(0, |state| (state < 5).then_some((state, state + 1)));
    /// assert_eq!(below_five.to_list(), vec![0, 1, 2, 3, 4]);
    ///
    /// let powers = Sequence::unfold(1_u32, |state| Some((state, state * 2)));
    /// assert_eq!(powers.take(4).to_list(), vec![1, 2, 4, 8]);
    /// ```
    pub fn unfold<S, F>(seed: S, step: F) -> Self
    where
        S: 'static,
        F: Fn(S) -> Option<(A, S)> + 'static,
    {
        unfold_step(seed, Rc::new(step))
    }
}

impl<A: Clone + 'static> Sequence<A> {
    /// Folds the sequence from the right, non-strictly.
    ///
    /// On a node, returns `combine(head, rest)` where `rest` is the fold of
    /// the tail as a [`Suspension`]. If `combine` never forces `rest`, the
    /// tail is never visited. On an empty sequence, returns `zero`.
    ///
    /// A `combine` that always forces `rest` recurses once per element, so
    /// very long sequences can exhaust the stack; prefer
    /// [`fold_left`](Self::fold_left) for strict reductions.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_sequence::sequence::Sequence;
    ///
    /// let sum = Sequence::from_elements(vec![1, 2, 3]).fold_right(0, |head, rest| head + rest.force());
    /// assert_eq!(sum, 6);
    ///
    /// // Short-circuits on an infinite sequence.
    /// let naturals = Sequence::unfold(0, |state| Some((state, state + 1)));
    /// assert!(naturals.fold_right(false, |head, rest| head == 10 || rest.force()));
    /// ```
    pub fn fold_right<B, F>(&self, zero: B, combine: F) -> B
    where
        B: Clone + 'static,
        F: Fn(A, Suspension<B>) -> B + 'static,
    {
        self.fold_right_deferred(Suspension::evaluated(zero), combine)
    }

    /// Like [`fold_right`](Self::fold_right), with a deferred `zero`.
    ///
    /// `zero` is forced only if the fold reaches the end of the sequence.
    pub fn fold_right_deferred<B, F>(&self, zero: Suspension<B>, combine: F) -> B
    where
        B: Clone + 'static,
        F: Fn(A, Suspension<B>) -> B + 'static,
    {
        fold_right_step(self, &zero, &Rc::new(combine))
    }
}

fn fold_right_step<A, B, F>(sequence: &Sequence<A>, zero: &Suspension<B>, combine: &Rc<F>) -> B
where
    A: Clone + 'static,
    B: Clone + 'static,
    F: Fn(A, Suspension<B>) -> B + 'static,
{
    match sequence.cell() {
        Cell::Empty => zero.force(),
        Cell::Node { head, tail } => {
            let tail = tail.clone();
            let zero = zero.clone();
            let next_combine = Rc::clone(combine);
            let rest = Suspension::new(move || fold_right_step(&tail.force(), &zero, &next_combine));
            combine(head.force(), rest)
        }
    }
}

fn unfold_step<A, S, F>(seed: S, step: Rc<F>) -> Sequence<A>
where
    A: 'static,
    S: 'static,
    F: Fn(S) -> Option<(A, S)> + 'static,
{
    match step(seed) {
        Some((element, next)) => Sequence::from_parts(
            Suspension::evaluated(element),
            Suspension::new(move || unfold_step(next, step)),
        ),
        None => Sequence::empty(),
    }
}

impl<A> Clone for Sequence<A> {
    fn clone(&self) -> Self {
        Self {
            cell: self.cell.clone(),
        }
    }
}

impl<A> Default for Sequence<A> {
    fn default() -> Self {
        Self::empty()
    }
}

// Dropping a long forced chain recursively would overflow the stack, so the
// chain is dismantled in a loop while this sequence is its only owner.
impl<A> Drop for Sequence<A> {
    fn drop(&mut self) {
        let mut cell = std::mem::replace(&mut self.cell, Cell::Empty);
        while let Cell::Node { head, tail } = cell {
            drop(head);
            cell = match tail.into_unique_forced() {
                Some(mut next) => std::mem::replace(&mut next.cell, Cell::Empty),
                None => break,
            };
        }
    }
}

/// Shows the forced prefix only.
///
/// An unforced head prints as `?`; an unforced tail ends the list with `..`.
/// Formatting never forces anything.
///
/// ```rust
/// use lazy_sequence::sequence::Sequence;
///
/// let naturals = Sequence::unfold(0, |state| Some((state, state + 1)));
/// assert_eq!(format!("{naturals:?}"), "[0, ..]");
/// let _ = naturals.take(3).to_list();
/// assert_eq!(format!("{naturals:?}"), "[0, 1, 2, ..]");
/// ```
impl<A: fmt::Debug> fmt::Debug for Sequence<A> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = formatter.debug_list();
        let mut current = self.clone();
        loop {
            let next = match current.cell() {
                Cell::Empty => break,
                Cell::Node { head, tail } => {
                    head.peek(|value| match value {
                        Some(value) => {
                            list.entry(value);
                        }
                        None => {
                            list.entry(&format_args!("?"));
                        }
                    });
                    tail.peek(|next| next.cloned())
                }
            };
            if let Some(next) = next {
                current = next;
            } else {
                list.entry(&format_args!(".."));
                break;
            }
        }
        list.finish()
    }
}
