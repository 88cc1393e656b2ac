//! Infinite sequence constructors.
//!
//! Each generator comes in two forms: a recursive one whose tail suspension
//! calls the generator again, and an `*_unfold` twin built on
//! [`Sequence::unfold`]. Both produce the same elements.
//!
//! The integer generators end the sequence at the edge of their type instead
//! of overflowing: [`Sequence::counting_from`] stops after `i64::MAX` and
//! [`Sequence::fibonacci`] stops after the largest Fibonacci number that fits
//! in a `u64`.

use std::rc::Rc;

use super::Sequence;
use crate::control::Suspension;

impl<A: Clone + 'static> Sequence<A> {
    /// An infinite sequence repeating `value`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_sequence::sequence::Sequence;
    ///
    /// assert_eq!(Sequence::constant('x').take(3).to_list(), vec!['x', 'x', 'x']);
    /// ```
    #[must_use]
    pub fn constant(value: A) -> Self {
        Self::from_parts(
            Suspension::evaluated(value.clone()),
            Suspension::new(move || Self::constant(value)),
        )
    }

    /// [`constant`](Self::constant) built on [`unfold`](Self::unfold).
    #[must_use]
    pub fn constant_unfold(value: A) -> Self {
        Self::unfold(value, |value| Some((value.clone(), value)))
    }

    /// An infinite sequence `seed, f(seed), f(f(seed)), ...`.
    ///
    /// `function` runs once per observed element after the first.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_sequence::sequence::Sequence;
    ///
    /// let powers = Sequence::iterate(1_u64, |value| value * 3);
    /// assert_eq!(powers.take(4).to_list(), vec![1, 3, 9, 27]);
    /// ```
    pub fn iterate<F>(seed: A, function: F) -> Self
    where
        F: Fn(&A) -> A + 'static,
    {
        iterate_with(seed, Rc::new(function))
    }
}

fn iterate_with<A, F>(seed: A, function: Rc<F>) -> Sequence<A>
where
    A: Clone + 'static,
    F: Fn(&A) -> A + 'static,
{
    let current = seed.clone();
    Sequence::from_parts(
        Suspension::evaluated(current),
        Suspension::new(move || {
            let next = function(&seed);
            iterate_with(next, function)
        }),
    )
}

impl Sequence<i64> {
    /// The integers `start, start + 1, start + 2, ...`, ending at `i64::MAX`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_sequence::sequence::Sequence;
    ///
    /// assert_eq!(Sequence::counting_from(5).take(3).to_list(), vec![5, 6, 7]);
    /// assert_eq!(Sequence::counting_from(i64::MAX).to_list(), vec![i64::MAX]);
    /// ```
    #[must_use]
    pub fn counting_from(start: i64) -> Self {
        Self::from_parts(
            Suspension::evaluated(start),
            Suspension::new(move || {
                start
                    .checked_add(1)
                    .map_or_else(Self::empty, Self::counting_from)
            }),
        )
    }

    /// [`counting_from`](Self::counting_from) built on [`unfold`](Self::unfold).
    #[must_use]
    pub fn counting_from_unfold(start: i64) -> Self {
        Self::unfold(Some(start), |state| {
            state.map(|value| (value, value.checked_add(1)))
        })
    }
}

impl Sequence<u64> {
    /// The Fibonacci numbers `0, 1, 1, 2, 3, 5, 8, ...`.
    ///
    /// Ends with the largest Fibonacci number representable as `u64`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_sequence::sequence::Sequence;
    ///
    /// assert_eq!(Sequence::fibonacci().take(7).to_list(), vec![0, 1, 1, 2, 3, 5, 8]);
    /// ```
    #[must_use]
    pub fn fibonacci() -> Self {
        fibonacci_from(0, Some(1))
    }

    /// [`fibonacci`](Self::fibonacci) built on [`unfold`](Self::unfold).
    #[must_use]
    pub fn fibonacci_unfold() -> Self {
        Self::unfold((Some(0_u64), Some(1_u64)), |(current, next)| {
            current.map(|value| {
                let following = next.and_then(|next| value.checked_add(next));
                (value, (next, following))
            })
        })
    }
}

fn fibonacci_from(current: u64, next: Option<u64>) -> Sequence<u64> {
    Sequence::from_parts(
        Suspension::evaluated(current),
        Suspension::new(move || match next {
            Some(next) => fibonacci_from(next, current.checked_add(next)),
            None => Sequence::empty(),
        }),
    )
}
