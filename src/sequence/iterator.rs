//! Bridges between [`Sequence`] and [`Iterator`].

use std::iter::{FromIterator, FusedIterator};

use super::{Cell, Sequence};
use crate::control::Suspension;

/// An iterator over the elements of a [`Sequence`].
///
/// Each call to `next` forces one cell and one head. The iterator holds a
/// handle into the sequence, so the elements it yields are memoized for every
/// other holder of the same sequence.
///
/// This struct is created by [`Sequence::iter`] or by `into_iter`.
pub struct SequenceIterator<A> {
    current: Suspension<Sequence<A>>,
}

impl<A: Clone> Iterator for SequenceIterator<A> {
    type Item = A;

    fn next(&mut self) -> Option<A> {
        let sequence = self.current.force();
        match sequence.cell() {
            Cell::Empty => None,
            Cell::Node { head, tail } => {
                self.current = tail.clone();
                Some(head.force())
            }
        }
    }
}

impl<A: Clone> FusedIterator for SequenceIterator<A> {}

impl<A> Sequence<A> {
    /// Returns an iterator over the elements.
    ///
    /// The iterator is lazy: it forces the sequence one element at a time, so
    /// it may be used on infinite sequences together with `take` or `find`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_sequence::sequence::Sequence;
    ///
    /// let naturals = Sequence::unfold(0, |state| Some((state, state + 1)));
    /// let squares: Vec<i32> = naturals.iter().map(|value| value * value).take(4).collect();
    /// assert_eq!(squares, vec![0, 1, 4, 9]);
    /// ```
    #[must_use]
    pub fn iter(&self) -> SequenceIterator<A> {
        SequenceIterator {
            current: Suspension::evaluated(self.clone()),
        }
    }
}

impl<A: 'static> Sequence<A> {
    /// Adapts an iterator into a sequence without draining it.
    ///
    /// The iterator is advanced only as the sequence is observed, and each
    /// element it produces is memoized.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_sequence::sequence::Sequence;
    ///
    /// let sequence = Sequence::from_iter_lazy((1..).map(|value| value * 3));
    /// assert_eq!(sequence.take(3).to_list(), vec![3, 6, 9]);
    /// ```
    pub fn from_iter_lazy<I>(iterator: I) -> Self
    where
        I: Iterator<Item = A> + 'static,
    {
        Self::unfold(iterator, |mut iterator| {
            iterator.next().map(|element| (element, iterator))
        })
    }
}

impl<A: Clone> IntoIterator for Sequence<A> {
    type Item = A;
    type IntoIter = SequenceIterator<A>;

    fn into_iter(self) -> Self::IntoIter {
        SequenceIterator {
            current: Suspension::evaluated(self),
        }
    }
}

impl<A: Clone> IntoIterator for &Sequence<A> {
    type Item = A;
    type IntoIter = SequenceIterator<A>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<A: 'static> FromIterator<A> for Sequence<A> {
    fn from_iter<I: IntoIterator<Item = A>>(iterator: I) -> Self {
        Self::from_elements(iterator)
    }
}
