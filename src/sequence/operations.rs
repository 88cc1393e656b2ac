//! Operations derived from [`Sequence::fold_right`] and [`Sequence::unfold`].
//!
//! None of these force more of the source than the result needs. The `*_unfold`
//! variants compute the same results as their namesakes through the other
//! combinator.

use std::rc::Rc;

use super::{Cell, Sequence};
use crate::control::Suspension;

impl<A: Clone + 'static> Sequence<A> {
    // =========================================================================
    // Observation
    // =========================================================================

    /// Returns the first element, forcing only that head.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_sequence::sequence::Sequence;
    ///
    /// assert_eq!(Sequence::from_elements(vec![1, 2]).head_option(), Some(1));
    /// assert_eq!(Sequence::<i32>::empty().head_option(), None);
    /// ```
    pub fn head_option(&self) -> Option<A> {
        self.fold_right(None, |head, _rest| Some(head))
    }

    /// Returns the sequence without its first element.
    ///
    /// Forces the first tail. The tail of an empty sequence is empty.
    #[must_use]
    pub fn tail(&self) -> Self {
        match self.cell() {
            Cell::Empty => Self::empty(),
            Cell::Node { tail, .. } => tail.force(),
        }
    }

    /// Collects every element into a `Vec`, in order.
    ///
    /// Only for finite sequences: on an infinite one this never returns.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_sequence::sequence::Sequence;
    ///
    /// let sequence = Sequence::unfold(1, |state| (state <= 3).then_some((state, state + 1)));
    /// assert_eq!(sequence.to_list(), vec![1, 2, 3]);
    /// ```
    #[must_use]
    pub fn to_list(&self) -> Vec<A> {
        self.iter().collect()
    }

    /// Counts the elements. Finite sequences only; heads are not forced.
    #[must_use]
    pub fn len(&self) -> usize {
        let mut length = 0;
        let mut current = self.clone();
        while let Cell::Node { tail, .. } = current.cell() {
            let next = tail.force();
            current = next;
            length += 1;
        }
        length
    }

    /// Returns the element at `index`, forcing only that head.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_sequence::sequence::Sequence;
    ///
    /// let naturals = Sequence::unfold(0, |state| Some((state, state + 1)));
    /// assert_eq!(naturals.nth(100), Some(100));
    /// ```
    pub fn nth(&self, index: usize) -> Option<A> {
        match self.drop_first(index).cell() {
            Cell::Empty => None,
            Cell::Node { head, .. } => Some(head.force()),
        }
    }

    // =========================================================================
    // Searching
    // =========================================================================

    /// Returns `true` if any element satisfies `predicate`.
    ///
    /// Stops at the first match, so it terminates on an infinite sequence
    /// whenever a match exists.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_sequence::sequence::Sequence;
    ///
    /// let naturals = Sequence::unfold(1, |state| Some((state, state + 1)));
    /// assert!(naturals.exists(|value| *value == 5));
    /// ```
    pub fn exists<P>(&self, predicate: P) -> bool
    where
        P: Fn(&A) -> bool + 'static,
    {
        self.fold_right(false, move |head, rest| predicate(&head) || rest.force())
    }

    /// Returns `true` if every element satisfies `predicate`.
    ///
    /// Stops at the first failure.
    pub fn for_all<P>(&self, predicate: P) -> bool
    where
        P: Fn(&A) -> bool + 'static,
    {
        self.fold_right(true, move |head, rest| predicate(&head) && rest.force())
    }

    /// Returns the first element satisfying `predicate`.
    ///
    /// Walks the cells in a loop, so it neither grows the stack nor builds
    /// intermediate suspensions.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_sequence::sequence::Sequence;
    ///
    /// let naturals = Sequence::unfold(0, |state| Some((state, state + 1)));
    /// assert_eq!(naturals.find(|value| value * value > 50), Some(8));
    /// ```
    pub fn find<P>(&self, mut predicate: P) -> Option<A>
    where
        P: FnMut(&A) -> bool,
    {
        let mut current = self.clone();
        loop {
            let next = match current.cell() {
                Cell::Empty => return None,
                Cell::Node { head, tail } => {
                    let element = head.force();
                    if predicate(&element) {
                        return Some(element);
                    }
                    tail.force()
                }
            };
            current = next;
        }
    }

    // =========================================================================
    // Slicing
    // =========================================================================

    /// Returns the first `count` elements.
    ///
    /// Shares the source's head suspensions without forcing them, and forces
    /// exactly `count - 1` tails once fully traversed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_sequence::sequence::Sequence;
    ///
    /// let sequence = Sequence::from_elements(vec![1, 2, 3]);
    /// assert_eq!(sequence.take(2).to_list(), vec![1, 2]);
    /// assert_eq!(sequence.take(10).to_list(), vec![1, 2, 3]);
    /// assert!(sequence.take(0).is_empty());
    /// ```
    #[must_use]
    pub fn take(&self, count: usize) -> Self {
        match self.cell() {
            Cell::Node { head, .. } if count == 1 => {
                Self::from_parts(head.clone(), Suspension::evaluated(Self::empty()))
            }
            Cell::Node { head, tail } if count > 1 => {
                let tail = tail.clone();
                Self::from_parts(
                    head.clone(),
                    Suspension::new(move || tail.force().take(count - 1)),
                )
            }
            _ => Self::empty(),
        }
    }

    /// [`take`](Self::take) expressed through [`unfold`](Self::unfold).
    #[must_use]
    pub fn take_unfold(&self, count: usize) -> Self {
        Self::unfold(
            (Suspension::evaluated(self.clone()), count),
            |(current, remaining)| {
                if remaining == 0 {
                    return None;
                }
                match current.force().cell() {
                    Cell::Empty => None,
                    Cell::Node { head, tail } => Some((head.force(), (tail.clone(), remaining - 1))),
                }
            },
        )
    }

    /// Skips the first `count` elements.
    ///
    /// Walks `count` cells eagerly; the skipped heads stay unforced.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_sequence::sequence::Sequence;
    ///
    /// let sequence = Sequence::from_elements(vec![1, 2, 3]);
    /// assert_eq!(sequence.drop_first(2).to_list(), vec![3]);
    /// assert!(sequence.drop_first(5).is_empty());
    /// ```
    #[doc(alias = "drop")]
    #[must_use]
    pub fn drop_first(&self, count: usize) -> Self {
        let mut current = self.clone();
        for _ in 0..count {
            let next = match current.cell() {
                Cell::Empty => break,
                Cell::Node { tail, .. } => tail.force(),
            };
            current = next;
        }
        current
    }

    /// Returns the longest prefix whose elements satisfy `predicate`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_sequence::sequence::Sequence;
    ///
    /// let naturals = Sequence::unfold(0, |state| Some((state, state + 1)));
    /// assert_eq!(naturals.take_while(|value| *value < 4).to_list(), vec![0, 1, 2, 3]);
    /// ```
    #[must_use]
    pub fn take_while<P>(&self, predicate: P) -> Self
    where
        P: Fn(&A) -> bool + 'static,
    {
        self.fold_right(Self::empty(), move |head, rest| {
            if predicate(&head) {
                Self::from_parts(Suspension::evaluated(head), rest)
            } else {
                Self::empty()
            }
        })
    }

    /// [`take_while`](Self::take_while) expressed through [`unfold`](Self::unfold).
    #[must_use]
    pub fn take_while_unfold<P>(&self, predicate: P) -> Self
    where
        P: Fn(&A) -> bool + 'static,
    {
        Self::unfold(Suspension::evaluated(self.clone()), move |current| {
            match current.force().cell() {
                Cell::Node { head, tail } => {
                    let element = head.force();
                    if predicate(&element) {
                        Some((element, tail.clone()))
                    } else {
                        None
                    }
                }
                Cell::Empty => None,
            }
        })
    }

    // =========================================================================
    // Transformation
    // =========================================================================

    /// Applies `function` to every element.
    ///
    /// `function` runs only when a mapped element is observed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_sequence::sequence::Sequence;
    ///
    /// let doubled = Sequence::from_elements(vec![1, 2, 3]).map(|value| value * 2);
    /// assert_eq!(doubled.to_list(), vec![2, 4, 6]);
    /// ```
    pub fn map<B, F>(&self, function: F) -> Sequence<B>
    where
        B: Clone + 'static,
        F: Fn(A) -> B + 'static,
    {
        let function = Rc::new(function);
        self.fold_right(Sequence::empty(), move |head, rest| {
            let function = Rc::clone(&function);
            Sequence::from_parts(Suspension::new(move || function(head)), rest)
        })
    }

    /// [`map`](Self::map) expressed through [`unfold`](Self::unfold).
    pub fn map_unfold<B, F>(&self, function: F) -> Sequence<B>
    where
        B: Clone + 'static,
        F: Fn(A) -> B + 'static,
    {
        Sequence::unfold(Suspension::evaluated(self.clone()), move |current| {
            match current.force().cell() {
                Cell::Node { head, tail } => Some((function(head.force()), tail.clone())),
                Cell::Empty => None,
            }
        })
    }

    /// Keeps the elements satisfying `predicate`, in order.
    ///
    /// Finding the next kept element forces every rejected element before it.
    /// Each rejected element in a run adds one level of recursion, so a very
    /// long run of rejections can exhaust the stack; use
    /// [`find`](Self::find) to locate a single distant match.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_sequence::sequence::Sequence;
    ///
    /// let odd = Sequence::from_elements(1..=6).filter(|value| value % 2 == 1);
    /// assert_eq!(odd.to_list(), vec![1, 3, 5]);
    /// ```
    #[must_use]
    pub fn filter<P>(&self, predicate: P) -> Self
    where
        P: Fn(&A) -> bool + 'static,
    {
        self.fold_right(Self::empty(), move |head, rest| {
            if predicate(&head) {
                Self::from_parts(Suspension::evaluated(head), rest)
            } else {
                rest.force()
            }
        })
    }

    /// Concatenates `other` after this sequence.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_sequence::sequence::Sequence;
    ///
    /// let left = Sequence::from_elements(vec![1, 2]);
    /// let right = Sequence::from_elements(vec![3]);
    /// assert_eq!(left.append(&right).to_list(), vec![1, 2, 3]);
    /// ```
    #[must_use]
    pub fn append(&self, other: &Self) -> Self {
        self.append_deferred(Suspension::evaluated(other.clone()))
    }

    /// Concatenates a deferred sequence after this one.
    ///
    /// `other` is forced only once this sequence is exhausted.
    #[must_use]
    pub fn append_deferred(&self, other: Suspension<Self>) -> Self {
        self.fold_right_deferred(other, |head, rest| {
            Self::from_parts(Suspension::evaluated(head), rest)
        })
    }

    /// Maps every element to a sequence and concatenates the results.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_sequence::sequence::Sequence;
    ///
    /// let sequence = Sequence::from_elements(vec![1, 2, 3]);
    /// let repeated = sequence.flat_map(|value| Sequence::from_elements(vec![value; value]));
    /// assert_eq!(repeated.to_list(), vec![1, 2, 2, 3, 3, 3]);
    /// ```
    pub fn flat_map<B, F>(&self, function: F) -> Sequence<B>
    where
        B: Clone + 'static,
        F: Fn(A) -> Sequence<B> + 'static,
    {
        self.fold_right(Sequence::empty(), move |head, rest| {
            function(head).append_deferred(rest)
        })
    }

    /// Returns every intermediate result of a right fold, ending with `zero`.
    ///
    /// Each intermediate result is computed once and reused by the element
    /// before it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_sequence::sequence::Sequence;
    ///
    /// let sums = Sequence::from_elements(vec![1, 2, 3]).scan_right(0, |head, rest| head + rest.force());
    /// assert_eq!(sums.to_list(), vec![6, 5, 3, 0]);
    /// ```
    pub fn scan_right<B, F>(&self, zero: B, function: F) -> Sequence<B>
    where
        B: Clone + 'static,
        F: Fn(A, Suspension<B>) -> B + 'static,
    {
        let initial = (zero.clone(), Sequence::singleton(zero));
        let (_, results) = self.fold_right(initial, move |head, rest| {
            let accumulated = rest.map(|(value, _)| value);
            let results = rest.map(|(_, results)| results);
            let value = function(head, accumulated);
            (
                value.clone(),
                Sequence::from_parts(Suspension::evaluated(value), results),
            )
        });
        results
    }

    /// Folds from the left, strictly. Finite sequences only.
    ///
    /// Iterative, so it is safe on long sequences.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_sequence::sequence::Sequence;
    ///
    /// let digits = Sequence::from_elements(vec![1, 2, 3]);
    /// assert_eq!(digits.fold_left(0, |number, digit| number * 10 + digit), 123);
    /// ```
    pub fn fold_left<B, F>(&self, zero: B, function: F) -> B
    where
        F: FnMut(B, A) -> B,
    {
        self.iter().fold(zero, function)
    }

    // =========================================================================
    // Zipping
    // =========================================================================

    /// Combines elements pairwise, stopping at the end of the shorter side.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_sequence::sequence::Sequence;
    ///
    /// let left = Sequence::from_elements(vec![1, 2, 3]);
    /// let right = Sequence::from_elements(vec![10, 20]);
    /// assert_eq!(left.zip_with(&right, |a, b| a + b).to_list(), vec![11, 22]);
    /// ```
    pub fn zip_with<B, C, F>(&self, other: &Sequence<B>, function: F) -> Sequence<C>
    where
        B: Clone + 'static,
        C: Clone + 'static,
        F: Fn(A, B) -> C + 'static,
    {
        Sequence::unfold(
            (
                Suspension::evaluated(self.clone()),
                Suspension::evaluated(other.clone()),
            ),
            move |(left, right)| {
                let left = left.force();
                let right = right.force();
                match (left.cell(), right.cell()) {
                    (
                        Cell::Node {
                            head: left_head,
                            tail: left_tail,
                        },
                        Cell::Node {
                            head: right_head,
                            tail: right_tail,
                        },
                    ) => Some((
                        function(left_head.force(), right_head.force()),
                        (left_tail.clone(), right_tail.clone()),
                    )),
                    _ => None,
                }
            },
        )
    }

    /// Pairs elements, stopping at the end of the shorter side.
    pub fn zip<B>(&self, other: &Sequence<B>) -> Sequence<(A, B)>
    where
        B: Clone + 'static,
    {
        self.zip_with(other, |left, right| (left, right))
    }

    /// Pairs elements until both sides end, padding the shorter with `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_sequence::sequence::Sequence;
    ///
    /// let left = Sequence::from_elements(vec![1, 2, 3]);
    /// let right = Sequence::from_elements(vec![1, 2]);
    /// assert_eq!(
    ///     left.zip_all(&right).to_list(),
    ///     vec![(Some(1), Some(1)), (Some(2), Some(2)), (Some(3), None)]
    /// );
    /// ```
    pub fn zip_all<B>(&self, other: &Sequence<B>) -> Sequence<(Option<A>, Option<B>)>
    where
        B: Clone + 'static,
    {
        Sequence::unfold(
            (
                Suspension::evaluated(self.clone()),
                Suspension::evaluated(other.clone()),
            ),
            |(left, right)| {
                let left = left.force();
                let right = right.force();
                let (left_head, left_tail) = split(&left);
                let (right_head, right_tail) = split(&right);
                if left_head.is_none() && right_head.is_none() {
                    None
                } else {
                    Some(((left_head, right_head), (left_tail, right_tail)))
                }
            },
        )
    }

    // =========================================================================
    // Prefixes and suffixes
    // =========================================================================

    /// Returns every suffix, longest first, ending with one empty sequence.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_sequence::sequence::Sequence;
    ///
    /// let suffixes: Vec<Vec<i32>> = Sequence::from_elements(vec![1, 2])
    ///     .tails()
    ///     .iter()
    ///     .map(|suffix| suffix.to_list())
    ///     .collect();
    /// assert_eq!(suffixes, vec![vec![1, 2], vec![2], vec![]]);
    /// ```
    pub fn tails(&self) -> Sequence<Self> {
        Sequence::unfold(
            (Suspension::evaluated(self.clone()), false),
            |(current, exhausted)| {
                if exhausted {
                    return None;
                }
                let suffix = current.force();
                match suffix.cell() {
                    Cell::Empty => Some((Self::empty(), (current, true))),
                    Cell::Node { tail, .. } => Some((suffix.clone(), (tail.clone(), false))),
                }
            },
        )
    }
}

impl<A: Clone + PartialEq + 'static> Sequence<A> {
    /// Returns `true` if `prefix` is a prefix of this sequence.
    ///
    /// Every element `prefix` supplies must match, and `prefix` must end no
    /// later than this sequence. Terminates on an infinite receiver when
    /// `prefix` is finite.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_sequence::sequence::Sequence;
    ///
    /// let sequence = Sequence::from_elements(vec![1, 2, 3]);
    /// assert!(sequence.starts_with(&Sequence::from_elements(vec![1, 2])));
    /// assert!(!sequence.starts_with(&Sequence::from_elements(vec![1, 3])));
    /// assert!(sequence.starts_with(&Sequence::empty()));
    /// ```
    pub fn starts_with(&self, prefix: &Self) -> bool {
        self.zip_all(prefix)
            .take_while(|(_, expected)| expected.is_some())
            .for_all(|(actual, expected)| actual == expected)
    }

    /// Returns `true` if `needle` occurs as a contiguous run in this sequence.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_sequence::sequence::Sequence;
    ///
    /// let sequence = Sequence::from_elements(vec![1, 2, 3, 4]);
    /// assert!(sequence.has_subsequence(&Sequence::from_elements(vec![2, 3])));
    /// assert!(!sequence.has_subsequence(&Sequence::from_elements(vec![2, 4])));
    /// ```
    pub fn has_subsequence(&self, needle: &Self) -> bool {
        let needle = needle.clone();
        self.tails().exists(move |suffix| suffix.starts_with(&needle))
    }
}

/// Head value and tail suspension of one side of a `zip_all`.
///
/// An exhausted side keeps reporting `None` with an empty tail.
fn split<A: Clone + 'static>(sequence: &Sequence<A>) -> (Option<A>, Suspension<Sequence<A>>) {
    match sequence.cell() {
        Cell::Empty => (None, Suspension::evaluated(Sequence::empty())),
        Cell::Node { head, tail } => (Some(head.force()), tail.clone()),
    }
}
