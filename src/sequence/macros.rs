//! The `sequence!` macro.

/// Builds a finite [`Sequence`](crate::sequence::Sequence) from its elements.
///
/// `sequence![a, b, c]` is `Sequence::from_elements([a, b, c])`, and
/// `sequence![]` is `Sequence::empty()`.
///
/// # Examples
///
/// ```
/// use lazy_sequence::sequence;
/// use lazy_sequence::sequence::Sequence;
///
/// let numbers = sequence![1, 2, 3];
/// assert_eq!(numbers.to_list(), vec![1, 2, 3]);
///
/// let nothing: Sequence<i32> = sequence![];
/// assert!(nothing.is_empty());
/// ```
#[macro_export]
macro_rules! sequence {
    () => {
        $crate::sequence::Sequence::empty()
    };
    ($($element:expr),+ $(,)?) => {
        $crate::sequence::Sequence::from_elements([$($element),+])
    };
}

#[cfg(test)]
mod tests {
    use crate::sequence::Sequence;
    use rstest::rstest;

    #[rstest]
    fn test_sequence_macro_empty() {
        let sequence: Sequence<i32> = sequence![];
        assert!(sequence.is_empty());
    }

    #[rstest]
    fn test_sequence_macro_trailing_comma() {
        let sequence = sequence!["a", "b",];
        assert_eq!(sequence.to_list(), vec!["a", "b"]);
    }
}
