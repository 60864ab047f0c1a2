//! Stable merge sort that tolerates inconsistent comparators.
//!
//! `slice::sort_by` may panic when the comparator is not a total order. The
//! pairwise head-to-head tie-break can be cyclic, so ranking goes through this
//! instead: it always terminates and is deterministic for a given input order.

use std::cmp::Ordering;

pub(crate) fn merge_sort_by<T, F>(items: Vec<T>, compare: &mut F) -> Vec<T>
where
    F: FnMut(&T, &T) -> Ordering,
{
    if items.len() <= 1 {
        return items;
    }

    let mut left = items;
    let right = left.split_off(left.len() / 2);

    let left = merge_sort_by(left, compare);
    let right = merge_sort_by(right, compare);
    merge(left, right, compare)
}

fn merge<T, F>(left: Vec<T>, right: Vec<T>, compare: &mut F) -> Vec<T>
where
    F: FnMut(&T, &T) -> Ordering,
{
    let mut out = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();

    loop {
        // Ties keep the left element first.
        let take_right = match (left.peek(), right.peek()) {
            (Some(l), Some(r)) => compare(l, r) == Ordering::Greater,
            (Some(_), None) => false,
            (None, Some(_)) => true,
            (None, None) => break,
        };
        let next = if take_right { right.next() } else { left.next() };
        out.extend(next);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorts_integers() {
        let sorted = merge_sort_by(vec![5, 3, 9, 1, 4, 1], &mut |a: &i32, b: &i32| a.cmp(b));
        assert_eq!(sorted, vec![1, 1, 3, 4, 5, 9]);
    }

    #[test]
    fn test_is_stable() {
        let items = vec![(1, 'a'), (0, 'b'), (1, 'c'), (0, 'd')];
        let sorted = merge_sort_by(items, &mut |a: &(i32, char), b: &(i32, char)| a.0.cmp(&b.0));
        assert_eq!(sorted, vec![(0, 'b'), (0, 'd'), (1, 'a'), (1, 'c')]);
    }

    #[test]
    fn test_cyclic_comparator_terminates() {
        // Rock-paper-scissors: 0 beats 1, 1 beats 2, 2 beats 0.
        let mut beats = |a: &u8, b: &u8| match (a, b) {
            (0, 1) | (1, 2) | (2, 0) => Ordering::Less,
            (1, 0) | (2, 1) | (0, 2) => Ordering::Greater,
            _ => Ordering::Equal,
        };
        let sorted = merge_sort_by(vec![0u8, 1, 2], &mut beats);
        assert_eq!(sorted.len(), 3);
        assert_eq!(sorted, vec![0, 1, 2]);
    }

    #[test]
    fn test_empty_and_single() {
        let empty: Vec<i32> = merge_sort_by(vec![], &mut |a: &i32, b: &i32| a.cmp(b));
        assert!(empty.is_empty());
        assert_eq!(merge_sort_by(vec![7], &mut |a: &i32, b: &i32| a.cmp(b)), vec![7]);
    }
}
