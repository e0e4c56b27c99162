//! Moving one element of an ordered list to a new position.
//!
//! Used for both orderings the picker exposes: top-level slots and the
//! selected variants inside one slot.

use crate::error::ReorderError;

/// Returns a copy of `items` with the element at `from` removed and
/// reinserted at `to`. Every other element keeps its relative order, and
/// `from == to` returns the sequence unchanged.
///
/// # Errors
///
/// Returns [`ReorderError::OutOfBounds`] if either index is `>= items.len()`.
pub fn reorder<T: Clone>(items: &[T], from: usize, to: usize) -> Result<Vec<T>, ReorderError> {
    let len = items.len();
    if from >= len || to >= len {
        return Err(ReorderError::OutOfBounds { from, to, len });
    }

    let mut out = items.to_vec();
    if from != to {
        let moved = out.remove(from);
        out.insert(to, moved);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ABCD: [char; 4] = ['A', 'B', 'C', 'D'];

    #[test]
    fn same_index_is_identity() {
        for i in 0..ABCD.len() {
            assert_eq!(reorder(&ABCD, i, i).unwrap(), ABCD.to_vec());
        }
    }

    #[test]
    fn forward_move_shifts_following_elements_left() {
        assert_eq!(reorder(&ABCD, 0, 2).unwrap(), vec!['B', 'C', 'A', 'D']);
    }

    #[test]
    fn inverse_move_restores_original() {
        let moved = reorder(&ABCD, 0, 2).unwrap();
        assert_eq!(reorder(&moved, 2, 0).unwrap(), ABCD.to_vec());
    }

    #[test]
    fn adjacent_swap_round_trips_in_both_directions() {
        for i in 0..ABCD.len() - 1 {
            let swapped = reorder(&ABCD, i, i + 1).unwrap();
            assert_eq!(reorder(&swapped, i + 1, i).unwrap(), ABCD.to_vec());
        }
    }

    #[test]
    fn backward_move_to_front() {
        assert_eq!(reorder(&ABCD, 3, 0).unwrap(), vec!['D', 'A', 'B', 'C']);
    }

    #[test]
    fn length_is_preserved() {
        let moved = reorder(&ABCD, 1, 3).unwrap();
        assert_eq!(moved.len(), ABCD.len());
        assert_eq!(moved, vec!['A', 'C', 'D', 'B']);
    }

    #[test]
    fn out_of_bounds_is_rejected() {
        assert_eq!(
            reorder(&ABCD, 4, 0),
            Err(ReorderError::OutOfBounds {
                from: 4,
                to: 0,
                len: 4
            })
        );
        assert!(reorder(&ABCD, 0, 4).is_err());
        assert!(reorder::<char>(&[], 0, 0).is_err());
    }
}
