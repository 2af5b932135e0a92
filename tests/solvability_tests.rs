use num_bigint::BigUint;

use npuzzle::{inversion_parity, is_reachable, Board, Point};

#[test]
fn solved_board_has_even_parity() {
    assert_eq!(inversion_parity(&Board::solved(3, 3)), 0);
    assert_eq!(inversion_parity(&Board::solved(4, 4)), 0);
}

#[test]
fn single_swap_flips_parity() {
    let mut b = Board::solved(3, 3);
    b.set(Point::new(0, 0), 1);
    b.set(Point::new(1, 0), 0);
    assert_eq!(inversion_parity(&b), 1);
}

#[test]
fn reachability_is_reflexive() {
    let b = Board::from_rank(4, 4, &BigUint::from(987_654u32));
    assert!(is_reachable(&b, &b));
}

#[test]
fn swapped_pair_is_unreachable() {
    let target = Board::solved(3, 3);
    let mut b = target.clone();
    b.set(Point::new(0, 0), 1);
    b.set(Point::new(1, 0), 0);
    assert!(!is_reachable(&b, &target));
    assert!(!is_reachable(&target, &b));
}

#[test]
fn dimension_mismatch_is_unreachable() {
    assert!(!is_reachable(&Board::solved(3, 3), &Board::solved(3, 4)));
    assert!(!is_reachable(&Board::solved(2, 3), &Board::solved(3, 2)));
}

#[test]
fn parity_counts_inversions_not_positions() {
    // Reversing the first three tiles introduces three inversions.
    let mut b = Board::solved(3, 3);
    b.set(Point::new(0, 0), 2);
    b.set(Point::new(2, 0), 0);
    assert_eq!(inversion_parity(&b), 1);
}
