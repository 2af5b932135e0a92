use num_bigint::BigUint;
use rand::SeedableRng;
use rand_pcg::Pcg64;

use npuzzle::{Board, Direction, Point};

#[test]
fn solved_layout_places_blank_last() {
    let b = Board::solved(3, 3);
    assert_eq!(b.width(), 3);
    assert_eq!(b.height(), 3);
    assert_eq!(b.size(), 9);
    for key in 0..9 {
        assert_eq!(b.label_at(key), key as u16);
    }
    assert_eq!(b.empty_cell(), Point::new(2, 2));
    assert_eq!(b.rank(), BigUint::from(0u32));
}

#[test]
fn from_rank_round_trips_through_rank() {
    let r = BigUint::from(1234u32);
    let b = Board::from_rank(3, 3, &r);
    assert_eq!(b.rank(), r);
    for label in 0..9u16 {
        assert_eq!(b.get(b.cell_of(label)), label);
    }
}

#[test]
#[should_panic(expected = "at least 2x2")]
fn degenerate_width_is_rejected() {
    let _ = Board::solved(1, 5);
}

#[test]
fn unit_move_swaps_blank_with_neighbor() {
    let mut b = Board::solved(3, 3);
    let displaced = b.try_move(Point::new(1, 2));
    assert_eq!(displaced, vec![7]);
    assert_eq!(b.get(Point::new(2, 2)), 7);
    assert_eq!(b.empty_cell(), Point::new(1, 2));
}

#[test]
fn multi_tile_move_shifts_the_whole_run() {
    let mut b = Board::solved(3, 3);
    let displaced = b.try_move(Point::new(0, 2));
    assert_eq!(displaced, vec![7, 6]);
    assert_eq!(b.get(Point::new(2, 2)), 7);
    assert_eq!(b.get(Point::new(1, 2)), 6);
    assert_eq!(b.empty_cell(), Point::new(0, 2));
}

#[test]
fn illegal_moves_are_noops() {
    let mut b = Board::solved(3, 3);
    let before = b.clone();
    assert!(b.try_move(Point::new(2, 2)).is_empty()); // blank itself
    assert!(b.try_move(Point::new(0, 0)).is_empty()); // off row and column
    assert!(b.try_move(Point::new(3, 2)).is_empty()); // out of range
    assert_eq!(b, before);
}

#[test]
fn peek_matches_move_without_mutating() {
    let b = Board::solved(3, 3);
    let preview = b.peek_move(Point::new(2, 0));
    assert_eq!(preview, vec![5, 2]);
    assert_eq!(b.rank(), BigUint::from(0u32));

    let mut moved = b.clone();
    assert_eq!(moved.try_move(Point::new(2, 0)), preview);
}

#[test]
fn cell_toward_points_at_the_sliding_tile() {
    let b = Board::from_rank(3, 3, &BigUint::from(1000u32));
    let e = b.empty_cell();
    assert_eq!(b.cell_toward(Direction::Up), Point::new(e.x, e.y + 1));
    assert_eq!(b.cell_toward(Direction::Down), Point::new(e.x, e.y - 1));
    assert_eq!(b.cell_toward(Direction::Left), Point::new(e.x + 1, e.y));
    assert_eq!(b.cell_toward(Direction::Right), Point::new(e.x - 1, e.y));
}

#[test]
fn horizontal_slides_preserve_parity() {
    let mut b = Board::solved(2, 2);
    let before = b.parity();
    b.move_to(Point::new(0, 1));
    assert_eq!(b.parity(), before);
}

#[test]
fn vertical_slide_flips_parity_on_even_width() {
    let mut b = Board::solved(2, 2);
    let before = b.parity();
    b.move_to(Point::new(1, 0));
    assert_ne!(b.parity(), before);
}

#[test]
fn moves_never_change_parity_on_odd_width() {
    let mut b = Board::solved(3, 3);
    let before = b.parity();
    for p in [
        Point::new(2, 0), // vertical, distance 2
        Point::new(0, 0), // horizontal, distance 2
        Point::new(0, 2), // vertical, distance 2
        Point::new(1, 2), // horizontal
    ] {
        assert!(!b.try_move(p).is_empty());
        assert_eq!(b.parity(), before);
    }
}

#[test]
fn randomize_yields_reachable_nontrivial_boards() {
    let target = Board::solved(4, 4);
    for seed in 0..20u64 {
        let mut rng = Pcg64::seed_from_u64(seed);
        let mut b = target.clone();
        b.randomize(&target, &mut rng);
        assert_ne!(b, target, "seed {seed}");
        assert!(npuzzle::is_reachable(&b, &target), "seed {seed}");
        assert_eq!(b.empty_cell(), target.empty_cell(), "seed {seed}");
    }
}

#[test]
fn randomize_is_deterministic_per_seed() {
    let target = Board::solved(3, 3);
    let mut a = target.clone();
    let mut b = target.clone();
    a.randomize(&target, &mut Pcg64::seed_from_u64(7));
    b.randomize(&target, &mut Pcg64::seed_from_u64(7));
    assert_eq!(a, b);
}
