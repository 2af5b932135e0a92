use std::cell::{Cell, RefCell};

use num_bigint::BigUint;
use rand::Rng;

use crate::codec;
use crate::solvability;
use crate::types::{Direction, Point};

/// Mutable sliding-puzzle grid.
///
/// Labels are `0..size-1` with `size - 1` denoting the blank. The grid keeps
/// both directions of the bijection in sync: `cells` maps row-major cell keys
/// to labels and `mapping` maps labels back to cells. Rank and inversion
/// parity are cached lazily and invalidated by any cell write.
#[derive(Debug, Clone)]
pub struct Board {
    width: i32,
    height: i32,
    cells: Vec<u16>,
    mapping: Vec<Point>,
    rank: RefCell<Option<BigUint>>,
    parity: Cell<Option<u8>>,
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width && self.height == other.height && self.cells == other.cells
    }
}

impl Eq for Board {}

impl Board {
    /// Build a board by decoding `rank`. Panics on degenerate dimensions;
    /// a rank outside `[0, size!)` is a caller contract violation.
    pub fn from_rank(width: i32, height: i32, rank: &BigUint) -> Self {
        assert!(
            width > 1 && height > 1,
            "board dimensions must be at least 2x2"
        );
        let size = (width * height) as usize;
        let cells = codec::unrank(size, rank);
        let mut mapping = vec![Point::new(0, 0); size];
        for (key, &label) in cells.iter().enumerate() {
            mapping[label as usize] = Point::new(key as i32 % width, key as i32 / width);
        }
        Self {
            width,
            height,
            cells,
            mapping,
            rank: RefCell::new(Some(rank.clone())),
            parity: Cell::new(None),
        }
    }

    /// The rank-zero board: label `k` in cell `k`, blank in the last cell.
    pub fn solved(width: i32, height: i32) -> Self {
        Self::from_rank(width, height, &BigUint::from(0u32))
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn size(&self) -> usize {
        (self.width * self.height) as usize
    }

    #[inline]
    fn key_of(&self, p: Point) -> usize {
        (p.y * self.width + p.x) as usize
    }

    #[inline]
    pub fn point_of(&self, key: usize) -> Point {
        Point::new(key as i32 % self.width, key as i32 / self.width)
    }

    #[inline]
    pub fn label_at(&self, key: usize) -> u16 {
        self.cells[key]
    }

    #[inline]
    pub fn get(&self, p: Point) -> u16 {
        self.cells[self.key_of(p)]
    }

    /// Direct grid edit; keeps the inverse mapping consistent and drops the
    /// cached rank and parity.
    pub fn set(&mut self, p: Point, label: u16) {
        let key = self.key_of(p);
        self.cells[key] = label;
        self.mapping[label as usize] = p;
        self.rank.replace(None);
        self.parity.set(None);
    }

    #[inline]
    pub fn cell_of(&self, label: u16) -> Point {
        self.mapping[label as usize]
    }

    #[inline]
    pub fn empty_cell(&self) -> Point {
        self.mapping[self.size() - 1]
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && p.x < self.width && p.y < self.height
    }

    /// Cell adjacent to the blank in `dir`; not range-checked.
    pub fn cell_toward(&self, dir: Direction) -> Point {
        let e = self.empty_cell();
        match dir {
            Direction::Up => Point::new(e.x, e.y + 1),
            Direction::Down => Point::new(e.x, e.y - 1),
            Direction::Left => Point::new(e.x + 1, e.y),
            Direction::Right => Point::new(e.x - 1, e.y),
        }
    }

    /// Canonical integer identity of this permutation (cached).
    pub fn rank(&self) -> BigUint {
        if let Some(r) = self.rank.borrow().as_ref() {
            return r.clone();
        }
        let r = codec::rank(&self.cells);
        *self.rank.borrow_mut() = Some(r.clone());
        r
    }

    /// Inversion parity of the tile sequence (cached).
    pub fn parity(&self) -> u8 {
        if let Some(p) = self.parity.get() {
            return p;
        }
        let p = solvability::inversion_parity(self);
        self.parity.set(Some(p));
        p
    }

    /// Cells the blank passes through when sliding to `p`, ordered from the
    /// cell next to the blank out to `p` inclusive. Empty when the move is
    /// illegal: out of range, the blank itself, or off the blank's row and
    /// column.
    fn slide_path(&self, p: Point) -> Vec<Point> {
        if !self.contains(p) {
            return Vec::new();
        }
        let e = self.empty_cell();
        if p == e || (p.x != e.x && p.y != e.y) {
            return Vec::new();
        }
        let mut path = Vec::new();
        if p.x == e.x {
            let step = if p.y > e.y { 1 } else { -1 };
            let mut y = e.y + step;
            loop {
                path.push(Point::new(p.x, y));
                if y == p.y {
                    break;
                }
                y += step;
            }
        } else {
            let step = if p.x > e.x { 1 } else { -1 };
            let mut x = e.x + step;
            loop {
                path.push(Point::new(x, p.y));
                if x == p.x {
                    break;
                }
                x += step;
            }
        }
        path
    }

    /// Labels that `try_move(p)` would displace, in displacement order,
    /// without mutating. Empty means the move is illegal.
    pub fn peek_move(&self, p: Point) -> Vec<u16> {
        self.slide_path(p)
            .into_iter()
            .map(|cell| self.get(cell))
            .collect()
    }

    /// Slide every tile between the blank and `p` one step toward the blank,
    /// leaving the blank on `p`. Returns the displaced labels in the order
    /// they moved; an empty result signals an illegal no-op move.
    pub fn try_move(&mut self, p: Point) -> Vec<u16> {
        let path = self.slide_path(p);
        if path.is_empty() {
            return Vec::new();
        }
        let labels: Vec<u16> = path.iter().map(|&cell| self.get(cell)).collect();
        let blank = (self.size() - 1) as u16;
        let mut hole = self.empty_cell();
        for (&cell, &label) in path.iter().zip(labels.iter()) {
            self.set(hole, label);
            hole = cell;
        }
        self.set(p, blank);
        labels
    }

    /// Mutating move, silent on illegal cells. Solvers call this with
    /// pre-validated destinations.
    pub fn move_to(&mut self, p: Point) {
        let _ = self.try_move(p);
    }

    /// Scramble into a uniformly random permutation that is guaranteed
    /// solvable relative to `target` and not already solved.
    ///
    /// The fill places the blank in the last cell; when the draw lands on the
    /// wrong parity class a fixed corner-adjacent swap `(0,0) <-> (0,1)`
    /// flips it. A draw equal to `target` is redrawn.
    pub fn randomize<R: Rng + ?Sized>(&mut self, target: &Board, rng: &mut R) {
        let size = self.size();
        loop {
            let mut pool: Vec<u16> = (0..(size - 1) as u16).collect();
            for key in 0..size {
                let p = self.point_of(key);
                if pool.is_empty() {
                    self.set(p, (size - 1) as u16);
                } else {
                    let i = rng.gen_range(0..pool.len());
                    self.set(p, pool.swap_remove(i));
                }
            }
            if !solvability::is_reachable(self, target) {
                let a = Point::new(0, 0);
                let b = Point::new(0, 1);
                let (la, lb) = (self.get(a), self.get(b));
                self.set(a, lb);
                self.set(b, la);
            }
            if *self != *target {
                return;
            }
        }
    }
}
