use std::collections::VecDeque;

use crate::board::Board;
use crate::solvability;
use crate::types::Point;

use super::{BoardSolver, SolveError};

/// Deterministic, search-free layer reduction.
///
/// The unsolved region shrinks from the full grid toward the cell the target
/// leaves blank: columns are peeled off while the region is wider than two
/// (always the column farthest from the target blank), then rows while it is
/// taller than two, and the trailing 2x2 block is spun into place. Within a
/// line every tile but the last two is escorted straight to its home; the
/// final pair is staged around the line's end corner and rotated in with two
/// fixed moves.
///
/// Move count is not optimized. Unlike the search solvers this one checks its
/// own precondition and rejects unreachable pairs up front.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReductionSolver;

impl BoardSolver for ReductionSolver {
    fn solution(&self, board: &Board, target: &Board) -> Result<Vec<Point>, SolveError> {
        if !solvability::is_reachable(board, target) {
            return Err(SolveError::Unsolvable);
        }
        Reducer::new(board, target).run()
    }
}

struct Reducer<'a> {
    board: Board,
    target: &'a Board,
    locked: Vec<bool>,
    moves: Vec<Point>,
}

impl<'a> Reducer<'a> {
    fn new(board: &Board, target: &'a Board) -> Self {
        Self {
            board: board.clone(),
            target,
            locked: vec![false; board.size()],
            moves: Vec::new(),
        }
    }

    fn run(mut self) -> Result<Vec<Point>, SolveError> {
        let (mut c0, mut c1) = (0, self.board.width() - 1);
        let (mut r0, mut r1) = (0, self.board.height() - 1);
        // The region always keeps the target's blank cell inside, so reduced
        // lines never contain the blank's home and the final block does.
        let pivot = self.target.empty_cell();

        while c1 - c0 > 1 {
            if pivot.x - c0 <= c1 - pivot.x {
                self.reduce_column(c1, r0, r1, -1);
                c1 -= 1;
            } else {
                self.reduce_column(c0, r0, r1, 1);
                c0 += 1;
            }
        }
        while r1 - r0 > 1 {
            if pivot.y - r0 <= r1 - pivot.y {
                self.reduce_row(r1, c0, c1, -1);
                r1 -= 1;
            } else {
                self.reduce_row(r0, c0, c1, 1);
                r0 += 1;
            }
        }
        self.finish_block(c0, r0)?;
        debug_assert_eq!(self.board, *self.target, "reduction must reach the target");
        Ok(self.moves)
    }

    /// Fix every tile of column `col`; `inward` points toward the surviving
    /// region (-1 when peeling the right edge, +1 for the left).
    fn reduce_column(&mut self, col: i32, r0: i32, r1: i32, inward: i32) {
        for y in r0..=r1 - 2 {
            let home = Point::new(col, y);
            let label = self.target.get(home);
            self.place_tile(label, home);
            self.lock(home);
        }
        let first_home = Point::new(col, r1 - 1);
        let second_home = Point::new(col, r1);
        let staging = Point::new(col + inward, r1);
        self.finish_pair(first_home, second_home, staging);
    }

    /// Fix every tile of row `row`; `inward` points toward the surviving
    /// region (-1 when peeling the bottom edge, +1 for the top).
    fn reduce_row(&mut self, row: i32, c0: i32, c1: i32, inward: i32) {
        for x in c0..=c1 - 2 {
            let home = Point::new(x, row);
            let label = self.target.get(home);
            self.place_tile(label, home);
            self.lock(home);
        }
        let first_home = Point::new(c1 - 1, row);
        let second_home = Point::new(c1, row);
        let staging = Point::new(c1, row + inward);
        self.finish_pair(first_home, second_home, staging);
    }

    /// Resolve the last two tiles of a line. The first tile is staged on the
    /// end corner (`second_home`), the second on the adjacent cell inside the
    /// surviving region (`staging`); routing the blank onto `first_home` then
    /// rotates both into place:
    ///
    /// ```text
    ///   . F        F .        F S
    ///   S _   ->   S _*  ->   . _
    /// ```
    fn finish_pair(&mut self, first_home: Point, second_home: Point, staging: Point) {
        let first = self.target.get(first_home);
        let second = self.target.get(second_home);
        if self.board.cell_of(first) == first_home && self.board.cell_of(second) == second_home {
            self.lock(first_home);
            self.lock(second_home);
            return;
        }
        self.place_tile(first, second_home);
        self.lock(second_home);
        self.place_tile(second, staging);
        self.lock(staging);
        self.move_blank_to(first_home, None);
        self.unlock(second_home);
        self.unlock(staging);
        self.step(second_home); // first slides home, blank lands on the corner
        self.step(staging); // second slides onto the corner
        self.lock(first_home);
        self.lock(second_home);
    }

    /// Spin the blank clockwise around the remaining 2x2 block one cell at a
    /// time until the block matches the target. The block's reachable states
    /// form a 12-cycle, so a solvable configuration matches within 12 steps.
    fn finish_block(&mut self, c0: i32, r0: i32) -> Result<(), SolveError> {
        let ring = [
            Point::new(c0, r0),
            Point::new(c0 + 1, r0),
            Point::new(c0 + 1, r0 + 1),
            Point::new(c0, r0 + 1),
        ];
        for _ in 0..12 {
            if ring
                .iter()
                .all(|&p| self.board.get(p) == self.target.get(p))
            {
                return Ok(());
            }
            self.spin_step(&ring);
        }
        Err(SolveError::NoSolution)
    }

    /// One step of the rectangle spin primitive: advance the blank to the
    /// next perimeter cell, cycling the block's tiles without touching
    /// anything outside it.
    fn spin_step(&mut self, ring: &[Point; 4]) {
        let blank = self.board.empty_cell();
        let at = ring
            .iter()
            .position(|&p| p == blank)
            .expect("blank stays inside the unsolved region");
        self.step(ring[(at + 1) % 4]);
    }

    /// Escort `label` to `dest` one grid step at a time: walk the tile along
    /// its shortest unlocked path, routing the blank around the tile before
    /// each step.
    fn place_tile(&mut self, label: u16, dest: Point) {
        loop {
            let at = self.board.cell_of(label);
            if at == dest {
                return;
            }
            let next = self.shortest_path(at, dest, None).map(|path| path[1]);
            let next = next.expect("tile path through unlocked cells must exist");
            self.move_blank_to(next, Some(at));
            self.step(at); // the tile slides into `next`, the blank onto `at`
        }
    }

    /// Route the blank to `dest` through unlocked cells, optionally refusing
    /// to pass through `avoid` (the tile being escorted).
    fn move_blank_to(&mut self, dest: Point, avoid: Option<Point>) {
        let start = self.board.empty_cell();
        if start == dest {
            return;
        }
        let path = self
            .shortest_path(start, dest, avoid)
            .expect("blank path through unlocked cells must exist");
        for &cell in &path[1..] {
            self.step(cell);
        }
    }

    /// Shortest path between two cells over unlocked cells, skipping
    /// `blocked`. Fixed neighbor order keeps the output deterministic.
    fn shortest_path(&self, from: Point, to: Point, blocked: Option<Point>) -> Option<Vec<Point>> {
        if from == to {
            return Some(vec![from]);
        }
        let size = self.board.size();
        let mut parent: Vec<Option<Point>> = vec![None; size];
        let mut seen = vec![false; size];
        let mut frontier = VecDeque::new();
        seen[self.key(from)] = true;
        frontier.push_back(from);
        while let Some(cur) = frontier.pop_front() {
            for (dx, dy) in [(0, -1), (0, 1), (-1, 0), (1, 0)] {
                let next = Point::new(cur.x + dx, cur.y + dy);
                if !self.board.contains(next) {
                    continue;
                }
                let key = self.key(next);
                if seen[key] || self.locked[key] || Some(next) == blocked {
                    continue;
                }
                seen[key] = true;
                parent[key] = Some(cur);
                if next == to {
                    let mut path = vec![to];
                    let mut hop = cur;
                    while hop != from {
                        path.push(hop);
                        hop = parent[self.key(hop)].expect("parent chain is complete");
                    }
                    path.push(from);
                    path.reverse();
                    return Some(path);
                }
                frontier.push_back(next);
            }
        }
        None
    }

    /// Apply one pre-validated single-cell move and log its destination.
    fn step(&mut self, cell: Point) {
        self.board.move_to(cell);
        self.moves.push(cell);
    }

    fn lock(&mut self, p: Point) {
        let key = self.key(p);
        self.locked[key] = true;
    }

    fn unlock(&mut self, p: Point) {
        let key = self.key(p);
        self.locked[key] = false;
    }

    fn key(&self, p: Point) -> usize {
        (p.y * self.board.width() + p.x) as usize
    }
}
