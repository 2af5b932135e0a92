use std::collections::VecDeque;

use num_bigint::BigUint;

use crate::board::Board;
use crate::types::{Direction, Point};

use super::queue::UnremovableQueue;
use super::{BoardSolver, SolveError};

type Frontier = UnremovableQueue<BigUint, Option<Direction>>;

/// Meet-in-the-middle breadth-first search over permutation ranks.
///
/// Two append-only frontiers grow toward each other; each round expands the
/// side currently holding fewer live entries, which keeps the explored sets
/// balanced but gives up the shortest-path guarantee of synchronized BFS.
/// Callers must gate on `is_reachable`: an unreachable pair never meets.
#[derive(Debug, Clone, Copy, Default)]
pub struct BidirectionalBfsSolver;

impl BoardSolver for BidirectionalBfsSolver {
    fn solution(&self, board: &Board, target: &Board) -> Result<Vec<Point>, SolveError> {
        Search::new(board, target).run()
    }
}

struct Search<'a> {
    board: &'a Board,
    target_rank: BigUint,
    source: Frontier,
    target: Frontier,
}

impl<'a> Search<'a> {
    fn new(board: &'a Board, target: &Board) -> Self {
        Self {
            board,
            target_rank: target.rank(),
            source: UnremovableQueue::new(),
            target: UnremovableQueue::new(),
        }
    }

    fn run(mut self) -> Result<Vec<Point>, SolveError> {
        if self.board.rank() == self.target_rank {
            return Ok(Vec::new());
        }
        self.source.enqueue(self.board.rank(), None);
        self.target.enqueue(self.target_rank.clone(), None);

        while !self.source.is_empty() && !self.target.is_empty() {
            let meeting = if self.source.len() <= self.target.len() {
                Self::extend(self.board, &mut self.source, &self.target)
            } else {
                Self::extend(self.board, &mut self.target, &self.source)
            };
            if let Some(rank) = meeting {
                return Ok(self.reconstruct(&rank));
            }
        }
        Err(SolveError::NoSolution)
    }

    /// Expand one state from `own`. Returns the meeting rank as soon as a
    /// neighbor is already known to the other side.
    fn extend(board: &Board, own: &mut Frontier, other: &Frontier) -> Option<BigUint> {
        let (rank, produced_by) = own.dequeue();
        let current = Board::from_rank(board.width(), board.height(), &rank);
        // Undoing the move that discovered this state cannot find anything new.
        let except = produced_by.map(Direction::opposite);
        for dir in Direction::ALL {
            if Some(dir) == except {
                continue;
            }
            let cell = current.cell_toward(dir);
            if !current.contains(cell) {
                continue;
            }
            let mut next = current.clone();
            next.move_to(cell);
            let neighbor = next.rank();
            if own.contains(&neighbor) {
                continue;
            }
            own.enqueue(neighbor.clone(), Some(dir));
            if other.contains(&neighbor) {
                return Some(neighbor);
            }
        }
        None
    }

    fn reconstruct(&self, meeting: &BigUint) -> Vec<Point> {
        let (w, h) = (self.board.width(), self.board.height());
        let mut directions: VecDeque<Direction> = VecDeque::new();

        // Source side: walk the ancestry back to the root, undoing each
        // stored move, and collect the forward directions.
        let mut cursor = Board::from_rank(w, h, meeting);
        let mut produced = Self::value_at(&self.source, meeting);
        while let Some(dir) = produced {
            directions.push_front(dir);
            let undo = cursor.cell_toward(dir.opposite());
            cursor.move_to(undo);
            produced = Self::value_at(&self.source, &cursor.rank());
        }

        // Target side: stored moves lead away from the target, so their
        // opposites walk forward from the meeting state into the target.
        cursor = Board::from_rank(w, h, meeting);
        produced = Self::value_at(&self.target, meeting);
        while let Some(dir) = produced {
            let forward = dir.opposite();
            directions.push_back(forward);
            let cell = cursor.cell_toward(forward);
            cursor.move_to(cell);
            produced = Self::value_at(&self.target, &cursor.rank());
        }

        // Replay from the start board, converting directions into the
        // destination cells that externally identify each move.
        let mut replay = self.board.clone();
        let mut cells = Vec::with_capacity(directions.len());
        for dir in directions {
            let cell = replay.cell_toward(dir);
            cells.push(cell);
            replay.move_to(cell);
        }
        cells
    }

    fn value_at(frontier: &Frontier, rank: &BigUint) -> Option<Direction> {
        let index = frontier
            .index_of(rank)
            .expect("ancestry rank missing from frontier history");
        frontier.pair(index).1
    }
}
