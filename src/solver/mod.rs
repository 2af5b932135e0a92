use std::fmt;

use crate::board::Board;
use crate::types::Point;

pub mod bfs;
pub mod priority;
pub mod queue;
pub mod reduction;

pub use bfs::BidirectionalBfsSolver;
pub use priority::BidirectionalPrioritySolver;
pub use queue::UnremovableQueue;
pub use reduction::ReductionSolver;

/// Runtime tuning for the priority solver, passed at construction.
#[derive(Debug, Clone, Copy)]
pub struct SearchConfig {
    /// Expand both frontiers; when false only the source side is expanded.
    pub bidirectional: bool,
    /// Heuristic weight in `priority = steps + weight * heuristic`.
    pub weight: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            bidirectional: true,
            weight: 2.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveError {
    /// The start and target permutations lie in different parity classes.
    Unsolvable,
    /// A search frontier drained without meeting the other side. Cannot
    /// happen when callers gate on `is_reachable`; kept as an internal
    /// invariant signal.
    NoSolution,
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveError::Unsolvable => write!(f, "target is not reachable from the start board"),
            SolveError::NoSolution => write!(f, "search frontier exhausted without a solution"),
        }
    }
}

impl std::error::Error for SolveError {}

/// A solving strategy: an ordered sequence of blank-destination cells that,
/// replayed in order via `Board::move_to` from `board`, yields `target`.
pub trait BoardSolver {
    fn solution(&self, board: &Board, target: &Board) -> Result<Vec<Point>, SolveError>;
}
