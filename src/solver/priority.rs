use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::hash::BuildHasherDefault;

use hashbrown::HashMap;
use num_bigint::BigUint;

use crate::board::Board;
use crate::types::{Direction, Point};

use super::{BoardSolver, SearchConfig, SolveError};

type FastHasher = BuildHasherDefault<ahash::AHasher>;

/// Heuristic-guided variant of the meet-in-the-middle search.
///
/// Each frontier is a priority queue ordered by
/// `steps + weight * heuristic(state, side goal)` where the heuristic sums
/// per-tile Manhattan distances. Side membership lives in one shared
/// dictionary with signed step counts: positive entries were discovered from
/// the source, negative from the target, and a neighbor carrying the opposite
/// sign is the meeting edge.
#[derive(Debug, Clone, Copy, Default)]
pub struct BidirectionalPrioritySolver {
    config: SearchConfig,
}

impl BidirectionalPrioritySolver {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }
}

impl BoardSolver for BidirectionalPrioritySolver {
    fn solution(&self, board: &Board, target: &Board) -> Result<Vec<Point>, SolveError> {
        Search::new(board, target, self.config).run()
    }
}

#[derive(Debug, Clone, Copy)]
enum Side {
    Source,
    Target,
}

#[derive(Debug, Clone)]
struct PathEntry {
    previous: Option<BigUint>,
    /// Depth + 1 with the sign encoding the discovering side.
    steps: i32,
}

#[derive(Debug, Clone)]
struct Candidate {
    priority: f64,
    rank: BigUint,
}

// BinaryHeap is a max-heap; order candidates by descending priority (and a
// rank tiebreak for determinism) to pop the cheapest first.
impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.rank.cmp(&self.rank))
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

struct Search<'a> {
    board: &'a Board,
    target: &'a Board,
    config: SearchConfig,
    visited: HashMap<BigUint, PathEntry, FastHasher>,
    source_open: BinaryHeap<Candidate>,
    target_open: BinaryHeap<Candidate>,
}

impl<'a> Search<'a> {
    fn new(board: &'a Board, target: &'a Board, config: SearchConfig) -> Self {
        Self {
            board,
            target,
            config,
            visited: HashMap::default(),
            source_open: BinaryHeap::new(),
            target_open: BinaryHeap::new(),
        }
    }

    fn run(mut self) -> Result<Vec<Point>, SolveError> {
        let source_rank = self.board.rank();
        let target_rank = self.target.rank();
        if source_rank == target_rank {
            return Ok(Vec::new());
        }
        self.visited.insert(
            source_rank.clone(),
            PathEntry {
                previous: None,
                steps: 1,
            },
        );
        self.visited.insert(
            target_rank.clone(),
            PathEntry {
                previous: None,
                steps: -1,
            },
        );
        self.source_open.push(Candidate {
            priority: 0.0,
            rank: source_rank,
        });
        self.target_open.push(Candidate {
            priority: 0.0,
            rank: target_rank,
        });

        while !self.source_open.is_empty() && !self.target_open.is_empty() {
            let side = if !self.config.bidirectional
                || self.source_open.len() <= self.target_open.len()
            {
                Side::Source
            } else {
                Side::Target
            };
            if let Some((source_last, target_first)) = self.extend(side) {
                return Ok(self.reconstruct(&source_last, &target_first));
            }
        }
        Err(SolveError::NoSolution)
    }

    /// Expand the cheapest state on `side`; on a meeting edge returns the
    /// pair (last source-side rank, first target-side rank).
    fn extend(&mut self, side: Side) -> Option<(BigUint, BigUint)> {
        let popped = match side {
            Side::Source => self.source_open.pop(),
            Side::Target => self.target_open.pop(),
        }?;
        let rank = popped.rank;
        let steps = self
            .visited
            .get(&rank)
            .expect("expanded rank missing from dictionary")
            .steps;
        let sign = steps.signum();
        let current = Board::from_rank(self.board.width(), self.board.height(), &rank);
        let goal = match side {
            Side::Source => self.target,
            Side::Target => self.board,
        };

        for dir in Direction::ALL {
            let cell = current.cell_toward(dir);
            if !current.contains(cell) {
                continue;
            }
            let mut next = current.clone();
            next.move_to(cell);
            let neighbor = next.rank();
            if let Some(seen) = self.visited.get(&neighbor) {
                if seen.steps.signum() == sign {
                    continue;
                }
                return Some(if sign > 0 {
                    (rank, neighbor)
                } else {
                    (neighbor, rank)
                });
            }
            let next_steps = steps + sign;
            let priority = f64::from(next_steps.abs())
                + self.config.weight * f64::from(heuristic(&next, goal));
            self.visited.insert(
                neighbor.clone(),
                PathEntry {
                    previous: Some(rank.clone()),
                    steps: next_steps,
                },
            );
            let candidate = Candidate {
                priority,
                rank: neighbor,
            };
            match side {
                Side::Source => self.source_open.push(candidate),
                Side::Target => self.target_open.push(candidate),
            }
        }
        None
    }

    /// Blank-destination cells of every state along the joined chains: source
    /// ancestry replayed forward (root excluded), the crossing state, then
    /// the target ancestry down to the target itself.
    fn reconstruct(&self, source_last: &BigUint, target_first: &BigUint) -> Vec<Point> {
        let (w, h) = (self.board.width(), self.board.height());

        let mut chain = vec![source_last.clone()];
        let mut previous = self.entry(source_last).previous.clone();
        while let Some(rank) = previous {
            previous = self.entry(&rank).previous.clone();
            chain.push(rank);
        }

        let mut cells = Vec::new();
        for rank in chain.iter().rev().skip(1) {
            cells.push(Board::from_rank(w, h, rank).empty_cell());
        }
        cells.push(Board::from_rank(w, h, target_first).empty_cell());
        let mut previous = self.entry(target_first).previous.clone();
        while let Some(rank) = previous {
            cells.push(Board::from_rank(w, h, &rank).empty_cell());
            previous = self.entry(&rank).previous.clone();
        }
        cells
    }

    fn entry(&self, rank: &BigUint) -> &PathEntry {
        self.visited
            .get(rank)
            .expect("ancestry rank missing from dictionary")
    }
}

/// Sum of per-tile Manhattan distances between `state` and `goal`, blank
/// excluded. Weighted by `SearchConfig::weight` this is a directional bias,
/// not an admissible bound.
fn heuristic(state: &Board, goal: &Board) -> u32 {
    let blank = (state.size() - 1) as u16;
    let mut total: u32 = 0;
    for label in 0..blank {
        let a = state.cell_of(label);
        let b = goal.cell_of(label);
        total += a.x.abs_diff(b.x) + a.y.abs_diff(b.y);
    }
    total
}
