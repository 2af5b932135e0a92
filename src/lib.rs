#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)] // may be revisited
#![allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap, clippy::cast_sign_loss)] // i32 cell coordinates index usize buffers throughout

pub mod types;
pub mod fenwick;
pub mod codec;
pub mod board;
pub mod solvability;
pub mod rng;
pub mod persist;

pub mod solver;

// Re-exports: stable minimal API surface for external callers
pub use crate::board::Board;
pub use crate::persist::{PersistError, SavedGame, SAVE_MAGIC, SAVE_VERSION};
pub use crate::rng::rng_for_board;
pub use crate::solvability::{inversion_parity, is_reachable};
pub use crate::solver::{
    BidirectionalBfsSolver, BidirectionalPrioritySolver, BoardSolver, ReductionSolver,
    SearchConfig, SolveError,
};
pub use crate::types::{Direction, Point};
