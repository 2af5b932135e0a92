use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, ValueEnum};
use npuzzle::{
    rng_for_board, BidirectionalBfsSolver, BidirectionalPrioritySolver, Board, BoardSolver,
    ReductionSolver, SavedGame, SearchConfig,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SolverOpt {
    /// Layer reduction (search-free, fast, non-optimal)
    Reduction,
    /// Bidirectional breadth-first search (optimal, memory-hungry)
    Bfs,
    /// Weighted bidirectional best-first search
    Priority,
}

#[derive(Debug, Parser)]
#[command(name = "solve", about = "Sliding puzzle scrambler and solver")]
struct Args {
    /// Board width in cells
    #[arg(long, default_value_t = 3)]
    width: i32,

    /// Board height in cells
    #[arg(long, default_value_t = 3)]
    height: i32,

    /// Scramble seed (deterministic per width/height)
    #[arg(long, default_value_t = 0x00C0FFEEu64)]
    seed: u64,

    /// Solver backend
    #[arg(long, value_enum, default_value_t = SolverOpt::Reduction)]
    solver: SolverOpt,

    /// Heuristic weight for the priority solver
    #[arg(long, default_value_t = 2.0)]
    weight: f64,

    /// Expand only from the scrambled side (priority solver)
    #[arg(long, default_value_t = false)]
    unidirectional: bool,

    /// Write the scrambled position as a saved game before solving
    #[arg(long)]
    save: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    if args.width < 2 || args.height < 2 {
        return Err(format!(
            "board must be at least 2x2, got {}x{}",
            args.width, args.height
        )
        .into());
    }

    let target = Board::solved(args.width, args.height);
    let mut board = target.clone();
    let mut rng = rng_for_board(args.seed, args.width, args.height);
    board.randomize(&target, &mut rng);
    println!(
        "[solve] Scrambled {}x{} board, seed {:#010x}, rank {}.",
        args.width,
        args.height,
        args.seed,
        board.rank()
    );

    if let Some(path) = &args.save {
        let saved = SavedGame::from_board(&board, String::new(), 0, 0);
        saved.save(path).map_err(|e| format!("Save error: {e}"))?;
        println!("[solve] Wrote saved game to {}.", path.display());
    }

    let solver: Box<dyn BoardSolver> = match args.solver {
        SolverOpt::Reduction => Box::new(ReductionSolver),
        SolverOpt::Bfs => Box::new(BidirectionalBfsSolver),
        SolverOpt::Priority => Box::new(BidirectionalPrioritySolver::new(SearchConfig {
            bidirectional: !args.unidirectional,
            weight: args.weight,
        })),
    };

    let started = Instant::now();
    let moves = solver.solution(&board, &target)?;
    let elapsed = started.elapsed();
    println!(
        "[solve] Found {} moves in {:.3}s.",
        moves.len(),
        elapsed.as_secs_f64()
    );

    let mut replay = board.clone();
    for &cell in &moves {
        replay.move_to(cell);
    }
    if replay == target {
        println!("[solve] Replay verified against the solved position.");
    } else {
        return Err("replay did not reach the solved position".into());
    }

    Ok(())
}
