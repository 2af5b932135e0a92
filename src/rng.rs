use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;

/// Deterministic RNG factory for a (seed, width, height) triple.
///
/// Implementation detail:
/// - Derives a per-board 64-bit seed from the user seed and the dimensions.
/// - Uses PCG 64-bit generator (rand_pcg::Pcg64) for reproducible sequences.
/// - Returned RNG is deterministic and reproducible across runs when inputs
///   are equal; `Board::randomize` accepts any `Rng` so callers may substitute
///   an entropy-seeded generator.
#[inline]
pub fn rng_for_board(seed: u64, width: i32, height: i32) -> impl Rng {
    let derived: u64 = seed ^ ((width as u64) << 32) ^ (height as u64);
    Pcg64::seed_from_u64(derived)
}
