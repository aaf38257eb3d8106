//! Per-node RNG sub-streams for candidate admission.
//!
//! Every node draws from its own [`SmallRng`] keyed by `(seed, node)`, so the
//! generated edge set does not depend on batch boundaries, processing order or
//! which rayon worker scans the node.

use rand::{SeedableRng, rngs::SmallRng};

/// SplitMix64 increment (the 64-bit golden ratio) used for per-node seed
/// derivation.
const NODE_SEED_SPACING: u64 = 0x9E37_79B9_7F4A_7C15;
const SPLITMIX_MULT_A: u64 = 0xBF58_476D_1CE4_E5B9;
const SPLITMIX_MULT_B: u64 = 0x94D0_49BB_1331_11EB;

#[inline]
pub(super) fn mix_node_seed(base_seed: u64, node: usize) -> u64 {
    splitmix64(base_seed ^ ((node as u64).wrapping_add(1)).wrapping_mul(NODE_SEED_SPACING))
}

#[inline]
const fn splitmix64(mut state: u64) -> u64 {
    state = state.wrapping_add(NODE_SEED_SPACING);
    state = (state ^ (state >> 30)).wrapping_mul(SPLITMIX_MULT_A);
    state = (state ^ (state >> 27)).wrapping_mul(SPLITMIX_MULT_B);
    state ^ (state >> 31)
}

pub(super) fn node_rng(base_seed: u64, node: usize) -> SmallRng {
    SmallRng::seed_from_u64(mix_node_seed(base_seed, node))
}
