//! Deterministic random source for stochastic predicates.
//!
//! Every draw is seeded from game state alone: the game seed, the current
//! turn, the bound source object, the node's position among combinator
//! siblings, a structural salt naming the condition node, and optionally the
//! candidate being tested. Peers holding the same universe therefore draw the
//! same numbers regardless of thread scheduling or evaluation order.

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::context::ScriptingContext;
use crate::ids::ObjectId;

/// Build the generator for one stochastic decision.
pub fn seeded_rng(ctx: &ScriptingContext<'_>, salt: &str, candidate: Option<ObjectId>) -> StdRng {
    let universe = ctx.universe;
    let mut hasher = blake3::Hasher::new();
    hasher.update(&universe.game_seed.to_le_bytes());
    hasher.update(&universe.current_turn.to_le_bytes());
    match ctx.source_id() {
        Some(source) => hasher.update(&[1]).update(&source.0.to_le_bytes()),
        None => hasher.update(&[0]),
    };
    hasher.update(&ctx.branch().to_le_bytes());
    hasher.update(salt.as_bytes());
    if let Some(candidate) = candidate {
        hasher.update(&candidate.0.to_le_bytes());
    }
    let digest = hasher.finalize();
    let mut head = [0u8; 8];
    head.copy_from_slice(&digest.as_bytes()[..8]);
    StdRng::seed_from_u64(u64::from_le_bytes(head))
}
