//! Parallel evaluation of independent jobs against one universe.
//!
//! Evaluation never mutates the universe, so jobs share it by reference and
//! run on the rayon pool. Results come back in job order and match what a
//! sequential loop would produce.

use rayon::prelude::*;
use tracing::debug;

use crate::candidates::{ObjectSet, Partition};
use crate::condition::ConditionRef;
use crate::context::{EvalMode, ScriptingContext};
use crate::error::EvalResult;
use crate::ids::ObjectId;
use crate::universe::Universe;

/// One condition to evaluate, with its context roles and candidate pool.
#[derive(Debug, Clone)]
pub struct EvalJob {
    pub condition: ConditionRef,
    pub source: Option<ObjectId>,
    pub target: Option<ObjectId>,
    /// Candidates to test; every object in the universe when `None`.
    pub pool: Option<ObjectSet>,
}

impl EvalJob {
    pub fn new(condition: impl Into<ConditionRef>) -> Self {
        Self {
            condition: condition.into(),
            source: None,
            target: None,
            pool: None,
        }
    }

    pub fn with_source(mut self, source: ObjectId) -> Self {
        self.source = Some(source);
        self
    }

    pub fn with_target(mut self, target: ObjectId) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_pool(mut self, pool: ObjectSet) -> Self {
        self.pool = Some(pool);
        self
    }

    fn run(&self, universe: &Universe, mode: EvalMode) -> EvalResult<Partition> {
        let mut ctx = ScriptingContext::new(universe).with_mode(mode);
        if let Some(source) = self.source {
            ctx = ctx.with_source(source);
        }
        if let Some(target) = self.target {
            ctx = ctx.with_target(target);
        }
        let pool = self
            .pool
            .clone()
            .unwrap_or_else(|| universe.all_object_ids());
        self.condition.partition(&ctx, pool)
    }
}

/// Evaluate every job in parallel. The output has one entry per job, in the
/// same order.
pub fn evaluate_batch(
    universe: &Universe,
    mode: EvalMode,
    jobs: &[EvalJob],
) -> Vec<EvalResult<Partition>> {
    debug!(jobs = jobs.len(), ?mode, "evaluating batch");
    jobs.par_iter().map(|job| job.run(universe, mode)).collect()
}
