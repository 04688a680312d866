//! The partitioning protocol shared by every condition node.
//!
//! `eval` moves candidates between a matches set and a non-matches set.
//! The search domain names which of the two is under test: in the
//! `NonMatches` domain candidates that pass move into matches, in the
//! `Matches` domain candidates that fail move into non-matches. Nothing is
//! ever created or dropped, on success or on error.
//!
//! Every node has a per-candidate `matches` test. `And`, `Or` and `Not`
//! work directly on sets; quantifier and relational nodes take a set-wide
//! shortcut when their parameters allow it. Everything else partitions by
//! testing each candidate in turn.

use tracing::debug;

use crate::candidates::{ObjectSet, Partition};
use crate::condition::{Condition, ConditionRef};
use crate::context::ScriptingContext;
use crate::error::EvalResult;
use crate::ids::ObjectId;
use crate::types::SearchDomain;

/// Remaining stack below which evaluation moves to a fresh segment.
const STACK_RED_ZONE: usize = 64 * 1024;
/// Size of each extra stack segment.
const STACK_SEGMENT: usize = 1024 * 1024;

impl Condition {
    /// Partition candidates according to this condition.
    ///
    /// See the module docs for the meaning of `domain`. The two sets are
    /// expected to be disjoint.
    pub fn eval(
        &self,
        ctx: &ScriptingContext<'_>,
        matches: &mut ObjectSet,
        non_matches: &mut ObjectSet,
        domain: SearchDomain,
    ) -> EvalResult<()> {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_SEGMENT, || {
            self.eval_node(ctx, matches, non_matches, domain)
        })
    }

    /// Test the local candidate bound in `ctx`.
    pub fn matches(&self, ctx: &ScriptingContext<'_>) -> EvalResult<bool> {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_SEGMENT, || self.match_node(ctx))
    }

    /// Evaluate over `pool`, starting with every candidate unmatched.
    pub fn eval_pool(&self, ctx: &ScriptingContext<'_>, pool: ObjectSet) -> EvalResult<Partition> {
        let pool_size = pool.len();
        let partition = self.partition(ctx, pool)?;
        debug!(
            condition = self.name(),
            pool = pool_size,
            matched = partition.matches.len(),
            "evaluated condition"
        );
        Ok(partition)
    }

    /// Every object in the universe that matches.
    pub fn eval_universe(&self, ctx: &ScriptingContext<'_>) -> EvalResult<ObjectSet> {
        Ok(self.eval_pool(ctx, ctx.universe.all_object_ids())?.matches)
    }

    /// Membership test for one candidate.
    ///
    /// Routed through the set protocol, so set-wide strategies give the same
    /// answer as a pool containing only this candidate.
    pub fn eval_one(&self, ctx: &ScriptingContext<'_>, candidate: ObjectId) -> EvalResult<bool> {
        let partition = self.partition(ctx, ObjectSet::from([candidate]))?;
        Ok(partition.matches.contains(candidate))
    }

    /// Partition without logging, for nested evaluation.
    pub(crate) fn partition(
        &self,
        ctx: &ScriptingContext<'_>,
        pool: ObjectSet,
    ) -> EvalResult<Partition> {
        let mut matches = ObjectSet::new();
        let mut non_matches = pool;
        self.eval(ctx, &mut matches, &mut non_matches, SearchDomain::NonMatches)?;
        Ok(Partition {
            matches,
            non_matches,
        })
    }

    /// Matches of this condition across the whole universe, without logging.
    pub(crate) fn universe_matches(&self, ctx: &ScriptingContext<'_>) -> EvalResult<ObjectSet> {
        Ok(self.partition(ctx, ctx.universe.all_object_ids())?.matches)
    }

    /// Returns true if evaluating this subcondition once in `ctx` is the same
    /// as evaluating it once per candidate in contexts derived from `ctx`.
    ///
    /// That holds when the root candidate is already bound, since descent
    /// keeps it, or when the result never depends on it.
    pub(crate) fn fixed_under(&self, ctx: &ScriptingContext<'_>) -> bool {
        ctx.root_candidate_id().is_some() || self.root_candidate_invariant()
    }

    fn eval_node(
        &self,
        ctx: &ScriptingContext<'_>,
        matches: &mut ObjectSet,
        non_matches: &mut ObjectSet,
        domain: SearchDomain,
    ) -> EvalResult<()> {
        match self {
            Condition::And(children) => eval_and(children, ctx, matches, non_matches, domain),
            Condition::Or(children) => eval_or(children, ctx, matches, non_matches, domain),
            // Swap the roles of the two sets and flip the domain.
            Condition::Not(child) => child.eval(ctx, non_matches, matches, domain.flipped()),
            Condition::Number { .. } | Condition::SortedNumberOf { .. } => {
                self.eval_quantifier(ctx, matches, non_matches, domain)
            }
            Condition::Contains(_)
            | Condition::ContainedBy(_)
            | Condition::WithinDistance { .. }
            | Condition::WithinStarlaneJumps { .. }
            | Condition::CanAddStarlaneConnection(_)
            | Condition::CanRemoveStarlaneConnection(_)
            | Condition::ResourceSupplyConnectedByEmpire { .. } => {
                self.eval_relational(ctx, matches, non_matches, domain)
            }
            _ => self.eval_by_match(ctx, matches, non_matches, domain),
        }
    }

    /// Default strategy: test each candidate of the active pool.
    pub(crate) fn eval_by_match(
        &self,
        ctx: &ScriptingContext<'_>,
        matches: &mut ObjectSet,
        non_matches: &mut ObjectSet,
        domain: SearchDomain,
    ) -> EvalResult<()> {
        partition_by(matches, non_matches, domain, |candidate| {
            self.matches(&ctx.with_local_candidate(candidate))
        })
    }

    fn match_node(&self, ctx: &ScriptingContext<'_>) -> EvalResult<bool> {
        match self {
            Condition::And(_) | Condition::Or(_) | Condition::Not(_) => {
                let Some(candidate) = ctx.local_candidate(self.name())? else {
                    return Ok(false);
                };
                let mut matches = ObjectSet::new();
                let mut non_matches = ObjectSet::from([candidate.id]);
                self.eval_node(ctx, &mut matches, &mut non_matches, SearchDomain::NonMatches)?;
                Ok(matches.contains(candidate.id))
            }
            Condition::Number { .. } | Condition::Turn { .. } | Condition::SortedNumberOf { .. } => {
                self.match_quantifier(ctx)
            }
            Condition::Contains(_)
            | Condition::ContainedBy(_)
            | Condition::WithinDistance { .. }
            | Condition::WithinStarlaneJumps { .. }
            | Condition::CanAddStarlaneConnection(_)
            | Condition::CanRemoveStarlaneConnection(_)
            | Condition::ResourceSupplyConnectedByEmpire { .. } => self.match_relational(ctx),
            _ => self.match_property(ctx),
        }
    }
}

/// Move candidates of the active pool according to `test`.
///
/// Every decision is made before any candidate moves, so an error leaves both
/// sets untouched.
pub(crate) fn partition_by(
    matches: &mut ObjectSet,
    non_matches: &mut ObjectSet,
    domain: SearchDomain,
    mut test: impl FnMut(ObjectId) -> EvalResult<bool>,
) -> EvalResult<()> {
    let pool: &ObjectSet = match domain {
        SearchDomain::NonMatches => &*non_matches,
        SearchDomain::Matches => &*matches,
    };
    let mut moving = Vec::new();
    for candidate in pool.iter() {
        let passed = test(candidate)?;
        let moves = match domain {
            SearchDomain::NonMatches => passed,
            SearchDomain::Matches => !passed,
        };
        if moves {
            moving.push(candidate);
        }
    }

    let (from, to) = match domain {
        SearchDomain::NonMatches => (non_matches, matches),
        SearchDomain::Matches => (matches, non_matches),
    };
    for candidate in moving {
        from.remove(candidate);
        to.insert(candidate);
    }
    Ok(())
}

// ============================================================================
// Combinators
// ============================================================================

/// Narrowing intersection. The first child picks candidates out of the pool,
/// each later child only re-tests what is still standing.
fn eval_and(
    children: &[ConditionRef],
    ctx: &ScriptingContext<'_>,
    matches: &mut ObjectSet,
    non_matches: &mut ObjectSet,
    domain: SearchDomain,
) -> EvalResult<()> {
    match domain {
        SearchDomain::Matches => {
            for (i, child) in children.iter().enumerate() {
                child.eval(&ctx.child(i), matches, non_matches, SearchDomain::Matches)?;
            }
            Ok(())
        }
        SearchDomain::NonMatches => {
            let Some((first, rest)) = children.split_first() else {
                // Vacuously true.
                matches.append(non_matches);
                return Ok(());
            };
            let mut passing = ObjectSet::new();
            let result = (|| -> EvalResult<()> {
                first.eval(&ctx.child(0), &mut passing, non_matches, SearchDomain::NonMatches)?;
                for (i, child) in rest.iter().enumerate() {
                    if passing.is_empty() {
                        break;
                    }
                    child.eval(&ctx.child(i + 1), &mut passing, non_matches, SearchDomain::Matches)?;
                }
                Ok(())
            })();
            match result {
                Ok(()) => {
                    matches.append(&mut passing);
                    Ok(())
                }
                Err(err) => {
                    non_matches.append(&mut passing);
                    Err(err)
                }
            }
        }
    }
}

/// Union. Each child only tests what no earlier child has accepted.
fn eval_or(
    children: &[ConditionRef],
    ctx: &ScriptingContext<'_>,
    matches: &mut ObjectSet,
    non_matches: &mut ObjectSet,
    domain: SearchDomain,
) -> EvalResult<()> {
    match domain {
        SearchDomain::NonMatches => {
            for (i, child) in children.iter().enumerate() {
                if non_matches.is_empty() {
                    break;
                }
                child.eval(&ctx.child(i), matches, non_matches, SearchDomain::NonMatches)?;
            }
            Ok(())
        }
        SearchDomain::Matches => {
            let Some((first, rest)) = children.split_first() else {
                // Vacuously false.
                non_matches.append(matches);
                return Ok(());
            };
            let mut rejected = ObjectSet::new();
            let result = (|| -> EvalResult<()> {
                first.eval(&ctx.child(0), matches, &mut rejected, SearchDomain::Matches)?;
                for (i, child) in rest.iter().enumerate() {
                    if rejected.is_empty() {
                        break;
                    }
                    child.eval(&ctx.child(i + 1), matches, &mut rejected, SearchDomain::NonMatches)?;
                }
                Ok(())
            })();
            match result {
                Ok(()) => {
                    non_matches.append(&mut rejected);
                    Ok(())
                }
                Err(err) => {
                    matches.append(&mut rejected);
                    Err(err)
                }
            }
        }
    }
}
