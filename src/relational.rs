//! Predicates that relate a candidate to the objects matching a subcondition:
//! containment, spatial proximity, starlane feasibility and resource supply.
//!
//! When the subcondition and value parameters come out the same for every
//! candidate, the subcondition is evaluated once per `eval` call and each
//! candidate is checked against that shared result. Otherwise the
//! subcondition is evaluated again for every candidate.
//!
//! `WithinDistance` and `WithinStarlaneJumps` compare every candidate against
//! every matched object, so their cost grows with the product of the pool and
//! the matched set. Scripts should narrow the pool with cheaper conditions
//! first.

use std::collections::BTreeSet;

use tracing::debug;

use crate::candidates::ObjectSet;
use crate::condition::Condition;
use crate::context::ScriptingContext;
use crate::error::EvalResult;
use crate::evaluator::partition_by;
use crate::ids::{EmpireId, ObjectId};
use crate::object::Object;
use crate::predicates::resolve_empire;
use crate::types::{ObjectKind, SearchDomain};

/// Shared result of a relational node's subcondition, ready for testing
/// candidates against.
#[derive(Debug)]
enum Lookup {
    /// Matched subcondition objects.
    Contains(ObjectSet),
    ContainedBy(ObjectSet),
    /// Positions of matched objects, and the reach.
    WithinDistance {
        distance: f64,
        positions: Vec<(f64, f64)>,
    },
    /// Systems within reach of a matched object.
    WithinJumps(BTreeSet<ObjectId>),
    /// Systems holding a matched object.
    CanAddLanes(BTreeSet<ObjectId>),
    CanRemoveLanes(BTreeSet<ObjectId>),
    SupplyConnected {
        empire: EmpireId,
        systems: BTreeSet<ObjectId>,
    },
    /// A parameter could not be resolved.
    Nothing,
}

impl Condition {
    pub(crate) fn eval_relational(
        &self,
        ctx: &ScriptingContext<'_>,
        matches: &mut ObjectSet,
        non_matches: &mut ObjectSet,
        domain: SearchDomain,
    ) -> EvalResult<()> {
        let shared = self.children().iter().all(|c| c.fixed_under(ctx))
            && self.values().iter().all(|v| v.fixed_under(ctx));
        if !shared {
            return self.eval_by_match(ctx, matches, non_matches, domain);
        }

        let lookup = self.build_lookup(ctx, None)?;
        debug!(condition = self.name(), "subcondition evaluated once for all candidates");
        partition_by(matches, non_matches, domain, |candidate| {
            Ok(ctx
                .universe
                .object(candidate)
                .is_some_and(|object| lookup.admits(ctx, object)))
        })
    }

    pub(crate) fn match_relational(&self, ctx: &ScriptingContext<'_>) -> EvalResult<bool> {
        let Some(candidate) = ctx.local_candidate(self.name())? else {
            return Ok(false);
        };
        let lookup = self.build_lookup(ctx, Some(candidate))?;
        Ok(lookup.admits(ctx, candidate))
    }

    /// Evaluate the subcondition and resolve parameters.
    ///
    /// With a candidate, containment predicates only evaluate the
    /// subcondition over objects related to it.
    fn build_lookup(
        &self,
        ctx: &ScriptingContext<'_>,
        candidate: Option<&Object>,
    ) -> EvalResult<Lookup> {
        let universe = ctx.universe;
        let name = self.name();
        let systems_of = |matched: &ObjectSet| -> BTreeSet<ObjectId> {
            matched
                .iter()
                .filter_map(|id| universe.object(id))
                .filter_map(|object| object.system_id)
                .collect()
        };

        let lookup = match self {
            Condition::Contains(condition) => {
                let pool = match candidate {
                    Some(candidate) => universe.contents_of(candidate.id),
                    None => universe.all_object_ids(),
                };
                Lookup::Contains(condition.partition(ctx, pool)?.matches)
            }
            Condition::ContainedBy(condition) => {
                let pool = match candidate {
                    Some(candidate) => universe.containers_of(candidate.id).into_iter().collect(),
                    None => universe.all_object_ids(),
                };
                Lookup::ContainedBy(condition.partition(ctx, pool)?.matches)
            }
            Condition::WithinDistance {
                distance,
                condition,
            } => {
                let Some(distance) = distance.resolve(ctx, name)? else {
                    return Ok(Lookup::Nothing);
                };
                let positions = condition
                    .universe_matches(ctx)?
                    .iter()
                    .filter_map(|id| universe.object(id))
                    .map(|object| (object.x, object.y))
                    .collect();
                Lookup::WithinDistance {
                    distance,
                    positions,
                }
            }
            Condition::WithinStarlaneJumps { jumps, condition } => {
                let Some(jumps) = jumps.resolve_int(ctx, name)?.filter(|j| *j >= 0) else {
                    return Ok(Lookup::Nothing);
                };
                let starts = systems_of(&condition.universe_matches(ctx)?);
                let max_jumps = u32::try_from(jumps).unwrap_or(u32::MAX);
                let reached = universe.starlanes.systems_within_jumps(starts, max_jumps);
                Lookup::WithinJumps(reached.into_keys().collect())
            }
            Condition::CanAddStarlaneConnection(condition) => {
                Lookup::CanAddLanes(systems_of(&condition.universe_matches(ctx)?))
            }
            Condition::CanRemoveStarlaneConnection(condition) => {
                Lookup::CanRemoveLanes(systems_of(&condition.universe_matches(ctx)?))
            }
            Condition::ResourceSupplyConnectedByEmpire { empire, condition } => {
                let Some(empire) = resolve_empire(empire, ctx, name)? else {
                    return Ok(Lookup::Nothing);
                };
                Lookup::SupplyConnected {
                    empire,
                    systems: systems_of(&condition.universe_matches(ctx)?),
                }
            }
            _ => Lookup::Nothing,
        };
        Ok(lookup)
    }
}

impl Lookup {
    fn admits(&self, ctx: &ScriptingContext<'_>, candidate: &Object) -> bool {
        let universe = ctx.universe;
        match self {
            Lookup::Contains(matched) => !universe.contents_of(candidate.id).is_disjoint(matched),
            Lookup::ContainedBy(matched) => universe
                .containers_of(candidate.id)
                .into_iter()
                .any(|container| matched.contains(container)),
            Lookup::WithinDistance {
                distance,
                positions,
            } => positions
                .iter()
                .any(|(x, y)| (candidate.x - x).hypot(candidate.y - y) <= *distance),
            Lookup::WithinJumps(reached) => candidate
                .system_id
                .is_some_and(|system| reached.contains(&system)),
            Lookup::CanAddLanes(systems) => {
                candidate.kind == ObjectKind::System
                    && !systems.is_empty()
                    && systems
                        .iter()
                        .all(|&other| universe.starlanes.can_add_lane(candidate.id, other))
            }
            Lookup::CanRemoveLanes(systems) => {
                candidate.kind == ObjectKind::System
                    && !systems.is_empty()
                    && systems
                        .iter()
                        .all(|&other| universe.starlanes.can_remove_lane(candidate.id, other))
            }
            Lookup::SupplyConnected { empire, systems } => {
                let (Some(empire), Some(system)) = (universe.empire(*empire), candidate.system_id)
                else {
                    return false;
                };
                systems
                    .iter()
                    .any(|&other| empire.resource_connected(system, other))
            }
            Lookup::Nothing => false,
        }
    }
}
