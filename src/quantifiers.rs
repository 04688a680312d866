//! `Number`, `Turn` and `SortedNumberOf`.
//!
//! `Number` and `SortedNumberOf` evaluate their inner condition over the whole
//! universe, not over the caller's pool. `Number` then lets either every
//! candidate through or none; `SortedNumberOf` picks a ranked or random subset
//! of the inner matches and lets through only candidates in that subset.

use std::collections::BTreeMap;

use rand::seq::SliceRandom;
use tracing::debug;

use crate::candidates::ObjectSet;
use crate::condition::Condition;
use crate::context::ScriptingContext;
use crate::error::EvalResult;
use crate::evaluator::partition_by;
use crate::ids::ObjectId;
use crate::random::seeded_rng;
use crate::types::{SearchDomain, SortingMethod};
use crate::value::resolve_range;

/// Bin width for grouping sort keys under `SortingMethod::Mode`.
///
/// Keys are grouped by `round(key / MODE_KEY_RESOLUTION)`, so keys closer than
/// this usually land in the same bin. Bin indices are `i64`, so keys beyond
/// about `±9.2e12` saturate into the outermost bins.
pub const MODE_KEY_RESOLUTION: f64 = 1e-6;

impl Condition {
    pub(crate) fn eval_quantifier(
        &self,
        ctx: &ScriptingContext<'_>,
        matches: &mut ObjectSet,
        non_matches: &mut ObjectSet,
        domain: SearchDomain,
    ) -> EvalResult<()> {
        match self {
            Condition::Number { low, high, condition }
                if condition.fixed_under(ctx)
                    && low.iter().chain(high).all(|v| v.fixed_under(ctx)) =>
            {
                let passes = self.number_passes(ctx)?;
                debug!(condition = self.name(), passes, "cardinality gate evaluated once");
                partition_by(matches, non_matches, domain, |_| Ok(passes))
            }
            Condition::SortedNumberOf {
                number,
                sort_key,
                condition,
                ..
            } if condition.fixed_under(ctx)
                && number.fixed_under(ctx)
                && sort_key
                    .as_ref()
                    .is_none_or(|key| ctx.root_candidate_id().is_some() || key.root_candidate_invariant()) =>
            {
                let selected = self.sorted_selection(ctx)?;
                debug!(
                    condition = self.name(),
                    selected = selected.len(),
                    "ranked selection evaluated once"
                );
                partition_by(matches, non_matches, domain, |candidate| {
                    Ok(selected.contains(candidate))
                })
            }
            _ => self.eval_by_match(ctx, matches, non_matches, domain),
        }
    }

    pub(crate) fn match_quantifier(&self, ctx: &ScriptingContext<'_>) -> EvalResult<bool> {
        let name = self.name();
        let Some(candidate) = ctx.local_candidate(name)? else {
            return Ok(false);
        };
        match self {
            Condition::Number { .. } => self.number_passes(ctx),
            Condition::Turn { low, high } => Ok(resolve_range(low.as_ref(), high.as_ref(), ctx, name)?
                .is_some_and(|range| range.contains_half_open(f64::from(ctx.current_turn())))),
            Condition::SortedNumberOf { .. } => Ok(self.sorted_selection(ctx)?.contains(candidate.id)),
            _ => Ok(false),
        }
    }

    /// Returns true if the inner condition's match count is in `[low, high)`.
    fn number_passes(&self, ctx: &ScriptingContext<'_>) -> EvalResult<bool> {
        let Condition::Number {
            low,
            high,
            condition,
        } = self
        else {
            return Ok(false);
        };
        let Some(range) = resolve_range(low.as_ref(), high.as_ref(), ctx, self.name())? else {
            return Ok(false);
        };
        let count = condition.universe_matches(ctx)?.len();
        Ok(range.contains_half_open(count as f64))
    }

    /// The subset of the inner condition's matches picked by `SortedNumberOf`.
    fn sorted_selection(&self, ctx: &ScriptingContext<'_>) -> EvalResult<ObjectSet> {
        let Condition::SortedNumberOf {
            number,
            sort_key,
            method,
            condition,
        } = self
        else {
            return Ok(ObjectSet::new());
        };
        let name = self.name();
        let eligible = condition.universe_matches(ctx)?;
        let wanted = number.resolve_int(ctx, name)?.unwrap_or(0).max(0);
        let wanted = usize::try_from(wanted).unwrap_or(usize::MAX);
        if wanted >= eligible.len() {
            return Ok(eligible);
        }
        if wanted == 0 {
            return Ok(ObjectSet::new());
        }

        let mut rng = seeded_rng(ctx, &self.dump(), None);

        // Keys in ascending id order; `None` for objects whose key is missing
        // or not finite.
        let keyed: Vec<(ObjectId, Option<f64>)> = match sort_key {
            Some(key) => eligible
                .iter()
                .map(|id| {
                    let value = key.resolve(&ctx.with_local_candidate(id), name)?;
                    Ok((id, value.filter(|v| v.is_finite())))
                })
                .collect::<EvalResult<_>>()?,
            None => eligible.iter().map(|id| (id, None)).collect(),
        };

        let picked: Vec<ObjectId> = match method {
            SortingMethod::Random => {
                let mut ids = eligible.to_vec();
                ids.shuffle(&mut rng);
                ids.truncate(wanted);
                ids
            }
            SortingMethod::Max | SortingMethod::Min => {
                let (mut ranked, unkeyed): (Vec<&_>, Vec<&_>) =
                    keyed.iter().partition(|(_, key)| key.is_some());
                // Stable sort, so equal keys stay in ascending id order.
                ranked.sort_by(|(_, a), (_, b)| {
                    let (a, b) = (a.unwrap_or_default(), b.unwrap_or_default());
                    if *method == SortingMethod::Max {
                        b.total_cmp(&a)
                    } else {
                        a.total_cmp(&b)
                    }
                });
                ranked
                    .into_iter()
                    .chain(unkeyed)
                    .map(|&(id, _)| id)
                    .take(wanted)
                    .collect()
            }
            SortingMethod::Mode => {
                let mut bins: BTreeMap<i64, Vec<ObjectId>> = BTreeMap::new();
                for (id, key) in &keyed {
                    match (sort_key, key) {
                        (None, _) => bins.entry(0).or_default().push(*id),
                        (Some(_), Some(key)) => bins
                            .entry((key / MODE_KEY_RESOLUTION).round() as i64)
                            .or_default()
                            .push(*id),
                        (Some(_), None) => {}
                    }
                }
                // Most populous bin; ties go to the lowest key.
                let mut best: Option<&Vec<ObjectId>> = None;
                for bin in bins.values() {
                    if best.is_none_or(|b| bin.len() > b.len()) {
                        best = Some(bin);
                    }
                }
                let mut ids = best.cloned().unwrap_or_default();
                ids.shuffle(&mut rng);
                ids.truncate(wanted);
                ids
            }
        };
        Ok(picked.into_iter().collect())
    }
}
