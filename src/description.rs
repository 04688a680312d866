//! Human-readable summaries of several conditions taken together, as shown
//! in tooltips for build and colonization requirements.

use std::fmt;

use crate::condition::{Condition, ConditionRef};
use crate::context::ScriptingContext;
use crate::error::EvalResult;
use crate::ids::ObjectId;

/// How the clauses of a description combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClauseList {
    /// Every clause must hold.
    AllOf,
    /// At least one clause must hold.
    OneOf,
}

impl ClauseList {
    fn heading(self) -> &'static str {
        match self {
            ClauseList::AllOf => "All of:",
            ClauseList::OneOf => "One of:",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DescribedClause {
    pub text: String,
    /// Whether the candidate satisfies this clause; `None` without a candidate.
    pub met: Option<bool>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConditionDescription {
    pub list: ClauseList,
    pub clauses: Vec<DescribedClause>,
    /// Whether the candidate satisfies the whole list; `None` without a
    /// candidate.
    pub verdict: Option<bool>,
}

/// Describe `conditions` as one implicit `And`.
///
/// Nested `And`s are flattened into a single "All of" list; a list that is a
/// single `Or` becomes a "One of" list of its children. Structurally equal
/// clauses are listed once. With a candidate, each clause is evaluated for it.
pub fn describe_conditions(
    conditions: &[ConditionRef],
    candidate: Option<ObjectId>,
    ctx: &ScriptingContext<'_>,
) -> EvalResult<ConditionDescription> {
    let mut flat: Vec<&ConditionRef> = Vec::new();
    for condition in conditions {
        flatten_and(condition, &mut flat);
    }

    let lone_or = match flat.as_slice() {
        &[only] => match &**only {
            Condition::Or(children) => Some(children),
            _ => None,
        },
        _ => None,
    };
    let (list, clauses): (ClauseList, Vec<&ConditionRef>) = match lone_or {
        Some(children) => (ClauseList::OneOf, children.iter().collect()),
        None => (ClauseList::AllOf, flat),
    };

    let mut unique: Vec<&ConditionRef> = Vec::new();
    for clause in clauses {
        if !unique.iter().any(|seen| ***seen == **clause) {
            unique.push(clause);
        }
    }

    let described = unique
        .into_iter()
        .map(|clause| {
            let met = candidate
                .map(|candidate| clause.eval_one(ctx, candidate))
                .transpose()?;
            Ok(DescribedClause {
                text: clause.description(false),
                met,
            })
        })
        .collect::<EvalResult<Vec<_>>>()?;

    let verdict = candidate.map(|_| {
        let mut met = described.iter().map(|clause| clause.met == Some(true));
        match list {
            ClauseList::AllOf => met.all(|m| m),
            ClauseList::OneOf => met.any(|m| m),
        }
    });

    Ok(ConditionDescription {
        list,
        clauses: described,
        verdict,
    })
}

fn flatten_and<'a>(condition: &'a ConditionRef, out: &mut Vec<&'a ConditionRef>) {
    match condition.as_ref() {
        Condition::And(children) => {
            for child in children {
                flatten_and(child, out);
            }
        }
        _ => out.push(condition),
    }
}

impl fmt::Display for ConditionDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.list.heading())?;
        for clause in &self.clauses {
            match clause.met {
                Some(true) => writeln!(f, "  {} (met)", clause.text)?,
                Some(false) => writeln!(f, "  {} (not met)", clause.text)?,
                None => writeln!(f, "  {}", clause.text)?,
            }
        }
        match self.verdict {
            Some(true) => write!(f, "Requirements met"),
            Some(false) => write!(f, "Requirements not met"),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::tests::sample_galaxy;
    use crate::types::{MeterType, ObjectType};
    use crate::value::Value;

    #[test]
    fn test_nested_ands_flatten_and_dedup() {
        let galaxy = sample_galaxy();
        let ctx = ScriptingContext::new(&galaxy.universe);
        let planet = Condition::of_type(ObjectType::Planet);
        let conditions = vec![
            Arc::new(Condition::and([planet.clone(), Condition::Capital])),
            Arc::new(planet),
        ];
        let description =
            describe_conditions(&conditions, None, &ctx).expect("description succeeds");
        assert_eq!(description.list, ClauseList::AllOf);
        let texts: Vec<_> = description.clauses.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, ["is a Planet", "is a capital"]);
        assert_eq!(description.verdict, None);
    }

    #[test]
    fn test_lone_or_becomes_one_of() {
        let galaxy = sample_galaxy();
        let ctx = ScriptingContext::new(&galaxy.universe);
        let conditions = vec![Arc::new(Condition::or([Condition::Armed, Condition::Monster]))];
        let description =
            describe_conditions(&conditions, Some(galaxy.kraken), &ctx).expect("description succeeds");
        assert_eq!(description.list, ClauseList::OneOf);
        assert_eq!(description.clauses[0].met, Some(false), "the kraken carries no weapon");
        assert_eq!(description.clauses[1].met, Some(true));
        assert_eq!(description.verdict, Some(true));
    }

    #[test]
    fn test_display_marks_clauses() {
        let galaxy = sample_galaxy();
        let ctx = ScriptingContext::new(&galaxy.universe);
        let conditions = vec![Arc::new(Condition::and([
            Condition::of_type(ObjectType::Planet),
            Condition::meter_value(MeterType::Population, Some(Value::from(20)), None),
        ]))];
        let description =
            describe_conditions(&conditions, Some(galaxy.earth), &ctx).expect("description succeeds");
        assert_eq!(
            description.to_string(),
            "All of:\n  is a Planet (met)\n  has Population at least 20 (not met)\nRequirements not met"
        );
    }
}
