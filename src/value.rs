//! Value references: the formulas predicate parameters are written in.
//!
//! A value is re-resolved every time a predicate uses it, so it may depend on
//! the object currently being tested. Resolution returns `None` for missing
//! data (an absent meter, an unowned object asked for its owner, a division by
//! zero); predicates treat that as a non-match.

use std::fmt;
use std::sync::Arc;

use tracing::trace;

use crate::condition::Condition;
use crate::context::ScriptingContext;
use crate::error::EvalResult;
use crate::object::Object;
use crate::types::MeterType;

/// Which contextual object a property is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectRef {
    LocalCandidate,
    RootCandidate,
    Source,
    Target,
}

impl ObjectRef {
    pub fn script_name(self) -> &'static str {
        match self {
            ObjectRef::LocalCandidate => "LocalCandidate",
            ObjectRef::RootCandidate => "RootCandidate",
            ObjectRef::Source => "Source",
            ObjectRef::Target => "Target",
        }
    }
}

/// A numeric property of an object.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Property {
    Id,
    Owner,
    SystemId,
    ContainerId,
    DesignId,
    CreatedOnTurn,
    /// Turns since creation.
    Age,
    X,
    Y,
    Meter(MeterType),
    /// Capacity of a named special.
    SpecialCapacity(String),
}

impl Property {
    fn read(&self, object: &Object, current_turn: i32) -> Option<f64> {
        match self {
            Property::Id => Some(f64::from(object.id.0)),
            Property::Owner => object.owner.map(|owner| f64::from(owner.0)),
            Property::SystemId => object.system_id.map(|id| f64::from(id.0)),
            Property::ContainerId => object.container.map(|id| f64::from(id.0)),
            Property::DesignId => object.design_id.map(|id| f64::from(id.0)),
            Property::CreatedOnTurn => Some(f64::from(object.created_on_turn)),
            Property::Age => Some(f64::from(object.age(current_turn))),
            Property::X => Some(object.x),
            Property::Y => Some(object.y),
            Property::Meter(meter) => object.meter(*meter),
            Property::SpecialCapacity(name) => object.special(name).map(|s| s.capacity),
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Property::Id => f.write_str("ID"),
            Property::Owner => f.write_str("Owner"),
            Property::SystemId => f.write_str("SystemID"),
            Property::ContainerId => f.write_str("ContainerID"),
            Property::DesignId => f.write_str("DesignID"),
            Property::CreatedOnTurn => f.write_str("CreationTurn"),
            Property::Age => f.write_str("Age"),
            Property::X => f.write_str("X"),
            Property::Y => f.write_str("Y"),
            Property::Meter(meter) => f.write_str(meter.script_name()),
            Property::SpecialCapacity(name) => write!(f, "SpecialCapacity name = \"{name}\""),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArithmeticOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Min,
    Max,
}

impl ArithmeticOp {
    fn apply(self, lhs: f64, rhs: f64) -> Option<f64> {
        let result = match self {
            ArithmeticOp::Add => lhs + rhs,
            ArithmeticOp::Subtract => lhs - rhs,
            ArithmeticOp::Multiply => lhs * rhs,
            ArithmeticOp::Divide if rhs == 0.0 => return None,
            ArithmeticOp::Divide => lhs / rhs,
            ArithmeticOp::Min => lhs.min(rhs),
            ArithmeticOp::Max => lhs.max(rhs),
        };
        result.is_finite().then_some(result)
    }
}

/// A formula resolved against a scripting context.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Constant(f64),
    CurrentTurn,
    Property { of: ObjectRef, property: Property },
    /// Number of objects in the universe matching a condition.
    Count(Arc<Condition>),
    Op(ArithmeticOp, Box<Value>, Box<Value>),
    Negate(Box<Value>),
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Constant(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Constant(f64::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Constant(f64::from(value))
    }
}

impl Value {
    pub fn constant(value: impl Into<f64>) -> Self {
        Value::Constant(value.into())
    }

    pub fn property(of: ObjectRef, property: Property) -> Self {
        Value::Property { of, property }
    }

    pub fn meter(of: ObjectRef, meter: MeterType) -> Self {
        Value::Property {
            of,
            property: Property::Meter(meter),
        }
    }

    pub fn count(condition: impl Into<Arc<Condition>>) -> Self {
        Value::Count(condition.into())
    }

    pub fn op(op: ArithmeticOp, lhs: Value, rhs: Value) -> Self {
        Value::Op(op, Box::new(lhs), Box::new(rhs))
    }

    pub fn negate(value: Value) -> Self {
        Value::Negate(Box::new(value))
    }

    /// Resolve the formula. `condition` names the node asking, for errors.
    pub fn resolve(
        &self,
        ctx: &ScriptingContext<'_>,
        condition: &'static str,
    ) -> EvalResult<Option<f64>> {
        match self {
            Value::Constant(value) => Ok(Some(*value)),
            Value::CurrentTurn => Ok(Some(f64::from(ctx.current_turn()))),
            Value::Property { of, property } => {
                let object = match of {
                    ObjectRef::LocalCandidate => ctx.local_candidate(condition)?,
                    ObjectRef::RootCandidate => ctx.root_candidate(condition)?,
                    ObjectRef::Source => ctx.source(condition)?,
                    ObjectRef::Target => ctx.target(condition)?,
                };
                let resolved =
                    object.and_then(|object| property.read(object, ctx.current_turn()));
                if resolved.is_none() {
                    trace!(condition, of = of.script_name(), %property, "property unresolved");
                }
                Ok(resolved)
            }
            Value::Count(inner) => {
                let matched = inner.universe_matches(ctx)?;
                Ok(Some(matched.len() as f64))
            }
            Value::Op(op, lhs, rhs) => {
                let (Some(lhs), Some(rhs)) =
                    (lhs.resolve(ctx, condition)?, rhs.resolve(ctx, condition)?)
                else {
                    return Ok(None);
                };
                Ok(op.apply(lhs, rhs))
            }
            Value::Negate(inner) => Ok(inner.resolve(ctx, condition)?.map(|v| -v)),
        }
    }

    /// Resolve and truncate toward zero.
    pub fn resolve_int(
        &self,
        ctx: &ScriptingContext<'_>,
        condition: &'static str,
    ) -> EvalResult<Option<i64>> {
        Ok(self
            .resolve(ctx, condition)?
            .filter(|v| v.is_finite())
            .map(|v| v.trunc() as i64))
    }

    pub fn local_candidate_invariant(&self) -> bool {
        match self {
            Value::Constant(_) | Value::CurrentTurn => true,
            Value::Property { of, .. } => *of != ObjectRef::LocalCandidate,
            // The counted condition sees the caller's candidate as its root.
            Value::Count(inner) => inner.root_candidate_invariant(),
            Value::Op(_, lhs, rhs) => {
                lhs.local_candidate_invariant() && rhs.local_candidate_invariant()
            }
            Value::Negate(inner) => inner.local_candidate_invariant(),
        }
    }

    pub fn root_candidate_invariant(&self) -> bool {
        match self {
            Value::Constant(_) | Value::CurrentTurn => true,
            Value::Property { of, .. } => *of != ObjectRef::RootCandidate,
            Value::Count(inner) => inner.root_candidate_invariant(),
            Value::Op(_, lhs, rhs) => lhs.root_candidate_invariant() && rhs.root_candidate_invariant(),
            Value::Negate(inner) => inner.root_candidate_invariant(),
        }
    }

    pub fn target_invariant(&self) -> bool {
        match self {
            Value::Constant(_) | Value::CurrentTurn => true,
            Value::Property { of, .. } => *of != ObjectRef::Target,
            Value::Count(inner) => inner.target_invariant(),
            Value::Op(_, lhs, rhs) => lhs.target_invariant() && rhs.target_invariant(),
            Value::Negate(inner) => inner.target_invariant(),
        }
    }

    pub fn source_invariant(&self) -> bool {
        match self {
            Value::Constant(_) | Value::CurrentTurn => true,
            Value::Property { of, .. } => *of != ObjectRef::Source,
            Value::Count(inner) => inner.source_invariant(),
            Value::Op(_, lhs, rhs) => lhs.source_invariant() && rhs.source_invariant(),
            Value::Negate(inner) => inner.source_invariant(),
        }
    }

    /// Returns true if resolving once in `ctx` gives the same result as
    /// resolving per candidate in contexts derived from it.
    pub(crate) fn fixed_under(&self, ctx: &ScriptingContext<'_>) -> bool {
        self.local_candidate_invariant()
            && (ctx.root_candidate_id().is_some() || self.root_candidate_invariant())
    }

    /// Script text of the formula.
    pub fn dump(&self) -> String {
        match self {
            Value::Constant(value) => format_number(*value),
            Value::CurrentTurn => "CurrentTurn".to_string(),
            Value::Property { of, property } => format!("{}.{property}", of.script_name()),
            Value::Count(inner) => format!("Statistic Count condition = {}", inner.dump()),
            Value::Op(op, lhs, rhs) => match op {
                ArithmeticOp::Min => format!("min({}, {})", lhs.dump(), rhs.dump()),
                ArithmeticOp::Max => format!("max({}, {})", lhs.dump(), rhs.dump()),
                ArithmeticOp::Add => format!("({} + {})", lhs.dump(), rhs.dump()),
                ArithmeticOp::Subtract => format!("({} - {})", lhs.dump(), rhs.dump()),
                ArithmeticOp::Multiply => format!("({} * {})", lhs.dump(), rhs.dump()),
                ArithmeticOp::Divide => format!("({} / {})", lhs.dump(), rhs.dump()),
            },
            Value::Negate(inner) => format!("-{}", inner.dump()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dump())
    }
}

/// Whole numbers print without a fractional part.
pub(crate) fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

/// Resolved numeric range. A missing bound is unbounded on that side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Range {
    pub low: f64,
    pub high: f64,
}

impl Range {
    pub fn contains_inclusive(self, value: f64) -> bool {
        self.low <= value && value <= self.high
    }

    pub fn contains_half_open(self, value: f64) -> bool {
        self.low <= value && value < self.high
    }
}

/// Resolve optional range bounds. `Ok(None)` means a bound that was given
/// could not be resolved, so the range admits nothing.
pub(crate) fn resolve_range(
    low: Option<&Value>,
    high: Option<&Value>,
    ctx: &ScriptingContext<'_>,
    condition: &'static str,
) -> EvalResult<Option<Range>> {
    let low = match low {
        Some(value) => match value.resolve(ctx, condition)? {
            Some(v) => v,
            None => return Ok(None),
        },
        None => f64::NEG_INFINITY,
    };
    let high = match high {
        Some(value) => match value.resolve(ctx, condition)? {
            Some(v) => v,
            None => return Ok(None),
        },
        None => f64::INFINITY,
    };
    Ok(Some(Range { low, high }))
}
