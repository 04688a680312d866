//! Condition evaluation for a space strategy game's content scripts.
//!
//! A [`Condition`] tree is a predicate over universe objects. Evaluating it
//! partitions a pool of candidate objects into matches and non-matches,
//! given a [`ScriptingContext`] naming the source, target and root candidate.

pub mod batch;
pub mod candidates;
pub mod condition;
pub mod context;
pub mod description;
pub mod dump;
pub mod empire;
pub mod error;
pub mod evaluator;
pub mod ids;
pub mod object;
pub mod predicates;
pub mod quantifiers;
pub mod random;
pub mod registry;
pub mod relational;
pub mod starlanes;
pub mod types;
pub mod universe;
pub mod value;

#[cfg(test)]
mod tests;

pub use batch::{EvalJob, evaluate_batch};
pub use candidates::{ObjectSet, Partition};
pub use condition::{Condition, ConditionRef};
pub use context::{EvalMode, ScriptingContext};
pub use description::{ClauseList, ConditionDescription, DescribedClause, describe_conditions};
pub use empire::{Empire, Empires, QueueItem};
pub use error::{EvalError, EvalResult};
pub use ids::{DesignId, EmpireId, ObjectId};
pub use object::{Object, Special};
pub use quantifiers::MODE_KEY_RESOLUTION;
pub use registry::{BuildingType, ContentRegistry, PartType, ShipDesign, Species};
pub use starlanes::{MIN_LANE_ANGLE_DEGREES, MIN_LANE_SYSTEM_CLEARANCE, Starlanes};
pub use types::{
    BuildType, DiplomaticStatus, EmpireAffiliationType, MeterType, ObjectKind, ObjectType,
    PlanetEnvironment, PlanetSize, PlanetType, ResourceType, SearchDomain, ShipPartClass,
    SortingMethod, StarType, Visibility,
};
pub use universe::{Universe, UniverseBuilder};
pub use value::{ArithmeticOp, ObjectRef, Property, Value};
