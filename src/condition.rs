//! The condition tree.
//!
//! A `Condition` is an immutable predicate node built once when content is
//! loaded. Children are held behind `Arc` so the same subtree can be shared by
//! many effect groups without copying. The catalogue is closed: every kind of
//! predicate is a variant here, and evaluation matches on it exhaustively.
//!
//! Evaluation lives in `evaluator` (the partitioning protocol and
//! combinators), `predicates` (single-candidate tests), `relational`
//! (containment, spatial and empire-state predicates) and `quantifiers`.
//! Script text and descriptions live in `dump`.

use std::sync::Arc;

use crate::value::Value;
use crate::types::{
    BuildType, EmpireAffiliationType, MeterType, ObjectType, PlanetEnvironment, PlanetSize,
    PlanetType, ResourceType, ShipPartClass, SortingMethod, StarType,
};

/// Shared handle to a condition subtree.
pub type ConditionRef = Arc<Condition>;

/// A predicate over universe objects.
///
/// Ranges: `Number`, `Turn`, `DesignHasPart` and `DesignHasPartClass` test
/// `[low, high)`; every other range is inclusive. A missing bound is
/// unbounded on that side.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    // === Context identity ===
    /// Matches every candidate.
    All,
    /// The source object.
    Source,
    /// The root candidate.
    RootCandidate,
    /// The target object.
    Target,
    /// The object with the given id.
    ObjectId(Value),

    // === Ownership ===
    /// Owner relationship to an empire. `empire` may be omitted only for
    /// `Any` and `None` affiliations.
    EmpireAffiliation {
        empire: Option<Value>,
        affiliation: EmpireAffiliationType,
    },
    ProducedByEmpire(Value),
    /// Capital planet of any empire.
    Capital,
    OwnerHasTech(String),
    OwnerHasBuildingTypeAvailable(String),
    OwnerHasShipDesignAvailable(Value),

    // === Kind and content ===
    Type(ObjectType),
    /// Buildings of the given types; any building when empty.
    Building(Vec<String>),
    HasSpecial {
        name: String,
        since_low: Option<Value>,
        since_high: Option<Value>,
    },
    HasTag(String),
    CreatedOnTurn {
        low: Option<Value>,
        high: Option<Value>,
    },
    /// Homeworld of any of the species; of any species when empty.
    Homeworld(Vec<String>),
    Monster,
    Armed,
    Stationary,
    CanColonize,
    CanProduceShips,

    // === Terrain ===
    PlanetType(Vec<PlanetType>),
    PlanetSize(Vec<PlanetSize>),
    /// Environment of a planet for its own species, or for `species` if given.
    PlanetEnvironment {
        environments: Vec<PlanetEnvironment>,
        species: Option<String>,
    },
    /// Any species when empty.
    Species(Vec<String>),
    /// Any focus when empty.
    FocusType(Vec<String>),
    StarType(Vec<StarType>),

    // === Design ===
    DesignHasHull(String),
    /// With no `low`, at least one such part is required.
    DesignHasPart {
        name: String,
        low: Option<Value>,
        high: Option<Value>,
    },
    /// With no `low`, at least one such part is required.
    DesignHasPartClass {
        class: ShipPartClass,
        low: Option<Value>,
        high: Option<Value>,
    },
    PredefinedShipDesign(String),
    NumberedShipDesign(Value),

    // === Meters ===
    MeterValue {
        meter: MeterType,
        low: Option<Value>,
        high: Option<Value>,
    },
    ShipPartMeterValue {
        part: String,
        meter: MeterType,
        low: Option<Value>,
        high: Option<Value>,
    },
    /// Meter of `empire`, or of the candidate's owner when omitted.
    EmpireMeterValue {
        empire: Option<Value>,
        meter: String,
        low: Option<Value>,
        high: Option<Value>,
    },
    /// Stockpile of the candidate's owner.
    EmpireStockpileValue {
        resource: ResourceType,
        low: Option<Value>,
        high: Option<Value>,
    },

    // === Production ===
    /// Items queued at the candidate. With no bounds, at least one is required.
    Enqueued {
        build_type: BuildType,
        name: Option<String>,
        design: Option<Value>,
        empire: Option<Value>,
        low: Option<Value>,
        high: Option<Value>,
    },

    // === Relational ===
    Contains(ConditionRef),
    ContainedBy(ConditionRef),
    /// Objects in the given system, or in any system when omitted.
    InSystem(Option<Value>),
    WithinDistance {
        distance: Value,
        condition: ConditionRef,
    },
    WithinStarlaneJumps {
        jumps: Value,
        condition: ConditionRef,
    },
    CanAddStarlaneConnection(ConditionRef),
    CanRemoveStarlaneConnection(ConditionRef),

    // === Empire state ===
    VisibleToEmpire(Value),
    ExploredByEmpire(Value),
    FleetSupplyableByEmpire(Value),
    ResourceSupplyConnectedByEmpire {
        empire: Value,
        condition: ConditionRef,
    },

    // === Stochastic ===
    Chance(Value),

    // === Combinators ===
    And(Vec<ConditionRef>),
    Or(Vec<ConditionRef>),
    Not(ConditionRef),

    // === Quantifiers ===
    Number {
        low: Option<Value>,
        high: Option<Value>,
        condition: ConditionRef,
    },
    Turn {
        low: Option<Value>,
        high: Option<Value>,
    },
    SortedNumberOf {
        number: Value,
        sort_key: Option<Value>,
        method: SortingMethod,
        condition: ConditionRef,
    },
}

// ============================================================================
// Constructors
// ============================================================================

impl Condition {
    pub fn and(children: impl IntoIterator<Item = Condition>) -> Self {
        Condition::And(children.into_iter().map(Arc::new).collect())
    }

    pub fn or(children: impl IntoIterator<Item = Condition>) -> Self {
        Condition::Or(children.into_iter().map(Arc::new).collect())
    }

    pub fn not(child: Condition) -> Self {
        Condition::Not(Arc::new(child))
    }

    pub fn of_type(object_type: ObjectType) -> Self {
        Condition::Type(object_type)
    }

    pub fn object_id(id: impl Into<Value>) -> Self {
        Condition::ObjectId(id.into())
    }

    pub fn in_system(system: Option<Value>) -> Self {
        Condition::InSystem(system)
    }

    pub fn owned_by(empire: impl Into<Value>) -> Self {
        Condition::EmpireAffiliation {
            empire: Some(empire.into()),
            affiliation: EmpireAffiliationType::TheEmpire,
        }
    }

    pub fn affiliation(empire: Option<Value>, affiliation: EmpireAffiliationType) -> Self {
        Condition::EmpireAffiliation {
            empire,
            affiliation,
        }
    }

    pub fn meter_value(meter: MeterType, low: Option<Value>, high: Option<Value>) -> Self {
        Condition::MeterValue { meter, low, high }
    }

    pub fn contains(condition: Condition) -> Self {
        Condition::Contains(Arc::new(condition))
    }

    pub fn contained_by(condition: Condition) -> Self {
        Condition::ContainedBy(Arc::new(condition))
    }

    pub fn within_distance(distance: impl Into<Value>, condition: Condition) -> Self {
        Condition::WithinDistance {
            distance: distance.into(),
            condition: Arc::new(condition),
        }
    }

    pub fn within_starlane_jumps(jumps: impl Into<Value>, condition: Condition) -> Self {
        Condition::WithinStarlaneJumps {
            jumps: jumps.into(),
            condition: Arc::new(condition),
        }
    }

    pub fn chance(probability: impl Into<Value>) -> Self {
        Condition::Chance(probability.into())
    }

    pub fn number(low: Option<Value>, high: Option<Value>, condition: Condition) -> Self {
        Condition::Number {
            low,
            high,
            condition: Arc::new(condition),
        }
    }

    pub fn turn(low: Option<Value>, high: Option<Value>) -> Self {
        Condition::Turn { low, high }
    }

    pub fn sorted_number_of(
        number: impl Into<Value>,
        sort_key: Option<Value>,
        method: SortingMethod,
        condition: Condition,
    ) -> Self {
        Condition::SortedNumberOf {
            number: number.into(),
            sort_key,
            method,
            condition: Arc::new(condition),
        }
    }

    /// Node kind, used in logs and errors.
    pub fn name(&self) -> &'static str {
        match self {
            Condition::All => "All",
            Condition::Source => "Source",
            Condition::RootCandidate => "RootCandidate",
            Condition::Target => "Target",
            Condition::ObjectId(_) => "Object",
            Condition::EmpireAffiliation { .. } => "EmpireAffiliation",
            Condition::ProducedByEmpire(_) => "ProducedByEmpire",
            Condition::Capital => "Capital",
            Condition::OwnerHasTech(_) => "OwnerHasTech",
            Condition::OwnerHasBuildingTypeAvailable(_) => "OwnerHasBuildingTypeAvailable",
            Condition::OwnerHasShipDesignAvailable(_) => "OwnerHasShipDesignAvailable",
            Condition::Type(_) => "Type",
            Condition::Building(_) => "Building",
            Condition::HasSpecial { .. } => "HasSpecial",
            Condition::HasTag(_) => "HasTag",
            Condition::CreatedOnTurn { .. } => "CreatedOnTurn",
            Condition::Homeworld(_) => "Homeworld",
            Condition::Monster => "Monster",
            Condition::Armed => "Armed",
            Condition::Stationary => "Stationary",
            Condition::CanColonize => "CanColonize",
            Condition::CanProduceShips => "CanProduceShips",
            Condition::PlanetType(_) => "PlanetType",
            Condition::PlanetSize(_) => "PlanetSize",
            Condition::PlanetEnvironment { .. } => "PlanetEnvironment",
            Condition::Species(_) => "Species",
            Condition::FocusType(_) => "Focus",
            Condition::StarType(_) => "Star",
            Condition::DesignHasHull(_) => "DesignHasHull",
            Condition::DesignHasPart { .. } => "DesignHasPart",
            Condition::DesignHasPartClass { .. } => "DesignHasPartClass",
            Condition::PredefinedShipDesign(_) => "PredefinedShipDesign",
            Condition::NumberedShipDesign(_) => "NumberedShipDesign",
            Condition::MeterValue { .. } => "MeterValue",
            Condition::ShipPartMeterValue { .. } => "ShipPartMeterValue",
            Condition::EmpireMeterValue { .. } => "EmpireMeterValue",
            Condition::EmpireStockpileValue { .. } => "EmpireStockpileValue",
            Condition::Enqueued { .. } => "Enqueued",
            Condition::Contains(_) => "Contains",
            Condition::ContainedBy(_) => "ContainedBy",
            Condition::InSystem(_) => "InSystem",
            Condition::WithinDistance { .. } => "WithinDistance",
            Condition::WithinStarlaneJumps { .. } => "WithinStarlaneJumps",
            Condition::CanAddStarlaneConnection(_) => "CanAddStarlanesTo",
            Condition::CanRemoveStarlaneConnection(_) => "CanRemoveStarlanesTo",
            Condition::VisibleToEmpire(_) => "VisibleToEmpire",
            Condition::ExploredByEmpire(_) => "ExploredByEmpire",
            Condition::FleetSupplyableByEmpire(_) => "FleetSupplyableByEmpire",
            Condition::ResourceSupplyConnectedByEmpire { .. } => "ResourceSupplyConnected",
            Condition::Chance(_) => "Random",
            Condition::And(_) => "And",
            Condition::Or(_) => "Or",
            Condition::Not(_) => "Not",
            Condition::Number { .. } => "Number",
            Condition::Turn { .. } => "Turn",
            Condition::SortedNumberOf { .. } => "SortedNumberOf",
        }
    }

    /// Child conditions, in declaration order.
    pub fn children(&self) -> Vec<&ConditionRef> {
        match self {
            Condition::And(children) | Condition::Or(children) => children.iter().collect(),
            Condition::Not(child)
            | Condition::Contains(child)
            | Condition::ContainedBy(child)
            | Condition::CanAddStarlaneConnection(child)
            | Condition::CanRemoveStarlaneConnection(child)
            | Condition::WithinDistance {
                condition: child, ..
            }
            | Condition::WithinStarlaneJumps {
                condition: child, ..
            }
            | Condition::ResourceSupplyConnectedByEmpire {
                condition: child, ..
            }
            | Condition::Number {
                condition: child, ..
            }
            | Condition::SortedNumberOf {
                condition: child, ..
            } => vec![child],
            _ => Vec::new(),
        }
    }

    /// Value parameters, in declaration order.
    pub fn values(&self) -> Vec<&Value> {
        fn present<'a>(values: &[Option<&'a Value>]) -> Vec<&'a Value> {
            values.iter().flatten().copied().collect()
        }
        match self {
            Condition::ObjectId(v)
            | Condition::ProducedByEmpire(v)
            | Condition::OwnerHasShipDesignAvailable(v)
            | Condition::NumberedShipDesign(v)
            | Condition::VisibleToEmpire(v)
            | Condition::ExploredByEmpire(v)
            | Condition::FleetSupplyableByEmpire(v)
            | Condition::Chance(v)
            | Condition::WithinDistance { distance: v, .. }
            | Condition::WithinStarlaneJumps { jumps: v, .. }
            | Condition::ResourceSupplyConnectedByEmpire { empire: v, .. } => vec![v],
            Condition::EmpireAffiliation { empire, .. } => present(&[empire.as_ref()]),
            Condition::InSystem(system) => present(&[system.as_ref()]),
            Condition::HasSpecial {
                since_low,
                since_high,
                ..
            } => present(&[since_low.as_ref(), since_high.as_ref()]),
            Condition::CreatedOnTurn { low, high }
            | Condition::DesignHasPart { low, high, .. }
            | Condition::DesignHasPartClass { low, high, .. }
            | Condition::MeterValue { low, high, .. }
            | Condition::ShipPartMeterValue { low, high, .. }
            | Condition::EmpireStockpileValue { low, high, .. }
            | Condition::Number { low, high, .. }
            | Condition::Turn { low, high } => present(&[low.as_ref(), high.as_ref()]),
            Condition::EmpireMeterValue {
                empire, low, high, ..
            } => present(&[empire.as_ref(), low.as_ref(), high.as_ref()]),
            Condition::Enqueued {
                design,
                empire,
                low,
                high,
                ..
            } => present(&[design.as_ref(), empire.as_ref(), low.as_ref(), high.as_ref()]),
            Condition::SortedNumberOf {
                number, sort_key, ..
            } => {
                let mut values = vec![number];
                values.extend(sort_key.as_ref());
                values
            }
            _ => Vec::new(),
        }
    }
}

// ============================================================================
// Invariance
// ============================================================================

impl Condition {
    /// Returns true if the result never depends on the root candidate.
    pub fn root_candidate_invariant(&self) -> bool {
        if matches!(self, Condition::RootCandidate) {
            return false;
        }
        self.values().iter().all(|v| v.root_candidate_invariant())
            && self.children().iter().all(|c| c.root_candidate_invariant())
    }

    /// Returns true if the result never depends on the target.
    pub fn target_invariant(&self) -> bool {
        if matches!(self, Condition::Target) {
            return false;
        }
        self.values().iter().all(|v| v.target_invariant())
            && self.children().iter().all(|c| c.target_invariant())
    }

    /// Returns true if the result never depends on the source.
    ///
    /// Random draws are seeded with the source, so stochastic nodes depend
    /// on it.
    pub fn source_invariant(&self) -> bool {
        if matches!(
            self,
            Condition::Source
                | Condition::Chance(_)
                | Condition::SortedNumberOf {
                    method: SortingMethod::Random | SortingMethod::Mode,
                    ..
                }
        ) {
            return false;
        }
        self.values().iter().all(|v| v.source_invariant())
            && self.children().iter().all(|c| c.source_invariant())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ObjectRef;

    #[test]
    fn test_leaf_invariance() {
        assert!(Condition::All.source_invariant());
        assert!(!Condition::Source.source_invariant());
        assert!(Condition::Source.target_invariant());
        assert!(!Condition::RootCandidate.root_candidate_invariant());
        assert!(!Condition::Target.target_invariant());
        assert!(Condition::Monster.root_candidate_invariant());
    }

    #[test]
    fn test_stochastic_nodes_depend_on_source() {
        assert!(!Condition::chance(0.5).source_invariant());
        assert!(Condition::chance(0.5).root_candidate_invariant());
        let planets = || Condition::of_type(ObjectType::Planet);
        assert!(!Condition::sorted_number_of(2, None, SortingMethod::Random, planets()).source_invariant());
        assert!(Condition::sorted_number_of(2, None, SortingMethod::Max, planets()).source_invariant());
    }

    #[test]
    fn test_combinator_invariance_requires_every_operand() {
        let both = Condition::and([Condition::All, Condition::Source]);
        assert!(!both.source_invariant());
        assert!(both.target_invariant());

        let negated = Condition::not(Condition::Target);
        assert!(!negated.target_invariant(), "Not mirrors its operand");

        assert!(Condition::or([]).source_invariant());
    }

    #[test]
    fn test_value_parameters_affect_invariance() {
        let cond = Condition::meter_value(
            MeterType::Population,
            Some(Value::meter(ObjectRef::Source, MeterType::Population)),
            None,
        );
        assert!(!cond.source_invariant());
        assert!(cond.root_candidate_invariant());
    }

    #[test]
    fn test_relational_nodes_inherit_from_subcondition() {
        let cond = Condition::contains(Condition::RootCandidate);
        assert!(!cond.root_candidate_invariant());
        let cond = Condition::within_distance(50.0, Condition::Source);
        assert!(!cond.source_invariant());
        assert!(cond.root_candidate_invariant());
    }

    #[test]
    fn test_structural_equality() {
        let a = Condition::and([Condition::of_type(ObjectType::Planet), Condition::Capital]);
        let b = Condition::and([Condition::of_type(ObjectType::Planet), Condition::Capital]);
        let c = Condition::and([Condition::Capital, Condition::of_type(ObjectType::Planet)]);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_children_and_values() {
        let cond = Condition::number(
            Some(Value::from(1)),
            None,
            Condition::of_type(ObjectType::Ship),
        );
        assert_eq!(cond.children().len(), 1);
        assert_eq!(cond.values().len(), 1);
    }
}
