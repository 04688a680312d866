use std::collections::{BTreeMap, BTreeSet, HashMap};

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

use crate::ids::{DesignId, EmpireId, ObjectId};
use crate::types::{MeterType, ObjectKind, PlanetSize, PlanetType, StarType};

/// A special attached to an object.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Special {
    /// Turn on which the special was attached.
    pub added_on_turn: i32,
    pub capacity: f64,
}

/// A universe object as seen by the condition engine.
///
/// The engine only ever reads objects. Kind-specific fields are `None` (or
/// empty) on kinds they don't apply to; predicates treat that absence as a
/// non-match.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Object {
    pub id: ObjectId,
    pub kind: ObjectKind,
    pub name: String,

    /// Position in continuous map coordinates.
    pub x: f64,
    pub y: f64,

    /// System the object is in. A system's own `system_id` is itself.
    pub system_id: Option<ObjectId>,

    /// Direct container: system for planets and fleets, planet for buildings,
    /// fleet for ships.
    pub container: Option<ObjectId>,

    /// Directly contained objects.
    #[cfg_attr(feature = "serialization", serde(default))]
    pub contents: Vec<ObjectId>,

    pub owner: Option<EmpireId>,
    pub created_on_turn: i32,

    #[cfg_attr(feature = "serialization", serde(default))]
    pub meters: HashMap<MeterType, f64>,

    #[cfg_attr(feature = "serialization", serde(default))]
    pub specials: BTreeMap<String, Special>,

    #[cfg_attr(feature = "serialization", serde(default))]
    pub tags: BTreeSet<String>,

    // === Planet ===
    pub planet_type: Option<PlanetType>,
    pub planet_size: Option<PlanetSize>,
    /// Species living on a planet or crewing a ship.
    pub species: Option<String>,
    pub focus: Option<String>,

    // === System ===
    pub star: Option<StarType>,

    // === Building ===
    pub building_type: Option<String>,

    // === Ship ===
    pub design_id: Option<DesignId>,
    /// Meters of individual ship parts, keyed by part name.
    #[cfg_attr(feature = "serialization", serde(default))]
    pub part_meters: BTreeMap<String, HashMap<MeterType, f64>>,
    /// Empire that built this ship or building.
    pub produced_by: Option<EmpireId>,

    // === Fleet ===
    /// Where the fleet is headed. `None` or the current system means it stays put.
    pub final_destination: Option<ObjectId>,
}

impl Object {
    /// Create a bare object of the given kind at the origin.
    pub fn new(id: ObjectId, kind: ObjectKind, name: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            name: name.into(),
            x: 0.0,
            y: 0.0,
            system_id: if kind == ObjectKind::System {
                Some(id)
            } else {
                None
            },
            container: None,
            contents: Vec::new(),
            owner: None,
            created_on_turn: 0,
            meters: HashMap::new(),
            specials: BTreeMap::new(),
            tags: BTreeSet::new(),
            planet_type: None,
            planet_size: None,
            species: None,
            focus: None,
            star: None,
            building_type: None,
            design_id: None,
            part_meters: BTreeMap::new(),
            produced_by: None,
            final_destination: None,
        }
    }

    /// Current value of a meter, if the object has it.
    pub fn meter(&self, meter: MeterType) -> Option<f64> {
        self.meters.get(&meter).copied()
    }

    /// Current value of a part meter on a ship.
    pub fn part_meter(&self, part_name: &str, meter: MeterType) -> Option<f64> {
        self.part_meters
            .get(part_name)
            .and_then(|meters| meters.get(&meter))
            .copied()
    }

    pub fn special(&self, name: &str) -> Option<&Special> {
        self.specials.get(name)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    pub fn is_owned_by(&self, empire: EmpireId) -> bool {
        self.owner == Some(empire)
    }

    pub fn is_unowned(&self) -> bool {
        self.owner.is_none()
    }

    /// Euclidean distance to another object.
    pub fn distance_to(&self, other: &Object) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Number of turns since creation, as of `current_turn`.
    pub fn age(&self, current_turn: i32) -> i32 {
        current_turn - self.created_on_turn
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_is_its_own_system() {
        let system = Object::new(ObjectId(3), ObjectKind::System, "Sol");
        assert_eq!(system.system_id, Some(ObjectId(3)));
        let ship = Object::new(ObjectId(4), ObjectKind::Ship, "Scout");
        assert_eq!(ship.system_id, None);
    }

    #[test]
    fn test_missing_meter_is_none() {
        let mut planet = Object::new(ObjectId(1), ObjectKind::Planet, "Earth");
        planet.meters.insert(MeterType::Population, 12.0);
        assert_eq!(planet.meter(MeterType::Population), Some(12.0));
        assert_eq!(planet.meter(MeterType::Industry), None);
    }

    #[test]
    fn test_part_meter_lookup() {
        let mut ship = Object::new(ObjectId(9), ObjectKind::Ship, "Warship");
        ship.part_meters
            .entry("SR_WEAPON_1".to_string())
            .or_default()
            .insert(MeterType::Capacity, 18.0);
        assert_eq!(ship.part_meter("SR_WEAPON_1", MeterType::Capacity), Some(18.0));
        assert_eq!(ship.part_meter("SR_WEAPON_1", MeterType::MaxCapacity), None);
        assert_eq!(ship.part_meter("DT_DETECTOR_1", MeterType::Capacity), None);
    }

    #[test]
    fn test_distance_and_age() {
        let mut a = Object::new(ObjectId(1), ObjectKind::System, "A");
        let mut b = Object::new(ObjectId(2), ObjectKind::System, "B");
        a.x = 0.0;
        a.y = 0.0;
        b.x = 3.0;
        b.y = 4.0;
        b.created_on_turn = 5;
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-9);
        assert_eq!(b.age(12), 7);
    }
}
