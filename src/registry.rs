//! Read-only content registry.
//!
//! Species, ship designs, ship parts and building types are loaded once from
//! game content and handed to the evaluator through the `Universe`, instead of
//! being looked up in process-wide managers.

use std::collections::{BTreeMap, BTreeSet, HashMap};

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

use crate::ids::{DesignId, ObjectId};
use crate::types::{PlanetEnvironment, PlanetType, ShipPartClass};

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Species {
    pub name: String,
    /// Planets this species calls home.
    #[cfg_attr(feature = "serialization", serde(default))]
    pub homeworlds: BTreeSet<ObjectId>,
    /// Environment quality per planet type. Unlisted types are uninhabitable.
    #[cfg_attr(feature = "serialization", serde(default))]
    pub environments: HashMap<PlanetType, PlanetEnvironment>,
    pub can_colonize: bool,
    pub can_produce_ships: bool,
    #[cfg_attr(feature = "serialization", serde(default))]
    pub tags: BTreeSet<String>,
}

impl Species {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            homeworlds: BTreeSet::new(),
            environments: HashMap::new(),
            can_colonize: true,
            can_produce_ships: true,
            tags: BTreeSet::new(),
        }
    }

    pub fn environment_for(&self, planet_type: PlanetType) -> PlanetEnvironment {
        self.environments
            .get(&planet_type)
            .copied()
            .unwrap_or(PlanetEnvironment::Uninhabitable)
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct PartType {
    pub name: String,
    pub class: ShipPartClass,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct ShipDesign {
    pub id: DesignId,
    pub name: String,
    pub hull: String,
    /// Part names, one entry per slot. Empty slots are not listed.
    #[cfg_attr(feature = "serialization", serde(default))]
    pub parts: Vec<String>,
    /// True for designs shipped with game content rather than made by a player.
    pub predefined: bool,
    pub monster: bool,
}

impl ShipDesign {
    pub fn new(id: DesignId, name: impl Into<String>, hull: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            hull: hull.into(),
            parts: Vec::new(),
            predefined: false,
            monster: false,
        }
    }

    /// Number of slots holding the named part.
    pub fn part_count(&self, part_name: &str) -> usize {
        self.parts.iter().filter(|part| *part == part_name).count()
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct BuildingType {
    pub name: String,
    #[cfg_attr(feature = "serialization", serde(default))]
    pub tags: BTreeSet<String>,
}

/// All static content the evaluator may consult.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serialization", serde(default))]
pub struct ContentRegistry {
    pub species: BTreeMap<String, Species>,
    pub designs: BTreeMap<DesignId, ShipDesign>,
    pub parts: BTreeMap<String, PartType>,
    pub building_types: BTreeMap<String, BuildingType>,
}

impl ContentRegistry {
    pub fn species(&self, name: &str) -> Option<&Species> {
        self.species.get(name)
    }

    pub fn design(&self, id: DesignId) -> Option<&ShipDesign> {
        self.designs.get(&id)
    }

    pub fn part(&self, name: &str) -> Option<&PartType> {
        self.parts.get(name)
    }

    pub fn building_type(&self, name: &str) -> Option<&BuildingType> {
        self.building_types.get(name)
    }

    /// Number of parts of `class` in a design. Parts missing from the
    /// registry count toward no class.
    pub fn part_class_count(&self, design: &ShipDesign, class: ShipPartClass) -> usize {
        design
            .parts
            .iter()
            .filter_map(|name| self.part(name))
            .filter(|part| part.class == class)
            .count()
    }

    /// A design is armed if any of its parts belongs to a weapon class.
    pub fn design_is_armed(&self, design: &ShipDesign) -> bool {
        design
            .parts
            .iter()
            .filter_map(|name| self.part(name))
            .any(|part| part.class.is_weapon())
    }

    /// Returns true if `planet` is the homeworld of any species in `names`,
    /// or of any species at all when `names` is empty.
    pub fn is_homeworld(&self, planet: ObjectId, names: &[String]) -> bool {
        if names.is_empty() {
            return self
                .species
                .values()
                .any(|species| species.homeworlds.contains(&planet));
        }
        names
            .iter()
            .filter_map(|name| self.species(name))
            .any(|species| species.homeworlds.contains(&planet))
    }

    pub fn add_species(&mut self, species: Species) {
        self.species.insert(species.name.clone(), species);
    }

    pub fn add_design(&mut self, design: ShipDesign) {
        self.designs.insert(design.id, design);
    }

    pub fn add_part(&mut self, name: impl Into<String>, class: ShipPartClass) {
        let name = name.into();
        self.parts.insert(name.clone(), PartType { name, class });
    }

    pub fn add_building_type(&mut self, name: impl Into<String>) {
        let name = name.into();
        self.building_types.insert(
            name.clone(),
            BuildingType {
                name,
                tags: BTreeSet::new(),
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> ContentRegistry {
        let mut registry = ContentRegistry::default();
        registry.add_part("SR_WEAPON_1", ShipPartClass::ShortRange);
        registry.add_part("AR_STD_PLATE", ShipPartClass::Armour);
        let mut design = ShipDesign::new(DesignId(1), "Frigate", "SH_BASIC_MEDIUM");
        design.parts = vec![
            "SR_WEAPON_1".to_string(),
            "AR_STD_PLATE".to_string(),
            "AR_STD_PLATE".to_string(),
        ];
        registry.add_design(design);
        let mut human = Species::new("SP_HUMAN");
        human.homeworlds.insert(ObjectId(10));
        human
            .environments
            .insert(PlanetType::Ocean, PlanetEnvironment::Good);
        registry.add_species(human);
        registry
    }

    #[test]
    fn test_part_counts() {
        let registry = registry();
        let design = registry.design(DesignId(1)).expect("design exists");
        assert_eq!(design.part_count("AR_STD_PLATE"), 2);
        assert_eq!(
            registry.part_class_count(design, ShipPartClass::ShortRange),
            1
        );
        assert!(registry.design_is_armed(design));
    }

    #[test]
    fn test_unarmed_design() {
        let mut registry = registry();
        let mut scout = ShipDesign::new(DesignId(2), "Scout", "SH_BASIC_SMALL");
        scout.parts = vec!["AR_STD_PLATE".to_string(), "UNKNOWN_PART".to_string()];
        registry.add_design(scout.clone());
        assert!(!registry.design_is_armed(&scout));
    }

    #[test]
    fn test_homeworld_lookup() {
        let registry = registry();
        assert!(registry.is_homeworld(ObjectId(10), &[]));
        assert!(registry.is_homeworld(ObjectId(10), &["SP_HUMAN".to_string()]));
        assert!(!registry.is_homeworld(ObjectId(10), &["SP_LAENFA".to_string()]));
        assert!(!registry.is_homeworld(ObjectId(11), &[]));
    }

    #[test]
    fn test_unlisted_environment_is_uninhabitable() {
        let registry = registry();
        let human = registry.species("SP_HUMAN").expect("species exists");
        assert_eq!(human.environment_for(PlanetType::Ocean), PlanetEnvironment::Good);
        assert_eq!(
            human.environment_for(PlanetType::Inferno),
            PlanetEnvironment::Uninhabitable
        );
    }
}
