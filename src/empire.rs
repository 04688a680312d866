//! Per-empire state consulted by empire predicates.
//!
//! Everything here is a read-only view for the evaluator; turn processing
//! owns and updates the real bookkeeping elsewhere.

use std::collections::{BTreeMap, BTreeSet, HashMap};

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

use crate::ids::{DesignId, EmpireId, ObjectId};
use crate::types::{BuildType, DiplomaticStatus, ResourceType, Visibility};

/// One entry on an empire's production queue.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct QueueItem {
    pub build_type: BuildType,
    /// Building type name, for building items.
    pub name: Option<String>,
    /// Design, for ship items.
    pub design_id: Option<DesignId>,
    /// Planet where the item is being produced.
    pub location: ObjectId,
    /// Number of copies ordered by this entry.
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Empire {
    pub id: EmpireId,
    pub name: String,
    pub capital: Option<ObjectId>,
    #[cfg_attr(feature = "serialization", serde(default))]
    pub techs: BTreeSet<String>,
    #[cfg_attr(feature = "serialization", serde(default))]
    pub available_building_types: BTreeSet<String>,
    #[cfg_attr(feature = "serialization", serde(default))]
    pub available_designs: BTreeSet<DesignId>,
    /// Named empire-wide meters.
    #[cfg_attr(feature = "serialization", serde(default))]
    pub meters: BTreeMap<String, f64>,
    #[cfg_attr(feature = "serialization", serde(default))]
    pub stockpiles: HashMap<ResourceType, f64>,
    #[cfg_attr(feature = "serialization", serde(default))]
    pub explored_systems: BTreeSet<ObjectId>,
    /// Visibility of individual objects. Unlisted objects are not visible.
    #[cfg_attr(feature = "serialization", serde(default))]
    pub visibility: BTreeMap<ObjectId, Visibility>,
    #[cfg_attr(feature = "serialization", serde(default))]
    pub fleet_supplyable_systems: BTreeSet<ObjectId>,
    /// Groups of systems that share resources with each other.
    #[cfg_attr(feature = "serialization", serde(default))]
    pub resource_groups: Vec<BTreeSet<ObjectId>>,
    #[cfg_attr(feature = "serialization", serde(default))]
    pub production_queue: Vec<QueueItem>,
}

impl Empire {
    pub fn new(id: EmpireId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            capital: None,
            techs: BTreeSet::new(),
            available_building_types: BTreeSet::new(),
            available_designs: BTreeSet::new(),
            meters: BTreeMap::new(),
            stockpiles: HashMap::new(),
            explored_systems: BTreeSet::new(),
            visibility: BTreeMap::new(),
            fleet_supplyable_systems: BTreeSet::new(),
            resource_groups: Vec::new(),
            production_queue: Vec::new(),
        }
    }

    pub fn has_tech(&self, name: &str) -> bool {
        self.techs.contains(name)
    }

    pub fn building_type_available(&self, name: &str) -> bool {
        self.available_building_types.contains(name)
    }

    pub fn design_available(&self, design: DesignId) -> bool {
        self.available_designs.contains(&design)
    }

    pub fn meter(&self, name: &str) -> Option<f64> {
        self.meters.get(name).copied()
    }

    pub fn stockpile(&self, resource: ResourceType) -> Option<f64> {
        self.stockpiles.get(&resource).copied()
    }

    pub fn visibility_of(&self, object: ObjectId) -> Visibility {
        self.visibility
            .get(&object)
            .copied()
            .unwrap_or(Visibility::None)
    }

    pub fn has_explored(&self, system: ObjectId) -> bool {
        self.explored_systems.contains(&system)
    }

    pub fn can_fleet_supply(&self, system: ObjectId) -> bool {
        self.fleet_supplyable_systems.contains(&system)
    }

    /// The resource-sharing group containing `system`, if any.
    pub fn resource_group_of(&self, system: ObjectId) -> Option<&BTreeSet<ObjectId>> {
        self.resource_groups
            .iter()
            .find(|group| group.contains(&system))
    }

    /// Returns true if both systems are in the same resource-sharing group.
    pub fn resource_connected(&self, a: ObjectId, b: ObjectId) -> bool {
        self.resource_group_of(a)
            .is_some_and(|group| group.contains(&b))
    }

    /// Number of queued copies at `location` accepted by `accepts`.
    pub fn queued_at(&self, location: ObjectId, accepts: impl Fn(&QueueItem) -> bool) -> u32 {
        self.production_queue
            .iter()
            .filter(|item| item.location == location && accepts(item))
            .map(|item| item.quantity)
            .sum()
    }
}

/// All empires plus the diplomatic status between them.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serialization", serde(default))]
pub struct Empires {
    pub empires: BTreeMap<EmpireId, Empire>,
    /// Status per unordered empire pair, stored with the lower id first.
    /// Pairs without an entry are at war.
    pub diplomacy: Vec<(EmpireId, EmpireId, DiplomaticStatus)>,
}

impl Empires {
    pub fn get(&self, id: EmpireId) -> Option<&Empire> {
        self.empires.get(&id)
    }

    pub fn insert(&mut self, empire: Empire) {
        self.empires.insert(empire.id, empire);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Empire> {
        self.empires.values()
    }

    pub fn set_status(&mut self, a: EmpireId, b: EmpireId, status: DiplomaticStatus) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        self.diplomacy
            .retain(|(x, y, _)| !(*x == low && *y == high));
        self.diplomacy.push((low, high, status));
    }

    /// Status between two distinct empires. An empire is never at war with itself.
    pub fn status(&self, a: EmpireId, b: EmpireId) -> DiplomaticStatus {
        if a == b {
            return DiplomaticStatus::Peace;
        }
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        self.diplomacy
            .iter()
            .find(|(x, y, _)| *x == low && *y == high)
            .map(|(_, _, status)| *status)
            .unwrap_or(DiplomaticStatus::War)
    }

    /// Returns true if `object` is the capital of any empire.
    pub fn is_capital(&self, object: ObjectId) -> bool {
        self.empires
            .values()
            .any(|empire| empire.capital == Some(object))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_status_is_war() {
        let empires = Empires::default();
        assert_eq!(
            empires.status(EmpireId(1), EmpireId(2)),
            DiplomaticStatus::War
        );
        assert_eq!(
            empires.status(EmpireId(1), EmpireId(1)),
            DiplomaticStatus::Peace
        );
    }

    #[test]
    fn test_status_is_symmetric() {
        let mut empires = Empires::default();
        empires.set_status(EmpireId(5), EmpireId(2), DiplomaticStatus::Peace);
        assert_eq!(
            empires.status(EmpireId(2), EmpireId(5)),
            DiplomaticStatus::Peace
        );
        empires.set_status(EmpireId(2), EmpireId(5), DiplomaticStatus::War);
        assert_eq!(
            empires.status(EmpireId(5), EmpireId(2)),
            DiplomaticStatus::War
        );
        assert_eq!(empires.diplomacy.len(), 1);
    }

    #[test]
    fn test_resource_groups() {
        let mut empire = Empire::new(EmpireId(1), "Terrans");
        empire
            .resource_groups
            .push([ObjectId(1), ObjectId(2)].into_iter().collect());
        empire.resource_groups.push([ObjectId(7)].into_iter().collect());
        assert!(empire.resource_connected(ObjectId(1), ObjectId(2)));
        assert!(!empire.resource_connected(ObjectId(1), ObjectId(7)));
        assert!(!empire.resource_connected(ObjectId(3), ObjectId(3)));
    }

    #[test]
    fn test_queued_quantity_sums_matching_items() {
        let mut empire = Empire::new(EmpireId(1), "Terrans");
        empire.production_queue.push(QueueItem {
            build_type: BuildType::Building,
            name: Some("BLD_SHIPYARD_BASE".to_string()),
            design_id: None,
            location: ObjectId(4),
            quantity: 1,
        });
        empire.production_queue.push(QueueItem {
            build_type: BuildType::Ship,
            name: None,
            design_id: Some(DesignId(3)),
            location: ObjectId(4),
            quantity: 2,
        });
        assert_eq!(empire.queued_at(ObjectId(4), |_| true), 3);
        assert_eq!(
            empire.queued_at(ObjectId(4), |item| item.build_type == BuildType::Ship),
            2
        );
        assert_eq!(empire.queued_at(ObjectId(5), |_| true), 0);
    }

    #[test]
    fn test_unlisted_object_is_invisible() {
        let empire = Empire::new(EmpireId(1), "Terrans");
        assert_eq!(empire.visibility_of(ObjectId(42)), Visibility::None);
    }
}
