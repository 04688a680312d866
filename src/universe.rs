//! The read-only universe the evaluator consults.

use std::collections::{BTreeMap, BTreeSet};

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

use crate::candidates::ObjectSet;
use crate::empire::{Empire, Empires};
use crate::ids::{DesignId, EmpireId, ObjectId};
use crate::object::Object;
use crate::registry::ContentRegistry;
use crate::starlanes::Starlanes;
use crate::types::{ObjectKind, PlanetSize, PlanetType, StarType};

/// Objects, empires, content and the starlane network for one turn.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serialization", serde(default))]
pub struct Universe {
    /// All objects, in ascending id order.
    pub objects: BTreeMap<ObjectId, Object>,
    pub current_turn: i32,
    /// Game-wide seed mixed into every stochastic predicate.
    pub game_seed: u64,
    pub starlanes: Starlanes,
    pub empires: Empires,
    pub registry: ContentRegistry,
}

impl Universe {
    /// Load a universe snapshot from JSON.
    #[cfg(feature = "serialization")]
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    #[cfg(feature = "serialization")]
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn object(&self, id: ObjectId) -> Option<&Object> {
        self.objects.get(&id)
    }

    pub fn objects(&self) -> impl Iterator<Item = &Object> {
        self.objects.values()
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn all_object_ids(&self) -> ObjectSet {
        self.objects.keys().copied().collect()
    }

    pub fn empire(&self, id: EmpireId) -> Option<&Empire> {
        self.empires.get(id)
    }

    /// Every object directly or transitively contained by `id`.
    pub fn contents_of(&self, id: ObjectId) -> ObjectSet {
        let mut found = ObjectSet::new();
        let mut stack: Vec<ObjectId> = self
            .object(id)
            .map(|object| object.contents.clone())
            .unwrap_or_default();
        while let Some(next) = stack.pop() {
            if next == id || !found.insert(next) {
                continue;
            }
            if let Some(object) = self.object(next) {
                stack.extend(object.contents.iter().copied());
            }
        }
        found
    }

    /// Every object directly or transitively containing `id`, innermost first.
    pub fn containers_of(&self, id: ObjectId) -> Vec<ObjectId> {
        let mut chain = Vec::new();
        let mut seen = BTreeSet::from([id]);
        let mut current = self.object(id).and_then(|object| object.container);
        while let Some(container) = current {
            if !seen.insert(container) {
                break;
            }
            chain.push(container);
            current = self.object(container).and_then(|object| object.container);
        }
        chain
    }

    /// The planet whose terrain applies to `object`: the planet itself, or
    /// the planet hosting a building.
    pub fn host_planet<'a>(&'a self, object: &'a Object) -> Option<&'a Object> {
        match object.kind {
            ObjectKind::Planet => Some(object),
            ObjectKind::Building => object
                .container
                .and_then(|id| self.object(id))
                .filter(|planet| planet.kind == ObjectKind::Planet),
            _ => None,
        }
    }

    /// The system an object is in, if any.
    pub fn system_of(&self, object: &Object) -> Option<&Object> {
        object
            .system_id
            .and_then(|id| self.object(id))
            .filter(|system| system.kind == ObjectKind::System)
    }

    /// The fleet a ship travels in.
    pub fn fleet_of(&self, ship: &Object) -> Option<&Object> {
        if ship.kind != ObjectKind::Ship {
            return None;
        }
        ship.container
            .and_then(|id| self.object(id))
            .filter(|fleet| fleet.kind == ObjectKind::Fleet)
    }

    /// Species of a planet or ship; buildings report their host planet's.
    pub fn species_of<'a>(&'a self, object: &'a Object) -> Option<&'a str> {
        match object.kind {
            ObjectKind::Planet | ObjectKind::Ship => object.species.as_deref(),
            ObjectKind::Building => self
                .host_planet(object)
                .and_then(|planet| planet.species.as_deref()),
            _ => None,
        }
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Incremental construction of a consistent universe.
///
/// Placing an object inside another fills in the container, contents,
/// system and position links on both sides.
#[derive(Debug)]
pub struct UniverseBuilder {
    universe: Universe,
    next_id: u32,
}

impl UniverseBuilder {
    pub fn new() -> Self {
        Self {
            universe: Universe::default(),
            next_id: 1,
        }
    }

    pub fn turn(&mut self, turn: i32) -> &mut Self {
        self.universe.current_turn = turn;
        self
    }

    pub fn seed(&mut self, seed: u64) -> &mut Self {
        self.universe.game_seed = seed;
        self
    }

    pub fn registry_mut(&mut self) -> &mut ContentRegistry {
        &mut self.universe.registry
    }

    pub fn empires_mut(&mut self) -> &mut Empires {
        &mut self.universe.empires
    }

    pub fn empire(&mut self, empire: Empire) -> &mut Self {
        self.universe.empires.insert(empire);
        self
    }

    /// Mutable access to an object already added.
    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut Object> {
        self.universe.objects.get_mut(&id)
    }

    /// Apply `edit` to an object already added. Unknown ids are ignored.
    pub fn edit(&mut self, id: ObjectId, edit: impl FnOnce(&mut Object)) -> &mut Self {
        if let Some(object) = self.universe.objects.get_mut(&id) {
            edit(object);
        }
        self
    }

    fn allocate(&mut self) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Add a prepared object, placing it inside `container` if given.
    ///
    /// The object's id is kept if it is not yet taken; otherwise a fresh id is
    /// assigned. Returns the id used.
    pub fn add_object(&mut self, mut object: Object, container: Option<ObjectId>) -> ObjectId {
        if object.id.0 == 0 || self.universe.objects.contains_key(&object.id) {
            object.id = self.allocate();
        } else if let Some(after) = object.id.0.checked_add(1) {
            self.next_id = self.next_id.max(after);
        }
        let id = object.id;
        object.created_on_turn = self.universe.current_turn;

        if object.kind == ObjectKind::System {
            object.system_id = Some(id);
            self.universe.starlanes.add_system(id, object.x, object.y);
        }
        if let Some(parent) = container.and_then(|c| self.universe.objects.get_mut(&c)) {
            parent.contents.push(id);
            object.container = Some(parent.id);
            object.system_id = parent.system_id;
            object.x = parent.x;
            object.y = parent.y;
        }
        self.universe.objects.insert(id, object);
        id
    }

    pub fn system(&mut self, name: &str, x: f64, y: f64) -> ObjectId {
        let mut system = Object::new(ObjectId(0), ObjectKind::System, name);
        system.x = x;
        system.y = y;
        system.star = Some(StarType::Yellow);
        self.add_object(system, None)
    }

    pub fn planet(
        &mut self,
        name: &str,
        system: ObjectId,
        planet_type: PlanetType,
        size: PlanetSize,
    ) -> ObjectId {
        let mut planet = Object::new(ObjectId(0), ObjectKind::Planet, name);
        planet.planet_type = Some(planet_type);
        planet.planet_size = Some(size);
        self.add_object(planet, Some(system))
    }

    pub fn building(&mut self, name: &str, planet: ObjectId, building_type: &str) -> ObjectId {
        let mut building = Object::new(ObjectId(0), ObjectKind::Building, name);
        building.building_type = Some(building_type.to_string());
        self.add_object(building, Some(planet))
    }

    pub fn fleet(&mut self, name: &str, system: ObjectId) -> ObjectId {
        let fleet = Object::new(ObjectId(0), ObjectKind::Fleet, name);
        self.add_object(fleet, Some(system))
    }

    pub fn ship(&mut self, name: &str, fleet: ObjectId, design: Option<DesignId>) -> ObjectId {
        let mut ship = Object::new(ObjectId(0), ObjectKind::Ship, name);
        ship.design_id = design;
        self.add_object(ship, Some(fleet))
    }

    /// Connect two systems with a starlane.
    pub fn lane(&mut self, a: ObjectId, b: ObjectId) -> &mut Self {
        self.universe.starlanes.add_lane(a, b);
        self
    }

    pub fn build(self) -> Universe {
        self.universe
    }
}

impl Default for UniverseBuilder {
    fn default() -> Self {
        Self::new()
    }
}
