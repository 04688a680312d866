//! Single-candidate tests for property, ownership, design and empire-state
//! predicates.
//!
//! Each test reads one property of the local candidate. Terrain-style
//! properties of a building (planet type, size, environment, species, focus,
//! homeworld) come from the planet hosting it. Missing data is never an
//! error: an absent meter, an unknown empire or a ship without a design is
//! simply a non-match.

use rand::Rng;
use tracing::trace;

use crate::condition::Condition;
use crate::context::ScriptingContext;
use crate::empire::Empire;
use crate::error::EvalResult;
use crate::ids::{DesignId, EmpireId, ObjectId};
use crate::object::Object;
use crate::random::seeded_rng;
use crate::registry::ShipDesign;
use crate::types::{DiplomaticStatus, EmpireAffiliationType, ObjectKind, Visibility};
use crate::universe::Universe;
use crate::value::{Value, resolve_range};

impl Condition {
    /// Test the local candidate against a leaf predicate.
    pub(crate) fn match_property(&self, ctx: &ScriptingContext<'_>) -> EvalResult<bool> {
        let name = self.name();
        let Some(candidate) = ctx.local_candidate(name)? else {
            return Ok(false);
        };
        let universe = ctx.universe;

        let matched = match self {
            // === Context identity ===
            Condition::All => true,
            Condition::Source => ctx.source(name)?.is_some_and(|o| o.id == candidate.id),
            Condition::RootCandidate => ctx
                .root_candidate(name)?
                .is_some_and(|o| o.id == candidate.id),
            Condition::Target => ctx.target(name)?.is_some_and(|o| o.id == candidate.id),
            Condition::ObjectId(id) => {
                resolve_object(id, ctx, name)? == Some(candidate.id)
            }

            // === Ownership ===
            Condition::EmpireAffiliation {
                empire,
                affiliation,
            } => {
                let empire = match empire {
                    Some(value) => match resolve_empire(value, ctx, name)? {
                        Some(empire) => Some(empire),
                        None => return Ok(false),
                    },
                    None => None,
                };
                affiliated(universe, candidate, empire, *affiliation)
            }
            Condition::ProducedByEmpire(empire) => {
                let empire = resolve_empire(empire, ctx, name)?;
                empire.is_some() && candidate.produced_by == empire
            }
            Condition::Capital => universe.empires.is_capital(candidate.id),
            Condition::OwnerHasTech(tech) => {
                owner_empire(universe, candidate).is_some_and(|e| e.has_tech(tech))
            }
            Condition::OwnerHasBuildingTypeAvailable(building_type) => owner_empire(
                universe, candidate,
            )
            .is_some_and(|e| e.building_type_available(building_type)),
            Condition::OwnerHasShipDesignAvailable(design) => {
                let Some(design) = resolve_design(design, ctx, name)? else {
                    return Ok(false);
                };
                owner_empire(universe, candidate).is_some_and(|e| e.design_available(design))
            }

            // === Kind and content ===
            Condition::Type(object_type) => object_type.admits(candidate.kind),
            Condition::Building(types) => {
                candidate.kind == ObjectKind::Building
                    && (types.is_empty()
                        || candidate
                            .building_type
                            .as_ref()
                            .is_some_and(|t| types.contains(t)))
            }
            Condition::HasSpecial {
                name: special,
                since_low,
                since_high,
            } => {
                let Some(special) = candidate.special(special) else {
                    return Ok(false);
                };
                resolve_range(since_low.as_ref(), since_high.as_ref(), ctx, name)?
                    .is_some_and(|range| range.contains_inclusive(f64::from(special.added_on_turn)))
            }
            Condition::HasTag(tag) => {
                candidate.has_tag(tag)
                    || universe
                        .species_of(candidate)
                        .and_then(|s| universe.registry.species(s))
                        .is_some_and(|s| s.tags.contains(tag))
            }
            Condition::CreatedOnTurn { low, high } => {
                resolve_range(low.as_ref(), high.as_ref(), ctx, name)?
                    .is_some_and(|range| range.contains_inclusive(f64::from(candidate.created_on_turn)))
            }
            Condition::Homeworld(species) => universe
                .host_planet(candidate)
                .is_some_and(|planet| universe.registry.is_homeworld(planet.id, species)),
            Condition::Monster => design_of(universe, candidate).is_some_and(|d| d.monster),
            Condition::Armed => design_of(universe, candidate)
                .is_some_and(|d| universe.registry.design_is_armed(d)),
            Condition::Stationary => is_stationary(universe, candidate),
            Condition::CanColonize => universe
                .species_of(candidate)
                .and_then(|s| universe.registry.species(s))
                .is_some_and(|s| s.can_colonize),
            Condition::CanProduceShips => universe
                .species_of(candidate)
                .and_then(|s| universe.registry.species(s))
                .is_some_and(|s| s.can_produce_ships),

            // === Terrain ===
            Condition::PlanetType(types) => universe
                .host_planet(candidate)
                .and_then(|planet| planet.planet_type)
                .is_some_and(|t| types.contains(&t)),
            Condition::PlanetSize(sizes) => universe
                .host_planet(candidate)
                .and_then(|planet| planet.planet_size)
                .is_some_and(|s| sizes.contains(&s)),
            Condition::PlanetEnvironment {
                environments,
                species,
            } => {
                let Some(planet) = universe.host_planet(candidate) else {
                    return Ok(false);
                };
                let species = species.as_deref().or(planet.species.as_deref());
                match (species.and_then(|s| universe.registry.species(s)), planet.planet_type) {
                    (Some(species), Some(planet_type)) => {
                        environments.contains(&species.environment_for(planet_type))
                    }
                    _ => {
                        trace!(condition = name, planet = %planet.id, "no species or planet type for environment");
                        false
                    }
                }
            }
            Condition::Species(names) => universe
                .species_of(candidate)
                .is_some_and(|s| names.is_empty() || names.iter().any(|n| n == s)),
            Condition::FocusType(foci) => universe
                .host_planet(candidate)
                .and_then(|planet| planet.focus.as_deref())
                .is_some_and(|f| foci.is_empty() || foci.iter().any(|n| n == f)),
            Condition::StarType(types) => universe
                .system_of(candidate)
                .and_then(|system| system.star)
                .is_some_and(|star| types.contains(&star)),

            // === Design ===
            Condition::DesignHasHull(hull) => {
                design_of(universe, candidate).is_some_and(|d| d.hull == *hull)
            }
            Condition::DesignHasPart {
                name: part,
                low,
                high,
            } => {
                let Some(design) = design_of(universe, candidate) else {
                    return Ok(false);
                };
                let count = if part.is_empty() {
                    design.parts.len()
                } else {
                    design.part_count(part)
                };
                part_count_in_range(count, low.as_ref(), high.as_ref(), ctx, name)?
            }
            Condition::DesignHasPartClass { class, low, high } => {
                let Some(design) = design_of(universe, candidate) else {
                    return Ok(false);
                };
                let count = universe.registry.part_class_count(design, *class);
                part_count_in_range(count, low.as_ref(), high.as_ref(), ctx, name)?
            }
            Condition::PredefinedShipDesign(design_name) => design_of(universe, candidate)
                .is_some_and(|d| d.predefined && d.name == *design_name),
            Condition::NumberedShipDesign(design) => {
                let design = resolve_design(design, ctx, name)?;
                design.is_some() && candidate.design_id == design
            }

            // === Meters ===
            Condition::MeterValue { meter, low, high } => {
                let Some(current) = candidate.meter(*meter) else {
                    trace!(condition = name, object = %candidate.id, meter = %meter, "meter missing");
                    return Ok(false);
                };
                resolve_range(low.as_ref(), high.as_ref(), ctx, name)?
                    .is_some_and(|range| range.contains_inclusive(current))
            }
            Condition::ShipPartMeterValue {
                part,
                meter,
                low,
                high,
            } => {
                let Some(current) = candidate.part_meter(part, *meter) else {
                    return Ok(false);
                };
                resolve_range(low.as_ref(), high.as_ref(), ctx, name)?
                    .is_some_and(|range| range.contains_inclusive(current))
            }
            Condition::EmpireMeterValue {
                empire,
                meter,
                low,
                high,
            } => {
                let empire = match empire {
                    Some(value) => resolve_empire(value, ctx, name)?.and_then(|id| universe.empire(id)),
                    None => owner_empire(universe, candidate),
                };
                let Some(current) = empire.and_then(|e| e.meter(meter)) else {
                    return Ok(false);
                };
                resolve_range(low.as_ref(), high.as_ref(), ctx, name)?
                    .is_some_and(|range| range.contains_inclusive(current))
            }
            Condition::EmpireStockpileValue {
                resource,
                low,
                high,
            } => {
                let Some(current) =
                    owner_empire(universe, candidate).and_then(|e| e.stockpile(*resource))
                else {
                    return Ok(false);
                };
                resolve_range(low.as_ref(), high.as_ref(), ctx, name)?
                    .is_some_and(|range| range.contains_inclusive(current))
            }

            // === Production ===
            Condition::Enqueued {
                build_type,
                name: item_name,
                design,
                empire,
                low,
                high,
            } => {
                let design = match design {
                    Some(value) => match resolve_design(value, ctx, name)? {
                        Some(design) => Some(design),
                        None => return Ok(false),
                    },
                    None => None,
                };
                let empires: Vec<&Empire> = match empire {
                    Some(value) => {
                        match resolve_empire(value, ctx, name)?.and_then(|id| universe.empire(id)) {
                            Some(empire) => vec![empire],
                            None => return Ok(false),
                        }
                    }
                    None => universe.empires.iter().collect(),
                };
                let queued: u32 = empires
                    .iter()
                    .map(|e| {
                        e.queued_at(candidate.id, |item| {
                            item.build_type == *build_type
                                && item_name
                                    .as_ref()
                                    .is_none_or(|n| item.name.as_ref() == Some(n))
                                && design.is_none_or(|d| item.design_id == Some(d))
                        })
                    })
                    .sum();
                if low.is_none() && high.is_none() {
                    queued >= 1
                } else {
                    resolve_range(low.as_ref(), high.as_ref(), ctx, name)?
                        .is_some_and(|range| range.contains_inclusive(f64::from(queued)))
                }
            }

            // === Location and empire state ===
            Condition::InSystem(system) => match (candidate.system_id, system) {
                (None, _) => false,
                (Some(_), None) => true,
                (Some(current), Some(value)) => resolve_object(value, ctx, name)? == Some(current),
            },
            Condition::VisibleToEmpire(empire) => resolve_empire(empire, ctx, name)?
                .and_then(|id| universe.empire(id))
                .is_some_and(|e| e.visibility_of(candidate.id) > Visibility::None),
            Condition::ExploredByEmpire(empire) => resolve_empire(empire, ctx, name)?
                .and_then(|id| universe.empire(id))
                .is_some_and(|e| e.has_explored(candidate.id)),
            Condition::FleetSupplyableByEmpire(empire) => {
                let empire = resolve_empire(empire, ctx, name)?.and_then(|id| universe.empire(id));
                match (empire, candidate.system_id) {
                    (Some(empire), Some(system)) => empire.can_fleet_supply(system),
                    _ => false,
                }
            }

            // === Stochastic ===
            Condition::Chance(probability) => {
                let Some(probability) = probability.resolve(ctx, name)? else {
                    return Ok(false);
                };
                let mut rng = seeded_rng(ctx, &self.dump(), Some(candidate.id));
                rng.random::<f64>() < probability
            }

            // Combinators, quantifiers and relational nodes are dispatched
            // before reaching here.
            _ => false,
        };
        Ok(matched)
    }
}

fn resolve_object(
    value: &Value,
    ctx: &ScriptingContext<'_>,
    condition: &'static str,
) -> EvalResult<Option<ObjectId>> {
    Ok(value.resolve(ctx, condition)?.and_then(ObjectId::from_value))
}

pub(crate) fn resolve_empire(
    value: &Value,
    ctx: &ScriptingContext<'_>,
    condition: &'static str,
) -> EvalResult<Option<EmpireId>> {
    Ok(value.resolve(ctx, condition)?.and_then(EmpireId::from_value))
}

fn resolve_design(
    value: &Value,
    ctx: &ScriptingContext<'_>,
    condition: &'static str,
) -> EvalResult<Option<DesignId>> {
    Ok(value.resolve(ctx, condition)?.and_then(DesignId::from_value))
}

fn owner_empire<'a>(universe: &'a Universe, object: &Object) -> Option<&'a Empire> {
    object.owner.and_then(|owner| universe.empire(owner))
}

fn design_of<'a>(universe: &'a Universe, object: &Object) -> Option<&'a ShipDesign> {
    if object.kind != ObjectKind::Ship {
        return None;
    }
    object.design_id.and_then(|id| universe.registry.design(id))
}

fn affiliated(
    universe: &Universe,
    object: &Object,
    empire: Option<EmpireId>,
    affiliation: EmpireAffiliationType,
) -> bool {
    match affiliation {
        EmpireAffiliationType::Any => object.owner.is_some(),
        EmpireAffiliationType::None => object.owner.is_none(),
        EmpireAffiliationType::TheEmpire => empire.is_some() && object.owner == empire,
        EmpireAffiliationType::Enemy | EmpireAffiliationType::Ally => {
            let (Some(empire), Some(owner)) = (empire, object.owner) else {
                return false;
            };
            let wanted = if affiliation == EmpireAffiliationType::Enemy {
                DiplomaticStatus::War
            } else {
                DiplomaticStatus::Peace
            };
            owner != empire && universe.empires.status(owner, empire) == wanted
        }
    }
}

/// Fleets (and the ships in them) are stationary when they have no
/// destination beyond their current system. Other objects never move.
fn is_stationary(universe: &Universe, object: &Object) -> bool {
    let fleet = match object.kind {
        ObjectKind::Fleet => object,
        ObjectKind::Ship => match universe.fleet_of(object) {
            Some(fleet) => fleet,
            None => return false,
        },
        _ => return true,
    };
    fleet.final_destination.is_none() || fleet.final_destination == fleet.system_id
}

/// Half-open part-count test. Without a lower bound at least one part is
/// required.
fn part_count_in_range(
    count: usize,
    low: Option<&Value>,
    high: Option<&Value>,
    ctx: &ScriptingContext<'_>,
    condition: &'static str,
) -> EvalResult<bool> {
    let Some(mut range) = resolve_range(low, high, ctx, condition)? else {
        return Ok(false);
    };
    if low.is_none() {
        range.low = 1.0;
    }
    Ok(range.contains_half_open(count as f64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidates::ObjectSet;
    use crate::context::EvalMode;
    use crate::error::EvalError;
    use crate::tests::{FRIGATE, LAENFA, TERRANS, sample_galaxy};
    use crate::types::{
        MeterType, ObjectType, PlanetEnvironment, PlanetSize, PlanetType, ShipPartClass, StarType,
    };
    use crate::value::ObjectRef;

    fn matching(cond: &Condition, ctx: &ScriptingContext<'_>) -> ObjectSet {
        cond.eval_universe(ctx).expect("eval succeeds")
    }

    #[test]
    fn test_type_and_building() {
        let galaxy = sample_galaxy();
        let ctx = ScriptingContext::new(&galaxy.universe);
        assert_eq!(
            matching(&Condition::of_type(ObjectType::Planet), &ctx),
            ObjectSet::from([galaxy.earth, galaxy.mars, galaxy.vulcan])
        );
        assert_eq!(
            matching(&Condition::Building(vec!["BLD_SHIPYARD_BASE".into()]), &ctx),
            ObjectSet::from([galaxy.shipyard])
        );
        assert!(matching(&Condition::Building(vec!["BLD_GAS_GIANT_GEN".into()]), &ctx).is_empty());
    }

    #[test]
    fn test_buildings_delegate_terrain_to_host_planet() {
        let galaxy = sample_galaxy();
        let ctx = ScriptingContext::new(&galaxy.universe);
        let terran = matching(&Condition::PlanetType(vec![PlanetType::Terran]), &ctx);
        assert_eq!(terran, ObjectSet::from([galaxy.earth, galaxy.shipyard]));

        let medium = matching(&Condition::PlanetSize(vec![PlanetSize::Medium]), &ctx);
        assert!(medium.contains(galaxy.shipyard));

        let human = matching(&Condition::Species(vec!["SP_HUMAN".into()]), &ctx);
        assert_eq!(
            human,
            ObjectSet::from([galaxy.earth, galaxy.shipyard, galaxy.frigate]),
            "ships carry their own species, buildings their planet's"
        );

        let industry = matching(&Condition::FocusType(vec!["FOCUS_INDUSTRY".into()]), &ctx);
        assert_eq!(industry, ObjectSet::from([galaxy.earth, galaxy.shipyard]));
    }

    #[test]
    fn test_planet_environment() {
        let galaxy = sample_galaxy();
        let ctx = ScriptingContext::new(&galaxy.universe);
        let good = Condition::PlanetEnvironment {
            environments: vec![PlanetEnvironment::Good],
            species: None,
        };
        assert_eq!(
            matching(&good, &ctx),
            ObjectSet::from([galaxy.earth, galaxy.shipyard])
        );

        let poor_for_humans = Condition::PlanetEnvironment {
            environments: vec![PlanetEnvironment::Poor],
            species: Some("SP_HUMAN".into()),
        };
        assert_eq!(matching(&poor_for_humans, &ctx), ObjectSet::from([galaxy.mars]));
    }

    #[test]
    fn test_star_type_applies_to_system_contents() {
        let galaxy = sample_galaxy();
        let ctx = ScriptingContext::new(&galaxy.universe);
        let red = matching(&Condition::StarType(vec![StarType::Red]), &ctx);
        assert_eq!(red, ObjectSet::from([galaxy.beta, galaxy.vulcan]));
    }

    #[test]
    fn test_affiliation() {
        let galaxy = sample_galaxy();
        let ctx = ScriptingContext::new(&galaxy.universe);
        let owned = matching(&Condition::owned_by(TERRANS.0), &ctx);
        assert!(owned.contains(galaxy.earth));
        assert!(!owned.contains(galaxy.vulcan));

        let enemies = matching(
            &Condition::affiliation(
                Some(Value::from(TERRANS.0)),
                EmpireAffiliationType::Enemy,
            ),
            &ctx,
        );
        assert_eq!(enemies, ObjectSet::from([galaxy.vulcan]));

        let allies = matching(
            &Condition::affiliation(Some(Value::from(TERRANS.0)), EmpireAffiliationType::Ally),
            &ctx,
        );
        assert!(allies.is_empty(), "an empire is not its own ally");

        let unowned = matching(
            &Condition::affiliation(None, EmpireAffiliationType::None),
            &ctx,
        );
        assert!(unowned.contains(galaxy.mars));
        assert!(!unowned.contains(galaxy.earth));
    }

    #[test]
    fn test_peace_makes_allies() {
        let mut galaxy = sample_galaxy();
        galaxy
            .universe
            .empires
            .set_status(TERRANS, LAENFA, DiplomaticStatus::Peace);
        let ctx = ScriptingContext::new(&galaxy.universe);
        let allies = matching(
            &Condition::affiliation(Some(Value::from(TERRANS.0)), EmpireAffiliationType::Ally),
            &ctx,
        );
        assert_eq!(allies, ObjectSet::from([galaxy.vulcan]));
    }

    #[test]
    fn test_design_predicates() {
        let galaxy = sample_galaxy();
        let ctx = ScriptingContext::new(&galaxy.universe);
        assert_eq!(matching(&Condition::Armed, &ctx), ObjectSet::from([galaxy.frigate]));
        assert_eq!(matching(&Condition::Monster, &ctx), ObjectSet::from([galaxy.kraken]));
        assert_eq!(
            matching(&Condition::PredefinedShipDesign("SM_KRAKEN_1".into()), &ctx),
            ObjectSet::from([galaxy.kraken])
        );
        assert_eq!(
            matching(&Condition::NumberedShipDesign(Value::from(FRIGATE.0)), &ctx),
            ObjectSet::from([galaxy.frigate])
        );

        let one_weapon = Condition::DesignHasPartClass {
            class: ShipPartClass::ShortRange,
            low: None,
            high: None,
        };
        assert_eq!(matching(&one_weapon, &ctx), ObjectSet::from([galaxy.frigate]));

        let at_most_zero_plates = Condition::DesignHasPart {
            name: "AR_STD_PLATE".into(),
            low: Some(Value::from(0)),
            high: Some(Value::from(1)),
        };
        assert_eq!(
            matching(&at_most_zero_plates, &ctx),
            ObjectSet::from([galaxy.kraken]),
            "half-open range excludes the frigate's single plate"
        );
    }

    #[test]
    fn test_stationary() {
        let galaxy = sample_galaxy();
        let ctx = ScriptingContext::new(&galaxy.universe);
        let stationary = matching(&Condition::Stationary, &ctx);
        assert!(stationary.contains(galaxy.fleets[0]));
        assert!(stationary.contains(galaxy.frigate));
        assert!(!stationary.contains(galaxy.fleets[1]));
        assert!(!stationary.contains(galaxy.kraken));
        assert!(stationary.contains(galaxy.earth));
    }

    #[test]
    fn test_missing_meter_never_matches() {
        let galaxy = sample_galaxy();
        let ctx = ScriptingContext::new(&galaxy.universe).with_mode(EvalMode::Strict);
        let cond = Condition::meter_value(MeterType::Industry, None, None);
        assert_eq!(
            matching(&cond, &ctx),
            ObjectSet::from([galaxy.earth]),
            "only Earth has an industry meter"
        );
        let bounded = Condition::meter_value(
            MeterType::Population,
            Some(Value::from(6)),
            Some(Value::from(12)),
        );
        assert_eq!(matching(&bounded, &ctx), ObjectSet::from([galaxy.earth]));
    }

    #[test]
    fn test_empire_state_predicates() {
        let galaxy = sample_galaxy();
        let ctx = ScriptingContext::new(&galaxy.universe);
        let explored = matching(&Condition::ExploredByEmpire(Value::from(TERRANS.0)), &ctx);
        assert_eq!(explored, ObjectSet::from([galaxy.sol, galaxy.alpha]));

        let supplied = matching(
            &Condition::FleetSupplyableByEmpire(Value::from(TERRANS.0)),
            &ctx,
        );
        assert!(supplied.contains(galaxy.earth));
        assert!(!supplied.contains(galaxy.vulcan));

        let unknown_empire = matching(&Condition::VisibleToEmpire(Value::from(99)), &ctx);
        assert!(unknown_empire.is_empty());
    }

    #[test]
    fn test_owner_availability() {
        let galaxy = sample_galaxy();
        let ctx = ScriptingContext::new(&galaxy.universe);
        let teched = matching(&Condition::OwnerHasTech("SHP_ZORTRIUM_PLATE".into()), &ctx);
        assert!(teched.contains(galaxy.earth));
        assert!(!teched.contains(galaxy.mars));
        assert_eq!(
            matching(&Condition::Capital, &ctx),
            ObjectSet::from([galaxy.earth])
        );
        assert_eq!(
            matching(&Condition::Homeworld(vec![]), &ctx),
            ObjectSet::from([galaxy.earth, galaxy.shipyard])
        );
        let colonizers = matching(&Condition::CanColonize, &ctx);
        assert!(colonizers.contains(galaxy.frigate));
        assert!(!colonizers.contains(galaxy.vulcan));
    }

    #[test]
    fn test_has_tag_includes_species_tags() {
        let galaxy = sample_galaxy();
        let ctx = ScriptingContext::new(&galaxy.universe);
        let organic = matching(&Condition::HasTag("ORGANIC".into()), &ctx);
        assert!(organic.contains(galaxy.frigate));
        assert!(organic.contains(galaxy.earth));
        assert!(!organic.contains(galaxy.vulcan));
    }

    #[test]
    fn test_source_requires_binding_in_strict_mode() {
        let galaxy = sample_galaxy();
        let lenient = ScriptingContext::new(&galaxy.universe);
        assert!(matching(&Condition::Source, &lenient).is_empty());

        let strict = lenient.with_mode(EvalMode::Strict);
        assert_eq!(
            Condition::Source.eval_universe(&strict),
            Err(EvalError::MissingSource { condition: "Source" })
        );

        let bound = strict.with_source(galaxy.earth);
        assert_eq!(
            Condition::Source.eval_universe(&bound),
            Ok(ObjectSet::from([galaxy.earth]))
        );
    }

    #[test]
    fn test_object_id_from_source_property() {
        let galaxy = sample_galaxy();
        let ctx = ScriptingContext::new(&galaxy.universe).with_source(galaxy.frigate);
        let cond = Condition::object_id(Value::property(
            ObjectRef::Source,
            crate::value::Property::ContainerId,
        ));
        assert_eq!(matching(&cond, &ctx), ObjectSet::from([galaxy.fleets[0]]));
    }

    #[test]
    fn test_chance_boundaries() {
        let galaxy = sample_galaxy();
        let ctx = ScriptingContext::new(&galaxy.universe);
        assert!(matching(&Condition::chance(0.0), &ctx).is_empty());
        assert_eq!(
            matching(&Condition::chance(1.0), &ctx).len(),
            galaxy.universe.object_count()
        );
    }
}
