//! Shared fixtures for unit tests.

use crate::empire::Empire;
use crate::ids::{DesignId, EmpireId, ObjectId};
use crate::registry::{ShipDesign, Species};
use crate::types::{
    DiplomaticStatus, MeterType, PlanetEnvironment, PlanetSize, PlanetType, ShipPartClass,
    StarType,
};
use crate::universe::{Universe, UniverseBuilder};

pub(crate) const TERRANS: EmpireId = EmpireId(1);
pub(crate) const LAENFA: EmpireId = EmpireId(2);
pub(crate) const FRIGATE: DesignId = DesignId(1);
pub(crate) const KRAKEN: DesignId = DesignId(2);

/// A small four-system galaxy laid out on a line:
///
/// ```text
/// Sol (0,0) -- Alpha (100,0) -- Beta (200,0) -- Gamma (300,0)
/// ```
///
/// Terrans own Earth (their capital) and a shipyard on it, plus a fleet of
/// one armed frigate parked at Sol. The Laenfa own Vulcan at Beta. A monster
/// fleet at Gamma is heading for Beta. Mars at Sol is unowned.
pub(crate) struct Galaxy {
    pub universe: Universe,
    pub sol: ObjectId,
    pub alpha: ObjectId,
    pub beta: ObjectId,
    pub gamma: ObjectId,
    pub earth: ObjectId,
    pub mars: ObjectId,
    pub vulcan: ObjectId,
    pub shipyard: ObjectId,
    pub fleets: Vec<ObjectId>,
    pub frigate: ObjectId,
    pub kraken: ObjectId,
}

pub(crate) fn sample_galaxy() -> Galaxy {
    let mut builder = UniverseBuilder::new();
    builder.turn(10).seed(42);

    let registry = builder.registry_mut();
    registry.add_part("SR_WEAPON_1", ShipPartClass::ShortRange);
    registry.add_part("AR_STD_PLATE", ShipPartClass::Armour);
    registry.add_part("DT_DETECTOR_1", ShipPartClass::Detector);
    let mut frigate_design = ShipDesign::new(FRIGATE, "Frigate", "SH_BASIC_MEDIUM");
    frigate_design.parts = vec!["SR_WEAPON_1".into(), "AR_STD_PLATE".into()];
    registry.add_design(frigate_design);
    let mut kraken_design = ShipDesign::new(KRAKEN, "SM_KRAKEN_1", "SH_KRAKEN_BODY");
    kraken_design.parts = vec!["DT_DETECTOR_1".into()];
    kraken_design.predefined = true;
    kraken_design.monster = true;
    registry.add_design(kraken_design);
    registry.add_building_type("BLD_SHIPYARD_BASE");

    let sol = builder.system("Sol", 0.0, 0.0);
    let alpha = builder.system("Alpha", 100.0, 0.0);
    let beta = builder.system("Beta", 200.0, 0.0);
    let gamma = builder.system("Gamma", 300.0, 0.0);
    builder.lane(sol, alpha).lane(alpha, beta).lane(beta, gamma);
    builder.edit(beta, |system| system.star = Some(StarType::Red));
    builder.edit(gamma, |system| system.star = Some(StarType::BlackHole));

    let earth = builder.planet("Earth", sol, PlanetType::Terran, PlanetSize::Medium);
    builder.edit(earth, |planet| {
        planet.owner = Some(TERRANS);
        planet.species = Some("SP_HUMAN".into());
        planet.focus = Some("FOCUS_INDUSTRY".into());
        planet.meters.insert(MeterType::Population, 12.0);
        planet.meters.insert(MeterType::Industry, 8.0);
        planet.tags.insert("CAPITAL_WORLD".into());
    });
    let mars = builder.planet("Mars", sol, PlanetType::Desert, PlanetSize::Small);
    let vulcan = builder.planet("Vulcan", beta, PlanetType::Inferno, PlanetSize::Large);
    builder.edit(vulcan, |planet| {
        planet.owner = Some(LAENFA);
        planet.species = Some("SP_LAENFA".into());
        planet.focus = Some("FOCUS_RESEARCH".into());
        planet.meters.insert(MeterType::Population, 5.0);
    });

    let shipyard = builder.building("Shipyard", earth, "BLD_SHIPYARD_BASE");
    builder.edit(shipyard, |building| {
        building.owner = Some(TERRANS);
        building.produced_by = Some(TERRANS);
    });

    let home_fleet = builder.fleet("Home Fleet", sol);
    builder.edit(home_fleet, |fleet| fleet.owner = Some(TERRANS));
    let frigate = builder.ship("Frigate", home_fleet, Some(FRIGATE));
    builder.edit(frigate, |ship| {
        ship.owner = Some(TERRANS);
        ship.species = Some("SP_HUMAN".into());
        ship.produced_by = Some(TERRANS);
        ship.meters.insert(MeterType::Structure, 30.0);
    });

    let monster_fleet = builder.fleet("Monsters", gamma);
    builder.edit(monster_fleet, |fleet| fleet.final_destination = Some(beta));
    let kraken = builder.ship("Kraken", monster_fleet, Some(KRAKEN));

    let mut human = Species::new("SP_HUMAN");
    human.homeworlds.insert(earth);
    human
        .environments
        .insert(PlanetType::Terran, PlanetEnvironment::Good);
    human
        .environments
        .insert(PlanetType::Desert, PlanetEnvironment::Poor);
    human.tags.insert("ORGANIC".into());
    builder.registry_mut().add_species(human);
    let mut laenfa = Species::new("SP_LAENFA");
    laenfa.can_colonize = false;
    laenfa
        .environments
        .insert(PlanetType::Inferno, PlanetEnvironment::Adequate);
    builder.registry_mut().add_species(laenfa);

    let mut terrans = Empire::new(TERRANS, "Terran Federation");
    terrans.capital = Some(earth);
    terrans.techs.insert("SHP_ZORTRIUM_PLATE".into());
    terrans.available_building_types.insert("BLD_SHIPYARD_BASE".into());
    terrans.available_designs.insert(FRIGATE);
    terrans.explored_systems.extend([sol, alpha]);
    terrans.fleet_supplyable_systems.extend([sol, alpha]);
    terrans.resource_groups.push([sol, alpha, beta].into_iter().collect());
    builder.empire(terrans);
    builder.empire(Empire::new(LAENFA, "Laenfa Collective"));
    builder
        .empires_mut()
        .set_status(TERRANS, LAENFA, DiplomaticStatus::War);

    Galaxy {
        universe: builder.build(),
        sol,
        alpha,
        beta,
        gamma,
        earth,
        mars,
        vulcan,
        shipyard,
        fleets: vec![home_fleet, monster_fleet],
        frigate,
        kraken,
    }
}
