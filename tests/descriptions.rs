use std::sync::Arc;

use starlane_conditions::{
    ClauseList, Condition, ConditionRef, MeterType, ObjectType, PlanetSize, PlanetType,
    ScriptingContext, UniverseBuilder, Value, describe_conditions,
};

fn colony_requirements() -> Vec<ConditionRef> {
    let planet = Condition::of_type(ObjectType::Planet);
    let habitable = Condition::PlanetType(vec![PlanetType::Ocean, PlanetType::Terran]);
    vec![
        Arc::new(Condition::and([planet.clone(), habitable.clone()])),
        Arc::new(Condition::and([
            planet,
            Condition::and([
                Condition::not(Condition::meter_value(
                    MeterType::Population,
                    Some(Value::from(1)),
                    None,
                )),
                habitable,
            ]),
        ])),
    ]
}

#[test]
fn requirements_are_flattened_and_deduplicated() {
    let universe = UniverseBuilder::new().build();
    let ctx = ScriptingContext::new(&universe);
    let description =
        describe_conditions(&colony_requirements(), None, &ctx).expect("description succeeds");

    assert_eq!(description.list, ClauseList::AllOf);
    let texts: Vec<_> = description.clauses.iter().map(|c| c.text.clone()).collect();
    assert_eq!(
        texts,
        [
            "is a Planet",
            "is a planet of type one of Ocean, Terran",
            "does not have Population at least 1",
        ]
    );
    assert!(description.clauses.iter().all(|c| c.met.is_none()));
    assert_eq!(
        description.to_string(),
        "All of:\n  is a Planet\n  is a planet of type one of Ocean, Terran\n  does not have Population at least 1\n"
    );
}

#[test]
fn candidate_annotations() {
    let mut builder = UniverseBuilder::new();
    let system = builder.system("Kappa", 0.0, 0.0);
    let empty_ocean = builder.planet("Kappa I", system, PlanetType::Ocean, PlanetSize::Large);
    let settled = builder.planet("Kappa II", system, PlanetType::Terran, PlanetSize::Small);
    builder.edit(settled, |p| {
        p.meters.insert(MeterType::Population, 3.0);
    });
    let universe = builder.build();
    let ctx = ScriptingContext::new(&universe);

    let ok = describe_conditions(&colony_requirements(), Some(empty_ocean), &ctx)
        .expect("description succeeds");
    assert_eq!(ok.verdict, Some(true));
    assert!(ok.clauses.iter().all(|c| c.met == Some(true)));

    let taken = describe_conditions(&colony_requirements(), Some(settled), &ctx)
        .expect("description succeeds");
    assert_eq!(taken.verdict, Some(false));
    let unmet: Vec<_> = taken
        .clauses
        .iter()
        .filter(|c| c.met == Some(false))
        .map(|c| c.text.as_str())
        .collect();
    assert_eq!(unmet, ["does not have Population at least 1"]);
    assert!(taken.to_string().ends_with("Requirements not met"));
}

#[test]
fn single_or_lists_alternatives() {
    let universe = UniverseBuilder::new().build();
    let ctx = ScriptingContext::new(&universe);
    let conditions = vec![Arc::new(Condition::or([
        Condition::of_type(ObjectType::Ship),
        Condition::of_type(ObjectType::Building),
        Condition::of_type(ObjectType::Ship),
    ]))];
    let description = describe_conditions(&conditions, None, &ctx).expect("description succeeds");
    assert_eq!(description.list, ClauseList::OneOf);
    assert_eq!(description.clauses.len(), 2);
    assert!(description.to_string().starts_with("One of:\n"));
}

#[test]
fn empty_list_is_satisfied() {
    let mut builder = UniverseBuilder::new();
    let system = builder.system("Lone", 0.0, 0.0);
    let universe = builder.build();
    let ctx = ScriptingContext::new(&universe);
    let description = describe_conditions(&[], Some(system), &ctx).expect("description succeeds");
    assert!(description.clauses.is_empty());
    assert_eq!(description.verdict, Some(true));
}
