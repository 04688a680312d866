//! Script text and English descriptions of condition trees.
//!
//! `dump` writes the tree back in script form. `And`/`Or` lists put one child
//! per line, indented four spaces per level. Two structurally equal trees
//! always dump to the same text, which is what seeds stochastic predicates.

use std::fmt;

use crate::condition::{Condition, ConditionRef};
use crate::types::{EmpireAffiliationType, ObjectType};
use crate::value::Value;

const INDENT: &str = "    ";

impl Condition {
    /// Script text of the tree.
    pub fn dump(&self) -> String {
        self.dump_at(0)
    }

    fn dump_at(&self, depth: usize) -> String {
        match self {
            Condition::All => "All".to_string(),
            Condition::Source => "Source".to_string(),
            Condition::RootCandidate => "RootCandidate".to_string(),
            Condition::Target => "Target".to_string(),
            Condition::ObjectId(id) => format!("Object id = {id}"),
            Condition::EmpireAffiliation {
                empire,
                affiliation,
            } => {
                let mut text = match affiliation {
                    EmpireAffiliationType::TheEmpire => "OwnedBy".to_string(),
                    other => format!("OwnedBy affiliation = {other}"),
                };
                if let Some(empire) = empire {
                    text.push_str(&format!(" empire = {empire}"));
                }
                text
            }
            Condition::ProducedByEmpire(empire) => format!("ProducedByEmpire empire = {empire}"),
            Condition::Capital => "Capital".to_string(),
            Condition::OwnerHasTech(name) => format!("OwnerHasTech name = \"{name}\""),
            Condition::OwnerHasBuildingTypeAvailable(name) => {
                format!("OwnerHasBuildingTypeAvailable name = \"{name}\"")
            }
            Condition::OwnerHasShipDesignAvailable(design) => {
                format!("OwnerHasShipDesignAvailable design = {design}")
            }
            Condition::Type(object_type) => object_type.script_name().to_string(),
            Condition::Building(names) => with_list("Building", "name", &quoted(names)),
            Condition::HasSpecial {
                name,
                since_low,
                since_high,
            } => format!(
                "HasSpecial name = \"{name}\"{}",
                bounds(since_low.as_ref(), since_high.as_ref())
            ),
            Condition::HasTag(name) => format!("HasTag name = \"{name}\""),
            Condition::CreatedOnTurn { low, high } => {
                format!("CreatedOnTurn{}", bounds(low.as_ref(), high.as_ref()))
            }
            Condition::Homeworld(names) => with_list("Homeworld", "name", &quoted(names)),
            Condition::Monster => "Monster".to_string(),
            Condition::Armed => "Armed".to_string(),
            Condition::Stationary => "Stationary".to_string(),
            Condition::CanColonize => "CanColonize".to_string(),
            Condition::CanProduceShips => "CanProduceShips".to_string(),
            Condition::PlanetType(types) => with_list("Planet", "type", &plain(types)),
            Condition::PlanetSize(sizes) => with_list("Planet", "size", &plain(sizes)),
            Condition::PlanetEnvironment {
                environments,
                species,
            } => {
                let mut text = with_list("Planet", "environment", &plain(environments));
                if let Some(species) = species {
                    text.push_str(&format!(" species = \"{species}\""));
                }
                text
            }
            Condition::Species(names) => with_list("Species", "name", &quoted(names)),
            Condition::FocusType(names) => with_list("Focus", "type", &quoted(names)),
            Condition::StarType(types) => with_list("Star", "type", &plain(types)),
            Condition::DesignHasHull(name) => format!("DesignHasHull name = \"{name}\""),
            Condition::DesignHasPart { name, low, high } => format!(
                "DesignHasPart{} name = \"{name}\"",
                bounds(low.as_ref(), high.as_ref())
            ),
            Condition::DesignHasPartClass { class, low, high } => format!(
                "DesignHasPartClass{} class = {class}",
                bounds(low.as_ref(), high.as_ref())
            ),
            Condition::PredefinedShipDesign(name) => format!("Design name = \"{name}\""),
            Condition::NumberedShipDesign(design) => format!("NumberedShipDesign designid = {design}"),
            Condition::MeterValue { meter, low, high } => {
                format!("{meter}{}", bounds(low.as_ref(), high.as_ref()))
            }
            Condition::ShipPartMeterValue {
                part,
                meter,
                low,
                high,
            } => format!(
                "ShipPartMeter part = \"{part}\" meter = {meter}{}",
                bounds(low.as_ref(), high.as_ref())
            ),
            Condition::EmpireMeterValue {
                empire,
                meter,
                low,
                high,
            } => {
                let empire = empire
                    .as_ref()
                    .map(|empire| format!(" empire = {empire}"))
                    .unwrap_or_default();
                format!(
                    "EmpireMeter{empire} meter = \"{meter}\"{}",
                    bounds(low.as_ref(), high.as_ref())
                )
            }
            Condition::EmpireStockpileValue {
                resource,
                low,
                high,
            } => format!(
                "EmpireStockpile resource = {resource}{}",
                bounds(low.as_ref(), high.as_ref())
            ),
            Condition::Enqueued {
                build_type,
                name,
                design,
                empire,
                low,
                high,
            } => {
                let mut text = format!("Enqueued type = {build_type}");
                if let Some(name) = name {
                    text.push_str(&format!(" name = \"{name}\""));
                }
                if let Some(design) = design {
                    text.push_str(&format!(" design = {design}"));
                }
                if let Some(empire) = empire {
                    text.push_str(&format!(" empire = {empire}"));
                }
                text.push_str(&bounds(low.as_ref(), high.as_ref()));
                text
            }
            Condition::Contains(child) => format!("Contains condition = {}", child.dump_at(depth)),
            Condition::ContainedBy(child) => format!("ContainedBy condition = {}", child.dump_at(depth)),
            Condition::InSystem(Some(system)) => format!("InSystem id = {system}"),
            Condition::InSystem(None) => "InSystem".to_string(),
            Condition::WithinDistance {
                distance,
                condition,
            } => format!(
                "WithinDistance distance = {distance} condition = {}",
                condition.dump_at(depth)
            ),
            Condition::WithinStarlaneJumps { jumps, condition } => format!(
                "WithinStarlaneJumps jumps = {jumps} condition = {}",
                condition.dump_at(depth)
            ),
            Condition::CanAddStarlaneConnection(child) => {
                format!("CanAddStarlanesTo condition = {}", child.dump_at(depth))
            }
            Condition::CanRemoveStarlaneConnection(child) => {
                format!("CanRemoveStarlanesTo condition = {}", child.dump_at(depth))
            }
            Condition::VisibleToEmpire(empire) => format!("VisibleToEmpire empire = {empire}"),
            Condition::ExploredByEmpire(empire) => format!("ExploredByEmpire empire = {empire}"),
            Condition::FleetSupplyableByEmpire(empire) => {
                format!("FleetSupplyableByEmpire empire = {empire}")
            }
            Condition::ResourceSupplyConnectedByEmpire { empire, condition } => format!(
                "ResourceSupplyConnected empire = {empire} condition = {}",
                condition.dump_at(depth)
            ),
            Condition::Chance(probability) => format!("Random probability = {probability}"),
            Condition::And(children) => self.dump_list("And", children, depth),
            Condition::Or(children) => self.dump_list("Or", children, depth),
            Condition::Not(child) => format!("Not {}", child.dump_at(depth)),
            Condition::Number {
                low,
                high,
                condition,
            } => format!(
                "Number{} condition = {}",
                bounds(low.as_ref(), high.as_ref()),
                condition.dump_at(depth)
            ),
            Condition::Turn { low, high } => format!("Turn{}", bounds(low.as_ref(), high.as_ref())),
            Condition::SortedNumberOf {
                number,
                sort_key,
                method,
                condition,
            } => {
                let key = sort_key
                    .as_ref()
                    .map(|key| format!(" sortkey = {key}"))
                    .unwrap_or_default();
                format!("{method} number = {number}{key} condition = {}", condition.dump_at(depth))
            }
        }
    }

    fn dump_list(&self, keyword: &str, children: &[ConditionRef], depth: usize) -> String {
        if children.is_empty() {
            return format!("{keyword} [ ]");
        }
        let mut text = format!("{keyword} [\n");
        for child in children {
            text.push_str(&INDENT.repeat(depth + 1));
            text.push_str(&child.dump_at(depth + 1));
            text.push('\n');
        }
        text.push_str(&INDENT.repeat(depth));
        text.push(']');
        text
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dump())
    }
}

/// ` low = L high = H`, omitting missing bounds.
fn bounds(low: Option<&Value>, high: Option<&Value>) -> String {
    let mut text = String::new();
    if let Some(low) = low {
        text.push_str(&format!(" low = {low}"));
    }
    if let Some(high) = high {
        text.push_str(&format!(" high = {high}"));
    }
    text
}

fn quoted(names: &[String]) -> Vec<String> {
    names.iter().map(|name| format!("\"{name}\"")).collect()
}

fn plain<T: fmt::Display>(items: &[T]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}

/// `Keyword field = item` or `Keyword field = [ a b ]`; bare keyword when
/// the list is empty.
fn with_list(keyword: &str, field: &str, items: &[String]) -> String {
    match items {
        [] => keyword.to_string(),
        [item] => format!("{keyword} {field} = {item}"),
        items => format!("{keyword} {field} = [ {} ]", items.join(" ")),
    }
}

// ============================================================================
// Descriptions
// ============================================================================

impl Condition {
    /// English phrase describing what a matching object satisfies, with the
    /// subject left out ("is a Planet", "is not owned by empire 2").
    pub fn description(&self, negated: bool) -> String {
        let is = if negated { "is not" } else { "is" };
        let has = if negated { "does not have" } else { "has" };
        let does = |verb: &str| {
            if negated {
                format!("does not {verb}")
            } else {
                format!("{verb}s")
            }
        };
        match self {
            Condition::All => {
                if negated {
                    "matches nothing".to_string()
                } else {
                    "matches anything".to_string()
                }
            }
            Condition::Source => format!("{is} the source object"),
            Condition::RootCandidate => format!("{is} the root candidate"),
            Condition::Target => format!("{is} the target object"),
            Condition::ObjectId(id) => format!("{is} object {id}"),
            Condition::EmpireAffiliation {
                empire,
                affiliation,
            } => {
                let empire = empire
                    .as_ref()
                    .map(|e| format!("empire {e}"))
                    .unwrap_or_else(|| "the empire".to_string());
                match affiliation {
                    EmpireAffiliationType::TheEmpire => format!("{is} owned by {empire}"),
                    EmpireAffiliationType::Enemy => format!("{is} owned by an enemy of {empire}"),
                    EmpireAffiliationType::Ally => format!("{is} owned by an ally of {empire}"),
                    EmpireAffiliationType::Any => format!("{is} owned by an empire"),
                    EmpireAffiliationType::None => format!("{is} unowned"),
                }
            }
            Condition::ProducedByEmpire(empire) => format!("{is} produced by empire {empire}"),
            Condition::Capital => format!("{is} a capital"),
            Condition::OwnerHasTech(name) => format!("{is} owned by an empire that knows {name}"),
            Condition::OwnerHasBuildingTypeAvailable(name) => {
                format!("{is} owned by an empire that can build {name}")
            }
            Condition::OwnerHasShipDesignAvailable(design) => {
                format!("{is} owned by an empire that can build design {design}")
            }
            Condition::Type(object_type) => format!("{is} {}", with_article(*object_type)),
            Condition::Building(names) if names.is_empty() => format!("{is} a building"),
            Condition::Building(names) => format!("{is} a building of type {}", either(names)),
            Condition::HasSpecial {
                name,
                since_low,
                since_high,
            } => {
                let since = match (since_low, since_high) {
                    (None, None) => String::new(),
                    (low, high) => format!(
                        " added on a turn {}",
                        range_text(low.as_ref(), high.as_ref(), false)
                    ),
                };
                format!("{has} the special {name}{since}")
            }
            Condition::HasTag(name) => format!("{has} the tag {name}"),
            Condition::CreatedOnTurn { low, high } => format!(
                "{is} created on a turn {}",
                range_text(low.as_ref(), high.as_ref(), false)
            ),
            Condition::Homeworld(names) if names.is_empty() => format!("{is} a species homeworld"),
            Condition::Homeworld(names) => format!("{is} the homeworld of {}", either(names)),
            Condition::Monster => format!("{is} a monster"),
            Condition::Armed => format!("{is} armed"),
            Condition::Stationary => format!("{is} stationary"),
            Condition::CanColonize => format!("{is} of a species that can colonize"),
            Condition::CanProduceShips => format!("{is} of a species that can produce ships"),
            Condition::PlanetType(types) => format!("{is} a planet of type {}", either(types)),
            Condition::PlanetSize(sizes) => format!("{is} a planet of size {}", either(sizes)),
            Condition::PlanetEnvironment {
                environments,
                species,
            } => {
                let species = species
                    .as_ref()
                    .map(|s| format!("for {s}"))
                    .unwrap_or_else(|| "for its species".to_string());
                format!("{is} a planet {} {species}", either(environments))
            }
            Condition::Species(names) if names.is_empty() => format!("{is} populated by a species"),
            Condition::Species(names) => format!("{is} of species {}", either(names)),
            Condition::FocusType(names) if names.is_empty() => format!("{has} a focus"),
            Condition::FocusType(names) => format!("{has} focus {}", either(names)),
            Condition::StarType(types) => format!("{is} at a star of type {}", either(types)),
            Condition::DesignHasHull(name) => format!("{is} a ship with hull {name}"),
            Condition::DesignHasPart { name, low, high } => format!(
                "{is} a ship with {} {name} parts",
                part_count_text(low.as_ref(), high.as_ref())
            ),
            Condition::DesignHasPartClass { class, low, high } => format!(
                "{is} a ship with {} {class} parts",
                part_count_text(low.as_ref(), high.as_ref())
            ),
            Condition::PredefinedShipDesign(name) => format!("{is} a ship of design {name}"),
            Condition::NumberedShipDesign(design) => format!("{is} a ship of design {design}"),
            Condition::MeterValue { meter, low, high } => format!(
                "{has} {meter} {}",
                range_text(low.as_ref(), high.as_ref(), false)
            ),
            Condition::ShipPartMeterValue {
                part,
                meter,
                low,
                high,
            } => format!(
                "{has} {meter} of part {part} {}",
                range_text(low.as_ref(), high.as_ref(), false)
            ),
            Condition::EmpireMeterValue {
                empire,
                meter,
                low,
                high,
            } => {
                let whose = empire
                    .as_ref()
                    .map(|e| format!("empire {e}"))
                    .unwrap_or_else(|| "its owner".to_string());
                format!(
                    "{has} {whose} meter {meter} {}",
                    range_text(low.as_ref(), high.as_ref(), false)
                )
            }
            Condition::EmpireStockpileValue {
                resource,
                low,
                high,
            } => format!(
                "{is} owned by an empire with {resource} stockpile {}",
                range_text(low.as_ref(), high.as_ref(), false)
            ),
            Condition::Enqueued {
                build_type,
                name,
                low,
                high,
                ..
            } => {
                let what = name.as_deref().map_or_else(
                    || build_type.script_name().to_lowercase(),
                    str::to_string,
                );
                let count = match (low, high) {
                    (None, None) => "at least 1".to_string(),
                    (low, high) => range_text(low.as_ref(), high.as_ref(), false),
                };
                format!("{has} {count} {what} enqueued")
            }
            Condition::Contains(child) => {
                format!("{} an object that {}", does("contain"), child.description(false))
            }
            Condition::ContainedBy(child) => {
                format!("{is} inside an object that {}", child.description(false))
            }
            Condition::InSystem(Some(system)) => format!("{is} in system {system}"),
            Condition::InSystem(None) => format!("{is} in a system"),
            Condition::WithinDistance {
                distance,
                condition,
            } => format!(
                "{is} within {distance} of an object that {}",
                condition.description(false)
            ),
            Condition::WithinStarlaneJumps { jumps, condition } => format!(
                "{is} within {jumps} starlane jumps of an object that {}",
                condition.description(false)
            ),
            Condition::CanAddStarlaneConnection(child) => format!(
                "{is} a system that can get starlanes to every system holding an object that {}",
                child.description(false)
            ),
            Condition::CanRemoveStarlaneConnection(child) => format!(
                "{is} a system whose starlanes to every system holding an object that {} can be removed",
                child.description(false)
            ),
            Condition::VisibleToEmpire(empire) => format!("{is} visible to empire {empire}"),
            Condition::ExploredByEmpire(empire) => format!("{is} explored by empire {empire}"),
            Condition::FleetSupplyableByEmpire(empire) => {
                format!("{is} within fleet supply of empire {empire}")
            }
            Condition::ResourceSupplyConnectedByEmpire { empire, condition } => format!(
                "{is} resource-connected by empire {empire} to an object that {}",
                condition.description(false)
            ),
            Condition::Chance(probability) => {
                format!("{is} picked with probability {probability}")
            }
            Condition::And(children) if children.is_empty() => {
                Condition::All.description(negated)
            }
            Condition::And(children) => {
                let joined = join_descriptions(children, "and");
                if negated {
                    format!("does not satisfy all of ({joined})")
                } else {
                    joined
                }
            }
            Condition::Or(children) if children.is_empty() => {
                Condition::All.description(!negated)
            }
            Condition::Or(children) => {
                let joined = join_descriptions(children, "or");
                if negated {
                    format!("satisfies none of ({joined})")
                } else {
                    joined
                }
            }
            Condition::Not(child) => child.description(!negated),
            Condition::Number {
                low,
                high,
                condition,
            } => format!(
                "{} when the number of objects that {} is {}",
                if negated { "fails" } else { "holds" },
                condition.description(false),
                range_text(low.as_ref(), high.as_ref(), true)
            ),
            Condition::Turn { low, high } => format!(
                "{} when the current turn is {}",
                if negated { "fails" } else { "holds" },
                range_text(low.as_ref(), high.as_ref(), true)
            ),
            Condition::SortedNumberOf {
                number,
                sort_key,
                method,
                condition,
            } => {
                let ranking = match sort_key {
                    Some(key) => format!("{method} by {key}"),
                    None => method.to_string(),
                };
                format!(
                    "{is} among {number} objects ({ranking}) that {}",
                    condition.description(false)
                )
            }
        }
    }
}

fn with_article(object_type: ObjectType) -> String {
    let name = object_type.script_name();
    match name.chars().next() {
        Some('A' | 'E' | 'I' | 'O' | 'U') => format!("an {name}"),
        _ => format!("a {name}"),
    }
}

fn either<T: fmt::Display>(items: &[T]) -> String {
    match items {
        [] => "(none)".to_string(),
        [item] => item.to_string(),
        items => {
            let names: Vec<String> = items.iter().map(ToString::to_string).collect();
            format!("one of {}", names.join(", "))
        }
    }
}

fn join_descriptions(children: &[ConditionRef], conjunction: &str) -> String {
    children
        .iter()
        .map(|child| child.description(false))
        .collect::<Vec<_>>()
        .join(&format!(" {conjunction} "))
}

/// English for a numeric range. Half-open ranges exclude `high`.
fn range_text(low: Option<&Value>, high: Option<&Value>, half_open: bool) -> String {
    match (low, high) {
        (None, None) => "any value".to_string(),
        (Some(low), None) => format!("at least {low}"),
        (None, Some(high)) if half_open => format!("below {high}"),
        (None, Some(high)) => format!("at most {high}"),
        (Some(low), Some(high)) if half_open => format!("at least {low} and below {high}"),
        (Some(low), Some(high)) => format!("between {low} and {high}"),
    }
}

fn part_count_text(low: Option<&Value>, high: Option<&Value>) -> String {
    match (low, high) {
        (None, None) => "at least 1".to_string(),
        (None, Some(high)) => format!("at least 1 and fewer than {high}"),
        (low, high) => range_text(low, high, true),
    }
}
