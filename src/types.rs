//! Enumerations shared by the universe model and the condition catalogue.
//!
//! Every enum carries a stable script name, used by `Condition::dump` and by
//! descriptions, so a dumped tree reads the same on every peer.

use std::fmt;

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

/// Macro to define a fieldless enum with a stable script name per variant.
///
/// Creates the enum, an `ALL` table, `script_name()` and a `Display` impl that
/// writes the script name.
macro_rules! define_script_enum {
    ($(#[$meta:meta])* $name:ident { $($(#[$vmeta:meta])* $variant:ident => $script:expr),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Name used in dumped scripts.
            pub fn script_name(self) -> &'static str {
                match self {
                    $($name::$variant => $script),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.script_name())
            }
        }
    };
}

define_script_enum!(
    /// Concrete kind of a universe object.
    ObjectKind {
        Building => "Building",
        Ship => "Ship",
        Fleet => "Fleet",
        Planet => "Planet",
        System => "System",
    }
);

define_script_enum!(
    /// Argument of the `Type` predicate.
    ///
    /// `PopCenter` and `ProdCenter` are roles rather than kinds; every planet
    /// fills both.
    ObjectType {
        Building => "Building",
        Ship => "Ship",
        Fleet => "Fleet",
        Planet => "Planet",
        System => "System",
        PopCenter => "PopulationCenter",
        ProdCenter => "ProductionCenter",
    }
);

impl ObjectType {
    /// Returns true if an object of `kind` fills this type.
    pub fn admits(self, kind: ObjectKind) -> bool {
        match self {
            ObjectType::Building => kind == ObjectKind::Building,
            ObjectType::Ship => kind == ObjectKind::Ship,
            ObjectType::Fleet => kind == ObjectKind::Fleet,
            ObjectType::Planet | ObjectType::PopCenter | ObjectType::ProdCenter => {
                kind == ObjectKind::Planet
            }
            ObjectType::System => kind == ObjectKind::System,
        }
    }
}

define_script_enum!(
    PlanetType {
        Swamp => "Swamp",
        Toxic => "Toxic",
        Inferno => "Inferno",
        Radiated => "Radiated",
        Barren => "Barren",
        Tundra => "Tundra",
        Desert => "Desert",
        Terran => "Terran",
        Ocean => "Ocean",
        Asteroids => "Asteroids",
        GasGiant => "GasGiant",
    }
);

define_script_enum!(
    PlanetSize {
        Tiny => "Tiny",
        Small => "Small",
        Medium => "Medium",
        Large => "Large",
        Huge => "Huge",
        Asteroids => "Asteroids",
        GasGiant => "GasGiant",
    }
);

define_script_enum!(
    PlanetEnvironment {
        Uninhabitable => "Uninhabitable",
        Hostile => "Hostile",
        Poor => "Poor",
        Adequate => "Adequate",
        Good => "Good",
    }
);

define_script_enum!(
    StarType {
        Blue => "Blue",
        White => "White",
        Yellow => "Yellow",
        Orange => "Orange",
        Red => "Red",
        Neutron => "Neutron",
        BlackHole => "BlackHole",
        NoStar => "NoStar",
    }
);

define_script_enum!(
    MeterType {
        Population => "Population",
        TargetPopulation => "TargetPopulation",
        Industry => "Industry",
        TargetIndustry => "TargetIndustry",
        Research => "Research",
        TargetResearch => "TargetResearch",
        Trade => "Trade",
        TargetTrade => "TargetTrade",
        Construction => "Construction",
        Happiness => "Happiness",
        TargetHappiness => "TargetHappiness",
        Supply => "Supply",
        Stealth => "Stealth",
        Detection => "Detection",
        Shield => "Shield",
        Defense => "Defense",
        Troops => "Troops",
        Structure => "Structure",
        MaxStructure => "MaxStructure",
        Fuel => "Fuel",
        MaxFuel => "MaxFuel",
        Speed => "Speed",
        Capacity => "Capacity",
        MaxCapacity => "MaxCapacity",
    }
);

define_script_enum!(
    ResourceType {
        Industry => "Industry",
        Research => "Research",
        Trade => "Trade",
    }
);

define_script_enum!(
    ShipPartClass {
        ShortRange => "ShortRange",
        Missiles => "Missiles",
        Fighters => "Fighters",
        PointDefense => "PointDefense",
        Shield => "Shield",
        Armour => "Armour",
        Detector => "Detector",
        Stealth => "Stealth",
        Fuel => "Fuel",
        Colony => "Colony",
        Troops => "Troops",
        General => "General",
    }
);

impl ShipPartClass {
    /// Returns true for part classes that make a ship armed.
    pub fn is_weapon(self) -> bool {
        matches!(
            self,
            ShipPartClass::ShortRange
                | ShipPartClass::Missiles
                | ShipPartClass::Fighters
                | ShipPartClass::PointDefense
        )
    }
}

define_script_enum!(
    /// How much an empire can see of an object, in increasing order.
    Visibility {
        None => "None",
        Basic => "Basic",
        Partial => "Partial",
        Full => "Full",
    }
);

define_script_enum!(
    DiplomaticStatus {
        War => "War",
        Peace => "Peace",
    }
);

define_script_enum!(
    /// What a production queue item builds.
    BuildType {
        Building => "Building",
        Ship => "Ship",
    }
);

define_script_enum!(
    /// Relationship between an object's owner and an empire.
    EmpireAffiliationType {
        /// Owned by the empire itself.
        TheEmpire => "TheEmpire",
        /// Owned by an empire at war with the empire.
        Enemy => "EnemyOf",
        /// Owned by an empire at peace with the empire.
        Ally => "AllyOf",
        /// Owned by any empire.
        Any => "AnyEmpire",
        /// Not owned by any empire.
        None => "Unowned",
    }
);

define_script_enum!(
    /// Ranking policy of `SortedNumberOf`.
    SortingMethod {
        Max => "MaximumNumberOf",
        Min => "MinimumNumberOf",
        Mode => "ModeNumberOf",
        Random => "NumberOf",
    }
);

/// Which candidate set an `eval` call tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SearchDomain {
    /// Test the non-matches; those that pass move into matches.
    #[default]
    NonMatches,
    /// Test the matches; those that fail move into non-matches.
    Matches,
}

impl SearchDomain {
    pub fn flipped(self) -> Self {
        match self {
            SearchDomain::NonMatches => SearchDomain::Matches,
            SearchDomain::Matches => SearchDomain::NonMatches,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_type_roles_admit_planets() {
        assert!(ObjectType::PopCenter.admits(ObjectKind::Planet));
        assert!(ObjectType::ProdCenter.admits(ObjectKind::Planet));
        assert!(!ObjectType::PopCenter.admits(ObjectKind::Ship));
        assert!(ObjectType::Fleet.admits(ObjectKind::Fleet));
    }

    #[test]
    fn test_script_names_are_unique_per_enum() {
        let mut names: Vec<_> = MeterType::ALL.iter().map(|m| m.script_name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), MeterType::ALL.len());
    }

    #[test]
    fn test_visibility_ordering() {
        assert!(Visibility::Basic > Visibility::None);
        assert!(Visibility::Full > Visibility::Partial);
    }

    #[test]
    fn test_weapon_classes() {
        assert!(ShipPartClass::ShortRange.is_weapon());
        assert!(!ShipPartClass::Armour.is_weapon());
    }

    #[test]
    fn test_search_domain_flip() {
        assert_eq!(SearchDomain::default().flipped(), SearchDomain::Matches);
        assert_eq!(SearchDomain::Matches.flipped(), SearchDomain::NonMatches);
    }
}
