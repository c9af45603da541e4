use std::fmt::Display;

use enum_map::Enum;

#[derive(Enum, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum BuildingType {
    Market,
    Refinery,
    OilPlatform,
    CobaltEnrichment,
    Warehouse,
}

pub struct BuildingData {
    pub building_type: BuildingType,
    pub name: &'static str,
    /// Radius of the building's footprint on the water plane
    pub footprint: f32,
    pub colour: [u8; 3],
    pub description: &'static str,
}

pub const BUILDING_DATA: [BuildingData; 5] = [
    BuildingData {
        building_type: BuildingType::Market,
        name: "Market",
        footprint: 6.,
        colour: [230, 190, 60],
        description: "Buys everything in your cargo hold.",
    },
    BuildingData {
        building_type: BuildingType::Refinery,
        name: "Refinery",
        footprint: 8.,
        colour: [200, 90, 40],
        description: "Turns crude oil into fuel.",
    },
    BuildingData {
        building_type: BuildingType::OilPlatform,
        name: "Oil Platform",
        footprint: 7.,
        colour: [60, 60, 60],
        description: "Pumps oil which can be collected into your hold.",
    },
    BuildingData {
        building_type: BuildingType::CobaltEnrichment,
        name: "Cobalt Enrichment",
        footprint: 7.,
        colour: [70, 110, 220],
        description: "Refines raw cobalt.",
    },
    BuildingData {
        building_type: BuildingType::Warehouse,
        name: "Warehouse",
        footprint: 6.,
        colour: [150, 120, 90],
        description: "Stores whatever you unload.",
    },
];

impl BuildingType {
    pub fn data(&self) -> &'static BuildingData {
        &BUILDING_DATA[self.into_usize()]
    }

    pub fn name(&self) -> &'static str {
        self.data().name
    }

    pub fn iter() -> impl Iterator<Item = BuildingType> {
        (0..BuildingType::LENGTH).map(BuildingType::from_usize)
    }
}

impl Display for BuildingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::BuildingType;

    #[test]
    fn test_data_table_matches_enum() {
        BuildingType::iter().for_each(|b| assert_eq!(b.data().building_type, b));
    }
}
