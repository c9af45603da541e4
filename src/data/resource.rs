use std::fmt::Display;

use enum_map::Enum;

#[derive(Enum, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum ResourceType {
    Oil,
    Fuel,
    Cobalt,
    RefinedCobalt,
}

pub struct ResourceData {
    pub resource_type: ResourceType,
    pub name: &'static str,
    /// Credits paid by a market per unit
    pub price: u32,
    /// Whether this resource shows up as a deposit in the world
    pub deposit: bool,
}

pub const RESOURCE_DATA: [ResourceData; 4] = [
    ResourceData {
        resource_type: ResourceType::Oil,
        name: "Oil",
        price: 4,
        deposit: true,
    },
    ResourceData {
        resource_type: ResourceType::Fuel,
        name: "Fuel",
        price: 10,
        deposit: false,
    },
    ResourceData {
        resource_type: ResourceType::Cobalt,
        name: "Cobalt",
        price: 6,
        deposit: true,
    },
    ResourceData {
        resource_type: ResourceType::RefinedCobalt,
        name: "Refined Cobalt",
        price: 15,
        deposit: false,
    },
];

impl ResourceType {
    pub fn data(&self) -> &'static ResourceData {
        &RESOURCE_DATA[self.into_usize()]
    }

    pub fn name(&self) -> &'static str {
        self.data().name
    }

    pub fn iter() -> impl Iterator<Item = ResourceType> {
        (0..ResourceType::LENGTH).map(ResourceType::from_usize)
    }
}

impl Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
