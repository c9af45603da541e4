use num_derive::FromPrimitive;
use num_traits::FromPrimitive;

#[derive(FromPrimitive, Debug, PartialEq, Eq, Clone, Copy)]
pub enum ShipType {
    Scout = 0,
    Freighter = 1,
    Tanker = 2,
}

pub struct ShipData {
    pub ship_type: ShipType,
    pub name: &'static str,
    /// Distance units per second
    pub speed: f32,
    /// Total units of cargo the hold fits
    pub cargo_capacity: u32,
}

pub const SHIP_DATA: [ShipData; 3] = [
    ShipData {
        ship_type: ShipType::Scout,
        name: "Scout",
        speed: 40.,
        cargo_capacity: 20,
    },
    ShipData {
        ship_type: ShipType::Freighter,
        name: "Freighter",
        speed: 20.,
        cargo_capacity: 100,
    },
    ShipData {
        ship_type: ShipType::Tanker,
        name: "Tanker",
        speed: 15.,
        cargo_capacity: 200,
    },
];

impl ShipType {
    /// Look up a ship by its slot index
    pub fn from_slot(index: usize) -> Option<Self> {
        Self::from_usize(index)
    }

    pub fn data(&self) -> &'static ShipData {
        &SHIP_DATA[*self as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::{SHIP_DATA, ShipType};

    #[test]
    fn test_slots() {
        assert_eq!(ShipType::from_slot(0), Some(ShipType::Scout));
        assert_eq!(ShipType::from_slot(2), Some(ShipType::Tanker));
        assert_eq!(ShipType::from_slot(3), None);
    }

    #[test]
    fn test_data_table_matches_enum() {
        SHIP_DATA
            .iter()
            .enumerate()
            .for_each(|(i, d)| assert_eq!(ShipType::from_slot(i), Some(d.ship_type)));
    }
}
