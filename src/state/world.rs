use std::time::Duration;

use enum_map::EnumMap;
use hecs::Entity;
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    data::{building::BuildingType, resource::ResourceType},
    math::WorldPos,
};

/// A building standing on the water
#[derive(Debug, Clone, Copy)]
pub struct Building {
    pub building_type: BuildingType,
}

/// A raw resource field. These can't be harvested by hand
#[derive(Debug, Clone, Copy)]
pub struct Deposit {
    pub resource_type: ResourceType,
}

/// Goods held by a building
#[derive(Debug, Default, Clone)]
pub struct Storage {
    pub items: EnumMap<ResourceType, u32>,
}

impl Storage {
    pub fn total(&self) -> u32 {
        self.items.values().sum()
    }
}

/// Passive output of a building, accumulated into its storage
#[derive(Debug, Clone)]
pub struct Production {
    pub resource: ResourceType,
    pub per_second: f32,
    pub max_stock: u32,
    progress: f32,
}

impl Production {
    pub fn new(resource: ResourceType, per_second: f32, max_stock: u32) -> Self {
        Self {
            resource,
            per_second,
            max_stock,
            progress: 0.,
        }
    }
}

const DEPOSIT_COUNT: usize = 24;

/// Everything that lives in the world. Buildings and deposits are enumerated in the order
/// they were spawned.
pub struct World {
    pub ecs: hecs::World,
    pub size: f32,
    buildings: Vec<Entity>,
    deposits: Vec<Entity>,
}

impl World {
    pub fn new(size: f32) -> Self {
        Self {
            ecs: hecs::World::new(),
            size,
            buildings: vec![],
            deposits: vec![],
        }
    }

    /// Starting layout: one of each building near the centre and some scattered deposits
    pub fn generate(size: f32, seed: u64) -> Self {
        let mut world = Self::new(size);
        let centre = size / 2.;

        [
            (BuildingType::Market, 30., 0.),
            (BuildingType::Refinery, -40., 25.),
            (BuildingType::OilPlatform, 10., -60.),
            (BuildingType::CobaltEnrichment, -70., -30.),
        ]
        .into_iter()
        .for_each(|(building_type, dx, dz)| {
            world.spawn_building(building_type, WorldPos::on_plane(centre + dx, centre + dz));
        });

        let mut rng = StdRng::seed_from_u64(seed);
        let margin = size * 0.05;
        let deposit_types = ResourceType::iter()
            .filter(|r| r.data().deposit)
            .collect::<Vec<_>>();
        (0..DEPOSIT_COUNT).for_each(|i| {
            let resource_type = deposit_types[i % deposit_types.len()];
            let pos = WorldPos::on_plane(
                rng.random_range(margin..size - margin),
                rng.random_range(margin..size - margin),
            );
            world.spawn_deposit(resource_type, pos);
        });

        log::info!(
            "Generated world with {} buildings and {} deposits",
            world.buildings.len(),
            world.deposits.len()
        );
        world
    }

    /// Add a building without any placement checks
    pub fn spawn_building(&mut self, building_type: BuildingType, pos: WorldPos) -> Entity {
        let building = Building { building_type };
        let entity = match building_type {
            BuildingType::OilPlatform => self.ecs.spawn((
                building,
                pos,
                Storage::default(),
                Production::new(ResourceType::Oil, 1., 100),
            )),
            BuildingType::Warehouse => self.ecs.spawn((building, pos, Storage::default())),
            _ => self.ecs.spawn((building, pos)),
        };
        self.buildings.push(entity);

        entity
    }

    pub fn spawn_deposit(&mut self, resource_type: ResourceType, pos: WorldPos) -> Entity {
        let entity = self.ecs.spawn((Deposit { resource_type }, pos));
        self.deposits.push(entity);

        entity
    }

    /// All buildings in spawn order
    pub fn buildings(&self) -> impl Iterator<Item = (Entity, BuildingType, WorldPos)> + '_ {
        self.buildings.iter().filter_map(|&entity| {
            let building = self.ecs.get::<&Building>(entity).ok()?;
            let pos = self.ecs.get::<&WorldPos>(entity).ok()?;
            Some((entity, building.building_type, *pos))
        })
    }

    /// All resource deposits in spawn order
    pub fn deposits(&self) -> impl Iterator<Item = (Entity, ResourceType, WorldPos)> + '_ {
        self.deposits.iter().filter_map(|&entity| {
            let deposit = self.ecs.get::<&Deposit>(entity).ok()?;
            let pos = self.ecs.get::<&WorldPos>(entity).ok()?;
            Some((entity, deposit.resource_type, *pos))
        })
    }

    pub fn building(&self, entity: Entity) -> Option<(BuildingType, WorldPos)> {
        let building = self.ecs.get::<&Building>(entity).ok()?;
        let pos = self.ecs.get::<&WorldPos>(entity).ok()?;
        Some((building.building_type, *pos))
    }

    pub fn storage(&self, entity: Entity) -> Option<hecs::Ref<'_, Storage>> {
        self.ecs.get::<&Storage>(entity).ok()
    }

    pub fn storage_mut(&mut self, entity: Entity) -> Option<hecs::RefMut<'_, Storage>> {
        self.ecs.get::<&mut Storage>(entity).ok()
    }

    /// Whether a building of this type fits at `pos`
    pub fn can_place(&self, building_type: BuildingType, pos: &WorldPos) -> bool {
        let footprint = building_type.data().footprint;
        let (x, z) = (pos.0.x, pos.0.z);

        // Needs to be fully inside the world
        if x - footprint < 0. || z - footprint < 0. {
            return false;
        }
        if x + footprint > self.size || z + footprint > self.size {
            return false;
        }

        // Can't overlap another building
        self.buildings().all(|(_, other, other_pos)| {
            pos.planar_distance(&other_pos) >= footprint + other.data().footprint
        })
    }

    /// Validate and place a building. Returns whether it was placed
    pub fn place_building(&mut self, building_type: BuildingType, pos: WorldPos) -> bool {
        if !self.can_place(building_type, &pos) {
            log::debug!("Rejected {building_type} at {:?}", pos.0);
            return false;
        }

        self.spawn_building(building_type, pos);
        log::info!("Placed {building_type} at {:?}", pos.0);
        true
    }

    /// Advance building production by a tick
    pub fn update(&mut self, dt: Duration) {
        for (_, (production, storage)) in self.ecs.query_mut::<(&mut Production, &mut Storage)>() {
            let stock = storage.items[production.resource];
            if stock >= production.max_stock {
                production.progress = 0.;
                continue;
            }

            production.progress += production.per_second * dt.as_secs_f32();
            let produced = (production.progress.floor() as u32).min(production.max_stock - stock);
            if produced > 0 {
                production.progress -= produced as f32;
                storage.items[production.resource] += produced;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::World;
    use crate::{
        data::{building::BuildingType, resource::ResourceType},
        math::WorldPos,
    };

    #[test]
    fn test_enumeration_is_spawn_order() {
        let mut world = World::new(1000.);
        let a = world.spawn_building(BuildingType::Warehouse, WorldPos::on_plane(100., 100.));
        let b = world.spawn_building(BuildingType::Market, WorldPos::on_plane(200., 100.));
        let c = world.spawn_building(BuildingType::OilPlatform, WorldPos::on_plane(300., 100.));

        let order = world.buildings().map(|(e, _, _)| e).collect::<Vec<_>>();
        assert_eq!(order, [a, b, c]);
    }

    #[test]
    fn test_placement_rejects_overlap() {
        let mut world = World::new(1000.);
        world.spawn_building(BuildingType::Market, WorldPos::on_plane(500., 500.));

        assert!(!world.place_building(BuildingType::Refinery, WorldPos::on_plane(505., 500.)));
        assert!(world.place_building(BuildingType::Refinery, WorldPos::on_plane(530., 500.)));
        assert_eq!(world.buildings().count(), 2);
    }

    #[test]
    fn test_placement_rejects_out_of_bounds() {
        let mut world = World::new(1000.);
        assert!(!world.place_building(BuildingType::Market, WorldPos::on_plane(-10., 500.)));
        assert!(!world.place_building(BuildingType::Market, WorldPos::on_plane(500., 998.)));
        assert_eq!(world.buildings().count(), 0);
    }

    #[test]
    fn test_oil_platform_production() {
        let mut world = World::new(1000.);
        let platform =
            world.spawn_building(BuildingType::OilPlatform, WorldPos::on_plane(500., 500.));

        world.update(Duration::from_millis(2500));
        assert_eq!(world.storage(platform).unwrap().items[ResourceType::Oil], 2);

        world.update(Duration::from_millis(500));
        assert_eq!(world.storage(platform).unwrap().items[ResourceType::Oil], 3);

        world.update(Duration::from_secs(1000));
        assert_eq!(world.storage(platform).unwrap().items[ResourceType::Oil], 100);
    }

    #[test]
    fn test_generate_only_spawns_deposit_resources() {
        let world = World::generate(1000., 7);
        let kinds = world.deposits().map(|(_, r, _)| r).collect::<Vec<_>>();

        assert_eq!(kinds.len(), 24);
        assert!(kinds.iter().all(|r| r.data().deposit));
        assert!(kinds.contains(&ResourceType::Oil));
        assert!(kinds.contains(&ResourceType::Cobalt));
        assert!(!kinds.contains(&ResourceType::Fuel));
    }

    #[test]
    fn test_generate_is_deterministic() {
        let a = World::generate(1000., 3);
        let b = World::generate(1000., 3);
        let a = a.deposits().map(|(_, r, p)| (r, p)).collect::<Vec<_>>();
        let b = b.deposits().map(|(_, r, p)| (r, p)).collect::<Vec<_>>();
        assert_eq!(a, b);
    }
}
