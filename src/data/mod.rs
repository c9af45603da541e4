pub mod building;
pub mod resource;
pub mod ship;
