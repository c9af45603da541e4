pub mod player;
pub mod session;
pub mod world;
