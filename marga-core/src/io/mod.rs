//! World file loading.

mod world;

pub use world::WorldError;
