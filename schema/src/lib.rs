// Pokemon RPG Schema - Static data definitions
// This crate holds the immutable species and move tables shared by the
// battle core and its data loader. Everything here derives serde so the
// tables can be authored in RON.

pub use move_data::*;
pub use pokemon_types::*;
pub use species_data::*;

pub mod move_data;
pub mod pokemon_types;
pub mod species_data;
