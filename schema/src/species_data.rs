use crate::PokemonType;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    pub hp: u16,
    pub attack: u16,
    pub defense: u16,
    pub sp_attack: u16,
    pub sp_defense: u16,
    pub speed: u16,
}

/// A move a species picks up once it reaches `level`. The move is referenced
/// by name and resolved against the move table when the data is loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearnableMoveData {
    pub move_name: String,
    pub level: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesData {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub type1: PokemonType,
    #[serde(default)]
    pub type2: PokemonType,
    pub base_stats: BaseStats,
    /// In the order the species learns them.
    #[serde(default)]
    pub learnable_moves: Vec<LearnableMoveData>,
}
