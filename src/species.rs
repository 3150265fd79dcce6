use crate::errors::{DataError, DataResult};
use schema::{BaseStats, MoveData, PokemonType, SpeciesData};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

/// A move a species learns at `level`, resolved against the move table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LearnableMove {
    pub move_data: Arc<MoveData>,
    pub level: u8,
}

/// Immutable species definition shared by every Pokemon of that species.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Species {
    pub name: String,
    pub description: String,
    pub type1: PokemonType,
    pub type2: PokemonType,
    pub base_stats: BaseStats,
    pub learnable_moves: Vec<LearnableMove>,
}

impl Species {
    /// Resolve a raw species record against the loaded move table
    pub fn resolve(data: SpeciesData, moves: &HashMap<String, Arc<MoveData>>) -> DataResult<Self> {
        let learnable_moves = data
            .learnable_moves
            .into_iter()
            .map(|learnable| {
                moves
                    .get(&learnable.move_name)
                    .map(|move_data| LearnableMove {
                        move_data: Arc::clone(move_data),
                        level: learnable.level,
                    })
                    .ok_or(DataError::MoveNotFound(learnable.move_name))
            })
            .collect::<DataResult<Vec<_>>>()?;

        Ok(Species {
            name: data.name,
            description: data.description,
            type1: data.type1,
            type2: data.type2,
            base_stats: data.base_stats,
            learnable_moves,
        })
    }

    pub fn types(&self) -> [PokemonType; 2] {
        [self.type1, self.type2]
    }
}
