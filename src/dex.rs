//! Species and move tables, loaded once and shared through `Arc`.
//!
//! Names are looked up case-insensitively. The default tables under `data/`
//! are embedded into the binary so a battle can start without touching disk.

use crate::errors::{DataError, DataResult};
use crate::pokemon::Pokemon;
use crate::species::Species;
use schema::{MoveData, SpeciesData};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

const BUILTIN_MOVES: &str = include_str!("../data/moves.ron");
const BUILTIN_SPECIES: &str = include_str!("../data/species.ron");

fn key(name: &str) -> String {
    name.to_uppercase()
}

#[derive(Debug, Clone, Default)]
pub struct Dex {
    moves: HashMap<String, Arc<MoveData>>,
    species: HashMap<String, Arc<Species>>,
}

impl Dex {
    /// The tables shipped with the crate.
    pub fn builtin() -> DataResult<Self> {
        Self::from_ron_strs(BUILTIN_MOVES, BUILTIN_SPECIES)
    }

    /// Load `moves.ron` and `species.ron` from a data directory.
    pub fn load(data_dir: &Path) -> DataResult<Self> {
        let moves = read_table(&data_dir.join("moves.ron"))?;
        let species = read_table(&data_dir.join("species.ron"))?;
        Self::from_ron_strs(&moves, &species)
    }

    pub fn from_ron_strs(moves_ron: &str, species_ron: &str) -> DataResult<Self> {
        let moves: Vec<MoveData> = parse_table("moves.ron", moves_ron)?;
        let species: Vec<SpeciesData> = parse_table("species.ron", species_ron)?;
        Self::from_data(moves, species)
    }

    /// Build the tables from already-deserialized records. Every learnset entry
    /// must name a move in `moves`.
    pub fn from_data(moves: Vec<MoveData>, species: Vec<SpeciesData>) -> DataResult<Self> {
        let mut dex = Dex::default();

        for move_data in moves {
            let name = key(&move_data.name);
            if dex.moves.contains_key(&name) {
                return Err(DataError::Duplicate {
                    kind: "move",
                    name: move_data.name,
                });
            }
            dex.moves.insert(name, Arc::new(move_data));
        }

        // Learnsets reference moves by their exact name.
        let by_key: HashMap<String, Arc<MoveData>> = dex
            .moves
            .values()
            .map(|data| (data.name.clone(), Arc::clone(data)))
            .collect();

        for species_data in species {
            let name = key(&species_data.name);
            if dex.species.contains_key(&name) {
                return Err(DataError::Duplicate {
                    kind: "species",
                    name: species_data.name,
                });
            }
            let resolved = Species::resolve(species_data, &by_key)?;
            dex.species.insert(name, Arc::new(resolved));
        }

        tracing::info!(
            moves = dex.moves.len(),
            species = dex.species.len(),
            "loaded dex"
        );
        Ok(dex)
    }

    pub fn move_data(&self, name: &str) -> DataResult<Arc<MoveData>> {
        self.moves
            .get(&key(name))
            .cloned()
            .ok_or_else(|| DataError::MoveNotFound(name.to_string()))
    }

    pub fn species(&self, name: &str) -> DataResult<Arc<Species>> {
        self.species
            .get(&key(name))
            .cloned()
            .ok_or_else(|| DataError::SpeciesNotFound(name.to_string()))
    }

    /// Create a freshly initialized Pokemon of the named species
    pub fn create_pokemon(&self, species_name: &str, level: u8) -> DataResult<Pokemon> {
        Ok(Pokemon::new(self.species(species_name)?, level))
    }
}

fn parse_table<T: serde::de::DeserializeOwned>(source_name: &str, text: &str) -> DataResult<Vec<T>> {
    ron::from_str(text).map_err(|error| DataError::Parse {
        source_name: source_name.to_string(),
        error,
    })
}

fn read_table(path: &Path) -> DataResult<String> {
    fs::read_to_string(path).map_err(|error| DataError::Io {
        path: path.display().to_string(),
        error,
    })
}
