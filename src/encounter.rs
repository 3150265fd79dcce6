//! Wild encounters for a map area.

use crate::battle::rng::BattleRng;
use crate::dex::Dex;
use crate::errors::{DataError, DataResult};
use crate::pokemon::Pokemon;
use serde::{Deserialize, Serialize};

const BUILTIN_AREA: &str = include_str!("../data/area.ron");

fn default_encounter_chance() -> u8 {
    10
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncounterSlot {
    pub species: String,
    pub level: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapArea {
    pub name: String,
    /// Percent chance per step in tall grass.
    #[serde(default = "default_encounter_chance")]
    pub encounter_chance: u8,
    pub wild_pokemon: Vec<EncounterSlot>,
}

impl MapArea {
    pub fn builtin() -> DataResult<Self> {
        Self::from_ron_str("area.ron", BUILTIN_AREA)
    }

    pub fn from_ron_str(source_name: &str, text: &str) -> DataResult<Self> {
        ron::from_str(text).map_err(|error| DataError::Parse {
            source_name: source_name.to_string(),
            error,
        })
    }

    /// Roll for an encounter after a step in tall grass.
    pub fn check_for_encounter(&self, rng: &mut BattleRng) -> bool {
        rng.percent("encounter check") < self.encounter_chance
    }

    /// Pick a slot uniformly and create its Pokemon.
    pub fn random_wild_pokemon(&self, dex: &Dex, rng: &mut BattleRng) -> DataResult<Pokemon> {
        if self.wild_pokemon.is_empty() {
            return Err(DataError::EmptyEncounterTable(self.name.clone()));
        }
        let slot = &self.wild_pokemon[rng.index(self.wild_pokemon.len(), "wild pokemon")];
        tracing::info!(area = %self.name, species = %slot.species, level = slot.level, "wild encounter");
        dex.create_pokemon(&slot.species, slot.level)
    }
}
