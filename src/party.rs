use crate::errors::PartyError;
use crate::pokemon::Pokemon;
use serde::Serialize;

pub const MAX_PARTY_SIZE: usize = 6;

/// The player's team, in menu order.
#[derive(Debug, Clone, Serialize)]
pub struct Party {
    pokemon: Vec<Pokemon>,
}

impl Party {
    pub fn new(pokemon: Vec<Pokemon>) -> Result<Self, PartyError> {
        if pokemon.is_empty() {
            return Err(PartyError::Empty);
        }
        if pokemon.len() > MAX_PARTY_SIZE {
            return Err(PartyError::TooLarge {
                max: MAX_PARTY_SIZE,
                got: pokemon.len(),
            });
        }
        Ok(Self { pokemon })
    }

    /// Index of the first Pokemon that can still battle.
    pub fn healthy_pokemon(&self) -> Option<usize> {
        self.pokemon.iter().position(|p| !p.is_fainted())
    }

    pub fn len(&self) -> usize {
        self.pokemon.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pokemon.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Pokemon> {
        self.pokemon.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pokemon> {
        self.pokemon.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Pokemon> {
        self.pokemon.iter_mut()
    }
}

impl std::ops::Index<usize> for Party {
    type Output = Pokemon;

    fn index(&self, index: usize) -> &Pokemon {
        &self.pokemon[index]
    }
}

impl std::ops::IndexMut<usize> for Party {
    fn index_mut(&mut self, index: usize) -> &mut Pokemon {
        &mut self.pokemon[index]
    }
}
