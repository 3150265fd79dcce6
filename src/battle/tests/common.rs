use crate::battle::rng::BattleRng;
use crate::battle::state::{BattleEvent, BattleState, Side};
use crate::battle::system::BattleSystem;
use crate::conditions::BattleContext;
use crate::config::BattleConfig;
use crate::dex::Dex;
use crate::moves::MoveInstance;
use crate::party::Party;
use crate::pokemon::Pokemon;
use schema::ConditionId;

pub fn dex() -> Dex {
    match Dex::builtin() {
        Ok(dex) => dex,
        Err(err) => panic!("Failed to load builtin dex: {}", err),
    }
}

/// A builder for creating test Pokemon instances with common defaults.
///
/// # Example
/// ```ignore
/// let pokemon = TestPokemonBuilder::new("Pikachu", 25)
///     .with_moves(vec!["Tackle"])
///     .with_status(ConditionId::Paralysis)
///     .build();
/// ```
pub struct TestPokemonBuilder {
    species: &'static str,
    level: u8,
    moves: Option<Vec<&'static str>>,
    status: Option<ConditionId>,
    volatile_status: Option<(ConditionId, u8)>,
    current_hp: Option<u16>,
}

impl TestPokemonBuilder {
    pub fn new(species: &'static str, level: u8) -> Self {
        Self {
            species,
            level,
            moves: None,
            status: None,
            volatile_status: None,
            current_hp: None,
        }
    }

    /// Replace the learned moves.
    pub fn with_moves(mut self, moves: Vec<&'static str>) -> Self {
        self.moves = Some(moves);
        self
    }

    /// Start with a status, without running its on-start hook.
    pub fn with_status(mut self, status: ConditionId) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_volatile_status(mut self, status: ConditionId, turns: u8) -> Self {
        self.volatile_status = Some((status, turns));
        self
    }

    /// Sets the current HP. If not set, HP will be max.
    pub fn with_hp(mut self, hp: u16) -> Self {
        self.current_hp = Some(hp);
        self
    }

    pub fn build(self) -> Pokemon {
        let dex = dex();
        let mut pokemon = match dex.create_pokemon(self.species, self.level) {
            Ok(pokemon) => pokemon,
            Err(err) => panic!("Failed to create {}: {}", self.species, err),
        };

        if let Some(moves) = self.moves {
            pokemon.moves = moves
                .into_iter()
                .map(|name| match dex.move_data(name) {
                    Ok(data) => MoveInstance::new(data),
                    Err(err) => panic!("Failed to load move {}: {}", name, err),
                })
                .collect();
        }
        pokemon.status = self.status;
        if let Some((status, turns)) = self.volatile_status {
            pokemon.volatile_status = Some(status);
            pokemon.volatile_status_time = turns;
        }
        if let Some(hp) = self.current_hp {
            pokemon.hp = hp.min(pokemon.max_hp);
        }
        pokemon
    }
}

/// A started battle sitting in the action menu. `rolls` scripts every random
/// decision made after the start.
pub fn create_test_battle(party: Vec<Pokemon>, enemy: Pokemon, rolls: Vec<f64>) -> BattleSystem {
    let ctx = BattleContext::new(BattleConfig::default());
    let party = match Party::new(party) {
        Ok(party) => party,
        Err(err) => panic!("Invalid test party: {}", err),
    };
    let mut battle = match BattleSystem::new(ctx, party, enemy, BattleRng::new_for_test(rolls)) {
        Ok(battle) => battle,
        Err(err) => panic!("Failed to create battle: {}", err),
    };
    battle.start();
    assert_eq!(battle.state(), BattleState::ActionSelection);
    battle
}

/// Just the narration lines, in order.
pub fn messages(events: &[BattleEvent]) -> Vec<String> {
    events
        .iter()
        .filter_map(|event| match event {
            BattleEvent::Message(text) => Some(text.clone()),
            _ => None,
        })
        .collect()
}

pub fn contains_message(events: &[BattleEvent], text: &str) -> bool {
    messages(events).iter().any(|m| m == text)
}

/// Position of a narration line, for ordering checks.
pub fn message_index(events: &[BattleEvent], text: &str) -> usize {
    match messages(events).iter().position(|m| m == text) {
        Some(index) => index,
        None => panic!("Expected message {:?} in {:#?}", text, messages(events)),
    }
}

/// Sides whose HP bar moved, in order.
pub fn hp_changes(events: &[BattleEvent]) -> Vec<Side> {
    events
        .iter()
        .filter_map(|event| match event {
            BattleEvent::HpChanged { side, .. } => Some(*side),
            _ => None,
        })
        .collect()
}

pub fn count_battle_over(events: &[BattleEvent]) -> usize {
    events
        .iter()
        .filter(|event| matches!(event, BattleEvent::BattleOver { .. }))
        .count()
}
