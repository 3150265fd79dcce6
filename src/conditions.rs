//! Status conditions and the hooks they run on a Pokemon.
//!
//! A condition is plain data plus up to three function hooks. The registry is
//! built once and shared read-only through [`BattleContext`].

use crate::battle::rng::BattleRng;
use crate::config::BattleConfig;
use crate::pokemon::Pokemon;
use schema::ConditionId;
use std::collections::HashMap;
use std::sync::Arc;

/// Runs when the condition is applied.
pub type OnStart = fn(pokemon: &mut Pokemon, rng: &mut BattleRng, config: &BattleConfig);

/// Runs before the Pokemon acts. Returning false cancels its move.
pub type OnBeforeMove = fn(pokemon: &mut Pokemon, rng: &mut BattleRng, config: &BattleConfig) -> bool;

/// Runs once at the end of the Pokemon's part of the turn.
pub type OnAfterTurn = fn(pokemon: &mut Pokemon, rng: &mut BattleRng, config: &BattleConfig);

#[derive(Debug, Clone, Copy)]
pub struct Condition {
    pub id: ConditionId,
    pub name: &'static str,
    /// Appended to the Pokemon's name when the condition starts.
    pub start_message: &'static str,
    pub on_start: Option<OnStart>,
    pub on_before_move: Option<OnBeforeMove>,
    pub on_after_turn: Option<OnAfterTurn>,
}

impl Condition {
    const fn new(id: ConditionId, name: &'static str, start_message: &'static str) -> Self {
        Self {
            id,
            name,
            start_message,
            on_start: None,
            on_before_move: None,
            on_after_turn: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConditionRegistry {
    conditions: HashMap<ConditionId, Condition>,
}

impl Default for ConditionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ConditionRegistry {
    pub fn new() -> Self {
        let conditions = [
            Condition {
                on_after_turn: Some(poison_after_turn),
                ..Condition::new(ConditionId::Poison, "Poison", "has been poisoned")
            },
            Condition {
                on_after_turn: Some(burn_after_turn),
                ..Condition::new(ConditionId::Burn, "Burn", "has been burned")
            },
            Condition {
                on_before_move: Some(paralysis_before_move),
                ..Condition::new(ConditionId::Paralysis, "Paralyzed", "has been paralyzed")
            },
            Condition {
                on_start: Some(sleep_start),
                on_before_move: Some(sleep_before_move),
                ..Condition::new(ConditionId::Sleep, "Sleep", "has fallen asleep")
            },
            Condition {
                on_before_move: Some(freeze_before_move),
                ..Condition::new(ConditionId::Freeze, "Freeze", "has been frozen")
            },
            Condition {
                on_start: Some(confusion_start),
                on_before_move: Some(confusion_before_move),
                ..Condition::new(ConditionId::Confusion, "Confusion", "has been confused")
            },
        ];

        Self {
            conditions: conditions.into_iter().map(|c| (c.id, c)).collect(),
        }
    }

    pub fn get(&self, id: ConditionId) -> &Condition {
        // Every id is registered in `new`.
        &self.conditions[&id]
    }
}

/// Everything a battle needs besides its participants: tuning and the
/// condition registry. Shared read-only between battles.
#[derive(Debug, Clone, Default)]
pub struct BattleContext {
    pub config: BattleConfig,
    pub conditions: ConditionRegistry,
}

impl BattleContext {
    pub fn new(config: BattleConfig) -> Arc<Self> {
        Arc::new(Self {
            config,
            conditions: ConditionRegistry::new(),
        })
    }
}

fn fraction_of_max_hp(pokemon: &Pokemon, divisor: u16) -> u16 {
    (pokemon.max_hp / divisor.max(1)).max(1)
}

fn poison_after_turn(pokemon: &mut Pokemon, _rng: &mut BattleRng, config: &BattleConfig) {
    let damage = fraction_of_max_hp(pokemon, config.poison_damage_divisor);
    pokemon.update_hp(damage);
    pokemon.queue_message(format!("{} hurt itself due to poison", pokemon.name()));
}

fn burn_after_turn(pokemon: &mut Pokemon, _rng: &mut BattleRng, config: &BattleConfig) {
    let damage = fraction_of_max_hp(pokemon, config.burn_damage_divisor);
    pokemon.update_hp(damage);
    pokemon.queue_message(format!("{} hurt itself due to burn", pokemon.name()));
}

fn paralysis_before_move(pokemon: &mut Pokemon, rng: &mut BattleRng, config: &BattleConfig) -> bool {
    if rng.chance(config.paralysis_skip_chance, "paralysis skip") {
        pokemon.queue_message(format!("{}'s paralyzed and can't move", pokemon.name()));
        return false;
    }
    true
}

fn sleep_start(pokemon: &mut Pokemon, rng: &mut BattleRng, config: &BattleConfig) {
    let (low, high) = config.sleep_turns;
    pokemon.status_time = rng.range_inclusive(low, high, "sleep turns");
    tracing::debug!(turns = pokemon.status_time, "{} will sleep", pokemon.name());
}

fn sleep_before_move(pokemon: &mut Pokemon, _rng: &mut BattleRng, _config: &BattleConfig) -> bool {
    if pokemon.status_time == 0 {
        pokemon.cure_status();
        pokemon.queue_message(format!("{} woke up!", pokemon.name()));
        return true;
    }

    pokemon.status_time -= 1;
    pokemon.queue_message(format!("{} is sleeping", pokemon.name()));
    false
}

fn freeze_before_move(pokemon: &mut Pokemon, rng: &mut BattleRng, config: &BattleConfig) -> bool {
    if rng.chance(config.freeze_thaw_chance, "freeze thaw") {
        pokemon.cure_status();
        pokemon.queue_message(format!("{} is not frozen anymore", pokemon.name()));
        return true;
    }
    false
}

fn confusion_start(pokemon: &mut Pokemon, rng: &mut BattleRng, config: &BattleConfig) {
    let (low, high) = config.confusion_turns;
    pokemon.volatile_status_time = rng.range_inclusive(low, high, "confusion turns");
    tracing::debug!(turns = pokemon.volatile_status_time, "{} will be confused", pokemon.name());
}

fn confusion_before_move(pokemon: &mut Pokemon, rng: &mut BattleRng, config: &BattleConfig) -> bool {
    if pokemon.volatile_status_time == 0 {
        pokemon.cure_volatile_status();
        pokemon.queue_message(format!("{} kicked out of confusion!", pokemon.name()));
        return true;
    }

    pokemon.volatile_status_time -= 1;
    if rng.chance(config.confusion_self_hit_chance, "confusion self-hit") {
        pokemon.queue_message(format!("{} is confused", pokemon.name()));
        let damage = fraction_of_max_hp(pokemon, config.confusion_damage_divisor);
        pokemon.update_hp(damage);
        pokemon.queue_message("It hurt itself due to confusion".to_string());
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dex::Dex;
    use pretty_assertions::assert_eq;
    use strum::IntoEnumIterator;

    fn pokemon(species: &str, level: u8) -> Pokemon {
        Dex::builtin()
            .and_then(|dex| dex.create_pokemon(species, level))
            .expect("builtin species should exist")
    }

    #[test]
    fn test_every_condition_is_registered() {
        let registry = ConditionRegistry::new();
        for id in ConditionId::iter() {
            assert_eq!(registry.get(id).id, id);
        }
    }

    #[test]
    fn test_poison_damage_is_an_eighth_of_max_hp() {
        let config = BattleConfig::default();
        let mut rng = BattleRng::new_for_test(vec![]);
        let mut bulbasaur = pokemon("Bulbasaur", 50);
        let max_hp = bulbasaur.max_hp;

        poison_after_turn(&mut bulbasaur, &mut rng, &config);

        assert_eq!(bulbasaur.hp, max_hp - max_hp / 8);
        assert_eq!(
            bulbasaur.drain_status_changes(),
            vec!["Bulbasaur hurt itself due to poison".to_string()]
        );
    }

    #[test]
    fn test_status_damage_is_at_least_one() {
        let config = BattleConfig::default();
        let mut rng = BattleRng::new_for_test(vec![]);
        let mut pidgey = pokemon("Pidgey", 1);
        let max_hp = pidgey.max_hp;
        assert!(max_hp < 16);

        burn_after_turn(&mut pidgey, &mut rng, &config);
        assert_eq!(pidgey.hp, max_hp - 1);
    }

    #[test]
    fn test_sleep_counts_down_then_wakes() {
        let config = BattleConfig::default();
        // 0.0 picks the shortest sleep: one turn.
        let mut rng = BattleRng::new_for_test(vec![0.0]);
        let mut pikachu = pokemon("Pikachu", 10);
        sleep_start(&mut pikachu, &mut rng, &config);
        assert_eq!(pikachu.status_time, 1);

        assert!(!sleep_before_move(&mut pikachu, &mut rng, &config));
        assert!(sleep_before_move(&mut pikachu, &mut rng, &config));
        assert_eq!(
            pikachu.drain_status_changes(),
            vec!["Pikachu is sleeping".to_string(), "Pikachu woke up!".to_string()]
        );
    }

    #[test]
    fn test_confusion_self_hit_blocks_the_move() {
        let config = BattleConfig::default();
        let mut rng = BattleRng::new_for_test(vec![0.0]);
        let mut zubat = pokemon("Zubat", 20);
        zubat.volatile_status_time = 2;
        let max_hp = zubat.max_hp;

        assert!(!confusion_before_move(&mut zubat, &mut rng, &config));
        assert_eq!(zubat.volatile_status_time, 1);
        assert_eq!(zubat.hp, max_hp - max_hp / 8);
    }

    #[test]
    fn test_paralysis_skip_chance() {
        let config = BattleConfig::default();
        // 25 is the last percent roll that still skips.
        let mut rng = BattleRng::new_for_test(vec![0.24, 0.25]);
        let mut pikachu = pokemon("Pikachu", 10);

        assert!(!paralysis_before_move(&mut pikachu, &mut rng, &config));
        assert!(paralysis_before_move(&mut pikachu, &mut rng, &config));
    }
}
