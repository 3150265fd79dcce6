use crate::battle::rng::BattleRng;
use crate::conditions::BattleContext;
use crate::config::BattleConfig;
use crate::moves::MoveInstance;
use crate::species::Species;
use schema::{ConditionId, MoveCategory, MoveData, PokemonType, Stat, StatBoost};
use serde::Serialize;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

pub const MAX_MOVES: usize = 4;
pub const MAX_STAGE: i8 = 6;

const STAT_STAGE_MULTIPLIERS: [f32; 7] = [1.0, 1.5, 2.0, 2.5, 3.0, 3.5, 4.0];
const ACCURACY_STAGE_MULTIPLIERS: [f32; 7] = [
    1.0,
    4.0 / 3.0,
    5.0 / 3.0,
    2.0,
    7.0 / 3.0,
    8.0 / 3.0,
    3.0,
];

/// Accuracy and evasion have no memoized value; stages scale this instead.
const NOMINAL_ACCURACY: u16 = 100;

fn stage_multiplier(table: &[f32; 7], stage: i8) -> f32 {
    let stage = stage.clamp(-MAX_STAGE, MAX_STAGE);
    if stage >= 0 {
        table[stage as usize]
    } else {
        1.0 / table[(-stage) as usize]
    }
}

/// Multiplier for a regular stat at `stage`.
pub fn stat_stage_multiplier(stage: i8) -> f32 {
    stage_multiplier(&STAT_STAGE_MULTIPLIERS, stage)
}

/// Multiplier for accuracy or evasion at `stage`.
pub fn accuracy_stage_multiplier(stage: i8) -> f32 {
    stage_multiplier(&ACCURACY_STAGE_MULTIPLIERS, stage)
}

/// The damage formula with every random input supplied by the caller.
pub fn calculate_damage(
    level: u8,
    power: u16,
    attack: u16,
    defense: u16,
    roll: f32,
    effectiveness: f32,
    critical: f32,
) -> u16 {
    let a = (2.0 * level as f32 + 10.0) / 250.0;
    let d = a * power as f32 * (attack as f32 / defense.max(1) as f32) + 2.0;
    let damage = (d * roll * effectiveness * critical).floor();
    damage.clamp(0.0, u16::MAX as f32) as u16
}

/// What a hit did, for narration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DamageDetails {
    pub type_effectiveness: f32,
    pub critical: f32,
    pub fainted: bool,
    pub damage: u16,
}

/// A Pokemon's mutable battle state.
#[derive(Debug, Clone, Serialize)]
pub struct Pokemon {
    pub species: Arc<Species>,
    pub level: u8,
    pub hp: u16,
    pub max_hp: u16,
    stats: HashMap<Stat, u16>,
    stat_boosts: HashMap<Stat, i8>,
    pub status: Option<ConditionId>,
    pub status_time: u8,
    pub volatile_status: Option<ConditionId>,
    pub volatile_status_time: u8,
    pub moves: Vec<MoveInstance>,
    status_changes: VecDeque<String>,
    hp_changed: bool,
    status_changed: bool,
}

impl Pokemon {
    pub fn new(species: Arc<Species>, level: u8) -> Self {
        let mut pokemon = Pokemon {
            species,
            level,
            hp: 0,
            max_hp: 0,
            stats: HashMap::new(),
            stat_boosts: HashMap::new(),
            status: None,
            status_time: 0,
            volatile_status: None,
            volatile_status_time: 0,
            moves: Vec::new(),
            status_changes: VecDeque::new(),
            hp_changed: false,
            status_changed: false,
        };
        pokemon.init();
        pokemon
    }

    /// Learn the first four moves available at this level, compute stats and
    /// restore the Pokemon to full health with no status.
    pub fn init(&mut self) {
        self.moves = self
            .species
            .learnable_moves
            .iter()
            .filter(|learnable| learnable.level <= self.level)
            .take(MAX_MOVES)
            .map(|learnable| MoveInstance::new(Arc::clone(&learnable.move_data)))
            .collect();

        self.calculate_stats();
        self.hp = self.max_hp;
        self.reset_stat_boosts();
        self.status = None;
        self.status_time = 0;
        self.volatile_status = None;
        self.volatile_status_time = 0;
    }

    fn calculate_stats(&mut self) {
        let base = &self.species.base_stats;
        let level = self.level as u32;
        let scaled = |value: u16| (value as u32 * level / 100) as u16;

        self.stats = HashMap::from([
            (Stat::Attack, scaled(base.attack) + 5),
            (Stat::Defense, scaled(base.defense) + 5),
            (Stat::SpAttack, scaled(base.sp_attack) + 5),
            (Stat::SpDefense, scaled(base.sp_defense) + 5),
            (Stat::Speed, scaled(base.speed) + 5),
        ]);
        self.max_hp = scaled(base.hp) + 10 + self.level as u16;
    }

    fn reset_stat_boosts(&mut self) {
        self.stat_boosts = Stat::BATTLE_STATS
            .iter()
            .chain(&[Stat::Accuracy, Stat::Evasion])
            .map(|stat| (*stat, 0))
            .collect();
    }

    pub fn name(&self) -> &str {
        &self.species.name
    }

    pub fn types(&self) -> [PokemonType; 2] {
        self.species.types()
    }

    pub fn stat_stage(&self, stat: Stat) -> i8 {
        self.stat_boosts.get(&stat).copied().unwrap_or(0)
    }

    /// Stat value before boosts. Accuracy and evasion report the nominal 100.
    pub fn base_stat(&self, stat: Stat) -> u16 {
        if stat.is_accuracy_stat() {
            return NOMINAL_ACCURACY;
        }
        self.stats[&stat]
    }

    /// Stat value with the current boost stage applied
    pub fn effective_stat(&self, stat: Stat) -> u16 {
        let stage = self.stat_stage(stat);
        let multiplier = if stat.is_accuracy_stat() {
            accuracy_stage_multiplier(stage)
        } else {
            stat_stage_multiplier(stage)
        };
        (self.base_stat(stat) as f32 * multiplier).floor() as u16
    }

    pub fn attack(&self) -> u16 {
        self.effective_stat(Stat::Attack)
    }

    pub fn defense(&self) -> u16 {
        self.effective_stat(Stat::Defense)
    }

    pub fn sp_attack(&self) -> u16 {
        self.effective_stat(Stat::SpAttack)
    }

    pub fn sp_defense(&self) -> u16 {
        self.effective_stat(Stat::SpDefense)
    }

    pub fn speed(&self) -> u16 {
        self.effective_stat(Stat::Speed)
    }

    pub fn apply_boosts(&mut self, boosts: &[StatBoost]) {
        for StatBoost { stat, boost } in boosts.iter().copied() {
            let stage = self
                .stat_stage(stat)
                .saturating_add(boost)
                .clamp(-MAX_STAGE, MAX_STAGE);
            self.stat_boosts.insert(stat, stage);

            if boost > 0 {
                self.queue_message(format!("{}'s {} rose!", self.name(), stat));
            } else {
                if boost == 0 {
                    tracing::warn!(%stat, "zero stat boost applied to {}", self.name());
                }
                self.queue_message(format!("{}'s {} fell!", self.name(), stat));
            }
            tracing::debug!(%stat, stage, "{} boosted", self.name());
        }
    }

    /// Roll for a critical hit and a damage spread, then take the hit.
    pub fn take_damage(
        &mut self,
        move_data: &MoveData,
        attacker: &Pokemon,
        rng: &mut BattleRng,
        config: &BattleConfig,
    ) -> DamageDetails {
        let critical = if rng.next_roll("critical hit") * 100.0 <= config.critical_hit_chance as f64 {
            config.critical_multiplier
        } else {
            1.0
        };

        let [type1, type2] = self.types();
        let type_effectiveness = PokemonType::type_effectiveness(move_data.move_type, type1)
            * PokemonType::type_effectiveness(move_data.move_type, type2);

        let (attack, defense) = if move_data.category == MoveCategory::Special {
            (attacker.sp_attack(), self.sp_defense())
        } else {
            (attacker.attack(), self.defense())
        };

        let roll = rng.uniform(config.damage_roll_min, 1.0, "damage roll");
        let damage = calculate_damage(
            attacker.level,
            move_data.power,
            attack,
            defense,
            roll,
            type_effectiveness,
            critical,
        );
        self.update_hp(damage);

        DamageDetails {
            type_effectiveness,
            critical,
            fainted: self.is_fainted(),
            damage,
        }
    }

    /// Lose `damage` HP, never dropping below zero.
    pub fn update_hp(&mut self, damage: u16) {
        self.hp = self.hp.saturating_sub(damage).min(self.max_hp);
        self.hp_changed = true;
    }

    pub fn is_fainted(&self) -> bool {
        self.hp == 0
    }

    pub fn set_status(&mut self, id: ConditionId, rng: &mut BattleRng, ctx: &BattleContext) {
        if self.status.is_some() {
            return;
        }

        let condition = ctx.conditions.get(id);
        self.status = Some(id);
        if let Some(on_start) = condition.on_start {
            on_start(self, rng, &ctx.config);
        }
        self.queue_message(format!("{} {}", self.name(), condition.start_message));
        self.status_changed = true;
    }

    pub fn cure_status(&mut self) {
        self.status = None;
        self.status_time = 0;
        self.status_changed = true;
    }

    pub fn set_volatile_status(&mut self, id: ConditionId, rng: &mut BattleRng, ctx: &BattleContext) {
        if self.volatile_status.is_some() {
            return;
        }

        let condition = ctx.conditions.get(id);
        self.volatile_status = Some(id);
        if let Some(on_start) = condition.on_start {
            on_start(self, rng, &ctx.config);
        }
        self.queue_message(format!("{} {}", self.name(), condition.start_message));
    }

    pub fn cure_volatile_status(&mut self) {
        self.volatile_status = None;
        self.volatile_status_time = 0;
    }

    /// Index of a random move that still has PP, or `None` if every move is
    /// spent.
    pub fn random_move(&self, rng: &mut BattleRng) -> Option<usize> {
        let usable: Vec<usize> = self
            .moves
            .iter()
            .enumerate()
            .filter(|(_, m)| m.has_pp())
            .map(|(i, _)| i)
            .collect();
        if usable.is_empty() {
            return None;
        }
        Some(usable[rng.index(usable.len(), "random move")])
    }

    pub fn has_usable_move(&self) -> bool {
        self.moves.iter().any(MoveInstance::has_pp)
    }

    /// Run the status and volatile before-move hooks. Both always run; the
    /// Pokemon may act only if neither blocks.
    pub fn on_before_move(&mut self, rng: &mut BattleRng, ctx: &BattleContext) -> bool {
        let mut can_move = true;

        if let Some(hook) = self.status.and_then(|id| ctx.conditions.get(id).on_before_move) {
            if !hook(self, rng, &ctx.config) {
                can_move = false;
            }
        }
        if let Some(hook) = self
            .volatile_status
            .and_then(|id| ctx.conditions.get(id).on_before_move)
        {
            if !hook(self, rng, &ctx.config) {
                can_move = false;
            }
        }

        tracing::debug!(can_move, "{} before-move check", self.name());
        can_move
    }

    pub fn on_after_turn(&mut self, rng: &mut BattleRng, ctx: &BattleContext) {
        if let Some(hook) = self.status.and_then(|id| ctx.conditions.get(id).on_after_turn) {
            hook(self, rng, &ctx.config);
        }
        if let Some(hook) = self
            .volatile_status
            .and_then(|id| ctx.conditions.get(id).on_after_turn)
        {
            hook(self, rng, &ctx.config);
        }
    }

    /// Clear everything that only lasts for one battle. The persistent status
    /// carries over.
    pub fn on_battle_over(&mut self) {
        self.cure_volatile_status();
        self.reset_stat_boosts();
    }

    pub fn on_switch_out(&mut self) {
        self.cure_volatile_status();
        self.reset_stat_boosts();
    }

    pub fn queue_message(&mut self, message: String) {
        self.status_changes.push_back(message);
    }

    pub fn drain_status_changes(&mut self) -> Vec<String> {
        self.status_changes.drain(..).collect()
    }

    pub fn take_hp_changed(&mut self) -> bool {
        std::mem::take(&mut self.hp_changed)
    }

    pub fn take_status_changed(&mut self) -> bool {
        std::mem::take(&mut self.status_changed)
    }
}
