use crate::PokemonType;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Battle stats that can carry a boost stage. HP is tracked separately and
/// never boosted.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum Stat {
    Attack,
    Defense,
    #[strum(to_string = "Sp. Attack")]
    SpAttack,
    #[strum(to_string = "Sp. Defense")]
    SpDefense,
    Speed,
    // These two aren't real stats; they only scale move accuracy.
    Accuracy,
    Evasion,
}

impl Stat {
    /// The five stats memoized from species base stats.
    pub const BATTLE_STATS: [Stat; 5] = [
        Stat::Attack,
        Stat::Defense,
        Stat::SpAttack,
        Stat::SpDefense,
        Stat::Speed,
    ];

    pub fn is_accuracy_stat(self) -> bool {
        matches!(self, Stat::Accuracy | Stat::Evasion)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveCategory {
    Physical,
    Special,
    Status,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveTarget {
    #[default]
    Foe,
    /// The move's user.
    User,
}

/// Identifiers for entries in the condition registry. "No condition" is
/// expressed as `Option::None` wherever an id is stored.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum ConditionId {
    Poison,
    Burn,
    Sleep,
    Paralysis,
    Freeze,
    Confusion,
}

impl ConditionId {
    /// Volatile conditions live in their own slot and are wiped on switch-out
    /// and at the end of a battle.
    pub fn is_volatile(self) -> bool {
        matches!(self, ConditionId::Confusion)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatBoost {
    pub stat: Stat,
    pub boost: i8,
}

/// A bundle of effects a move can apply: stat boosts, a persistent status and
/// a volatile status. Any part may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveEffects {
    #[serde(default)]
    pub boosts: Vec<StatBoost>,
    #[serde(default)]
    pub status: Option<ConditionId>,
    #[serde(default)]
    pub volatile_status: Option<ConditionId>,
}

impl MoveEffects {
    pub fn is_empty(&self) -> bool {
        self.boosts.is_empty() && self.status.is_none() && self.volatile_status.is_none()
    }
}

/// An effect bundle that only triggers with `chance` percent probability and
/// may be aimed at a different target than the move itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecondaryEffect {
    pub chance: u8,
    #[serde(default)]
    pub target: MoveTarget,
    pub effects: MoveEffects,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveData {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub move_type: PokemonType,
    #[serde(default)]
    pub power: u16,
    /// `None` means the move never misses.
    pub accuracy: Option<u8>,
    pub pp: u8,
    #[serde(default)]
    pub priority: i8,
    pub category: MoveCategory,
    #[serde(default)]
    pub target: MoveTarget,
    #[serde(default)]
    pub effects: MoveEffects,
    #[serde(default)]
    pub secondaries: Vec<SecondaryEffect>,
}

impl MoveData {
    pub fn always_hits(&self) -> bool {
        self.accuracy.is_none()
    }

    pub fn is_damaging(&self) -> bool {
        self.category != MoveCategory::Status
    }
}
