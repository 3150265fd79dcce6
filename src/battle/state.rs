use schema::ConditionId;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleState {
    Start,
    ActionSelection,
    MoveSelection,
    PartyScreen,
    RunningTurn,
    Busy,
    BattleOver { won: bool },
}

/// Why the party screen is open. A forced switch can't be cancelled and
/// doesn't cost the player a turn.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartyScreenReason {
    Voluntary,
    Forced,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Enemy,
            Side::Enemy => Side::Player,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuInput {
    Up,
    Down,
    Left,
    Right,
    Confirm,
    Cancel,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Menu {
    Action,
    Move,
    Party,
}

/// Entries of the action menu, in grid order.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionChoice {
    Fight,
    Bag,
    Pokemon,
    Run,
}

impl ActionChoice {
    pub const ALL: [ActionChoice; 4] = [
        ActionChoice::Fight,
        ActionChoice::Bag,
        ActionChoice::Pokemon,
        ActionChoice::Run,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ActionChoice::Fight => "Fight",
            ActionChoice::Bag => "Bag",
            ActionChoice::Pokemon => "Pokemon",
            ActionChoice::Run => "Run",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Animation {
    Enter,
    Attack,
    Hit,
    Faint,
    Return,
}

/// Everything the presentation layer needs to know, in the order it happened.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum BattleEvent {
    Message(String),
    StateChanged(BattleState),
    /// Labels for a menu that was just opened.
    MenuOpened {
        menu: Menu,
        options: Vec<String>,
    },
    SelectionChanged {
        menu: Menu,
        index: usize,
    },
    PokemonEntered {
        side: Side,
        name: String,
        level: u8,
        hp: u16,
        max_hp: u16,
    },
    HpChanged {
        side: Side,
        hp: u16,
        max_hp: u16,
    },
    StatusChanged {
        side: Side,
        status: Option<ConditionId>,
    },
    Animation {
        side: Side,
        animation: Animation,
    },
    BattleOver {
        won: bool,
    },
}

impl BattleEvent {
    pub fn message(text: impl Into<String>) -> Self {
        BattleEvent::Message(text.into())
    }

    /// Text for a plain terminal. Menu bookkeeping events are silent.
    pub fn format(&self) -> Option<String> {
        match self {
            BattleEvent::Message(text) => Some(text.clone()),
            BattleEvent::StateChanged(_) | BattleEvent::SelectionChanged { .. } => None,
            BattleEvent::MenuOpened { options, .. } => Some(
                options
                    .iter()
                    .enumerate()
                    .map(|(i, option)| format!("[{}] {}", i, option))
                    .collect::<Vec<_>>()
                    .join("  "),
            ),
            BattleEvent::PokemonEntered {
                side,
                name,
                level,
                hp,
                max_hp,
            } => Some(format!("{} {} Lv.{} ({}/{})", Self::side_label(*side), name, level, hp, max_hp)),
            BattleEvent::HpChanged { side, hp, max_hp } => {
                Some(format!("{} HP {}/{}", Self::side_label(*side), hp, max_hp))
            }
            BattleEvent::StatusChanged { side, status } => Some(match status {
                Some(status) => format!("{} status: {:?}", Self::side_label(*side), status),
                None => format!("{} status cleared", Self::side_label(*side)),
            }),
            BattleEvent::Animation { .. } => None,
            BattleEvent::BattleOver { won } => Some(if *won {
                "The battle is over.".to_string()
            } else {
                "You have no more pokemon that can fight.".to_string()
            }),
        }
    }

    fn side_label(side: Side) -> &'static str {
        match side {
            Side::Player => "[You]",
            Side::Enemy => "[Foe]",
        }
    }
}

/// Ordered events produced while handling one input.
#[derive(Debug, Default)]
pub struct EventBus {
    events: Vec<BattleEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: BattleEvent) {
        self.events.push(event);
    }

    pub fn message(&mut self, text: impl Into<String>) {
        self.push(BattleEvent::message(text));
    }

    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    pub fn take(&mut self) -> Vec<BattleEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl std::fmt::Display for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for event in &self.events {
            writeln!(f, "  {:?}", event)?;
        }
        Ok(())
    }
}
