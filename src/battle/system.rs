//! The battle state machine.
//!
//! `BattleSystem` is synchronous: every call takes one decision or one menu
//! input, resolves as much of the battle as it can, and returns the events it
//! produced in order. Pacing is left to [`BattleRunner`](super::runner::BattleRunner).

use crate::battle::rng::BattleRng;
use crate::battle::state::{
    Animation, BattleEvent, BattleState, EventBus, MenuInput, PartyScreenReason, Side,
};
use crate::conditions::BattleContext;
use crate::errors::{BattleResult, PartyError};
use crate::party::Party;
use crate::pokemon::Pokemon;
use schema::MoveData;
use std::collections::VecDeque;
use std::sync::Arc;

/// Which move a combatant is about to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveChoice {
    Slot(usize),
    Struggle,
}

/// A resolved player decision for one turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnAction {
    Move(MoveChoice),
    Switch(usize),
    Run,
}

/// One pending piece of the current turn. `member` pins the player's Pokemon
/// that queued the step so a switch in between cancels it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TurnStep {
    Move {
        side: Side,
        member: usize,
        choice: MoveChoice,
    },
    AfterTurn {
        side: Side,
        member: usize,
    },
    Switch {
        member: usize,
    },
    Escape,
}

/// The two active Pokemon and the player's bench.
#[derive(Debug, Clone)]
pub struct BattleField {
    pub party: Party,
    pub active: usize,
    pub enemy: Pokemon,
}

impl BattleField {
    pub fn unit(&self, side: Side) -> &Pokemon {
        match side {
            Side::Player => &self.party[self.active],
            Side::Enemy => &self.enemy,
        }
    }

    pub fn unit_mut(&mut self, side: Side) -> &mut Pokemon {
        match side {
            Side::Player => &mut self.party[self.active],
            Side::Enemy => &mut self.enemy,
        }
    }

    /// The unit on `side` and its opponent, borrowed together.
    pub fn units_mut(&mut self, side: Side) -> (&mut Pokemon, &mut Pokemon) {
        let player = &mut self.party[self.active];
        let enemy = &mut self.enemy;
        match side {
            Side::Player => (player, enemy),
            Side::Enemy => (enemy, player),
        }
    }
}

pub struct BattleSystem {
    pub(crate) ctx: Arc<BattleContext>,
    pub(crate) rng: BattleRng,
    pub(crate) field: BattleField,
    pub(crate) state: BattleState,
    pub(crate) party_reason: PartyScreenReason,
    pub(crate) current_action: usize,
    pub(crate) current_move: usize,
    pub(crate) current_member: usize,
    pub(crate) escape_attempts: u32,
    pub(crate) steps: VecDeque<TurnStep>,
    pub(crate) bus: EventBus,
}

impl BattleSystem {
    /// Set up a wild battle. The first healthy party member leads.
    pub fn new(
        ctx: Arc<BattleContext>,
        party: Party,
        enemy: Pokemon,
        rng: BattleRng,
    ) -> BattleResult<Self> {
        let active = party.healthy_pokemon().ok_or(PartyError::NoHealthyPokemon)?;
        Ok(Self {
            ctx,
            rng,
            field: BattleField {
                party,
                active,
                enemy,
            },
            state: BattleState::Start,
            party_reason: PartyScreenReason::Voluntary,
            current_action: 0,
            current_move: 0,
            current_member: 0,
            escape_attempts: 0,
            steps: VecDeque::new(),
            bus: EventBus::new(),
        })
    }

    /// Send both Pokemon out and open the action menu.
    pub fn start(&mut self) -> Vec<BattleEvent> {
        self.set_state(BattleState::Start);
        self.enter(Side::Enemy);
        let wild = self.field.enemy.name().to_string();
        self.bus.message(format!("A wild {} appeared.", wild));

        self.enter(Side::Player);
        let lead = self.field.unit(Side::Player).name().to_string();
        self.bus.message(format!("Go {}!", lead));

        self.open_action_selection();
        self.bus.take()
    }

    /// Feed one menu input to whichever menu is open. Inputs arriving while no
    /// menu is open are ignored.
    pub fn handle_input(&mut self, input: MenuInput) -> Vec<BattleEvent> {
        match self.state {
            BattleState::ActionSelection => self.handle_action_selection(input),
            BattleState::MoveSelection => self.handle_move_selection(input),
            BattleState::PartyScreen => self.handle_party_selection(input),
            state => tracing::debug!(?state, ?input, "input ignored"),
        }
        self.bus.take()
    }

    pub fn state(&self) -> BattleState {
        self.state
    }

    pub fn party_reason(&self) -> PartyScreenReason {
        self.party_reason
    }

    pub fn is_over(&self) -> bool {
        matches!(self.state, BattleState::BattleOver { .. })
    }

    pub fn player_pokemon(&self) -> &Pokemon {
        self.field.unit(Side::Player)
    }

    pub fn enemy_pokemon(&self) -> &Pokemon {
        &self.field.enemy
    }

    pub fn party(&self) -> &Party {
        &self.field.party
    }

    pub fn active_index(&self) -> usize {
        self.field.active
    }

    pub fn current_action(&self) -> usize {
        self.current_action
    }

    pub fn current_move(&self) -> usize {
        self.current_move
    }

    pub fn current_member(&self) -> usize {
        self.current_member
    }

    /// Hand the party back once the battle is done.
    pub fn into_party(self) -> Party {
        self.field.party
    }

    pub(crate) fn set_state(&mut self, state: BattleState) {
        if self.state != state {
            tracing::info!(from = ?self.state, to = ?state, "battle state");
        }
        self.state = state;
        self.bus.push(BattleEvent::StateChanged(state));
    }

    /// Announce the Pokemon now standing on `side`.
    pub(crate) fn enter(&mut self, side: Side) {
        let unit = self.field.unit_mut(side);
        unit.take_hp_changed();
        unit.take_status_changed();
        let entered = BattleEvent::PokemonEntered {
            side,
            name: unit.name().to_string(),
            level: unit.level,
            hp: unit.hp,
            max_hp: unit.max_hp,
        };
        let status = unit.status;

        self.bus.push(entered);
        self.bus.push(BattleEvent::StatusChanged { side, status });
        self.bus.push(BattleEvent::Animation {
            side,
            animation: Animation::Enter,
        });
    }

    /// Turn everything queued on the unit into events: narration first, then
    /// the HP bar and the status badge if they changed.
    pub(crate) fn sync_unit(&mut self, side: Side) {
        let unit = self.field.unit_mut(side);
        let messages = unit.drain_status_changes();
        let hp = unit.take_hp_changed().then_some((unit.hp, unit.max_hp));
        let status = unit.take_status_changed().then_some(unit.status);

        for message in messages {
            self.bus.message(message);
        }
        if let Some((hp, max_hp)) = hp {
            self.bus.push(BattleEvent::HpChanged { side, hp, max_hp });
        }
        if let Some(status) = status {
            self.bus.push(BattleEvent::StatusChanged { side, status });
        }
    }

    pub(crate) fn move_data(&self, side: Side, choice: MoveChoice) -> Arc<MoveData> {
        match choice {
            MoveChoice::Slot(slot) => Arc::clone(&self.field.unit(side).moves[slot].data),
            MoveChoice::Struggle => crate::moves::struggle(),
        }
    }
}
