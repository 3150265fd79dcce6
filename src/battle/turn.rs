//! Turn resolution: ordering, move execution, end-of-turn effects, switching,
//! escaping and the end of the battle.
//!
//! A turn is a queue of [`TurnStep`]s. When the player's Pokemon faints the
//! queue pauses on the party screen and picks up again once a replacement is
//! out.

use crate::battle::state::{Animation, BattleEvent, BattleState, PartyScreenReason, Side};
use crate::battle::system::{BattleSystem, MoveChoice, TurnAction, TurnStep};
use crate::pokemon::accuracy_stage_multiplier;
use schema::{MoveData, MoveEffects, MoveTarget, Stat};
use std::cmp::Ordering;

impl BattleSystem {
    pub(crate) fn run_turn(&mut self, action: TurnAction) {
        self.set_state(BattleState::RunningTurn);
        let player_member = self.field.active;

        match action {
            TurnAction::Move(player_choice) => {
                let enemy_choice = self.enemy_choice();
                let player_first = self.player_moves_first(player_choice, enemy_choice);
                tracing::debug!(?player_choice, ?enemy_choice, player_first, "turn order");

                let (first, second) = if player_first {
                    ((Side::Player, player_choice), (Side::Enemy, enemy_choice))
                } else {
                    ((Side::Enemy, enemy_choice), (Side::Player, player_choice))
                };
                for (side, choice) in [first, second] {
                    let member = match side {
                        Side::Player => player_member,
                        Side::Enemy => 0,
                    };
                    self.steps.push_back(TurnStep::Move {
                        side,
                        member,
                        choice,
                    });
                }
            }
            TurnAction::Switch(member) => {
                let enemy_choice = self.enemy_choice();
                self.steps.push_back(TurnStep::Switch { member });
                self.steps.push_back(TurnStep::Move {
                    side: Side::Enemy,
                    member: 0,
                    choice: enemy_choice,
                });
            }
            TurnAction::Run => {
                self.steps.push_back(TurnStep::Escape);
            }
        }

        self.process_steps();
    }

    fn enemy_choice(&mut self) -> MoveChoice {
        match self.field.enemy.random_move(&mut self.rng) {
            Some(slot) => MoveChoice::Slot(slot),
            None => MoveChoice::Struggle,
        }
    }

    /// Higher priority goes first, then higher Speed. The player wins ties.
    fn player_moves_first(&self, player_choice: MoveChoice, enemy_choice: MoveChoice) -> bool {
        let player_priority = self.move_data(Side::Player, player_choice).priority;
        let enemy_priority = self.move_data(Side::Enemy, enemy_choice).priority;

        match player_priority.cmp(&enemy_priority) {
            Ordering::Greater => true,
            Ordering::Less => false,
            Ordering::Equal => self.field.unit(Side::Player).speed() >= self.field.enemy.speed(),
        }
    }

    /// Run queued steps until the turn is done, the battle ends, or a fainted
    /// Pokemon has to be replaced.
    pub(crate) fn process_steps(&mut self) {
        while let Some(step) = self.steps.pop_front() {
            if self.is_over() {
                self.steps.clear();
                return;
            }
            if self.state == BattleState::PartyScreen {
                self.steps.push_front(step);
                return;
            }

            match step {
                TurnStep::Move {
                    side,
                    member,
                    choice,
                } => {
                    if self.can_act(side, member) {
                        self.run_move(side, choice);
                        self.steps.push_front(TurnStep::AfterTurn { side, member });
                    }
                }
                TurnStep::AfterTurn { side, member } => self.run_after_turn(side, member),
                TurnStep::Switch { member } => self.switch_pokemon(member),
                TurnStep::Escape => self.try_escape(),
            }
        }

        if matches!(self.state, BattleState::RunningTurn | BattleState::Busy) {
            self.open_action_selection();
        }
    }

    /// A queued move only runs if the same Pokemon is still out, and both it
    /// and its target are standing.
    fn can_act(&self, side: Side, member: usize) -> bool {
        let still_out = side == Side::Enemy || self.field.active == member;
        still_out
            && !self.field.unit(side).is_fainted()
            && !self.field.unit(side.opponent()).is_fainted()
    }

    pub(crate) fn run_move(&mut self, side: Side, choice: MoveChoice) {
        let move_data = self.move_data(side, choice);
        let ctx = &self.ctx;
        let source = self.field.unit_mut(side);
        let can_move = source.on_before_move(&mut self.rng, ctx);
        if !can_move {
            self.sync_unit(side);
            if self.field.unit(side).is_fainted() {
                self.announce_faint(side);
            }
            return;
        }
        self.sync_unit(side);

        if let MoveChoice::Slot(slot) = choice {
            self.field.unit_mut(side).moves[slot].use_move();
        }
        let source_name = self.field.unit(side).name().to_string();
        self.bus.message(format!("{} used {}", source_name, move_data.name));
        self.bus.push(BattleEvent::Animation {
            side,
            animation: Animation::Attack,
        });

        if !self.check_if_move_hits(side, &move_data) {
            self.bus.message(format!("{}'s attack missed", source_name));
            return;
        }

        let target_side = side.opponent();
        if move_data.is_damaging() {
            self.bus.push(BattleEvent::Animation {
                side: target_side,
                animation: Animation::Hit,
            });
            let config = &self.ctx.config;
            let (source, target) = self.field.units_mut(side);
            let details = target.take_damage(&move_data, source, &mut self.rng, config);
            tracing::debug!(?details, "{} hit", source_name);

            self.sync_unit(target_side);
            if details.critical > 1.0 {
                self.bus.message("A critical hit!");
            }
            if details.type_effectiveness == 0.0 {
                self.bus.message("It had no effect!");
            } else if details.type_effectiveness > 1.0 {
                self.bus.message("It's super effective!");
            } else if details.type_effectiveness < 1.0 {
                self.bus.message("It's not very effective!");
            }
        } else {
            self.apply_effects(side, &move_data.effects, move_data.target);
        }

        for secondary in &move_data.secondaries {
            if self.field.unit(target_side).is_fainted() {
                break;
            }
            if self.rng.chance(secondary.chance, "secondary effect") {
                self.apply_effects(side, &secondary.effects, secondary.target);
            }
        }

        if self.field.unit(target_side).is_fainted() {
            self.announce_faint(target_side);
        }
    }

    /// Accuracy scaled by the user's accuracy stage and the target's evasion
    /// stage, against a 1-100 roll.
    fn check_if_move_hits(&mut self, side: Side, move_data: &MoveData) -> bool {
        let Some(accuracy) = move_data.accuracy else {
            return true;
        };
        let source = self.field.unit(side);
        let target = self.field.unit(side.opponent());
        let scaled = accuracy as f32
            * accuracy_stage_multiplier(source.stat_stage(Stat::Accuracy))
            / accuracy_stage_multiplier(target.stat_stage(Stat::Evasion));

        let roll = self.rng.percent("accuracy");
        roll as f32 <= scaled
    }

    fn apply_effects(&mut self, side: Side, effects: &MoveEffects, target: MoveTarget) {
        let recipient_side = match target {
            MoveTarget::User => side,
            MoveTarget::Foe => side.opponent(),
        };
        let ctx = &self.ctx;
        let recipient = self.field.unit_mut(recipient_side);

        if !effects.boosts.is_empty() {
            recipient.apply_boosts(&effects.boosts);
        }
        if let Some(status) = effects.status {
            recipient.set_status(status, &mut self.rng, ctx);
        }
        if let Some(volatile) = effects.volatile_status {
            recipient.set_volatile_status(volatile, &mut self.rng, ctx);
        }

        self.sync_unit(side);
        self.sync_unit(side.opponent());
    }

    /// End-of-turn effects for the Pokemon that queued the step.
    pub(crate) fn run_after_turn(&mut self, side: Side, member: usize) {
        if self.is_over() {
            return;
        }
        if side == Side::Player && self.field.active != member {
            return;
        }
        if self.field.unit(side).is_fainted() {
            return;
        }

        let ctx = &self.ctx;
        let unit = self.field.unit_mut(side);
        unit.on_after_turn(&mut self.rng, ctx);
        self.sync_unit(side);

        if self.field.unit(side).is_fainted() {
            self.announce_faint(side);
        }
    }

    fn announce_faint(&mut self, side: Side) {
        let name = self.field.unit(side).name().to_string();
        self.bus.message(format!("{} fainted", name));
        self.bus.push(BattleEvent::Animation {
            side,
            animation: Animation::Faint,
        });
        self.check_for_battle_over(side);
    }

    /// Decide what happens after the Pokemon on `side` fainted.
    fn check_for_battle_over(&mut self, fainted_side: Side) {
        match fainted_side {
            Side::Enemy => self.battle_over(true),
            Side::Player => match self.field.party.healthy_pokemon() {
                Some(_) => {
                    // Only end-of-turn effects survive a forced switch.
                    self.steps
                        .retain(|step| matches!(step, TurnStep::AfterTurn { .. }));
                    self.open_party_screen(PartyScreenReason::Forced);
                }
                None => self.battle_over(false),
            },
        }
    }

    /// Withdraw the active Pokemon and send out party member `member`.
    pub(crate) fn switch_pokemon(&mut self, member: usize) {
        self.set_state(BattleState::Busy);

        let current = self.field.unit_mut(Side::Player);
        if !current.is_fainted() {
            let name = current.name().to_string();
            self.bus.message(format!("Come back {}!", name));
            self.bus.push(BattleEvent::Animation {
                side: Side::Player,
                animation: Animation::Return,
            });
        }
        self.field.unit_mut(Side::Player).on_switch_out();

        self.field.active = member;
        self.enter(Side::Player);
        let name = self.field.unit(Side::Player).name().to_string();
        self.bus.message(format!("Go {}!", name));

        self.set_state(BattleState::RunningTurn);
    }

    fn try_escape(&mut self) {
        self.escape_attempts += 1;
        let player_speed = self.field.unit(Side::Player).speed() as u32;
        let enemy_speed = self.field.enemy.speed() as u32;

        let escaped = if player_speed > enemy_speed {
            true
        } else {
            let odds = (player_speed * 128 / enemy_speed.max(1) + 30 * self.escape_attempts) % 256;
            (self.rng.index(256, "escape") as u32) < odds
        };
        tracing::info!(escaped, attempts = self.escape_attempts, "escape attempt");

        if escaped {
            self.bus.message("Ran away safely!");
            self.battle_over(true);
        } else {
            self.bus.message("Can't escape!");
            let choice = self.enemy_choice();
            self.steps.push_back(TurnStep::Move {
                side: Side::Enemy,
                member: 0,
                choice,
            });
        }
    }

    /// End the battle. Runs once; later calls are ignored.
    pub(crate) fn battle_over(&mut self, won: bool) {
        if self.is_over() {
            return;
        }
        self.steps.clear();
        for pokemon in self.field.party.iter_mut() {
            pokemon.on_battle_over();
        }
        self.field.enemy.on_battle_over();

        tracing::info!(won, "battle over");
        self.set_state(BattleState::BattleOver { won });
        self.bus.push(BattleEvent::BattleOver { won });
    }
}
