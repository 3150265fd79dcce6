//! Menu navigation and the confirmations behind each menu.

use crate::battle::state::{
    ActionChoice, BattleEvent, BattleState, Menu, MenuInput, PartyScreenReason, Side,
};
use crate::battle::system::{BattleSystem, MoveChoice, TurnAction};
use crate::errors::SelectionError;

/// Move a cursor on a two-column grid of `len` entries.
pub fn navigate(index: usize, len: usize, input: MenuInput) -> usize {
    if len == 0 {
        return 0;
    }
    let last = len - 1;
    let moved = match input {
        MenuInput::Right => index.saturating_add(1),
        MenuInput::Left => index.saturating_sub(1),
        MenuInput::Down => index.saturating_add(2),
        MenuInput::Up => index.saturating_sub(2),
        MenuInput::Confirm | MenuInput::Cancel => index,
    };
    moved.min(last)
}

impl BattleSystem {
    pub(crate) fn open_action_selection(&mut self) {
        self.bus.message("Choose an action");
        self.set_state(BattleState::ActionSelection);
        self.bus.push(BattleEvent::MenuOpened {
            menu: Menu::Action,
            options: ActionChoice::ALL.iter().map(|c| c.label().to_string()).collect(),
        });
        self.bus.push(BattleEvent::SelectionChanged {
            menu: Menu::Action,
            index: self.current_action,
        });
    }

    pub(crate) fn open_move_selection(&mut self) {
        let pokemon = self.field.unit(Side::Player);
        let options = pokemon
            .moves
            .iter()
            .map(|m| format!("{} {}/{} ({})", m.name(), m.pp, m.max_pp(), m.data.move_type))
            .collect();
        self.current_move = self.current_move.min(pokemon.moves.len().saturating_sub(1));

        self.set_state(BattleState::MoveSelection);
        self.bus.push(BattleEvent::MenuOpened {
            menu: Menu::Move,
            options,
        });
        self.bus.push(BattleEvent::SelectionChanged {
            menu: Menu::Move,
            index: self.current_move,
        });
    }

    pub(crate) fn open_party_screen(&mut self, reason: PartyScreenReason) {
        let options = self
            .field
            .party
            .iter()
            .map(|p| format!("{} Lv.{} {}/{}", p.name(), p.level, p.hp, p.max_hp))
            .collect();
        self.party_reason = reason;
        self.current_member = self.current_member.min(self.field.party.len() - 1);

        self.bus.message("Choose a pokemon");
        self.set_state(BattleState::PartyScreen);
        self.bus.push(BattleEvent::MenuOpened {
            menu: Menu::Party,
            options,
        });
        self.bus.push(BattleEvent::SelectionChanged {
            menu: Menu::Party,
            index: self.current_member,
        });
    }

    pub(crate) fn handle_action_selection(&mut self, input: MenuInput) {
        match input {
            MenuInput::Confirm => {
                let choice = ActionChoice::ALL[self.current_action];
                let result = self.confirm_action(choice);
                self.report(result);
            }
            MenuInput::Cancel => {}
            _ => {
                self.current_action = navigate(self.current_action, ActionChoice::ALL.len(), input);
                self.bus.push(BattleEvent::SelectionChanged {
                    menu: Menu::Action,
                    index: self.current_action,
                });
            }
        }
    }

    pub(crate) fn handle_move_selection(&mut self, input: MenuInput) {
        match input {
            MenuInput::Confirm => {
                let result = self.confirm_move(self.current_move);
                // Picking a spent move just leaves the menu open.
                if !matches!(result, Err(SelectionError::NoPpRemaining(_))) {
                    self.report(result);
                }
            }
            MenuInput::Cancel => self.open_action_selection(),
            _ => {
                let len = self.field.unit(Side::Player).moves.len();
                self.current_move = navigate(self.current_move, len, input);
                self.bus.push(BattleEvent::SelectionChanged {
                    menu: Menu::Move,
                    index: self.current_move,
                });
            }
        }
    }

    pub(crate) fn handle_party_selection(&mut self, input: MenuInput) {
        match input {
            MenuInput::Confirm => {
                let result = self.confirm_party_member(self.current_member);
                self.report(result);
            }
            MenuInput::Cancel => match self.party_reason {
                PartyScreenReason::Voluntary => self.open_action_selection(),
                PartyScreenReason::Forced => self.report(Err(SelectionError::SwitchRequired)),
            },
            _ => {
                self.current_member = navigate(self.current_member, self.field.party.len(), input);
                self.bus.push(BattleEvent::SelectionChanged {
                    menu: Menu::Party,
                    index: self.current_member,
                });
            }
        }
    }

    /// Narrate a rejected confirmation. The state is left as it was.
    fn report(&mut self, result: Result<(), SelectionError>) {
        if let Err(err) = result {
            tracing::warn!(%err, state = ?self.state, "selection rejected");
            self.bus.message(err.to_string());
        }
    }

    /// Confirm an entry of the action menu.
    pub fn choose_action(&mut self, choice: ActionChoice) -> Result<Vec<BattleEvent>, SelectionError> {
        self.confirm_action(choice)?;
        Ok(self.bus.take())
    }

    /// Use the move in `slot`. Allowed from the action menu or the move menu.
    pub fn choose_move(&mut self, slot: usize) -> Result<Vec<BattleEvent>, SelectionError> {
        self.confirm_move(slot)?;
        Ok(self.bus.take())
    }

    /// Send out party member `index`, either as a turn or to replace a
    /// fainted Pokemon.
    pub fn choose_party_member(&mut self, index: usize) -> Result<Vec<BattleEvent>, SelectionError> {
        self.confirm_party_member(index)?;
        Ok(self.bus.take())
    }

    fn confirm_action(&mut self, choice: ActionChoice) -> Result<(), SelectionError> {
        if self.state != BattleState::ActionSelection {
            return Err(SelectionError::NotAccepting);
        }
        self.current_action = ActionChoice::ALL
            .iter()
            .position(|c| *c == choice)
            .unwrap_or(self.current_action);

        match choice {
            ActionChoice::Fight => {
                if self.field.unit(Side::Player).has_usable_move() {
                    self.open_move_selection();
                } else {
                    self.run_turn(TurnAction::Move(MoveChoice::Struggle));
                }
            }
            ActionChoice::Bag => self.bus.message("You have no items to use."),
            ActionChoice::Pokemon => self.open_party_screen(PartyScreenReason::Voluntary),
            ActionChoice::Run => self.run_turn(TurnAction::Run),
        }
        Ok(())
    }

    fn confirm_move(&mut self, slot: usize) -> Result<(), SelectionError> {
        if !matches!(
            self.state,
            BattleState::ActionSelection | BattleState::MoveSelection
        ) {
            return Err(SelectionError::NotAccepting);
        }
        let pokemon = self.field.unit(Side::Player);
        let Some(move_instance) = pokemon.moves.get(slot) else {
            return Err(SelectionError::InvalidMoveIndex(slot));
        };
        if !move_instance.has_pp() {
            return Err(SelectionError::NoPpRemaining(move_instance.name().to_string()));
        }

        self.current_move = slot;
        self.run_turn(TurnAction::Move(MoveChoice::Slot(slot)));
        Ok(())
    }

    fn confirm_party_member(&mut self, index: usize) -> Result<(), SelectionError> {
        let reason = match self.state {
            BattleState::PartyScreen => self.party_reason,
            BattleState::ActionSelection => PartyScreenReason::Voluntary,
            _ => return Err(SelectionError::NotAccepting),
        };
        let Some(member) = self.field.party.get(index) else {
            return Err(SelectionError::InvalidPokemonIndex(index));
        };
        if member.is_fainted() {
            return Err(SelectionError::FaintedPokemon);
        }
        if index == self.field.active {
            return Err(SelectionError::AlreadyActive);
        }

        self.current_member = index;
        match reason {
            PartyScreenReason::Voluntary => self.run_turn(TurnAction::Switch(index)),
            PartyScreenReason::Forced => {
                self.switch_pokemon(index);
                self.process_steps();
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 4, MenuInput::Right, 1)]
    #[case(1, 4, MenuInput::Right, 2)]
    #[case(3, 4, MenuInput::Right, 3)]
    #[case(0, 4, MenuInput::Left, 0)]
    #[case(0, 4, MenuInput::Down, 2)]
    #[case(2, 4, MenuInput::Down, 3)]
    #[case(3, 4, MenuInput::Up, 1)]
    #[case(1, 4, MenuInput::Up, 0)]
    #[case(0, 3, MenuInput::Down, 2)]
    #[case(1, 3, MenuInput::Down, 2)]
    #[case(0, 1, MenuInput::Down, 0)]
    #[case(0, 0, MenuInput::Right, 0)]
    fn test_grid_navigation(
        #[case] index: usize,
        #[case] len: usize,
        #[case] input: MenuInput,
        #[case] expected: usize,
    ) {
        assert_eq!(navigate(index, len, input), expected);
    }
}
