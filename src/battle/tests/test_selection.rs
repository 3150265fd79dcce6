#[cfg(test)]
mod tests {
    use crate::battle::state::{
        ActionChoice, BattleEvent, BattleState, Menu, MenuInput, PartyScreenReason,
    };
    use crate::battle::tests::common::{
        contains_message, create_test_battle, messages, TestPokemonBuilder,
    };
    use crate::errors::SelectionError;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_selecting_a_move_without_pp_does_nothing() {
        let mut player = TestPokemonBuilder::new("Pikachu", 10)
            .with_moves(vec!["Thunder Shock", "Growl"])
            .build();
        player.moves[0].pp = 0;
        let enemy = TestPokemonBuilder::new("Rattata", 10).build();

        // No rolls: nothing random may happen.
        let mut battle = create_test_battle(vec![player], enemy, vec![]);
        battle.handle_input(MenuInput::Confirm);
        assert_eq!(battle.state(), BattleState::MoveSelection);

        let events = battle.handle_input(MenuInput::Confirm);
        assert!(events.is_empty());
        assert_eq!(battle.state(), BattleState::MoveSelection);

        assert_eq!(
            battle.choose_move(0).unwrap_err(),
            SelectionError::NoPpRemaining("Thunder Shock".to_string())
        );
        assert_eq!(battle.player_pokemon().moves[1].pp, 40);
    }

    #[test]
    fn test_fight_with_no_pp_left_struggles() {
        let mut player = TestPokemonBuilder::new("Pikachu", 10)
            .with_moves(vec!["Thunder Shock"])
            .build();
        player.moves[0].pp = 0;
        let enemy = TestPokemonBuilder::new("Rattata", 10)
            .with_moves(vec!["Tail Whip"])
            .build();

        // Struggle never misses: crit and damage only, then Tail Whip accuracy.
        let mut battle = create_test_battle(vec![player], enemy, vec![0.0, 0.99, 1.0, 0.0]);
        let events = battle
            .choose_action(ActionChoice::Fight)
            .expect("action menu is open");

        assert!(contains_message(&events, "Pikachu used Struggle"));
        assert!(contains_message(&events, "Rattata used Tail Whip"));
        assert_eq!(battle.player_pokemon().moves[0].pp, 0);
        let enemy = battle.enemy_pokemon();
        assert!(enemy.hp < enemy.max_hp);
    }

    #[test]
    fn test_cannot_send_out_a_fainted_pokemon() {
        let lead = TestPokemonBuilder::new("Pikachu", 10).build();
        let fainted = TestPokemonBuilder::new("Squirtle", 10).with_hp(0).build();
        let enemy = TestPokemonBuilder::new("Rattata", 10).build();

        let mut battle = create_test_battle(vec![lead, fainted], enemy, vec![]);
        battle.choose_action(ActionChoice::Pokemon).expect("action menu is open");
        assert_eq!(battle.state(), BattleState::PartyScreen);
        assert_eq!(battle.party_reason(), PartyScreenReason::Voluntary);

        assert_eq!(
            battle.choose_party_member(1).unwrap_err(),
            SelectionError::FaintedPokemon
        );

        battle.handle_input(MenuInput::Right);
        let events = battle.handle_input(MenuInput::Confirm);
        assert_eq!(messages(&events), vec!["You can't send out a fainted pokemon"]);
        assert_eq!(battle.state(), BattleState::PartyScreen);
        assert_eq!(battle.active_index(), 0);
    }

    #[test]
    fn test_cannot_switch_with_the_active_pokemon() {
        let lead = TestPokemonBuilder::new("Pikachu", 10).build();
        let bench = TestPokemonBuilder::new("Squirtle", 10).build();
        let enemy = TestPokemonBuilder::new("Rattata", 10).build();

        let mut battle = create_test_battle(vec![lead, bench], enemy, vec![]);
        battle.handle_input(MenuInput::Down);
        let events = battle.handle_input(MenuInput::Confirm);
        assert!(events.contains(&BattleEvent::SelectionChanged {
            menu: Menu::Party,
            index: 0
        }));

        let events = battle.handle_input(MenuInput::Confirm);
        assert_eq!(messages(&events), vec!["You can't switch with the same pokemon"]);
        assert_eq!(battle.state(), BattleState::PartyScreen);

        battle.handle_input(MenuInput::Cancel);
        assert_eq!(battle.state(), BattleState::ActionSelection);
    }

    #[test]
    fn test_cancel_and_navigation_in_menus() {
        let player = TestPokemonBuilder::new("Pikachu", 10).build();
        let enemy = TestPokemonBuilder::new("Rattata", 10).build();
        let mut battle = create_test_battle(vec![player], enemy, vec![]);

        let events = battle.handle_input(MenuInput::Right);
        assert_eq!(
            events,
            vec![BattleEvent::SelectionChanged {
                menu: Menu::Action,
                index: 1
            }]
        );
        battle.handle_input(MenuInput::Left);
        battle.handle_input(MenuInput::Confirm);
        assert_eq!(battle.state(), BattleState::MoveSelection);

        battle.handle_input(MenuInput::Down);
        battle.handle_input(MenuInput::Right);
        assert_eq!(battle.current_move(), 3);

        battle.handle_input(MenuInput::Cancel);
        assert_eq!(battle.state(), BattleState::ActionSelection);
    }

    #[test]
    fn test_bag_has_nothing_to_use() {
        let player = TestPokemonBuilder::new("Pikachu", 10).build();
        let enemy = TestPokemonBuilder::new("Rattata", 10).build();
        let mut battle = create_test_battle(vec![player], enemy, vec![]);

        let events = battle.choose_action(ActionChoice::Bag).expect("action menu is open");

        assert_eq!(messages(&events), vec!["You have no items to use."]);
        assert_eq!(battle.state(), BattleState::ActionSelection);
    }

    #[test]
    fn test_choices_are_refused_outside_their_menu() {
        let player = TestPokemonBuilder::new("Pikachu", 10).build();
        let enemy = TestPokemonBuilder::new("Rattata", 10).build();
        let mut battle = create_test_battle(vec![player], enemy, vec![]);

        battle.choose_action(ActionChoice::Fight).expect("action menu is open");
        assert_eq!(
            battle.choose_action(ActionChoice::Run).unwrap_err(),
            SelectionError::NotAccepting
        );
        assert_eq!(
            battle.choose_move(7).unwrap_err(),
            SelectionError::InvalidMoveIndex(7)
        );
        assert_eq!(
            battle.choose_party_member(0).unwrap_err(),
            SelectionError::NotAccepting
        );
    }
}
