#[cfg(test)]
mod tests {
    use crate::battle::state::{BattleEvent, BattleState, Side};
    use crate::battle::tests::common::{
        contains_message, count_battle_over, create_test_battle, message_index, TestPokemonBuilder,
    };
    use pretty_assertions::assert_eq;
    use schema::ConditionId;

    fn enemy_hp_readings(events: &[BattleEvent]) -> Vec<u16> {
        events
            .iter()
            .filter_map(|event| match event {
                BattleEvent::HpChanged {
                    side: Side::Enemy,
                    hp,
                    ..
                } => Some(*hp),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_paralysis_can_stop_a_move() {
        let player = TestPokemonBuilder::new("Pikachu", 10)
            .with_moves(vec!["Thunder Shock"])
            .with_status(ConditionId::Paralysis)
            .build();
        let enemy = TestPokemonBuilder::new("Rattata", 10)
            .with_moves(vec!["Tail Whip"])
            .build();

        let mut battle = create_test_battle(vec![player], enemy, vec![0.0, 0.0, 0.0]);
        let events = battle.choose_move(0).expect("Thunder Shock is usable");

        assert!(contains_message(&events, "Pikachu's paralyzed and can't move"));
        assert!(!contains_message(&events, "Pikachu used Thunder Shock"));
        assert_eq!(battle.player_pokemon().moves[0].pp, 30);
        let rattata = battle.enemy_pokemon();
        assert_eq!(rattata.hp, rattata.max_hp);
    }

    #[test]
    fn test_sleeping_pokemon_skips_its_move() {
        let mut player = TestPokemonBuilder::new("Pikachu", 10)
            .with_moves(vec!["Thunder Shock"])
            .with_status(ConditionId::Sleep)
            .build();
        player.status_time = 1;
        let enemy = TestPokemonBuilder::new("Rattata", 10)
            .with_moves(vec!["Tail Whip"])
            .build();

        // Turn one: enemy pick and Tail Whip accuracy. Turn two adds Thunder
        // Shock accuracy / crit / damage / paralysis chance.
        let mut battle = create_test_battle(
            vec![player],
            enemy,
            vec![0.0, 0.0, 0.0, 0.0, 0.99, 1.0, 0.99, 0.0],
        );
        let events = battle.choose_move(0).expect("Thunder Shock is usable");
        assert!(contains_message(&events, "Pikachu is sleeping"));
        assert_eq!(battle.player_pokemon().status, Some(ConditionId::Sleep));

        // Next turn the counter has run out: wake up and act.
        let events = battle.choose_move(0).expect("Thunder Shock is usable");
        assert!(
            message_index(&events, "Pikachu woke up!")
                < message_index(&events, "Pikachu used Thunder Shock")
        );
        assert_eq!(battle.player_pokemon().status, None);
    }

    #[test]
    fn test_poison_damages_at_end_of_turn() {
        let player = TestPokemonBuilder::new("Bulbasaur", 20)
            .with_moves(vec!["Growl"])
            .with_status(ConditionId::Poison)
            .build();
        assert_eq!(player.max_hp, 39);
        let enemy = TestPokemonBuilder::new("Rattata", 20)
            .with_moves(vec!["Tail Whip"])
            .build();

        let mut battle = create_test_battle(vec![player], enemy, vec![0.0, 0.0, 0.0]);
        let events = battle.choose_move(0).expect("Growl is usable");

        assert_eq!(battle.player_pokemon().hp, 35);
        assert!(
            message_index(&events, "Bulbasaur used Growl")
                < message_index(&events, "Bulbasaur hurt itself due to poison")
        );
        assert_eq!(battle.state(), BattleState::ActionSelection);
    }

    #[test]
    fn test_status_move_applies_condition() {
        let player = TestPokemonBuilder::new("Pikachu", 10)
            .with_moves(vec!["Thunder Wave"])
            .build();
        let enemy = TestPokemonBuilder::new("Rattata", 10)
            .with_moves(vec!["Tail Whip"])
            .build();

        // Thunder Wave accuracy, then Rattata shakes off paralysis and moves.
        let mut battle = create_test_battle(vec![player], enemy, vec![0.0, 0.0, 0.99, 0.0]);
        let events = battle.choose_move(0).expect("Thunder Wave is usable");

        assert!(events.contains(&BattleEvent::StatusChanged {
            side: Side::Enemy,
            status: Some(ConditionId::Paralysis)
        }));
        assert!(contains_message(&events, "Rattata has been paralyzed"));
        assert!(contains_message(&events, "Rattata used Tail Whip"));
        assert_eq!(battle.enemy_pokemon().status, Some(ConditionId::Paralysis));
    }

    #[test]
    fn test_secondary_burn_hurts_at_end_of_turn() {
        let player = TestPokemonBuilder::new("Charmander", 10)
            .with_moves(vec!["Ember"])
            .build();
        let enemy = TestPokemonBuilder::new("Bulbasaur", 10)
            .with_moves(vec!["Growl"])
            .build();

        // Ember accuracy / crit / damage / burn chance, then Growl accuracy.
        let mut battle = create_test_battle(
            vec![player],
            enemy,
            vec![0.0, 0.0, 0.99, 1.0, 0.0, 0.0],
        );
        let events = battle.choose_move(0).expect("Ember is usable");

        assert!(contains_message(&events, "Bulbasaur has been burned"));
        assert!(contains_message(&events, "Bulbasaur hurt itself due to burn"));
        assert_eq!(battle.enemy_pokemon().status, Some(ConditionId::Burn));

        let readings = enemy_hp_readings(&events);
        assert_eq!(readings.len(), 2);
        let burn_damage = (battle.enemy_pokemon().max_hp / 16).max(1);
        assert_eq!(readings[1], readings[0] - burn_damage);
    }

    #[test]
    fn test_confusion_self_hit_can_end_the_battle() {
        let player = TestPokemonBuilder::new("Pikachu", 10)
            .with_moves(vec!["Thunder Shock"])
            .with_volatile_status(ConditionId::Confusion, 2)
            .with_hp(1)
            .build();
        let enemy = TestPokemonBuilder::new("Rattata", 10)
            .with_moves(vec!["Tail Whip"])
            .build();

        let mut battle = create_test_battle(vec![player], enemy, vec![0.0, 0.0]);
        let events = battle.choose_move(0).expect("Thunder Shock is usable");

        let confused = message_index(&events, "Pikachu is confused");
        assert_eq!(message_index(&events, "It hurt itself due to confusion"), confused + 1);
        assert!(contains_message(&events, "Pikachu fainted"));
        assert!(!contains_message(&events, "Rattata used Tail Whip"));
        assert_eq!(count_battle_over(&events), 1);
        assert!(events.contains(&BattleEvent::BattleOver { won: false }));

        // Volatile conditions end with the battle.
        assert_eq!(battle.player_pokemon().volatile_status, None);
        assert_eq!(battle.player_pokemon().hp, 0);
    }
}
