//! Drives a [`BattleSystem`] from an input channel and paces its events.

use crate::battle::state::{Animation, BattleEvent, BattleState, MenuInput};
use crate::battle::system::BattleSystem;
use crate::config::TimingConfig;
use crate::errors::{BattleResult, RunnerError};
use crate::party::Party;
use std::time::Duration;
use tokio::sync::mpsc;

/// Receives every battle event in order. Drawing, text reveal and sound all
/// live behind this; the runner only waits for the time each event is given.
pub trait Presenter {
    fn present(&mut self, event: &BattleEvent);
}

impl<P: Presenter + ?Sized> Presenter for &mut P {
    fn present(&mut self, event: &BattleEvent) {
        (**self).present(event)
    }
}

/// Records events instead of showing them.
impl Presenter for Vec<BattleEvent> {
    fn present(&mut self, event: &BattleEvent) {
        self.push(event.clone());
    }
}

#[derive(Debug)]
pub struct BattleOutcome {
    pub won: bool,
    /// The player's party as it left the battle.
    pub party: Party,
}

pub struct BattleRunner<P> {
    system: BattleSystem,
    presenter: P,
    timing: TimingConfig,
    input: mpsc::Receiver<MenuInput>,
}

impl<P: Presenter> BattleRunner<P> {
    pub fn new(
        system: BattleSystem,
        presenter: P,
        timing: TimingConfig,
        input: mpsc::Receiver<MenuInput>,
    ) -> Self {
        Self {
            system,
            presenter,
            timing,
            input,
        }
    }

    /// Play the battle to the end.
    pub async fn run(mut self) -> BattleResult<BattleOutcome> {
        let events = self.system.start();
        self.play(events).await;

        loop {
            if let BattleState::BattleOver { won } = self.system.state() {
                return Ok(BattleOutcome {
                    won,
                    party: self.system.into_party(),
                });
            }

            let input = self.input.recv().await.ok_or(RunnerError::InputClosed)?;
            let events = self.system.handle_input(input);
            self.play(events).await;
        }
    }

    async fn play(&mut self, events: Vec<BattleEvent>) {
        for event in events {
            self.presenter.present(&event);
            let pause = pacing(&self.timing, &event);
            if !pause.is_zero() {
                tokio::time::sleep(pause).await;
            }
        }
    }
}

/// How long to hold on `event` before presenting the next one.
pub fn pacing(timing: &TimingConfig, event: &BattleEvent) -> Duration {
    match event {
        BattleEvent::Message(text) => timing.message_duration(text),
        BattleEvent::HpChanged { .. } => Duration::from_millis(timing.hp_bar_ms),
        BattleEvent::Animation { animation, .. } => Duration::from_millis(match animation {
            Animation::Enter => timing.enter_animation_ms,
            Animation::Attack => timing.attack_animation_ms,
            Animation::Hit => timing.hit_animation_ms,
            Animation::Faint => timing.faint_animation_ms,
            Animation::Return => timing.return_animation_ms,
        }),
        _ => Duration::ZERO,
    }
}
