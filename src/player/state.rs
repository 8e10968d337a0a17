//! Player domain: the behavioural state machine.

use std::fmt;
use std::time::Duration;

use bevy::prelude::*;

use crate::core::Countdown;
use crate::player::components::LivesSource;
use crate::player::resources::PlayerTuning;
use crate::respawn::RespawnCompletion;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlayerState {
    #[default]
    Running,
    Falling,
    GravityFlipping,
    Invincible,
    Dead,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateChange {
    pub from: PlayerState,
    pub to: PlayerState,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FlipRejected {
    Cooldown { remaining_secs: f32 },
    WrongState(PlayerState),
}

impl fmt::Display for FlipRejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlipRejected::Cooldown { remaining_secs } => {
                write!(f, "flip on cooldown for {remaining_secs:.2}s")
            }
            FlipRejected::WrongState(state) => write!(f, "cannot flip while {state:?}"),
        }
    }
}

impl std::error::Error for FlipRejected {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Dead or inside an invincibility window
    Ignored,
    Hurt(StateChange),
    Killed(StateChange),
}

/// Owns the player's mode plus the cooldown and invincibility windows.
#[derive(Component, Debug, Default, Clone)]
pub struct PlayerStateMachine {
    state: PlayerState,
    flip_cooldown: Countdown,
    flip_window: Countdown,
    invincibility: Countdown,
}

impl PlayerStateMachine {
    pub fn current_state(&self) -> PlayerState {
        self.state
    }

    pub fn is_dead(&self) -> bool {
        self.state == PlayerState::Dead
    }

    pub fn is_invincible(&self) -> bool {
        matches!(
            self.state,
            PlayerState::GravityFlipping | PlayerState::Invincible
        )
    }

    pub fn can_flip(&self) -> bool {
        matches!(self.state, PlayerState::Running | PlayerState::Falling)
            && self.flip_cooldown.expired()
    }

    pub fn tick(&mut self, delta: Duration) {
        self.flip_cooldown.tick(delta);
        self.flip_window.tick(delta);
        self.invincibility.tick(delta);
    }

    fn transition(&mut self, to: PlayerState) -> StateChange {
        let change = StateChange {
            from: self.state,
            to,
        };
        self.state = to;
        change
    }

    /// Grounded/velocity driven transitions, including the end of the flip
    /// and invincibility windows.
    ///
    /// `separation_speed` is the velocity component moving away from the
    /// ground (along the ground normal when grounded, along gravity-relative
    /// up otherwise).
    pub fn evaluate(
        &mut self,
        grounded: bool,
        separation_speed: f32,
        tuning: &PlayerTuning,
    ) -> Option<StateChange> {
        let settled = |grounded: bool| {
            if grounded {
                PlayerState::Running
            } else {
                PlayerState::Falling
            }
        };

        let next = match self.state {
            PlayerState::Running
                if !grounded && separation_speed.abs() > tuning.vertical_epsilon =>
            {
                PlayerState::Falling
            }
            PlayerState::Falling if grounded && separation_speed < tuning.vertical_epsilon => {
                PlayerState::Running
            }
            PlayerState::GravityFlipping if self.flip_window.expired() => settled(grounded),
            PlayerState::Invincible if self.invincibility.expired() => settled(grounded),
            _ => return None,
        };
        Some(self.transition(next))
    }

    pub fn request_flip(&mut self, tuning: &PlayerTuning) -> Result<StateChange, FlipRejected> {
        if !matches!(self.state, PlayerState::Running | PlayerState::Falling) {
            return Err(FlipRejected::WrongState(self.state));
        }
        if !self.flip_cooldown.expired() {
            return Err(FlipRejected::Cooldown {
                remaining_secs: self.flip_cooldown.remaining_secs(),
            });
        }

        self.flip_cooldown.restart(tuning.flip_cooldown);
        self.flip_window.restart(tuning.flip_duration);
        Ok(self.transition(PlayerState::GravityFlipping))
    }

    pub fn receive_damage(
        &mut self,
        lives: &mut impl LivesSource,
        tuning: &PlayerTuning,
    ) -> DamageOutcome {
        if self.is_dead() || self.is_invincible() {
            return DamageOutcome::Ignored;
        }

        lives.take_damage();
        if lives.lives_remaining() == 0 {
            return DamageOutcome::Killed(self.transition(PlayerState::Dead));
        }

        self.invincibility.restart(tuning.damage_invincibility);
        DamageOutcome::Hurt(self.transition(PlayerState::Invincible))
    }

    /// Immediate death regardless of lives or invincibility (kill plane).
    pub fn kill(&mut self) -> Option<StateChange> {
        if self.is_dead() {
            return None;
        }
        Some(self.transition(PlayerState::Dead))
    }

    /// Leave Dead. Only a finished respawn can do this.
    pub fn revive(&mut self, _completion: &RespawnCompletion) -> Option<StateChange> {
        if !self.is_dead() {
            return None;
        }
        self.flip_cooldown = Countdown::idle();
        self.flip_window = Countdown::idle();
        self.invincibility = Countdown::idle();
        Some(self.transition(PlayerState::Running))
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
