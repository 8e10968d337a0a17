//! Respawn domain: exactly-once ownership of each death.
//!
//! A death moves the coordinator out of `Idle`. Handlers race for it through
//! [`RespawnCoordinator::claim`]; the winner receives a [`RespawnClaim`]
//! token, which is not `Clone` and is consumed when the destination is
//! submitted. Nobody else can submit for that death, and the sequence is only
//! finished by [`RespawnCoordinator::complete`], which is also the only way a
//! [`RespawnCompletion`] can be built.

use std::collections::VecDeque;
use std::fmt;

use bevy::prelude::*;

use crate::core::Countdown;
use crate::respawn::events::ConsecutiveDeathsEvent;
use crate::respawn::resources::RespawnTuning;

/// Identifies one death within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeathId(u64);

impl fmt::Display for DeathId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "death#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Claimant {
    /// An optional recovery path that claims within the grace window
    Primary(&'static str),
    /// The built-in checkpoint respawn
    Fallback,
}

impl fmt::Display for Claimant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Claimant::Primary(name) => write!(f, "primary:{name}"),
            Claimant::Fallback => write!(f, "fallback"),
        }
    }
}

/// Ownership of one death. Consumed by [`RespawnCoordinator::submit`].
#[derive(Debug)]
pub struct RespawnClaim {
    death: DeathId,
    owner: Claimant,
}

impl RespawnClaim {
    pub fn death(&self) -> DeathId {
        self.death
    }

    pub fn owner(&self) -> Claimant {
        self.owner
    }
}

#[derive(Debug)]
pub enum ClaimOutcome {
    Granted(RespawnClaim),
    /// Someone else owns this death; the caller must not reposition
    AlreadyClaimed { owner: Claimant },
    /// The death is not the one currently being handled
    Stale,
}

impl ClaimOutcome {
    pub fn is_granted(&self) -> bool {
        matches!(self, ClaimOutcome::Granted(_))
    }
}

/// Where a claimed respawn should put the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RespawnDestination {
    #[default]
    CurrentCheckpoint,
    /// Revert the checkpoint history by one and use that record
    PreviousCheckpoint,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RespawnError {
    /// A death arrived while another one is still being handled
    SequenceInFlight { death: DeathId },
    /// The claim no longer matches the death being handled
    StaleClaim { death: DeathId },
    /// The owner already submitted a destination
    AlreadySubmitted { death: DeathId },
}

impl fmt::Display for RespawnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RespawnError::SequenceInFlight { death } => {
                write!(f, "respawn for {death} is still in flight")
            }
            RespawnError::StaleClaim { death } => write!(f, "claim for {death} is stale"),
            RespawnError::AlreadySubmitted { death } => {
                write!(f, "destination for {death} was already submitted")
            }
        }
    }
}

impl std::error::Error for RespawnError {}

/// What a death looked like when it was registered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeathNotice {
    pub death: DeathId,
    /// Deaths inside the rolling window, this one included
    pub consecutive: u32,
    pub escalated: bool,
    pub delay_secs: f32,
}

impl DeathNotice {
    /// The streak message for an escalated death.
    pub fn streak_event(&self) -> Option<ConsecutiveDeathsEvent> {
        self.escalated.then_some(ConsecutiveDeathsEvent {
            count: self.consecutive,
            death: self.death,
        })
    }
}

/// A respawn whose delay has elapsed and whose destination is known.
#[derive(Debug)]
pub struct ReadyRespawn {
    death: DeathId,
    owner: Claimant,
    destination: RespawnDestination,
}

impl ReadyRespawn {
    pub fn death(&self) -> DeathId {
        self.death
    }

    pub fn owner(&self) -> Claimant {
        self.owner
    }

    pub fn destination(&self) -> RespawnDestination {
        self.destination
    }
}

/// Proof that a respawn finished. Only the coordinator can produce one.
#[derive(Debug)]
pub struct RespawnCompletion {
    death: DeathId,
    owner: Claimant,
    position: Vec2,
}

impl RespawnCompletion {
    pub fn death(&self) -> DeathId {
        self.death
    }

    pub fn owner(&self) -> Claimant {
        self.owner
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }
}

/// Deaths inside a rolling time window.
#[derive(Debug, Default, Clone)]
pub struct DeathStreak {
    timestamps: VecDeque<f32>,
}

impl DeathStreak {
    /// Record a death at `now` and return how many fall inside `window`.
    pub fn record(&mut self, now: f32, window: f32) -> u32 {
        while self
            .timestamps
            .front()
            .is_some_and(|first| now - *first > window)
        {
            self.timestamps.pop_front();
        }
        self.timestamps.push_back(now);
        self.timestamps.len() as u32
    }

    pub fn count(&self) -> u32 {
        self.timestamps.len() as u32
    }

    pub fn reset(&mut self) {
        self.timestamps.clear();
    }
}

#[derive(Debug, Default)]
enum RespawnPhase {
    #[default]
    Idle,
    AwaitingClaim {
        death: DeathId,
        grace: Countdown,
        delay: Countdown,
    },
    Claimed {
        death: DeathId,
        owner: Claimant,
        handover: Countdown,
        delay: Countdown,
        destination: Option<RespawnDestination>,
    },
    Executing {
        death: DeathId,
        owner: Claimant,
    },
}

/// Something the coordinator decided on its own during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinatorAction {
    /// The grace window lapsed and the fallback took ownership
    FallbackClaimed(DeathId),
    /// The owner never submitted; the default destination is used and the
    /// owner is unchanged
    HandoverDefaulted(DeathId, Claimant),
}

#[derive(Resource, Debug, Default)]
pub struct RespawnCoordinator {
    phase: RespawnPhase,
    next_death: u64,
    handled: bool,
    streak: DeathStreak,
    handover_timeout: f32,
}

impl RespawnCoordinator {
    /// Register a death at stage time `now`.
    pub fn begin_death(
        &mut self,
        now: f32,
        tuning: &RespawnTuning,
    ) -> Result<DeathNotice, RespawnError> {
        if let Some(death) = self.current_death() {
            return Err(RespawnError::SequenceInFlight { death });
        }

        self.next_death += 1;
        let death = DeathId(self.next_death);
        let consecutive = self.streak.record(now, tuning.streak_window);
        let escalated = consecutive >= tuning.streak_threshold.max(1);
        let delay_secs = if escalated {
            tuning.escalated_delay
        } else {
            tuning.base_delay
        };

        self.handled = false;
        self.handover_timeout = tuning.handover_timeout;
        self.phase = RespawnPhase::AwaitingClaim {
            death,
            grace: Countdown::new(tuning.grace_window),
            delay: Countdown::new(delay_secs),
        };

        Ok(DeathNotice {
            death,
            consecutive,
            escalated,
            delay_secs,
        })
    }

    /// First caller for `death` wins; everyone after that is told who owns it.
    pub fn claim(&mut self, death: DeathId, claimant: Claimant) -> ClaimOutcome {
        match &mut self.phase {
            RespawnPhase::AwaitingClaim {
                death: current,
                delay,
                ..
            } if *current == death => {
                let delay = std::mem::take(delay);
                self.phase = RespawnPhase::Claimed {
                    death,
                    owner: claimant,
                    handover: Countdown::new(self.handover_timeout),
                    delay,
                    destination: None,
                };
                ClaimOutcome::Granted(RespawnClaim {
                    death,
                    owner: claimant,
                })
            }
            RespawnPhase::Claimed {
                death: current,
                owner,
                ..
            }
            | RespawnPhase::Executing {
                death: current,
                owner,
            } if *current == death => ClaimOutcome::AlreadyClaimed { owner: *owner },
            _ => ClaimOutcome::Stale,
        }
    }

    /// Hand over the destination for a claimed death, consuming the claim.
    pub fn submit(
        &mut self,
        claim: RespawnClaim,
        destination: RespawnDestination,
    ) -> Result<(), RespawnError> {
        match &mut self.phase {
            RespawnPhase::Claimed {
                death,
                owner,
                destination: slot,
                ..
            } if *death == claim.death && *owner == claim.owner => {
                if slot.is_some() {
                    return Err(RespawnError::AlreadySubmitted { death: *death });
                }
                *slot = Some(destination);
                Ok(())
            }
            _ => Err(RespawnError::StaleClaim { death: claim.death }),
        }
    }

    /// Advance the grace, hand-over and delay countdowns.
    pub fn tick(&mut self, dt: f32) -> Option<CoordinatorAction> {
        match &mut self.phase {
            RespawnPhase::AwaitingClaim { death, grace, delay } => {
                grace.tick_secs(dt);
                delay.tick_secs(dt);
                if !grace.expired() {
                    return None;
                }

                let death = *death;
                let delay = std::mem::take(delay);
                self.phase = RespawnPhase::Claimed {
                    death,
                    owner: Claimant::Fallback,
                    handover: Countdown::idle(),
                    delay,
                    destination: Some(RespawnDestination::CurrentCheckpoint),
                };
                Some(CoordinatorAction::FallbackClaimed(death))
            }
            RespawnPhase::Claimed {
                death,
                owner,
                handover,
                delay,
                destination,
            } => {
                delay.tick_secs(dt);
                if destination.is_some() {
                    return None;
                }
                handover.tick_secs(dt);
                if !handover.expired() {
                    return None;
                }
                *destination = Some(RespawnDestination::default());
                Some(CoordinatorAction::HandoverDefaulted(*death, *owner))
            }
            RespawnPhase::Idle | RespawnPhase::Executing { .. } => None,
        }
    }

    /// The claimed respawn, once its delay has elapsed. Yields at most once
    /// per death.
    pub fn poll_ready(&mut self) -> Option<ReadyRespawn> {
        let RespawnPhase::Claimed {
            death,
            owner,
            delay,
            destination: Some(destination),
            ..
        } = &self.phase
        else {
            return None;
        };
        if !delay.expired() {
            return None;
        }

        let ready = ReadyRespawn {
            death: *death,
            owner: *owner,
            destination: *destination,
        };
        self.phase = RespawnPhase::Executing {
            death: ready.death,
            owner: ready.owner,
        };
        Some(ready)
    }

    /// Close the sequence and mark the death as handled.
    pub fn complete(&mut self, ready: ReadyRespawn, position: Vec2) -> RespawnCompletion {
        self.phase = RespawnPhase::Idle;
        self.handled = true;
        RespawnCompletion {
            death: ready.death,
            owner: ready.owner,
            position,
        }
    }

    pub fn current_death(&self) -> Option<DeathId> {
        match &self.phase {
            RespawnPhase::Idle => None,
            RespawnPhase::AwaitingClaim { death, .. }
            | RespawnPhase::Claimed { death, .. }
            | RespawnPhase::Executing { death, .. } => Some(*death),
        }
    }

    pub fn owner(&self) -> Option<Claimant> {
        match &self.phase {
            RespawnPhase::Claimed { owner, .. } | RespawnPhase::Executing { owner, .. } => {
                Some(*owner)
            }
            _ => None,
        }
    }

    pub fn is_claimed(&self) -> bool {
        self.owner().is_some()
    }

    /// True once the latest death has been repositioned, until the next one.
    pub fn is_respawn_handled(&self) -> bool {
        self.handled
    }

    /// Deaths inside the current streak window.
    pub fn consecutive_deaths(&self) -> u32 {
        self.streak.count()
    }

    /// Back to a fresh stage: no death in flight, no streak.
    pub fn reset(&mut self) {
        self.phase = RespawnPhase::Idle;
        self.handled = false;
        self.streak.reset();
    }
}
