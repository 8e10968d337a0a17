//! Respawn domain: the assist recovery path, a primary handler that takes
//! over after a death streak.

use bevy::prelude::*;

use crate::respawn::checkpoint::CheckpointStore;
use crate::respawn::coordinator::{
    ClaimOutcome, Claimant, RespawnCoordinator, RespawnDestination, RespawnError,
};
use crate::respawn::events::ConsecutiveDeathsEvent;
use crate::respawn::resources::RespawnAssist;

pub const ASSIST: Claimant = Claimant::Primary("assist");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssistDecision {
    Disabled,
    Claimed(RespawnDestination),
    AlreadyClaimed(Claimant),
    Stale,
}

/// Claim the streak's death and send the player back one checkpoint when
/// there is one to go back to.
pub fn run_assist(
    streak: &ConsecutiveDeathsEvent,
    assist: &RespawnAssist,
    store: &CheckpointStore,
    coordinator: &mut RespawnCoordinator,
) -> Result<AssistDecision, RespawnError> {
    if !assist.enabled {
        return Ok(AssistDecision::Disabled);
    }

    match coordinator.claim(streak.death, ASSIST) {
        ClaimOutcome::Granted(claim) => {
            let destination = if store.previous().is_some() {
                RespawnDestination::PreviousCheckpoint
            } else {
                RespawnDestination::CurrentCheckpoint
            };
            coordinator.submit(claim, destination)?;
            info!(
                "Assist claimed {} after {} deaths, destination {:?}",
                streak.death, streak.count, destination
            );
            Ok(AssistDecision::Claimed(destination))
        }
        ClaimOutcome::AlreadyClaimed { owner } => Ok(AssistDecision::AlreadyClaimed(owner)),
        ClaimOutcome::Stale => Ok(AssistDecision::Stale),
    }
}
