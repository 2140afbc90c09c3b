// Error types surfaced by the draft orchestrator.

use std::fmt;

use thiserror::Error;

use crate::draft::turn::DraftStatus;

/// Why an auto-pick could not find anyone to draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoEligibleReason {
    /// The team's roster is at its size limit.
    RosterComplete,
    /// No available player fits any open slot.
    NoPlayersAvailable,
}

impl fmt::Display for NoEligibleReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoEligibleReason::RosterComplete => write!(f, "roster_complete"),
            NoEligibleReason::NoPlayersAvailable => write!(f, "no_players_available"),
        }
    }
}

/// Errors from committing or reconciling a pick.
///
/// Boundary failures carry the backend's `anyhow::Error` as `cause`.
#[derive(Debug, Error)]
pub enum DraftError {
    #[error("no open slot for player {player_id} ({position})")]
    SlotUnavailable { player_id: String, position: String },

    #[error("no eligible players for team {team_id}: {reason}")]
    NoEligiblePlayers {
        team_id: String,
        reason: NoEligibleReason,
    },

    #[error("external write failed during {operation}: {cause:#}")]
    ExternalWriteFailed {
        operation: &'static str,
        cause: anyhow::Error,
    },

    #[error("external read failed during {operation}: {cause:#}")]
    ExternalReadFailed {
        operation: &'static str,
        cause: anyhow::Error,
    },

    #[error("inconsistent turn state for league {league_id}: {detail}")]
    InconsistentTurnState { league_id: String, detail: String },

    #[error("player {player_id} not found in league {league_id}")]
    PlayerNotFound { league_id: String, player_id: String },

    #[error("player {player_id} has already been drafted")]
    PlayerUnavailable { player_id: String },

    #[error("draft is not active (status: {status})")]
    DraftNotActive { status: DraftStatus },

    #[error("team {team_id} is not on the clock (on the clock: {on_the_clock})")]
    NotOnTheClock {
        team_id: String,
        on_the_clock: String,
    },

    #[error("league {league_id} has an empty draft order")]
    EmptyDraftOrder { league_id: String },
}

impl DraftError {
    pub(crate) fn read(operation: &'static str) -> impl FnOnce(anyhow::Error) -> DraftError {
        move |cause| DraftError::ExternalReadFailed { operation, cause }
    }

    pub(crate) fn write(operation: &'static str) -> impl FnOnce(anyhow::Error) -> DraftError {
        move |cause| DraftError::ExternalWriteFailed { operation, cause }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_subject() {
        let err = DraftError::SlotUnavailable {
            player_id: "p9".into(),
            position: "TE".into(),
        };
        assert_eq!(err.to_string(), "no open slot for player p9 (TE)");

        let err = DraftError::NoEligiblePlayers {
            team_id: "team_2".into(),
            reason: NoEligibleReason::RosterComplete,
        };
        assert_eq!(
            err.to_string(),
            "no eligible players for team team_2: roster_complete"
        );

        let err = DraftError::DraftNotActive {
            status: DraftStatus::Paused,
        };
        assert_eq!(err.to_string(), "draft is not active (status: paused)");
    }

    #[test]
    fn boundary_cause_included_in_message() {
        let err = DraftError::write("record_pick")(anyhow::anyhow!("connection reset"));
        assert_eq!(
            err.to_string(),
            "external write failed during record_pick: connection reset"
        );
        assert!(matches!(err, DraftError::ExternalWriteFailed { .. }));
    }
}
