// Snake-draft turn pointer.
//
// The authoritative turn state lives in the external league record. This
// module only derives things from a snapshot of it: who is on the clock, the
// current round, the next state after a committed pick, and the idempotency
// key for the current turn.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle of a league's draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftStatus {
    Pending,
    InProgress,
    Paused,
    Completed,
}

impl DraftStatus {
    pub fn label(&self) -> &'static str {
        match self {
            DraftStatus::Pending => "pending",
            DraftStatus::InProgress => "in_progress",
            DraftStatus::Paused => "paused",
            DraftStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for DraftStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Idempotency key for the pick made on one turn: `"{league_id}:{pick_number}"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PickAttemptId(String);

impl PickAttemptId {
    pub fn new(league_id: &str, pick_number: u32) -> Self {
        PickAttemptId(format!("{league_id}:{pick_number}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PickAttemptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Snapshot of the external turn pointer for one league.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftTurnState {
    pub league_id: String,
    /// Team ids in first-round pick order.
    pub draft_order: Vec<String>,
    /// Position within the current round, wrapping modulo team count.
    pub current_pick_index: u32,
    /// Picks committed so far, league-wide. Never wraps.
    pub pick_number: u32,
    pub status: DraftStatus,
}

impl DraftTurnState {
    /// A fresh, not-yet-started draft.
    pub fn new(league_id: impl Into<String>, draft_order: Vec<String>) -> Self {
        DraftTurnState {
            league_id: league_id.into(),
            draft_order,
            current_pick_index: 0,
            pick_number: 0,
            status: DraftStatus::Pending,
        }
    }

    pub fn team_count(&self) -> usize {
        self.draft_order.len()
    }

    /// 1-based round of the pick currently on the clock.
    pub fn round(&self) -> u32 {
        round_for(self.pick_number, self.team_count())
    }

    /// The team whose turn it is, following snake order: even rounds (0-based)
    /// run down the draft order, odd rounds run back up it.
    pub fn on_the_clock(&self) -> Option<&str> {
        let n = self.team_count();
        if n == 0 {
            return None;
        }
        let idx = self.current_pick_index as usize % n;
        let round_idx = self.pick_number as usize / n;
        let seat = if round_idx % 2 == 0 { idx } else { n - 1 - idx };
        self.draft_order.get(seat).map(String::as_str)
    }

    /// The state after one more committed pick.
    pub fn advanced(&self) -> Self {
        let n = self.team_count().max(1) as u32;
        DraftTurnState {
            current_pick_index: (self.current_pick_index + 1) % n,
            pick_number: self.pick_number + 1,
            ..self.clone()
        }
    }

    /// Idempotency key of the turn currently on the clock.
    pub fn attempt_id(&self) -> PickAttemptId {
        PickAttemptId::new(&self.league_id, self.pick_number)
    }

    /// Whether every team has made `rounds` picks.
    pub fn is_exhausted(&self, rounds: u32) -> bool {
        self.pick_number as usize >= self.team_count() * rounds as usize
    }
}

/// Round number for the next pick given how many picks are already in.
///
/// `floor(drafted / team_count) + 1`; an empty league is always in round 1.
pub fn round_for(drafted: u32, team_count: usize) -> u32 {
    if team_count == 0 {
        return 1;
    }
    drafted / team_count as u32 + 1
}
