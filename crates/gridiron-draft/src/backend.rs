// Data-access boundary for the draft orchestrator.
//
// The league's players, rosters, move history and turn pointer live in an
// external store. The orchestrator reaches them only through these traits;
// implementations report failures as `anyhow::Error`.

use anyhow::Result;
use async_trait::async_trait;

use crate::draft::player::{MoveRecord, PlayerRef};
use crate::draft::roster::RosterEntry;
use crate::draft::turn::{DraftStatus, DraftTurnState, PickAttemptId};

/// Result of persisting a pick.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordOutcome {
    /// The entry and move record were written.
    Inserted,
    /// A pick already exists under this attempt id; nothing was written.
    AlreadyRecorded(MoveRecord),
}

/// Result of a conditional turn-pointer write.
#[derive(Debug, Clone, PartialEq)]
pub enum TurnWrite {
    /// The expected pick number matched; the new state is stored.
    Applied(DraftTurnState),
    /// Someone else moved the pointer first. Carries the stored state.
    Rejected(DraftTurnState),
}

/// Read access to a league's player pool.
#[async_trait]
pub trait PlayerDirectory: Send + Sync {
    /// Every player in the league's pool for `week`, drafted or not.
    async fn players(&self, league_id: &str, week: u32) -> Result<Vec<PlayerRef>>;
}

/// Rosters and move history.
#[async_trait]
pub trait RosterStore: Send + Sync {
    /// Active roster entries for one team.
    async fn roster(&self, league_id: &str, team_id: &str, week: u32) -> Result<Vec<RosterEntry>>;

    /// Persist a roster entry and its move record.
    ///
    /// Idempotent per `record.attempt_id`. When the entry's slot is already
    /// at capacity the oldest entry in it is superseded.
    async fn record_pick(&self, entry: RosterEntry, record: MoveRecord) -> Result<RecordOutcome>;

    /// The move record committed under an attempt id, if any.
    async fn recorded_pick(
        &self,
        league_id: &str,
        attempt_id: &PickAttemptId,
    ) -> Result<Option<MoveRecord>>;
}

/// The authoritative turn pointer.
#[async_trait]
pub trait TurnStore: Send + Sync {
    async fn turn_state(&self, league_id: &str) -> Result<DraftTurnState>;

    /// Move the pointer to `next`'s `current_pick_index` and `pick_number`
    /// only if the stored pick number still equals `expected_pick_number`.
    ///
    /// Status and draft order are left as stored, so a concurrent
    /// `set_status` survives the advance. Both outcomes carry the stored
    /// state after the call.
    async fn compare_and_set_turn(
        &self,
        league_id: &str,
        expected_pick_number: u32,
        next: DraftTurnState,
    ) -> Result<TurnWrite>;

    async fn set_status(&self, league_id: &str, status: DraftStatus) -> Result<DraftTurnState>;
}

/// Everything the orchestrator needs from the external store.
pub trait DraftBackend: PlayerDirectory + RosterStore + TurnStore {}

impl<T: PlayerDirectory + RosterStore + TurnStore> DraftBackend for T {}
