// In-memory league store.
//
// Implements the full data-access boundary for a single league. Used by the
// mock-draft simulator and by tests; nothing is persisted.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use anyhow::{bail, Result};
use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use crate::backend::{PlayerDirectory, RecordOutcome, RosterStore, TurnStore, TurnWrite};
use crate::draft::player::{MoveRecord, PlayerRef};
use crate::draft::position::Slot;
use crate::draft::roster::{slot_capacity, RosterEntry};
use crate::draft::turn::{DraftStatus, DraftTurnState, PickAttemptId};

#[derive(Debug)]
struct LeagueData {
    players: Vec<PlayerRef>,
    /// Active entries in insertion order.
    entries: Vec<RosterEntry>,
    /// Entries superseded by a later write to the same slot.
    history: Vec<RosterEntry>,
    moves: Vec<MoveRecord>,
    moves_by_attempt: HashMap<PickAttemptId, usize>,
    turn: DraftTurnState,
}

/// One league held entirely in memory.
#[derive(Debug)]
pub struct MemoryLeague {
    league_id: String,
    data: Mutex<LeagueData>,
    fail_next_turn_write: AtomicBool,
    record_writes: AtomicUsize,
}

impl MemoryLeague {
    /// A pending league with the given first-round order and player pool.
    pub fn new(
        league_id: impl Into<String>,
        draft_order: Vec<String>,
        players: Vec<PlayerRef>,
    ) -> Self {
        let league_id = league_id.into();
        let turn = DraftTurnState::new(league_id.clone(), draft_order);
        MemoryLeague {
            league_id,
            data: Mutex::new(LeagueData {
                players,
                entries: Vec::new(),
                history: Vec::new(),
                moves: Vec::new(),
                moves_by_attempt: HashMap::new(),
                turn,
            }),
            fail_next_turn_write: AtomicBool::new(false),
            record_writes: AtomicUsize::new(0),
        }
    }

    pub fn league_id(&self) -> &str {
        &self.league_id
    }

    /// Move the draft to `in_progress`.
    pub async fn start(&self) {
        self.data.lock().await.turn.status = DraftStatus::InProgress;
    }

    /// Make the next turn-pointer write fail with an error.
    pub fn fail_next_turn_write(&self) {
        self.fail_next_turn_write.store(true, Ordering::SeqCst);
    }

    /// Number of successful `record_pick` inserts.
    pub fn write_count(&self) -> usize {
        self.record_writes.load(Ordering::SeqCst)
    }

    /// Move history in commit order.
    pub async fn moves(&self) -> Vec<MoveRecord> {
        self.data.lock().await.moves.clone()
    }

    /// Active entries for every team, keyed by team id.
    pub async fn rosters(&self) -> HashMap<String, Vec<RosterEntry>> {
        let data = self.data.lock().await;
        let mut by_team: HashMap<String, Vec<RosterEntry>> = HashMap::new();
        for entry in &data.entries {
            by_team
                .entry(entry.team_id.clone())
                .or_default()
                .push(entry.clone());
        }
        by_team
    }

    /// Entries displaced by later writes to the same slot.
    pub async fn superseded(&self) -> Vec<RosterEntry> {
        self.data.lock().await.history.clone()
    }

    fn check_league(&self, league_id: &str) -> Result<()> {
        if league_id != self.league_id {
            bail!("unknown league {league_id}");
        }
        Ok(())
    }
}

#[async_trait]
impl PlayerDirectory for MemoryLeague {
    async fn players(&self, league_id: &str, _week: u32) -> Result<Vec<PlayerRef>> {
        self.check_league(league_id)?;
        Ok(self.data.lock().await.players.clone())
    }
}

#[async_trait]
impl RosterStore for MemoryLeague {
    async fn roster(&self, league_id: &str, team_id: &str, week: u32) -> Result<Vec<RosterEntry>> {
        self.check_league(league_id)?;
        let data = self.data.lock().await;
        Ok(data
            .entries
            .iter()
            .filter(|e| e.team_id == team_id && e.acquired_week <= week)
            .cloned()
            .collect())
    }

    async fn record_pick(&self, entry: RosterEntry, record: MoveRecord) -> Result<RecordOutcome> {
        self.check_league(&record.league_id)?;
        let mut data = self.data.lock().await;

        if let Some(&idx) = data.moves_by_attempt.get(&record.attempt_id) {
            return Ok(RecordOutcome::AlreadyRecorded(data.moves[idx].clone()));
        }

        let Some(player_idx) = data.players.iter().position(|p| p.id == entry.player_id) else {
            bail!("player {} is not in the pool", entry.player_id);
        };
        if !data.players[player_idx].available {
            bail!("player {} is already rostered", entry.player_id);
        }

        if entry.slot != Slot::Bench {
            let in_slot = data
                .entries
                .iter()
                .filter(|e| e.team_id == entry.team_id && e.slot == entry.slot)
                .count();
            if in_slot >= slot_capacity(entry.slot) {
                if let Some(oldest) = data
                    .entries
                    .iter()
                    .position(|e| e.team_id == entry.team_id && e.slot == entry.slot)
                {
                    let displaced = data.entries.remove(oldest);
                    debug!(
                        "superseding {} in {} for team {}",
                        displaced.player_id, displaced.slot, displaced.team_id
                    );
                    data.history.push(displaced);
                }
            }
        }

        data.players[player_idx].available = false;
        data.entries.push(entry);
        let idx = data.moves.len();
        data.moves_by_attempt.insert(record.attempt_id.clone(), idx);
        data.moves.push(record);
        self.record_writes.fetch_add(1, Ordering::SeqCst);

        Ok(RecordOutcome::Inserted)
    }

    async fn recorded_pick(
        &self,
        league_id: &str,
        attempt_id: &PickAttemptId,
    ) -> Result<Option<MoveRecord>> {
        self.check_league(league_id)?;
        let data = self.data.lock().await;
        Ok(data
            .moves_by_attempt
            .get(attempt_id)
            .map(|&idx| data.moves[idx].clone()))
    }
}

#[async_trait]
impl TurnStore for MemoryLeague {
    async fn turn_state(&self, league_id: &str) -> Result<DraftTurnState> {
        self.check_league(league_id)?;
        Ok(self.data.lock().await.turn.clone())
    }

    async fn compare_and_set_turn(
        &self,
        league_id: &str,
        expected_pick_number: u32,
        next: DraftTurnState,
    ) -> Result<TurnWrite> {
        self.check_league(league_id)?;
        if self.fail_next_turn_write.swap(false, Ordering::SeqCst) {
            bail!("turn store unavailable");
        }

        let mut data = self.data.lock().await;
        if data.turn.pick_number != expected_pick_number {
            return Ok(TurnWrite::Rejected(data.turn.clone()));
        }
        data.turn.current_pick_index = next.current_pick_index;
        data.turn.pick_number = next.pick_number;
        Ok(TurnWrite::Applied(data.turn.clone()))
    }

    async fn set_status(&self, league_id: &str, status: DraftStatus) -> Result<DraftTurnState> {
        self.check_league(league_id)?;
        let mut data = self.data.lock().await;
        data.turn.status = status;
        Ok(data.turn.clone())
    }
}
