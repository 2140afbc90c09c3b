// Draft orchestrator: commits manual and automatic picks against the
// external store and moves the snake-draft turn pointer.
//
// Every pick follows the same path:
//   resolve slot -> check the turn -> record entry + move record under the
//   turn's attempt id -> conditional turn advance -> completion check.
// Recording and advancing are two separate external writes. If the advance
// fails after the record succeeded, `reconcile_turn` finishes the job.

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::backend::{DraftBackend, RecordOutcome, TurnWrite};
use crate::draft::player::{MoveKind, MoveRecord, PlayerRef};
use crate::draft::position::{Position, Slot};
use crate::draft::roster::{
    resolve_slot, resolve_slot_with_bench, AcquiredType, RosterEntry, DEFAULT_BENCH_CAPACITY,
};
use crate::draft::turn::{DraftStatus, DraftTurnState};
use crate::error::{DraftError, NoEligibleReason};
use crate::valuation::needs::analyze_needs;
use crate::valuation::recommend::{score, DraftCandidate};

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

/// League-level draft settings.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftRules {
    /// Picks per team before the draft completes.
    pub rounds: u32,
    /// Maximum roster size, starters included.
    pub bench_capacity: usize,
    /// Place players on the bench when no structured slot is open.
    pub allow_bench_overflow: bool,
    /// Conditional turn writes attempted before giving up.
    pub max_advance_retries: u32,
}

impl Default for DraftRules {
    fn default() -> Self {
        DraftRules {
            rounds: 10,
            bench_capacity: DEFAULT_BENCH_CAPACITY,
            allow_bench_overflow: false,
            max_advance_retries: 3,
        }
    }
}

// ---------------------------------------------------------------------------
// Requests and outcomes
// ---------------------------------------------------------------------------

/// A manager's explicit pick.
#[derive(Debug, Clone, Copy)]
pub struct PickRequest<'a> {
    pub league_id: &'a str,
    pub team_id: &'a str,
    pub player_id: &'a str,
    pub week: u32,
    pub current_roster: &'a [RosterEntry],
}

/// A pick the engine makes for a team whose timer ran out.
#[derive(Debug, Clone, Copy)]
pub struct AutoPickRequest<'a> {
    pub league_id: &'a str,
    pub team_id: &'a str,
    pub available_players: &'a [PlayerRef],
    pub current_roster: &'a [RosterEntry],
    pub week: u32,
}

/// How the drafted player was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickSource {
    Manual,
    /// Top slot-eligible recommendation.
    Recommended,
    /// Highest raw points among slot-eligible players.
    Fallback,
}

/// A committed pick and the turn state after it.
#[derive(Debug, Clone, PartialEq)]
pub struct PickOutcome {
    pub player: PlayerRef,
    pub slot: Slot,
    /// League-wide pick number the player was drafted with (0-indexed).
    pub pick_number: u32,
    pub turn: DraftTurnState,
    pub source: PickSource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// Nothing recorded under the current turn.
    Consistent,
    /// A recorded pick was found and the pointer moved past it.
    Advanced { pick_number: u32 },
}

// ---------------------------------------------------------------------------
// Orchestrator
// ---------------------------------------------------------------------------

pub struct DraftOrchestrator<B: DraftBackend> {
    backend: B,
    rules: DraftRules,
}

impl<B: DraftBackend> DraftOrchestrator<B> {
    pub fn new(backend: B, rules: DraftRules) -> Self {
        DraftOrchestrator { backend, rules }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn rules(&self) -> &DraftRules {
        &self.rules
    }

    /// Ranked recommendations for a roster. No side effects.
    pub fn recommendations(
        &self,
        available: &[PlayerRef],
        roster: &[RosterEntry],
        round: u32,
    ) -> Vec<DraftCandidate> {
        let needs = analyze_needs(roster, self.rules.bench_capacity);
        score(available, &needs, round)
    }

    /// Commit a manager's chosen player.
    pub async fn commit_pick(&self, req: PickRequest<'_>) -> Result<PickOutcome, DraftError> {
        let players = self
            .backend
            .players(req.league_id, req.week)
            .await
            .map_err(DraftError::read("players"))?;

        let player = players
            .into_iter()
            .find(|p| p.id == req.player_id)
            .ok_or_else(|| DraftError::PlayerNotFound {
                league_id: req.league_id.to_string(),
                player_id: req.player_id.to_string(),
            })?;
        if !player.available {
            // May be this turn's own pick whose advance never landed.
            let turn = self.turn_for(req.league_id, req.team_id).await?;
            let recorded = self
                .backend
                .recorded_pick(req.league_id, &turn.attempt_id())
                .await
                .map_err(DraftError::read("recorded_pick"))?;
            return match recorded {
                Some(record) if record.team_id == req.team_id && record.player_id == player.id => {
                    debug!("pick {} already recorded, advancing turn only", record.attempt_id);
                    let next = self.advance_turn(&turn).await?;
                    let next = self.complete_if_exhausted(next).await?;
                    Ok(PickOutcome {
                        player,
                        slot: record.slot,
                        pick_number: record.pick_number,
                        turn: next,
                        source: PickSource::Manual,
                    })
                }
                _ => Err(DraftError::PlayerUnavailable {
                    player_id: player.id,
                }),
            };
        }

        let (position, slot) =
            self.placement(&player, req.current_roster)
                .ok_or_else(|| DraftError::SlotUnavailable {
                    player_id: player.id.clone(),
                    position: player.position.to_string(),
                })?;

        let turn = self.turn_for(req.league_id, req.team_id).await?;

        self.commit_on_turn(
            turn,
            req.team_id,
            player,
            position,
            slot,
            req.week,
            PickSource::Manual,
        )
        .await
    }

    /// Draft for a team whose turn timer expired.
    ///
    /// Takes the best slot-eligible recommendation. If every recommendation
    /// is blocked (or there are none, e.g. all remaining players have no
    /// past-period points) the highest raw scorer that fits a slot is taken.
    pub async fn auto_pick(&self, req: AutoPickRequest<'_>) -> Result<PickOutcome, DraftError> {
        let turn = self.turn_for(req.league_id, req.team_id).await?;
        let round = turn.round();

        let roster_full = req.current_roster.len() >= self.rules.bench_capacity;
        let ranked = if roster_full {
            Vec::new()
        } else {
            self.recommendations(req.available_players, req.current_roster, round)
        };

        let recommended = ranked.into_iter().find_map(|candidate| {
            self.placement(&candidate.player, req.current_roster)
                .map(|(position, slot)| (candidate.player, position, slot))
        });

        let (player, position, slot, source) = match recommended {
            Some((player, position, slot)) => (player, position, slot, PickSource::Recommended),
            None => {
                let (player, position, slot) = self
                    .best_raw_fit(req.available_players, req.current_roster)
                    .ok_or_else(|| DraftError::NoEligiblePlayers {
                        team_id: req.team_id.to_string(),
                        reason: if roster_full {
                            NoEligibleReason::RosterComplete
                        } else {
                            NoEligibleReason::NoPlayersAvailable
                        },
                    })?;
                info!(
                    "auto-pick fallback for {}: {} ({} pts)",
                    req.team_id, player.name, player.past_period_points
                );
                (player, position, slot, PickSource::Fallback)
            }
        };

        self.commit_on_turn(turn, req.team_id, player, position, slot, req.week, source)
            .await
    }

    /// Finish a pick whose turn advance never landed.
    ///
    /// If a move is recorded under the current turn's attempt id the pointer
    /// is advanced past it; a recorded pick belonging to a team that is not on
    /// the clock is reported as inconsistent.
    pub async fn reconcile_turn(&self, league_id: &str) -> Result<ReconcileOutcome, DraftError> {
        let turn = self
            .backend
            .turn_state(league_id)
            .await
            .map_err(DraftError::read("turn_state"))?;
        let attempt_id = turn.attempt_id();

        let Some(record) = self
            .backend
            .recorded_pick(league_id, &attempt_id)
            .await
            .map_err(DraftError::read("recorded_pick"))?
        else {
            return Ok(ReconcileOutcome::Consistent);
        };

        if turn.on_the_clock() != Some(record.team_id.as_str()) {
            return Err(DraftError::InconsistentTurnState {
                league_id: league_id.to_string(),
                detail: format!(
                    "pick {attempt_id} recorded for {} but {} is on the clock",
                    record.team_id,
                    turn.on_the_clock().unwrap_or("nobody")
                ),
            });
        }

        warn!(
            "pick {attempt_id} ({}) recorded without turn advance, advancing",
            record.player_name
        );
        let next = self.advance_turn(&turn).await?;
        let next = self.complete_if_exhausted(next).await?;
        Ok(ReconcileOutcome::Advanced {
            pick_number: next.pick_number,
        })
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    /// Slot for `player` under the configured bench rule.
    fn placement(&self, player: &PlayerRef, roster: &[RosterEntry]) -> Option<(Position, Slot)> {
        let position = player.position.known()?;
        let slot = if self.rules.allow_bench_overflow {
            resolve_slot_with_bench(player, roster, self.rules.bench_capacity)
        } else {
            resolve_slot(player, roster)
        }?;
        Some((position, slot))
    }

    /// First player with the highest raw points among those that fit a slot.
    fn best_raw_fit(
        &self,
        available: &[PlayerRef],
        roster: &[RosterEntry],
    ) -> Option<(PlayerRef, Position, Slot)> {
        let mut best: Option<(&PlayerRef, Position, Slot)> = None;
        for player in available.iter().filter(|p| p.available) {
            let Some((position, slot)) = self.placement(player, roster) else {
                continue;
            };
            let better = match best {
                Some((current, _, _)) => player.past_period_points > current.past_period_points,
                None => true,
            };
            if better {
                best = Some((player, position, slot));
            }
        }
        best.map(|(player, position, slot)| (player.clone(), position, slot))
    }

    /// Read the turn and check that `team_id` may pick now.
    async fn turn_for(&self, league_id: &str, team_id: &str) -> Result<DraftTurnState, DraftError> {
        let turn = self
            .backend
            .turn_state(league_id)
            .await
            .map_err(DraftError::read("turn_state"))?;

        let Some(on_the_clock) = turn.on_the_clock() else {
            return Err(DraftError::EmptyDraftOrder {
                league_id: league_id.to_string(),
            });
        };
        if turn.status != DraftStatus::InProgress {
            return Err(DraftError::DraftNotActive {
                status: turn.status,
            });
        }
        if on_the_clock != team_id {
            return Err(DraftError::NotOnTheClock {
                team_id: team_id.to_string(),
                on_the_clock: on_the_clock.to_string(),
            });
        }
        Ok(turn)
    }

    #[allow(clippy::too_many_arguments)]
    async fn commit_on_turn(
        &self,
        turn: DraftTurnState,
        team_id: &str,
        player: PlayerRef,
        position: Position,
        slot: Slot,
        week: u32,
        source: PickSource,
    ) -> Result<PickOutcome, DraftError> {
        let attempt_id = turn.attempt_id();
        let pick_number = turn.pick_number;
        let kind = match source {
            PickSource::Manual => MoveKind::DraftPick,
            PickSource::Recommended | PickSource::Fallback => MoveKind::AutoPick,
        };

        let entry = RosterEntry {
            team_id: team_id.to_string(),
            player_id: player.id.clone(),
            position,
            slot,
            acquired_week: week,
            acquired_type: AcquiredType::Draft,
        };
        let record = MoveRecord {
            league_id: turn.league_id.clone(),
            team_id: team_id.to_string(),
            player_id: player.id.clone(),
            player_name: player.name.clone(),
            slot,
            week,
            pick_number,
            attempt_id: attempt_id.clone(),
            kind,
            recorded_at: Utc::now(),
        };

        let outcome = self
            .backend
            .record_pick(entry, record)
            .await
            .map_err(DraftError::write("record_pick"))?;

        match outcome {
            RecordOutcome::Inserted => {
                info!(
                    "pick {} (round {}): {} takes {} ({}) at {}",
                    pick_number + 1,
                    turn.round(),
                    team_id,
                    player.name,
                    player.position,
                    slot
                );
            }
            RecordOutcome::AlreadyRecorded(existing) => {
                if existing.team_id != team_id || existing.player_id != player.id {
                    return Err(DraftError::InconsistentTurnState {
                        league_id: turn.league_id.clone(),
                        detail: format!(
                            "attempt {attempt_id} already holds {} for {}",
                            existing.player_id, existing.team_id
                        ),
                    });
                }
                debug!("pick {attempt_id} already recorded, advancing turn only");
            }
        }

        let next = self.advance_turn(&turn).await?;
        let next = self.complete_if_exhausted(next).await?;

        Ok(PickOutcome {
            player,
            slot,
            pick_number,
            turn: next,
            source,
        })
    }

    /// Move the pointer one pick forward with a conditional write.
    ///
    /// Only the pointer fields are written; the store keeps its own status.
    /// A rejection where the store already sits one pick ahead means the
    /// advance landed earlier and counts as success. A rejection at the same
    /// pick number is retried. Anything else is an inconsistent turn.
    async fn advance_turn(&self, current: &DraftTurnState) -> Result<DraftTurnState, DraftError> {
        let league_id = current.league_id.as_str();
        let expected = current.pick_number;
        let mut next = current.advanced();

        for attempt in 1..=self.rules.max_advance_retries.max(1) {
            let write = self
                .backend
                .compare_and_set_turn(league_id, expected, next.clone())
                .await
                .map_err(DraftError::write("compare_and_set_turn"))?;

            match write {
                TurnWrite::Applied(state) => return Ok(state),
                TurnWrite::Rejected(stored) if stored.pick_number == expected + 1 => {
                    debug!("turn already advanced to pick {}", stored.pick_number);
                    return Ok(stored);
                }
                TurnWrite::Rejected(stored) if stored.pick_number == expected => {
                    warn!(
                        "turn write rejected for {league_id} at pick {expected} (attempt {attempt})"
                    );
                    next = stored.advanced();
                }
                TurnWrite::Rejected(stored) => {
                    return Err(DraftError::InconsistentTurnState {
                        league_id: league_id.to_string(),
                        detail: format!(
                            "expected pick {expected}, store is at pick {}",
                            stored.pick_number
                        ),
                    });
                }
            }
        }

        Err(DraftError::InconsistentTurnState {
            league_id: league_id.to_string(),
            detail: format!(
                "turn write for pick {expected} rejected {} times",
                self.rules.max_advance_retries.max(1)
            ),
        })
    }

    async fn complete_if_exhausted(
        &self,
        state: DraftTurnState,
    ) -> Result<DraftTurnState, DraftError> {
        if !state.is_exhausted(self.rules.rounds) || state.status == DraftStatus::Completed {
            return Ok(state);
        }
        let done = self
            .backend
            .set_status(&state.league_id, DraftStatus::Completed)
            .await
            .map_err(DraftError::write("set_status"))?;
        info!(
            "draft {} completed after {} picks",
            done.league_id, done.pick_number
        );
        Ok(done)
    }
}
