// Draft board rendering (plain text or JSON).

use std::collections::HashMap;
use std::fmt::Write as _;

use serde::Serialize;

use gridiron_draft::draft::player::{MoveKind, MoveRecord, PlayerRef};
use gridiron_draft::draft::position::{Position, Slot};
use gridiron_draft::draft::roster::RosterEntry;
use gridiron_draft::draft::turn::{round_for, DraftStatus, DraftTurnState};

#[derive(Debug, Clone, Serialize)]
pub struct DraftBoard {
    pub league_id: String,
    pub league_name: String,
    pub status: DraftStatus,
    pub picks: Vec<BoardPick>,
    pub teams: Vec<TeamBoard>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BoardPick {
    /// 1-based overall pick.
    pub overall: u32,
    pub round: u32,
    pub team_id: String,
    pub player_name: String,
    pub slot: Slot,
    pub auto: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct TeamBoard {
    pub team_id: String,
    pub roster: Vec<BoardSlot>,
    pub total_points: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct BoardSlot {
    pub slot: Slot,
    pub player_id: String,
    pub player_name: String,
    pub position: Position,
    pub points: f64,
}

/// Assemble the board from the final league state.
pub fn build_board(
    league_name: &str,
    turn: &DraftTurnState,
    moves: &[MoveRecord],
    rosters: &HashMap<String, Vec<RosterEntry>>,
    players: &[PlayerRef],
) -> DraftBoard {
    let by_id: HashMap<&str, &PlayerRef> = players.iter().map(|p| (p.id.as_str(), p)).collect();
    let team_count = turn.team_count();

    let picks = moves
        .iter()
        .map(|m| BoardPick {
            overall: m.pick_number + 1,
            round: round_for(m.pick_number, team_count),
            team_id: m.team_id.clone(),
            player_name: m.player_name.clone(),
            slot: m.slot,
            auto: m.kind == MoveKind::AutoPick,
        })
        .collect();

    let teams = turn
        .draft_order
        .iter()
        .map(|team_id| {
            let mut roster: Vec<BoardSlot> = rosters
                .get(team_id)
                .map(|entries| {
                    entries
                        .iter()
                        .map(|e| {
                            let player = by_id.get(e.player_id.as_str());
                            BoardSlot {
                                slot: e.slot,
                                player_id: e.player_id.clone(),
                                player_name: player
                                    .map_or_else(|| e.player_id.clone(), |p| p.name.clone()),
                                position: e.position,
                                points: player.map_or(0.0, |p| p.past_period_points),
                            }
                        })
                        .collect()
                })
                .unwrap_or_default();
            roster.sort_by_key(|s| s.slot);
            let total_points = roster.iter().map(|s| s.points).sum();
            TeamBoard {
                team_id: team_id.clone(),
                roster,
                total_points,
            }
        })
        .collect();

    DraftBoard {
        league_id: turn.league_id.clone(),
        league_name: league_name.to_string(),
        status: turn.status,
        picks,
        teams,
    }
}

pub fn render_json(board: &DraftBoard) -> serde_json::Result<String> {
    serde_json::to_string_pretty(board)
}

pub fn render_text(board: &DraftBoard) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} ({}) - {} picks, {}",
        board.league_name,
        board.league_id,
        board.picks.len(),
        board.status
    );

    let mut round = 0;
    for pick in &board.picks {
        if pick.round != round {
            round = pick.round;
            let _ = writeln!(out, "\nRound {round}");
        }
        let _ = writeln!(
            out,
            "  {:>3}. {:<10} {:<24} {:<4}{}",
            pick.overall,
            pick.team_id,
            pick.player_name,
            pick.slot,
            if pick.auto { "" } else { " (manual)" }
        );
    }

    for team in &board.teams {
        let _ = writeln!(out, "\n{} ({:.1} pts)", team.team_id, team.total_points);
        for slot in &team.roster {
            let _ = writeln!(
                out,
                "  {:<4} {:<24} {:<3} {:>6.1}",
                slot.slot, slot.player_name, slot.position, slot.points
            );
        }
    }
    out
}
