// Player references and pick history records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::position::{PositionCode, Slot};
use super::turn::PickAttemptId;

/// A player as supplied by the player directory for one league/week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRef {
    pub id: String,
    pub name: String,
    pub position: PositionCode,
    /// Fantasy points scored over the previous scoring period (season).
    pub past_period_points: f64,
    /// Whether the player is still undrafted in this league.
    pub available: bool,
}

impl PlayerRef {
    /// Build an available player, normalizing the directory record.
    ///
    /// Ids and names are trimmed, the position code is parsed, and
    /// non-finite points are treated as zero history.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        position: impl Into<PositionCode>,
        past_period_points: f64,
    ) -> Self {
        let points = if past_period_points.is_finite() {
            past_period_points
        } else {
            0.0
        };
        PlayerRef {
            id: id.into().trim().to_string(),
            name: name.into().trim().to_string(),
            position: position.into(),
            past_period_points: points,
            available: true,
        }
    }
}

/// How a move-history row came about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveKind {
    /// A manager chose the player.
    DraftPick,
    /// The engine chose the player when the turn timer expired.
    AutoPick,
}

/// Move-history record persisted next to every committed pick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub league_id: String,
    pub team_id: String,
    pub player_id: String,
    pub player_name: String,
    pub slot: Slot,
    pub week: u32,
    /// League-wide pick number (0-indexed) this record was committed under.
    pub pick_number: u32,
    /// Idempotency key for the turn. At most one record exists per key.
    pub attempt_id: PickAttemptId,
    pub kind: MoveKind,
    pub recorded_at: DateTime<Utc>,
}
