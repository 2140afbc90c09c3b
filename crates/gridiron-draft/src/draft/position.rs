// Football positions, roster slot names, and boundary position codes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A position or slot code that is not part of the league format.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized {kind} code: {code:?}")]
pub struct PositionParseError {
    pub kind: &'static str,
    pub code: String,
}

/// Football positions a player can be listed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Position {
    Quarterback,
    RunningBack,
    WideReceiver,
    TightEnd,
    Kicker,
    Defense,
    /// Generic individual defensive player.
    DefensivePlayer,
    Linebacker,
    DefensiveBack,
    DefensiveLineman,
}

/// Every known position, in display order.
pub const ALL_POSITIONS: &[Position] = &[
    Position::Quarterback,
    Position::RunningBack,
    Position::WideReceiver,
    Position::TightEnd,
    Position::Kicker,
    Position::Defense,
    Position::DefensivePlayer,
    Position::Linebacker,
    Position::DefensiveBack,
    Position::DefensiveLineman,
];

impl Position {
    /// Parse a position code into a Position enum.
    ///
    /// Case-insensitive. "D/ST" and "DST" are accepted for team defense,
    /// "IDP" for the generic defensive player.
    pub fn from_str_pos(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "QB" => Some(Position::Quarterback),
            "RB" => Some(Position::RunningBack),
            "WR" => Some(Position::WideReceiver),
            "TE" => Some(Position::TightEnd),
            "K" => Some(Position::Kicker),
            "DEF" | "DST" | "D/ST" => Some(Position::Defense),
            "DP" | "IDP" => Some(Position::DefensivePlayer),
            "LB" => Some(Position::Linebacker),
            "DB" => Some(Position::DefensiveBack),
            "DL" => Some(Position::DefensiveLineman),
            _ => None,
        }
    }

    /// Return the display string for this position.
    pub fn display_str(&self) -> &'static str {
        match self {
            Position::Quarterback => "QB",
            Position::RunningBack => "RB",
            Position::WideReceiver => "WR",
            Position::TightEnd => "TE",
            Position::Kicker => "K",
            Position::Defense => "DEF",
            Position::DefensivePlayer => "DP",
            Position::Linebacker => "LB",
            Position::DefensiveBack => "DB",
            Position::DefensiveLineman => "DL",
        }
    }

    /// The dedicated roster slot for this position, if it has one.
    ///
    /// LB/DB/DL have no slot of their own and can only fill DP.
    pub fn native_slot(&self) -> Option<Slot> {
        match self {
            Position::Quarterback => Some(Slot::Quarterback),
            Position::RunningBack => Some(Slot::RunningBack),
            Position::WideReceiver => Some(Slot::WideReceiver),
            Position::TightEnd => Some(Slot::TightEnd),
            Position::Kicker => Some(Slot::Kicker),
            Position::Defense => Some(Slot::Defense),
            Position::DefensivePlayer => Some(Slot::DefensivePlayer),
            Position::Linebacker | Position::DefensiveBack | Position::DefensiveLineman => None,
        }
    }

    /// Whether this position may fill the FLEX slot.
    pub fn is_flex_eligible(&self) -> bool {
        matches!(self, Position::RunningBack | Position::WideReceiver)
    }

    /// Whether this position may fill the DP slot.
    pub fn is_dp_eligible(&self) -> bool {
        matches!(
            self,
            Position::DefensivePlayer
                | Position::Linebacker
                | Position::DefensiveBack
                | Position::DefensiveLineman
        )
    }

    /// Fixed positional scarcity weight.
    ///
    /// Elite production at QB/TE/K/DEF/IDP is harder to replace than at RB/WR.
    pub fn scarcity_multiplier(&self) -> f64 {
        match self {
            Position::Quarterback => 1.3,
            Position::TightEnd => 1.2,
            Position::Kicker | Position::Defense => 1.1,
            Position::DefensivePlayer
            | Position::Linebacker
            | Position::DefensiveBack
            | Position::DefensiveLineman => 1.1,
            Position::RunningBack | Position::WideReceiver => 1.0,
        }
    }

    /// Early-round priority rank: 1 is drafted first, 7 last.
    pub fn early_round_rank(&self) -> u8 {
        match self {
            Position::RunningBack => 1,
            Position::WideReceiver => 2,
            Position::Quarterback => 3,
            Position::TightEnd => 4,
            Position::DefensivePlayer
            | Position::Linebacker
            | Position::DefensiveBack
            | Position::DefensiveLineman => 5,
            Position::Defense => 6,
            Position::Kicker => 7,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.display_str())
    }
}

impl FromStr for Position {
    type Err = PositionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::from_str_pos(s).ok_or_else(|| PositionParseError {
            kind: "position",
            code: s.to_string(),
        })
    }
}

/// Named roster slot buckets.
///
/// Declaration order is the display order of a roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Slot {
    Quarterback,
    RunningBack,
    WideReceiver,
    TightEnd,
    Flex,
    Kicker,
    Defense,
    DefensivePlayer,
    /// Overflow bucket. Never produced by the structured resolver.
    Bench,
}

impl Slot {
    /// Parse a slot name ("QB", "FLEX", "BE", ...).
    pub fn from_str_slot(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "QB" => Some(Slot::Quarterback),
            "RB" => Some(Slot::RunningBack),
            "WR" => Some(Slot::WideReceiver),
            "TE" => Some(Slot::TightEnd),
            "FLEX" => Some(Slot::Flex),
            "K" => Some(Slot::Kicker),
            "DEF" | "DST" | "D/ST" => Some(Slot::Defense),
            "DP" => Some(Slot::DefensivePlayer),
            "BE" | "BN" | "BENCH" => Some(Slot::Bench),
            _ => None,
        }
    }

    pub fn display_str(&self) -> &'static str {
        match self {
            Slot::Quarterback => "QB",
            Slot::RunningBack => "RB",
            Slot::WideReceiver => "WR",
            Slot::TightEnd => "TE",
            Slot::Flex => "FLEX",
            Slot::Kicker => "K",
            Slot::Defense => "DEF",
            Slot::DefensivePlayer => "DP",
            Slot::Bench => "BE",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.display_str())
    }
}

impl FromStr for Slot {
    type Err = PositionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Slot::from_str_slot(s).ok_or_else(|| PositionParseError {
            kind: "slot",
            code: s.to_string(),
        })
    }
}

/// A position code as received from an external player directory.
///
/// Codes outside the known set are preserved verbatim so they can be reported
/// and so the resolver can refuse them instead of guessing a slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PositionCode {
    Known(Position),
    Unknown(String),
}

impl PositionCode {
    /// The parsed position, if the code is one we understand.
    pub fn known(&self) -> Option<Position> {
        match self {
            PositionCode::Known(pos) => Some(*pos),
            PositionCode::Unknown(_) => None,
        }
    }
}

impl From<Position> for PositionCode {
    fn from(pos: Position) -> Self {
        PositionCode::Known(pos)
    }
}

impl From<&str> for PositionCode {
    fn from(s: &str) -> Self {
        match Position::from_str_pos(s) {
            Some(pos) => PositionCode::Known(pos),
            None => PositionCode::Unknown(s.trim().to_string()),
        }
    }
}

impl From<String> for PositionCode {
    fn from(s: String) -> Self {
        PositionCode::from(s.as_str())
    }
}

impl From<PositionCode> for String {
    fn from(code: PositionCode) -> Self {
        code.to_string()
    }
}

impl fmt::Display for PositionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PositionCode::Known(pos) => write!(f, "{pos}"),
            PositionCode::Unknown(raw) => write!(f, "{raw}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_str_pos_offense() {
        assert_eq!(Position::from_str_pos("QB"), Some(Position::Quarterback));
        assert_eq!(Position::from_str_pos("RB"), Some(Position::RunningBack));
        assert_eq!(Position::from_str_pos("WR"), Some(Position::WideReceiver));
        assert_eq!(Position::from_str_pos("TE"), Some(Position::TightEnd));
        assert_eq!(Position::from_str_pos("K"), Some(Position::Kicker));
    }

    #[test]
    fn from_str_pos_defense_aliases() {
        assert_eq!(Position::from_str_pos("DEF"), Some(Position::Defense));
        assert_eq!(Position::from_str_pos("D/ST"), Some(Position::Defense));
        assert_eq!(Position::from_str_pos("dst"), Some(Position::Defense));
        assert_eq!(Position::from_str_pos("IDP"), Some(Position::DefensivePlayer));
        assert_eq!(Position::from_str_pos("lb"), Some(Position::Linebacker));
    }

    #[test]
    fn from_str_pos_invalid() {
        assert_eq!(Position::from_str_pos("XX"), None);
        assert_eq!(Position::from_str_pos(""), None);
        assert_eq!(Position::from_str_pos("FLEX"), None);
    }

    #[test]
    fn display_str_roundtrip() {
        for &pos in ALL_POSITIONS {
            let s = pos.display_str();
            assert_eq!(Position::from_str_pos(s), Some(pos), "Roundtrip failed for {}", s);
        }
    }

    #[test]
    fn slot_display_roundtrip() {
        let slots = [
            Slot::Quarterback,
            Slot::RunningBack,
            Slot::WideReceiver,
            Slot::TightEnd,
            Slot::Flex,
            Slot::Kicker,
            Slot::Defense,
            Slot::DefensivePlayer,
            Slot::Bench,
        ];
        for slot in slots {
            assert_eq!(Slot::from_str_slot(slot.display_str()), Some(slot));
        }
    }

    #[test]
    fn from_str_reports_bad_codes() {
        assert_eq!("te".parse::<Position>(), Ok(Position::TightEnd));
        assert_eq!("flex".parse::<Slot>(), Ok(Slot::Flex));
        let err = "OL".parse::<Position>().unwrap_err();
        assert_eq!(err.to_string(), "unrecognized position code: \"OL\"");
        assert!("TAXI".parse::<Slot>().is_err());
    }

    #[test]
    fn native_slots() {
        assert_eq!(Position::Quarterback.native_slot(), Some(Slot::Quarterback));
        assert_eq!(Position::DefensivePlayer.native_slot(), Some(Slot::DefensivePlayer));
        assert_eq!(Position::Linebacker.native_slot(), None);
        assert_eq!(Position::DefensiveBack.native_slot(), None);
        assert_eq!(Position::DefensiveLineman.native_slot(), None);
    }

    #[test]
    fn flex_and_dp_eligibility_are_disjoint() {
        for &pos in ALL_POSITIONS {
            assert!(!(pos.is_flex_eligible() && pos.is_dp_eligible()), "{pos} is both");
        }
        assert!(Position::RunningBack.is_flex_eligible());
        assert!(Position::WideReceiver.is_flex_eligible());
        assert!(!Position::TightEnd.is_flex_eligible());
        assert!(Position::Linebacker.is_dp_eligible());
    }

    #[test]
    fn early_round_rank_ordering() {
        assert_eq!(Position::RunningBack.early_round_rank(), 1);
        assert_eq!(Position::Kicker.early_round_rank(), 7);
        assert!(Position::Quarterback.early_round_rank() < Position::Defense.early_round_rank());
    }

    #[test]
    fn position_code_preserves_unknown() {
        let code = PositionCode::from("P");
        assert_eq!(code, PositionCode::Unknown("P".to_string()));
        assert_eq!(code.known(), None);
        assert_eq!(code.to_string(), "P");

        let code = PositionCode::from(" wr ");
        assert_eq!(code.known(), Some(Position::WideReceiver));
        assert_eq!(code.to_string(), "WR");
    }

    #[test]
    fn position_code_serializes_as_string() {
        let json = serde_json::to_string(&PositionCode::Known(Position::TightEnd)).unwrap();
        assert_eq!(json, "\"TE\"");
        let parsed: PositionCode = serde_json::from_str("\"OL\"").unwrap();
        assert_eq!(parsed, PositionCode::Unknown("OL".to_string()));
    }
}
