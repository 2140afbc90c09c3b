// Roster slot table, roster entries, and slot assignment.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::player::PlayerRef;
use super::position::{Position, Slot};

/// Default maximum roster size (starters plus bench).
pub const DEFAULT_BENCH_CAPACITY: usize = 14;

/// One structured roster slot bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RosterSlotDefinition {
    pub slot: Slot,
    pub capacity: usize,
    pub eligible_positions: &'static [Position],
}

/// The league format's structured slots. Bench is not part of the table.
pub const ROSTER_SLOTS: &[RosterSlotDefinition] = &[
    RosterSlotDefinition {
        slot: Slot::Quarterback,
        capacity: 1,
        eligible_positions: &[Position::Quarterback],
    },
    RosterSlotDefinition {
        slot: Slot::RunningBack,
        capacity: 2,
        eligible_positions: &[Position::RunningBack],
    },
    RosterSlotDefinition {
        slot: Slot::WideReceiver,
        capacity: 2,
        eligible_positions: &[Position::WideReceiver],
    },
    RosterSlotDefinition {
        slot: Slot::TightEnd,
        capacity: 1,
        eligible_positions: &[Position::TightEnd],
    },
    RosterSlotDefinition {
        slot: Slot::Flex,
        capacity: 1,
        eligible_positions: &[Position::RunningBack, Position::WideReceiver],
    },
    RosterSlotDefinition {
        slot: Slot::Kicker,
        capacity: 1,
        eligible_positions: &[Position::Kicker],
    },
    RosterSlotDefinition {
        slot: Slot::Defense,
        capacity: 1,
        eligible_positions: &[Position::Defense],
    },
    RosterSlotDefinition {
        slot: Slot::DefensivePlayer,
        capacity: 1,
        eligible_positions: &[
            Position::DefensivePlayer,
            Position::Linebacker,
            Position::DefensiveBack,
            Position::DefensiveLineman,
        ],
    },
];

/// Look up the structured definition for a slot. `None` for Bench.
pub fn slot_definition(slot: Slot) -> Option<&'static RosterSlotDefinition> {
    ROSTER_SLOTS.iter().find(|d| d.slot == slot)
}

/// Capacity of a structured slot (0 for Bench, which is bounded by roster size).
pub fn slot_capacity(slot: Slot) -> usize {
    slot_definition(slot).map_or(0, |d| d.capacity)
}

/// Sum of all structured slot capacities.
pub fn structured_capacity() -> usize {
    ROSTER_SLOTS.iter().map(|d| d.capacity).sum()
}

/// How a player joined a roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AcquiredType {
    Draft,
    Waiver,
    Trade,
    FreeAgent,
}

/// One occupied slot on a team's roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub team_id: String,
    pub player_id: String,
    /// The player's listed position (not necessarily the slot's position).
    pub position: Position,
    pub slot: Slot,
    pub acquired_week: u32,
    pub acquired_type: AcquiredType,
}

/// Slot and positional head counts for a roster snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Occupancy {
    by_slot: HashMap<Slot, usize>,
    by_position: HashMap<Position, usize>,
    total: usize,
}

impl Occupancy {
    pub fn from_entries(entries: &[RosterEntry]) -> Self {
        let mut occupancy = Occupancy::default();
        for entry in entries {
            *occupancy.by_slot.entry(entry.slot).or_insert(0) += 1;
            *occupancy.by_position.entry(entry.position).or_insert(0) += 1;
            occupancy.total += 1;
        }
        occupancy
    }

    /// Number of entries assigned to `slot`.
    pub fn in_slot(&self, slot: Slot) -> usize {
        self.by_slot.get(&slot).copied().unwrap_or(0)
    }

    /// Number of rostered players listed at `pos`, whatever slot they sit in.
    pub fn at_position(&self, pos: Position) -> usize {
        self.by_position.get(&pos).copied().unwrap_or(0)
    }

    /// Total roster size.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Whether a structured slot still has capacity. Always false for Bench.
    pub fn has_room(&self, slot: Slot) -> bool {
        self.in_slot(slot) < slot_capacity(slot)
    }
}

/// Decide which structured slot a player would fill on this roster.
///
/// Check order is fixed:
/// 1. The player's native position slot
/// 2. FLEX (RB/WR only)
/// 3. DP (DP/LB/DB/DL only)
///
/// so a player never lands in FLEX or DP while their own slot is open.
/// Unknown positions and full rosters return `None`; bench placement is the
/// caller's decision (see [`resolve_slot_with_bench`]).
pub fn resolve_slot(player: &PlayerRef, current_roster: &[RosterEntry]) -> Option<Slot> {
    let pos = player.position.known()?;
    resolve_for_position(pos, &Occupancy::from_entries(current_roster))
}

/// Slot resolution against a precomputed occupancy.
pub fn resolve_for_position(pos: Position, occupancy: &Occupancy) -> Option<Slot> {
    if let Some(native) = pos.native_slot() {
        if occupancy.has_room(native) {
            return Some(native);
        }
    }

    if pos.is_flex_eligible() && occupancy.has_room(Slot::Flex) {
        return Some(Slot::Flex);
    }

    if pos.is_dp_eligible() && occupancy.has_room(Slot::DefensivePlayer) {
        return Some(Slot::DefensivePlayer);
    }

    None
}

/// Like [`resolve_slot`], but overflows known positions to the bench while the
/// roster is below `bench_capacity`.
pub fn resolve_slot_with_bench(
    player: &PlayerRef,
    current_roster: &[RosterEntry],
    bench_capacity: usize,
) -> Option<Slot> {
    let pos = player.position.known()?;
    let occupancy = Occupancy::from_entries(current_roster);
    resolve_for_position(pos, &occupancy)
        .or_else(|| (occupancy.total() < bench_capacity).then_some(Slot::Bench))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::position::ALL_POSITIONS;

    fn entry(position: Position, slot: Slot) -> RosterEntry {
        RosterEntry {
            team_id: "team_1".to_string(),
            player_id: format!("{}-{}", position, slot),
            position,
            slot,
            acquired_week: 1,
            acquired_type: AcquiredType::Draft,
        }
    }

    fn player(pos: &str) -> PlayerRef {
        PlayerRef::new("p", "Player", pos, 100.0)
    }

    #[test]
    fn slot_table_is_unique_and_sized() {
        for (i, a) in ROSTER_SLOTS.iter().enumerate() {
            for b in &ROSTER_SLOTS[i + 1..] {
                assert_ne!(a.slot, b.slot, "duplicate slot {}", a.slot);
            }
        }
        assert_eq!(structured_capacity(), 10);
        assert_eq!(slot_capacity(Slot::RunningBack), 2);
        assert_eq!(slot_capacity(Slot::Bench), 0);
        assert!(slot_definition(Slot::Bench).is_none());
    }

    #[test]
    fn every_known_position_has_some_slot() {
        for &pos in ALL_POSITIONS {
            assert!(
                ROSTER_SLOTS.iter().any(|d| d.eligible_positions.contains(&pos)),
                "{pos} has no eligible slot"
            );
        }
    }

    #[test]
    fn resolve_native_slot_on_empty_roster() {
        assert_eq!(resolve_slot(&player("QB"), &[]), Some(Slot::Quarterback));
        assert_eq!(resolve_slot(&player("RB"), &[]), Some(Slot::RunningBack));
        assert_eq!(resolve_slot(&player("K"), &[]), Some(Slot::Kicker));
        assert_eq!(resolve_slot(&player("DP"), &[]), Some(Slot::DefensivePlayer));
    }

    #[test]
    fn resolve_rb_prefers_native_over_flex() {
        let roster = vec![entry(Position::RunningBack, Slot::RunningBack)];
        // One RB slot still open: must not go to FLEX
        assert_eq!(resolve_slot(&player("RB"), &roster), Some(Slot::RunningBack));
    }

    #[test]
    fn resolve_rb_falls_back_to_flex() {
        let roster = vec![
            entry(Position::RunningBack, Slot::RunningBack),
            entry(Position::RunningBack, Slot::RunningBack),
        ];
        assert_eq!(resolve_slot(&player("RB"), &roster), Some(Slot::Flex));
    }

    #[test]
    fn resolve_wr_none_when_native_and_flex_full() {
        let roster = vec![
            entry(Position::WideReceiver, Slot::WideReceiver),
            entry(Position::WideReceiver, Slot::WideReceiver),
            entry(Position::RunningBack, Slot::Flex),
        ];
        assert_eq!(resolve_slot(&player("WR"), &roster), None);
    }

    #[test]
    fn resolve_idp_positions_use_dp_slot() {
        assert_eq!(resolve_slot(&player("LB"), &[]), Some(Slot::DefensivePlayer));
        assert_eq!(resolve_slot(&player("DB"), &[]), Some(Slot::DefensivePlayer));
        let roster = vec![entry(Position::DefensiveLineman, Slot::DefensivePlayer)];
        assert_eq!(resolve_slot(&player("LB"), &roster), None);
        assert_eq!(resolve_slot(&player("DP"), &roster), None);
    }

    #[test]
    fn resolve_te_never_uses_flex() {
        let roster = vec![entry(Position::TightEnd, Slot::TightEnd)];
        assert_eq!(resolve_slot(&player("TE"), &roster), None);
    }

    #[test]
    fn resolve_unknown_position_is_none() {
        assert_eq!(resolve_slot(&player("P"), &[]), None);
        assert_eq!(resolve_slot_with_bench(&player("P"), &[], 14), None);
    }

    #[test]
    fn resolved_slot_is_always_eligible() {
        let rosters: Vec<Vec<RosterEntry>> = vec![
            vec![],
            vec![
                entry(Position::RunningBack, Slot::RunningBack),
                entry(Position::RunningBack, Slot::RunningBack),
                entry(Position::WideReceiver, Slot::WideReceiver),
            ],
            vec![
                entry(Position::WideReceiver, Slot::WideReceiver),
                entry(Position::WideReceiver, Slot::WideReceiver),
                entry(Position::Linebacker, Slot::DefensivePlayer),
            ],
        ];
        for roster in &rosters {
            for &pos in ALL_POSITIONS {
                if let Some(slot) = resolve_slot(&player(pos.display_str()), roster) {
                    let def = slot_definition(slot).expect("structured slot");
                    assert!(def.eligible_positions.contains(&pos), "{pos} placed in {slot}");
                }
            }
        }
    }

    #[test]
    fn bench_overflow_only_below_capacity() {
        let roster = vec![entry(Position::TightEnd, Slot::TightEnd)];
        assert_eq!(resolve_slot_with_bench(&player("TE"), &roster, 14), Some(Slot::Bench));
        assert_eq!(resolve_slot_with_bench(&player("TE"), &roster, 1), None);
        // Structured slot still wins when open
        assert_eq!(resolve_slot_with_bench(&player("QB"), &roster, 14), Some(Slot::Quarterback));
    }

    #[test]
    fn occupancy_counts_slots_and_positions_separately() {
        let roster = vec![
            entry(Position::RunningBack, Slot::RunningBack),
            entry(Position::RunningBack, Slot::Flex),
            entry(Position::RunningBack, Slot::Bench),
        ];
        let occ = Occupancy::from_entries(&roster);
        assert_eq!(occ.in_slot(Slot::RunningBack), 1);
        assert_eq!(occ.in_slot(Slot::Flex), 1);
        assert_eq!(occ.at_position(Position::RunningBack), 3);
        assert_eq!(occ.total(), 3);
        assert!(occ.has_room(Slot::RunningBack));
        assert!(!occ.has_room(Slot::Flex));
        assert!(!occ.has_room(Slot::Bench));
    }
}
