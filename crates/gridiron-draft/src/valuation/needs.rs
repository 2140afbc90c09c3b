// Roster need analysis.
//
// Works out which structured slots a team still has to fill, which are
// over-filled, whether the next RB/WR would land in FLEX, and how much room is
// left before the roster hits its size limit.

use std::collections::BTreeSet;

use crate::draft::position::{Position, Slot};
use crate::draft::roster::{slot_capacity, Occupancy, RosterEntry, ROSTER_SLOTS};

/// Derived view of one team's roster needs. Recomputed on every call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterNeedSnapshot {
    /// Structured slots below capacity (with FLEX/DP surplus rules applied).
    pub unmet_slots: BTreeSet<Slot>,
    /// Structured slots holding more entries than their capacity.
    pub overfilled_slots: BTreeSet<Slot>,
    /// FLEX is unmet and an RB or WR native slot is already full, so the next
    /// player at that position would fill FLEX.
    pub flex_available: bool,
    /// Roster spots left before reaching the bench capacity.
    pub bench_remaining: usize,
}

impl RosterNeedSnapshot {
    pub fn is_unmet(&self, slot: Slot) -> bool {
        self.unmet_slots.contains(&slot)
    }

    pub fn has_bench_room(&self) -> bool {
        self.bench_remaining > 0
    }
}

/// Analyze a team's active roster entries.
///
/// A slot is unmet while its occupancy is below capacity, except:
/// - FLEX is met once anything sits in FLEX, or RB or WR head count exceeds
///   that position's own slot capacity (the surplus body covers FLEX).
/// - DP is met once anything sits in DP, or any LB/DB/DL is rostered.
pub fn analyze_needs(roster: &[RosterEntry], bench_capacity: usize) -> RosterNeedSnapshot {
    let occupancy = Occupancy::from_entries(roster);
    let mut unmet_slots = BTreeSet::new();
    let mut overfilled_slots = BTreeSet::new();

    for def in ROSTER_SLOTS {
        let filled = occupancy.in_slot(def.slot);
        if filled > def.capacity {
            overfilled_slots.insert(def.slot);
        }

        let met = match def.slot {
            Slot::Flex => filled > 0 || flex_covered_by_surplus(&occupancy),
            Slot::DefensivePlayer => {
                filled > 0
                    || [
                        Position::Linebacker,
                        Position::DefensiveBack,
                        Position::DefensiveLineman,
                    ]
                    .iter()
                    .any(|&p| occupancy.at_position(p) > 0)
            }
            _ => filled >= def.capacity,
        };
        if !met {
            unmet_slots.insert(def.slot);
        }
    }

    let flex_available = unmet_slots.contains(&Slot::Flex)
        && [Position::RunningBack, Position::WideReceiver]
            .iter()
            .any(|&p| p.native_slot().is_some_and(|s| !occupancy.has_room(s)));

    RosterNeedSnapshot {
        unmet_slots,
        overfilled_slots,
        flex_available,
        bench_remaining: bench_capacity.saturating_sub(occupancy.total()),
    }
}

/// Whether RB or WR head count already exceeds its dedicated slot capacity.
fn flex_covered_by_surplus(occupancy: &Occupancy) -> bool {
    [Position::RunningBack, Position::WideReceiver]
        .iter()
        .any(|&p| {
            let base = p.native_slot().map_or(0, slot_capacity);
            occupancy.at_position(p) > base
        })
}
