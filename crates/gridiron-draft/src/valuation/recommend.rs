// Draft recommendation scoring.
//
// Ranks available players by last period's fantasy output, weighted by how
// badly the roster needs the position, how scarce the position is, and an
// early-round priority curve that front-loads RB/WR/QB.

use serde::Serialize;

use crate::draft::player::PlayerRef;
use crate::draft::position::{Position, Slot};
use crate::valuation::needs::RosterNeedSnapshot;

/// Rounds at or below this number get the positional priority curve.
pub const EARLY_ROUND_CUTOFF: u32 = 5;

// ---------------------------------------------------------------------------
// Candidate types
// ---------------------------------------------------------------------------

/// Display tier for a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationPriority {
    High,
    Medium,
    Low,
}

impl RecommendationPriority {
    pub fn label(&self) -> &'static str {
        match self {
            RecommendationPriority::High => "HIGH",
            RecommendationPriority::Medium => "MEDIUM",
            RecommendationPriority::Low => "LOW",
        }
    }
}

/// A scored recommendation. Built fresh on every scoring pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DraftCandidate {
    pub player: PlayerRef,
    /// Past-period points before weighting.
    pub raw_score: f64,
    /// Weighted score, rounded to 2 decimal places.
    pub adjusted_score: f64,
    pub reason: String,
    pub priority: RecommendationPriority,
}

// ---------------------------------------------------------------------------
// Need multiplier
// ---------------------------------------------------------------------------

/// Which need rule applied to a candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
enum NeedBranch {
    /// The position's own slot is unmet.
    Need(Slot),
    /// RB/WR with a full native slot and an open FLEX.
    Flex,
    /// IDP with an open DP slot.
    DefensivePlayer,
    /// Starters covered, bench room left.
    Bench,
    /// Nothing left to fill.
    Surplus,
}

impl NeedBranch {
    fn classify(pos: Position, needs: &RosterNeedSnapshot) -> Self {
        if let Some(native) = pos.native_slot() {
            if needs.is_unmet(native) {
                return NeedBranch::Need(native);
            }
        }
        if pos.is_flex_eligible() && needs.flex_available {
            return NeedBranch::Flex;
        }
        if pos.is_dp_eligible() && needs.is_unmet(Slot::DefensivePlayer) {
            return NeedBranch::DefensivePlayer;
        }
        if needs.has_bench_room() {
            NeedBranch::Bench
        } else {
            NeedBranch::Surplus
        }
    }

    /// Multiplier for this branch. Depth and surplus tiers depend on the
    /// position's slot eligibility.
    fn multiplier(&self, pos: Position) -> f64 {
        match self {
            NeedBranch::Need(_) => 2.0,
            NeedBranch::Flex => 1.5,
            NeedBranch::DefensivePlayer => 1.8,
            NeedBranch::Bench if pos.is_flex_eligible() => 0.7,
            NeedBranch::Bench => 0.5,
            NeedBranch::Surplus if pos.is_flex_eligible() => 0.3,
            NeedBranch::Surplus if pos.is_dp_eligible() => 0.2,
            NeedBranch::Surplus => 0.1,
        }
    }

    fn reason(&self) -> String {
        match self {
            NeedBranch::Need(slot) => format!("Fills empty {slot} slot"),
            NeedBranch::Flex => "FLEX eligible".to_string(),
            NeedBranch::DefensivePlayer => "Fills empty DP slot".to_string(),
            NeedBranch::Bench => "Bench depth".to_string(),
            NeedBranch::Surplus => "Roster surplus".to_string(),
        }
    }

    fn priority(&self) -> RecommendationPriority {
        match self {
            NeedBranch::Need(_) => RecommendationPriority::High,
            NeedBranch::Flex | NeedBranch::DefensivePlayer => RecommendationPriority::Medium,
            NeedBranch::Bench | NeedBranch::Surplus => RecommendationPriority::Low,
        }
    }
}

// ---------------------------------------------------------------------------
// Core computation
// ---------------------------------------------------------------------------

/// Early-round positional bias: `(11 - rank) / 10` for rounds 1-5, else 1.0.
pub fn round_adjustment(pos: Position, round: u32) -> f64 {
    if round > EARLY_ROUND_CUTOFF {
        return 1.0;
    }
    (11.0 - f64::from(pos.early_round_rank())) / 10.0
}

fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Score and rank draft candidates for one team.
///
/// Per candidate:
/// 1. Skip unavailable players, unknown positions, and players with no
///    past-period points.
/// 2. `adjusted = round2(points * need * scarcity * round_adjustment)`.
///
/// Only positive adjusted scores are returned, sorted descending. The sort is
/// stable, so equal scores keep their input order.
pub fn score(
    candidates: &[PlayerRef],
    needs: &RosterNeedSnapshot,
    round: u32,
) -> Vec<DraftCandidate> {
    let mut ranked: Vec<DraftCandidate> = candidates
        .iter()
        .filter(|p| p.available)
        .filter_map(|player| {
            let pos = player.position.known()?;
            let base = player.past_period_points;
            if !base.is_finite() || base <= 0.0 {
                return None;
            }

            let branch = NeedBranch::classify(pos, needs);
            let adjusted = round_to_cents(
                base * branch.multiplier(pos)
                    * pos.scarcity_multiplier()
                    * round_adjustment(pos, round),
            );
            if adjusted <= 0.0 {
                return None;
            }

            Some(DraftCandidate {
                player: player.clone(),
                raw_score: base,
                adjusted_score: adjusted,
                reason: branch.reason(),
                priority: branch.priority(),
            })
        })
        .collect();

    ranked.sort_by(|a, b| b.adjusted_score.total_cmp(&a.adjusted_score));

    ranked
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::roster::{AcquiredType, RosterEntry, DEFAULT_BENCH_CAPACITY};
    use crate::valuation::needs::analyze_needs;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn player(id: &str, pos: &str, pts: f64) -> PlayerRef {
        PlayerRef::new(id, format!("Player {id}"), pos, pts)
    }

    fn entry(position: Position, slot: Slot) -> RosterEntry {
        RosterEntry {
            team_id: "team_1".to_string(),
            player_id: format!("{position}-{slot}"),
            position,
            slot,
            acquired_week: 1,
            acquired_type: AcquiredType::Draft,
        }
    }

    fn empty_needs() -> RosterNeedSnapshot {
        analyze_needs(&[], DEFAULT_BENCH_CAPACITY)
    }

    #[test]
    fn rb_outranks_qb_in_round_one() {
        let pool = vec![player("rb", "RB", 200.0), player("qb", "QB", 180.0)];
        let ranked = score(&pool, &empty_needs(), 1);

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].player.id, "rb");
        assert_eq!(ranked[1].player.id, "qb");
        // 200 * 2.0 * 1.0 * 1.0
        assert!(approx_eq(ranked[0].adjusted_score, 400.0));
        // 180 * 2.0 * 1.3 * 0.8
        assert!(approx_eq(ranked[1].adjusted_score, 374.4));
    }

    #[test]
    fn round_curve_off_after_round_five() {
        let pool = vec![player("rb", "RB", 200.0), player("qb", "QB", 180.0)];
        let ranked = score(&pool, &empty_needs(), 6);
        // QB: 180 * 2.0 * 1.3 = 468 beats RB: 400
        assert_eq!(ranked[0].player.id, "qb");
        assert!(approx_eq(ranked[0].adjusted_score, 468.0));
    }

    #[test]
    fn round_adjustment_values() {
        assert!(approx_eq(round_adjustment(Position::RunningBack, 1), 1.0));
        assert!(approx_eq(round_adjustment(Position::WideReceiver, 3), 0.9));
        assert!(approx_eq(round_adjustment(Position::Kicker, 5), 0.4));
        assert!(approx_eq(round_adjustment(Position::Kicker, 6), 1.0));
    }

    #[test]
    fn zero_history_players_excluded() {
        let pool = vec![player("rookie", "WR", 0.0), player("vet", "WR", 50.0)];
        let ranked = score(&pool, &empty_needs(), 1);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].player.id, "vet");
    }

    #[test]
    fn non_finite_points_excluded_and_order_kept() {
        let mut nan = player("nan", "RB", 0.0);
        nan.past_period_points = f64::NAN;
        let mut inf = player("inf", "WR", 0.0);
        inf.past_period_points = f64::INFINITY;
        let pool = vec![player("low", "TE", 90.0), nan, inf, player("high", "RB", 200.0)];

        let ranked = score(&pool, &empty_needs(), 1);
        let ids: Vec<_> = ranked.iter().map(|c| c.player.id.as_str()).collect();
        assert_eq!(ids, vec!["high", "low"]);
        assert!(ranked.iter().all(|c| c.adjusted_score.is_finite()));
    }

    #[test]
    fn unavailable_and_unknown_positions_excluded() {
        let mut taken = player("taken", "RB", 300.0);
        taken.available = false;
        let pool = vec![taken, player("punter", "P", 90.0), player("te", "TE", 80.0)];
        let ranked = score(&pool, &empty_needs(), 1);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].player.id, "te");
    }

    #[test]
    fn need_branch_sets_reason_and_priority() {
        let ranked = score(&[player("k", "K", 120.0)], &empty_needs(), 8);
        assert_eq!(ranked[0].reason, "Fills empty K slot");
        assert_eq!(ranked[0].priority, RecommendationPriority::High);
        // 120 * 2.0 * 1.1
        assert!(approx_eq(ranked[0].adjusted_score, 264.0));
    }

    #[test]
    fn flex_branch_for_rb_with_full_native_slot() {
        let roster = vec![
            entry(Position::RunningBack, Slot::RunningBack),
            entry(Position::RunningBack, Slot::RunningBack),
        ];
        let needs = analyze_needs(&roster, DEFAULT_BENCH_CAPACITY);
        let ranked = score(&[player("rb3", "RB", 100.0)], &needs, 7);
        assert_eq!(ranked[0].reason, "FLEX eligible");
        assert_eq!(ranked[0].priority, RecommendationPriority::Medium);
        assert!(approx_eq(ranked[0].adjusted_score, 150.0));
    }

    #[test]
    fn bench_and_surplus_tiers_for_flex_positions() {
        let roster = vec![
            entry(Position::WideReceiver, Slot::WideReceiver),
            entry(Position::WideReceiver, Slot::WideReceiver),
            entry(Position::WideReceiver, Slot::Flex),
        ];
        let needs = analyze_needs(&roster, DEFAULT_BENCH_CAPACITY);
        let ranked = score(&[player("wr", "WR", 100.0)], &needs, 7);
        assert_eq!(ranked[0].reason, "Bench depth");
        assert!(approx_eq(ranked[0].adjusted_score, 70.0));

        let needs = analyze_needs(&roster, 3);
        let ranked = score(&[player("wr", "WR", 100.0)], &needs, 7);
        assert_eq!(ranked[0].reason, "Roster surplus");
        assert!(approx_eq(ranked[0].adjusted_score, 30.0));
    }

    #[test]
    fn dp_tiers_for_idp_positions() {
        let ranked = score(&[player("lb", "LB", 100.0)], &empty_needs(), 7);
        assert_eq!(ranked[0].reason, "Fills empty DP slot");
        assert_eq!(ranked[0].priority, RecommendationPriority::Medium);
        // 100 * 1.8 * 1.1
        assert!(approx_eq(ranked[0].adjusted_score, 198.0));

        let roster = vec![entry(Position::Linebacker, Slot::DefensivePlayer)];
        let needs = analyze_needs(&roster, DEFAULT_BENCH_CAPACITY);
        let ranked = score(&[player("db", "DB", 100.0)], &needs, 7);
        assert!(approx_eq(ranked[0].adjusted_score, 55.0));

        let needs = analyze_needs(&roster, 1);
        let ranked = score(&[player("db", "DB", 100.0)], &needs, 7);
        assert!(approx_eq(ranked[0].adjusted_score, 22.0));
    }

    #[test]
    fn other_filled_positions_tiers() {
        let roster = vec![entry(Position::TightEnd, Slot::TightEnd)];
        let needs = analyze_needs(&roster, DEFAULT_BENCH_CAPACITY);
        let ranked = score(&[player("te", "TE", 100.0)], &needs, 7);
        // 100 * 0.5 * 1.2
        assert!(approx_eq(ranked[0].adjusted_score, 60.0));

        let needs = analyze_needs(&roster, 1);
        let ranked = score(&[player("te", "TE", 100.0)], &needs, 7);
        // 100 * 0.1 * 1.2
        assert!(approx_eq(ranked[0].adjusted_score, 12.0));
    }

    #[test]
    fn adjusted_score_rounded_to_two_places() {
        let ranked = score(&[player("qb", "QB", 123.457)], &empty_needs(), 3);
        // 123.457 * 2.0 * 1.3 * 0.8 = 256.79056
        assert!(approx_eq(ranked[0].adjusted_score, 256.79));
    }

    #[test]
    fn output_sorted_descending_and_positive() {
        let pool = vec![
            player("a", "K", 140.0),
            player("b", "WR", 220.0),
            player("c", "DEF", 110.0),
            player("d", "TE", 160.0),
            player("e", "RB", 0.0),
            player("f", "QB", 300.0),
        ];
        let ranked = score(&pool, &empty_needs(), 2);
        assert_eq!(ranked.len(), 5);
        for pair in ranked.windows(2) {
            assert!(pair[0].adjusted_score >= pair[1].adjusted_score);
        }
        assert!(ranked.iter().all(|c| c.adjusted_score > 0.0));
    }

    #[test]
    fn ties_keep_input_order() {
        let pool = vec![
            player("first", "WR", 100.0),
            player("second", "WR", 100.0),
            player("third", "WR", 100.0),
        ];
        let ranked = score(&pool, &empty_needs(), 9);
        let ids: Vec<_> = ranked.iter().map(|c| c.player.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second", "third"]);
    }
}
