// Mock-draft driver: auto-picks for whoever is on the clock until the draft
// completes.

use anyhow::{bail, Context, Result};
use tracing::{debug, info, warn};

use gridiron_draft::draft::player::PlayerRef;
use gridiron_draft::draft::turn::DraftStatus;
use gridiron_draft::{AutoPickRequest, DraftBackend, DraftError, DraftOrchestrator, ReconcileOutcome};

/// Run every remaining pick. Returns the number of picks this call made.
///
/// A pick whose turn advance failed is reconciled once and the loop moves on;
/// any other engine error stops the draft.
pub async fn run_mock_draft<B: DraftBackend>(
    orch: &DraftOrchestrator<B>,
    league_id: &str,
    week: u32,
) -> Result<usize> {
    let backend = orch.backend();
    let mut picks = 0usize;
    let mut attempts = 0usize;

    loop {
        let turn = backend
            .turn_state(league_id)
            .await
            .context("failed to read turn state")?;
        if turn.status == DraftStatus::Completed {
            break;
        }

        let budget = turn.team_count() * orch.rules().rounds as usize * 2;
        attempts += 1;
        if attempts > budget {
            bail!("mock draft made no progress after {budget} attempts");
        }

        let team_id = turn
            .on_the_clock()
            .context("draft order is empty")?
            .to_string();
        let roster = backend.roster(league_id, &team_id, week).await?;
        let available: Vec<PlayerRef> = backend
            .players(league_id, week)
            .await?
            .into_iter()
            .filter(|p| p.available)
            .collect();

        let result = orch
            .auto_pick(AutoPickRequest {
                league_id,
                team_id: &team_id,
                available_players: &available,
                current_roster: &roster,
                week,
            })
            .await;

        match result {
            Ok(outcome) => {
                picks += 1;
                debug!(
                    "pick {} -> {} ({:?})",
                    outcome.pick_number + 1,
                    outcome.player.name,
                    outcome.source
                );
            }
            Err(err @ DraftError::ExternalWriteFailed { .. }) => {
                warn!("pick for {team_id} did not finish: {err}");
                match orch.reconcile_turn(league_id).await? {
                    ReconcileOutcome::Advanced { pick_number } => {
                        picks += 1;
                        info!("reconciled turn, now at pick {pick_number}");
                    }
                    ReconcileOutcome::Consistent => {}
                }
            }
            Err(err) => return Err(err).context(format!("auto-pick failed for {team_id}")),
        }
    }

    Ok(picks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridiron_draft::{DraftRules, MemoryLeague, TurnStore};

    fn pool() -> Vec<PlayerRef> {
        let mut pool = Vec::new();
        for (pos, count) in [("QB", 4), ("RB", 8), ("WR", 8), ("TE", 4), ("K", 4), ("DEF", 4), ("LB", 4)] {
            for i in 0..count {
                pool.push(PlayerRef::new(
                    format!("{pos}{i}"),
                    format!("{pos} {i}"),
                    pos,
                    200.0 - 10.0 * i as f64,
                ));
            }
        }
        pool
    }

    async fn league(teams: usize) -> DraftOrchestrator<MemoryLeague> {
        let order = (1..=teams).map(|i| format!("team_{i}")).collect();
        let league = MemoryLeague::new("mock", order, pool());
        league.start().await;
        DraftOrchestrator::new(league, DraftRules::default())
    }

    #[tokio::test]
    async fn runs_until_completed() {
        let orch = league(3).await;
        let picks = run_mock_draft(&orch, "mock", 1).await.unwrap();
        assert_eq!(picks, 30);
        let turn = orch.backend().turn_state("mock").await.unwrap();
        assert_eq!(turn.status, DraftStatus::Completed);
    }

    #[tokio::test]
    async fn recovers_from_failed_turn_write() {
        let orch = league(2).await;
        orch.backend().fail_next_turn_write();
        let picks = run_mock_draft(&orch, "mock", 1).await.unwrap();
        assert_eq!(picks, 20);
        assert_eq!(orch.backend().moves().await.len(), 20);
    }

    #[tokio::test]
    async fn paused_draft_is_an_error() {
        let orch = league(2).await;
        orch.backend()
            .set_status("mock", DraftStatus::Paused)
            .await
            .unwrap();
        let err = run_mock_draft(&orch, "mock", 1).await.unwrap_err();
        assert!(err.to_string().contains("auto-pick failed for team_1"));
    }
}
