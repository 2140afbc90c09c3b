// Mock-draft simulator entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, not terminal)
// 2. Load config
// 3. Import the player pool
// 4. Build an in-memory league and start the draft
// 5. Auto-pick until the draft completes
// 6. Print the draft board (text, or JSON with --json)

mod board;
mod config;
mod players;
mod simulate;

use std::path::Path;

use anyhow::{bail, Context};
use tracing::info;

use gridiron_draft::{DraftOrchestrator, MemoryLeague, PlayerDirectory, RosterStore, TurnStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let json = parse_args()?;

    init_tracing()?;
    info!("Mock draft starting up");

    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: league={}, {} teams, {} rounds",
        config.league.name,
        config.league.teams.len(),
        config.league.rounds
    );

    let pool = players::load_player_pool(Path::new(&config.data_paths.players))
        .context("failed to load player pool")?;
    info!("Loaded {} players", pool.len());

    let league_id = generate_league_id();
    let week = config.league.week;
    let league = MemoryLeague::new(league_id.clone(), config.league.teams.clone(), pool);
    league.start().await;

    let orch = DraftOrchestrator::new(league, config.rules());
    let picks = simulate::run_mock_draft(&orch, &league_id, week).await?;
    info!("Mock draft {league_id} finished with {picks} picks");

    let backend = orch.backend();
    let turn = backend.turn_state(&league_id).await?;
    let moves = backend.moves().await;
    let rosters = backend.rosters().await;
    let pool = backend.players(&league_id, week).await?;
    let draft_board = board::build_board(&config.league.name, &turn, &moves, &rosters, &pool);

    if json {
        println!(
            "{}",
            board::render_json(&draft_board).context("failed to serialize board")?
        );
    } else {
        print!("{}", board::render_text(&draft_board));
    }

    // Every team's final roster, for the log
    for team in &turn.draft_order {
        let roster = backend.roster(&league_id, team, week).await?;
        info!("{team}: {} players", roster.len());
    }

    Ok(())
}

/// Returns whether `--json` was passed.
fn parse_args() -> anyhow::Result<bool> {
    let mut json = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--json" => json = true,
            "-h" | "--help" => {
                println!("usage: gridiron-mock [--json]");
                std::process::exit(0);
            }
            other => bail!("unknown argument: {other}"),
        }
    }
    Ok(json)
}

/// Unique id for a mock league, e.g. `mock_20261019_142501_337`.
fn generate_league_id() -> String {
    chrono::Utc::now().format("mock_%Y%m%d_%H%M%S_%3f").to_string()
}

fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("gridiron-mock.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("gridiron=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn league_id_format() {
        let id = generate_league_id();
        assert!(id.starts_with("mock_"));
        // mock_YYYYMMDD_HHMMSS_mmm
        assert_eq!(id.len(), "mock_20261019_142501_337".len());
    }
}
