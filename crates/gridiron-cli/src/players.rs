// Player pool CSV import.
//
// Expected columns: id,name,position,points. Unknown position codes are kept
// (the engine refuses to place them); rows that fail to parse are skipped.

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use gridiron_draft::draft::player::PlayerRef;

#[derive(Debug, thiserror::Error)]
pub enum PlayerImportError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("validation error: {0}")]
    Validation(String),
}

#[derive(Debug, Deserialize)]
struct RawPlayer {
    id: String,
    name: String,
    position: String,
    #[serde(default)]
    points: Option<f64>,
}

fn load_players_from_reader<R: Read>(rdr: R) -> Result<Vec<PlayerRef>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(rdr);
    let mut players = Vec::new();
    let mut seen = HashSet::new();

    for result in reader.deserialize::<RawPlayer>() {
        match result {
            Ok(raw) => {
                if raw.id.is_empty() {
                    warn!("skipping player '{}': empty id", raw.name);
                    continue;
                }
                if !seen.insert(raw.id.clone()) {
                    warn!("skipping duplicate player id '{}'", raw.id);
                    continue;
                }
                // Missing history counts as zero points
                let points = raw.points.unwrap_or(0.0);
                let player = PlayerRef::new(raw.id, raw.name, raw.position.as_str(), points);
                if player.position.known().is_none() {
                    warn!(
                        "player '{}' has unknown position '{}'",
                        player.name, player.position
                    );
                }
                players.push(player);
            }
            Err(e) => {
                warn!("skipping malformed player row: {}", e);
            }
        }
    }
    Ok(players)
}

/// Load the draftable player pool from a CSV file.
pub fn load_player_pool(path: &Path) -> Result<Vec<PlayerRef>, PlayerImportError> {
    let file = std::fs::File::open(path).map_err(|e| PlayerImportError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    let players = load_players_from_reader(file).map_err(|e| PlayerImportError::Csv {
        path: path.display().to_string(),
        source: e,
    })?;
    if players.is_empty() {
        return Err(PlayerImportError::Validation(format!(
            "{} produced zero valid players",
            path.display()
        )));
    }
    Ok(players)
}
