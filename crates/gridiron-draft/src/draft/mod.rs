// Draft domain model: positions, players, rosters, and the turn pointer.

pub mod player;
pub mod position;
pub mod roster;
pub mod turn;
