// Roster need analysis and draft recommendation scoring.

pub mod needs;
pub mod recommend;
