// Library root: snake-draft roster engine. Slot resolution, roster need
// analysis, recommendation scoring, and pick orchestration over a pluggable
// data-access backend.

pub mod backend;
pub mod draft;
pub mod error;
pub mod memory;
pub mod orchestrator;
pub mod valuation;

pub use backend::{DraftBackend, PlayerDirectory, RecordOutcome, RosterStore, TurnStore, TurnWrite};
pub use error::{DraftError, NoEligibleReason};
pub use memory::MemoryLeague;
pub use orchestrator::{
    AutoPickRequest, DraftOrchestrator, DraftRules, PickOutcome, PickRequest, PickSource,
    ReconcileOutcome,
};
