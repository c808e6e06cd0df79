//! State behind the collection detail page.
//!
//! ARCHITECTURE
//! ============
//! Three independent inputs feed one `MintStatus`: the connected wallet
//! address, the drop's supply counters, and the first claim condition's
//! price. `status` holds the record and the pure display derivation;
//! `view_model` owns the record, re-runs refreshes when the contract handle
//! or address changes, and runs the guarded mint action.

pub mod status;
pub mod view_model;

pub use status::{MintButton, MintPhase, MintStatus};
pub use view_model::{Dependency, MintError, MintOutcome, MintViewModel};
