//! The assignment engine.
//!
//! - [`Roster`]: soldiers, duties and the occupancy relation between them
//! - [`WeightedElector`]: preference-weighted sampling without replacement
//! - [`healer`]: augmenting-path repair when a duty runs short
//! - [`Scheduler`]: the duty-by-duty run loop
//! - [`RandomSource`]: injectable randomness for reproducible runs

pub mod assigner;
pub mod duty;
pub mod elector;
pub mod healer;
pub mod random;
pub mod roster;
pub mod soldier;

pub use assigner::{schedule, RunState, Scheduler};
pub use duty::{Assignment, Duty, DutyAssignment, DutyId};
pub use elector::WeightedElector;
pub use random::{RandomSource, RngSource};
pub use roster::{Candidate, Roster};
pub use soldier::{Soldier, SoldierId};
