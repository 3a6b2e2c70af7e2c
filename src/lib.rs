pub mod config;
pub mod error;
pub mod generate;
pub mod input;
pub mod scheduler;

pub use config::SchedulerConfig;
pub use error::{Result, RosterError};
pub use input::RosterInput;
pub use scheduler::{schedule, Assignment, Scheduler};
