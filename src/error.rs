use thiserror::Error;

#[derive(Error, Debug)]
pub enum RosterError {
    #[error("Can not schedule duty {duty}: no augmenting path frees another eligible soldier")]
    SchedulingInfeasible { duty: String },

    #[error("Duplicate duty name: {0}")]
    DuplicateDuty(String),

    #[error("Duplicate soldier name: {0}")]
    DuplicateSoldier(String),

    #[error("Duty {duty} has invalid capacity {capacity}, expected at least 1")]
    InvalidCapacity { duty: String, capacity: u32 },

    #[error("Soldier {soldier} prefers unknown duty {duty}")]
    UnknownDuty { soldier: String, duty: String },

    #[error("Unknown soldier: {0}")]
    UnknownSoldier(String),

    #[error("Randomness must be between 1 and 4, got {0}")]
    InvalidRandomness(u8),

    #[error("Placement rejected: {0}")]
    Placement(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RosterError>;
