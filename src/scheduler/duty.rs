use serde::{Deserialize, Serialize};

/// Stable index of a duty within a [`Roster`](crate::scheduler::Roster).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DutyId(pub(crate) usize);

impl DutyId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for DutyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "duty#{}", self.0)
    }
}

/// A task needing exactly `capacity` soldiers.
///
/// Occupancy is tracked by the owning roster, not on the duty itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Duty {
    pub name: String,
    #[serde(alias = "numberOfSoldiersNeeded")]
    pub capacity: u32,
}

impl Duty {
    pub fn new(name: impl Into<String>, capacity: u32) -> Self {
        Self {
            name: name.into(),
            capacity,
        }
    }
}

/// Final occupants of one duty, by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DutyAssignment {
    pub name: String,
    pub capacity: u32,
    pub soldiers: Vec<String>,
}

/// Complete roster produced by a successful run, in duty input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub duties: Vec<DutyAssignment>,
}

impl Assignment {
    /// Occupant names of the named duty.
    pub fn soldiers_for(&self, duty: &str) -> Option<&[String]> {
        self.duties
            .iter()
            .find(|d| d.name == duty)
            .map(|d| d.soldiers.as_slice())
    }

    /// Duty the named soldier was assigned to.
    pub fn duty_of(&self, soldier: &str) -> Option<&str> {
        self.duties
            .iter()
            .find(|d| d.soldiers.iter().any(|s| s == soldier))
            .map(|d| d.name.as_str())
    }
}
