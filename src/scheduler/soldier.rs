use serde::{Deserialize, Serialize};

/// Stable index of a soldier within a [`Roster`](crate::scheduler::Roster).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SoldierId(pub(crate) usize);

impl SoldierId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for SoldierId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "soldier#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Soldier {
    pub name: String,
    /// Duty names, most preferred first. Unlisted duties can not be performed.
    #[serde(alias = "orderedPrefs")]
    pub preferences: Vec<String>,
    /// When the soldier joined. Carried for callers, ignored by the election.
    #[serde(default, alias = "seira")]
    pub join_order: u32,
}

impl Soldier {
    pub fn new<I, S>(name: impl Into<String>, preferences: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            preferences: preferences.into_iter().map(Into::into).collect(),
            join_order: 0,
        }
    }

    pub fn with_join_order(mut self, join_order: u32) -> Self {
        self.join_order = join_order;
        self
    }

    /// Position of `duty` in the preference list, `0` being the favorite.
    pub fn rank_of(&self, duty: &str) -> Option<usize> {
        self.preferences.iter().position(|p| p == duty)
    }

    pub fn can_perform(&self, duty: &str) -> bool {
        self.rank_of(duty).is_some()
    }
}
