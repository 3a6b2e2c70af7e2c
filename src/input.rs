//! The exchange document: `{ "duties": [...], "soldiers": [...] }`.
//!
//! Both lists are order-sensitive; the scheduler fills duties and breaks ties
//! between soldiers in the order they appear here.

use std::fs;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::scheduler::{Duty, Roster, Soldier};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterInput {
    #[serde(default)]
    pub duties: Vec<Duty>,
    #[serde(default)]
    pub soldiers: Vec<Soldier>,
}

impl RosterInput {
    pub fn new(duties: Vec<Duty>, soldiers: Vec<Soldier>) -> Self {
        Self { duties, soldiers }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let file = fs::File::open(path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_path(&self, path: &Path) -> Result<()> {
        let mut writer = BufWriter::new(fs::File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Total headcount over all duties.
    pub fn total_capacity(&self) -> u64 {
        self.duties.iter().map(|d| u64::from(d.capacity)).sum()
    }

    /// Check names, capacities and preferences without consuming the document.
    pub fn validate(&self) -> Result<()> {
        Roster::new(self.duties.clone(), self.soldiers.clone()).map(|_| ())
    }

    pub fn into_roster(self) -> Result<Roster> {
        Roster::new(self.duties, self.soldiers)
    }
}
