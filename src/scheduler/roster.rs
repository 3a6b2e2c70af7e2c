use std::collections::HashMap;

use crate::error::{Result, RosterError};
use crate::scheduler::duty::{Assignment, Duty, DutyAssignment, DutyId};
use crate::scheduler::soldier::{Soldier, SoldierId};

/// An available soldier able to perform the duty being filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub soldier: SoldierId,
    /// Position of the duty in the soldier's preferences.
    pub rank: usize,
}

/// Who sits where. Both directions are always updated together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Occupancy {
    occupants: Vec<Vec<SoldierId>>,
    homes: Vec<Option<DutyId>>,
}

impl Occupancy {
    fn empty(duties: usize, soldiers: usize) -> Self {
        Self {
            occupants: vec![Vec::new(); duties],
            homes: vec![None; soldiers],
        }
    }
}

/// Soldiers, duties and the occupancy relation between them.
///
/// Input order of both collections is preserved and drives every tie-break.
#[derive(Debug, Clone)]
pub struct Roster {
    duties: Vec<Duty>,
    soldiers: Vec<Soldier>,
    duty_index: HashMap<String, DutyId>,
    soldier_index: HashMap<String, SoldierId>,
    /// `ranks[soldier][duty]`, `None` when the soldier can not perform it.
    ranks: Vec<Vec<Option<usize>>>,
    occupancy: Occupancy,
}

impl Roster {
    /// Build a roster, rejecting malformed definitions before any run.
    pub fn new(duties: Vec<Duty>, soldiers: Vec<Soldier>) -> Result<Self> {
        let mut duty_index = HashMap::with_capacity(duties.len());
        for (index, duty) in duties.iter().enumerate() {
            if duty.capacity == 0 {
                return Err(RosterError::InvalidCapacity {
                    duty: duty.name.clone(),
                    capacity: duty.capacity,
                });
            }
            if duty_index.insert(duty.name.clone(), DutyId(index)).is_some() {
                return Err(RosterError::DuplicateDuty(duty.name.clone()));
            }
        }

        let mut soldier_index = HashMap::with_capacity(soldiers.len());
        let mut ranks = Vec::with_capacity(soldiers.len());
        for (index, soldier) in soldiers.iter().enumerate() {
            if soldier_index
                .insert(soldier.name.clone(), SoldierId(index))
                .is_some()
            {
                return Err(RosterError::DuplicateSoldier(soldier.name.clone()));
            }

            let mut row = vec![None; duties.len()];
            for (rank, pref) in soldier.preferences.iter().enumerate() {
                let duty = duty_index
                    .get(pref)
                    .ok_or_else(|| RosterError::UnknownDuty {
                        soldier: soldier.name.clone(),
                        duty: pref.clone(),
                    })?;
                // A repeated preference keeps its first rank.
                row[duty.0].get_or_insert(rank);
            }
            ranks.push(row);
        }

        let occupancy = Occupancy::empty(duties.len(), soldiers.len());
        Ok(Self {
            duties,
            soldiers,
            duty_index,
            soldier_index,
            ranks,
            occupancy,
        })
    }

    pub fn duties(&self) -> &[Duty] {
        &self.duties
    }

    pub fn soldiers(&self) -> &[Soldier] {
        &self.soldiers
    }

    pub fn duty(&self, id: DutyId) -> &Duty {
        &self.duties[id.0]
    }

    pub fn soldier(&self, id: SoldierId) -> &Soldier {
        &self.soldiers[id.0]
    }

    pub fn duty_id(&self, name: &str) -> Option<DutyId> {
        self.duty_index.get(name).copied()
    }

    pub fn soldier_id(&self, name: &str) -> Option<SoldierId> {
        self.soldier_index.get(name).copied()
    }

    pub fn duty_ids(&self) -> impl Iterator<Item = DutyId> {
        (0..self.duties.len()).map(DutyId)
    }

    pub fn soldier_ids(&self) -> impl Iterator<Item = SoldierId> {
        (0..self.soldiers.len()).map(SoldierId)
    }

    pub fn rank(&self, soldier: SoldierId, duty: DutyId) -> Option<usize> {
        self.ranks[soldier.0][duty.0]
    }

    pub fn can_perform(&self, soldier: SoldierId, duty: DutyId) -> bool {
        self.rank(soldier, duty).is_some()
    }

    /// Duty the soldier currently occupies.
    pub fn home(&self, soldier: SoldierId) -> Option<DutyId> {
        self.occupancy.homes[soldier.0]
    }

    pub fn is_available(&self, soldier: SoldierId) -> bool {
        self.home(soldier).is_none()
    }

    pub fn occupants(&self, duty: DutyId) -> &[SoldierId] {
        &self.occupancy.occupants[duty.0]
    }

    pub fn is_filled(&self, duty: DutyId) -> bool {
        self.remaining(duty) == 0
    }

    /// How many more soldiers the duty needs.
    pub fn remaining(&self, duty: DutyId) -> usize {
        (self.duty(duty).capacity as usize).saturating_sub(self.occupants(duty).len())
    }

    /// First duty in input order that is not yet filled.
    pub fn next_unfilled(&self) -> Option<DutyId> {
        self.duty_ids().find(|&d| !self.is_filled(d))
    }

    pub fn unfilled_count(&self) -> usize {
        self.duty_ids().filter(|&d| !self.is_filled(d)).count()
    }

    pub fn available_soldiers(&self) -> impl Iterator<Item = SoldierId> + '_ {
        self.soldier_ids().filter(|&s| self.is_available(s))
    }

    /// The soldier as an election candidate for `duty`, if eligible.
    pub fn candidate(&self, soldier: SoldierId, duty: DutyId) -> Option<Candidate> {
        if !self.is_available(soldier) {
            return None;
        }
        self.rank(soldier, duty)
            .map(|rank| Candidate { soldier, rank })
    }

    /// Available soldiers able to perform `duty`, in input order.
    pub fn candidates(&self, duty: DutyId) -> Vec<Candidate> {
        self.soldier_ids()
            .filter_map(|s| self.candidate(s, duty))
            .collect()
    }

    /// Seed an assignment before a run.
    pub fn place(&mut self, soldier: SoldierId, duty: DutyId) -> Result<()> {
        let soldier_name = &self.soldier(soldier).name;
        let duty_name = &self.duty(duty).name;
        if let Some(home) = self.home(soldier) {
            return Err(RosterError::Placement(format!(
                "{} already serves {}",
                soldier_name,
                self.duty(home).name
            )));
        }
        if !self.can_perform(soldier, duty) {
            return Err(RosterError::Placement(format!(
                "{} can not perform {}",
                soldier_name, duty_name
            )));
        }
        if self.is_filled(duty) {
            return Err(RosterError::Placement(format!("{} is already full", duty_name)));
        }
        self.assign(soldier, duty);
        Ok(())
    }

    /// [`Roster::place`] by name.
    pub fn place_by_name(&mut self, soldier: &str, duty: &str) -> Result<()> {
        let soldier_id = self
            .soldier_id(soldier)
            .ok_or_else(|| RosterError::UnknownSoldier(soldier.to_string()))?;
        let duty_id = self
            .duty_id(duty)
            .ok_or_else(|| RosterError::Placement(format!("unknown duty {}", duty)))?;
        self.place(soldier_id, duty_id)
    }

    /// Drop every assignment.
    pub fn clear(&mut self) {
        self.occupancy = Occupancy::empty(self.duties.len(), self.soldiers.len());
    }

    /// Put an available soldier on a duty with room left.
    pub(crate) fn assign(&mut self, soldier: SoldierId, duty: DutyId) {
        debug_assert!(self.is_available(soldier));
        debug_assert!(self.can_perform(soldier, duty));
        debug_assert!(!self.is_filled(duty));
        self.occupancy.occupants[duty.0].push(soldier);
        self.occupancy.homes[soldier.0] = Some(duty);
    }

    /// Take the soldier off its duty, keeping the order of the others.
    pub(crate) fn release(&mut self, soldier: SoldierId) {
        if let Some(home) = self.occupancy.homes[soldier.0].take() {
            self.occupancy.occupants[home.0].retain(|&s| s != soldier);
        }
    }

    /// Move the soldier from wherever it serves onto `duty`.
    pub(crate) fn relocate(&mut self, soldier: SoldierId, duty: DutyId) {
        self.release(soldier);
        self.assign(soldier, duty);
    }

    pub(crate) fn occupancy(&self) -> Occupancy {
        self.occupancy.clone()
    }

    pub(crate) fn restore(&mut self, occupancy: Occupancy) {
        self.occupancy = occupancy;
    }

    /// Current occupants of every duty, by name.
    pub fn assignment(&self) -> Assignment {
        let duties = self
            .duty_ids()
            .map(|d| DutyAssignment {
                name: self.duty(d).name.clone(),
                capacity: self.duty(d).capacity,
                soldiers: self
                    .occupants(d)
                    .iter()
                    .map(|&s| self.soldier(s).name.clone())
                    .collect(),
            })
            .collect();
        Assignment { duties }
    }

    /// Describe every broken capability, capacity or single-home invariant.
    pub fn invariant_violations(&self) -> Vec<String> {
        let mut violations = Vec::new();
        let mut seen: Vec<Option<DutyId>> = vec![None; self.soldiers.len()];

        for duty in self.duty_ids() {
            let name = &self.duty(duty).name;
            let occupants = self.occupants(duty);
            if occupants.len() > self.duty(duty).capacity as usize {
                violations.push(format!(
                    "{} holds {} soldiers, capacity {}",
                    name,
                    occupants.len(),
                    self.duty(duty).capacity
                ));
            }
            for &soldier in occupants {
                let soldier_name = &self.soldier(soldier).name;
                if !self.can_perform(soldier, duty) {
                    violations.push(format!("{} can not perform {}", soldier_name, name));
                }
                if let Some(other) = seen[soldier.0].replace(duty) {
                    violations.push(format!(
                        "{} serves both {} and {}",
                        soldier_name,
                        self.duty(other).name,
                        name
                    ));
                }
            }
        }

        for soldier in self.soldier_ids() {
            if seen[soldier.0] != self.home(soldier) {
                violations.push(format!(
                    "{} is listed on {:?} but recorded on {:?}",
                    self.soldier(soldier).name,
                    seen[soldier.0],
                    self.home(soldier)
                ));
            }
        }
        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Roster {
        Roster::new(
            vec![Duty::new("1", 1), Duty::new("2", 2)],
            vec![
                Soldier::new("Loukas", ["1"]),
                Soldier::new("Chara", ["2", "1"]),
                Soldier::new("Sofia", ["2"]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn rejects_duplicate_duty() {
        let err = Roster::new(vec![Duty::new("1", 1), Duty::new("1", 2)], vec![]).unwrap_err();
        assert!(matches!(err, RosterError::DuplicateDuty(name) if name == "1"));
    }

    #[test]
    fn rejects_duplicate_soldier() {
        let err = Roster::new(
            vec![Duty::new("1", 2)],
            vec![Soldier::new("A", ["1"]), Soldier::new("A", ["1"])],
        )
        .unwrap_err();
        assert!(matches!(err, RosterError::DuplicateSoldier(name) if name == "A"));
    }

    #[test]
    fn rejects_zero_capacity() {
        let err = Roster::new(vec![Duty::new("1", 0)], vec![]).unwrap_err();
        assert!(matches!(err, RosterError::InvalidCapacity { capacity: 0, .. }));
    }

    #[test]
    fn rejects_unknown_preference() {
        let err = Roster::new(vec![Duty::new("1", 1)], vec![Soldier::new("A", ["1", "9"])])
            .unwrap_err();
        assert!(
            matches!(err, RosterError::UnknownDuty { soldier, duty } if soldier == "A" && duty == "9")
        );
    }

    #[test]
    fn ranks_follow_preferences() {
        let roster = roster();
        let chara = roster.soldier_id("Chara").unwrap();
        assert_eq!(roster.rank(chara, roster.duty_id("2").unwrap()), Some(0));
        assert_eq!(roster.rank(chara, roster.duty_id("1").unwrap()), Some(1));
        let sofia = roster.soldier_id("Sofia").unwrap();
        assert!(!roster.can_perform(sofia, roster.duty_id("1").unwrap()));
    }

    #[test]
    fn candidates_are_available_and_capable_in_input_order() {
        let mut roster = roster();
        let two = roster.duty_id("2").unwrap();
        let ids: Vec<_> = roster.candidates(two).iter().map(|c| c.soldier).collect();
        assert_eq!(
            ids,
            vec![
                roster.soldier_id("Chara").unwrap(),
                roster.soldier_id("Sofia").unwrap()
            ]
        );

        roster.place_by_name("Chara", "2").unwrap();
        let ids: Vec<_> = roster.candidates(two).iter().map(|c| c.soldier).collect();
        assert_eq!(ids, vec![roster.soldier_id("Sofia").unwrap()]);
    }

    #[test]
    fn place_enforces_invariants() {
        let mut roster = roster();
        roster.place_by_name("Loukas", "1").unwrap();

        // Already serving.
        assert!(matches!(
            roster.place_by_name("Loukas", "1"),
            Err(RosterError::Placement(_))
        ));
        // Incapable.
        assert!(matches!(
            roster.place_by_name("Sofia", "1"),
            Err(RosterError::Placement(_))
        ));
        // Full.
        assert!(matches!(
            roster.place_by_name("Chara", "1"),
            Err(RosterError::Placement(_))
        ));
        assert!(matches!(
            roster.place_by_name("Nobody", "1"),
            Err(RosterError::UnknownSoldier(_))
        ));
        assert!(matches!(
            roster.place_by_name("Chara", "9"),
            Err(RosterError::Placement(msg)) if msg == "unknown duty 9"
        ));
        assert!(roster.invariant_violations().is_empty());
    }

    #[test]
    fn clear_drops_partial_placements() {
        let mut roster = roster();
        roster.place_by_name("Loukas", "1").unwrap();
        roster.place_by_name("Sofia", "2").unwrap();

        roster.clear();
        assert_eq!(roster.available_soldiers().count(), 3);
        assert!(roster.duty_ids().all(|d| roster.occupants(d).is_empty()));
        assert_eq!(roster.unfilled_count(), 2);
        assert!(roster.invariant_violations().is_empty());

        roster.place_by_name("Loukas", "1").unwrap();
        assert!(roster.is_filled(roster.duty_id("1").unwrap()));
    }

    #[test]
    fn fill_tracking() {
        let mut roster = roster();
        let one = roster.duty_id("1").unwrap();
        let two = roster.duty_id("2").unwrap();
        assert_eq!(roster.next_unfilled(), Some(one));
        assert_eq!(roster.unfilled_count(), 2);

        roster.place_by_name("Loukas", "1").unwrap();
        assert!(roster.is_filled(one));
        assert_eq!(roster.next_unfilled(), Some(two));
        assert_eq!(roster.remaining(two), 2);

        roster.place_by_name("Sofia", "2").unwrap();
        assert_eq!(roster.remaining(two), 1);
        roster.place_by_name("Chara", "2").unwrap();
        assert_eq!(roster.next_unfilled(), None);
        assert_eq!(roster.available_soldiers().count(), 0);
    }

    #[test]
    fn relocate_moves_between_duties() {
        let mut roster = roster();
        let one = roster.duty_id("1").unwrap();
        let two = roster.duty_id("2").unwrap();
        let chara = roster.soldier_id("Chara").unwrap();

        roster.place(chara, one).unwrap();
        roster.relocate(chara, two);
        assert_eq!(roster.home(chara), Some(two));
        assert!(roster.occupants(one).is_empty());
        assert_eq!(roster.occupants(two), &[chara]);

        roster.release(chara);
        assert!(roster.is_available(chara));
        assert!(roster.invariant_violations().is_empty());
    }

    #[test]
    fn restore_rewinds_occupancy() {
        let mut roster = roster();
        let before = roster.occupancy();
        roster.place_by_name("Loukas", "1").unwrap();
        roster.restore(before);
        assert_eq!(roster.available_soldiers().count(), 3);
        assert!(roster.assignment().duties.iter().all(|d| d.soldiers.is_empty()));
    }

    #[test]
    fn assignment_lists_names_in_duty_order() {
        let mut roster = roster();
        roster.place_by_name("Loukas", "1").unwrap();
        roster.place_by_name("Sofia", "2").unwrap();
        let assignment = roster.assignment();
        assert_eq!(assignment.duties[0].name, "1");
        assert_eq!(assignment.soldiers_for("1").unwrap(), ["Loukas".to_string()]);
        assert_eq!(assignment.soldiers_for("2").unwrap(), ["Sofia".to_string()]);
        assert_eq!(assignment.duty_of("Sofia"), Some("2"));
        assert_eq!(assignment.duty_of("Chara"), None);
    }
}
