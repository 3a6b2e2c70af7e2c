//! Augmenting-path repair for duties that run out of eligible soldiers.
//!
//! When the duty being filled has fewer available, capable soldiers than it
//! needs, an available soldier who can *not* perform it (the root) takes the
//! seat of someone already assigned, who takes the seat of someone else, and
//! so on until a soldier able to perform the target duty is pushed out. The
//! chain is found by breadth-first search over filled duties, so it is the
//! shortest one for its root.
//!
//! ```text
//! root ──► duty₁ (soldier₁) ──► duty₂ (soldier₂) ──► … ──► dutyₙ (soldierₙ)
//!            root takes          soldier₁ takes              soldierₙ is freed
//! ```
//!
//! Every duty on the chain keeps its headcount; the root becomes assigned and
//! soldierₙ becomes available for the target duty.

use std::collections::VecDeque;

use crate::error::{Result, RosterError};
use crate::scheduler::duty::DutyId;
use crate::scheduler::roster::{Candidate, Roster};
use crate::scheduler::soldier::SoldierId;

/// One link of an augmenting path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub soldier: SoldierId,
    /// Duty the soldier currently occupies and was reached through.
    /// `None` only for the root.
    pub via: Option<DutyId>,
}

/// A chain from an available root to a soldier able to perform the target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AugmentingPath {
    steps: Vec<Step>,
    /// Rank of the target duty for the freed soldier.
    rank: usize,
}

impl AugmentingPath {
    /// Root first, freed soldier last.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn root(&self) -> SoldierId {
        self.steps[0].soldier
    }

    /// The soldier released for the target duty.
    pub fn freed(&self) -> Candidate {
        Candidate {
            soldier: self.steps[self.steps.len() - 1].soldier,
            rank: self.rank,
        }
    }

    /// Number of duties the chain passes through.
    pub fn swaps(&self) -> usize {
        self.steps.len() - 1
    }
}

struct Node {
    step: Step,
    parent: Option<usize>,
}

/// Shortest chain from `root` ending in a soldier able to perform `target`.
///
/// Only filled duties are traversed, each at most once, in input order; their
/// occupants are queued in occupant order.
pub fn find_path(roster: &Roster, target: DutyId, root: SoldierId) -> Option<AugmentingPath> {
    debug_assert!(roster.is_available(root));

    let mut visited = vec![false; roster.duties().len()];
    let mut nodes = vec![Node {
        step: Step {
            soldier: root,
            via: None,
        },
        parent: None,
    }];
    let mut queue = VecDeque::from([0usize]);

    while let Some(current) = queue.pop_front() {
        let soldier = nodes[current].step.soldier;
        if let Some(rank) = roster.rank(soldier, target) {
            return Some(AugmentingPath {
                steps: trace_back(&nodes, current),
                rank,
            });
        }

        for duty in roster.duty_ids() {
            if visited[duty.index()]
                || !roster.is_filled(duty)
                || !roster.can_perform(soldier, duty)
            {
                continue;
            }
            visited[duty.index()] = true;
            for &occupant in roster.occupants(duty) {
                nodes.push(Node {
                    step: Step {
                        soldier: occupant,
                        via: Some(duty),
                    },
                    parent: Some(current),
                });
                queue.push_back(nodes.len() - 1);
            }
        }
    }
    None
}

fn trace_back(nodes: &[Node], tail: usize) -> Vec<Step> {
    let mut steps = Vec::new();
    let mut cursor = Some(tail);
    while let Some(index) = cursor {
        steps.push(nodes[index].step);
        cursor = nodes[index].parent;
    }
    steps.reverse();
    steps
}

/// Shift every soldier on the path one seat toward the tail.
///
/// Walks from the tail back to the root so that each move lands on a seat
/// that was just vacated; no duty ever exceeds its capacity and no soldier is
/// ever listed twice.
pub fn apply(roster: &mut Roster, path: &AugmentingPath) -> Candidate {
    let freed = path.freed();
    roster.release(freed.soldier);
    for pair in path.steps.windows(2).rev() {
        let (previous, step) = (pair[0], pair[1]);
        if let Some(duty) = step.via {
            roster.relocate(previous.soldier, duty);
        }
    }
    freed
}

/// Free one more soldier able to perform `target`.
///
/// Available soldiers who can not perform `target` are tried as roots in
/// input order; the first root with a path wins.
pub fn heal(roster: &mut Roster, target: DutyId) -> Result<Candidate> {
    let roots: Vec<SoldierId> = roster
        .available_soldiers()
        .filter(|&s| !roster.can_perform(s, target))
        .collect();

    for root in roots {
        let Some(path) = find_path(roster, target, root) else {
            continue;
        };
        tracing::debug!(
            duty = %roster.duty(target).name,
            root = %roster.soldier(root).name,
            freed = %roster.soldier(path.freed().soldier).name,
            swaps = path.swaps(),
            "Augmenting path found"
        );
        return Ok(apply(roster, &path));
    }

    Err(RosterError::SchedulingInfeasible {
        duty: roster.duty(target).name.clone(),
    })
}
