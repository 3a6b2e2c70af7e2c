//! Random roster documents for trying the scheduler out and for stress tests.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::input::RosterInput;
use crate::scheduler::{Duty, Soldier};

/// Largest capacity given to a generated duty.
pub const MAX_GENERATED_CAPACITY: usize = 9;

/// Build a document with `soldier_count` soldiers and exactly as many seats.
///
/// Duties are named `"1"`, `"2"`, ... with random capacities; every soldier
/// ranks every duty in a random order.
pub fn generate<R: Rng + ?Sized>(soldier_count: usize, rng: &mut R) -> RosterInput {
    let mut duties = Vec::new();
    let mut covered = 0;
    while covered < soldier_count {
        let capacity = rng
            .gen_range(1..=MAX_GENERATED_CAPACITY)
            .min(soldier_count - covered);
        covered += capacity;
        duties.push(Duty::new((duties.len() + 1).to_string(), capacity as u32));
    }

    let names: Vec<String> = duties.iter().map(|d| d.name.clone()).collect();
    let soldiers = (0..soldier_count)
        .map(|i| {
            let mut preferences = names.clone();
            preferences.shuffle(rng);
            Soldier::new(format!("Soldier{}", i), preferences).with_join_order(i as u32)
        })
        .collect();

    RosterInput::new(duties, soldiers)
}

/// Restrict some soldiers to a single duty.
///
/// A random subset of duties each gets between one and `capacity` soldiers
/// who can perform nothing else. Nobody is restricted twice, so a document
/// from [`generate`] stays feasible. Duties without seats are skipped.
pub fn prune_preferences<R: Rng + ?Sized>(input: &mut RosterInput, rng: &mut R) {
    if input.duties.is_empty() {
        return;
    }
    let pruned = rng.gen_range(0..input.duties.len());

    let mut duties: Vec<&Duty> = input.duties.iter().filter(|d| d.capacity > 0).collect();
    duties.shuffle(rng);
    let mut order: Vec<usize> = (0..input.soldiers.len()).collect();
    order.shuffle(rng);
    let mut victims = order.into_iter();

    for duty in duties.into_iter().take(pruned) {
        let count = rng.gen_range(1..=duty.capacity);
        for _ in 0..count {
            let Some(index) = victims.next() else {
                return;
            };
            input.soldiers[index].preferences = vec![duty.name.clone()];
        }
    }
}
