use crate::config::{MAX_RANDOMNESS, MIN_RANDOMNESS};
use crate::scheduler::random::RandomSource;
use crate::scheduler::roster::Candidate;
use crate::scheduler::soldier::SoldierId;

/// Picks soldiers for a duty, favoring those who rank it higher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeightedElector {
    exponent: i32,
}

impl WeightedElector {
    /// `randomness` is expected in `[1, 4]`; see [`SchedulerConfig`](crate::config::SchedulerConfig).
    pub fn new(randomness: u8) -> Self {
        debug_assert!(
            (MIN_RANDOMNESS..=MAX_RANDOMNESS).contains(&randomness),
            "randomness {} out of range",
            randomness
        );
        Self {
            exponent: 5 - i32::from(randomness),
        }
    }

    /// `1 / (rank^(5 - randomness) + 1)`
    pub fn weight(&self, rank: usize) -> f64 {
        1.0 / ((rank as f64).powi(self.exponent) + 1.0)
    }

    /// Index of one candidate, drawn by inverse CDF over the weights.
    ///
    /// Consumes exactly one draw. The winner is the first candidate whose
    /// running weight sum strictly exceeds `draw * total`.
    pub fn pick<R: RandomSource + ?Sized>(&self, candidates: &[Candidate], source: &mut R) -> usize {
        let mut sum = 0.0;
        let cumulative: Vec<f64> = candidates
            .iter()
            .map(|c| {
                sum += self.weight(c.rank);
                sum
            })
            .collect();

        let draw = source.next_unit() * sum;
        cumulative
            .iter()
            .position(|&s| draw < s)
            .unwrap_or(candidates.len().saturating_sub(1))
    }

    /// Choose `count` distinct candidates without replacement.
    ///
    /// When there are no more candidates than seats, all of them are taken and
    /// no randomness is consumed.
    pub fn elect<R: RandomSource + ?Sized>(
        &self,
        mut candidates: Vec<Candidate>,
        count: usize,
        source: &mut R,
    ) -> Vec<SoldierId> {
        if candidates.len() <= count {
            return candidates.into_iter().map(|c| c.soldier).collect();
        }

        let mut elected = Vec::with_capacity(count);
        while elected.len() < count {
            let index = self.pick(&candidates, source);
            elected.push(candidates.remove(index).soldier);
        }
        elected
    }
}
