use crate::config::SchedulerConfig;
use crate::error::Result;
use crate::input::RosterInput;
use crate::scheduler::duty::{Assignment, DutyId};
use crate::scheduler::elector::WeightedElector;
use crate::scheduler::healer;
use crate::scheduler::random::RandomSource;
use crate::scheduler::roster::Roster;
use crate::scheduler::soldier::SoldierId;

/// Where the run loop currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Filling(DutyId),
    Done,
    Failed(DutyId),
}

impl std::fmt::Display for RunState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunState::Idle => write!(f, "idle"),
            RunState::Filling(duty) => write!(f, "filling {}", duty),
            RunState::Done => write!(f, "done"),
            RunState::Failed(duty) => write!(f, "failed at {}", duty),
        }
    }
}

/// Fills duties one at a time, in input order.
///
/// Each duty takes its eligible soldiers directly when there are exactly
/// enough, holds a weighted election when there are more, and heals the
/// roster once per missing seat when there are fewer.
#[derive(Debug, Clone)]
pub struct Scheduler {
    roster: Roster,
    elector: WeightedElector,
    state: RunState,
}

impl Scheduler {
    pub fn new(roster: Roster, config: &SchedulerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            roster,
            elector: WeightedElector::new(config.randomness),
            state: RunState::Idle,
        })
    }

    /// Validate the document and build a scheduler over it.
    pub fn from_input(input: RosterInput, config: &SchedulerConfig) -> Result<Self> {
        Self::new(input.into_roster()?, config)
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Mutable access for seeding assignments before a run.
    pub fn roster_mut(&mut self) -> &mut Roster {
        &mut self.roster
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// The duty being filled: the first unfilled one in input order.
    pub fn next_duty(&self) -> Option<DutyId> {
        self.roster.next_unfilled()
    }

    /// Free one more soldier for the next duty.
    ///
    /// Returns `Ok(None)` when every duty is already filled.
    pub fn heal(&mut self) -> Result<Option<SoldierId>> {
        let Some(duty) = self.next_duty() else {
            return Ok(None);
        };
        healer::heal(&mut self.roster, duty).map(|freed| Some(freed.soldier))
    }

    /// Fill the next duty to capacity.
    ///
    /// Returns the duty filled, or `Ok(None)` when nothing is left. On
    /// failure the roster keeps whatever earlier heals in this step applied;
    /// [`Scheduler::run`] rolls those back.
    pub fn fill_next_duty<R: RandomSource + ?Sized>(
        &mut self,
        source: &mut R,
    ) -> Result<Option<DutyId>> {
        let Some(duty) = self.next_duty() else {
            return Ok(None);
        };
        self.state = RunState::Filling(duty);

        let need = self.roster.remaining(duty);
        let mut pool = self.roster.candidates(duty);
        let direct = pool.len();

        while pool.len() < need {
            match healer::heal(&mut self.roster, duty) {
                Ok(freed) => pool.push(freed),
                Err(e) => {
                    self.state = RunState::Failed(duty);
                    tracing::warn!(
                        duty = %self.roster.duty(duty).name,
                        need,
                        found = pool.len(),
                        "Duty can not be filled"
                    );
                    return Err(e);
                }
            }
        }

        let elected: Vec<SoldierId> = if pool.len() == need {
            pool.into_iter().map(|c| c.soldier).collect()
        } else {
            self.elector.elect(pool, need, source)
        };
        for soldier in elected {
            self.roster.assign(soldier, duty);
        }

        tracing::debug!(
            duty = %self.roster.duty(duty).name,
            need,
            eligible = direct,
            healed = need.saturating_sub(direct),
            "Duty filled"
        );
        Ok(Some(duty))
    }

    /// Fill every duty that is unfilled at the start of the run.
    ///
    /// On success the complete assignment is returned. On failure the roster
    /// is restored to its state before the run and the state is
    /// [`RunState::Failed`].
    pub fn run<R: RandomSource + ?Sized>(&mut self, source: &mut R) -> Result<Assignment> {
        let snapshot = self.roster.occupancy();
        let pending = self.roster.unfilled_count();
        tracing::info!(
            duties = self.roster.duties().len(),
            soldiers = self.roster.soldiers().len(),
            pending,
            "Scheduling run started"
        );

        for _ in 0..pending {
            if let Err(e) = self.fill_next_duty(source) {
                self.roster.restore(snapshot);
                return Err(e);
            }
        }

        self.state = RunState::Done;
        tracing::info!("Scheduling run finished");
        Ok(self.roster.assignment())
    }

    /// [`Scheduler::run`] with the source described by `config`.
    pub fn run_with(&mut self, config: &SchedulerConfig) -> Result<Assignment> {
        let mut source = config.random_source();
        self.run(&mut source)
    }
}

/// Convenience for one-shot scheduling of a document.
pub fn schedule(input: RosterInput, config: &SchedulerConfig) -> Result<Assignment> {
    let mut scheduler = Scheduler::from_input(input, config)?;
    scheduler.run_with(config)
}
