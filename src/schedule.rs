//! Cooperative periodic task scheduling.
//!
//! Provides [`TaskSchedule`], the per-task due-tick bookkeeping, and
//! [`Scheduler`], an ordered, fixed-capacity set of periodic jobs sharing a
//! context. Nothing here blocks: polling a task that is not due is a single
//! comparison.
//!
//! Deadlines advance additively (`next_due += period`) rather than being reset
//! to `now + period`. A late poll therefore never shifts a task's phase; the
//! task fires once per poll until it has caught up with the tick counter.

use crate::time::{Tick, has_reached};
use heapless::Vec;

/// Due-tick bookkeeping for one periodic task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TaskSchedule {
    period: Tick,
    next_due: Tick,
}

impl TaskSchedule {
    /// Creates a schedule whose first fire is due at tick 0.
    pub const fn new(period: Tick) -> Self {
        Self::starting_at(period, 0)
    }

    /// Creates a schedule whose first fire is due at `first_due`.
    pub const fn starting_at(period: Tick, first_due: Tick) -> Self {
        Self {
            period,
            next_due: first_due,
        }
    }

    #[inline]
    pub fn period(&self) -> Tick {
        self.period
    }

    #[inline]
    pub fn next_due(&self) -> Tick {
        self.next_due
    }

    /// Returns true if the task should fire at `now`.
    #[inline]
    pub fn is_due(&self, now: Tick) -> bool {
        has_reached(now, self.next_due)
    }

    /// Fires if due, advancing by the registered period.
    ///
    /// Returns whether the task fired.
    #[inline]
    pub fn poll(&mut self, now: Tick) -> bool {
        self.poll_with(now, self.period)
    }

    /// Fires if due, advancing by `period` for this fire only.
    pub fn poll_with(&mut self, now: Tick, period: Tick) -> bool {
        if !self.is_due(now) {
            return false;
        }
        self.next_due = self.next_due.wrapping_add(period);
        true
    }
}

/// How far a job's deadline moves after it ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NextDue {
    /// Advance by the period the task was registered with.
    Period,
    /// Advance by this many ticks for this fire only.
    After(Tick),
}

/// Job run when a task fires.
pub type TaskFn<C> = fn(&mut C) -> NextDue;

/// A registered job with its schedule.
pub struct ScheduledTask<C> {
    name: &'static str,
    schedule: TaskSchedule,
    job: TaskFn<C>,
}

impl<C> ScheduledTask<C> {
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn schedule(&self) -> &TaskSchedule {
        &self.schedule
    }
}

/// Errors that can occur while registering tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SchedulerError {
    /// The scheduler already holds its maximum number of tasks.
    Full,

    /// A task was registered with a zero period.
    ZeroPeriod {
        /// Name of the offending task.
        task: &'static str,
    },
}

impl core::fmt::Display for SchedulerError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SchedulerError::Full => write!(f, "scheduler is full, cannot add more tasks"),
            SchedulerError::ZeroPeriod { task } => {
                write!(f, "task '{}' has a zero period", task)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SchedulerError {}

/// Ordered set of periodic jobs sharing a context of type `C`.
///
/// Jobs run in registration order on every [`run_pending`] call, so a job sees
/// context changes made earlier in the same pass by jobs registered before it.
///
/// # Type Parameters
/// * `C` - Context passed mutably to every job
/// * `N` - Maximum number of tasks
///
/// [`run_pending`]: Scheduler::run_pending
pub struct Scheduler<C, const N: usize> {
    tasks: Vec<ScheduledTask<C>, N>,
}

impl<C, const N: usize> Default for Scheduler<C, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C, const N: usize> Scheduler<C, N> {
    pub const fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    /// Registers a job due first at `first_due`, then every `period` ticks.
    pub fn add(
        &mut self,
        name: &'static str,
        period: Tick,
        first_due: Tick,
        job: TaskFn<C>,
    ) -> Result<(), SchedulerError> {
        if period == 0 {
            return Err(SchedulerError::ZeroPeriod { task: name });
        }

        self.tasks
            .push(ScheduledTask {
                name,
                schedule: TaskSchedule::starting_at(period, first_due),
                job,
            })
            .map_err(|_| SchedulerError::Full)?;

        debug!("task '{}' every {} ticks", name, period);
        Ok(())
    }

    /// Polls every task once, in registration order.
    ///
    /// Returns how many tasks fired.
    pub fn run_pending(&mut self, now: Tick, ctx: &mut C) -> usize {
        let mut fired = 0;

        for task in self.tasks.iter_mut() {
            if !task.schedule.is_due(now) {
                continue;
            }

            let period = match (task.job)(ctx) {
                NextDue::Period => task.schedule.period,
                NextDue::After(ticks) => ticks,
            };
            task.schedule.poll_with(now, period);
            fired += 1;

            if task.schedule.is_due(now) {
                trace!("task '{}' behind schedule", task.name);
            }
        }

        fired
    }

    /// Looks up a task by name.
    pub fn task(&self, name: &str) -> Option<&ScheduledTask<C>> {
        self.tasks.iter().find(|t| t.name == name)
    }

    /// Registered tasks in run order.
    pub fn tasks(&self) -> &[ScheduledTask<C>] {
        &self.tasks
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
