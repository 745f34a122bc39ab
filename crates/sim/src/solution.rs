use crate::{StepRecord, Trajectory};

/// Indicates how the simulation terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Completed the full fixed horizon.
    Complete,

    /// Stopped early due to an observer action.
    StoppedByObserver,
}

/// The result of an observed simulation run.
#[derive(Debug, Clone)]
pub struct Solution {
    /// How the simulation terminated.
    pub status: Status,

    /// One record per completed step, in order.
    pub history: Vec<StepRecord>,

    /// Number of steps completed.
    pub steps: usize,
}

impl Solution {
    /// Returns the `(time, position)` record of the run.
    #[must_use]
    pub fn trajectory(&self) -> Trajectory {
        self.history.iter().map(StepRecord::point).collect()
    }
}
