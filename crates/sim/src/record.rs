use hover_components::PidTerms;

use crate::TrajectoryPoint;

/// The result of a single simulation step.
///
/// Plant values are read after the position update, so `position` is the
/// altitude at `time`. `thrust` is the saturated command that produced them
/// and `terms` holds the controller contributions behind it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepRecord {
    pub step: usize,
    pub time: f64,
    pub position: f64,
    pub velocity: f64,
    pub acceleration: f64,
    pub thrust: f64,
    pub terms: PidTerms,
}

impl StepRecord {
    /// Returns the `(time, position)` pair for this step.
    #[must_use]
    pub fn point(&self) -> TrajectoryPoint {
        TrajectoryPoint {
            time: self.time,
            position: self.position,
        }
    }
}
