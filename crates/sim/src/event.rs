use crate::StepRecord;

/// Event emitted by the simulation after each step.
///
/// Steps are numbered from 1; there is no event for the initial state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Event {
    /// The step number (1..=N).
    pub step: usize,

    /// Everything computed during this step.
    pub record: StepRecord,
}
