/// Control actions an observer can return to a running simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop the simulation early and return the history so far.
    StopEarly,
}
