//! Capability traits for observers.
//!
//! These traits abstract over event and action types so that observers can be
//! written once and reused with anything that carries a trajectory sample.
//!
//! # Example
//!
//! ```rust
//! use hover_core::Observer;
//! use hover_observers::traits::{CanStopEarly, HasTrajectoryPoint};
//!
//! /// Stops the run as soon as the rocket climbs past a ceiling.
//! struct Ceiling(f64);
//!
//! impl<E: HasTrajectoryPoint, A: CanStopEarly> Observer<E, A> for Ceiling {
//!     fn observe(&mut self, event: &E) -> Option<A> {
//!         (event.position() > self.0).then(A::stop_early)
//!     }
//! }
//! ```

use hover_sim::{Action, Event, StepRecord};

/// An event that carries a `(time, position)` sample.
pub trait HasTrajectoryPoint {
    /// Returns the elapsed simulated time (s).
    fn time(&self) -> f64;

    /// Returns the altitude (m).
    fn position(&self) -> f64;
}

/// An action type that can signal early termination.
pub trait CanStopEarly {
    /// Returns the action that stops the run early.
    fn stop_early() -> Self;
}

impl HasTrajectoryPoint for StepRecord {
    fn time(&self) -> f64 {
        self.time
    }

    fn position(&self) -> f64 {
        self.position
    }
}

impl HasTrajectoryPoint for Event {
    fn time(&self) -> f64 {
        self.record.time
    }

    fn position(&self) -> f64 {
        self.record.position
    }
}

impl CanStopEarly for Action {
    fn stop_early() -> Self {
        Self::StopEarly
    }
}
