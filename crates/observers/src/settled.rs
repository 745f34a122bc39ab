use hover_core::Observer;

use crate::traits::{CanStopEarly, HasTrajectoryPoint};

/// An observer that stops a run once the altitude has settled.
///
/// The run is considered settled when `|position - target| <= tolerance` has
/// held for `hold` consecutive events. The settling time is the timestamp of
/// the first event in that streak; leaving the band resets the streak.
///
/// Pass `&mut Settled` to the simulation to read
/// [`settled_at`](Settled::settled_at) after the run.
///
/// # Example
///
/// ```
/// use hover_core::Config;
/// use hover_observers::Settled;
/// use hover_sim::{Simulation, Status};
///
/// let mut settled = Settled::new(6.0, 0.1, 20);
/// let solution = Simulation::new(Config::default()).run(&mut settled);
///
/// assert_eq!(solution.status, Status::StoppedByObserver);
/// assert!(settled.settled_at().is_some());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Settled {
    target: f64,
    tolerance: f64,
    hold: usize,
    streak: usize,
    streak_start: f64,
    settled_at: Option<f64>,
}

impl Settled {
    /// Creates a settling detector.
    ///
    /// A `hold` of zero is treated as one.
    #[must_use]
    pub fn new(target: f64, tolerance: f64, hold: usize) -> Self {
        Self {
            target,
            tolerance: tolerance.abs(),
            hold: hold.max(1),
            streak: 0,
            streak_start: 0.0,
            settled_at: None,
        }
    }

    /// Returns the settling time, if the run settled.
    #[must_use]
    pub fn settled_at(&self) -> Option<f64> {
        self.settled_at
    }

    fn record(&mut self, time: f64, position: f64) -> bool {
        if (position - self.target).abs() > self.tolerance {
            self.streak = 0;
            return false;
        }

        if self.streak == 0 {
            self.streak_start = time;
        }
        self.streak += 1;

        if self.streak >= self.hold {
            self.settled_at = Some(self.streak_start);
            return true;
        }
        false
    }
}

impl<E, A> Observer<E, A> for Settled
where
    E: HasTrajectoryPoint,
    A: CanStopEarly,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self.record(event.time(), event.position())
            .then(A::stop_early)
    }
}

/// Allows `&mut Settled` to be passed to a simulation that takes its observer
/// by value, so [`Settled::settled_at`] can be read after the run.
impl<E, A> Observer<E, A> for &mut Settled
where
    E: HasTrajectoryPoint,
    A: CanStopEarly,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        (*self).observe(event)
    }
}
