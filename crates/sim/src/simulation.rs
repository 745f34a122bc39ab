use hover_components::{PidController, Plant};
use hover_core::{Config, ConfigError, Observer, Params};

use crate::{Action, Event, Solution, Status, Steps, Trajectory};

/// A closed-loop hover run over a fixed horizon.
///
/// A `Simulation` is built from a validated [`Config`] and owns its plant and
/// controller exclusively. Running it consumes it: a completed run cannot be
/// resumed or replayed. To run again, build a new simulation from the same
/// config, which reproduces the run bit for bit.
///
/// Three ways to drive it:
///
/// - [`cycle`](Simulation::cycle) - run every step and return the trajectory.
/// - [`run`](Simulation::run) - run with an [`Observer`] that sees each step
///   and may stop the run early.
/// - [`steps`](Simulation::steps) - pull steps one at a time from an iterator.
#[derive(Debug, Clone)]
pub struct Simulation {
    config: Config,
    plant: Plant,
    controller: PidController,
}

impl Simulation {
    /// Creates a simulation with a plant and controller at their initial state.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            plant: Plant::new(&config),
            controller: PidController::new(&config),
            config,
        }
    }

    /// Validates the parameters and creates a simulation.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the parameters are invalid.
    pub fn from_params(params: Params) -> Result<Self, ConfigError> {
        Config::new(params).map(Self::new)
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub fn plant(&self) -> &Plant {
        &self.plant
    }

    #[must_use]
    pub fn controller(&self) -> &PidController {
        &self.controller
    }

    /// Returns the number of steps a full run takes.
    #[must_use]
    pub fn step_count(&self) -> usize {
        self.config.step_count()
    }

    /// Turns the simulation into a lazy sequence of steps.
    #[must_use]
    pub fn steps(self) -> Steps {
        Steps::new(self.config, self.plant, self.controller)
    }

    /// Runs every step and returns the `(time, position)` record.
    ///
    /// There is no early exit: the run always covers the full horizon.
    #[must_use]
    pub fn cycle(self) -> Trajectory {
        let total = self.step_count();
        tracing::debug!(steps = total, dt = self.config.dt(), "starting simulation");

        let mut trajectory = Trajectory::with_capacity(total);
        trajectory.extend(self.steps().map(|record| record.point()));

        tracing::debug!(
            steps = trajectory.len(),
            final_position = trajectory.final_position(),
            "simulation complete"
        );
        trajectory
    }

    /// Runs the simulation, emitting an [`Event`] to the observer after each step.
    ///
    /// The observer may return [`Action::StopEarly`] to end the run after the
    /// current step. Pass `()` to observe nothing.
    pub fn run<Obs>(self, mut observer: Obs) -> Solution
    where
        Obs: Observer<Event, Action>,
    {
        let total = self.step_count();
        tracing::debug!(steps = total, dt = self.config.dt(), "starting simulation");

        let mut history = Vec::with_capacity(total);

        for record in self.steps() {
            history.push(record);

            let event = Event {
                step: record.step,
                record,
            };

            if let Some(Action::StopEarly) = observer.observe(&event) {
                tracing::debug!(
                    step = record.step,
                    position = record.position,
                    "simulation stopped by observer"
                );
                return Solution {
                    status: Status::StoppedByObserver,
                    history,
                    steps: record.step,
                };
            }
        }

        tracing::debug!(
            steps = total,
            final_position = history.last().map(|record| record.position),
            "simulation complete"
        );
        Solution {
            status: Status::Complete,
            history,
            steps: total,
        }
    }
}

/// Validates the parameters and runs a full simulation.
///
/// # Errors
///
/// Returns a [`ConfigError`] if the parameters are invalid.
pub fn simulate(params: Params) -> Result<Trajectory, ConfigError> {
    Simulation::from_params(params).map(Simulation::cycle)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn params_with(change: impl FnOnce(&mut Params)) -> Params {
        let mut params = Params::default();
        change(&mut params);
        params
    }

    #[test]
    fn default_run_covers_full_horizon() {
        let trajectory = Simulation::new(Config::default()).cycle();

        assert_eq!(trajectory.len(), 300);
        assert_relative_eq!(trajectory.points()[0].time, 0.1);
        assert_relative_eq!(trajectory.last().unwrap().time, 30.0);
    }

    #[test]
    fn records_match_manual_stepping() {
        let config = Config::default();
        let mut plant = Plant::new(&config);
        let mut controller = PidController::new(&config);

        let records: Vec<_> = Simulation::new(config).steps().take(25).collect();

        for record in records {
            let thrust = controller.output(plant.position());
            plant.set_acceleration(thrust);
            plant.advance_velocity();
            plant.advance_position();

            assert_eq!(record.thrust, thrust);
            assert_eq!(record.position, plant.position());
            assert_eq!(record.velocity, plant.velocity());
            assert_eq!(record.acceleration, plant.acceleration());
            assert_eq!(record.terms, controller.terms());
        }
    }

    #[test]
    fn first_step_saturates_from_derivative_kick() {
        let mut steps = Simulation::new(Config::default()).steps();

        let first = steps.next().unwrap();

        // error = 16, derivative = 160 on the first call
        assert_eq!(first.thrust, 15.0);
        assert_relative_eq!(first.terms.proportional, 6.4);
        assert_relative_eq!(first.terms.derivative, 160.0 * 14.0 / 15.0, epsilon = 1e-12);
        assert_relative_eq!(first.acceleration, 5.2, epsilon = 1e-12);
    }

    #[test]
    fn steps_is_exact_size_and_fused() {
        let config = Config::new(params_with(|p| p.duration = 0.5)).unwrap();
        let mut steps = Simulation::new(config).steps();

        assert_eq!(steps.len(), 5);
        assert_eq!(steps.total(), 5);
        steps.next();
        assert_eq!(steps.len(), 4);
        assert_eq!(steps.completed(), 1);

        assert_eq!(steps.by_ref().count(), 4);
        assert!(steps.next().is_none());
        assert!(steps.next().is_none());
    }

    #[test]
    fn steps_expose_live_plant() {
        let mut steps = Simulation::new(Config::default()).steps();

        let record = steps.next().unwrap();

        assert_eq!(steps.plant().position(), record.position);
        assert_eq!(steps.controller().terms(), record.terms);
    }

    #[test]
    fn zero_duration_produces_empty_trajectory() {
        let trajectory = simulate(params_with(|p| p.duration = 0.0)).unwrap();
        assert!(trajectory.is_empty());
    }

    #[test]
    fn invalid_params_are_rejected_before_running() {
        let result = simulate(params_with(|p| p.dt = 0.0));
        assert!(matches!(result, Err(ConfigError::TimeStep(_))));
    }

    #[test]
    fn unobserved_run_completes() {
        let solution = Simulation::new(Config::default()).run(());

        assert_eq!(solution.status, Status::Complete);
        assert_eq!(solution.steps, 300);
        assert_eq!(solution.history.len(), 300);
    }

    #[test]
    fn run_and_cycle_agree() {
        let solution = Simulation::new(Config::default()).run(());
        let trajectory = Simulation::new(Config::default()).cycle();

        assert_eq!(solution.trajectory(), trajectory);
    }

    #[test]
    fn observer_can_stop_early() {
        let observer = |event: &Event| (event.step >= 5).then_some(Action::StopEarly);

        let solution = Simulation::new(Config::default()).run(observer);

        assert_eq!(solution.status, Status::StoppedByObserver);
        assert_eq!(solution.steps, 5);
        assert_eq!(solution.history.len(), 5);
    }

    #[test]
    fn step_numbers_start_at_one() {
        let config = Config::new(params_with(|p| p.duration = 0.4)).unwrap();

        let mut step_values = Vec::new();
        Simulation::new(config).run(|event: &Event| {
            step_values.push(event.step);
            None
        });

        assert_eq!(step_values, vec![1, 2, 3, 4]);
    }
}
