//! Run configuration.
//!
//! A run is described by a [`Params`] value (plain numbers, easy to build or
//! deserialize) which is validated once into an immutable [`Config`]. The plant,
//! the controller, and the simulation loop are all constructed from the same
//! `Config`, so they share one clock and one set of constants.

use thiserror::Error;

use crate::constraint::{Constrained, ConstraintError, NonNegative, StrictlyPositive};

/// Relative distance from an integer under which `duration / dt` is treated as
/// that integer when counting steps.
///
/// A ratio that rounds to zero is never snapped, so any positive duration
/// takes at least one step.
const STEP_SNAP_TOLERANCE: f64 = 1e-9;

/// Upper bound on the number of steps in a single run.
pub const MAX_STEPS: usize = 100_000_000;

/// The raw parameter set of a run, in SI units.
///
/// The default reproduces the reference hover scenario: a 1 kg rocket starting
/// on the floor at -10 m, held at 6 m by a Ziegler–Nichols "no overshoot" PID
/// tuning (`Ku ≈ 2`, `Tu ≈ 7 s`) for 30 s with a 0.1 s step.
///
/// With the `serde` feature enabled, missing fields deserialize to their
/// default values.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, deny_unknown_fields)
)]
pub struct Params {
    /// Fixed time step shared by plant and controller (s).
    pub dt: f64,
    /// Simulated duration (s).
    pub duration: f64,
    /// Target altitude (m).
    pub setpoint: f64,
    /// Actuator limit on thrust (N).
    pub max_thrust: f64,
    /// Rocket mass (kg).
    pub mass: f64,
    /// Gravitational acceleration, negative for "down" (m/s²).
    pub gravity: f64,
    /// Floor altitude the rocket cannot go below (m).
    pub min_position: f64,
    /// Altitude at the start of the run (m).
    pub initial_position: f64,
    /// Vertical velocity at the start of the run (m/s).
    pub initial_velocity: f64,
    /// Proportional gain.
    pub kp: f64,
    /// Integral gain.
    pub ki: f64,
    /// Derivative gain.
    pub kd: f64,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            dt: 0.1,
            duration: 30.0,
            setpoint: 6.0,
            max_thrust: 15.0,
            mass: 1.0,
            gravity: -9.8,
            min_position: -10.0,
            initial_position: -10.0,
            initial_velocity: 0.0,
            kp: 2.0 / 5.0,
            ki: 2.0 / 35.0,
            kd: 14.0 / 15.0,
        }
    }
}

/// Errors that can occur when validating [`Params`] into a [`Config`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("time step must be strictly positive: {0}")]
    TimeStep(#[source] ConstraintError),

    #[error("mass must be strictly positive: {0}")]
    Mass(#[source] ConstraintError),

    #[error("max thrust must be non-negative: {0}")]
    MaxThrust(#[source] ConstraintError),

    #[error("duration must be non-negative: {0}")]
    Duration(#[source] ConstraintError),

    #[error("{name} must be finite")]
    NotFinite { name: &'static str },

    #[error("duration / dt exceeds the limit of {limit} steps")]
    TooManySteps { limit: usize },
}

/// A validated, immutable run configuration.
///
/// Construct with [`Config::new`]. Once built, `dt > 0`, `mass > 0`,
/// `max_thrust >= 0`, `duration >= 0`, every parameter is finite, and the run
/// takes at most [`MAX_STEPS`] steps, so no later stage needs to re-check them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    dt: Constrained<f64, StrictlyPositive>,
    duration: Constrained<f64, NonNegative>,
    mass: Constrained<f64, StrictlyPositive>,
    max_thrust: Constrained<f64, NonNegative>,
    setpoint: f64,
    gravity: f64,
    min_position: f64,
    initial_position: f64,
    initial_velocity: f64,
    kp: f64,
    ki: f64,
    kd: f64,
}

impl Default for Config {
    fn default() -> Self {
        // Known-good values, unwrap is safe
        Self::new(Params::default()).unwrap()
    }
}

impl Config {
    /// Validates a parameter set.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `dt <= 0`, `mass <= 0`, `max_thrust < 0`,
    /// `duration < 0`, any parameter is NaN or infinite, or `duration / dt`
    /// needs more than [`MAX_STEPS`] steps.
    pub fn new(params: Params) -> Result<Self, ConfigError> {
        let dt = StrictlyPositive::new(params.dt).map_err(ConfigError::TimeStep)?;
        let mass = StrictlyPositive::new(params.mass).map_err(ConfigError::Mass)?;
        let max_thrust = NonNegative::new(params.max_thrust).map_err(ConfigError::MaxThrust)?;
        let duration = NonNegative::new(params.duration).map_err(ConfigError::Duration)?;

        let named = [
            ("dt", params.dt),
            ("duration", params.duration),
            ("setpoint", params.setpoint),
            ("max_thrust", params.max_thrust),
            ("mass", params.mass),
            ("gravity", params.gravity),
            ("min_position", params.min_position),
            ("initial_position", params.initial_position),
            ("initial_velocity", params.initial_velocity),
            ("kp", params.kp),
            ("ki", params.ki),
            ("kd", params.kd),
        ];
        if let Some(&(name, _)) = named.iter().find(|(_, value)| !value.is_finite()) {
            return Err(ConfigError::NotFinite { name });
        }

        #[allow(clippy::cast_precision_loss)]
        let limit = MAX_STEPS as f64;
        if count_steps(params.duration, params.dt) > limit {
            return Err(ConfigError::TooManySteps { limit: MAX_STEPS });
        }

        Ok(Self {
            dt,
            duration,
            mass,
            max_thrust,
            setpoint: params.setpoint,
            gravity: params.gravity,
            min_position: params.min_position,
            initial_position: params.initial_position,
            initial_velocity: params.initial_velocity,
            kp: params.kp,
            ki: params.ki,
            kd: params.kd,
        })
    }

    /// Returns the parameters this config was built from.
    #[must_use]
    pub fn params(&self) -> Params {
        Params {
            dt: self.dt(),
            duration: self.duration(),
            setpoint: self.setpoint,
            max_thrust: self.max_thrust(),
            mass: self.mass(),
            gravity: self.gravity,
            min_position: self.min_position,
            initial_position: self.initial_position,
            initial_velocity: self.initial_velocity,
            kp: self.kp,
            ki: self.ki,
            kd: self.kd,
        }
    }

    /// Returns the time step (s).
    #[must_use]
    pub fn dt(&self) -> f64 {
        *self.dt.as_ref()
    }

    /// Returns the simulated duration (s).
    #[must_use]
    pub fn duration(&self) -> f64 {
        *self.duration.as_ref()
    }

    /// Returns the rocket mass (kg).
    #[must_use]
    pub fn mass(&self) -> f64 {
        *self.mass.as_ref()
    }

    /// Returns the thrust limit (N).
    #[must_use]
    pub fn max_thrust(&self) -> f64 {
        *self.max_thrust.as_ref()
    }

    /// Returns the target altitude (m).
    #[must_use]
    pub fn setpoint(&self) -> f64 {
        self.setpoint
    }

    /// Returns the gravitational acceleration (m/s²).
    #[must_use]
    pub fn gravity(&self) -> f64 {
        self.gravity
    }

    /// Returns the floor altitude (m).
    #[must_use]
    pub fn min_position(&self) -> f64 {
        self.min_position
    }

    /// Returns the starting altitude (m).
    #[must_use]
    pub fn initial_position(&self) -> f64 {
        self.initial_position
    }

    /// Returns the starting vertical velocity (m/s).
    #[must_use]
    pub fn initial_velocity(&self) -> f64 {
        self.initial_velocity
    }

    /// Returns the proportional gain.
    #[must_use]
    pub fn kp(&self) -> f64 {
        self.kp
    }

    /// Returns the integral gain.
    #[must_use]
    pub fn ki(&self) -> f64 {
        self.ki
    }

    /// Returns the derivative gain.
    #[must_use]
    pub fn kd(&self) -> f64 {
        self.kd
    }

    /// Returns the number of fixed steps needed to cover the duration.
    ///
    /// This is `ceil(duration / dt)`, except that a ratio within a relative
    /// `1e-9` of an integer counts as that integer. Without the snap,
    /// `1.1 / 0.1` evaluates to `11.000000000000002` and would add a step.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn step_count(&self) -> usize {
        count_steps(self.duration(), self.dt()) as usize
    }

    /// Returns the elapsed time at the end of `step` (s).
    ///
    /// Computed as `step * dt` rather than by accumulation, so timestamps do
    /// not drift over long runs.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn timestamp(&self, step: usize) -> f64 {
        step as f64 * self.dt()
    }
}

/// Counts steps as a float so out-of-range ratios can be rejected before any
/// integer conversion.
fn count_steps(duration: f64, dt: f64) -> f64 {
    let ratio = duration / dt;
    let nearest = ratio.round();
    if nearest > 0.0 && (ratio - nearest).abs() <= STEP_SNAP_TOLERANCE * nearest {
        nearest
    } else {
        ratio.ceil()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn config_with(change: impl FnOnce(&mut Params)) -> Result<Config, ConfigError> {
        let mut params = Params::default();
        change(&mut params);
        Config::new(params)
    }

    #[test]
    fn default_matches_reference_scenario() {
        let config = Config::default();

        assert_relative_eq!(config.dt(), 0.1);
        assert_relative_eq!(config.duration(), 30.0);
        assert_relative_eq!(config.setpoint(), 6.0);
        assert_relative_eq!(config.max_thrust(), 15.0);
        assert_relative_eq!(config.mass(), 1.0);
        assert_relative_eq!(config.gravity(), -9.8);
        assert_relative_eq!(config.min_position(), -10.0);
        assert_relative_eq!(config.initial_position(), -10.0);
        assert_relative_eq!(config.kp(), 0.4);
        assert_relative_eq!(config.ki(), 2.0 / 35.0);
        assert_relative_eq!(config.kd(), 14.0 / 15.0);
        assert_eq!(config.step_count(), 300);
    }

    #[test]
    fn params_round_trip_through_config() {
        let params = Params {
            setpoint: 2.5,
            kp: 1.5,
            ..Params::default()
        };
        let config = Config::new(params).unwrap();
        assert_eq!(config.params(), params);
    }

    #[test]
    fn rejects_non_positive_time_step() {
        assert_eq!(
            config_with(|p| p.dt = 0.0),
            Err(ConfigError::TimeStep(ConstraintError::Zero))
        );
        assert_eq!(
            config_with(|p| p.dt = -0.1),
            Err(ConfigError::TimeStep(ConstraintError::Negative))
        );
    }

    #[test]
    fn rejects_non_positive_mass() {
        assert_eq!(
            config_with(|p| p.mass = 0.0),
            Err(ConfigError::Mass(ConstraintError::Zero))
        );
        assert_eq!(
            config_with(|p| p.mass = -1.0),
            Err(ConfigError::Mass(ConstraintError::Negative))
        );
    }

    #[test]
    fn rejects_negative_max_thrust() {
        assert_eq!(
            config_with(|p| p.max_thrust = -1.0),
            Err(ConfigError::MaxThrust(ConstraintError::Negative))
        );
    }

    #[test]
    fn allows_zero_max_thrust() {
        assert!(config_with(|p| p.max_thrust = 0.0).is_ok());
    }

    #[test]
    fn rejects_negative_duration() {
        assert_eq!(
            config_with(|p| p.duration = -30.0),
            Err(ConfigError::Duration(ConstraintError::Negative))
        );
    }

    #[test]
    fn rejects_non_finite_parameters() {
        assert_eq!(
            config_with(|p| p.dt = f64::NAN),
            Err(ConfigError::TimeStep(ConstraintError::NotANumber))
        );
        assert_eq!(
            config_with(|p| p.dt = f64::INFINITY),
            Err(ConfigError::NotFinite { name: "dt" })
        );
        assert_eq!(
            config_with(|p| p.kd = f64::NAN),
            Err(ConfigError::NotFinite { name: "kd" })
        );
        assert_eq!(
            config_with(|p| p.gravity = f64::NEG_INFINITY),
            Err(ConfigError::NotFinite { name: "gravity" })
        );
    }

    #[test]
    fn step_count_rounds_partial_steps_up() {
        let config = config_with(|p| {
            p.dt = 0.25;
            p.duration = 1.1;
        })
        .unwrap();
        assert_eq!(config.step_count(), 5);
    }

    #[test]
    fn step_count_ignores_float_noise() {
        let config = config_with(|p| p.duration = 1.1).unwrap();
        assert_eq!(config.step_count(), 11);

        let config = config_with(|p| p.duration = 0.3).unwrap();
        assert_eq!(config.step_count(), 3);
    }

    #[test]
    fn zero_duration_has_no_steps() {
        let config = config_with(|p| p.duration = 0.0).unwrap();
        assert_eq!(config.step_count(), 0);
    }

    #[test]
    fn tiny_positive_duration_takes_one_step() {
        let config = config_with(|p| {
            p.dt = 1.0;
            p.duration = 1e-10;
        })
        .unwrap();
        assert_eq!(config.step_count(), 1);
    }

    #[test]
    fn rejects_unbounded_step_count() {
        assert_eq!(
            config_with(|p| {
                p.dt = 1e-300;
                p.duration = 1e300;
            }),
            Err(ConfigError::TooManySteps { limit: MAX_STEPS })
        );
        assert_eq!(
            config_with(|p| {
                p.dt = 1e-9;
                p.duration = 1.0;
            }),
            Err(ConfigError::TooManySteps { limit: MAX_STEPS })
        );
    }

    #[test]
    fn allows_step_count_at_the_limit() {
        let config = config_with(|p| {
            p.dt = 1.0;
            p.duration = 1e8;
        })
        .unwrap();
        assert_eq!(config.step_count(), MAX_STEPS);
    }

    #[test]
    fn timestamps_are_multiples_of_dt() {
        let config = Config::default();
        assert_eq!(config.timestamp(0), 0.0);
        assert_relative_eq!(config.timestamp(1), 0.1);
        assert_relative_eq!(config.timestamp(300), 30.0);
    }
}
