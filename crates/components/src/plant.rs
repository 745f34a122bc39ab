//! One-dimensional rocket kinematics.
//!
//! The [`Plant`] integrates vertical motion under gravity plus a commanded
//! thrust with a fixed time step. Each step runs in a fixed order:
//!
//! ```text
//! acceleration = gravity + thrust / mass
//! velocity     = velocity + acceleration * dt
//! position     = max(position + velocity * dt, min_position)
//! ```
//!
//! Position is updated with the velocity that was just computed, which makes
//! this the semi-implicit form of Euler's method.

use hover_core::{Config, TimeIntegrable};
use uom::si::{
    acceleration::meter_per_second_squared,
    f64::{Acceleration, Force, Length, Mass, Time, Velocity},
    force::newton,
    length::meter,
    mass::kilogram,
    time::second,
    velocity::meter_per_second,
};

/// The rocket's vertical kinematic state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlantState {
    pub position: Length,
    pub velocity: Velocity,
    pub acceleration: Acceleration,
}

/// A rigid rocket constrained to vertical motion above a floor.
///
/// Constants (gravity, mass, floor, time step) come from the [`Config`] and are
/// fixed for the plant's lifetime. Thrust is not clamped here; the controller
/// is responsible for keeping it within the actuator limits.
///
/// # Ground contact
///
/// When a position update would take the rocket below `min_position`, the
/// position is clamped to the floor but the velocity is left as is. A rocket
/// resting on the floor can therefore carry a negative velocity that must be
/// overcome by thrust before it lifts off.
#[derive(Debug, Clone)]
pub struct Plant {
    state: PlantState,
    gravity: Acceleration,
    mass: Mass,
    min_position: Length,
    dt: Time,
}

impl Plant {
    /// Creates a plant at the configured initial position and velocity.
    ///
    /// The initial acceleration is zero until the first thrust is applied.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            state: PlantState {
                position: Length::new::<meter>(config.initial_position()),
                velocity: Velocity::new::<meter_per_second>(config.initial_velocity()),
                acceleration: Acceleration::new::<meter_per_second_squared>(0.0),
            },
            gravity: Acceleration::new::<meter_per_second_squared>(config.gravity()),
            mass: Mass::new::<kilogram>(config.mass()),
            min_position: Length::new::<meter>(config.min_position()),
            dt: Time::new::<second>(config.dt()),
        }
    }

    /// Sets the acceleration produced by gravity and the given thrust (N).
    pub fn set_acceleration(&mut self, thrust: f64) {
        let thrust = Force::new::<newton>(thrust);
        self.state.acceleration = self.gravity + thrust / self.mass;
    }

    /// Advances the velocity by one time step at the current acceleration.
    pub fn advance_velocity(&mut self) {
        self.state.velocity = self
            .state
            .velocity
            .step_by_time(self.state.acceleration, self.dt);
    }

    /// Advances the position by one time step at the current velocity, then
    /// clamps it to the floor.
    pub fn advance_position(&mut self) {
        let next = self.state.position.step_by_time(self.state.velocity, self.dt);
        self.state.position = if next < self.min_position {
            self.min_position
        } else {
            next
        };
    }

    /// Runs one full update for the given thrust: acceleration, then velocity,
    /// then position.
    pub fn step(&mut self, thrust: f64) {
        self.set_acceleration(thrust);
        self.advance_velocity();
        self.advance_position();
    }

    /// Returns the altitude (m).
    #[must_use]
    pub fn position(&self) -> f64 {
        self.state.position.get::<meter>()
    }

    /// Returns the vertical velocity (m/s).
    #[must_use]
    pub fn velocity(&self) -> f64 {
        self.state.velocity.get::<meter_per_second>()
    }

    /// Returns the vertical acceleration (m/s²).
    #[must_use]
    pub fn acceleration(&self) -> f64 {
        self.state.acceleration.get::<meter_per_second_squared>()
    }

    /// Returns the current state as dimensioned quantities.
    #[must_use]
    pub fn state(&self) -> PlantState {
        self.state
    }
}
