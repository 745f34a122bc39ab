//! Components of the hover rocket simulator.
//!
//! - [`plant`] - one-dimensional rocket kinematics under gravity and thrust
//! - [`controller`] - a saturating PID controller commanding thrust
//!
//! The two components know nothing about each other. The simulation loop in
//! `hover-sim` reads the plant's position, asks the controller for thrust, and
//! feeds that thrust back into the plant.

pub mod controller;
pub mod plant;

pub use controller::{ControllerState, PidController, PidGains, PidTerms};
pub use plant::{Plant, PlantState};
