//! Fixed-step closed-loop simulation of a hovering rocket.
//!
//! A [`Simulation`] owns one [`Plant`] and one [`PidController`] and drives
//! them in lockstep. Every step:
//!
//! 1. Reads the plant position.
//! 2. Asks the controller for a saturated thrust command.
//! 3. Applies the thrust to the plant (acceleration, velocity, position).
//! 4. Records a [`StepRecord`] at the elapsed time.
//!
//! # Example
//!
//! ```
//! use hover_core::Params;
//! use hover_sim::simulate;
//!
//! let trajectory = simulate(Params::default()).unwrap();
//!
//! assert_eq!(trajectory.len(), 300);
//! let final_position = trajectory.final_position().unwrap();
//! assert!((final_position - 6.0).abs() < 0.1);
//! ```
//!
//! [`Plant`]: hover_components::Plant
//! [`PidController`]: hover_components::PidController

mod action;
mod event;
mod record;
mod simulation;
mod solution;
mod steps;
mod trajectory;

pub use action::Action;
pub use event::Event;
pub use record::StepRecord;
pub use simulation::{Simulation, simulate};
pub use solution::{Solution, Status};
pub use steps::Steps;
pub use trajectory::{Trajectory, TrajectoryPoint};
