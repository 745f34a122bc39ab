//! Core traits and types for the hover rocket simulator.
//!
//! This crate defines the shared abstractions that the plant, the controller,
//! the simulation loop, and observers build on:
//!
//! - [`Observer`] - receives simulation events and optionally returns control actions
//! - [`Config`] - the validated, immutable parameter set of a run (built from [`Params`])
//! - [`constraint`] - numeric invariants checked once at construction
//! - [`TimeIntegrable`] - explicit Euler stepping of `uom` quantities

pub mod config;
pub mod constraint;
mod observer;
mod time;

pub use config::{Config, ConfigError, Params};
pub use observer::Observer;
pub use time::{TimeDerivativeOf, TimeIntegrable};
