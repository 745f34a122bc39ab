//! Reusable observers for the hover rocket simulator.
//!
//! This crate provides [`Observer`] implementations and capability traits that
//! consume simulation events without touching the control loop.
//!
//! # Modules
//!
//! - [`traits`] - Capability traits ([`HasTrajectoryPoint`], [`CanStopEarly`])
//! - [`Settled`] - stops a run once the altitude has settled near a target
//!
//! # Features
//!
//! - `plot` - Enables [`PlotObserver`] for visualizing a run via egui.
//!   This feature adds dependencies on `eframe` and `egui_plot`.
//!
//! [`Observer`]: hover_core::Observer
//! [`HasTrajectoryPoint`]: traits::HasTrajectoryPoint
//! [`CanStopEarly`]: traits::CanStopEarly

mod settled;
pub mod traits;

#[cfg(feature = "plot")]
mod plot;

pub use settled::Settled;

#[cfg(feature = "plot")]
pub use plot::{PlotObserver, Plottable, ShowConfig};
