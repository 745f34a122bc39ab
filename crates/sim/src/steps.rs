use std::iter::FusedIterator;

use hover_components::{PidController, Plant};
use hover_core::Config;

use crate::StepRecord;

/// A lazy, finite sequence of simulation steps.
///
/// Created by [`Simulation::steps`](crate::Simulation::steps). Each call to
/// `next` advances the plant and controller by exactly one step, so a renderer
/// can pull steps at its own pace and poll [`plant`](Steps::plant) in between.
/// Once exhausted it keeps returning `None`; rerunning requires building a new
/// simulation from the same config.
#[derive(Debug, Clone)]
pub struct Steps {
    config: Config,
    plant: Plant,
    controller: PidController,
    step: usize,
    total: usize,
}

impl Steps {
    pub(crate) fn new(config: Config, plant: Plant, controller: PidController) -> Self {
        Self {
            total: config.step_count(),
            config,
            plant,
            controller,
            step: 0,
        }
    }

    /// Returns the plant in its current state.
    #[must_use]
    pub fn plant(&self) -> &Plant {
        &self.plant
    }

    /// Returns the controller in its current state.
    #[must_use]
    pub fn controller(&self) -> &PidController {
        &self.controller
    }

    /// Returns the number of steps taken so far.
    #[must_use]
    pub fn completed(&self) -> usize {
        self.step
    }

    /// Returns the total number of steps in the run.
    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }
}

impl Iterator for Steps {
    type Item = StepRecord;

    fn next(&mut self) -> Option<StepRecord> {
        if self.step >= self.total {
            return None;
        }
        self.step += 1;

        let thrust = self.controller.output(self.plant.position());
        self.plant.set_acceleration(thrust);
        self.plant.advance_velocity();
        self.plant.advance_position();

        let record = StepRecord {
            step: self.step,
            time: self.config.timestamp(self.step),
            position: self.plant.position(),
            velocity: self.plant.velocity(),
            acceleration: self.plant.acceleration(),
            thrust,
            terms: self.controller.terms(),
        };

        tracing::trace!(
            step = record.step,
            time = record.time,
            position = record.position,
            velocity = record.velocity,
            acceleration = record.acceleration,
            thrust = record.thrust,
            "step"
        );

        Some(record)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.total - self.step;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Steps {}

impl FusedIterator for Steps {}
