use std::ops::{Add, Div, Mul};

use uom::si::f64::Time;

/// The time derivative of a quantity `T`.
///
/// # Examples
///
/// - `TimeDerivativeOf<Length>` = `Velocity`
/// - `TimeDerivativeOf<Velocity>` = `Acceleration`
pub type TimeDerivativeOf<T> = <T as Div<Time>>::Output;

/// Trait for quantities that can be stepped through time by their derivative.
///
/// The plant advances its velocity and position through this trait, one
/// fixed time step at a time.
pub trait TimeIntegrable: Sized + Div<Time> {
    /// Steps the value by a time increment `dt`.
    #[must_use]
    fn step_by_time(self, derivative: TimeDerivativeOf<Self>, dt: Time) -> Self;
}

/// Blanket implementation of [`TimeIntegrable`] using the explicit Euler method.
///
/// Applies to any type that supports division by time, multiplication of its
/// derivative by time, and addition of the result back to itself:
///
/// ```text
/// next = self + derivative * dt
/// ```
impl<T> TimeIntegrable for T
where
    T: Div<Time>,
    TimeDerivativeOf<T>: Mul<Time>,
    T: Add<<TimeDerivativeOf<T> as Mul<Time>>::Output, Output = T>,
{
    fn step_by_time(self, derivative: TimeDerivativeOf<Self>, dt: Time) -> Self {
        self + derivative * dt
    }
}
