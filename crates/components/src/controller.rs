//! Saturating PID thrust controller.

use hover_core::Config;

/// Proportional, integral, and derivative gains.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PidGains {
    pub kp: f64,
    pub ki: f64,
    pub kd: f64,
}

/// The individual contributions to the most recent control output.
///
/// Kept for diagnostics such as overshoot analysis; they are not part of the
/// control contract.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PidTerms {
    pub proportional: f64,
    pub integral: f64,
    pub derivative: f64,
}

impl PidTerms {
    /// Returns the unsaturated control output.
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.proportional + self.integral + self.derivative
    }
}

/// Accumulated error state of a [`PidController`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ControllerState {
    pub error_integral: f64,
    pub error_previous: f64,
}

/// A PID controller that commands thrust toward an altitude setpoint.
///
/// Each call to [`output`](PidController::output) evaluates, with the shared
/// time step `dt`:
///
/// ```text
/// error       = setpoint - position
/// integral   += error * dt
/// derivative  = (error - previous_error) / dt
/// thrust      = clamp(kp*error + ki*integral + kd*derivative, 0, max_thrust)
/// ```
///
/// The integral accumulates on every call, including while the output is
/// saturated. There is no anti-windup, so a long climb at full thrust builds
/// up integral action that shows as overshoot near the setpoint.
///
/// The previous error starts at zero, so the first call sees a derivative of
/// `error / dt`.
#[derive(Debug, Clone)]
pub struct PidController {
    gains: PidGains,
    setpoint: f64,
    max_thrust: f64,
    dt: f64,
    state: ControllerState,
    terms: PidTerms,
}

impl PidController {
    /// Creates a controller with the configured gains, setpoint, and limits,
    /// and zeroed error history.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            gains: PidGains {
                kp: config.kp(),
                ki: config.ki(),
                kd: config.kd(),
            },
            setpoint: config.setpoint(),
            max_thrust: config.max_thrust(),
            dt: config.dt(),
            state: ControllerState::default(),
            terms: PidTerms::default(),
        }
    }

    /// Computes the thrust command (N) for the current altitude.
    ///
    /// The returned value always lies in `[0, max_thrust]`: the rocket has no
    /// retro-thrust and cannot exceed its actuator limit.
    pub fn output(&mut self, position: f64) -> f64 {
        let error = self.setpoint - position;
        self.state.error_integral += error * self.dt;
        let error_derivative = (error - self.state.error_previous) / self.dt;
        self.state.error_previous = error;

        self.terms = PidTerms {
            proportional: self.gains.kp * error,
            integral: self.gains.ki * self.state.error_integral,
            derivative: self.gains.kd * error_derivative,
        };

        self.terms.sum().clamp(0.0, self.max_thrust)
    }

    /// Returns the term contributions from the most recent call to `output`.
    #[must_use]
    pub fn terms(&self) -> PidTerms {
        self.terms
    }

    /// Returns the accumulated integral and previous error.
    #[must_use]
    pub fn state(&self) -> ControllerState {
        self.state
    }

    /// Returns the proportional, integral, and derivative gains.
    #[must_use]
    pub fn gains(&self) -> PidGains {
        self.gains
    }

    /// Returns the target altitude (m).
    #[must_use]
    pub fn setpoint(&self) -> f64 {
        self.setpoint
    }

    /// Returns the upper thrust limit (N).
    #[must_use]
    pub fn max_thrust(&self) -> f64 {
        self.max_thrust
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use hover_core::Params;

    fn controller_with(change: impl FnOnce(&mut Params)) -> PidController {
        let mut params = Params::default();
        change(&mut params);
        PidController::new(&Config::new(params).unwrap())
    }

    /// Unit gains make each term equal to the quantity it scales.
    fn unit_gains(params: &mut Params) {
        params.kp = 1.0;
        params.ki = 1.0;
        params.kd = 1.0;
        params.max_thrust = 1000.0;
    }

    #[test]
    fn no_thrust_at_setpoint_without_history() {
        let mut controller = controller_with(|_| {});

        let thrust = controller.output(6.0);

        assert_eq!(thrust, 0.0);
        assert_eq!(controller.terms(), PidTerms::default());
    }

    #[test]
    fn terms_follow_error_history() {
        let mut controller = controller_with(unit_gains);

        // error = 2, integral = 0.2, derivative = 20
        controller.output(4.0);
        let terms = controller.terms();
        assert_relative_eq!(terms.proportional, 2.0);
        assert_relative_eq!(terms.integral, 0.2);
        assert_relative_eq!(terms.derivative, 20.0);

        // error = 1, integral = 0.3, derivative = -10
        let thrust = controller.output(5.0);
        let terms = controller.terms();
        assert_relative_eq!(terms.proportional, 1.0);
        assert_relative_eq!(terms.integral, 0.3);
        assert_relative_eq!(terms.derivative, -10.0);

        // Raw output is negative, so no thrust is commanded.
        assert_eq!(thrust, 0.0);
        assert_relative_eq!(terms.sum(), -8.7);
    }

    #[test]
    fn state_tracks_integral_and_previous_error() {
        let mut controller = controller_with(|_| {});

        controller.output(4.0);
        controller.output(5.0);

        let state = controller.state();
        assert_relative_eq!(state.error_integral, 0.3);
        assert_relative_eq!(state.error_previous, 1.0);
    }

    #[test]
    fn output_saturates_at_max_thrust() {
        let mut controller = controller_with(|p| p.kp = 1000.0);

        let thrust = controller.output(-10.0);

        assert_eq!(thrust, 15.0);
        assert!(controller.terms().sum() > 15.0);
    }

    #[test]
    fn output_never_goes_negative() {
        let mut controller = controller_with(|_| {});

        let thrust = controller.output(50.0);

        assert_eq!(thrust, 0.0);
        assert!(controller.terms().sum() < 0.0);
    }

    #[test]
    fn integral_keeps_growing_while_saturated() {
        let mut controller = controller_with(|p| p.kp = 1000.0);

        let mut previous = 0.0;
        for _ in 0..10 {
            assert_eq!(controller.output(-10.0), 15.0);
            let integral = controller.state().error_integral;
            assert!(integral > previous);
            previous = integral;
        }

        assert_relative_eq!(previous, 16.0, epsilon = 1e-12);
    }

    #[test]
    fn zero_max_thrust_always_commands_zero() {
        let mut controller = controller_with(|p| p.max_thrust = 0.0);
        assert_eq!(controller.output(-10.0), 0.0);
        assert_eq!(controller.output(20.0), 0.0);
    }

    #[test]
    fn exposes_configuration() {
        let controller = controller_with(|p| {
            p.setpoint = 2.0;
            p.max_thrust = 20.0;
        });

        assert_relative_eq!(controller.setpoint(), 2.0);
        assert_relative_eq!(controller.max_thrust(), 20.0);
        assert_eq!(
            controller.gains(),
            PidGains {
                kp: 2.0 / 5.0,
                ki: 2.0 / 35.0,
                kd: 14.0 / 15.0,
            }
        );
    }
}
