// PID feedback controller with derivative filtering and anti-windup

use std::time::Instant;

use super::low_pass::LowPassFilter;

/// Closed-loop PID controller advanced once per control cycle.
///
/// The derivative is computed from the unfiltered error and then smoothed by
/// an internal [`LowPassFilter`]; the integral accumulator is clamped to
/// `integral_sum_max` by magnitude and reset whenever the error crosses zero,
/// so a mechanism pushed past its target does not fight an accumulated sum
/// from the approach.
///
/// Not safe for concurrent use; each controller belongs to one control loop.
#[derive(Debug, Clone)]
pub struct PidController {
    kp: f64,
    ki: f64,
    kd: f64,
    derivative_filter: LowPassFilter,
    integral_sum_max: f64,

    integral_sum: f64,
    previous_error: f64,
    last_sample: Option<Instant>,
}

impl PidController {
    /// Create a controller from its gains. `derivative_filter_gain` is the
    /// low-pass gain applied to the derivative signal, `integral_sum_max`
    /// bounds the integral accumulator magnitude.
    pub fn new(
        kp: f64,
        ki: f64,
        kd: f64,
        derivative_filter_gain: f64,
        integral_sum_max: f64,
    ) -> Self {
        Self {
            kp,
            ki,
            kd,
            derivative_filter: LowPassFilter::new(derivative_filter_gain),
            integral_sum_max,
            integral_sum: 0.0,
            previous_error: 0.0,
            last_sample: None,
        }
    }

    /// Compute one cycle using the controller's own monotonic clock.
    ///
    /// The first call establishes the timing baseline and runs with `dt = 0`,
    /// producing a pure proportional output.
    pub fn calculate(&mut self, target: f64, current: f64) -> f64 {
        let now = Instant::now();
        let dt = match self.last_sample {
            Some(prev) => now.duration_since(prev).as_secs_f64(),
            None => 0.0,
        };
        self.last_sample = Some(now);
        self.update(target, current, dt)
    }

    /// Compute one cycle with an explicit elapsed time in seconds.
    ///
    /// Hosts that schedule the loop themselves can pass their own `dt`;
    /// `dt <= 0` yields a zero derivative and no integral growth rather than
    /// a division blowup.
    pub fn update(&mut self, target: f64, current: f64, dt: f64) -> f64 {
        let error = target - current;
        let derivative = self.filtered_derivative(error, dt);
        self.integrate(error, dt);
        self.previous_error = error;
        self.kp * error + self.ki * self.integral_sum + self.kd * derivative
    }

    /// Clear all accumulated state and the timing baseline
    pub fn reset(&mut self) {
        self.integral_sum = 0.0;
        self.previous_error = 0.0;
        self.derivative_filter.reset();
        self.last_sample = None;
    }

    pub fn integral_sum(&self) -> f64 {
        self.integral_sum
    }

    fn filtered_derivative(&mut self, error: f64, dt: f64) -> f64 {
        let raw = if dt > 0.0 {
            (error - self.previous_error) / dt
        } else {
            0.0
        };
        self.derivative_filter.filter(raw)
    }

    fn integrate(&mut self, error: f64, dt: f64) {
        if self.has_error_crossed_zero(error) {
            self.integral_sum = 0.0;
        }
        self.integral_sum += error * dt.max(0.0);
        if self.integral_sum.abs() > self.integral_sum_max {
            self.integral_sum = self.integral_sum.signum() * self.integral_sum_max;
        }
    }

    fn has_error_crossed_zero(&self, error: f64) -> bool {
        (error > 0.0 && self.previous_error < 0.0) || (error < 0.0 && self.previous_error > 0.0)
    }
}
