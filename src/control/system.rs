// Per-axis control system: PID feedback + feedforward + measurement filtering

use super::feedforward::FeedforwardController;
use super::low_pass::LowPassFilter;
use super::pid::PidController;

/// Composes one PID controller, one feedforward model, and one measurement
/// low-pass filter into a single per-axis controller with a settable target.
///
/// The measurement filter smooths the raw sensor reading before it reaches
/// the PID; the PID's own internal filter independently smooths the
/// error-rate signal. The two are tuned separately on purpose.
#[derive(Debug, Clone)]
pub struct ControlSystem {
    pid: PidController,
    feedforward: FeedforwardController,
    measurement_filter: LowPassFilter,
    target: f64,
}

impl ControlSystem {
    pub fn new(
        pid: PidController,
        feedforward: FeedforwardController,
        measurement_filter: LowPassFilter,
    ) -> Self {
        Self {
            pid,
            feedforward,
            measurement_filter,
            target: 0.0,
        }
    }

    /// Set the target the PID regulates toward and the feedforward models
    pub fn set_target(&mut self, target: f64) {
        self.target = target;
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    /// Update from the measured state alone
    pub fn update(&mut self, state: f64) -> f64 {
        self.update_full(state, 0.0, 0.0)
    }

    /// Update with a reference velocity for the feedforward term
    pub fn update_with_velocity(&mut self, state: f64, reference_velocity: f64) -> f64 {
        self.update_full(state, reference_velocity, 0.0)
    }

    /// Update with full reference terms. The measured state is filtered
    /// before feedback; the feedforward uses the raw target and references.
    pub fn update_full(
        &mut self,
        state: f64,
        reference_velocity: f64,
        reference_acceleration: f64,
    ) -> f64 {
        let filtered_state = self.measurement_filter.filter(state);
        let pid_output = self.pid.calculate(self.target, filtered_state);
        let feedforward_output =
            self.feedforward
                .calculate(self.target, reference_velocity, reference_acceleration);
        pid_output + feedforward_output
    }
}
