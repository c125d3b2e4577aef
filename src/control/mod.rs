// Closed-loop control primitives for robot mechanisms
//
// Provides:
// - Low-pass filtering for noisy signals
// - PID feedback control with derivative filtering and anti-windup
// - Feedforward control with gravity/cosine compensation
// - A composed per-axis control system (PID + feedforward + measurement filter)

mod feedforward;
mod low_pass;
mod pid;
mod system;

pub use feedforward::FeedforwardController;
pub use low_pass::LowPassFilter;
pub use pid::PidController;
pub use system::ControlSystem;
