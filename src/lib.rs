// Mecanum drivebase control runtime
//
// Provides:
// - Closed-loop motor control primitives (PID + feedforward + low-pass filtering)
// - Edge-triggered gamepad input tracking
// - Mecanum inverse kinematics with an arcade / field-centric / debug mode machine
// - A zenoh-backed 50 Hz runtime that wires the above to external hardware nodes

pub mod config;
pub mod control;
pub mod drive;
pub mod error;
pub mod gamepad;
pub mod messages;
pub mod runtime;

pub use control::{ControlSystem, FeedforwardController, LowPassFilter, PidController};
pub use drive::{DriveMode, DriveUpdate, MecanumDrive, WheelPowers};
pub use gamepad::{Button, GamepadTracker};
pub use messages::GamepadState;
