// Timeouts, topics, drive tuning
use std::time::Duration;

// Runtime loop frequency
pub const LOOP_HZ: u64 = 50;

// Gamepad stream timeout for watchdog
pub const PAD_TIMEOUT: Duration = Duration::from_millis(250);

// Zenoh topics
pub const TOPIC_PAD: &str = "mecanum/pad"; // gamepad snapshots
pub const TOPIC_HEADING: &str = "mecanum/heading"; // yaw reports from the IMU node
pub const TOPIC_RT_WHEELS: &str = "mecanum/rt/wheels"; // wheel power actuation
pub const TOPIC_RT_IMU_INIT: &str = "mecanum/rt/imu_init"; // IMU re-initialization requests
pub const TOPIC_RT_WHEEL_DIR: &str = "mecanum/rt/wheel_dir"; // wheel direction changes
pub const TOPIC_HEALTH: &str = "mecanum/state/health"; // health status

// Default stick multipliers for the drive modes
pub const Y_MULTIPLIER: f64 = 1.0;
pub const X_MULTIPLIER: f64 = 1.0;
pub const RX_MULTIPLIER: f64 = 1.0;

// Fixed test power for the active motor in direction-debug mode
pub const DEBUG_DRIVE_POWER: f64 = 0.7;
