// Mecanum drivebase module
//
// Provides:
// - Inverse kinematics (stick input -> four wheel powers)
// - The arcade / field-centric / direction-debug mode state machine

mod mecanum;

pub use mecanum::{
    DebugWheel, DriveMode, DriveUpdate, MecanumDrive, WheelDirection, WheelPowers,
};
