// Message types exchanged between the runtime and the hardware/teleop nodes

use serde::{Deserialize, Serialize};

use crate::drive::{DebugWheel, WheelDirection};

/// Raw gamepad snapshot published by a teleop node once per cycle.
///
/// Digital buttons are plain booleans, triggers are in `[0, 1]`, stick axes in
/// `[-1, 1]`. The runtime replaces its retained snapshot wholesale on every
/// update; there is no partial mutation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GamepadState {
    pub a: bool,
    pub b: bool,
    pub x: bool,
    pub y: bool,
    pub dpad_up: bool,
    pub dpad_down: bool,
    pub dpad_left: bool,
    pub dpad_right: bool,
    pub left_bumper: bool,
    pub right_bumper: bool,
    pub left_stick_button: bool,
    pub right_stick_button: bool,
    pub start: bool,
    pub back: bool,
    pub left_trigger: f64,
    pub right_trigger: f64,
    pub left_stick_x: f64,
    pub left_stick_y: f64,
    pub right_stick_x: f64,
    pub right_stick_y: f64,
}

/// Yaw report from the IMU node, radians, counter-clockwise positive
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct HeadingReport {
    pub yaw_rad: f64,
}

/// Wheel power actuation from runtime -> motor node, each value in [-1, 1]
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct WheelCommand {
    pub front_left: f64,
    pub front_right: f64,
    pub rear_left: f64,
    pub rear_right: f64,
}

/// Health status published by the runtime
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum RuntimeHealth {
    Ok,
    PadStale,
}

/// One of the six axis-aligned directions the IMU housing can face
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MountAxis {
    Up,
    Down,
    Left,
    Right,
    Forward,
    Backward,
}

impl MountAxis {
    pub const ALL: [MountAxis; 6] = [
        MountAxis::Up,
        MountAxis::Down,
        MountAxis::Left,
        MountAxis::Right,
        MountAxis::Forward,
        MountAxis::Backward,
    ];

    /// The physically opposite direction
    pub fn opposite(self) -> MountAxis {
        match self {
            MountAxis::Up => MountAxis::Down,
            MountAxis::Down => MountAxis::Up,
            MountAxis::Left => MountAxis::Right,
            MountAxis::Right => MountAxis::Left,
            MountAxis::Forward => MountAxis::Backward,
            MountAxis::Backward => MountAxis::Forward,
        }
    }
}

/// How the IMU is mounted on the robot: the direction its face points and the
/// direction its connector port points. The two axes must be distinct and not
/// physically opposite, otherwise the pair does not describe a real mounting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MountOrientation {
    pub face: MountAxis,
    pub port: MountAxis,
}

impl MountOrientation {
    pub fn new(face: MountAxis, port: MountAxis) -> Self {
        Self { face, port }
    }

    pub fn is_valid(&self) -> bool {
        self.face != self.port && self.face.opposite() != self.port
    }

    /// Every valid mounting orientation, in a fixed enumeration order.
    /// 6 face directions x 4 remaining port directions = 24 entries.
    pub fn all_valid() -> Vec<MountOrientation> {
        let mut orientations = Vec::new();
        for face in MountAxis::ALL {
            for port in MountAxis::ALL {
                let orientation = MountOrientation::new(face, port);
                if orientation.is_valid() {
                    orientations.push(orientation);
                }
            }
        }
        orientations
    }
}

/// IMU re-initialization request from runtime -> IMU node
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ImuInitCommand {
    pub orientation: MountOrientation,
}

/// Logical direction change for one wheel, runtime -> motor node
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WheelDirectionCommand {
    pub wheel: DebugWheel,
    pub direction: WheelDirection,
}
