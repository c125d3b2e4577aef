// Mecanum inverse kinematics and the drive-mode state machine
//
// Wheel powers are recomputed wholesale every cycle from the current gamepad
// snapshot (and, in field-centric mode, a fresh heading reading); nothing is
// accumulated across cycles except the mode machine's own state.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::DEBUG_DRIVE_POWER;
use crate::gamepad::{Button, GamepadTracker};
use crate::messages::MountOrientation;

/// Active drive mode. Exactly one at a time; transitions only via input edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriveMode {
    /// Robot-centric stick mapping
    Arcade,
    /// Stick input rotated into the field frame by the live heading
    FieldCentric,
    /// Per-wheel direction debugging
    DirectionDebug,
}

/// The four wheel positions, used to select the active debug wheel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebugWheel {
    FrontLeft,
    FrontRight,
    RearLeft,
    RearRight,
}

impl DebugWheel {
    fn index(self) -> usize {
        match self {
            DebugWheel::FrontLeft => 0,
            DebugWheel::FrontRight => 1,
            DebugWheel::RearLeft => 2,
            DebugWheel::RearRight => 3,
        }
    }
}

/// Logical spin direction of a wheel actuator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WheelDirection {
    Forward,
    Reverse,
}

impl WheelDirection {
    pub fn toggled(self) -> WheelDirection {
        match self {
            WheelDirection::Forward => WheelDirection::Reverse,
            WheelDirection::Reverse => WheelDirection::Forward,
        }
    }
}

/// Four wheel powers, each in [-1, 1] after normalization
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WheelPowers {
    pub front_left: f64,
    pub front_right: f64,
    pub rear_left: f64,
    pub rear_right: f64,
}

impl WheelPowers {
    pub fn zero() -> Self {
        Self::default()
    }
}

/// Result of one drive cycle: powers to apply now, plus any debug-mode side
/// requests for the host to forward to hardware.
#[derive(Debug, Clone, Copy)]
pub struct DriveUpdate {
    pub powers: WheelPowers,
    /// A wheel whose logical direction was toggled this cycle
    pub direction_change: Option<(DebugWheel, WheelDirection)>,
    /// A request to re-initialize the heading sensor with a new mounting
    pub imu_init: Option<MountOrientation>,
}

impl DriveUpdate {
    fn powers_only(powers: WheelPowers) -> Self {
        Self {
            powers,
            direction_change: None,
            imu_init: None,
        }
    }
}

/// Mecanum drivebase mode controller.
///
/// Holds the mode state machine, the stick multipliers, and the debug-mode
/// selection state. Mode transitions are evaluated at the top of the active
/// mode each cycle and take effect on the next cycle's kinematics.
#[derive(Debug, Clone)]
pub struct MecanumDrive {
    mode: DriveMode,
    y_multiplier: f64,
    x_multiplier: f64,
    rx_multiplier: f64,

    debug_wheel: DebugWheel,
    wheel_directions: [WheelDirection; 4],
    orientations: Vec<MountOrientation>,
    orientation_index: usize,
}

impl MecanumDrive {
    pub fn new(y_multiplier: f64, x_multiplier: f64, rx_multiplier: f64) -> Self {
        Self {
            mode: DriveMode::Arcade,
            y_multiplier,
            x_multiplier,
            rx_multiplier,
            debug_wheel: DebugWheel::FrontLeft,
            wheel_directions: [WheelDirection::Forward; 4],
            orientations: MountOrientation::all_valid(),
            orientation_index: 0,
        }
    }

    /// Run one cycle of the active mode against this cycle's input edges and
    /// heading reading (radians, only consumed in field-centric mode).
    pub fn update(&mut self, pad: &GamepadTracker, heading_rad: f64) -> DriveUpdate {
        match self.mode {
            DriveMode::Arcade => self.arcade_drive(pad),
            DriveMode::FieldCentric => self.field_centric_drive(pad, heading_rad),
            DriveMode::DirectionDebug => self.direction_debug(pad),
        }
    }

    pub fn mode(&self) -> DriveMode {
        self.mode
    }

    pub fn debug_wheel(&self) -> DebugWheel {
        self.debug_wheel
    }

    pub fn wheel_direction(&self, wheel: DebugWheel) -> WheelDirection {
        self.wheel_directions[wheel.index()]
    }

    pub fn current_orientation(&self) -> MountOrientation {
        self.orientations[self.orientation_index]
    }

    fn switch_mode(&mut self, next: DriveMode) {
        info!("drive mode {:?} -> {:?}", self.mode, next);
        self.mode = next;
    }

    /// Standard mecanum inverse kinematics with L1 normalization that only
    /// engages when the sum of magnitudes exceeds 1, keeping small inputs
    /// linear.
    fn normalized_powers(y: f64, x: f64, rx: f64) -> WheelPowers {
        let denominator = (y.abs() + x.abs() + rx.abs()).max(1.0);
        WheelPowers {
            front_left: (y + x + rx) / denominator,
            rear_left: (y - x + rx) / denominator,
            front_right: (y - x - rx) / denominator,
            rear_right: (y + x - rx) / denominator,
        }
    }

    fn arcade_drive(&mut self, pad: &GamepadTracker) -> DriveUpdate {
        if pad.pressed(Button::LeftBumper) && pad.pressed(Button::RightBumper) {
            self.switch_mode(DriveMode::FieldCentric);
        } else if pad.any_dpad_pressed() {
            self.switch_mode(DriveMode::DirectionDebug);
        }

        let y = -pad.left_stick_y() * self.y_multiplier;
        let x = pad.left_stick_x() * self.x_multiplier;
        let rx = pad.right_stick_x() * self.rx_multiplier;

        DriveUpdate::powers_only(Self::normalized_powers(y, x, rx))
    }

    fn field_centric_drive(&mut self, pad: &GamepadTracker, heading_rad: f64) -> DriveUpdate {
        if pad.pressed(Button::LeftBumper) && pad.pressed(Button::RightBumper) {
            self.switch_mode(DriveMode::Arcade);
        } else if pad.any_dpad_pressed() {
            self.switch_mode(DriveMode::DirectionDebug);
        }

        let y = -pad.left_stick_y();
        let x = pad.left_stick_x();
        let rx = pad.right_stick_x() * self.rx_multiplier;

        // Rotate the stick vector counter to the robot's heading so the
        // command stays expressed in the field frame
        let rot_x = (x * (-heading_rad).cos() - y * (-heading_rad).sin()) * self.x_multiplier;
        let rot_y = (x * (-heading_rad).sin() + y * (-heading_rad).cos()) * self.y_multiplier;

        DriveUpdate::powers_only(Self::normalized_powers(rot_y, rot_x, rx))
    }

    fn direction_debug(&mut self, pad: &GamepadTracker) -> DriveUpdate {
        // Symmetric bumper-chord exit back to arcade
        if pad.pressed(Button::LeftBumper) && pad.pressed(Button::RightBumper) {
            self.switch_mode(DriveMode::Arcade);
        }

        if pad.pressed(Button::DpadUp) {
            self.debug_wheel = DebugWheel::FrontLeft;
        } else if pad.pressed(Button::DpadRight) {
            self.debug_wheel = DebugWheel::FrontRight;
        } else if pad.pressed(Button::DpadLeft) {
            self.debug_wheel = DebugWheel::RearLeft;
        } else if pad.pressed(Button::DpadDown) {
            self.debug_wheel = DebugWheel::RearRight;
        }

        let mut powers = WheelPowers::zero();
        let y_down = pad.pressed(Button::Y) || pad.held(Button::Y);
        let test_power = if y_down { DEBUG_DRIVE_POWER } else { 0.0 };
        match self.debug_wheel {
            DebugWheel::FrontLeft => powers.front_left = test_power,
            DebugWheel::FrontRight => powers.front_right = test_power,
            DebugWheel::RearLeft => powers.rear_left = test_power,
            DebugWheel::RearRight => powers.rear_right = test_power,
        }

        let direction_change = if pad.pressed(Button::A) {
            let index = self.debug_wheel.index();
            self.wheel_directions[index] = self.wheel_directions[index].toggled();
            debug!(
                "debug wheel {:?} direction -> {:?}",
                self.debug_wheel, self.wheel_directions[index]
            );
            Some((self.debug_wheel, self.wheel_directions[index]))
        } else {
            None
        };

        let imu_init = if pad.pressed(Button::B) {
            self.orientation_index = (self.orientation_index + 1) % self.orientations.len();
            let next = self.orientations[self.orientation_index];
            info!("cycling IMU mount orientation to {:?}", next);
            Some(next)
        } else {
            None
        };

        DriveUpdate {
            powers,
            direction_change,
            imu_init,
        }
    }
}

impl Default for MecanumDrive {
    fn default() -> Self {
        Self::new(
            crate::config::Y_MULTIPLIER,
            crate::config::X_MULTIPLIER,
            crate::config::RX_MULTIPLIER,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::GamepadState;
    use std::f64::consts::FRAC_PI_2;

    fn pad_with(state: GamepadState) -> GamepadTracker {
        let mut pad = GamepadTracker::new();
        pad.update(state);
        pad
    }

    fn sticks(left_x: f64, left_y: f64, right_x: f64) -> GamepadState {
        GamepadState {
            left_stick_x: left_x,
            left_stick_y: left_y,
            right_stick_x: right_x,
            ..GamepadState::default()
        }
    }

    fn both_bumpers() -> GamepadState {
        GamepadState {
            left_bumper: true,
            right_bumper: true,
            ..GamepadState::default()
        }
    }

    #[test]
    fn test_arcade_full_forward_saturates_all_wheels() {
        let mut drive = MecanumDrive::new(1.0, 1.0, 1.0);
        // Stick forward is negative Y on the pad
        let pad = pad_with(sticks(0.0, -1.0, 0.0));
        let update = drive.update(&pad, 0.0);
        assert_eq!(update.powers.front_left, 1.0);
        assert_eq!(update.powers.front_right, 1.0);
        assert_eq!(update.powers.rear_left, 1.0);
        assert_eq!(update.powers.rear_right, 1.0);
    }

    #[test]
    fn test_arcade_normalization_engages_above_unit_sum() {
        let mut drive = MecanumDrive::new(1.0, 1.0, 1.0);
        let pad = pad_with(sticks(1.0, -1.0, 1.0));
        let update = drive.update(&pad, 0.0);
        // denominator = |1| + |1| + |1| = 3
        assert!((update.powers.front_left - 1.0).abs() < 1e-12);
        assert!((update.powers.rear_left - 1.0 / 3.0).abs() < 1e-12);
        assert!((update.powers.front_right + 1.0 / 3.0).abs() < 1e-12);
        assert!((update.powers.rear_right - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_arcade_small_inputs_stay_linear() {
        let mut drive = MecanumDrive::new(1.0, 1.0, 1.0);
        let pad = pad_with(sticks(0.0, -0.25, 0.0));
        let update = drive.update(&pad, 0.0);
        assert!((update.powers.front_left - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_bumper_chord_switches_arcade_to_field_centric() {
        let mut drive = MecanumDrive::new(1.0, 1.0, 1.0);
        let pad = pad_with(both_bumpers());
        // The cycle with the chord still runs arcade kinematics
        drive.update(&pad, 0.0);
        assert_eq!(drive.mode(), DriveMode::FieldCentric);
    }

    #[test]
    fn test_single_bumper_leaves_mode_unchanged() {
        let mut drive = MecanumDrive::new(1.0, 1.0, 1.0);
        let pad = pad_with(GamepadState {
            left_bumper: true,
            ..GamepadState::default()
        });
        drive.update(&pad, 0.0);
        assert_eq!(drive.mode(), DriveMode::Arcade);
    }

    #[test]
    fn test_held_bumpers_do_not_retrigger_transition() {
        let mut drive = MecanumDrive::new(1.0, 1.0, 1.0);
        let mut pad = GamepadTracker::new();
        pad.update(both_bumpers());
        drive.update(&pad, 0.0);
        assert_eq!(drive.mode(), DriveMode::FieldCentric);
        // Chord still down the next cycle: held, not pressed, so no bounce
        pad.update(both_bumpers());
        drive.update(&pad, 0.0);
        assert_eq!(drive.mode(), DriveMode::FieldCentric);
    }

    #[test]
    fn test_dpad_press_enters_direction_debug() {
        let mut drive = MecanumDrive::new(1.0, 1.0, 1.0);
        let pad = pad_with(GamepadState {
            dpad_down: true,
            ..GamepadState::default()
        });
        drive.update(&pad, 0.0);
        assert_eq!(drive.mode(), DriveMode::DirectionDebug);
    }

    #[test]
    fn test_field_centric_returns_to_arcade_on_chord() {
        let mut drive = MecanumDrive::new(1.0, 1.0, 1.0);
        let mut pad = GamepadTracker::new();
        pad.update(both_bumpers());
        drive.update(&pad, 0.0);
        pad.update(GamepadState::default());
        drive.update(&pad, 0.0);
        pad.update(both_bumpers());
        drive.update(&pad, 0.0);
        assert_eq!(drive.mode(), DriveMode::Arcade);
    }

    #[test]
    fn test_field_centric_rotates_by_negative_heading() {
        let mut drive = MecanumDrive::new(1.0, 1.0, 1.0);
        let mut pad = GamepadTracker::new();
        pad.update(both_bumpers());
        drive.update(&pad, 0.0);

        // Robot facing +90 degrees, stick pushed straight forward: the
        // field-frame command becomes a pure rightward strafe
        pad.update(sticks(0.0, -1.0, 0.0));
        let update = drive.update(&pad, FRAC_PI_2);
        assert!((update.powers.front_left - 1.0).abs() < 1e-9);
        assert!((update.powers.rear_left + 1.0).abs() < 1e-9);
        assert!((update.powers.front_right + 1.0).abs() < 1e-9);
        assert!((update.powers.rear_right - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_field_centric_zero_heading_matches_arcade() {
        let mut arcade = MecanumDrive::new(1.0, 1.0, 1.0);
        let mut field = MecanumDrive::new(1.0, 1.0, 1.0);
        let mut pad = GamepadTracker::new();
        pad.update(both_bumpers());
        field.update(&pad, 0.0);

        pad.update(sticks(0.3, -0.5, 0.2));
        let a = arcade.update(&pad, 0.0);
        let f = field.update(&pad, 0.0);
        assert!((a.powers.front_left - f.powers.front_left).abs() < 1e-12);
        assert!((a.powers.rear_right - f.powers.rear_right).abs() < 1e-12);
    }

    fn enter_debug(drive: &mut MecanumDrive, pad: &mut GamepadTracker) {
        pad.update(GamepadState {
            dpad_up: true,
            ..GamepadState::default()
        });
        drive.update(pad, 0.0);
        pad.update(GamepadState::default());
        drive.update(pad, 0.0);
        assert_eq!(drive.mode(), DriveMode::DirectionDebug);
    }

    #[test]
    fn test_debug_dpad_selects_wheel_and_persists() {
        let mut drive = MecanumDrive::new(1.0, 1.0, 1.0);
        let mut pad = GamepadTracker::new();
        enter_debug(&mut drive, &mut pad);
        assert_eq!(drive.debug_wheel(), DebugWheel::FrontLeft);

        pad.update(GamepadState {
            dpad_right: true,
            ..GamepadState::default()
        });
        drive.update(&pad, 0.0);
        assert_eq!(drive.debug_wheel(), DebugWheel::FrontRight);

        // Selection persists across idle cycles
        pad.update(GamepadState::default());
        drive.update(&pad, 0.0);
        assert_eq!(drive.debug_wheel(), DebugWheel::FrontRight);
    }

    #[test]
    fn test_debug_y_drives_only_active_wheel() {
        let mut drive = MecanumDrive::new(1.0, 1.0, 1.0);
        let mut pad = GamepadTracker::new();
        enter_debug(&mut drive, &mut pad);

        pad.update(GamepadState {
            y: true,
            ..GamepadState::default()
        });
        let update = drive.update(&pad, 0.0);
        assert_eq!(update.powers.front_left, 0.7);
        assert_eq!(update.powers.front_right, 0.0);
        assert_eq!(update.powers.rear_left, 0.0);
        assert_eq!(update.powers.rear_right, 0.0);

        pad.update(GamepadState::default());
        let update = drive.update(&pad, 0.0);
        assert_eq!(update.powers, WheelPowers::zero());
    }

    #[test]
    fn test_debug_a_toggles_wheel_direction() {
        let mut drive = MecanumDrive::new(1.0, 1.0, 1.0);
        let mut pad = GamepadTracker::new();
        enter_debug(&mut drive, &mut pad);
        assert_eq!(
            drive.wheel_direction(DebugWheel::FrontLeft),
            WheelDirection::Forward
        );

        pad.update(GamepadState {
            a: true,
            ..GamepadState::default()
        });
        let update = drive.update(&pad, 0.0);
        assert_eq!(
            update.direction_change,
            Some((DebugWheel::FrontLeft, WheelDirection::Reverse))
        );
        assert_eq!(
            drive.wheel_direction(DebugWheel::FrontLeft),
            WheelDirection::Reverse
        );

        pad.update(GamepadState::default());
        pad.update(GamepadState {
            a: true,
            ..GamepadState::default()
        });
        let update = drive.update(&pad, 0.0);
        assert_eq!(
            update.direction_change,
            Some((DebugWheel::FrontLeft, WheelDirection::Forward))
        );
    }

    #[test]
    fn test_debug_b_cycles_imu_orientation_and_wraps() {
        let mut drive = MecanumDrive::new(1.0, 1.0, 1.0);
        let mut pad = GamepadTracker::new();
        enter_debug(&mut drive, &mut pad);
        let initial = drive.current_orientation();

        // 24 presses walk the whole list and wrap back to the start
        let mut emitted = Vec::new();
        for _ in 0..24 {
            pad.update(GamepadState {
                b: true,
                ..GamepadState::default()
            });
            let update = drive.update(&pad, 0.0);
            emitted.push(update.imu_init.unwrap());
            pad.update(GamepadState::default());
            drive.update(&pad, 0.0);
        }
        assert_eq!(drive.current_orientation(), initial);
        assert_eq!(*emitted.last().unwrap(), initial);
    }

    #[test]
    fn test_debug_exits_to_arcade_on_bumper_chord() {
        let mut drive = MecanumDrive::new(1.0, 1.0, 1.0);
        let mut pad = GamepadTracker::new();
        enter_debug(&mut drive, &mut pad);

        pad.update(both_bumpers());
        drive.update(&pad, 0.0);
        assert_eq!(drive.mode(), DriveMode::Arcade);
    }

    #[test]
    fn test_multipliers_scale_arcade_inputs() {
        let mut drive = MecanumDrive::new(0.5, 1.0, 1.0);
        let pad = pad_with(sticks(0.0, -1.0, 0.0));
        let update = drive.update(&pad, 0.0);
        assert!((update.powers.front_left - 0.5).abs() < 1e-12);
    }
}
