// Edge-triggered gamepad input tracking
//
// Double-buffers the raw snapshot each cycle and derives pressed / released /
// held edges for every tracked input, including the triggers treated as
// booleans and stick movement treated as engagement.

use crate::messages::GamepadState;

/// Every input the tracker derives edges for.
///
/// Triggers count as active while their value is above zero; the stick
/// movement entries count as active while either axis of that stick is
/// non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    A,
    B,
    X,
    Y,
    DpadUp,
    DpadDown,
    DpadLeft,
    DpadRight,
    LeftBumper,
    RightBumper,
    LeftStickButton,
    RightStickButton,
    Start,
    Back,
    LeftTrigger,
    RightTrigger,
    LeftStickMove,
    RightStickMove,
}

impl Button {
    pub const DPAD: [Button; 4] = [
        Button::DpadUp,
        Button::DpadDown,
        Button::DpadLeft,
        Button::DpadRight,
    ];

    pub const BUMPERS: [Button; 2] = [Button::LeftBumper, Button::RightBumper];

    pub const TRIGGERS: [Button; 2] = [Button::LeftTrigger, Button::RightTrigger];

    pub const ALL: [Button; 18] = [
        Button::A,
        Button::B,
        Button::X,
        Button::Y,
        Button::DpadUp,
        Button::DpadDown,
        Button::DpadLeft,
        Button::DpadRight,
        Button::LeftBumper,
        Button::RightBumper,
        Button::LeftStickButton,
        Button::RightStickButton,
        Button::Start,
        Button::Back,
        Button::LeftTrigger,
        Button::RightTrigger,
        Button::LeftStickMove,
        Button::RightStickMove,
    ];

    /// Whether this input counts as active in the given snapshot. This is the
    /// single activity predicate every edge check and aggregate reuses.
    fn is_active(self, state: &GamepadState) -> bool {
        match self {
            Button::A => state.a,
            Button::B => state.b,
            Button::X => state.x,
            Button::Y => state.y,
            Button::DpadUp => state.dpad_up,
            Button::DpadDown => state.dpad_down,
            Button::DpadLeft => state.dpad_left,
            Button::DpadRight => state.dpad_right,
            Button::LeftBumper => state.left_bumper,
            Button::RightBumper => state.right_bumper,
            Button::LeftStickButton => state.left_stick_button,
            Button::RightStickButton => state.right_stick_button,
            Button::Start => state.start,
            Button::Back => state.back,
            Button::LeftTrigger => state.left_trigger > 0.0,
            Button::RightTrigger => state.right_trigger > 0.0,
            Button::LeftStickMove => state.left_stick_x != 0.0 || state.left_stick_y != 0.0,
            Button::RightStickMove => state.right_stick_x != 0.0 || state.right_stick_y != 0.0,
        }
    }
}

/// Retains the current and previous raw snapshot and answers edge queries.
///
/// `update` must be called exactly once per control cycle with the freshest
/// snapshot, even when nothing changed, so that held edges advance.
#[derive(Debug, Clone, Default)]
pub struct GamepadTracker {
    current: GamepadState,
    previous: GamepadState,
}

impl GamepadTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shift the current snapshot into previous and install the new one
    pub fn update(&mut self, raw: GamepadState) {
        self.previous = self.current;
        self.current = raw;
    }

    /// Active this cycle, inactive the previous cycle
    pub fn pressed(&self, button: Button) -> bool {
        button.is_active(&self.current) && !button.is_active(&self.previous)
    }

    /// Inactive this cycle, active the previous cycle
    pub fn released(&self, button: Button) -> bool {
        !button.is_active(&self.current) && button.is_active(&self.previous)
    }

    /// Active both this cycle and the previous cycle
    pub fn held(&self, button: Button) -> bool {
        button.is_active(&self.current) && button.is_active(&self.previous)
    }

    pub fn any_dpad_pressed(&self) -> bool {
        Button::DPAD.iter().any(|&b| self.pressed(b))
    }

    pub fn any_dpad_released(&self) -> bool {
        Button::DPAD.iter().any(|&b| self.released(b))
    }

    pub fn any_dpad_held(&self) -> bool {
        Button::DPAD.iter().any(|&b| self.held(b))
    }

    pub fn any_bumper_pressed(&self) -> bool {
        Button::BUMPERS.iter().any(|&b| self.pressed(b))
    }

    pub fn any_bumper_released(&self) -> bool {
        Button::BUMPERS.iter().any(|&b| self.released(b))
    }

    pub fn any_bumper_held(&self) -> bool {
        Button::BUMPERS.iter().any(|&b| self.held(b))
    }

    pub fn any_trigger_pressed(&self) -> bool {
        Button::TRIGGERS.iter().any(|&b| self.pressed(b))
    }

    pub fn any_trigger_released(&self) -> bool {
        Button::TRIGGERS.iter().any(|&b| self.released(b))
    }

    pub fn any_trigger_held(&self) -> bool {
        Button::TRIGGERS.iter().any(|&b| self.held(b))
    }

    pub fn any_button_pressed(&self) -> bool {
        Button::ALL.iter().any(|&b| self.pressed(b))
    }

    pub fn any_button_released(&self) -> bool {
        Button::ALL.iter().any(|&b| self.released(b))
    }

    pub fn any_button_held(&self) -> bool {
        Button::ALL.iter().any(|&b| self.held(b))
    }

    // Raw continuous values from the current snapshot, unfiltered

    pub fn left_trigger(&self) -> f64 {
        self.current.left_trigger
    }

    pub fn right_trigger(&self) -> f64 {
        self.current.right_trigger
    }

    pub fn left_stick_x(&self) -> f64 {
        self.current.left_stick_x
    }

    pub fn left_stick_y(&self) -> f64 {
        self.current.left_stick_y
    }

    pub fn right_stick_x(&self) -> f64 {
        self.current.right_stick_x
    }

    pub fn right_stick_y(&self) -> f64 {
        self.current.right_stick_y
    }

    pub fn current(&self) -> &GamepadState {
        &self.current
    }

    pub fn previous(&self) -> &GamepadState {
        &self.previous
    }
}
