//! Gamepad state: buttons, sticks and triggers for every connected controller.
//!
//! Controllers number their buttons and axes differently, so every pad carries
//! a layout that maps the raw indices reported by the device to the generic
//! [`GamepadButton`] and [`GamepadAxis`] names games use. Pads that report the
//! D-pad as a hat switch get it converted into D-pad button presses.

use std::time::{Duration, Instant};

use glam::{IVec2, Vec2};

use super::InputError;

pub const DEFAULT_DEADZONE: f32 = 0.05;

/// Minimum time between two changes of the same simulated D-pad button.
/// Diagonal hat movement can otherwise repeat a press.
pub const HAT_LOCKOUT: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamepadButton {
    FaceUp = 0,
    FaceDown = 1,
    FaceLeft = 2,
    FaceRight = 3,
    DpadUp = 4,
    DpadDown = 5,
    DpadLeft = 6,
    DpadRight = 7,
    ShoulderLeft = 8,
    ShoulderRight = 9,
    PushLeft = 10,
    PushRight = 11,
    CenterLeft = 12,
    CenterMiddle = 13,
    CenterRight = 14,
}

impl GamepadButton {
    pub const COUNT: usize = 15;

    pub const ALL: [GamepadButton; Self::COUNT] = [
        GamepadButton::FaceUp,
        GamepadButton::FaceDown,
        GamepadButton::FaceLeft,
        GamepadButton::FaceRight,
        GamepadButton::DpadUp,
        GamepadButton::DpadDown,
        GamepadButton::DpadLeft,
        GamepadButton::DpadRight,
        GamepadButton::ShoulderLeft,
        GamepadButton::ShoulderRight,
        GamepadButton::PushLeft,
        GamepadButton::PushRight,
        GamepadButton::CenterLeft,
        GamepadButton::CenterMiddle,
        GamepadButton::CenterRight,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamepadAxis {
    LeftX = 0,
    LeftY = 1,
    LeftTrigger = 2,
    RightX = 3,
    RightY = 4,
    RightTrigger = 5,
}

impl GamepadAxis {
    pub const COUNT: usize = 6;

    pub const ALL: [GamepadAxis; Self::COUNT] = [
        GamepadAxis::LeftX,
        GamepadAxis::LeftY,
        GamepadAxis::LeftTrigger,
        GamepadAxis::RightX,
        GamepadAxis::RightY,
        GamepadAxis::RightTrigger,
    ];

    pub fn is_trigger(self) -> bool {
        matches!(self, GamepadAxis::LeftTrigger | GamepadAxis::RightTrigger)
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Controller families with known layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerKind {
    XboxSeries,
    Xbox360,
    Ps4,
    Ps5,
    Switch,
    Unknown,
}

impl ControllerKind {
    /// Guesses the family from the device name. Unknown pads use the Xbox 360
    /// layout, which most generic controllers follow.
    pub fn from_name(name: &str) -> Self {
        if name.contains("Series") {
            ControllerKind::XboxSeries
        } else if name.contains("Xbox") {
            ControllerKind::Xbox360
        } else if name.contains("PS4") {
            ControllerKind::Ps4
        } else if name.contains("Sony Interactive") {
            ControllerKind::Ps5
        } else if name.contains("Switch") {
            ControllerKind::Switch
        } else {
            ControllerKind::Unknown
        }
    }

    pub fn layout(self) -> &'static Layout {
        match self {
            ControllerKind::XboxSeries => &XBOX_SERIES,
            ControllerKind::Xbox360 | ControllerKind::Unknown => &XBOX_360,
            ControllerKind::Ps4 => &PS4,
            ControllerKind::Ps5 => &PS5,
            ControllerKind::Switch => &SWITCH,
        }
    }
}

/// Raw device indices for each generic button and axis, in
/// [`GamepadButton::ALL`] / [`GamepadAxis::ALL`] order.
#[derive(Debug)]
pub struct Layout {
    buttons: [u8; GamepadButton::COUNT],
    axes: [u8; GamepadAxis::COUNT],
}

impl Layout {
    pub fn button(&self, raw: u8) -> Option<GamepadButton> {
        let index = self.buttons.iter().position(|&b| b == raw)?;
        Some(GamepadButton::ALL[index])
    }

    pub fn axis(&self, raw: u8) -> Option<GamepadAxis> {
        let index = self.axes.iter().position(|&a| a == raw)?;
        Some(GamepadAxis::ALL[index])
    }
}

// Buttons: FU FD FL FR DU DD DL DR LB RB LP RP CL CM CR
// Axes:    LX LY LT RX RY RT
// Xbox pads expose the D-pad as a hat; their D-pad indices are never
// reported and are only filled in by hat conversion.
static XBOX_360: Layout = Layout {
    buttons: [3, 0, 2, 1, 11, 12, 13, 14, 4, 5, 8, 9, 6, 10, 7],
    axes: [0, 1, 2, 3, 4, 5],
};

static XBOX_SERIES: Layout = Layout {
    buttons: [4, 0, 3, 1, 16, 17, 18, 19, 6, 7, 13, 14, 10, 15, 11],
    axes: [0, 1, 5, 2, 3, 4],
};

static PS4: Layout = Layout {
    buttons: [3, 0, 2, 1, 11, 12, 13, 14, 9, 10, 7, 8, 4, 5, 6],
    axes: [0, 1, 4, 2, 3, 5],
};

static PS5: Layout = Layout {
    buttons: [3, 0, 2, 1, 13, 14, 15, 16, 4, 5, 11, 12, 8, 10, 9],
    axes: [0, 1, 2, 3, 4, 5],
};

static SWITCH: Layout = Layout {
    buttons: [2, 1, 3, 0, 11, 12, 13, 14, 9, 10, 7, 8, 4, 5, 6],
    axes: [0, 1, 4, 2, 3, 5],
};

/// Raw gamepad events, as delivered by the device library.
#[derive(Debug, Clone, PartialEq)]
pub enum GamepadEvent {
    Connected { id: u32, name: String },
    Disconnected { id: u32 },
    ButtonPressed { id: u32, button: u8 },
    ButtonReleased { id: u32, button: u8 },
    AxisMoved { id: u32, axis: u8, value: f32 },
    /// Hat position, each component in -1..=1 with y = 1 meaning up.
    HatMoved { id: u32, value: IVec2 },
}

/// D-pad buttons changed by one hat event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HatChange {
    pub pressed: Vec<GamepadButton>,
    pub released: Vec<GamepadButton>,
}

#[derive(Debug, Clone)]
pub struct Gamepad {
    id: u32,
    name: String,
    kind: ControllerKind,
    pressed: [bool; GamepadButton::COUNT],
    axes: [f32; GamepadAxis::COUNT],
    /// Per D-pad direction (up, down, left, right): locked until this instant.
    hat_lockout: [Option<Instant>; 4],
}

impl Gamepad {
    pub fn new(id: u32, name: &str) -> Self {
        let mut axes = [0.0; GamepadAxis::COUNT];
        // Triggers rest fully released, not centered.
        axes[GamepadAxis::LeftTrigger.index()] = -1.0;
        axes[GamepadAxis::RightTrigger.index()] = -1.0;

        Self {
            id,
            name: name.to_string(),
            kind: ControllerKind::from_name(name),
            pressed: [false; GamepadButton::COUNT],
            axes,
            hat_lockout: [None; 4],
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ControllerKind {
        self.kind
    }

    pub fn is_pressed(&self, button: GamepadButton) -> bool {
        self.pressed[button.index()]
    }

    /// Held state of every button, in [`GamepadButton::ALL`] order.
    pub fn pressed(&self) -> [bool; GamepadButton::COUNT] {
        self.pressed
    }

    pub fn face_up(&self) -> bool {
        self.is_pressed(GamepadButton::FaceUp)
    }

    pub fn face_down(&self) -> bool {
        self.is_pressed(GamepadButton::FaceDown)
    }

    pub fn face_left(&self) -> bool {
        self.is_pressed(GamepadButton::FaceLeft)
    }

    pub fn face_right(&self) -> bool {
        self.is_pressed(GamepadButton::FaceRight)
    }

    pub fn dpad_up(&self) -> bool {
        self.is_pressed(GamepadButton::DpadUp)
    }

    pub fn dpad_down(&self) -> bool {
        self.is_pressed(GamepadButton::DpadDown)
    }

    pub fn dpad_left(&self) -> bool {
        self.is_pressed(GamepadButton::DpadLeft)
    }

    pub fn dpad_right(&self) -> bool {
        self.is_pressed(GamepadButton::DpadRight)
    }

    /// Raw axis value. Sticks range over -1..=1, triggers too (-1 released).
    pub fn axis(&self, axis: GamepadAxis) -> f32 {
        self.axes[axis.index()]
    }

    pub fn left_stick(&self) -> Vec2 {
        Vec2::new(self.axis(GamepadAxis::LeftX), self.axis(GamepadAxis::LeftY))
    }

    pub fn right_stick(&self) -> Vec2 {
        Vec2::new(self.axis(GamepadAxis::RightX), self.axis(GamepadAxis::RightY))
    }

    /// Direction the left stick points to in degrees, counter-clockwise from
    /// the right, or `None` while centered.
    pub fn left_angle(&self) -> Option<f32> {
        stick_angle(self.left_stick())
    }

    pub fn right_angle(&self) -> Option<f32> {
        stick_angle(self.right_stick())
    }

    /// How far the left trigger is pulled, 0..=1.
    pub fn left_trigger(&self) -> f32 {
        (self.axis(GamepadAxis::LeftTrigger) + 1.0) / 2.0
    }

    pub fn right_trigger(&self) -> f32 {
        (self.axis(GamepadAxis::RightTrigger) + 1.0) / 2.0
    }

    fn set_button(&mut self, button: GamepadButton, down: bool) {
        self.pressed[button.index()] = down;
    }

    /// Flips a simulated D-pad button unless its lockout is still running.
    fn toggle_dpad(&mut self, slot: usize, button: GamepadButton, now: Instant) -> bool {
        if self.hat_lockout[slot].is_some_and(|until| now < until) {
            return false;
        }
        self.hat_lockout[slot] = Some(now + HAT_LOCKOUT);
        let down = !self.is_pressed(button);
        self.set_button(button, down);
        true
    }

    fn convert_hat(&mut self, value: IVec2, now: Instant) -> HatChange {
        let mut change = HatChange::default();
        // (component, direction, lockout slot, button)
        let directions = [
            (value.x, 1, 3, GamepadButton::DpadRight),
            (value.x, -1, 2, GamepadButton::DpadLeft),
            (value.y, 1, 0, GamepadButton::DpadUp),
            (value.y, -1, 1, GamepadButton::DpadDown),
        ];

        for (component, direction, slot, button) in directions {
            let want = component == direction;
            if want != self.is_pressed(button) && self.toggle_dpad(slot, button, now) {
                if want {
                    change.pressed.push(button);
                } else {
                    change.released.push(button);
                }
            }
        }
        change
    }
}

fn stick_angle(stick: Vec2) -> Option<f32> {
    if stick == Vec2::ZERO {
        return None;
    }
    // Device y grows downward; flip it so angles grow counter-clockwise.
    let degrees = stick.y.atan2(stick.x).to_degrees();
    Some((360.0 - degrees).rem_euclid(360.0))
}

/// All connected gamepads, in connection order.
#[derive(Debug)]
pub struct GamepadManager {
    pads: Vec<Gamepad>,
    default_id: Option<u32>,
    deadzone: f32,
}

impl GamepadManager {
    pub fn new() -> Self {
        Self::with_deadzone(DEFAULT_DEADZONE)
    }

    pub fn with_deadzone(deadzone: f32) -> Self {
        Self {
            pads: Vec::new(),
            default_id: None,
            deadzone: deadzone.clamp(0.0, 1.0),
        }
    }

    pub fn deadzone(&self) -> f32 {
        self.deadzone
    }

    pub fn num(&self) -> usize {
        self.pads.len()
    }

    pub fn ids(&self) -> Vec<u32> {
        self.pads.iter().map(Gamepad::id).collect()
    }

    pub fn get(&self, id: u32) -> Option<&Gamepad> {
        self.pads.iter().find(|p| p.id == id)
    }

    /// The earliest connected pad that is still around.
    pub fn default_pad(&self) -> Option<&Gamepad> {
        self.get(self.default_id?)
    }

    pub fn connect(&mut self, id: u32, name: &str) {
        let pad = Gamepad::new(id, name);
        log::info!("INPUT: Gamepad {} connected: {} ({:?})", id, name, pad.kind);

        if let Some(existing) = self.pads.iter_mut().find(|p| p.id == id) {
            *existing = pad;
        } else {
            self.pads.push(pad);
        }
        if self.default_id.is_none() {
            self.default_id = Some(id);
        }
    }

    pub fn disconnect(&mut self, id: u32) {
        self.pads.retain(|p| p.id != id);
        log::info!("INPUT: Gamepad {} disconnected", id);

        if self.default_id == Some(id) || self.pads.is_empty() {
            self.default_id = self.pads.first().map(Gamepad::id);
        }
    }

    pub fn press(&mut self, id: u32, raw_button: u8) -> Result<(), InputError> {
        self.set_raw_button(id, raw_button, true)
    }

    pub fn release(&mut self, id: u32, raw_button: u8) -> Result<(), InputError> {
        self.set_raw_button(id, raw_button, false)
    }

    /// Stores an axis value, applying the deadzone.
    ///
    /// Sticks inside the deadzone read as 0. Triggers snap to -1 or 1 within
    /// the deadzone of either end.
    pub fn set_axis(&mut self, id: u32, raw_axis: u8, value: f32) -> Result<(), InputError> {
        let deadzone = self.deadzone;
        let pad = self.pad_mut(id)?;
        let Some(axis) = pad.kind.layout().axis(raw_axis) else {
            log::debug!("INPUT: Gamepad {} reported unmapped axis {}", id, raw_axis);
            return Ok(());
        };

        let value = if axis.is_trigger() {
            if value < -1.0 + deadzone {
                -1.0
            } else if value > 1.0 - deadzone {
                1.0
            } else {
                value
            }
        } else if value.abs() > deadzone {
            value
        } else {
            0.0
        };
        pad.axes[axis.index()] = value;
        Ok(())
    }

    /// Converts a hat position into D-pad presses and releases.
    pub fn convert_hat(
        &mut self,
        id: u32,
        value: IVec2,
        now: Instant,
    ) -> Result<HatChange, InputError> {
        let pad = self.pad_mut(id)?;
        Ok(pad.convert_hat(value.clamp(IVec2::NEG_ONE, IVec2::ONE), now))
    }

    pub fn apply(&mut self, event: &GamepadEvent) -> Result<(), InputError> {
        self.apply_at(event, Instant::now())
    }

    /// Same as [`apply`](Self::apply) with an explicit clock for hat lockouts.
    pub fn apply_at(&mut self, event: &GamepadEvent, now: Instant) -> Result<(), InputError> {
        match event {
            GamepadEvent::Connected { id, name } => self.connect(*id, name),
            GamepadEvent::Disconnected { id } => self.disconnect(*id),
            GamepadEvent::ButtonPressed { id, button } => self.press(*id, *button)?,
            GamepadEvent::ButtonReleased { id, button } => self.release(*id, *button)?,
            GamepadEvent::AxisMoved { id, axis, value } => self.set_axis(*id, *axis, *value)?,
            GamepadEvent::HatMoved { id, value } => {
                self.convert_hat(*id, *value, now)?;
            }
        }
        Ok(())
    }

    fn set_raw_button(&mut self, id: u32, raw_button: u8, down: bool) -> Result<(), InputError> {
        let pad = self.pad_mut(id)?;
        match pad.kind.layout().button(raw_button) {
            Some(button) => pad.set_button(button, down),
            None => log::debug!("INPUT: Gamepad {} reported unmapped button {}", id, raw_button),
        }
        Ok(())
    }

    fn pad_mut(&mut self, id: u32) -> Result<&mut Gamepad, InputError> {
        self.pads
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(InputError::UnknownGamepad(id))
    }
}

impl Default for GamepadManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager_with_pad() -> GamepadManager {
        let mut manager = GamepadManager::new();
        manager.connect(7, "Xbox 360 Controller");
        manager
    }

    #[test]
    fn test_kind_from_name() {
        assert_eq!(
            ControllerKind::from_name("Xbox Series X Controller"),
            ControllerKind::XboxSeries
        );
        assert_eq!(ControllerKind::from_name("PS4 Controller"), ControllerKind::Ps4);
        assert_eq!(
            ControllerKind::from_name("Sony Interactive Entertainment Wireless Controller"),
            ControllerKind::Ps5
        );
        assert_eq!(ControllerKind::from_name("Some Pad"), ControllerKind::Unknown);
    }

    #[test]
    fn test_raw_buttons_map_through_layout() {
        let mut manager = manager_with_pad();
        // Raw 0 is the lower face button (A) on an Xbox pad.
        manager.press(7, 0).unwrap();
        let pad = manager.get(7).unwrap();
        assert!(pad.face_down());
        assert!(!pad.face_up());

        manager.release(7, 0).unwrap();
        assert!(!manager.get(7).unwrap().face_down());
    }

    #[test]
    fn test_switch_layout_differs() {
        let mut manager = GamepadManager::new();
        manager.connect(1, "Nintendo Switch Pro Controller");
        manager.press(1, 0).unwrap();
        assert!(manager.get(1).unwrap().face_right());
    }

    #[test]
    fn test_unknown_pad_is_an_error() {
        let mut manager = GamepadManager::new();
        assert_eq!(manager.press(3, 0), Err(InputError::UnknownGamepad(3)));
        assert_eq!(
            manager.set_axis(3, 0, 0.5),
            Err(InputError::UnknownGamepad(3))
        );
    }

    #[test]
    fn test_stick_deadzone() {
        let mut manager = manager_with_pad();
        manager.set_axis(7, 0, 0.04).unwrap();
        manager.set_axis(7, 1, -0.5).unwrap();
        assert_eq!(manager.get(7).unwrap().left_stick(), Vec2::new(0.0, -0.5));

        manager.set_axis(7, 0, -0.04).unwrap();
        assert_eq!(manager.get(7).unwrap().axis(GamepadAxis::LeftX), 0.0);
    }

    #[test]
    fn test_triggers_rest_released_and_snap_to_ends() {
        let mut manager = manager_with_pad();
        assert_eq!(manager.get(7).unwrap().left_trigger(), 0.0);

        // Xbox 360: raw axis 2 is the left trigger.
        manager.set_axis(7, 2, 0.97).unwrap();
        assert_eq!(manager.get(7).unwrap().left_trigger(), 1.0);

        manager.set_axis(7, 2, -0.98).unwrap();
        assert_eq!(manager.get(7).unwrap().axis(GamepadAxis::LeftTrigger), -1.0);

        manager.set_axis(7, 2, 0.0).unwrap();
        assert_eq!(manager.get(7).unwrap().left_trigger(), 0.5);
    }

    #[test]
    fn test_stick_angle() {
        let mut manager = manager_with_pad();
        assert_eq!(manager.get(7).unwrap().left_angle(), None);

        manager.set_axis(7, 0, 1.0).unwrap();
        assert_eq!(manager.get(7).unwrap().left_angle(), Some(0.0));

        manager.set_axis(7, 0, 0.0).unwrap();
        manager.set_axis(7, 1, -1.0).unwrap();
        let angle = manager.get(7).unwrap().left_angle().unwrap();
        assert!((angle - 90.0).abs() < 1e-4);
    }

    #[test]
    fn test_hat_presses_and_releases_dpad() {
        let mut manager = manager_with_pad();
        let t0 = Instant::now();

        let change = manager.convert_hat(7, IVec2::new(1, 1), t0).unwrap();
        assert_eq!(
            change.pressed,
            vec![GamepadButton::DpadRight, GamepadButton::DpadUp]
        );
        assert!(change.released.is_empty());
        let pad = manager.get(7).unwrap();
        assert!(pad.dpad_right() && pad.dpad_up());

        let later = t0 + HAT_LOCKOUT * 2;
        let change = manager.convert_hat(7, IVec2::new(-1, 0), later).unwrap();
        assert_eq!(change.pressed, vec![GamepadButton::DpadLeft]);
        assert_eq!(
            change.released,
            vec![GamepadButton::DpadRight, GamepadButton::DpadUp]
        );
        let pad = manager.get(7).unwrap();
        assert!(pad.dpad_left() && !pad.dpad_right() && !pad.dpad_up());
    }

    #[test]
    fn test_hat_lockout_suppresses_ghost_changes() {
        let mut manager = manager_with_pad();
        let t0 = Instant::now();

        manager.convert_hat(7, IVec2::new(0, 1), t0).unwrap();
        let change = manager
            .convert_hat(7, IVec2::new(0, 0), t0 + Duration::from_millis(10))
            .unwrap();
        assert_eq!(change, HatChange::default());
        assert!(manager.get(7).unwrap().dpad_up());

        let change = manager
            .convert_hat(7, IVec2::new(0, 0), t0 + HAT_LOCKOUT)
            .unwrap();
        assert_eq!(change.released, vec![GamepadButton::DpadUp]);
    }

    #[test]
    fn test_default_pad_follows_connections() {
        let mut manager = GamepadManager::new();
        assert!(manager.default_pad().is_none());

        manager.connect(4, "PS4 Controller");
        manager.connect(2, "Xbox 360 Controller");
        manager.connect(9, "Switch Pro Controller");
        assert_eq!(manager.num(), 3);
        assert_eq!(manager.ids(), vec![4, 2, 9]);
        assert_eq!(manager.default_pad().map(Gamepad::id), Some(4));

        // Removing a non-default pad keeps the default.
        manager.disconnect(9);
        assert_eq!(manager.default_pad().map(Gamepad::id), Some(4));

        // Removing the default hands it to the earliest remaining pad.
        manager.disconnect(4);
        assert_eq!(manager.default_pad().map(Gamepad::id), Some(2));

        manager.disconnect(2);
        assert!(manager.default_pad().is_none());
        assert_eq!(manager.num(), 0);

        manager.connect(5, "Xbox 360 Controller");
        assert_eq!(manager.default_pad().map(Gamepad::id), Some(5));
    }

    #[test]
    fn test_apply_events() {
        let mut manager = GamepadManager::new();
        let t0 = Instant::now();
        let events = [
            GamepadEvent::Connected {
                id: 1,
                name: "PS4 Controller".to_string(),
            },
            GamepadEvent::ButtonPressed { id: 1, button: 3 },
            GamepadEvent::AxisMoved {
                id: 1,
                axis: 2,
                value: 0.75,
            },
            GamepadEvent::HatMoved {
                id: 1,
                value: IVec2::new(0, -1),
            },
        ];
        for event in &events {
            manager.apply_at(event, t0).unwrap();
        }

        let pad = manager.get(1).unwrap();
        assert!(pad.face_up());
        assert_eq!(pad.axis(GamepadAxis::RightX), 0.75);
        assert!(pad.dpad_down());

        assert_eq!(
            manager.apply_at(&GamepadEvent::ButtonPressed { id: 2, button: 0 }, t0),
            Err(InputError::UnknownGamepad(2))
        );
    }
}
