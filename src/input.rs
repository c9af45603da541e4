use egui::{PointerButton, Pos2};
use rustc_hash::FxHashMap;
use winit::{
    event::{KeyEvent, MouseButton},
    keyboard::{KeyCode, PhysicalKey},
};

/// Discrete things a key press can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    TogglePause,
    SwitchShip(usize),
    ToggleBuildingMenu,
    ToggleShipInventory,
    NearbyBuildingMenu,
    Interact,
}

/// One input event, already stripped of windowing details
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Action(Action),
    /// A key with no binding
    Unbound(KeyCode),
    PointerDown {
        pos: Pos2,
        button: PointerButton,
    },
    /// Relative mouse travel in normalised screen coordinates
    PointerMotion {
        delta: (f32, f32),
    },
}

pub struct KeyBindings {
    actions: FxHashMap<KeyCode, Action>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        use KeyCode::*;
        let actions = [
            (Escape, Action::TogglePause),
            (Digit1, Action::SwitchShip(0)),
            (Digit2, Action::SwitchShip(1)),
            (Digit3, Action::SwitchShip(2)),
            (Space, Action::ToggleBuildingMenu),
            (KeyI, Action::ToggleShipInventory),
            (KeyB, Action::NearbyBuildingMenu),
            (KeyE, Action::Interact),
        ]
        .into_iter()
        .collect();

        Self { actions }
    }
}

impl KeyBindings {
    pub fn bind(&mut self, key: KeyCode, action: Action) {
        self.actions.insert(key, action);
    }

    pub fn action(&self, key: KeyCode) -> Option<Action> {
        self.actions.get(&key).copied()
    }

    /// Turn a key press into an event. Releases and auto-repeats don't produce one
    pub fn translate(&self, event: &KeyEvent) -> Option<InputEvent> {
        let KeyEvent {
            physical_key: PhysicalKey::Code(key),
            state,
            repeat,
            ..
        } = event
        else {
            return None;
        };

        if !state.is_pressed() || *repeat {
            return None;
        }

        Some(match self.action(*key) {
            Some(action) => InputEvent::Action(action),
            None => InputEvent::Unbound(*key),
        })
    }
}

pub fn pointer_button(button: MouseButton) -> Option<PointerButton> {
    match button {
        MouseButton::Left => Some(PointerButton::Primary),
        MouseButton::Right => Some(PointerButton::Secondary),
        MouseButton::Middle => Some(PointerButton::Middle),
        MouseButton::Back => Some(PointerButton::Extra1),
        MouseButton::Forward => Some(PointerButton::Extra2),
        MouseButton::Other(_) => None,
    }
}

/// Held movement keys
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MovementInput {
    pub forward: bool,
    pub backwards: bool,
    pub left: bool,
    pub right: bool,
}

impl MovementInput {
    pub fn handle_keypress(&mut self, event: &KeyEvent) {
        if let KeyEvent {
            state,
            physical_key: PhysicalKey::Code(key),
            ..
        } = *event
        {
            self.set_key(key, state.is_pressed());
        }
    }

    pub fn set_key(&mut self, key: KeyCode, pressed: bool) {
        use KeyCode::*;
        match key {
            KeyW | ArrowUp => self.forward = pressed,
            KeyS | ArrowDown => self.backwards = pressed,
            KeyA | ArrowLeft => self.left = pressed,
            KeyD | ArrowRight => self.right = pressed,
            _ => {}
        }
    }

    /// Un-press everything, eg. when the window loses focus
    pub fn release_all(&mut self) {
        *self = Self::default();
    }
}
