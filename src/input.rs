//! Pointer input and the mapping from buttons and modifiers to gestures.

use glam::IVec2;
use log::trace;
use serde::{Deserialize, Serialize};

use crate::controller::{CameraController, Motion};

/// Pointer button identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerButton {
    Left,
    Middle,
    Right,
}

/// Keyboard modifiers held when a button goes down
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub alt: bool,
    pub ctrl: bool,
    /// Command on macOS, the logo key elsewhere
    pub cmd: bool,
    pub shift: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        alt: false,
        ctrl: false,
        cmd: false,
        shift: false,
    };

    pub const ALT: Modifiers = Modifiers {
        alt: true,
        ..Modifiers::NONE
    };

    pub const CTRL: Modifiers = Modifiers {
        ctrl: true,
        ..Modifiers::NONE
    };

    pub const CMD: Modifiers = Modifiers {
        cmd: true,
        ..Modifiers::NONE
    };
}

/// A pointer event in viewport pixels, origin at the top left.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum PointerEvent {
    Press {
        position: IVec2,
        button: PointerButton,
        #[serde(default)]
        modifiers: Modifiers,
    },
    Move {
        position: IVec2,
    },
    Release {
        position: IVec2,
    },
    Scroll {
        position: IVec2,
        delta: IVec2,
    },
}

impl PointerEvent {
    pub fn position(&self) -> IVec2 {
        match *self {
            PointerEvent::Press { position, .. }
            | PointerEvent::Move { position }
            | PointerEvent::Release { position }
            | PointerEvent::Scroll { position, .. } => position,
        }
    }
}

/// Gesture started by pressing `button` with `modifiers` held.
///
/// Middle or Cmd tracks, Right or Ctrl dollies, Alt tumbles. A plain left
/// press starts nothing so selection can use it.
pub fn gesture_for(button: PointerButton, modifiers: Modifiers) -> Option<Motion> {
    if button == PointerButton::Middle || modifiers.cmd {
        Some(Motion::Track)
    } else if button == PointerButton::Right || modifiers.ctrl {
        Some(Motion::Dolly)
    } else if modifiers.alt {
        Some(Motion::Tumble)
    } else {
        None
    }
}

impl CameraController<'_> {
    /// Drives the motion API from one pointer event. Returns whether the
    /// event moved or may move the camera.
    pub fn handle_event(&mut self, event: &PointerEvent) -> bool {
        trace!("{:?}", event);
        match *event {
            PointerEvent::Press {
                position,
                button,
                modifiers,
            } => match gesture_for(button, modifiers) {
                Some(motion) => {
                    self.motion_start(motion, position);
                    true
                }
                None => false,
            },
            PointerEvent::Move { position } => {
                let moving = self.is_moving();
                self.motion_update(position);
                moving
            }
            PointerEvent::Release { position } => {
                let moving = self.is_moving();
                self.motion_end(position);
                moving
            }
            PointerEvent::Scroll { position, delta } => {
                if self.is_moving() {
                    return false;
                }
                self.motion_start(Motion::Dolly, position + delta);
                self.motion_update(position);
                self.motion_end(position);
                true
            }
        }
    }
}
