//! Pointer and wheel events, and how wheel gestures map onto the view.

use crate::config::WheelConfig;
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl, alt or meta turn a wheel gesture into a zoom.
    pub fn is_zoom(&self) -> bool {
        self.ctrl || self.alt || self.meta
    }
}

/// Host platform, as far as wheel handling cares.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Platform {
    /// macOS / iOS: the OS already turns shift+wheel into horizontal scroll.
    Apple,
    #[default]
    Other,
}

/// Pointer events in device coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PointerEvent {
    Down {
        position: Point,
        #[serde(default)]
        modifiers: Modifiers,
    },
    Move {
        position: Point,
        #[serde(default)]
        modifiers: Modifiers,
    },
    Up {
        position: Point,
        #[serde(default)]
        modifiers: Modifiers,
    },
    /// The pointer left the drawing surface.
    Out {
        position: Point,
        #[serde(default)]
        modifiers: Modifiers,
    },
}

impl PointerEvent {
    pub fn position(&self) -> Point {
        match *self {
            PointerEvent::Down { position, .. }
            | PointerEvent::Move { position, .. }
            | PointerEvent::Up { position, .. }
            | PointerEvent::Out { position, .. } => position,
        }
    }
}

/// A scroll-wheel or trackpad event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WheelEvent {
    /// Cursor position in device coordinates.
    pub position: Point,
    /// Raw scroll delta as reported by the platform.
    pub delta: Vec2,
    #[serde(default)]
    pub modifiers: Modifiers,
}

/// Any event the drawing session reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InputEvent {
    Pointer(PointerEvent),
    Wheel(WheelEvent),
}

impl From<PointerEvent> for InputEvent {
    fn from(event: PointerEvent) -> Self {
        InputEvent::Pointer(event)
    }
}

impl From<WheelEvent> for InputEvent {
    fn from(event: WheelEvent) -> Self {
        InputEvent::Wheel(event)
    }
}

/// Wheel delta after platform quirks are removed.
///
/// `x`/`y` are pan amounts (already negated so content follows the
/// gesture); `z` is the relative zoom step, zero for pan gestures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedWheel {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// What a wheel event asks the view to do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WheelAction {
    Zoom { pivot: Point, factor: f64 },
    Pan { delta: Vec2 },
}

/// Normalize a wheel event.
///
/// With a zoom modifier held the vertical delta is clamped to
/// `±|max_zoom_step|` and scaled into a zoom step. A NaN step leaves the
/// delta unclamped. Otherwise shift swaps the
/// vertical delta onto the horizontal axis, except on Apple platforms.
pub fn normalize_wheel(event: &WheelEvent, platform: Platform, config: &WheelConfig) -> NormalizedWheel {
    let Vec2 {
        x: mut delta_x,
        y: mut delta_y,
    } = event.delta;
    let mut delta_z = 0.0;

    if event.modifiers.is_zoom() {
        // `f64::clamp` panics on inverted or NaN bounds; configs reach here unvalidated.
        let limit = config.max_zoom_step.abs();
        let dy = delta_y.max(-limit).min(limit);
        delta_z = dy / config.zoom_divisor;
    } else if event.modifiers.shift && platform != Platform::Apple {
        delta_x = delta_y;
        delta_y = 0.0;
    }

    NormalizedWheel {
        x: -delta_x,
        y: -delta_y,
        z: -delta_z,
    }
}

/// Interpret a wheel event as a zoom or a pan.
pub fn wheel_action(event: &WheelEvent, platform: Platform, config: &WheelConfig) -> WheelAction {
    let normalized = normalize_wheel(event, platform, config);
    if event.modifiers.is_zoom() {
        WheelAction::Zoom {
            pivot: event.position,
            factor: 1.0 + normalized.z,
        }
    } else {
        WheelAction::Pan {
            delta: Vec2::new(normalized.x, normalized.y),
        }
    }
}
