//! Drawing session: turns input events into strokes and view changes.

use crate::config::CanvasConfig;
use crate::document::AurchiveState;
use crate::input::{InputEvent, PointerEvent, WheelAction, WheelEvent, wheel_action};
use crate::matrix::TransformResult;
use crate::objects::{ObjectId, Stroke};
use crate::view::ViewState;
use kurbo::Point;

/// Receives drawable geometry produced by a [`StrokeSession`].
///
/// The session only supplies ids and path data; presentation is up to the
/// implementation.
pub trait RenderSink {
    /// A new stroke was placed on the canvas.
    fn create_drawable(&mut self, stroke: &Stroke);

    /// The path data of an existing drawable changed.
    fn update_path(&mut self, id: ObjectId, path: &str);

    /// The view transform changed. `transform` is `a, b, c, d, e, f`.
    fn set_view_transform(&mut self, _transform: &str) {}
}

/// Whether a stroke is being drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Idle,
    Drawing {
        stroke: ObjectId,
    },
}

/// Owns the view and the canvas objects, and applies input events to them
/// one at a time.
#[derive(Debug, Clone, Default)]
pub struct StrokeSession {
    config: CanvasConfig,
    view: ViewState,
    document: AurchiveState,
    state: SessionState,
}

impl StrokeSession {
    /// Start an idle session. `config` is taken as is; run
    /// [`CanvasConfig::validate`] first to reject unusable values.
    pub fn new(config: CanvasConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// The objects drawn so far.
    pub fn document(&self) -> &AurchiveState {
        &self.document
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.state, SessionState::Drawing { .. })
    }

    /// The stroke currently being drawn.
    pub fn active_stroke(&self) -> Option<&Stroke> {
        match self.state {
            SessionState::Drawing { stroke } => self.document.stroke(stroke),
            SessionState::Idle => None,
        }
    }

    /// Dispatch any input event.
    pub fn handle_event(&mut self, event: InputEvent, sink: &mut impl RenderSink) -> TransformResult<()> {
        match event {
            InputEvent::Pointer(PointerEvent::Down { position, .. }) => {
                self.pointer_down(position, sink);
            }
            InputEvent::Pointer(PointerEvent::Move { position, .. }) => {
                self.pointer_move(position, sink);
            }
            InputEvent::Pointer(PointerEvent::Up { .. }) => self.pointer_up(),
            InputEvent::Pointer(PointerEvent::Out { .. }) => self.pointer_out(),
            InputEvent::Wheel(wheel) => {
                self.wheel(&wheel, sink)?;
            }
        }
        Ok(())
    }

    /// Start a new stroke at a device point. Returns its id.
    ///
    /// A stroke still in progress is finished first.
    pub fn pointer_down(&mut self, device_point: Point, sink: &mut impl RenderSink) -> ObjectId {
        if self.is_drawing() {
            log::debug!("Pointer down while drawing; finishing previous stroke");
            self.finish_stroke();
        }

        let logical = self.view.device_to_logical(device_point);
        let stroke = Stroke::new(logical, self.config.stroke_style);
        let id = stroke.id();

        sink.create_drawable(&stroke);
        sink.update_path(id, &stroke.path().to_string());
        self.document.add_object(stroke);
        self.state = SessionState::Drawing { stroke: id };

        log::debug!("Started stroke {} at {:?}", id, logical);
        id
    }

    /// Extend the active stroke. Returns false when there is none.
    pub fn pointer_move(&mut self, device_point: Point, sink: &mut impl RenderSink) -> bool {
        let SessionState::Drawing { stroke: id } = self.state else {
            return false;
        };

        let logical = self.view.device_to_logical(device_point);
        let Some(stroke) = self.document.stroke_mut(id) else {
            log::warn!("Active stroke {} is missing; returning to idle", id);
            self.state = SessionState::Idle;
            return false;
        };

        if !stroke.add_point(logical) {
            return false;
        }
        log::trace!("Stroke {} now has {} points", id, stroke.len());
        sink.update_path(id, &stroke.path().to_string());
        true
    }

    pub fn pointer_up(&mut self) {
        self.finish_stroke();
    }

    pub fn pointer_out(&mut self) {
        self.finish_stroke();
    }

    /// Apply a wheel gesture to the view.
    ///
    /// The new transform is pushed to the sink after every change.
    pub fn wheel(&mut self, event: &WheelEvent, sink: &mut impl RenderSink) -> TransformResult<WheelAction> {
        let action = wheel_action(event, self.config.platform, &self.config.wheel);
        match action {
            WheelAction::Zoom { pivot, factor } => self.view.zoom_at(pivot, factor)?,
            WheelAction::Pan { delta } => self.view.pan(delta),
        }
        log::trace!("Wheel {:?} -> view {}", action, self.view.to_device_string());
        sink.set_view_transform(&self.view.to_device_string());
        Ok(action)
    }

    fn finish_stroke(&mut self) {
        if let SessionState::Drawing { stroke: id } = self.state {
            if let Some(stroke) = self.document.stroke_mut(id) {
                stroke.freeze();
                log::debug!("Finished stroke {} with {} points", id, stroke.len());
            }
            self.state = SessionState::Idle;
        }
    }
}
