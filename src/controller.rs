//! High-level controller for network diagram windows.
//!
//! The [`StageController`] reduces boilerplate by owning the [`Stage`], keeping
//! bound Slint models in sync, and handing out ready-made pointer callbacks.
//!
//! # Example
//!
//! ```ignore
//! use slint_netdiagram::{DeviceKind, StageController};
//!
//! slint::include_modules!();
//!
//! fn main() {
//!     let window = MainWindow::new().unwrap();
//!     let ctrl = StageController::new();
//!
//!     let sprites = Rc::new(VecModel::<DeviceSprite>::default());
//!     ctrl.bind_sprites(sprites.clone(), |r| DeviceSprite { /* ... */ });
//!     window.set_devices(ModelRc::from(sprites));
//!
//!     window.on_pointer_pressed(ctrl.pointer_pressed_callback());
//!     window.on_pointer_moved(ctrl.pointer_moved_callback());
//!     window.on_pointer_released(ctrl.pointer_released_callback());
//!     window.on_clicked(ctrl.clicked_callback());
//!
//!     let router = ctrl.add_device_at(DeviceKind::Router, true, 100.0, 100.0, |_, d| {
//!         println!("clicked {:?}", d.id());
//!     });
//!
//!     window.run().unwrap();
//! }
//! ```

use crate::device::{ClickHandler, Device, DeviceId, DeviceKind};
use crate::drag::PointerEvent;
use crate::error::DiagramError;
use crate::hit_test::Point;
use crate::line::LineId;
use crate::models::{LineRow, SpriteRow, StageModels};
use crate::options::DiagramOptions;
use crate::stage::Stage;
use slint::{Image, VecModel};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Controller that owns a stage and provides callback implementations.
///
/// Every mutating call re-syncs the bound models before returning. Click
/// handlers run after the stage borrow is released, so they may call back
/// into the controller. A click that ends a drag which moved a device is not
/// delivered.
///
/// Clone this controller to share it across callbacks.
#[derive(Clone)]
pub struct StageController {
    stage: Rc<RefCell<Stage>>,
    models: Rc<RefCell<StageModels>>,
    moved_since_press: Rc<Cell<bool>>,
}

impl Default for StageController {
    fn default() -> Self {
        Self::new()
    }
}

impl StageController {
    /// Create a controller around a fresh stage with default options.
    pub fn new() -> Self {
        Self::with_options(DiagramOptions::default())
    }

    pub fn with_options(options: DiagramOptions) -> Self {
        Self::with_stage(Stage::with_options(options))
    }

    pub fn with_stage(stage: Stage) -> Self {
        Self {
            stage: Rc::new(RefCell::new(stage)),
            models: Rc::new(RefCell::new(StageModels::new())),
            moved_since_press: Rc::new(Cell::new(false)),
        }
    }

    /// Get access to the stage.
    pub fn stage(&self) -> Rc<RefCell<Stage>> {
        self.stage.clone()
    }

    /// Device of the open stage-wide drag, if any.
    pub fn dragged_device(&self) -> Option<DeviceId> {
        self.stage.borrow().active_drag().map(|s| s.device())
    }

    // === Model binding ===

    pub fn bind_sprites<P, F>(&self, model: Rc<VecModel<P>>, constructor: F)
    where
        P: Clone + 'static,
        F: Fn(&SpriteRow) -> P + 'static,
    {
        self.models.borrow_mut().bind_sprites(model, constructor);
        self.sync();
    }

    pub fn bind_lines<P, F>(&self, model: Rc<VecModel<P>>, constructor: F)
    where
        P: Clone + 'static,
        F: Fn(&LineRow) -> P + 'static,
    {
        self.models.borrow_mut().bind_lines(model, constructor);
        self.sync();
    }

    /// Draw devices whose image path is `path` with `image` (e.g. an embedded icon).
    pub fn register_icon(&self, path: impl Into<String>, image: Image) {
        self.models.borrow().icons().insert(path, image);
        self.sync();
    }

    /// Push current stage contents into the bound models.
    pub fn sync(&self) {
        self.models.borrow().sync(&self.stage.borrow());
    }

    // === Stage operations ===

    pub fn attach(&self, device: Device) -> DeviceId {
        let id = self.stage.borrow_mut().attach(device);
        self.sync();
        id
    }

    pub fn add_device<F>(&self, kind: DeviceKind, drag_enabled: bool, on_click: F) -> DeviceId
    where
        F: Fn(&PointerEvent, &Device) + 'static,
    {
        let id = self.stage.borrow_mut().add_device(kind, drag_enabled, on_click);
        self.sync();
        id
    }

    pub fn add_device_at<F>(
        &self,
        kind: DeviceKind,
        drag_enabled: bool,
        x: f32,
        y: f32,
        on_click: F,
    ) -> DeviceId
    where
        F: Fn(&PointerEvent, &Device) + 'static,
    {
        let handler: ClickHandler = Rc::new(on_click);
        let id = self
            .stage
            .borrow_mut()
            .add_device_at(kind, drag_enabled, Some(handler), x, y);
        self.sync();
        id
    }

    pub fn connect(&self, from: DeviceId, to: DeviceId) -> Result<LineId, DiagramError> {
        let result = self.stage.borrow_mut().connect(from, to);
        if result.is_ok() {
            self.sync();
        }
        result
    }

    pub fn connect_to(&self, from: DeviceId, to: DeviceId) -> bool {
        self.connect(from, to).is_ok()
    }

    pub fn move_device(&self, id: DeviceId, x: f32, y: f32) -> Result<(), DiagramError> {
        self.stage.borrow_mut().move_device(id, Point::new(x, y))?;
        self.sync();
        Ok(())
    }

    pub fn resize_device(
        &self,
        id: DeviceId,
        px: f32,
        py: f32,
        pw: f32,
        ph: f32,
    ) -> Result<(), DiagramError> {
        self.stage.borrow_mut().resize_device(id, px, py, pw, ph)?;
        self.sync();
        Ok(())
    }

    /// Set the stroke for lines created from now on.
    pub fn set_line_style(&self, color: [u8; 4], width: f32) {
        self.stage.borrow_mut().set_line_style(color, width);
    }

    // === Direct handlers ===

    /// Press-down: may open a stage-wide drag. Returns the dragged device.
    pub fn handle_pointer_pressed(&self, x: f32, y: f32) -> Option<DeviceId> {
        self.moved_since_press.set(false);
        let session = self.stage.borrow_mut().pointer_down(&PointerEvent::new(x, y))?;
        self.sync();
        Some(session.device())
    }

    /// Stage-wide move. Returns whether a device followed the pointer.
    pub fn handle_pointer_moved(&self, x: f32, y: f32) -> bool {
        let moved = self
            .stage
            .borrow_mut()
            .pointer_move(&PointerEvent::new(x, y))
            .is_some();
        if moved {
            self.moved_since_press.set(true);
            self.sync();
        }
        moved
    }

    /// Stage-wide release. Returns the device whose drag ended.
    pub fn handle_pointer_released(&self, x: f32, y: f32) -> Option<DeviceId> {
        let session = self.stage.borrow_mut().pointer_up(&PointerEvent::new(x, y))?;
        self.sync();
        Some(session.device())
    }

    /// Click: calls the target's handler with the borrow released.
    ///
    /// Ignored when a device was dragged since the last press.
    pub fn handle_click(&self, x: f32, y: f32) -> Option<DeviceId> {
        if self.moved_since_press.get() {
            log::trace!("click at ({}, {}) ends a drag, not delivered", x, y);
            return None;
        }
        let event = PointerEvent::new(x, y);
        let (id, device) = {
            let stage = self.stage.borrow();
            let id = stage.device_at(x, y)?;
            (id, stage.device(id)?.clone())
        };
        if let Some(handler) = device.click_handler() {
            handler(&event, &device);
        }
        Some(id)
    }

    /// Host surface resized.
    pub fn handle_stage_resized(&self, width: f32, height: f32) {
        self.stage.borrow_mut().set_size(width, height);
    }

    // === Callback factories ===

    /// Returns a callback for `pointer-pressed(x, y)`.
    pub fn pointer_pressed_callback(&self) -> impl Fn(f32, f32) + Clone {
        let ctrl = self.clone();
        move |x, y| {
            ctrl.handle_pointer_pressed(x, y);
        }
    }

    /// Returns a callback for `pointer-moved(x, y)`.
    pub fn pointer_moved_callback(&self) -> impl Fn(f32, f32) + Clone {
        let ctrl = self.clone();
        move |x, y| {
            ctrl.handle_pointer_moved(x, y);
        }
    }

    /// Returns a callback for `pointer-released(x, y)`.
    pub fn pointer_released_callback(&self) -> impl Fn(f32, f32) + Clone {
        let ctrl = self.clone();
        move |x, y| {
            ctrl.handle_pointer_released(x, y);
        }
    }

    /// Returns a callback for `clicked(x, y)`.
    pub fn clicked_callback(&self) -> impl Fn(f32, f32) + Clone {
        let ctrl = self.clone();
        move |x, y| {
            ctrl.handle_click(x, y);
        }
    }

    /// Returns a callback for `stage-resized(width, height)`.
    pub fn stage_resized_callback(&self) -> impl Fn(f32, f32) + Clone {
        let ctrl = self.clone();
        move |w, h| ctrl.handle_stage_resized(w, h)
    }
}
