//! Test harness for a single-stage diagram window.
//!
//! Wires a [`StageController`] to the compiled test UI with callback tracking,
//! and offers helpers that fire the window's callbacks the way the
//! `NetworkStage` component does.

#![allow(dead_code)]

use super::CallbackTracker;
use slint::{
    platform::{PointerEventButton, WindowEvent},
    ComponentHandle, LogicalPosition, Model, ModelRc, VecModel,
};
use slint_netdiagram::{DeviceId, DeviceKind, LineId, StageController};
use std::rc::Rc;

// Include the compiled UI from build.rs
slint::include_modules!();

/// Initialize the testing backend for this thread.
/// With init_no_event_loop(), each test thread can have its own backend instance.
/// Uses thread_local to ensure each thread only initializes once.
fn init_testing_backend() {
    use std::cell::Cell;
    thread_local! {
        static INITIALIZED: Cell<bool> = const { Cell::new(false) };
    }

    INITIALIZED.with(|init| {
        if !init.get() {
            i_slint_backend_testing::init_no_event_loop();
            init.set(true);
        }
    });
}

/// Test harness with a router at (10, 10) and a server at (50, 50), connected.
pub struct DiagramTestHarness {
    pub window: MainWindow,
    pub ctrl: StageController,
    pub sprites: Rc<VecModel<DeviceSprite>>,
    pub lines: Rc<VecModel<LinePath>>,
    pub tracker: CallbackTracker,
    pub router: DeviceId,
    pub server: DeviceId,
    pub link: LineId,
}

impl DiagramTestHarness {
    pub fn new() -> Self {
        init_testing_backend();
        let window = MainWindow::new().unwrap();
        let ctrl = StageController::new();
        let tracker = CallbackTracker::new();

        let sprites = Rc::new(VecModel::<DeviceSprite>::default());
        ctrl.bind_sprites(sprites.clone(), |r| DeviceSprite {
            id: r.id,
            icon: r.icon.clone(),
            x: r.x,
            y: r.y,
            width: r.width,
            height: r.height,
            dragging: r.dragging,
        });
        window.set_devices(ModelRc::from(sprites.clone()));

        let lines = Rc::new(VecModel::<LinePath>::default());
        ctrl.bind_lines(lines.clone(), |r| LinePath {
            id: r.id,
            commands: r.commands.clone(),
            color: r.color,
            width: r.width,
        });
        window.set_lines(ModelRc::from(lines.clone()));

        window.on_pointer_pressed({
            let ctrl = ctrl.clone();
            let tracker = tracker.clone();
            move |x, y| {
                ctrl.handle_pointer_pressed(x, y);
                tracker.pointer_pressed.borrow_mut().push((x, y));
                tracker.sequence.borrow_mut().push("pressed");
            }
        });

        window.on_pointer_moved({
            let ctrl = ctrl.clone();
            let tracker = tracker.clone();
            move |x, y| {
                ctrl.handle_pointer_moved(x, y);
                tracker.pointer_moved.borrow_mut().push((x, y));
                tracker.sequence.borrow_mut().push("moved");
            }
        });

        window.on_pointer_released({
            let ctrl = ctrl.clone();
            let tracker = tracker.clone();
            move |x, y| {
                ctrl.handle_pointer_released(x, y);
                tracker.pointer_released.borrow_mut().push((x, y));
                tracker.sequence.borrow_mut().push("released");
            }
        });

        window.on_clicked({
            let clicked = ctrl.clicked_callback();
            let tracker = tracker.clone();
            move |x, y| {
                clicked(x, y);
                tracker.clicked.borrow_mut().push((x, y));
                tracker.sequence.borrow_mut().push("clicked");
            }
        });

        window.on_stage_resized({
            let resized = ctrl.stage_resized_callback();
            let tracker = tracker.clone();
            move |w, h| {
                resized(w, h);
                tracker.stage_resized.borrow_mut().push((w, h));
            }
        });

        let on_click = {
            let tracker = tracker.clone();
            move |event: &slint_netdiagram::PointerEvent, device: &slint_netdiagram::Device| {
                tracker
                    .device_clicked
                    .borrow_mut()
                    .push((event.client_x, event.client_y, device.id()));
            }
        };
        let router = ctrl.add_device_at(DeviceKind::Router, true, 10.0, 10.0, on_click.clone());
        let server = ctrl.add_device_at(DeviceKind::Server, true, 50.0, 50.0, on_click);
        let link = ctrl.connect(router, server).unwrap();

        Self {
            window,
            ctrl,
            sprites,
            lines,
            tracker,
            router,
            server,
            link,
        }
    }

    /// Process all pending timers and animations.
    pub fn pump_events(&self) {
        slint::platform::update_timers_and_animations();
    }

    /// Sprite row for a device, as the view sees it.
    pub fn sprite(&self, id: DeviceId) -> Option<DeviceSprite> {
        (0..self.sprites.row_count())
            .filter_map(|i| self.sprites.row_data(i))
            .find(|s| s.id == id.index as i32)
    }

    /// Line row, as the view sees it.
    pub fn line(&self, id: LineId) -> Option<LinePath> {
        (0..self.lines.row_count())
            .filter_map(|i| self.lines.row_data(i))
            .find(|l| l.id == id.0 as i32)
    }

    // === Mouse event helpers (real pointer events through the TouchArea) ===

    /// Simulate mouse down at the given position.
    pub fn mouse_down(&self, x: f32, y: f32) {
        self.window
            .window()
            .dispatch_event(WindowEvent::PointerPressed {
                position: LogicalPosition::new(x, y),
                button: PointerEventButton::Left,
            });
        self.pump_events();
    }

    /// Simulate mouse move to the given position.
    pub fn mouse_move(&self, x: f32, y: f32) {
        self.window
            .window()
            .dispatch_event(WindowEvent::PointerMoved {
                position: LogicalPosition::new(x, y),
            });
        self.pump_events();
    }

    /// Simulate mouse up at the given position.
    pub fn mouse_up(&self, x: f32, y: f32) {
        self.window
            .window()
            .dispatch_event(WindowEvent::PointerReleased {
                position: LogicalPosition::new(x, y),
                button: PointerEventButton::Left,
            });
        self.pump_events();
    }

    /// Simulate a complete click (down + up) at the given position.
    pub fn mouse_click(&self, x: f32, y: f32) {
        self.mouse_down(x, y);
        self.mouse_up(x, y);
    }

    /// Simulate a complete drag from start to end.
    pub fn mouse_drag(&self, start_x: f32, start_y: f32, end_x: f32, end_y: f32) {
        self.mouse_down(start_x, start_y);
        self.mouse_move(end_x, end_y);
        self.mouse_up(end_x, end_y);
    }

    // === Pointer helpers (fire the window callbacks) ===

    pub fn press(&self, x: f32, y: f32) {
        self.window.invoke_pointer_pressed(x, y);
        self.pump_events();
    }

    pub fn move_to(&self, x: f32, y: f32) {
        self.window.invoke_pointer_moved(x, y);
        self.pump_events();
    }

    pub fn release(&self, x: f32, y: f32) {
        self.window.invoke_pointer_released(x, y);
        self.pump_events();
    }

    pub fn click(&self, x: f32, y: f32) {
        self.press(x, y);
        self.release(x, y);
        self.window.invoke_clicked(x, y);
        self.pump_events();
    }

    /// Complete drag from start to end.
    pub fn drag(&self, start_x: f32, start_y: f32, end_x: f32, end_y: f32) {
        self.press(start_x, start_y);
        self.move_to(end_x, end_y);
        self.release(end_x, end_y);
    }
}

impl Default for DiagramTestHarness {
    fn default() -> Self {
        Self::new()
    }
}
