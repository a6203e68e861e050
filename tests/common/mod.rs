//! Common test utilities for integration tests.

#![allow(dead_code)]

pub mod harness;

use slint_netdiagram::DeviceId;
use std::cell::RefCell;
use std::rc::Rc;

/// Tracks callback invocations for testing.
///
/// Each field records calls to the corresponding callback with their arguments.
#[derive(Default, Clone)]
pub struct CallbackTracker {
    /// (x, y)
    pub pointer_pressed: Rc<RefCell<Vec<(f32, f32)>>>,
    /// (x, y)
    pub pointer_moved: Rc<RefCell<Vec<(f32, f32)>>>,
    /// (x, y)
    pub pointer_released: Rc<RefCell<Vec<(f32, f32)>>>,
    /// (x, y) as forwarded by the window
    pub clicked: Rc<RefCell<Vec<(f32, f32)>>>,
    /// (width, height)
    pub stage_resized: Rc<RefCell<Vec<(f32, f32)>>>,
    /// (event x, event y, clicked device)
    pub device_clicked: Rc<RefCell<Vec<(f32, f32, Option<DeviceId>)>>>,
    /// Pointer callback names in the order the window fired them
    pub sequence: Rc<RefCell<Vec<&'static str>>>,
}

impl CallbackTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all recorded callbacks.
    pub fn clear(&self) {
        self.pointer_pressed.borrow_mut().clear();
        self.pointer_moved.borrow_mut().clear();
        self.pointer_released.borrow_mut().clear();
        self.clicked.borrow_mut().clear();
        self.stage_resized.borrow_mut().clear();
        self.device_clicked.borrow_mut().clear();
        self.sequence.borrow_mut().clear();
    }
}
