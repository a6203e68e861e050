//! Pointer events and stage-wide drag sessions.
//!
//! A press on a draggable device opens a [`DragSession`]. While it is open the
//! session is subscribed to every pointer move and release on the stage, not
//! only those over the device, so fast drags never lose the sprite. The
//! [`DragTracker`] holds at most one session; releasing it unsubscribes it
//! through the same handle.

use crate::device::DeviceId;
use crate::error::DiagramError;
use crate::hit_test::Point;

/// Pointer event as delivered by the host, in stage coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerEvent {
    pub client_x: f32,
    pub client_y: f32,
}

impl PointerEvent {
    pub const fn new(client_x: f32, client_y: f32) -> Self {
        Self { client_x, client_y }
    }

    pub fn position(&self) -> Point {
        Point::new(self.client_x, self.client_y)
    }
}

/// Handle for an open stage-wide drag
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    device: DeviceId,
    offset: Point,
}

impl DragSession {
    pub(crate) fn new(device: DeviceId, offset: Point) -> Self {
        Self { device, offset }
    }

    /// Device that owns this session
    pub fn device(&self) -> DeviceId {
        self.device
    }

    /// Pointer position relative to the sprite center at press time
    pub fn offset(&self) -> Point {
        self.offset
    }
}

/// The single stage-wide pointer subscription slot.
#[derive(Debug, Default)]
pub struct DragTracker {
    active: Option<DragSession>,
}

impl DragTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<DragSession> {
        self.active
    }

    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    /// Route stage-wide move/up events to `session`.
    ///
    /// Refused while another session is still subscribed.
    pub(crate) fn subscribe(&mut self, session: DragSession) -> Result<(), DiagramError> {
        match self.active {
            Some(active) => Err(DiagramError::DragInProgress {
                active: active.device,
            }),
            None => {
                self.active = Some(session);
                Ok(())
            }
        }
    }

    /// Drop the subscription if `session` is the one holding it.
    pub(crate) fn unsubscribe(&mut self, session: &DragSession) -> bool {
        if self.active.as_ref() == Some(session) {
            self.active = None;
            true
        } else {
            false
        }
    }
}
