//! Draggable, clickable device icons.
//!
//! A [`Device`] is built in isolation ([`Device::new`] / [`Device::from_kind`])
//! and only becomes part of a diagram once a [`Stage`](crate::Stage) attaches
//! it. Router, server and computer icons are the same type; they differ only
//! in the [`DeviceKind`] that selects their image.

use crate::drag::PointerEvent;
use crate::hit_test::Point;
use crate::line::Connection;
use crate::options::{DiagramOptions, DEVICE_SIZE, WIDTH_DIVISOR};
use crate::stage::StageId;
use std::fmt;
use std::rc::Rc;

/// Stage-qualified device identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeviceId {
    pub stage: StageId,
    pub index: u32,
}

impl DeviceId {
    pub const fn new(stage: StageId, index: u32) -> Self {
        Self { stage, index }
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.stage.0, self.index)
    }
}

/// Where an icon comes from and how large it is before normalization
#[derive(Debug, Clone, PartialEq)]
pub struct ImageSource {
    pub path: String,
    pub natural_width: f32,
    pub natural_height: f32,
}

impl ImageSource {
    pub fn new(path: impl Into<String>, natural_width: f32, natural_height: f32) -> Self {
        Self {
            path: path.into(),
            natural_width,
            natural_height,
        }
    }
}

/// The icon a device is drawn with
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceKind {
    Router,
    Server,
    Computer,
    Custom(ImageSource),
}

impl DeviceKind {
    /// Resolve the icon for this kind against the configured asset paths.
    pub fn image_source(&self, options: &DiagramOptions) -> ImageSource {
        let [w, h] = options.icon_natural_size;
        match self {
            DeviceKind::Router => ImageSource::new(options.router_icon.clone(), w, h),
            DeviceKind::Server => ImageSource::new(options.server_icon.clone(), w, h),
            DeviceKind::Computer => ImageSource::new(options.computer_icon.clone(), w, h),
            DeviceKind::Custom(source) => source.clone(),
        }
    }
}

/// Positioned image of a device. `x`/`y` is the center (anchor 0.5, 0.5).
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub image: ImageSource,
}

impl Sprite {
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Click handler: receives the triggering event and the clicked device.
pub type ClickHandler = Rc<dyn Fn(&PointerEvent, &Device)>;

/// A draggable, clickable visual node.
#[derive(Clone)]
pub struct Device {
    id: Option<DeviceId>,
    sprite: Sprite,
    drag_enabled: bool,
    dragging: bool,
    drag_offset: Point,
    connections: Vec<Connection>,
    on_click: Option<ClickHandler>,
    width_divisor: f32,
    height_divisor: f32,
}

impl fmt::Debug for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Device")
            .field("id", &self.id)
            .field("sprite", &self.sprite)
            .field("drag_enabled", &self.drag_enabled)
            .field("dragging", &self.dragging)
            .field("drag_offset", &self.drag_offset)
            .field("connections", &self.connections)
            .field("has_click_handler", &self.on_click.is_some())
            .finish()
    }
}

impl Device {
    /// Build an unattached device from an explicit image, using the default divisors.
    pub fn new(image: ImageSource, drag_enabled: bool) -> Self {
        Self::build(image, drag_enabled, WIDTH_DIVISOR, DEVICE_SIZE)
    }

    /// Build an unattached device of the given kind using configured icons and divisors.
    pub fn from_kind(kind: DeviceKind, drag_enabled: bool, options: &DiagramOptions) -> Self {
        Self::build(
            kind.image_source(options),
            drag_enabled,
            options.width_divisor,
            options.device_size,
        )
    }

    fn build(image: ImageSource, drag_enabled: bool, width_divisor: f32, height_divisor: f32) -> Self {
        let mut device = Self {
            id: None,
            sprite: Sprite {
                x: 0.0,
                y: 0.0,
                width: image.natural_width,
                height: image.natural_height,
                image,
            },
            drag_enabled,
            dragging: false,
            drag_offset: Point::default(),
            connections: Vec::new(),
            on_click: None,
            width_divisor,
            height_divisor,
        };
        device.resize();
        device
    }

    /// Set the initial position (before attaching).
    pub fn with_position(mut self, x: f32, y: f32) -> Self {
        self.sprite.x = x;
        self.sprite.y = y;
        self
    }

    /// Install the click handler.
    pub fn on_click<F>(mut self, handler: F) -> Self
    where
        F: Fn(&PointerEvent, &Device) + 'static,
    {
        self.on_click = Some(Rc::new(handler));
        self
    }

    /// Install an already shared click handler.
    pub fn with_click_handler(mut self, handler: Option<ClickHandler>) -> Self {
        self.on_click = handler;
        self
    }

    /// Identity assigned by the stage; `None` until attached.
    pub fn id(&self) -> Option<DeviceId> {
        self.id
    }

    /// Stage this device belongs to; `None` until attached.
    pub fn stage(&self) -> Option<StageId> {
        self.id.map(|id| id.stage)
    }

    pub fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    pub fn position(&self) -> Point {
        self.sprite.position()
    }

    pub fn drag_enabled(&self) -> bool {
        self.drag_enabled
    }

    pub fn dragging(&self) -> bool {
        self.dragging
    }

    pub fn drag_offset(&self) -> Point {
        self.drag_offset
    }

    /// Lines this device drives, in connection order.
    pub fn connected_lines(&self) -> &[Connection] {
        &self.connections
    }

    pub fn click_handler(&self) -> Option<ClickHandler> {
        self.on_click.clone()
    }

    /// Normalize the size from the icon's natural size by the fixed divisors.
    pub fn resize(&mut self) {
        self.sprite.width = self.sprite.image.natural_width / self.width_divisor;
        self.sprite.height = self.sprite.image.natural_height / self.height_divisor;
    }

    /// Position and size the sprite as fractions of the stage size.
    ///
    /// Zero factors are not rejected and produce infinite coordinates.
    pub fn resize_device(
        &mut self,
        stage_width: f32,
        stage_height: f32,
        px: f32,
        py: f32,
        pw: f32,
        ph: f32,
    ) {
        self.sprite.x = stage_width / px;
        self.sprite.y = stage_height / py;
        self.sprite.width = stage_width / pw;
        self.sprite.height = stage_height / ph;
    }

    /// Take a new identity. Lines and drag state belong to the previous
    /// placement, so a clone of an attached device starts unconnected.
    pub(crate) fn assign_id(&mut self, id: DeviceId) {
        self.id = Some(id);
        self.connections.clear();
        self.dragging = false;
        self.drag_offset = Point::default();
    }

    pub(crate) fn set_position(&mut self, point: Point) {
        self.sprite.x = point.x;
        self.sprite.y = point.y;
    }

    pub(crate) fn push_connection(&mut self, connection: Connection) {
        self.connections.push(connection);
    }

    /// Enter the dragging state and remember where the pointer grabbed the sprite.
    pub(crate) fn begin_drag(&mut self, pointer: Point) -> Point {
        self.dragging = true;
        self.drag_offset = pointer - self.position();
        self.drag_offset
    }

    /// Follow the pointer while dragging. Returns whether the sprite moved.
    pub(crate) fn drag_to(&mut self, pointer: Point) -> bool {
        if !self.dragging {
            return false;
        }
        self.set_position(pointer - self.drag_offset);
        true
    }

    pub(crate) fn end_drag(&mut self) {
        self.dragging = false;
    }
}
