use crate::device::{ClickHandler, Device, DeviceId, DeviceKind};
use crate::drag::{DragSession, DragTracker, PointerEvent};
use crate::error::DiagramError;
use crate::hit_test::{devices_in_rect, find_device_at, DeviceGeometry, Point};
use crate::line::{Connection, EndpointRole, Line, LineId};
use crate::options::DiagramOptions;
use crate::path::distance_to_segment;
use std::sync::atomic::{AtomicU32, Ordering};

static NEXT_STAGE_ID: AtomicU32 = AtomicU32::new(1);

/// Identity of a stage instance. Two stages never share one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StageId(pub u32);

impl StageId {
    fn next() -> Self {
        StageId(NEXT_STAGE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Hit-test view of an attached device
#[derive(Clone, Copy)]
struct PlacedDevice<'a> {
    id: DeviceId,
    device: &'a Device,
}

impl DeviceGeometry for PlacedDevice<'_> {
    type Id = DeviceId;

    fn id(&self) -> DeviceId {
        self.id
    }

    fn center(&self) -> Point {
        self.device.position()
    }

    fn size(&self) -> (f32, f32) {
        let s = self.device.sprite();
        (s.width, s.height)
    }
}

/// The drawing surface: owns its devices and the lines between them.
///
/// Children are kept in insertion order, which is also paint order; later
/// devices are hit first. Every position change made through the stage
/// redraws the lines attached to the moved device before returning.
pub struct Stage {
    id: StageId,
    width: f32,
    height: f32,
    devices: Vec<Device>,
    lines: Vec<Line>,
    drag: DragTracker,
    options: DiagramOptions,
}

impl Default for Stage {
    fn default() -> Self {
        Self::with_options(DiagramOptions::default())
    }
}

impl Stage {
    /// Create an empty stage of the given size with default options.
    pub fn new(width: f32, height: f32) -> Self {
        let mut stage = Self::default();
        stage.set_size(width, height);
        stage
    }

    /// Create an empty stage sized and styled by `options`.
    pub fn with_options(options: DiagramOptions) -> Self {
        let [width, height] = options.stage_size;
        Self {
            id: StageId::next(),
            width,
            height,
            devices: Vec::new(),
            lines: Vec::new(),
            drag: DragTracker::new(),
            options,
        }
    }

    pub fn id(&self) -> StageId {
        self.id
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn options(&self) -> &DiagramOptions {
        &self.options
    }

    /// Record a new surface size (e.g. after the host window was resized).
    pub fn set_size(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    /// Stroke applied to lines created from now on.
    pub fn set_line_style(&mut self, color: [u8; 4], width: f32) {
        self.options.line_color = color;
        self.options.line_width = width;
    }

    // === Children ===

    /// Add a built device as the topmost child and start routing input to it.
    ///
    /// A device that was already attached (e.g. a clone taken through
    /// [`device`](Self::device)) comes in as a fresh, unconnected child.
    pub fn attach(&mut self, mut device: Device) -> DeviceId {
        let id = DeviceId::new(self.id, self.devices.len() as u32);
        device.assign_id(id);
        log::debug!(
            "attached device {} ({}) at ({}, {})",
            id,
            device.sprite().image.path,
            device.position().x,
            device.position().y
        );
        self.devices.push(device);
        id
    }

    /// Build a device of `kind` with this stage's options and attach it.
    pub fn add_device<F>(&mut self, kind: DeviceKind, drag_enabled: bool, on_click: F) -> DeviceId
    where
        F: Fn(&PointerEvent, &Device) + 'static,
    {
        let device = Device::from_kind(kind, drag_enabled, &self.options).on_click(on_click);
        self.attach(device)
    }

    /// Like [`add_device`](Self::add_device) but with an optional shared handler and start position.
    pub fn add_device_at(
        &mut self,
        kind: DeviceKind,
        drag_enabled: bool,
        on_click: Option<ClickHandler>,
        x: f32,
        y: f32,
    ) -> DeviceId {
        let device = Device::from_kind(kind, drag_enabled, &self.options)
            .with_click_handler(on_click)
            .with_position(x, y);
        self.attach(device)
    }

    pub fn contains(&self, id: DeviceId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn device(&self, id: DeviceId) -> Option<&Device> {
        self.index_of(id).and_then(|i| self.devices.get(i))
    }

    pub fn devices(&self) -> impl Iterator<Item = (DeviceId, &Device)> + '_ {
        self.devices
            .iter()
            .enumerate()
            .map(move |(i, d)| (DeviceId::new(self.id, i as u32), d))
    }

    pub fn device_count(&self) -> usize {
        self.devices.len()
    }

    pub fn line(&self, id: LineId) -> Option<&Line> {
        self.lines.get(id.0)
    }

    pub fn lines(&self) -> impl Iterator<Item = &Line> + '_ {
        self.lines.iter()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Lines attached to a device, with the role the device plays on each.
    pub fn lines_of(&self, id: DeviceId) -> Vec<(EndpointRole, &Line)> {
        self.device(id)
            .map(|d| {
                d.connected_lines()
                    .iter()
                    .filter_map(|c| Some((c.role, self.lines.get(c.line.0)?)))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn index_of(&self, id: DeviceId) -> Option<usize> {
        let index = id.index as usize;
        (id.stage == self.id && index < self.devices.len()).then_some(index)
    }

    fn require(&self, id: DeviceId) -> Result<usize, DiagramError> {
        self.index_of(id).ok_or(DiagramError::UnknownDevice(id))
    }

    // === Connections ===

    /// Join two devices of this stage with a new line.
    ///
    /// `from` drives the start of the line, `to` the end. Nothing is
    /// modified when the devices live on different stages.
    pub fn connect(&mut self, from: DeviceId, to: DeviceId) -> Result<LineId, DiagramError> {
        if from.stage != to.stage {
            log::warn!("refusing to connect {} and {}: different stages", from, to);
            return Err(DiagramError::StageMismatch { from, to });
        }
        let from_index = self.require(from)?;
        let to_index = self.require(to)?;

        let start = self.devices[from_index].position();
        let end = self.devices[to_index].position();
        let id = LineId(self.lines.len());
        self.lines.push(Line::new(
            id,
            start,
            end,
            self.options.line_color(),
            self.options.line_width,
        ));

        self.devices[from_index].push_connection(Connection {
            line: id,
            role: EndpointRole::Start,
        });
        self.devices[to_index].push_connection(Connection {
            line: id,
            role: EndpointRole::End,
        });

        log::debug!("connected {} -> {} with line {}", from, to, id);
        Ok(id)
    }

    /// Boolean form of [`connect`](Self::connect).
    pub fn connect_to(&mut self, from: DeviceId, to: DeviceId) -> bool {
        self.connect(from, to).is_ok()
    }

    /// Copy a device's position into every line it drives and redraw them.
    pub fn update_lines(&mut self, id: DeviceId) -> Result<(), DiagramError> {
        let index = self.require(id)?;
        self.sync_lines(index);
        Ok(())
    }

    fn sync_lines(&mut self, index: usize) {
        let Some(device) = self.devices.get(index) else {
            return;
        };
        let position = device.position();
        for connection in device.connected_lines() {
            if let Some(line) = self.lines.get_mut(connection.line.0) {
                line.set_endpoint(connection.role, position);
                line.redraw();
            }
        }
    }

    // === Geometry ===

    /// Move a device and redraw its lines.
    pub fn move_device(&mut self, id: DeviceId, position: Point) -> Result<(), DiagramError> {
        let index = self.require(id)?;
        self.devices[index].set_position(position);
        self.sync_lines(index);
        Ok(())
    }

    /// Place and size a device as fractions of the current stage size.
    ///
    /// See [`Device::resize_device`]; attached lines follow the new position.
    pub fn resize_device(
        &mut self,
        id: DeviceId,
        px: f32,
        py: f32,
        pw: f32,
        ph: f32,
    ) -> Result<(), DiagramError> {
        let index = self.require(id)?;
        let (width, height) = (self.width, self.height);
        self.devices[index].resize_device(width, height, px, py, pw, ph);
        self.sync_lines(index);
        Ok(())
    }

    /// Topmost device under the point.
    pub fn device_at(&self, x: f32, y: f32) -> Option<DeviceId> {
        find_device_at(x, y, self.placed())
    }

    /// Devices touching the given rectangle (top-left origin).
    pub fn devices_in_rect(&self, x: f32, y: f32, width: f32, height: f32) -> Vec<DeviceId> {
        devices_in_rect(x, y, width, height, self.placed())
    }

    /// Topmost line passing within `tolerance` of the point.
    pub fn line_at(&self, x: f32, y: f32, tolerance: f32) -> Option<LineId> {
        let p = Point::new(x, y);
        self.lines
            .iter()
            .rev()
            .find(|l| distance_to_segment(p, l.start(), l.end()) <= tolerance)
            .map(|l| l.id())
    }

    fn placed(&self) -> impl Iterator<Item = PlacedDevice<'_>> + '_ {
        self.devices().map(|(id, device)| PlacedDevice { id, device })
    }

    // === Stage-wide drag ===

    /// Currently open stage-wide drag, if any.
    pub fn active_drag(&self) -> Option<DragSession> {
        self.drag.active()
    }

    /// Open a stage-wide drag session for `id`, grabbed at the event position.
    pub fn begin_drag(&mut self, id: DeviceId, event: &PointerEvent) -> Result<DragSession, DiagramError> {
        let index = self.require(id)?;
        if !self.devices[index].drag_enabled() {
            return Err(DiagramError::DragDisabled(id));
        }
        if let Some(active) = self.drag.active() {
            log::warn!("drag on {} rejected, {} still dragging", id, active.device());
            return Err(DiagramError::DragInProgress {
                active: active.device(),
            });
        }

        let offset = self.devices[index].begin_drag(event.position());
        let session = DragSession::new(id, offset);
        self.drag.subscribe(session)?;
        log::debug!("drag started on {} (offset {}, {})", id, offset.x, offset.y);
        Ok(session)
    }

    /// Press-down: hit test and, if the target is draggable, open a drag session.
    pub fn pointer_down(&mut self, event: &PointerEvent) -> Option<DragSession> {
        let target = self.device_at(event.client_x, event.client_y)?;
        if !self.device(target)?.drag_enabled() {
            return None;
        }
        self.begin_drag(target, event).ok()
    }

    /// Stage-wide move: forwarded to the open session, if any.
    ///
    /// Returns the moved device.
    pub fn pointer_move(&mut self, event: &PointerEvent) -> Option<DeviceId> {
        let session = self.drag.active()?;
        let index = self.index_of(session.device())?;
        if !self.devices[index].drag_to(event.position()) {
            return None;
        }
        self.sync_lines(index);
        Some(session.device())
    }

    /// Stage-wide release: ends the open session, if any.
    pub fn pointer_up(&mut self, _event: &PointerEvent) -> Option<DragSession> {
        let session = self.drag.active()?;
        self.end_drag(&session).then_some(session)
    }

    /// End a drag through the handle returned when it started.
    ///
    /// Returns `false` if the handle is not the active session.
    pub fn end_drag(&mut self, session: &DragSession) -> bool {
        if !self.drag.unsubscribe(session) {
            return false;
        }
        if let Some(index) = self.index_of(session.device()) {
            self.devices[index].end_drag();
        }
        log::debug!("drag ended on {}", session.device());
        true
    }

    // === Element-scoped drag ===
    //
    // For hosts that deliver move/end events to the device directly. No
    // stage-wide subscription is taken, so these never conflict with the
    // session slot.

    pub fn drag_start(&mut self, id: DeviceId, event: &PointerEvent) -> Result<(), DiagramError> {
        let index = self.require(id)?;
        if !self.devices[index].drag_enabled() {
            return Err(DiagramError::DragDisabled(id));
        }
        self.devices[index].begin_drag(event.position());
        Ok(())
    }

    /// Returns whether the device moved (it only does while dragging).
    pub fn drag_move(&mut self, id: DeviceId, event: &PointerEvent) -> Result<bool, DiagramError> {
        let index = self.require(id)?;
        if !self.devices[index].drag_to(event.position()) {
            return Ok(false);
        }
        self.sync_lines(index);
        Ok(true)
    }

    pub fn drag_end(&mut self, id: DeviceId) -> Result<(), DiagramError> {
        let index = self.require(id)?;
        self.devices[index].end_drag();
        Ok(())
    }

    // === Click ===

    /// Deliver a click to the topmost device under the pointer.
    pub fn click(&self, event: &PointerEvent) -> Option<DeviceId> {
        let target = self.device_at(event.client_x, event.client_y)?;
        let device = self.device(target)?;
        if let Some(handler) = device.click_handler() {
            handler(event, device);
        }
        Some(target)
    }
}
