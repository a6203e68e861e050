use crate::hit_test::Point;
use crate::path::generate_line_path;
use slint::Color;
use std::fmt;

/// Index of a line within its stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineId(pub usize);

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which end of a line a device drives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndpointRole {
    Start,
    End,
}

/// One entry of a device's connection list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Connection {
    pub line: LineId,
    pub role: EndpointRole,
}

/// A connection line between two devices.
///
/// Stores both endpoints and the path commands last drawn from them. The
/// stage owns every line; devices refer to it by [`LineId`] only.
#[derive(Clone, Debug)]
pub struct Line {
    id: LineId,
    start: Point,
    end: Point,
    path_commands: String,
    pub color: Color,
    pub width: f32,
}

impl Line {
    /// Create a line and draw it once.
    pub fn new(id: LineId, start: Point, end: Point, color: Color, width: f32) -> Self {
        Self {
            id,
            start,
            end,
            path_commands: generate_line_path(start, end),
            color,
            width,
        }
    }

    pub fn id(&self) -> LineId {
        self.id
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }

    pub fn endpoint(&self, role: EndpointRole) -> Point {
        match role {
            EndpointRole::Start => self.start,
            EndpointRole::End => self.end,
        }
    }

    /// Overwrite one stored endpoint. Does not redraw.
    pub fn set_endpoint(&mut self, role: EndpointRole, point: Point) {
        match role {
            EndpointRole::Start => self.start = point,
            EndpointRole::End => self.end = point,
        }
    }

    /// Regenerate the path from the stored endpoints.
    pub fn redraw(&mut self) {
        self.path_commands = generate_line_path(self.start, self.end);
        log::trace!("line {} redrawn: {}", self.id, self.path_commands);
    }

    /// Path commands from the most recent redraw
    pub fn path_commands(&self) -> &str {
        &self.path_commands
    }
}
