//! # Slint Network Diagram
//!
//! Draggable network-device icons joined by live connection lines, for
//! network-diagram editors built with Slint.
//!
//! ## Features
//!
//! - **One device type** - Routers, servers and computers are a [`DeviceKind`], not subtypes
//! - **Lines follow devices** - Every move through the [`Stage`] redraws attached lines
//! - **Explicit drag sessions** - One stage-wide [`DragSession`] at a time, ended by its handle
//! - **Two-phase construction** - Build a [`Device`], then [`Stage::attach`] it
//! - **Slint binding** - [`StageModels`] mirrors the stage into `VecModel`s
//!
//! ## Quick Start
//!
//! ```slint
//! import { NetworkStage, DeviceSprite, LinePath } from "ui/network-stage.slint";
//!
//! export component MainWindow inherits Window {
//!     in property <[DeviceSprite]> devices;
//!     in property <[LinePath]> lines;
//!     NetworkStage { devices: root.devices; lines: root.lines; }
//! }
//! ```
//!
//! ## Rust Helpers
//!
//! - [`Stage`] - Owns devices and lines; connect, move, drag, click
//! - [`StageController`] - Shared stage handle with ready-made Slint callbacks
//! - [`DiagramOptions`] - Icon paths, size divisors, line style (TOML-loadable)
//! - [`generate_line_path`] - SVG path for a connection line
//! - [`find_device_at`] - Hit-test center-anchored sprites

pub mod hit_test;
pub mod path;
pub mod error;
pub mod options;
pub mod line;
pub mod device;
pub mod drag;
pub mod stage;
pub mod models;
pub mod controller;

pub use hit_test::{devices_in_rect, find_device_at, DeviceGeometry, Point};
pub use path::{distance_to_segment, generate_line_path};
pub use error::DiagramError;
pub use options::DiagramOptions;
pub use line::{Connection, EndpointRole, Line, LineId};
pub use device::{ClickHandler, Device, DeviceId, DeviceKind, ImageSource, Sprite};
pub use drag::{DragSession, DragTracker, PointerEvent};
pub use stage::{Stage, StageId};
pub use models::{line_rows, sprite_rows, IconCache, LineRow, SpriteRow, StageModels};
pub use controller::StageController;
