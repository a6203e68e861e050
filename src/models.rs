//! Slint model synchronization for stage children.
//!
//! [`StageModels`] mirrors the devices and lines of a [`Stage`] into Slint
//! `VecModel`s so that a `.slint` view can render them.
//!
//! # Example
//!
//! ```ignore
//! use slint_netdiagram::{Stage, StageModels};
//! use slint::{ModelRc, VecModel};
//! use std::rc::Rc;
//!
//! let mut models = StageModels::new();
//! let sprites = Rc::new(VecModel::<DeviceSprite>::default());
//! models.bind_sprites(sprites.clone(), |row| DeviceSprite {
//!     id: row.id,
//!     icon: row.icon.clone(),
//!     x: row.x,
//!     y: row.y,
//!     width: row.width,
//!     height: row.height,
//!     dragging: row.dragging,
//! });
//! window.set_devices(ModelRc::from(sprites));
//!
//! // After every stage mutation
//! models.sync(&stage);
//! ```

use crate::stage::Stage;
use slint::{Color, Image, Model, SharedString, VecModel};
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path;
use std::rc::Rc;

/// One rendered device, in paint order
#[derive(Clone, Debug, PartialEq)]
pub struct SpriteRow {
    pub id: i32,
    pub icon: Image,
    pub icon_path: SharedString,
    /// Center x
    pub x: f32,
    /// Center y
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub dragging: bool,
}

/// One rendered line
#[derive(Clone, Debug, PartialEq)]
pub struct LineRow {
    pub id: i32,
    pub commands: SharedString,
    pub color: Color,
    pub width: f32,
}

/// Decoded device icons, keyed by path. Each path is loaded at most once.
#[derive(Default)]
pub struct IconCache {
    images: RefCell<HashMap<String, Image>>,
}

impl IconCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `image` for `path` instead of reading the file.
    pub fn insert(&self, path: impl Into<String>, image: Image) {
        self.images.borrow_mut().insert(path.into(), image);
    }

    /// Icon for `path`. An unreadable file yields an empty image.
    pub fn get(&self, path: &str) -> Image {
        if let Some(image) = self.images.borrow().get(path) {
            return image.clone();
        }
        let image = match Image::load_from_path(Path::new(path)) {
            Ok(image) => {
                log::debug!("loaded icon {}", path);
                image
            }
            Err(_) => {
                log::warn!("could not load icon {}, drawing an empty box", path);
                Image::default()
            }
        };
        self.images.borrow_mut().insert(path.to_owned(), image.clone());
        image
    }

    pub fn len(&self) -> usize {
        self.images.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Internal trait for auto-syncing rows to Slint models.
trait ModelSyncer<R> {
    fn sync(&self, rows: &[R]);
}

/// Concrete implementation of ModelSyncer for a specific item type.
struct ConcreteModelSyncer<P, F> {
    model: Rc<VecModel<P>>,
    constructor: F,
}

impl<R, P, F> ModelSyncer<R> for ConcreteModelSyncer<P, F>
where
    P: Clone + 'static,
    F: Fn(&R) -> P,
{
    fn sync(&self, rows: &[R]) {
        // Update existing rows or add new ones
        for (i, row) in rows.iter().enumerate() {
            let item = (self.constructor)(row);
            if i < self.model.row_count() {
                self.model.set_row_data(i, item);
            } else {
                self.model.push(item);
            }
        }
        // Remove excess rows
        while self.model.row_count() > rows.len() {
            self.model.remove(self.model.row_count() - 1);
        }
    }
}

/// Keeps bound Slint models in step with a stage.
#[derive(Default)]
pub struct StageModels {
    sprites: Option<Box<dyn ModelSyncer<SpriteRow>>>,
    lines: Option<Box<dyn ModelSyncer<LineRow>>>,
    icons: IconCache,
}

impl StageModels {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind the device model. `constructor` maps a row to the view's struct.
    pub fn bind_sprites<P, F>(&mut self, model: Rc<VecModel<P>>, constructor: F)
    where
        P: Clone + 'static,
        F: Fn(&SpriteRow) -> P + 'static,
    {
        self.sprites = Some(Box::new(ConcreteModelSyncer { model, constructor }));
    }

    /// Bind the line model. `constructor` maps a row to the view's struct.
    pub fn bind_lines<P, F>(&mut self, model: Rc<VecModel<P>>, constructor: F)
    where
        P: Clone + 'static,
        F: Fn(&LineRow) -> P + 'static,
    {
        self.lines = Some(Box::new(ConcreteModelSyncer { model, constructor }));
    }

    pub fn icons(&self) -> &IconCache {
        &self.icons
    }

    pub fn is_bound(&self) -> bool {
        self.sprites.is_some() || self.lines.is_some()
    }

    /// Push the current stage contents into every bound model.
    pub fn sync(&self, stage: &Stage) {
        if let Some(syncer) = &self.sprites {
            syncer.sync(&sprite_rows(stage, &self.icons));
        }
        if let Some(syncer) = &self.lines {
            syncer.sync(&line_rows(stage));
        }
    }
}

/// Snapshot of all devices as view rows, with icons resolved through `icons`.
pub fn sprite_rows(stage: &Stage, icons: &IconCache) -> Vec<SpriteRow> {
    stage
        .devices()
        .map(|(id, device)| {
            let sprite = device.sprite();
            SpriteRow {
                id: id.index as i32,
                icon: icons.get(&sprite.image.path),
                icon_path: SharedString::from(sprite.image.path.as_str()),
                x: sprite.x,
                y: sprite.y,
                width: sprite.width,
                height: sprite.height,
                dragging: device.dragging(),
            }
        })
        .collect()
}

/// Snapshot of all lines as view rows.
pub fn line_rows(stage: &Stage) -> Vec<LineRow> {
    stage
        .lines()
        .map(|line| LineRow {
            id: line.id().0 as i32,
            commands: SharedString::from(line.path_commands()),
            color: line.color,
            width: line.width,
        })
        .collect()
}
