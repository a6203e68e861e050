//! Runtime configuration for diagram stages.
//!
//! [`DiagramOptions`] collects the tunable values. The `const` values remain
//! as documented defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Divisor applied to an icon's natural width when a device is created.
pub const WIDTH_DIVISOR: f32 = 70.0;
/// Divisor applied to an icon's natural height when a device is created.
pub const DEVICE_SIZE: f32 = 20.0;
/// Natural size assumed for the built-in icons (yields 20x20 devices).
pub const ICON_NATURAL_SIZE: [f32; 2] = [1400.0, 400.0];
/// Default connection stroke width.
pub const LINE_WIDTH: f32 = 2.0;
/// Default connection color (RGBA).
pub const LINE_COLOR: [u8; 4] = [0x33, 0x33, 0x33, 0xff];
/// Stage size used before the host reports its real size.
pub const STAGE_SIZE: [f32; 2] = [800.0, 600.0];

/// All runtime-adjustable diagram settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagramOptions {
    pub width_divisor: f32,
    pub device_size: f32,
    /// Natural [width, height] of the built-in router/server/computer icons.
    pub icon_natural_size: [f32; 2],
    pub router_icon: String,
    pub server_icon: String,
    pub computer_icon: String,
    pub line_width: f32,
    pub line_color: [u8; 4],
    pub stage_size: [f32; 2],
}

impl Default for DiagramOptions {
    fn default() -> Self {
        Self {
            width_divisor: WIDTH_DIVISOR,
            device_size: DEVICE_SIZE,
            icon_natural_size: ICON_NATURAL_SIZE,
            router_icon: "assets/router.png".into(),
            server_icon: "assets/server.png".into(),
            computer_icon: "assets/computer.png".into(),
            line_width: LINE_WIDTH,
            line_color: LINE_COLOR,
            stage_size: STAGE_SIZE,
        }
    }
}

impl DiagramOptions {
    /// Load options from a TOML file, falling back to defaults on any error.
    pub fn load_from_file(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Diagram options loaded from {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Invalid diagram options file, using defaults: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("No diagram options file found, using defaults");
                Self::default()
            }
        }
    }

    /// Save options as pretty TOML.
    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Diagram options saved to {}", path.display());
        Ok(())
    }

    /// Default options file location next to the executable.
    pub fn config_path() -> PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| PathBuf::from("netdiagram"))
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join("netdiagram.toml")
    }

    pub fn line_color(&self) -> slint::Color {
        let [r, g, b, a] = self.line_color;
        slint::Color::from_argb_u8(a, r, g, b)
    }
}
