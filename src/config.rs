// MView6 -- High-performance PDF and photo viewer built with Rust and GTK4
//
// Copyright (c) 2024-2025 Martin van der Werff <github (at) newinnovations.nl>
//
// This file is part of MView6.
//
// MView6 is free software: you can redistribute it and/or modify it under the terms of
// the GNU Affero General Public License as published by the Free Software Foundation, either
// version 3 of the License, or (at your option) any later version.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS" AND ANY EXPRESS OR
// IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE IMPLIED WARRANTIES OF MERCHANTABILITY AND
// FITNESS FOR A PARTICULAR PURPOSE ARE DISCLAIMED. IN NO EVENT SHALL THE AUTHOR BE LIABLE FOR ANY
// DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL DAMAGES (INCLUDING, BUT NOT
// LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR SERVICES; LOSS OF USE, DATA, OR PROFITS; OR
// BUSINESS INTERRUPTION) HOWEVER CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT,
// STRICT LIABILITY, OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
// OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.

use std::{
    fs::{create_dir_all, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    error::{Result, ViewportError},
    view::ZoomMode,
};

/// Persisted zoom settings, read at session start and written back when the
/// user changes them.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ViewerConfig {
    pub zoom_mode: ZoomMode,
    pub custom_zoom_percentage: f64,
    pub aspect_safety: bool,
    pub cursor_anchored_zoom: bool,
    pub manual_zoom: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            zoom_mode: ZoomMode::FitToScreen,
            custom_zoom_percentage: 100.0,
            aspect_safety: false,
            cursor_anchored_zoom: true,
            manual_zoom: true,
        }
    }
}

impl ViewerConfig {
    fn config_dir() -> Result<PathBuf> {
        let mut dir = dirs::config_dir().ok_or(ViewportError::NoConfigDir)?;
        dir.push("mview6");
        Ok(dir)
    }

    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("viewport.json"))
    }

    /// Reads the configuration from the default location, falling back to
    /// defaults when it is missing or unreadable.
    pub fn load() -> Self {
        match Self::config_file().and_then(|path| Self::load_from(&path)) {
            Ok(config) => config,
            Err(e) => {
                warn!("Using default viewport configuration: {e}");
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let config: Self = serde_json::from_reader(file)?;
        debug!("deserialized = {config:?}");
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        create_dir_all(Self::config_dir()?)?;
        self.save_to(&Self::config_file()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("viewport.json");

        let config = ViewerConfig {
            zoom_mode: ZoomMode::MaintainCurrentZoom,
            custom_zoom_percentage: 137.5,
            aspect_safety: true,
            cursor_anchored_zoom: false,
            manual_zoom: true,
        };
        config.save_to(&path).unwrap();

        assert_eq!(ViewerConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("viewport.json");
        std::fs::write(&path, r#"{ "zoom_mode": "fit-to-width", "aspect_safety": true }"#).unwrap();

        let config = ViewerConfig::load_from(&path).unwrap();
        assert_eq!(config.zoom_mode, ZoomMode::FitToWidth);
        assert!(config.aspect_safety);
        assert_eq!(config.custom_zoom_percentage, 100.0);
        assert!(config.cursor_anchored_zoom);
        assert!(config.manual_zoom);
    }

    #[test]
    fn test_load_errors() {
        let dir = tempfile::tempdir().unwrap();

        let missing = dir.path().join("missing.json");
        assert!(matches!(
            ViewerConfig::load_from(&missing),
            Err(ViewportError::Io(_))
        ));

        let broken = dir.path().join("broken.json");
        std::fs::write(&broken, r#"{ "zoom_mode": "max" }"#).unwrap();
        assert!(matches!(
            ViewerConfig::load_from(&broken),
            Err(ViewportError::Json(_))
        ));
    }
}
