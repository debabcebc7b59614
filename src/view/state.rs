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

use crate::{
    config::ViewerConfig,
    rect::{PointI, VectorD},
};

use super::ZoomMode;

/// Floating point comparison epsilon for zoom state detection
const ZOOM_EPSILON: f64 = 1.0e-6;

/// Represents the current zoom state of the image relative to its original size.
#[derive(Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Clone, Copy)]
pub enum ZoomState {
    /// Image is displayed at original size (zoom = 1.0)
    NoZoom,
    /// Image is enlarged (zoom > 1.0)
    ZoomedIn,
    /// Image is reduced (zoom < 1.0)
    ZoomedOut,
}

/// Observable zoom and pan state of the viewer.
///
/// Display surfaces and status widgets only get shared references to this
/// struct. All mutation goes through [`ZoomEngine`](super::ZoomEngine), the
/// setters are private to the `view` module.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportState {
    zoom_mode: ZoomMode,
    /// Multiplier applied to the natural image dimensions when drawing
    zoom_factor: f64,
    /// Added to the centered position of the scaled image (screen pixels)
    pan_offset: VectorD,
    manual_zoom_enabled: bool,
    aspect_safety_enabled: bool,
    cursor_anchored_zoom_enabled: bool,
    /// Pinned zoom, e.g. 125.0 meaning 125%
    custom_zoom_percentage: f64,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            zoom_mode: ZoomMode::FitToScreen,
            zoom_factor: 1.0,
            pan_offset: VectorD::default(),
            manual_zoom_enabled: true,
            aspect_safety_enabled: false,
            cursor_anchored_zoom_enabled: true,
            custom_zoom_percentage: 100.0,
        }
    }
}

impl ViewportState {
    /// Creates the session state from persisted settings.
    ///
    /// A pinned percentage that is not a positive finite number is replaced by 100%.
    pub fn from_config(config: &ViewerConfig) -> Self {
        let custom_zoom_percentage =
            if config.custom_zoom_percentage.is_finite() && config.custom_zoom_percentage > 0.0 {
                config.custom_zoom_percentage
            } else {
                100.0
            };
        Self {
            zoom_mode: config.zoom_mode,
            manual_zoom_enabled: config.manual_zoom,
            aspect_safety_enabled: config.aspect_safety,
            cursor_anchored_zoom_enabled: config.cursor_anchored_zoom,
            custom_zoom_percentage,
            ..Default::default()
        }
    }

    pub fn zoom_mode(&self) -> ZoomMode {
        self.zoom_mode
    }

    pub fn zoom_factor(&self) -> f64 {
        self.zoom_factor
    }

    /// Live zoom expressed as a percentage (zoom factor 1.25 = 125%)
    pub fn zoom_percentage(&self) -> f64 {
        self.zoom_factor * 100.0
    }

    pub fn pan_offset(&self) -> VectorD {
        self.pan_offset
    }

    /// Pan offset rounded to whole screen pixels for drawing
    pub fn pan_offset_px(&self) -> PointI {
        self.pan_offset.round()
    }

    pub fn manual_zoom_enabled(&self) -> bool {
        self.manual_zoom_enabled
    }

    pub fn aspect_safety_enabled(&self) -> bool {
        self.aspect_safety_enabled
    }

    pub fn cursor_anchored_zoom_enabled(&self) -> bool {
        self.cursor_anchored_zoom_enabled
    }

    pub fn custom_zoom_percentage(&self) -> f64 {
        self.custom_zoom_percentage
    }

    /// Determines the current zoom state by comparing zoom factor to 1.0
    pub fn state(&self) -> ZoomState {
        if self.zoom_factor > 1.0 + ZOOM_EPSILON {
            ZoomState::ZoomedIn
        } else if self.zoom_factor < 1.0 - ZOOM_EPSILON {
            ZoomState::ZoomedOut
        } else {
            ZoomState::NoZoom
        }
    }

    /// Text shown in the status bar, e.g. "Fit to screen 50%"
    pub fn status_label(&self) -> String {
        format!("{} {:.0}%", self.zoom_mode.label(), self.zoom_percentage())
    }

    pub(super) fn set_zoom_mode(&mut self, zoom_mode: ZoomMode) {
        self.zoom_mode = zoom_mode;
    }

    /// Rejects values that would break the `zoom_factor > 0` invariant.
    pub(super) fn set_zoom_factor(&mut self, zoom_factor: f64) -> bool {
        if zoom_factor.is_finite() && zoom_factor > 0.0 {
            self.zoom_factor = zoom_factor;
            true
        } else {
            false
        }
    }

    pub(super) fn set_pan_offset(&mut self, pan_offset: VectorD) {
        self.pan_offset = pan_offset;
    }

    pub(super) fn set_manual_zoom_enabled(&mut self, enabled: bool) {
        self.manual_zoom_enabled = enabled;
    }

    pub(super) fn set_aspect_safety_enabled(&mut self, enabled: bool) {
        self.aspect_safety_enabled = enabled;
    }

    pub(super) fn set_cursor_anchored_zoom_enabled(&mut self, enabled: bool) {
        self.cursor_anchored_zoom_enabled = enabled;
    }

    pub(super) fn set_custom_zoom_percentage(&mut self, percentage: f64) {
        self.custom_zoom_percentage = percentage;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state() {
        let state = ViewportState::default();
        assert_eq!(state.zoom_mode(), ZoomMode::FitToScreen);
        assert_eq!(state.zoom_factor(), 1.0);
        assert_eq!(state.pan_offset(), VectorD::default());
        assert_eq!(state.custom_zoom_percentage(), 100.0);
        assert_eq!(state.state(), ZoomState::NoZoom);
    }

    #[test]
    fn test_zoom_state() {
        let mut state = ViewportState::default();

        state.set_zoom_factor(1.0 + ZOOM_EPSILON / 2.0);
        assert_eq!(state.state(), ZoomState::NoZoom);

        state.set_zoom_factor(1.5);
        assert_eq!(state.state(), ZoomState::ZoomedIn);

        state.set_zoom_factor(0.5);
        assert_eq!(state.state(), ZoomState::ZoomedOut);
    }

    #[test]
    fn test_set_zoom_factor_rejects_invalid_values() {
        let mut state = ViewportState::default();
        assert!(state.set_zoom_factor(2.0));
        assert!(!state.set_zoom_factor(0.0));
        assert!(!state.set_zoom_factor(-1.0));
        assert!(!state.set_zoom_factor(f64::NAN));
        assert!(!state.set_zoom_factor(f64::INFINITY));
        assert_eq!(state.zoom_factor(), 2.0);
    }

    #[test]
    fn test_from_config() {
        let config = ViewerConfig {
            zoom_mode: ZoomMode::Fill,
            custom_zoom_percentage: 125.0,
            aspect_safety: true,
            cursor_anchored_zoom: false,
            manual_zoom: false,
        };
        let state = ViewportState::from_config(&config);
        assert_eq!(state.zoom_mode(), ZoomMode::Fill);
        assert_eq!(state.zoom_factor(), 1.0);
        assert_eq!(state.custom_zoom_percentage(), 125.0);
        assert!(state.aspect_safety_enabled());
        assert!(!state.cursor_anchored_zoom_enabled());
        assert!(!state.manual_zoom_enabled());

        let broken = ViewerConfig {
            custom_zoom_percentage: -20.0,
            ..Default::default()
        };
        assert_eq!(
            ViewportState::from_config(&broken).custom_zoom_percentage(),
            100.0
        );
    }

    #[test]
    fn test_status_label_and_pixel_offset() {
        let mut state = ViewportState::default();
        state.set_zoom_factor(0.5);
        state.set_pan_offset(VectorD::new(10.4, -3.6));
        assert_eq!(state.status_label(), "Fit to screen 50%");
        assert_eq!(state.pan_offset_px(), PointI::new(10, -4));
    }
}
