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

pub mod fit;
pub mod mode;
pub mod redraw;
pub mod state;

use tracing::{debug, warn};

use crate::{
    config::ViewerConfig,
    error::{Result, ViewportError},
    rect::{PointD, RectD, SizeD, VectorD},
};

pub use fit::resolve_factor;
pub use mode::ZoomMode;
pub use redraw::{DisplaySurface, RedrawReason, StatusObserver};
pub use state::{ViewportState, ZoomState};

/// Multiplier applied per wheel notch or keyboard zoom step
pub const ZOOM_MULTIPLIER: f64 = 1.1;

/// Number of UI turns a zoom request waits for the viewport to be laid out
pub const MAX_DEFERRED_ATTEMPTS: u32 = 600;

/// Result of a request to (re)apply a zoom mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// Factor recomputed, pan reset and redraw requested
    Applied,
    /// No image loaded, the display surface was cleared
    Cleared,
    /// Viewport not laid out yet, retried by [`ZoomEngine::process_pending`]
    Deferred,
    /// Nothing changed
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct PendingApply {
    mode: ZoomMode,
    capture: bool,
    reason: RedrawReason,
    attempts: u32,
}

/// Top-left corner of an image scaled by `factor` and centered in the viewport
fn centered_origin(image: SizeD, viewport: SizeD, factor: f64) -> PointD {
    PointD::new(
        (viewport.width() - image.width() * factor) / 2.0,
        (viewport.height() - image.height() * factor) / 2.0,
    )
}

/// Computes the pan offset that keeps the image point under `anchor` fixed
/// while the zoom changes from `factor` to `new_factor`.
///
/// No rounding is applied here, repeated wheel events would otherwise drift.
fn anchored_pan_offset(
    image: SizeD,
    viewport: SizeD,
    factor: f64,
    new_factor: f64,
    pan_offset: VectorD,
    anchor: PointD,
) -> VectorD {
    let base = centered_origin(image, viewport, factor) + pan_offset;
    let ratio_x = (anchor.x() - base.x()) / (image.width() * factor);
    let ratio_y = (anchor.y() - base.y()) / (image.height() * factor);
    let new_base = centered_origin(image, viewport, new_factor);
    VectorD::new(
        anchor.x() - new_base.x() - ratio_x * image.width() * new_factor,
        anchor.y() - new_base.y() - ratio_y * image.height() * new_factor,
    )
}

/// Owns the [`ViewportState`] and performs every mutation on it.
///
/// All operations run on the UI thread and complete synchronously. After
/// each mutation the display surface is asked to redraw with the fully
/// updated state.
pub struct ZoomEngine<D: DisplaySurface> {
    state: ViewportState,
    display: D,
    /// Natural size of the loaded image, `None` when nothing is loaded
    image_size: Option<SizeD>,
    /// Viewport size used by the last successful computation
    viewport_size: SizeD,
    observers: Vec<Box<dyn StatusObserver>>,
    pending: Option<PendingApply>,
}

impl<D: DisplaySurface> ZoomEngine<D> {
    pub fn new(display: D, state: ViewportState) -> Self {
        Self {
            state,
            display,
            image_size: None,
            viewport_size: SizeD::default(),
            observers: Vec::new(),
            pending: None,
        }
    }

    pub fn from_config(display: D, config: &ViewerConfig) -> Self {
        Self::new(display, ViewportState::from_config(config))
    }

    pub fn state(&self) -> &ViewportState {
        &self.state
    }

    pub fn zoom_factor(&self) -> f64 {
        self.state.zoom_factor()
    }

    pub fn zoom_mode(&self) -> ZoomMode {
        self.state.zoom_mode()
    }

    pub fn custom_zoom_percentage(&self) -> f64 {
        self.state.custom_zoom_percentage()
    }

    pub fn manual_zoom_enabled(&self) -> bool {
        self.state.manual_zoom_enabled()
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    pub fn image_size(&self) -> Option<SizeD> {
        self.image_size
    }

    pub fn viewport_size(&self) -> SizeD {
        self.viewport_size
    }

    pub fn add_observer(&mut self, observer: impl StatusObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Returns true while a zoom mode request waits for the viewport
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Settings to write back to the configuration store
    pub fn settings(&self) -> ViewerConfig {
        ViewerConfig {
            zoom_mode: self.state.zoom_mode(),
            custom_zoom_percentage: self.state.custom_zoom_percentage(),
            aspect_safety: self.state.aspect_safety_enabled(),
            cursor_anchored_zoom: self.state.cursor_anchored_zoom_enabled(),
            manual_zoom: self.state.manual_zoom_enabled(),
        }
    }

    /// Activates `mode`: recomputes the zoom factor, resets the pan offset and
    /// requests a redraw.
    ///
    /// Selecting [`ZoomMode::MaintainCurrentZoom`] first pins the live zoom factor
    /// into the custom zoom percentage.
    ///
    /// # Returns
    /// * `Cleared` when no image is loaded
    /// * `Deferred` when the viewport has no usable size yet, see [`Self::process_pending`]
    /// * `Ignored` when the image has no usable size
    pub fn apply_zoom_mode(&mut self, mode: ZoomMode) -> ApplyOutcome {
        self.pending = None;
        self.apply_mode(
            mode,
            mode == ZoomMode::MaintainCurrentZoom,
            RedrawReason::ZoomSettingChanged,
            0,
        )
    }

    /// Same as [`Self::apply_zoom_mode`] for a mode given by name (menu actions,
    /// command palette). Unknown names leave the state untouched.
    pub fn apply_zoom_mode_named(&mut self, name: &str) -> ApplyOutcome {
        match name.parse::<ZoomMode>() {
            Ok(mode) => self.apply_zoom_mode(mode),
            Err(e) => {
                warn!("{e}, keeping zoom factor {}", self.state.zoom_factor());
                ApplyOutcome::Ignored
            }
        }
    }

    /// Keyboard toggle between fitting the image and showing it 1:1
    pub fn toggle_fit_original(&mut self) -> ApplyOutcome {
        if self.state.zoom_mode() == ZoomMode::FitToScreen {
            self.apply_zoom_mode(ZoomMode::DisplayOriginal)
        } else {
            self.apply_zoom_mode(ZoomMode::FitToScreen)
        }
    }

    /// Retries a deferred zoom mode request. Call once per UI turn (idle callback).
    ///
    /// # Returns
    /// * `None` when nothing was pending, otherwise the outcome of the retry
    pub fn process_pending(&mut self) -> Option<ApplyOutcome> {
        let pending = self.pending.take()?;
        Some(self.apply_mode(
            pending.mode,
            pending.capture,
            pending.reason,
            pending.attempts,
        ))
    }

    /// Sets, replaces or unloads the image. The active zoom mode (or a request
    /// still waiting for the viewport) is applied for the new dimensions, so the
    /// pan offset is reset.
    pub fn set_image(&mut self, image_size: Option<SizeD>) -> ApplyOutcome {
        self.image_size = image_size;
        self.reapply(RedrawReason::ContentChanged)
    }

    /// Applies the active zoom mode again after the display surface changed size
    pub fn handle_viewport_resized(&mut self) -> ApplyOutcome {
        self.reapply(RedrawReason::CanvasResized)
    }

    /// Pins a zoom percentage entered by the user and activates
    /// [`ZoomMode::UserSpecifiedPercentage`].
    pub fn set_custom_zoom_percentage(&mut self, percentage: f64) -> Result<ApplyOutcome> {
        if !percentage.is_finite() || percentage <= 0.0 {
            return Err(ViewportError::InvalidPercentage(percentage));
        }
        self.state.set_custom_zoom_percentage(percentage);
        Ok(self.apply_zoom_mode(ZoomMode::UserSpecifiedPercentage))
    }

    pub fn set_aspect_safety_enabled(&mut self, enabled: bool) -> ApplyOutcome {
        if self.state.aspect_safety_enabled() == enabled {
            return ApplyOutcome::Ignored;
        }
        self.state.set_aspect_safety_enabled(enabled);
        self.reapply(RedrawReason::ZoomSettingChanged)
    }

    /// Only affects subsequent wheel and keyboard zoom steps
    pub fn set_cursor_anchored_zoom_enabled(&mut self, enabled: bool) {
        if self.state.cursor_anchored_zoom_enabled() != enabled {
            self.state.set_cursor_anchored_zoom_enabled(enabled);
            self.notify_observers();
        }
    }

    /// Enables or disables wheel zoom and drag panning over the image.
    /// Setting the current value again does nothing.
    pub fn set_manual_zoom_enabled(&mut self, enabled: bool) {
        if self.state.manual_zoom_enabled() == enabled {
            return;
        }
        self.state.set_manual_zoom_enabled(enabled);
        self.redraw(RedrawReason::ZoomSettingChanged);
        self.notify_observers();
    }

    /// Zooms in (`direction > 0`) or out by one wheel notch around the cursor.
    ///
    /// The zoom mode and the pinned percentage are left untouched.
    ///
    /// # Arguments
    /// * `direction` - Positive to zoom in, otherwise zoom out
    /// * `cursor` - Pointer position in viewport coordinates
    ///
    /// # Returns
    /// * `true` when the zoom factor changed
    pub fn adjust_zoom_by_wheel(&mut self, direction: i32, cursor: PointD) -> bool {
        let factor = self.state.zoom_factor();
        let new_factor = if direction > 0 {
            factor * ZOOM_MULTIPLIER
        } else {
            factor / ZOOM_MULTIPLIER
        };
        self.zoom_around(new_factor, cursor)
    }

    /// Keyboard zoom step, anchored at the center of the viewport
    pub fn zoom_step(&mut self, direction: i32) -> bool {
        let viewport = self.display.viewport_size();
        let center = PointD::new(viewport.width() / 2.0, viewport.height() / 2.0);
        self.adjust_zoom_by_wheel(direction, center)
    }

    fn zoom_around(&mut self, new_factor: f64, anchor: PointD) -> bool {
        if !self.state.manual_zoom_enabled() {
            return false;
        }
        let Some(image) = self.image_size.filter(SizeD::is_usable) else {
            return false;
        };
        if !new_factor.is_finite() || new_factor <= 0.0 {
            debug!("zoom factor {new_factor} out of range, ignored");
            return false;
        }

        if self.state.cursor_anchored_zoom_enabled() {
            let viewport = self.display.viewport_size();
            if viewport.is_usable() {
                self.viewport_size = viewport;
                let offset = anchored_pan_offset(
                    image,
                    viewport,
                    self.state.zoom_factor(),
                    new_factor,
                    self.state.pan_offset(),
                    anchor,
                );
                self.state.set_pan_offset(offset);
            } else {
                debug!("viewport {viewport:?} not usable, zooming without anchor");
            }
        }
        self.state.set_zoom_factor(new_factor);

        self.redraw(RedrawReason::InteractiveZoom);
        if self.state.zoom_mode().is_pinned() {
            // The live factor no longer matches the pinned percentage
            self.notify_observers();
        }
        true
    }

    /// Moves the image by the given number of screen pixels. There is no
    /// clamping, the image may be dragged completely out of view.
    pub fn pan(&mut self, dx: f64, dy: f64) -> bool {
        if !self.state.manual_zoom_enabled() {
            return false;
        }
        self.state
            .set_pan_offset(self.state.pan_offset() + VectorD::new(dx, dy));
        self.redraw(RedrawReason::InteractiveDrag);
        true
    }

    /// Where the image currently lands on the display surface
    pub fn image_rect(&self) -> Option<RectD> {
        let image = self.image_size.filter(SizeD::is_usable)?;
        let viewport = self.display.viewport_size();
        if !viewport.is_usable() {
            return None;
        }
        let factor = self.state.zoom_factor();
        let origin = centered_origin(image, viewport, factor) + self.state.pan_offset();
        Some(RectD::from_origin_size(origin, image.scale(factor)))
    }

    /// Maps a point on the display surface to image pixel coordinates
    pub fn screen_to_image(&self, point: PointD) -> Option<PointD> {
        let rect = self.image_rect()?;
        Some((point - rect.point0()).unscale(self.state.zoom_factor()))
    }

    /// Applies the active mode again, or the deferred request when one is
    /// waiting, since that one has not reached the state yet
    fn reapply(&mut self, reason: RedrawReason) -> ApplyOutcome {
        let (mode, capture) = self
            .pending
            .take()
            .map(|p| (p.mode, p.capture))
            .unwrap_or((self.state.zoom_mode(), false));
        self.apply_mode(mode, capture, reason, 0)
    }

    fn apply_mode(
        &mut self,
        mode: ZoomMode,
        capture: bool,
        reason: RedrawReason,
        attempts: u32,
    ) -> ApplyOutcome {
        let Some(image) = self.image_size else {
            if capture {
                self.state
                    .set_custom_zoom_percentage(self.state.zoom_factor() * 100.0);
            }
            self.state.set_zoom_mode(mode);
            debug!("no image loaded, clearing display");
            self.display.clear();
            return ApplyOutcome::Cleared;
        };
        if !image.is_usable() {
            debug!("invalid image dimensions {image:?}, zoom unchanged");
            return ApplyOutcome::Ignored;
        }

        let viewport = self.display.viewport_size();
        if !viewport.is_usable() {
            if attempts >= MAX_DEFERRED_ATTEMPTS {
                warn!("viewport not ready after {attempts} attempts, dropping {mode} request");
                return ApplyOutcome::Ignored;
            }
            debug!("viewport not ready, deferring {mode}");
            self.pending = Some(PendingApply {
                mode,
                capture,
                reason,
                attempts: attempts + 1,
            });
            return ApplyOutcome::Deferred;
        }
        self.viewport_size = viewport;

        if capture {
            self.state
                .set_custom_zoom_percentage(self.state.zoom_factor() * 100.0);
        }
        self.state.set_zoom_mode(mode);
        let factor = resolve_factor(mode, &self.state, image, viewport);
        self.state.set_zoom_factor(factor);
        self.state.set_pan_offset(VectorD::default());

        self.redraw(reason);
        self.notify_observers();
        ApplyOutcome::Applied
    }

    fn redraw(&mut self, reason: RedrawReason) {
        debug!(
            "redraw reason={reason:?} zoom={:.4} pan={:?}",
            self.state.zoom_factor(),
            self.state.pan_offset()
        );
        self.display.request_redraw(&self.state, reason);
    }

    fn notify_observers(&mut self) {
        for observer in &mut self.observers {
            observer.zoom_changed(&self.state);
        }
    }
}
