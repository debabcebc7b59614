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

use crate::rect::SizeD;

use super::ViewportState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedrawReason {
    CanvasResized,
    ContentChanged,
    InteractiveDrag,
    InteractiveZoom,
    ZoomSettingChanged,
}

impl RedrawReason {
    /// Interactive redraws may be drawn at reduced quality by the surface
    pub fn interactive(&self) -> bool {
        matches!(self, Self::InteractiveDrag | Self::InteractiveZoom)
    }
}

/// The widget that owns the decoded image and draws it.
///
/// A display surface performs no zoom computation of its own, it only reads
/// the [`ViewportState`] it is handed on every redraw request.
pub trait DisplaySurface {
    /// Current size of the drawing area in pixels. A zero size means the
    /// surface has not been laid out yet.
    fn viewport_size(&self) -> SizeD;

    /// Called after every mutating engine operation, with the state already fully updated.
    fn request_redraw(&mut self, state: &ViewportState, reason: RedrawReason);

    /// Called instead of a redraw when no image is loaded.
    fn clear(&mut self);
}

/// Status bar and info widgets that render the zoom percentage and mode name
pub trait StatusObserver {
    fn zoom_changed(&mut self, state: &ViewportState);
}

impl<F> StatusObserver for F
where
    F: FnMut(&ViewportState),
{
    fn zoom_changed(&mut self, state: &ViewportState) {
        self(state)
    }
}
