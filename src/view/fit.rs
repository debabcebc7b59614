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

use super::{ViewportState, ZoomMode};

/// Factor that makes the whole image visible: `min(vw/iw, vh/ih)`
fn fit_to_screen(image: SizeD, viewport: SizeD) -> f64 {
    (viewport.width() / image.width()).min(viewport.height() / image.height())
}

/// Resolves a zoom mode to the scale factor applied to the natural image size.
///
/// This is a pure function: it only reads the aspect safety flag and the pinned
/// percentage from `state`.
///
/// # Arguments
/// * `mode` - The zoom mode to resolve
/// * `state` - Current viewport state (aspect safety, pinned percentage, previous factor)
/// * `image` - Natural image dimensions
/// * `viewport` - Display surface dimensions
///
/// # Returns
/// * The scale factor, or the previous `state.zoom_factor()` when either size is
///   not usable or the result would not be a positive finite number
pub fn resolve_factor(mode: ZoomMode, state: &ViewportState, image: SizeD, viewport: SizeD) -> f64 {
    if !image.is_usable() || !viewport.is_usable() {
        return state.zoom_factor();
    }

    let aspect_safety = state.aspect_safety_enabled();
    let fit = fit_to_screen(image, viewport);

    let factor = match mode {
        ZoomMode::FitToScreen => fit,
        ZoomMode::Fill => {
            // Intentionally may exceed the viewport
            (viewport.width() / image.width()).max(viewport.height() / image.height())
        }
        ZoomMode::FitToWidth => {
            let factor = viewport.width() / image.width();
            if aspect_safety && image.height() * factor > viewport.height() {
                fit
            } else {
                factor
            }
        }
        ZoomMode::FitToHeight => {
            let factor = viewport.height() / image.height();
            if aspect_safety && image.width() * factor > viewport.width() {
                fit
            } else {
                factor
            }
        }
        ZoomMode::DisplayOriginal => {
            if aspect_safety
                && (image.width() > viewport.width() || image.height() > viewport.height())
            {
                fit
            } else {
                1.0
            }
        }
        ZoomMode::MaintainCurrentZoom | ZoomMode::UserSpecifiedPercentage => {
            state.custom_zoom_percentage() / 100.0
        }
    };

    if factor.is_finite() && factor > 0.0 {
        factor
    } else {
        state.zoom_factor()
    }
}
