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

use mview_viewport::{
    rect::{PointD, SizeD},
    view::{resolve_factor, DisplaySurface, RedrawReason},
    ApplyOutcome, ViewportState, ZoomEngine, ZoomMode,
};
use proptest::prelude::*;

const EPSILON: f64 = 1e-9;

struct Surface {
    size: SizeD,
}

impl DisplaySurface for Surface {
    fn viewport_size(&self) -> SizeD {
        self.size
    }

    fn request_redraw(&mut self, _state: &ViewportState, _reason: RedrawReason) {}

    fn clear(&mut self) {}
}

fn engine(image: SizeD, viewport: SizeD) -> ZoomEngine<Surface> {
    let mut engine = ZoomEngine::new(Surface { size: viewport }, ViewportState::default());
    assert_eq!(engine.set_image(Some(image)), ApplyOutcome::Applied);
    engine
}

fn dimension() -> impl Strategy<Value = f64> {
    1.0f64..8000.0
}

fn zoom_mode() -> impl Strategy<Value = ZoomMode> {
    proptest::sample::select(ZoomMode::ALL.to_vec())
}

proptest! {
    #[test]
    fn fit_to_screen_contains_image(
        iw in dimension(), ih in dimension(), vw in dimension(), vh in dimension(),
    ) {
        let state = ViewportState::default();
        let f = resolve_factor(ZoomMode::FitToScreen, &state, SizeD::new(iw, ih), SizeD::new(vw, vh));
        prop_assert!(f > 0.0);
        prop_assert!(iw * f <= vw + EPSILON * vw);
        prop_assert!(ih * f <= vh + EPSILON * vh);
    }

    #[test]
    fn fit_to_screen_never_grows_with_image(
        iw in dimension(), ih in dimension(), vw in dimension(), vh in dimension(),
        grow in 0.0f64..4000.0,
    ) {
        let state = ViewportState::default();
        let viewport = SizeD::new(vw, vh);
        let f = resolve_factor(ZoomMode::FitToScreen, &state, SizeD::new(iw, ih), viewport);
        let wider = resolve_factor(ZoomMode::FitToScreen, &state, SizeD::new(iw + grow, ih), viewport);
        let taller = resolve_factor(ZoomMode::FitToScreen, &state, SizeD::new(iw, ih + grow), viewport);
        prop_assert!(wider <= f);
        prop_assert!(taller <= f);
    }

    #[test]
    fn fill_covers_viewport(
        iw in dimension(), ih in dimension(), vw in dimension(), vh in dimension(),
    ) {
        let state = ViewportState::default();
        let f = resolve_factor(ZoomMode::Fill, &state, SizeD::new(iw, ih), SizeD::new(vw, vh));
        prop_assert!(iw * f >= vw - EPSILON * vw);
        prop_assert!(ih * f >= vh - EPSILON * vh);
    }

    #[test]
    fn aspect_safety_never_clips(
        iw in dimension(), ih in dimension(), vw in dimension(), vh in dimension(),
        mode in proptest::sample::select(vec![
            ZoomMode::FitToScreen,
            ZoomMode::FitToWidth,
            ZoomMode::FitToHeight,
            ZoomMode::DisplayOriginal,
        ]),
    ) {
        let mut engine = engine(SizeD::new(iw, ih), SizeD::new(vw, vh));
        engine.set_aspect_safety_enabled(true);
        engine.apply_zoom_mode(mode);
        let f = engine.zoom_factor();
        prop_assert!(iw * f <= vw + EPSILON * vw);
        prop_assert!(ih * f <= vh + EPSILON * vh);
    }

    #[test]
    fn apply_zoom_mode_is_idempotent(
        iw in dimension(), ih in dimension(), vw in dimension(), vh in dimension(),
        mode in zoom_mode(),
    ) {
        let mut engine = engine(SizeD::new(iw, ih), SizeD::new(vw, vh));
        engine.apply_zoom_mode(mode);
        let first = engine.zoom_factor();
        engine.apply_zoom_mode(mode);
        let second = engine.zoom_factor();
        prop_assert!((first - second).abs() <= EPSILON * first);
        prop_assert_eq!(engine.state().pan_offset_px().x(), 0);
        prop_assert_eq!(engine.state().pan_offset_px().y(), 0);
        prop_assert!(second.is_finite() && second > 0.0);
    }

    #[test]
    fn wheel_zoom_keeps_cursor_fraction(
        iw in 16.0f64..4000.0, ih in 16.0f64..4000.0, vw in 16.0f64..4000.0, vh in 16.0f64..4000.0,
        cx in 0.0f64..1.0, cy in 0.0f64..1.0,
        zoom_in in any::<bool>(),
    ) {
        let mut engine = engine(SizeD::new(iw, ih), SizeD::new(vw, vh));
        let cursor = PointD::new(cx * vw, cy * vh);

        let ratio = |engine: &ZoomEngine<Surface>| {
            let rect = engine.image_rect().unwrap();
            ((cursor.x() - rect.x0) / rect.width(), (cursor.y() - rect.y0) / rect.height())
        };

        let before = ratio(&engine);
        let wheel_delta = if zoom_in { 1 } else { -1 };
        prop_assert!(engine.adjust_zoom_by_wheel(wheel_delta, cursor));
        let after = ratio(&engine);
        // The cursor may lie far outside a small image, compare relative to the fraction
        prop_assert!((before.0 - after.0).abs() <= 1e-6 * before.0.abs().max(1.0));
        prop_assert!((before.1 - after.1).abs() <= 1e-6 * before.1.abs().max(1.0));
    }

    #[test]
    fn maintain_current_zoom_pins_live_factor(
        iw in dimension(), ih in dimension(), vw in dimension(), vh in dimension(),
        mode in zoom_mode(),
        steps in 0usize..6,
    ) {
        let mut engine = engine(SizeD::new(iw, ih), SizeD::new(vw, vh));
        engine.apply_zoom_mode(mode);
        for _ in 0..steps {
            engine.adjust_zoom_by_wheel(1, PointD::new(vw / 3.0, vh / 3.0));
        }
        let live = engine.zoom_factor();

        engine.apply_zoom_mode(ZoomMode::MaintainCurrentZoom);
        prop_assert!((engine.custom_zoom_percentage() - live * 100.0).abs() <= EPSILON * live * 100.0);
        prop_assert!((engine.zoom_factor() - live).abs() <= EPSILON * live);

        engine.apply_zoom_mode(ZoomMode::MaintainCurrentZoom);
        prop_assert!((engine.zoom_factor() - live).abs() <= EPSILON * live);
    }

    #[test]
    fn pan_without_manual_zoom_is_ignored(
        dx in -500.0f64..500.0, dy in -500.0f64..500.0,
    ) {
        let mut engine = engine(SizeD::new(800.0, 600.0), SizeD::new(400.0, 400.0));
        engine.set_manual_zoom_enabled(false);
        let before = engine.state().clone();
        prop_assert!(!engine.pan(dx, dy));
        prop_assert_eq!(engine.state(), &before);
    }
}

#[test]
fn aspect_safety_fit_to_width_example() {
    let mut engine = engine(SizeD::new(100.0, 2000.0), SizeD::new(500.0, 500.0));
    engine.set_aspect_safety_enabled(true);
    engine.apply_zoom_mode(ZoomMode::FitToWidth);
    assert_eq!(engine.zoom_factor(), 0.25);
}

#[test]
fn wheel_zoom_compounds() {
    let mut engine = engine(SizeD::new(400.0, 400.0), SizeD::new(400.0, 400.0));
    assert_eq!(engine.zoom_factor(), 1.0);
    for _ in 0..3 {
        engine.adjust_zoom_by_wheel(1, PointD::new(50.0, 350.0));
    }
    assert!((engine.zoom_factor() - 1.331).abs() < 1e-9);
}
