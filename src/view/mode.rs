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

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::ViewportError;

/// Defines how an image is scaled and positioned within the viewport.
///
/// Exactly one mode is active at a time. The mode expresses the user's intent,
/// the actual scale factor is derived from it by [`resolve_factor`](super::fit::resolve_factor).
#[derive(
    Default, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Clone, Copy, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum ZoomMode {
    /// Scale the image to fit entirely within the viewport, maintaining aspect ratio
    #[default]
    FitToScreen,
    /// Scale the image so its width matches the viewport width
    FitToWidth,
    /// Scale the image so its height matches the viewport height
    FitToHeight,
    /// Scale the image to cover the viewport completely, may crop parts of the image
    Fill,
    /// Display the image at its original size (1:1 pixel ratio)
    DisplayOriginal,
    /// Keep the pinned zoom percentage captured when this mode was selected
    MaintainCurrentZoom,
    /// Use the zoom percentage entered by the user
    UserSpecifiedPercentage,
}

impl ZoomMode {
    pub const ALL: [ZoomMode; 7] = [
        ZoomMode::FitToScreen,
        ZoomMode::FitToWidth,
        ZoomMode::FitToHeight,
        ZoomMode::Fill,
        ZoomMode::DisplayOriginal,
        ZoomMode::MaintainCurrentZoom,
        ZoomMode::UserSpecifiedPercentage,
    ];

    /// Returns true for the two modes driven by the pinned zoom percentage.
    pub fn is_pinned(&self) -> bool {
        matches!(
            self,
            ZoomMode::MaintainCurrentZoom | ZoomMode::UserSpecifiedPercentage
        )
    }

    /// Human readable name used by status and menu widgets
    pub fn label(&self) -> &'static str {
        match self {
            ZoomMode::FitToScreen => "Fit to screen",
            ZoomMode::FitToWidth => "Fit to width",
            ZoomMode::FitToHeight => "Fit to height",
            ZoomMode::Fill => "Fill",
            ZoomMode::DisplayOriginal => "Original size",
            ZoomMode::MaintainCurrentZoom => "Maintain zoom",
            ZoomMode::UserSpecifiedPercentage => "Custom zoom",
        }
    }
}

impl From<ZoomMode> for &str {
    /// Converts ZoomMode enum values to the names used in the configuration file
    fn from(value: ZoomMode) -> Self {
        match value {
            ZoomMode::FitToScreen => "fit-to-screen",
            ZoomMode::FitToWidth => "fit-to-width",
            ZoomMode::FitToHeight => "fit-to-height",
            ZoomMode::Fill => "fill",
            ZoomMode::DisplayOriginal => "display-original",
            ZoomMode::MaintainCurrentZoom => "maintain-current-zoom",
            ZoomMode::UserSpecifiedPercentage => "user-specified-percentage",
        }
    }
}

impl FromStr for ZoomMode {
    type Err = ViewportError;

    /// Parses a configuration name. Short aliases used by the keyboard
    /// commands ("fit", "nozoom") are accepted as well.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "fit-to-screen" | "fit" => Ok(ZoomMode::FitToScreen),
            "fit-to-width" | "width" => Ok(ZoomMode::FitToWidth),
            "fit-to-height" | "height" => Ok(ZoomMode::FitToHeight),
            "fill" => Ok(ZoomMode::Fill),
            "display-original" | "original" | "nozoom" => Ok(ZoomMode::DisplayOriginal),
            "maintain-current-zoom" | "maintain" => Ok(ZoomMode::MaintainCurrentZoom),
            "user-specified-percentage" | "custom" => Ok(ZoomMode::UserSpecifiedPercentage),
            _ => Err(ViewportError::UnknownZoomMode(value.to_string())),
        }
    }
}

impl fmt::Display for ZoomMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str((*self).into())
    }
}
