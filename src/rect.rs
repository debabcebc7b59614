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

use std::fmt::Debug;

/// Width and height of an image or a display surface.
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct Size<T> {
    width: T,
    height: T,
}

impl<T> Size<T>
where
    T: Copy,
{
    pub fn new(width: T, height: T) -> Self {
        Self { width, height }
    }

    pub fn width(&self) -> T {
        self.width
    }

    pub fn height(&self) -> T {
        self.height
    }
}

impl Size<f64> {
    /// Returns true when both dimensions are finite and strictly positive.
    ///
    /// Sizes that fail this check are treated as "not ready" by the zoom engine.
    pub fn is_usable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Returns the size multiplied by `scale` in both dimensions.
    pub fn scale(&self, scale: f64) -> Self {
        Self::new(self.width * scale, self.height * scale)
    }
}

impl From<(f64, f64)> for Size<f64> {
    fn from((width, height): (f64, f64)) -> Self {
        Self::new(width, height)
    }
}

/// A point or a displacement in 2D space.
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct VectorPoint<T> {
    x: T,
    y: T,
}

impl<T> VectorPoint<T>
where
    T: Copy + std::ops::Div<Output = T>,
{
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
    }

    pub fn x(&self) -> T {
        self.x
    }

    pub fn y(&self) -> T {
        self.y
    }

    /// Returns a new vector unscaled by the given scale.
    pub fn unscale(&self, scale: T) -> Self {
        Self::new(self.x / scale, self.y / scale)
    }
}

impl<T> std::ops::Add for VectorPoint<T>
where
    T: Copy + std::ops::Add<Output = T>,
{
    type Output = VectorPoint<T>;

    fn add(self, rhs: Self) -> Self::Output {
        Self::Output {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl<T> std::ops::Sub for VectorPoint<T>
where
    T: Copy + std::ops::Sub<Output = T>,
{
    type Output = VectorPoint<T>;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::Output {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

impl VectorPoint<f64> {
    /// Rounds both coordinates to the nearest whole pixel.
    pub fn round(&self) -> VectorPoint<i32> {
        VectorPoint {
            x: self.x.round() as i32,
            y: self.y.round() as i32,
        }
    }
}

/// A rectangle defined by two corner points (x0, y0) and (x1, y1).
/// Empty rectangles have x0 >= x1 or y0 >= y1.
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct Rect<T> {
    pub x0: T,
    pub y0: T,
    pub x1: T,
    pub y1: T,
}

impl<T> Rect<T>
where
    T: Copy
        + PartialOrd
        + std::ops::Add<Output = T>
        + std::ops::Sub<Output = T>
        + std::ops::Mul<Output = T>
        + std::ops::Div<Output = T>
        + Debug
        + Default,
{
    /// Creates a new rectangle with the given coordinates.
    /// No validation is performed - the rectangle may be empty.
    pub const fn new(x0: T, y0: T, x1: T, y1: T) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Creates a rectangle with its top-left corner at `origin` and the given size.
    pub fn from_origin_size(origin: VectorPoint<T>, size: Size<T>) -> Self {
        Self::new(
            origin.x,
            origin.y,
            origin.x + size.width,
            origin.y + size.height,
        )
    }

    /// Returns true if the rectangle is empty (has zero or negative area).
    pub fn is_empty(&self) -> bool {
        self.x0 >= self.x1 || self.y0 >= self.y1
    }

    /// Returns the width of the rectangle, zero for empty rectangles.
    pub fn width(&self) -> T {
        if self.is_empty() {
            T::default()
        } else {
            self.x1 - self.x0
        }
    }

    /// Returns the height of the rectangle, zero for empty rectangles.
    pub fn height(&self) -> T {
        if self.is_empty() {
            T::default()
        } else {
            self.y1 - self.y0
        }
    }

    pub fn point0(&self) -> VectorPoint<T> {
        VectorPoint {
            x: self.x0,
            y: self.y0,
        }
    }
}

impl Rect<f64> {
    /// Rounds the rectangle outward to whole pixels.
    /// Uses floor for the top-left corner and ceil for the bottom-right to ensure coverage.
    pub fn round(&self) -> (i32, i32, i32, i32) {
        (
            self.x0.floor() as i32,
            self.y0.floor() as i32,
            self.x1.ceil() as i32,
            self.y1.ceil() as i32,
        )
    }
}

pub type RectD = Rect<f64>;
pub type SizeD = Size<f64>;
pub type PointD = VectorPoint<f64>;
pub type PointI = VectorPoint<i32>;
pub type VectorD = VectorPoint<f64>;
