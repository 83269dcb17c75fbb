//! Geometric primitives for masonry packing and element positioning.
//!
//! This module provides the small set of geometric types shared by the
//! packing engine, the transition scheduler and host adapters.
//!
//! # Overview
//!
//! - [`Point`] - A top-left position (`left`, `top`) in container space
//! - [`Size`] - Width and height of an element footprint
//! - [`Bounds`] - A rectangle defined by minimum and maximum coordinates
//!
//! # Coordinate System
//!
//! Mason uses screen coordinates:
//!
//! ```text
//!   (0,0) ────────► +X (right)
//!     │
//!     │
//!     │
//!     ▼
//!    +Y (down)
//! ```
//!
//! - **Origin**: Top-left corner of the container at `(0, 0)`
//! - **X-axis**: Increases rightward
//! - **Y-axis**: Increases downward, so "deeper" means larger `y`

use serde::{Deserialize, Serialize};

/// A 2D point representing the top-left corner of an element.
///
/// # Examples
///
/// ```
/// # use mason_core::geometry::Point;
/// let from = Point::new(10.0, 20.0);
/// let to = Point::new(30.0, 20.0);
///
/// let mid = from.lerp(to, 0.5);
/// assert_eq!(mid.x(), 20.0);
/// assert_eq!(mid.y(), 20.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate (left edge) of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate (top edge) of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Linearly interpolates between this point and `other`.
    ///
    /// `t = 0.0` yields `self`, `t = 1.0` yields `other`. Values outside
    /// `[0, 1]` extrapolate.
    pub fn lerp(self, other: Point, t: f32) -> Self {
        Self {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }

    /// Returns true when both axes differ by at most `tolerance`.
    ///
    /// ```
    /// # use mason_core::geometry::Point;
    /// let a = Point::new(10.0, 10.0);
    /// assert!(a.approx_eq(Point::new(11.0, 9.5), 1.0));
    /// assert!(!a.approx_eq(Point::new(11.5, 10.0), 1.0));
    /// ```
    pub fn approx_eq(self, other: Point, tolerance: f32) -> bool {
        (self.x - other.x).abs() <= tolerance && (self.y - other.y).abs() <= tolerance
    }
}

/// Width and height of an element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f32 {
        self.height
    }

    /// Returns a new Size grown by `amount` on both axes.
    ///
    /// Used to turn an element size into its packing footprint.
    pub fn grow(self, amount: f32) -> Self {
        Self {
            width: self.width + amount,
            height: self.height + amount,
        }
    }

    /// Returns true if both dimensions are finite numbers
    pub fn is_finite(self) -> bool {
        self.width.is_finite() && self.height.is_finite()
    }

    /// Returns true if either dimension is below zero
    pub fn is_negative(self) -> bool {
        self.width < 0.0 || self.height < 0.0
    }
}

/// A rectangle with minimum and maximum coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Creates bounds whose top-left corner is `top_left` and extent is `size`
    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self {
            min_x: top_left.x,
            min_y: top_left.y,
            max_x: top_left.x + size.width,
            max_y: top_left.y + size.height,
        }
    }

    /// Returns the minimum x-coordinate of the bounds
    pub fn min_x(self) -> f32 {
        self.min_x
    }

    /// Returns the minimum y-coordinate of the bounds
    pub fn min_y(self) -> f32 {
        self.min_y
    }

    /// Returns the maximum x-coordinate of the bounds
    pub fn max_x(self) -> f32 {
        self.max_x
    }

    /// Returns the maximum y-coordinate of the bounds
    pub fn max_y(self) -> f32 {
        self.max_y
    }

    /// Returns true if the interiors of the two bounds intersect.
    ///
    /// Bounds that only share an edge do not intersect, so two tiles placed
    /// side by side are not considered overlapping.
    pub fn intersects(&self, other: &Self) -> bool {
        self.min_x < other.max_x
            && other.min_x < self.max_x
            && self.min_y < other.max_y
            && other.min_y < self.max_y
    }
}
