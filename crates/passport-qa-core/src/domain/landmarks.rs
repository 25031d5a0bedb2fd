//! Facial landmark types produced by an external detector.

use serde::{Deserialize, Serialize};

/// A point in image pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal position, left to right.
    pub x: f64,
    /// Vertical position, top to bottom.
    pub y: f64,
}

impl Point {
    /// Creates a point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Named facial keypoints for one face.
///
/// A detector either returns a full set or fails; points are never partially
/// populated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FacialLandmarks {
    /// Top of the forehead.
    pub forehead_top: Point,
    /// Bottom of the chin.
    pub chin_bottom: Point,
    /// Tip of the nose.
    pub nose_tip: Point,
    /// Leftmost face boundary.
    pub left_face: Point,
    /// Rightmost face boundary.
    pub right_face: Point,
}

impl FacialLandmarks {
    /// Vertical face span in pixels (chin minus forehead).
    ///
    /// Negative or zero when the landmarks are inconsistent.
    #[must_use]
    pub fn head_height(&self) -> f64 {
        self.chin_bottom.y - self.forehead_top.y
    }

    /// Whether the chin lies strictly below the forehead.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.head_height() > 0.0
    }
}
