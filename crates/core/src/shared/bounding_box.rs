use serde::{Deserialize, Serialize};

/// Integer pixel coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<[i32; 2]> for Point {
    fn from([x, y]: [i32; 2]) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned box in pixel space, corners `(x1, y1)` top-left and
/// `(x2, y2)` bottom-right.
///
/// Serialized as a `[x1, y1, x2, y2]` array. Inverted or zero-size boxes are
/// accepted as-is; the geometric tests below stay well defined for them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[i32; 4]", into = "[i32; 4]")]
pub struct BoundingBox {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl BoundingBox {
    pub const fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Center point, truncated toward zero.
    pub fn center(&self) -> Point {
        let cx = (i64::from(self.x1) + i64::from(self.x2)) / 2;
        let cy = (i64::from(self.y1) + i64::from(self.y2)) / 2;
        // The midpoint of two i32 values always fits in i32.
        Point::new(cx as i32, cy as i32)
    }

    /// Non-strict overlap: boxes overlap unless fully disjoint on an axis.
    ///
    /// Boxes that only touch along an edge or corner count as overlapping.
    pub fn overlaps(&self, other: &BoundingBox) -> bool {
        !(self.x2 < other.x1 || other.x2 < self.x1 || self.y2 < other.y1 || other.y2 < self.y1)
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x1 && p.x <= self.x2 && p.y >= self.y1 && p.y <= self.y2
    }
}

impl From<[i32; 4]> for BoundingBox {
    fn from([x1, y1, x2, y2]: [i32; 4]) -> Self {
        Self { x1, y1, x2, y2 }
    }
}

impl From<BoundingBox> for [i32; 4] {
    fn from(b: BoundingBox) -> Self {
        [b.x1, b.y1, b.x2, b.y2]
    }
}
