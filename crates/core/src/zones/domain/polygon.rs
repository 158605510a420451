use crate::shared::bounding_box::{BoundingBox, Point};

/// Minimum vertex count for a usable polygon.
pub const MIN_VERTICES: usize = 3;

/// Closed polygon over integer vertices with an inclusive membership test.
///
/// Convexity and simplicity are not checked. Bounds and the zero-area flag
/// are computed once so `contains` can reject most points cheaply.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    vertices: Vec<Point>,
    bounds: BoundingBox,
    zero_area: bool,
}

impl Polygon {
    /// Returns `None` when fewer than [`MIN_VERTICES`] vertices are given.
    pub fn new(vertices: Vec<Point>) -> Option<Self> {
        if vertices.len() < MIN_VERTICES {
            return None;
        }
        let bounds = bounds_of(&vertices);
        let zero_area = all_collinear(&vertices);
        Some(Self {
            vertices,
            bounds,
            zero_area,
        })
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn bounds(&self) -> BoundingBox {
        self.bounds
    }

    /// True when every vertex lies on one line. Such a polygon never
    /// contains any point.
    pub fn is_zero_area(&self) -> bool {
        self.zero_area
    }

    /// Even-odd ray casting with points on an edge counted as inside.
    pub fn contains(&self, p: Point) -> bool {
        if self.zero_area || !self.bounds.contains(p) {
            return false;
        }

        let n = self.vertices.len();
        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let a = self.vertices[i];
            let b = self.vertices[j];
            if on_segment(p, a, b) {
                return true;
            }
            if (a.y > p.y) != (b.y > p.y) {
                let (ax, ay) = (f64::from(a.x), f64::from(a.y));
                let (bx, by) = (f64::from(b.x), f64::from(b.y));
                let cross_x = ax + (f64::from(p.y) - ay) * (bx - ax) / (by - ay);
                if f64::from(p.x) < cross_x {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }
}

/// Products of full-range i32 differences need more than 64 bits.
fn cross(o: Point, a: Point, b: Point) -> i128 {
    let (ox, oy) = (i128::from(o.x), i128::from(o.y));
    let (ax, ay) = (i128::from(a.x) - ox, i128::from(a.y) - oy);
    let (bx, by) = (i128::from(b.x) - ox, i128::from(b.y) - oy);
    ax * by - ay * bx
}

fn on_segment(p: Point, a: Point, b: Point) -> bool {
    cross(a, b, p) == 0
        && p.x >= a.x.min(b.x)
        && p.x <= a.x.max(b.x)
        && p.y >= a.y.min(b.y)
        && p.y <= a.y.max(b.y)
}

fn all_collinear(vertices: &[Point]) -> bool {
    let origin = vertices[0];
    let Some(&other) = vertices.iter().find(|&&v| v != origin) else {
        return true;
    };
    vertices.iter().all(|&v| cross(origin, other, v) == 0)
}

fn bounds_of(vertices: &[Point]) -> BoundingBox {
    let mut b = BoundingBox::new(i32::MAX, i32::MAX, i32::MIN, i32::MIN);
    for v in vertices {
        b.x1 = b.x1.min(v.x);
        b.y1 = b.y1.min(v.y);
        b.x2 = b.x2.max(v.x);
        b.y2 = b.y2.max(v.y);
    }
    b
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn polygon(points: &[(i32, i32)]) -> Polygon {
        Polygon::new(points.iter().map(|&(x, y)| Point::new(x, y)).collect()).unwrap()
    }

    fn square() -> Polygon {
        polygon(&[(0, 0), (100, 0), (100, 100), (0, 100)])
    }

    /// L-shape: the notch at top-right (50..100, 0..50) is outside.
    fn l_shape() -> Polygon {
        polygon(&[(0, 0), (50, 0), (50, 50), (100, 50), (100, 100), (0, 100)])
    }

    #[test]
    fn test_rejects_fewer_than_three_vertices() {
        assert!(Polygon::new(vec![]).is_none());
        assert!(Polygon::new(vec![Point::new(0, 0), Point::new(1, 1)]).is_none());
    }

    #[test]
    fn test_bounds() {
        let p = polygon(&[(10, 20), (50, 5), (30, 70)]);
        assert_eq!(p.bounds(), BoundingBox::new(10, 5, 50, 70));
    }

    #[rstest]
    #[case::center((50, 50), true)]
    #[case::near_corner((1, 1), true)]
    #[case::outside_right((150, 50), false)]
    #[case::outside_negative((-1, 50), false)]
    #[case::outside_below((50, 101), false)]
    fn test_square_membership(#[case] p: (i32, i32), #[case] expected: bool) {
        assert_eq!(square().contains(Point::new(p.0, p.1)), expected);
    }

    #[rstest]
    #[case::left_edge((0, 50))]
    #[case::top_edge((50, 0))]
    #[case::right_edge((100, 50))]
    #[case::bottom_edge((50, 100))]
    #[case::vertex((100, 100))]
    #[case::origin_vertex((0, 0))]
    fn test_boundary_is_inside(#[case] p: (i32, i32)) {
        assert!(square().contains(Point::new(p.0, p.1)));
    }

    #[test]
    fn test_diagonal_edge_is_inside() {
        let triangle = polygon(&[(0, 0), (100, 0), (0, 100)]);
        assert!(triangle.contains(Point::new(50, 50)));
        assert!(!triangle.contains(Point::new(51, 51)));
    }

    #[rstest]
    #[case::body((25, 75), true)]
    #[case::lower_arm((75, 75), true)]
    #[case::notch((75, 25), false)]
    #[case::inner_corner((50, 50), true)]
    #[case::notch_edge((75, 50), true)]
    fn test_concave_membership(#[case] p: (i32, i32), #[case] expected: bool) {
        assert_eq!(l_shape().contains(Point::new(p.0, p.1)), expected);
    }

    #[test]
    fn test_collinear_polygon_is_zero_area() {
        let p = polygon(&[(0, 0), (50, 50), (100, 100)]);
        assert!(p.is_zero_area());
        assert!(!p.contains(Point::new(50, 50)));
        assert!(!p.contains(Point::new(0, 0)));
    }

    #[test]
    fn test_repeated_vertex_polygon_is_zero_area() {
        let p = polygon(&[(5, 5), (5, 5), (5, 5)]);
        assert!(p.is_zero_area());
        assert!(!p.contains(Point::new(5, 5)));
    }

    #[test]
    fn test_extreme_vertices_do_not_overflow() {
        let p = polygon(&[
            (i32::MIN, i32::MIN),
            (i32::MAX, i32::MIN),
            (i32::MAX, i32::MAX),
        ]);
        assert!(!p.is_zero_area());
        assert!(p.contains(Point::new(0, 0)));
        assert!(p.contains(Point::new(i32::MAX, 0)));
        assert!(!p.contains(Point::new(i32::MIN, i32::MAX)));
    }

    #[test]
    fn test_extreme_collinear_vertices_are_zero_area() {
        let p = polygon(&[(i32::MIN, i32::MIN), (0, 0), (i32::MAX, i32::MAX)]);
        assert!(p.is_zero_area());
    }

    #[test]
    fn test_regular_polygon_is_not_zero_area() {
        assert!(!square().is_zero_area());
    }
}
