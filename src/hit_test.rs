use std::ops::{Add, Sub};

/// A plain 2D coordinate in stage space.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Point::new(x, y)
    }
}

/// Trait for anything that occupies a center-anchored box on the stage
pub trait DeviceGeometry {
    type Id: Copy;

    fn id(&self) -> Self::Id;
    /// Center point (the sprite anchor)
    fn center(&self) -> Point;
    /// (width, height)
    fn size(&self) -> (f32, f32);

    fn contains(&self, point: Point) -> bool {
        let c = self.center();
        let (w, h) = self.size();
        // Negative sizes (flipped sprites) still cover their absolute extent.
        (point.x - c.x).abs() <= w.abs() / 2.0 && (point.y - c.y).abs() <= h.abs() / 2.0
    }
}

/// Find the topmost item at the given position.
///
/// Items are expected in paint order, so the last match wins.
pub fn find_device_at<D, I>(x: f32, y: f32, devices: I) -> Option<D::Id>
where
    D: DeviceGeometry,
    I: IntoIterator<Item = D>,
{
    let point = Point::new(x, y);
    devices
        .into_iter()
        .filter(|d| d.contains(point))
        .last()
        .map(|d| d.id())
}

/// Find all items whose box intersects the given rectangle (top-left origin)
pub fn devices_in_rect<D, I>(x: f32, y: f32, width: f32, height: f32, devices: I) -> Vec<D::Id>
where
    D: DeviceGeometry,
    I: IntoIterator<Item = D>,
{
    let (min_x, max_x) = (x.min(x + width), x.max(x + width));
    let (min_y, max_y) = (y.min(y + height), y.max(y + height));

    devices
        .into_iter()
        .filter(|d| {
            let c = d.center();
            let (w, h) = d.size();
            let (hw, hh) = (w.abs() / 2.0, h.abs() / 2.0);
            c.x - hw <= max_x && c.x + hw >= min_x && c.y - hh <= max_y && c.y + hh >= min_y
        })
        .map(|d| d.id())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy)]
    struct TestBox {
        id: u32,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
    }

    impl DeviceGeometry for TestBox {
        type Id = u32;
        fn id(&self) -> u32 { self.id }
        fn center(&self) -> Point { Point::new(self.x, self.y) }
        fn size(&self) -> (f32, f32) { (self.w, self.h) }
    }

    fn boxes() -> Vec<TestBox> {
        vec![
            TestBox { id: 1, x: 50.0, y: 50.0, w: 20.0, h: 20.0 },
            TestBox { id: 2, x: 55.0, y: 55.0, w: 20.0, h: 20.0 },
            TestBox { id: 3, x: 200.0, y: 100.0, w: 40.0, h: 10.0 },
        ]
    }

    // ========================================================================
    // Point arithmetic
    // ========================================================================

    #[test]
    fn test_point_sub_and_add() {
        let p = Point::new(25.0, 20.0) - Point::new(20.0, 15.0);
        assert_eq!(p, Point::new(5.0, 5.0));
        assert_eq!(p + Point::new(1.0, -1.0), Point::new(6.0, 4.0));
    }

    #[test]
    fn test_point_from_tuple() {
        let p: Point = (3.0, 4.0).into();
        assert_eq!(p, Point::new(3.0, 4.0));
    }

    // ========================================================================
    // find_device_at()
    // ========================================================================

    #[test]
    fn test_find_device_at_center() {
        assert_eq!(find_device_at(200.0, 100.0, boxes()), Some(3));
    }

    #[test]
    fn test_find_device_at_edge_is_inclusive() {
        assert_eq!(find_device_at(220.0, 105.0, boxes()), Some(3));
    }

    #[test]
    fn test_find_device_at_miss() {
        assert_eq!(find_device_at(500.0, 500.0, boxes()), None);
    }

    #[test]
    fn test_find_device_at_prefers_topmost() {
        // (52, 52) is inside both 1 and 2; 2 was painted last
        assert_eq!(find_device_at(52.0, 52.0, boxes()), Some(2));
    }

    #[test]
    fn test_find_device_at_empty() {
        let empty: Vec<TestBox> = Vec::new();
        assert_eq!(find_device_at(0.0, 0.0, empty), None);
    }

    #[test]
    fn test_contains_negative_size() {
        let b = TestBox { id: 9, x: 0.0, y: 0.0, w: -10.0, h: -10.0 };
        assert!(b.contains(Point::new(4.0, -4.0)));
        assert!(!b.contains(Point::new(6.0, 0.0)));
    }

    // ========================================================================
    // devices_in_rect()
    // ========================================================================

    #[test]
    fn test_devices_in_rect_finds_intersecting() {
        let ids = devices_in_rect(0.0, 0.0, 45.0, 45.0, boxes());
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_devices_in_rect_negative_extent() {
        let ids = devices_in_rect(250.0, 120.0, -60.0, -30.0, boxes());
        assert_eq!(ids, vec![3]);
    }

    #[test]
    fn test_devices_in_rect_excludes_outside() {
        assert!(devices_in_rect(500.0, 500.0, 10.0, 10.0, boxes()).is_empty());
    }
}
