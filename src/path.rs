use crate::hit_test::Point;

/// Generate SVG path command for a straight connection line between two points
///
/// # Arguments
/// * `start` - Start point (center of the first device)
/// * `end` - End point (center of the second device)
///
/// # Returns
/// SVG path command string (e.g., "M 10 10 L 50 50")
pub fn generate_line_path(start: Point, end: Point) -> String {
    format!("M {} {} L {} {}", start.x, start.y, end.x, end.y)
}

/// Linear interpolation between two points
fn lerp_point(a: Point, b: Point, t: f32) -> Point {
    Point::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
}

/// Shortest distance from `p` to the segment `a`-`b`
pub fn distance_to_segment(p: Point, a: Point, b: Point) -> f32 {
    let ab = b - a;
    let len_sq = ab.x * ab.x + ab.y * ab.y;
    if len_sq == 0.0 {
        let d = p - a;
        return (d.x * d.x + d.y * d.y).sqrt();
    }

    let ap = p - a;
    let t = ((ap.x * ab.x + ap.y * ab.y) / len_sq).clamp(0.0, 1.0);
    let closest = lerp_point(a, b, t);
    let d = p - closest;
    (d.x * d.x + d.y * d.y).sqrt()
}
