use egui::{Pos2, Rect};

/// Calculate distance from a point to a line segment
pub(crate) fn distance_to_line_segment(point: Pos2, line_start: Pos2, line_end: Pos2) -> f32 {
    let line_vec = line_end - line_start;
    let point_vec = point - line_start;

    let line_len = line_vec.length();
    if line_len == 0.0 {
        return point_vec.length();
    }

    let t = ((point_vec.x * line_vec.x + point_vec.y * line_vec.y) / line_len).clamp(0.0, line_len);
    let projection = line_start + (line_vec * t / line_len);
    (point - projection).length()
}

/// Distance from `point` to the nearest segment of a polyline
pub(crate) fn distance_to_polyline(point: Pos2, polyline: &[Pos2]) -> f32 {
    polyline
        .windows(2)
        .map(|segment| distance_to_line_segment(point, segment[0], segment[1]))
        .fold(f32::INFINITY, f32::min)
}

/// Calculate the bounding box for a set of points
pub(crate) fn calculate_bounds<'a>(points: impl IntoIterator<Item = &'a Pos2>, padding: f32) -> Rect {
    let mut bounds = Rect::NOTHING;
    for point in points {
        bounds.extend_with(*point);
    }
    if bounds == Rect::NOTHING {
        return bounds;
    }
    bounds.expand(padding)
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn test_distance_to_segment() {
        let a = pos2(0.0, 0.0);
        let b = pos2(10.0, 0.0);
        assert_eq!(distance_to_line_segment(pos2(5.0, 3.0), a, b), 3.0);
        assert_eq!(distance_to_line_segment(pos2(13.0, 4.0), a, b), 5.0);
        assert_eq!(distance_to_line_segment(pos2(3.0, 4.0), a, a), 5.0);
    }

    #[test]
    fn test_distance_to_polyline_takes_nearest() {
        let line = [pos2(0.0, 0.0), pos2(10.0, 0.0), pos2(10.0, 10.0)];
        assert_eq!(distance_to_polyline(pos2(12.0, 5.0), &line), 2.0);
        assert_eq!(distance_to_polyline(pos2(0.0, 0.0), &[pos2(0.0, 0.0)]), f32::INFINITY);
    }

    #[test]
    fn test_bounds_with_padding() {
        let points = [pos2(1.0, 2.0), pos2(5.0, -1.0)];
        let bounds = calculate_bounds(&points, 1.0);
        assert_eq!(bounds, Rect::from_min_max(pos2(0.0, -2.0), pos2(6.0, 3.0)));
        assert_eq!(calculate_bounds(&[], 3.0), Rect::NOTHING);
    }
}
