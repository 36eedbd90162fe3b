//! Arc-length and direction utilities for open polylines of boundary points

/// Euclidean distance between two points
pub fn distance(a: [f64; 2], b: [f64; 2]) -> f64 {
    (a[0] - b[0]).hypot(a[1] - b[1])
}

/// Total length of the polyline through `points` in order
pub fn polyline_length(points: &[[f64; 2]]) -> f64 {
    points
        .windows(2)
        .filter_map(|w| match w {
            [a, b] => Some(distance(*a, *b)),
            _ => None,
        })
        .sum()
}

/// Point halfway along the polyline by arc length
///
/// Falls back to the last point when the walk never reaches half length,
/// and returns `None` for an empty polyline.
pub fn arc_length_midpoint(points: &[[f64; 2]]) -> Option<[f64; 2]> {
    let last = *points.last()?;
    let half = polyline_length(points) * 0.5;
    let mut walked = 0.0;

    for w in points.windows(2) {
        let &[start, end] = w else {
            continue;
        };
        let step = distance(start, end);
        if walked + step >= half && step > 0.0 {
            let ratio = (half - walked) / step;
            return Some([
                start[0] + ratio * (end[0] - start[0]),
                start[1] + ratio * (end[1] - start[1]),
            ]);
        }
        walked += step;
    }

    Some(last)
}

/// Unit normal of the polyline segment nearest to `at`
///
/// The normal is the segment direction rotated by +90 degrees, `(-dy, dx)`.
/// The opposite side is its negation. Returns `None` for fewer than two points
/// or a degenerate segment.
pub fn local_normal(points: &[[f64; 2]], at: [f64; 2]) -> Option<[f64; 2]> {
    if points.len() < 2 {
        return None;
    }

    let closest = points
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| {
            distance(**a, at)
                .partial_cmp(&distance(**b, at))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map_or(0, |(index, _)| index);

    let (p0, p1) = if closest + 1 < points.len() {
        (points.get(closest)?, points.get(closest + 1)?)
    } else {
        (points.get(closest - 1)?, points.get(closest)?)
    };

    let (dx, dy) = (p1[0] - p0[0], p1[1] - p0[1]);
    let length = dx.hypot(dy);
    if length < 1e-3 {
        return None;
    }
    Some([-dy / length, dx / length])
}
