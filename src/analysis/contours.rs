//! External contour tracing over binary masks

use crate::spatial::mask::Mask;
use imageproc::contours::{BorderType, find_contours};

/// Ordered boundary pixels of one connected region
#[derive(Debug, Clone, PartialEq)]
pub struct Contour {
    points: Vec<[i32; 2]>,
}

impl Contour {
    /// Wrap an ordered list of `(x, y)` boundary pixels
    pub const fn new(points: Vec<[i32; 2]>) -> Self {
        Self { points }
    }

    /// Boundary pixels in tracing order
    pub fn points(&self) -> &[[i32; 2]] {
        &self.points
    }

    /// Enclosed area by the shoelace formula over the pixel centres
    ///
    /// Thin regions have little or no area even when they cover many pixels.
    pub fn area(&self) -> f64 {
        let Some(&last) = self.points.last() else {
            return 0.0;
        };
        let mut previous = last;
        let mut twice_area = 0.0;
        for &point in &self.points {
            twice_area += f64::from(previous[0]) * f64::from(point[1])
                - f64::from(point[0]) * f64::from(previous[1]);
            previous = point;
        }
        (twice_area * 0.5).abs()
    }

    /// The region of `source` this contour bounds, with its holes filled
    pub fn filled(&self, source: &Mask) -> Mask {
        match self.points.first() {
            Some(&[x, y]) => source.component_at(x, y).fill_holes(),
            None => Mask::new(source.width(), source.height()),
        }
    }
}

/// Outer borders of every connected region in `mask`
pub fn outer_contours(mask: &Mask) -> Vec<Contour> {
    find_contours::<i32>(&mask.to_gray_image())
        .into_iter()
        .filter(|contour| contour.border_type == BorderType::Outer)
        .map(|contour| Contour::new(contour.points.iter().map(|p| [p.x, p.y]).collect()))
        .collect()
}

/// Outer contour enclosing the largest area
///
/// A region nested inside a hole of another region is always smaller than its
/// enclosing region, so the winner is an outermost contour.
pub fn largest_contour(mask: &Mask) -> Option<Contour> {
    outer_contours(mask)
        .into_iter()
        .max_by(|a, b| a.area().total_cmp(&b.area()))
}
