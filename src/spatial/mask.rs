//! Binary masks over an image's pixel grid
//!
//! Masks are indexed `(row, col)` internally and addressed by `(x, y)` pixel
//! coordinates externally. Reads outside the grid are `false`, so neighbourhood
//! scans never need bounds checks at the call site.

use crate::spatial::geometry::Rect;
use image::{GrayImage, Luma};
use ndarray::Array2;
use std::collections::VecDeque;

const NEIGHBORS_8: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

const NEIGHBORS_4: [(i32, i32); 4] = [(0, -1), (-1, 0), (1, 0), (0, 1)];

/// Boolean membership grid with the dimensions of a rendered image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    cells: Array2<bool>,
}

impl Mask {
    /// Create an empty mask
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            cells: Array2::from_elem((height as usize, width as usize), false),
        }
    }

    /// Build a mask by evaluating `f(x, y)` for every pixel
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> bool) -> Self {
        Self {
            cells: Array2::from_shape_fn((height as usize, width as usize), |(row, col)| {
                f(col as u32, row as u32)
            }),
        }
    }

    /// Mask width in pixels
    pub fn width(&self) -> u32 {
        self.cells.ncols() as u32
    }

    /// Mask height in pixels
    pub fn height(&self) -> u32 {
        self.cells.nrows() as u32
    }

    /// Membership at `(x, y)`; `false` outside the grid
    pub fn get(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 {
            return false;
        }
        self.cells
            .get((y as usize, x as usize))
            .copied()
            .unwrap_or(false)
    }

    /// Set membership at `(x, y)`; writes outside the grid are ignored
    pub fn set(&mut self, x: i32, y: i32, value: bool) {
        if x < 0 || y < 0 {
            return;
        }
        if let Some(cell) = self.cells.get_mut((y as usize, x as usize)) {
            *cell = value;
        }
    }

    /// Number of member pixels
    pub fn count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }

    /// Whether any pixel is a member
    pub fn any(&self) -> bool {
        self.cells.iter().any(|&cell| cell)
    }

    /// Pixel-wise intersection
    pub fn intersect(&self, other: &Self) -> Self {
        self.zip_with(other, |a, b| a && b)
    }

    /// Pixel-wise union
    pub fn union(&self, other: &Self) -> Self {
        self.zip_with(other, |a, b| a || b)
    }

    /// Pixel-wise complement
    pub fn invert(&self) -> Self {
        Self {
            cells: self.cells.mapv(|cell| !cell),
        }
    }

    fn zip_with(&self, other: &Self, op: impl Fn(bool, bool) -> bool) -> Self {
        Self::from_fn(self.width(), self.height(), |x, y| {
            op(self.get(x as i32, y as i32), other.get(x as i32, y as i32))
        })
    }

    /// Member pixels inside `rect`, clipped to the grid
    pub fn count_in_rect(&self, rect: &Rect<i32>) -> usize {
        let mut count = 0;
        for y in rect.y.max(0)..rect.bottom().min(self.height() as i32) {
            for x in rect.x.max(0)..rect.right().min(self.width() as i32) {
                if self.get(x, y) {
                    count += 1;
                }
            }
        }
        count
    }

    /// Whether any member lies within `reach` pixels of `(x, y)` on both axes
    ///
    /// A reach of 1 probes the pixel and its 8 neighbours.
    pub fn touches_within(&self, x: i32, y: i32, reach: i32) -> bool {
        let reach = reach.max(0);
        (-reach..=reach).any(|dy| (-reach..=reach).any(|dx| self.get(x + dx, y + dy)))
    }

    /// Member pixel coordinates in row-major order
    pub fn points(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.cells
            .indexed_iter()
            .filter(|(_, cell)| **cell)
            .map(|((row, col), _)| (col as u32, row as u32))
    }

    /// 8-connected component containing `(x, y)`
    pub fn component_at(&self, x: i32, y: i32) -> Self {
        let mut component = Self::new(self.width(), self.height());
        if !self.get(x, y) {
            return component;
        }

        let mut queue = VecDeque::from([(x, y)]);
        component.set(x, y, true);
        while let Some((cx, cy)) = queue.pop_front() {
            for &(dx, dy) in &NEIGHBORS_8 {
                let (nx, ny) = (cx + dx, cy + dy);
                if self.get(nx, ny) && !component.get(nx, ny) {
                    component.set(nx, ny, true);
                    queue.push_back((nx, ny));
                }
            }
        }
        component
    }

    /// Members plus every pixel enclosed by them
    ///
    /// Background is flooded 4-connected from the grid border; whatever the
    /// flood cannot reach is inside.
    pub fn fill_holes(&self) -> Self {
        let (width, height) = (self.width() as i32, self.height() as i32);
        let mut outside = Self::new(self.width(), self.height());
        let mut queue = VecDeque::new();

        let border = (0..width)
            .flat_map(|x| [(x, 0), (x, height - 1)])
            .chain((0..height).flat_map(|y| [(0, y), (width - 1, y)]));
        for (x, y) in border {
            if !self.get(x, y) && !outside.get(x, y) && x >= 0 && y >= 0 {
                outside.set(x, y, true);
                queue.push_back((x, y));
            }
        }

        while let Some((cx, cy)) = queue.pop_front() {
            for &(dx, dy) in &NEIGHBORS_4 {
                let (nx, ny) = (cx + dx, cy + dy);
                if nx < 0 || ny < 0 || nx >= width || ny >= height {
                    continue;
                }
                if !self.get(nx, ny) && !outside.get(nx, ny) {
                    outside.set(nx, ny, true);
                    queue.push_back((nx, ny));
                }
            }
        }

        outside.invert()
    }

    /// Mean member position, `None` for an empty mask
    pub fn centroid(&self) -> Option<(f64, f64)> {
        let (mut sum_x, mut sum_y, mut count) = (0.0, 0.0, 0usize);
        for (x, y) in self.points() {
            sum_x += f64::from(x);
            sum_y += f64::from(y);
            count += 1;
        }
        (count > 0).then(|| (sum_x / count as f64, sum_y / count as f64))
    }

    /// Smallest rectangle containing every member
    pub fn bounding_rect(&self) -> Option<Rect<i32>> {
        let mut bounds: Option<(u32, u32, u32, u32)> = None;
        for (x, y) in self.points() {
            bounds = Some(match bounds {
                None => (x, y, x, y),
                Some((min_x, min_y, max_x, max_y)) => {
                    (min_x.min(x), min_y.min(y), max_x.max(x), max_y.max(y))
                }
            });
        }
        bounds.map(|(min_x, min_y, max_x, max_y)| {
            Rect::new(
                min_x as i32,
                min_y as i32,
                (max_x - min_x + 1) as i32,
                (max_y - min_y + 1) as i32,
            )
        })
    }

    /// 8-bit image with members at 255, as consumed by contour tracing
    pub fn to_gray_image(&self) -> GrayImage {
        GrayImage::from_fn(self.width(), self.height(), |x, y| {
            Luma([if self.get(x as i32, y as i32) { 255 } else { 0 }])
        })
    }
}
