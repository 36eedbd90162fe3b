//! Annotation of rendered floorplans with stairs, living room and porch
//!
//! Annotation reads only the input image: masks are extracted once, then the
//! stairs marker, the living room label and the porch are drawn onto a copy.
//! The same image and random state always produce the same output.

use crate::analysis::masks::{FloorMasks, detect_stairs, extract, floor_mask, open_area};
use crate::analysis::placement::{PlacerConfig, find_stairs_placement};
use crate::io::configuration::{LABEL_SHIFT, PORCH_EDGE_MARGIN, PORCH_LABEL_OFFSET};
use crate::io::labels::LabelWriter;
use crate::io::palette::Palette;
use crate::spatial::geometry::Rect;
use crate::spatial::layout::Layout;
use crate::spatial::mask::Mask;
use image::RgbImage;
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect as PixelRect;
use rand::Rng;
use rand::seq::IndexedRandom;

/// Label drawn on the stairs marker
pub const STAIRS_LABEL: &str = "Stairs";
/// Label drawn at the open area centroid
pub const LIVING_LABEL: &str = "Living Room";
/// Label drawn on the porch
pub const PORCH_LABEL: &str = "Porch";

/// What annotation found and drew
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Annotation {
    /// Whether a floorplan boundary was found at all
    pub floor_found: bool,
    /// Stairs marker, in pixels
    pub stairs: Option<Rect<i32>>,
    /// Anchor of the living room label
    pub living_label: Option<(i32, i32)>,
    /// Anchor of the porch label
    pub porch_label: Option<(i32, i32)>,
}

/// Annotated image with its updated layout
#[derive(Debug, Clone)]
pub struct AnnotatedPlan {
    /// Annotated copy of the input image
    pub image: RgbImage,
    /// Input layout with the stairs entry set when stairs were placed
    pub layout: Layout,
    /// Placement details
    pub annotation: Annotation,
}

/// Stairs and living room position taken from an annotated reference plan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceFeatures {
    /// Stairs marker in pixels
    pub stairs: Rect<i32>,
    /// Living room label anchor
    pub living_label: Option<(i32, i32)>,
}

/// Draws features onto rendered floorplans
pub struct FeaturePlacer {
    palette: Palette,
    config: PlacerConfig,
    labels: LabelWriter,
}

impl Default for FeaturePlacer {
    fn default() -> Self {
        Self::new(Palette::default(), PlacerConfig::default(), LabelWriter::disabled())
    }
}

impl FeaturePlacer {
    /// Placer with explicit palette, search parameters and label font
    pub const fn new(palette: Palette, config: PlacerConfig, labels: LabelWriter) -> Self {
        Self {
            palette,
            config,
            labels,
        }
    }

    /// Palette used to read and paint images
    pub const fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Search parameters
    pub const fn config(&self) -> &PlacerConfig {
        &self.config
    }

    /// Annotate `image`, returning the image and layout only
    pub fn place_features<R: Rng>(
        &self,
        image: &RgbImage,
        layout: &Layout,
        rng: &mut R,
    ) -> (RgbImage, Layout) {
        let plan = self.annotate(image, layout, rng);
        (plan.image, plan.layout)
    }

    /// Place stairs, label the living room and paint the porch
    ///
    /// An image without a recognisable boundary is returned unchanged. Failing
    /// to fit the stairs is not an error: the layout is then returned as given,
    /// including any stairs entry it already had, and the porch is still painted.
    pub fn annotate<R: Rng>(
        &self,
        image: &RgbImage,
        layout: &Layout,
        rng: &mut R,
    ) -> AnnotatedPlan {
        let mut plan = AnnotatedPlan {
            image: image.clone(),
            layout: layout.clone(),
            annotation: Annotation::default(),
        };

        let Some(masks) = extract(image, &self.palette) else {
            log::info!("No floorplan boundary found; image left unchanged");
            return plan;
        };
        plan.annotation.floor_found = true;

        if let Some(open) = &masks.open_area {
            match find_stairs_placement(open, &masks.color, &self.config) {
                Some(stairs) => {
                    self.draw_stairs(&mut plan.image, &stairs);
                    plan.layout.set_stairs(stairs);
                    plan.annotation.stairs = Some(stairs);
                }
                None => log::warn!("No free space for stairs in the open area"),
            }

            if let Some((x, y)) = open.centroid() {
                self.labels.draw(
                    &mut plan.image,
                    x - LABEL_SHIFT,
                    y,
                    LIVING_LABEL,
                    self.palette.text,
                );
                plan.annotation.living_label = Some((x, y));
            }
        } else {
            log::warn!("No open area large enough for stairs");
        }

        plan.annotation.porch_label = self.paint_porch(&mut plan.image, &masks, rng);
        plan
    }

    /// Stairs and living room anchor of an annotated reference plan
    ///
    /// Stairs come from the layout when it records them, otherwise from the
    /// marker colour in the image.
    pub fn reference_features(
        &self,
        image: &RgbImage,
        layout: &Layout,
    ) -> Option<ReferenceFeatures> {
        let stairs = layout
            .stairs()
            .copied()
            .or_else(|| detect_stairs(image, &self.palette))?;
        let living_label = floor_mask(image, &self.palette)
            .and_then(|floor| open_area(image, &self.palette, &floor))
            .and_then(|open| open.centroid());
        Some(ReferenceFeatures {
            stairs,
            living_label,
        })
    }

    /// Copy the reference plan's stairs and living label onto a variant
    ///
    /// The variant keeps its own rooms; its porch is repainted from its own
    /// floor boundary, with the label anchor drawn from `rng`.
    pub fn enhance_variant<R: Rng>(
        &self,
        image: &RgbImage,
        layout: &Layout,
        reference: &ReferenceFeatures,
        rng: &mut R,
    ) -> AnnotatedPlan {
        let mut plan = AnnotatedPlan {
            image: image.clone(),
            layout: propagate_stairs(reference, layout),
            annotation: Annotation {
                stairs: Some(reference.stairs),
                living_label: reference.living_label,
                ..Annotation::default()
            },
        };

        self.draw_stairs(&mut plan.image, &reference.stairs);
        if let Some((x, y)) = reference.living_label {
            self.labels.draw(
                &mut plan.image,
                x - LABEL_SHIFT,
                y,
                LIVING_LABEL,
                self.palette.text,
            );
        }

        if let Some(masks) = extract(image, &self.palette) {
            plan.annotation.floor_found = true;
            plan.annotation.porch_label = self.paint_porch(&mut plan.image, &masks, rng);
        }
        plan
    }

    /// Fill the marker rectangle and label it
    pub fn draw_stairs(&self, image: &mut RgbImage, stairs: &Rect<i32>) {
        if !stairs.has_positive_size() {
            return;
        }
        let area = PixelRect::at(stairs.x, stairs.y)
            .of_size(stairs.width as u32, stairs.height as u32);
        draw_filled_rect_mut(image, area, self.palette.stairs);
        self.labels.draw(
            image,
            stairs.x + stairs.width / 2 - 10,
            stairs.y + stairs.height / 2,
            STAIRS_LABEL,
            self.palette.text,
        );
    }

    // Everything outside the floor becomes porch; the label goes on a random
    // porch pixel away from the image edges
    fn paint_porch<R: Rng>(
        &self,
        image: &mut RgbImage,
        masks: &FloorMasks,
        rng: &mut R,
    ) -> Option<(i32, i32)> {
        let porch = masks.floor.invert();
        for (x, y) in porch.points() {
            image.put_pixel(x, y, self.palette.porch);
        }

        let (x, y) = porch_anchor(&porch, rng)?;
        let (x, y) = (x as i32 + PORCH_LABEL_OFFSET, y as i32 + PORCH_LABEL_OFFSET);
        self.labels
            .draw(image, x - LABEL_SHIFT, y, PORCH_LABEL, self.palette.text);
        Some((x, y))
    }
}

/// A random porch pixel strictly inside the edge margin
///
/// Falls back to the first porch pixel in row-major order when none is far
/// enough from the edges.
pub fn porch_anchor<R: Rng>(porch: &Mask, rng: &mut R) -> Option<(u32, u32)> {
    let (width, height) = (porch.width(), porch.height());
    let margin = PORCH_EDGE_MARGIN;
    let points: Vec<(u32, u32)> = porch.points().collect();
    let inner: Vec<(u32, u32)> = points
        .iter()
        .copied()
        .filter(|&(x, y)| x > margin && y > margin && x + margin < width && y + margin < height)
        .collect();
    inner.choose(rng).or_else(|| points.first()).copied()
}

/// `variant` with the reference stairs rectangle as its stairs entry
pub fn propagate_stairs(reference: &ReferenceFeatures, variant: &Layout) -> Layout {
    let mut layout = variant.clone();
    layout.set_stairs(reference.stairs);
    layout
}
