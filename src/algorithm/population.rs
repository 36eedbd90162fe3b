//! Constrained random construction of the initial layout population
//!
//! Rooms are placed one at a time at random positions, rejecting positions that
//! overlap placed rooms, put two bedrooms wall to wall, or crowd general rooms.
//! A candidate that cannot place some room within the attempt budget is dropped
//! whole and construction restarts, bounded by a global candidate cap.

use crate::algorithm::evolution::GeneratorConfig;
use crate::io::configuration::{MIN_ROOM_GAP, PLACEMENT_ATTEMPTS};
use crate::io::error::{FloorplanError, Result};
use crate::spatial::geometry::{Rect, flush_adjacent, min_gap, overlap};
use crate::spatial::layout::{Layout, RoomKind, find_violation};
use rand::Rng;
use std::collections::BTreeSet;
use std::ops::RangeInclusive;

/// Side length range for bedrooms
pub const BEDROOM_SIZES: RangeInclusive<i32> = 4..=5;
/// Side length range for kitchens
pub const KITCHEN_SIZES: RangeInclusive<i32> = 3..=4;
/// Side length range for washrooms
pub const WASHROOM_SIZES: RangeInclusive<i32> = 2..=3;
/// Side length range for every other room
pub const GENERAL_SIZES: RangeInclusive<i32> = 4..=6;

/// Side length range drawn from for a room kind
pub const fn size_range(kind: RoomKind) -> RangeInclusive<i32> {
    match kind {
        RoomKind::Bedroom => BEDROOM_SIZES,
        RoomKind::Kitchen => KITCHEN_SIZES,
        RoomKind::Washroom => WASHROOM_SIZES,
        RoomKind::Garage | RoomKind::Other => GENERAL_SIZES,
    }
}

/// Build `population_size` valid layouts
///
/// # Errors
///
/// Returns [`FloorplanError::InfeasibleConfiguration`] when the candidate cap is
/// exhausted before the population is complete
pub fn initialize_population<R: Rng>(config: &GeneratorConfig, rng: &mut R) -> Result<Vec<Layout>> {
    let order = placement_order(config);
    let mut population = Vec::with_capacity(config.population_size);
    let mut attempts = 0;

    while population.len() < config.population_size {
        if attempts >= config.max_candidates {
            return Err(FloorplanError::InfeasibleConfiguration {
                attempts,
                accepted: population.len(),
                required: config.population_size,
            });
        }
        attempts += 1;

        if let Some(layout) = build_candidate(config, &order, rng) {
            population.push(layout);
        }
    }

    log::debug!(
        "Initialised {} layouts from {attempts} candidates",
        population.len()
    );
    Ok(population)
}

// Attached washrooms need their bedrooms placed first
fn placement_order(config: &GeneratorConfig) -> Vec<String> {
    if !config.attached_washroom {
        return config.rooms.clone();
    }
    let (washrooms, others): (Vec<String>, Vec<String>) = config
        .rooms
        .iter()
        .cloned()
        .partition(|label| RoomKind::of(label) == RoomKind::Washroom);
    others.into_iter().chain(washrooms).collect()
}

/// Try to place every room of `order` into a fresh layout
///
/// Returns `None` if some room exhausts its placement attempts or the finished
/// layout breaks a layout invariant.
pub fn build_candidate<R: Rng>(
    config: &GeneratorConfig,
    order: &[String],
    rng: &mut R,
) -> Option<Layout> {
    let mut layout = Layout::new();
    let mut attached = BTreeSet::new();

    for label in order {
        let rect = place_room(config, &layout, &mut attached, label, rng)?;
        layout.insert(label.clone(), rect);
    }

    match find_violation(
        &layout,
        config.canvas_width,
        config.canvas_height,
        config.attached_washroom,
    ) {
        None => Some(layout),
        Some(violation) => {
            log::debug!("Discarding candidate: {violation}");
            None
        }
    }
}

fn place_room<R: Rng>(
    config: &GeneratorConfig,
    layout: &Layout,
    attached: &mut BTreeSet<String>,
    label: &str,
    rng: &mut R,
) -> Option<Rect<i32>> {
    let kind = RoomKind::of(label);
    let sizes = size_range(kind);
    let width = rng.random_range(sizes.clone());
    let height = rng.random_range(sizes);
    if width > config.canvas_width || height > config.canvas_height {
        return None;
    }

    for _ in 0..PLACEMENT_ATTEMPTS {
        let x = rng.random_range(0..=config.canvas_width - width);
        let y = rng.random_range(0..=config.canvas_height - height);
        let candidate = Rect::new(x, y, width, height);

        if layout.rooms().any(|(_, placed)| overlap(&candidate, placed)) {
            continue;
        }

        if kind == RoomKind::Bedroom
            && layout
                .rooms_of_kind(RoomKind::Bedroom)
                .any(|(_, bedroom)| flush_adjacent(&candidate, bedroom))
        {
            continue;
        }

        if config.attached_washroom && kind == RoomKind::Washroom {
            match place_adjacent_to_bedroom(
                layout,
                attached,
                &candidate,
                config.canvas_width,
                config.canvas_height,
            ) {
                Some(rect) => return Some(rect),
                None => continue,
            }
        }

        if kind != RoomKind::Bedroom
            && kind != RoomKind::Washroom
            && layout
                .rooms()
                .any(|(_, placed)| !min_gap(&candidate, placed, MIN_ROOM_GAP))
        {
            continue;
        }

        return Some(candidate);
    }

    None
}

/// Move a washroom flush against a bedroom that has no washroom yet
///
/// Tries left, right, top and bottom of each free bedroom in turn, keeping the
/// washroom's size and aligning it with the bedroom's minimum corner. The first
/// slot that overlaps nothing and stays on the canvas wins, and its bedroom is
/// recorded in `attached`.
pub fn place_adjacent_to_bedroom(
    layout: &Layout,
    attached: &mut BTreeSet<String>,
    washroom: &Rect<i32>,
    canvas_width: i32,
    canvas_height: i32,
) -> Option<Rect<i32>> {
    for (label, bedroom) in layout.rooms_of_kind(RoomKind::Bedroom) {
        if attached.contains(label) {
            continue;
        }

        let options = [
            Rect::new(
                bedroom.x - washroom.width,
                bedroom.y,
                washroom.width,
                washroom.height,
            ),
            Rect::new(bedroom.right(), bedroom.y, washroom.width, washroom.height),
            Rect::new(
                bedroom.x,
                bedroom.y - washroom.height,
                washroom.width,
                washroom.height,
            ),
            Rect::new(bedroom.x, bedroom.bottom(), washroom.width, washroom.height),
        ];

        let free = options.into_iter().find(|option| {
            option.fits_within(canvas_width, canvas_height)
                && !layout.rooms().any(|(_, placed)| overlap(option, placed))
        });

        if let Some(slot) = free {
            attached.insert(label.to_string());
            return Some(slot);
        }
    }

    None
}
