//! Room layouts: label-keyed rectangles plus an optional stairs marker
//!
//! A layout serialises as a flat JSON object mapping each room label to
//! `{x, y, width, height}`, with stairs stored under the reserved `"Stairs"` key.

use crate::spatial::geometry::{Rect, flush_adjacent, overlap};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Reserved layout key for the stairs rectangle
pub const STAIRS_KEY: &str = "Stairs";

/// Room category derived from a label, driving size ranges and constraints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoomKind {
    /// Sleeping room; never shares a wall with another bedroom
    Bedroom,
    /// Kitchen
    Kitchen,
    /// Washroom; optionally attached to a bedroom
    Washroom,
    /// Garage
    Garage,
    /// Anything else (study, storage, ...)
    Other,
}

impl RoomKind {
    /// Classify a label by the room type it mentions
    pub fn of(label: &str) -> Self {
        if label.contains("Bedroom") {
            Self::Bedroom
        } else if label.contains("Kitchen") {
            Self::Kitchen
        } else if label.contains("Washroom") {
            Self::Washroom
        } else if label.contains("Garage") {
            Self::Garage
        } else {
            Self::Other
        }
    }
}

/// Mapping from room label to rectangle, with stairs kept apart from rooms
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<String, Rect<i32>>",
    into = "BTreeMap<String, Rect<i32>>"
)]
pub struct Layout {
    rooms: BTreeMap<String, Rect<i32>>,
    stairs: Option<Rect<i32>>,
}

impl Layout {
    /// Create an empty layout
    pub const fn new() -> Self {
        Self {
            rooms: BTreeMap::new(),
            stairs: None,
        }
    }

    /// Insert or replace a room; the stairs key is routed to the stairs slot
    pub fn insert(&mut self, label: impl Into<String>, rect: Rect<i32>) {
        let label = label.into();
        if label == STAIRS_KEY {
            self.stairs = Some(rect);
        } else {
            self.rooms.insert(label, rect);
        }
    }

    /// Rectangle for a room label
    pub fn get(&self, label: &str) -> Option<&Rect<i32>> {
        self.rooms.get(label)
    }

    /// Iterate rooms in label order
    pub fn rooms(&self) -> impl Iterator<Item = (&str, &Rect<i32>)> {
        self.rooms.iter().map(|(label, rect)| (label.as_str(), rect))
    }

    /// Mutable access to every room rectangle
    pub fn rooms_mut(&mut self) -> impl Iterator<Item = (&str, &mut Rect<i32>)> {
        self.rooms
            .iter_mut()
            .map(|(label, rect)| (label.as_str(), rect))
    }

    /// Room labels in label order
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.rooms.keys().map(String::as_str)
    }

    /// Number of rooms, excluding stairs
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    /// Whether the layout holds no rooms
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Stairs rectangle, if placed
    pub const fn stairs(&self) -> Option<&Rect<i32>> {
        self.stairs.as_ref()
    }

    /// Record the stairs rectangle
    pub const fn set_stairs(&mut self, stairs: Rect<i32>) {
        self.stairs = Some(stairs);
    }

    /// Copy of the layout without its stairs entry
    pub fn without_stairs(&self) -> Self {
        Self {
            rooms: self.rooms.clone(),
            stairs: None,
        }
    }

    /// Sum of room areas, the fitness maximised by the genetic search
    pub fn total_area(&self) -> i64 {
        self.rooms.values().map(|r| i64::from(r.area())).sum()
    }

    /// Rooms of the given kind
    pub fn rooms_of_kind(&self, kind: RoomKind) -> impl Iterator<Item = (&str, &Rect<i32>)> {
        self.rooms()
            .filter(move |(label, _)| RoomKind::of(label) == kind)
    }
}

impl From<BTreeMap<String, Rect<i32>>> for Layout {
    fn from(mut entries: BTreeMap<String, Rect<i32>>) -> Self {
        let stairs = entries.remove(STAIRS_KEY);
        Self {
            rooms: entries,
            stairs,
        }
    }
}

impl From<Layout> for BTreeMap<String, Rect<i32>> {
    fn from(layout: Layout) -> Self {
        let mut entries = layout.rooms;
        if let Some(stairs) = layout.stairs {
            entries.insert(STAIRS_KEY.to_string(), stairs);
        }
        entries
    }
}

/// Room counts requested for a plan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomProgram {
    /// Number of bedrooms
    pub bedrooms: usize,
    /// Number of washrooms
    pub washrooms: usize,
    /// Whether a kitchen is included
    pub kitchen: bool,
    /// Whether a garage is included
    pub garage: bool,
}

impl Default for RoomProgram {
    fn default() -> Self {
        Self {
            bedrooms: 2,
            washrooms: 1,
            kitchen: true,
            garage: true,
        }
    }
}

impl RoomProgram {
    /// Ordered room labels; single rooms keep the plain name
    pub fn labels(&self) -> Vec<String> {
        let mut labels = Vec::new();
        if self.garage {
            labels.push("Garage".to_string());
        }
        if self.kitchen {
            labels.push("Kitchen".to_string());
        }
        labels.extend(numbered("Bedroom", self.bedrooms));
        labels.extend(numbered("Washroom", self.washrooms));
        labels
    }
}

fn numbered(base: &str, count: usize) -> Vec<String> {
    match count {
        0 => Vec::new(),
        1 => vec![base.to_string()],
        _ => (1..=count).map(|i| format!("{base}_{i}")).collect(),
    }
}

/// First broken layout invariant found by [`find_violation`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutViolation {
    /// Room with zero or negative extent
    Degenerate(String),
    /// Room extending past the canvas
    OutOfBounds(String),
    /// Two rooms covering common area
    Overlap(String, String),
    /// Two bedrooms sharing a wall
    AdjacentBedrooms(String, String),
    /// Washroom not attached to exactly one bedroom
    DetachedWashroom(String),
    /// Bedroom hosting more than one attached washroom
    SharedBedroom(String),
}

impl fmt::Display for LayoutViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Degenerate(label) => write!(f, "{label} has a non-positive size"),
            Self::OutOfBounds(label) => write!(f, "{label} extends past the canvas"),
            Self::Overlap(a, b) => write!(f, "{a} overlaps {b}"),
            Self::AdjacentBedrooms(a, b) => write!(f, "bedrooms {a} and {b} share a wall"),
            Self::DetachedWashroom(label) => {
                write!(f, "{label} is not attached to exactly one bedroom")
            }
            Self::SharedBedroom(label) => write!(f, "{label} hosts several washrooms"),
        }
    }
}

impl std::error::Error for LayoutViolation {}

/// Check every room invariant of a layout, stairs excluded
///
/// Attachment rules only apply when `attached_washroom` is set.
pub fn find_violation(
    layout: &Layout,
    canvas_width: i32,
    canvas_height: i32,
    attached_washroom: bool,
) -> Option<LayoutViolation> {
    let rooms: Vec<(&str, &Rect<i32>)> = layout.rooms().collect();

    for &(label, rect) in &rooms {
        if !rect.has_positive_size() {
            return Some(LayoutViolation::Degenerate(label.to_string()));
        }
        if !rect.fits_within(canvas_width, canvas_height) {
            return Some(LayoutViolation::OutOfBounds(label.to_string()));
        }
    }

    for (i, &(label_a, a)) in rooms.iter().enumerate() {
        for &(label_b, b) in rooms.iter().skip(i + 1) {
            if overlap(a, b) {
                return Some(LayoutViolation::Overlap(
                    label_a.to_string(),
                    label_b.to_string(),
                ));
            }
            if RoomKind::of(label_a) == RoomKind::Bedroom
                && RoomKind::of(label_b) == RoomKind::Bedroom
                && flush_adjacent(a, b)
            {
                return Some(LayoutViolation::AdjacentBedrooms(
                    label_a.to_string(),
                    label_b.to_string(),
                ));
            }
        }
    }

    if attached_washroom {
        let mut hosts: BTreeMap<&str, usize> = BTreeMap::new();
        for (washroom, rect) in layout.rooms_of_kind(RoomKind::Washroom) {
            let attached: Vec<&str> = layout
                .rooms_of_kind(RoomKind::Bedroom)
                .filter(|(_, bedroom)| flush_adjacent(rect, *bedroom))
                .map(|(label, _)| label)
                .collect();
            let [bedroom] = attached.as_slice() else {
                return Some(LayoutViolation::DetachedWashroom(washroom.to_string()));
            };
            let count = hosts.entry(*bedroom).or_insert(0);
            *count += 1;
            if *count > 1 {
                return Some(LayoutViolation::SharedBedroom((*bedroom).to_string()));
            }
        }
    }

    None
}

/// [`find_violation`] as a `Result`
///
/// # Errors
///
/// Returns the first broken invariant
pub fn validate_layout(
    layout: &Layout,
    canvas_width: i32,
    canvas_height: i32,
    attached_washroom: bool,
) -> Result<(), LayoutViolation> {
    find_violation(layout, canvas_width, canvas_height, attached_washroom).map_or(Ok(()), Err)
}
