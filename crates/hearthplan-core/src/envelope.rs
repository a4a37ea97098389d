//! Building-envelope computation — lot minus setbacks, then a per-floor
//! footprint sized for the program and centered in the buildable area.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::brief::NormalizedBrief;
use crate::geometry::Rect;
use crate::types::Direction;

const MIN_BUILDABLE_DIM: f32 = 10.0;
const MIN_FOOTPRINT_DIM: f32 = 12.0;
const MIN_FLOOR_AREA: f32 = 100.0;

/// The rectangles available to placement: buildable area and the shared
/// per-floor footprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingEnvelope {
    /// Lot rect minus setbacks, in lot coordinates.
    pub buildable: Rect,
    /// The floor footprint, centered inside the buildable rect.
    pub footprint: Rect,
    /// Conditioned area each floor aims for, including circulation inflation.
    pub floor_area_target: f32,
    /// Total target area across all floors.
    pub total_area: f32,
    pub stories: u8,
    /// Floor number → floor rect. Both floors share the footprint.
    pub floor_rects: BTreeMap<u8, Rect>,
    /// Occupancy-grid cell size, feet. Always 1.
    pub grid_resolution: f32,
}

impl BuildingEnvelope {
    pub fn floor_rect(&self, floor: u8) -> &Rect {
        self.floor_rects.get(&floor).unwrap_or(&self.footprint)
    }
}

/// Derive the building envelope from a normalized brief.
pub fn compute_envelope(brief: &NormalizedBrief) -> BuildingEnvelope {
    let buildable = buildable_rect(brief);

    // Inflate the per-floor target to leave room for circulation.
    let inflation = if brief.rooms.len() >= 10 { 1.12 } else { 1.08 };
    let stories = brief.stories.max(1) as f32;
    let per_floor = (brief.target_area / stories)
        .max(brief.total_room_area() / stories)
        .max(MIN_FLOOR_AREA)
        * inflation;

    let footprint = fit_footprint(per_floor, &buildable);

    let mut floor_rects = BTreeMap::new();
    for floor in 1..=brief.stories.max(1) {
        floor_rects.insert(floor, footprint);
    }

    log::info!(
        "envelope: buildable {:.0}x{:.0}, footprint {:.0}x{:.0} at ({:.0},{:.0}), {} floor(s)",
        buildable.width,
        buildable.depth,
        footprint.width,
        footprint.depth,
        footprint.x,
        footprint.y,
        brief.stories
    );

    BuildingEnvelope {
        buildable,
        footprint,
        floor_area_target: per_floor,
        total_area: brief.target_area,
        stories: brief.stories.max(1),
        floor_rects,
        grid_resolution: 1.0,
    }
}

/// Lot rect minus setbacks. The front setback is applied on the entry-facing
/// edge, the rear setback opposite, side setbacks on the remaining two.
fn buildable_rect(brief: &NormalizedBrief) -> Rect {
    let lot = &brief.lot;
    let (x0, x1, y0, y1) = match lot.entry_facing {
        Direction::South => (
            lot.setback_side,
            lot.lot_width - lot.setback_side,
            lot.setback_front,
            lot.lot_depth - lot.setback_rear,
        ),
        Direction::North => (
            lot.setback_side,
            lot.lot_width - lot.setback_side,
            lot.setback_rear,
            lot.lot_depth - lot.setback_front,
        ),
        Direction::East => (
            lot.setback_rear,
            lot.lot_width - lot.setback_front,
            lot.setback_side,
            lot.lot_depth - lot.setback_side,
        ),
        Direction::West => (
            lot.setback_front,
            lot.lot_width - lot.setback_rear,
            lot.setback_side,
            lot.lot_depth - lot.setback_side,
        ),
    };
    let width = (x1 - x0).max(MIN_BUILDABLE_DIM);
    let depth = (y1 - y0).max(MIN_BUILDABLE_DIM);
    Rect::new(x0, y0, width, depth)
}

/// Size a footprint of roughly the buildable rect's proportions achieving
/// `target` area, clamp it, and center it on integer offsets.
fn fit_footprint(target: f32, buildable: &Rect) -> Rect {
    let ratio = buildable.width / buildable.depth;
    let max_w = buildable.width.floor().max(MIN_FOOTPRINT_DIM);
    let max_d = buildable.depth.floor().max(MIN_FOOTPRINT_DIM);
    let mut width = (target * ratio).sqrt().round();
    width = width.clamp(MIN_FOOTPRINT_DIM, max_w);
    let mut depth = (target / width).ceil();
    depth = depth.clamp(MIN_FOOTPRINT_DIM, max_d);

    // Clamping may have cost area: grow the dimension with more slack first.
    while width * depth < target {
        let slack_w = max_w - width;
        let slack_h = max_d - depth;
        if slack_w <= 0.0 && slack_h <= 0.0 {
            break;
        }
        if slack_w >= slack_h {
            width += 1.0;
        } else {
            depth += 1.0;
        }
    }

    let x = buildable.x + ((buildable.width - width) / 2.0).floor();
    let y = buildable.y + ((buildable.depth - depth) / 2.0).floor();
    Rect::new(x, y, width, depth)
}
