//! Greedy grid placement — assigns each room an axis-aligned rectangle on
//! the 1-ft occupancy grid, scoring every candidate position against zone
//! anchors, exterior-wall needs, and adjacency preferences.
//!
//! The search is deliberately exhaustive per room (every candidate size at
//! every free position) but prunes occupancy tests with a summed-area table
//! so a candidate rectangle is accepted or rejected in O(1).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::brief::NormalizedRoom;
use crate::envelope::BuildingEnvelope;
use crate::geometry::Rect;
use crate::grid::OccupancyGrid;
use crate::plan::{PlacedPlan, PlacedRoom, PlanMetadata};
use crate::tables::defaults_for;
use crate::types::Direction;
use crate::zoning::ZonedPlan;

const CANDIDATE_SCALES: [f32; 6] = [1.0, 0.95, 0.90, 0.85, 0.80, 0.75];

/// Which order rooms are attempted in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementOrder {
    /// Largest target area first.
    #[default]
    Default,
    /// Descending priority score.
    Priority,
    /// Garage → social → private → service → circulation → exterior.
    Zone,
    /// Smallest target area first.
    Reverse,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlacementOptions {
    pub order: PlacementOrder,
    /// Feet added to every candidate width before scaling.
    pub width_bias: i32,
}

/// Place every room of the zoned plan onto its floor's occupancy grid.
pub fn place_rooms(
    zoned: &ZonedPlan,
    envelope: &BuildingEnvelope,
    options: PlacementOptions,
) -> PlacedPlan {
    let mut grids: HashMap<u8, FloorGrid> = envelope
        .floor_rects
        .iter()
        .map(|(&floor, rect)| (floor, FloorGrid::new(*rect)))
        .collect();

    let ordered = order_rooms(&zoned.brief.rooms, options.order);
    let mut placed: Vec<PlacedRoom> = Vec::with_capacity(ordered.len());
    let mut unplaced_room_ids = Vec::new();
    let mut warnings = Vec::new();

    for room in &ordered {
        let Some(grid) = grids.get_mut(&room.floor) else {
            unplaced_room_ids.push(room.id.clone());
            warnings.push(format!("{}: no floor {} to place on", room.id, room.floor));
            continue;
        };
        let anchor = zoned.floor_zoning(room.floor).anchor(room.zone);
        match best_placement(room, grid, anchor, &placed, options.width_bias) {
            Some(best) => {
                grid.occupy(&best.rect);
                placed.push(to_placed_room(room, &best, &grid.rect));
            }
            None => {
                log::warn!("placement: no position found for {}", room.id);
                warnings.push(format!("{}: no free position on floor {}", room.id, room.floor));
                unplaced_room_ids.push(room.id.clone());
            }
        }
    }

    link_neighbors(&mut placed);

    log::info!(
        "placement: {} rooms placed, {} unplaced",
        placed.len(),
        unplaced_room_ids.len()
    );

    PlacedPlan {
        brief: zoned.brief.clone(),
        envelope: envelope.clone(),
        rooms: placed,
        doors: Vec::new(),
        windows: Vec::new(),
        circulation: None,
        unplaced_room_ids,
        metadata: PlanMetadata {
            strategy: String::new(),
            warnings,
        },
    }
}

/// Recompute every room's neighbor ids by pairwise edge-sharing per floor.
pub fn link_neighbors(rooms: &mut [PlacedRoom]) {
    let rects: Vec<(Rect, u8)> = rooms.iter().map(|r| (r.rect(), r.floor)).collect();
    for room in rooms.iter_mut() {
        room.neighbor_ids.clear();
    }
    for i in 0..rects.len() {
        for j in (i + 1)..rects.len() {
            if rects[i].1 == rects[j].1 && rects[i].0.shares_edge(&rects[j].0) {
                let id_j = rooms[j].id.clone();
                let id_i = rooms[i].id.clone();
                rooms[i].neighbor_ids.push(id_j);
                rooms[j].neighbor_ids.push(id_i);
            }
        }
    }
}

// ── Ordering ────────────────────────────────────────────────────────────

fn order_rooms(rooms: &[NormalizedRoom], order: PlacementOrder) -> Vec<NormalizedRoom> {
    let mut out: Vec<NormalizedRoom> = rooms.to_vec();
    match order {
        PlacementOrder::Default => {
            out.sort_by(|a, b| {
                b.target_area
                    .partial_cmp(&a.target_area)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then_with(|| a.id.cmp(&b.id))
            });
        }
        PlacementOrder::Priority => {
            out.sort_by(|a, b| {
                b.priority
                    .partial_cmp(&a.priority)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then_with(|| a.id.cmp(&b.id))
            });
        }
        PlacementOrder::Zone => {
            out.sort_by(|a, b| {
                a.zone
                    .placement_rank()
                    .cmp(&b.zone.placement_rank())
                    .then(
                        b.target_area
                            .partial_cmp(&a.target_area)
                            .unwrap_or(std::cmp::Ordering::Equal),
                    )
                    .then_with(|| a.id.cmp(&b.id))
            });
        }
        PlacementOrder::Reverse => {
            out.sort_by(|a, b| {
                a.target_area
                    .partial_cmp(&b.target_area)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then_with(|| a.id.cmp(&b.id))
            });
        }
    }
    out
}

// ── Candidate enumeration ───────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
struct Candidate {
    width: usize,
    depth: usize,
    rotated: bool,
}

fn candidates_for(room: &NormalizedRoom, width_bias: i32) -> Vec<Candidate> {
    let d = defaults_for(room.room_type);
    let mut out: Vec<Candidate> = Vec::new();
    let mut seen: Vec<(usize, usize)> = Vec::new();

    for &scale in &CANDIDATE_SCALES {
        let scaled_area = room.target_area * scale;
        if scaled_area < room.min_area {
            continue;
        }
        let width_f = (room.width + width_bias as f32 * scale).round();
        let width = width_f.max(d.min_width) as usize;
        if width == 0 {
            continue;
        }
        let depth = (scaled_area / width as f32).ceil() as usize;
        if depth == 0 {
            continue;
        }
        for (w, dp, rot) in [(width, depth, false), (depth, width, true)] {
            if !seen.contains(&(w, dp)) {
                seen.push((w, dp));
                out.push(Candidate {
                    width: w,
                    depth: dp,
                    rotated: rot,
                });
            }
        }
    }
    out
}

// ── Position search ─────────────────────────────────────────────────────

struct FloorGrid {
    rect: Rect,
    grid: OccupancyGrid,
    /// Summed-area table of occupied cells, (w+1)×(d+1).
    sat: Vec<u32>,
}

impl FloorGrid {
    fn new(rect: Rect) -> Self {
        let w = rect.width.round().max(1.0) as usize;
        let d = rect.depth.round().max(1.0) as usize;
        FloorGrid {
            rect,
            grid: OccupancyGrid::new(w, d),
            sat: vec![0; (w + 1) * (d + 1)],
        }
    }

    fn occupy(&mut self, room_rect: &Rect) {
        let x = (room_rect.x - self.rect.x).round().max(0.0) as usize;
        let y = (room_rect.y - self.rect.y).round().max(0.0) as usize;
        self.grid
            .occupy(x, y, room_rect.width.round() as usize, room_rect.depth.round() as usize);
        self.rebuild_sat();
    }

    fn rebuild_sat(&mut self) {
        let w = self.grid.width();
        let d = self.grid.depth();
        for y in 0..d {
            let mut row_sum = 0u32;
            for x in 0..w {
                if !self.grid.fits(x, y, 1, 1) {
                    row_sum += 1;
                }
                self.sat[(y + 1) * (w + 1) + (x + 1)] =
                    self.sat[y * (w + 1) + (x + 1)] + row_sum;
            }
        }
    }

    /// O(1) free-rectangle test via the summed-area table.
    fn is_free(&self, x: usize, y: usize, w: usize, d: usize) -> bool {
        if x + w > self.grid.width() || y + d > self.grid.depth() {
            return false;
        }
        let stride = self.grid.width() + 1;
        let total = self.sat[(y + d) * stride + (x + w)] + self.sat[y * stride + x]
            - self.sat[(y + d) * stride + x]
            - self.sat[y * stride + (x + w)];
        total == 0
    }
}

struct BestPlacement {
    rect: Rect,
    rotated: bool,
}

fn best_placement(
    room: &NormalizedRoom,
    grid: &FloorGrid,
    anchor: (f32, f32),
    placed: &[PlacedRoom],
    width_bias: i32,
) -> Option<BestPlacement> {
    let same_floor: Vec<&PlacedRoom> = placed.iter().filter(|p| p.floor == room.floor).collect();
    let fp = &grid.rect;
    let mut best: Option<(f64, BestPlacement)> = None;

    for cand in candidates_for(room, width_bias) {
        if cand.width > grid.grid.width() || cand.depth > grid.grid.depth() {
            continue;
        }
        let max_x = grid.grid.width() - cand.width;
        let max_y = grid.grid.depth() - cand.depth;
        for cy in 0..=max_y {
            for cx in 0..=max_x {
                if !grid.is_free(cx, cy, cand.width, cand.depth) {
                    continue;
                }
                let rect = Rect::new(
                    fp.x + cx as f32,
                    fp.y + cy as f32,
                    cand.width as f32,
                    cand.depth as f32,
                );
                let score = placement_score(room, &rect, fp, anchor, &same_floor);
                if best.as_ref().map_or(true, |(s, _)| score > *s) {
                    best = Some((
                        score,
                        BestPlacement {
                            rect,
                            rotated: cand.rotated,
                        },
                    ));
                }
            }
        }
    }
    best.map(|(_, b)| b)
}

fn placement_score(
    room: &NormalizedRoom,
    rect: &Rect,
    fp: &Rect,
    anchor: (f32, f32),
    same_floor: &[&PlacedRoom],
) -> f64 {
    let mut score = 0.0f64;
    let (cx, cy) = rect.center();

    // Pull toward the zone anchor.
    let anchor_dist = (cx - anchor.0).abs() + (cy - anchor.1).abs();
    score += (220.0 - anchor_dist as f64 * 8.0).max(0.0);

    // Exterior-wall satisfaction.
    let edges = exterior_walls(rect, fp).len();
    if room.needs_exterior {
        score += if edges > 0 { 260.0 } else { -400.0 };
    } else {
        score += 8.0 * edges as f64;
    }

    // Relationships with everything already placed on this floor.
    for other in same_floor {
        let other_rect = other.rect();
        let touching = rect.shares_edge(&other_rect);
        let dist = rect.center_manhattan(&other_rect) as f64;

        let wants = room.adjacent_to.contains(&other.room_type);
        let avoids = room.away_from.contains(&other.room_type);

        if wants {
            score += if touching {
                140.0
            } else {
                (40.0 - dist * 3.0).max(0.0)
            };
        } else if touching && !avoids {
            score += 12.0;
        }
        if avoids {
            score -= if touching {
                180.0
            } else {
                (50.0 - dist * 4.0).max(0.0)
            };
        }
        if other.zone == room.zone {
            score += (30.0 - dist * 2.0).max(0.0);
        }
    }

    // Penalize drifting from the target area.
    let area_dev = (rect.area() - room.target_area).abs() / room.target_area;
    score -= 60.0 * area_dev as f64;

    score
}

/// Which footprint edges a room rectangle touches.
pub fn exterior_walls(rect: &Rect, fp: &Rect) -> Vec<Direction> {
    let mut out = Vec::new();
    if (rect.top() - fp.top()).abs() < 0.01 {
        out.push(Direction::North);
    }
    if (rect.y - fp.y).abs() < 0.01 {
        out.push(Direction::South);
    }
    if (rect.right() - fp.right()).abs() < 0.01 {
        out.push(Direction::East);
    }
    if (rect.x - fp.x).abs() < 0.01 {
        out.push(Direction::West);
    }
    out
}

fn to_placed_room(room: &NormalizedRoom, best: &BestPlacement, fp: &Rect) -> PlacedRoom {
    PlacedRoom {
        id: room.id.clone(),
        room_type: room.room_type,
        label: room.label.clone(),
        zone: room.zone,
        x: best.rect.x,
        y: best.rect.y,
        width: best.rect.width,
        depth: best.rect.depth,
        floor: room.floor,
        sqft: best.rect.area(),
        rotated: best.rotated,
        exterior_walls: exterior_walls(&best.rect, fp),
        needs_exterior: room.needs_exterior,
        needs_plumbing: room.needs_plumbing,
        neighbor_ids: Vec::new(),
    }
}
