//! Brief normalization — expands a design brief into a canonical room
//! program: resolved dimensions, merged adjacency constraints, implicit
//! rooms, and area scaling.
//!
//! Normalization never fails. Impossible programs shrink to per-type
//! minimums and surface a warning instead.

use crate::brief::{DesignBrief, LotConstraints, NormalizedBrief, NormalizedRoom, RoomRequirement};
use crate::tables::{defaults_for, ANTI_ADJACENCY, HARD_ADJACENCY};
use crate::types::RoomType;

const MIN_TARGET_AREA: f32 = 800.0;
const MAX_TARGET_AREA: f32 = 5000.0;
const MIN_LOT_DIM: f32 = 20.0;
const FOYER_BOOST_PRIORITY: f32 = 95.0;

/// Expand a design brief into a normalized brief ready for geometry.
pub fn normalize(brief: &DesignBrief) -> NormalizedBrief {
    let mut warnings = Vec::new();

    let target_area = clamp_target(brief.target_area, &mut warnings);
    let stories = if brief.stories == 2 { 2 } else { 1 };
    let lot = clamp_lot(brief.lot.clone().unwrap_or_default());

    // Resolve each requested room against the defaults table.
    let mut ordinals = [0u32; 25];
    let mut rooms: Vec<NormalizedRoom> = brief
        .rooms
        .iter()
        .map(|req| resolve_room(req, &mut ordinals, stories))
        .collect();

    inject_implicit_rooms(&mut rooms, &mut ordinals, stories);
    symmetrize_adjacency(&mut rooms);

    if stories == 1 {
        for room in &mut rooms {
            room.floor = 1;
        }
    }

    scale_to_target(&mut rooms, target_area, &mut warnings);

    log::info!(
        "normalized brief: {} rooms, {:.0} sqft target, {} warning(s)",
        rooms.len(),
        target_area,
        warnings.len()
    );

    NormalizedBrief {
        target_area,
        stories,
        style: brief.style,
        lot,
        rooms,
        warnings,
    }
}

fn clamp_target(area: f32, warnings: &mut Vec<String>) -> f32 {
    if area < MIN_TARGET_AREA {
        warnings.push(format!(
            "target area {:.0} below minimum, clamped to {:.0}",
            area, MIN_TARGET_AREA
        ));
        MIN_TARGET_AREA
    } else if area > MAX_TARGET_AREA {
        warnings.push(format!(
            "target area {:.0} above maximum, clamped to {:.0}",
            area, MAX_TARGET_AREA
        ));
        MAX_TARGET_AREA
    } else {
        area
    }
}

fn clamp_lot(mut lot: LotConstraints) -> LotConstraints {
    lot.lot_width = lot.lot_width.max(MIN_LOT_DIM);
    lot.lot_depth = lot.lot_depth.max(MIN_LOT_DIM);
    lot.setback_front = lot.setback_front.max(0.0);
    lot.setback_side = lot.setback_side.max(0.0);
    lot.setback_rear = lot.setback_rear.max(0.0);
    lot
}

fn resolve_room(req: &RoomRequirement, ordinals: &mut [u32; 25], stories: u8) -> NormalizedRoom {
    let d = defaults_for(req.room_type);
    let min_area = req.min_area.unwrap_or(d.min_area).max(d.min_area);
    let target_area = req.target_area.unwrap_or(d.target_area).max(min_area);
    let (width, depth) = dims_for_area(req.room_type, target_area);

    let ordinal = {
        let slot = &mut ordinals[req.room_type as usize];
        *slot += 1;
        *slot
    };

    let mut adjacent_to = req.adjacent_to.clone();
    let mut away_from = req.away_from.clone();
    merge_table_adjacency(req.room_type, &mut adjacent_to, &mut away_from);

    let floor = req.floor.unwrap_or(0).min(stories);

    NormalizedRoom {
        id: format!("{}-{}", req.room_type.as_str(), ordinal),
        room_type: req.room_type,
        label: if req.label.is_empty() {
            d.label.to_string()
        } else {
            req.label.clone()
        },
        min_area,
        target_area,
        width,
        depth,
        zone: d.zone,
        priority: priority_for(req.room_type, req.must_have, target_area),
        must_have: req.must_have,
        adjacent_to,
        away_from,
        needs_exterior: req.needs_exterior.unwrap_or(d.needs_exterior),
        needs_plumbing: req.needs_plumbing.unwrap_or(d.needs_plumbing),
        floor,
        implicit: false,
    }
}

/// width ≈ √area clamped to the type minimum; depth covers the remainder.
fn dims_for_area(rt: RoomType, area: f32) -> (f32, f32) {
    let d = defaults_for(rt);
    let width = area.sqrt().round().max(d.min_width);
    let depth = (area / width).ceil().max(d.min_depth);
    (width, depth)
}

fn priority_for(rt: RoomType, must_have: bool, target_area: f32) -> f32 {
    let mut p = defaults_for(rt).priority + target_area / 100.0;
    if must_have {
        p += 10.0;
    }
    p
}

/// Union the per-type hard/anti tables into the user hints, drop
/// self-references, and subtract away-from entries from adjacent-to.
fn merge_table_adjacency(
    rt: RoomType,
    adjacent_to: &mut Vec<RoomType>,
    away_from: &mut Vec<RoomType>,
) {
    for &(a, b) in HARD_ADJACENCY {
        if a == rt && !adjacent_to.contains(&b) {
            adjacent_to.push(b);
        } else if b == rt && !adjacent_to.contains(&a) {
            adjacent_to.push(a);
        }
    }
    for &(a, b, _) in ANTI_ADJACENCY {
        if a == rt && !away_from.contains(&b) {
            away_from.push(b);
        } else if b == rt && !away_from.contains(&a) {
            away_from.push(a);
        }
    }
    adjacent_to.retain(|&t| t != rt);
    away_from.retain(|&t| t != rt);
    // Away-from wins when both lists name the same type.
    let away = away_from.clone();
    adjacent_to.retain(|t| !away.contains(t));
}

fn has_type(rooms: &[NormalizedRoom], rt: RoomType) -> bool {
    rooms.iter().any(|r| r.room_type == rt)
}

fn inject_implicit_rooms(rooms: &mut Vec<NormalizedRoom>, ordinals: &mut [u32; 25], stories: u8) {
    // Foyer: every plan gets an entry space, priority-boosted so it places
    // early and near the front.
    if !has_type(rooms, RoomType::Foyer) {
        let adjacent: Vec<RoomType> = [RoomType::Living, RoomType::Family, RoomType::GreatRoom]
            .into_iter()
            .filter(|&t| has_type(rooms, t))
            .collect();
        let mut foyer = implicit_room(RoomType::Foyer, ordinals, 1);
        foyer.priority = FOYER_BOOST_PRIORITY;
        foyer.adjacent_to = adjacent;
        rooms.push(foyer);
    }

    // Hallway: circulation spine, adjacent to the foyer.
    if !has_type(rooms, RoomType::Hallway) {
        let mut hallway = implicit_room(RoomType::Hallway, ordinals, 1);
        hallway.adjacent_to = vec![RoomType::Foyer];
        rooms.push(hallway);
    }

    // One walk-in closet per primary bedroom, pinned to the same floor.
    let primaries: Vec<(String, u8)> = rooms
        .iter()
        .filter(|r| r.room_type == RoomType::PrimaryBed)
        .map(|r| (r.id.clone(), r.floor))
        .collect();
    let existing_closets = rooms
        .iter()
        .filter(|r| r.room_type == RoomType::WalkInCloset)
        .count();
    for (_, floor) in primaries.iter().skip(existing_closets) {
        let mut closet = implicit_room(RoomType::WalkInCloset, ordinals, *floor);
        closet.adjacent_to = vec![RoomType::PrimaryBed];
        rooms.push(closet);
    }

    // Two-story plans need stairs on floor 1.
    if stories == 2 && !has_type(rooms, RoomType::Stairs) {
        let mut stairs = implicit_room(RoomType::Stairs, ordinals, 1);
        stairs.adjacent_to = vec![RoomType::Hallway];
        rooms.push(stairs);
    }
}

fn implicit_room(rt: RoomType, ordinals: &mut [u32; 25], floor: u8) -> NormalizedRoom {
    let d = defaults_for(rt);
    let (width, depth) = dims_for_area(rt, d.target_area);
    let ordinal = {
        let slot = &mut ordinals[rt as usize];
        *slot += 1;
        *slot
    };
    let mut adjacent_to = Vec::new();
    let mut away_from = Vec::new();
    merge_table_adjacency(rt, &mut adjacent_to, &mut away_from);
    NormalizedRoom {
        id: format!("{}-{}", rt.as_str(), ordinal),
        room_type: rt,
        label: d.label.to_string(),
        min_area: d.min_area,
        target_area: d.target_area,
        width,
        depth,
        zone: d.zone,
        priority: priority_for(rt, false, d.target_area),
        must_have: false,
        adjacent_to,
        away_from,
        needs_exterior: d.needs_exterior,
        needs_plumbing: d.needs_plumbing,
        floor,
        implicit: true,
    }
}

/// If any room of type A wants type B, make sure rooms of type B want A back,
/// and drop B's away-from of A.
fn symmetrize_adjacency(rooms: &mut [NormalizedRoom]) {
    let mut wanted: Vec<(RoomType, RoomType)> = Vec::new();
    for room in rooms.iter() {
        for &t in &room.adjacent_to {
            wanted.push((room.room_type, t));
        }
    }
    for (from, to) in wanted {
        for room in rooms.iter_mut() {
            if room.room_type == to {
                if !room.adjacent_to.contains(&from) && room.room_type != from {
                    room.adjacent_to.push(from);
                }
                room.away_from.retain(|&t| t != from);
            }
        }
    }
}

/// Scale target areas so their sum matches the brief target; clamp each room
/// to its minimum. When even the minimums exceed the target, warn and leave
/// every room at minimum size.
fn scale_to_target(rooms: &mut [NormalizedRoom], target: f32, warnings: &mut Vec<String>) {
    if rooms.is_empty() {
        return;
    }
    let min_sum: f32 = rooms.iter().map(|r| r.min_area).sum();
    if min_sum > target {
        warnings.push(format!(
            "program minimums total {:.0} sqft, exceeding the {:.0} sqft target; all rooms clamped to minimum size",
            min_sum, target
        ));
        for room in rooms.iter_mut() {
            room.target_area = room.min_area;
            finish_room_resize(room);
        }
        return;
    }

    let current: f32 = rooms.iter().map(|r| r.target_area).sum();
    if current <= 0.0 {
        return;
    }
    let scale = target / current;
    for room in rooms.iter_mut() {
        room.target_area = (room.target_area * scale).round().max(room.min_area);
        finish_room_resize(room);
    }
}

fn finish_room_resize(room: &mut NormalizedRoom) {
    let (width, depth) = dims_for_area(room.room_type, room.target_area);
    room.width = width;
    room.depth = depth;
    room.priority = if room.implicit && room.room_type == RoomType::Foyer {
        FOYER_BOOST_PRIORITY
    } else {
        priority_for(room.room_type, room.must_have, room.target_area)
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Style;

    fn basic_brief(rooms: Vec<RoomRequirement>) -> DesignBrief {
        DesignBrief {
            target_area: 1800.0,
            stories: 1,
            style: Style::Ranch,
            rooms,
            lot: None,
        }
    }

    #[test]
    fn test_ids_get_per_type_ordinals() {
        let brief = basic_brief(vec![
            RoomRequirement::sized(RoomType::Bedroom, 140.0),
            RoomRequirement::sized(RoomType::Bedroom, 135.0),
            RoomRequirement::sized(RoomType::Living, 275.0),
        ]);
        let normalized = normalize(&brief);
        let ids: Vec<&str> = normalized.rooms.iter().map(|r| r.id.as_str()).collect();
        assert!(ids.contains(&"bedroom-1"));
        assert!(ids.contains(&"bedroom-2"));
        assert!(ids.contains(&"living-1"));
    }

    #[test]
    fn test_injects_foyer_and_hallway() {
        let brief = basic_brief(vec![RoomRequirement::sized(RoomType::Living, 275.0)]);
        let normalized = normalize(&brief);
        let foyer = normalized
            .rooms
            .iter()
            .find(|r| r.room_type == RoomType::Foyer)
            .expect("foyer injected");
        assert!(foyer.implicit);
        assert_eq!(foyer.floor, 1);
        assert!(foyer.adjacent_to.contains(&RoomType::Living));
        assert!((foyer.priority - 95.0).abs() < f32::EPSILON);
        assert!(normalized
            .rooms
            .iter()
            .any(|r| r.room_type == RoomType::Hallway && r.implicit));
    }

    #[test]
    fn test_walk_in_closet_per_primary_bed() {
        let brief = basic_brief(vec![
            RoomRequirement::sized(RoomType::PrimaryBed, 240.0),
            RoomRequirement::sized(RoomType::Living, 275.0),
        ]);
        let normalized = normalize(&brief);
        let closets = normalized
            .rooms
            .iter()
            .filter(|r| r.room_type == RoomType::WalkInCloset)
            .count();
        assert_eq!(closets, 1);
    }

    #[test]
    fn test_stairs_iff_two_stories() {
        let one = normalize(&basic_brief(vec![RoomRequirement::sized(
            RoomType::Living,
            275.0,
        )]));
        assert!(!one.rooms.iter().any(|r| r.room_type == RoomType::Stairs));

        let mut brief = basic_brief(vec![RoomRequirement::sized(RoomType::Living, 275.0)]);
        brief.stories = 2;
        let two = normalize(&brief);
        let stairs = two
            .rooms
            .iter()
            .find(|r| r.room_type == RoomType::Stairs)
            .expect("stairs injected for 2 stories");
        assert_eq!(stairs.floor, 1);
    }

    #[test]
    fn test_single_story_forces_floor_one() {
        let mut req = RoomRequirement::sized(RoomType::Bedroom, 140.0);
        req.floor = Some(2);
        let normalized = normalize(&basic_brief(vec![req]));
        assert!(normalized.rooms.iter().all(|r| r.floor <= 1));
    }

    #[test]
    fn test_hard_adjacency_merged_and_symmetric() {
        let brief = basic_brief(vec![
            RoomRequirement::sized(RoomType::Kitchen, 185.0),
            RoomRequirement::sized(RoomType::Dining, 145.0),
        ]);
        let normalized = normalize(&brief);
        let kitchen = normalized.room("kitchen-1").unwrap();
        let dining = normalized.room("dining-1").unwrap();
        assert!(kitchen.adjacent_to.contains(&RoomType::Dining));
        assert!(dining.adjacent_to.contains(&RoomType::Kitchen));
    }

    #[test]
    fn test_away_from_wins_over_adjacent() {
        let mut req = RoomRequirement::sized(RoomType::Bedroom, 140.0);
        req.adjacent_to = vec![RoomType::Garage];
        let normalized = normalize(&basic_brief(vec![req]));
        let bedroom = normalized.room("bedroom-1").unwrap();
        assert!(!bedroom.adjacent_to.contains(&RoomType::Garage));
        assert!(bedroom.away_from.contains(&RoomType::Garage));
    }

    #[test]
    fn test_scaling_hits_target() {
        let brief = basic_brief(vec![
            RoomRequirement::sized(RoomType::Living, 275.0),
            RoomRequirement::sized(RoomType::Kitchen, 185.0),
            RoomRequirement::sized(RoomType::PrimaryBed, 240.0),
        ]);
        let normalized = normalize(&brief);
        let total = normalized.total_room_area();
        let max_min = normalized
            .rooms
            .iter()
            .map(|r| r.min_area)
            .fold(0.0f32, f32::max);
        assert!(
            (total - normalized.target_area).abs() <= max_min,
            "total {:.0} vs target {:.0}",
            total,
            normalized.target_area
        );
    }

    #[test]
    fn test_impossible_program_warns_and_clamps() {
        let rooms: Vec<RoomRequirement> = (0..8)
            .map(|_| RoomRequirement::sized(RoomType::Garage, 450.0))
            .collect();
        let normalized = normalize(&basic_brief(rooms));
        assert!(normalized
            .warnings
            .iter()
            .any(|w| w.contains("exceeding")));
        for room in normalized
            .rooms
            .iter()
            .filter(|r| r.room_type == RoomType::Garage)
        {
            assert!((room.target_area - room.min_area).abs() < f32::EPSILON);
        }
    }

    #[test]
    fn test_never_fails_on_empty_program() {
        let normalized = normalize(&basic_brief(vec![]));
        // Foyer and hallway still injected.
        assert!(normalized.rooms.len() >= 2);
    }
}
