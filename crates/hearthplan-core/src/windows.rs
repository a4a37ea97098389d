//! Window assignment — derives window placements from each room's exterior
//! walls and type. Replaces the plan's window list wholesale, so re-running
//! the stage is idempotent.

use crate::plan::{PlacedPlan, PlacedRoom, WindowPlacement};
use crate::tables::window_defaults_for;
use crate::types::{Direction, RoomType, WindowKind, Zone};

const MIN_WINDOW_WIDTH: f32 = 1.5;
const WALL_END_MARGIN: f32 = 2.0;

/// Per-room fenestration parameters, from the table or inferred.
struct WindowSpec {
    count: usize,
    width: f32,
    height: f32,
    sill_height: f32,
}

/// Assign windows to every room of the plan. Pure: returns a new plan.
pub fn assign_windows(plan: &PlacedPlan) -> PlacedPlan {
    let mut plan = plan.clone();
    let mut windows = Vec::new();
    let mut warnings: Vec<String> = Vec::new();

    for room in &plan.rooms {
        if skip_windows(room) {
            continue;
        }
        if room.exterior_walls.is_empty() {
            if room.needs_exterior {
                warnings.push(format!(
                    "windows: {} requires exterior access but touches no exterior wall",
                    room.id
                ));
            }
            continue;
        }
        place_room_windows(room, &mut windows);
    }

    // Idempotence: stale warnings from a previous pass are dropped.
    plan.metadata
        .warnings
        .retain(|w| !w.starts_with("windows:"));
    plan.metadata.warnings.extend(warnings);
    plan.windows = windows;
    plan
}

fn skip_windows(room: &PlacedRoom) -> bool {
    room.zone == Zone::Exterior
        || room.room_type == RoomType::Garage
        || room.room_type == RoomType::Hallway
}

fn spec_for(room: &PlacedRoom) -> WindowSpec {
    if let Some(cfg) = window_defaults_for(room.room_type) {
        return WindowSpec {
            count: cfg.count,
            width: cfg.width,
            height: cfg.height,
            sill_height: cfg.sill_height,
        };
    }
    let social = room.zone == Zone::Social;
    let mut count = if room.sqft < 140.0 {
        1
    } else if room.sqft < 260.0 {
        2
    } else {
        3
    };
    if social {
        count += 1;
    }
    if social {
        WindowSpec {
            count,
            width: 4.0,
            height: 5.0,
            sill_height: 2.5,
        }
    } else {
        WindowSpec {
            count,
            width: 3.0,
            height: 4.0,
            sill_height: 3.0,
        }
    }
}

fn window_kind(room: &PlacedRoom) -> WindowKind {
    if room.room_type.is_bath() {
        WindowKind::Clerestory
    } else if room.zone == Zone::Social && room.sqft >= 220.0 {
        WindowKind::Picture
    } else if room.zone == Zone::Social && room.sqft >= 160.0 {
        WindowKind::Bay
    } else {
        WindowKind::Standard
    }
}

fn place_room_windows(room: &PlacedRoom, out: &mut Vec<WindowPlacement>) {
    let spec = spec_for(room);
    let kind = window_kind(room);

    // Longest exterior walls first.
    let mut walls: Vec<Direction> = room.exterior_walls.clone();
    walls.sort_by(|a, b| {
        room.wall_length(*b)
            .partial_cmp(&room.wall_length(*a))
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    // Cycle windows across the walls, then space them evenly per wall.
    let mut per_wall: Vec<usize> = vec![0; walls.len()];
    for i in 0..spec.count {
        per_wall[i % walls.len()] += 1;
    }

    let mut ordinal = 0usize;
    for (wall_idx, &direction) in walls.iter().enumerate() {
        let n = per_wall[wall_idx];
        if n == 0 {
            continue;
        }
        let length = room.wall_length(direction);
        let width = spec.width.clamp(MIN_WINDOW_WIDTH, (length - WALL_END_MARGIN).max(MIN_WINDOW_WIDTH));
        for i in 0..n {
            ordinal += 1;
            out.push(WindowPlacement {
                id: format!("window-{}-{}", room.id, ordinal),
                wall_id: room.wall_id(direction),
                room_id: room.id.clone(),
                position: length / (n as f32 + 1.0) * (i as f32 + 1.0),
                width,
                height: spec.height,
                sill_height: spec.sill_height,
                kind,
                floor: room.floor,
                direction,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brief::NormalizedBrief;
    use crate::envelope::BuildingEnvelope;
    use crate::geometry::Rect;
    use crate::plan::PlanMetadata;
    use crate::tables::defaults_for;
    use crate::types::Style;
    use std::collections::BTreeMap;

    fn make_room(
        id: &str,
        rt: RoomType,
        sqft_dims: (f32, f32),
        exterior: Vec<Direction>,
    ) -> PlacedRoom {
        let (w, d) = sqft_dims;
        PlacedRoom {
            id: id.to_string(),
            room_type: rt,
            label: id.to_string(),
            zone: defaults_for(rt).zone,
            x: 0.0,
            y: 0.0,
            width: w,
            depth: d,
            floor: 1,
            sqft: w * d,
            rotated: false,
            exterior_walls: exterior,
            needs_exterior: defaults_for(rt).needs_exterior,
            needs_plumbing: defaults_for(rt).needs_plumbing,
            neighbor_ids: Vec::new(),
        }
    }

    fn make_plan(rooms: Vec<PlacedRoom>) -> PlacedPlan {
        let footprint = Rect::new(0.0, 0.0, 50.0, 40.0);
        let mut floor_rects = BTreeMap::new();
        floor_rects.insert(1, footprint);
        PlacedPlan {
            brief: NormalizedBrief {
                target_area: 1800.0,
                stories: 1,
                style: Style::Ranch,
                lot: Default::default(),
                rooms: Vec::new(),
                warnings: Vec::new(),
            },
            envelope: BuildingEnvelope {
                buildable: footprint,
                footprint,
                floor_area_target: 1800.0,
                total_area: 1800.0,
                stories: 1,
                floor_rects,
                grid_resolution: 1.0,
            },
            rooms,
            doors: Vec::new(),
            windows: Vec::new(),
            circulation: None,
            unplaced_room_ids: Vec::new(),
            metadata: PlanMetadata::default(),
        }
    }

    #[test]
    fn test_window_count_by_area_bucket() {
        let small = make_plan(vec![make_room(
            "bedroom-1",
            RoomType::Bedroom,
            (10.0, 12.0), // 120 sqft < 140
            vec![Direction::South],
        )]);
        assert_eq!(assign_windows(&small).windows.len(), 1);

        let medium = make_plan(vec![make_room(
            "bedroom-1",
            RoomType::Bedroom,
            (12.0, 18.0), // 216 sqft
            vec![Direction::South],
        )]);
        assert_eq!(assign_windows(&medium).windows.len(), 2);
    }

    #[test]
    fn test_social_rooms_get_an_extra_window() {
        let plan = make_plan(vec![make_room(
            "living-1",
            RoomType::Living,
            (16.0, 18.0), // 288 sqft -> 3 + 1 social
            vec![Direction::South, Direction::West],
        )]);
        let windows = assign_windows(&plan).windows;
        assert_eq!(windows.len(), 4);
        // Cycled across both walls.
        assert!(windows.iter().any(|w| w.direction == Direction::South));
        assert!(windows.iter().any(|w| w.direction == Direction::West));
    }

    #[test]
    fn test_skip_garage_hallway_exterior_rooms() {
        let plan = make_plan(vec![
            make_room("garage-1", RoomType::Garage, (20.0, 22.0), vec![Direction::West]),
            make_room("hallway-1", RoomType::Hallway, (3.0, 12.0), vec![Direction::North]),
            make_room("porch-1", RoomType::Porch, (8.0, 8.0), vec![Direction::South]),
        ]);
        assert!(assign_windows(&plan).windows.is_empty());
    }

    #[test]
    fn test_bathroom_gets_clerestory() {
        let plan = make_plan(vec![make_room(
            "bathroom-1",
            RoomType::Bathroom,
            (6.0, 9.0),
            vec![Direction::North],
        )]);
        let windows = assign_windows(&plan).windows;
        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].kind, WindowKind::Clerestory);
    }

    #[test]
    fn test_picture_window_for_big_social_room() {
        let plan = make_plan(vec![make_room(
            "living-1",
            RoomType::Living,
            (15.0, 16.0), // 240 sqft >= 220
            vec![Direction::South],
        )]);
        let windows = assign_windows(&plan).windows;
        assert!(windows.iter().all(|w| w.kind == WindowKind::Picture));
    }

    #[test]
    fn test_positions_spread_along_wall() {
        let plan = make_plan(vec![make_room(
            "living-1",
            RoomType::Living,
            (18.0, 16.0), // 288 sqft -> 4 windows on one wall
            vec![Direction::South],
        )]);
        let windows = assign_windows(&plan).windows;
        assert_eq!(windows.len(), 4);
        // Four windows on an 18-ft wall: at 18/5 * i.
        let expected: Vec<f32> = (1..=4).map(|i| 18.0 / 5.0 * i as f32).collect();
        for (w, e) in windows.iter().zip(&expected) {
            assert!((w.position - e).abs() < 0.01, "{} vs {}", w.position, e);
        }
        // Every window fits the wall with margin.
        for w in &windows {
            assert!(w.width <= 16.0);
            assert!(w.position > 0.0 && w.position < 18.0);
        }
    }

    #[test]
    fn test_needs_exterior_without_wall_warns() {
        let plan = make_plan(vec![make_room(
            "bedroom-1",
            RoomType::Bedroom,
            (10.0, 12.0),
            vec![],
        )]);
        let out = assign_windows(&plan);
        assert!(out.windows.is_empty());
        assert!(out
            .metadata
            .warnings
            .iter()
            .any(|w| w.contains("exterior access")));
    }

    #[test]
    fn test_idempotent_not_cumulative() {
        let plan = make_plan(vec![make_room(
            "living-1",
            RoomType::Living,
            (16.0, 18.0),
            vec![Direction::South, Direction::West],
        )]);
        let once = assign_windows(&plan);
        let twice = assign_windows(&once);
        assert_eq!(once.windows, twice.windows);
        assert_eq!(once.metadata.warnings, twice.metadata.warnings);
    }

    #[test]
    fn test_windows_lie_on_exterior_walls() {
        let plan = make_plan(vec![make_room(
            "kitchen-1",
            RoomType::Kitchen,
            (12.0, 14.0),
            vec![Direction::East],
        )]);
        let out = assign_windows(&plan);
        for w in &out.windows {
            let room = out.room(&w.room_id).unwrap();
            assert!(room.exterior_walls.contains(&w.direction));
        }
    }
}
