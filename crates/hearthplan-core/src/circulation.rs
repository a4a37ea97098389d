//! Circulation repair — verifies every room is reachable from the entry and
//! invents hallway rooms until the plan connects (or the repair budget runs
//! out). Also derives the plan's doors from the final adjacency graph.

use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};

use crate::geometry::Rect;
use crate::placement::{self, exterior_walls};
use crate::plan::{CirculationResult, Door, PlacedPlan, PlacedRoom};
use crate::tables::{defaults_for, is_open_concept};
use crate::types::{DoorKind, RoomType, Zone};

const MAX_REPAIR_ITERATIONS: usize = 8;
const HALLWAY_WIDTH: f32 = 3.0;
const HALLWAY_MIN_LENGTH: f32 = 6.0;
const DOOR_WIDTH: f32 = 3.0;

/// Repair connectivity and derive doors. Pure: returns a new plan.
pub fn ensure_circulation(plan: &PlacedPlan) -> PlacedPlan {
    let mut plan = plan.clone();
    if plan.rooms.is_empty() {
        plan.circulation = Some(CirculationResult {
            entry_room_id: String::new(),
            is_fully_connected: true,
            main_path: Vec::new(),
            dead_ends: Vec::new(),
            hallway_percent: 0.0,
            inserted_hallways: Vec::new(),
        });
        return plan;
    }

    let entry_id = pick_entry(&plan.rooms);
    let mut inserted_hallways = Vec::new();

    for _ in 0..MAX_REPAIR_ITERATIONS {
        let graph = build_graph(&plan.rooms);
        let reachable = bfs_reachable(&graph, &entry_id);
        if reachable.len() == plan.rooms.len() {
            break;
        }

        // Nearest same-floor pair across the cut.
        let Some((a_idx, b_idx)) = nearest_bridge_pair(&plan.rooms, &reachable) else {
            plan.metadata.warnings.push(
                "circulation: disconnected rooms are on a different floor (floor mismatch), cannot bridge with a hallway".to_string(),
            );
            break;
        };

        let hallway = make_hallway(
            &plan.rooms,
            a_idx,
            b_idx,
            next_hallway_ordinal(&plan.rooms),
            plan.envelope.floor_rect(plan.rooms[a_idx].floor),
        );
        log::info!(
            "circulation: inserting {} between {} and {}",
            hallway.id,
            plan.rooms[a_idx].id,
            plan.rooms[b_idx].id
        );
        inserted_hallways.push(hallway.id.clone());
        plan.rooms.push(hallway);
    }

    // Final graph, reachability, and door derivation.
    placement::link_neighbors(&mut plan.rooms);
    apply_stair_bridges(&mut plan.rooms);
    let graph = build_graph(&plan.rooms);
    let (visited, parents, depths) = bfs_tree(&graph, &entry_id);

    let is_fully_connected = visited.len() == plan.rooms.len();
    if !is_fully_connected && inserted_hallways.len() >= MAX_REPAIR_ITERATIONS {
        plan.metadata.warnings.push(format!(
            "circulation: still disconnected after {} hallway insertions",
            MAX_REPAIR_ITERATIONS
        ));
    }

    plan.doors = derive_doors(&plan.rooms, &entry_id, &parents, &mut plan.metadata.warnings);

    let main_path = longest_path(&entry_id, &parents, &depths);
    let dead_ends: Vec<String> = plan
        .rooms
        .iter()
        .filter(|r| r.neighbor_ids.len() <= 1 && r.room_type != RoomType::Porch)
        .map(|r| r.id.clone())
        .collect();
    let total_area: f64 = plan.rooms.iter().map(|r| r.sqft as f64).sum();
    let hallway_area: f64 = plan
        .rooms
        .iter()
        .filter(|r| r.room_type == RoomType::Hallway)
        .map(|r| r.sqft as f64)
        .sum();
    let hallway_percent = if total_area > 0.0 {
        hallway_area / total_area * 100.0
    } else {
        0.0
    };

    plan.circulation = Some(CirculationResult {
        entry_room_id: entry_id,
        is_fully_connected,
        main_path,
        dead_ends,
        hallway_percent,
        inserted_hallways,
    });
    plan
}

/// First foyer, else first living room, else first social room, else rooms[0].
fn pick_entry(rooms: &[PlacedRoom]) -> String {
    rooms
        .iter()
        .find(|r| r.room_type == RoomType::Foyer)
        .or_else(|| rooms.iter().find(|r| r.room_type == RoomType::Living))
        .or_else(|| rooms.iter().find(|r| r.zone == Zone::Social))
        .unwrap_or(&rooms[0])
        .id
        .clone()
}

/// Adjacency graph: same-floor edge sharing plus stairs bridging floors.
fn build_graph(rooms: &[PlacedRoom]) -> BTreeMap<String, Vec<String>> {
    let mut graph: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for room in rooms {
        graph.entry(room.id.clone()).or_default();
    }
    for i in 0..rooms.len() {
        for j in (i + 1)..rooms.len() {
            let (a, b) = (&rooms[i], &rooms[j]);
            if connected(a, b) {
                graph.get_mut(&a.id).unwrap().push(b.id.clone());
                graph.get_mut(&b.id).unwrap().push(a.id.clone());
            }
        }
    }
    graph
}

fn connected(a: &PlacedRoom, b: &PlacedRoom) -> bool {
    if a.floor == b.floor {
        return a.rect().shares_edge(&b.rect());
    }
    // A stairs room bridges adjacent floors where its plan projection meets
    // the other room.
    if (a.room_type == RoomType::Stairs || b.room_type == RoomType::Stairs)
        && a.floor.abs_diff(b.floor) == 1
    {
        return a.rect().shares_edge(&b.rect()) || a.rect().overlaps(&b.rect());
    }
    false
}

/// Cross-floor stair links also land in `neighbor_ids` so BFS over neighbors
/// matches the graph.
fn apply_stair_bridges(rooms: &mut [PlacedRoom]) {
    for i in 0..rooms.len() {
        for j in (i + 1)..rooms.len() {
            if rooms[i].floor != rooms[j].floor && connected(&rooms[i], &rooms[j]) {
                let id_j = rooms[j].id.clone();
                let id_i = rooms[i].id.clone();
                rooms[i].neighbor_ids.push(id_j);
                rooms[j].neighbor_ids.push(id_i);
            }
        }
    }
}

fn bfs_reachable(graph: &BTreeMap<String, Vec<String>>, entry: &str) -> BTreeSet<String> {
    let mut visited = BTreeSet::new();
    let mut queue = VecDeque::new();
    visited.insert(entry.to_string());
    queue.push_back(entry.to_string());
    while let Some(current) = queue.pop_front() {
        if let Some(neighbors) = graph.get(&current) {
            for next in neighbors {
                if visited.insert(next.clone()) {
                    queue.push_back(next.clone());
                }
            }
        }
    }
    visited
}

/// BFS returning visit set, parent pointers, and depths.
#[allow(clippy::type_complexity)]
fn bfs_tree(
    graph: &BTreeMap<String, Vec<String>>,
    entry: &str,
) -> (
    BTreeSet<String>,
    HashMap<String, String>,
    HashMap<String, usize>,
) {
    let mut visited = BTreeSet::new();
    let mut parents = HashMap::new();
    let mut depths = HashMap::new();
    let mut queue = VecDeque::new();
    visited.insert(entry.to_string());
    depths.insert(entry.to_string(), 0usize);
    queue.push_back(entry.to_string());
    while let Some(current) = queue.pop_front() {
        let depth = depths[&current];
        if let Some(neighbors) = graph.get(&current) {
            for next in neighbors {
                if visited.insert(next.clone()) {
                    parents.insert(next.clone(), current.clone());
                    depths.insert(next.clone(), depth + 1);
                    queue.push_back(next.clone());
                }
            }
        }
    }
    (visited, parents, depths)
}

/// The pair (reachable, unreachable) on the same floor with the smallest
/// centroid-to-centroid Manhattan distance.
fn nearest_bridge_pair(rooms: &[PlacedRoom], reachable: &BTreeSet<String>) -> Option<(usize, usize)> {
    let mut best: Option<(f32, usize, usize)> = None;
    for (i, a) in rooms.iter().enumerate() {
        if !reachable.contains(&a.id) {
            continue;
        }
        for (j, b) in rooms.iter().enumerate() {
            if reachable.contains(&b.id) || a.floor != b.floor {
                continue;
            }
            let dist = a.rect().center_manhattan(&b.rect());
            if best.map_or(true, |(d, _, _)| dist < d) {
                best = Some((dist, i, j));
            }
        }
    }
    best.map(|(_, i, j)| (i, j))
}

fn next_hallway_ordinal(rooms: &[PlacedRoom]) -> u32 {
    rooms
        .iter()
        .filter(|r| r.room_type == RoomType::Hallway)
        .filter_map(|r| r.id.rsplit('-').next()?.parse::<u32>().ok())
        .max()
        .unwrap_or(0)
        + 1
}

/// A thin connector spanning the gap between the two rooms, oriented along
/// the dominant axis, clamped inside the floor footprint, and nudged off any
/// room it would otherwise overlap.
fn make_hallway(
    rooms: &[PlacedRoom],
    a_idx: usize,
    b_idx: usize,
    ordinal: u32,
    footprint: &Rect,
) -> PlacedRoom {
    let a = &rooms[a_idx];
    let b = &rooms[b_idx];
    let (ar, br) = (a.rect(), b.rect());
    let (acx, acy) = ar.center();
    let (bcx, bcy) = br.center();

    let gap_x = (br.x - ar.right()).max(ar.x - br.right());
    let gap_y = (br.y - ar.top()).max(ar.y - br.top());
    let horizontal = if gap_x > 0.0 && gap_y > 0.0 {
        (bcx - acx).abs() >= (bcy - acy).abs()
    } else {
        gap_x > 0.0
    };

    let mut rect = if horizontal {
        let x0 = ar.right().min(br.right());
        let x1 = ar.x.max(br.x);
        let length = (x1 - x0).max(HALLWAY_MIN_LENGTH.min((x1 - x0).max(1.0)));
        let mid = ((acy + bcy) / 2.0).round();
        Rect::new(x0.round(), mid - (HALLWAY_WIDTH / 2.0).floor(), length.round().max(1.0), HALLWAY_WIDTH)
    } else {
        let y0 = ar.top().min(br.top());
        let y1 = ar.y.max(br.y);
        let length = (y1 - y0).max(HALLWAY_MIN_LENGTH.min((y1 - y0).max(1.0)));
        let mid = ((acx + bcx) / 2.0).round();
        Rect::new(mid - (HALLWAY_WIDTH / 2.0).floor(), y0.round(), HALLWAY_WIDTH, length.round().max(1.0))
    };

    clamp_into(&mut rect, footprint);

    // Slide perpendicular to the run to dodge other rooms; prefer offsets
    // that keep edge contact with both rooms being bridged.
    let others: Vec<Rect> = rooms
        .iter()
        .enumerate()
        .filter(|(i, r)| *i != a_idx && *i != b_idx && r.floor == a.floor)
        .map(|(_, r)| r.rect())
        .collect();
    const OFFSETS: [f32; 11] = [0.0, 1.0, -1.0, 2.0, -2.0, 3.0, -3.0, 4.0, -4.0, 5.0, -5.0];
    let mut fallback: Option<Rect> = None;
    'offsets: for offset in OFFSETS {
        let mut candidate = rect;
        if horizontal {
            candidate.y += offset;
        } else {
            candidate.x += offset;
        }
        clamp_into(&mut candidate, footprint);
        if others.iter().any(|o| candidate.overlaps(o)) {
            continue;
        }
        if candidate.shares_edge(&ar) && candidate.shares_edge(&br) {
            rect = candidate;
            fallback = None;
            break 'offsets;
        }
        if fallback.is_none() {
            fallback = Some(candidate);
        }
    }
    if let Some(clear) = fallback {
        rect = clear;
    }

    let d = defaults_for(RoomType::Hallway);
    PlacedRoom {
        id: format!("hallway-{}", ordinal),
        room_type: RoomType::Hallway,
        label: d.label.to_string(),
        zone: Zone::Circulation,
        x: rect.x,
        y: rect.y,
        width: rect.width,
        depth: rect.depth,
        floor: a.floor,
        sqft: rect.area(),
        rotated: false,
        exterior_walls: exterior_walls(&rect, footprint),
        needs_exterior: false,
        needs_plumbing: false,
        neighbor_ids: Vec::new(),
    }
}

fn clamp_into(rect: &mut Rect, footprint: &Rect) {
    rect.width = rect.width.min(footprint.width);
    rect.depth = rect.depth.min(footprint.depth);
    rect.x = rect.x.clamp(footprint.x, footprint.right() - rect.width);
    rect.y = rect.y.clamp(footprint.y, footprint.top() - rect.depth);
}

/// One exterior door at the entry, plus a standard door per BFS-tree edge
/// whose pair isn't open-concept. Rebuilt from scratch each run, so the
/// stage is idempotent.
fn derive_doors(
    rooms: &[PlacedRoom],
    entry_id: &str,
    parents: &HashMap<String, String>,
    warnings: &mut Vec<String>,
) -> Vec<Door> {
    let by_id: HashMap<&str, &PlacedRoom> = rooms.iter().map(|r| (r.id.as_str(), r)).collect();
    let mut doors = Vec::new();

    // The single exterior entry door.
    let entry = by_id[entry_id];
    match entry.exterior_walls.first() {
        Some(&dir) => doors.push(Door {
            id: "door-entry".to_string(),
            wall_id: entry.wall_id(dir),
            position: 0.5,
            width: DOOR_WIDTH,
            kind: DoorKind::Exterior,
            connects: [entry.id.clone(), entry.id.clone()],
        }),
        None => warnings.push(format!(
            "doors: entry room {} has no exterior wall for an entry door",
            entry_id
        )),
    }

    // Interior doors along the BFS tree, in stable room order.
    let mut n = 0usize;
    for room in rooms {
        let Some(parent_id) = parents.get(&room.id) else {
            continue;
        };
        let parent = by_id[parent_id.as_str()];
        if is_open_concept(room.room_type, parent.room_type) {
            continue;
        }
        n += 1;
        doors.push(Door {
            id: format!("door-{}", n),
            wall_id: format!("wall-{}-{}", parent.id, room.id),
            position: 0.5,
            width: DOOR_WIDTH,
            kind: DoorKind::Standard,
            connects: [parent.id.clone(), room.id.clone()],
        });
    }
    doors
}

fn longest_path(
    entry: &str,
    parents: &HashMap<String, String>,
    depths: &HashMap<String, usize>,
) -> Vec<String> {
    let mut leaf = entry.to_string();
    let mut max_depth = 0usize;
    let mut ids: Vec<&String> = depths.keys().collect();
    ids.sort();
    for id in ids {
        let d = depths[id];
        if d > max_depth {
            max_depth = d;
            leaf = id.clone();
        }
    }
    let mut path = vec![leaf.clone()];
    let mut current = leaf;
    while let Some(parent) = parents.get(&current) {
        path.push(parent.clone());
        current = parent.clone();
    }
    path.reverse();
    path
}
