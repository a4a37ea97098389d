//! Wall analysis — exterior/interior walls per room, shared-wall segments
//! between room pairs, wet walls, and plumbing groupings.

use serde::{Deserialize, Serialize};

use crate::geometry::Orientation;
use crate::plan::{PlacedPlan, PlacedRoom};
use crate::types::Direction;

const EXTERIOR_THICKNESS: f32 = 0.5; // 6 in
const INTERIOR_THICKNESS: f32 = 1.0 / 3.0; // 4 in

/// One edge wall of a room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub id: String,
    pub room_id: String,
    pub direction: Direction,
    pub start: (f32, f32),
    pub end: (f32, f32),
    pub length: f32,
    pub thickness: f32,
    pub is_exterior: bool,
    pub load_bearing: bool,
    pub floor: u8,
}

/// A shared segment between two rooms on the same floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharedWall {
    pub room_a: String,
    pub room_b: String,
    pub orientation: Orientation,
    pub overlap_length: f32,
    pub floor: u8,
}

impl SharedWall {
    pub fn involves(&self, id: &str) -> bool {
        self.room_a == id || self.room_b == id
    }
}

/// Full wall derivation for a placed plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallAnalysis {
    pub walls: Vec<Wall>,
    pub shared_walls: Vec<SharedWall>,
    /// Shared walls between two plumbing rooms.
    pub wet_walls: Vec<SharedWall>,
    pub total_exterior_length: f32,
    pub total_interior_length: f32,
    /// Connected components of plumbing rooms linked by wet walls.
    pub plumbing_groups: Vec<Vec<String>>,
}

/// Derive walls, shared walls, wet walls, and plumbing groups.
pub fn analyze_walls(plan: &PlacedPlan) -> WallAnalysis {
    let mut walls = Vec::with_capacity(plan.rooms.len() * 4);
    for room in &plan.rooms {
        for direction in Direction::ALL {
            walls.push(edge_wall(room, direction));
        }
    }

    let mut shared_walls = Vec::new();
    for i in 0..plan.rooms.len() {
        for j in (i + 1)..plan.rooms.len() {
            let (a, b) = (&plan.rooms[i], &plan.rooms[j]);
            if a.floor != b.floor {
                continue;
            }
            if let Some(edge) = a.rect().shared_edge(&b.rect()) {
                shared_walls.push(SharedWall {
                    room_a: a.id.clone(),
                    room_b: b.id.clone(),
                    orientation: edge.orientation,
                    overlap_length: edge.overlap,
                    floor: a.floor,
                });
            }
        }
    }

    let plumbing: Vec<&PlacedRoom> = plan.plumbing_rooms().collect();
    let wet_walls: Vec<SharedWall> = shared_walls
        .iter()
        .filter(|sw| {
            plumbing.iter().any(|r| r.id == sw.room_a) && plumbing.iter().any(|r| r.id == sw.room_b)
        })
        .cloned()
        .collect();

    let total_exterior_length = walls
        .iter()
        .filter(|w| w.is_exterior)
        .map(|w| w.length)
        .sum();
    let total_interior_length = walls
        .iter()
        .filter(|w| !w.is_exterior)
        .map(|w| w.length)
        .sum();

    let plumbing_groups = group_plumbing(&plumbing, &wet_walls);

    WallAnalysis {
        walls,
        shared_walls,
        wet_walls,
        total_exterior_length,
        total_interior_length,
        plumbing_groups,
    }
}

fn edge_wall(room: &PlacedRoom, direction: Direction) -> Wall {
    let rect = room.rect();
    let (start, end) = match direction {
        Direction::North => ((rect.x, rect.top()), (rect.right(), rect.top())),
        Direction::South => ((rect.x, rect.y), (rect.right(), rect.y)),
        Direction::East => ((rect.right(), rect.y), (rect.right(), rect.top())),
        Direction::West => ((rect.x, rect.y), (rect.x, rect.top())),
    };
    let is_exterior = room.exterior_walls.contains(&direction);
    Wall {
        id: room.wall_id(direction),
        room_id: room.id.clone(),
        direction,
        start,
        end,
        length: room.wall_length(direction),
        thickness: if is_exterior {
            EXTERIOR_THICKNESS
        } else {
            INTERIOR_THICKNESS
        },
        is_exterior,
        load_bearing: is_exterior,
        floor: room.floor,
    }
}

/// Union plumbing rooms into components along wet walls. Isolated plumbing
/// rooms form singleton groups.
fn group_plumbing(plumbing: &[&PlacedRoom], wet_walls: &[SharedWall]) -> Vec<Vec<String>> {
    let n = plumbing.len();
    let mut parent: Vec<usize> = (0..n).collect();

    fn find(parent: &mut Vec<usize>, i: usize) -> usize {
        let up = parent[i];
        if up == i {
            return i;
        }
        let root = find(parent, up);
        parent[i] = root;
        root
    }

    let index_of = |id: &str| plumbing.iter().position(|r| r.id == id);
    for ww in wet_walls {
        if let (Some(a), Some(b)) = (index_of(&ww.room_a), index_of(&ww.room_b)) {
            let (ra, rb) = (find(&mut parent, a), find(&mut parent, b));
            if ra != rb {
                parent[ra] = rb;
            }
        }
    }

    let mut groups: Vec<Vec<String>> = Vec::new();
    let mut root_to_group: Vec<(usize, usize)> = Vec::new();
    for i in 0..n {
        let root = find(&mut parent, i);
        let group_idx = match root_to_group.iter().find(|(r, _)| *r == root) {
            Some(&(_, g)) => g,
            None => {
                groups.push(Vec::new());
                root_to_group.push((root, groups.len() - 1));
                groups.len() - 1
            }
        };
        groups[group_idx].push(plumbing[i].id.clone());
    }
    groups
}
