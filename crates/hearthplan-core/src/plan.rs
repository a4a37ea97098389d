//! Placed-plan data model — the immutable output of placement and the
//! stages downstream of it.

use serde::{Deserialize, Serialize};

use crate::brief::NormalizedBrief;
use crate::envelope::BuildingEnvelope;
use crate::geometry::Rect;
use crate::types::{Direction, DoorKind, RoomType, WindowKind, Zone};

/// A room with its rectangle resolved on the 1-ft grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedRoom {
    pub id: String,
    pub room_type: RoomType,
    pub label: String,
    pub zone: Zone,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub depth: f32,
    pub floor: u8,
    pub sqft: f32,
    /// True when the candidate's width/depth were swapped from the target.
    pub rotated: bool,
    /// Which footprint edges this room touches.
    pub exterior_walls: Vec<Direction>,
    pub needs_exterior: bool,
    pub needs_plumbing: bool,
    /// Ids of rooms sharing an edge with this one (same floor), plus any
    /// stairs bridging from the other floor.
    pub neighbor_ids: Vec<String>,
}

impl PlacedRoom {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.depth)
    }

    /// Length of the wall on the given side.
    pub fn wall_length(&self, direction: Direction) -> f32 {
        match direction {
            Direction::North | Direction::South => self.width,
            Direction::East | Direction::West => self.depth,
        }
    }

    /// Wall identifier for one side of this room.
    pub fn wall_id(&self, direction: Direction) -> String {
        format!("{}-{}", self.id, direction.as_str())
    }

    pub fn min_dimension(&self) -> f32 {
        self.width.min(self.depth)
    }
}

/// A door connecting two rooms (or a room to outside).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Door {
    pub id: String,
    /// Wall the door sits in, `<room>-<direction>` or the shared-wall pair.
    pub wall_id: String,
    /// Normalized position along the wall, 0–1.
    pub position: f32,
    /// Clear width, feet.
    pub width: f32,
    pub kind: DoorKind,
    /// The two room ids this door connects. Exterior doors repeat the room id.
    pub connects: [String; 2],
}

/// A window on an exterior wall.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowPlacement {
    pub id: String,
    pub wall_id: String,
    pub room_id: String,
    /// Absolute feet from the wall origin.
    pub position: f32,
    pub width: f32,
    pub height: f32,
    pub sill_height: f32,
    pub kind: WindowKind,
    pub floor: u8,
    pub direction: Direction,
}

/// Reachability summary computed by circulation repair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CirculationResult {
    pub entry_room_id: String,
    pub is_fully_connected: bool,
    /// Longest root-to-leaf path from the entry, as room ids.
    pub main_path: Vec<String>,
    /// Rooms with at most one neighbor (front porches excluded).
    pub dead_ends: Vec<String>,
    /// Hallway area as a percentage of total room area.
    pub hallway_percent: f64,
    /// Hallway rooms inserted by repair.
    pub inserted_hallways: Vec<String>,
}

/// A complete candidate layout: the program, its geometry, and everything
/// derived from it. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedPlan {
    pub brief: NormalizedBrief,
    pub envelope: BuildingEnvelope,
    pub rooms: Vec<PlacedRoom>,
    pub doors: Vec<Door>,
    pub windows: Vec<WindowPlacement>,
    pub circulation: Option<CirculationResult>,
    /// Rooms the greedy placer could not fit.
    pub unplaced_room_ids: Vec<String>,
    /// Variation strategy name and accumulated stage warnings.
    pub metadata: PlanMetadata,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlanMetadata {
    pub strategy: String,
    pub warnings: Vec<String>,
}

impl PlacedPlan {
    pub fn room(&self, id: &str) -> Option<&PlacedRoom> {
        self.rooms.iter().find(|r| r.id == id)
    }

    /// Rooms on the given floor.
    pub fn rooms_on_floor(&self, floor: u8) -> impl Iterator<Item = &PlacedRoom> {
        self.rooms.iter().filter(move |r| r.floor == floor)
    }

    /// Total placed area across all floors.
    pub fn total_area(&self) -> f32 {
        self.rooms.iter().map(|r| r.sqft).sum()
    }

    pub fn plumbing_rooms(&self) -> impl Iterator<Item = &PlacedRoom> {
        self.rooms.iter().filter(|r| r.needs_plumbing)
    }
}
