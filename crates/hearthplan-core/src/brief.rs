//! Design briefs and the normalized room program derived from them.

use serde::{Deserialize, Serialize};

use crate::types::{Direction, RoomType, Style, Zone};

/// User-supplied design intent: what to build, how big, on what lot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignBrief {
    /// Target total conditioned area in square feet (800–5000).
    pub target_area: f32,
    /// Story count, 1 or 2.
    pub stories: u8,
    pub style: Style,
    pub rooms: Vec<RoomRequirement>,
    pub lot: Option<LotConstraints>,
}

/// One requested room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomRequirement {
    pub room_type: RoomType,
    /// Display label; defaults to the per-type label when empty.
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub min_area: Option<f32>,
    #[serde(default)]
    pub target_area: Option<f32>,
    #[serde(default)]
    pub must_have: bool,
    /// Room types this room wants to touch.
    #[serde(default)]
    pub adjacent_to: Vec<RoomType>,
    /// Room types this room wants distance from.
    #[serde(default)]
    pub away_from: Vec<RoomType>,
    #[serde(default)]
    pub needs_exterior: Option<bool>,
    #[serde(default)]
    pub needs_plumbing: Option<bool>,
    /// Pin the room to a floor (1 or 2).
    #[serde(default)]
    pub floor: Option<u8>,
}

impl RoomRequirement {
    /// Bare requirement for a room type, everything defaulted.
    pub fn of(room_type: RoomType) -> Self {
        RoomRequirement {
            room_type,
            label: String::new(),
            min_area: None,
            target_area: None,
            must_have: false,
            adjacent_to: Vec::new(),
            away_from: Vec::new(),
            needs_exterior: None,
            needs_plumbing: None,
            floor: None,
        }
    }

    /// Requirement with a target area.
    pub fn sized(room_type: RoomType, target_area: f32) -> Self {
        RoomRequirement {
            target_area: Some(target_area),
            ..Self::of(room_type)
        }
    }
}

/// Lot rectangle, setbacks, and site orientation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LotConstraints {
    pub lot_width: f32,
    pub lot_depth: f32,
    pub setback_front: f32,
    pub setback_side: f32,
    pub setback_rear: f32,
    /// Which compass direction the entry faces; the lot's front edge.
    pub entry_facing: Direction,
    /// Preferred garage side seen from the street, if any.
    #[serde(default)]
    pub garage_position: Option<GaragePosition>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GaragePosition {
    Left,
    Right,
    Rear,
}

impl Default for LotConstraints {
    fn default() -> Self {
        LotConstraints {
            lot_width: 100.0,
            lot_depth: 120.0,
            setback_front: 20.0,
            setback_side: 10.0,
            setback_rear: 20.0,
            entry_facing: Direction::South,
            garage_position: None,
        }
    }
}

/// A requirement resolved against the defaults tables: dimensions, zone,
/// priority, and merged adjacency constraints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRoom {
    /// `<type>-<ordinal>`, e.g. `bedroom-2`.
    pub id: String,
    pub room_type: RoomType,
    pub label: String,
    pub min_area: f32,
    pub target_area: f32,
    /// Resolved target width, feet (≈ √area, clamped to the type minimum).
    pub width: f32,
    /// Resolved target depth, feet (⌈area/width⌉).
    pub depth: f32,
    pub zone: Zone,
    pub priority: f32,
    pub must_have: bool,
    pub adjacent_to: Vec<RoomType>,
    pub away_from: Vec<RoomType>,
    pub needs_exterior: bool,
    pub needs_plumbing: bool,
    pub floor: u8,
    /// True when the room was not in the brief but injected by normalization.
    pub implicit: bool,
}

/// A brief expanded into a canonical room program, ready for geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedBrief {
    pub target_area: f32,
    pub stories: u8,
    pub style: Style,
    pub lot: LotConstraints,
    pub rooms: Vec<NormalizedRoom>,
    /// Soft-failure records; normalization itself never fails.
    pub warnings: Vec<String>,
}

impl NormalizedBrief {
    /// Sum of all room target areas.
    pub fn total_room_area(&self) -> f32 {
        self.rooms.iter().map(|r| r.target_area).sum()
    }

    pub fn room(&self, id: &str) -> Option<&NormalizedRoom> {
        self.rooms.iter().find(|r| r.id == id)
    }
}
