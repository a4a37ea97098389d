//! Core enums — room types, zones, directions, styles, door and window kinds.
//!
//! Room-type and zone identifiers are serialized as fixed snake_case strings
//! and must not change: downstream consumers (renderer, cost estimator,
//! compliance reports) match on them.

use serde::{Deserialize, Serialize};

/// The 25 room kinds a residential program can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum RoomType {
    PrimaryBed = 0,
    Bedroom = 1,
    PrimaryBath = 2,
    Bathroom = 3,
    HalfBath = 4,
    Kitchen = 5,
    Dining = 6,
    Living = 7,
    Family = 8,
    GreatRoom = 9,
    Office = 10,
    Den = 11,
    Laundry = 12,
    Mudroom = 13,
    Pantry = 14,
    WalkInCloset = 15,
    Closet = 16,
    Foyer = 17,
    Hallway = 18,
    Stairs = 19,
    Garage = 20,
    Porch = 21,
    Deck = 22,
    Patio = 23,
    Storage = 24,
}

impl RoomType {
    /// Every room type, in discriminant order. Indexes the default tables.
    pub const ALL: [RoomType; 25] = [
        RoomType::PrimaryBed,
        RoomType::Bedroom,
        RoomType::PrimaryBath,
        RoomType::Bathroom,
        RoomType::HalfBath,
        RoomType::Kitchen,
        RoomType::Dining,
        RoomType::Living,
        RoomType::Family,
        RoomType::GreatRoom,
        RoomType::Office,
        RoomType::Den,
        RoomType::Laundry,
        RoomType::Mudroom,
        RoomType::Pantry,
        RoomType::WalkInCloset,
        RoomType::Closet,
        RoomType::Foyer,
        RoomType::Hallway,
        RoomType::Stairs,
        RoomType::Garage,
        RoomType::Porch,
        RoomType::Deck,
        RoomType::Patio,
        RoomType::Storage,
    ];

    /// Stable snake_case identifier, same string serde emits.
    pub fn as_str(self) -> &'static str {
        match self {
            RoomType::PrimaryBed => "primary_bed",
            RoomType::Bedroom => "bedroom",
            RoomType::PrimaryBath => "primary_bath",
            RoomType::Bathroom => "bathroom",
            RoomType::HalfBath => "half_bath",
            RoomType::Kitchen => "kitchen",
            RoomType::Dining => "dining",
            RoomType::Living => "living",
            RoomType::Family => "family",
            RoomType::GreatRoom => "great_room",
            RoomType::Office => "office",
            RoomType::Den => "den",
            RoomType::Laundry => "laundry",
            RoomType::Mudroom => "mudroom",
            RoomType::Pantry => "pantry",
            RoomType::WalkInCloset => "walk_in_closet",
            RoomType::Closet => "closet",
            RoomType::Foyer => "foyer",
            RoomType::Hallway => "hallway",
            RoomType::Stairs => "stairs",
            RoomType::Garage => "garage",
            RoomType::Porch => "porch",
            RoomType::Deck => "deck",
            RoomType::Patio => "patio",
            RoomType::Storage => "storage",
        }
    }

    /// Returns true if this room counts as habitable space under the
    /// residential code (sleeping, living, eating, cooking).
    pub fn is_habitable(self) -> bool {
        matches!(
            self,
            RoomType::PrimaryBed
                | RoomType::Bedroom
                | RoomType::Kitchen
                | RoomType::Dining
                | RoomType::Living
                | RoomType::Family
                | RoomType::GreatRoom
                | RoomType::Office
                | RoomType::Den
        )
    }

    /// Returns true if this room is a sleeping room.
    pub fn is_sleeping(self) -> bool {
        matches!(self, RoomType::PrimaryBed | RoomType::Bedroom)
    }

    /// Returns true if this room is any kind of bathroom.
    pub fn is_bath(self) -> bool {
        matches!(
            self,
            RoomType::PrimaryBath | RoomType::Bathroom | RoomType::HalfBath
        )
    }

    /// Returns true if this room is a full bathroom (tub or shower).
    pub fn is_full_bath(self) -> bool {
        matches!(self, RoomType::PrimaryBath | RoomType::Bathroom)
    }

    /// Returns true if this room is circulation space (foyer, hallway, stairs).
    pub fn is_circulation(self) -> bool {
        matches!(self, RoomType::Foyer | RoomType::Hallway | RoomType::Stairs)
    }

    /// Returns true if this room is outdoor living space.
    pub fn is_exterior(self) -> bool {
        matches!(self, RoomType::Porch | RoomType::Deck | RoomType::Patio)
    }
}

/// Semantic region of the footprint grouping rooms by social role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Zone {
    Social = 0,
    Private = 1,
    Service = 2,
    Garage = 3,
    Circulation = 4,
    Exterior = 5,
}

impl Zone {
    pub const ALL: [Zone; 6] = [
        Zone::Social,
        Zone::Private,
        Zone::Service,
        Zone::Garage,
        Zone::Circulation,
        Zone::Exterior,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Zone::Social => "social",
            Zone::Private => "private",
            Zone::Service => "service",
            Zone::Garage => "garage",
            Zone::Circulation => "circulation",
            Zone::Exterior => "exterior",
        }
    }

    /// Placement priority when ordering by zone: garage first, exterior last.
    pub fn placement_rank(self) -> u8 {
        match self {
            Zone::Garage => 0,
            Zone::Social => 1,
            Zone::Private => 2,
            Zone::Service => 3,
            Zone::Circulation => 4,
            Zone::Exterior => 5,
        }
    }
}

/// Compass direction. The lot origin is its south-west corner; x grows east,
/// y grows north.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    /// Direction after reflecting the plan about a vertical (north-south) axis.
    pub fn mirror_x(self) -> Direction {
        match self {
            Direction::East => Direction::West,
            Direction::West => Direction::East,
            other => other,
        }
    }

    /// Direction after reflecting the plan about a horizontal (east-west) axis.
    pub fn mirror_y(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            other => other,
        }
    }
}

/// Architectural style tag carried on the brief. The pipeline treats it as
/// pass-through metadata; downstream renderers key elevations off it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Style {
    Ranch,
    Modern,
    Traditional,
    Craftsman,
    Farmhouse,
    Contemporary,
}

/// Door construction type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DoorKind {
    Standard,
    Double,
    Sliding,
    Pocket,
    Exterior,
}

/// Window construction type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowKind {
    Standard,
    Picture,
    Bay,
    Clerestory,
}
