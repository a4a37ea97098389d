//! Process-wide constant tables — room defaults, adjacency preferences,
//! window defaults.
//!
//! Tables are dense arrays indexed by `RoomType as usize` so lookups are a
//! bounds-checked array read, not a hash. `ROOM_DEFAULTS` is ordered to
//! match `RoomType::ALL`; `defaults_for` asserts the invariant in tests.

use crate::types::{RoomType, Zone};

/// Per-type sizing and service requirements.
#[derive(Debug, Clone, Copy)]
pub struct RoomDefaults {
    pub room_type: RoomType,
    pub label: &'static str,
    pub min_area: f32,
    pub target_area: f32,
    pub min_width: f32,
    pub min_depth: f32,
    pub needs_exterior: bool,
    pub needs_plumbing: bool,
    pub zone: Zone,
    pub priority: f32,
}

/// Defaults for all 25 room types, indexed by discriminant.
pub const ROOM_DEFAULTS: [RoomDefaults; 25] = [
    RoomDefaults {
        room_type: RoomType::PrimaryBed,
        label: "Primary Bedroom",
        min_area: 120.0,
        target_area: 200.0,
        min_width: 11.0,
        min_depth: 11.0,
        needs_exterior: true,
        needs_plumbing: false,
        zone: Zone::Private,
        priority: 80.0,
    },
    RoomDefaults {
        room_type: RoomType::Bedroom,
        label: "Bedroom",
        min_area: 70.0,
        target_area: 130.0,
        min_width: 8.0,
        min_depth: 8.0,
        needs_exterior: true,
        needs_plumbing: false,
        zone: Zone::Private,
        priority: 70.0,
    },
    RoomDefaults {
        room_type: RoomType::PrimaryBath,
        label: "Primary Bathroom",
        min_area: 60.0,
        target_area: 90.0,
        min_width: 7.0,
        min_depth: 8.0,
        needs_exterior: false,
        needs_plumbing: true,
        zone: Zone::Private,
        priority: 62.0,
    },
    RoomDefaults {
        room_type: RoomType::Bathroom,
        label: "Bathroom",
        min_area: 35.0,
        target_area: 50.0,
        min_width: 5.0,
        min_depth: 6.0,
        needs_exterior: false,
        needs_plumbing: true,
        zone: Zone::Private,
        priority: 60.0,
    },
    RoomDefaults {
        room_type: RoomType::HalfBath,
        label: "Half Bath",
        min_area: 18.0,
        target_area: 24.0,
        min_width: 4.0,
        min_depth: 4.0,
        needs_exterior: false,
        needs_plumbing: true,
        zone: Zone::Service,
        priority: 45.0,
    },
    RoomDefaults {
        room_type: RoomType::Kitchen,
        label: "Kitchen",
        min_area: 100.0,
        target_area: 160.0,
        min_width: 9.0,
        min_depth: 10.0,
        needs_exterior: true,
        needs_plumbing: true,
        zone: Zone::Social,
        priority: 88.0,
    },
    RoomDefaults {
        room_type: RoomType::Dining,
        label: "Dining Room",
        min_area: 80.0,
        target_area: 130.0,
        min_width: 9.0,
        min_depth: 9.0,
        needs_exterior: true,
        needs_plumbing: false,
        zone: Zone::Social,
        priority: 72.0,
    },
    RoomDefaults {
        room_type: RoomType::Living,
        label: "Living Room",
        min_area: 150.0,
        target_area: 250.0,
        min_width: 12.0,
        min_depth: 12.0,
        needs_exterior: true,
        needs_plumbing: false,
        zone: Zone::Social,
        priority: 90.0,
    },
    RoomDefaults {
        room_type: RoomType::Family,
        label: "Family Room",
        min_area: 140.0,
        target_area: 220.0,
        min_width: 11.0,
        min_depth: 12.0,
        needs_exterior: true,
        needs_plumbing: false,
        zone: Zone::Social,
        priority: 75.0,
    },
    RoomDefaults {
        room_type: RoomType::GreatRoom,
        label: "Great Room",
        min_area: 200.0,
        target_area: 320.0,
        min_width: 14.0,
        min_depth: 14.0,
        needs_exterior: true,
        needs_plumbing: false,
        zone: Zone::Social,
        priority: 85.0,
    },
    RoomDefaults {
        room_type: RoomType::Office,
        label: "Office",
        min_area: 70.0,
        target_area: 110.0,
        min_width: 8.0,
        min_depth: 8.0,
        needs_exterior: true,
        needs_plumbing: false,
        zone: Zone::Private,
        priority: 55.0,
    },
    RoomDefaults {
        room_type: RoomType::Den,
        label: "Den",
        min_area: 90.0,
        target_area: 130.0,
        min_width: 9.0,
        min_depth: 9.0,
        needs_exterior: false,
        needs_plumbing: false,
        zone: Zone::Private,
        priority: 50.0,
    },
    RoomDefaults {
        room_type: RoomType::Laundry,
        label: "Laundry",
        min_area: 30.0,
        target_area: 45.0,
        min_width: 5.0,
        min_depth: 6.0,
        needs_exterior: false,
        needs_plumbing: true,
        zone: Zone::Service,
        priority: 48.0,
    },
    RoomDefaults {
        room_type: RoomType::Mudroom,
        label: "Mudroom",
        min_area: 30.0,
        target_area: 48.0,
        min_width: 5.0,
        min_depth: 6.0,
        needs_exterior: false,
        needs_plumbing: false,
        zone: Zone::Service,
        priority: 40.0,
    },
    RoomDefaults {
        room_type: RoomType::Pantry,
        label: "Pantry",
        min_area: 20.0,
        target_area: 30.0,
        min_width: 4.0,
        min_depth: 4.0,
        needs_exterior: false,
        needs_plumbing: false,
        zone: Zone::Service,
        priority: 35.0,
    },
    RoomDefaults {
        room_type: RoomType::WalkInCloset,
        label: "Walk-in Closet",
        min_area: 25.0,
        target_area: 40.0,
        min_width: 4.0,
        min_depth: 5.0,
        needs_exterior: false,
        needs_plumbing: false,
        zone: Zone::Private,
        priority: 42.0,
    },
    RoomDefaults {
        room_type: RoomType::Closet,
        label: "Closet",
        min_area: 8.0,
        target_area: 12.0,
        min_width: 2.0,
        min_depth: 3.0,
        needs_exterior: false,
        needs_plumbing: false,
        zone: Zone::Private,
        priority: 25.0,
    },
    RoomDefaults {
        room_type: RoomType::Foyer,
        label: "Foyer",
        min_area: 40.0,
        target_area: 60.0,
        min_width: 6.0,
        min_depth: 6.0,
        needs_exterior: true,
        needs_plumbing: false,
        zone: Zone::Circulation,
        priority: 65.0,
    },
    RoomDefaults {
        room_type: RoomType::Hallway,
        label: "Hallway",
        min_area: 24.0,
        target_area: 36.0,
        min_width: 3.0,
        min_depth: 6.0,
        needs_exterior: false,
        needs_plumbing: false,
        zone: Zone::Circulation,
        priority: 30.0,
    },
    RoomDefaults {
        room_type: RoomType::Stairs,
        label: "Stairs",
        min_area: 35.0,
        target_area: 45.0,
        min_width: 4.0,
        min_depth: 9.0,
        needs_exterior: false,
        needs_plumbing: false,
        zone: Zone::Circulation,
        priority: 58.0,
    },
    RoomDefaults {
        room_type: RoomType::Garage,
        label: "Garage",
        min_area: 240.0,
        target_area: 420.0,
        min_width: 12.0,
        min_depth: 20.0,
        needs_exterior: false,
        needs_plumbing: false,
        zone: Zone::Garage,
        priority: 78.0,
    },
    RoomDefaults {
        room_type: RoomType::Porch,
        label: "Front Porch",
        min_area: 40.0,
        target_area: 80.0,
        min_width: 6.0,
        min_depth: 6.0,
        needs_exterior: true,
        needs_plumbing: false,
        zone: Zone::Exterior,
        priority: 33.0,
    },
    RoomDefaults {
        room_type: RoomType::Deck,
        label: "Deck",
        min_area: 60.0,
        target_area: 120.0,
        min_width: 8.0,
        min_depth: 8.0,
        needs_exterior: true,
        needs_plumbing: false,
        zone: Zone::Exterior,
        priority: 28.0,
    },
    RoomDefaults {
        room_type: RoomType::Patio,
        label: "Patio",
        min_area: 60.0,
        target_area: 110.0,
        min_width: 8.0,
        min_depth: 8.0,
        needs_exterior: true,
        needs_plumbing: false,
        zone: Zone::Exterior,
        priority: 26.0,
    },
    RoomDefaults {
        room_type: RoomType::Storage,
        label: "Storage",
        min_area: 20.0,
        target_area: 40.0,
        min_width: 4.0,
        min_depth: 4.0,
        needs_exterior: false,
        needs_plumbing: false,
        zone: Zone::Service,
        priority: 20.0,
    },
];

/// Look up the defaults row for a room type.
pub fn defaults_for(rt: RoomType) -> &'static RoomDefaults {
    &ROOM_DEFAULTS[rt as usize]
}

/// Room-type pairs that must share an edge (IRC-style hard requirements).
pub const HARD_ADJACENCY: &[(RoomType, RoomType)] = &[
    (RoomType::Kitchen, RoomType::Dining),
    (RoomType::PrimaryBed, RoomType::PrimaryBath),
    (RoomType::PrimaryBed, RoomType::WalkInCloset),
    (RoomType::Foyer, RoomType::Living),
    (RoomType::Hallway, RoomType::Foyer),
];

/// Preferred adjacency pairs with positive weights.
pub const SOFT_ADJACENCY: &[(RoomType, RoomType, f32)] = &[
    (RoomType::Kitchen, RoomType::Pantry, 8.0),
    (RoomType::Mudroom, RoomType::Garage, 8.0),
    (RoomType::Bedroom, RoomType::Bathroom, 7.0),
    (RoomType::Kitchen, RoomType::Family, 6.0),
    (RoomType::Dining, RoomType::Living, 6.0),
    (RoomType::Stairs, RoomType::Hallway, 6.0),
    (RoomType::GreatRoom, RoomType::Kitchen, 6.0),
    (RoomType::Kitchen, RoomType::Garage, 5.0),
    (RoomType::Bedroom, RoomType::Hallway, 5.0),
    (RoomType::Kitchen, RoomType::Laundry, 4.0),
    (RoomType::Laundry, RoomType::Bathroom, 4.0),
    (RoomType::Living, RoomType::Porch, 4.0),
    (RoomType::Dining, RoomType::Deck, 3.0),
    (RoomType::Office, RoomType::Foyer, 3.0),
];

/// Pairs that should not share an edge, with penalty weights.
pub const ANTI_ADJACENCY: &[(RoomType, RoomType, f32)] = &[
    (RoomType::PrimaryBed, RoomType::Garage, 8.0),
    (RoomType::Bedroom, RoomType::Garage, 7.0),
    (RoomType::PrimaryBed, RoomType::Kitchen, 6.0),
    (RoomType::Bedroom, RoomType::Kitchen, 5.0),
    (RoomType::Dining, RoomType::Bathroom, 5.0),
    (RoomType::Bedroom, RoomType::Laundry, 4.0),
    (RoomType::PrimaryBed, RoomType::Living, 4.0),
    (RoomType::Living, RoomType::Bathroom, 3.0),
];

/// Pairs that flow together without an interior wall or door.
pub const OPEN_CONCEPT: &[(RoomType, RoomType)] = &[
    (RoomType::Kitchen, RoomType::Dining),
    (RoomType::Kitchen, RoomType::GreatRoom),
    (RoomType::Kitchen, RoomType::Family),
    (RoomType::Living, RoomType::Dining),
    (RoomType::GreatRoom, RoomType::Dining),
    (RoomType::Living, RoomType::Foyer),
];

/// Fixed fenestration for types where inference by area is wrong.
#[derive(Debug, Clone, Copy)]
pub struct WindowDefaults {
    pub room_type: RoomType,
    pub count: usize,
    pub width: f32,
    pub height: f32,
    pub sill_height: f32,
}

pub const WINDOW_DEFAULTS: &[WindowDefaults] = &[
    WindowDefaults {
        room_type: RoomType::Kitchen,
        count: 2,
        width: 3.0,
        height: 4.0,
        sill_height: 3.5,
    },
    WindowDefaults {
        room_type: RoomType::PrimaryBath,
        count: 1,
        width: 2.5,
        height: 2.0,
        sill_height: 4.5,
    },
    WindowDefaults {
        room_type: RoomType::Bathroom,
        count: 1,
        width: 2.0,
        height: 2.0,
        sill_height: 4.5,
    },
    WindowDefaults {
        room_type: RoomType::Laundry,
        count: 1,
        width: 2.0,
        height: 3.0,
        sill_height: 4.0,
    },
];

/// True if the unordered pair appears in the hard-adjacency table.
pub fn is_hard_pair(a: RoomType, b: RoomType) -> bool {
    HARD_ADJACENCY
        .iter()
        .any(|&(x, y)| (x == a && y == b) || (x == b && y == a))
}

/// Soft-adjacency weight for the unordered pair, if any.
pub fn soft_weight(a: RoomType, b: RoomType) -> Option<f32> {
    SOFT_ADJACENCY
        .iter()
        .find(|&&(x, y, _)| (x == a && y == b) || (x == b && y == a))
        .map(|&(_, _, w)| w)
}

/// Anti-adjacency penalty weight for the unordered pair, if any.
pub fn anti_weight(a: RoomType, b: RoomType) -> Option<f32> {
    ANTI_ADJACENCY
        .iter()
        .find(|&&(x, y, _)| (x == a && y == b) || (x == b && y == a))
        .map(|&(_, _, w)| w)
}

/// True if the unordered pair flows open, needing no interior door.
pub fn is_open_concept(a: RoomType, b: RoomType) -> bool {
    OPEN_CONCEPT
        .iter()
        .any(|&(x, y)| (x == a && y == b) || (x == b && y == a))
}

/// Fixed window config for a type, if the table carries one.
pub fn window_defaults_for(rt: RoomType) -> Option<&'static WindowDefaults> {
    WINDOW_DEFAULTS.iter().find(|w| w.room_type == rt)
}
