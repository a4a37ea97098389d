//! Zoning — partitions each floor's footprint into semantic regions and
//! assigns every room a floor and a zone anchor to gravitate toward.

use serde::{Deserialize, Serialize};

use crate::brief::NormalizedBrief;
use crate::envelope::BuildingEnvelope;
use crate::geometry::Rect;
use crate::types::{Direction, RoomType, Zone};

const FRONT_STRIP_FRACTION: f32 = 0.46;
const SERVICE_WIDTH_FRACTION: f32 = 0.24;
const GARAGE_WIDTH_FRACTION: f32 = 0.35;
const GARAGE_DEPTH_FRACTION: f32 = 0.42;
const CIRCULATION_WIDTH_FRACTION: f32 = 0.16;
const EXTERIOR_STRIP_FRACTION: f32 = 0.12;

/// Knobs the variation generator turns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoningOptions {
    /// Swap which of the front/back strips is social vs private.
    pub swap_social_private: bool,
    /// Rotate the entry face 180°.
    pub rotate_entry: bool,
}

/// A zone's region on one floor, with its anchor point (centroid).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneRegion {
    pub zone: Zone,
    pub rect: Rect,
    pub anchor: (f32, f32),
}

/// Zone regions for one floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorZoning {
    pub floor: u8,
    pub regions: Vec<ZoneRegion>,
}

impl FloorZoning {
    pub fn anchor(&self, zone: Zone) -> (f32, f32) {
        self.regions
            .iter()
            .find(|r| r.zone == zone)
            .map(|r| r.anchor)
            .unwrap_or((0.0, 0.0))
    }
}

/// Output of zoning: the program with floors resolved, plus per-floor zone
/// regions and the effective entry direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZonedPlan {
    pub brief: NormalizedBrief,
    pub options: ZoningOptions,
    /// Entry-facing direction after any rotation.
    pub front: Direction,
    pub floors: Vec<FloorZoning>,
}

impl ZonedPlan {
    pub fn floor_zoning(&self, floor: u8) -> &FloorZoning {
        self.floors
            .iter()
            .find(|f| f.floor == floor)
            .unwrap_or(&self.floors[0])
    }
}

/// Partition each floor and resolve room floor assignments.
pub fn assign_zones(
    brief: &NormalizedBrief,
    envelope: &BuildingEnvelope,
    options: ZoningOptions,
) -> ZonedPlan {
    let front = if options.rotate_entry {
        brief.lot.entry_facing.opposite()
    } else {
        brief.lot.entry_facing
    };

    let mut floors = Vec::new();
    for (&floor, rect) in &envelope.floor_rects {
        floors.push(zone_floor(floor, rect, front, options.swap_social_private));
    }

    let mut brief = brief.clone();
    assign_floors(&mut brief, envelope.stories);

    ZonedPlan {
        brief,
        options,
        front,
        floors,
    }
}

fn zone_floor(floor: u8, fp: &Rect, front: Direction, swap: bool) -> FloorZoning {
    let (front_strip, back_strip) = split_front_back(fp, front);
    let (social_rect, private_rect) = if swap {
        (back_strip, front_strip)
    } else {
        (front_strip, back_strip)
    };

    // Service runs along the east edge, the garage sits in the NW corner,
    // circulation is a center column, exterior hugs the entry face.
    let service_w = (fp.width * SERVICE_WIDTH_FRACTION).round();
    let service_rect = Rect::new(fp.right() - service_w, fp.y, service_w, fp.depth);

    let garage_w = (fp.width * GARAGE_WIDTH_FRACTION).round();
    let garage_d = (fp.depth * GARAGE_DEPTH_FRACTION).round();
    let garage_rect = Rect::new(fp.x, fp.top() - garage_d, garage_w, garage_d);

    let circ_w = (fp.width * CIRCULATION_WIDTH_FRACTION).round().max(3.0);
    let circ_rect = Rect::new(
        fp.x + ((fp.width - circ_w) / 2.0).floor(),
        fp.y,
        circ_w,
        fp.depth,
    );

    let exterior_rect = edge_strip(fp, front, EXTERIOR_STRIP_FRACTION);

    let regions = vec![
        region(Zone::Social, social_rect),
        region(Zone::Private, private_rect),
        region(Zone::Service, service_rect),
        region(Zone::Garage, garage_rect),
        region(Zone::Circulation, circ_rect),
        region(Zone::Exterior, exterior_rect),
    ];

    FloorZoning { floor, regions }
}

fn region(zone: Zone, rect: Rect) -> ZoneRegion {
    ZoneRegion {
        zone,
        anchor: rect.center(),
        rect,
    }
}

/// Split the footprint into a front strip (toward the entry face) and the
/// remaining back strip.
fn split_front_back(fp: &Rect, front: Direction) -> (Rect, Rect) {
    match front {
        Direction::South => {
            let d = (fp.depth * FRONT_STRIP_FRACTION).round();
            (
                Rect::new(fp.x, fp.y, fp.width, d),
                Rect::new(fp.x, fp.y + d, fp.width, fp.depth - d),
            )
        }
        Direction::North => {
            let d = (fp.depth * FRONT_STRIP_FRACTION).round();
            (
                Rect::new(fp.x, fp.top() - d, fp.width, d),
                Rect::new(fp.x, fp.y, fp.width, fp.depth - d),
            )
        }
        Direction::East => {
            let w = (fp.width * FRONT_STRIP_FRACTION).round();
            (
                Rect::new(fp.right() - w, fp.y, w, fp.depth),
                Rect::new(fp.x, fp.y, fp.width - w, fp.depth),
            )
        }
        Direction::West => {
            let w = (fp.width * FRONT_STRIP_FRACTION).round();
            (
                Rect::new(fp.x, fp.y, w, fp.depth),
                Rect::new(fp.x + w, fp.y, fp.width - w, fp.depth),
            )
        }
    }
}

/// A thin strip along the given face of the footprint.
fn edge_strip(fp: &Rect, face: Direction, fraction: f32) -> Rect {
    match face {
        Direction::South => {
            let d = (fp.depth * fraction).round().max(1.0);
            Rect::new(fp.x, fp.y, fp.width, d)
        }
        Direction::North => {
            let d = (fp.depth * fraction).round().max(1.0);
            Rect::new(fp.x, fp.top() - d, fp.width, d)
        }
        Direction::East => {
            let w = (fp.width * fraction).round().max(1.0);
            Rect::new(fp.right() - w, fp.y, w, fp.depth)
        }
        Direction::West => {
            let w = (fp.width * fraction).round().max(1.0);
            Rect::new(fp.x, fp.y, w, fp.depth)
        }
    }
}

/// Two-story plans put unpinned private rooms upstairs; stairs always start
/// on floor 1.
fn assign_floors(brief: &mut NormalizedBrief, stories: u8) {
    for room in &mut brief.rooms {
        if room.room_type == RoomType::Stairs {
            room.floor = 1;
            continue;
        }
        if room.floor == 0 {
            room.floor = if stories == 2 && room.zone == Zone::Private {
                2
            } else {
                1
            };
        } else {
            room.floor = room.floor.min(stories).max(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brief::{DesignBrief, RoomRequirement};
    use crate::envelope::compute_envelope;
    use crate::normalize::normalize;
    use crate::types::Style;

    fn fixture(stories: u8) -> (NormalizedBrief, BuildingEnvelope) {
        let brief = normalize(&DesignBrief {
            target_area: 2000.0,
            stories,
            style: Style::Traditional,
            rooms: vec![
                RoomRequirement::sized(RoomType::Living, 275.0),
                RoomRequirement::sized(RoomType::Kitchen, 185.0),
                RoomRequirement::sized(RoomType::PrimaryBed, 240.0),
                RoomRequirement::sized(RoomType::Bedroom, 140.0),
                RoomRequirement::sized(RoomType::Garage, 440.0),
            ],
            lot: None,
        });
        let envelope = compute_envelope(&brief);
        (brief, envelope)
    }

    #[test]
    fn test_every_zone_has_a_region_per_floor() {
        let (brief, envelope) = fixture(1);
        let zoned = assign_zones(&brief, &envelope, ZoningOptions::default());
        assert_eq!(zoned.floors.len(), 1);
        for zone in Zone::ALL {
            assert!(
                zoned.floors[0].regions.iter().any(|r| r.zone == zone),
                "missing region for {}",
                zone.as_str()
            );
        }
    }

    #[test]
    fn test_social_faces_entry_private_behind() {
        let (brief, envelope) = fixture(1);
        let zoned = assign_zones(&brief, &envelope, ZoningOptions::default());
        let fz = &zoned.floors[0];
        let social = fz.anchor(Zone::Social);
        let private = fz.anchor(Zone::Private);
        // Entry faces south: social anchor should sit south of private.
        assert!(social.1 < private.1);
    }

    #[test]
    fn test_swap_flips_social_private() {
        let (brief, envelope) = fixture(1);
        let swapped = assign_zones(
            &brief,
            &envelope,
            ZoningOptions {
                swap_social_private: true,
                rotate_entry: false,
            },
        );
        let fz = &swapped.floors[0];
        assert!(fz.anchor(Zone::Social).1 > fz.anchor(Zone::Private).1);
    }

    #[test]
    fn test_rotate_entry_flips_front() {
        let (brief, envelope) = fixture(1);
        let rotated = assign_zones(
            &brief,
            &envelope,
            ZoningOptions {
                swap_social_private: false,
                rotate_entry: true,
            },
        );
        assert_eq!(rotated.front, Direction::North);
        let fz = &rotated.floors[0];
        assert!(fz.anchor(Zone::Social).1 > fz.anchor(Zone::Private).1);
    }

    #[test]
    fn test_two_story_floor_assignment() {
        let (brief, envelope) = fixture(2);
        let zoned = assign_zones(&brief, &envelope, ZoningOptions::default());
        for room in &zoned.brief.rooms {
            match room.room_type {
                RoomType::Stairs => assert_eq!(room.floor, 1),
                _ if room.zone == Zone::Private => {
                    assert_eq!(room.floor, 2, "{} should be upstairs", room.id)
                }
                _ => assert_eq!(room.floor, 1, "{} should be downstairs", room.id),
            }
        }
    }

    #[test]
    fn test_zone_regions_inside_footprint() {
        let (brief, envelope) = fixture(1);
        let zoned = assign_zones(&brief, &envelope, ZoningOptions::default());
        for region in &zoned.floors[0].regions {
            assert!(
                envelope.footprint.contains(&region.rect),
                "{} region escapes the footprint",
                region.zone.as_str()
            );
        }
    }
}
