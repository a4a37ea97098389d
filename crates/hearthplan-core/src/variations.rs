//! Variation generation — re-runs zoning and placement under six fixed
//! parameter perturbations and finishes each candidate through circulation
//! and window assignment.

use crate::brief::NormalizedBrief;
use crate::circulation::ensure_circulation;
use crate::envelope::BuildingEnvelope;
use crate::placement::{exterior_walls, place_rooms, PlacementOptions, PlacementOrder};
use crate::plan::PlacedPlan;
use crate::windows::assign_windows;
use crate::zoning::{assign_zones, ZoningOptions};

/// One named perturbation of the layout parameters.
#[derive(Debug, Clone, Copy)]
struct VariationSpec {
    name: &'static str,
    mirror_x: bool,
    mirror_y: bool,
    zoning: ZoningOptions,
    placement: PlacementOptions,
}

const VARIATIONS: [VariationSpec; 6] = [
    VariationSpec {
        name: "base-greedy",
        mirror_x: false,
        mirror_y: false,
        zoning: ZoningOptions {
            swap_social_private: false,
            rotate_entry: false,
        },
        placement: PlacementOptions {
            order: PlacementOrder::Default,
            width_bias: 0,
        },
    },
    VariationSpec {
        name: "mirror-x",
        mirror_x: true,
        mirror_y: false,
        zoning: ZoningOptions {
            swap_social_private: false,
            rotate_entry: false,
        },
        placement: PlacementOptions {
            order: PlacementOrder::Default,
            width_bias: 0,
        },
    },
    VariationSpec {
        name: "swap-zones",
        mirror_x: false,
        mirror_y: false,
        zoning: ZoningOptions {
            swap_social_private: true,
            rotate_entry: false,
        },
        placement: PlacementOptions {
            order: PlacementOrder::Zone,
            width_bias: 0,
        },
    },
    VariationSpec {
        name: "rotate-entry",
        mirror_x: false,
        mirror_y: false,
        zoning: ZoningOptions {
            swap_social_private: false,
            rotate_entry: true,
        },
        placement: PlacementOptions {
            order: PlacementOrder::Priority,
            width_bias: 0,
        },
    },
    VariationSpec {
        name: "proportion-wide",
        mirror_x: false,
        mirror_y: false,
        zoning: ZoningOptions {
            swap_social_private: false,
            rotate_entry: false,
        },
        placement: PlacementOptions {
            order: PlacementOrder::Default,
            width_bias: 2,
        },
    },
    VariationSpec {
        name: "reverse-order-mirror-y",
        mirror_x: false,
        mirror_y: true,
        zoning: ZoningOptions {
            swap_social_private: false,
            rotate_entry: false,
        },
        placement: PlacementOptions {
            order: PlacementOrder::Reverse,
            width_bias: -1,
        },
    },
];

/// Produce the six named candidate plans for a fixed brief and envelope.
pub fn generate_variations(
    brief: &NormalizedBrief,
    envelope: &BuildingEnvelope,
) -> Vec<PlacedPlan> {
    VARIATIONS
        .iter()
        .map(|spec| run_variation(brief, envelope, spec))
        .collect()
}

fn run_variation(
    brief: &NormalizedBrief,
    envelope: &BuildingEnvelope,
    spec: &VariationSpec,
) -> PlacedPlan {
    let zoned = assign_zones(brief, envelope, spec.zoning);
    let mut plan = place_rooms(&zoned, envelope, spec.placement);

    if spec.mirror_x || spec.mirror_y {
        mirror_plan(&mut plan, spec.mirror_x, spec.mirror_y);
    }

    let plan = ensure_circulation(&plan);
    let mut plan = assign_windows(&plan);
    plan.metadata.strategy = spec.name.to_string();
    plan
}

/// Reflect room positions about the floor-rect midlines. Exterior walls are
/// re-derived from the mirrored rectangle rather than swapped by name.
fn mirror_plan(plan: &mut PlacedPlan, mirror_x: bool, mirror_y: bool) {
    for room in &mut plan.rooms {
        let fp = *plan.envelope.floor_rect(room.floor);
        if mirror_x {
            room.x = fp.x + (fp.right() - (room.x + room.width));
        }
        if mirror_y {
            room.y = fp.y + (fp.top() - (room.y + room.depth));
        }
        room.exterior_walls = exterior_walls(&room.rect(), &fp);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brief::{DesignBrief, RoomRequirement};
    use crate::envelope::compute_envelope;
    use crate::normalize::normalize;
    use crate::types::{RoomType, Style};

    fn fixture() -> (NormalizedBrief, BuildingEnvelope) {
        let brief = normalize(&DesignBrief {
            target_area: 1800.0,
            stories: 1,
            style: Style::Ranch,
            rooms: vec![
                RoomRequirement::sized(RoomType::Living, 275.0),
                RoomRequirement::sized(RoomType::Kitchen, 185.0),
                RoomRequirement::sized(RoomType::Dining, 145.0),
                RoomRequirement::sized(RoomType::PrimaryBed, 240.0),
                RoomRequirement::sized(RoomType::Bedroom, 140.0),
                RoomRequirement::sized(RoomType::Bathroom, 55.0),
            ],
            lot: None,
        });
        let envelope = compute_envelope(&brief);
        (brief, envelope)
    }

    #[test]
    fn test_six_variations_with_fixed_names() {
        let (brief, envelope) = fixture();
        let variations = generate_variations(&brief, &envelope);
        let names: Vec<&str> = variations
            .iter()
            .map(|p| p.metadata.strategy.as_str())
            .collect();
        assert_eq!(
            names,
            vec![
                "base-greedy",
                "mirror-x",
                "swap-zones",
                "rotate-entry",
                "proportion-wide",
                "reverse-order-mirror-y",
            ]
        );
    }

    #[test]
    fn test_mirrored_rooms_stay_in_footprint() {
        let (brief, envelope) = fixture();
        let variations = generate_variations(&brief, &envelope);
        for plan in &variations {
            for room in &plan.rooms {
                let fp = plan.envelope.floor_rect(room.floor);
                assert!(
                    fp.contains(&room.rect()),
                    "{}: {} escaped after mirroring",
                    plan.metadata.strategy,
                    room.id
                );
            }
        }
    }

    #[test]
    fn test_mirror_x_reflects_positions() {
        let (brief, envelope) = fixture();
        let variations = generate_variations(&brief, &envelope);
        let base = &variations[0];
        let mirrored = &variations[1];
        let fp = base.envelope.footprint;
        let inserted = &base.circulation.as_ref().unwrap().inserted_hallways;
        for room in base.rooms.iter().filter(|r| !inserted.contains(&r.id)) {
            let twin = mirrored.room(&room.id).unwrap();
            let expected_x = fp.x + (fp.right() - (room.x + room.width));
            assert!(
                (twin.x - expected_x).abs() < 0.01,
                "{}: x {} vs expected {}",
                room.id,
                twin.x,
                expected_x
            );
        }
    }

    #[test]
    fn test_mirrored_exterior_walls_rederived() {
        let (brief, envelope) = fixture();
        let variations = generate_variations(&brief, &envelope);
        for plan in &variations {
            for room in &plan.rooms {
                let fp = plan.envelope.floor_rect(room.floor);
                assert_eq!(
                    room.exterior_walls,
                    exterior_walls(&room.rect(), fp),
                    "{}: {} exterior walls inconsistent with rect",
                    plan.metadata.strategy,
                    room.id
                );
            }
        }
    }

    #[test]
    fn test_every_variation_finished_downstream() {
        let (brief, envelope) = fixture();
        for plan in generate_variations(&brief, &envelope) {
            assert!(plan.circulation.is_some(), "{}", plan.metadata.strategy);
            assert!(!plan.doors.is_empty(), "{}", plan.metadata.strategy);
            assert!(!plan.windows.is_empty(), "{}", plan.metadata.strategy);
        }
    }

    #[test]
    fn test_variations_deterministic() {
        let (brief, envelope) = fixture();
        let a = generate_variations(&brief, &envelope);
        let b = generate_variations(&brief, &envelope);
        assert_eq!(a, b);
    }
}
