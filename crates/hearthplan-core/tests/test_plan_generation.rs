//! Integration tests for the full floor-plan pipeline.
//!
//! Exercises: DesignBrief → NormalizedBrief → BuildingEnvelope → ZonedPlan
//! → PlacedPlan → circulation → windows → walls → scores → variations.
//!
//! All tests are pure logic — no I/O, no rendering.

use hearthplan_core::brief::{DesignBrief, LotConstraints, RoomRequirement};
use hearthplan_core::circulation::ensure_circulation;
use hearthplan_core::envelope::compute_envelope;
use hearthplan_core::normalize::normalize;
use hearthplan_core::placement::{place_rooms, PlacementOptions};
use hearthplan_core::plan::PlacedPlan;
use hearthplan_core::scoring::{score_plan, PlanScore};
use hearthplan_core::types::{Direction, RoomType, Style, Zone};
use hearthplan_core::variations::generate_variations;
use hearthplan_core::walls::analyze_walls;
use hearthplan_core::windows::assign_windows;
use hearthplan_core::zoning::{assign_zones, ZoningOptions};

// ── Helpers ────────────────────────────────────────────────────────────

/// The PRD reference program: 1800 sqft single-story ranch on a 110x140 lot.
fn prd_brief() -> DesignBrief {
    let mut kitchen = RoomRequirement::sized(RoomType::Kitchen, 185.0);
    kitchen.adjacent_to = vec![RoomType::Dining];
    let mut dining = RoomRequirement::sized(RoomType::Dining, 145.0);
    dining.adjacent_to = vec![RoomType::Kitchen];

    DesignBrief {
        target_area: 1800.0,
        stories: 1,
        style: Style::Ranch,
        rooms: vec![
            RoomRequirement::sized(RoomType::PrimaryBed, 240.0),
            RoomRequirement::sized(RoomType::Bedroom, 140.0),
            RoomRequirement::sized(RoomType::Bedroom, 135.0),
            RoomRequirement::sized(RoomType::PrimaryBath, 95.0),
            RoomRequirement::sized(RoomType::Bathroom, 55.0),
            kitchen,
            dining,
            RoomRequirement::sized(RoomType::Living, 275.0),
            RoomRequirement::sized(RoomType::Laundry, 50.0),
            RoomRequirement::sized(RoomType::Garage, 450.0),
        ],
        lot: Some(LotConstraints {
            lot_width: 110.0,
            lot_depth: 140.0,
            setback_front: 20.0,
            setback_side: 8.0,
            setback_rear: 25.0,
            entry_facing: Direction::South,
            garage_position: Some(hearthplan_core::brief::GaragePosition::Left),
        }),
    }
}

/// Run the whole pipeline on a brief and return the finished plan + score.
fn run_pipeline(brief: &DesignBrief) -> (PlacedPlan, PlanScore) {
    let normalized = normalize(brief);
    let envelope = compute_envelope(&normalized);
    let zoned = assign_zones(&normalized, &envelope, ZoningOptions::default());
    let placed = place_rooms(&zoned, &envelope, PlacementOptions::default());
    let circulated = ensure_circulation(&placed);
    let finished = assign_windows(&circulated);
    let walls = analyze_walls(&finished);
    let score = score_plan(&finished, &walls);
    (finished, score)
}

// ── PRD scenario ───────────────────────────────────────────────────────

#[test]
fn prd_normalization_injects_implicit_rooms() {
    let normalized = normalize(&prd_brief());
    let count_of = |rt: RoomType| {
        normalized
            .rooms
            .iter()
            .filter(|r| r.room_type == rt)
            .count()
    };
    assert_eq!(count_of(RoomType::Foyer), 1);
    assert_eq!(count_of(RoomType::Hallway), 1);
    assert_eq!(count_of(RoomType::WalkInCloset), 1);
    assert_eq!(count_of(RoomType::Stairs), 0, "single story gets no stairs");
}

#[test]
fn prd_buildable_rect_and_centered_footprint() {
    let normalized = normalize(&prd_brief());
    let envelope = compute_envelope(&normalized);
    assert_eq!(envelope.buildable.x, 8.0);
    assert_eq!(envelope.buildable.y, 20.0);
    assert_eq!(envelope.buildable.width, 94.0);
    assert_eq!(envelope.buildable.depth, 95.0);
    assert!(envelope.buildable.contains(&envelope.footprint));
}

#[test]
fn prd_places_every_room() {
    let (plan, _) = run_pipeline(&prd_brief());
    assert!(
        plan.unplaced_room_ids.is_empty(),
        "unplaced: {:?}",
        plan.unplaced_room_ids
    );
}

#[test]
fn prd_is_fully_connected() {
    let (plan, _) = run_pipeline(&prd_brief());
    let circ = plan.circulation.as_ref().unwrap();
    assert!(
        circ.is_fully_connected,
        "disconnected; warnings: {:?}",
        plan.metadata.warnings
    );
}

#[test]
fn prd_scores_in_range() {
    let (_, score) = run_pipeline(&prd_brief());
    for s in score.sub_scores() {
        assert!((0.0..=100.0).contains(&s), "sub-score {} out of range", s);
    }
    let mean = score.sub_scores().iter().sum::<f64>() / 8.0;
    assert!((score.overall - mean).abs() < 0.01);
}

#[test]
fn prd_produces_at_least_four_variations() {
    let normalized = normalize(&prd_brief());
    let envelope = compute_envelope(&normalized);
    let variations = generate_variations(&normalized, &envelope);
    assert!(variations.len() >= 4);
}

// ── Universal invariants ───────────────────────────────────────────────

#[test]
fn rooms_inside_footprint_and_disjoint() {
    let (plan, _) = run_pipeline(&prd_brief());
    for room in &plan.rooms {
        let fp = plan.envelope.floor_rect(room.floor);
        assert!(fp.contains(&room.rect()), "{} outside footprint", room.id);
    }
    for i in 0..plan.rooms.len() {
        for j in (i + 1)..plan.rooms.len() {
            let (a, b) = (&plan.rooms[i], &plan.rooms[j]);
            if a.floor == b.floor {
                assert!(!a.rect().overlaps(&b.rect()), "{} overlaps {}", a.id, b.id);
            }
        }
    }
}

#[test]
fn windows_lie_on_owning_rooms_exterior_walls() {
    let (plan, _) = run_pipeline(&prd_brief());
    assert!(!plan.windows.is_empty());
    for window in &plan.windows {
        let room = plan.room(&window.room_id).expect("window's room exists");
        assert!(
            room.exterior_walls.contains(&window.direction),
            "{} not on an exterior wall of {}",
            window.id,
            room.id
        );
    }
}

#[test]
fn doors_connect_existing_adjacent_rooms() {
    let (plan, _) = run_pipeline(&prd_brief());
    assert!(!plan.doors.is_empty());
    let mut exterior_count = 0;
    for door in &plan.doors {
        let a = plan.room(&door.connects[0]).expect("door room a exists");
        let b = plan.room(&door.connects[1]).expect("door room b exists");
        if a.id == b.id {
            exterior_count += 1;
        } else {
            assert!(
                a.neighbor_ids.contains(&b.id),
                "door {} joins non-adjacent {} and {}",
                door.id,
                a.id,
                b.id
            );
        }
    }
    assert_eq!(exterior_count, 1, "exactly one exterior door expected");
}

#[test]
fn connected_claim_matches_bfs() {
    let (plan, _) = run_pipeline(&prd_brief());
    let circ = plan.circulation.as_ref().unwrap();
    if circ.is_fully_connected {
        // BFS over neighbor ids from the entry must visit every room.
        let mut visited = std::collections::BTreeSet::new();
        let mut queue = std::collections::VecDeque::new();
        visited.insert(circ.entry_room_id.clone());
        queue.push_back(circ.entry_room_id.clone());
        while let Some(id) = queue.pop_front() {
            let room = plan.room(&id).unwrap();
            for n in &room.neighbor_ids {
                if visited.insert(n.clone()) {
                    queue.push_back(n.clone());
                }
            }
        }
        assert_eq!(visited.len(), plan.rooms.len());
    }
}

#[test]
fn pipeline_is_deterministic() {
    let (plan_a, score_a) = run_pipeline(&prd_brief());
    let (plan_b, score_b) = run_pipeline(&prd_brief());
    let json_a = serde_json::to_string(&plan_a).unwrap();
    let json_b = serde_json::to_string(&plan_b).unwrap();
    assert_eq!(json_a, json_b);
    assert_eq!(
        serde_json::to_string(&score_a).unwrap(),
        serde_json::to_string(&score_b).unwrap()
    );
}

#[test]
fn circulation_and_windows_idempotent() {
    let (plan, _) = run_pipeline(&prd_brief());
    let recirculated = ensure_circulation(&plan);
    assert_eq!(plan.rooms.len(), recirculated.rooms.len());
    assert_eq!(plan.doors, recirculated.doors);
    let rewindowed = assign_windows(&plan);
    assert_eq!(plan.windows, rewindowed.windows);
}

// ── Boundary behaviors ─────────────────────────────────────────────────

#[test]
fn minimal_program_at_800_clamps_and_places() {
    // Per-type minimums total just over 800 sqft, so the program cannot
    // shrink to the target.
    let brief = DesignBrief {
        target_area: 800.0,
        stories: 1,
        style: Style::Modern,
        rooms: vec![
            RoomRequirement::sized(RoomType::Living, 150.0),
            RoomRequirement::sized(RoomType::Kitchen, 100.0),
            RoomRequirement::sized(RoomType::PrimaryBed, 120.0),
            RoomRequirement::sized(RoomType::Bedroom, 70.0),
            RoomRequirement::sized(RoomType::Bathroom, 35.0),
            RoomRequirement::sized(RoomType::Dining, 80.0),
            RoomRequirement::sized(RoomType::Laundry, 30.0),
            RoomRequirement::sized(RoomType::Pantry, 20.0),
            RoomRequirement::sized(RoomType::Mudroom, 30.0),
            RoomRequirement::sized(RoomType::Storage, 20.0),
            RoomRequirement::sized(RoomType::Office, 70.0),
            RoomRequirement::sized(RoomType::Den, 90.0),
        ],
        lot: None,
    };
    let normalized = normalize(&brief);
    assert!(
        normalized.warnings.iter().any(|w| w.contains("exceeding")),
        "expected a minimums warning, got {:?}",
        normalized.warnings
    );
    for room in &normalized.rooms {
        assert!((room.target_area - room.min_area).abs() < f32::EPSILON);
    }
    let envelope = compute_envelope(&normalized);
    let zoned = assign_zones(&normalized, &envelope, ZoningOptions::default());
    let placed = place_rooms(&zoned, &envelope, PlacementOptions::default());
    assert!(
        placed.unplaced_room_ids.is_empty(),
        "unplaced: {:?}",
        placed.unplaced_room_ids
    );
}

#[test]
fn oversized_program_reports_unplaced_and_penalizes() {
    let mut rooms = vec![
        RoomRequirement::sized(RoomType::Living, 300.0),
        RoomRequirement::sized(RoomType::Kitchen, 200.0),
        RoomRequirement::sized(RoomType::Dining, 160.0),
        RoomRequirement::sized(RoomType::Family, 260.0),
        RoomRequirement::sized(RoomType::GreatRoom, 340.0),
        RoomRequirement::sized(RoomType::PrimaryBed, 260.0),
        RoomRequirement::sized(RoomType::PrimaryBath, 110.0),
    ];
    for _ in 0..6 {
        rooms.push(RoomRequirement::sized(RoomType::Bedroom, 160.0));
        rooms.push(RoomRequirement::sized(RoomType::Bathroom, 60.0));
    }
    rooms.push(RoomRequirement::sized(RoomType::Garage, 500.0));
    rooms.push(RoomRequirement::sized(RoomType::Garage, 460.0));
    rooms.push(RoomRequirement::sized(RoomType::Laundry, 60.0));
    rooms.push(RoomRequirement::sized(RoomType::Office, 130.0));
    rooms.push(RoomRequirement::sized(RoomType::Den, 140.0));
    rooms.push(RoomRequirement::sized(RoomType::Storage, 60.0));
    assert!(rooms.len() >= 20);

    let brief = DesignBrief {
        target_area: 5000.0,
        stories: 1,
        style: Style::Contemporary,
        rooms,
        lot: None,
    };
    let (plan, score) = run_pipeline(&brief);
    if !plan.unplaced_room_ids.is_empty() {
        let walls = analyze_walls(&plan);
        let mut without = plan.clone();
        without.unplaced_room_ids.clear();
        let unpenalized = score_plan(&without, &walls);
        let expected_drop = 12.0 * plan.unplaced_room_ids.len() as f64;
        assert!(
            score.overall_buildability
                <= (unpenalized.overall_buildability - expected_drop).max(0.0) + 0.01,
            "buildability {} vs unpenalized {}",
            score.overall_buildability,
            unpenalized.overall_buildability
        );
    }
}

#[test]
fn two_story_floor_split() {
    let brief = DesignBrief {
        target_area: 2400.0,
        stories: 2,
        style: Style::Traditional,
        rooms: vec![
            RoomRequirement::sized(RoomType::Living, 275.0),
            RoomRequirement::sized(RoomType::Kitchen, 185.0),
            RoomRequirement::sized(RoomType::Dining, 145.0),
            RoomRequirement::sized(RoomType::PrimaryBed, 240.0),
            RoomRequirement::sized(RoomType::PrimaryBath, 95.0),
            RoomRequirement::sized(RoomType::Bedroom, 140.0),
            RoomRequirement::sized(RoomType::Bathroom, 55.0),
            RoomRequirement::sized(RoomType::Garage, 440.0),
        ],
        lot: None,
    };
    let normalized = normalize(&brief);
    let envelope = compute_envelope(&normalized);
    let zoned = assign_zones(&normalized, &envelope, ZoningOptions::default());
    for room in &zoned.brief.rooms {
        match room.room_type {
            RoomType::Stairs => assert_eq!(room.floor, 1),
            _ if room.zone == Zone::Private => assert_eq!(room.floor, 2, "{}", room.id),
            _ => assert_eq!(room.floor, 1, "{}", room.id),
        }
    }
    // Stairs injected exactly because stories=2.
    assert_eq!(
        normalized
            .rooms
            .iter()
            .filter(|r| r.room_type == RoomType::Stairs)
            .count(),
        1
    );
}

#[test]
fn walk_in_closet_shares_floor_with_primary_bed() {
    let brief = DesignBrief {
        target_area: 2400.0,
        stories: 2,
        style: Style::Traditional,
        rooms: vec![
            RoomRequirement::sized(RoomType::Living, 275.0),
            RoomRequirement::sized(RoomType::PrimaryBed, 240.0),
            RoomRequirement::sized(RoomType::Kitchen, 185.0),
        ],
        lot: None,
    };
    let normalized = normalize(&brief);
    let envelope = compute_envelope(&normalized);
    let zoned = assign_zones(&normalized, &envelope, ZoningOptions::default());
    let primary_floor = zoned
        .brief
        .rooms
        .iter()
        .find(|r| r.room_type == RoomType::PrimaryBed)
        .unwrap()
        .floor;
    assert!(zoned
        .brief
        .rooms
        .iter()
        .any(|r| r.room_type == RoomType::WalkInCloset && r.floor == primary_floor));
}

// ── Variation ranking ──────────────────────────────────────────────────

#[test]
fn variation_ranking_stable_and_top_utilization_reasonable() {
    let normalized = normalize(&prd_brief());
    let envelope = compute_envelope(&normalized);

    let rank = || {
        let mut scored: Vec<(String, PlanScore)> = generate_variations(&normalized, &envelope)
            .iter()
            .map(|plan| {
                let walls = analyze_walls(plan);
                (plan.metadata.strategy.clone(), score_plan(plan, &walls))
            })
            .collect();
        scored.sort_by(|a, b| {
            b.1.overall
                .partial_cmp(&a.1.overall)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        scored
    };

    let first = rank();
    let second = rank();
    let names_first: Vec<&String> = first.iter().map(|(n, _)| n).collect();
    let names_second: Vec<&String> = second.iter().map(|(n, _)| n).collect();
    assert_eq!(names_first, names_second, "ranking must be deterministic");

    let top = &first[0];
    assert!(
        top.1.space_utilization > 50.0,
        "top-ranked {} has utilization {}",
        top.0,
        top.1.space_utilization
    );
}
