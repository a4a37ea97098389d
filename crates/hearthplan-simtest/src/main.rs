//! HearthPlan Headless Validation Harness
//!
//! Drives the full pipeline and the compliance engine on a reference
//! program, entirely in-process — no DB, no networking, no rendering.
//!
//! Usage:
//!   cargo run -p hearthplan-simtest
//!   cargo run -p hearthplan-simtest -- --verbose

use hearthplan_core::brief::{DesignBrief, LotConstraints, RoomRequirement};
use hearthplan_core::circulation::ensure_circulation;
use hearthplan_core::envelope::compute_envelope;
use hearthplan_core::normalize::normalize;
use hearthplan_core::placement::{place_rooms, PlacementOptions};
use hearthplan_core::plan::PlacedPlan;
use hearthplan_core::scoring::score_plan;
use hearthplan_core::types::{Direction, RoomType, Style};
use hearthplan_core::variations::generate_variations;
use hearthplan_core::walls::analyze_walls;
use hearthplan_core::windows::assign_windows;
use hearthplan_core::zoning::{assign_zones, ZoningOptions};
use hearthplan_rules::run_compliance_check;

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn main() {
    let verbose = std::env::args().any(|a| a == "--verbose");
    println!("=== HearthPlan Validation Harness ===\n");

    let mut results = Vec::new();

    // 1. Pipeline on the reference ranch program
    let plan = build_reference_plan();
    results.extend(validate_pipeline(&plan, verbose));

    // 2. Geometry invariants
    results.extend(validate_geometry(&plan));

    // 3. Scoring
    results.extend(validate_scores(&plan, verbose));

    // 4. Variations
    results.extend(validate_variations(verbose));

    // 5. Compliance engine
    results.extend(validate_compliance(&plan, verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

fn reference_brief() -> DesignBrief {
    let mut kitchen = RoomRequirement::sized(RoomType::Kitchen, 185.0);
    kitchen.adjacent_to = vec![RoomType::Dining];
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
            RoomRequirement::sized(RoomType::Dining, 145.0),
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
            garage_position: None,
        }),
    }
}

fn build_reference_plan() -> PlacedPlan {
    let normalized = normalize(&reference_brief());
    let envelope = compute_envelope(&normalized);
    let zoned = assign_zones(&normalized, &envelope, ZoningOptions::default());
    let placed = place_rooms(&zoned, &envelope, PlacementOptions::default());
    let circulated = ensure_circulation(&placed);
    assign_windows(&circulated)
}

// ── 1. Pipeline ─────────────────────────────────────────────────────────

fn validate_pipeline(plan: &PlacedPlan, verbose: bool) -> Vec<TestResult> {
    println!("--- Pipeline ---");
    let mut results = Vec::new();

    results.push(TestResult {
        name: "pipeline_rooms_placed".into(),
        passed: plan.unplaced_room_ids.is_empty(),
        detail: format!(
            "{} rooms placed, {} unplaced",
            plan.rooms.len(),
            plan.unplaced_room_ids.len()
        ),
    });

    let implicit = ["foyer-1", "hallway-1", "walk_in_closet-1"];
    let all_injected = implicit.iter().all(|id| plan.room(id).is_some());
    results.push(TestResult {
        name: "pipeline_implicit_rooms".into(),
        passed: all_injected,
        detail: format!("implicit rooms present: {}", implicit.join(", ")),
    });

    let circ = plan.circulation.as_ref();
    results.push(TestResult {
        name: "pipeline_connected".into(),
        passed: circ.map(|c| c.is_fully_connected).unwrap_or(false),
        detail: format!(
            "entry={}, hallways inserted={}",
            circ.map(|c| c.entry_room_id.as_str()).unwrap_or("?"),
            circ.map(|c| c.inserted_hallways.len()).unwrap_or(0)
        ),
    });

    results.push(TestResult {
        name: "pipeline_has_windows_and_doors".into(),
        passed: !plan.windows.is_empty() && !plan.doors.is_empty(),
        detail: format!("{} windows, {} doors", plan.windows.len(), plan.doors.len()),
    });

    if verbose {
        println!("  Rooms:");
        for room in &plan.rooms {
            println!(
                "    {:20} {:3.0}x{:2.0} at ({:3.0},{:3.0}) floor {}",
                room.id, room.width, room.depth, room.x, room.y, room.floor
            );
        }
    }

    results
}

// ── 2. Geometry invariants ─────────────────────────────────────────────

fn validate_geometry(plan: &PlacedPlan) -> Vec<TestResult> {
    println!("--- Geometry Invariants ---");
    let mut results = Vec::new();

    let mut inside = true;
    for room in &plan.rooms {
        if !plan.envelope.floor_rect(room.floor).contains(&room.rect()) {
            inside = false;
        }
    }
    results.push(TestResult {
        name: "geometry_rooms_inside_footprint".into(),
        passed: inside,
        detail: "every room inside its floor rect".into(),
    });

    let mut disjoint = true;
    for i in 0..plan.rooms.len() {
        for j in (i + 1)..plan.rooms.len() {
            let (a, b) = (&plan.rooms[i], &plan.rooms[j]);
            if a.floor == b.floor && a.rect().overlaps(&b.rect()) {
                disjoint = false;
            }
        }
    }
    results.push(TestResult {
        name: "geometry_rooms_disjoint".into(),
        passed: disjoint,
        detail: "no two rooms on one floor overlap".into(),
    });

    let windows_ok = plan.windows.iter().all(|w| {
        plan.room(&w.room_id)
            .map(|r| r.exterior_walls.contains(&w.direction))
            .unwrap_or(false)
    });
    results.push(TestResult {
        name: "geometry_windows_on_exterior".into(),
        passed: windows_ok,
        detail: format!("{} windows all on exterior walls", plan.windows.len()),
    });

    results
}

// ── 3. Scoring ─────────────────────────────────────────────────────────

fn validate_scores(plan: &PlacedPlan, verbose: bool) -> Vec<TestResult> {
    println!("--- Scoring ---");
    let mut results = Vec::new();

    let walls = analyze_walls(plan);
    let score = score_plan(plan, &walls);

    let in_range = score
        .sub_scores()
        .iter()
        .all(|s| s.is_finite() && (0.0..=100.0).contains(s));
    results.push(TestResult {
        name: "scores_in_range".into(),
        passed: in_range,
        detail: format!("overall={:.1}", score.overall),
    });

    let mean = score.sub_scores().iter().sum::<f64>() / 8.0;
    results.push(TestResult {
        name: "scores_overall_is_mean".into(),
        passed: (score.overall - mean).abs() < 0.01,
        detail: format!("overall {:.2} vs mean {:.2}", score.overall, mean),
    });

    if verbose {
        println!("    adjacency={:.1} cohesion={:.1} light={:.1} plumbing={:.1}",
            score.adjacency_satisfaction, score.zone_cohesion,
            score.natural_light, score.plumbing_efficiency);
        println!("    circulation={:.1} utilization={:.1} privacy={:.1} buildability={:.1}",
            score.circulation_quality, score.space_utilization,
            score.privacy_gradient, score.overall_buildability);
    }

    results
}

// ── 4. Variations ──────────────────────────────────────────────────────

fn validate_variations(verbose: bool) -> Vec<TestResult> {
    println!("--- Variations ---");
    let mut results = Vec::new();

    let normalized = normalize(&reference_brief());
    let envelope = compute_envelope(&normalized);
    let variations = generate_variations(&normalized, &envelope);

    results.push(TestResult {
        name: "variations_count".into(),
        passed: variations.len() == 6,
        detail: format!("{} variations generated", variations.len()),
    });

    let mut ranked: Vec<(String, f64)> = variations
        .iter()
        .map(|plan| {
            let walls = analyze_walls(plan);
            let score = score_plan(plan, &walls);
            (plan.metadata.strategy.clone(), score.overall)
        })
        .collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    results.push(TestResult {
        name: "variations_scored".into(),
        passed: ranked.iter().all(|(_, s)| (0.0..=100.0).contains(s)),
        detail: format!("best: {} at {:.1}", ranked[0].0, ranked[0].1),
    });

    if verbose {
        for (name, score) in &ranked {
            println!("    {:24} {:.1}", name, score);
        }
    }

    results
}

// ── 5. Compliance ──────────────────────────────────────────────────────

fn validate_compliance(plan: &PlacedPlan, verbose: bool) -> Vec<TestResult> {
    println!("--- Compliance ---");
    let mut results = Vec::new();

    let report = match run_compliance_check(plan, "irc-base", None) {
        Ok(report) => report,
        Err(e) => {
            results.push(TestResult {
                name: "compliance_runs".into(),
                passed: false,
                detail: format!("engine error: {}", e),
            });
            return results;
        }
    };

    results.push(TestResult {
        name: "compliance_runs".into(),
        passed: report.summary.total_rules >= 55,
        detail: format!(
            "{} rules evaluated, {:.0}% compliant",
            report.summary.total_rules, report.summary.compliance_percent
        ),
    });

    results.push(TestResult {
        name: "compliance_counters_consistent".into(),
        passed: report.summary.passed + report.summary.failed == report.summary.total_rules,
        detail: format!(
            "passed={} failed={} warnings={} info={}",
            report.summary.passed,
            report.summary.failed,
            report.summary.warnings,
            report.summary.info
        ),
    });

    // Jurisdiction isolation: colorado then base must equal a fresh base run.
    let colorado = run_compliance_check(plan, "colorado", None);
    let base_again = run_compliance_check(plan, "irc-base", None);
    let isolated = match (&colorado, &base_again) {
        (Ok(_), Ok(b)) => {
            let a = serde_json::to_string(
                &report
                    .results
                    .iter()
                    .map(|r| (&r.rule_id, r.passed, &r.violations))
                    .collect::<Vec<_>>(),
            )
            .unwrap();
            let b = serde_json::to_string(
                &b.results
                    .iter()
                    .map(|r| (&r.rule_id, r.passed, &r.violations))
                    .collect::<Vec<_>>(),
            )
            .unwrap();
            a == b
        }
        _ => false,
    };
    results.push(TestResult {
        name: "compliance_jurisdiction_isolation".into(),
        passed: isolated,
        detail: "colorado run leaves irc-base results untouched".into(),
    });

    if verbose {
        for result in report.results.iter().filter(|r| !r.passed) {
            println!("    ✗ {}: {} violation(s)", result.rule_id, result.violations.len());
            for v in &result.violations {
                println!("      [{}] {}", v.code_section, v.description);
            }
        }
    }

    results
}
