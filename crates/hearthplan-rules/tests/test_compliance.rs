//! Integration tests for the compliance engine.
//!
//! Plans are hand-built so each scenario controls its geometry exactly —
//! the pipeline's own output is covered by hearthplan-core's tests.

use std::collections::BTreeMap;

use hearthplan_core::brief::NormalizedBrief;
use hearthplan_core::envelope::BuildingEnvelope;
use hearthplan_core::geometry::Rect;
use hearthplan_core::plan::{Door, PlacedPlan, PlacedRoom, PlanMetadata, WindowPlacement};
use hearthplan_core::tables::defaults_for;
use hearthplan_core::types::{Direction, DoorKind, RoomType, Style, WindowKind};

use hearthplan_rules::context::ComplianceContext;
use hearthplan_rules::engine::{create_engine, run_compliance_check, CheckOptions, EngineError};
use hearthplan_rules::report::{ComplianceReport, RuleResult, Severity};
use hearthplan_rules::rule::RuleCategory;

// ── Plan builders ──────────────────────────────────────────────────────

fn make_room(id: &str, rt: RoomType, x: f32, y: f32, w: f32, d: f32) -> PlacedRoom {
    let defaults = defaults_for(rt);
    PlacedRoom {
        id: id.to_string(),
        room_type: rt,
        label: defaults.label.to_string(),
        zone: defaults.zone,
        x,
        y,
        width: w,
        depth: d,
        floor: 1,
        sqft: w * d,
        rotated: false,
        exterior_walls: if y == 0.0 {
            vec![Direction::South]
        } else {
            Vec::new()
        },
        needs_exterior: defaults.needs_exterior,
        needs_plumbing: defaults.needs_plumbing,
        neighbor_ids: Vec::new(),
    }
}

fn make_window(room: &PlacedRoom, ordinal: usize) -> WindowPlacement {
    WindowPlacement {
        id: format!("window-{}-{}", room.id, ordinal),
        wall_id: format!("{}-south", room.id),
        room_id: room.id.clone(),
        position: room.width / 2.0,
        width: 3.0,
        height: 4.0,
        sill_height: 3.0,
        kind: WindowKind::Standard,
        floor: room.floor,
        direction: Direction::South,
    }
}

fn make_door(id: &str, a: &str, b: &str, kind: DoorKind) -> Door {
    Door {
        id: id.to_string(),
        wall_id: format!("wall-{}-{}", a, b),
        position: 0.5,
        width: 3.0,
        kind,
        connects: [a.to_string(), b.to_string()],
    }
}

/// A small compliant baseline: foyer, living, kitchen, dining, bedroom,
/// bathroom in one row along the south face.
fn baseline_plan() -> PlacedPlan {
    let rooms = vec![
        make_room("foyer-1", RoomType::Foyer, 0.0, 0.0, 8.0, 8.0),
        make_room("living-1", RoomType::Living, 8.0, 0.0, 15.0, 14.0),
        make_room("kitchen-1", RoomType::Kitchen, 23.0, 0.0, 12.0, 13.0),
        make_room("dining-1", RoomType::Dining, 35.0, 0.0, 11.0, 12.0),
        make_room("bedroom-1", RoomType::Bedroom, 46.0, 0.0, 11.0, 12.0),
        make_room("bathroom-1", RoomType::Bathroom, 57.0, 0.0, 6.0, 9.0),
    ];
    plan_from_rooms(rooms)
}

fn plan_from_rooms(mut rooms: Vec<PlacedRoom>) -> PlacedPlan {
    // Chain neighbors left-to-right the way edge-sharing would find them.
    for i in 0..rooms.len().saturating_sub(1) {
        let next = rooms[i + 1].id.clone();
        let prev = rooms[i].id.clone();
        rooms[i].neighbor_ids.push(next);
        rooms[i + 1].neighbor_ids.push(prev);
    }
    let mut doors = vec![make_door("door-entry", "foyer-1", "foyer-1", DoorKind::Exterior)];
    for i in 0..rooms.len().saturating_sub(1) {
        doors.push(make_door(
            &format!("door-{}", i + 1),
            &rooms[i].id.clone(),
            &rooms[i + 1].id.clone(),
            DoorKind::Standard,
        ));
    }
    let windows: Vec<WindowPlacement> = rooms
        .iter()
        .filter(|r| !r.exterior_walls.is_empty() && r.room_type != RoomType::Foyer)
        .map(|r| make_window(r, 1))
        .collect();

    let footprint = Rect::new(0.0, 0.0, 64.0, 30.0);
    let mut floor_rects = BTreeMap::new();
    floor_rects.insert(1, footprint);
    PlacedPlan {
        brief: NormalizedBrief {
            target_area: 1800.0,
            stories: 1,
            style: Style::Ranch,
            lot: Default::default(),
            rooms: Vec::new(),
            warnings: Vec::new(),
        },
        envelope: BuildingEnvelope {
            buildable: footprint,
            footprint,
            floor_area_target: 1800.0,
            total_area: 1800.0,
            stories: 1,
            floor_rects,
            grid_resolution: 1.0,
        },
        rooms,
        doors,
        windows,
        circulation: None,
        unplaced_room_ids: Vec::new(),
        metadata: PlanMetadata::default(),
    }
}

fn default_options() -> CheckOptions {
    CheckOptions::default()
}

// ── Hard failures ──────────────────────────────────────────────────────

#[test]
fn rejects_plan_without_rooms() {
    let mut plan = baseline_plan();
    plan.rooms.clear();
    let engine = create_engine();
    let err = engine
        .check(&plan, &ComplianceContext::default(), &default_options())
        .unwrap_err();
    assert_eq!(err, EngineError::InvalidPlan("plan has no rooms"));
}

#[test]
fn rejects_plan_without_doors() {
    let mut plan = baseline_plan();
    plan.doors.clear();
    let engine = create_engine();
    let err = engine
        .check(&plan, &ComplianceContext::default(), &default_options())
        .unwrap_err();
    assert_eq!(err, EngineError::InvalidPlan("plan has no doors"));
}

// ── Scenario: violating bedroom (R304.1) ───────────────────────────────

#[test]
fn undersized_bedroom_fails_r304() {
    let mut plan = baseline_plan();
    // Shrink the bedroom to 50 sq ft.
    let bedroom = plan.rooms.iter_mut().find(|r| r.id == "bedroom-1").unwrap();
    bedroom.width = 10.0;
    bedroom.depth = 5.0;
    bedroom.sqft = 50.0;

    let report = run_compliance_check(&plan, "irc-base", None).unwrap();
    let result = report.result("irc-r304-1-bedroom-area").unwrap();
    assert!(!result.passed);
    let violation = &result.violations[0];
    assert_eq!(violation.severity, Severity::Error);
    assert_eq!(violation.current_value, Some(50.0));
    assert_eq!(violation.required_value, Some(70.0));
    assert_eq!(violation.unit.as_deref(), Some("sq ft"));
    assert_eq!(violation.room_id.as_deref(), Some("bedroom-1"));
    assert!(!violation.remediation.is_empty());
    assert!(!report.overall_compliant);
}

// ── Scenario: narrow hallway (R311.6.1 + ADA) ──────────────────────────

#[test]
fn narrow_hallway_fails_width_rules() {
    let mut rooms = vec![
        make_room("foyer-1", RoomType::Foyer, 0.0, 0.0, 8.0, 8.0),
        make_room("living-1", RoomType::Living, 8.0, 0.0, 15.0, 14.0),
        make_room("kitchen-1", RoomType::Kitchen, 23.0, 0.0, 12.0, 13.0),
        make_room("bedroom-1", RoomType::Bedroom, 35.0, 0.0, 11.0, 12.0),
        make_room("bathroom-1", RoomType::Bathroom, 46.0, 0.0, 6.0, 9.0),
    ];
    // A 2.5 ft (30 in) hallway out of circulation repair.
    rooms.push(make_room("hallway-1", RoomType::Hallway, 52.0, 0.0, 10.0, 2.5));
    let plan = plan_from_rooms(rooms);

    let report = run_compliance_check(&plan, "irc-base", None).unwrap();

    let width = report.result("irc-r311-6-hallway-width").unwrap();
    assert!(!width.passed);
    let violation = &width.violations[0];
    assert_eq!(violation.severity, Severity::Error);
    assert_eq!(violation.current_value, Some(30.0));
    assert_eq!(violation.required_value, Some(36.0));

    let ada = report.result("ada-hallway-width").unwrap();
    assert!(ada.passed, "ADA variant warns, it does not fail the rule");
    assert_eq!(ada.violations[0].severity, Severity::Warning);
    assert_eq!(ada.violations[0].required_value, Some(42.0));
}

// ── Scenario: jurisdiction override isolation ──────────────────────────

fn result_signature(result: &RuleResult) -> (bool, String) {
    (
        result.passed,
        serde_json::to_string(&result.violations).unwrap(),
    )
}

#[test]
fn colorado_override_does_not_leak_into_base() {
    let plan = baseline_plan();
    // 7.75 ft ceilings: fine under base IRC, a warning under Colorado.
    let mut co_ctx = ComplianceContext::for_jurisdiction("colorado");
    co_ctx
        .parameters
        .insert("ceiling_height_ft".to_string(), serde_json::Value::from(7.75));
    let mut base_ctx = ComplianceContext::default();
    base_ctx
        .parameters
        .insert("ceiling_height_ft".to_string(), serde_json::Value::from(7.75));

    let engine = create_engine();
    let co_report = engine.check(&plan, &co_ctx, &default_options()).unwrap();
    let base_after_co = engine.check(&plan, &base_ctx, &default_options()).unwrap();
    let fresh_base = create_engine()
        .check(&plan, &base_ctx, &default_options())
        .unwrap();

    let co_ceiling = co_report.result("irc-r304-3-ceiling-height").unwrap();
    assert_eq!(co_ceiling.violations.len(), 1, "Colorado warns below 8 ft");
    assert_eq!(co_ceiling.violations[0].severity, Severity::Warning);

    let reused = base_after_co.result("irc-r304-3-ceiling-height").unwrap();
    let fresh = fresh_base.result("irc-r304-3-ceiling-height").unwrap();
    assert!(reused.violations.is_empty(), "base IRC passes 7.75 ft");
    assert_eq!(result_signature(reused), result_signature(fresh));
}

#[test]
fn jurisdiction_round_trip_is_stable() {
    let plan = baseline_plan();
    let engine = create_engine();
    let options = default_options();

    let first = engine
        .check(&plan, &ComplianceContext::default(), &options)
        .unwrap();
    let _colorado = engine
        .check(&plan, &ComplianceContext::for_jurisdiction("colorado"), &options)
        .unwrap();
    let third = engine
        .check(&plan, &ComplianceContext::default(), &options)
        .unwrap();

    assert_eq!(first.results.len(), third.results.len());
    for (a, b) in first.results.iter().zip(third.results.iter()) {
        assert_eq!(a.rule_id, b.rule_id);
        assert_eq!(result_signature(a), result_signature(b));
    }
}

#[test]
fn colorado_adds_informational_rules() {
    let plan = baseline_plan();
    let mut ctx = ComplianceContext::for_jurisdiction("colorado");
    ctx.wui_zone = true;
    let report = create_engine().check(&plan, &ctx, &default_options()).unwrap();

    for rule_id in ["co-wui-zone", "co-high-altitude", "co-prop-123", "co-sb25-002"] {
        assert!(report.result(rule_id).is_some(), "missing {}", rule_id);
    }
    let wui = report.result("co-wui-zone").unwrap();
    assert_eq!(wui.violations[0].severity, Severity::Info);

    // Base runs never see jurisdiction-scoped rules.
    let base = run_compliance_check(&plan, "irc-base", None).unwrap();
    assert!(base.result("co-wui-zone").is_none());
}

// ── Evaluation mechanics ───────────────────────────────────────────────

#[test]
fn repeated_runs_identical() {
    let plan = baseline_plan();
    let engine = create_engine();
    let ctx = ComplianceContext::default();
    let a = engine.check(&plan, &ctx, &default_options()).unwrap();
    let b = engine.check(&plan, &ctx, &default_options()).unwrap();
    assert_eq!(a.results.len(), b.results.len());
    for (ra, rb) in a.results.iter().zip(b.results.iter()) {
        assert_eq!(ra.passed, rb.passed, "{} flapped", ra.rule_id);
        assert_eq!(result_signature(ra), result_signature(rb));
    }
}

#[test]
fn category_filters_apply() {
    let plan = baseline_plan();
    let options = CheckOptions {
        include_categories: vec![RuleCategory::Egress],
        ..Default::default()
    };
    let report = create_engine()
        .check(&plan, &ComplianceContext::default(), &options)
        .unwrap();
    assert_eq!(report.results.len(), 9);
    assert!(report
        .results
        .iter()
        .all(|r| r.rule_id.contains("r310") || r.rule_id.contains("r311")
            || r.rule_id.contains("r312") || r.rule_id.contains("r302")));
}

#[test]
fn rule_filters_apply() {
    let plan = baseline_plan();
    let options = CheckOptions {
        include_rules: vec!["kitchen-required".to_string()],
        ..Default::default()
    };
    let report = create_engine()
        .check(&plan, &ComplianceContext::default(), &options)
        .unwrap();
    assert_eq!(report.results.len(), 1);
    assert_eq!(report.results[0].rule_id, "kitchen-required");

    let options = CheckOptions {
        exclude_rules: vec!["kitchen-required".to_string()],
        ..Default::default()
    };
    let report = create_engine()
        .check(&plan, &ComplianceContext::default(), &options)
        .unwrap();
    assert!(report.result("kitchen-required").is_none());
}

#[test]
fn stop_on_critical_skips_remaining() {
    let mut plan = baseline_plan();
    let bedroom = plan.rooms.iter_mut().find(|r| r.id == "bedroom-1").unwrap();
    bedroom.width = 10.0;
    bedroom.depth = 5.0;
    bedroom.sqft = 50.0;

    let options = CheckOptions {
        stop_on_critical: true,
        ..Default::default()
    };
    let report = create_engine()
        .check(&plan, &ComplianceContext::default(), &options)
        .unwrap();
    let last = report.results.last().unwrap();
    assert!(!last.passed, "run ends on the critical rule");
    assert!(report.summary.skipped > 0);
    assert!(report.results.len() < 55);
}

#[test]
fn summary_counters_add_up() {
    let plan = baseline_plan();
    let report = run_compliance_check(&plan, "irc-base", None).unwrap();
    let s = &report.summary;
    assert_eq!(s.total_rules, report.results.len());
    assert_eq!(s.passed + s.failed, s.total_rules);
    let expected = (s.passed as f64 / s.total_rules as f64 * 10000.0).round() / 100.0;
    assert!((s.compliance_percent - expected).abs() < 0.001);
}

#[test]
fn stub_egress_rules_always_pass() {
    let plan = baseline_plan();
    let options = CheckOptions {
        include_metadata: true,
        ..Default::default()
    };
    let report = create_engine()
        .check(&plan, &ComplianceContext::default(), &options)
        .unwrap();
    for rule_id in [
        "irc-r310-2-1-clear-area",
        "irc-r310-2-2-clear-width",
        "irc-r310-2-3-clear-height",
    ] {
        let result = report.result(rule_id).unwrap();
        assert!(result.passed);
        assert!(result.violations.is_empty());
        assert!(result.metadata.contains_key("status"));
    }
}

#[test]
fn registry_mutations_change_evaluation() {
    let plan = baseline_plan();
    let mut engine = create_engine();
    assert!(engine
        .rule_registry_mut()
        .set_rule_enabled("kitchen-required", false));
    let report = engine
        .check(&plan, &ComplianceContext::default(), &default_options())
        .unwrap();
    assert!(report.result("kitchen-required").is_none());
}

fn baseline_report() -> ComplianceReport {
    run_compliance_check(&baseline_plan(), "irc-base", None).unwrap()
}

#[test]
fn baseline_plan_is_broadly_compliant() {
    let report = baseline_report();
    for result in &report.results {
        assert!(
            result.passed,
            "{} failed on the baseline plan: {:?}",
            result.rule_id, result.violations
        );
    }
    assert!(report.overall_compliant);
}
