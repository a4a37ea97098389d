//! Plan scoring — eight normalized sub-scores plus an unweighted overall.
//!
//! Every sub-score is clipped to [0, 100] and rounded to two decimals at the
//! boundary so scores reproduce bit-for-bit across platforms.

use serde::{Deserialize, Serialize};

use crate::plan::{PlacedPlan, PlacedRoom};
use crate::tables::{ANTI_ADJACENCY, HARD_ADJACENCY, SOFT_ADJACENCY};
use crate::types::{RoomType, Zone};
use crate::walls::WallAnalysis;

/// The eight quality dimensions plus overall and square-footage accuracy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanScore {
    pub adjacency_satisfaction: f64,
    pub zone_cohesion: f64,
    pub natural_light: f64,
    pub plumbing_efficiency: f64,
    pub circulation_quality: f64,
    pub space_utilization: f64,
    pub privacy_gradient: f64,
    pub overall_buildability: f64,
    /// Unweighted mean of the eight sub-scores.
    pub overall: f64,
    /// Auxiliary: how close the placed area landed to the brief target.
    pub sqft_accuracy: f64,
}

impl PlanScore {
    pub fn sub_scores(&self) -> [f64; 8] {
        [
            self.adjacency_satisfaction,
            self.zone_cohesion,
            self.natural_light,
            self.plumbing_efficiency,
            self.circulation_quality,
            self.space_utilization,
            self.privacy_gradient,
            self.overall_buildability,
        ]
    }
}

/// Score a placed plan against its wall analysis.
pub fn score_plan(plan: &PlacedPlan, walls: &WallAnalysis) -> PlanScore {
    let diagonal = plan.envelope.footprint.diagonal() as f64;

    let adjacency_satisfaction = clip(adjacency_score(plan));
    let zone_cohesion = clip(zone_cohesion_score(plan, diagonal));
    let natural_light = clip(natural_light_score(plan));
    let plumbing_efficiency = clip(plumbing_score(plan, walls, diagonal));
    let circulation_quality = clip(circulation_score(plan));
    let space_utilization = clip(space_utilization_score(plan));
    let privacy_gradient = clip(privacy_score(plan, diagonal));
    let overall_buildability = clip(buildability_score(plan, walls));

    let subs = [
        adjacency_satisfaction,
        zone_cohesion,
        natural_light,
        plumbing_efficiency,
        circulation_quality,
        space_utilization,
        privacy_gradient,
        overall_buildability,
    ];
    let overall = round2(subs.iter().sum::<f64>() / subs.len() as f64);

    let target = plan.brief.target_area as f64;
    let sqft_accuracy = if target > 0.0 {
        clip(100.0 - 180.0 * (plan.total_area() as f64 - target).abs() / target)
    } else {
        0.0
    };

    PlanScore {
        adjacency_satisfaction,
        zone_cohesion,
        natural_light,
        plumbing_efficiency,
        circulation_quality,
        space_utilization,
        privacy_gradient,
        overall_buildability,
        overall,
        sqft_accuracy,
    }
}

fn clip(score: f64) -> f64 {
    round2(score.clamp(0.0, 100.0))
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

// ── Adjacency ───────────────────────────────────────────────────────────

fn has_type(plan: &PlacedPlan, rt: RoomType) -> bool {
    plan.rooms.iter().any(|r| r.room_type == rt)
}

/// Any room of type `a` edge-neighbors any room of type `b`.
fn pair_satisfied(plan: &PlacedPlan, a: RoomType, b: RoomType) -> bool {
    plan.rooms.iter().filter(|r| r.room_type == a).any(|ra| {
        ra.neighbor_ids
            .iter()
            .filter_map(|id| plan.room(id))
            .any(|rb| rb.room_type == b)
    })
}

fn adjacency_score(plan: &PlacedPlan) -> f64 {
    let mut hard_applicable = 0usize;
    let mut hard_satisfied = 0usize;
    for &(a, b) in HARD_ADJACENCY {
        if has_type(plan, a) && has_type(plan, b) {
            hard_applicable += 1;
            if pair_satisfied(plan, a, b) {
                hard_satisfied += 1;
            }
        }
    }
    let hard_pct = if hard_applicable == 0 {
        100.0
    } else {
        hard_satisfied as f64 / hard_applicable as f64 * 100.0
    };

    let mut soft_total = 0.0f64;
    let mut soft_earned = 0.0f64;
    for &(a, b, w) in SOFT_ADJACENCY {
        if has_type(plan, a) && has_type(plan, b) {
            soft_total += w as f64;
            if pair_satisfied(plan, a, b) {
                soft_earned += w as f64;
            }
        }
    }
    let soft_pct = if soft_total == 0.0 {
        100.0
    } else {
        soft_earned / soft_total * 100.0
    };

    let mut anti_total = 0.0f64;
    let mut anti_penalty = 0.0f64;
    for &(a, b, w) in ANTI_ADJACENCY {
        if has_type(plan, a) && has_type(plan, b) {
            anti_total += w as f64;
            if pair_satisfied(plan, a, b) {
                anti_penalty += w as f64;
            }
        }
    }
    let anti_pct = if anti_total == 0.0 {
        0.0
    } else {
        anti_penalty / anti_total * 100.0
    };

    0.5 * hard_pct + 0.3 * soft_pct + 0.2 * (100.0 - anti_pct)
}

// ── Zone cohesion ───────────────────────────────────────────────────────

fn zone_cohesion_score(plan: &PlacedPlan, diagonal: f64) -> f64 {
    let mut weighted = 0.0f64;
    let mut total_weight = 0.0f64;
    for zone in Zone::ALL {
        let members: Vec<&PlacedRoom> =
            plan.rooms.iter().filter(|r| r.zone == zone).collect();
        if members.len() < 2 {
            continue;
        }
        let mut dist_sum = 0.0f64;
        let mut pairs = 0usize;
        for i in 0..members.len() {
            for j in (i + 1)..members.len() {
                dist_sum += members[i].rect().center_manhattan(&members[j].rect()) as f64;
                pairs += 1;
            }
        }
        let avg = dist_sum / pairs as f64;
        let cohesion = (100.0 - avg / diagonal * 100.0).max(0.0);
        let area: f64 = members.iter().map(|r| r.sqft as f64).sum();
        weighted += cohesion * area;
        total_weight += area;
    }
    if total_weight == 0.0 {
        100.0
    } else {
        weighted / total_weight
    }
}

// ── Natural light ───────────────────────────────────────────────────────

fn natural_light_score(plan: &PlacedPlan) -> f64 {
    let mut sum = 0.0f64;
    let mut count = 0usize;
    for room in &plan.rooms {
        if room.zone == Zone::Exterior
            || room.room_type == RoomType::Garage
            || room.room_type == RoomType::Hallway
        {
            continue;
        }
        let windows = plan.windows.iter().filter(|w| w.room_id == room.id).count();
        let mut score = 40.0f64;
        if !room.exterior_walls.is_empty() {
            score += 25.0;
        }
        score += (12.0 * windows as f64).min(35.0);
        if room.needs_exterior && room.exterior_walls.is_empty() {
            score -= 45.0;
        }
        if room.needs_exterior && windows == 0 {
            score -= 30.0;
        }
        sum += score.clamp(0.0, 100.0);
        count += 1;
    }
    if count == 0 {
        100.0
    } else {
        sum / count as f64
    }
}

// ── Plumbing ────────────────────────────────────────────────────────────

fn plumbing_score(plan: &PlacedPlan, walls: &WallAnalysis, diagonal: f64) -> f64 {
    let plumbing: Vec<&PlacedRoom> = plan.plumbing_rooms().collect();
    if plumbing.len() <= 1 {
        return 100.0;
    }
    let mut dist_sum = 0.0f64;
    let mut pairs = 0usize;
    for i in 0..plumbing.len() {
        for j in (i + 1)..plumbing.len() {
            dist_sum += plumbing[i].rect().center_manhattan(&plumbing[j].rect()) as f64;
            pairs += 1;
        }
    }
    let proximity = (100.0 - dist_sum / pairs as f64 / diagonal * 100.0).max(0.0);

    let wet_length: f64 = walls.wet_walls.iter().map(|w| w.overlap_length as f64).sum();
    let wet_ratio = (wet_length / (plumbing.len() as f64 * 6.0) * 100.0).min(100.0);

    0.65 * proximity + 0.35 * wet_ratio
}

// ── Circulation ─────────────────────────────────────────────────────────

fn circulation_score(plan: &PlacedPlan) -> f64 {
    let Some(circ) = &plan.circulation else {
        return 35.0;
    };
    let mut score = if circ.is_fully_connected { 82.0 } else { 35.0 };
    score -= 4.0 * circ.dead_ends.len() as f64;
    score -= 1.8 * (circ.hallway_percent - 12.0).abs();
    if circ.main_path.len() >= 4 {
        score += 8.0;
    }
    score
}

// ── Space utilization ───────────────────────────────────────────────────

fn space_utilization_score(plan: &PlacedPlan) -> f64 {
    let available = plan.envelope.footprint.area() as f64 * plan.envelope.stories as f64;
    if available <= 0.0 {
        return 0.0;
    }
    let ratio = plan.total_area() as f64 / available;
    100.0 - 220.0 * (ratio - 0.82).abs()
}

// ── Privacy gradient ────────────────────────────────────────────────────

const PRIVACY_OFFENDERS: [RoomType; 4] = [
    RoomType::Garage,
    RoomType::Kitchen,
    RoomType::Family,
    RoomType::Living,
];

fn privacy_score(plan: &PlacedPlan, diagonal: f64) -> f64 {
    let social: Vec<&PlacedRoom> = plan.rooms.iter().filter(|r| r.zone == Zone::Social).collect();
    let private: Vec<&PlacedRoom> =
        plan.rooms.iter().filter(|r| r.zone == Zone::Private).collect();
    if social.is_empty() || private.is_empty() {
        return 70.0;
    }

    let entry_rect = plan
        .circulation
        .as_ref()
        .and_then(|c| plan.room(&c.entry_room_id))
        .unwrap_or(&plan.rooms[0])
        .rect();

    let avg = |rooms: &[&PlacedRoom]| -> f64 {
        rooms
            .iter()
            .map(|r| r.rect().center_manhattan(&entry_rect) as f64)
            .sum::<f64>()
            / rooms.len() as f64
    };
    let mut score = 65.0 + 60.0 * ((avg(&private) - avg(&social)) / diagonal);

    for room in &private {
        let offenders = room
            .neighbor_ids
            .iter()
            .filter_map(|id| plan.room(id))
            .filter(|n| n.zone != Zone::Private && PRIVACY_OFFENDERS.contains(&n.room_type))
            .count();
        score -= 6.0 * offenders as f64;
    }
    score
}

// ── Buildability ────────────────────────────────────────────────────────

fn buildability_score(plan: &PlacedPlan, walls: &WallAnalysis) -> f64 {
    if plan.rooms.is_empty() {
        return 0.0;
    }
    let good_aspect = plan
        .rooms
        .iter()
        .filter(|r| r.rect().aspect_ratio() <= 2.5)
        .count();
    let fraction = good_aspect as f64 / plan.rooms.len() as f64;

    let wall_penalty =
        (0.7 * (walls.shared_walls.len() as f64 + walls.walls.len() as f64 / 4.0)).min(35.0);

    let connected = plan
        .circulation
        .as_ref()
        .map(|c| c.is_fully_connected)
        .unwrap_or(false);

    fraction * 80.0 + 20.0 - wall_penalty - 12.0 * plan.unplaced_room_ids.len() as f64
        + if connected { 12.0 } else { -12.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brief::{DesignBrief, RoomRequirement};
    use crate::circulation::ensure_circulation;
    use crate::envelope::compute_envelope;
    use crate::normalize::normalize;
    use crate::placement::{place_rooms, PlacementOptions};
    use crate::types::Style;
    use crate::walls::analyze_walls;
    use crate::windows::assign_windows;
    use crate::zoning::{assign_zones, ZoningOptions};

    fn scored_fixture() -> (PlacedPlan, PlanScore) {
        let brief = normalize(&DesignBrief {
            target_area: 1800.0,
            stories: 1,
            style: Style::Ranch,
            rooms: vec![
                RoomRequirement::sized(RoomType::Living, 275.0),
                RoomRequirement::sized(RoomType::Kitchen, 185.0),
                RoomRequirement::sized(RoomType::Dining, 145.0),
                RoomRequirement::sized(RoomType::PrimaryBed, 240.0),
                RoomRequirement::sized(RoomType::PrimaryBath, 95.0),
                RoomRequirement::sized(RoomType::Bedroom, 140.0),
                RoomRequirement::sized(RoomType::Bathroom, 55.0),
                RoomRequirement::sized(RoomType::Laundry, 50.0),
            ],
            lot: None,
        });
        let envelope = compute_envelope(&brief);
        let zoned = assign_zones(&brief, &envelope, ZoningOptions::default());
        let placed = place_rooms(&zoned, &envelope, PlacementOptions::default());
        let circulated = ensure_circulation(&placed);
        let windowed = assign_windows(&circulated);
        let walls = analyze_walls(&windowed);
        let score = score_plan(&windowed, &walls);
        (windowed, score)
    }

    #[test]
    fn test_all_sub_scores_in_range() {
        let (_, score) = scored_fixture();
        for (i, s) in score.sub_scores().iter().enumerate() {
            assert!(s.is_finite(), "sub-score {} not finite", i);
            assert!((0.0..=100.0).contains(s), "sub-score {} = {} out of range", i, s);
        }
        assert!((0.0..=100.0).contains(&score.sqft_accuracy));
    }

    #[test]
    fn test_overall_is_mean_of_subs() {
        let (_, score) = scored_fixture();
        let mean = score.sub_scores().iter().sum::<f64>() / 8.0;
        assert!(
            (score.overall - mean).abs() < 0.01,
            "overall {} vs mean {}",
            score.overall,
            mean
        );
    }

    #[test]
    fn test_no_plumbing_rooms_scores_100() {
        let brief = normalize(&DesignBrief {
            target_area: 800.0,
            stories: 1,
            style: Style::Ranch,
            rooms: vec![
                RoomRequirement::sized(RoomType::Living, 250.0),
                RoomRequirement::sized(RoomType::Bedroom, 140.0),
            ],
            lot: None,
        });
        let envelope = compute_envelope(&brief);
        let zoned = assign_zones(&brief, &envelope, ZoningOptions::default());
        let placed = place_rooms(&zoned, &envelope, PlacementOptions::default());
        let circulated = ensure_circulation(&placed);
        let walls = analyze_walls(&circulated);
        let score = score_plan(&circulated, &walls);
        assert_eq!(score.plumbing_efficiency, 100.0);
    }

    #[test]
    fn test_disconnected_plan_scores_lower_circulation() {
        let (plan, connected_score) = scored_fixture();
        let mut broken = plan.clone();
        if let Some(circ) = broken.circulation.as_mut() {
            circ.is_fully_connected = false;
        }
        let walls = analyze_walls(&broken);
        let broken_score = score_plan(&broken, &walls);
        assert!(broken_score.circulation_quality < connected_score.circulation_quality);
        assert!(broken_score.overall_buildability < connected_score.overall_buildability);
    }

    #[test]
    fn test_unplaced_rooms_penalize_buildability() {
        let (plan, base) = scored_fixture();
        let mut penalized = plan.clone();
        penalized.unplaced_room_ids.push("garage-1".to_string());
        let walls = analyze_walls(&penalized);
        let score = score_plan(&penalized, &walls);
        assert!(
            score.overall_buildability <= base.overall_buildability - 11.0,
            "{} vs {}",
            score.overall_buildability,
            base.overall_buildability
        );
    }

    #[test]
    fn test_scores_rounded_to_two_decimals() {
        let (_, score) = scored_fixture();
        for s in score.sub_scores() {
            assert!(((s * 100.0).round() - s * 100.0).abs() < 1e-9, "{} not rounded", s);
        }
    }

    #[test]
    fn test_scoring_deterministic() {
        let (plan, score) = scored_fixture();
        let walls = analyze_walls(&plan);
        let again = score_plan(&plan, &walls);
        assert_eq!(score, again);
    }
}
