//! Pure floor-plan generation logic for HearthPlan.
//!
//! This crate contains the whole layout pipeline, independent of any UI,
//! renderer, or persistence layer. Functions take plain data and return
//! results, making them unit-testable and portable: brief normalization,
//! envelope computation, zoning, grid placement, circulation repair,
//! window/wall derivation, scoring, and variation generation.

pub mod brief;
pub mod circulation;
pub mod envelope;
pub mod geometry;
pub mod grid;
pub mod normalize;
pub mod placement;
pub mod plan;
pub mod scoring;
pub mod tables;
pub mod types;
pub mod variations;
pub mod walls;
pub mod windows;
pub mod zoning;

pub use brief::{DesignBrief, LotConstraints, NormalizedBrief, NormalizedRoom, RoomRequirement};
pub use circulation::ensure_circulation;
pub use envelope::{compute_envelope, BuildingEnvelope};
pub use normalize::normalize;
pub use placement::{place_rooms, PlacementOptions, PlacementOrder};
pub use plan::{CirculationResult, Door, PlacedPlan, PlacedRoom, WindowPlacement};
pub use scoring::{score_plan, PlanScore};
pub use types::{Direction, DoorKind, RoomType, Style, WindowKind, Zone};
pub use variations::generate_variations;
pub use walls::{analyze_walls, WallAnalysis};
pub use windows::assign_windows;
pub use zoning::{assign_zones, ZonedPlan, ZoningOptions};
