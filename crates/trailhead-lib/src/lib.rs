//! Trailhead library entry points.
//!
//! This crate exposes a generic best-first search engine over caller-defined
//! state spaces, a repetition shortcut for long periodic simulations, and the
//! puzzle models built on top of them. Higher-level consumers (the CLI) should
//! only depend on the functions exported here instead of reimplementing
//! search loops.
//!

#![deny(warnings)]

pub mod blueprints;
pub mod cycle;
pub mod error;
pub mod fanout;
pub mod frontier;
pub mod grid;
pub mod model;
pub mod output;
pub mod search;
pub mod tower;
pub mod valves;

pub use blueprints::{
    max_geodes, quality_levels, Blueprint, BlueprintScore, QualityReport, RobotState,
};
pub use cycle::{fast_forward, simulate_literal, Cycle, CycleLimits, CycleReport, Simulation};
pub use error::{Error, Result};
pub use fanout::fan_out;
pub use frontier::TieBreak;
pub use grid::{
    shortest_ascent, shortest_descent, ClimbModel, ClimbTarget, Direction, HeightMap, Position,
};
pub use model::{Cost, SearchModel};
pub use output::{AnswerDetail, AnswerSummary, PuzzleKind};
pub use search::{
    find_shortest, SearchEngine, SearchLimits, SearchOutcome, SearchStats, Solution,
};
pub use tower::{tower_height, Jet, JetPattern, RockTower, TowerSignature};
pub use valves::{max_pressure, PressurePlan, Valve, ValveModel, ValveNetwork, ValveState};
