//! Robot-building blueprints and the geode maximisation search.
//!
//! One ore robot is available at the start. Every minute each robot gathers
//! one unit of its resource, and at most one new robot can be ordered; it
//! becomes productive the following minute.
//!
//! The search branches on which robot to build next (waiting as long as it
//! takes to afford it) rather than minute by minute. It prunes with an
//! optimistic bound that assumes a geode robot could be built every
//! remaining minute, and skips states it has already explored.

use std::collections::HashSet;

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::fanout::fan_out;
use crate::search::SearchLimits;

const ORE: usize = 0;
const CLAY: usize = 1;
const OBSIDIAN: usize = 2;
const GEODE: usize = 3;

const TEMPLATE: [&str; 8] = [
    "Blueprint ",
    ": Each ore robot costs ",
    " ore. Each clay robot costs ",
    " ore. Each obsidian robot costs ",
    " ore and ",
    " clay. Each geode robot costs ",
    " ore and ",
    " obsidian.",
];

/// Robot costs, indexed by robot kind then by resource (ore, clay, obsidian).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Blueprint {
    pub id: u32,
    pub costs: [[u32; 3]; 4],
}

impl Blueprint {
    /// Parse every non-blank line as one blueprint.
    pub fn parse_all(input: &str) -> Result<Vec<Self>> {
        let blueprints = input
            .lines()
            .enumerate()
            .map(|(offset, line)| (offset + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty())
            .map(|(line_number, line)| Self::parse_line(line_number, line))
            .collect::<Result<Vec<_>>>()?;
        if blueprints.is_empty() {
            return Err(Error::EmptyInput { what: "blueprints" });
        }
        Ok(blueprints)
    }

    fn parse_line(line_number: usize, line: &str) -> Result<Self> {
        let invalid = |message: String| Error::InvalidBlueprint {
            line: line_number,
            message,
        };

        let mut numbers = [0u32; 7];
        let mut rest = line;
        for (index, fragment) in TEMPLATE.iter().enumerate() {
            rest = rest
                .strip_prefix(fragment)
                .ok_or_else(|| invalid(format!("expected {:?}", fragment.trim())))?;
            if let Some(slot) = numbers.get_mut(index) {
                let digits = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
                *slot = rest[..digits]
                    .parse()
                    .map_err(|_| invalid(format!("expected a number after {:?}", fragment.trim())))?;
                rest = &rest[digits..];
            }
        }
        if !rest.is_empty() {
            return Err(invalid(format!("unexpected trailing text {rest:?}")));
        }

        let [id, ore, clay, obsidian_ore, obsidian_clay, geode_ore, geode_obsidian] = numbers;
        Ok(Self {
            id,
            costs: [
                [ore, 0, 0],
                [clay, 0, 0],
                [obsidian_ore, obsidian_clay, 0],
                [geode_ore, 0, geode_obsidian],
            ],
        })
    }

    /// Robots of each kind worth owning: more than the largest single spend
    /// of a resource per minute can never help. Geode robots are unbounded.
    fn useful_robots(&self) -> [u32; 4] {
        let mut useful = [0, 0, 0, u32::MAX];
        for cost in &self.costs {
            for (resource, amount) in cost.iter().enumerate() {
                useful[resource] = useful[resource].max(*amount);
            }
        }
        useful
    }
}

/// Resources and robots with `minutes_left` on the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RobotState {
    pub minutes_left: u32,
    pub robots: [u32; 4],
    pub stock: [u32; 4],
}

impl RobotState {
    /// One ore robot and nothing else.
    pub fn initial(minutes: u32) -> Self {
        Self {
            minutes_left: minutes,
            robots: [1, 0, 0, 0],
            stock: [0; 4],
        }
    }

    /// Geodes at the deadline if nothing else is built.
    fn idle_geodes(&self) -> u32 {
        self.stock[GEODE] + self.robots[GEODE] * self.minutes_left
    }

    /// Minutes spent gathering, plus one for assembly, before a `kind` robot
    /// is ready. `None` when a required resource has no robot yet.
    fn minutes_until_built(&self, costs: &[u32; 3]) -> Option<u32> {
        let mut wait = 0;
        for (resource, &cost) in costs.iter().enumerate() {
            let missing = cost.saturating_sub(self.stock[resource]);
            if missing == 0 {
                continue;
            }
            let rate = self.robots[resource];
            if rate == 0 {
                return None;
            }
            wait = wait.max(missing.div_ceil(rate));
        }
        Some(wait + 1)
    }

    fn build(&self, kind: usize, costs: &[u32; 3], elapsed: u32) -> Self {
        let mut next = *self;
        next.minutes_left -= elapsed;
        for resource in [ORE, CLAY, OBSIDIAN, GEODE] {
            next.stock[resource] += self.robots[resource] * elapsed;
        }
        for (resource, cost) in costs.iter().enumerate() {
            next.stock[resource] -= cost;
        }
        next.robots[kind] += 1;
        next
    }
}

/// Best geode count for one blueprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BlueprintScore {
    pub id: u32,
    pub geodes: u32,
    /// Distinct states explored.
    pub explored: usize,
}

impl BlueprintScore {
    /// Blueprint id times geodes.
    pub fn quality(&self) -> u64 {
        u64::from(self.id) * u64::from(self.geodes)
    }
}

struct GeodeSearch<'a> {
    blueprint: &'a Blueprint,
    useful: [u32; 4],
    limit: Option<usize>,
    explored: HashSet<RobotState>,
    best: u32,
}

impl GeodeSearch<'_> {
    fn explore(&mut self, state: RobotState) -> Result<()> {
        self.best = self.best.max(state.idle_geodes());

        // A new geode robot every remaining minute is the most that could happen.
        let t = state.minutes_left;
        let ceiling = state.idle_geodes() + t * t.saturating_sub(1) / 2;
        if ceiling <= self.best || !self.explored.insert(state) {
            return Ok(());
        }
        if let Some(limit) = self.limit {
            if self.explored.len() > limit {
                return Err(Error::ExpansionLimitExceeded { limit });
            }
        }

        for kind in [GEODE, OBSIDIAN, CLAY, ORE] {
            if state.robots[kind] >= self.useful[kind] {
                continue;
            }
            let costs = &self.blueprint.costs[kind];
            let Some(elapsed) = state.minutes_until_built(costs) else {
                continue;
            };
            // A robot finished on the last minute never produces anything.
            if elapsed >= t {
                continue;
            }
            self.explore(state.build(kind, costs, elapsed))?;
        }
        Ok(())
    }
}

/// Most geodes `blueprint` can crack open within `minutes`.
///
/// `limits.max_expansions` caps the number of distinct states explored.
pub fn max_geodes(
    blueprint: &Blueprint,
    minutes: u32,
    limits: SearchLimits,
) -> Result<BlueprintScore> {
    let mut search = GeodeSearch {
        blueprint,
        useful: blueprint.useful_robots(),
        limit: limits.max_expansions,
        explored: HashSet::new(),
        best: 0,
    };
    search.explore(RobotState::initial(minutes))?;
    debug!(
        blueprint = blueprint.id,
        geodes = search.best,
        explored = search.explored.len(),
        "blueprint evaluated"
    );

    Ok(BlueprintScore {
        id: blueprint.id,
        geodes: search.best,
        explored: search.explored.len(),
    })
}

/// Scores for every blueprint plus the sum of their quality levels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QualityReport {
    pub total_quality: u64,
    pub scores: Vec<BlueprintScore>,
}

/// Evaluate every blueprint in parallel and sum their quality levels.
pub fn quality_levels(
    blueprints: &[Blueprint],
    minutes: u32,
    limits: SearchLimits,
) -> Result<QualityReport> {
    let scores = fan_out(blueprints, |blueprint| max_geodes(blueprint, minutes, limits))
        .into_iter()
        .collect::<Result<Vec<_>>>()?;
    Ok(QualityReport {
        total_quality: scores.iter().map(BlueprintScore::quality).sum(),
        scores,
    })
}
