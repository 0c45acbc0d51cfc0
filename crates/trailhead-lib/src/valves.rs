//! Valve network parsing and the pressure-release search model.
//!
//! Maximising released pressure is recast as minimising pressure *lost*:
//! every minute, each closed valve with positive flow costs its flow rate.
//! Lost pressure only grows, so edge costs are non-negative and the generic
//! engine applies directly.
//!
//! Only valves with positive flow are worth visiting, so the network is
//! compressed into shortest tunnel distances between those valves (and the
//! start) before searching.

use std::collections::{HashMap, VecDeque};

use serde::Serialize;

use crate::error::{Error, Result};
use crate::model::{Cost, SearchModel};
use crate::search::{SearchEngine, SearchLimits, SearchStats};

/// Upper bound on valves with positive flow; the open set is a `u64` bitmask.
pub const MAX_USEFUL_VALVES: usize = 64;

/// One valve and the tunnels leaving it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Valve {
    pub name: String,
    pub flow: u64,
    /// Indices into [`ValveNetwork::valves`].
    pub tunnels: Vec<usize>,
}

/// Parsed tunnel network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValveNetwork {
    valves: Vec<Valve>,
    index: HashMap<String, usize>,
}

impl ValveNetwork {
    /// Parse lines like
    /// `Valve AA has flow rate=0; tunnels lead to valves DD, II, BB`.
    pub fn parse(input: &str) -> Result<Self> {
        let mut described: Vec<(String, u64, Vec<String>)> = Vec::new();
        for (offset, line) in input.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let valve = parse_line(offset + 1, line)?;
            if described.iter().any(|(name, _, _)| *name == valve.0) {
                return Err(Error::DuplicateValve {
                    name: valve.0,
                    line: offset + 1,
                });
            }
            described.push(valve);
        }
        if described.is_empty() {
            return Err(Error::EmptyInput {
                what: "valve network",
            });
        }

        let index: HashMap<String, usize> = described
            .iter()
            .enumerate()
            .map(|(i, (name, _, _))| (name.clone(), i))
            .collect();

        let mut valves = Vec::with_capacity(described.len());
        for (name, flow, tunnel_names) in described {
            let tunnels = tunnel_names
                .into_iter()
                .map(|tunnel| {
                    index
                        .get(&tunnel)
                        .copied()
                        .ok_or(Error::UnknownValve { name: tunnel })
                })
                .collect::<Result<Vec<_>>>()?;
            valves.push(Valve {
                name,
                flow,
                tunnels,
            });
        }

        Ok(Self { valves, index })
    }

    pub fn valves(&self) -> &[Valve] {
        &self.valves
    }

    /// Resolve a valve name to its index.
    pub fn index_of(&self, name: &str) -> Result<usize> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| Error::UnknownValve {
                name: name.to_string(),
            })
    }

    /// Sum of every valve's flow rate.
    pub fn total_flow(&self) -> u64 {
        self.valves.iter().map(|valve| valve.flow).sum()
    }

    /// Tunnel hops from `from` to every valve, `None` where unreachable.
    pub fn distances_from(&self, from: usize) -> Vec<Option<u32>> {
        let mut distances = vec![None; self.valves.len()];
        let mut queue = VecDeque::new();

        distances[from] = Some(0);
        queue.push_back(from);

        while let Some(current) = queue.pop_front() {
            let next_distance = distances[current].map(|d| d + 1);
            for &next in &self.valves[current].tunnels {
                if distances[next].is_some() {
                    continue;
                }
                distances[next] = next_distance;
                queue.push_back(next);
            }
        }

        distances
    }
}

fn parse_line(line_number: usize, line: &str) -> Result<(String, u64, Vec<String>)> {
    let invalid = |message: &str| Error::InvalidValveLine {
        line: line_number,
        message: message.to_string(),
    };

    let rest = line
        .strip_prefix("Valve ")
        .ok_or_else(|| invalid("expected 'Valve <name>'"))?;
    let (name, rest) = rest
        .split_once(" has flow rate=")
        .ok_or_else(|| invalid("expected 'has flow rate='"))?;
    let (rate, tunnels) = rest
        .split_once(';')
        .ok_or_else(|| invalid("expected ';' after flow rate"))?;
    let flow = rate
        .trim()
        .parse::<u64>()
        .map_err(|_| invalid("flow rate is not a non-negative integer"))?;
    let tunnels = tunnels.trim();
    let targets = tunnels
        .strip_prefix("tunnels lead to valves ")
        .or_else(|| tunnels.strip_prefix("tunnel leads to valve "))
        .ok_or_else(|| invalid("expected tunnel list"))?;

    let name = name.trim();
    if name.is_empty() {
        return Err(invalid("valve name is empty"));
    }

    Ok((
        name.to_string(),
        flow,
        targets
            .split(',')
            .map(|target| target.trim().to_string())
            .filter(|target| !target.is_empty())
            .collect(),
    ))
}

/// Search state: where we stand, which useful valves are open, and the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValveState {
    /// Index into the model's points (useful valves, then the start).
    pub at: usize,
    /// Bit `i` set when useful valve `i` is open.
    pub opened: u64,
    pub minute: u32,
}

/// [`SearchModel`] minimising pressure lost before a deadline.
#[derive(Debug, Clone)]
pub struct ValveModel {
    /// Network indices of valves with positive flow.
    useful: Vec<usize>,
    flows: Vec<u64>,
    /// `distances[point][useful]` in minutes; the start is the last point.
    distances: Vec<Vec<Option<u32>>>,
    deadline: u32,
}

impl ValveModel {
    /// Compress `network` around `start` for a `deadline`-minute search.
    pub fn new(network: &ValveNetwork, start: usize, deadline: u32) -> Result<Self> {
        let useful: Vec<usize> = network
            .valves()
            .iter()
            .enumerate()
            .filter(|(_, valve)| valve.flow > 0)
            .map(|(i, _)| i)
            .collect();
        if useful.len() > MAX_USEFUL_VALVES {
            return Err(Error::TooManyValves {
                count: useful.len(),
                max: MAX_USEFUL_VALVES,
            });
        }

        let flows = useful.iter().map(|&i| network.valves()[i].flow).collect();
        let distances = useful
            .iter()
            .copied()
            .chain(std::iter::once(start))
            .map(|from| {
                let all = network.distances_from(from);
                useful.iter().map(|&to| all[to]).collect()
            })
            .collect();

        Ok(Self {
            useful,
            flows,
            distances,
            deadline,
        })
    }

    /// State at minute zero, standing at the start valve with nothing open.
    pub fn initial_state(&self) -> ValveState {
        ValveState {
            at: self.useful.len(),
            opened: 0,
            minute: 0,
        }
    }

    /// Network index of the useful valve at `point`, `None` for the start.
    pub fn valve_at(&self, point: usize) -> Option<usize> {
        self.useful.get(point).copied()
    }

    fn closed_flow(&self, opened: u64) -> u64 {
        self.flows
            .iter()
            .enumerate()
            .filter(|(i, _)| opened & (1 << i) == 0)
            .map(|(_, flow)| flow)
            .sum()
    }
}

impl SearchModel for ValveModel {
    type State = ValveState;
    type Target = u32;

    fn neighbors(&self, state: &ValveState) -> Vec<(ValveState, Cost)> {
        if state.minute >= self.deadline {
            return Vec::new();
        }
        let closed = self.closed_flow(state.opened);
        let mut next = Vec::with_capacity(self.useful.len() + 1);

        for (valve, distance) in self.distances[state.at].iter().enumerate() {
            if state.opened & (1 << valve) != 0 {
                continue;
            }
            let Some(distance) = distance else {
                continue;
            };
            // Walking there plus one minute to turn the wheel.
            let elapsed = distance + 1;
            if state.minute + elapsed > self.deadline {
                continue;
            }
            next.push((
                ValveState {
                    at: valve,
                    opened: state.opened | (1 << valve),
                    minute: state.minute + elapsed,
                },
                u64::from(elapsed) * closed,
            ));
        }

        let remaining = self.deadline - state.minute;
        next.push((
            ValveState {
                minute: self.deadline,
                ..*state
            },
            u64::from(remaining) * closed,
        ));
        next
    }

    fn heuristic(&self, _state: &ValveState, _deadline: &u32) -> Cost {
        0
    }

    fn is_target(&self, state: &ValveState, deadline: &u32) -> bool {
        state.minute >= *deadline
    }
}

/// Best achievable release and the order in which valves get opened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PressurePlan {
    pub released: u64,
    pub opened: Vec<String>,
    pub stats: SearchStats,
}

/// Maximum pressure released within `minutes`, starting at valve `start`.
pub fn max_pressure(
    network: &ValveNetwork,
    start: &str,
    minutes: u32,
    limits: SearchLimits,
) -> Result<PressurePlan> {
    let start = network.index_of(start)?;
    let model = ValveModel::new(network, start, minutes)?;
    let outcome = SearchEngine::new(&model)
        .with_limits(limits)
        .find_shortest(model.initial_state(), &minutes)?;
    let stats = *outcome.stats();
    let ceiling = network.total_flow() * u64::from(minutes);

    // Idling until the deadline is always possible, so the target is reachable.
    let Some(solution) = outcome.into_solution() else {
        return Ok(PressurePlan {
            released: 0,
            opened: Vec::new(),
            stats,
        });
    };

    let mut opened = Vec::new();
    for pair in solution.path.windows(2) {
        if pair[0].opened != pair[1].opened {
            if let Some(valve) = model.valve_at(pair[1].at) {
                opened.push(network.valves()[valve].name.clone());
            }
        }
    }

    Ok(PressurePlan {
        released: ceiling.saturating_sub(solution.cost),
        opened,
        stats,
    })
}
