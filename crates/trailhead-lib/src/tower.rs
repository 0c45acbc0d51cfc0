//! Falling-rock tower driven by a repeating jet pattern.
//!
//! Rocks of five repeating shapes fall into a chamber seven units wide. Each
//! rock appears two units from the left wall with its bottom three units above
//! the highest settled rock, then alternates between being pushed sideways by
//! the next jet and falling one unit, until a fall is blocked.
//!
//! Chamber rows are bitmasks with bit 6 as the leftmost column.

use serde::Serialize;

use crate::cycle::{fast_forward, CycleLimits, CycleReport, Simulation};
use crate::error::{Error, Result};

/// Chamber width in units.
pub const CHAMBER_WIDTH: usize = 7;

/// Deepest reachable surface, in rows below the top, that still yields a
/// signature. Deeper surfaces (an open shaft, a young tower) yield none.
pub const SURFACE_DEPTH: usize = 64;

const FULL_ROW: u8 = (1 << CHAMBER_WIDTH) - 1;
const LEFT_WALL: u8 = 0b100_0000;
const RIGHT_WALL: u8 = 0b000_0001;

/// Rock shapes, bottom row first, flush against the left wall.
const SHAPES: [&[u8]; 5] = [
    &[0b111_1000],
    &[0b010_0000, 0b111_0000, 0b010_0000],
    &[0b111_0000, 0b001_0000, 0b001_0000],
    &[0b100_0000, 0b100_0000, 0b100_0000, 0b100_0000],
    &[0b110_0000, 0b110_0000],
];

/// Sideways push applied by one jet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Jet {
    Left,
    Right,
}

/// Cyclic sequence of jets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JetPattern(Vec<Jet>);

impl JetPattern {
    /// Parse a line of `<` and `>`; surrounding whitespace is ignored.
    pub fn parse(input: &str) -> Result<Self> {
        let jets = input
            .trim()
            .chars()
            .enumerate()
            .map(|(offset, found)| match found {
                '<' => Ok(Jet::Left),
                '>' => Ok(Jet::Right),
                found => Err(Error::InvalidJet { offset, found }),
            })
            .collect::<Result<Vec<_>>>()?;
        if jets.is_empty() {
            return Err(Error::EmptyInput {
                what: "jet pattern",
            });
        }
        Ok(Self(jets))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Configuration that decides how the tower grows from here on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TowerSignature {
    pub shape: usize,
    pub jet: usize,
    /// Empty cells a falling rock could still reach, one mask per row from
    /// the top down. Anything outside these cells (rock, floor, sealed
    /// cavities) behaves identically as far as future rocks are concerned.
    pub surface: Vec<u8>,
}

/// Tower state between two rocks.
#[derive(Debug, Clone)]
pub struct RockTower {
    jets: JetPattern,
    rows: Vec<u8>,
    next_shape: usize,
    next_jet: usize,
    rocks: u64,
}

impl RockTower {
    pub fn new(jets: JetPattern) -> Self {
        Self {
            jets,
            rows: Vec::new(),
            next_shape: 0,
            next_jet: 0,
            rocks: 0,
        }
    }

    /// Height of the settled tower.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Rocks settled so far.
    pub fn rocks(&self) -> u64 {
        self.rocks
    }

    /// Drop the next rock until it settles.
    pub fn drop_rock(&mut self) {
        let mut rock: Vec<u8> = SHAPES[self.next_shape].iter().map(|row| row >> 2).collect();
        self.next_shape = (self.next_shape + 1) % SHAPES.len();
        let mut bottom = self.rows.len() + 3;

        loop {
            let jet = self.jets.0[self.next_jet];
            self.next_jet = (self.next_jet + 1) % self.jets.len();
            if let Some(pushed) = push(&rock, jet) {
                if !self.collides(&pushed, bottom) {
                    rock = pushed;
                }
            }

            if bottom == 0 || self.collides(&rock, bottom - 1) {
                break;
            }
            bottom -= 1;
        }

        self.settle(&rock, bottom);
        self.rocks += 1;
    }

    fn collides(&self, rock: &[u8], bottom: usize) -> bool {
        rock.iter()
            .enumerate()
            .any(|(offset, row)| self.rows.get(bottom + offset).is_some_and(|r| r & row != 0))
    }

    fn settle(&mut self, rock: &[u8], bottom: usize) {
        let top = bottom + rock.len();
        if self.rows.len() < top {
            self.rows.resize(top, 0);
        }
        for (offset, row) in rock.iter().enumerate() {
            self.rows[bottom + offset] |= row;
        }
    }

    /// Flood the empty space below the open top, moving sideways and down
    /// only, as rock cells do. `None` once the flood passes
    /// [`SURFACE_DEPTH`] rows.
    fn surface(&self) -> Option<Vec<u8>> {
        let mut surface = Vec::new();
        let mut above = FULL_ROW;
        for row in self.rows.iter().rev() {
            let free = !row & FULL_ROW;
            let mut reach = above & free;
            loop {
                let spread = (reach | (reach << 1) | (reach >> 1)) & free;
                if spread == reach {
                    break;
                }
                reach = spread;
            }
            if reach == 0 {
                return Some(surface);
            }
            if surface.len() == SURFACE_DEPTH {
                return None;
            }
            surface.push(reach);
            above = reach;
        }
        // The floor closes the flood off like a solid row.
        Some(surface)
    }
}

fn push(rock: &[u8], jet: Jet) -> Option<Vec<u8>> {
    match jet {
        Jet::Left if rock.iter().all(|row| row & LEFT_WALL == 0) => {
            Some(rock.iter().map(|row| row << 1).collect())
        }
        Jet::Right if rock.iter().all(|row| row & RIGHT_WALL == 0) => {
            Some(rock.iter().map(|row| row >> 1).collect())
        }
        _ => None,
    }
}

impl Simulation for RockTower {
    type Signature = TowerSignature;

    fn signature(&self) -> Option<TowerSignature> {
        Some(TowerSignature {
            shape: self.next_shape,
            jet: self.next_jet,
            surface: self.surface()?,
        })
    }

    fn metric(&self) -> i64 {
        self.height() as i64
    }

    fn step(&mut self) {
        self.drop_rock();
    }
}

/// Tower height after `rocks` rocks, fast-forwarding through repeats.
pub fn tower_height(jets: &JetPattern, rocks: u64, limits: &CycleLimits) -> Result<CycleReport> {
    let mut tower = RockTower::new(jets.clone());
    fast_forward(&mut tower, rocks, limits)
}
