//! Height map parsing and the hill-climbing search model.
//!
//! A height map is a rectangle of elevations `a..=z`. `S` marks the start
//! (elevation `a`) and `E` the end (elevation `z`). A step moves to one of the
//! four orthogonal neighbours and may climb at most one level, while dropping
//! any number of levels.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::model::{Cost, SearchModel};
use crate::search::{SearchEngine, SearchLimits, SearchOutcome};

/// Lowest elevation, also used for the `S` marker.
pub const LOWEST: u8 = b'a';
/// Highest elevation, also used for the `E` marker.
pub const HIGHEST: u8 = b'z';

/// Cell coordinate within a [`HeightMap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Position {
    pub row: usize,
    pub column: usize,
}

impl Position {
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }

    pub fn manhattan(&self, other: &Position) -> usize {
        self.row.abs_diff(other.row) + self.column.abs_diff(other.column)
    }
}

/// Rectangular grid of elevations with start and end markers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeightMap {
    width: usize,
    height: usize,
    cells: Vec<u8>,
    start: Position,
    end: Position,
}

impl HeightMap {
    /// Parse a height map, validating its shape and markers.
    ///
    /// Blank lines are ignored, so trailing newlines are harmless.
    pub fn parse(input: &str) -> Result<Self> {
        let rows: Vec<&str> = input
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.is_empty())
            .collect();
        let Some(first) = rows.first() else {
            return Err(Error::EmptyInput { what: "height map" });
        };

        let width = first.chars().count();
        let mut cells = Vec::with_capacity(width * rows.len());
        let mut start = None;
        let mut end = None;

        for (row, line) in rows.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(Error::NonRectangularGrid {
                    row,
                    expected: width,
                    found,
                });
            }

            for (column, marker) in line.chars().enumerate() {
                let position = Position::new(row, column);
                let elevation = match marker {
                    'a'..='z' => marker as u8,
                    'S' => {
                        if start.replace(position).is_some() {
                            return Err(Error::DuplicateMarker { marker });
                        }
                        LOWEST
                    }
                    'E' => {
                        if end.replace(position).is_some() {
                            return Err(Error::DuplicateMarker { marker });
                        }
                        HIGHEST
                    }
                    found => {
                        return Err(Error::InvalidCell { row, column, found });
                    }
                };
                cells.push(elevation);
            }
        }

        Ok(Self {
            width,
            height: rows.len(),
            cells,
            start: start.ok_or(Error::MissingMarker { marker: 'S' })?,
            end: end.ok_or(Error::MissingMarker { marker: 'E' })?,
        })
    }

    /// Build a map from raw elevation letters in row-major order, with the
    /// start and end at explicit positions instead of `S`/`E` markers.
    pub fn from_elevations(
        width: usize,
        cells: Vec<u8>,
        start: Position,
        end: Position,
    ) -> Result<Self> {
        if width == 0 || cells.is_empty() {
            return Err(Error::EmptyInput { what: "height map" });
        }
        let height = cells.len().div_ceil(width);
        if cells.len() != width * height {
            return Err(Error::NonRectangularGrid {
                row: height - 1,
                expected: width,
                found: cells.len() % width,
            });
        }
        if let Some(index) = cells.iter().position(|c| !(LOWEST..=HIGHEST).contains(c)) {
            return Err(Error::InvalidCell {
                row: index / width,
                column: index % width,
                found: cells[index] as char,
            });
        }
        for (marker, position) in [('S', start), ('E', end)] {
            if position.row >= height || position.column >= width {
                return Err(Error::MarkerOutOfBounds {
                    marker,
                    row: position.row,
                    column: position.column,
                });
            }
        }

        Ok(Self {
            width,
            height,
            cells,
            start,
            end,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn end(&self) -> Position {
        self.end
    }

    /// Elevation letter (`a..=z`) at `position`.
    ///
    /// # Panics
    ///
    /// Panics if `position` lies outside the map.
    pub fn elevation(&self, position: Position) -> u8 {
        self.cells[position.row * self.width + position.column]
    }

    /// Elevation letter at `position`, `None` outside the map.
    pub fn get(&self, position: Position) -> Option<u8> {
        if position.row < self.height && position.column < self.width {
            Some(self.elevation(position))
        } else {
            None
        }
    }

    /// In-bounds orthogonal neighbours of `position`.
    pub fn adjacent(&self, position: Position) -> impl Iterator<Item = Position> + '_ {
        let Position { row, column } = position;
        [
            row.checked_sub(1).map(|r| Position::new(r, column)),
            (row + 1 < self.height).then(|| Position::new(row + 1, column)),
            column.checked_sub(1).map(|c| Position::new(row, c)),
            (column + 1 < self.width).then(|| Position::new(row, column + 1)),
        ]
        .into_iter()
        .flatten()
    }
}

/// Which way edges are followed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Follow climbing rules forwards (climb at most one level per step).
    Ascend,
    /// Follow climbing rules backwards, as if walking a path from its end.
    Descend,
}

/// Goal of a climbing search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClimbTarget {
    /// A specific square.
    Cell(Position),
    /// Any square with this elevation letter.
    Elevation(u8),
}

/// [`SearchModel`] over a [`HeightMap`] with unit step costs.
///
/// A [`ClimbTarget::Cell`] outside the map is never reached; searching for it
/// ends as unreachable.
#[derive(Debug, Clone, Copy)]
pub struct ClimbModel<'a> {
    map: &'a HeightMap,
    direction: Direction,
}

impl<'a> ClimbModel<'a> {
    pub fn new(map: &'a HeightMap, direction: Direction) -> Self {
        Self { map, direction }
    }

    fn can_step(&self, from: Position, to: Position) -> bool {
        let from = self.map.elevation(from);
        let to = self.map.elevation(to);
        match self.direction {
            Direction::Ascend => to <= from + 1,
            Direction::Descend => from <= to + 1,
        }
    }
}

impl SearchModel for ClimbModel<'_> {
    type State = Position;
    type Target = ClimbTarget;

    fn neighbors(&self, state: &Position) -> Vec<(Position, Cost)> {
        self.map
            .adjacent(*state)
            .filter(|next| self.can_step(*state, *next))
            .map(|next| (next, 1))
            .collect()
    }

    /// Every step changes elevation by at most one level in the direction of
    /// travel and moves one square, so both distances are lower bounds.
    fn heuristic(&self, state: &Position, target: &ClimbTarget) -> Cost {
        let current = self.map.elevation(*state);
        let (goal_elevation, walk) = match target {
            ClimbTarget::Cell(goal) => match self.map.get(*goal) {
                Some(elevation) => (elevation, state.manhattan(goal)),
                None => return 0,
            },
            ClimbTarget::Elevation(elevation) => (*elevation, 0),
        };
        let levels = match self.direction {
            Direction::Ascend => goal_elevation.saturating_sub(current),
            Direction::Descend => current.saturating_sub(goal_elevation),
        };
        walk.max(levels as usize) as Cost
    }

    fn is_target(&self, state: &Position, target: &ClimbTarget) -> bool {
        match target {
            ClimbTarget::Cell(goal) => state == goal,
            ClimbTarget::Elevation(elevation) => self.map.elevation(*state) == *elevation,
        }
    }
}

/// Fewest steps from `S` to `E`.
pub fn shortest_ascent(map: &HeightMap, limits: SearchLimits) -> Result<SearchOutcome<Position>> {
    let model = ClimbModel::new(map, Direction::Ascend);
    SearchEngine::new(&model)
        .with_limits(limits)
        .find_shortest(map.start(), &ClimbTarget::Cell(map.end()))
}

/// Fewest steps from any square of `elevation` to `E`, found by walking
/// backwards from `E`. The returned path runs from `E` to that square.
pub fn shortest_descent(
    map: &HeightMap,
    elevation: u8,
    limits: SearchLimits,
) -> Result<SearchOutcome<Position>> {
    let model = ClimbModel::new(map, Direction::Descend);
    SearchEngine::new(&model)
        .with_limits(limits)
        .find_shortest(map.end(), &ClimbTarget::Elevation(elevation))
}
