use thiserror::Error;

/// Convenient result alias for the trailhead library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when an input file contained nothing to parse.
    #[error("{what} input is empty")]
    EmptyInput { what: &'static str },

    /// Raised when a height map row does not match the width of the first row.
    #[error("height map row {row} has {found} columns, expected {expected}")]
    NonRectangularGrid {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Raised when a height map contains a character outside `a..=z`, `S`, `E`.
    #[error("invalid height map character {found:?} at row {row}, column {column}")]
    InvalidCell {
        row: usize,
        column: usize,
        found: char,
    },

    /// Raised when a required start/end marker is absent.
    #[error("height map is missing the '{marker}' marker")]
    MissingMarker { marker: char },

    /// Raised when a start/end marker occurs more than once.
    #[error("height map contains more than one '{marker}' marker")]
    DuplicateMarker { marker: char },

    /// Raised when an explicit start/end position lies outside the map.
    #[error("'{marker}' position ({row}, {column}) lies outside the height map")]
    MarkerOutOfBounds {
        marker: char,
        row: usize,
        column: usize,
    },

    /// Raised when a valve description line cannot be parsed.
    #[error("invalid valve description on line {line}: {message}")]
    InvalidValveLine { line: usize, message: String },

    /// Raised when a tunnel or the start references a valve that was never described.
    #[error("unknown valve: {name}")]
    UnknownValve { name: String },

    /// Raised when the valve network has more flowing valves than the open-set bitmask holds.
    #[error("valve network has {count} valves with positive flow; at most {max} are supported")]
    TooManyValves { count: usize, max: usize },

    /// Raised when two lines describe the same valve.
    #[error("valve {name} is described more than once (again on line {line})")]
    DuplicateValve { name: String, line: usize },

    /// Raised when a blueprint line does not follow the expected wording.
    #[error("invalid blueprint on line {line}: {message}")]
    InvalidBlueprint { line: usize, message: String },

    /// Raised when a jet pattern contains anything other than `<` or `>`.
    #[error("invalid jet {found:?} at offset {offset}")]
    InvalidJet { offset: usize, found: char },

    /// Raised when a search expands more states than its configured cap.
    #[error("search aborted after {limit} expansions without exhausting the frontier")]
    ExpansionLimitExceeded { limit: usize },

    /// Raised when the frontier grows past its configured cap.
    #[error("search frontier exceeded {limit} pending entries")]
    FrontierLimitExceeded { limit: usize },

    /// Raised when a simulation runs past its configured cap without repeating a signature.
    #[error("no repeated signature within {limit} steps")]
    HistoryLimitExceeded { limit: usize },
}
