use std::fmt;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Search rejected ({status}): {message}")]
    Search { status: u16, message: String },

    #[error("Poll rejected ({status}): {message}")]
    Poll { status: u16, message: String },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Malformed page: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Departure {departure_id} references unknown {kind} {id}")]
    MissingReference {
        departure_id: String,
        kind: ReferenceKind,
        id: String,
    },

    #[error("Gave up after {0} polls without a complete result")]
    PollLimit(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    Origin,
    Destination,
    Operator,
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReferenceKind::Origin => "origin location",
            ReferenceKind::Destination => "destination location",
            ReferenceKind::Operator => "operator",
        };
        f.write_str(name)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
