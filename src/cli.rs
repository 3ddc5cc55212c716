// Argument parsing shared by the `invert` and `oil` binaries. Both tools take
// positional arguments only, validate them before any image is touched, and
// exit 1 on the first problem.

use std::path::PathBuf;
use thiserror::Error;

pub const INVERT_USAGE: &str = "Usage: invert <input file> <# threads>";
pub const OIL_USAGE: &str = "Usage: oil <input file> <radius> <# threads>";

/// Fixed output file names, as the original tools wrote them.
pub const INVERT_OUTPUT: &str = "inverted.jpg";
pub const OIL_OUTPUT: &str = "oiled.jpg";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArgumentError {
    #[error("missing required argument: {0}")]
    Missing(&'static str),
    #[error("{name} must be a number, got '{value}'")]
    NotANumber { name: &'static str, value: String },
    #[error("{name} {reason}")]
    OutOfRange {
        name: &'static str,
        reason: &'static str,
    },
}

/// Parses a thread count, rejecting non-numbers and anything below 1.
pub fn parse_worker_count(raw: &str) -> Result<usize, ArgumentError> {
    let parsed: i64 = raw.parse().map_err(|_| ArgumentError::NotANumber {
        name: "thread count",
        value: raw.to_string(),
    })?;
    if parsed < 1 {
        return Err(ArgumentError::OutOfRange {
            name: "thread count",
            reason: "must be at least 1",
        });
    }
    Ok(parsed as usize)
}

/// Parses an oil radius, rejecting non-numbers and negative values.
pub fn parse_radius(raw: &str) -> Result<u32, ArgumentError> {
    let parsed: i64 = raw.parse().map_err(|_| ArgumentError::NotANumber {
        name: "radius",
        value: raw.to_string(),
    })?;
    if parsed < 0 {
        return Err(ArgumentError::OutOfRange {
            name: "radius",
            reason: "must not be negative",
        });
    }
    u32::try_from(parsed).map_err(|_| ArgumentError::OutOfRange {
        name: "radius",
        reason: "is too large",
    })
}

/// `invert <input file> <# threads>`
#[derive(Debug, PartialEq, Eq)]
pub struct InvertCommand {
    pub input: PathBuf,
    pub workers: usize,
}

impl InvertCommand {
    pub fn parse(args: &[String]) -> Result<Self, ArgumentError> {
        let input = args.first().ok_or(ArgumentError::Missing("input file"))?;
        let workers = parse_worker_count(args.get(1).ok_or(ArgumentError::Missing("thread count"))?)?;
        Ok(Self {
            input: PathBuf::from(input),
            workers,
        })
    }
}

/// `oil <input file> <radius> <# threads>`
#[derive(Debug, PartialEq, Eq)]
pub struct OilCommand {
    pub input: PathBuf,
    pub radius: u32,
    pub workers: usize,
}

impl OilCommand {
    pub fn parse(args: &[String]) -> Result<Self, ArgumentError> {
        let input = args.first().ok_or(ArgumentError::Missing("input file"))?;
        let radius = parse_radius(args.get(1).ok_or(ArgumentError::Missing("radius"))?)?;
        let workers = parse_worker_count(args.get(2).ok_or(ArgumentError::Missing("thread count"))?)?;
        Ok(Self {
            input: PathBuf::from(input),
            radius,
            workers,
        })
    }
}
