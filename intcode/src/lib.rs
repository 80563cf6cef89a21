//! A resumable intcode virtual machine and the amplifier ring built on it.
//!
//! Programs are flat, self-modifying arrays of signed 64-bit integers. A
//! [`Machine`] owns one copy of a program and can be re-entered after it
//! blocks on input; the amplifier ring wires five machines into a pipeline
//! or a feedback loop and searches phase-setting permutations for the
//! strongest thruster signal.

use std::fs::File;
use std::io::Read;
use std::num::ParseIntError;

mod amplifier;
mod error;
mod machine;
mod memory;
mod opcode;

pub use crate::amplifier::{maximize, AmplifierError, Amplifiers, Configuration};
pub use crate::error::Error;
pub use crate::machine::{Machine, Status};

/// Errors produced while reading a program literal.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid program value {value:?}: {source}")]
    Int {
        value: String,
        source: ParseIntError,
    },
}

/// Read a comma-separated program from a file.
pub fn parse(file_name: &str) -> Result<Vec<i64>, ParseError> {
    let mut file = File::open(file_name)?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;
    parse_program(&contents)
}

/// Parse a comma-separated program literal. Whitespace around values and
/// empty trailing entries are tolerated.
pub fn parse_program(contents: &str) -> Result<Vec<i64>, ParseError> {
    contents
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<i64>().map_err(|source| ParseError::Int {
                value: s.to_owned(),
                source,
            })
        })
        .collect()
}
