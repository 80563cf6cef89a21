use thiserror::Error;

/// Failure modes of a running machine. Every variant indicates a defect in
/// the supplied program or its driver; none of them are retryable, so they
/// unwind straight out of the run loop.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("unexpected opcode {code} at address {pointer}")]
    InvalidOpcode { code: i64, pointer: usize },
    #[error("unexpected mode param {mode} for parameter at address {pointer}")]
    InvalidMode { mode: i64, pointer: usize },
    #[error("address {0} is outside the machine's address space")]
    InvalidAddress(i64),
    #[error("addresses in immediate mode not supported")]
    ImmediateWrite,
    #[error("program ran past the end of memory without halting")]
    ProgramNotHalted,
}
