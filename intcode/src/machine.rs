use std::collections::VecDeque;

use tracing::trace;

use crate::error::Error;
use crate::memory::Memory;
use crate::opcode::{Incr, OpCode};

/// Where a machine stopped at the end of an invocation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Status {
    Running,
    Halted,
    /// An Input instruction found the queue empty. The pointer is still on
    /// that instruction; supply more input and call [`Machine::run`] again.
    WaitingForInput,
}

// Models a simple machine with memory, a program counter and a relative base
pub struct Machine {
    mem: Memory,
    ctr: usize,
    rel: i64,
    status: Status,
}

impl Machine {
    /// Build a machine over its own copy of a program, pointer at 0 and
    /// relative base 0.
    pub fn new(mem: Vec<i64>) -> Self {
        Machine {
            mem: Memory::new(mem),
            ctr: 0,
            rel: 0,
            status: Status::Running,
        }
    }

    /// Process the op codes in memory until the program halts or blocks on
    /// input. Outputs produced during this invocation are returned in
    /// execution order; the machine itself is the snapshot needed to resume
    /// a blocked run. Inputs are popped from the front of the queue, and
    /// whatever is still queued when the run stops stays with the caller.
    pub fn run(&mut self, inputs: &mut VecDeque<i64>) -> Result<Vec<i64>, Error> {
        let mut outputs = Vec::new();
        while self.ctr < self.mem.len() {
            let op_code = OpCode::from(&self.mem, self.ctr)?;
            trace!(ctr = self.ctr, rel = self.rel, op = ?op_code, "exec");
            let effect = op_code.exec(&mut self.mem, inputs, self.rel)?;
            self.rel = effect.relative_base;
            if let Some(output) = effect.output {
                outputs.push(output);
            }
            self.ctr = match effect.incr {
                Incr::Offset(offset) => self.ctr + offset,
                Incr::Jump(address) => address,
                Incr::Wait => {
                    self.status = Status::WaitingForInput;
                    return Ok(outputs);
                }
                Incr::Exit => {
                    self.status = Status::Halted;
                    return Ok(outputs);
                }
            };
        }

        Err(Error::ProgramNotHalted)
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn pointer(&self) -> usize {
        self.ctr
    }

    pub fn relative_base(&self) -> i64 {
        self.rel
    }

    /// View of the machine's memory as of the last executed instruction.
    pub fn memory(&self) -> &[i64] {
        self.mem.as_slice()
    }
}
