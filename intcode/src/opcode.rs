use std::collections::VecDeque;
use std::convert::TryFrom;

use crate::error::Error;
use crate::memory::Memory;

fn address(raw: i64) -> Result<usize, Error> {
    usize::try_from(raw).map_err(|_| Error::InvalidAddress(raw))
}

/// How a single parameter resolves to an operand. The raw parameter value is
/// carried inside the variant so an instruction decodes in one pass.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Mode {
    Position(i64),
    Immediate(i64),
    Relative(i64),
}

impl Mode {
    fn from(mode_spec: i64, mem: &Memory, idx: usize, off: usize) -> Result<Self, Error> {
        let mode = mode_spec / 10i64.pow(off as u32) % 10;
        let val = mem.read(idx + off);
        match mode {
            0 => Ok(Mode::Position(val)),
            1 => Ok(Mode::Immediate(val)),
            2 => Ok(Mode::Relative(val)),
            _ => Err(Error::InvalidMode {
                mode,
                pointer: idx + off,
            }),
        }
    }

    fn val(&self, mem: &Memory, rel: i64) -> Result<i64, Error> {
        match *self {
            Mode::Position(adr) => Ok(mem.read(address(adr)?)),
            Mode::Immediate(val) => Ok(val),
            Mode::Relative(off) => Ok(mem.read(address(rel + off)?)),
        }
    }

    /// Effective address of a write target. Write targets never resolve
    /// through immediate mode.
    fn adr(&self, rel: i64) -> Result<usize, Error> {
        match *self {
            Mode::Position(adr) => address(adr),
            Mode::Relative(off) => address(rel + off),
            Mode::Immediate(_) => Err(Error::ImmediateWrite),
        }
    }
}

/// Pointer control handed back by an executed instruction.
#[derive(Debug)]
pub(crate) enum Incr {
    Offset(usize),
    Jump(usize),
    /// Input instruction found an empty queue; the pointer stays put so the
    /// same instruction re-executes on resume.
    Wait,
    Exit,
}

/// Explicit result of executing one instruction: pointer control, the output
/// emitted this step (if any), and the relative base going forward.
#[derive(Debug)]
pub(crate) struct Effect {
    pub incr: Incr,
    pub output: Option<i64>,
    pub relative_base: i64,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
// Models the possible commands available to this "machine"
pub(crate) enum OpCode {
    Add { r1: Mode, r2: Mode, o: Mode },
    Mul { r1: Mode, r2: Mode, o: Mode },
    Ipt { adr: Mode },
    Opt { o: Mode },
    Jtr { r1: Mode, jmp: Mode },
    Jfl { r1: Mode, jmp: Mode },
    Les { r1: Mode, r2: Mode, o: Mode },
    Eql { r1: Mode, r2: Mode, o: Mode },
    Crl { off: Mode },
    Ext,
}

impl OpCode {
    /// Decode an OpCode from a specific region of memory
    pub(crate) fn from(mem: &Memory, idx: usize) -> Result<Self, Error> {
        let instruction = mem.read(idx);
        // The opcode is the low two decimal digits regardless of sign, so a
        // cell holding -99 still halts.
        let op_code = (instruction % 100).abs();
        let mode_spec = instruction / 100;
        let pidx = idx + 1;
        match op_code {
            1 => Ok(OpCode::Add {
                r1: Mode::from(mode_spec, mem, pidx, 0)?,
                r2: Mode::from(mode_spec, mem, pidx, 1)?,
                o: Mode::from(mode_spec, mem, pidx, 2)?,
            }),
            2 => Ok(OpCode::Mul {
                r1: Mode::from(mode_spec, mem, pidx, 0)?,
                r2: Mode::from(mode_spec, mem, pidx, 1)?,
                o: Mode::from(mode_spec, mem, pidx, 2)?,
            }),
            3 => Ok(OpCode::Ipt {
                adr: Mode::from(mode_spec, mem, pidx, 0)?,
            }),
            4 => Ok(OpCode::Opt {
                o: Mode::from(mode_spec, mem, pidx, 0)?,
            }),
            5 => Ok(OpCode::Jtr {
                r1: Mode::from(mode_spec, mem, pidx, 0)?,
                jmp: Mode::from(mode_spec, mem, pidx, 1)?,
            }),
            6 => Ok(OpCode::Jfl {
                r1: Mode::from(mode_spec, mem, pidx, 0)?,
                jmp: Mode::from(mode_spec, mem, pidx, 1)?,
            }),
            7 => Ok(OpCode::Les {
                r1: Mode::from(mode_spec, mem, pidx, 0)?,
                r2: Mode::from(mode_spec, mem, pidx, 1)?,
                o: Mode::from(mode_spec, mem, pidx, 2)?,
            }),
            8 => Ok(OpCode::Eql {
                r1: Mode::from(mode_spec, mem, pidx, 0)?,
                r2: Mode::from(mode_spec, mem, pidx, 1)?,
                o: Mode::from(mode_spec, mem, pidx, 2)?,
            }),
            9 => Ok(OpCode::Crl {
                off: Mode::from(mode_spec, mem, pidx, 0)?,
            }),
            99 => Ok(OpCode::Ext),
            _ => Err(Error::InvalidOpcode {
                code: op_code,
                pointer: idx,
            }),
        }
    }

    // Execute the OpCode against the passed in memory. State comes in as
    // arguments and leaves as an explicit Effect; nothing is threaded
    // through shared mutable captures.
    pub(crate) fn exec(
        self,
        mem: &mut Memory,
        inputs: &mut VecDeque<i64>,
        rel: i64,
    ) -> Result<Effect, Error> {
        let mut output = None;
        let mut relative_base = rel;
        let incr = match self {
            OpCode::Ext => Incr::Exit,
            OpCode::Add { r1, r2, o } => {
                let val = r1.val(mem, rel)? + r2.val(mem, rel)?;
                mem.write(o.adr(rel)?, val);
                Incr::Offset(self.len())
            }
            OpCode::Mul { r1, r2, o } => {
                let val = r1.val(mem, rel)? * r2.val(mem, rel)?;
                mem.write(o.adr(rel)?, val);
                Incr::Offset(self.len())
            }
            OpCode::Ipt { adr } => match inputs.pop_front() {
                Some(input) => {
                    mem.write(adr.adr(rel)?, input);
                    Incr::Offset(self.len())
                }
                None => Incr::Wait,
            },
            OpCode::Opt { o } => {
                output = Some(o.val(mem, rel)?);
                Incr::Offset(self.len())
            }
            OpCode::Jtr { r1, jmp } => {
                if r1.val(mem, rel)? != 0 {
                    Incr::Jump(address(jmp.val(mem, rel)?)?)
                } else {
                    Incr::Offset(self.len())
                }
            }
            OpCode::Jfl { r1, jmp } => {
                if r1.val(mem, rel)? == 0 {
                    Incr::Jump(address(jmp.val(mem, rel)?)?)
                } else {
                    Incr::Offset(self.len())
                }
            }
            OpCode::Les { r1, r2, o } => {
                let val = if r1.val(mem, rel)? < r2.val(mem, rel)? {
                    1
                } else {
                    0
                };
                mem.write(o.adr(rel)?, val);
                Incr::Offset(self.len())
            }
            OpCode::Eql { r1, r2, o } => {
                let val = if r1.val(mem, rel)? == r2.val(mem, rel)? {
                    1
                } else {
                    0
                };
                mem.write(o.adr(rel)?, val);
                Incr::Offset(self.len())
            }
            OpCode::Crl { off } => {
                relative_base = rel + off.val(mem, rel)?;
                Incr::Offset(self.len())
            }
        };

        Ok(Effect {
            incr,
            output,
            relative_base,
        })
    }

    fn len(&self) -> usize {
        match self {
            OpCode::Add { .. } | OpCode::Mul { .. } | OpCode::Les { .. } | OpCode::Eql { .. } => 4,
            OpCode::Jtr { .. } | OpCode::Jfl { .. } => 3,
            OpCode::Ipt { .. } | OpCode::Opt { .. } | OpCode::Crl { .. } => 2,
            OpCode::Ext => 1,
        }
    }
}
