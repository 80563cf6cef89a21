use std::collections::VecDeque;

use thiserror::Error;
use tracing::debug;

use crate::error::Error as MachineError;
use crate::machine::{Machine, Status};

/// Failure modes of the amplifier ring.
#[derive(Debug, Error)]
pub enum AmplifierError {
    /// An amplifier finished without ever emitting the signal its successor
    /// needs.
    #[error("amplifier produced no output signal")]
    NoSignal,
    #[error(transparent)]
    Machine(#[from] MachineError),
}

/// Ring topology: one pass through the amplifiers, or a feedback loop that
/// keeps cycling until the last amplifier halts.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Configuration {
    Simple,
    Looped,
}

impl Configuration {
    /// The phase settings the search permutes for this topology.
    pub fn phase_settings(self) -> [i64; 5] {
        match self {
            Configuration::Simple => [0, 1, 2, 3, 4],
            Configuration::Looped => [5, 6, 7, 8, 9],
        }
    }
}

/// A chain of amplifiers sharing one program template. Each amplifier gets
/// its own memory copy at construction; its first input is its phase
/// setting, and every input after that is the signal carried around the
/// ring.
pub struct Amplifiers<'a> {
    init_mem: &'a [i64],
    phase_settings: &'a [i64],
    config: Configuration,
}

impl<'a> Amplifiers<'a> {
    pub fn new(init_mem: &'a [i64], phase_settings: &'a [i64], config: Configuration) -> Self {
        Self {
            init_mem,
            phase_settings,
            config,
        }
    }

    /// Drive the ring once with this exact phase ordering and return the
    /// final thruster signal.
    pub fn run(&self) -> Result<i64, AmplifierError> {
        match self.config {
            Configuration::Simple => self.run_single_pass(),
            Configuration::Looped => self.run_feedback_loop(),
        }
    }

    fn run_single_pass(&self) -> Result<i64, AmplifierError> {
        let mut signal = 0;
        for &phase_setting in self.phase_settings {
            let mut machine = Machine::new(self.init_mem.to_vec());
            let mut inputs = VecDeque::from(vec![phase_setting, signal]);
            let outputs = machine.run(&mut inputs)?;
            signal = outputs.last().copied().ok_or(AmplifierError::NoSignal)?;
        }

        Ok(signal)
    }

    // One resumable machine per amplifier, advanced strictly round-robin.
    // Each turn runs with exactly the inputs that arrived since the machine
    // last suspended: the phase setting plus the signal on its first turn,
    // the signal alone after that. The ring is done when the last amplifier
    // halts; its final output is the thruster signal.
    fn run_feedback_loop(&self) -> Result<i64, AmplifierError> {
        let count = self.phase_settings.len();
        let mut amps: Vec<Option<Machine>> = (0..count).map(|_| None).collect();
        let mut signal = 0;
        let mut thrust = None;
        let mut idx = 0;
        loop {
            let mut inputs = if amps[idx].is_none() {
                VecDeque::from(vec![self.phase_settings[idx], signal])
            } else {
                VecDeque::from(vec![signal])
            };
            let amp = amps[idx].get_or_insert_with(|| Machine::new(self.init_mem.to_vec()));
            let outputs = amp.run(&mut inputs)?;
            if let Some(&first) = outputs.first() {
                signal = first;
            }
            if idx == count - 1 {
                if let Some(&last) = outputs.last() {
                    thrust = Some(last);
                }
                if amp.status() == Status::Halted {
                    return thrust.ok_or(AmplifierError::NoSignal);
                }
            }
            idx = (idx + 1) % count;
        }
    }
}

/// Search every permutation of the configuration's phase settings and return
/// the strongest thruster signal. Any machine failure aborts the search.
pub fn maximize(init_mem: &[i64], config: Configuration) -> Result<i64, AmplifierError> {
    let mut phase_settings = config.phase_settings();
    let size = phase_settings.len();
    max_amp_util(init_mem, config, &mut phase_settings, size)
}

// Heap's algorithm: permutes the phase settings in place, running the ring
// once per permutation.
fn max_amp_util(
    init_mem: &[i64],
    config: Configuration,
    phase_settings: &mut [i64],
    size: usize,
) -> Result<i64, AmplifierError> {
    if size == 1 {
        let signal = Amplifiers::new(init_mem, phase_settings, config).run()?;
        debug!(settings = ?&*phase_settings, signal, "ring finished");
        return Ok(signal);
    }

    let mut max = i64::MIN;
    for i in 0..size {
        let res = max_amp_util(init_mem, config, phase_settings, size - 1)?;
        if res > max {
            max = res;
        }

        if size % 2 == 1 {
            phase_settings.swap(0, size - 1);
        } else {
            phase_settings.swap(i, size - 1);
        }
    }

    Ok(max)
}
